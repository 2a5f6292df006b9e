use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Tag handed out for one caption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Lets a caller that fires overlapping "regenerate" requests keep only the
/// newest result.
///
/// Call [`begin`](Self::begin) before starting a request and
/// [`is_current`](Self::is_current) when its result arrives; a result whose
/// ticket is no longer current should be discarded. Clones share the same
/// counter.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the most recently started request.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
