use parking_lot::Mutex;
use serde::Serialize;

/// The three-state view contract: `idle -> loading -> (success | error)`,
/// re-entering `loading` on every new refresh.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Proof that a refresh was begun. Must be handed back to [`Feed::complete`].
#[derive(Debug)]
pub struct FeedTicket(u64);

struct FeedInner<T> {
    seq: u64,
    snapshot: FeedSnapshot<T>,
}

/// Latest-wins async state holder.
///
/// Every refresh takes a ticket from a monotonically increasing sequence. A
/// completion whose ticket is no longer the newest is discarded, so the feed
/// reflects the most recently *issued* request rather than the most recently
/// *arriving* response. Ticket check and state update happen under one lock,
/// so a refresh beginning concurrently can never let a stale completion
/// through.
pub struct Feed<T> {
    inner: Mutex<FeedInner<T>>,
}

impl<T: Clone> Feed<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(FeedInner {
                seq: 0,
                snapshot: FeedSnapshot { data: None, is_loading: false, error: None },
            }),
        }
    }

    /// Marks the feed as loading and returns the ticket for this refresh.
    pub fn begin(&self) -> FeedTicket {
        let mut inner = self.inner.lock();
        inner.seq += 1;
        inner.snapshot.is_loading = true;
        FeedTicket(inner.seq)
    }

    /// Applies the outcome of a refresh. Returns false (and changes nothing)
    /// when a newer refresh has begun since the ticket was issued.
    pub fn complete(&self, ticket: FeedTicket, result: Result<T, String>) -> bool {
        let mut inner = self.inner.lock();
        if ticket.0 != inner.seq {
            return false;
        }
        inner.snapshot.is_loading = false;
        match result {
            Ok(data) => {
                inner.snapshot.data = Some(data);
                inner.snapshot.error = None;
            }
            Err(e) => {
                inner.snapshot.error = Some(e);
            }
        }
        true
    }

    pub fn snapshot(&self) -> FeedSnapshot<T> {
        self.inner.lock().snapshot.clone()
    }
}

impl<T: Clone> Default for Feed<T> {
    fn default() -> Self {
        Self::new()
    }
}
