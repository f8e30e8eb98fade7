use std::fmt;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Identifies one fetch issued by a session. Completions carry it back so a
/// session can tell its current request from a superseded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cancellation handle handed to whoever performs the fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub id: RequestId,
    pub token: CancellationToken,
}

impl FetchTicket {
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Debug)]
struct InFlight {
    id: RequestId,
    guard: DropGuard,
}

/// Tracks the single in-flight request of a session.
///
/// Starting a request or dropping the tracker cancels whatever was in flight.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_id: u64,
    current: Option<InFlight>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the previous request (if any) and issue a new ticket.
    pub fn begin(&mut self) -> FetchTicket {
        self.cancel();

        let id = RequestId(self.next_id);
        self.next_id += 1;

        let token = CancellationToken::new();
        self.current = Some(InFlight {
            id,
            guard: token.clone().drop_guard(),
        });
        FetchTicket { id, token }
    }

    /// Returns true if a request was actually cancelled.
    pub fn cancel(&mut self) -> bool {
        // Dropping the guard cancels the token
        self.current.take().is_some()
    }

    /// Accept a completion. Returns false for anything but the current request.
    pub fn finish(&mut self, id: RequestId) -> bool {
        match self.current.take() {
            Some(in_flight) if in_flight.id == id => {
                in_flight.guard.disarm();
                true
            }
            other => {
                self.current = other;
                false
            }
        }
    }

    pub fn in_flight(&self) -> Option<RequestId> {
        self.current.as_ref().map(|in_flight| in_flight.id)
    }
}
