//! # Two-Party Rendezvous
//!
//! A one-shot mutual handshake: each party marks itself ready exactly
//! once, then waits - bounded - for the counterpart. Best-effort
//! ordering for demonstration startup, not a correctness gate: a party
//! whose wait elapses proceeds anyway, after exactly its configured
//! timeout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// What a party observed at its meeting point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendezvousOutcome {
    /// The counterpart's readiness was observed in time.
    Met,
    /// The configured wait elapsed first; the party proceeds alone.
    TimedOut,
}

/// Shared meeting state for exactly two parties.
pub struct Rendezvous {
    /// One readiness flag per party, each set exactly once.
    ready: Mutex<[bool; 2]>,
    cv: Condvar,
}

impl Rendezvous {
    /// Creates the meeting point and hands each party its ticket.
    ///
    /// Each party waits with its own bound; the two need not agree on
    /// how patient they are.
    #[must_use]
    pub fn pair(wait_a: Duration, wait_b: Duration) -> (RendezvousParty, RendezvousParty) {
        let shared = Arc::new(Self {
            ready: Mutex::new([false; 2]),
            cv: Condvar::new(),
        });
        (
            RendezvousParty {
                shared: Arc::clone(&shared),
                side: 0,
                wait: wait_a,
            },
            RendezvousParty {
                shared,
                side: 1,
                wait: wait_b,
            },
        )
    }
}

/// One party's single-use ticket to the meeting point.
///
/// Consumed by [`RendezvousParty::meet`], which enforces the
/// signal-exactly-once rule at the type level.
pub struct RendezvousParty {
    shared: Arc<Rendezvous>,
    side: usize,
    wait: Duration,
}

impl RendezvousParty {
    /// The wait bound this party was configured with.
    #[must_use]
    pub fn configured_wait(&self) -> Duration {
        self.wait
    }

    /// Signals readiness, then waits up to the configured bound for the
    /// counterpart.
    ///
    /// Never blocks past the bound and never errors: a missing
    /// counterpart degrades to [`RendezvousOutcome::TimedOut`].
    #[must_use]
    pub fn meet(self) -> RendezvousOutcome {
        let other = 1 - self.side;
        let deadline = Instant::now() + self.wait;

        let mut ready = self.shared.ready.lock();
        ready[self.side] = true;
        self.shared.cv.notify_all();

        while !ready[other] {
            if self.shared.cv.wait_until(&mut ready, deadline).timed_out() {
                // One last look: the counterpart may have arrived in
                // the same instant the deadline fired.
                return if ready[other] {
                    RendezvousOutcome::Met
                } else {
                    RendezvousOutcome::TimedOut
                };
            }
        }
        RendezvousOutcome::Met
    }
}
