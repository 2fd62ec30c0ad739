//! # Synchronization Disciplines
//!
//! Every actor in a gazette process brackets its touch of the shared
//! page through exactly one of the primitives in this module.
//!
//! ## The Menu
//!
//! ```text
//! Gate (one shared page, two competing composers):
//!   SignalGate    - binary signal, armed once after creation
//!   CountingGate  - bounded counter, capacity 1, born available
//!   ExclusiveGate - plain mutual exclusion
//!   OpenGate      - nothing at all (watch the page tear)
//!
//! CohortLock (N readers, one writer):
//!   first reader claims the document, last reader returns it
//!
//! Rendezvous (two actors, once, at startup):
//!   each signals readiness, each waits - bounded - for the other
//! ```
//!
//! Misses are normal: a failed `try_enter` means the actor sits this
//! cycle out and lets its period try again.

mod cohort;
mod gate;
mod rendezvous;

pub use cohort::{CohortLock, CohortStats};
pub use gate::{CountingGate, ExclusiveGate, Gate, OpenGate, SignalGate, Strategy};
pub use rendezvous::{Rendezvous, RendezvousOutcome, RendezvousParty};
