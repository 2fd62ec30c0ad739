//! # GAZETTE Core
//!
//! Synchronization disciplines over a single shared mutable page:
//! - A fixed-capacity page buffer whose compose operation is deliberately
//!   slow, so that an incorrectly guarded writer is visibly preempted
//!   mid-copy
//! - Four pluggable exclusion gates sharing one enter/leave contract
//! - A first-reader/last-reader cohort lock for N readers and one writer
//! - A one-shot two-party rendezvous barrier
//!
//! ## Architecture Rules
//!
//! 1. **Exactly one gate active per process** - the [`Strategy`] variant is
//!    chosen once at startup, never swapped at runtime
//! 2. **No globals** - the page and every gate are owned by the caller and
//!    shared by reference
//! 3. **Misses are not errors** - a failed non-blocking enter means "skip
//!    this cycle", never a retry loop
//!
//! ## Example
//!
//! ```rust,ignore
//! use gazette_core::{PageBuffer, Strategy};
//!
//! let page = PageBuffer::new();
//! let gate = Strategy::Exclusive.build();
//! if gate.try_enter() {
//!     page.compose("stop the presses", &|| {});
//!     gate.leave();
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod page;
pub mod sync;

pub use error::{GazetteError, GazetteResult};
pub use page::{spin_pace, PageBuffer, PAGE_CAPACITY};
pub use sync::{
    CohortLock, CohortStats, CountingGate, ExclusiveGate, Gate, OpenGate, Rendezvous,
    RendezvousOutcome, RendezvousParty, SignalGate, Strategy,
};
