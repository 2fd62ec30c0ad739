//! # Exclusion Gates
//!
//! Four interchangeable critical-section disciplines behind one
//! contract: [`Gate`]. Three of them guarantee a single holder at a
//! time; [`OpenGate`] guarantees nothing and exists so the failure mode
//! can be demonstrated on purpose.
//!
//! ## Contract
//!
//! - `try_enter` never blocks; a `false` means "skip this cycle"
//! - `enter` / `enter_for` may suspend the calling thread
//! - `leave` must pair with a successful enter; see each variant for
//!   what happens when it doesn't
//!
//! Exactly one gate is active per process. The variant is picked once,
//! at startup, through [`Strategy`].

use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// Common enter/leave contract for all exclusion disciplines.
pub trait Gate: Send + Sync {
    /// Claims the gate without blocking. Returns `false` on contention.
    fn try_enter(&self) -> bool;

    /// Claims the gate, suspending the calling thread until it is free.
    fn enter(&self);

    /// Claims the gate, suspending the calling thread up to `timeout`.
    /// Returns `false` if the wait elapsed first.
    fn enter_for(&self, timeout: Duration) -> bool;

    /// Releases the gate.
    ///
    /// Calling this without a prior successful enter is a caller
    /// contract violation. Variants that can detect it panic; see their
    /// documentation.
    fn leave(&self);
}

/// Binary signal gate.
///
/// Created **unavailable**: a freshly built signal holds no permit, so
/// whoever assembles the process must `leave()` it exactly once to arm
/// it before the first actor runs ([`Strategy::build`] does this).
///
/// `leave()` raises the signal unconditionally. Releasing without a
/// prior successful enter collapses two permits into one and is a
/// caller contract violation this variant cannot detect - the gate
/// stays consistent, the caller's accounting does not.
pub struct SignalGate {
    raised: Mutex<bool>,
    cv: Condvar,
}

impl SignalGate {
    /// Creates the signal in its natural initial state: lowered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            raised: Mutex::new(false),
            cv: Condvar::new(),
        }
    }
}

impl Default for SignalGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate for SignalGate {
    fn try_enter(&self) -> bool {
        let mut raised = self.raised.lock();
        if *raised {
            *raised = false;
            true
        } else {
            false
        }
    }

    fn enter(&self) {
        let mut raised = self.raised.lock();
        while !*raised {
            self.cv.wait(&mut raised);
        }
        *raised = false;
    }

    fn enter_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut raised = self.raised.lock();
        while !*raised {
            if self.cv.wait_until(&mut raised, deadline).timed_out() {
                break;
            }
        }
        if *raised {
            *raised = false;
            true
        } else {
            false
        }
    }

    fn leave(&self) {
        *self.raised.lock() = true;
        self.cv.notify_one();
    }
}

/// Bounded counting gate.
///
/// Capacity 1 in every gazette configuration, and - unlike
/// [`SignalGate`] - born with its permit available, so no arming step
/// is needed.
///
/// # Panics
///
/// `leave()` beyond capacity panics: a release without a matching enter
/// is a caller contract violation, not something this gate absorbs.
pub struct CountingGate {
    count: Mutex<usize>,
    cv: Condvar,
    capacity: usize,
}

impl CountingGate {
    /// Creates a gate with `capacity` permits, `initial` of them
    /// available.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or `initial > capacity`.
    #[must_use]
    pub fn new(capacity: usize, initial: usize) -> Self {
        assert!(capacity > 0, "counting gate needs at least one permit");
        assert!(initial <= capacity, "initial permits exceed capacity");
        Self {
            count: Mutex::new(initial),
            cv: Condvar::new(),
            capacity,
        }
    }

    /// Permits currently available.
    #[must_use]
    pub fn available(&self) -> usize {
        *self.count.lock()
    }
}

impl Gate for CountingGate {
    fn try_enter(&self) -> bool {
        let mut count = self.count.lock();
        if *count > 0 {
            *count -= 1;
            true
        } else {
            false
        }
    }

    fn enter(&self) {
        let mut count = self.count.lock();
        while *count == 0 {
            self.cv.wait(&mut count);
        }
        *count -= 1;
    }

    fn enter_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut count = self.count.lock();
        while *count == 0 {
            if self.cv.wait_until(&mut count, deadline).timed_out() {
                break;
            }
        }
        if *count > 0 {
            *count -= 1;
            true
        } else {
            false
        }
    }

    fn leave(&self) {
        let mut count = self.count.lock();
        assert!(
            *count < self.capacity,
            "leave() without a matching enter() on a counting gate"
        );
        *count += 1;
        self.cv.notify_one();
    }
}

/// Plain mutual-exclusion gate.
///
/// Created unlocked. Not recursive: a holder that enters again
/// deadlocks against itself. Ownership is not tracked, so a release
/// from a thread that never entered cannot be told apart from a
/// legitimate one - the only violation this gate can detect is leaving
/// while nobody holds it.
///
/// # Panics
///
/// `leave()` while unlocked panics.
pub struct ExclusiveGate {
    locked: Mutex<bool>,
    cv: Condvar,
}

impl ExclusiveGate {
    /// Creates the gate unlocked.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locked: Mutex::new(false),
            cv: Condvar::new(),
        }
    }
}

impl Default for ExclusiveGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Gate for ExclusiveGate {
    fn try_enter(&self) -> bool {
        let mut locked = self.locked.lock();
        if *locked {
            false
        } else {
            *locked = true;
            true
        }
    }

    fn enter(&self) {
        let mut locked = self.locked.lock();
        while *locked {
            self.cv.wait(&mut locked);
        }
        *locked = true;
    }

    fn enter_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut locked = self.locked.lock();
        while *locked {
            if self.cv.wait_until(&mut locked, deadline).timed_out() {
                break;
            }
        }
        if *locked {
            false
        } else {
            *locked = true;
            true
        }
    }

    fn leave(&self) {
        let mut locked = self.locked.lock();
        assert!(
            *locked,
            "leave() without a matching enter() on an exclusive gate"
        );
        *locked = false;
        self.cv.notify_one();
    }
}

/// The deliberate absence of synchronization.
///
/// Every enter succeeds instantly, `leave` does nothing. Running two
/// composers through this gate is the negative control that shows the
/// page tearing byte-wise.
pub struct OpenGate;

impl Gate for OpenGate {
    fn try_enter(&self) -> bool {
        true
    }

    fn enter(&self) {}

    fn enter_for(&self, _timeout: Duration) -> bool {
        true
    }

    fn leave(&self) {}
}

/// The process-wide choice of exclusion discipline.
///
/// Exactly one variant is active per process, selected at startup -
/// a runtime tag, not a compile-time switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Binary signal, armed by one explicit release at build time.
    Signal,
    /// Counting gate, capacity 1, born available.
    Counting,
    /// Mutual-exclusion lock.
    Exclusive,
    /// No synchronization at all (negative control).
    None,
}

impl Strategy {
    /// Builds the one active gate for this process.
    ///
    /// For [`Strategy::Signal`] this performs the arming release: a
    /// fresh binary signal starts unavailable and would deadlock every
    /// actor without it.
    #[must_use]
    pub fn build(self) -> Arc<dyn Gate> {
        match self {
            Self::Signal => {
                let gate = SignalGate::new();
                gate.leave();
                Arc::new(gate)
            }
            Self::Counting => Arc::new(CountingGate::new(1, 1)),
            Self::Exclusive => Arc::new(ExclusiveGate::new()),
            Self::None => Arc::new(OpenGate),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signal" => Ok(Self::Signal),
            "counting" => Ok(Self::Counting),
            "exclusive" => Ok(Self::Exclusive),
            "none" => Ok(Self::None),
            other => Err(format!(
                "unknown strategy {other:?}, expected signal | counting | exclusive | none"
            )),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Signal => "signal",
            Self::Counting => "counting",
            Self::Exclusive => "exclusive",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_gate_starts_lowered() {
        let gate = SignalGate::new();
        assert!(!gate.try_enter());

        // The arming release.
        gate.leave();
        assert!(gate.try_enter());
        assert!(!gate.try_enter());
    }

    #[test]
    fn test_signal_gate_release_is_unconditional() {
        let gate = SignalGate::new();
        gate.leave();
        gate.leave();
        // Two releases still leave a single permit.
        assert!(gate.try_enter());
        assert!(!gate.try_enter());
    }

    #[test]
    fn test_counting_gate_born_available() {
        let gate = CountingGate::new(1, 1);
        assert_eq!(gate.available(), 1);
        assert!(gate.try_enter());
        assert_eq!(gate.available(), 0);
        assert!(!gate.try_enter());
        gate.leave();
        assert!(gate.try_enter());
    }

    #[test]
    #[should_panic(expected = "leave() without a matching enter()")]
    fn test_counting_gate_rejects_unmatched_leave() {
        let gate = CountingGate::new(1, 1);
        gate.leave();
    }

    #[test]
    fn test_exclusive_gate_single_holder() {
        let gate = ExclusiveGate::new();
        assert!(gate.try_enter());
        assert!(!gate.try_enter());
        gate.leave();
        assert!(gate.try_enter());
        gate.leave();
    }

    #[test]
    #[should_panic(expected = "leave() without a matching enter()")]
    fn test_exclusive_gate_rejects_unmatched_leave() {
        let gate = ExclusiveGate::new();
        gate.leave();
    }

    #[test]
    fn test_enter_for_times_out_while_held() {
        let gate = ExclusiveGate::new();
        assert!(gate.try_enter());

        let start = Instant::now();
        assert!(!gate.enter_for(Duration::from_millis(50)));
        assert!(start.elapsed() >= Duration::from_millis(50));
        gate.leave();
    }

    #[test]
    fn test_enter_for_succeeds_when_free() {
        let gate = CountingGate::new(1, 1);
        assert!(gate.enter_for(Duration::from_millis(50)));
        gate.leave();
    }

    #[test]
    fn test_blocking_enter_waits_for_the_arming_release() {
        let gate = Arc::new(SignalGate::new());

        let waiter = {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || gate.enter())
        };
        std::thread::sleep(Duration::from_millis(30));
        gate.leave();

        waiter.join().expect("waiter panicked");
        // The waiter consumed the permit on its way through.
        assert!(!gate.try_enter());
    }

    #[test]
    fn test_enter_for_wakes_on_release() {
        let gate = Arc::new(ExclusiveGate::new());
        assert!(gate.try_enter());

        let handle = {
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || gate.enter_for(Duration::from_secs(5)))
        };
        std::thread::sleep(Duration::from_millis(30));
        gate.leave();

        assert!(handle.join().expect("waiter panicked"));
        gate.leave();
    }

    #[test]
    fn test_open_gate_never_refuses() {
        let gate = OpenGate;
        assert!(gate.try_enter());
        assert!(gate.try_enter());
        assert!(gate.enter_for(Duration::ZERO));
        gate.leave();
        gate.leave();
    }

    #[test]
    fn test_strategy_build_arms_signal() {
        // A built signal gate must be immediately enterable.
        let gate = Strategy::Signal.build();
        assert!(gate.try_enter());
        assert!(!gate.try_enter());
        gate.leave();
    }

    #[test]
    fn test_strategy_round_trips_names() {
        for strategy in [
            Strategy::Signal,
            Strategy::Counting,
            Strategy::Exclusive,
            Strategy::None,
        ] {
            let parsed: Strategy = strategy.to_string().parse().expect("known name");
            assert_eq!(parsed, strategy);
        }
        assert!("mutex".parse::<Strategy>().is_err());
    }
}
