//! # Actor Cadence
//!
//! Fixed-period pacing for one actor, with an optional startup stagger
//! and prompt shutdown.
//!
//! ## Design
//!
//! Each actor blocks on its own ticker and a process-wide stop channel
//! at once; whichever fires first wins. Dropping the stop sender in the
//! orchestrator wakes every actor immediately, mid-stagger included -
//! nobody sleeps through shutdown.

use std::time::{Duration, Instant};

use crossbeam_channel::{after, bounded, select, tick, Receiver, Sender};

/// What the cadence hands the actor next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Beat {
    /// The n-th period elapsed (counting from 1).
    Tick(u64),
    /// The process is shutting down; leave the loop.
    Stop,
}

/// Creates the process-wide stop channel.
///
/// Actors hold clones of the receiver; the orchestrator drops the
/// sender to stop them all.
#[must_use]
pub fn stop_channel() -> (Sender<()>, Receiver<()>) {
    bounded(0)
}

/// Fixed-period beat source for a single actor.
pub struct Cadence {
    period: Duration,
    /// Armed until the startup stagger elapses.
    stagger: Option<Receiver<Instant>>,
    ticker: Receiver<Instant>,
    stop: Receiver<()>,
    beats: u64,
}

impl Cadence {
    /// Creates a cadence with the given period and startup stagger.
    #[must_use]
    pub fn new(period: Duration, stagger: Duration, stop: Receiver<()>) -> Self {
        let stagger = (!stagger.is_zero()).then(|| after(stagger));
        Self {
            period,
            stagger,
            ticker: tick(period),
            stop,
            beats: 0,
        }
    }

    /// The configured period.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Beats delivered so far.
    #[must_use]
    pub fn beats(&self) -> u64 {
        self.beats
    }

    /// Blocks until the next period elapses or shutdown begins.
    ///
    /// The first call waits out the stagger before ticking starts; the
    /// ticker is re-armed afterwards so the stagger does not count as a
    /// period. A closed stop channel reads as [`Beat::Stop`].
    pub fn next(&mut self) -> Beat {
        if let Some(gun) = self.stagger.take() {
            select! {
                recv(self.stop) -> _ => return Beat::Stop,
                recv(gun) -> _ => self.ticker = tick(self.period),
            }
        }
        select! {
            recv(self.stop) -> _ => Beat::Stop,
            recv(self.ticker) -> _ => {
                self.beats += 1;
                Beat::Tick(self.beats)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beats_count_from_one() {
        let (_keep_alive, stop) = stop_channel();
        let mut cadence = Cadence::new(Duration::from_millis(10), Duration::ZERO, stop);

        assert_eq!(cadence.next(), Beat::Tick(1));
        assert_eq!(cadence.next(), Beat::Tick(2));
        assert_eq!(cadence.beats(), 2);
    }

    #[test]
    fn test_dropped_sender_stops_the_beat() {
        let (sender, stop) = stop_channel();
        let mut cadence = Cadence::new(Duration::from_secs(3600), Duration::ZERO, stop);

        drop(sender);
        assert_eq!(cadence.next(), Beat::Stop);
    }

    #[test]
    fn test_stagger_delays_first_beat() {
        let (_keep_alive, stop) = stop_channel();
        let mut cadence = Cadence::new(
            Duration::from_millis(5),
            Duration::from_millis(60),
            stop,
        );

        let start = Instant::now();
        assert_eq!(cadence.next(), Beat::Tick(1));
        assert!(start.elapsed() >= Duration::from_millis(60));
    }

    #[test]
    fn test_shutdown_interrupts_stagger() {
        let (sender, stop) = stop_channel();
        let mut cadence = Cadence::new(
            Duration::from_millis(5),
            Duration::from_secs(3600),
            stop,
        );

        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            drop(sender);
        });

        let start = Instant::now();
        assert_eq!(cadence.next(), Beat::Stop);
        assert!(start.elapsed() < Duration::from_secs(10));
    }
}
