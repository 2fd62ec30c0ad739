//! # Typists
//!
//! The exclusion-strategy demonstration: two periodic actors recompose
//! the shared page under whichever gate the process was configured
//! with. Their periods deliberately drift against each other, so every
//! few cycles both want the page at once - and the gate (or its
//! absence) decides what the page looks like afterwards.

use std::thread;
use std::time::Duration;

use gazette_core::{RendezvousOutcome, RendezvousParty};

use crate::cadence::{Beat, Cadence};
use crate::context::PressContext;

/// One typist's standing orders.
pub struct TypistSpec {
    /// Thread and log name.
    pub name: &'static str,
    /// The sentence this typist keeps setting.
    pub text: &'static str,
    /// Recompose on every n-th beat only (1 = every beat).
    pub compose_every: u64,
    /// How long to keep the gate after the copy lands, before leaving.
    /// Zero releases immediately.
    pub hold_after: Duration,
    /// Whether to announce the page content on every beat.
    pub announces: bool,
}

/// A typist's startup handshake, when the rendezvous is enabled.
pub struct Handshake {
    /// This typist's one-shot ticket to the meeting point.
    pub party: RendezvousParty,
    /// Simulated long-lasting startup activity before signalling.
    pub setup: Duration,
}

/// Steady-state loop of one typist. Runs until the cadence stops.
///
/// Entry is always non-blocking: a busy gate means this period's
/// recompose is skipped, not queued. The post-copy hold keeps the gate
/// across several of the counterpart's periods on purpose - the
/// counterpart must visibly fail clean and keep its old page.
pub fn typist_loop(
    ctx: &PressContext,
    mut cadence: Cadence,
    spec: &TypistSpec,
    handshake: Option<Handshake>,
) {
    tracing::info!("{} launching, period {:?}", spec.name, cadence.period());

    if let Some(handshake) = handshake {
        thread::sleep(handshake.setup);
        tracing::debug!(
            "{} at the meeting point, waiting up to {:?}",
            spec.name,
            handshake.party.configured_wait()
        );
        match handshake.party.meet() {
            RendezvousOutcome::Met => {
                tracing::info!("{}: rendezvous - we are ready!", spec.name);
            }
            RendezvousOutcome::TimedOut => {
                tracing::warn!(
                    "{}: rendezvous wait elapsed, proceeding alone",
                    spec.name
                );
            }
        }
    }

    let pace = ctx.pace();
    loop {
        match cadence.next() {
            Beat::Stop => break,
            Beat::Tick(n) => {
                if n % spec.compose_every == 0 {
                    if ctx.gate.try_enter() {
                        ctx.page.compose(spec.text, &pace);
                        if !spec.hold_after.is_zero() {
                            thread::sleep(spec.hold_after);
                        }
                        ctx.gate.leave();
                        tracing::debug!("{} recomposed the page", spec.name);
                    } else {
                        tracing::debug!("{} found the gate busy, skipping", spec.name);
                    }
                }
                if spec.announces {
                    tracing::info!("the page reads: {}", ctx.page.snapshot());
                }
            }
        }
    }

    tracing::info!("{} retiring", spec.name);
}
