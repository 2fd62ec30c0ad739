//! # Actors
//!
//! Every actor is a named OS thread with an explicit stack-size hint,
//! paced by its own [`Cadence`](crate::cadence::Cadence) and stopped by
//! the shared stop channel. Spawn failure is the one startup error this
//! module surfaces; after that, nothing in here returns an error - a
//! missed gate is a skipped period, absorbed by the schedule.

mod newsroom;
mod typist;

pub use newsroom::{reader_loop, writer_loop};
pub use typist::{typist_loop, Handshake, TypistSpec};

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Receiver;

use gazette_core::{GazetteError, GazetteResult, Rendezvous};

use crate::cadence::{stop_channel, Cadence};
use crate::config::{GazetteConfig, Scenario};
use crate::context::{PressContext, CARNIVAL_WOLF, SCARLET_CLOAK};

/// Stack-size hint for every actor thread. The bodies are small; the
/// hint mostly documents that actors are meant to stay small.
pub const ACTOR_STACK_SIZE: usize = 256 * 1024;

/// Spawns one named actor thread, surfacing failure as
/// [`GazetteError::ResourceCreation`].
fn spawn_actor<F>(name: &str, body: F) -> GazetteResult<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name(name.to_owned())
        .stack_size(ACTOR_STACK_SIZE)
        .spawn(body)
        .map_err(|source| GazetteError::ResourceCreation {
            actor: name.to_owned(),
            source,
        })
}

/// Runs the configured scenario to completion.
///
/// Builds the process context, spawns the actors, lets them run for the
/// configured wall-clock span (or forever), then stops and joins them.
pub fn run_scenario(config: &GazetteConfig) -> GazetteResult<()> {
    config.validate()?;

    let ctx = PressContext::new(config.strategy()?, config.pace_per_byte());
    let (stop_tx, stop_rx) = stop_channel();

    let handles = match config.scenario {
        Scenario::Pressroom => spawn_pressroom(config, &ctx, &stop_rx)?,
        Scenario::Newsroom => spawn_newsroom(config, &ctx, &stop_rx)?,
    };
    drop(stop_rx);

    let run_for = Duration::from_millis(config.run_for_ms);
    if !run_for.is_zero() {
        thread::sleep(run_for);
        // Wakes every cadence, mid-stagger included.
        drop(stop_tx);
    }

    for handle in handles {
        if handle.join().is_err() {
            tracing::error!("an actor panicked; see stderr for the backtrace");
        }
    }
    Ok(())
}

/// Two typists, one gate, drifting periods.
fn spawn_pressroom(
    config: &GazetteConfig,
    ctx: &Arc<PressContext>,
    stop: &Receiver<()>,
) -> GazetteResult<Vec<JoinHandle<()>>> {
    let (lead_party, drift_party) = if config.rendezvous {
        let (a, b) = Rendezvous::pair(
            Duration::from_millis(config.rendezvous_wait_ms[0]),
            Duration::from_millis(config.rendezvous_wait_ms[1]),
        );
        (Some(a), Some(b))
    } else {
        (None, None)
    };
    let setup = Duration::from_millis(config.rendezvous_setup_ms);

    let lead = {
        let ctx = Arc::clone(ctx);
        let cadence = Cadence::new(
            Duration::from_millis(config.lead_period_ms),
            Duration::ZERO,
            stop.clone(),
        );
        let spec = TypistSpec {
            name: "lead-typist",
            text: SCARLET_CLOAK,
            compose_every: config.compose_every,
            hold_after: Duration::ZERO,
            announces: true,
        };
        let handshake = lead_party.map(|party| Handshake { party, setup });
        spawn_actor(spec.name, move || typist_loop(&ctx, cadence, &spec, handshake))?
    };

    let drift = {
        let ctx = Arc::clone(ctx);
        let cadence = Cadence::new(
            Duration::from_millis(config.drift_period_ms),
            Duration::ZERO,
            stop.clone(),
        );
        let spec = TypistSpec {
            name: "drift-typist",
            text: CARNIVAL_WOLF,
            compose_every: 1,
            hold_after: config.drift_hold(),
            announces: false,
        };
        let handshake = drift_party.map(|party| Handshake { party, setup });
        spawn_actor(spec.name, move || typist_loop(&ctx, cadence, &spec, handshake))?
    };

    Ok(vec![lead, drift])
}

/// A staggered reader cohort and one periodic writer.
fn spawn_newsroom(
    config: &GazetteConfig,
    ctx: &Arc<PressContext>,
    stop: &Receiver<()>,
) -> GazetteResult<Vec<JoinHandle<()>>> {
    let mut handles = Vec::with_capacity(config.reader_count + 1);

    for index in 0..config.reader_count {
        let ctx = Arc::clone(ctx);
        let stagger = Duration::from_millis(config.reader_stagger_ms * index as u64);
        let cadence = Cadence::new(
            Duration::from_millis(config.reader_period_ms),
            stagger,
            stop.clone(),
        );
        let name = format!("reader-{index}");
        handles.push(spawn_actor(&name, move || {
            reader_loop(&ctx, cadence, index);
        })?);
    }

    let writer = {
        let ctx = Arc::clone(ctx);
        let cadence = Cadence::new(
            Duration::from_millis(config.writer_period_ms),
            Duration::ZERO,
            stop.clone(),
        );
        spawn_actor("writer", move || writer_loop(&ctx, cadence))?
    };
    handles.push(writer);

    Ok(handles)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A whole pressroom pass, compressed: real threads, real gate,
    /// millisecond periods.
    #[test]
    fn test_pressroom_round_trip() {
        let config = GazetteConfig {
            lead_period_ms: 5,
            drift_period_ms: 9,
            hold_ticks: 1,
            pace_per_byte_us: 10,
            run_for_ms: 120,
            ..GazetteConfig::default()
        };
        run_scenario(&config).expect("pressroom must run clean");
    }

    #[test]
    fn test_newsroom_round_trip() {
        let config = GazetteConfig {
            scenario: Scenario::Newsroom,
            reader_count: 3,
            reader_period_ms: 5,
            reader_stagger_ms: 2,
            writer_period_ms: 8,
            pace_per_byte_us: 10,
            run_for_ms: 120,
            ..GazetteConfig::default()
        };
        run_scenario(&config).expect("newsroom must run clean");
    }

    #[test]
    fn test_rendezvous_pressroom_round_trip() {
        let config = GazetteConfig {
            rendezvous: true,
            rendezvous_setup_ms: 10,
            rendezvous_wait_ms: [200, 200],
            lead_period_ms: 5,
            drift_period_ms: 9,
            hold_ticks: 0,
            pace_per_byte_us: 10,
            run_for_ms: 100,
            ..GazetteConfig::default()
        };
        run_scenario(&config).expect("rendezvous pressroom must run clean");
    }

    #[test]
    fn test_invalid_config_is_refused_before_spawning() {
        let config = GazetteConfig {
            strategy: "hope".to_owned(),
            ..GazetteConfig::default()
        };
        assert!(run_scenario(&config).is_err());
    }
}
