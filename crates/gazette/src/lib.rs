//! # GAZETTE - The Demo Application
//!
//! Periodic actors contending for one shared page, each bracketing its
//! touch through the discipline configured at startup.
//!
//! ## Scenarios
//!
//! - **Pressroom**: two typists recompose the page on drifting periods
//!   under one of four exclusion gates. With a real gate the page is
//!   always whole; with the open gate it visibly tears.
//! - **Newsroom**: a cohort of readers and one writer share a document
//!   through the first-reader/last-reader cohort lock. The writer
//!   skips its cycle whenever the cohort is on the page.
//!
//! ## Shape
//!
//! ```text
//! TOML config ─► PressContext (page + gate + cohort lock, one per process)
//!                    │
//!        ┌───────────┼───────────┐
//!        ▼           ▼           ▼
//!    lead typist  drift typist  readers/writer
//!    (named OS threads, each paced by its own Cadence)
//! ```
//!
//! Misses are absorbed by the schedule: a failed non-blocking enter
//! means the actor sits out one period, nothing more.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod actors;
pub mod cadence;
pub mod config;
pub mod context;

pub use actors::run_scenario;
pub use config::{GazetteConfig, Scenario};
pub use context::PressContext;
