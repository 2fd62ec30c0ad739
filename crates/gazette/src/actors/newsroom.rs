//! # Newsroom
//!
//! The readers-writer demonstration: a cohort of periodic readers and
//! one periodic writer share the document through the cohort lock.
//! Readers ride on each other's admission; the writer takes whatever
//! quiet gap the cohort leaves it, or skips.

use crate::cadence::{Beat, Cadence};
use crate::context::{PressContext, CARNIVAL_WOLF, SCARLET_CLOAK};

/// Steady-state loop of one cohort reader.
///
/// Admission is non-blocking all the way down: contention on the
/// cohort's own bookkeeping makes the reader abstain for a period, the
/// same as finding the writer on the document would.
pub fn reader_loop(ctx: &PressContext, mut cadence: Cadence, index: usize) {
    tracing::info!("reader-{index} launching");

    loop {
        match cadence.next() {
            Beat::Stop => break,
            Beat::Tick(_) => {
                if ctx.desk.try_begin_read() {
                    tracing::info!(
                        "reader-{index} is reading the paper: {}",
                        ctx.page.snapshot()
                    );
                    ctx.desk.end_read();
                } else {
                    tracing::debug!("reader-{index} abstains this period");
                }
            }
        }
    }

    tracing::info!("reader-{index} retiring");
}

/// Steady-state loop of the newsroom writer.
///
/// Claims the document without blocking and recomposes it with an
/// alternating sentence; a cohort on the page means this period is
/// skipped, trusting the next one.
pub fn writer_loop(ctx: &PressContext, mut cadence: Cadence) {
    tracing::info!("writer launching");

    let pace = ctx.pace();
    loop {
        match cadence.next() {
            Beat::Stop => break,
            Beat::Tick(n) => {
                if ctx.desk.try_begin_write() {
                    let text = if n % 2 == 0 { CARNIVAL_WOLF } else { SCARLET_CLOAK };
                    ctx.page.compose(text, &pace);
                    ctx.desk.end_write();
                    tracing::info!("writer changed the content");
                } else {
                    tracing::debug!("writer skips, the cohort holds the document");
                }
            }
        }
    }

    let stats = ctx.desk.stats();
    tracing::info!(
        "writer retiring: {} writes, {} skipped, {} reader batches served",
        stats.writes,
        stats.writes_skipped,
        stats.batches
    );
}
