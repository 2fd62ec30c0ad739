//! # Shared Page Buffer
//!
//! The one mutable resource every actor in the process touches: a
//! fixed-capacity page of text with a deliberately slow overwrite.
//!
//! ## Design
//!
//! `compose` copies one byte at a time and runs a caller-supplied pace
//! closure between bytes, stretching the copy far past the scheduler's
//! preemption granularity. The buffer does **no** locking of its own;
//! callers serialize access through a [`Gate`](crate::sync::Gate) (or
//! deliberately don't, to watch two composers splice each other's text).
//!
//! Bytes are stored as relaxed atomics so a torn page is observable as
//! data, not undefined behavior.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

/// Total page size in bytes, including the terminating NUL.
pub const PAGE_CAPACITY: usize = 64;

/// Fixed-capacity text page shared by every actor in the process.
///
/// Content is always a NUL-terminated run of at most
/// `PAGE_CAPACITY - 1` bytes. Created once at startup and overwritten in
/// place for the life of the process.
pub struct PageBuffer {
    /// The page cells. Relaxed atomics: interleaved composes tear
    /// visibly instead of invoking undefined behavior.
    cells: [AtomicU8; PAGE_CAPACITY],
}

impl PageBuffer {
    /// Creates an all-zero page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| AtomicU8::new(0)),
        }
    }

    /// Overwrites the page with `text`, slowly.
    ///
    /// The page is zero-filled first, then bytes are copied one at a
    /// time with `pace` invoked between each. Text longer than
    /// `PAGE_CAPACITY - 1` bytes is silently truncated; the final byte
    /// is always NUL.
    ///
    /// This call occupies the calling thread for its whole duration. It
    /// never yields and never fails. Callers that need the page intact
    /// must hold the process gate across the call.
    pub fn compose(&self, text: &str, pace: &dyn Fn()) {
        for cell in &self.cells {
            cell.store(0, Ordering::Relaxed);
        }

        let bytes = text.as_bytes();
        let max = bytes.len().min(PAGE_CAPACITY - 1);
        for (cell, &byte) in self.cells.iter().zip(bytes).take(max) {
            cell.store(byte, Ordering::Relaxed);
            pace();
        }
    }

    /// Reads the current content up to the first NUL.
    ///
    /// The read is byte-wise and unsynchronized; while a compose is in
    /// flight it may observe a partial copy. That is the point.
    #[must_use]
    pub fn snapshot(&self) -> String {
        let mut out = Vec::with_capacity(PAGE_CAPACITY);
        for cell in &self.cells {
            let byte = cell.load(Ordering::Relaxed);
            if byte == 0 {
                break;
            }
            out.push(byte);
        }
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Number of content bytes currently on the page.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.cells
            .iter()
            .position(|c| c.load(Ordering::Relaxed) == 0)
            .unwrap_or(PAGE_CAPACITY)
    }
}

impl Default for PageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the default pace: a bounded busy-wait of `per_byte` that
/// spins without yielding.
///
/// Hogging the processor is intentional - preemption, not cooperative
/// yielding, is what exposes an unguarded compose. Tests pass
/// `Duration::ZERO` (or their own closure) to shrink the window.
#[must_use]
pub fn spin_pace(per_byte: Duration) -> impl Fn() + Send + Sync {
    move || {
        let start = Instant::now();
        while start.elapsed() < per_byte {
            std::hint::spin_loop();
        }
    }
}
