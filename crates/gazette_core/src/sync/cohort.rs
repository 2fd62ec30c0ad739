//! # Reader Cohort Lock
//!
//! First-reader/last-reader admission over a single document.
//!
//! ## Design
//!
//! ```text
//!              admission gate          resource gate
//!  Reader ──► join/leave the cohort ─► held once per BATCH of readers
//!  Writer ──────────────────────────► non-blocking claim, skip on miss
//! ```
//!
//! Only the zero-to-one and one-to-zero transitions of the reader count
//! touch the resource gate; every reader in between rides on the first
//! reader's acquisition. The writer never waits: if the cohort holds
//! the document, it skips the cycle and lets its period try again.
//!
//! Back-to-back reader batches can starve the writer indefinitely. That
//! is an accepted property of this discipline, not a defect to patch.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::gate::{ExclusiveGate, Gate};

/// Counters describing cohort traffic since creation.
#[derive(Clone, Copy, Debug, Default)]
pub struct CohortStats {
    /// Reader batches, i.e. zero-to-one admissions. Each batch acquires
    /// the resource gate exactly once, however many readers join it.
    pub batches: u64,
    /// Readers admitted (including the batch openers).
    pub reads_admitted: u64,
    /// Readers that abstained because the admission gate was contended.
    pub reads_abstained: u64,
    /// Writer passes that claimed the document.
    pub writes: u64,
    /// Writer passes skipped because the cohort held the document.
    pub writes_skipped: u64,
}

/// Readers-writer coordination over one shared document.
///
/// Shared by reference between the whole reader cohort and the single
/// writer. `begin`/`end` calls must pair; an unmatched `end_read` or
/// `end_write` panics, same contract as the gates underneath.
pub struct CohortLock {
    /// Serializes join/leave bookkeeping, never the document itself.
    admission: ExclusiveGate,
    /// The document. Held by the writer, or by the cohort as a whole.
    resource: ExclusiveGate,
    /// Readers currently between admission and departure.
    active_readers: AtomicUsize,
    batches: AtomicU64,
    reads_admitted: AtomicU64,
    reads_abstained: AtomicU64,
    writes: AtomicU64,
    writes_skipped: AtomicU64,
}

impl CohortLock {
    /// Creates an idle lock: no readers, document free.
    #[must_use]
    pub fn new() -> Self {
        Self {
            admission: ExclusiveGate::new(),
            resource: ExclusiveGate::new(),
            active_readers: AtomicUsize::new(0),
            batches: AtomicU64::new(0),
            reads_admitted: AtomicU64::new(0),
            reads_abstained: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            writes_skipped: AtomicU64::new(0),
        }
    }

    /// Attempts to join the reader cohort without queueing.
    ///
    /// The admission gate is tried, never waited on: a reader that hits
    /// contention on the bookkeeping itself abstains for this cycle and
    /// returns `false`. On admission, the first reader of a batch
    /// claims the resource gate on the cohort's behalf - blocking
    /// indefinitely if the writer is mid-mutation - and later readers
    /// ride on that claim.
    ///
    /// A `true` return must be paired with [`CohortLock::end_read`].
    #[must_use]
    pub fn try_begin_read(&self) -> bool {
        if !self.admission.try_enter() {
            self.reads_abstained.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // All counter traffic happens under the admission gate, so this
        // read is authoritative.
        if self.active_readers.load(Ordering::Acquire) == 0 {
            // Opening a batch: wait out the writer, however long it
            // holds. Later joiners are held off by the admission gate
            // until the claim lands.
            self.resource.enter();
            self.batches.fetch_add(1, Ordering::Relaxed);
        }
        // Counted only once the document is claimed: the count is
        // non-zero exactly while the cohort holds the document.
        self.active_readers.fetch_add(1, Ordering::AcqRel);
        self.reads_admitted.fetch_add(1, Ordering::Relaxed);

        self.admission.leave();
        true
    }

    /// Leaves the reader cohort.
    ///
    /// Departure bookkeeping blocks on the admission gate (unlike
    /// admission, a reader cannot abstain from leaving). The last
    /// reader out returns the document.
    ///
    /// # Panics
    ///
    /// Panics if called without a matching successful
    /// [`CohortLock::try_begin_read`].
    pub fn end_read(&self) {
        self.admission.enter();

        let was_active = self.active_readers.fetch_sub(1, Ordering::AcqRel);
        assert!(
            was_active > 0,
            "end_read() without a matching try_begin_read()"
        );
        if was_active == 1 {
            self.resource.leave();
        }

        self.admission.leave();
    }

    /// Attempts to claim the document for writing, without blocking.
    ///
    /// Fails whenever the reader cohort holds the document (or another
    /// writer does); the writer is expected to skip the cycle. A `true`
    /// return must be paired with [`CohortLock::end_write`].
    #[must_use]
    pub fn try_begin_write(&self) -> bool {
        if self.resource.try_enter() {
            self.writes.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            self.writes_skipped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Releases the document after a successful write claim.
    ///
    /// # Panics
    ///
    /// Panics if called without a matching successful
    /// [`CohortLock::try_begin_write`].
    pub fn end_write(&self) {
        self.resource.leave();
    }

    /// Readers currently between admission and departure.
    #[must_use]
    pub fn active_readers(&self) -> usize {
        self.active_readers.load(Ordering::Acquire)
    }

    /// Snapshot of traffic counters.
    #[must_use]
    pub fn stats(&self) -> CohortStats {
        CohortStats {
            batches: self.batches.load(Ordering::Relaxed),
            reads_admitted: self.reads_admitted.load(Ordering::Relaxed),
            reads_abstained: self.reads_abstained.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            writes_skipped: self.writes_skipped.load(Ordering::Relaxed),
        }
    }
}

impl Default for CohortLock {
    fn default() -> Self {
        Self::new()
    }
}
