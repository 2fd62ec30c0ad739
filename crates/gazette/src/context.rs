//! # Process Context
//!
//! The one shared instance of everything the actors contend for. Built
//! before the first actor starts, dropped only after the last one has
//! joined - no globals, no statics.

use std::sync::Arc;
use std::time::Duration;

use gazette_core::{spin_pace, CohortLock, Gate, PageBuffer, Strategy};

/// The question on the page before anyone has touched it.
pub const FRONT_PAGE_QUESTION: &str = "Which story runs on the front page today?";

/// The lead typist's sentence.
pub const SCARLET_CLOAK: &str = "A girl in a scarlet cloak slips between the pines";

/// The drift typist's sentence.
pub const CARNIVAL_WOLF: &str = "A wolf arrives in costume as if the carnival had begun";

/// Process-wide shared state, one instance per process.
///
/// Shared by `Arc` with every actor; the page, the gate and the cohort
/// lock in here are the only things actors ever contend for.
pub struct PressContext {
    /// The shared page.
    pub page: PageBuffer,
    /// The one active exclusion gate (pressroom scenario).
    pub gate: Arc<dyn Gate>,
    /// The readers-writer cohort lock (newsroom scenario).
    pub desk: CohortLock,
    /// Busy-wait between copied bytes of every slow compose.
    pace_per_byte: Duration,
}

impl PressContext {
    /// Builds the context and seeds the page with the opening question.
    ///
    /// The seed compose runs unpaced: nothing else is running yet, so
    /// there is no window worth widening.
    #[must_use]
    pub fn new(strategy: Strategy, pace_per_byte: Duration) -> Arc<Self> {
        let page = PageBuffer::new();
        page.compose(FRONT_PAGE_QUESTION, &|| {});
        Arc::new(Self {
            page,
            gate: strategy.build(),
            desk: CohortLock::new(),
            pace_per_byte,
        })
    }

    /// A fresh pace closure for one actor's composes.
    #[must_use]
    pub fn pace(&self) -> impl Fn() + Send + Sync {
        spin_pace(self.pace_per_byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_seeds_the_page() {
        let ctx = PressContext::new(Strategy::Exclusive, Duration::ZERO);
        assert_eq!(ctx.page.snapshot(), FRONT_PAGE_QUESTION);
    }

    #[test]
    fn test_source_sentences_fit_the_page() {
        // Both demo sentences must survive compose untruncated.
        assert!(SCARLET_CLOAK.len() < gazette_core::PAGE_CAPACITY);
        assert!(CARNIVAL_WOLF.len() < gazette_core::PAGE_CAPACITY);
    }
}
