/// Stale-response defense for debounced search
///
/// A console search box fires listing queries as the admin types. Responses
/// can arrive out of order; a late response for a superseded query must be
/// discarded instead of overwriting newer rows. Generations are monotonic:
/// a response is only committed if its generation is still the latest one
/// issued.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Default settle window before a keystroke turns into a query
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Token identifying one issued query
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Monotonically increasing query generations
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new generation, superseding all previous ones
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether the generation is still the latest issued
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::SeqCst) == generation.0
    }

    /// Accept a response only if its generation has not been superseded
    pub fn try_commit(&self, generation: Generation) -> bool {
        self.is_current(generation)
    }
}

/// Sequencer plus a settle window: the caller waits for input to stop
/// changing before issuing the query at all.
#[derive(Debug, Clone)]
pub struct DebouncedSearch {
    sequencer: Arc<SearchSequencer>,
    window: Duration,
}

impl DebouncedSearch {
    pub fn new(window: Duration) -> Self {
        Self {
            sequencer: Arc::new(SearchSequencer::new()),
            window,
        }
    }

    /// Register a keystroke/new input, superseding pending generations
    pub fn input(&self) -> Generation {
        self.sequencer.begin()
    }

    /// Wait out the settle window. Returns true if the generation survived
    /// (no newer input arrived) and the query should be issued.
    pub async fn settle(&self, generation: Generation) -> bool {
        tokio::time::sleep(self.window).await;
        self.sequencer.is_current(generation)
    }

    /// Accept a response only if its generation is still the latest
    pub fn try_commit(&self, generation: Generation) -> bool {
        self.sequencer.try_commit(generation)
    }
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
