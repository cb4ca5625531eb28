//! Single-slot tracking of the in-flight page load.
//!
//! Every load gets a generation number. Starting a new load aborts the
//! pending task and makes every older generation stale, so only the most
//! recent request can ever be applied to the view.

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
pub struct LoadSlot {
    generation: u64,
    in_flight: Option<(u64, JoinHandle<()>)>,
}

impl LoadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any pending load and return the new generation.
    pub fn begin(&mut self) -> u64 {
        if let Some((generation, handle)) = self.in_flight.take() {
            debug!(generation, "Aborting superseded load");
            handle.abort();
        }
        self.generation += 1;
        self.generation
    }

    /// Record the task running `generation`. Ignored if it is already stale.
    pub fn attach(&mut self, generation: u64, handle: JoinHandle<()>) {
        if self.is_current(generation) {
            self.in_flight = Some((generation, handle));
        } else {
            handle.abort();
        }
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    /// Mark `generation` as finished. Returns false for stale results,
    /// which must be discarded.
    pub fn finish(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        if matches!(self.in_flight, Some((g, _)) if g == generation) {
            self.in_flight = None;
        }
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generations_increase() {
        let mut slot = LoadSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(second > first);
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));
    }

    #[test]
    fn test_stale_result_rejected() {
        let mut slot = LoadSlot::new();
        let first = slot.begin();
        let second = slot.begin();
        assert!(!slot.finish(first));
        assert!(slot.finish(second));
    }

    #[tokio::test]
    async fn test_begin_aborts_pending_task() {
        let mut slot = LoadSlot::new();
        let first = slot.begin();
        let handle = tokio::spawn(async {
            tokio::task::yield_now().await;
            std::future::pending::<()>().await;
        });
        let abort_handle = handle.abort_handle();
        slot.attach(first, handle);
        assert!(slot.is_loading());

        let second = slot.begin();
        assert!(!slot.is_loading());

        // Give the runtime a chance to observe the abort
        for _ in 0..10 {
            if abort_handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(abort_handle.is_finished());
        assert!(slot.finish(second));
    }

    #[tokio::test]
    async fn test_finish_clears_in_flight() {
        let mut slot = LoadSlot::new();
        let generation = slot.begin();
        slot.attach(generation, tokio::spawn(async {}));
        assert!(slot.is_loading());
        assert!(slot.finish(generation));
        assert!(!slot.is_loading());
    }

    #[tokio::test]
    async fn test_attach_stale_handle_is_aborted() {
        let mut slot = LoadSlot::new();
        let stale = slot.begin();
        let _current = slot.begin();

        let handle = tokio::spawn(std::future::pending::<()>());
        let abort_handle = handle.abort_handle();
        slot.attach(stale, handle);
        assert!(!slot.is_loading());

        for _ in 0..10 {
            if abort_handle.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(abort_handle.is_finished());
    }
}
