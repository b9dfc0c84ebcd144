//! Drives a [`ViewController`] against the geocode resolver.
//!
//! UI events go in through [`Session::dispatch`]. Commands the controller
//! returns are spawned as tasks that send their completion event back over a
//! channel; completions are applied the next time the caller polls. All state
//! changes still happen on the caller's task, one event at a time.

use std::sync::Arc;

use jobmap_core::{JobRecord, LatLng, QueryState};
use jobmap_geocode::GeocodeResolver;
use tokio::sync::mpsc;

use crate::controller::{Command, FallbackTicket, ViewController, ViewEvent};
use crate::view::ViewModel;

/// Sends the fallback completion when dropped, so a task that panics or is
/// aborted still reports back (with no result) and `in_flight` stays exact.
struct CompletionGuard {
    tx: mpsc::UnboundedSender<ViewEvent>,
    ticket: FallbackTicket,
    result: Option<LatLng>,
}

impl CompletionGuard {
    fn new(tx: mpsc::UnboundedSender<ViewEvent>, ticket: FallbackTicket) -> Self {
        Self {
            tx,
            ticket,
            result: None,
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        // The receiver lives as long as the session.
        let _ = self.tx.send(ViewEvent::GeocodeFallbackCompleted {
            ticket: self.ticket,
            result: self.result.take(),
        });
    }
}

pub struct Session {
    controller: ViewController,
    resolver: Arc<GeocodeResolver>,
    completions_tx: mpsc::UnboundedSender<ViewEvent>,
    completions_rx: mpsc::UnboundedReceiver<ViewEvent>,
    in_flight: usize,
}

impl Session {
    #[must_use]
    pub fn new(catalog: Arc<[JobRecord]>, resolver: Arc<GeocodeResolver>) -> Self {
        Self::from_controller(ViewController::new(catalog), resolver)
    }

    #[must_use]
    pub fn with_initial_query(
        catalog: Arc<[JobRecord]>,
        resolver: Arc<GeocodeResolver>,
        query: QueryState,
    ) -> Self {
        Self::from_controller(ViewController::with_initial_query(catalog, query), resolver)
    }

    fn from_controller(controller: ViewController, resolver: Arc<GeocodeResolver>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            resolver,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    /// Applies an event and starts any geocode it calls for.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&mut self, event: ViewEvent) {
        if let Some(command) = self.controller.handle(event) {
            self.execute(command);
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::GeocodeFallback { ticket, location } => {
                let resolver = Arc::clone(&self.resolver);
                let mut completion = CompletionGuard::new(self.completions_tx.clone(), ticket);
                self.in_flight += 1;
                tokio::spawn(async move {
                    completion.result = resolver.resolve_raw(&location).await;
                });
            }
        }
    }

    /// Number of geocode tasks not yet applied.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Waits for the next completion and applies it. Returns `false` when
    /// nothing is in flight. Cancel-safe.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.completions_rx.recv().await {
            Some(event) => {
                self.apply_completion(event);
                true
            }
            None => false,
        }
    }

    /// Waits until every in-flight geocode has been applied.
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn apply_completion(&mut self, event: ViewEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dispatch(event);
    }

    #[must_use]
    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewModel<'_> {
        self.controller.snapshot()
    }

    /// Drains in-flight work and persists the geocode cache.
    pub async fn shutdown(mut self) {
        self.settle().await;
        self.resolver.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use jobmap_geocode::{CacheStore, GeocodeCache};

    use super::*;

    fn empty_session() -> Session {
        let resolver = GeocodeResolver::offline(GeocodeCache::new(CacheStore::Disabled));
        Session::new(Arc::from(Vec::new()), Arc::new(resolver))
    }

    #[tokio::test]
    async fn panicking_lookup_still_reports_completion() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let _completion = CompletionGuard::new(tx, FallbackTicket(7));
            panic!("lookup failed");
        });
        assert!(handle.await.unwrap_err().is_panic());
        assert_eq!(
            rx.recv().await,
            Some(ViewEvent::GeocodeFallbackCompleted {
                ticket: FallbackTicket(7),
                result: None,
            })
        );
    }

    #[tokio::test]
    async fn settle_returns_after_a_lookup_task_panics() {
        let mut session = empty_session();
        let completion = CompletionGuard::new(session.completions_tx.clone(), FallbackTicket(0));
        session.in_flight += 1;
        let handle = tokio::spawn(async move {
            let _completion = completion;
            panic!("lookup failed");
        });
        assert!(handle.await.is_err());

        tokio::time::timeout(std::time::Duration::from_secs(5), session.settle())
            .await
            .expect("settle should not hang");
        assert_eq!(session.in_flight(), 0);
        assert_eq!(*session.controller().view(), crate::ViewState::default());
    }

    #[tokio::test]
    async fn completed_lookup_is_delivered_once() {
        let mut session = empty_session();
        session.dispatch(ViewEvent::LocationChanged("Nowhere".into()));
        session.dispatch(ViewEvent::EnterPressed);
        assert_eq!(session.in_flight(), 1);

        session.settle().await;
        assert_eq!(session.in_flight(), 0);
        assert!(!session.controller().has_pending_fallback());
        assert!(session.completions_rx.try_recv().is_err());
    }
}
