//! View synchronization state machine.
//!
//! One [`ViewController`] owns the query, the filtered set, and the map/detail
//! view state. It changes only through [`ViewController::handle`], which
//! keeps the selected job inside the filtered set at all times. The
//! controller never awaits: when it needs a geocode it returns a [`Command`]
//! and later receives the answer as [`ViewEvent::GeocodeFallbackCompleted`].

use std::sync::Arc;

use jobmap_core::{
    filter, ExperienceLevel, JobRecord, JobType, LatLng, QueryState, ZoomLevel,
    DEFAULT_MAP_CENTER,
};

use crate::view::ViewModel;

/// Identifies one location-fallback geocode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallbackTicket(pub(crate) u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    KeywordChanged(String),
    LocationChanged(String),
    JobTypeChanged(Option<JobType>),
    ExperienceChanged(Option<ExperienceLevel>),
    /// Enter pressed in either text field.
    EnterPressed,
    /// The search button; same effect as Enter.
    SearchSubmitted,
    /// Marker or list item clicked, by catalog index.
    JobClicked(usize),
    DetailClosed,
    GeocodeFallbackCompleted {
        ticket: FallbackTicket,
        result: Option<LatLng>,
    },
}

/// Async work the controller asks its driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Geocode the raw location text and report back with the same ticket.
    GeocodeFallback {
        ticket: FallbackTicket,
        location: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub map_center: LatLng,
    pub zoom: ZoomLevel,
    /// Catalog index of the job in the detail pane.
    pub selected_job: Option<usize>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            map_center: DEFAULT_MAP_CENTER,
            zoom: ZoomLevel::Default,
            selected_job: None,
        }
    }
}

#[derive(Debug)]
struct PendingFallback {
    ticket: FallbackTicket,
    location: String,
}

#[derive(Debug)]
pub struct ViewController {
    catalog: Arc<[JobRecord]>,
    query: QueryState,
    /// Catalog indices, ascending.
    filtered: Vec<usize>,
    view: ViewState,
    pending: Option<PendingFallback>,
    next_ticket: u64,
}

impl ViewController {
    #[must_use]
    pub fn new(catalog: Arc<[JobRecord]>) -> Self {
        let filtered = (0..catalog.len()).collect();
        Self {
            catalog,
            query: QueryState::default(),
            filtered,
            view: ViewState::default(),
            pending: None,
            next_ticket: 0,
        }
    }

    /// Starts from a query supplied by navigation (a deep link).
    ///
    /// If the query is non-empty and matches something, the first match is
    /// focused as though Enter had been pressed once.
    #[must_use]
    pub fn with_initial_query(catalog: Arc<[JobRecord]>, query: QueryState) -> Self {
        let mut controller = Self::new(catalog);
        controller.query = query;
        controller.refilter();
        if !controller.query.is_empty() {
            if let Some(&first) = controller.filtered.first() {
                controller.focus(first);
            }
        }
        controller
    }

    /// Applies one event. Returns work for the driver, if any.
    pub fn handle(&mut self, event: ViewEvent) -> Option<Command> {
        match event {
            ViewEvent::KeywordChanged(keyword) => {
                self.update_query(|q| q.keyword = keyword);
                None
            }
            ViewEvent::LocationChanged(location) => {
                self.update_query(|q| q.location = location);
                None
            }
            ViewEvent::JobTypeChanged(job_type) => {
                self.update_query(|q| q.job_type = job_type);
                None
            }
            ViewEvent::ExperienceChanged(experience) => {
                self.update_query(|q| q.experience = experience);
                None
            }
            ViewEvent::EnterPressed | ViewEvent::SearchSubmitted => self.submit(),
            ViewEvent::JobClicked(index) => {
                self.click(index);
                None
            }
            ViewEvent::DetailClosed => {
                self.view.selected_job = None;
                None
            }
            ViewEvent::GeocodeFallbackCompleted { ticket, result } => {
                self.complete_fallback(ticket, result);
                None
            }
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &[JobRecord] {
        &self.catalog
    }

    #[must_use]
    pub fn query(&self) -> &QueryState {
        &self.query
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Catalog indices of the filtered set, in catalog order.
    #[must_use]
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn filtered_jobs(&self) -> impl Iterator<Item = (usize, &JobRecord)> + '_ {
        self.filtered.iter().map(|&i| (i, &self.catalog[i]))
    }

    #[must_use]
    pub fn selected_job(&self) -> Option<&JobRecord> {
        self.view.selected_job.map(|i| &self.catalog[i])
    }

    #[must_use]
    pub fn has_pending_fallback(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewModel<'_> {
        ViewModel::build(&self.catalog, &self.filtered, &self.view)
    }

    fn update_query(&mut self, apply: impl FnOnce(&mut QueryState)) {
        let before = self.query.clone();
        apply(&mut self.query);
        if self.query != before {
            // Any in-flight fallback was for the old query.
            self.pending = None;
        }
        self.refilter();
    }

    fn refilter(&mut self) {
        self.filtered = filter(&self.catalog, &self.query);
        if let Some(selected) = self.view.selected_job {
            if self.filtered.binary_search(&selected).is_err() {
                tracing::debug!(job = selected, "selected job filtered out, clearing selection");
                self.view.selected_job = None;
            }
        }
    }

    fn submit(&mut self) -> Option<Command> {
        self.refilter();

        if let Some(&first) = self.filtered.first() {
            self.pending = None;
            self.focus(first);
            return None;
        }

        let location = self.query.location.trim();
        if location.is_empty() {
            return None;
        }
        if self
            .pending
            .as_ref()
            .is_some_and(|p| p.location == location)
        {
            tracing::debug!(location = %location, "fallback geocode already in flight");
            return None;
        }

        let ticket = FallbackTicket(self.next_ticket);
        self.next_ticket += 1;
        let location = location.to_owned();
        tracing::debug!(location = %location, ?ticket, "no job matches, geocoding location");
        self.pending = Some(PendingFallback {
            ticket,
            location: location.clone(),
        });
        Some(Command::GeocodeFallback { ticket, location })
    }

    fn click(&mut self, index: usize) {
        if self.filtered.binary_search(&index).is_err() {
            tracing::warn!(job = index, "ignoring click on a job outside the filtered set");
            return;
        }
        self.focus(index);
    }

    fn focus(&mut self, index: usize) {
        self.view.selected_job = Some(index);
        if let Some(position) = self.catalog[index].position() {
            self.view.map_center = position;
        }
        self.view.zoom = ZoomLevel::ZoomedIn;
    }

    fn complete_fallback(&mut self, ticket: FallbackTicket, result: Option<LatLng>) {
        let Some(pending) = self.pending.take_if(|p| p.ticket == ticket) else {
            tracing::debug!(?ticket, "dropping superseded fallback result");
            return;
        };
        if !self.filtered.is_empty() {
            return;
        }

        match result {
            Some(position) => {
                self.view.map_center = position;
                self.view.zoom = ZoomLevel::City;
            }
            None => {
                tracing::warn!(location = %pending.location, "could not geocode location query, map unchanged");
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
