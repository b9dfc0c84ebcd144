//! Render-ready snapshot of the controller: the listing, the map markers,
//! and the viewport.

use jobmap_core::{JobRecord, LatLng};

use crate::controller::ViewState;

pub const EMPTY_MESSAGE: &str = "No matching jobs found.";

#[derive(Debug, Clone, PartialEq)]
pub struct ListingItem<'a> {
    /// Catalog index, used to issue `JobClicked`.
    pub index: usize,
    pub job: &'a JobRecord,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub position: LatLng,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<'a> {
    pub listings: Vec<ListingItem<'a>>,
    /// Filtered jobs that have coordinates.
    pub markers: Vec<Marker>,
    pub map_center: LatLng,
    pub zoom: u8,
    pub selected: Option<&'a JobRecord>,
}

impl<'a> ViewModel<'a> {
    #[must_use]
    pub fn build(catalog: &'a [JobRecord], filtered: &[usize], view: &ViewState) -> Self {
        let listings = filtered
            .iter()
            .map(|&index| ListingItem {
                index,
                job: &catalog[index],
                selected: view.selected_job == Some(index),
            })
            .collect::<Vec<_>>();

        let markers = listings
            .iter()
            .filter_map(|item| {
                item.job.position().map(|position| Marker {
                    index: item.index,
                    position,
                    selected: item.selected,
                })
            })
            .collect();

        Self {
            listings,
            markers,
            map_center: view.map_center,
            zoom: view.zoom.level(),
            selected: view.selected_job.map(|i| &catalog[i]),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// The listing panel's empty-state text, when there is nothing to list.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_MESSAGE)
    }
}
