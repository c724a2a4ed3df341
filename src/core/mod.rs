//! Core listing and aggregation logic

pub mod artistlib;
pub mod schedule;
pub mod showlib;
pub mod venuelib;

pub use artistlib::ArtistLib;
pub use showlib::ShowLib;
pub use venuelib::VenueLib;

use serde::Serialize;

use crate::models::EntitySummary;

/// Search hits with their total
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl SearchResults {
    pub fn new(data: Vec<EntitySummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}
