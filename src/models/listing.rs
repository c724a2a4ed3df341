//! Rows produced by the listing and schedule queries

use serde::Serialize;
use sqlx::FromRow;

/// Id and name of a venue or artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct NamedEntity {
    pub id: i64,
    pub name: String,
}

/// A venue or artist in a listing, with its upcoming show count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// A venue summary tagged with its location, before grouping
#[derive(Debug, Clone, FromRow)]
pub struct LocatedSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// One show seen from the page of one of its two parties.
///
/// The counterpart is the artist on a venue page and the venue on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ScheduledShow {
    pub show_id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    /// Stored `%Y-%m-%d %H:%M:%S` text
    pub start_time: String,
}

/// One row of the all-shows listing
#[derive(Debug, Clone, FromRow)]
pub struct ShowListingRow {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}
