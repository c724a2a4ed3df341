//! Artist listings, search and detail pages

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::SqliteConnection;

use super::schedule::{distinct_counterparts, Partition};
use super::SearchResults;
use crate::db::{ArtistTable, ShowTable, StoreResult};
use crate::models::{Artist, NamedEntity, ScheduledShow};
use crate::utils::dates::{format_datetime, to_db_string, DateFormat};

/// A venue appearance as listed on an artist page
#[derive(Debug, Clone, Serialize)]
pub struct VenueSlot {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
    pub start_time_display: String,
}

impl VenueSlot {
    fn from_scheduled(show: ScheduledShow, display: DateFormat) -> Self {
        let start_time_display =
            format_datetime(&show.start_time, display).unwrap_or_else(|_| show.start_time.clone());
        Self {
            venue_id: show.counterpart_id,
            venue_name: show.counterpart_name,
            venue_image_link: show.counterpart_image_link,
            start_time: show.start_time,
            start_time_display,
        }
    }
}

/// Everything the artist page shows
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub upcoming_shows: Vec<VenueSlot>,
    pub past_shows: Vec<VenueSlot>,
    pub upcoming_shows_count: usize,
    pub past_shows_count: usize,
    /// Distinct venues among the upcoming shows
    pub upcoming_venues_count: usize,
    /// Distinct venues among the past shows
    pub past_venues_count: usize,
}

/// Artist library
pub struct ArtistLib;

impl ArtistLib {
    /// Every artist by id
    pub async fn list(conn: &mut SqliteConnection) -> StoreResult<Vec<NamedEntity>> {
        ArtistTable::names(conn).await
    }

    /// Case-insensitive substring search on artist names
    pub async fn search(
        conn: &mut SqliteConnection,
        term: &str,
        now: NaiveDateTime,
    ) -> StoreResult<SearchResults> {
        let data = ArtistTable::search(conn, term, &to_db_string(&now)).await?;
        Ok(SearchResults::new(data))
    }

    /// The artist page, or `None` when there is no such artist
    pub async fn detail(
        conn: &mut SqliteConnection,
        id: i64,
        now: NaiveDateTime,
        display: DateFormat,
    ) -> StoreResult<Option<ArtistDetail>> {
        let Some(artist) = ArtistTable::get_by_id(conn, id).await? else {
            return Ok(None);
        };

        let Partition { upcoming, past } =
            Partition::split(ShowTable::by_artist(conn, id).await?, now);

        let upcoming_venues_count = distinct_counterparts(&upcoming);
        let past_venues_count = distinct_counterparts(&past);
        let upcoming_shows: Vec<_> = upcoming
            .into_iter()
            .map(|s| VenueSlot::from_scheduled(s, display))
            .collect();
        let past_shows: Vec<_> = past
            .into_iter()
            .map(|s| VenueSlot::from_scheduled(s, display))
            .collect();

        Ok(Some(ArtistDetail {
            artist,
            upcoming_shows_count: upcoming_shows.len(),
            past_shows_count: past_shows.len(),
            upcoming_shows,
            past_shows,
            upcoming_venues_count,
            past_venues_count,
        }))
    }
}
