//! Venue listings, search and detail pages

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::SqliteConnection;

use super::schedule::{distinct_counterparts, Partition};
use super::SearchResults;
use crate::db::{ShowTable, StoreResult, VenueTable};
use crate::models::{EntitySummary, ScheduledShow, Venue};
use crate::utils::dates::{format_datetime, to_db_string, DateFormat};

/// Venues sharing a city and state
#[derive(Debug, Clone, Serialize)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// An artist's appearance as listed on a venue page
#[derive(Debug, Clone, Serialize)]
pub struct ArtistSlot {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    pub start_time_display: String,
}

impl ArtistSlot {
    fn from_scheduled(show: ScheduledShow, display: DateFormat) -> Self {
        let start_time_display =
            format_datetime(&show.start_time, display).unwrap_or_else(|_| show.start_time.clone());
        Self {
            artist_id: show.counterpart_id,
            artist_name: show.counterpart_name,
            artist_image_link: show.counterpart_image_link,
            start_time: show.start_time,
            start_time_display,
        }
    }
}

/// Everything the venue page shows
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub upcoming_shows: Vec<ArtistSlot>,
    pub past_shows: Vec<ArtistSlot>,
    pub upcoming_shows_count: usize,
    pub past_shows_count: usize,
    /// Distinct artists among the upcoming shows
    pub upcoming_artists_count: usize,
    /// Distinct artists among the past shows
    pub past_artists_count: usize,
}

/// Venue library
pub struct VenueLib;

impl VenueLib {
    /// All venues grouped by (city, state), each with its own upcoming show count
    pub async fn grouped_by_location(
        conn: &mut SqliteConnection,
        now: NaiveDateTime,
    ) -> StoreResult<Vec<LocationGroup>> {
        let rows = VenueTable::summaries_by_location(conn, &to_db_string(&now)).await?;

        let mut groups: Vec<LocationGroup> = Vec::new();
        for row in rows {
            let summary = EntitySummary {
                id: row.id,
                name: row.name,
                num_upcoming_shows: row.num_upcoming_shows,
            };

            // rows arrive sorted by location, so a group only ever continues the last one
            match groups.last_mut() {
                Some(group) if group.city == row.city && group.state == row.state => {
                    group.venues.push(summary);
                }
                _ => groups.push(LocationGroup {
                    city: row.city,
                    state: row.state,
                    venues: vec![summary],
                }),
            }
        }

        Ok(groups)
    }

    /// Case-insensitive substring search on venue names
    pub async fn search(
        conn: &mut SqliteConnection,
        term: &str,
        now: NaiveDateTime,
    ) -> StoreResult<SearchResults> {
        let data = VenueTable::search(conn, term, &to_db_string(&now)).await?;
        Ok(SearchResults::new(data))
    }

    /// The venue page, or `None` when there is no such venue
    pub async fn detail(
        conn: &mut SqliteConnection,
        id: i64,
        now: NaiveDateTime,
        display: DateFormat,
    ) -> StoreResult<Option<VenueDetail>> {
        let Some(venue) = VenueTable::get_by_id(conn, id).await? else {
            return Ok(None);
        };

        let shows = ShowTable::at_venue(conn, id).await?;
        let Partition { upcoming, past } = Partition::split(shows, now);

        let upcoming_artists_count = distinct_counterparts(&upcoming);
        let past_artists_count = distinct_counterparts(&past);
        let to_slots = |shows: Vec<ScheduledShow>| -> Vec<ArtistSlot> {
            shows
                .into_iter()
                .map(|s| ArtistSlot::from_scheduled(s, display))
                .collect()
        };
        let upcoming_shows = to_slots(upcoming);
        let past_shows = to_slots(past);

        Ok(Some(VenueDetail {
            venue,
            upcoming_shows_count: upcoming_shows.len(),
            past_shows_count: past_shows.len(),
            upcoming_shows,
            past_shows,
            upcoming_artists_count,
            past_artists_count,
        }))
    }
}
