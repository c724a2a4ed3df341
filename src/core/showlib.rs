//! The all-shows listing

use serde::Serialize;
use sqlx::SqliteConnection;

use crate::db::{ShowTable, StoreResult};
use crate::models::ShowListingRow;
use crate::utils::dates::{format_datetime, DateFormat};

/// One show on the shows page
#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
    pub start_time_display: String,
}

impl ShowListing {
    fn from_row(row: ShowListingRow, display: DateFormat) -> Self {
        let start_time_display =
            format_datetime(&row.start_time, display).unwrap_or_else(|_| row.start_time.clone());
        Self {
            show_id: row.id,
            venue_id: row.venue_id,
            venue_name: row.venue_name,
            artist_id: row.artist_id,
            artist_name: row.artist_name,
            artist_image_link: row.artist_image_link,
            start_time: row.start_time,
            start_time_display,
        }
    }
}

/// Show library
pub struct ShowLib;

impl ShowLib {
    /// Every show in booking order
    pub async fn listing(
        conn: &mut SqliteConnection,
        display: DateFormat,
    ) -> StoreResult<Vec<ShowListing>> {
        let rows = ShowTable::listing(conn).await?;
        Ok(rows
            .into_iter()
            .map(|row| ShowListing::from_row(row, display))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ArtistTable, DbEngine, VenueTable};
    use crate::models::{Artist, Show, Venue};
    use crate::utils::dates::parse_datetime;

    #[actix_web::test]
    async fn test_listing_in_booking_order() {
        let engine = DbEngine::in_memory().await.unwrap();
        let mut conn = engine.acquire().await.unwrap();

        let venue_id = VenueTable::add(
            &mut conn,
            &Venue {
                name: "The Musical Hop".into(),
                city: "San Francisco".into(),
                state: "CA".into(),
                address: "1015 Folsom Street".into(),
                phone: "123-123-1234".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let artist_id = ArtistTable::add(
            &mut conn,
            &Artist {
                name: "Guns N Petals".into(),
                city: "San Francisco".into(),
                state: "CA".into(),
                phone: "326-123-5000".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // booked later, plays earlier
        let later_booking = Show::new(
            artist_id,
            venue_id,
            parse_datetime("2027-01-01 20:00:00").unwrap(),
            parse_datetime("2026-10-02 09:00:00").unwrap(),
        );
        let earlier_booking = Show::new(
            artist_id,
            venue_id,
            parse_datetime("2027-06-01 20:00:00").unwrap(),
            parse_datetime("2026-10-01 09:00:00").unwrap(),
        );
        ShowTable::add(&mut conn, &later_booking).await.unwrap();
        ShowTable::add(&mut conn, &earlier_booking).await.unwrap();

        let listing = ShowLib::listing(&mut conn, DateFormat::Full).await.unwrap();
        let starts: Vec<_> = listing.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["2027-06-01 20:00:00", "2027-01-01 20:00:00"]);
        assert_eq!(listing[0].venue_id, venue_id);
        assert_eq!(listing[0].artist_id, artist_id);
        assert_eq!(listing[1].start_time_display, "Friday January, 1, 2027 at 8:00PM");
    }
}
