//! Show table operations

use sqlx::{FromRow, SqliteConnection};

use crate::db::error::{StoreError, StoreResult};
use crate::models::{ScheduledShow, Show, ShowListingRow};
use crate::utils::dates::{parse_datetime, to_db_string, DateError};

/// Database row for shows table
#[derive(Debug, FromRow)]
struct ShowRow {
    id: i64,
    date: String,
    start_time: String,
    artist_id: i64,
    venue_id: i64,
}

impl ShowRow {
    fn into_show(self) -> StoreResult<Show> {
        let id = self.id;
        let unreadable = |e: DateError| StoreError::Unreadable {
            entity: "show",
            id,
            detail: e.to_string(),
        };

        Ok(Show {
            id,
            date: parse_datetime(&self.date).map_err(unreadable)?,
            start_time: parse_datetime(&self.start_time).map_err(unreadable)?,
            artist_id: self.artist_id,
            venue_id: self.venue_id,
        })
    }
}

/// Show table operations
pub struct ShowTable;

impl ShowTable {
    /// Book a show, returning its new id. Fails if either party does not exist.
    pub async fn add(conn: &mut SqliteConnection, show: &Show) -> StoreResult<i64> {
        let result = sqlx::query(
            "INSERT INTO shows (date, start_time, artist_id, venue_id) VALUES (?, ?, ?, ?)",
        )
        .bind(to_db_string(&show.date))
        .bind(to_db_string(&show.start_time))
        .bind(show.artist_id)
        .bind(show.venue_id)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(conn: &mut SqliteConnection, show: &Show) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE shows SET date = ?, start_time = ?, artist_id = ?, venue_id = ? WHERE id = ?",
        )
        .bind(to_db_string(&show.date))
        .bind(to_db_string(&show.start_time))
        .bind(show.artist_id)
        .bind(show.venue_id)
        .bind(show.id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("show", show.id));
        }
        Ok(())
    }

    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM shows WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("show", id));
        }
        Ok(())
    }

    /// Get show by ID
    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> StoreResult<Option<Show>> {
        let row: Option<ShowRow> = sqlx::query_as("SELECT * FROM shows WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        row.map(ShowRow::into_show).transpose()
    }

    pub async fn count(conn: &mut SqliteConnection) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM shows")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }

    /// Every show with both parties joined in, in booking order
    pub async fn listing(conn: &mut SqliteConnection) -> StoreResult<Vec<ShowListingRow>> {
        let rows = sqlx::query_as::<_, ShowListingRow>(
            r#"
            SELECT s.id, s.venue_id, v.name AS venue_name,
                   s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
                   s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            JOIN venues v ON v.id = s.venue_id
            ORDER BY s.date, s.id
            "#,
        )
        .fetch_all(conn)
        .await?;

        Ok(rows)
    }

    /// Shows at a venue, with the performing artist as counterpart
    pub async fn at_venue(
        conn: &mut SqliteConnection,
        venue_id: i64,
    ) -> StoreResult<Vec<ScheduledShow>> {
        let rows = sqlx::query_as::<_, ScheduledShow>(
            r#"
            SELECT s.id AS show_id, a.id AS counterpart_id, a.name AS counterpart_name,
                   a.image_link AS counterpart_image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(venue_id)
        .fetch_all(conn)
        .await?;

        Ok(rows)
    }

    /// Shows by an artist, with the hosting venue as counterpart
    pub async fn by_artist(
        conn: &mut SqliteConnection,
        artist_id: i64,
    ) -> StoreResult<Vec<ScheduledShow>> {
        let rows = sqlx::query_as::<_, ScheduledShow>(
            r#"
            SELECT s.id AS show_id, v.id AS counterpart_id, v.name AS counterpart_name,
                   v.image_link AS counterpart_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = ?
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(artist_id)
        .fetch_all(conn)
        .await?;

        Ok(rows)
    }
}
