//! Venue table operations

use sqlx::{FromRow, SqliteConnection};

use super::retain_matching;
use crate::db::error::{StoreError, StoreResult};
use crate::models::{genres, EntitySummary, LocatedSummary, NamedEntity, Venue};

/// Database row for venues table
#[derive(Debug, FromRow)]
struct VenueRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: String,
    image_link: Option<String>,
    facebook_link: Option<String>,
    genres: String,
    seeking_talent: bool,
    seeking_description: Option<String>,
    website: String,
}

impl VenueRow {
    fn into_venue(self) -> Venue {
        Venue {
            id: self.id,
            name: self.name,
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            genres: genres::from_column(&self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description,
            website: self.website,
        }
    }
}

/// Venue table operations
pub struct VenueTable;

impl VenueTable {
    /// Insert a venue, returning its new id
    pub async fn add(conn: &mut SqliteConnection, venue: &Venue) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO venues (name, city, state, address, phone, image_link, facebook_link,
                                genres, seeking_talent, seeking_description, website)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(genres::to_column(&venue.genres))
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(&venue.website)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Persist every field of an existing venue
    pub async fn update(conn: &mut SqliteConnection, venue: &Venue) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE venues SET name = ?, city = ?, state = ?, address = ?, phone = ?,
                image_link = ?, facebook_link = ?, genres = ?, seeking_talent = ?,
                seeking_description = ?, website = ?
            WHERE id = ?
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(genres::to_column(&venue.genres))
        .bind(venue.seeking_talent)
        .bind(&venue.seeking_description)
        .bind(&venue.website)
        .bind(venue.id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("venue", venue.id));
        }
        Ok(())
    }

    /// Delete a venue; its shows go with it
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM venues WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("venue", id));
        }
        Ok(())
    }

    /// Get venue by ID
    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> StoreResult<Option<Venue>> {
        let row: Option<VenueRow> = sqlx::query_as("SELECT * FROM venues WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(row.map(VenueRow::into_venue))
    }

    /// Id and name of every venue, ordered by id
    pub async fn names(conn: &mut SqliteConnection) -> StoreResult<Vec<NamedEntity>> {
        let rows = sqlx::query_as::<_, NamedEntity>("SELECT id, name FROM venues ORDER BY id")
            .fetch_all(conn)
            .await?;
        Ok(rows)
    }

    pub async fn count(conn: &mut SqliteConnection) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }

    /// All venues with their upcoming show counts, ordered so that venues
    /// sharing a (city, state) are adjacent
    pub async fn summaries_by_location(
        conn: &mut SqliteConnection,
        now: &str,
    ) -> StoreResult<Vec<LocatedSummary>> {
        let rows = sqlx::query_as::<_, LocatedSummary>(
            r#"
            SELECT v.id, v.name, v.city, v.state,
                   (SELECT COUNT(*) FROM shows s
                    WHERE s.venue_id = v.id AND s.start_time > ?) AS num_upcoming_shows
            FROM venues v
            ORDER BY v.state, v.city, v.id
            "#,
        )
        .bind(now)
        .fetch_all(conn)
        .await?;

        Ok(rows)
    }

    /// Venues whose name contains `term`, ignoring case
    pub async fn search(
        conn: &mut SqliteConnection,
        term: &str,
        now: &str,
    ) -> StoreResult<Vec<EntitySummary>> {
        let mut rows = sqlx::query_as::<_, EntitySummary>(
            r#"
            SELECT v.id, v.name,
                   (SELECT COUNT(*) FROM shows s
                    WHERE s.venue_id = v.id AND s.start_time > ?) AS num_upcoming_shows
            FROM venues v
            ORDER BY v.id
            "#,
        )
        .bind(now)
        .fetch_all(conn)
        .await?;

        // SQLite's LOWER() and LIKE only fold ASCII
        retain_matching(&mut rows, term, |row| row.name.as_str());
        Ok(rows)
    }
}
