//! Artist table operations

use sqlx::{FromRow, SqliteConnection};

use super::retain_matching;
use crate::db::error::{StoreError, StoreResult};
use crate::models::{genres, Artist, EntitySummary, NamedEntity};

/// Database row for artists table
#[derive(Debug, FromRow)]
struct ArtistRow {
    id: i64,
    name: String,
    city: String,
    state: String,
    phone: String,
    genres: String,
    image_link: Option<String>,
    facebook_link: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
    website: Option<String>,
}

impl ArtistRow {
    fn into_artist(self) -> Artist {
        Artist {
            id: self.id,
            name: self.name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            genres: genres::from_column(&self.genres),
            image_link: self.image_link,
            facebook_link: self.facebook_link,
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description,
            website: self.website,
        }
    }
}

/// Artist table operations
pub struct ArtistTable;

impl ArtistTable {
    /// Insert an artist, returning its new id
    pub async fn add(conn: &mut SqliteConnection, artist: &Artist) -> StoreResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO artists (name, city, state, phone, genres, image_link, facebook_link,
                                 seeking_venue, seeking_description, website)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(genres::to_column(&artist.genres))
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(&artist.website)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Persist every field of an existing artist
    pub async fn update(conn: &mut SqliteConnection, artist: &Artist) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE artists SET name = ?, city = ?, state = ?, phone = ?, genres = ?,
                image_link = ?, facebook_link = ?, seeking_venue = ?,
                seeking_description = ?, website = ?
            WHERE id = ?
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(genres::to_column(&artist.genres))
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(artist.seeking_venue)
        .bind(&artist.seeking_description)
        .bind(&artist.website)
        .bind(artist.id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("artist", artist.id));
        }
        Ok(())
    }

    /// Delete an artist; their shows go with them
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM artists WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("artist", id));
        }
        Ok(())
    }

    /// Get artist by ID
    pub async fn get_by_id(conn: &mut SqliteConnection, id: i64) -> StoreResult<Option<Artist>> {
        let row: Option<ArtistRow> = sqlx::query_as("SELECT * FROM artists WHERE id = ?")
            .bind(id)
            .fetch_optional(conn)
            .await?;

        Ok(row.map(ArtistRow::into_artist))
    }

    /// Id and name of every artist, ordered by id
    pub async fn names(conn: &mut SqliteConnection) -> StoreResult<Vec<NamedEntity>> {
        let rows = sqlx::query_as::<_, NamedEntity>("SELECT id, name FROM artists ORDER BY id")
            .fetch_all(conn)
            .await?;
        Ok(rows)
    }

    pub async fn count(conn: &mut SqliteConnection) -> StoreResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artists")
            .fetch_one(conn)
            .await?;
        Ok(row.0)
    }

    /// Artists whose name contains `term`, ignoring case
    pub async fn search(
        conn: &mut SqliteConnection,
        term: &str,
        now: &str,
    ) -> StoreResult<Vec<EntitySummary>> {
        let mut rows = sqlx::query_as::<_, EntitySummary>(
            r#"
            SELECT a.id, a.name,
                   (SELECT COUNT(*) FROM shows s
                    WHERE s.artist_id = a.id AND s.start_time > ?) AS num_upcoming_shows
            FROM artists a
            ORDER BY a.id
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
