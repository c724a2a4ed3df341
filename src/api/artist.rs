//! Artist routes

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use super::errors::PageError;
use super::page::{redirect, Page};
use super::venue::SearchForm;
use super::AppState;
use crate::core::ArtistLib;
use crate::db::{ArtistTable, StoreError, StoreResult};
use crate::models::{Artist, FormData, GENRE_CHOICES, STATE_CHOICES};
use crate::utils::dates::now;

/// Configure artist routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_artists)
        .service(search_artists)
        .service(create_artist_form)
        .service(create_artist_submission)
        .service(show_artist)
        .service(edit_artist_form)
        .service(edit_artist_submission)
        .service(delete_artist);
}

/// GET /artists
#[get("")]
async fn list_artists(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, PageError> {
    let mut conn = state.db.acquire().await?;
    let artists = ArtistLib::list(&mut conn).await?;

    Ok(Page::new("pages/artists.html").with("artists", artists).render(&req))
}

/// POST /artists/search
#[post("/search")]
async fn search_artists(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, PageError> {
    let mut conn = state.db.acquire().await?;
    let results = ArtistLib::search(&mut conn, &form.search_term, now()).await?;

    Ok(Page::new("pages/search_artists.html")
        .with("results", results)
        .with("search_term", &form.search_term)
        .render(&req))
}

/// GET /artists/{artist_id}
#[get("/{artist_id:\\d+}")]
async fn show_artist(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, PageError> {
    let artist_id = path.into_inner();
    let mut conn = state.db.acquire().await?;
    let artist = ArtistLib::detail(&mut conn, artist_id, now(), state.display)
        .await?
        .ok_or_else(|| PageError::not_found("artist", artist_id))?;

    Ok(Page::new("pages/show_artist.html").with("artist", artist).render(&req))
}

/// GET /artists/create
#[get("/create")]
async fn create_artist_form(req: HttpRequest) -> impl Responder {
    Page::new("forms/new_artist.html")
        .with("states", &STATE_CHOICES[..])
        .with("genres", &GENRE_CHOICES[..])
        .render(&req)
}

/// POST /artists/create
#[post("/create")]
async fn create_artist_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let form = FormData::from(form.into_inner());
    let name = form.get("name").unwrap_or_default().trim().to_string();

    let page = Page::new("pages/home.html");
    let page = match insert_artist(&state, &form).await {
        Ok(id) => {
            tracing::info!("Listed artist {} ({})", id, name);
            page.flash(format!("Artist {} was successfully listed!", name))
        }
        Err(e) => {
            tracing::error!("Failed to list artist {:?}: {}", name, e);
            page.flash(format!("An error occurred. Artist {} could not be listed.", name))
        }
    };

    page.render(&req)
}

/// GET /artists/{artist_id}/edit
#[get("/{artist_id:\\d+}/edit")]
async fn edit_artist_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, PageError> {
    let artist_id = path.into_inner();
    let mut conn = state.db.acquire().await?;
    let artist = ArtistTable::get_by_id(&mut conn, artist_id)
        .await?
        .ok_or_else(|| PageError::not_found("artist", artist_id))?;

    Ok(Page::new("forms/edit_artist.html")
        .with("artist_id", artist.id)
        .with("form", artist.form_values())
        .with("states", &STATE_CHOICES[..])
        .with("genres", &GENRE_CHOICES[..])
        .render(&req))
}

/// POST /artists/{artist_id}/edit
#[post("/{artist_id:\\d+}/edit")]
async fn edit_artist_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let artist_id = path.into_inner();
    let form = FormData::from(form.into_inner());

    let message = match update_artist(&state, artist_id, &form).await {
        Ok(name) => format!("Artist: {} has been successfully updated!", name),
        Err(e) => {
            tracing::error!("Failed to update artist {}: {}", artist_id, e);
            let name = form.get("name").unwrap_or_default().trim();
            format!("An error occurred. Artist {} could not be updated.", name)
        }
    };

    redirect(&req, &format!("/artists/{}", artist_id), Some(message))
}

/// GET /artists/{artist_id}/delete
#[get("/{artist_id:\\d+}/delete")]
async fn delete_artist(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let artist_id = path.into_inner();

    let message = match remove_artist(&state, artist_id).await {
        Ok(name) => format!("Artist {} was deleted successfully!", name),
        Err(e) => {
            tracing::error!("Failed to delete artist {}: {}", artist_id, e);
            "Artist was not deleted successfully.".to_string()
        }
    };

    redirect(&req, "/", Some(message))
}

async fn insert_artist(state: &AppState, form: &FormData) -> StoreResult<i64> {
    let artist = Artist::from_form(form)?;

    let mut tx = state.db.begin().await?;
    let id = ArtistTable::add(&mut tx, &artist).await?;
    tx.commit().await?;
    Ok(id)
}

async fn update_artist(state: &AppState, artist_id: i64, form: &FormData) -> StoreResult<String> {
    let mut tx = state.db.begin().await?;
    let mut artist = ArtistTable::get_by_id(&mut tx, artist_id)
        .await?
        .ok_or_else(|| StoreError::not_found("artist", artist_id))?;

    artist.apply_form(form)?;
    ArtistTable::update(&mut tx, &artist).await?;
    tx.commit().await?;
    Ok(artist.name)
}

async fn remove_artist(state: &AppState, artist_id: i64) -> StoreResult<String> {
    let mut tx = state.db.begin().await?;
    let artist = ArtistTable::get_by_id(&mut tx, artist_id)
        .await?
        .ok_or_else(|| StoreError::not_found("artist", artist_id))?;

    ArtistTable::delete(&mut tx, artist_id).await?;
    tx.commit().await?;
    Ok(artist.name)
}
