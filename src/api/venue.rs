//! Venue routes

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

use super::errors::PageError;
use super::page::{redirect, Page};
use super::AppState;
use crate::core::VenueLib;
use crate::db::{StoreError, StoreResult, VenueTable};
use crate::models::{FormData, Venue, GENRE_CHOICES, STATE_CHOICES};
use crate::utils::dates::now;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Configure venue routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_venues)
        .service(search_venues)
        .service(create_venue_form)
        .service(create_venue_submission)
        .service(show_venue)
        .service(edit_venue_form)
        .service(edit_venue_submission)
        .service(delete_venue);
}

/// GET /venues
#[get("")]
async fn list_venues(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, PageError> {
    let mut conn = state.db.acquire().await?;
    let areas = VenueLib::grouped_by_location(&mut conn, now()).await?;

    Ok(Page::new("pages/venues.html").with("areas", areas).render(&req))
}

/// POST /venues/search
#[post("/search")]
async fn search_venues(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse, PageError> {
    let mut conn = state.db.acquire().await?;
    let results = VenueLib::search(&mut conn, &form.search_term, now()).await?;

    Ok(Page::new("pages/search_venues.html")
        .with("results", results)
        .with("search_term", &form.search_term)
        .render(&req))
}

/// GET /venues/{venue_id}
#[get("/{venue_id:\\d+}")]
async fn show_venue(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, PageError> {
    let venue_id = path.into_inner();
    let mut conn = state.db.acquire().await?;
    let venue = VenueLib::detail(&mut conn, venue_id, now(), state.display)
        .await?
        .ok_or_else(|| PageError::not_found("venue", venue_id))?;

    Ok(Page::new("pages/show_venue.html").with("venue", venue).render(&req))
}

/// GET /venues/create
#[get("/create")]
async fn create_venue_form(req: HttpRequest) -> impl Responder {
    Page::new("forms/new_venue.html")
        .with("states", &STATE_CHOICES[..])
        .with("genres", &GENRE_CHOICES[..])
        .render(&req)
}

/// POST /venues/create
#[post("/create")]
async fn create_venue_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let form = FormData::from(form.into_inner());
    let name = form.get("name").unwrap_or_default().trim().to_string();

    let page = Page::new("pages/home.html");
    let page = match insert_venue(&state, &form).await {
        Ok(id) => {
            tracing::info!("Listed venue {} ({})", id, name);
            page.flash(format!("Venue {} was successfully listed!", name))
        }
        Err(e) => {
            tracing::error!("Failed to list venue {:?}: {}", name, e);
            page.flash(format!("An error occurred. Venue {} could not be listed.", name))
        }
    };

    page.render(&req)
}

/// GET /venues/{venue_id}/edit
#[get("/{venue_id:\\d+}/edit")]
async fn edit_venue_form(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, PageError> {
    let venue_id = path.into_inner();
    let mut conn = state.db.acquire().await?;
    let venue = VenueTable::get_by_id(&mut conn, venue_id)
        .await?
        .ok_or_else(|| PageError::not_found("venue", venue_id))?;

    Ok(Page::new("forms/edit_venue.html")
        .with("venue_id", venue.id)
        .with("form", venue.form_values())
        .with("states", &STATE_CHOICES[..])
        .with("genres", &GENRE_CHOICES[..])
        .render(&req))
}

/// POST /venues/{venue_id}/edit
#[post("/{venue_id:\\d+}/edit")]
async fn edit_venue_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let venue_id = path.into_inner();
    let form = FormData::from(form.into_inner());

    let message = match update_venue(&state, venue_id, &form).await {
        Ok(name) => format!("Venue: {} has been successfully updated!", name),
        Err(e) => {
            tracing::error!("Failed to update venue {}: {}", venue_id, e);
            let name = form.get("name").unwrap_or_default().trim();
            format!("An error occurred. Venue {} could not be updated.", name)
        }
    };

    redirect(&req, &format!("/venues/{}", venue_id), Some(message))
}

/// GET /venues/{venue_id}/delete
#[get("/{venue_id:\\d+}/delete")]
async fn delete_venue(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let venue_id = path.into_inner();

    let message = match remove_venue(&state, venue_id).await {
        Ok(name) => format!("Venue {} was deleted successfully!", name),
        Err(e) => {
            tracing::error!("Failed to delete venue {}: {}", venue_id, e);
            "Venue was not deleted successfully.".to_string()
        }
    };

    redirect(&req, "/", Some(message))
}

async fn insert_venue(state: &AppState, form: &FormData) -> StoreResult<i64> {
    let venue = Venue::from_form(form)?;

    let mut tx = state.db.begin().await?;
    let id = VenueTable::add(&mut tx, &venue).await?;
    tx.commit().await?;
    Ok(id)
}

async fn update_venue(state: &AppState, venue_id: i64, form: &FormData) -> StoreResult<String> {
    let mut tx = state.db.begin().await?;
    let mut venue = VenueTable::get_by_id(&mut tx, venue_id)
        .await?
        .ok_or_else(|| StoreError::not_found("venue", venue_id))?;

    venue.apply_form(form)?;
    VenueTable::update(&mut tx, &venue).await?;
    tx.commit().await?;
    Ok(venue.name)
}

async fn remove_venue(state: &AppState, venue_id: i64) -> StoreResult<String> {
    let mut tx = state.db.begin().await?;
    let venue = VenueTable::get_by_id(&mut tx, venue_id)
        .await?
        .ok_or_else(|| StoreError::not_found("venue", venue_id))?;

    VenueTable::delete(&mut tx, venue_id).await?;
    tx.commit().await?;
    Ok(venue.name)
}

#[cfg(test)]
mod tests {
    use super::super::testing::{flash_cookie, page};
    use super::*;
    use crate::db::{ArtistTable, DbEngine, ShowTable};
    use crate::models::{Artist, Show};
    use crate::utils::dates::parse_datetime;
    use actix_web::http::{header, StatusCode};
    use actix_web::test::{call_service, TestRequest};
    use serde_json::json;
    use std::collections::HashSet;

    fn venue(name: &str, city: &str, state: &str) -> Venue {
        Venue {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1 Main Street".to_string(),
            phone: "123-123-1234".to_string(),
            ..Default::default()
        }
    }

    async fn seed_venues(db: &DbEngine, venues: &[Venue]) -> Vec<i64> {
        let mut conn = db.acquire().await.unwrap();
        let mut ids = Vec::new();
        for v in venues {
            ids.push(VenueTable::add(&mut conn, v).await.unwrap());
        }
        ids
    }

    async fn venue_count(db: &DbEngine) -> i64 {
        let mut conn = db.acquire().await.unwrap();
        VenueTable::count(&mut conn).await.unwrap()
    }

    fn new_venue_form(name: &str) -> Vec<(&str, &str)> {
        vec![
            ("name", name),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("genres", "Jazz"),
            ("genres", "Rock"),
            ("website_link", "https://www.themusicalhop.com"),
            ("seeking_talent", "y"),
        ]
    }

    #[actix_web::test]
    async fn test_grouped_listing_covers_every_venue_once() {
        let state = AppState::in_memory().await;
        let ids = seed_venues(
            &state.db,
            &[
                venue("The Musical Hop", "San Francisco", "CA"),
                venue("The Dueling Pianos Bar", "New York", "NY"),
                venue("Park Square Live Music & Coffee", "San Francisco", "CA"),
            ],
        )
        .await;
        let app = test_app!(state);

        let resp = call_service(&app, TestRequest::get().uri("/venues").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = page(resp).await;
        assert_eq!(body["template"], "pages/venues.html");

        let areas = body["context"]["areas"].as_array().unwrap();
        assert_eq!(areas.len(), 2);

        let listed: Vec<i64> = areas
            .iter()
            .flat_map(|a| a["venues"].as_array().unwrap().iter())
            .map(|v| v["id"].as_i64().unwrap())
            .collect();
        let unique: HashSet<i64> = listed.iter().copied().collect();
        assert_eq!(listed.len(), unique.len());
        assert_eq!(unique, ids.into_iter().collect::<HashSet<_>>());
    }

    #[actix_web::test]
    async fn test_search_is_case_insensitive() {
        let state = AppState::in_memory().await;
        seed_venues(
            &state.db,
            &[
                venue("Grand Arena", "Austin", "TX"),
                venue("ARENA Club", "Austin", "TX"),
                venue("The Musical Hop", "San Francisco", "CA"),
            ],
        )
        .await;
        let app = test_app!(state);

        let req = TestRequest::post()
            .uri("/venues/search")
            .set_form([("search_term", "arena")])
            .to_request();
        let body = page(call_service(&app, req).await).await;

        assert_eq!(body["template"], "pages/search_venues.html");
        assert_eq!(body["context"]["search_term"], "arena");
        assert_eq!(body["context"]["results"]["count"], 2);
    }

    #[actix_web::test]
    async fn test_create_then_detail_round_trips_genres() {
        let state = AppState::in_memory().await;
        let app = test_app!(state.clone());

        let req = TestRequest::post()
            .uri("/venues/create")
            .set_form(new_venue_form("The Musical Hop"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = page(resp).await;
        assert_eq!(body["template"], "pages/home.html");
        assert_eq!(
            body["flashes"],
            json!(["Venue The Musical Hop was successfully listed!"])
        );

        let resp = call_service(&app, TestRequest::get().uri("/venues/1").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = page(resp).await;
        assert_eq!(body["template"], "pages/show_venue.html");
        assert_eq!(body["context"]["venue"]["genres"], json!(["Jazz", "Rock"]));
        assert_eq!(body["context"]["venue"]["seeking_talent"], true);
        assert_eq!(body["context"]["venue"]["upcoming_shows_count"], 0);
    }

    #[actix_web::test]
    async fn test_failed_create_leaves_count_unchanged() {
        let state = AppState::in_memory().await;
        let app = test_app!(state.clone());

        let req = TestRequest::post()
            .uri("/venues/create")
            .set_form([("name", "Nowhere"), ("city", "Austin")])
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            page(resp).await["flashes"],
            json!(["An error occurred. Venue Nowhere could not be listed."])
        );
        assert_eq!(venue_count(&state.db).await, 0);
    }

    #[actix_web::test]
    async fn test_missing_venue_is_404_page() {
        let app = test_app!(AppState::in_memory().await);

        for uri in ["/venues/42", "/venues/42/edit"] {
            let resp = call_service(&app, TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
            assert_eq!(page(resp).await["template"], "errors/404.html");
        }
    }

    #[actix_web::test]
    async fn test_edit_form_is_prefilled() {
        let state = AppState::in_memory().await;
        let ids = seed_venues(&state.db, &[venue("The Musical Hop", "San Francisco", "CA")]).await;
        let app = test_app!(state);

        let uri = format!("/venues/{}/edit", ids[0]);
        let body = page(call_service(&app, TestRequest::get().uri(&uri).to_request()).await).await;
        assert_eq!(body["template"], "forms/edit_venue.html");
        assert_eq!(body["context"]["form"]["name"], "The Musical Hop");
        assert_eq!(body["context"]["states"].as_array().unwrap().len(), STATE_CHOICES.len());
    }

    #[actix_web::test]
    async fn test_edit_redirects_with_flash() {
        let state = AppState::in_memory().await;
        let ids = seed_venues(&state.db, &[venue("The Musical Hop", "San Francisco", "CA")]).await;
        let app = test_app!(state);

        let uri = format!("/venues/{}/edit", ids[0]);
        let req = TestRequest::post()
            .uri(&uri)
            .set_form(new_venue_form("The Musical Hop Reborn"))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = format!("/venues/{}", ids[0]);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), location.as_str());
        let cookie = flash_cookie(&resp).unwrap();

        // the next page shows the message once and clears the cookie
        let req = TestRequest::get().uri(&location).cookie(cookie).to_request();
        let resp = call_service(&app, req).await;
        let cleared = flash_cookie(&resp).unwrap();
        assert_eq!(cleared.value(), "");
        let body = page(resp).await;
        assert_eq!(
            body["flashes"],
            json!(["Venue: The Musical Hop Reborn has been successfully updated!"])
        );
        assert_eq!(body["context"]["venue"]["name"], "The Musical Hop Reborn");
        assert_eq!(body["context"]["venue"]["genres"], json!(["Jazz", "Rock"]));
    }

    #[actix_web::test]
    async fn test_failed_edit_keeps_row() {
        let state = AppState::in_memory().await;
        let ids = seed_venues(&state.db, &[venue("The Musical Hop", "San Francisco", "CA")]).await;
        let app = test_app!(state.clone());

        let req = TestRequest::post()
            .uri(&format!("/venues/{}/edit", ids[0]))
            .set_form([("name", "")])
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert!(flash_cookie(&resp).is_some());

        let mut conn = state.db.acquire().await.unwrap();
        let stored = VenueTable::get_by_id(&mut conn, ids[0]).await.unwrap().unwrap();
        assert_eq!(stored.name, "The Musical Hop");
    }

    #[actix_web::test]
    async fn test_delete_cascades_to_shows() {
        let state = AppState::in_memory().await;
        let ids = seed_venues(&state.db, &[venue("The Musical Hop", "San Francisco", "CA")]).await;
        {
            let mut conn = state.db.acquire().await.unwrap();
            let artist = Artist {
                name: "Guns N Petals".into(),
                city: "San Francisco".into(),
                state: "CA".into(),
                phone: "326-123-5000".into(),
                ..Default::default()
            };
            let artist_id = ArtistTable::add(&mut conn, &artist).await.unwrap();
            let start = parse_datetime("2019-05-21 21:30:00").unwrap();
            let show = Show::new(artist_id, ids[0], start, start);
            ShowTable::add(&mut conn, &show).await.unwrap();
        }
        let app = test_app!(state.clone());

        let req = TestRequest::get()
            .uri(&format!("/venues/{}/delete", ids[0]))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

        let signed = flash_cookie(&resp).unwrap();
        let messages = state.flash.verify(signed.value()).unwrap();
        assert_eq!(messages, vec!["Venue The Musical Hop was deleted successfully!"]);

        let mut conn = state.db.acquire().await.unwrap();
        assert_eq!(VenueTable::count(&mut conn).await.unwrap(), 0);
        assert_eq!(ShowTable::count(&mut conn).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_delete_missing_venue_flashes_failure() {
        let state = AppState::in_memory().await;
        let app = test_app!(state.clone());

        let resp = call_service(&app, TestRequest::get().uri("/venues/9/delete").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        let signed = flash_cookie(&resp).unwrap();
        let messages = state.flash.verify(signed.value()).unwrap();
        assert_eq!(messages, vec!["Venue was not deleted successfully."]);
    }
}
