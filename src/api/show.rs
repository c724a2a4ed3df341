//! Show routes

use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};

use super::errors::PageError;
use super::page::Page;
use super::AppState;
use crate::core::ShowLib;
use crate::db::{ArtistTable, ShowTable, StoreResult, VenueTable};
use crate::models::{FormData, Show};
use crate::utils::dates::now;

/// Configure show routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_shows)
        .service(create_show_form)
        .service(create_show_submission);
}

/// GET /shows
#[get("")]
async fn list_shows(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, PageError> {
    let mut conn = state.db.acquire().await?;
    let shows = ShowLib::listing(&mut conn, state.display).await?;

    Ok(Page::new("pages/shows.html").with("shows", shows).render(&req))
}

/// GET /shows/create
#[get("/create")]
async fn create_show_form(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, PageError> {
    let mut conn = state.db.acquire().await?;
    let artists = ArtistTable::names(&mut conn).await?;
    let venues = VenueTable::names(&mut conn).await?;

    Ok(Page::new("forms/new_show.html")
        .with("artists", artists)
        .with("venues", venues)
        .render(&req))
}

/// POST /shows/create
#[post("/create")]
async fn create_show_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    form: web::Form<Vec<(String, String)>>,
) -> impl Responder {
    let form = FormData::from(form.into_inner());

    let page = Page::new("pages/home.html");
    let page = match insert_show(&state, &form).await {
        Ok(id) => {
            tracing::info!("Listed show {}", id);
            page.flash("Show was successfully listed!")
        }
        Err(e) => {
            tracing::error!("Failed to list show: {}", e);
            page.flash("An error occurred. Show could not be listed.")
        }
    };

    page.render(&req)
}

async fn insert_show(state: &AppState, form: &FormData) -> StoreResult<i64> {
    let show = Show::from_form(form, now())?;

    let mut tx = state.db.begin().await?;
    let id = ShowTable::add(&mut tx, &show).await?;
    tx.commit().await?;
    Ok(id)
}
