//! HTTP routes for Fyyur

/// Build a test service over the full route table
#[cfg(test)]
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(crate::api::errors::error_handlers())
                .configure(crate::api::configure),
        )
        .await
    };
}

pub mod artist;
pub mod errors;
pub mod flash;
pub mod home;
pub mod page;
pub mod show;
pub mod venue;

use actix_web::web;

use crate::db::DbEngine;
use crate::utils::dates::DateFormat;
use flash::FlashSigner;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DbEngine,
    pub flash: FlashSigner,
    /// Pattern for `start_time_display`
    pub display: DateFormat,
}

impl AppState {
    pub fn new(db: DbEngine, secret_key: &str, display: DateFormat) -> Self {
        Self {
            db,
            flash: FlashSigner::new(secret_key),
            display,
        }
    }

    #[cfg(test)]
    pub(crate) async fn in_memory() -> Self {
        let db = DbEngine::in_memory().await.unwrap();
        Self::new(db, "test-secret", DateFormat::Full)
    }
}

/// Configure all routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(home::configure)
        // Venue routes
        .service(web::scope("/venues").configure(venue::configure))
        // Artist routes
        .service(web::scope("/artists").configure(artist::configure))
        // Show routes
        .service(web::scope("/shows").configure(show::configure));
}

#[cfg(test)]
pub(crate) mod testing {
    //! Helpers for route tests

    use actix_web::body::MessageBody;
    use actix_web::cookie::Cookie;
    use actix_web::dev::ServiceResponse;
    use actix_web::test::read_body_json;
    use serde_json::Value;

    use super::flash::FLASH_COOKIE;

    /// The page body as JSON
    pub async fn page<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
        read_body_json(resp).await
    }

    /// The flash cookie set by a response, if any
    pub fn flash_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
        resp.response()
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .map(|c| c.into_owned())
    }
}
