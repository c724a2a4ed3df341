//! Home page

use actix_web::{get, web, HttpRequest, Responder};

use super::page::Page;

/// Configure home routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}

/// GET /
#[get("/")]
async fn index(req: HttpRequest) -> impl Responder {
    Page::new("pages/home.html").render(&req)
}
