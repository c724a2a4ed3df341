//! Rendered pages and redirects
//!
//! A page names the template that presents it and carries the context for
//! that template, plus any flashed messages:
//! `{ "template": "...", "flashes": [...], "context": {...} }`.

use actix_web::http::{header, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::flash::removal_cookie;
use super::AppState;

/// A page to render
#[derive(Debug)]
pub struct Page {
    template: &'static str,
    context: Map<String, Value>,
    flashes: Vec<String>,
}

impl Page {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Map::new(),
            flashes: Vec::new(),
        }
    }

    /// Add a context entry
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            tracing::error!("Could not serialize '{}' for {}: {}", key, self.template, e);
            Value::Null
        });
        self.context.insert(key.to_string(), value);
        self
    }

    /// Queue a message to show on this page
    pub fn flash(mut self, message: impl Into<String>) -> Self {
        self.flashes.push(message.into());
        self
    }

    /// Render, showing and clearing any messages left by a previous redirect
    pub fn render(self, req: &HttpRequest) -> HttpResponse {
        let (mut flashes, had_cookie) = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.flash.pending(req),
            None => (Vec::new(), false),
        };
        flashes.extend(self.flashes);

        let body = json!({
            "template": self.template,
            "flashes": flashes,
            "context": Value::Object(self.context),
        });

        let mut builder = HttpResponse::Ok();
        if had_cookie {
            builder.cookie(removal_cookie());
        }
        builder.json(body)
    }

    /// The dedicated page for an HTTP error status
    pub fn error(status: StatusCode) -> HttpResponse {
        let template = match status {
            StatusCode::NOT_FOUND => "errors/404.html",
            _ => "errors/500.html",
        };

        HttpResponse::build(status).json(json!({
            "template": template,
            "flashes": [],
            "context": {},
        }))
    }
}

/// Redirect to `location`, carrying `message` to the page rendered there
pub fn redirect(req: &HttpRequest, location: &str, message: Option<String>) -> HttpResponse {
    let mut builder = HttpResponse::Found();
    builder.insert_header((header::LOCATION, location));

    if let Some(state) = req.app_data::<web::Data<AppState>>() {
        let (mut messages, had_cookie) = state.flash.pending(req);
        messages.extend(message);

        if !messages.is_empty() {
            match state.flash.cookie(&messages) {
                Some(cookie) => {
                    builder.cookie(cookie);
                }
                None => tracing::warn!("Could not sign flash messages; dropping them"),
            }
        } else if had_cookie {
            builder.cookie(removal_cookie());
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_render_shape() {
        let req = TestRequest::default().to_http_request();
        let resp = Page::new("pages/home.html")
            .with("answer", 42)
            .flash("hello")
            .render(&req);

        assert_eq!(resp.status(), StatusCode::OK);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["template"], "pages/home.html");
        assert_eq!(value["flashes"], json!(["hello"]));
        assert_eq!(value["context"]["answer"], 42);
    }

    #[actix_web::test]
    async fn test_error_pages() {
        assert_eq!(Page::error(StatusCode::NOT_FOUND).status(), StatusCode::NOT_FOUND);

        let resp = Page::error(StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["template"], "errors/500.html");
    }

    #[test]
    fn test_redirect_location() {
        let req = TestRequest::default().to_http_request();
        let resp = redirect(&req, "/venues/3", None);
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/venues/3");
    }
}
