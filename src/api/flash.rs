//! One-shot user messages carried across a redirect
//!
//! Messages queued before a redirect travel in a signed cookie and are
//! shown (and cleared) by the next rendered page.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::HttpRequest;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

pub const FLASH_COOKIE: &str = "fyyur_flash";

/// Signs and verifies flash cookie payloads
#[derive(Clone)]
pub struct FlashSigner {
    key: Vec<u8>,
}

impl FlashSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            key: secret.as_bytes().to_vec(),
        }
    }

    fn tag(&self, payload: &str) -> Option<Vec<u8>> {
        let mut mac = HmacSha256::new_from_slice(&self.key).ok()?;
        mac.update(payload.as_bytes());
        Some(mac.finalize().into_bytes().to_vec())
    }

    /// Encode messages as `<hex json>.<hex hmac>`
    pub fn sign(&self, messages: &[String]) -> Option<String> {
        let json = serde_json::to_string(messages).ok()?;
        let payload = hex::encode(json);
        let tag = self.tag(&payload)?;
        Some(format!("{}.{}", payload, hex::encode(tag)))
    }

    /// Decode a signed value; anything tampered with or malformed yields `None`
    pub fn verify(&self, value: &str) -> Option<Vec<String>> {
        let (payload, tag) = value.split_once('.')?;
        let given = hex::decode(tag).ok()?;
        let expected = self.tag(payload)?;
        if !bool::from(expected.ct_eq(&given)) {
            return None;
        }

        let json = hex::decode(payload).ok()?;
        serde_json::from_slice(&json).ok()
    }

    /// Cookie carrying `messages` to the next page
    pub fn cookie(&self, messages: &[String]) -> Option<Cookie<'static>> {
        let value = self.sign(messages)?;
        Some(
            Cookie::build(FLASH_COOKIE, value)
                .path("/")
                .http_only(true)
                .finish(),
        )
    }

    /// Messages waiting in the request's flash cookie, and whether a cookie was present
    pub fn pending(&self, req: &HttpRequest) -> (Vec<String>, bool) {
        match req.cookie(FLASH_COOKIE) {
            Some(cookie) => {
                let messages = self.verify(cookie.value()).unwrap_or_else(|| {
                    tracing::warn!("Discarding flash cookie with a bad signature");
                    Vec::new()
                });
                (messages, true)
            }
            None => (Vec::new(), false),
        }
    }
}

/// Cookie that clears the flash cookie in the browser
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, "")
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::seconds(0))
        .finish()
}
