//! One-shot notices carried across a redirect in a signed cookie.
//!
//! A handler that redirects after a form submission attaches a short message
//! with [`NoticeSigner::redirect`]. The next rendered page reads it through
//! the [`Notice`](crate::core::extractor::Notice) extractor, shows it once and
//! clears the cookie.
//!
//! Cookie value format: `<base64url(message)>.<hex(hmac_sha256(key, base64url(message)))>`

use axum::{
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// Name of the cookie holding the pending notice
pub const NOTICE_COOKIE: &str = "notice";

/// Signs and verifies notice cookies with the application secret key
#[derive(Clone)]
pub struct NoticeSigner {
    key: Arc<[u8]>,
}

impl NoticeSigner {
    pub fn new(secret_key: &str) -> Self {
        Self {
            key: Arc::from(secret_key.as_bytes()),
        }
    }

    fn mac(&self) -> Option<HmacSha256> {
        HmacSha256::new_from_slice(&self.key).ok()
    }

    /// Produce the signed cookie value for a message
    pub fn sign(&self, message: &str) -> Option<String> {
        let payload = BASE64_URL_SAFE_NO_PAD.encode(message.as_bytes());
        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        Some(format!("{}.{}", payload, signature))
    }

    /// Return the message if the cookie value carries a valid signature
    pub fn verify(&self, value: &str) -> Option<String> {
        let (payload, signature) = value.split_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature).ok()?;

        let bytes = BASE64_URL_SAFE_NO_PAD.decode(payload).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// 303 redirect to `to` carrying `message` for the next page render
    pub fn redirect(&self, to: &str, message: &str) -> Response {
        let mut response = Redirect::to(to).into_response();

        match self
            .sign(message)
            .and_then(|value| set_cookie_header(&value).ok())
        {
            Some(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            None => tracing::warn!("Failed to attach notice to redirect: {}", message),
        }

        response
    }
}

fn set_cookie_header(value: &str) -> Result<HeaderValue, header::InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        NOTICE_COOKIE, value
    ))
}

/// Header that expires the notice cookie
pub fn clear_cookie_header() -> HeaderValue {
    HeaderValue::from_static("notice=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Find a cookie value by name across all `Cookie` headers
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_sign_then_verify() {
        let signer = NoticeSigner::new("test-key");
        let value = signer.sign("Feedback saved").unwrap();
        assert_eq!(signer.verify(&value).as_deref(), Some("Feedback saved"));
    }

    #[test]
    fn test_verify_rejects_other_key() {
        let value = NoticeSigner::new("key-a").sign("hello").unwrap();
        assert!(NoticeSigner::new("key-b").verify(&value).is_none());
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let signer = NoticeSigner::new("test-key");
        let value = signer.sign("hello").unwrap();
        let (_, signature) = value.split_once('.').unwrap();
        let forged = format!("{}.{}", BASE64_URL_SAFE_NO_PAD.encode("bye"), signature);
        assert!(signer.verify(&forged).is_none());
        assert!(signer.verify("not-a-cookie").is_none());
    }

    #[test]
    fn test_redirect_sets_cookie() {
        let signer = NoticeSigner::new("test-key");
        let response = signer.redirect("/upload", "No file part");

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/upload");

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("notice="));
        let value = cookie
            .trim_start_matches("notice=")
            .split(';')
            .next()
            .unwrap();
        assert_eq!(signer.verify(value).as_deref(), Some("No file part"));
    }

    #[test]
    fn test_read_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("a=1; notice=xyz"));
        headers.append(header::COOKIE, HeaderValue::from_static("b=2"));

        assert_eq!(read_cookie(&headers, "notice"), Some("xyz"));
        assert_eq!(read_cookie(&headers, "b"), Some("2"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }
}
