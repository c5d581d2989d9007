use axum::{
    extract::{FromRef, FromRequest, FromRequestParts, Multipart, Request},
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::convert::Infallible;

use crate::core::error::AppError;
use crate::core::notice::{clear_cookie_header, read_cookie, NoticeSigner, NOTICE_COOKIE};

/// Pending notice for the page being rendered.
///
/// Extracted from the signed notice cookie; an unsigned or tampered cookie
/// yields no message but is still cleared by [`Notice::finish`].
#[derive(Debug, Clone, Default)]
pub struct Notice {
    message: Option<String>,
    from_cookie: bool,
}

impl Notice {
    /// Replace the message, still clearing the cookie it may have come from
    pub fn replace(self, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..self
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Expire the cookie this notice was read from, if any
    pub fn finish(&self, mut response: Response) -> Response {
        if self.from_cookie {
            response
                .headers_mut()
                .append(header::SET_COOKIE, clear_cookie_header());
        }
        response
    }
}

impl<S> FromRequestParts<S> for Notice
where
    NoticeSigner: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = read_cookie(&parts.headers, NOTICE_COOKIE) else {
            return Ok(Notice::none());
        };

        let signer = NoticeSigner::from_ref(state);
        let message = signer.verify(value);
        if message.is_none() {
            tracing::debug!("Ignoring notice cookie with invalid signature");
        }

        Ok(Notice {
            message,
            from_cookie: true,
        })
    }
}

/// Text fields of a urlencoded or multipart/form-data body.
///
/// In multipart bodies, file parts are skipped and the first value of a
/// repeated field wins.
pub struct FormFields<T>(pub T);

impl<T, S> FromRequest<S> for FormFields<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_multipart(req.headers()) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(Self(value));
        }

        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        let fields = read_text_fields(multipart)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_value(Value::Object(fields))
            .map(Self)
            .map_err(|e| AppError::BadRequest(format!("Invalid form data: {}", e)).into_response())
    }
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

async fn read_text_fields(mut multipart: Multipart) -> Result<Map<String, Value>, AppError> {
    let mut fields = Map::new();

    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let text = field.text().await?;
        fields.entry(name).or_insert(Value::String(text));
    }

    Ok(fields)
}
