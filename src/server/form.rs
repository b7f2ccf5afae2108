//! Form body extraction for the `text` field

use async_trait::async_trait;
use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::server::error::ApiError;

const TEXT_FIELD: &str = "text";

/// The submitted text, read from an urlencoded or multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextForm {
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct UrlEncodedFields {
    text: Option<String>,
}

#[async_trait]
impl<S> FromRequest<S> for TextForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<UrlEncodedFields>::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidForm(e.body_text()))?;

            return fields
                .text
                .map(|text| Self { text })
                .ok_or(ApiError::MissingField(TEXT_FIELD));
        }

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::InvalidForm(e.body_text()))?;

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| ApiError::InvalidForm(e.body_text()))?
            {
                if field.name() == Some(TEXT_FIELD) {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| ApiError::InvalidForm(e.body_text()))?;
                    return Ok(Self { text });
                }
            }

            return Err(ApiError::MissingField(TEXT_FIELD));
        }

        Err(ApiError::UnsupportedMediaType)
    }
}
