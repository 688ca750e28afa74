//! Request body abstraction for the upload services
//!
//! The services pull parts and chunks from an [`UploadSource`] instead of an axum
//! `Multipart`, so they can be driven from tests without an HTTP request. Nothing is read
//! from the body until the service asks for it.

use async_trait::async_trait;
use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use tubely_core::AppError;

/// One named part of a multipart body.
#[async_trait]
pub trait UploadPart: Send {
    fn name(&self) -> Option<&str>;

    /// Media type declared by the client for this part.
    fn content_type(&self) -> Option<&str>;

    /// Next chunk of the part's data, `None` once it is exhausted.
    async fn chunk(&mut self) -> Result<Option<Bytes>, AppError>;
}

#[async_trait]
pub trait UploadSource: Send {
    /// Length of the whole body as declared by the client, if any.
    fn declared_length(&self) -> Option<u64>;

    async fn next_part<'a>(&'a mut self) -> Result<Option<Box<dyn UploadPart + 'a>>, AppError>;
}

/// [`UploadSource`] over an axum multipart extraction.
///
/// A rejected extraction is held until the first part is requested, so authorization
/// still runs ahead of any body error.
pub struct MultipartSource {
    multipart: Result<Multipart, Option<AppError>>,
    content_length: Option<u64>,
}

impl MultipartSource {
    pub fn new(
        multipart: Result<Multipart, MultipartRejection>,
        content_length: Option<u64>,
    ) -> Self {
        Self {
            multipart: multipart.map_err(|rejection| Some(rejection_error(rejection))),
            content_length,
        }
    }
}

#[async_trait]
impl UploadSource for MultipartSource {
    fn declared_length(&self) -> Option<u64> {
        self.content_length
    }

    async fn next_part<'a>(&'a mut self) -> Result<Option<Box<dyn UploadPart + 'a>>, AppError> {
        match &mut self.multipart {
            Ok(multipart) => {
                let field = multipart.next_field().await.map_err(multipart_error)?;
                Ok(field.map(|field| Box::new(field) as Box<dyn UploadPart + 'a>))
            }
            Err(rejection) => Err(rejection
                .take()
                .unwrap_or_else(|| AppError::BadRequest("Invalid multipart body".to_string()))),
        }
    }
}

#[async_trait]
impl UploadPart for Field<'_> {
    fn name(&self) -> Option<&str> {
        Field::name(self)
    }

    fn content_type(&self) -> Option<&str> {
        Field::content_type(self)
    }

    async fn chunk(&mut self) -> Result<Option<Bytes>, AppError> {
        Field::chunk(self).await.map_err(multipart_error)
    }
}

fn rejection_error(rejection: MultipartRejection) -> AppError {
    let status = rejection.status();
    let message = rejection.body_text();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(format!("Unable to parse form file: {}", message))
    }
}

/// Body read errors: exceeding the route's body limit is a 413, anything else is
/// a malformed request.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(format!("Unable to parse form file: {}", err.body_text()))
    }
}
