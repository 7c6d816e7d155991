//! Hyper integration helpers.

use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use http_body_util::BodyExt;
use hyper::{body::Body, header, Response};

use crate::{
    error::{BoxError, MultipartError, ParseError},
    multipart::Multipart,
    source::StreamSource,
};

/// Hyper body stream mapped into `multipart-feed` chunk errors.
pub type HyperBodyBoxStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send + 'static>>;

/// [`ChunkSource`](crate::ChunkSource) reading a Hyper body.
pub type BodySource = StreamSource<HyperBodyBoxStream>;

/// Extracts the raw `Content-Type` header from a Hyper response.
pub fn content_type_from_response<B>(response: &Response<B>) -> Result<&str, MultipartError> {
    let value = response
        .headers()
        .get(header::CONTENT_TYPE)
        .ok_or_else(|| ParseError::InvalidContentType {
            content_type: String::new(),
        })?;

    value.to_str().map_err(|_| {
        ParseError::InvalidContentType {
            content_type: String::from_utf8_lossy(value.as_bytes()).into_owned(),
        }
        .into()
    })
}

/// Maps a Hyper body into a boxed chunk stream.
pub fn map_body_stream<B>(body: B) -> HyperBodyBoxStream
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let stream = body
        .into_data_stream()
        .map(|item| item.map_err(Into::<BoxError>::into));
    Box::pin(stream)
}

/// Creates a part parser from a `multipart/*` Hyper response.
pub fn multipart_from_response<B>(
    response: Response<B>,
) -> Result<Multipart<BodySource>, MultipartError>
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    let content_type = content_type_from_response(&response)?.to_owned();
    let body = map_body_stream(response.into_body());
    Multipart::new(&content_type, StreamSource::new(body))
}
