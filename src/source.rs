//! Pull sources of transport chunks.

use std::fmt;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::error::{BoxError, MultipartError};

/// Why a consumer abandoned a multipart sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelReason {
    message: String,
}

impl CancelReason {
    /// Creates a cancellation reason from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the reason message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&str> for CancelReason {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for CancelReason {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Pull-based producer of byte chunks.
///
/// Callers issue at most one `read` at a time and never read after `Ok(None)` or
/// after `cancel`.
#[async_trait::async_trait]
pub trait ChunkSource: Send {
    /// Waits for the next chunk; `Ok(None)` marks the end of the stream.
    async fn read(&mut self) -> Result<Option<Bytes>, MultipartError>;

    /// Abandons the stream and releases the transport.
    async fn cancel(&mut self, reason: CancelReason) -> Result<(), MultipartError>;
}

/// [`ChunkSource`] over any fallible stream of byte chunks.
///
/// Cancelling drops the inner stream.
pub struct StreamSource<S> {
    stream: Option<S>,
}

impl<S> StreamSource<S> {
    /// Wraps a chunk stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// Returns `true` once the stream was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.stream.is_none()
    }
}

impl<S> fmt::Debug for StreamSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSource")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[async_trait::async_trait]
impl<S, B, E> ChunkSource for StreamSource<S>
where
    S: Stream<Item = Result<B, E>> + Send + Unpin,
    B: Into<Bytes> + Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    async fn read(&mut self) -> Result<Option<Bytes>, MultipartError> {
        let Some(stream) = self.stream.as_mut() else {
            return Ok(None);
        };

        match stream.next().await {
            Some(Ok(chunk)) => Ok(Some(chunk.into())),
            Some(Err(err)) => Err(MultipartError::source_error(err)),
            None => Ok(None),
        }
    }

    async fn cancel(&mut self, reason: CancelReason) -> Result<(), MultipartError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(reason = reason.message(), "stream source: cancelled");

        let _ = reason;
        self.stream = None;
        Ok(())
    }
}

/// [`ChunkSource`] over an [`AsyncRead`], read in `ReaderStream`-sized chunks.
pub type ReaderSource<R> = StreamSource<ReaderStream<R>>;

impl<R: AsyncRead> StreamSource<ReaderStream<R>> {
    /// Wraps an async reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderStream::new(reader))
    }
}
