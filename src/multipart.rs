use std::collections::VecDeque;

use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;

use crate::{
    config::ParserConfig,
    error::MultipartError,
    parser::{
        boundary::Boundary,
        buffer::ChunkBuffer,
        machine::{ParserState, PartStateMachine},
    },
    part::Part,
    source::{CancelReason, ChunkSource, StreamSource},
    stream::PartStream,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Active,
    Closed,
    Failed,
    Cancelled,
}

/// Pull-driven multipart parser over a [`ChunkSource`].
///
/// Nothing is read from the source until [`Multipart::next_part`] is awaited, and at
/// most one read is in flight at a time. Every part completed by a chunk is handed out
/// before the next chunk is requested.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use futures::stream;
/// use multipart_feed::Multipart;
///
/// # async fn run() -> Result<(), multipart_feed::MultipartError> {
/// let body = "--X\r\nContent-Length: 5\r\n\r\nhello--X--";
/// let chunks = stream::iter([Ok::<_, std::io::Error>(Bytes::from_static(body.as_bytes()))]);
/// let mut multipart = Multipart::from_stream("multipart/x-mixed-replace; boundary=X", chunks)?;
///
/// while let Some(part) = multipart.next_part().await? {
///     assert_eq!(part.body(), "hello");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Multipart<S> {
    source: S,
    buffer: ChunkBuffer,
    machine: PartStateMachine,
    ready: VecDeque<Part>,
    deferred: Option<MultipartError>,
    status: Status,
}

impl<S> Multipart<S> {
    /// Creates a parser for `content_type` reading from `source`.
    ///
    /// Fails with [`ParseError::InvalidContentType`](crate::ParseError::InvalidContentType)
    /// before touching the source when no boundary can be extracted.
    pub fn new(content_type: &str, source: S) -> Result<Self, MultipartError> {
        Self::with_config(content_type, source, ParserConfig::default())
    }

    /// Creates a parser with explicit validated configuration.
    pub fn with_config(
        content_type: &str,
        source: S,
        config: ParserConfig,
    ) -> Result<Self, MultipartError> {
        config.validate()?;
        let boundary = Boundary::from_content_type(content_type, config.boundary_mode)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            boundary = boundary.token(),
            "multipart: parser created"
        );

        Ok(Self {
            source,
            buffer: ChunkBuffer::new(),
            machine: PartStateMachine::new(boundary, config.limits),
            ready: VecDeque::new(),
            deferred: None,
            status: Status::Active,
        })
    }

    /// Returns the boundary token extracted from the content type.
    pub fn boundary(&self) -> &str {
        self.machine.boundary().token()
    }

    /// Returns the current framing state.
    pub fn state(&self) -> ParserState {
        self.machine.state()
    }

    /// Returns the number of parts completed so far.
    pub fn parts_parsed(&self) -> usize {
        self.machine.parts_emitted()
    }

    /// Returns `true` once the sequence closed, failed or was cancelled.
    pub fn is_terminated(&self) -> bool {
        self.status != Status::Active && self.ready.is_empty() && self.deferred.is_none()
    }

    /// Returns a shared reference to the chunk source.
    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<St> Multipart<StreamSource<St>> {
    /// Creates a parser reading from a fallible stream of byte chunks.
    pub fn from_stream(content_type: &str, stream: St) -> Result<Self, MultipartError> {
        Self::new(content_type, StreamSource::new(stream))
    }
}

impl<R: AsyncRead> Multipart<StreamSource<ReaderStream<R>>> {
    /// Creates a parser reading from an async reader.
    pub fn from_reader(content_type: &str, reader: R) -> Result<Self, MultipartError> {
        Self::new(content_type, StreamSource::from_reader(reader))
    }
}

impl<S: ChunkSource> Multipart<S> {
    /// Yields the next complete part.
    ///
    /// Returns `Ok(None)` once the stream closed cleanly, and after any terminal event.
    /// An error is the final item of the sequence.
    pub async fn next_part(&mut self) -> Result<Option<Part>, MultipartError> {
        loop {
            if let Some(part) = self.ready.pop_front() {
                return Ok(Some(part));
            }
            if let Some(err) = self.deferred.take() {
                return Err(err);
            }
            if self.status != Status::Active {
                return Ok(None);
            }

            match self.source.read().await {
                Ok(Some(chunk)) => {
                    self.buffer.append(chunk);
                    if let Err(err) = self.machine.drain(&mut self.buffer, &mut self.ready) {
                        self.fail(err);
                    }
                }
                Ok(None) => {
                    if let Err(err) = self.machine.finish(&self.buffer) {
                        self.fail(err.into());
                        continue;
                    }

                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        parts = self.machine.parts_emitted(),
                        "multipart: stream closed"
                    );

                    self.status = Status::Closed;
                }
                Err(err) => self.fail(err),
            }
        }
    }

    /// Cancels the sequence and the upstream source with `reason`.
    ///
    /// The source is cancelled exactly once, and only while the sequence is still
    /// active. Queued parts are discarded. A failing source cancel is not reported.
    ///
    /// A sequence that already hit the end of the source or an error is no longer
    /// active, even while parts queued before that point are still waiting to be
    /// pulled. Cancelling it then discards those parts without calling the source.
    pub async fn cancel(&mut self, reason: impl Into<CancelReason>) {
        self.ready.clear();
        self.deferred = None;

        if self.status != Status::Active {
            self.status = Status::Cancelled;
            return;
        }
        self.status = Status::Cancelled;

        let reason = reason.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            reason = reason.message(),
            parts = self.machine.parts_emitted(),
            "multipart: cancelling source"
        );

        if let Err(_err) = self.source.cancel(reason).await {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "multipart: source cancel failed");
        }
    }

    /// Converts the parser into a [`Stream`](futures::Stream) of parts.
    ///
    /// The returned [`PartStream`] keeps reasoned cancellation through
    /// [`PartStream::cancel`].
    pub fn into_stream(self) -> PartStream<S>
    where
        S: 'static,
    {
        PartStream::new(self)
    }

    fn fail(&mut self, err: MultipartError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            error = %err,
            parts = self.machine.parts_emitted(),
            "multipart: stream failed"
        );

        self.status = Status::Failed;
        self.deferred = Some(err);
    }
}

