use std::{
    fmt,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{future::BoxFuture, Future, Stream};

use crate::{
    error::MultipartError,
    multipart::Multipart,
    part::Part,
    source::{CancelReason, ChunkSource},
};

type PendingRead<S> = BoxFuture<'static, (Multipart<S>, Result<Option<Part>, MultipartError>)>;

enum State<S> {
    Idle(Multipart<S>),
    Reading(PendingRead<S>),
    Released,
}

/// [`Stream`] of parts returned by [`Multipart::into_stream`].
///
/// Dropping the stream drops the source without calling
/// [`ChunkSource::cancel`]; use [`PartStream::cancel`] to pass a reason upstream.
pub struct PartStream<S> {
    state: State<S>,
}

// The parser is only ever moved, never pinned in place.
impl<S> Unpin for PartStream<S> {}

impl<S> PartStream<S> {
    pub(crate) fn new(multipart: Multipart<S>) -> Self {
        Self {
            state: State::Idle(multipart),
        }
    }

    /// Returns the parser while no read is in flight.
    pub fn multipart(&self) -> Option<&Multipart<S>> {
        match &self.state {
            State::Idle(multipart) => Some(multipart),
            _ => None,
        }
    }
}

impl<S: ChunkSource + 'static> PartStream<S> {
    /// Cancels the sequence and the upstream source with `reason`.
    ///
    /// A read already in flight is completed first and its result discarded. Behaves
    /// like [`Multipart::cancel`] otherwise.
    pub async fn cancel(&mut self, reason: impl Into<CancelReason>) {
        let mut multipart = match std::mem::replace(&mut self.state, State::Released) {
            State::Idle(multipart) => multipart,
            State::Reading(read) => read.await.0,
            State::Released => return,
        };

        multipart.cancel(reason).await;
        self.state = State::Idle(multipart);
    }

    /// Returns the parser, completing any read in flight first.
    pub async fn into_inner(mut self) -> Option<Multipart<S>> {
        match std::mem::replace(&mut self.state, State::Released) {
            State::Idle(multipart) => Some(multipart),
            State::Reading(read) => Some(read.await.0),
            State::Released => None,
        }
    }
}

impl<S: ChunkSource + 'static> Stream for PartStream<S> {
    type Item = Result<Part, MultipartError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match std::mem::replace(&mut self.state, State::Released) {
                State::Idle(multipart) if multipart.is_terminated() => {
                    self.state = State::Idle(multipart);
                    return Poll::Ready(None);
                }
                State::Idle(multipart) => {
                    self.state = State::Reading(Box::pin(read_next(multipart)));
                }
                State::Reading(mut read) => match read.as_mut().poll(cx) {
                    Poll::Ready((multipart, result)) => {
                        self.state = State::Idle(multipart);
                        return Poll::Ready(result.transpose());
                    }
                    Poll::Pending => {
                        self.state = State::Reading(read);
                        return Poll::Pending;
                    }
                },
                State::Released => return Poll::Ready(None),
            }
        }
    }
}

impl<S> fmt::Debug for PartStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Idle(_) => "idle",
            State::Reading(_) => "reading",
            State::Released => "released",
        };
        f.debug_struct("PartStream").field("state", &state).finish()
    }
}

async fn read_next<S: ChunkSource>(
    mut multipart: Multipart<S>,
) -> (Multipart<S>, Result<Option<Part>, MultipartError>) {
    let result = multipart.next_part().await;
    (multipart, result)
}
