use std::collections::VecDeque;

use crate::{
    error::{MultipartError, ParseError},
    limits::Limits,
    parser::{
        boundary::Boundary,
        buffer::ChunkBuffer,
        headers::{parse_content_length, parse_header_line, HeaderSet},
    },
    part::Part,
};

const CRLF: &[u8] = b"\r\n";

/// Position of the parser within the boundary, headers, body cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Expecting a part or end delimiter. Initial and only valid terminal state.
    AwaitingBoundary,
    /// Accumulating header lines of the current part.
    ReadingHeaders,
    /// Waiting for `Content-Length` body bytes of the current part.
    ReadingBody,
}

#[derive(Debug)]
enum Stage {
    AwaitingBoundary,
    ReadingHeaders(HeaderSet),
    ReadingBody {
        headers: HeaderSet,
        content_length: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Suspend,
}

/// Synchronous part framing over a [`ChunkBuffer`].
///
/// [`PartStateMachine::drain`] resolves as many transitions as the buffered bytes allow
/// and returns once it needs more input. It never performs I/O.
#[derive(Debug)]
pub struct PartStateMachine {
    boundary: Boundary,
    limits: Limits,
    stage: Stage,
    ended: bool,
    emitted: usize,
}

impl PartStateMachine {
    /// Creates a machine waiting for the first delimiter of `boundary`.
    pub fn new(boundary: Boundary, limits: Limits) -> Self {
        Self {
            boundary,
            limits,
            stage: Stage::AwaitingBoundary,
            ended: false,
            emitted: 0,
        }
    }

    /// Returns the current parser state.
    pub fn state(&self) -> ParserState {
        match self.stage {
            Stage::AwaitingBoundary => ParserState::AwaitingBoundary,
            Stage::ReadingHeaders(_) => ParserState::ReadingHeaders,
            Stage::ReadingBody { .. } => ParserState::ReadingBody,
        }
    }

    /// Returns `true` once the end delimiter has been consumed.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Returns the number of parts completed so far.
    pub fn parts_emitted(&self) -> usize {
        self.emitted
    }

    /// Returns the boundary this machine matches.
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Consumes every resolvable byte of `buffer`, pushing completed parts onto `out`.
    ///
    /// Parts pushed before an error are complete and valid.
    pub fn drain(
        &mut self,
        buffer: &mut ChunkBuffer,
        out: &mut VecDeque<Part>,
    ) -> Result<(), MultipartError> {
        loop {
            let step = match std::mem::replace(&mut self.stage, Stage::AwaitingBoundary) {
                Stage::AwaitingBoundary => self.await_boundary(buffer)?,
                Stage::ReadingHeaders(headers) => self.read_header_line(buffer, headers)?,
                Stage::ReadingBody {
                    headers,
                    content_length,
                } => self.read_body(buffer, headers, content_length, out),
            };

            if step == Step::Suspend {
                return Ok(());
            }
        }
    }

    /// Checks that the source may end with `buffer` left over.
    ///
    /// Succeeds only between parts with nothing but CR/LF padding pending.
    pub fn finish(&self, buffer: &ChunkBuffer) -> Result<(), ParseError> {
        let clean = matches!(self.stage, Stage::AwaitingBoundary)
            && buffer.pending().iter().all(|&byte| is_padding(byte));

        if clean {
            Ok(())
        } else {
            Err(ParseError::TruncatedStream)
        }
    }

    fn await_boundary(&mut self, buffer: &mut ChunkBuffer) -> Result<Step, MultipartError> {
        if self.ended {
            let padding = buffer
                .pending()
                .iter()
                .take_while(|&&byte| is_padding(byte))
                .count();
            buffer.advance(padding);
            if !buffer.is_empty() {
                return Err(ParseError::TruncatedStream.into());
            }
            return Ok(Step::Suspend);
        }

        while buffer.pending().starts_with(CRLF) {
            buffer.advance(CRLF.len());
        }

        let pending = buffer.pending();
        if pending.is_empty() || pending == b"\r" {
            return Ok(Step::Suspend);
        }

        let part = self.boundary.part_delimiter();
        if pending.starts_with(part) {
            buffer.advance(part.len());
            self.stage = Stage::ReadingHeaders(HeaderSet::new());

            #[cfg(feature = "tracing")]
            tracing::trace!(part = self.emitted, "multipart: part delimiter matched");

            return Ok(Step::Continue);
        }

        let end = self.boundary.end_delimiter();
        if pending.starts_with(end) {
            buffer.advance(end.len());
            self.ended = true;

            #[cfg(feature = "tracing")]
            tracing::debug!(parts = self.emitted, "multipart: end delimiter matched");

            return Ok(Step::Continue);
        }

        if part.starts_with(pending) || end.starts_with(pending) {
            return Ok(Step::Suspend);
        }

        Err(ParseError::MalformedBoundary.into())
    }

    fn read_header_line(
        &mut self,
        buffer: &mut ChunkBuffer,
        mut headers: HeaderSet,
    ) -> Result<Step, MultipartError> {
        let pending = buffer.pending();

        let cr = match memchr::memchr(b'\r', pending) {
            Some(cr) if cr + 1 < pending.len() => cr,
            partial => {
                self.check_line_len(partial.unwrap_or(pending.len()))?;
                self.stage = Stage::ReadingHeaders(headers);
                return Ok(Step::Suspend);
            }
        };

        if pending[cr + 1] != b'\n' {
            return Err(ParseError::MalformedHeaderLine {
                reason: "CR without LF",
            }
            .into());
        }
        self.check_line_len(cr)?;

        if cr == 0 {
            buffer.advance(CRLF.len());
            let content_length = parse_content_length(&headers)?;
            if let Some(max) = self.limits.max_content_length {
                if content_length > max {
                    return Err(MultipartError::ContentLengthTooLarge {
                        length: content_length,
                        max,
                    });
                }
            }

            #[cfg(feature = "tracing")]
            tracing::trace!(
                part = self.emitted,
                headers = headers.len(),
                content_length,
                "multipart: headers complete"
            );

            self.stage = Stage::ReadingBody {
                headers,
                content_length,
            };
            return Ok(Step::Continue);
        }

        if let Some(max) = self.limits.max_headers {
            if headers.len() >= max {
                return Err(MultipartError::TooManyHeaders { max });
            }
        }

        {
            let line = String::from_utf8_lossy(&pending[..cr]);
            let (name, value) = parse_header_line(&line)?;
            headers.append(name, value);
        }

        buffer.advance(cr + CRLF.len());
        self.stage = Stage::ReadingHeaders(headers);
        Ok(Step::Continue)
    }

    fn read_body(
        &mut self,
        buffer: &mut ChunkBuffer,
        headers: HeaderSet,
        content_length: u64,
        out: &mut VecDeque<Part>,
    ) -> Step {
        if (buffer.remaining() as u64) < content_length {
            self.stage = Stage::ReadingBody {
                headers,
                content_length,
            };
            return Step::Suspend;
        }

        let body = buffer.take(content_length as usize);
        self.emitted += 1;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            part = self.emitted - 1,
            content_length,
            "multipart: part complete"
        );

        out.push_back(Part::new(headers, body));
        Step::Continue
    }

    fn check_line_len(&self, len: usize) -> Result<(), MultipartError> {
        match self.limits.max_header_line_len {
            Some(max) if len > max => Err(MultipartError::HeaderLineTooLong { max }),
            _ => Ok(()),
        }
    }
}

fn is_padding(byte: u8) -> bool {
    byte == b'\r' || byte == b'\n'
}
