#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Incremental parser for length-delimited multipart streams.
//!
//! Streams such as `multipart/x-mixed-replace` camera feeds carry an open-ended
//! sequence of parts, each framed by a boundary line, a header block and a body of
//! exactly `Content-Length` bytes. [`Multipart`] pulls transport chunks from a
//! [`ChunkSource`] and yields every [`Part`] as soon as its last byte arrives, whatever
//! the chunk sizes are.

/// Fluent builder API.
pub mod builder;
/// Parser configuration.
pub mod config;
/// Wire-format writer.
pub mod encode;
/// Error types exposed by this crate.
pub mod error;
/// Per-part resource limits.
pub mod limits;
/// High-level pull parser.
pub mod multipart;
/// Parsed multipart part API.
pub mod part;
/// Low-level parser components.
pub mod parser;
/// Chunk source trait and adapters.
pub mod source;
/// Part stream adapter with cancellation.
pub mod stream;

#[cfg(feature = "hyper")]
pub mod hyper;

pub use builder::MultipartBuilder;
pub use config::{BoundaryMode, ParserConfig};
pub use encode::PartEncoder;
pub use error::{BoxError, ConfigError, MultipartError, ParseError};
pub use limits::Limits;
pub use multipart::Multipart;
pub use parser::{extract_boundary, extract_boundary_with, HeaderSet, ParserState};
pub use part::Part;
pub use source::{CancelReason, ChunkSource, ReaderSource, StreamSource};
pub use stream::PartStream;

/// Re-export of the `bytes` crate used for chunk and body types.
pub use bytes;
