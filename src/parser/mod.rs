/// Boundary extraction and delimiter bytes.
pub mod boundary;
/// Chunk accumulation with a consumption cursor.
pub mod buffer;
/// Ordered part headers and header-line parsing.
pub mod headers;
/// Boundary, headers, body state machine.
pub mod machine;

pub use boundary::{extract_boundary, extract_boundary_with, Boundary};
pub use buffer::ChunkBuffer;
pub use headers::{parse_content_length, parse_header_line, HeaderSet};
pub use machine::{ParserState, PartStateMachine};
