#![allow(missing_docs)]

use bytes::Bytes;
use multipart_feed::parser::ChunkBuffer;

#[test]
fn append_to_consumed_buffer_reuses_chunk() {
    let mut buffer = ChunkBuffer::new();
    assert!(buffer.is_empty());

    let chunk = Bytes::from_static(b"abcdef");
    let ptr = chunk.as_ptr();
    buffer.append(chunk);

    assert_eq!(buffer.remaining(), 6);
    assert_eq!(buffer.pending().as_ptr(), ptr);

    buffer.advance(6);
    let next = Bytes::from(b"ghi".to_vec());
    let next_ptr = next.as_ptr();
    buffer.append(next);
    assert_eq!(buffer.pending(), b"ghi");
    assert_eq!(buffer.pending().as_ptr(), next_ptr);
}

#[test]
fn append_with_pending_tail_concatenates() {
    let mut buffer = ChunkBuffer::new();
    buffer.append(Bytes::from_static(b"--bou"));
    buffer.advance(2);
    buffer.append(Bytes::from_static(b"ndary"));

    assert_eq!(buffer.pending(), b"boundary");
    assert_eq!(buffer.remaining(), 8);
}

#[test]
fn empty_chunks_are_ignored() {
    let mut buffer = ChunkBuffer::new();
    buffer.append(Bytes::from_static(b"ab"));
    buffer.append(Bytes::new());
    assert_eq!(buffer.pending(), b"ab");
}

#[test]
fn taken_bytes_survive_later_appends() {
    let mut buffer = ChunkBuffer::new();
    buffer.append(Bytes::from_static(b"hello world"));

    let hello = buffer.take(5);
    assert_eq!(buffer.slice_from(1, 5), Bytes::from_static(b"world"));
    buffer.append(Bytes::from_static(b"!!"));
    buffer.advance(1);

    assert_eq!(hello, Bytes::from_static(b"hello"));
    assert_eq!(buffer.pending(), b"world!!");
}

#[test]
#[should_panic(expected = "cannot advance")]
fn advancing_past_pending_panics() {
    let mut buffer = ChunkBuffer::new();
    buffer.append(Bytes::from_static(b"ab"));
    buffer.advance(3);
}
