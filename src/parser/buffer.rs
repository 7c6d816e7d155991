use bytes::{Bytes, BytesMut};

/// Accumulated transport bytes plus a consumption cursor.
///
/// Bytes before the cursor are consumed; bytes at or after it are pending. Slices handed
/// out by [`ChunkBuffer::take`] and [`ChunkBuffer::slice_from`] share the underlying
/// allocation but never observe later appends.
#[derive(Debug, Clone, Default)]
pub struct ChunkBuffer {
    buf: Bytes,
    cursor: usize,
}

impl ChunkBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transport chunk.
    ///
    /// When nothing is pending the chunk replaces the buffer without copying. Otherwise
    /// the pending tail and the chunk are concatenated into a fresh buffer.
    pub fn append(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }

        if self.remaining() == 0 {
            self.buf = chunk;
            self.cursor = 0;
            return;
        }

        let pending = self.pending();
        let mut joined = BytesMut::with_capacity(pending.len() + chunk.len());
        joined.extend_from_slice(pending);
        joined.extend_from_slice(&chunk);
        self.buf = joined.freeze();
        self.cursor = 0;
    }

    /// Returns the number of unconsumed bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.cursor
    }

    /// Returns `true` when no bytes are pending.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the pending bytes.
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.cursor..]
    }

    /// Returns `len` pending bytes starting `offset` bytes past the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the pending bytes.
    pub fn slice_from(&self, offset: usize, len: usize) -> Bytes {
        let start = self.cursor + offset;
        self.buf.slice(start..start + len)
    }

    /// Marks `n` pending bytes as consumed.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`ChunkBuffer::remaining`].
    pub fn advance(&mut self, n: usize) {
        assert!(
            n <= self.remaining(),
            "cannot advance {n} bytes past {} pending",
            self.remaining()
        );
        self.cursor += n;
    }

    /// Slices off the next `n` pending bytes and consumes them.
    pub fn take(&mut self, n: usize) -> Bytes {
        let bytes = self.slice_from(0, n);
        self.cursor += n;
        bytes
    }
}
