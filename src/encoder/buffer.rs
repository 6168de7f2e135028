//! Ordered byte-chunk storage backing [`CommandEncoder`](super::CommandEncoder).

/// Append-only list of byte chunks.
///
/// Chunks are never reordered or merged until [`flatten`](Self::flatten).
/// A buffer belongs to exactly one encoder; there is no locking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    chunks: Vec<Vec<u8>>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one chunk after all previously appended chunks.
    pub fn append(&mut self, chunk: impl Into<Vec<u8>>) {
        self.chunks.push(chunk.into());
    }

    /// Concatenation of all chunks in append order.
    pub fn flatten(&self) -> Vec<u8> {
        self.chunks.concat()
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }

    /// Number of chunks appended since the last clear
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total number of bytes across all chunks
    pub fn byte_len(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.byte_len() == 0
    }
}
