//! Fixed-capacity byte buffer

use std::fmt;

/// Maximum number of bytes a [`FixedBuffer`] can hold.
pub const CAPACITY: usize = 64;

/// 64 bytes of inline storage and a count of the bytes in use.
///
/// Bytes past `len` are stale leftovers from earlier writes and are never
/// handed out. Every [`set`](FixedBuffer::set) replaces the whole logical
/// contents; there is no append.
#[derive(Clone)]
pub struct FixedBuffer {
    data: [u8; CAPACITY],
    len: u8,
}

impl FixedBuffer {
    /// Empty buffer (`len == 0`).
    pub const fn new() -> Self {
        Self {
            data: [0u8; CAPACITY],
            len: 0,
        }
    }

    /// Copy up to [`CAPACITY`] bytes of `src` in, replacing the previous
    /// contents. Anything past the capacity is dropped silently.
    pub fn set(&mut self, src: &[u8]) {
        let n = src.len().min(CAPACITY);
        self.data[..n].copy_from_slice(&src[..n]);
        self.len = n as u8;

        if src.len() > CAPACITY {
            tracing::trace!(input = src.len(), kept = n, "truncated oversized input");
        } else {
            tracing::trace!(len = n, "buffer set");
        }
    }

    /// Fresh copy of the bytes in use.
    pub fn get(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len()]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn capacity(&self) -> usize {
        CAPACITY
    }
}

impl Default for FixedBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// Only the live bytes; stale storage stays hidden.
impl fmt::Debug for FixedBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedBuffer")
            .field("len", &self.len)
            .field("data", &self.as_bytes())
            .finish()
    }
}
