use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

/// Inputs up to this many bytes borrow a pooled buffer; larger ones get a
/// fresh allocation sized to the input.
pub const POOLED_CAPACITY: usize = 64;

/// Free list of reusable output buffers with a size-threshold gate.
///
/// The pool never bounds how many idle buffers it keeps: the count tops out
/// at the peak number of concurrent small-input calls.
pub struct BufferPool {
    capacity: usize,
    idle: Mutex<Vec<String>>,
}

impl BufferPool {
    pub const fn new(capacity: usize) -> BufferPool {
        BufferPool {
            capacity,
            idle: Mutex::new(Vec::new()),
        }
    }

    /// Size threshold and minimum capacity of pooled buffers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check out an empty buffer for an output expected to be about
    /// `estimated_size` bytes.
    pub fn acquire(&self, estimated_size: usize) -> Scratch<'_> {
        if estimated_size > self.capacity {
            return Scratch {
                buf: String::with_capacity(estimated_size),
                pool: None,
            };
        }
        let buf = self
            .lock()
            .pop()
            .unwrap_or_else(|| String::with_capacity(self.capacity));
        Scratch {
            buf,
            pool: Some(self),
        }
    }

    /// Number of buffers waiting to be reused.
    pub fn idle(&self) -> usize {
        self.lock().len()
    }

    fn release(&self, mut buf: String) {
        buf.clear();
        self.lock().push(buf);
    }

    // A panic while holding the lock cannot leave the Vec half-updated.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("capacity", &self.capacity)
            .field("idle", &self.idle())
            .finish()
    }
}

/// A checked-out buffer. Pooled buffers go back to their pool when the
/// guard drops; oversized ones are freed or handed to the caller.
pub struct Scratch<'a> {
    buf: String,
    pool: Option<&'a BufferPool>,
}

impl Scratch<'_> {
    /// Whether this buffer came from (and returns to) the pool.
    pub fn is_pooled(&self) -> bool {
        self.pool.is_some()
    }

    /// Produce the final output string.
    ///
    /// A pooled buffer is copied into an exact-size string and recycled; an
    /// oversized buffer is moved out without copying.
    pub fn finish(mut self) -> String {
        match self.pool {
            Some(_) => String::from(self.buf.as_str()),
            None => std::mem::take(&mut self.buf),
        }
    }
}

impl Deref for Scratch<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        &self.buf
    }
}

impl DerefMut for Scratch<'_> {
    fn deref_mut(&mut self) -> &mut String {
        &mut self.buf
    }
}

impl Drop for Scratch<'_> {
    fn drop(&mut self) {
        if let Some(pool) = self.pool {
            pool.release(std::mem::take(&mut self.buf));
        }
    }
}
