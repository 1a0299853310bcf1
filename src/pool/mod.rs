mod core;


pub use self::core::{BufferPool, POOLED_CAPACITY, Scratch};
