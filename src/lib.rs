//! Unicode to ASCII transliteration.
//!
//! Every non-ASCII character is replaced by zero or more ASCII characters
//! taken from a static table covering the Basic Multilingual Plane:
//!
//! ```
//! assert_eq!(unidecode_rs::unidecode("Łódź, 日本語"), "Lodz, Ri Ben Yu ");
//! ```
//!
//! The table ships zlib-compressed inside the crate and is decoded once, on
//! the first call, into a dense lookup array shared by all threads.

pub mod pool;
pub mod table;
pub mod translit;

pub use translit::{unidecode, unidecode_into};
