mod core;


pub use self::core::{unidecode, unidecode_into};
