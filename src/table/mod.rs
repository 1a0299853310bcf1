mod builtin;
mod core;


pub use self::builtin::{is_decoded, table};
pub use self::core::{TABLE_SIZE, Table, TableError};
