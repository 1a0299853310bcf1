use std::sync::OnceLock;

use super::core::Table;

/// zlib-compressed table shipped with the crate.
static TABLE_DATA: &[u8] = include_bytes!("../../data/table.zlib");

static TABLE: OnceLock<Table> = OnceLock::new();

/// The process-wide table, decoded on first use.
///
/// Concurrent first callers block until one of them has finished decoding;
/// every caller then sees the complete table. A corrupt built-in asset is a
/// packaging defect and panics the initializing call.
pub fn table() -> &'static Table {
    TABLE.get_or_init(|| match Table::decode(TABLE_DATA) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = %e, "built-in transliteration table is corrupt");
            panic!("corrupt built-in transliteration table: {e}");
        }
    })
}

/// Whether the built-in table has been decoded yet.
pub fn is_decoded() -> bool {
    TABLE.get().is_some()
}
