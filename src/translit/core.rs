use crate::pool::{BufferPool, POOLED_CAPACITY};
use crate::table::{Table, table};

static POOL: BufferPool = BufferPool::new(POOLED_CAPACITY);

/// Replace every non-ASCII character of `input` with its closest ASCII
/// approximation.
///
/// Characters without a table entry, and everything outside the Basic
/// Multilingual Plane, are dropped. The output is always pure ASCII.
///
/// ```
/// assert_eq!(unidecode_rs::unidecode("café"), "cafe");
/// assert_eq!(unidecode_rs::unidecode("Привет"), "Privet");
/// ```
pub fn unidecode(input: &str) -> String {
    let table = table();
    let mut scratch = POOL.acquire(input.len());
    table.transliterate_into(input, &mut scratch);
    scratch.finish()
}

/// Like [`unidecode`], appending to a caller-owned buffer instead of
/// allocating a new string.
pub fn unidecode_into(input: &str, out: &mut String) {
    table().transliterate_into(input, out);
}

impl Table {
    /// Transliterate `input` with this table, appending to `out`.
    ///
    /// Runs of ASCII are copied in one `push_str`; each other character
    /// contributes its table entry, or nothing.
    pub fn transliterate_into(&self, input: &str, out: &mut String) {
        let mut rest = input;
        while !rest.is_empty() {
            let ascii = rest
                .bytes()
                .position(|b| !b.is_ascii())
                .unwrap_or(rest.len());
            out.push_str(&rest[..ascii]);
            rest = &rest[ascii..];

            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                // Code points past the BMP have no slot and get() returns None.
                if let Some(replacement) = self.get(c as u32) {
                    out.push_str(replacement);
                }
                rest = chars.as_str();
            }
        }
    }
}
