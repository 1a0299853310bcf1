use std::io;
use std::time::Instant;

use flate2::{Decompress, FlushDecompress, Status};

/// Number of slots in a decoded table: one per code point of the Basic
/// Multilingual Plane. Anything above `TABLE_SIZE - 1` has no entry.
pub const TABLE_SIZE: usize = 0x1_0000;

/// Bytes of record header before the payload: 2-byte LE code point + 1-byte length.
const HEADER_LEN: usize = 3;

/// Errors raised while decoding an encoded transliteration table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("cannot inflate table data: {0}")]
    Decompress(#[source] io::Error),

    #[error("table data truncated at byte {offset} while reading {field}")]
    Truncated { offset: usize, field: &'static str },

    #[error("entry for U+{code_point:04X} is not ASCII")]
    NonAscii { code_point: u16 },

    #[error("table data too large: {bytes} bytes")]
    Oversized { bytes: usize },
}

/// One lookup slot: a span into the arena. `set` distinguishes an explicitly
/// empty record from a code point the table never mentions.
#[derive(Debug, Clone, Copy)]
struct Slot {
    start: u32,
    len: u8,
    set: bool,
}

impl Slot {
    const UNSET: Slot = Slot {
        start: 0,
        len: 0,
        set: false,
    };
}

/// Decoded code point -> ASCII replacement table.
///
/// All replacement strings live back to back in a single arena so the whole
/// table is two allocations. Immutable once built.
pub struct Table {
    slots: Box<[Slot]>,
    arena: String,
    entries: usize,
}

impl Table {
    /// Inflate a zlib-compressed table and parse its records.
    ///
    /// Each record is `[u16 LE code point][u8 N][N ASCII bytes]`. The stream
    /// must end exactly on a record boundary. When a code point appears more
    /// than once the last record wins.
    pub fn decode(compressed: &[u8]) -> Result<Table, TableError> {
        let started = Instant::now();
        let raw = inflate(compressed)?;
        let table = Table::from_records(&raw)?;
        tracing::debug!(
            entries = table.entries,
            compressed = compressed.len(),
            inflated = raw.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "decoded transliteration table"
        );
        Ok(table)
    }

    /// Parse already-inflated record bytes.
    pub fn from_records(raw: &[u8]) -> Result<Table, TableError> {
        check_arena_size(raw.len())?;

        let mut slots = vec![Slot::UNSET; TABLE_SIZE].into_boxed_slice();
        let mut arena = String::with_capacity(raw.len());
        let mut entries = 0;
        let mut pos = 0;

        while pos < raw.len() {
            let header = raw
                .get(pos..pos + 2)
                .ok_or(TableError::Truncated {
                    offset: pos,
                    field: "code point",
                })?;
            let code_point = u16::from_le_bytes([header[0], header[1]]);
            let len = *raw.get(pos + 2).ok_or(TableError::Truncated {
                offset: pos + 2,
                field: "length",
            })?;

            let payload_at = pos + HEADER_LEN;
            let payload = raw
                .get(payload_at..payload_at + len as usize)
                .ok_or(TableError::Truncated {
                    offset: payload_at,
                    field: "payload",
                })?;
            if !payload.is_ascii() {
                return Err(TableError::NonAscii { code_point });
            }

            let slot = &mut slots[code_point as usize];
            if !slot.set {
                entries += 1;
            }
            *slot = Slot {
                start: arena.len() as u32,
                len,
                set: true,
            };
            // ASCII bytes map 1:1 onto chars.
            arena.extend(payload.iter().map(|&b| b as char));

            pos = payload_at + len as usize;
        }

        arena.shrink_to_fit();
        Ok(Table {
            slots,
            arena,
            entries,
        })
    }

    /// Replacement for `code_point`, or `None` when the table has no record
    /// for it (including everything outside the BMP).
    #[inline]
    pub fn get(&self, code_point: u32) -> Option<&str> {
        let slot = self.slots.get(code_point as usize)?;
        if !slot.set {
            return None;
        }
        let start = slot.start as usize;
        Some(&self.arena[start..start + slot.len as usize])
    }

    /// Number of code points with a record.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

/// Slot offsets are `u32`, so the arena cannot exceed `u32::MAX` bytes.
pub(super) fn check_arena_size(bytes: usize) -> Result<(), TableError> {
    if bytes > u32::MAX as usize {
        return Err(TableError::Oversized { bytes });
    }
    Ok(())
}

/// Inflate a complete zlib stream. Unlike a plain `Read` loop this rejects
/// a stream that stops before its trailer.
fn inflate(compressed: &[u8]) -> Result<Vec<u8>, TableError> {
    let mut inflater = Decompress::new(true);
    let mut raw = Vec::with_capacity(compressed.len().saturating_mul(4).max(64));
    loop {
        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();
        let status = inflater
            .decompress_vec(&compressed[consumed..], &mut raw, FlushDecompress::None)
            .map_err(|e| TableError::Decompress(e.into()))?;
        if status == Status::StreamEnd {
            return Ok(raw);
        }
        if raw.len() == raw.capacity() {
            raw.reserve(raw.len());
        } else if inflater.total_out() == produced && inflater.total_in() as usize == consumed {
            return Err(TableError::Decompress(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "zlib stream ends before its trailer",
            )));
        }
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("entries", &self.entries)
            .field("arena_bytes", &self.arena.len())
            .finish()
    }
}
