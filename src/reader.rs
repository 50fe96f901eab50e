//! Line tokenizer
//!
//! The reader walks the buffer one byte at a time. Each byte is either the
//! line terminator, the delimiter, a trim byte (space or CR) or content. A
//! field's span runs from its first content byte to its last one, so leading
//! and trailing trim bytes fall outside of it while anything between two
//! content bytes stays inside. There is no quoting: a field can never contain
//! the delimiter or the terminator.

use crate::dialect::Dialect;
use crate::header::HeaderIndex;
use crate::row::{Field, Row};
use std::sync::Arc;

/// Incremental scanner over a borrowed byte buffer.
///
/// The cursor always rests on the first byte of the next unread line, or at
/// the end of the buffer once every line has been produced.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    cursor: usize,
    dialect: Dialect,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_dialect(bytes, Dialect::default())
    }

    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }

    pub fn with_dialect(bytes: &'a [u8], dialect: Dialect) -> Self {
        Self {
            bytes,
            cursor: 0,
            dialect,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Byte offset of the next unread line
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet scanned
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.cursor.min(self.bytes.len())..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    /// Scan the next line into `row`.
    ///
    /// Returns `false` once the buffer is exhausted, in which case `row` keeps
    /// whatever it held before. The end of the buffer terminates the last line
    /// when it has no terminator of its own; a buffer ending on a terminator
    /// produces no trailing empty row.
    pub fn next(&mut self, row: &mut Row<'a>) -> bool {
        let bytes = self.bytes;
        if self.cursor >= bytes.len() {
            return false;
        }
        row.clear();

        let Dialect {
            delimiter,
            terminator,
        } = self.dialect;

        // `head..tail` is the content of the open field; empty until the
        // first content byte is seen.
        let mut head = self.cursor;
        let mut tail = self.cursor;
        let mut seen_content = false;

        for (pos, &byte) in bytes.iter().enumerate().skip(self.cursor) {
            if byte == terminator {
                row.push(Field::new(&bytes[head..tail]));
                self.cursor = pos + 1;
                return true;
            } else if byte == delimiter {
                row.push(Field::new(&bytes[head..tail]));
                head = pos + 1;
                tail = pos + 1;
                seen_content = false;
            } else if !Dialect::is_trim(byte) {
                if !seen_content {
                    head = pos;
                    seen_content = true;
                }
                tail = pos + 1;
            }
        }

        row.push(Field::new(&bytes[head..tail]));
        self.cursor = bytes.len();
        true
    }

    /// Step over the next line without tokenizing it.
    ///
    /// Returns `false` if there was nothing left to skip.
    pub fn skip(&mut self) -> bool {
        if self.is_exhausted() {
            return false;
        }
        let terminator = self.dialect.terminator;
        self.cursor = match self.remaining().iter().position(|&b| b == terminator) {
            Some(offset) => self.cursor + offset + 1,
            None => self.bytes.len(),
        };
        true
    }

    /// Consume the next line as a header
    pub fn read_header(&mut self) -> Option<HeaderIndex> {
        let mut row = Row::new();
        if self.next(&mut row) {
            Some(HeaderIndex::from_row(&row))
        } else {
            None
        }
    }

    /// Iterate over the remaining lines, allocating a fresh [`Row`] for each.
    ///
    /// Unlike [`next`](Self::next), the yielded rows may be kept around:
    /// their fields borrow the buffer rather than the reader.
    pub fn rows(&mut self) -> Rows<'_, 'a> {
        Rows {
            reader: self,
            header: None,
        }
    }
}

/// Allocating row iterator returned by [`Reader::rows`]
#[derive(Debug)]
pub struct Rows<'r, 'a> {
    reader: &'r mut Reader<'a>,
    header: Option<Arc<HeaderIndex>>,
}

impl<'r, 'a> Rows<'r, 'a> {
    /// Attach `header` to every yielded row
    pub fn with_header(mut self, header: Arc<HeaderIndex>) -> Self {
        self.header = Some(header);
        self
    }
}

impl<'a> Iterator for Rows<'_, 'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Row<'a>> {
        let mut row = match &self.header {
            Some(header) => Row::with_header(Arc::clone(header)),
            None => Row::new(),
        };
        self.reader.next(&mut row).then_some(row)
    }
}
