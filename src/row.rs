//! Field views and reusable rows

use crate::error::{CsvError, Result};
use crate::header::HeaderIndex;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A zero-copy view of one trimmed field.
///
/// The view borrows the backing buffer, not the reader, so it stays valid for
/// as long as the buffer does. Numeric conversions parse the text on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Field<'a> {
    bytes: &'a [u8],
}

impl<'a> Field<'a> {
    #[inline(always)]
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Raw bytes of the field
    #[inline(always)]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Field text. Borrowed when the bytes are valid UTF-8, otherwise a lossy copy.
    pub fn as_text(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parse the whole field as `T`.
    ///
    /// Trailing garbage is rejected: `"12x"` is not `12`.
    pub fn parse<T: FromStr>(&self) -> Result<T> {
        std::str::from_utf8(self.bytes)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .ok_or_else(|| CsvError::InvalidNumber {
                text: self.as_text().into_owned(),
                target: short_type_name::<T>(),
            })
    }

    pub fn try_as_int(&self) -> Result<i64> {
        self.parse()
    }

    pub fn try_as_i32(&self) -> Result<i32> {
        self.parse()
    }

    pub fn try_as_float(&self) -> Result<f64> {
        self.parse()
    }

    pub fn try_as_size(&self) -> Result<usize> {
        self.parse()
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl PartialEq<str> for Field<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for Field<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

fn short_type_name<T>() -> &'static str {
    let name = std::any::type_name::<T>();
    name.rsplit("::").next().unwrap_or(name)
}

/// An ordered list of fields for one scanned line.
///
/// A row is scratch space: [`Reader::next`](crate::Reader::next) clears and
/// refills it, so its contents describe only the most recent line. When the
/// reader is exhausted the row is left untouched.
#[derive(Debug, Clone, Default)]
pub struct Row<'a> {
    fields: Vec<Field<'a>>,
    header: Option<Arc<HeaderIndex>>,
}

impl<'a> Row<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A row that resolves names through `header`
    pub fn with_header(header: Arc<HeaderIndex>) -> Self {
        Self {
            fields: Vec::with_capacity(header.len()),
            header: Some(header),
        }
    }

    pub fn set_header(&mut self, header: Arc<HeaderIndex>) {
        self.header = Some(header);
    }

    pub fn header(&self) -> Option<&Arc<HeaderIndex>> {
        self.header.as_ref()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at zero-based `index`
    pub fn get(&self, index: usize) -> Result<Field<'a>> {
        self.fields
            .get(index)
            .copied()
            .ok_or(CsvError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            })
    }

    /// Field under column `name`.
    ///
    /// Fails with [`CsvError::KeyNotFound`] when the row has no header or the
    /// header lacks `name`, and with [`CsvError::IndexOutOfRange`] when this
    /// line is shorter than the header says.
    pub fn by_name(&self, name: &str) -> Result<Field<'a>> {
        let index = self
            .header
            .as_ref()
            .and_then(|h| h.position(name))
            .ok_or_else(|| CsvError::KeyNotFound(name.to_string()))?;
        self.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = Field<'a>> + '_ {
        self.fields.iter().copied()
    }

    pub fn fields(&self) -> &[Field<'a>] {
        &self.fields
    }

    /// Owned copy of every field, safe to keep after the next scan
    pub fn to_strings(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.as_text().into_owned()).collect()
    }

    #[inline(always)]
    pub(crate) fn clear(&mut self) {
        self.fields.clear();
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, field: Field<'a>) {
        self.fields.push(field);
    }
}
