//! Column name lookup built from a header line

use crate::dialect::Dialect;
use crate::reader::Reader;
use crate::row::Row;
use std::collections::HashMap;

/// Immutable name to position map.
///
/// Built once and shared (behind an `Arc`) by every row of the same schema.
/// When a name repeats, its last position wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Build from a literal header line using the default dialect
    pub fn parse(header: &str) -> Self {
        Self::parse_with(header.as_bytes(), Dialect::default())
    }

    /// Build from the first line of `header`, tokenized like any data row
    pub fn parse_with(header: &[u8], dialect: Dialect) -> Self {
        let mut reader = Reader::with_dialect(header, dialect);
        let mut row = Row::new();
        reader.next(&mut row);
        Self::from_row(&row)
    }

    pub fn from_row(row: &Row<'_>) -> Self {
        let positions = row
            .iter()
            .enumerate()
            .map(|(i, field)| (field.as_text().into_owned(), i))
            .collect();
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Names ordered by position
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self
            .positions
            .iter()
            .map(|(name, &i)| (name.as_str(), i))
            .collect();
        names.sort_unstable_by_key(|&(_, i)| i);
        names.into_iter().map(|(name, _)| name).collect()
    }
}
