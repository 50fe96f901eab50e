//! Format parameters shared by [`Reader`](crate::Reader) and [`Writer`](crate::Writer)

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

/// Default line terminator
pub const DEFAULT_TERMINATOR: u8 = b'\n';

/// The delimiter and terminator pair. Readers and writers must agree on it
/// for output to scan back into the same rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dialect {
    pub delimiter: u8,
    pub terminator: u8,
}

impl Dialect {
    pub const fn new(delimiter: u8, terminator: u8) -> Self {
        Self {
            delimiter,
            terminator,
        }
    }

    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub const fn with_terminator(mut self, terminator: u8) -> Self {
        self.terminator = terminator;
        self
    }

    /// Bytes stripped from both ends of every field
    #[inline(always)]
    pub(crate) const fn is_trim(byte: u8) -> bool {
        matches!(byte, b' ' | b'\r')
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, DEFAULT_TERMINATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        let d = Dialect::default();
        assert_eq!(d.delimiter, b',');
        assert_eq!(d.terminator, b'\n');
    }

    #[test]
    fn test_builder() {
        let d = Dialect::default().with_delimiter(b'\t').with_terminator(b';');
        assert_eq!(d, Dialect::new(b'\t', b';'));
    }

    #[test]
    fn test_trim_bytes() {
        assert!(Dialect::is_trim(b' '));
        assert!(Dialect::is_trim(b'\r'));
        assert!(!Dialect::is_trim(b'\t'));
        assert!(!Dialect::is_trim(b'a'));
    }
}
