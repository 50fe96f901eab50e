//! Streaming writer, the mirror image of [`Reader`](crate::Reader)
//!
//! Output is a sequence of [`Token`]s: fields, deliberately empty columns and
//! line ends. Nothing is quoted or escaped, so field text must not contain the
//! delimiter or the terminator.

use crate::dialect::Dialect;
use crate::error::Result;
use crate::row::Row;
use std::fmt;
use std::io::Write;
use std::mem::ManuallyDrop;

/// One unit of writer input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'t> {
    Field(&'t str),
    /// An empty column
    Skip,
    /// Terminate the line and flush the sink
    EndOfLine,
}

/// Writes delimiter-joined lines to any byte sink.
///
/// The sink is flushed after every line, and once more when the writer drops.
pub struct Writer<W: Write> {
    sink: W,
    dialect: Dialect,
    first: bool,
}

impl<W: Write> Writer<W> {
    pub fn new(sink: W) -> Self {
        Self::with_dialect(sink, Dialect::default())
    }

    pub fn with_dialect(sink: W, dialect: Dialect) -> Self {
        Self {
            sink,
            dialect,
            first: true,
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Emit one token; returns `self` so calls can be chained
    pub fn submit(&mut self, token: Token<'_>) -> Result<&mut Self> {
        match token {
            Token::Field(text) => self.write_bytes(text.as_bytes()),
            Token::Skip => self.skip(),
            Token::EndOfLine => self.end_line(),
        }
    }

    /// Emit any displayable value as the next field
    pub fn write_field<T: fmt::Display>(&mut self, value: T) -> Result<&mut Self> {
        self.separate()?;
        write!(self.sink, "{}", value)?;
        Ok(self)
    }

    /// Emit raw bytes as the next field
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.separate()?;
        self.sink.write_all(bytes)?;
        Ok(self)
    }

    pub fn skip(&mut self) -> Result<&mut Self> {
        self.separate()?;
        Ok(self)
    }

    pub fn end_line(&mut self) -> Result<&mut Self> {
        self.sink.write_all(&[self.dialect.terminator])?;
        self.first = true;
        self.sink.flush()?;
        Ok(self)
    }

    /// Write every value as a field, then end the line
    pub fn write_row<I>(&mut self, fields: I) -> Result<&mut Self>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for field in fields {
            self.write_field(field)?;
        }
        self.end_line()
    }

    /// Copy a scanned row byte for byte, then end the line
    pub fn write_record(&mut self, row: &Row<'_>) -> Result<&mut Self> {
        for field in row.iter() {
            self.write_bytes(field.as_bytes())?;
        }
        self.end_line()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Flush and hand back the sink
    pub fn into_inner(self) -> Result<W> {
        let mut this = ManuallyDrop::new(self);
        this.sink.flush()?;
        // SAFETY: `this` is never touched again and its destructor never runs,
        // so the sink is moved out exactly once.
        Ok(unsafe { std::ptr::read(&this.sink) })
    }

    #[inline(always)]
    fn separate(&mut self) -> Result<()> {
        if !self.first {
            self.sink.write_all(&[self.dialect.delimiter])?;
        }
        self.first = false;
        Ok(())
    }
}

impl<W: Write> Drop for Writer<W> {
    fn drop(&mut self) {
        let _ = self.sink.flush();
    }
}

impl<W: Write> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("dialect", &self.dialect)
            .field("first", &self.first)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Reader;
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    /// Sink that records how often it was flushed
    struct CountingSink {
        bytes: Vec<u8>,
        flushes: Rc<Cell<usize>>,
    }

    impl Write for CountingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.flushes.set(self.flushes.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_tokens() {
        let mut w = Writer::new(Vec::new());
        w.submit(Token::Field("a"))
            .unwrap()
            .submit(Token::Field("b"))
            .unwrap()
            .submit(Token::Skip)
            .unwrap()
            .submit(Token::EndOfLine)
            .unwrap();
        assert_eq!(w.into_inner().unwrap(), b"a,b,\n");
    }

    #[test]
    fn test_round_trip() {
        let mut w = Writer::new(Vec::new());
        w.write_field("a").unwrap();
        w.write_field("b").unwrap();
        w.skip().unwrap();
        w.end_line().unwrap();
        let out = w.into_inner().unwrap();
        assert_eq!(out, b"a,b,\n");

        let mut reader = Reader::new(&out);
        let mut row = Row::new();
        assert!(reader.next(&mut row));
        assert_eq!(row.to_strings(), vec!["a", "b", ""]);
        assert!(!reader.next(&mut row));
    }

    #[test]
    fn test_leading_skips() {
        let mut w = Writer::new(Vec::new());
        w.skip().unwrap().skip().unwrap().write_field("x").unwrap();
        w.end_line().unwrap();
        w.write_field("abc").unwrap().write_field("def").unwrap();
        w.skip().unwrap().skip().unwrap().end_line().unwrap();
        assert_eq!(w.into_inner().unwrap(), b",,x\nabc,def,,\n");
    }

    #[test]
    fn test_numbers() {
        let mut w = Writer::new(Vec::new());
        w.write_row([1.5, -2.0, 10.25]).unwrap();
        w.write_field(42u64).unwrap().end_line().unwrap();
        assert_eq!(w.into_inner().unwrap(), b"1.5,-2,10.25\n42\n");
    }

    #[test]
    fn test_flush_per_line() {
        let flushes = Rc::new(Cell::new(0));
        let sink = CountingSink {
            bytes: Vec::new(),
            flushes: Rc::clone(&flushes),
        };
        let mut w = Writer::new(sink);
        w.write_field("a").unwrap();
        assert_eq!(flushes.get(), 0);
        w.end_line().unwrap();
        assert_eq!(flushes.get(), 1);
        w.write_row(["b", "c"]).unwrap();
        assert_eq!(flushes.get(), 2);
        assert_eq!(w.get_ref().bytes, b"a\nb,c\n");

        w.write_field("partial").unwrap();
        drop(w);
        assert_eq!(flushes.get(), 3);
    }

    #[test]
    fn test_custom_dialect() {
        let dialect = Dialect::new(b'\t', b';');
        let mut w = Writer::with_dialect(Vec::new(), dialect);
        w.write_row(["x", "y"]).unwrap();
        w.write_row(["z"]).unwrap();
        let out = w.into_inner().unwrap();
        assert_eq!(out, b"x\ty;z;");

        let mut reader = Reader::with_dialect(&out, dialect);
        let rows: Vec<Vec<String>> = reader.rows().map(|r| r.to_strings()).collect();
        assert_eq!(rows, vec![vec!["x", "y"], vec!["z"]]);
    }

    #[test]
    fn test_write_record_copies_row() {
        let mut reader = Reader::from_text(" id , name \n7,bob");
        let mut w = Writer::new(Vec::new());
        let mut row = Row::new();
        while reader.next(&mut row) {
            w.write_record(&row).unwrap();
        }
        assert_eq!(w.into_inner().unwrap(), b"id,name\n7,bob\n");
    }
}
