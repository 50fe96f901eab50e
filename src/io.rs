//! Backing buffers: loading or mapping files for the reader

use crate::dialect::Dialect;
use crate::error::{CsvError, Result};
use crate::reader::Reader;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

/// How a file's bytes are brought into memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Read-only memory map, no copy
    #[default]
    Mapped,
    /// Whole file read into an owned buffer
    Owned,
}

/// What to do when a file cannot be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Fail with [`CsvError::Open`]
    #[default]
    Strict,
    /// Log the failure and fall back to an empty buffer
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenOptions {
    pub strategy: Strategy,
    pub mode: OpenMode,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Buffer> {
        Buffer::open(path, *self)
    }
}

/// Bytes a [`Reader`] scans.
///
/// Readers and their fields borrow the buffer, so it cannot be dropped (and a
/// mapping cannot be unmapped) while any of them are still in use.
#[derive(Debug)]
pub enum Buffer {
    Owned(Vec<u8>),
    Mapped(Mmap),
    Empty,
}

impl Buffer {
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Buffer::Owned(bytes)
    }

    /// Load a whole file into memory
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let open_err = |source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(open_err)?;
        let length = file.metadata().map_err(open_err)?.len() as usize;

        let mut bytes = Vec::with_capacity(length);
        file.read_to_end(&mut bytes).map_err(open_err)?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded file");
        Ok(Buffer::Owned(bytes))
    }

    /// Map a file read-only
    pub fn map_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let open_err = |source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(open_err)?;
        let length = file.metadata().map_err(open_err)?.len();
        if length == 0 {
            // zero-length mappings are rejected by mmap(2)
            tracing::debug!(path = %path.display(), "empty file, nothing to map");
            return Ok(Buffer::Empty);
        }

        // SAFETY: the mapping is read-only and private; callers must not
        // truncate the file while the buffer is alive.
        let map = unsafe { Mmap::map(&file) }.map_err(open_err)?;

        tracing::debug!(path = %path.display(), bytes = map.len(), "mapped file");
        Ok(Buffer::Mapped(map))
    }

    pub fn open<P: AsRef<Path>>(path: P, options: OpenOptions) -> Result<Self> {
        let path = path.as_ref();
        let result = match options.strategy {
            Strategy::Mapped => Self::map_file(path),
            Strategy::Owned => Self::read_file(path),
        };

        match (result, options.mode) {
            (Err(e), OpenMode::Lenient) => {
                tracing::warn!(path = %path.display(), error = %e, "open failed, using empty buffer");
                Ok(Buffer::Empty)
            }
            (result, _) => result,
        }
    }

    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Buffer::Owned(bytes) => bytes.as_slice(),
            Buffer::Mapped(map) => &map[..],
            Buffer::Empty => &[],
        }
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Buffer::Mapped(_))
    }

    pub fn reader(&self) -> Reader<'_> {
        Reader::new(self.as_bytes())
    }

    pub fn reader_with(&self, dialect: Dialect) -> Reader<'_> {
        Reader::with_dialect(self.as_bytes(), dialect)
    }
}

impl Deref for Buffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Buffer::Owned(bytes)
    }
}

impl From<String> for Buffer {
    fn from(text: String) -> Self {
        Buffer::Owned(text.into_bytes())
    }
}
