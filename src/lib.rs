//! # slimcsv
//!
//! A minimal reader and writer for delimited text.
//!
//! The reader scans a byte buffer line by line into a reusable [`Row`] of
//! zero-copy [`Field`] views. Fields are trimmed of spaces and carriage
//! returns, can be looked up by position or by name through a shared
//! [`HeaderIndex`], and parse into numbers only when asked. The [`Writer`]
//! emits the same format. There is no quoting or escaping.
//!
//! ```
//! use slimcsv::{Reader, Row};
//!
//! let mut reader = Reader::from_text("id,qty\n1, 20\n");
//! let header = std::sync::Arc::new(reader.read_header().unwrap());
//! let mut row = Row::with_header(header);
//! while reader.next(&mut row) {
//!     assert_eq!(row.by_name("qty").unwrap().try_as_int().unwrap(), 20);
//! }
//! ```

pub mod dialect;
pub mod error;
pub mod header;
pub mod io;
pub mod reader;
pub mod row;
pub mod writer;

pub use dialect::{Dialect, DEFAULT_DELIMITER, DEFAULT_TERMINATOR};
pub use error::{CsvError, Result};
pub use header::HeaderIndex;
pub use io::{Buffer, OpenMode, OpenOptions, Strategy};
pub use reader::{Reader, Rows};
pub use row::{Field, Row};
pub use writer::{Token, Writer};
