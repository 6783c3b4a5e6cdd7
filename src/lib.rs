//! A low-level reader of the PDF file structure.
//!
//! [`reader::Document`] is the entry point: it locates the `%PDF-` header, checks the `%%EOF`
//! marker, follows `startxref` to the classic cross-reference table and parses it. After that,
//! objects can be parsed on demand, either at a byte offset or by object number.
//!
//! ```no_run
//! use pdfstruct::reader::Document;
//!
//! let mut doc = Document::open("file.pdf")?;
//! doc.process()?;
//! println!("PDF {}", doc.version()?);
//! for (objref, res) in doc.objects()? {
//!     match res {
//!         Ok(obj) => println!("{objref}: {obj}"),
//!         Err(err) => println!("{objref}: {err}"),
//!     }
//! }
//! # Ok::<(), pdfstruct::Error>(())
//! ```

pub mod base;
pub mod parser;
pub mod reader;
pub mod codecs;

mod config;
mod utils;

pub use base::*;
pub use base::types::*;
pub use config::Config;
