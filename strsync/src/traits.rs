//! File and in-memory I/O shared by every document type.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Cursor, Write},
    path::Path,
};

use crate::error::Error;

/// Loads and stores a document.
///
/// Implementors supply [`Parser::from_reader`] and [`Parser::to_writer`]; the
/// path and string helpers are built on top of those two. `fix_strings`
/// rewrites a file in place with `read_from` followed by `write_to` on the
/// same path:
///
/// ```rust,no_run
/// use strsync::{Document, Parser, normalize};
///
/// let path = "app/src/main/res/values/strings.xml";
/// let document = Document::read_from(path)?;
/// normalize(&document).write_to(path)?;
/// Ok::<(), strsync::Error>(())
/// ```
pub trait Parser {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Opens `path` and parses it. A missing file is [`Error::Io`].
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Creates or truncates `path`. The file is not written atomically.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn from_str(xml: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(Cursor::new(xml))
    }

    fn to_xml_string(&self) -> Result<String, Error> {
        let mut out = Vec::new();
        self.to_writer(&mut out)?;
        Ok(String::from_utf8(out).map_err(|e| e.utf8_error())?)
    }
}
