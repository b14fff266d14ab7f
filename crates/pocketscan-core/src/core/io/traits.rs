use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for reading and writing delimited pocket tables.
///
/// Each implementor owns one table layout (its header row and row type).
/// Writing always replaces the whole destination; there is no append mode.
pub trait TableFile {
    /// The row type stored in the table.
    type Row;

    /// The error type for I/O and parsing operations.
    type Error: Error + From<io::Error>;

    /// Reads all rows from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing or a row cannot be parsed.
    fn read_from(reader: &mut impl Read) -> Result<Vec<Self::Row>, Self::Error>;

    /// Writes the header and all rows to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    fn write_to(rows: &[Self::Row], writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads all rows from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Self::Row>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Writes all rows to a file path, truncating any previous contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(rows: &[Self::Row], path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(rows, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
