use super::error::ParseError;
use crate::core::models::system::System;
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Defines the interface for reading one of the input file formats.
///
/// Some formats can only be interpreted with outside knowledge, such as the number of
/// atoms a parameter file describes; that knowledge is passed in as `Options`.
pub trait InputFile {
    /// The parsed content of the file.
    type Output;

    /// Context needed to interpret the file.
    type Options: ?Sized;

    /// Reads the format from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Self::Output, ParseError>;

    /// Reads the format from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        options: &Self::Options,
    ) -> Result<Self::Output, ParseError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, options)
    }
}

/// Defines the interface for writing a packed system to an output format.
pub trait SystemWriter {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes a system to a writer.
    ///
    /// # Arguments
    ///
    /// * `system` - The system to write.
    /// * `writer` - The writer to output to.
    ///
    /// # Errors
    ///
    /// Returns an error if the system cannot be rendered or writing fails.
    fn write_to(system: &System, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes a system to a file path.
    ///
    /// The whole file is rendered in memory first, so a failure never leaves a
    /// truncated or half-written file behind.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written.
    fn write_to_path<P: AsRef<Path>>(system: &System, path: P) -> Result<(), Self::Error> {
        let mut buffer = Vec::new();
        Self::write_to(system, &mut buffer)?;
        fs::write(path, buffer)?;
        Ok(())
    }
}
