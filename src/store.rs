use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, warn};
use regex::Regex;

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, RowParseError},
    record::Record,
};

/// The sales read from a [`Store`], in file order, plus the rows that had to
/// be skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sales {
    pub records: Vec<Record>,
    pub skipped: Vec<RowParseError>,
}

impl Sales {
    /// Keeps only the sales whose product name matches `pattern`.
    pub fn retain_products(&mut self, pattern: &Regex) {
        self.records.retain(|r| pattern.is_match(&r.product));
    }
}

/// An append-only sales file.
///
/// A `Store` holds nothing but its path: every [`Store::load`] and
/// [`Store::append`] opens the file, does its work and closes it again.
///
/// There is no locking, so two processes appending to the same file at once
/// may interleave their rows.
#[derive(Clone, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every sale in the file.
    ///
    /// A file that doesn't exist yet holds no sales. Rows that can't be
    /// parsed, or that break the rules in [`Record::check`], are logged and
    /// returned in [`Sales::skipped`] instead of stopping the load.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] if the file exists but can't be read.
    pub fn load(&self) -> Result<Sales, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} not found, no sales yet", self.path.display());
                return Ok(Sales::default());
            }
            Err(err) => return Err(self.access_error(err)),
        };
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(file);
        let headers = rdr
            .headers()
            .map_err(|err| self.access_error(err.into()))?
            .clone();
        let mut sales = Sales::default();
        for result in rdr.records() {
            let row = match result {
                Ok(row) => row,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(self.access_error(err.into()));
                }
                Err(err) => {
                    let line = err.position().map_or(0, csv::Position::line);
                    self.skip(&mut sales, line, err.to_string());
                    continue;
                }
            };
            let line = row.position().map_or(0, csv::Position::line);
            match parse_row(&row, &headers) {
                Ok(record) => sales.records.push(record),
                Err(reason) => self.skip(&mut sales, line, reason),
            }
        }
        debug!(
            "loaded {} sales from {} ({} skipped)",
            sales.records.len(),
            self.path.display(),
            sales.skipped.len()
        );
        Ok(sales)
    }

    /// Appends `record` to the file, creating it if necessary.
    ///
    /// The header row is written only when the file is empty, so it appears
    /// exactly once however many sales are added. If the last line of an
    /// existing file has no terminator, one is written first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileAccess`] if the file can't be opened or written.
    pub fn append(&self, record: &Record) -> Result<(), Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.access_error(err))?;
        let len = file.metadata().map_err(|err| self.access_error(err))?.len();
        // A last line without a terminator would swallow the new row.
        if len > 0 && !ends_with_newline(&mut file).map_err(|err| self.access_error(err))? {
            file.write_all(b"\n").map_err(|err| self.access_error(err))?;
        }
        let mut wtr = WriterBuilder::new().has_headers(len == 0).from_writer(file);
        wtr.serialize(record).map_err(|err| self.access_error(err.into()))?;
        wtr.flush().map_err(|err| self.access_error(err))?;
        debug!("appended {record:?} to {}", self.path.display());
        Ok(())
    }

    /// Validates the raw values for a new sale dated today, and appends it.
    ///
    /// Nothing is written unless every value is valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for invalid values, or
    /// [`Error::FileAccess`] if the sale can't be written.
    pub fn add_sale(
        &self,
        product: &str,
        quantity: &str,
        unit_price: &str,
    ) -> Result<Record, Error> {
        let record = Record::from_input(product, quantity, unit_price)?;
        self.append(&record)?;
        Ok(record)
    }

    fn skip(&self, sales: &mut Sales, line: u64, reason: String) {
        warn!("{}: skipping line {line}: {reason}", self.path.display());
        sales.skipped.push(RowParseError { line, reason });
    }

    fn access_error(&self, source: io::Error) -> Error {
        Error::FileAccess {
            path: self.path.clone(),
            source,
        }
    }
}

fn ends_with_newline(file: &mut File) -> io::Result<bool> {
    let mut last = [0; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn parse_row(row: &StringRecord, headers: &StringRecord) -> Result<Record, String> {
    let record: Record = row
        .deserialize(Some(headers))
        .map_err(|err| match err.kind() {
            csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
            _ => err.to_string(),
        })?;
    record.check().map_err(|err| err.to_string())?;
    Ok(record)
}
