use crate::data::{Error, Expense, Record, HEADER};
use std::{
    fs::{File, OpenOptions},
    io::ErrorKind,
    path::PathBuf,
};

/// Append-only CSV log of expenses. Every operation opens the file, does its
/// work and closes it again before returning; nothing is kept open between
/// calls. Single process only: two trackers appending to the same file at
/// once can interleave lines.
#[derive(Debug, Clone)]
pub(crate) struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the file with its header line if it doesn't exist yet. An
    /// existing file is left alone, header included.
    pub fn ensure_initialized(&self) -> Result<(), Error> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(e) => return Err(self.io_error(e)),
        };
        let mut wtr = csv::Writer::from_writer(file);
        wtr.write_record(HEADER).map_err(|e| self.csv_error(e))?;
        wtr.flush().map_err(|e| self.io_error(e))?;
        tracing::debug!("created {}", self.path.display());
        Ok(())
    }

    /// Writes one line at the end of the file. Failures are logged here and
    /// handed back; nothing is retried.
    pub fn append(&self, expense: &Expense) -> Result<(), Error> {
        let result = self.try_append(expense);
        match &result {
            Ok(()) => tracing::debug!(
                amount = %expense.amount,
                category = %expense.category,
                "expense saved"
            ),
            Err(e) => tracing::error!("Error saving expense: {e}"),
        }
        result
    }

    fn try_append(&self, expense: &Expense) -> Result<(), Error> {
        // The file may have been removed since startup; recreating it here
        // keeps the header on the first line.
        self.ensure_initialized()?;
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.serialize(expense).map_err(|e| self.csv_error(e))?;
        wtr.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Every record in file order, or nothing at all if the file can't be
    /// read or parsed (the error goes to the log).
    pub fn read_all(&self) -> Vec<Record> {
        self.try_read_all().unwrap_or_else(|e| {
            tracing::error!("Error reading expenses: {e}");
            Vec::new()
        })
    }

    pub fn try_read_all(&self) -> Result<Vec<Record>, Error> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        rdr.deserialize()
            .map(|result| result.map_err(|e| self.csv_error(e)))
            .collect()
    }

    fn io_error(&self, source: std::io::Error) -> Error {
        Error::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn csv_error(&self, source: csv::Error) -> Error {
        Error::Csv {
            path: self.path.clone(),
            source,
        }
    }
}
