use std::path::PathBuf;

pub const RECORDS_FILE: &str = "expenses.csv";
pub const CHART_FILE: &str = "expenses.svg";

/// Where the tracker keeps its files. Built once in `main` and handed to the
/// store and the reporter when they're constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub records: PathBuf,
    pub chart: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            records: PathBuf::from(RECORDS_FILE),
            chart: PathBuf::from(CHART_FILE),
        }
    }
}
