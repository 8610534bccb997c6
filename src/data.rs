use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};
use thiserror::Error;

/// Header line of the record file, in column order.
pub const HEADER: [&str; 3] = ["Amount", "Category", "Date"];

/// Total spent per category. A `BTreeMap` so the chart slices and the
/// legend always come out in the same order.
pub(crate) type Spending = BTreeMap<String, Decimal>;

/// An expense about to be written. The date is stamped at creation and
/// can't be chosen by the user; the category is normalized the same way
/// whether it comes from the shell or from a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Expense {
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(amount: Decimal, category: &str) -> Self {
        Self::dated(amount, category, chrono::Local::now().date_naive())
    }

    pub fn dated(amount: Decimal, category: &str, date: NaiveDate) -> Self {
        Self {
            amount,
            category: capitalize(category),
            date,
        }
    }
}

/// A row read back from the record file. Everything stays a raw string:
/// the store doesn't interpret what it reads, the aggregator does.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Record {
    pub amount: String,
    pub category: String,
    pub date: String,
}

/// Parses an amount the way a user would type it: plain decimals first,
/// then scientific notation (`1e3`). Anything a `Decimal` can't hold as
/// written (beyond about 7.9e28, or more than 28 decimal places) is
/// rejected rather than rounded.
pub(crate) fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str_exact(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// First character uppercased, the rest lowercased: "fOOD" becomes "Food".
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Row {row} ({date}) has an amount that is not a number: {value:?}")]
    InvalidStoredAmount {
        row: usize,
        date: String,
        value: String,
    },
    #[error("Spending on {category:?} is too large to add up")]
    AmountOverflow { category: String },
    #[error(transparent)]
    Terminal(#[from] std::io::Error),
}
