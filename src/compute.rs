use crate::data::{parse_amount, Error, Record, Spending};

/// Sums the amounts per category. A stored amount that isn't a number fails
/// the whole summary; no row is skipped or counted as zero. Rows in the
/// error are counted from 1, header excluded.
pub(crate) fn summarize<'a, I>(records: I) -> Result<Spending, Error>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut spending = Spending::new();
    for (index, record) in records.into_iter().enumerate() {
        let amount = parse_amount(&record.amount).ok_or_else(|| Error::InvalidStoredAmount {
            row: index + 1,
            date: record.date.clone(),
            value: record.amount.clone(),
        })?;
        let total = spending.entry(record.category.clone()).or_default();
        *total = total
            .checked_add(amount)
            .ok_or_else(|| Error::AmountOverflow {
                category: record.category.clone(),
            })?;
    }
    Ok(spending)
}
