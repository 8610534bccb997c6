use crate::{
    chart::PieChart,
    data::{Error, Spending},
};
use std::{io::Write, path::PathBuf};

pub const NOTHING_TO_SHOW: &str = "No expenses to visualize.";

/// What a call to [`Reporter::render`] produced.
#[derive(Debug, PartialEq)]
pub(crate) enum Rendered {
    Nothing,
    Chart(PathBuf),
}

/// Turns a spending summary into a legend on the terminal and a pie chart
/// on disk.
#[derive(Debug, Clone)]
pub(crate) struct Reporter {
    chart_path: PathBuf,
}

impl Reporter {
    pub fn new(chart_path: impl Into<PathBuf>) -> Self {
        Self {
            chart_path: chart_path.into(),
        }
    }

    pub fn render<W: Write>(&self, spending: &Spending, out: &mut W) -> Result<Rendered, Error> {
        if spending.is_empty() {
            writeln!(out, "{NOTHING_TO_SHOW}")?;
            return Ok(Rendered::Nothing);
        }
        let chart = PieChart::from_spending(spending)?;
        let slices = chart.as_ref().map_or(&[][..], |chart| &chart.slices[..]);
        writeln!(out, "{}", crate::chart::TITLE)?;
        for slice in slices {
            writeln!(
                out,
                "  {:<20} {:>12} {:>7}",
                slice.category,
                slice.amount,
                slice.percent()
            )?;
        }
        // Categories that got no slice: refunds and zero totals.
        for (category, amount) in spending {
            if !slices.iter().any(|slice| &slice.category == category) {
                writeln!(out, "  {category:<20} {amount:>12} {:>7}", "-")?;
            }
        }
        let Some(chart) = chart else {
            writeln!(out, "{NOTHING_TO_SHOW}")?;
            return Ok(Rendered::Nothing);
        };
        chart.save(&self.chart_path).map_err(|source| Error::Io {
            path: self.chart_path.clone(),
            source,
        })?;
        tracing::debug!(
            slices = chart.slices.len(),
            "chart written to {}",
            self.chart_path.display()
        );
        Ok(Rendered::Chart(self.chart_path.clone()))
    }
}
