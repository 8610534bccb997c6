use crate::{
    compute::summarize,
    data::{parse_amount, Expense},
    report::{Rendered, Reporter},
    store::RecordStore,
};
use std::io::{BufRead, Write};

/// The interactive menu. Reads one line per prompt from `input` and writes
/// everything the user sees to `output`, so it runs the same against a
/// terminal or against byte buffers.
pub(crate) struct Shell<R, W> {
    store: RecordStore,
    reporter: Reporter,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(store: RecordStore, reporter: Reporter, input: R, output: W) -> Self {
        Self {
            store,
            reporter,
            input,
            output,
        }
    }

    /// Loops until the user picks "3" or the input runs dry.
    pub fn run(&mut self) -> Result<(), anyhow::Error> {
        loop {
            self.display_menu()?;
            let Some(choice) = self.prompt("> Select an option (1-3): ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.add_expense()?,
                "2" => self.report()?,
                "3" => {
                    writeln!(self.output, "👋 Exiting...")?;
                    break;
                }
                _ => writeln!(self.output, "❌ Invalid choice. Try again.")?,
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn display_menu(&mut self) -> std::io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "💰 Expense Tracker CLI")?;
        writeln!(self.output, "1. ➕ Add Expense")?;
        writeln!(self.output, "2. 📊 View Spending Report")?;
        writeln!(self.output, "3. 🚪 Exit")
    }

    /// Shows `message` and waits for a line. `None` at end of input. Bytes
    /// that aren't UTF-8 come through as U+FFFD, so they fail as a choice or
    /// an amount like any other typo.
    fn prompt(&mut self, message: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    fn add_expense(&mut self) -> Result<(), anyhow::Error> {
        let Some(amount) = self.prompt("Enter amount ($): ")? else {
            return Ok(());
        };
        let Some(amount) = parse_amount(&amount) else {
            writeln!(self.output, "❌ Invalid amount. Please enter a number.")?;
            return Ok(());
        };
        let Some(category) = self.prompt("Enter category (e.g., Food, Rent): ")? else {
            return Ok(());
        };
        match self.store.append(&Expense::new(amount, &category)) {
            Ok(()) => writeln!(self.output, "✅ Expense added successfully!")?,
            Err(e) => writeln!(self.output, "Error saving expense: {e}")?,
        }
        Ok(())
    }

    fn report(&mut self) -> Result<(), anyhow::Error> {
        writeln!(self.output)?;
        writeln!(self.output, "📈 Generating spending report...")?;
        let records = self.store.read_all();
        let spending = match summarize(&records) {
            Ok(spending) => spending,
            Err(e) => {
                writeln!(self.output, "❌ Cannot build report: {e}")?;
                return Ok(());
            }
        };
        match self.reporter.render(&spending, &mut self.output) {
            Ok(Rendered::Nothing) => {}
            Ok(Rendered::Chart(path)) => {
                // Stay on the chart until the user dismisses it.
                self.prompt(&format!(
                    "Chart saved to {}. Press Enter to return to the menu.",
                    path.display()
                ))?;
            }
            Err(e) => writeln!(self.output, "❌ Error generating report: {e}")?,
        }
        Ok(())
    }
}
