use anyhow::Result;
use std::io::{self, Write};

use super::Presenter;
use crate::models::TABLE_HEADERS;
use crate::pipeline::SearchOutcome;
use crate::results::ResultSet;

// Widest cell per column before truncation; the url column is never cut
const MAX_WIDTHS: [usize; 5] = [50, 30, 20, usize::MAX, 10];

/// Writes an aligned table to stdout (or any writer)
pub struct ConsolePresenter<W: Write> {
    out: W,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "warning: {}", message)?;
        Ok(())
    }

    fn present(&mut self, outcome: &SearchOutcome) -> Result<()> {
        for warning in &outcome.warnings {
            self.warn(warning)?;
        }
        if outcome.results.is_empty() {
            writeln!(self.out, "No jobs passed the filters ({} scraped)", outcome.scraped.len())?;
            return Ok(());
        }
        write!(self.out, "{}", render_table(&outcome.results))?;
        writeln!(
            self.out,
            "{} of {} job(s) passed the filters",
            outcome.results.len(),
            outcome.scraped.len()
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// Prints nothing
#[derive(Debug, Default)]
pub struct QuietPresenter;

impl Presenter for QuietPresenter {
    fn notify(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn warn(&mut self, _message: &str) -> Result<()> {
        Ok(())
    }

    fn present(&mut self, _outcome: &SearchOutcome) -> Result<()> {
        Ok(())
    }
}

fn truncate(cell: &str, max: usize) -> String {
    if cell.chars().count() <= max {
        return cell.to_string();
    }
    let mut cut: String = cell.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Columns title, company, location, url, date; padded to the widest cell
pub fn render_table(results: &ResultSet) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|listing| {
            listing
                .table_row()
                .iter()
                .zip(MAX_WIDTHS)
                .map(|(cell, max)| truncate(cell, max))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = TABLE_HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    let header: Vec<String> = TABLE_HEADERS.iter().map(|h| h.to_uppercase()).collect();
    push_line(&mut table, &header, &widths);
    for row in &rows {
        push_line(&mut table, row, &widths);
    }
    table
}

fn push_line(table: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        table.push_str(cell);
        if i < last {
            let pad = width.saturating_sub(cell.chars().count()) + 2;
            table.extend(std::iter::repeat(' ').take(pad));
        }
    }
    table.push('\n');
}
