use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::ensure_parent;
use crate::config::Delimiter;
use crate::error::ExportError;
use crate::models::TABLE_HEADERS;
use crate::results::ResultSet;

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W, S>(w: &mut W, row: &[S], sep: char) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{}", sep)?;
        } else {
            first = false;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header plus one row per listing: title, company, location, url, date
pub fn write_delimited<W: Write>(w: &mut W, results: &ResultSet, delimiter: Delimiter) -> io::Result<()> {
    let sep = delimiter.as_char();
    write_row(w, &TABLE_HEADERS, sep)?;
    for listing in results {
        write_row(w, &listing.table_row(), sep)?;
    }
    Ok(())
}

pub fn save_delimited(path: &Path, results: &ResultSet, delimiter: Delimiter) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    write_delimited(&mut out, results, delimiter)?;
    out.flush()?;
    info!("Saved {} listing(s) to {}", results.len(), path.display());
    Ok(())
}
