use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::ensure_parent;
use crate::error::ExportError;
use crate::results::ResultSet;

pub fn save_json(path: &Path, results: &ResultSet) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, results)?;
    out.flush()?;
    info!("Saved {} listing(s) to {}", results.len(), path.display());
    Ok(())
}
