//! Diagnostic dump of assembled cases, one JSON object per line.
//!
//! The output is JSON Lines, not a JSON array; it exists so a batch can be
//! inspected (or diffed between runs) without touching the registry.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use godata_model::GoDataCase;

pub fn write_cases(path: &Path, cases: &[GoDataCase]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create case dump {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for case in cases {
        serde_json::to_writer(&mut writer, case)
            .with_context(|| format!("serialize case {}", case.visual_id))?;
        writer.write_all(b"\n").context("write case dump")?;
    }
    writer.flush().context("flush case dump")?;
    info!(cases = cases.len(), path = %path.display(), "case dump written");
    Ok(())
}
