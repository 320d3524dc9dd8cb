pub mod apply;
pub mod layouts;
pub mod normalize;
pub mod stats;
pub mod submit;
pub mod upload;

pub use apply::{apply, ApplyArgs};
pub use layouts::layouts;
pub use normalize::{normalize, NormalizeArgs};
pub use stats::{stats, StatsArgs};
pub use submit::{submit, SubmitArgs};
pub use upload::{upload, UploadArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use pagecraft_document::{load, Document, IdGenerator};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read stored page content and run it through the loader
pub fn read_document(path: &Path, ids: &mut IdGenerator) -> Result<Document> {
    let raw = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let doc = load(Some(&raw), ids);
    debug!(path = %path.display(), sections = doc.sections.len(), "document loaded");
    Ok(doc)
}

/// Pretty JSON to `output`, or to stdout when no output is given
pub fn write_document(doc: &Document, output: Option<&Path>) -> Result<()> {
    let json = doc.to_json_pretty()?;

    match output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("cannot write {}", path.display()))?;
            eprintln!("  {} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
