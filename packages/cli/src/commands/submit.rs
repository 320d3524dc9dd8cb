use crate::config::Config;
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{EditorError, HttpSubmitter, StoredPage, SubmitError};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Page record JSON: title, slug, content, published, order
    pub record: PathBuf,
}

pub async fn submit(args: SubmitArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;

    let raw = fs::read_to_string(&args.record)
        .with_context(|| format!("cannot read {}", args.record.display()))?;
    let stored: StoredPage = serde_json::from_str(&raw)
        .with_context(|| format!("invalid page record in {}", args.record.display()))?;

    // Content goes through the loader so legacy shapes are saved canonical
    let mut editor = config.open_editor(stored);
    let submitter = HttpSubmitter::new(config.submit_url.clone(), config.csrf_token(cwd)?);

    println!(
        "{}",
        format!("📝 Saving \"{}\"...", editor.record().title)
            .bright_blue()
            .bold()
    );

    match editor.submit(&submitter).await {
        Ok(()) => {
            println!("{} Saved {}", "✅".green(), editor.record().slug);
            Ok(())
        }
        Err(EditorError::Submit(SubmitError::Validation(errors))) => {
            for (field, messages) in &errors.0 {
                for message in messages {
                    eprintln!("  {} {}: {}", "✗".red(), field.bright_white(), message.red());
                }
            }
            bail!("page was rejected");
        }
        Err(err) => Err(err.into()),
    }
}
