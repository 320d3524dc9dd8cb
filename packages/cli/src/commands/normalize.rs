use super::{read_document, write_document};
use anyhow::Result;
use clap::Args;
use pagecraft_document::IdGenerator;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// File holding the stored content (JSON, legacy rows, or plain text)
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn normalize(args: NormalizeArgs) -> Result<()> {
    let doc = read_document(&args.input, &mut IdGenerator::new())?;
    write_document(&doc, args.output.as_deref())
}
