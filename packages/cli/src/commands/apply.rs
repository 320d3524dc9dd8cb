use super::{read_document, write_document};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::{IdGenerator, Mutation};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// File holding the stored content
    pub input: PathBuf,

    /// JSON array of mutations, applied in order
    pub mutations: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn apply(args: ApplyArgs) -> Result<()> {
    let mut ids = IdGenerator::new();
    let mut doc = read_document(&args.input, &mut ids)?;

    let raw = fs::read_to_string(&args.mutations)
        .with_context(|| format!("cannot read {}", args.mutations.display()))?;
    let mutations: Vec<Mutation> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid mutation list in {}", args.mutations.display()))?;

    // All or nothing: the first failure stops before anything is written
    for (index, mutation) in mutations.iter().enumerate() {
        doc = mutation
            .apply(&doc, &mut ids)
            .with_context(|| format!("mutation #{} ({}) failed", index, mutation.name()))?;
        eprintln!("  {} {}", "✓".green(), mutation.name());
    }

    eprintln!("Applied {} mutations", mutations.len());
    write_document(&doc, args.output.as_deref())
}
