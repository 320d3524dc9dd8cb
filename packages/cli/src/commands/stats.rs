use super::read_document;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_document::IdGenerator;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// File holding the stored content
    pub input: PathBuf,

    /// Print the counts as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn stats(args: StatsArgs) -> Result<()> {
    let doc = read_document(&args.input, &mut IdGenerator::new())?;
    let stats = doc.stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("📊 {}", args.input.display().to_string().bright_white());
    println!("   Sections:       {}", stats.sections);
    println!("   Columns:        {}", stats.columns);
    println!("   Nested columns: {}", stats.nested_columns);
    println!("   Elements:       {}", stats.elements);
    println!("   Images:         {}", stats.images);

    let urls = doc.image_urls();
    if !urls.is_empty() {
        println!();
        for url in urls {
            println!("   {} {}", "•".dimmed(), url);
        }
    }

    Ok(())
}
