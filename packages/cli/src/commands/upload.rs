use crate::config::Config;
use super::write_document;
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_document::ColumnPath;
use pagecraft_editor::{upload_image, HttpUploader, Notifier, StoredPage};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// File holding the stored content
    pub input: PathBuf,

    /// Image to upload
    pub image: PathBuf,

    /// Section index
    #[arg(long)]
    pub section: usize,

    /// Column index within the section
    #[arg(long)]
    pub column: usize,

    /// Nested column index within the column
    #[arg(long)]
    pub nested: Option<usize>,

    /// Element index within the column
    #[arg(long)]
    pub element: usize,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Prints alerts to the terminal
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn alert(&self, message: &str) {
        eprintln!("  {} {}", "✗".red(), message.red());
    }
}

pub async fn upload(args: UploadArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let mut editor = config.open_editor(StoredPage {
        content: Some(raw),
        ..Default::default()
    });

    let column = match args.nested {
        Some(nested) => ColumnPath::nested(args.section, args.column, nested),
        None => ColumnPath::top(args.section, args.column),
    };
    let target = column.element(args.element);

    let file = editor.image_for_upload(target, &args.image)?;
    eprintln!("📤 Uploading {} to {}", file.file_name.bright_white(), config.upload_url);

    let uploader = HttpUploader::new(config.upload_url.clone(), config.csrf_token(cwd)?);
    let outcome = upload_image(&uploader, target, file).await;

    if !editor.complete_upload(outcome, &TerminalNotifier) {
        bail!("image was not uploaded");
    }

    write_document(editor.document(), args.output.as_deref())
}
