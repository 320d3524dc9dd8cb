use anyhow::Result;
use colored::Colorize;
use pagecraft_document::{DEFAULT_LAYOUT, LAYOUTS};

pub fn layouts() -> Result<()> {
    println!("{}", "Section layouts".bright_blue().bold());

    for layout in LAYOUTS {
        let widths = layout
            .widths
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" + ");
        let marker = if layout.key == DEFAULT_LAYOUT {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };

        println!(
            "  {:<16} {:<22} {}{}",
            layout.key.bright_white(),
            layout.label,
            widths,
            marker
        );
    }

    Ok(())
}
