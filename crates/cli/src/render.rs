//! Text and JSON renderings of the emulated document.

use colored::Colorize;
use wordpane::emulator::{BlockSnapshot, FontSnapshot, ParagraphSnapshot, TableSnapshot};
use wordpane::protocol::BuiltInStyle;
use wordpane::DocumentSnapshot;

use crate::error::Result;

// Emulator document defaults; only differing values get annotated.
const DEFAULT_FONT: &str = "Calibri";
const DEFAULT_SIZE: f32 = 11.0;
const DEFAULT_COLOR: &str = "#000000";

/// Prints `snapshot` to stdout, as pretty JSON when `json` is set.
pub fn print_document(snapshot: &DocumentSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    for block in &snapshot.blocks {
        match block {
            BlockSnapshot::Paragraph(paragraph) => print_paragraph(paragraph),
            BlockSnapshot::Table(table) => print_table(table),
        }
    }

    let selection = &snapshot.selection;
    println!(
        "{} {:?} [{}..{}]",
        "selection".dimmed(),
        selection.text,
        selection.start,
        selection.end
    );
    Ok(())
}

/// Prints a failed flow the way the task pane logs it: the error line,
/// then the host debug payload when one is attached.
pub fn report_host_error(error: &wordpane::Error) {
    tracing::error!(target = "wordpane", error = %error, "flow failed");
    println!("{} {error}", "Error:".red().bold());
    if let Some(debug) = error.debug_info() {
        if let Ok(body) = serde_json::to_string_pretty(debug) {
            println!("Debug info: {body}");
        }
    }
}

fn print_paragraph(paragraph: &ParagraphSnapshot) {
    let mut notes = Vec::new();
    if paragraph.style != BuiltInStyle::Normal {
        notes.push(paragraph.style.to_string());
    }
    if let Some(font) = describe_font(&paragraph.font) {
        notes.push(font);
    }
    for picture in &paragraph.pictures {
        notes.push(format!("picture {}x{}pt", picture.width, picture.height));
    }

    if notes.is_empty() {
        println!("  {}", paragraph.text);
    } else {
        let notes = format!("[{}]", notes.join(", "));
        println!("  {}  {}", paragraph.text, notes.cyan());
    }
}

fn print_table(table: &TableSnapshot) {
    println!(
        "  {}",
        format!("table {}x{}", table.rows, table.columns).dimmed()
    );
    for row in &table.values {
        println!("    | {} |", row.join(" | "));
    }
}

/// Describes the ways a font differs from the document default.
fn describe_font(font: &FontSnapshot) -> Option<String> {
    let mut parts = Vec::new();
    if font.name != DEFAULT_FONT {
        parts.push(font.name.clone());
    }
    if font.bold {
        parts.push("bold".to_string());
    }
    if font.italic {
        parts.push("italic".to_string());
    }
    if font.size != DEFAULT_SIZE {
        parts.push(format!("{}pt", font.size));
    }
    if font.color != DEFAULT_COLOR {
        parts.push(font.color.clone());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}
