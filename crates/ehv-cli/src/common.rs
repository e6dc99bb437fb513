//! Output helpers shared by every command.

use anyhow::Result;
use clap::ValueEnum;
use ehv_ui_common::{Fallback, Page, Summary};
use serde::Serialize;
use std::io::{self, Write};
use tabwriter::TabWriter;

/// Output format for tabular data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text tables
    #[default]
    Table,
    /// One pretty-printed JSON document
    Json,
    /// One JSON object per record
    Jsonl,
}

/// Line printed in place of an empty table.
pub const NO_RESULTS: &str = "No results match the current filters.";

/// Write `data` as JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(data: &T, writer: &mut W, pretty: bool) -> io::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, data).map_err(io::Error::other)?;
    } else {
        serde_json::to_writer(&mut *writer, data).map_err(io::Error::other)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Write each item as one JSON line.
pub fn write_jsonl<W: Write, T: Serialize>(data: &[T], writer: &mut W) -> io::Result<()> {
    for item in data {
        serde_json::to_writer(&mut *writer, item).map_err(io::Error::other)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// Print a header row and data rows as an aligned table.
pub fn print_table(header: &str, rows: &[String]) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "{header}")?;
    for row in rows {
        writeln!(writer, "{row}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Tab-separated rows aligned without a header.
pub fn print_rows(rows: &[String]) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    for row in rows {
        writeln!(writer, "{row}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Category counts with optional percentage shares.
pub fn print_summary(title: &str, summary: &Summary, show_percentages: bool) -> Result<()> {
    println!("{title}");
    let mut writer = TabWriter::new(io::stdout());
    if show_percentages {
        writeln!(writer, "  VALUE\tCOUNT\tSHARE")?;
    } else {
        writeln!(writer, "  VALUE\tCOUNT")?;
    }
    for category in summary.iter() {
        if show_percentages {
            writeln!(
                writer,
                "  {}\t{}\t{}%",
                category.value, category.count, category.percent
            )?;
        } else {
            writeln!(writer, "  {}\t{}", category.value, category.count)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Pager footer, or the explicit empty-state line.
pub fn print_pager<T>(page: &Page<T>) {
    match page.range_label() {
        Some(label) => println!(
            "{label} (page {} of {})",
            page.current_page, page.total_pages
        ),
        None => println!("{NO_RESULTS}"),
    }
}

/// The "no data" page with its single recovery action.
pub fn print_fallback(fallback: &Fallback) {
    println!("{}", fallback.title);
    println!(
        "  -> {} ({})",
        fallback.recovery_label,
        fallback.recovery.path()
    );
}

#[derive(Serialize)]
struct FallbackJson<'a> {
    page: String,
    title: &'a str,
    recovery: String,
    recovery_label: &'a str,
}

/// JSON form of a fallback page.
pub fn write_fallback_json(fallback: &Fallback) -> Result<()> {
    let doc = FallbackJson {
        page: fallback.page.path(),
        title: &fallback.title,
        recovery: fallback.recovery.path(),
        recovery_label: &fallback.recovery_label,
    };
    write_json(&doc, &mut io::stdout(), true)?;
    Ok(())
}
