//! Plain-text report printing.

use std::io::{self, Write};

use estimate_core::report::{Report, ReportSection, SectionBody, Table};

const RULE: &str = "═══════════════════════════════════════";

pub fn print_report(report: &Report) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = write_report(&mut out, report) {
        tracing::warn!(error = %e, "failed to write report");
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", report.heading.to_uppercase())?;
    writeln!(out, "  {}", report.title)?;
    writeln!(out, "{}", RULE)?;

    if report.is_empty() {
        writeln!(out)?;
        writeln!(out, "The service returned no report sections.")?;
    }
    for section in &report.sections {
        writeln!(out)?;
        write_section(out, section)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}

fn write_section<W: Write>(out: &mut W, section: &ReportSection) -> io::Result<()> {
    writeln!(out, "{}:", section.label)?;
    match &section.body {
        SectionBody::Metrics(metrics) => {
            let width = metrics.iter().map(|m| m.label.len()).max().unwrap_or(0);
            for metric in metrics {
                writeln!(out, "  {:<width$}  {}", metric.label, metric.display(), width = width)?;
            }
        }
        SectionBody::Text(body) => {
            for line in body.lines() {
                writeln!(out, "  {}", line)?;
            }
        }
        SectionBody::Table(table) => write_table(out, table)?,
        SectionBody::Cards(cards) => {
            for card in cards {
                writeln!(out, "  {} ({})", card.title, card.subtitle)?;
                if !card.body.is_empty() {
                    writeln!(out, "    {}", card.body)?;
                }
            }
        }
        SectionBody::Groups(groups) => {
            for group in groups {
                writeln!(out, "  {}", group.title)?;
                for item in &group.items {
                    writeln!(out, "    - {}", item)?;
                }
            }
        }
        SectionBody::KeyValues { pairs, table } => {
            for (label, value) in pairs {
                writeln!(out, "  {}: {}", label, value)?;
            }
            if let Some(table) = table {
                write_table(out, table)?;
            }
        }
        SectionBody::List(items) => {
            for item in items {
                writeln!(out, "  - {}", item)?;
            }
        }
    }
    Ok(())
}

/// Columns padded to their widest cell
fn write_table<W: Write>(out: &mut W, table: &Table) -> io::Result<()> {
    let widths: Vec<usize> = table
        .headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    writeln!(out, "  {}", line(&table.headers).trim_end())?;
    writeln!(
        out,
        "  {}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    )?;
    for row in &table.rows {
        writeln!(out, "  {}", line(row).trim_end())?;
    }
    Ok(())
}
