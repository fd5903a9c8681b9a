use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::digest::DigestEntry;
use crate::error::Result;

pub const DEFAULT_DIGEST_FILE: &str = "research_summaries.txt";

/// Plain-text download: title, blank line, summary; entries separated by a
/// blank line.
pub fn digest_text(entries: &[DigestEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{}\n\n{}", entry.title, entry.summary))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn write_markdown_report(path: &Path, query: &str, entries: &[DigestEntry]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(render_markdown_report(query, entries, Utc::now()).as_bytes())?;
    writer.flush()?;
    Ok(())
}

pub fn render_markdown_report(
    query: &str,
    entries: &[DigestEntry],
    generated_at: DateTime<Utc>,
) -> String {
    let mut lines = vec![
        format!("# Research Digest: {query}"),
        format!("Generated: {}", generated_at.to_rfc3339()),
        format!("Papers: {}", entries.len()),
    ];
    let partial = entries.iter().filter(|entry| entry.is_partial()).count();
    if partial > 0 {
        lines.push(format!("Partial summaries: {partial}"));
    }

    for entry in entries {
        lines.push(String::new());
        lines.push(format!("## {}", entry.title));
        match entry.published {
            Some(date) => lines.push(format!("- [Open Paper]({}), {}", entry.url, date)),
            None => lines.push(format!("- [Open Paper]({})", entry.url)),
        }
        if !entry.failed_chunks.is_empty() {
            lines.push(format!(
                "- Note: {} chunk summaries failed",
                entry.failed_chunks.len()
            ));
        }
        if entry.combine_failed {
            lines.push("- Note: combining the chunk summaries failed".to_string());
        }
        for line in entry.summary.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            lines.push(format!("  {trimmed}"));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    fn entry(title: &str, summary: &str) -> DigestEntry {
        DigestEntry {
            title: title.to_string(),
            summary: summary.to_string(),
            url: format!("http://arxiv.org/abs/{title}"),
            published: None,
            failed_chunks: Vec::new(),
            combine_failed: false,
        }
    }

    #[test]
    fn digest_text_separates_with_blank_lines() {
        let entries = vec![entry("A", "alpha"), entry("B", "beta")];
        assert_eq!(digest_text(&entries), "A\n\nalpha\n\nB\n\nbeta");
        assert_eq!(digest_text(&[]), "");
    }

    #[test]
    fn markdown_lists_links_dates_and_partial_notes() {
        let mut first = entry("First", "Line one.\n\n  Line two.  ");
        first.published = NaiveDate::from_ymd_opt(2025, 3, 4);
        let mut second = entry("Second", "Text generation error: Error 500: boom");
        second.failed_chunks = vec![0];
        let at = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();

        let report = render_markdown_report("llm healthcare", &[first, second], at);
        assert!(report.starts_with("# Research Digest: llm healthcare\n"));
        assert!(report.contains("Generated: 2025-03-05T12:00:00+00:00"));
        assert!(report.contains("Papers: 2\nPartial summaries: 1\n"));
        assert!(report.contains("## First\n- [Open Paper](http://arxiv.org/abs/First), 2025-03-04\n  Line one.\n  Line two.\n"));
        assert!(report.contains("- Note: 1 chunk summaries failed"));
    }

    #[test]
    fn failed_combine_alone_counts_as_partial() {
        let mut only = entry("Only", "Text generation error: Error 503: overloaded");
        only.combine_failed = true;
        let at = Utc.with_ymd_and_hms(2025, 3, 5, 12, 0, 0).unwrap();

        let report = render_markdown_report("q", &[only, entry("Clean", "fine")], at);
        assert!(report.contains("Papers: 2\nPartial summaries: 1\n"));
        assert!(report.contains("- Note: combining the chunk summaries failed"));
        assert!(!report.contains("- Note: 0 chunk summaries failed"));
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("digest.md");
        write_markdown_report(&path, "q", &[entry("T", "S")]).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("## T"));
        assert!(written.ends_with("  S\n"));
    }
}
