//! The `casemark mark` command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use casemark_core::error::check_answer_length;
use casemark_core::evaluator::evaluate;
use casemark_core::model::Assessment;
use casemark_core::report::{MarkedAnswer, MarkingReport};
use casemark_core::rubric::Rubric;
use casemark_report::html::write_html_report;
use casemark_report::markdown::report_to_markdown;

use crate::config::load_config_from;

pub fn execute(
    answer_path: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let format = format.unwrap_or_else(|| config.default_format.clone());

    let sources = collect_answers(&answer_path)?;
    anyhow::ensure!(
        !sources.is_empty(),
        "no .txt or .md answer files found in {}",
        answer_path.display()
    );
    let batch = sources.len() > 1;

    let rubric = Rubric::standard();
    let start = Instant::now();

    let mut answers = Vec::new();
    for (source, text) in &sources {
        if let Err(e) = check_answer_length(text, config.max_answer_chars) {
            if batch {
                tracing::warn!("skipping {source}: {e}");
                continue;
            }
            return Err(e).with_context(|| format!("cannot mark {source}"));
        }
        tracing::debug!("marking {source}");
        answers.push(MarkedAnswer {
            source: source.clone(),
            assessment: evaluate(&rubric, text),
        });
    }
    anyhow::ensure!(
        !answers.is_empty(),
        "no answers were within the {} character limit",
        config.max_answer_chars
    );

    let report = MarkingReport::new(
        &rubric.question_id,
        answers,
        start.elapsed().as_millis() as u64,
    );

    print_answers(&report);
    print_summary(&report);

    // Save outputs
    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(|s| s.trim()).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, report_to_markdown(&report))
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

/// Gather (source, text) pairs from a file, a directory, or stdin.
fn collect_answers(path: &Path) -> Result<Vec<(String, String)>> {
    if path == Path::new("-") {
        let text = std::io::read_to_string(std::io::stdin())
            .context("failed to read answer from stdin")?;
        return Ok(vec![("stdin".to_string(), text)]);
    }

    if path.is_dir() {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?
        {
            let entry = entry?;
            let file_path = entry.path();
            let is_answer_file = file_path.is_file()
                && file_path
                    .extension()
                    .is_some_and(|ext| ext == "txt" || ext == "md");
            if !is_answer_file {
                continue;
            }
            match std::fs::read_to_string(&file_path) {
                Ok(text) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    entries.push((name, text));
                }
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", file_path.display());
                }
            }
        }
        // Directory iteration order is platform-dependent; sort for stable reports.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        return Ok(entries);
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer file: {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(vec![(name, text)])
}

fn print_answers(report: &MarkingReport) {
    for answer in &report.answers {
        println!("--- {}", answer.source);
        match &answer.assessment {
            Assessment::Gated(g) => {
                println!("{}", g.message);
            }
            Assessment::Scored(s) => {
                println!("Score: {}/10 ({} words)", s.score, s.word_count);
                for strength in &s.strengths {
                    println!("+ {strength}");
                }
                println!("{}", s.feedback);
            }
        }
        println!();
    }
}

fn print_summary(report: &MarkingReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Source", "Status", "Score", "Words"]);

    for answer in &report.answers {
        let (status, score) = match &answer.assessment {
            Assessment::Gated(_) => ("gated", "-".to_string()),
            Assessment::Scored(s) => ("scored", format!("{}/10", s.score)),
        };
        table.add_row(vec![
            Cell::new(&answer.source),
            Cell::new(status),
            Cell::new(score),
            Cell::new(answer.assessment.word_count()),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Mean score: {:.1} ({} gated, {} scored)",
        report.cohort.mean_score, report.cohort.gated, report.cohort.scored
    );
}
