//! Markdown report rendering.

use casemark_core::model::Assessment;
use casemark_core::report::MarkingReport;

/// Render one assessment as markdown.
pub fn assessment_to_markdown(source: &str, assessment: &Assessment) -> String {
    let mut md = String::new();
    md.push_str(&format!("## {source}\n\n"));

    match assessment {
        Assessment::Gated(g) => {
            md.push_str(&format!(
                "**Not marked** ({} words). {}\n",
                g.word_count, g.message
            ));
        }
        Assessment::Scored(s) => {
            md.push_str(&format!(
                "**Score: {}/10** ({} words)\n\n",
                s.score, s.word_count
            ));

            if !s.strengths.is_empty() {
                md.push_str("### Strengths\n\n");
                for strength in &s.strengths {
                    md.push_str(&format!("- {strength}\n"));
                }
                md.push('\n');
            }

            md.push_str("### Feedback\n\n");
            md.push_str(&s.feedback);
            md.push_str("\n\n");

            md.push_str("### Diagnostic grid\n\n");
            md.push_str("| Dimension | Status |\n");
            md.push_str("|-----------|--------|\n");
            for row in &s.grid {
                md.push_str(&format!("| {} | {} |\n", row.dimension, row.status));
            }
            md.push('\n');

            md.push_str("### Tags\n\n");
            for tag in &s.tags {
                md.push_str(&format!("- {}: {}\n", tag.dimension, tag.status));
            }
            md.push('\n');

            if !s.frameworks.is_empty() {
                md.push_str("### Framework notes\n\n");
                for framework in &s.frameworks {
                    md.push_str(&format!(
                        "**{}** — {} In this case: {}\n\n",
                        framework.name, framework.expectation, framework.case
                    ));
                }
            }

            md.push_str("### Model answer\n\n");
            md.push_str(&s.model_answer);
            md.push('\n');
        }
    }

    md
}

/// Render a full marking report as markdown.
pub fn report_to_markdown(report: &MarkingReport) -> String {
    let mut md = String::new();

    md.push_str(&format!("# casemark report — {}\n\n", report.question_id));
    md.push_str(&format!(
        "**Summary:** {} answers, {} gated, {} scored, mean score {:.1}\n\n",
        report.cohort.total, report.cohort.gated, report.cohort.scored, report.cohort.mean_score
    ));

    if !report.cohort.dimension_tallies.is_empty() {
        md.push_str("| Dimension | ok | mid | bad |\n");
        md.push_str("|-----------|----|-----|-----|\n");
        for (dimension, tally) in &report.cohort.dimension_tallies {
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                dimension, tally.ok, tally.mid, tally.bad
            ));
        }
        md.push('\n');
    }

    for answer in &report.answers {
        md.push_str(&assessment_to_markdown(&answer.source, &answer.assessment));
        md.push('\n');
    }

    md
}
