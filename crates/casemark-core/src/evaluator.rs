//! The rubric evaluator.
//!
//! A single pure function, [`evaluate`], maps raw answer text to an
//! [`Assessment`]. No I/O, no shared mutable state, deterministic for any
//! string input. Control flow has exactly one branch worth naming: the
//! 50-word gate. Below it nothing but the word count is disclosed; above it
//! five independent criterion evaluators run in a fixed order and their
//! points are summed.

use crate::model::{
    Assessment, CriterionLevel, DimensionTag, GatedAssessment, GridRow, ScoredAssessment,
    TagStatus,
};
use crate::rubric::Rubric;

/// Answers below this many words are gated: no score, no reference material.
pub const GATE_WORDS: usize = 50;

/// Advisory band; answers outside it get a non-scored length note.
const ADVISORY_MIN_WORDS: usize = 100;
const ADVISORY_MAX_WORDS: usize = 250;

const MAX_SCORE: u8 = 10;

const COMMENDATION: &str =
    "Excellent work. Your answer covers the failures, their impact, and what should change.";

const STRENGTH_FAILURES: &str = "You identified several distinct ethical failures.";
const STRENGTH_IMPACT: &str = "You considered the impact on the people affected.";
const STRENGTH_RECOMMENDATIONS: &str = "You offered practical recommendations.";
const STRENGTH_TERMINOLOGY: &str = "You used relevant ethical and legal terminology.";
const STRENGTH_STRUCTURE: &str = "You organised your answer clearly.";

const NOTE_FAILURES_ONE: &str =
    "You named one area of failure; a strong answer identifies at least two distinct failures.";
const NOTE_FAILURES_NONE: &str =
    "Identify the specific ethical failures, such as the lack of consent or the biased matching.";
const NOTE_IMPACT: &str =
    "Explain the impact: who is affected, what harm they suffer, and what it does to trust or fairness.";
const NOTE_RECOMMENDATIONS_MORE: &str =
    "Add at least one more recommendation and state clearly what ought to happen next.";
const NOTE_RECOMMENDATIONS_NONE: &str =
    "Say what ought to have been done differently, with concrete recommendations.";
const NOTE_TERMINOLOGY: &str =
    "Use the relevant ethical and legal terminology, for example GDPR, DPIA, or consent.";
const NOTE_STRUCTURE: &str =
    "Structure your answer, for example numbered failures followed by a closing section on what ought to change.";

/// Count words: trim, split on whitespace runs, count non-empty tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Outcome of one criterion evaluator.
struct CriterionOutcome {
    points: u8,
    level: CriterionLevel,
    note: Option<&'static str>,
}

/// The three impact detector booleans, kept for the grid's re-derivation.
struct ImpactSignals {
    individuals: bool,
    harm: bool,
    trust_or_fairness: bool,
}

/// Evaluate an answer against the rubric.
///
/// The only input is the answer text; the rubric tables are read-only
/// reference data. Callers are expected to have length-capped the input
/// already (see [`crate::error::check_answer_length`]).
pub fn evaluate(rubric: &Rubric, answer: &str) -> Assessment {
    let words = word_count(answer);
    if words < GATE_WORDS {
        return Assessment::Gated(GatedAssessment {
            word_count: words,
            message: gate_message(words),
        });
    }

    let text = answer.to_lowercase();

    let failures = assess_failures(rubric, &text);
    let (impact, signals) = assess_impact(rubric, &text);
    let recommendations = assess_recommendations(rubric, &text);
    let (terminology, uses_terms) = assess_terminology(rubric, &text);
    let structure = assess_structure(rubric, &text);

    // Notes in criterion evaluation order, then length advisories.
    let mut notes: Vec<String> = Vec::new();
    for outcome in [
        &failures,
        &impact,
        &recommendations,
        &terminology,
        &structure,
    ] {
        if let Some(note) = outcome.note {
            notes.push(note.to_string());
        }
    }
    if words < ADVISORY_MIN_WORDS {
        notes.push(format!(
            "Aim for 100-250 words; at {words} words your answer is a bit short."
        ));
    }
    if words > ADVISORY_MAX_WORDS {
        notes.push(format!(
            "Aim for 100-250 words; at {words} words your answer is a bit long."
        ));
    }

    // The five criteria sum to at most 10; the clamp is a backstop.
    let total = failures.points
        + impact.points
        + recommendations.points
        + terminology.points
        + structure.points;
    let score = total.min(MAX_SCORE);

    let strengths = build_strengths(&failures, &impact, &recommendations, uses_terms, &structure);
    let tags = build_tags(&failures, &impact, &recommendations, &terminology, &structure);
    let grid = build_grid(&failures, &signals, uses_terms, &recommendations, &structure);
    let feedback = render_feedback(&notes);

    Assessment::Scored(ScoredAssessment {
        word_count: words,
        score,
        notes,
        feedback,
        strengths,
        tags,
        grid,
        frameworks: rubric.frameworks.clone(),
        model_answer: rubric.model_answer.clone(),
    })
}

fn gate_message(words: usize) -> String {
    format!(
        "Please add to your answer. You have written {words} word(s) so far; \
         at least {GATE_WORDS} are needed before it can be marked."
    )
}

/// Failures identified: 3 points across six failure themes.
fn assess_failures(rubric: &Rubric, text: &str) -> CriterionOutcome {
    let matched = rubric
        .failure_themes
        .iter()
        .filter(|theme| theme.matches(text))
        .count();

    match matched {
        0 => CriterionOutcome {
            points: 0,
            level: CriterionLevel::Missing,
            note: Some(NOTE_FAILURES_NONE),
        },
        1 => CriterionOutcome {
            points: 1,
            level: CriterionLevel::Developing,
            note: Some(NOTE_FAILURES_ONE),
        },
        _ => CriterionOutcome {
            points: 3,
            level: CriterionLevel::Secure,
            note: None,
        },
    }
}

/// Impact explained: 3 points from three independent boolean detectors.
///
/// Never scores below 1 point: an answer with zero detections still gets the
/// floor. The asymmetry with the other criteria is deliberate.
fn assess_impact(rubric: &Rubric, text: &str) -> (CriterionOutcome, ImpactSignals) {
    let individuals = contains_any(text, &rubric.individual_terms);
    let harm = contains_any(text, &rubric.harm_terms);
    let trust = contains_any(text, &rubric.trust_terms);
    let fairness = contains_any(text, &rubric.fairness_terms);

    let signals = ImpactSignals {
        individuals,
        harm,
        trust_or_fairness: trust || fairness,
    };

    let outcome = if signals.individuals && signals.harm && signals.trust_or_fairness {
        CriterionOutcome {
            points: 3,
            level: CriterionLevel::Secure,
            note: None,
        }
    } else if (signals.individuals && signals.harm) || signals.trust_or_fairness {
        CriterionOutcome {
            points: 2,
            level: CriterionLevel::Developing,
            note: None,
        }
    } else {
        CriterionOutcome {
            points: 1,
            level: CriterionLevel::Missing,
            note: Some(NOTE_IMPACT),
        }
    };

    (outcome, signals)
}

/// Recommendations: 2 points from seven theme groups plus action indicators.
fn assess_recommendations(rubric: &Rubric, text: &str) -> CriterionOutcome {
    let groups = rubric
        .recommendation_groups
        .iter()
        .filter(|group| group.matches(text))
        .count();
    let actions: usize = rubric
        .action_indicators
        .iter()
        .map(|word| word_occurrences(text, word))
        .sum();

    if groups >= 2 && actions >= 2 {
        CriterionOutcome {
            points: 2,
            level: CriterionLevel::Secure,
            note: None,
        }
    } else if groups >= 1 {
        CriterionOutcome {
            points: 1,
            level: CriterionLevel::Developing,
            note: Some(NOTE_RECOMMENDATIONS_MORE),
        }
    } else {
        CriterionOutcome {
            points: 0,
            level: CriterionLevel::Missing,
            note: Some(NOTE_RECOMMENDATIONS_NONE),
        }
    }
}

/// Ethical/legal terminology: 1 point for any term from the fixed list.
fn assess_terminology(rubric: &Rubric, text: &str) -> (CriterionOutcome, bool) {
    let uses_terms = contains_any(text, &rubric.terminology);
    let outcome = if uses_terms {
        CriterionOutcome {
            points: 1,
            level: CriterionLevel::Secure,
            note: None,
        }
    } else {
        CriterionOutcome {
            points: 0,
            level: CriterionLevel::Missing,
            note: Some(NOTE_TERMINOLOGY),
        }
    };
    (outcome, uses_terms)
}

/// Structure: 1 point for template headings, enumerated markers, or section
/// phrases. Absence reports level Developing, not Missing, while still
/// scoring 0.
fn assess_structure(rubric: &Rubric, text: &str) -> CriterionOutcome {
    let present = contains_any(text, &rubric.heading_markers)
        || contains_any(text, &rubric.enumeration_markers)
        || contains_any(text, &rubric.section_phrases);

    if present {
        CriterionOutcome {
            points: 1,
            level: CriterionLevel::Secure,
            note: None,
        }
    } else {
        CriterionOutcome {
            points: 0,
            level: CriterionLevel::Developing,
            note: Some(NOTE_STRUCTURE),
        }
    }
}

/// Strengths in fixed check order, truncated to the first three.
fn build_strengths(
    failures: &CriterionOutcome,
    impact: &CriterionOutcome,
    recommendations: &CriterionOutcome,
    uses_terms: bool,
    structure: &CriterionOutcome,
) -> Vec<String> {
    let mut strengths = Vec::new();
    if failures.level == CriterionLevel::Secure {
        strengths.push(STRENGTH_FAILURES.to_string());
    }
    if impact.level >= CriterionLevel::Developing {
        strengths.push(STRENGTH_IMPACT.to_string());
    }
    if recommendations.level >= CriterionLevel::Developing {
        strengths.push(STRENGTH_RECOMMENDATIONS.to_string());
    }
    if uses_terms {
        strengths.push(STRENGTH_TERMINOLOGY.to_string());
    }
    if structure.level == CriterionLevel::Secure {
        strengths.push(STRENGTH_STRUCTURE.to_string());
    }
    strengths.truncate(3);
    strengths
}

/// The five fixed dimension tags.
fn build_tags(
    failures: &CriterionOutcome,
    impact: &CriterionOutcome,
    recommendations: &CriterionOutcome,
    terminology: &CriterionOutcome,
    structure: &CriterionOutcome,
) -> Vec<DimensionTag> {
    let tag = |dimension: &str, level: CriterionLevel| DimensionTag {
        dimension: dimension.to_string(),
        status: TagStatus::from(level),
    };
    vec![
        tag("Ethical awareness", failures.level.max(impact.level)),
        tag("Legal awareness", terminology.level),
        tag("Impact evaluation", impact.level),
        tag("Practical judgement", recommendations.level),
        tag("Structure & clarity", structure.level),
    ]
}

/// The five fixed diagnostic grid rows.
///
/// The legal and impact rows use their own derivations instead of the level
/// variables the tags use. The two presentations are allowed to diverge;
/// do not unify these with the tag derivations.
fn build_grid(
    failures: &CriterionOutcome,
    signals: &ImpactSignals,
    uses_terms: bool,
    recommendations: &CriterionOutcome,
    structure: &CriterionOutcome,
) -> Vec<GridRow> {
    let row = |dimension: &str, status: CriterionLevel| GridRow {
        dimension: dimension.to_string(),
        status,
    };
    vec![
        row("ethical", failures.level),
        row("impact", grid_impact_level(signals)),
        row("legal", grid_legal_level(uses_terms)),
        row("recs", recommendations.level),
        row("structure", structure.level),
    ]
}

/// Grid-only impact derivation, re-derived from the three detector booleans.
fn grid_impact_level(signals: &ImpactSignals) -> CriterionLevel {
    if signals.individuals && signals.harm && signals.trust_or_fairness {
        CriterionLevel::Secure
    } else if (signals.individuals && signals.harm) || signals.trust_or_fairness {
        CriterionLevel::Developing
    } else {
        CriterionLevel::Missing
    }
}

/// Grid-only legal derivation, reading the uses-terms boolean directly.
fn grid_legal_level(uses_terms: bool) -> CriterionLevel {
    if uses_terms {
        CriterionLevel::Secure
    } else {
        CriterionLevel::Missing
    }
}

fn render_feedback(notes: &[String]) -> String {
    if notes.is_empty() {
        return COMMENDATION.to_string();
    }
    let mut feedback = String::from("To improve:");
    for note in notes {
        feedback.push_str("\n- ");
        feedback.push_str(note);
    }
    feedback
}

fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| text.contains(t.as_str()))
}

/// Count whole-word occurrences of `needle` (which may be a multi-word
/// phrase) in `text`. A match is rejected when flanked by an alphanumeric
/// character, so "should" does not match inside "shoulder".
fn word_occurrences(text: &str, needle: &str) -> usize {
    let mut count = 0;
    let mut offset = 0;
    while let Some(pos) = text[offset..].find(needle) {
        let start = offset + pos;
        let end = start + needle.len();
        let boundary_before = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let boundary_after = text[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if boundary_before && boundary_after {
            count += 1;
        }
        offset = end;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TagStatus;

    fn rubric() -> Rubric {
        Rubric::standard()
    }

    /// Just over the gate, every criterion satisfied.
    const FULL_MARKS_ANSWER: &str = "\
1) Residents were never asked for consent and there was no transparency at all \
about the new system or its purpose. \
2) The matching shows clear bias, the lack of fairness causes real harm to \
residents, and the whole scheme undermines trust in the association. \
3) The association should consult residents, carry out a DPIA, and take \
prompt action.";

    /// Just over the gate with no rubric keywords and no structure markers.
    const KEYWORD_FREE_ANSWER: &str = "\
The weather on Tuesday was cold and grey, and the bus arrived late again. I \
bought coffee near the station and watched the pigeons argue over crumbs. \
Later the rain eased, so we walked along the canal, counting boats until the \
light faded. Nothing about that slow afternoon was unusual, yet the walk felt \
calm and pleasantly quiet indeed.";

    #[test]
    fn empty_answer_is_gated() {
        let result = evaluate(&rubric(), "");
        match result {
            Assessment::Gated(g) => {
                assert_eq!(g.word_count, 0);
                assert!(g.message.contains("Please add to your answer."));
            }
            Assessment::Scored(_) => panic!("empty answer must be gated"),
        }
    }

    #[test]
    fn forty_nine_words_gated_fifty_scored() {
        let word = "pleasant ";
        let forty_nine = word.repeat(49);
        let fifty = word.repeat(50);
        assert!(evaluate(&rubric(), &forty_nine).is_gated());
        assert!(!evaluate(&rubric(), &fifty).is_gated());
    }

    #[test]
    fn word_count_collapses_whitespace() {
        assert_eq!(word_count("a  b   c"), 3);
        assert_eq!(word_count("  leading and trailing  "), 3);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \t\n  "), 0);
    }

    #[test]
    fn full_marks_scenario() {
        let r = rubric();
        assert!(word_count(FULL_MARKS_ANSWER) >= 50);
        let result = evaluate(&r, FULL_MARKS_ANSWER);
        let scored = result.as_scored().expect("must clear the gate");
        assert_eq!(scored.score, 10);
        assert_eq!(scored.strengths.len(), 3);
        assert!(scored.tags.iter().all(|t| t.status == TagStatus::Ok));
        assert_eq!(scored.model_answer, r.model_answer);
        assert_eq!(scored.frameworks, r.frameworks);
    }

    #[test]
    fn keyword_free_answer_scores_the_impact_floor() {
        let result = evaluate(&rubric(), KEYWORD_FREE_ANSWER);
        let scored = result.as_scored().expect("must clear the gate");
        assert_eq!(scored.score, 1, "only the impact floor should score");
        assert!(scored.feedback.starts_with("To improve:"));
        for note in [
            NOTE_FAILURES_NONE,
            NOTE_IMPACT,
            NOTE_RECOMMENDATIONS_NONE,
            NOTE_TERMINOLOGY,
            NOTE_STRUCTURE,
        ] {
            assert!(
                scored.notes.iter().any(|n| n == note),
                "missing note: {note}"
            );
        }
    }

    #[test]
    fn keyword_free_answer_grid_and_tags() {
        let result = evaluate(&rubric(), KEYWORD_FREE_ANSWER);
        let scored = result.as_scored().unwrap();

        let grid_status = |dim: &str| {
            scored
                .grid
                .iter()
                .find(|row| row.dimension == dim)
                .unwrap()
                .status
        };
        assert_eq!(grid_status("ethical"), CriterionLevel::Missing);
        assert_eq!(grid_status("impact"), CriterionLevel::Missing);
        assert_eq!(grid_status("legal"), CriterionLevel::Missing);
        assert_eq!(grid_status("recs"), CriterionLevel::Missing);
        // Structure absence reports Developing in both views.
        assert_eq!(grid_status("structure"), CriterionLevel::Developing);

        let tag_status = |dim: &str| {
            scored
                .tags
                .iter()
                .find(|tag| tag.dimension == dim)
                .unwrap()
                .status
        };
        // The impact tag reflects the floor's Missing level even though the
        // criterion scored a point.
        assert_eq!(tag_status("Impact evaluation"), TagStatus::Bad);
        assert_eq!(tag_status("Structure & clarity"), TagStatus::Mid);
    }

    #[test]
    fn failures_criterion_is_monotonic() {
        let r = rubric();
        let base = evaluate(&r, KEYWORD_FREE_ANSWER);
        let base_scored = base.as_scored().unwrap();

        // Two failure-theme triggers that are neither terminology nor
        // recommendation nor impact triggers.
        let extended = format!(
            "{KEYWORD_FREE_ANSWER} The scheme produced repeated misidentification \
             plus indefinite retention of templates."
        );
        let extended_scored = evaluate(&r, &extended);
        let extended_scored = extended_scored.as_scored().unwrap();

        assert_eq!(
            base_scored
                .grid
                .iter()
                .find(|row| row.dimension == "ethical")
                .unwrap()
                .status,
            CriterionLevel::Missing
        );
        assert_eq!(
            extended_scored
                .grid
                .iter()
                .find(|row| row.dimension == "ethical")
                .unwrap()
                .status,
            CriterionLevel::Secure
        );
        assert_eq!(extended_scored.score, base_scored.score + 3);
    }

    #[test]
    fn one_failure_theme_scores_one_point() {
        let padding = "pleasant ".repeat(55);
        let answer = format!("{padding} the misidentification was the problem");
        let scored = evaluate(&rubric(), &answer);
        let scored = scored.as_scored().unwrap();
        assert!(scored.notes.iter().any(|n| n == NOTE_FAILURES_ONE));
        assert_eq!(
            scored
                .grid
                .iter()
                .find(|row| row.dimension == "ethical")
                .unwrap()
                .status,
            CriterionLevel::Developing
        );
    }

    #[test]
    fn impact_developing_when_only_trust_mentioned() {
        let padding = "pleasant ".repeat(55);
        let answer = format!("{padding} everything rests on trust");
        let scored = evaluate(&rubric(), &answer);
        let scored = scored.as_scored().unwrap();
        assert_eq!(
            scored
                .tags
                .iter()
                .find(|t| t.dimension == "Impact evaluation")
                .unwrap()
                .status,
            TagStatus::Mid
        );
        assert!(!scored.notes.iter().any(|n| n == NOTE_IMPACT));
    }

    #[test]
    fn model_answer_earns_full_marks() {
        let r = rubric();
        let result = evaluate(&r, &r.model_answer);
        let scored = result.as_scored().expect("model answer clears the gate");
        assert_eq!(scored.score, 10);
        assert!(scored.notes.is_empty());
        assert_eq!(scored.feedback, COMMENDATION);
    }

    #[test]
    fn short_answer_gets_length_advisory() {
        let result = evaluate(&rubric(), KEYWORD_FREE_ANSWER);
        let scored = result.as_scored().unwrap();
        assert!(scored
            .notes
            .iter()
            .any(|n| n.contains("a bit short")));
    }

    #[test]
    fn long_answer_gets_length_advisory() {
        let r = rubric();
        let padding = " The canal path stayed quiet while we kept walking north.".repeat(30);
        let answer = format!("{}{}", r.model_answer, padding);
        assert!(word_count(&answer) > 250);
        let result = evaluate(&r, &answer);
        let scored = result.as_scored().unwrap();
        assert_eq!(scored.score, 10);
        assert!(scored.notes.iter().any(|n| n.contains("a bit long")));
        assert!(scored.feedback.starts_with("To improve:"));
    }

    #[test]
    fn evaluation_is_idempotent() {
        let r = rubric();
        for answer in [FULL_MARKS_ANSWER, KEYWORD_FREE_ANSWER, ""] {
            assert_eq!(evaluate(&r, answer), evaluate(&r, answer));
        }
    }

    #[test]
    fn score_stays_in_range() {
        let r = rubric();
        let inputs = [
            FULL_MARKS_ANSWER.to_string(),
            KEYWORD_FREE_ANSWER.to_string(),
            r.model_answer.clone(),
            "pleasant ".repeat(300),
        ];
        for answer in &inputs {
            if let Some(score) = evaluate(&r, answer).score() {
                assert!(score <= 10, "score {score} out of range");
            }
        }
    }

    #[test]
    fn word_occurrences_respects_boundaries() {
        assert_eq!(word_occurrences("we should carry shoulder bags", "should"), 1);
        assert_eq!(word_occurrences("shoulder shoulders", "should"), 0);
        assert_eq!(word_occurrences("they need to act, and we need to too", "need to"), 2);
        assert_eq!(word_occurrences("kneed topiary", "need to"), 0);
        assert_eq!(word_occurrences("action! more action.", "action"), 2);
    }

    #[test]
    fn case_insensitive_matching() {
        let padding = "pleasant ".repeat(55);
        let answer = format!("{padding} CONSENT and TRANSPARENCY and BIAS were ignored");
        let scored = evaluate(&rubric(), &answer);
        let scored = scored.as_scored().unwrap();
        assert_eq!(
            scored
                .grid
                .iter()
                .find(|row| row.dimension == "ethical")
                .unwrap()
                .status,
            CriterionLevel::Secure
        );
    }
}
