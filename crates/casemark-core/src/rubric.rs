//! The fixed marking rubric: question text, detection themes, and the
//! reference material disclosed to answers that clear the gate.
//!
//! The rubric is declarative data, not code. Theme lists, recommendation
//! groups, and the terminology list are plain `{name, triggers}` records the
//! evaluator iterates over generically, so individual themes can be tested
//! in isolation and the content swapped without touching scoring logic.
//! All trigger strings are stored lower-case; the evaluator lower-cases the
//! answer once before matching.

use serde::{Deserialize, Serialize};

use crate::model::FrameworkNote;

/// A named cluster of alternative trigger substrings representing one way a
/// concept can be expressed in free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Stable name used in notes and tests.
    pub name: String,
    /// Lower-case trigger substrings; the theme matches if any appears.
    pub triggers: Vec<String>,
}

impl Theme {
    pub fn new(name: &str, triggers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Whether any trigger appears in the (already lower-cased) text.
    pub fn matches(&self, text: &str) -> bool {
        self.triggers.iter().any(|t| text.contains(t.as_str()))
    }
}

/// The full rubric for the fixed ethics-case question.
///
/// Built once via [`Rubric::standard`] and shared read-only across all
/// invocations of the evaluator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    /// Stable identifier for the question this rubric marks.
    pub question_id: String,
    /// The case question shown to candidates. Not interpreted by the engine.
    pub question: String,
    /// Suggested answer skeleton shown alongside the question. Not
    /// interpreted by the engine.
    pub answer_template: String,
    /// The six failure themes for the "failures identified" criterion.
    pub failure_themes: Vec<Theme>,
    /// Terms indicating the answer talks about affected individuals.
    pub individual_terms: Vec<String>,
    /// Terms indicating the answer names a concrete harm.
    pub harm_terms: Vec<String>,
    /// Terms indicating the answer touches on trust.
    pub trust_terms: Vec<String>,
    /// Terms indicating the answer touches on fairness.
    pub fairness_terms: Vec<String>,
    /// The seven recommendation theme groups.
    pub recommendation_groups: Vec<Theme>,
    /// Action-indicator words/phrases, matched whole-word.
    pub action_indicators: Vec<String>,
    /// Ethical/legal terminology list.
    pub terminology: Vec<String>,
    /// Template heading markers (structure criterion).
    pub heading_markers: Vec<String>,
    /// Enumerated list markers (structure criterion).
    pub enumeration_markers: Vec<String>,
    /// Section phrases echoing the question's three parts (structure
    /// criterion).
    pub section_phrases: Vec<String>,
    /// Framework reference notes disclosed once ungated.
    pub frameworks: Vec<FrameworkNote>,
    /// The fixed model answer disclosed once ungated.
    pub model_answer: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Rubric {
    /// The built-in rubric: facial-recognition door entry deployed by a
    /// housing association.
    pub fn standard() -> Self {
        Self {
            question_id: "facial-recognition-entry".into(),
            question: QUESTION.trim_start().into(),
            answer_template: ANSWER_TEMPLATE.trim_start().into(),
            failure_themes: vec![
                Theme::new(
                    "consent and transparency",
                    &[
                        "consent",
                        "transparen",
                        "informed",
                        "notice",
                        "opt-in",
                        "opt in",
                        "told",
                    ],
                ),
                Theme::new(
                    "lawful basis and privacy",
                    &[
                        "lawful basis",
                        "legal basis",
                        "privacy",
                        "gdpr",
                        "data protection",
                        "proportionate",
                        "proportionality",
                    ],
                ),
                Theme::new(
                    "bias and fairness",
                    &["bias", "discriminat", "fairness", "unfair"],
                ),
                Theme::new(
                    "accuracy and misidentification",
                    &[
                        "accuracy",
                        "inaccurate",
                        "false positive",
                        "false match",
                        "misidentif",
                        "error rate",
                        "fail to recognise",
                        "fail to recognize",
                    ],
                ),
                Theme::new(
                    "security and storage",
                    &[
                        "security",
                        "secure",
                        "storage",
                        "stored",
                        "retention",
                        "breach",
                        "encrypt",
                        "third party",
                        "third-party",
                    ],
                ),
                Theme::new(
                    "governance and DPIA",
                    &[
                        "dpia",
                        "impact assessment",
                        "governance",
                        "oversight",
                        "accountab",
                        "audit",
                    ],
                ),
            ],
            individual_terms: strings(&[
                "resident", "individual", "people", "person", "tenant", "occupant",
            ]),
            harm_terms: strings(&[
                "harm",
                "damage",
                "distress",
                "detriment",
                "consequence",
                "locked out",
                "denied",
                "excluded",
                "exclusion",
            ]),
            trust_terms: strings(&["trust", "confidence", "legitimacy"]),
            fairness_terms: strings(&["fair", "discriminat", "equitab", "equality"]),
            recommendation_groups: vec![
                Theme::new(
                    "consultation",
                    &["consult", "engage", "engagement", "involve"],
                ),
                Theme::new(
                    "impact assessment",
                    &["dpia", "impact assessment", "risk assessment"],
                ),
                Theme::new(
                    "less intrusive alternatives",
                    &["alternative", "less intrusive", "fob", "key card", "keycard", "keypad"],
                ),
                Theme::new(
                    "consent mechanism",
                    &["obtain consent", "seek consent", "informed consent", "opt-in", "opt in"],
                ),
                Theme::new(
                    "transparency measures",
                    &["signage", "inform", "notify", "publish", "explain"],
                ),
                Theme::new(
                    "data safeguards",
                    &[
                        "safeguard",
                        "encrypt",
                        "retention policy",
                        "delete",
                        "minimis",
                        "minimiz",
                        "access control",
                    ],
                ),
                Theme::new(
                    "review and oversight",
                    &[
                        "review",
                        "monitor",
                        "audit",
                        "oversight",
                        "appeal",
                        "human in the loop",
                        "redress",
                    ],
                ),
            ],
            action_indicators: strings(&["action", "should", "must", "need to", "recommend"]),
            terminology: strings(&[
                "gdpr",
                "dpia",
                "data protection",
                "privacy",
                "consent",
                "bias",
                "fairness",
                "transparency",
            ]),
            heading_markers: strings(&["failure 1", "failure 2"]),
            enumeration_markers: strings(&["1)", "2)", "3)"]),
            section_phrases: strings(&["key ethical", "why these failures", "what should have"]),
            frameworks: vec![
                FrameworkNote {
                    name: "UK GDPR & Data Protection Act 2018".into(),
                    expectation: "Biometric data used to identify a person is special category \
                                  data: processing needs a lawful basis, an additional condition, \
                                  transparency with the people affected, and data minimisation."
                        .into(),
                    case: "Face templates of every resident were collected with no lawful basis \
                           identified, no privacy information before go-live, and indefinite \
                           retention on a third-party service."
                        .into(),
                },
                FrameworkNote {
                    name: "ICO guidance on video surveillance and biometrics".into(),
                    expectation: "A data protection impact assessment must be completed before \
                                  deploying facial recognition in shared or public spaces, and \
                                  less intrusive alternatives considered first."
                        .into(),
                    case: "No DPIA was carried out; fobs already provided entry control, so the \
                           necessity of face recognition was never established."
                        .into(),
                },
                FrameworkNote {
                    name: "Equality Act 2010".into(),
                    expectation: "Service provision must not indirectly discriminate against \
                                  people with protected characteristics."
                        .into(),
                    case: "Higher false-rejection rates for residents with darker skin tones \
                           meant some were repeatedly locked out of their own homes."
                        .into(),
                },
                FrameworkNote {
                    name: "Surveillance Camera Code of Practice".into(),
                    expectation: "Surveillance in residential settings should be necessary, \
                                  proportionate, and subject to ongoing review and clear \
                                  accountability."
                        .into(),
                    case: "Continuous entry/exit logging of all residents was switched on with \
                           no stated purpose, review schedule, or accountable owner."
                        .into(),
                },
            ],
            model_answer: MODEL_ANSWER.trim_start().into(),
        }
    }
}

const QUESTION: &str = "
Riverside Housing Association has replaced the key fobs on its residential
blocks with facial recognition cameras at every entrance. Residents were not
asked beforehand; a small notice appeared in each lobby a week after the
cameras went live. The system logs every entry and exit, keeps face templates
indefinitely on a third-party cloud service, and has repeatedly failed to
recognise several residents with darker skin tones, locking them out of their
homes.

Identify the key ethical failures in this deployment, explain why these
failures matter for the people affected, and set out what should have been
done differently.
";

const ANSWER_TEMPLATE: &str = "
Failure 1: ...

Failure 2: ...

Why these failures matter: ...

What should have been done: ...
";

const MODEL_ANSWER: &str = "
Failure 1: residents were given no notice and no choice. Collecting face
templates without consent or any transparency about purpose and retention
strips people of control over their own biometric data, and no lawful basis
was identified under data protection law before processing began.

Failure 2: the system is inaccurate in a way that is also unfair. Repeated
misidentification of residents with darker skin tones is a known failure mode
of facial recognition, and here the bias has a direct consequence: people are
locked out of their own homes. That is discriminatory harm, not an
inconvenience.

Failure 3: there was no governance around the data. Indefinite retention of
face templates on a third-party service, with continuous entry and exit
logging, creates a serious security exposure that nobody assessed; no DPIA
was carried out.

Why these failures matter: residents cannot opt out of where they live. Harm
falls on the very individuals the system is meant to serve, and every failure
erodes trust between residents and the association.

What should have been done: the association should have consulted residents
first and completed a DPIA before procurement. It must offer a less intrusive
alternative such as keeping the fob system, obtain informed consent for any
biometric option, set a strict retention policy with encryption, and review
accuracy and complaints regularly with a clear route of appeal.
";
