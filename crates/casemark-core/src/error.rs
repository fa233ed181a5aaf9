//! Submission validation errors.
//!
//! The evaluator itself accepts any string and never fails; rejecting
//! oversized payloads is the hosting layer's job, done before the text
//! reaches the engine. The check lives here so every host applies the same
//! rule.

use thiserror::Error;

/// Recommended maximum answer length in characters.
pub const DEFAULT_MAX_ANSWER_CHARS: usize = 6000;

/// Errors raised while validating a submission before evaluation.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The answer exceeds the configured character cap.
    #[error("answer is {len} characters, over the {max} character limit")]
    TooLong { len: usize, max: usize },
}

/// Reject answers over `max` characters (counted as Unicode scalar values).
pub fn check_answer_length(answer: &str, max: usize) -> Result<(), SubmissionError> {
    let len = answer.chars().count();
    if len > max {
        return Err(SubmissionError::TooLong { len, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_answers_at_the_cap() {
        let answer = "a".repeat(DEFAULT_MAX_ANSWER_CHARS);
        assert!(check_answer_length(&answer, DEFAULT_MAX_ANSWER_CHARS).is_ok());
    }

    #[test]
    fn rejects_answers_over_the_cap() {
        let answer = "a".repeat(DEFAULT_MAX_ANSWER_CHARS + 1);
        let err = check_answer_length(&answer, DEFAULT_MAX_ANSWER_CHARS).unwrap_err();
        assert!(err.to_string().contains("6001 characters"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let answer = "é".repeat(10);
        assert!(check_answer_length(&answer, 10).is_ok());
        assert!(check_answer_length(&answer, 9).is_err());
    }
}
