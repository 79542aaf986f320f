//! Keyword-overlap answer evaluation.
//!
//! Scoring is recall-only: the response is reduced to a set of lower-cased
//! tokens and the score is the share of reference keywords found in it.
//! Extra words never lower the score.

use std::collections::HashSet;

use crate::model::{EvaluationResult, Question, Score};

/// Grade `recognized_text` against the question's reference keywords.
///
/// Total for every input, including the empty string.
pub fn evaluate(recognized_text: &str, question: &Question) -> EvaluationResult {
    let lowered = recognized_text.to_lowercase();
    let user_tokens: HashSet<&str> = lowered.split_whitespace().collect();

    let (matched_keywords, missing_keywords): (Vec<String>, Vec<String>) = question
        .reference_keywords()
        .iter()
        .cloned()
        .partition(|keyword| user_tokens.contains(keyword.as_str()));

    let correctness_score = Score::new(
        matched_keywords.len(),
        question.reference_keywords().len(),
    );

    tracing::debug!(
        matched = matched_keywords.len(),
        missing = missing_keywords.len(),
        score = correctness_score.value(),
        "evaluated response"
    );

    EvaluationResult {
        matched_keywords,
        missing_keywords,
        correctness_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn python_types() -> Question {
        Question::default()
    }

    #[test]
    fn full_answer_scores_one() {
        let result = evaluate("числа строки списки кортежи словари", &python_types());
        assert_eq!(result.matched_keywords.len(), 5);
        assert!(result.missing_keywords.is_empty());
        assert_eq!(result.correctness_score.value(), 1.0);
    }

    #[test]
    fn missing_tuples_scores_point_eight() {
        let result = evaluate("числа строки списки словари", &python_types());
        assert_eq!(result.matched_keywords.len(), 4);
        assert_eq!(result.missing_keywords, vec!["кортежи"]);
        assert_eq!(result.correctness_score.value(), 0.8);
    }

    #[test]
    fn wrong_answer_scores_zero() {
        let result = evaluate("я не знаю", &python_types());
        assert!(result.matched_keywords.is_empty());
        assert_eq!(result.missing_keywords.len(), 5);
        assert!(result.correctness_score.is_zero());
    }

    #[test]
    fn substituted_keyword_is_reported_missing() {
        let result = evaluate("числа строки списки кортежи множества", &python_types());
        assert_eq!(result.missing_keywords, vec!["словари"]);
        assert_eq!(result.correctness_score.percent(), 80);
    }

    #[test]
    fn empty_text_is_graded_not_rejected() {
        let result = evaluate("", &python_types());
        assert_eq!(result.correctness_score.value(), 0.0);
        assert_eq!(result.missing_keywords.len(), 5);
    }

    #[test]
    fn case_duplicates_and_extra_words_do_not_matter() {
        let q = Question::new("?", "alpha beta").unwrap();
        let result = evaluate("ALPHA alpha  gamma delta epsilon BETA", &q);
        assert!(result.correctness_score.is_perfect());
    }

    #[test]
    fn punctuation_is_not_stripped() {
        let q = Question::new("?", "alpha beta").unwrap();
        let result = evaluate("alpha, beta.", &q);
        assert!(result.correctness_score.is_zero());
    }

    #[test]
    fn matched_and_missing_partition_the_reference() {
        let q = Question::new("?", "a b c d e f g").unwrap();
        let responses = ["", "a", "a c e g", "g f e d c b a", "x y z", "b b b d"];

        for text in responses {
            let result = evaluate(text, &q);
            let matched: HashSet<&String> = result.matched_keywords.iter().collect();
            let missing: HashSet<&String> = result.missing_keywords.iter().collect();
            let reference: HashSet<&String> = q.reference_keywords().iter().collect();

            assert!(matched.is_disjoint(&missing), "overlap for {text:?}");
            let union: HashSet<&String> = matched.union(&missing).copied().collect();
            assert_eq!(union, reference, "union mismatch for {text:?}");

            let value = result.correctness_score.value();
            assert!((0.0..=1.0).contains(&value));
            assert_eq!(value == 1.0, missing.is_empty());
            assert_eq!(value == 0.0, matched.is_empty());
        }
    }

    #[test]
    fn evaluation_is_idempotent() {
        let q = python_types();
        let first = evaluate("Числа списки и словари", &q);
        let second = evaluate("Числа списки и словари", &q);
        assert_eq!(first, second);
    }
}
