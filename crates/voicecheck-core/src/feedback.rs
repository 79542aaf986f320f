//! Feedback composition.
//!
//! Renders the evaluation and confidence assessment into the Markdown block
//! sent back to the user.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{ConfidenceAssessment, EvaluationResult, Question, Score};

/// Verdict band for a correctness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    /// Every reference keyword was found.
    AllCorrect,
    /// More than half but not all keywords were found.
    Partial,
    /// Half or fewer keywords were found.
    Incorrect,
}

impl FeedbackTier {
    pub fn from_score(score: Score) -> Self {
        if score.is_perfect() {
            FeedbackTier::AllCorrect
        } else if score.exceeds_half() {
            FeedbackTier::Partial
        } else {
            FeedbackTier::Incorrect
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            FeedbackTier::AllCorrect => "✅ Отличный ответ! Все верно.",
            FeedbackTier::Partial => "⚠️ Неплохо, но есть неточности.",
            FeedbackTier::Incorrect => "❌ Ответ неверный или очень неточный.",
        }
    }
}

/// The terminal artifact of one evaluation cycle.
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackReport {
    pub cycle_id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub recognized_text: String,
    pub tier: FeedbackTier,
    pub evaluation: EvaluationResult,
    pub confidence: ConfidenceAssessment,
    /// Rendered Markdown report.
    pub text: String,
}

/// Build the report for one response.
pub fn compose(
    recognized_text: String,
    evaluation: EvaluationResult,
    confidence: ConfidenceAssessment,
    question: &Question,
) -> FeedbackReport {
    let tier = FeedbackTier::from_score(evaluation.correctness_score);
    let text = render(&recognized_text, &evaluation, &confidence, question);

    FeedbackReport {
        cycle_id: Uuid::new_v4(),
        evaluated_at: Utc::now(),
        recognized_text,
        tier,
        evaluation,
        confidence,
        text,
    }
}

/// Render the Markdown body.
///
/// Field order: recognized text, percentage, verdict, missing or expected
/// keywords, speech narrative, confidence label.
pub fn render(
    recognized_text: &str,
    evaluation: &EvaluationResult,
    confidence: &ConfidenceAssessment,
    question: &Question,
) -> String {
    let score = evaluation.correctness_score;
    let tier = FeedbackTier::from_score(score);

    let mut text = format!("*Распознанный текст:* {recognized_text}\n\n");
    text.push_str(&format!("*Правильность ответа:* {}%\n", score.percent()));
    text.push_str(tier.verdict());
    text.push('\n');

    match tier {
        FeedbackTier::AllCorrect => {}
        FeedbackTier::Partial => {
            if !evaluation.missing_keywords.is_empty() {
                text.push_str(&format!(
                    "*Не хватило:* {}\n",
                    evaluation.missing_keywords.join(", ")
                ));
            }
        }
        FeedbackTier::Incorrect => {
            text.push_str(&format!("*Ждали:* {}\n", question.expected_listing()));
        }
    }

    text.push_str(&format!(
        "\n*Анализ речи:* Вы ответили {}.\n",
        confidence.exemplar_phrase
    ));
    text.push_str(&format!("*Уровень уверенности:* {}", confidence.level));

    text
}
