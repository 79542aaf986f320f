//! Fixed chat texts sent around an evaluation cycle.

use crate::feedback::FeedbackReport;

/// Label of the keyboard button that requests the question.
pub const QUESTION_BUTTON: &str = "🎤 Получить вопрос";

/// Sent for free text while no question is pending.
pub const NUDGE_PRESS_BUTTON: &str = "Нажми 'Получить вопрос', чтобы начать.";

/// Sent for a voice message while no question is pending.
pub const NOT_AWAITING_RESPONSE: &str = "Сначала нажми 'Получить вопрос'.";

/// Sent when a voice message could not be processed.
pub const PROCESSING_FAILED: &str = "Не удалось обработать ответ. Попробуй еще раз.";

/// Shown while the voice message is being recognized.
pub const PROCESSING: &str = "🎧 Обрабатываю голос...";

pub fn greeting(first_name: &str) -> String {
    format!(
        "Привет, {first_name}! Я бот для проверки знаний.\n\
         Нажми кнопку ниже, чтобы получить вопрос и ответить на него голосовым сообщением."
    )
}

pub fn question_message(prompt: &str) -> String {
    format!("Вопрос:\n\n**{prompt}**\n\nТеперь отправь свой ответ голосовым сообщением!")
}

pub fn feedback_message(report: &FeedbackReport) -> String {
    format!(
        "**Результат анализа:**\n\n{}\n\nНажми /start, чтобы попробовать еще раз.",
        report.text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_uses_first_name() {
        let text = greeting("Оля");
        assert!(text.starts_with("Привет, Оля!"));
        assert!(text.contains("голосовым сообщением"));
    }

    #[test]
    fn question_is_bold() {
        assert_eq!(
            question_message("Сколько?"),
            "Вопрос:\n\n**Сколько?**\n\nТеперь отправь свой ответ голосовым сообщением!"
        );
    }
}
