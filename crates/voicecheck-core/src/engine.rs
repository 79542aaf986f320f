//! Quiz engine orchestrator.
//!
//! Dispatches inbound chat events against the per-user session state and
//! runs the recognize → evaluate → assess → compose cycle for accepted
//! responses.

use std::sync::Arc;

use crate::confidence::assess_confidence;
use crate::error::QuizError;
use crate::evaluator::evaluate;
use crate::feedback::{compose, FeedbackReport};
use crate::model::{AudioHandle, ConfidencePhrases, Question, UserId};
use crate::replies;
use crate::session::{SessionState, SessionStore};
use crate::traits::{ExemplarPicker, Recognizer};

/// An event delivered by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The `/start` command.
    Start { first_name: String },
    /// The question button was pressed.
    RequestQuestion,
    /// A voice message arrived.
    SubmitResponse(AudioHandle),
    /// Any other text message.
    OtherText(String),
}

impl InboundEvent {
    /// Classify a plain text message. Only the exact button label requests
    /// the question.
    pub fn from_text(text: &str) -> Self {
        if text == replies::QUESTION_BUTTON {
            InboundEvent::RequestQuestion
        } else {
            InboundEvent::OtherText(text.to_string())
        }
    }
}

/// What the transport should send back.
#[derive(Debug, Clone)]
pub enum OutboundReply {
    Greeting(String),
    Question(String),
    /// Informational prompt; not a failure.
    Nudge(&'static str),
    /// The event could not be processed.
    Failure(&'static str),
    Feedback(Box<FeedbackReport>),
}

impl OutboundReply {
    /// The chat message body for this reply.
    pub fn text(&self) -> String {
        match self {
            OutboundReply::Greeting(text) | OutboundReply::Question(text) => text.clone(),
            OutboundReply::Nudge(text) | OutboundReply::Failure(text) => text.to_string(),
            OutboundReply::Feedback(report) => replies::feedback_message(report),
        }
    }
}

/// Observer for evaluation cycles.
pub trait CycleReporter: Send + Sync {
    fn on_question_issued(&self, user: UserId, previous: SessionState);
    fn on_processing(&self, user: UserId, audio: &AudioHandle);
    fn on_feedback(&self, user: UserId, report: &FeedbackReport);
    fn on_rejected(&self, user: UserId);
}

/// No-op cycle reporter.
pub struct NoopReporter;

impl CycleReporter for NoopReporter {
    fn on_question_issued(&self, _: UserId, _: SessionState) {}
    fn on_processing(&self, _: UserId, _: &AudioHandle) {}
    fn on_feedback(&self, _: UserId, _: &FeedbackReport) {}
    fn on_rejected(&self, _: UserId) {}
}

/// The quiz engine: one question, many independent user sessions.
pub struct QuizEngine {
    question: Arc<Question>,
    phrases: ConfidencePhrases,
    sessions: SessionStore,
    recognizer: Arc<dyn Recognizer>,
    picker: Arc<dyn ExemplarPicker>,
}

impl QuizEngine {
    pub fn new(
        question: Arc<Question>,
        phrases: ConfidencePhrases,
        recognizer: Arc<dyn Recognizer>,
        picker: Arc<dyn ExemplarPicker>,
    ) -> Self {
        Self {
            question,
            phrases,
            sessions: SessionStore::new(),
            recognizer,
            picker,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    pub fn session_state(&self, user: UserId) -> SessionState {
        self.sessions.state(user)
    }

    /// Put the user into `AwaitingResponse` and return the prompt.
    pub fn request_question(&self, user: UserId) -> &str {
        self.request_question_with(user, &NoopReporter)
    }

    fn request_question_with(&self, user: UserId, reporter: &dyn CycleReporter) -> &str {
        let previous = self.sessions.request_question(user);
        tracing::info!(user = %user, ?previous, "question issued");
        reporter.on_question_issued(user, previous);
        self.question.prompt()
    }

    /// Accept a voice response if one is pending and grade it.
    pub async fn submit_response(
        &self,
        user: UserId,
        audio: &AudioHandle,
    ) -> Result<FeedbackReport, QuizError> {
        self.submit_response_with(user, audio, &NoopReporter).await
    }

    /// Like [`submit_response`](Self::submit_response), notifying `reporter`.
    pub async fn submit_response_with(
        &self,
        user: UserId,
        audio: &AudioHandle,
        reporter: &dyn CycleReporter,
    ) -> Result<FeedbackReport, QuizError> {
        // Clear the pending flag before recognition suspends.
        if let Err(e) = self.sessions.begin_response(user) {
            tracing::info!(user = %user, "response rejected: no pending question");
            reporter.on_rejected(user);
            return Err(e);
        }

        reporter.on_processing(user, audio);
        let recognized = self.recognizer.recognize(audio).await;
        tracing::debug!(
            user = %user,
            recognizer = self.recognizer.name(),
            audio = %audio,
            text = %recognized,
            "recognized response"
        );

        let report = self.evaluate_text(recognized);
        tracing::info!(
            user = %user,
            cycle_id = %report.cycle_id,
            score = report.evaluation.correctness_score.value(),
            level = %report.confidence.level,
            "response evaluated"
        );
        reporter.on_feedback(user, &report);
        Ok(report)
    }

    /// Grade already-recognized text. Does not touch any session.
    pub fn evaluate_text(&self, recognized: impl Into<String>) -> FeedbackReport {
        let recognized = recognized.into();
        let evaluation = evaluate(&recognized, &self.question);
        let confidence = assess_confidence(
            evaluation.correctness_score.value(),
            &self.phrases,
            self.picker.as_ref(),
        );
        compose(recognized, evaluation, confidence, &self.question)
    }

    /// Dispatch one transport event and produce the reply.
    pub async fn handle(
        &self,
        user: UserId,
        event: InboundEvent,
        reporter: &dyn CycleReporter,
    ) -> OutboundReply {
        match event {
            InboundEvent::Start { first_name } => {
                OutboundReply::Greeting(replies::greeting(&first_name))
            }
            InboundEvent::RequestQuestion => {
                let prompt = self.request_question_with(user, reporter);
                OutboundReply::Question(replies::question_message(prompt))
            }
            InboundEvent::SubmitResponse(audio) => {
                match self.submit_response_with(user, &audio, reporter).await {
                    Ok(report) => OutboundReply::Feedback(Box::new(report)),
                    Err(e) => error_reply(user, &e),
                }
            }
            InboundEvent::OtherText(_) => OutboundReply::Nudge(replies::NUDGE_PRESS_BUTTON),
        }
    }

    /// Drop the user's session, as when their chat context ends.
    pub fn end_session(&self, user: UserId) {
        self.sessions.end(user);
    }
}

/// Reply for a failed submission.
fn error_reply(user: UserId, error: &QuizError) -> OutboundReply {
    if error.is_recoverable() {
        OutboundReply::Nudge(replies::NOT_AWAITING_RESPONSE)
    } else {
        tracing::error!(user = %user, error = %error, "response could not be processed");
        OutboundReply::Failure(replies::PROCESSING_FAILED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::feedback::FeedbackTier;
    use crate::model::ConfidenceLevel;
    use crate::traits::FirstExemplarPicker;

    const USER: UserId = UserId(100);

    struct ScriptedRecognizer {
        text: String,
        delay: Duration,
        calls: AtomicU32,
    }

    impl ScriptedRecognizer {
        fn new(text: &str) -> Self {
            Self {
                text: text.into(),
                delay: Duration::ZERO,
                calls: AtomicU32::new(0),
            }
        }

        fn slow(text: &str, delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(text)
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Recognizer for ScriptedRecognizer {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn recognize(&self, _audio: &AudioHandle) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.text.clone()
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl CycleReporter for RecordingReporter {
        fn on_question_issued(&self, user: UserId, previous: SessionState) {
            self.events
                .lock()
                .unwrap()
                .push(format!("question {user} {previous:?}"));
        }
        fn on_processing(&self, user: UserId, audio: &AudioHandle) {
            self.events
                .lock()
                .unwrap()
                .push(format!("processing {user} {audio}"));
        }
        fn on_feedback(&self, user: UserId, report: &FeedbackReport) {
            self.events
                .lock()
                .unwrap()
                .push(format!("feedback {user} {:?}", report.tier));
        }
        fn on_rejected(&self, user: UserId) {
            self.events.lock().unwrap().push(format!("rejected {user}"));
        }
    }

    fn engine_with(recognizer: Arc<ScriptedRecognizer>) -> QuizEngine {
        QuizEngine::new(
            Arc::new(Question::default()),
            ConfidencePhrases::default(),
            recognizer,
            Arc::new(FirstExemplarPicker),
        )
    }

    fn voice() -> AudioHandle {
        AudioHandle::new("voice-1")
    }

    #[tokio::test]
    async fn full_cycle_partial_answer() {
        let recognizer = Arc::new(ScriptedRecognizer::new("числа строки списки словари"));
        let engine = engine_with(recognizer.clone());

        assert_eq!(engine.request_question(USER), Question::default().prompt());
        assert_eq!(engine.session_state(USER), SessionState::AwaitingResponse);

        let report = engine.submit_response(USER, &voice()).await.unwrap();
        assert_eq!(report.tier, FeedbackTier::Partial);
        assert_eq!(report.evaluation.missing_keywords, vec!["кортежи"]);
        assert_eq!(report.confidence.level, ConfidenceLevel::High);
        assert_eq!(engine.session_state(USER), SessionState::Idle);
        assert_eq!(recognizer.calls(), 1);
    }

    #[tokio::test]
    async fn second_submission_is_rejected() {
        let recognizer = Arc::new(ScriptedRecognizer::new("я не знаю"));
        let engine = engine_with(recognizer.clone());

        engine.request_question(USER);
        let report = engine.submit_response(USER, &voice()).await.unwrap();
        assert_eq!(report.tier, FeedbackTier::Incorrect);
        assert_eq!(report.confidence.level, ConfidenceLevel::Low);

        let err = engine.submit_response(USER, &voice()).await.unwrap_err();
        assert_eq!(err, QuizError::NotAwaitingResponse { user: USER });
        assert_eq!(recognizer.calls(), 1);
    }

    #[tokio::test]
    async fn submission_without_question_does_not_recognize() {
        let recognizer = Arc::new(ScriptedRecognizer::new("числа"));
        let engine = engine_with(recognizer.clone());

        assert!(engine.submit_response(USER, &voice()).await.is_err());
        assert_eq!(recognizer.calls(), 0);
    }

    #[tokio::test]
    async fn repeated_question_request_evaluates_nothing() {
        let recognizer = Arc::new(ScriptedRecognizer::new("числа"));
        let engine = engine_with(recognizer.clone());

        engine.request_question(USER);
        engine.request_question(USER);
        assert_eq!(engine.session_state(USER), SessionState::AwaitingResponse);
        assert_eq!(recognizer.calls(), 0);

        engine.submit_response(USER, &voice()).await.unwrap();
        assert!(engine.submit_response(USER, &voice()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_submissions_evaluate_once() {
        let recognizer = Arc::new(ScriptedRecognizer::slow(
            "числа строки списки кортежи словари",
            Duration::from_secs(2),
        ));
        let engine = engine_with(recognizer.clone());
        engine.request_question(USER);

        let first = voice();
        let second = AudioHandle::new("voice-2");
        let (a, b) = futures::join!(
            engine.submit_response(USER, &first),
            engine.submit_response(USER, &second)
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(recognizer.calls(), 1);
        assert_eq!(engine.session_state(USER), SessionState::Idle);
    }

    #[tokio::test]
    async fn users_do_not_share_sessions() {
        let recognizer = Arc::new(ScriptedRecognizer::new("числа строки списки кортежи словари"));
        let engine = engine_with(recognizer);
        let other = UserId(200);

        engine.request_question(USER);
        assert!(engine.submit_response(other, &voice()).await.is_err());
        let report = engine.submit_response(USER, &voice()).await.unwrap();
        assert_eq!(report.tier, FeedbackTier::AllCorrect);
    }

    #[tokio::test]
    async fn handle_dispatches_events() {
        let recognizer = Arc::new(ScriptedRecognizer::new("числа строки списки кортежи словари"));
        let engine = engine_with(recognizer);
        let reporter = RecordingReporter::default();

        let reply = engine
            .handle(
                USER,
                InboundEvent::Start {
                    first_name: "Оля".into(),
                },
                &reporter,
            )
            .await;
        assert!(matches!(reply, OutboundReply::Greeting(ref t) if t.starts_with("Привет, Оля!")));
        assert_eq!(engine.session_state(USER), SessionState::Idle);

        let reply = engine
            .handle(USER, InboundEvent::OtherText("привет".into()), &reporter)
            .await;
        assert_eq!(reply.text(), replies::NUDGE_PRESS_BUTTON);

        let reply = engine
            .handle(USER, InboundEvent::SubmitResponse(voice()), &reporter)
            .await;
        assert_eq!(reply.text(), replies::NOT_AWAITING_RESPONSE);

        let reply = engine
            .handle(USER, InboundEvent::from_text(replies::QUESTION_BUTTON), &reporter)
            .await;
        assert!(reply.text().contains(Question::default().prompt()));

        let reply = engine
            .handle(USER, InboundEvent::SubmitResponse(voice()), &reporter)
            .await;
        let text = reply.text();
        assert!(text.starts_with("**Результат анализа:**\n\n*Распознанный текст:*"));
        assert!(text.contains("✅ Отличный ответ! Все верно."));
        assert!(text.ends_with("Нажми /start, чтобы попробовать еще раз."));

        assert_eq!(
            reporter.events(),
            vec![
                "rejected 100".to_string(),
                "question 100 Idle".to_string(),
                "processing 100 voice-1".to_string(),
                "feedback 100 AllCorrect".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn ending_session_drops_pending_question() {
        let engine = engine_with(Arc::new(ScriptedRecognizer::new("числа")));
        engine.request_question(USER);
        engine.end_session(USER);
        assert!(engine.submit_response(USER, &voice()).await.is_err());
    }

    #[test]
    fn evaluate_text_skips_sessions() {
        let engine = engine_with(Arc::new(ScriptedRecognizer::new("")));
        let report = engine.evaluate_text("");
        assert_eq!(report.tier, FeedbackTier::Incorrect);
        assert_eq!(engine.session_state(USER), SessionState::Idle);
    }

    #[test]
    fn button_text_is_classified() {
        assert_eq!(
            InboundEvent::from_text("🎤 Получить вопрос"),
            InboundEvent::RequestQuestion
        );
        assert_eq!(
            InboundEvent::from_text("hello"),
            InboundEvent::OtherText("hello".into())
        );
        assert_eq!(
            InboundEvent::from_text(" 🎤 Получить вопрос"),
            InboundEvent::OtherText(" 🎤 Получить вопрос".into())
        );
    }

    #[test]
    fn only_recoverable_errors_become_nudges() {
        let reply = error_reply(USER, &QuizError::NotAwaitingResponse { user: USER });
        assert!(matches!(reply, OutboundReply::Nudge(replies::NOT_AWAITING_RESPONSE)));

        let reply = error_reply(USER, &QuizError::EmptyReferenceAnswer);
        assert!(matches!(reply, OutboundReply::Failure(_)));
        assert_eq!(reply.text(), replies::PROCESSING_FAILED);
    }
}
