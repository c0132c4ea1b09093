//! Analyze-response use case
//!
//! Orchestrates the two LLM calls behind a candidate-response analysis:
//! feedback/score generation and next-question generation. The combined
//! operation runs both concurrently under a shared deadline.

use crate::ports::llm_gateway::LlmGateway;
use analyzer_domain::{
    AnalysisContext, AnalysisError, AnalysisOutcome, Feedback, InterviewPromptTemplate, normalize,
    parse_feedback, parse_next_question,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Default deadline for the combined operation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Use case for analyzing a candidate's interview response.
///
/// Every operation returns [`AnalysisError`] regardless of failure
/// origin — prompt rendering, transport, malformed JSON, or field
/// validation. No operation retries; a failed call is a single failed
/// attempt and the caller decides whether to re-issue it (re-invoking
/// the gateway is not guaranteed to be cheap against billing/quota).
pub struct AnalyzeResponseUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

/// Result of one branch of the combined analysis.
enum Branch {
    NextQuestion(Result<String, AnalysisError>),
    Feedback(Result<Feedback, AnalysisError>),
}

impl<G: LlmGateway + 'static> AnalyzeResponseUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Generate the next interview question from the candidate's
    /// response and background.
    pub async fn next_question(&self, ctx: &AnalysisContext) -> Result<String, AnalysisError> {
        Self::generate_next_question(&self.gateway, ctx).await
    }

    /// Generate feedback and a 0-10 score for the candidate's response.
    pub async fn feedback(&self, ctx: &AnalysisContext) -> Result<Feedback, AnalysisError> {
        Self::generate_feedback(&self.gateway, ctx).await
    }

    /// Run feedback and next-question generation concurrently, bounded
    /// by `timeout` measured from dispatch.
    ///
    /// Returns an outcome only when both calls succeed in time; the
    /// result order is fixed (next question, then feedback) regardless
    /// of which branch finished first. On timeout or on the first
    /// branch failure the other in-flight task is aborted best-effort:
    /// the orchestrator stops waiting, but the underlying HTTP request
    /// may still run to completion in the background and its result is
    /// discarded. Callers must not assume at-most-one invocation
    /// reached the backend.
    pub async fn analyze(
        &self,
        ctx: AnalysisContext,
        timeout: Duration,
    ) -> Result<AnalysisOutcome, AnalysisError> {
        info!(timeout_secs = timeout.as_secs_f64(), "starting combined analysis");

        let mut join_set = JoinSet::new();

        {
            let gateway = Arc::clone(&self.gateway);
            let ctx = ctx.clone();
            join_set.spawn(async move {
                Branch::NextQuestion(Self::generate_next_question(&gateway, &ctx).await)
            });
        }
        {
            let gateway = Arc::clone(&self.gateway);
            join_set.spawn(async move {
                Branch::Feedback(Self::generate_feedback(&gateway, &ctx).await)
            });
        }

        // The JoinSet moves into the joined future: when the timeout
        // drops that future, or a branch error returns early, the set
        // is dropped and the surviving task is aborted.
        let joined = async move {
            let mut next_question = None;
            let mut feedback = None;

            while let Some(result) = join_set.join_next().await {
                match result {
                    Ok(Branch::NextQuestion(outcome)) => next_question = Some(outcome?),
                    Ok(Branch::Feedback(outcome)) => feedback = Some(outcome?),
                    Err(e) => {
                        return Err(AnalysisError::Transport(format!(
                            "analysis task failed: {e}"
                        )));
                    }
                }
            }

            let (Some(next_question), Some(feedback)) = (next_question, feedback) else {
                return Err(AnalysisError::Transport(
                    "analysis task vanished before completing".to_string(),
                ));
            };

            Ok(AnalysisOutcome {
                next_question,
                feedback,
            })
        };

        match tokio::time::timeout(timeout, joined).await {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!("combined analysis failed: {}", e);
                }
                result
            }
            Err(_) => {
                warn!(
                    timeout_secs = timeout.as_secs_f64(),
                    "combined analysis timed out; abandoning in-flight calls"
                );
                Err(AnalysisError::Timeout)
            }
        }
    }

    /// Render, dispatch, and validate the next-question request.
    async fn generate_next_question(
        gateway: &G,
        ctx: &AnalysisContext,
    ) -> Result<String, AnalysisError> {
        let prompt = InterviewPromptTemplate::next_question(
            &ctx.question,
            &ctx.candidate_response,
            &ctx.resume_highlights,
            &ctx.job_description,
        );

        let response = Self::call_model(gateway, &prompt).await?;
        let question = parse_next_question(&response)?;

        debug!("next question generated");
        Ok(question)
    }

    /// Render, dispatch, and validate the feedback request.
    async fn generate_feedback(
        gateway: &G,
        ctx: &AnalysisContext,
    ) -> Result<Feedback, AnalysisError> {
        let prompt = InterviewPromptTemplate::feedback(
            &ctx.question,
            &ctx.candidate_response,
            &ctx.job_description,
            &ctx.resume_highlights,
        );

        let response = Self::call_model(gateway, &prompt).await?;
        let feedback = parse_feedback(&response)?;

        debug!("feedback generated");
        Ok(feedback)
    }

    /// Invoke the gateway and normalize the raw reply into a JSON object.
    async fn call_model(
        gateway: &G,
        prompt: &str,
    ) -> Result<serde_json::Map<String, Value>, AnalysisError> {
        let raw = gateway
            .invoke(prompt)
            .await
            .map_err(|e| AnalysisError::Transport(format!("failed to get LLM response: {e}")))?;

        normalize(Value::String(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use serde_json::json;

    // ==================== Test Mocks ====================

    /// Canned reply for one branch of the mock gateway.
    #[derive(Clone)]
    enum Reply {
        Text(&'static str),
        Fail(&'static str),
        DelayedText(Duration, &'static str),
    }

    impl Reply {
        async fn produce(self) -> Result<String, GatewayError> {
            match self {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Fail(message) => Err(GatewayError::RequestFailed(message.to_string())),
                Reply::DelayedText(delay, text) => {
                    tokio::time::sleep(delay).await;
                    Ok(text.to_string())
                }
            }
        }
    }

    /// Routes each prompt to a canned reply by template marker text.
    struct MockGateway {
        question_reply: Reply,
        feedback_reply: Reply,
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn invoke(&self, prompt: &str) -> Result<String, GatewayError> {
            if prompt.contains("follow-up question") {
                self.question_reply.clone().produce().await
            } else {
                self.feedback_reply.clone().produce().await
            }
        }
    }

    fn use_case(question_reply: Reply, feedback_reply: Reply) -> AnalyzeResponseUseCase<MockGateway> {
        AnalyzeResponseUseCase::new(Arc::new(MockGateway {
            question_reply,
            feedback_reply,
        }))
    }

    fn ctx() -> AnalysisContext {
        AnalysisContext::new(
            "What is ownership?",
            "It prevents data races at compile time.",
            "Senior Rust engineer",
            "5 years of systems programming",
        )
    }

    const QUESTION_JSON: &str = r#"{"next_question": "How does borrowing interact with lifetimes?"}"#;
    const FEEDBACK_JSON: &str = r#"{"feedback": "Accurate and concise.", "score": 8}"#;

    // ==================== Single operations ====================

    #[tokio::test]
    async fn test_next_question_success() {
        let use_case = use_case(Reply::Text(QUESTION_JSON), Reply::Text(FEEDBACK_JSON));
        let question = use_case.next_question(&ctx()).await.unwrap();
        assert_eq!(question, "How does borrowing interact with lifetimes?");
    }

    #[tokio::test]
    async fn test_next_question_tolerates_fenced_reply() {
        let fenced = "```json\n{\"next_question\": \"Why Rust?\"}\n```";
        let use_case = use_case(Reply::Text(fenced), Reply::Text(FEEDBACK_JSON));
        assert_eq!(use_case.next_question(&ctx()).await.unwrap(), "Why Rust?");
    }

    #[tokio::test]
    async fn test_next_question_wrong_key_is_descriptive() {
        let use_case = use_case(
            Reply::Text(r#"{"question": "Why Rust?"}"#),
            Reply::Text(FEEDBACK_JSON),
        );
        let err = use_case.next_question(&ctx()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::MissingFields(_)));
        assert!(err.to_string().contains("next_question"));
    }

    #[tokio::test]
    async fn test_feedback_success_preserves_score_form() {
        let use_case = use_case(
            Reply::Text(QUESTION_JSON),
            Reply::Text(r#"{"feedback": "Decent.", "score": "7"}"#),
        );
        let feedback = use_case.feedback(&ctx()).await.unwrap();
        assert_eq!(feedback.feedback, "Decent.");
        // Numeric string stays a string
        assert_eq!(feedback.score, json!("7"));
    }

    #[tokio::test]
    async fn test_feedback_empty_object_reports_both_fields() {
        let use_case = use_case(Reply::Text(QUESTION_JSON), Reply::Text("{}"));
        let err = use_case.feedback(&ctx()).await.unwrap_err();
        match err {
            AnalysisError::MissingFields(fields) => {
                assert_eq!(fields, vec!["feedback".to_string(), "score".to_string()]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_feedback_non_numeric_score_fails() {
        let use_case = use_case(
            Reply::Text(QUESTION_JSON),
            Reply::Text(r#"{"feedback": "Great.", "score": "high"}"#),
        );
        let err = use_case.feedback(&ctx()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidScore(_)));
    }

    #[tokio::test]
    async fn test_feedback_out_of_range_score_fails() {
        let use_case = use_case(
            Reply::Text(QUESTION_JSON),
            Reply::Text(r#"{"feedback": "Great.", "score": 11}"#),
        );
        assert!(matches!(
            use_case.feedback(&ctx()).await.unwrap_err(),
            AnalysisError::InvalidScore(_)
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_wraps_cause() {
        let use_case = use_case(Reply::Fail("socket closed"), Reply::Text(FEEDBACK_JSON));
        let err = use_case.next_question(&ctx()).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Transport(_)));
        assert!(err.to_string().contains("socket closed"));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed() {
        let use_case = use_case(
            Reply::Text("I'd rather chat about the weather."),
            Reply::Text(FEEDBACK_JSON),
        );
        assert!(matches!(
            use_case.next_question(&ctx()).await.unwrap_err(),
            AnalysisError::MalformedOutput(_)
        ));
    }

    // ==================== Combined operation ====================

    #[tokio::test(start_paused = true)]
    async fn test_analyze_result_order_is_fixed() {
        // Feedback finishes long before the question branch; the
        // outcome still pairs (next_question, feedback).
        let use_case = use_case(
            Reply::DelayedText(Duration::from_secs(5), QUESTION_JSON),
            Reply::Text(FEEDBACK_JSON),
        );

        let outcome = use_case.analyze(ctx(), DEFAULT_TIMEOUT).await.unwrap();
        assert_eq!(
            outcome.next_question,
            "How does borrowing interact with lifetimes?"
        );
        assert_eq!(outcome.feedback.feedback, "Accurate and concise.");
        assert_eq!(outcome.feedback.score, json!(8));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_times_out_at_deadline_not_slowest_branch() {
        let use_case = use_case(
            Reply::DelayedText(Duration::from_secs(40), QUESTION_JSON),
            Reply::DelayedText(Duration::from_secs(1), FEEDBACK_JSON),
        );

        let start = tokio::time::Instant::now();
        let err = use_case
            .analyze(ctx(), Duration::from_secs(30))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(30));
        // Must not have waited for the 40s branch
        assert!(elapsed < Duration::from_secs(40));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_fails_fast_on_first_branch_error() {
        // Feedback fails immediately; the question branch would take
        // far longer than the deadline if it were awaited.
        let use_case = use_case(
            Reply::DelayedText(Duration::from_secs(1000), QUESTION_JSON),
            Reply::Fail("quota exhausted"),
        );

        let start = tokio::time::Instant::now();
        let err = use_case
            .analyze(ctx(), Duration::from_secs(30))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::Transport(_)));
        assert!(err.to_string().contains("quota exhausted"));
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analyze_validation_failure_propagates_kind() {
        let use_case = use_case(
            Reply::Text(QUESTION_JSON),
            Reply::Text(r#"{"feedback": "Great.", "score": -1}"#),
        );

        let err = use_case.analyze(ctx(), DEFAULT_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidScore(_)));
    }
}
