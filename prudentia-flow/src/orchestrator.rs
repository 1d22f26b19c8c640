use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    error::Result,
    inference::{InferenceClient, InferenceRequest},
    prompt::PromptRequest,
    session::Session,
};

/// Shown by the UI whenever a generation fails. There is no automatic retry.
pub const FALLBACK_MESSAGE: &str = "Sorry, we could not generate a response right now. \
Please check your details and try again in a moment.";

/// Formats the prompt for a session's pending generation and calls the model
#[derive(Clone)]
pub struct Orchestrator {
    client: Arc<dyn InferenceClient>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn InferenceClient>) -> Self {
        Self { client }
    }

    /// One remote call per invocation; the completion comes back verbatim.
    /// The session is only read, never written.
    pub async fn generate(&self, session: &Session) -> Result<String> {
        let prompt = PromptRequest::from_session(session)?;
        let request = InferenceRequest {
            model: prompt.model().to_string(),
            prompt: prompt.render(),
        };

        info!(
            session_id = %session.id,
            step = ?session.current_step,
            kind = ?prompt.kind,
            model = %request.model,
            "generating"
        );

        self.client
            .complete(&request)
            .await
            .inspect_err(|e| warn!(session_id = %session.id, error = %e, "generation failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use crate::form::{LegalCategory, PetitionLanguage};
    use crate::workflow::Event;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Records every request and answers from a fixed script
    struct RecordingClient {
        calls: Mutex<Vec<InferenceRequest>>,
        reply: fn() -> Result<String>,
    }

    impl RecordingClient {
        fn new(reply: fn() -> Result<String>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> Vec<InferenceRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InferenceClient for RecordingClient {
        async fn complete(&self, request: &InferenceRequest) -> Result<String> {
            self.calls.lock().unwrap().push(request.clone());
            (self.reply)()
        }
    }

    fn consumer_complaint_session() -> Session {
        let mut session = Session::new("s1");
        session
            .advance(Event::ChooseCategory(LegalCategory::ConsumerComplaint))
            .unwrap();
        session
            .advance(Event::SubmitDetails(BTreeMap::from([
                ("name".to_string(), "Meera Nair".to_string()),
                ("phone".to_string(), "9447000000".to_string()),
                ("address".to_string(), "MG Road, Kochi".to_string()),
                ("state".to_string(), "Kerala".to_string()),
                ("description".to_string(), "Phone delivered broken".to_string()),
            ])))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn identical_input_makes_independent_calls() {
        let client = RecordingClient::new(|| Ok("guidance".to_string()));
        let orchestrator = Orchestrator::new(client.clone());
        let session = consumer_complaint_session();

        orchestrator.generate(&session).await.unwrap();
        orchestrator.generate(&session).await.unwrap();

        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
        assert_eq!(calls[0].model, crate::prompt::GUIDANCE_MODEL);
    }

    #[tokio::test]
    async fn hindi_petition_puts_language_in_outgoing_prompt() {
        let client = RecordingClient::new(|| Ok("याचिका".to_string()));
        let orchestrator = Orchestrator::new(client.clone());
        let mut session = consumer_complaint_session();
        session.advance(Event::GuidanceReceived("g".into())).unwrap();
        session
            .advance(Event::ChooseLanguage(PetitionLanguage::Hindi))
            .unwrap();

        let text = orchestrator.generate(&session).await.unwrap();

        assert_eq!(text, "याचिका");
        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].model, crate::prompt::PETITION_MODEL);
        assert!(calls[0].prompt.contains("Hindi"));
    }

    #[tokio::test]
    async fn failures_pass_through_and_session_is_untouched() {
        let client = RecordingClient::new(|| {
            Err(FlowError::EndpointUnavailable("status 503".to_string()))
        });
        let orchestrator = Orchestrator::new(client);
        let session = consumer_complaint_session();

        let err = orchestrator.generate(&session).await.unwrap_err();
        assert!(matches!(err, FlowError::EndpointUnavailable(_)));
        assert!(err.is_generation_failure());
        assert!(session.last_response_text.is_empty());

        let orchestrator = Orchestrator::new(RecordingClient::new(|| Err(FlowError::EmptyCompletion)));
        assert!(matches!(
            orchestrator.generate(&session).await,
            Err(FlowError::EmptyCompletion)
        ));
    }

    #[tokio::test]
    async fn nothing_to_generate_skips_the_remote_call() {
        let client = RecordingClient::new(|| Ok("unused".to_string()));
        let orchestrator = Orchestrator::new(client.clone());

        let err = orchestrator.generate(&Session::new("s2")).await.unwrap_err();
        assert!(matches!(err, FlowError::NothingToGenerate { .. }));
        assert!(client.calls().is_empty());
    }
}
