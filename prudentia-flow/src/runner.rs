//! FlowRunner – wrapper that loads a session, performs exactly **one** action on it, and
//! persists the result back to storage.
//!
//! Every HTTP request maps to one call:
//! * [`FlowRunner::apply`] for a user event (category, details, language, reset);
//! * [`FlowRunner::generate`] for the remote completion the current step is waiting for.
//!
//! A rejected event or failed generation is never saved, so the stored session always
//! reflects the last successful action. Sessions are keyed by id and never share state.
//! Saves are conditional on the revision that was loaded, so a session discarded or
//! reset while a completion was pending stays that way.
//!
//! ```rust,ignore
//! // At startup
//! let runner = FlowRunner::new(Orchestrator::new(client), Arc::new(InMemorySessionStorage::new()));
//!
//! // In request handlers
//! let session = runner.create().await?;
//! runner.apply(&session.id, Event::ChooseCategory(LegalCategory::ConsumerComplaint)).await?;
//! ```

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    error::{FlowError, Result},
    orchestrator::Orchestrator,
    prompt::PromptRequest,
    session::Session,
    storage::SessionStorage,
    workflow::Event,
};

/// Orchestrates the _load → act → save_ pattern around a session.
#[derive(Clone)]
pub struct FlowRunner {
    orchestrator: Orchestrator,
    storage: Arc<dyn SessionStorage>,
}

impl FlowRunner {
    pub fn new(orchestrator: Orchestrator, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            orchestrator,
            storage,
        }
    }

    /// Start a fresh session in the initial step
    pub async fn create(&self) -> Result<Session> {
        let session = Session::new(Uuid::new_v4().to_string());
        self.storage.save(session.clone()).await?;
        info!(session_id = %session.id, "session created");
        Ok(session)
    }

    pub async fn get(&self, session_id: &str) -> Result<Session> {
        self.storage
            .get(session_id)
            .await?
            .ok_or_else(|| FlowError::SessionNotFound(session_id.to_string()))
    }

    /// Drop a session when its connection goes away
    pub async fn discard(&self, session_id: &str) -> Result<()> {
        self.get(session_id).await?;
        self.storage.delete(session_id).await?;
        info!(session_id = %session_id, "session discarded");
        Ok(())
    }

    /// Apply one event and persist the session if it was accepted
    pub async fn apply(&self, session_id: &str, event: Event) -> Result<Session> {
        let mut session = self.get(session_id).await?;
        let loaded = session.revision;
        session.advance(event)?;
        self.storage.update(session.clone(), loaded).await?;
        Ok(session)
    }

    /// Run the generation the current step is waiting for and record the text.
    ///
    /// On failure the stored session, including `last_response_text`, is unchanged.
    /// A completion that arrives after the session was discarded, reset or otherwise
    /// changed is dropped.
    pub async fn generate(&self, session_id: &str) -> Result<Session> {
        let mut session = self.get(session_id).await?;
        let loaded = session.revision;
        let kind = PromptRequest::from_session(&session)?.kind;

        let text = self.orchestrator.generate(&session).await?;

        session.advance(kind.received(text))?;
        if let Err(e) = self.storage.update(session.clone(), loaded).await {
            warn!(session_id = %session_id, error = %e, "dropping completion for changed session");
            return Err(e);
        }
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{LegalCategory, PetitionLanguage};
    use crate::inference::{InferenceClient, InferenceRequest};
    use crate::storage::InMemorySessionStorage;
    use crate::workflow::Step;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Replies from a queue, one entry per call
    struct ScriptedClient {
        replies: Mutex<Vec<Result<String>>>,
    }

    #[async_trait]
    impl InferenceClient for ScriptedClient {
        async fn complete(&self, _request: &InferenceRequest) -> Result<String> {
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn runner(replies: Vec<Result<String>>) -> FlowRunner {
        let client = Arc::new(ScriptedClient {
            replies: Mutex::new(replies),
        });
        FlowRunner::new(
            Orchestrator::new(client),
            Arc::new(InMemorySessionStorage::new()),
        )
    }

    fn details() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("name".to_string(), "Sunil Verma".to_string()),
            ("phone".to_string(), "9811111111".to_string()),
            ("address".to_string(), "Karol Bagh, New Delhi".to_string()),
            ("state".to_string(), "Delhi".to_string()),
            ("description".to_string(), "Landlord withholding deposit".to_string()),
        ])
    }

    #[tokio::test]
    async fn guidance_then_petition_round_trip() {
        let runner = runner(vec![
            Ok("## Legal Analysis & Guidance\n...".to_string()),
            Ok("To, The Rent Controller".to_string()),
        ]);
        let id = runner.create().await.unwrap().id;

        runner
            .apply(&id, Event::ChooseCategory(LegalCategory::LandlordTenantDispute))
            .await
            .unwrap();
        runner.apply(&id, Event::SubmitDetails(details())).await.unwrap();
        let session = runner.generate(&id).await.unwrap();
        assert_eq!(session.current_step, Step::GuidanceShown);

        runner
            .apply(&id, Event::ChooseLanguage(PetitionLanguage::English))
            .await
            .unwrap();
        let session = runner.generate(&id).await.unwrap();
        assert_eq!(session.current_step, Step::PetitionDrafted);
        assert_eq!(session.last_response_text, "To, The Rent Controller");

        let stored = runner.get(&id).await.unwrap();
        assert_eq!(stored.current_step, Step::PetitionDrafted);
    }

    #[tokio::test]
    async fn failed_generation_keeps_previous_response() {
        let runner = runner(vec![
            Ok("first guidance".to_string()),
            Err(FlowError::EndpointUnavailable("status 500".to_string())),
            Ok("petition".to_string()),
        ]);
        let id = runner.create().await.unwrap().id;
        runner
            .apply(&id, Event::ChooseCategory(LegalCategory::Other))
            .await
            .unwrap();
        runner.apply(&id, Event::SubmitDetails(details())).await.unwrap();
        runner.generate(&id).await.unwrap();
        runner
            .apply(&id, Event::ChooseLanguage(PetitionLanguage::Kannada))
            .await
            .unwrap();

        let err = runner.generate(&id).await.unwrap_err();
        assert!(matches!(err, FlowError::EndpointUnavailable(_)));
        let stored = runner.get(&id).await.unwrap();
        assert_eq!(stored.last_response_text, "first guidance");
        assert_eq!(stored.current_step, Step::PetitionRequested);

        // manual re-submission
        let session = runner.generate(&id).await.unwrap();
        assert_eq!(session.last_response_text, "petition");
    }

    #[tokio::test]
    async fn rejected_event_is_not_persisted() {
        let runner = runner(vec![]);
        let id = runner.create().await.unwrap().id;

        let err = runner
            .apply(&id, Event::ChooseLanguage(PetitionLanguage::Telugu))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::InvalidTransition { .. }));
        let stored = runner.get(&id).await.unwrap();
        assert_eq!(stored.current_step, Step::Start);
        assert!(stored.petition_language.is_none());
    }

    #[tokio::test]
    async fn discard_removes_session() {
        let runner = runner(vec![]);
        let id = runner.create().await.unwrap().id;
        runner.discard(&id).await.unwrap();
        assert!(matches!(
            runner.get(&id).await,
            Err(FlowError::SessionNotFound(_))
        ));
        assert!(matches!(
            runner.discard(&id).await,
            Err(FlowError::SessionNotFound(_))
        ));
    }

    /// Holds every completion until released
    struct GatedClient {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl InferenceClient for GatedClient {
        async fn complete(&self, _request: &InferenceRequest) -> Result<String> {
            self.started.notify_one();
            self.release.notified().await;
            Ok("late guidance".to_string())
        }
    }

    async fn gated_runner_at_details()
    -> (FlowRunner, Arc<GatedClient>, Arc<InMemorySessionStorage>, String) {
        let client = Arc::new(GatedClient {
            started: Notify::new(),
            release: Notify::new(),
        });
        let storage = Arc::new(InMemorySessionStorage::new());
        let runner = FlowRunner::new(Orchestrator::new(client.clone()), storage.clone());

        let id = runner.create().await.unwrap().id;
        runner
            .apply(&id, Event::ChooseCategory(LegalCategory::ConsumerComplaint))
            .await
            .unwrap();
        runner.apply(&id, Event::SubmitDetails(details())).await.unwrap();
        (runner, client, storage, id)
    }

    #[tokio::test]
    async fn completion_does_not_revive_discarded_session() {
        let (runner, client, storage, id) = gated_runner_at_details().await;

        let pending = tokio::spawn({
            let runner = runner.clone();
            let id = id.clone();
            async move { runner.generate(&id).await }
        });
        client.started.notified().await;
        runner.discard(&id).await.unwrap();
        client.release.notify_one();

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(FlowError::SessionNotFound(_))));
        assert!(storage.is_empty());
        assert!(matches!(
            runner.get(&id).await,
            Err(FlowError::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn completion_after_reset_is_dropped() {
        let (runner, client, _storage, id) = gated_runner_at_details().await;

        let pending = tokio::spawn({
            let runner = runner.clone();
            let id = id.clone();
            async move { runner.generate(&id).await }
        });
        client.started.notified().await;
        runner.apply(&id, Event::Reset).await.unwrap();
        client.release.notify_one();

        let result = pending.await.unwrap();
        assert!(matches!(result, Err(FlowError::StaleSession(_))));
        let stored = runner.get(&id).await.unwrap();
        assert_eq!(stored.current_step, Step::Start);
        assert!(stored.last_response_text.is_empty());
    }
}
