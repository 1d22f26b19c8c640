use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::{
    error::{FlowError, Result},
    form::{LegalCategory, PetitionLanguage, REQUIRED_FIELDS},
    workflow::{Event, Step},
};

/// Per-connection record of workflow progress and collected answers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub current_step: Step,
    pub selected_category: Option<LegalCategory>,
    pub collected_fields: BTreeMap<String, String>,
    pub petition_language: Option<PetitionLanguage>,
    pub last_response_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every accepted event, survives reset
    #[serde(default)]
    pub revision: u64,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            current_step: Step::Start,
            selected_category: None,
            collected_fields: BTreeMap::new(),
            petition_language: None,
            last_response_text: String::new(),
            created_at: now,
            updated_at: now,
            revision: 0,
        }
    }

    /// Apply one event. On error the session is left exactly as it was.
    pub fn advance(&mut self, event: Event) -> Result<Step> {
        let kind = event.kind();
        let from = self.current_step;
        let next = self
            .current_step
            .next(kind)
            .ok_or(FlowError::InvalidTransition {
                step: self.current_step,
                event: kind.name(),
            })?;

        match event {
            Event::Reset => {
                let (created_at, revision) = (self.created_at, self.revision);
                *self = Session::new(std::mem::take(&mut self.id));
                self.created_at = created_at;
                self.revision = revision;
            }
            Event::ChooseCategory(category) => {
                self.selected_category = Some(category);
            }
            Event::SubmitDetails(fields) => {
                let missing = self.missing_required_fields(&fields);
                if !missing.is_empty() {
                    return Err(FlowError::MissingRequiredFields(missing));
                }
                self.collected_fields.extend(fields);
            }
            Event::ChooseLanguage(language) => {
                self.petition_language = Some(language);
            }
            Event::GuidanceReceived(text) | Event::PetitionReceived(text) => {
                self.last_response_text = text;
            }
        }

        debug!(
            session_id = %self.id,
            from = ?from,
            to = ?next,
            event = kind.name(),
            "session advanced"
        );

        self.current_step = next;
        self.updated_at = Utc::now();
        self.revision += 1;
        Ok(next)
    }

    /// Required keys that would still be blank after merging `incoming`
    fn missing_required_fields(&self, incoming: &BTreeMap<String, String>) -> Vec<String> {
        REQUIRED_FIELDS
            .iter()
            .filter(|key| {
                let value = incoming
                    .get(**key)
                    .or_else(|| self.collected_fields.get(**key));
                value.is_none_or(|v| v.trim().is_empty())
            })
            .map(|key| key.to_string())
            .collect()
    }

    /// Value of a collected field, if it was submitted and is not blank
    pub fn field(&self, key: &str) -> Option<&str> {
        self.collected_fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}
