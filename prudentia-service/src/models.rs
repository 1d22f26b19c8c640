use chrono::{DateTime, Utc};
use prudentia_flow::{
    Event, EventKind, FieldSpec, GuidanceSections, LegalCategory, PetitionLanguage, PromptKind,
    Session, Step,
    courts::{COURTS, CourtTier, MapView},
    form::INDIAN_STATES,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Actions the UI may send. Completion events are produced by `/generate` only.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UserEvent {
    ChooseCategory { category: LegalCategory },
    SubmitDetails { fields: BTreeMap<String, String> },
    ChooseLanguage { language: PetitionLanguage },
    Reset,
}

impl From<UserEvent> for Event {
    fn from(event: UserEvent) -> Self {
        match event {
            UserEvent::ChooseCategory { category } => Event::ChooseCategory(category),
            UserEvent::SubmitDetails { fields } => Event::SubmitDetails(fields),
            UserEvent::ChooseLanguage { language } => Event::ChooseLanguage(language),
            UserEvent::Reset => Event::Reset,
        }
    }
}

/// What the UI renders for a session
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub step: Step,
    pub category: Option<LegalCategory>,
    pub category_label: Option<&'static str>,
    pub fields: BTreeMap<String, String>,
    pub language: Option<PetitionLanguage>,
    pub last_response_text: String,
    /// UI actions valid in this step
    pub accepted_events: Vec<EventKind>,
    /// Set when the step is waiting for `/generate`
    pub pending_generation: Option<PromptKind>,
    pub guidance: Option<GuidanceSections>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        let guidance = (session.current_step == Step::GuidanceShown)
            .then(|| GuidanceSections::parse(&session.last_response_text));

        Self {
            step: session.current_step,
            category: session.selected_category,
            category_label: session.selected_category.map(|c| c.label()),
            language: session.petition_language,
            accepted_events: session.current_step.accepted_events(),
            pending_generation: session.current_step.prompt_kind(),
            guidance,
            session_id: session.id,
            fields: session.collected_fields,
            last_response_text: session.last_response_text,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryForm {
    pub category: LegalCategory,
    pub label: &'static str,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Serialize)]
pub struct LanguageOption {
    pub language: PetitionLanguage,
    pub label: &'static str,
}

/// Everything the UI needs to draw the category, details and language forms
#[derive(Debug, Serialize)]
pub struct FormSchema {
    pub categories: Vec<CategoryForm>,
    pub languages: Vec<LanguageOption>,
    pub states: &'static [&'static str],
}

impl FormSchema {
    pub fn build() -> Self {
        Self {
            categories: LegalCategory::ALL
                .iter()
                .map(|category| CategoryForm {
                    category: *category,
                    label: category.label(),
                    fields: category.form_fields(),
                })
                .collect(),
            languages: PetitionLanguage::ALL
                .iter()
                .map(|language| LanguageOption {
                    language: *language,
                    label: language.label(),
                })
                .collect(),
            states: &INDIAN_STATES,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CourtsQuery {
    pub pin_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CourtMarker {
    pub name: &'static str,
    pub coords: [f64; 2],
    pub tier: CourtTier,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CourtsView {
    #[serde(flatten)]
    pub view: MapView,
    pub courts: Vec<CourtMarker>,
}

impl CourtsView {
    pub fn around(view: MapView) -> Self {
        Self {
            view,
            courts: COURTS
                .iter()
                .map(|court| CourtMarker {
                    name: court.name,
                    coords: court.coords,
                    tier: court.tier,
                    color: court.tier.color(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_events_deserialize_from_tagged_json() {
        let event: UserEvent = serde_json::from_value(json!({
            "type": "choose_category",
            "category": "landlord_tenant_dispute"
        }))
        .unwrap();
        assert_eq!(
            Event::from(event),
            Event::ChooseCategory(LegalCategory::LandlordTenantDispute)
        );

        let event: UserEvent = serde_json::from_value(json!({ "type": "reset" })).unwrap();
        assert_eq!(Event::from(event), Event::Reset);
    }

    #[test]
    fn completion_events_cannot_come_from_the_ui() {
        let result = serde_json::from_value::<UserEvent>(json!({
            "type": "guidance_received",
            "text": "forged"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn fresh_session_view_offers_only_category_choice() {
        let view = SessionView::from(Session::new("s-1"));
        assert_eq!(view.step, Step::Start);
        assert_eq!(view.accepted_events, vec![EventKind::ChooseCategory, EventKind::Reset]);
        assert!(view.pending_generation.is_none());
        assert!(view.guidance.is_none());
    }

    #[test]
    fn form_schema_lists_every_category_and_language() {
        let schema = FormSchema::build();
        assert_eq!(schema.categories.len(), 10);
        assert_eq!(schema.languages.len(), 6);
        assert_eq!(schema.states.len(), 31);
        assert!(schema.categories.iter().all(|c| c.fields.iter().any(|f| f.key == "name")));
    }
}
