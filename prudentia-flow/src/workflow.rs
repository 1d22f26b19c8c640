use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::form::{LegalCategory, PetitionLanguage};

/// Stage of the guidance/petition workflow a session is in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Waiting for a category
    #[default]
    Start,
    /// Category chosen, waiting for the details form
    CategorySelected,
    /// Details accepted, guidance can be generated
    DetailsCollected,
    /// Guidance is on screen
    GuidanceShown,
    /// Petition language chosen, petition can be generated
    PetitionRequested,
    /// Petition draft is on screen
    PetitionDrafted,
}

/// Discrete event that drives a session forward
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ChooseCategory(LegalCategory),
    SubmitDetails(BTreeMap<String, String>),
    GuidanceReceived(String),
    ChooseLanguage(PetitionLanguage),
    PetitionReceived(String),
    Reset,
}

/// Payload-free discriminant of [`Event`], the key of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ChooseCategory,
    SubmitDetails,
    GuidanceReceived,
    ChooseLanguage,
    PetitionReceived,
    Reset,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::ChooseCategory,
        EventKind::SubmitDetails,
        EventKind::GuidanceReceived,
        EventKind::ChooseLanguage,
        EventKind::PetitionReceived,
        EventKind::Reset,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EventKind::ChooseCategory => "choose_category",
            EventKind::SubmitDetails => "submit_details",
            EventKind::GuidanceReceived => "guidance_received",
            EventKind::ChooseLanguage => "choose_language",
            EventKind::PetitionReceived => "petition_received",
            EventKind::Reset => "reset",
        }
    }

    /// Events a user may send directly. The `*Received` events only come
    /// from a successful generation.
    pub fn is_user_event(&self) -> bool {
        !matches!(
            self,
            EventKind::GuidanceReceived | EventKind::PetitionReceived
        )
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ChooseCategory(_) => EventKind::ChooseCategory,
            Event::SubmitDetails(_) => EventKind::SubmitDetails,
            Event::GuidanceReceived(_) => EventKind::GuidanceReceived,
            Event::ChooseLanguage(_) => EventKind::ChooseLanguage,
            Event::PetitionReceived(_) => EventKind::PetitionReceived,
            Event::Reset => EventKind::Reset,
        }
    }
}

impl Step {
    /// Transition table. `None` means the event does not apply to this step.
    pub fn next(self, event: EventKind) -> Option<Step> {
        use EventKind as E;
        use Step as S;

        match (self, event) {
            (_, E::Reset) => Some(S::Start),
            (S::Start, E::ChooseCategory) => Some(S::CategorySelected),
            (S::CategorySelected, E::SubmitDetails) => Some(S::DetailsCollected),
            (S::DetailsCollected, E::GuidanceReceived) => Some(S::GuidanceShown),
            (S::GuidanceShown, E::ChooseLanguage) => Some(S::PetitionRequested),
            (S::PetitionRequested, E::PetitionReceived) => Some(S::PetitionDrafted),
            // edits loop back to the details step
            (S::PetitionDrafted, E::SubmitDetails) => Some(S::DetailsCollected),
            (
                S::Start,
                E::SubmitDetails | E::GuidanceReceived | E::ChooseLanguage | E::PetitionReceived,
            )
            | (
                S::CategorySelected,
                E::ChooseCategory | E::GuidanceReceived | E::ChooseLanguage | E::PetitionReceived,
            )
            | (
                S::DetailsCollected,
                E::ChooseCategory | E::SubmitDetails | E::ChooseLanguage | E::PetitionReceived,
            )
            | (
                S::GuidanceShown,
                E::ChooseCategory | E::SubmitDetails | E::GuidanceReceived | E::PetitionReceived,
            )
            | (
                S::PetitionRequested,
                E::ChooseCategory | E::SubmitDetails | E::GuidanceReceived | E::ChooseLanguage,
            )
            | (
                S::PetitionDrafted,
                E::ChooseCategory | E::GuidanceReceived | E::ChooseLanguage | E::PetitionReceived,
            ) => None,
        }
    }

    /// User events this step accepts, for rendering only the valid actions
    pub fn accepted_events(self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| kind.is_user_event() && self.next(*kind).is_some())
            .collect()
    }

    /// The generation this step is waiting for, if any. A failed generation
    /// leaves the step unchanged, so asking again re-issues the same request.
    pub fn prompt_kind(self) -> Option<PromptKind> {
        match self {
            Step::DetailsCollected => Some(PromptKind::Guidance),
            Step::PetitionRequested => Some(PromptKind::Petition),
            Step::Start | Step::CategorySelected | Step::GuidanceShown | Step::PetitionDrafted => {
                None
            }
        }
    }
}

/// Which of the two fixed requests a generation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    Guidance,
    Petition,
}

impl PromptKind {
    /// The event that records a successful completion of this kind
    pub fn received(self, text: String) -> Event {
        match self {
            PromptKind::Guidance => Event::GuidanceReceived(text),
            PromptKind::Petition => Event::PetitionReceived(text),
        }
    }
}
