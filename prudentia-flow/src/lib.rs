pub mod courts;
pub mod error;
pub mod form;
pub mod guidance;
pub mod inference;
pub mod orchestrator;
pub mod prompt;
pub mod runner;
pub mod session;
pub mod storage;
pub mod workflow;

// Re-export commonly used types
pub use error::{FlowError, Result};
pub use form::{FieldSpec, LegalCategory, PetitionLanguage, field_keys};
pub use guidance::GuidanceSections;
pub use inference::{InferenceClient, InferenceConfig, InferenceRequest, OpenRouterClient};
pub use orchestrator::{FALLBACK_MESSAGE, Orchestrator};
pub use prompt::{GUIDANCE_MODEL, PETITION_MODEL, PromptRequest};
pub use runner::FlowRunner;
pub use session::Session;
pub use storage::{InMemorySessionStorage, SessionStorage};
pub use workflow::{Event, EventKind, PromptKind, Step};
