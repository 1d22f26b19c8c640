use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::{
    error::{FlowError, Result},
    session::Session,
};

/// Trait for storing and retrieving sessions
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, session: Session) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Session>>;
    async fn delete(&self, id: &str) -> Result<()>;
    /// Replace a stored session only if it still exists at `expected_revision`.
    ///
    /// Fails with `SessionNotFound` when it was deleted meanwhile and with
    /// `StaleSession` when another write got there first.
    async fn update(&self, session: Session, expected_revision: u64) -> Result<()>;
}

/// In-memory implementation of SessionStorage. Sessions live until deleted
/// or until the process exits.
#[derive(Default)]
pub struct InMemorySessionStorage {
    sessions: Arc<DashMap<String, Session>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn save(&self, session: Session) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.remove(id);
        Ok(())
    }

    async fn update(&self, session: Session, expected_revision: u64) -> Result<()> {
        // get_mut holds the shard lock across the compare and the swap
        match self.sessions.get_mut(&session.id) {
            None => Err(FlowError::SessionNotFound(session.id)),
            Some(stored) if stored.revision != expected_revision => {
                Err(FlowError::StaleSession(session.id))
            }
            Some(mut stored) => {
                *stored = session;
                Ok(())
            }
        }
    }
}
