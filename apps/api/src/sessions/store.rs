//! Session store — opaque get/put storage for scoring sessions.
//!
//! Writes always store a whole `ScoringSession`, so a result can never be
//! paired with another result's point table or applied set.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::engine::session::ScoringSession;
use crate::errors::AppError;

/// Transition applied to a stored session by [`SessionStore::update`].
pub type SessionUpdate =
    Box<dyn FnOnce(&ScoringSession) -> Result<ScoringSession, AppError> + Send>;

/// Boxes a closure as a [`SessionUpdate`], letting the compiler infer its
/// signature.
pub fn session_update<F>(apply: F) -> SessionUpdate
where
    F: FnOnce(&ScoringSession) -> Result<ScoringSession, AppError> + Send + 'static,
{
    Box::new(apply)
}

/// Carried in `AppState` as `Arc<dyn SessionStore>`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<ScoringSession>, AppError>;

    async fn put(&self, session: ScoringSession) -> Result<(), AppError>;

    /// Read-modify-write as one step. No other write to `id` lands between
    /// the read and the write. Returns `NotFound` for unknown ids; an error
    /// from `apply` leaves the stored session untouched.
    async fn update(&self, id: Uuid, apply: SessionUpdate) -> Result<ScoringSession, AppError>;
}

/// Process-local store. Evicts the least recently updated session once
/// `capacity` is reached.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, ScoringSession>>,
    capacity: usize,
}

impl InMemorySessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: Uuid) -> Result<Option<ScoringSession>, AppError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn put(&self, session: ScoringSession) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;

        if !sessions.contains_key(&session.id) && sessions.len() >= self.capacity {
            let oldest = sessions
                .values()
                .min_by_key(|s| s.updated_at)
                .map(|s| s.id);
            if let Some(oldest) = oldest {
                debug!(session_id = %oldest, "evicting oldest scoring session");
                sessions.remove(&oldest);
            }
        }

        sessions.insert(session.id, session);
        Ok(())
    }

    async fn update(&self, id: Uuid, apply: SessionUpdate) -> Result<ScoringSession, AppError> {
        let mut sessions = self.sessions.write().await;

        let current = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        let next = apply(current)?;

        sessions.insert(id, next.clone());
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine::suggestion::{AnalysisResult, Suggestion, SuggestionCategory};

    fn result(current: i32) -> AnalysisResult {
        AnalysisResult {
            current_score: current,
            potential_score: current + 10,
            structural_fit: true,
            suggestions: vec![Suggestion::new(
                "Add \"Rust\" to your skills section",
                "",
                "Skill: Rust",
                SuggestionCategory::Keyword,
            )],
            current_callback: None,
            potential_callback: None,
            critical_missing_skills: vec![],
        }
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips_whole_session() {
        let store = InMemorySessionStore::new(10);
        let session = ScoringSession::new(result(50));
        store.put(session.clone()).await.unwrap();

        let loaded = store.get(session.id).await.unwrap();
        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn test_unknown_id_is_none() {
        let store = InMemorySessionStore::new(10);
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing_session() {
        let store = InMemorySessionStore::new(10);
        let session = ScoringSession::new(result(50));
        store.put(session.clone()).await.unwrap();

        let replaced = session.replace_result(result(70));
        store.put(replaced.clone()).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get(session.id).await.unwrap(), Some(replaced));
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let store = InMemorySessionStore::new(2);
        let first = ScoringSession::new(result(10));
        let mut second = ScoringSession::new(result(20));
        let mut third = ScoringSession::new(result(30));
        second.updated_at = first.updated_at + chrono::Duration::seconds(1);
        third.updated_at = first.updated_at + chrono::Duration::seconds(2);

        store.put(first.clone()).await.unwrap();
        store.put(second.clone()).await.unwrap();
        store.put(third.clone()).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.get(first.id).await.unwrap().is_none());
        assert!(store.get(third.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_applies_transition() {
        let store = InMemorySessionStore::new(10);
        let session = ScoringSession::new(result(50));
        store.put(session.clone()).await.unwrap();

        let toggled = store
            .update(session.id, session_update(|s| Ok(s.toggle(0))))
            .await
            .unwrap();

        assert!(toggled.applied.contains(0));
        assert_eq!(store.get(session.id).await.unwrap(), Some(toggled));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemorySessionStore::new(10);
        let err = store
            .update(Uuid::new_v4(), session_update(|s| Ok(s.reset())))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_update_leaves_session_untouched() {
        let store = InMemorySessionStore::new(10);
        let session = ScoringSession::new(result(50));
        store.put(session.clone()).await.unwrap();

        let err = store
            .update(
                session.id,
                session_update(|_| Err(AppError::Validation("rejected".to_string()))),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.get(session.id).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_concurrent_toggles_never_drop_a_replacement() {
        let store = Arc::new(InMemorySessionStore::new(10));
        let session = ScoringSession::new(result(50));
        let id = session.id;
        store.put(session).await.unwrap();

        let toggles: Vec<_> = (0..16)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.update(id, session_update(|s| Ok(s.toggle(0)))).await
                })
            })
            .collect();

        store
            .update(id, session_update(|s| Ok(s.replace_result(result(80)))))
            .await
            .unwrap();

        for task in toggles {
            task.await.unwrap().unwrap();
        }

        let stored = store.get(id).await.unwrap().unwrap();
        assert_eq!(stored.result.current_score, 80);
        assert_eq!(stored.point_values.get(0), 10);
    }
}
