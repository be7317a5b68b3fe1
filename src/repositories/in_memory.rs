use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::AppResult,
    models::domain::{NewQuestion, Question, UserSession},
    repositories::{QuestionRepository, SessionRepository},
};

#[derive(Default)]
struct QuestionTable {
    next_id: i64,
    rows: BTreeMap<i64, Question>,
}

/// Process-local question catalog. Ids are assigned sequentially from 1.
#[derive(Clone, Default)]
pub struct InMemoryQuestionRepository {
    table: Arc<RwLock<QuestionTable>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, question: NewQuestion) -> AppResult<Question> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let question = Question::from_new(table.next_id, question);
        table.rows.insert(question.id, question.clone());
        Ok(question)
    }

    async fn count(&self) -> AppResult<u64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Process-local session store keyed by user id.
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<i64, UserSession>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<UserSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(&user_id).cloned())
    }

    async fn save(&self, session: UserSession) -> AppResult<UserSession> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.user_id, session.clone());
        Ok(session)
    }

    async fn create_if_absent(&self, session: UserSession) -> AppResult<UserSession> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.entry(session.user_id).or_insert(session).clone())
    }

    async fn record_answer(
        &self,
        user_id: i64,
        correct: bool,
    ) -> AppResult<Option<UserSession>> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(&user_id) else {
            return Ok(None);
        };

        session.record_answer(correct);
        Ok(Some(session.clone()))
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
