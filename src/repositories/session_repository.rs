use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReplaceOptions, ReturnDocument},
    Collection, IndexModel,
};

#[cfg(test)]
use mockall::automock;

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::UserSession,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<UserSession>>;

    /// Inserts the session, or replaces the one already stored for its user id.
    async fn save(&self, session: UserSession) -> AppResult<UserSession>;

    /// Inserts the session only if its user has none yet.
    ///
    /// Returns whichever record is stored for the user afterwards, so a
    /// caller that loses a race gets the existing session back untouched.
    async fn create_if_absent(&self, session: UserSession) -> AppResult<UserSession>;

    /// Atomically counts one answer against the user's session.
    ///
    /// Returns `None` when the user has no session; nothing is written then.
    async fn record_answer(&self, user_id: i64, correct: bool)
        -> AppResult<Option<UserSession>>;

    async fn ping(&self) -> AppResult<()>;
}

pub struct MongoSessionRepository {
    db: Database,
    collection: Collection<UserSession>,
}

impl MongoSessionRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        Self {
            db: db.clone(),
            collection: db.get_collection(collection_name),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for user sessions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let user_id_index = IndexModel::builder()
            .keys(doc! { "userId": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(user_id_index).await?;

        log::info!("Successfully created indexes for user sessions collection");
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MongoSessionRepository {
    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<UserSession>> {
        let session = self
            .collection
            .find_one(doc! { "userId": user_id })
            .await?;
        Ok(session)
    }

    async fn save(&self, session: UserSession) -> AppResult<UserSession> {
        let options = ReplaceOptions::builder().upsert(true).build();

        self.collection
            .replace_one(doc! { "userId": session.user_id }, &session)
            .with_options(options)
            .await?;

        Ok(session)
    }

    async fn create_if_absent(&self, session: UserSession) -> AppResult<UserSession> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let stored = self
            .collection
            .find_one_and_update(
                doc! { "userId": session.user_id },
                doc! { "$setOnInsert": to_document(&session)? },
            )
            .with_options(options)
            .await?
            .ok_or_else(|| {
                AppError::DatabaseError(format!(
                    "Session for user '{}' was not returned after upsert",
                    session.user_id
                ))
            })?;

        Ok(stored)
    }

    async fn record_answer(
        &self,
        user_id: i64,
        correct: bool,
    ) -> AppResult<Option<UserSession>> {
        let counter = if correct {
            "correctAnswers"
        } else {
            "incorrectAnswers"
        };
        let update = doc! {
            "$inc": { "totalQuestionsAnswered": 1_i64, counter: 1_i64 }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let session = self
            .collection
            .find_one_and_update(doc! { "userId": user_id }, update)
            .with_options(options)
            .await?;

        Ok(session)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
