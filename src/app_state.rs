use std::sync::Arc;

use crate::{
    config::{Config, StorageBackend},
    db::Database,
    errors::AppResult,
    repositories::{
        InMemoryQuestionRepository, InMemorySessionRepository, MongoQuestionRepository,
        MongoSessionRepository, QuestionRepository, SessionRepository,
    },
    services::{question_seed, quiz_service::QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub question_repository: Arc<dyn QuestionRepository>,
    pub session_repository: Arc<dyn SessionRepository>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let (question_repository, session_repository): (
            Arc<dyn QuestionRepository>,
            Arc<dyn SessionRepository>,
        ) = match config.storage_backend {
            StorageBackend::Mongo => {
                let db = Database::connect(&config).await?;

                let questions = MongoQuestionRepository::new(&db, &config.questions_collection);
                questions.ensure_indexes().await?;

                let sessions = MongoSessionRepository::new(&db, &config.sessions_collection);
                sessions.ensure_indexes().await?;

                (Arc::new(questions), Arc::new(sessions))
            }
            StorageBackend::Memory => {
                log::warn!("Using in-memory storage, data is lost on shutdown");
                (
                    Arc::new(InMemoryQuestionRepository::new()),
                    Arc::new(InMemorySessionRepository::new()),
                )
            }
        };

        if let Some(path) = &config.question_seed_file {
            let questions = question_seed::load_seed_file(path).await?;
            question_seed::seed_if_empty(question_repository.as_ref(), questions).await?;
        }

        Ok(Self::from_repositories(
            question_repository,
            session_repository,
            config,
        ))
    }

    pub fn from_repositories(
        question_repository: Arc<dyn QuestionRepository>,
        session_repository: Arc<dyn SessionRepository>,
        config: Config,
    ) -> Self {
        let quiz_service = Arc::new(QuizService::new(
            question_repository.clone(),
            session_repository.clone(),
        ));

        Self {
            quiz_service,
            question_repository,
            session_repository,
            config: Arc::new(config),
        }
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.question_repository.ping().await?;
        self.session_repository.ping().await
    }
}
