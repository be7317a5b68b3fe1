use std::sync::Arc;

use rand::Rng;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Question, UserSession},
    repositories::{QuestionRepository, SessionRepository},
};

pub struct QuizService {
    questions: Arc<dyn QuestionRepository>,
    sessions: Arc<dyn SessionRepository>,
}

impl QuizService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            questions,
            sessions,
        }
    }

    /// Returns the user's session, creating an empty one on first call.
    pub async fn start_session(&self, user_id: i64) -> AppResult<UserSession> {
        if let Some(existing) = self.sessions.find_by_user_id(user_id).await? {
            log::debug!("Resuming session {} for user {}", existing.id, user_id);
            return Ok(existing);
        }

        let candidate = UserSession::new(user_id);
        let candidate_id = candidate.id.clone();
        let session = self.sessions.create_if_absent(candidate).await?;
        if session.id == candidate_id {
            log::info!("Started session {} for user {}", session.id, user_id);
        } else {
            log::debug!("Session {} for user {} was created concurrently", session.id, user_id);
        }
        Ok(session)
    }

    pub async fn get_random_question(&self) -> AppResult<Question> {
        let mut questions = self.questions.find_all().await?;
        if questions.is_empty() {
            return Err(AppError::EmptyCatalog);
        }

        let index = rand::thread_rng().gen_range(0..questions.len());
        Ok(questions.swap_remove(index))
    }

    /// Grades `chosen_option` against the question and counts it on the user's session.
    ///
    /// The question is resolved first, so an unknown question id never touches the session.
    pub async fn submit_answer(
        &self,
        user_id: i64,
        question_id: i64,
        chosen_option: &str,
    ) -> AppResult<UserSession> {
        let question = self
            .questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Question with id '{}' not found", question_id))
            })?;

        let correct = question.is_correct(chosen_option);

        let session = self
            .sessions
            .record_answer(user_id, correct)
            .await?
            .ok_or_else(|| session_not_found(user_id))?;

        log::debug!(
            "User {} answered question {} ({}): {}/{} correct",
            user_id,
            question_id,
            if correct { "correct" } else { "incorrect" },
            session.correct_answers,
            session.total_questions_answered
        );

        Ok(session)
    }

    pub async fn get_session_details(&self, user_id: i64) -> AppResult<UserSession> {
        self.sessions
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| session_not_found(user_id))
    }
}

fn session_not_found(user_id: i64) -> AppError {
    AppError::NotFound(format!("Session for user '{}' not found", user_id))
}
