use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cumulative quiz performance for one user. There is at most one per `user_id`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSession {
    pub id: String,
    pub user_id: i64,
    pub total_questions_answered: i64,
    pub correct_answers: i64,
    pub incorrect_answers: i64,
}

impl UserSession {
    pub fn new(user_id: i64) -> Self {
        UserSession {
            id: Uuid::new_v4().to_string(),
            user_id,
            total_questions_answered: 0,
            correct_answers: 0,
            incorrect_answers: 0,
        }
    }

    pub fn record_answer(&mut self, correct: bool) {
        self.total_questions_answered += 1;
        if correct {
            self.correct_answers += 1;
        } else {
            self.incorrect_answers += 1;
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.correct_answers + self.incorrect_answers == self.total_questions_answered
    }
}
