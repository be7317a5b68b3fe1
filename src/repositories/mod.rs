pub mod in_memory;
pub mod question_repository;
pub mod session_repository;

pub use in_memory::{InMemoryQuestionRepository, InMemorySessionRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use session_repository::{MongoSessionRepository, SessionRepository};
