pub mod question_seed;
pub mod quiz_service;

pub use quiz_service::QuizService;
