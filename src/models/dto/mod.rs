pub mod request;
pub use request::{SessionParams, SubmitAnswerParams};
