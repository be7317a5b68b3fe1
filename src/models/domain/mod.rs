pub mod question;
pub mod user_session;
pub use question::{NewQuestion, Question};
pub use user_session::UserSession;
