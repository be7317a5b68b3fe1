use serde::Deserialize;

/// Query parameters for `/api/quiz/start` and `/api/quiz/session`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionParams {
    pub user_id: i64,
}

/// Query parameters for `/api/quiz/submit`.
///
/// `chosen_option` is free-form. Anything that does not match the
/// correct option, including an empty string, is graded as incorrect.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerParams {
    pub user_id: i64,
    pub question_id: i64,
    pub chosen_option: String,
}
