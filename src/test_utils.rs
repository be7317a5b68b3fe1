use crate::models::domain::NewQuestion;

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Four questions whose correct options cover every letter once.
    pub fn sample_questions() -> Vec<NewQuestion> {
        ["A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, letter)| NewQuestion::test_question(&format!("Question {}", i + 1), letter))
            .collect()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_sample_questions_cover_all_letters() {
        let questions = sample_questions();
        let letters: Vec<_> = questions.iter().map(|q| q.correct_option.as_str()).collect();

        assert_eq!(letters, vec!["A", "B", "C", "D"]);
        assert!(questions.iter().all(|q| q.has_known_correct_option()));
    }
}
