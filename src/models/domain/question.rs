use serde::{Deserialize, Serialize};

pub const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// A multiple-choice question as stored in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
}

impl Question {
    pub fn from_new(id: i64, new: NewQuestion) -> Self {
        Question {
            id,
            question_text: new.question_text,
            option_a: new.option_a,
            option_b: new.option_b,
            option_c: new.option_c,
            option_d: new.option_d,
            correct_option: new.correct_option,
        }
    }

    /// Case-insensitive match of a submitted option against the correct one.
    /// Folds Unicode case, not only ASCII.
    pub fn is_correct(&self, chosen_option: &str) -> bool {
        self.correct_option.to_lowercase() == chosen_option.to_lowercase()
    }
}

/// A question that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
}

impl NewQuestion {
    pub fn has_known_correct_option(&self) -> bool {
        OPTION_LETTERS
            .iter()
            .any(|letter| letter.eq_ignore_ascii_case(self.correct_option.trim()))
    }
}

#[cfg(test)]
impl NewQuestion {
    pub fn test_question(text: &str, correct_option: &str) -> Self {
        NewQuestion {
            question_text: text.to_string(),
            option_a: "first".to_string(),
            option_b: "second".to_string(),
            option_c: "third".to_string(),
            option_d: "fourth".to_string(),
            correct_option: correct_option.to_string(),
        }
    }
}
