use std::path::Path;

use crate::{
    errors::AppResult,
    models::domain::NewQuestion,
    repositories::QuestionRepository,
};

/// Reads a JSON array of questions from `path`.
pub async fn load_seed_file(path: &Path) -> AppResult<Vec<NewQuestion>> {
    let raw = tokio::fs::read_to_string(path).await?;
    let questions: Vec<NewQuestion> = serde_json::from_str(&raw)?;
    log::debug!("Read {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Inserts `questions` only when the catalog is empty. Returns how many were inserted.
pub async fn seed_if_empty(
    repository: &dyn QuestionRepository,
    questions: Vec<NewQuestion>,
) -> AppResult<usize> {
    let existing = repository.count().await?;
    if existing > 0 {
        log::info!("Catalog already holds {} questions, skipping seed", existing);
        return Ok(0);
    }

    let mut inserted = 0;
    for question in questions {
        if !question.has_known_correct_option() {
            log::warn!(
                "Seeding question '{}' with correct option '{}' outside A-D",
                question.question_text,
                question.correct_option
            );
        }
        repository.create(question).await?;
        inserted += 1;
    }

    log::info!("Seeded {} questions", inserted);
    Ok(inserted)
}
