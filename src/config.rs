use std::{env, path::PathBuf, str::FromStr};

use secrecy::SecretString;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Mongo,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StorageBackend::Mongo),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub storage_backend: StorageBackend,
    pub mongo_conn_string: SecretString,
    pub mongo_db_name: String,
    pub mongo_max_pool_size: u32,
    pub mongo_min_pool_size: u32,
    pub mongo_timeout_secs: u64,
    pub questions_collection: String,
    pub sessions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub question_seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("{}, falling back to mongo", err);
                StorageBackend::Mongo
            }),
            Err(_) => StorageBackend::Mongo,
        };

        Self {
            storage_backend,
            mongo_conn_string: SecretString::from(
                env::var("MONGO_CONN_STRING")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            ),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quiz-local".to_string()),
            mongo_max_pool_size: parse_env("MONGO_MAX_POOL_SIZE", 10),
            mongo_min_pool_size: parse_env("MONGO_MIN_POOL_SIZE", 0),
            mongo_timeout_secs: parse_env("MONGO_TIMEOUT_SECS", 5),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            sessions_collection: env::var("SESSIONS_COLLECTION")
                .unwrap_or_else(|_| "user_sessions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: parse_env("WEB_SERVER_PORT", 8080),
            question_seed_file: env::var("QUESTION_SEED_FILE")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn test_config() -> Self {
        Self {
            storage_backend: StorageBackend::Memory,
            mongo_conn_string: SecretString::from("mongodb://localhost:27017".to_string()),
            mongo_db_name: "quiz-test".to_string(),
            mongo_max_pool_size: 4,
            mongo_min_pool_size: 0,
            mongo_timeout_secs: 1,
            questions_collection: "questions".to_string(),
            sessions_collection: "user_sessions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            question_seed_file: None,
        }
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
