use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use actix_web::{test, web, App};
use async_trait::async_trait;
use quiz_session_server::{
    app_state::AppState,
    config::Config,
    errors::AppResult,
    handlers,
    middleware::{RequestIdMiddleware, REQUEST_ID_HEADER},
    models::domain::{NewQuestion, Question, UserSession},
    repositories::{
        InMemoryQuestionRepository, InMemorySessionRepository, QuestionRepository,
        SessionRepository,
    },
    services::QuizService,
};

fn new_question(text: &str, correct_option: &str) -> NewQuestion {
    NewQuestion {
        question_text: text.to_string(),
        option_a: "alpha".to_string(),
        option_b: "bravo".to_string(),
        option_c: "charlie".to_string(),
        option_d: "delta".to_string(),
        correct_option: correct_option.to_string(),
    }
}

async fn seeded_state() -> (AppState, Question, Question) {
    let questions = Arc::new(InMemoryQuestionRepository::new());
    let q1 = questions.create(new_question("Q1", "A")).await.unwrap();
    let q2 = questions.create(new_question("Q2", "B")).await.unwrap();

    let state = AppState::from_repositories(
        questions,
        Arc::new(InMemorySessionRepository::new()),
        Config::test_config(),
    );
    (state, q1, q2)
}

#[actix_rt::test]
async fn quiz_flow_end_to_end() {
    let (state, q1, q2) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/quiz/start?userId=42")
        .to_request();
    let started: UserSession = test::call_and_read_body_json(&app, req).await;
    assert_eq!(started.total_questions_answered, 0);

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/quiz/submit?userId=42&questionId={}&chosenOption=A",
            q1.id
        ))
        .to_request();
    let after_first: UserSession = test::call_and_read_body_json(&app, req).await;
    assert_eq!(after_first.total_questions_answered, 1);
    assert_eq!(after_first.correct_answers, 1);
    assert_eq!(after_first.incorrect_answers, 0);

    let req = test::TestRequest::post()
        .uri(&format!(
            "/api/quiz/submit?userId=42&questionId={}&chosenOption=C",
            q2.id
        ))
        .to_request();
    let after_second: UserSession = test::call_and_read_body_json(&app, req).await;
    assert_eq!(after_second.total_questions_answered, 2);
    assert_eq!(after_second.correct_answers, 1);
    assert_eq!(after_second.incorrect_answers, 1);

    let req = test::TestRequest::get()
        .uri("/api/quiz/session?userId=42")
        .to_request();
    let details: UserSession = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details, after_second);
    assert_eq!(details.id, started.id);
}

#[actix_rt::test]
async fn start_session_is_idempotent_and_keeps_counters() {
    let (state, q1, _) = seeded_state().await;
    let service = state.quiz_service.clone();

    let first = service.start_session(7).await.unwrap();
    service.submit_answer(7, q1.id, "a").await.unwrap();
    let second = service.start_session(7).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.total_questions_answered, 1);
    assert_eq!(second.correct_answers, 1);
}

#[actix_rt::test]
async fn unknown_question_leaves_session_untouched() {
    let (state, _, _) = seeded_state().await;
    let service = state.quiz_service.clone();

    let before = service.start_session(9).await.unwrap();
    assert!(service.submit_answer(9, 999, "A").await.is_err());
    let after = service.get_session_details(9).await.unwrap();

    assert_eq!(before, after);
}

#[actix_rt::test]
async fn counters_stay_consistent_over_mixed_submissions() {
    let (state, q1, q2) = seeded_state().await;
    let service = state.quiz_service.clone();
    service.start_session(1).await.unwrap();

    let submissions = [
        (q1.id, "A"),
        (q1.id, "b"),
        (q2.id, "b"),
        (q2.id, ""),
        (q1.id, "x"),
        (q2.id, "B"),
    ];
    for (question_id, choice) in submissions {
        let session = service.submit_answer(1, question_id, choice).await.unwrap();
        assert_eq!(
            session.correct_answers + session.incorrect_answers,
            session.total_questions_answered
        );
    }

    let session = service.get_session_details(1).await.unwrap();
    assert_eq!(session.total_questions_answered, 6);
    assert_eq!(session.correct_answers, 3);
}

#[actix_rt::test]
async fn random_question_always_comes_from_catalog() {
    let (state, q1, q2) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::configure),
    )
    .await;

    for _ in 0..20 {
        let req = test::TestRequest::get().uri("/api/quiz/question").to_request();
        let question: Question = test::call_and_read_body_json(&app, req).await;
        assert!(question == q1 || question == q2);
    }
}

#[actix_rt::test]
async fn responses_carry_request_id_header() {
    let (state, _, _) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/quiz/session?userId=404")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
}

#[actix_rt::test]
async fn health_endpoint_reports_healthy() {
    let (state, _, _) = seeded_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_rt::test]
async fn memory_backend_seeds_catalog_from_file() {
    let mut config = Config::test_config();
    config.question_seed_file =
        Some(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/questions.json"));

    let state = AppState::new(config).await.unwrap();

    assert_eq!(state.question_repository.count().await.unwrap(), 4);
    let question = state.quiz_service.get_random_question().await.unwrap();
    assert!((1..=4).contains(&question.id));
}

/// Session store whose first lookup answers from a stale read, after a pause.
struct SlowFirstLookup {
    inner: InMemorySessionRepository,
    delayed: AtomicBool,
}

#[async_trait]
impl SessionRepository for SlowFirstLookup {
    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Option<UserSession>> {
        let found = self.inner.find_by_user_id(user_id).await;
        if !self.delayed.swap(true, Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        found
    }

    async fn save(&self, session: UserSession) -> AppResult<UserSession> {
        self.inner.save(session).await
    }

    async fn create_if_absent(&self, session: UserSession) -> AppResult<UserSession> {
        self.inner.create_if_absent(session).await
    }

    async fn record_answer(
        &self,
        user_id: i64,
        correct: bool,
    ) -> AppResult<Option<UserSession>> {
        self.inner.record_answer(user_id, correct).await
    }

    async fn ping(&self) -> AppResult<()> {
        self.inner.ping().await
    }
}

#[actix_rt::test]
async fn overlapping_starts_do_not_reset_counters() {
    let questions = Arc::new(InMemoryQuestionRepository::new());
    let question = questions.create(new_question("Q1", "A")).await.unwrap();
    let sessions = Arc::new(SlowFirstLookup {
        inner: InMemorySessionRepository::new(),
        delayed: AtomicBool::new(false),
    });
    let service = QuizService::new(questions, sessions);

    let slow_start = service.start_session(1);
    let fast_path = async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let started = service.start_session(1).await.unwrap();
        let answered = service.submit_answer(1, question.id, "A").await.unwrap();
        (started, answered)
    };
    let (slow, (fast, answered)) = tokio::join!(slow_start, fast_path);
    let slow = slow.unwrap();

    assert_eq!(answered.total_questions_answered, 1);
    assert_eq!(slow.id, fast.id);

    let current = service.get_session_details(1).await.unwrap();
    assert_eq!(current.id, fast.id);
    assert_eq!(current.total_questions_answered, 1);
    assert_eq!(current.correct_answers, 1);
}
