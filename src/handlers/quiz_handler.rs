use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{SessionParams, SubmitAnswerParams},
};

#[post("/api/quiz/start")]
pub async fn start_session(
    state: web::Data<AppState>,
    query: web::Query<SessionParams>,
) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.start_session(query.user_id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[get("/api/quiz/question")]
pub async fn get_random_question(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let question = state.quiz_service.get_random_question().await?;
    Ok(HttpResponse::Ok().json(question))
}

#[post("/api/quiz/submit")]
pub async fn submit_answer(
    state: web::Data<AppState>,
    query: web::Query<SubmitAnswerParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let session = state
        .quiz_service
        .submit_answer(params.user_id, params.question_id, &params.chosen_option)
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

#[get("/api/quiz/session")]
pub async fn get_session_details(
    state: web::Data<AppState>,
    query: web::Query<SessionParams>,
) -> Result<HttpResponse, AppError> {
    let session = state.quiz_service.get_session_details(query.user_id).await?;
    Ok(HttpResponse::Ok().json(session))
}
