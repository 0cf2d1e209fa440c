use actix_multipart::Multipart;
use actix_web::{http::header, web, HttpRequest, HttpResponse};
use futures::{StreamExt, TryStreamExt};

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, Capability},
    errors::{AppError, AppResult},
    models::{
        domain::StudentKey,
        dto::{
            quiz_dto::{
                QuizDeletedResponse, QuizListResponse, SubmitQuizRequest, UploadQuizParams,
                UploadQuizResponse,
            },
            request::{CategoryQuery, QuizNameQuery},
        },
    },
    services::content_loader,
};

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

fn too_large() -> AppError {
    AppError::BadRequest("File exceeds the 10 MiB upload limit".to_string())
}

pub async fn get_quiz<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<QuizNameQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(query.require()?).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

pub async fn submit_quiz<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<QuizNameQuery>,
    request: web::Json<SubmitQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = auth.key::<K>()?;
    let response = state
        .attempt_service
        .submit(&id, query.require()?, &request.answers)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn quiz_result<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<QuizNameQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = auth.key::<K>()?;
    let attempt = state.attempt_service.get_result(&id, query.require()?).await?;
    Ok(HttpResponse::Ok().json(attempt))
}

pub async fn unattempted_quizzes<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<CategoryQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let names = state.quiz_service.list_by_category(query.require()?).await?;
    Ok(HttpResponse::Ok().json(QuizListResponse {
        unattempted_quizzes: names,
    }))
}

async fn read_multipart_file(req: &HttpRequest, payload: web::Payload) -> AppResult<Vec<u8>> {
    let mut multipart = Multipart::new(req.headers(), payload);

    while let Some(mut field) = multipart.try_next().await? {
        if field.name() != Some("file") {
            continue;
        }

        let mut file = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if file.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(too_large());
            }
            file.extend_from_slice(&chunk);
        }
        return Ok(file);
    }

    Ok(Vec::new())
}

async fn read_raw_body(mut payload: web::Payload) -> AppResult<Vec<u8>> {
    let mut body = Vec::new();
    while let Some(chunk) = payload.next().await {
        let chunk =
            chunk.map_err(|_| AppError::BadRequest("Failed to read file content".to_string()))?;
        if body.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(too_large());
        }
        body.extend_from_slice(&chunk);
    }
    content_loader::decode_upload(&body)
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.to_ascii_lowercase().starts_with("multipart/"))
}

/// Accepts the sheet as a `file` form part or as the raw (optionally
/// base64-encoded) request body.
pub async fn upload_quiz<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<UploadQuizParams>,
    req: HttpRequest,
    payload: web::Payload,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = auth.key::<K>()?;
    state
        .student_service
        .require(&caller, Capability::ManageQuizzes)
        .await?;

    let upload = query.parse()?;

    let file = if is_multipart(&req) {
        read_multipart_file(&req, payload).await?
    } else {
        read_raw_body(payload).await?
    };

    if file.is_empty() {
        return Err(AppError::BadRequest("File content is empty or missing".to_string()));
    }

    let quiz = state.quiz_service.upload_quiz(file, &upload).await?;

    Ok(HttpResponse::Created().json(UploadQuizResponse {
        message: "Quiz uploaded successfully".to_string(),
        question_count: quiz.question_count(),
        quiz_name: quiz.quiz_name,
        category: quiz.category,
        duration: quiz.duration,
    }))
}

pub async fn delete_quiz<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<QuizNameQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = auth.key::<K>()?;
    state
        .student_service
        .require(&caller, Capability::ManageQuizzes)
        .await?;

    let quiz_name = query.require()?;
    let attempts_removed = state.quiz_service.delete_quiz(quiz_name).await?;

    Ok(HttpResponse::Ok().json(QuizDeletedResponse {
        message: "Quiz deleted successfully".to_string(),
        quiz_name: quiz_name.to_string(),
        attempts_removed,
    }))
}
