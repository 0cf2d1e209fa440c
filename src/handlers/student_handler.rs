use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::StudentKey,
        dto::{
            request::{ClassUpgradeRequest, IdentifierQuery, RegisterStudentRequest, UpdateStudentRequest},
            response::MessageResponse,
        },
    },
};

pub async fn register_student<K: StudentKey>(
    state: web::Data<AppState<K>>,
    request: web::Json<RegisterStudentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = auth.key::<K>()?;
    state.student_service.register(&id, &auth.0, &request).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Student registered successfully")))
}

pub async fn get_student<K: StudentKey>(
    state: web::Data<AppState<K>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = auth.key::<K>()?;
    let profile = state.student_service.profile(&id, &auth.0).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub async fn update_student<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<IdentifierQuery>,
    request: web::Json<UpdateStudentRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = auth.key::<K>()?;
    let identifier = query.require()?;

    state
        .student_service
        .update(&caller, &auth.0, identifier, &request)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Student updated successfully")))
}

pub async fn lookup_student<K: StudentKey>(
    state: web::Data<AppState<K>>,
    query: web::Query<IdentifierQuery>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let caller = auth.key::<K>()?;
    let identifier = query.require()?;

    let student = state.student_service.lookup(&caller, identifier).await?;
    Ok(HttpResponse::Ok().json(student))
}

pub async fn student_progress<K: StudentKey>(
    state: web::Data<AppState<K>>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = auth.key::<K>()?;
    let report = state.progress_service.progress(&id).await?;
    Ok(HttpResponse::Ok().json(report))
}

pub async fn upgrade_class<K: StudentKey>(
    state: web::Data<AppState<K>>,
    request: web::Json<ClassUpgradeRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let id = auth.key::<K>()?;
    let response = state.student_service.upgrade_class(&id, &request).await?;
    Ok(HttpResponse::Ok().json(response))
}
