pub mod auth_handler;
pub mod quiz_handler;
pub mod student_handler;
pub mod system_handler;

use actix_web::{guard, web};

use crate::{auth::AuthMiddleware, errors::AppError, models::domain::StudentKey};

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            log::debug!("Rejected JSON body: {}", err);
            AppError::BadRequest("Invalid JSON format".to_string()).into()
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected query string: {}", err);
        AppError::BadRequest("Invalid query parameters".to_string()).into()
    })
}

/// Register every route for the store generation keyed by `K`. The app must
/// also provide `web::Data<AppState<K>>` and `web::Data<JwtService>`.
pub fn configure<K: StudentKey>(cfg: &mut web::ServiceConfig) {
    use quiz_handler::*;
    use student_handler::*;

    cfg.app_data(json_config())
        .app_data(query_config())
        .service(
            web::resource("/{tail:.*}")
                .guard(guard::Options())
                .to(system_handler::preflight),
        )
        .route("/health", web::get().to(system_handler::health_check))
        .route("/health/ready", web::get().to(system_handler::health_check_ready::<K>))
        .route("/authorize", web::post().to(auth_handler::authorize))
        .service(
            web::scope(K::GENERATION.route_prefix())
                .wrap(AuthMiddleware)
                .route("/students/register", web::post().to(register_student::<K>))
                .route("/students/get", web::get().to(get_student::<K>))
                .route("/students/update", web::post().to(update_student::<K>))
                .route("/students/lookup", web::get().to(lookup_student::<K>))
                .route("/students/progress", web::get().to(student_progress::<K>))
                .route("/students/upgrade-class", web::post().to(upgrade_class::<K>))
                .route("/quiz/get-by-name", web::get().to(get_quiz::<K>))
                .route("/quiz/submit", web::post().to(submit_quiz::<K>))
                .route("/quiz/result", web::get().to(quiz_result::<K>))
                .route("/quiz/unattempted-quizzes", web::get().to(unattempted_quizzes::<K>))
                .route("/quiz/delete", web::delete().to(delete_quiz::<K>))
                .route("/quiz/delete", web::post().to(delete_quiz::<K>))
                .route("/upload/questions", web::post().to(upload_quiz::<K>)),
        )
        .default_service(web::to(system_handler::unknown_endpoint));
}
