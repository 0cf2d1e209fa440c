use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::{app_state::AppState, models::domain::StudentKey, models::dto::response::MessageResponse};

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness including the document store. States built without a store
/// (tests) report it as not configured.
pub async fn health_check_ready<K: StudentKey>(state: web::Data<AppState<K>>) -> HttpResponse {
    let store = match &state.db {
        Some(db) => match db.health_check().await {
            Ok(()) => "ok",
            Err(e) => {
                log::warn!("Store health check failed: {}", e);
                "error"
            }
        },
        None => "not_configured",
    };

    let response = json!({
        "status": if store == "error" { "not_ready" } else { "ready" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": { "mongodb": store }
    });

    if store == "error" {
        HttpResponse::ServiceUnavailable().json(response)
    } else {
        HttpResponse::Ok().json(response)
    }
}

/// Answers every `OPTIONS` request before authorization.
pub async fn preflight() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("CORS preflight response"))
}

pub async fn unknown_endpoint(req: HttpRequest) -> HttpResponse {
    log::warn!("No route for {} {}", req.method(), req.path());

    HttpResponse::NotFound().json(json!({
        "error": "Invalid API endpoint",
        "receivedPath": req.path()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().route("/health", web::get().to(health_check))).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_unknown_endpoint_echoes_path() {
        let app = test::init_service(App::new().default_service(web::to(unknown_endpoint))).await;

        let req = test::TestRequest::put().uri("/v3/nowhere").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["receivedPath"], "/v3/nowhere");
    }
}
