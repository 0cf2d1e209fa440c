use actix_web::{web, HttpResponse};

use crate::{
    auth::{authorize_request, AuthorizerRequest, JwtService},
    errors::AppError,
};

/// Gateway-style authorizer: exchanges a bearer token for an allow policy on
/// the requested resource.
pub async fn authorize(
    jwt: web::Data<JwtService>,
    request: web::Json<AuthorizerRequest>,
) -> Result<HttpResponse, AppError> {
    let response = authorize_request(&jwt, &request)?;
    Ok(HttpResponse::Ok().json(response))
}
