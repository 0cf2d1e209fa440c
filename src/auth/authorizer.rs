use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    auth::JwtService,
    errors::{AppError, AppResult},
};

static BEARER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^Bearer\s+").expect("BEARER_PREFIX is a valid regex pattern"));

/// Input of a gateway-style authorizer call.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerRequest {
    #[serde(default)]
    pub authorization_token: String,
    #[serde(default)]
    pub method_arn: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub action: String,
    pub effect: String,
    pub resource: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerContext {
    pub uid: String,
    pub email: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
    pub context: AuthorizerContext,
}

/// Verify the credential and grant invoke access to the requested resource.
pub fn authorize_request(jwt: &JwtService, request: &AuthorizerRequest) -> AppResult<AuthorizerResponse> {
    let token = BEARER_PREFIX.replace(request.authorization_token.trim(), "");
    if token.is_empty() {
        return Err(AppError::Unauthorized("Unauthorized".to_string()));
    }

    let claims = jwt.validate_token(&token)?;
    log::info!("Token verified for principal {}", claims.sub);

    Ok(AuthorizerResponse {
        principal_id: claims.sub.clone(),
        policy_document: PolicyDocument {
            version: "2012-10-17".to_string(),
            statement: vec![PolicyStatement {
                action: "execute-api:Invoke".to_string(),
                effect: "Allow".to_string(),
                resource: request.method_arn.clone(),
            }],
        },
        context: AuthorizerContext {
            uid: claims.sub,
            email: claims.email.unwrap_or_default(),
            phone_number: claims.phone_number.unwrap_or_default(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn jwt() -> JwtService {
        JwtService::new(&Config::test_config().jwt_secret, 1)
    }

    #[test]
    fn test_allows_resource_for_valid_token() {
        let jwt = jwt();
        let token = jwt.create_token("uid-7", Some("asha@example.com"), None).unwrap();
        let request = AuthorizerRequest {
            authorization_token: format!("bearer {}", token),
            method_arn: "arn:aws:execute-api:us-east-1:1:api/prod/GET/v3/students/get".to_string(),
        };

        let response = authorize_request(&jwt, &request).unwrap();

        assert_eq!(response.principal_id, "uid-7");
        assert_eq!(response.policy_document.statement[0].effect, "Allow");
        assert_eq!(response.policy_document.statement[0].resource, request.method_arn);
        assert_eq!(response.context.email, "asha@example.com");
        assert_eq!(response.context.phone_number, "");
    }

    #[test]
    fn test_policy_document_key_casing() {
        let jwt = jwt();
        let token = jwt.create_token("uid-7", None, None).unwrap();
        let request = AuthorizerRequest {
            authorization_token: token,
            method_arn: "arn:resource".to_string(),
        };

        let json = serde_json::to_value(authorize_request(&jwt, &request).unwrap()).unwrap();
        assert_eq!(json["principalId"], "uid-7");
        assert_eq!(json["policyDocument"]["Version"], "2012-10-17");
        assert_eq!(json["policyDocument"]["Statement"][0]["Action"], "execute-api:Invoke");
        assert_eq!(json["context"]["uid"], "uid-7");
    }

    #[test]
    fn test_missing_or_bad_token_is_unauthorized() {
        let jwt = jwt();
        for token in ["", "Bearer ", "Bearer not.a.jwt"] {
            let request = AuthorizerRequest {
                authorization_token: token.to_string(),
                method_arn: String::new(),
            };
            assert!(matches!(
                authorize_request(&jwt, &request),
                Err(AppError::Unauthorized(_))
            ));
        }
    }
}
