use actix_web::{dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use uuid::Uuid;

use crate::jwt;
use crate::role::UserRole;

/// Authenticated caller resolved from a Bearer access token
///
/// Handlers that require authentication take this as a parameter; routes
/// without it stay public. Extraction fails with 401 before the handler
/// body runs, so authorization code can assume a valid identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    fn from_http_request(req: &HttpRequest) -> Result<Self, actix_web::Error> {
        let auth_header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ErrorUnauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ErrorUnauthorized("Invalid Authorization header format"))?;

        let token_data = jwt::validate_token(token).map_err(|e| {
            tracing::warn!("JWT validation failed: {}", e);
            ErrorUnauthorized(format!("Invalid token: {}", e))
        })?;

        // Refresh tokens are only good for the refresh endpoint
        if token_data.claims.token_type != "access" {
            return Err(ErrorUnauthorized("Invalid token: not an access token"));
        }

        let id = Uuid::parse_str(&token_data.claims.sub).map_err(|e| {
            tracing::error!("Invalid user_id UUID in token: {}", e);
            ErrorUnauthorized("Invalid token: malformed user_id")
        })?;

        let role = token_data.claims.role.parse().unwrap_or_default();

        Ok(AuthenticatedUser {
            id,
            email: token_data.claims.email,
            role,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn init_secret() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            let _ = jwt::initialize_jwt_secret("test-secret-for-unit-tests");
        });
    }

    #[test]
    fn test_missing_header_rejected() {
        init_secret();

        let req = TestRequest::default().to_http_request();
        let result = AuthenticatedUser::from_http_request(&req);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_bearer_header_rejected() {
        init_secret();

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_http_request();
        let result = AuthenticatedUser::from_http_request(&req);
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        init_secret();

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_http_request();
        let result = AuthenticatedUser::from_http_request(&req);
        assert!(result.is_err());
    }

    #[test]
    fn test_refresh_token_rejected_for_api_access() {
        init_secret();

        let user_id = Uuid::new_v4();
        let refresh = jwt::generate_refresh_token(user_id, "test@example.com", UserRole::User)
            .expect("Failed to generate refresh token");

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", refresh)))
            .to_http_request();
        let result = AuthenticatedUser::from_http_request(&req);
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_access_token_extracts_identity() {
        init_secret();

        let user_id = Uuid::new_v4();
        let token =
            jwt::generate_access_token(user_id, "admin@example.com", UserRole::Administrator)
                .expect("Failed to generate token");

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        let user = AuthenticatedUser::from_http_request(&req).expect("extraction should succeed");

        assert_eq!(user.id, user_id);
        assert_eq!(user.email, "admin@example.com");
        assert!(user.role.is_admin());
    }
}
