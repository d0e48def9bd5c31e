//! Authentication middleware for Axum

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::{User, UserStatus, UserStoreInterface};
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig};
use crate::infrastructure::database::repositories::SeaOrmUserStore;
use crate::interfaces::http::common::ApiResponse;

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    UserNotFound,
    AccountInactive,
}

/// Authentication state: JWT config plus the identity store used to
/// resolve the token subject into a full user record.
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
    pub users: Arc<SeaOrmUserStore>,
}

/// The acting user for the current request. Policy decisions need the
/// full record (role, affiliation, status), not just the token claims,
/// so the middleware loads it from the store on every request.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = auth_header else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let claims = match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => claims,
        Err(_) => return auth_error_response(AuthError::InvalidToken),
    };
    if claims.is_expired() {
        return auth_error_response(AuthError::ExpiredToken);
    }
    let Some(user_id) = claims.user_id() else {
        return auth_error_response(AuthError::InvalidToken);
    };

    let user = match auth_state.users.find_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => return auth_error_response(AuthError::UserNotFound),
        Err(_) => return auth_error_response(AuthError::UserNotFound),
    };

    if user.status == UserStatus::Suspended {
        return auth_error_response(AuthError::AccountInactive);
    }

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, message) = match error {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing authorization token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid authorization token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "Token has expired"),
        AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "User not found"),
        AuthError::AccountInactive => (StatusCode::FORBIDDEN, "Account is suspended"),
    };

    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
