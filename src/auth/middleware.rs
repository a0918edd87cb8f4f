use crate::types::{AppError, User};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

/// Bearer-token middleware for protected routes.
///
/// Verifies the token signature and expiry, then resolves the subject to a
/// live user row. Claims alone are never trusted for balance decisions;
/// handlers downstream always see the account as it exists right now.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid authorization header".to_string()))?;

    let claims = state.auth_service.verify_token(token)?;

    let user = state
        .store
        .get_user_by_id(&claims.sub)
        .await?
        .ok_or_else(|| AppError::Auth("Invalid token".to_string()))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Extractor handing the middleware-resolved user to handlers.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AppError::Auth("Missing authentication".to_string()))
    }
}
