//! Authentication handlers.
//!
//! Registration, login, and the bearer-scoped profile endpoint.

use crate::{
    auth::middleware::CurrentUser,
    types::{
        AppError, LoginRequest, LoginResponse, LoginUser, MessageResponse, ProfileResponse,
        RegisterRequest, Result,
    },
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use uuid::Uuid;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Missing fields or duplicate identity")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let (username, email, phone, password) = match (
        payload.username.as_deref(),
        payload.email.as_deref(),
        payload.phone.as_deref(),
        payload.password.as_deref(),
    ) {
        (Some(username), Some(email), Some(phone), Some(password))
            if !username.is_empty()
                && !email.is_empty()
                && !phone.is_empty()
                && !password.is_empty() =>
        {
            (username, email, phone, password)
        }
        _ => {
            return Err(AppError::InvalidInput(
                "All fields are required".to_string(),
            ));
        }
    };

    // Friendly pre-check. The UNIQUE constraints in the store still decide
    // when two registrations race past this point.
    if state.store.user_exists(email, username, phone).await? {
        return Err(AppError::Duplicate(
            "Email, username, or phone already exists".to_string(),
        ));
    }

    let password_hash = state.auth_service.hash_password(password)?;

    let user_id = Uuid::new_v4().to_string();
    state
        .store
        .create_user(
            &user_id,
            username,
            email,
            phone,
            &password_hash,
            state.config.auth.starting_coins,
        )
        .await?;

    tracing::info!(username = %username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login with email or username
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields or unknown identifier"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (identifier, password) = match (payload.identifier.as_deref(), payload.password.as_deref())
    {
        (Some(identifier), Some(password)) if !identifier.is_empty() && !password.is_empty() => {
            (identifier, password)
        }
        _ => {
            return Err(AppError::InvalidInput(
                "Identifier and password are required".to_string(),
            ));
        }
    };

    // Unknown identifier is a 400 in this API, not a 404.
    let user = state
        .store
        .get_user_by_identifier(identifier)
        .await?
        .ok_or_else(|| AppError::InvalidInput("User not found".to_string()))?;

    if !state
        .auth_service
        .verify_password(password, &user.password_hash)?
    {
        tracing::warn!(identifier = %identifier, "failed login attempt");
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    let token = state.auth_service.generate_token(&user.id, &user.username)?;

    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            id: user.id,
            username: user.username,
            coins: user.coins,
        },
    }))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "auth",
    security(("bearer" = []))
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        username: user.username,
        coins: user.coins,
    })
}
