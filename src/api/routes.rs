use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};

/// Assemble the full application router.
///
/// Auth and game routes live under `/api`; the banner and health check sit
/// at the root. Protected routes run behind the bearer middleware, which
/// resolves the token to a live user before any handler sees the request.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/register", post(crate::api::handlers::auth::register))
        .route("/auth/login", post(crate::api::handlers::auth::login));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/auth/me", get(crate::api::handlers::auth::me))
        .route(
            "/games",
            get(crate::api::handlers::games::list_games)
                .post(crate::api::handlers::games::create_game),
        )
        .route(
            "/games/{game_id}",
            get(crate::api::handlers::games::get_game)
                .put(crate::api::handlers::games::settle_game),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::auth_middleware,
        ));

    Router::new()
        .route("/", get(crate::api::handlers::health::root))
        .route("/health", get(crate::api::handlers::health::health))
        .nest("/api", public_routes.merge(protected_routes))
        .with_state(state)
}
