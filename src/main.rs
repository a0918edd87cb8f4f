//! Coinplay server binary
//!
//! Runs the HTTP API by default, or one of the management subcommands
//! (`init`, `config`). Configuration comes from `coinplay.toml`; secrets
//! are resolved from the environment variables the file names.

use std::process;

use coinplay::{
    api::routes::create_router,
    cli::{
        init::{self, InitConfig, InitResult},
        output::Output,
        Cli, Commands,
    },
    AppState, CoinplayConfig, ConfigError,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(feature = "swagger-ui")]
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
#[cfg(feature = "swagger-ui")]
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI document for the Coinplay API
#[cfg(feature = "swagger-ui")]
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coinplay API",
        description = "Credential-gated wager backend: registration, JWT sessions, and balance-checked game admission"
    ),
    paths(
        coinplay::api::handlers::health::root,
        coinplay::api::handlers::health::health,
        coinplay::api::handlers::auth::register,
        coinplay::api::handlers::auth::login,
        coinplay::api::handlers::auth::me,
        coinplay::api::handlers::games::create_game,
        coinplay::api::handlers::games::list_games,
        coinplay::api::handlers::games::get_game,
        coinplay::api::handlers::games::settle_game,
    ),
    components(schemas(
        coinplay::types::Game,
        coinplay::types::GameStatus,
        coinplay::types::RegisterRequest,
        coinplay::types::LoginRequest,
        coinplay::types::LoginResponse,
        coinplay::types::LoginUser,
        coinplay::types::ProfileResponse,
        coinplay::types::MessageResponse,
        coinplay::api::handlers::health::HealthResponse,
        coinplay::api::handlers::games::CreateGameRequest,
        coinplay::api::handlers::games::SettleGameRequest,
        coinplay::api::handlers::games::GameCreatedResponse,
        coinplay::api::handlers::games::GamesListResponse,
        coinplay::api::handlers::games::GameResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "auth", description = "Registration, login and profile"),
        (name = "games", description = "Wager admission and settlement"),
    )
)]
struct ApiDoc;

/// Registers the `bearer` security scheme the protected paths reference
#[cfg(feature = "swagger-ui")]
struct SecurityAddon;

#[cfg(feature = "swagger-ui")]
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init {
            ref path,
            force,
            ref host,
            port,
        }) => {
            let result = init::run(
                InitConfig {
                    path: path.clone(),
                    force,
                    host: host.clone(),
                    port,
                },
                &output,
            );
            match result {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(e) => anyhow::bail!("initialization failed: {e}"),
            }
        }
        Some(Commands::Config { full, validate }) => show_config(&cli, full, validate, &output),
        None => run_server(&cli, &output).await,
    }
}

/// Print the loaded configuration, optionally as full TOML or as a validation check
fn show_config(cli: &Cli, full: bool, validate: bool, output: &Output) -> anyhow::Result<()> {
    output.header("Coinplay Configuration");

    let config = match CoinplayConfig::load(&cli.config) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(path)) => {
            output.error(&format!("Configuration file not found: {}", path.display()));
            output.hint("Run 'coinplay-server init' to scaffold one");
            process::exit(1);
        }
        Err(e) => {
            output.error(&e.to_string());
            process::exit(1);
        }
    };

    output.kv("File", &cli.config.display().to_string());
    output.kv(
        "Listen",
        &format!("{}:{}", config.server.host, config.server.port),
    );
    output.kv("Log level", &config.server.log_level);
    output.kv("Database", &config.database.path);
    output.kv("JWT secret env", &config.auth.jwt_secret_env);
    output.kv("Token expiry", &format!("{}s", config.auth.token_expiry));
    output.kv("Starting coins", &config.auth.starting_coins.to_string());

    if full {
        output.newline();
        println!("{}", toml::to_string_pretty(&config)?);
    }

    if validate {
        output.newline();
        match config.validate() {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => {
                output.error(&e.to_string());
                process::exit(1);
            }
        }
    }

    Ok(())
}

/// Load the config, open the store and serve the API
async fn run_server(cli: &Cli, output: &Output) -> anyhow::Result<()> {
    output.banner();

    let config = match CoinplayConfig::load(&cli.config) {
        Ok(config) => config,
        Err(ConfigError::FileNotFound(path)) => {
            output.error(&format!("Configuration file not found: {}", path.display()));
            output.hint("Run 'coinplay-server init' to scaffold a deployment");
            process::exit(1);
        }
        Err(e) => {
            output.error(&e.to_string());
            process::exit(1);
        }
    };

    let default_filter = if cli.verbose {
        "coinplay=debug,tower_http=debug".to_string()
    } else {
        config.server.log_level.clone()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or(default_filter),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let provider = config.database.provider();
    tracing::info!(backend = provider.label(), "opening store");

    let store = provider.create_store().await?;
    let state = AppState::new(config, store)?;

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    output.success(&format!("Listening on http://{}", addr));
    #[cfg(feature = "swagger-ui")]
    output.hint(&format!("Swagger UI: http://{}/swagger-ui/", addr));

    tracing::info!(addr = %addr, "coinplay server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
