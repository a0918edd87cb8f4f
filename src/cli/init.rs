//! Deployment scaffolding for `coinplay-server init`.
//!
//! Writes coinplay.toml, .env.example and a data/ directory so a fresh
//! checkout can reach a running server without hand-writing config.

use super::output::Output;
use std::fs;
use std::path::Path;

/// Outcome of a scaffolding run.
pub enum InitResult {
    /// All files written
    Success,
    /// A coinplay.toml was found and `--force` was not given
    AlreadyExists,
    /// Scaffolding stopped on an I/O error
    Error(String),
}

/// Inputs for a scaffolding run, filled from the CLI flags.
pub struct InitConfig {
    /// Target directory
    pub path: std::path::PathBuf,
    /// Overwrite files that already exist
    pub force: bool,
    /// Listen host written into the generated config
    pub host: String,
    /// Listen port written into the generated config
    pub port: u16,
}

/// Scaffold a deployment under `config.path`.
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Coinplay Project");

    let base_path = &config.path;

    let config_path = base_path.join("coinplay.toml");
    if config_path.exists() && !config.force {
        output.warning("coinplay.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    output.subheader("Creating directories");
    let data_dir = base_path.join("data");
    if data_dir.exists() {
        output.skipped("data", "exists");
    } else if let Err(e) = fs::create_dir_all(&data_dir) {
        output.error(&format!("Failed to create data: {e}"));
        return InitResult::Error(e.to_string());
    } else {
        output.created_dir("data");
    }

    output.subheader("Creating configuration files");
    let files = [
        ("coinplay.toml", "config", generate_coinplay_toml(&config)),
        (".env.example", "env", generate_env_example()),
    ];
    for (name, kind, contents) in &files {
        match write_file(&base_path.join(name), contents, config.force) {
            Ok(true) => output.created(kind, name),
            Ok(false) => output.skipped(name, "exists"),
            Err(e) => {
                output.error(&format!("Failed to create {name}: {e}"));
                return InitResult::Error(e.to_string());
            }
        }
    }

    // An existing .gitignore is never overwritten, --force included.
    match write_file(&base_path.join(".gitignore"), &generate_gitignore(), false) {
        Ok(true) => output.created("file", ".gitignore"),
        Ok(false) => {}
        Err(e) => output.warning(&format!("Failed to create .gitignore: {e}")),
    }

    output.complete("Coinplay project initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Set up environment variables:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set COINPLAY_JWT_SECRET (min 32 chars)");
    output.newline();

    output.info("2. Start the server:");
    output.command("coinplay-server");
    output.newline();

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));
    output.hint("API docs available at /swagger-ui/ (requires 'swagger-ui' feature)");
    output.hint("Build with: cargo build --features swagger-ui");

    InitResult::Success
}

/// Write `content` to `path`. Returns `Ok(false)` when an existing file
/// was left alone because `force` was off.
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

fn generate_coinplay_toml(config: &InitConfig) -> String {
    format!(
        r#"# Coinplay Configuration
# ======================
# Generated by: coinplay-server init
#
# REQUIRED: Set this environment variable before starting:
#   - COINPLAY_JWT_SECRET: secret key for JWT signing (min 32 characters)
#
# Secrets never live in this file. Fields ending in _env name the
# environment variable that holds the actual value.

# =============================================================================
# Server Configuration
# =============================================================================
[server]
host = "{host}"
port = {port}
log_level = "info"

# =============================================================================
# Authentication Configuration
# =============================================================================
[auth]
jwt_secret_env = "COINPLAY_JWT_SECRET"
# Token lifetime in seconds (3 days)
token_expiry = 259200
# Coins granted to newly registered accounts
starting_coins = 1000

# =============================================================================
# Database Configuration
# =============================================================================
[database]
path = "./data/coinplay.db"

# Remote Turso database (requires the 'turso' build feature):
# turso_url_env = "TURSO_DATABASE_URL"
# turso_token_env = "TURSO_AUTH_TOKEN"
"#,
        host = config.host,
        port = config.port,
    )
}

fn generate_env_example() -> String {
    r#"# Coinplay Environment Variables
# ==============================
# Copy this file to .env and fill in the values.

# REQUIRED: JWT secret for authentication (minimum 32 characters)
# Generate with: openssl rand -base64 32
COINPLAY_JWT_SECRET=change-me-in-production-use-at-least-32-characters

# Optional: Logging level (trace, debug, info, warn, error)
RUST_LOG=info,coinplay=debug

# Optional: Turso cloud database (if using remote database)
# TURSO_DATABASE_URL=libsql://your-db.turso.io
# TURSO_AUTH_TOKEN=your-token
"#
    .to_string()
}

fn generate_gitignore() -> String {
    r#"# Coinplay Generated Files
/data/
*.db
*.db-journal

# Environment
.env
.env.local
.env.*.local

# Rust
/target/
Cargo.lock

# IDE
.idea/
.vscode/
*.swp
*.swo
*~

# OS
.DS_Store
Thumbs.db
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::config::CoinplayConfig;
    use tempfile::TempDir;

    fn scaffold_config(dir: &TempDir, force: bool) -> InitConfig {
        InitConfig {
            path: dir.path().to_path_buf(),
            force,
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_generate_coinplay_toml() {
        let config = InitConfig {
            path: std::path::PathBuf::from("/tmp"),
            force: false,
            host: "127.0.0.1".to_string(),
            port: 3000,
        };

        let content = generate_coinplay_toml(&config);

        assert!(content.contains("[server]"));
        assert!(content.contains("host = \"127.0.0.1\""));
        assert!(content.contains("port = 3000"));
        assert!(content.contains("jwt_secret_env = \"COINPLAY_JWT_SECRET\""));
        assert!(content.contains("starting_coins = 1000"));
        assert!(content.contains("path = \"./data/coinplay.db\""));
    }

    #[test]
    fn test_generated_toml_parses_as_config() {
        let config = InitConfig {
            path: std::path::PathBuf::from("/tmp"),
            force: false,
            host: "0.0.0.0".to_string(),
            port: 8080,
        };

        let content = generate_coinplay_toml(&config);
        let parsed: CoinplayConfig = toml::from_str(&content).unwrap();

        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.auth.jwt_secret_env, "COINPLAY_JWT_SECRET");
        assert_eq!(parsed.auth.token_expiry, 259_200);
        assert_eq!(parsed.database.path, "./data/coinplay.db");
    }

    #[test]
    fn test_generate_env_example() {
        let content = generate_env_example();

        assert!(content.contains("COINPLAY_JWT_SECRET"));
        assert!(content.contains("RUST_LOG"));
        assert!(content.contains("TURSO_DATABASE_URL"));
    }

    #[test]
    fn test_generate_gitignore() {
        let content = generate_gitignore();

        assert!(content.contains("/data/"));
        assert!(content.contains(".env"));
        assert!(content.contains("/target/"));
        assert!(content.contains(".DS_Store"));
    }

    #[test]
    fn test_write_file_creates_new() {
        let dir = TempDir::new().expect("temp dir");
        let file_path = dir.path().join("test.txt");

        let wrote = write_file(&file_path, "test content", false).expect("write");
        assert!(wrote);
        assert_eq!(
            fs::read_to_string(&file_path).expect("read back"),
            "test content"
        );
    }

    #[test]
    fn test_write_file_skips_existing_without_force() {
        let dir = TempDir::new().expect("temp dir");
        let file_path = dir.path().join("test.txt");
        fs::write(&file_path, "original").expect("seed file");

        let wrote = write_file(&file_path, "new content", false).expect("write");
        assert!(!wrote);
        assert_eq!(
            fs::read_to_string(&file_path).expect("read back"),
            "original"
        );
    }

    #[test]
    fn test_write_file_overwrites_with_force() {
        let dir = TempDir::new().expect("temp dir");
        let file_path = dir.path().join("test.txt");
        fs::write(&file_path, "original").expect("seed file");

        let wrote = write_file(&file_path, "new content", true).expect("write");
        assert!(wrote);
        assert_eq!(
            fs::read_to_string(&file_path).expect("read back"),
            "new content"
        );
    }

    #[test]
    fn test_run_creates_all_files() {
        let dir = TempDir::new().expect("temp dir");
        let output = Output::no_color();

        let result = run(scaffold_config(&dir, false), &output);
        assert!(matches!(result, InitResult::Success));

        assert!(dir.path().join("coinplay.toml").exists());
        assert!(dir.path().join(".env.example").exists());
        assert!(dir.path().join(".gitignore").exists());
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn test_run_already_exists_without_force() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("coinplay.toml"), "existing").expect("seed file");

        let output = Output::no_color();
        let result = run(scaffold_config(&dir, false), &output);

        assert!(matches!(result, InitResult::AlreadyExists));
    }

    #[test]
    fn test_run_force_overwrites() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("coinplay.toml"), "existing").expect("seed file");

        let output = Output::no_color();
        let result = run(scaffold_config(&dir, true), &output);
        assert!(matches!(result, InitResult::Success));

        let content =
            fs::read_to_string(dir.path().join("coinplay.toml")).expect("read back");
        assert!(content.contains("[server]"));
        assert!(!content.contains("existing"));
    }
}
