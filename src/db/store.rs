//! libsql-backed persistence for accounts and wagers.
//!
//! A [`Store`] wraps a single libsql [`Connection`] opened at construction
//! time. Connections are cheap clones of an inner handle, and sharing one
//! handle keeps `:memory:` databases stable across operations. All balance
//! mutations are single conditional UPDATE statements so they stay atomic
//! without multi-statement transactions.

use crate::types::{AppError, Game, GameStatus, Result, User};
use chrono::Utc;
use libsql::{Builder, Connection, Row};

/// Database provider configuration
#[derive(Debug, Clone, Default)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso database (requires network access)
    #[cfg(feature = "turso")]
    Turso {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Create a store from this provider configuration
    pub async fn create_store(&self) -> Result<Store> {
        match self {
            DatabaseProvider::Memory => Store::new_memory().await,
            DatabaseProvider::SQLite { path } => Store::new_local(path).await,
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { url, auth_token } => {
                Store::new_remote(url.clone(), auth_token.clone()).await
            }
        }
    }

    /// Short backend label for logs. Never exposes connection secrets.
    pub fn label(&self) -> &'static str {
        match self {
            DatabaseProvider::Memory => "memory",
            DatabaseProvider::SQLite { .. } => "sqlite",
            #[cfg(feature = "turso")]
            DatabaseProvider::Turso { .. } => "turso",
        }
    }
}

/// Handle to the accounts and wagers database.
///
/// Cloning the inner [`Connection`] is cheap, so a `Store` can sit behind an
/// `Arc` and serve concurrent requests.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// In-memory store for tests and local development.
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_database(db).await
    }

    /// File-backed SQLite store.
    pub async fn new_local(path: &str) -> Result<Self> {
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database {}: {}", path, e)))?;
        Self::from_database(db).await
    }

    /// Remote Turso store.
    #[cfg(feature = "turso")]
    pub async fn new_remote(url: String, auth_token: String) -> Result<Self> {
        let db = Builder::new_remote(url, auth_token)
            .build()
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Turso: {}", e)))?;
        Self::from_database(db).await
    }

    async fn from_database(db: libsql::Database) -> Result<Self> {
        let conn = db
            .connect()
            .map_err(|e| AppError::Database(format!("Failed to get connection: {}", e)))?;

        let store = Self { conn };
        store.initialize_schema().await?;

        Ok(store)
    }

    fn connection(&self) -> Connection {
        self.conn.clone()
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection();

        // Users table. The three UNIQUE columns back the duplicate check at
        // the storage level, so racing registrations cannot both commit.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                email TEXT UNIQUE NOT NULL,
                phone TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                coins INTEGER NOT NULL DEFAULT 1000 CHECK (coins >= 0),
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create users table: {}", e)))?;

        // Games table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS games (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                game_type TEXT NOT NULL,
                bet_amount INTEGER NOT NULL CHECK (bet_amount > 0),
                status TEXT NOT NULL DEFAULT 'active'
                    CHECK (status IN ('active', 'won', 'lost', 'cancelled')),
                payout INTEGER,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                FOREIGN KEY (user_id) REFERENCES users(id)
            )",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create games table: {}", e)))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_games_user_id ON games(user_id)",
            (),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create games index: {}", e)))?;

        Ok(())
    }

    // ============= User Operations =============

    /// Insert a new user. A UNIQUE violation on any of email, username or
    /// phone is reported as [`AppError::Duplicate`] so concurrent
    /// registrations of the same identity cannot both succeed.
    pub async fn create_user(
        &self,
        id: &str,
        username: &str,
        email: &str,
        phone: &str,
        password_hash: &str,
        coins: i64,
    ) -> Result<()> {
        let conn = self.connection();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO users (id, username, email, phone, password_hash, coins, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            (id, username, email, phone, password_hash, coins, now, now),
        )
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") {
                AppError::Duplicate("Email, username, or phone already exists".to_string())
            } else {
                AppError::Database(format!("Failed to create user: {}", msg))
            }
        })?;

        Ok(())
    }

    /// Check whether any of the three identity fields is already taken.
    pub async fn user_exists(&self, email: &str, username: &str, phone: &str) -> Result<bool> {
        let conn = self.connection();

        let mut rows = conn
            .query(
                "SELECT 1 FROM users WHERE email = ? OR username = ? OR phone = ? LIMIT 1",
                [email, username, phone],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to check for duplicates: {}", e)))?;

        Ok(rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .is_some())
    }

    /// Look up a user by login identifier. Email takes precedence over
    /// username when both could match.
    pub async fn get_user_by_identifier(&self, identifier: &str) -> Result<Option<User>> {
        if let Some(user) = self.get_user_by_column("email", identifier).await? {
            return Ok(Some(user));
        }
        self.get_user_by_column("username", identifier).await
    }

    /// Look up a user by primary key.
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        self.get_user_by_column("id", id).await
    }

    async fn get_user_by_column(&self, column: &str, value: &str) -> Result<Option<User>> {
        let conn = self.connection();

        // Column names come from a fixed in-crate set, never from input.
        let sql = format!(
            "SELECT id, username, email, phone, password_hash, coins, created_at, updated_at
             FROM users WHERE {} = ?",
            column
        );

        let mut rows = conn
            .query(&sql, [value])
            .await
            .map_err(|e| AppError::Database(format!("Failed to query user: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(user_from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    // ============= Balance Operations =============

    /// Conditionally debit `amount` coins. Returns `false` when the balance
    /// is too low; the check and the subtraction happen in one statement so
    /// two racing debits can never overdraw the account.
    pub async fn debit_coins(&self, user_id: &str, amount: i64) -> Result<bool> {
        let conn = self.connection();
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE users SET coins = coins - ?, updated_at = ?
                 WHERE id = ? AND coins >= ?",
                (amount, now, user_id, amount),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to debit coins: {}", e)))?;

        Ok(affected > 0)
    }

    /// Credit `amount` coins to an existing user.
    pub async fn credit_coins(&self, user_id: &str, amount: i64) -> Result<()> {
        let conn = self.connection();
        let now = Utc::now().timestamp();

        let affected = conn
            .execute(
                "UPDATE users SET coins = coins + ?, updated_at = ? WHERE id = ?",
                (amount, now, user_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to credit coins: {}", e)))?;

        if affected == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    // ============= Game Operations =============

    /// Insert a new game in `active` status and return it.
    pub async fn create_game(
        &self,
        id: &str,
        user_id: &str,
        game_type: &str,
        bet_amount: i64,
    ) -> Result<Game> {
        let conn = self.connection();
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO games (id, user_id, game_type, bet_amount, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, 'active', ?, ?)",
            (id, user_id, game_type, bet_amount, now, now),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to create game: {}", e)))?;

        Ok(Game {
            id: id.to_string(),
            user_id: user_id.to_string(),
            game_type: game_type.to_string(),
            bet_amount,
            status: GameStatus::Active,
            payout: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch one game, scoped to its owner.
    pub async fn get_game(&self, id: &str, user_id: &str) -> Result<Option<Game>> {
        let conn = self.connection();

        let mut rows = conn
            .query(
                "SELECT id, user_id, game_type, bet_amount, status, payout, created_at, updated_at
                 FROM games WHERE id = ? AND user_id = ?",
                [id, user_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query game: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            Ok(Some(game_from_row(&row)?))
        } else {
            Ok(None)
        }
    }

    /// List a user's games, newest first.
    pub async fn get_user_games(&self, user_id: &str) -> Result<Vec<Game>> {
        let conn = self.connection();

        // rowid breaks ties within the same second in insertion order
        let mut rows = conn
            .query(
                "SELECT id, user_id, game_type, bet_amount, status, payout, created_at, updated_at
                 FROM games WHERE user_id = ? ORDER BY created_at DESC, rowid DESC",
                [user_id],
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to query games: {}", e)))?;

        let mut games = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
        {
            games.push(game_from_row(&row)?);
        }

        Ok(games)
    }

    /// Move a game out of `active` exactly once. The status filter in the
    /// UPDATE is what guarantees a second settlement attempt finds nothing
    /// to change.
    pub async fn settle_game(
        &self,
        id: &str,
        user_id: &str,
        status: GameStatus,
        payout: Option<i64>,
    ) -> Result<Game> {
        let conn = self.connection();
        let now = Utc::now().timestamp();
        let payout_value = match payout {
            Some(v) => libsql::Value::Integer(v),
            None => libsql::Value::Null,
        };

        let affected = conn
            .execute(
                "UPDATE games SET status = ?, payout = ?, updated_at = ?
                 WHERE id = ? AND user_id = ? AND status = 'active'",
                (status.as_str(), payout_value, now, id, user_id),
            )
            .await
            .map_err(|e| AppError::Database(format!("Failed to update game: {}", e)))?;

        if affected == 0 {
            return match self.get_game(id, user_id).await? {
                Some(_) => Err(AppError::InvalidInput("Game already settled".to_string())),
                None => Err(AppError::NotFound("Game not found".to_string())),
            };
        }

        match self.get_game(id, user_id).await? {
            Some(game) => Ok(game),
            None => Err(AppError::Database(
                "Settled game disappeared during update".to_string(),
            )),
        }
    }
}

fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        username: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        email: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        phone: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        password_hash: row.get(4).map_err(|e| AppError::Database(e.to_string()))?,
        coins: row.get(5).map_err(|e| AppError::Database(e.to_string()))?,
        created_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
        updated_at: row.get(7).map_err(|e| AppError::Database(e.to_string()))?,
    })
}

fn game_from_row(row: &Row) -> Result<Game> {
    let status_str: String = row.get(4).map_err(|e| AppError::Database(e.to_string()))?;
    let status = GameStatus::parse(&status_str)
        .ok_or_else(|| AppError::Database(format!("Unknown game status: {}", status_str)))?;

    // payout column is nullable
    let payout = match row
        .get_value(5)
        .map_err(|e| AppError::Database(e.to_string()))?
    {
        libsql::Value::Integer(v) => Some(v),
        _ => None,
    };

    Ok(Game {
        id: row.get(0).map_err(|e| AppError::Database(e.to_string()))?,
        user_id: row.get(1).map_err(|e| AppError::Database(e.to_string()))?,
        game_type: row.get(2).map_err(|e| AppError::Database(e.to_string()))?,
        bet_amount: row.get(3).map_err(|e| AppError::Database(e.to_string()))?,
        status,
        payout,
        created_at: row.get(6).map_err(|e| AppError::Database(e.to_string()))?,
        updated_at: row.get(7).map_err(|e| AppError::Database(e.to_string()))?,
    })
}
