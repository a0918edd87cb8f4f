//! Store integration tests
//!
//! These tests exercise the libsql-backed Store against an in-memory
//! database: identity uniqueness, balance movements, and game settlement.

use coinplay::db::Store;
use coinplay::types::{AppError, GameStatus};

/// Test helper to create a Store with an in-memory database
async fn create_test_store() -> Store {
    Store::new_memory()
        .await
        .expect("Failed to create in-memory database")
}

/// Test helper to insert a user with a fixed password hash
async fn seed_user(store: &Store, id: &str, username: &str, email: &str, phone: &str, coins: i64) {
    store
        .create_user(id, username, email, phone, "argon2-hash", coins)
        .await
        .expect("User creation should succeed");
}

// ============= Store Construction Tests =============

#[tokio::test]
async fn test_create_memory_store() {
    let store = create_test_store().await;

    // Schema is initialized; a lookup on the empty table succeeds
    let user = store
        .get_user_by_id("nobody")
        .await
        .expect("Query should succeed");
    assert!(user.is_none());
}

#[tokio::test]
async fn test_create_local_store() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("coinplay-test.db");

    let store = Store::new_local(path.to_str().expect("utf-8 path"))
        .await
        .expect("Failed to create local database");

    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;
    let user = store
        .get_user_by_id("u-1")
        .await
        .expect("Query should succeed");
    assert!(user.is_some());
}

// ============= User Tests =============

#[tokio::test]
async fn test_create_user_and_get_by_id() {
    let store = create_test_store().await;

    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let user = store
        .get_user_by_id("u-1")
        .await
        .expect("Query should succeed")
        .expect("User should exist");

    assert_eq!(user.id, "u-1");
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");
    assert_eq!(user.phone, "+15550100");
    assert_eq!(user.coins, 1000);
    assert_eq!(user.password_hash, "argon2-hash");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let store = create_test_store().await;

    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let result = store
        .create_user("u-2", "bob", "alice@example.com", "+15550101", "hash", 1000)
        .await;

    match result {
        Err(AppError::Duplicate(msg)) => {
            assert_eq!(msg, "Email, username, or phone already exists")
        }
        other => panic!("expected Duplicate error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let store = create_test_store().await;

    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let result = store
        .create_user("u-2", "alice", "bob@example.com", "+15550101", "hash", 1000)
        .await;

    assert!(matches!(result, Err(AppError::Duplicate(_))));
}

#[tokio::test]
async fn test_duplicate_phone_rejected() {
    let store = create_test_store().await;

    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let result = store
        .create_user("u-2", "bob", "bob@example.com", "+15550100", "hash", 1000)
        .await;

    assert!(matches!(result, Err(AppError::Duplicate(_))));
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let store = create_test_store().await;

    // Two registrations racing for the same email: the UNIQUE constraint
    // lets exactly one commit, regardless of interleaving.
    let (a, b) = tokio::join!(
        store.create_user("u-1", "alice", "race@example.com", "+15550100", "hash", 1000),
        store.create_user("u-2", "bob", "race@example.com", "+15550101", "hash", 1000),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one registration should win the race");
}

#[tokio::test]
async fn test_user_exists_matches_any_identity_field() {
    let store = create_test_store().await;

    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    // Each identity field alone is enough to collide
    assert!(store
        .user_exists("alice@example.com", "other", "+19998887777")
        .await
        .expect("Query should succeed"));
    assert!(store
        .user_exists("other@example.com", "alice", "+19998887777")
        .await
        .expect("Query should succeed"));
    assert!(store
        .user_exists("other@example.com", "other", "+15550100")
        .await
        .expect("Query should succeed"));
    assert!(!store
        .user_exists("other@example.com", "other", "+19998887777")
        .await
        .expect("Query should succeed"));
}

#[tokio::test]
async fn test_get_user_by_identifier_prefers_email() {
    let store = create_test_store().await;

    // "shared@example.com" is one user's email and another user's username
    seed_user(&store, "u-1", "alice", "shared@example.com", "+15550100", 1000).await;
    seed_user(&store, "u-2", "shared@example.com", "bob@example.com", "+15550101", 1000).await;

    let user = store
        .get_user_by_identifier("shared@example.com")
        .await
        .expect("Query should succeed")
        .expect("User should exist");

    assert_eq!(user.id, "u-1", "email match should win over username match");
}

#[tokio::test]
async fn test_get_user_by_identifier_falls_back_to_username() {
    let store = create_test_store().await;

    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let user = store
        .get_user_by_identifier("alice")
        .await
        .expect("Query should succeed")
        .expect("User should exist");

    assert_eq!(user.id, "u-1");
}

#[tokio::test]
async fn test_get_unknown_identifier() {
    let store = create_test_store().await;

    let user = store
        .get_user_by_identifier("ghost@example.com")
        .await
        .expect("Query should succeed");

    assert!(user.is_none());
}

// ============= Balance Tests =============

#[tokio::test]
async fn test_debit_coins_checks_balance() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    assert!(store
        .debit_coins("u-1", 400)
        .await
        .expect("Debit should succeed"));

    let user = store.get_user_by_id("u-1").await.unwrap().unwrap();
    assert_eq!(user.coins, 600);

    // Remaining 600 cannot cover 700
    assert!(!store
        .debit_coins("u-1", 700)
        .await
        .expect("Debit query should succeed"));

    let user = store.get_user_by_id("u-1").await.unwrap().unwrap();
    assert_eq!(user.coins, 600, "failed debit must not change the balance");
}

#[tokio::test]
async fn test_debit_exact_balance_allowed() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 500).await;

    assert!(store
        .debit_coins("u-1", 500)
        .await
        .expect("Debit should succeed"));

    let user = store.get_user_by_id("u-1").await.unwrap().unwrap();
    assert_eq!(user.coins, 0);
}

#[tokio::test]
async fn test_concurrent_debits_cannot_overdraw() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let (a, b) = tokio::join!(store.debit_coins("u-1", 600), store.debit_coins("u-1", 600));

    let successes = [a.expect("debit"), b.expect("debit")]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1, "only one 600-coin debit can clear from 1000");

    let user = store.get_user_by_id("u-1").await.unwrap().unwrap();
    assert_eq!(user.coins, 400);
}

#[tokio::test]
async fn test_credit_coins() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 100).await;

    store
        .credit_coins("u-1", 250)
        .await
        .expect("Credit should succeed");

    let user = store.get_user_by_id("u-1").await.unwrap().unwrap();
    assert_eq!(user.coins, 350);
}

#[tokio::test]
async fn test_credit_unknown_user_fails() {
    let store = create_test_store().await;

    let result = store.credit_coins("ghost", 100).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// ============= Game Tests =============

#[tokio::test]
async fn test_create_game_and_get() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let created = store
        .create_game("g-1", "u-1", "blackjack", 250)
        .await
        .expect("Game creation should succeed");

    assert_eq!(created.status, GameStatus::Active);
    assert_eq!(created.payout, None);

    let fetched = store
        .get_game("g-1", "u-1")
        .await
        .expect("Query should succeed")
        .expect("Game should exist");

    assert_eq!(fetched.id, "g-1");
    assert_eq!(fetched.game_type, "blackjack");
    assert_eq!(fetched.bet_amount, 250);
    assert_eq!(fetched.status, GameStatus::Active);
}

#[tokio::test]
async fn test_get_game_scoped_to_owner() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;
    seed_user(&store, "u-2", "bob", "bob@example.com", "+15550101", 1000).await;

    store
        .create_game("g-1", "u-1", "dice", 100)
        .await
        .expect("Game creation should succeed");

    let other = store
        .get_game("g-1", "u-2")
        .await
        .expect("Query should succeed");
    assert!(other.is_none(), "games are not visible to other users");
}

#[tokio::test]
async fn test_get_user_games_newest_first() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    for (id, bet) in [("g-1", 100), ("g-2", 200), ("g-3", 300)] {
        store
            .create_game(id, "u-1", "dice", bet)
            .await
            .expect("Game creation should succeed");
    }

    let games = store
        .get_user_games("u-1")
        .await
        .expect("Query should succeed");

    assert_eq!(games.len(), 3);
    assert_eq!(games[0].id, "g-3");
    assert_eq!(games[1].id, "g-2");
    assert_eq!(games[2].id, "g-1");
}

#[tokio::test]
async fn test_get_user_games_empty() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let games = store
        .get_user_games("u-1")
        .await
        .expect("Query should succeed");
    assert!(games.is_empty());
}

// ============= Settlement Tests =============

#[tokio::test]
async fn test_settle_game_won_with_payout() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;
    store.create_game("g-1", "u-1", "dice", 300).await.unwrap();

    let settled = store
        .settle_game("g-1", "u-1", GameStatus::Won, Some(900))
        .await
        .expect("Settlement should succeed");

    assert_eq!(settled.status, GameStatus::Won);
    assert_eq!(settled.payout, Some(900));
}

#[tokio::test]
async fn test_settle_game_cancelled_keeps_null_payout() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;
    store.create_game("g-1", "u-1", "dice", 300).await.unwrap();

    let settled = store
        .settle_game("g-1", "u-1", GameStatus::Cancelled, None)
        .await
        .expect("Settlement should succeed");

    assert_eq!(settled.status, GameStatus::Cancelled);
    assert_eq!(settled.payout, None);
}

#[tokio::test]
async fn test_settle_game_twice_fails() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;
    store.create_game("g-1", "u-1", "dice", 300).await.unwrap();

    store
        .settle_game("g-1", "u-1", GameStatus::Lost, None)
        .await
        .expect("First settlement should succeed");

    let result = store
        .settle_game("g-1", "u-1", GameStatus::Won, Some(900))
        .await;

    match result {
        Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "Game already settled"),
        other => panic!("expected InvalidInput error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_settle_missing_game() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;

    let result = store
        .settle_game("ghost", "u-1", GameStatus::Lost, None)
        .await;

    match result {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Game not found"),
        other => panic!("expected NotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_settle_wrong_owner_reports_not_found() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;
    seed_user(&store, "u-2", "bob", "bob@example.com", "+15550101", 1000).await;
    store.create_game("g-1", "u-1", "dice", 300).await.unwrap();

    let result = store.settle_game("g-1", "u-2", GameStatus::Won, None).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    // The owner's game is untouched
    let game = store.get_game("g-1", "u-1").await.unwrap().unwrap();
    assert_eq!(game.status, GameStatus::Active);
}

#[tokio::test]
async fn test_concurrent_settlements_only_one_wins() {
    let store = create_test_store().await;
    seed_user(&store, "u-1", "alice", "alice@example.com", "+15550100", 1000).await;
    store.create_game("g-1", "u-1", "dice", 300).await.unwrap();

    let (a, b) = tokio::join!(
        store.settle_game("g-1", "u-1", GameStatus::Won, Some(600)),
        store.settle_game("g-1", "u-1", GameStatus::Lost, None),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "the status flip must happen exactly once");
}
