//! Wager admission.
//!
//! Admission is the only path that reduces an account balance. The rule
//! itself ([`evaluate`]) is pure and cheap; [`AdmissionGate::admit`] applies
//! it against a snapshot and then re-checks inside the store's conditional
//! debit, so two wagers racing for the same coins can never both clear.

use crate::db::Store;
use crate::types::{AppError, Game, Result, User};
use std::sync::Arc;
use uuid::Uuid;

/// Why a wager was refused admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The stake is zero or negative.
    NonPositiveStake,
    /// The account balance does not cover the stake.
    InsufficientCoins,
}

impl From<RejectReason> for AppError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::NonPositiveStake => {
                AppError::InvalidInput("Bet amount must be positive".to_string())
            }
            RejectReason::InsufficientCoins => {
                AppError::InsufficientCoins("Insufficient coins".to_string())
            }
        }
    }
}

/// Pure admission rule: a wager is admissible when the stake is positive
/// and covered by the available balance. A stake equal to the full balance
/// is allowed.
pub fn evaluate(coins: i64, bet_amount: i64) -> std::result::Result<(), RejectReason> {
    if bet_amount <= 0 {
        return Err(RejectReason::NonPositiveStake);
    }
    if coins < bet_amount {
        return Err(RejectReason::InsufficientCoins);
    }
    Ok(())
}

/// Admits wagers against live balances.
#[derive(Clone)]
pub struct AdmissionGate {
    store: Arc<Store>,
}

impl AdmissionGate {
    /// Create a gate backed by the given store.
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Admit a wager for `user`: debit the stake and record the game.
    ///
    /// The snapshot check gives early rejections a friendly error, but the
    /// debit re-checks the balance in a single conditional UPDATE. A stale
    /// `coins` value can therefore never admit an uncovered wager.
    pub async fn admit(&self, user: &User, game_type: &str, bet_amount: i64) -> Result<Game> {
        evaluate(user.coins, bet_amount)?;

        let debited = self.store.debit_coins(&user.id, bet_amount).await?;
        if !debited {
            return Err(RejectReason::InsufficientCoins.into());
        }

        let game_id = Uuid::new_v4().to_string();
        match self
            .store
            .create_game(&game_id, &user.id, game_type, bet_amount)
            .await
        {
            Ok(game) => Ok(game),
            Err(e) => {
                // The stake is already gone; hand it back before reporting.
                if let Err(refund_err) = self.store.credit_coins(&user.id, bet_amount).await {
                    tracing::error!(
                        user_id = %user.id,
                        bet_amount,
                        error = %refund_err,
                        "failed to refund stake after game insert error"
                    );
                }
                Err(e)
            }
        }
    }
}
