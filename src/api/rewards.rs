//! Rewards API Endpoints
//!
//! Account-facing surface of the ledger: balance and history reads, earn
//! and redeem mutations, referral codes. The checkout flow reports order
//! completion through the earn endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::RewardCatalog;
use crate::ledger::{
    ActionKind, LedgerError, RewardAction, RewardsLedger, Tier, UserRewardsAccount,
};

/// API state for rewards endpoints
#[derive(Clone)]
pub struct RewardsApiState {
    pub ledger: Arc<RewardsLedger>,
    pub catalog: Arc<RewardCatalog>,
}

// Response types

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub user_id: String,
    pub total_points: u64,
    pub lifetime_points: u64,
    pub tier: Tier,
    pub referral_code: String,
    pub referral_count: u32,
    pub actions: Vec<ActionSummary>,
}

#[derive(Debug, Serialize)]
pub struct ActionSummary {
    pub id: String,
    pub kind: ActionKind,
    pub label: String,
    pub points: u64,
    pub timestamp: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user_id: String,
    pub total_actions: usize,
    pub earned: usize,
    pub redeemed: usize,
    pub actions: Vec<ActionSummary>,
}

#[derive(Debug, Deserialize)]
pub struct EarnRequest {
    pub label: String,
    pub points: u64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RedeemRequest {
    pub reward_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ReferralRequest {
    pub code: String,
}

fn account_response(account: UserRewardsAccount) -> AccountResponse {
    let actions = account.actions.iter().map(action_summary).collect();

    AccountResponse {
        user_id: account.user_id,
        total_points: account.total_points,
        lifetime_points: account.lifetime_points,
        tier: account.tier,
        referral_code: account.referral_code,
        referral_count: account.referral_count,
        actions,
    }
}

fn action_summary(action: &RewardAction) -> ActionSummary {
    ActionSummary {
        id: action.id.to_string(),
        kind: action.kind,
        label: action.label.clone(),
        points: action.points,
        timestamp: action.timestamp.to_rfc3339(),
        description: action.description.clone(),
    }
}

fn error_response(err: LedgerError) -> (StatusCode, String) {
    let status = match err {
        LedgerError::InsufficientPoints { .. } => StatusCode::CONFLICT,
        LedgerError::InvalidPoints | LedgerError::EmptyUserId => StatusCode::BAD_REQUEST,
        LedgerError::InvalidReferralCode => StatusCode::UNPROCESSABLE_ENTITY,
        LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

// Endpoints

/// GET /rewards/:user_id - Load (or create) the user's account
pub async fn get_account(
    State(state): State<RewardsApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<AccountResponse>, (StatusCode, String)> {
    let account = state
        .ledger
        .load_or_create(&user_id)
        .await
        .map_err(error_response)?;

    Ok(Json(account_response(account)))
}

/// POST /rewards/:user_id/earn - Record an earn action
pub async fn earn_points(
    State(state): State<RewardsApiState>,
    Path(user_id): Path<String>,
    Json(payload): Json<EarnRequest>,
) -> Result<Json<AccountResponse>, (StatusCode, String)> {
    let account = state
        .ledger
        .earn_points(
            &user_id,
            &payload.label,
            payload.points,
            payload.description.as_deref().unwrap_or(""),
        )
        .await
        .map_err(error_response)?;

    Ok(Json(account_response(account)))
}

/// POST /rewards/:user_id/redeem - Redeem a catalog reward
pub async fn redeem_reward(
    State(state): State<RewardsApiState>,
    Path(user_id): Path<String>,
    Json(payload): Json<RedeemRequest>,
) -> Result<Json<AccountResponse>, (StatusCode, String)> {
    let reward = state.catalog.reward(&payload.reward_id).ok_or((
        StatusCode::NOT_FOUND,
        format!("Unknown reward: {}", payload.reward_id),
    ))?;

    let account = state
        .ledger
        .redeem_reward(&user_id, reward)
        .await
        .map_err(error_response)?;

    Ok(Json(account_response(account)))
}

/// POST /rewards/:user_id/referral - Apply a referral code
pub async fn apply_referral(
    State(state): State<RewardsApiState>,
    Path(user_id): Path<String>,
    Json(payload): Json<ReferralRequest>,
) -> Result<Json<AccountResponse>, (StatusCode, String)> {
    let account = state
        .ledger
        .apply_referral_code(&user_id, &payload.code)
        .await
        .map_err(error_response)?;

    Ok(Json(account_response(account)))
}

/// GET /rewards/:user_id/history - Action history summary
pub async fn get_history(
    State(state): State<RewardsApiState>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponse>, (StatusCode, String)> {
    let account = state
        .ledger
        .load_or_create(&user_id)
        .await
        .map_err(error_response)?;

    let earned = account
        .actions
        .iter()
        .filter(|a| a.kind == ActionKind::Earn)
        .count();
    let redeemed = account
        .actions
        .iter()
        .filter(|a| a.kind == ActionKind::Redeem)
        .count();

    Ok(Json(HistoryResponse {
        user_id: account.user_id.clone(),
        total_actions: account.actions.len(),
        earned,
        redeemed,
        actions: account.actions.iter().map(action_summary).collect(),
    }))
}

/// Create the rewards API router
pub fn create_rewards_router(state: RewardsApiState) -> Router {
    Router::new()
        .route("/{user_id}", get(get_account))
        .route("/{user_id}/earn", post(earn_points))
        .route("/{user_id}/redeem", post(redeem_reward))
        .route("/{user_id}/referral", post(apply_referral))
        .route("/{user_id}/history", get(get_history))
        .with_state(state)
}
