//! HTTP handlers for reward endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::reward::{RewardRedemption, RewardService, RewardStatus};
use crate::AppState;

/// List the reward catalog with redemption state
pub async fn list_rewards(State(state): State<AppState>) -> AppResult<Json<Vec<RewardStatus>>> {
    let service = RewardService::new(state.db);
    let rewards = service.list_rewards().await?;
    Ok(Json(rewards))
}

/// Redeem a reward against the point total
pub async fn redeem_reward(
    State(state): State<AppState>,
    Path(reward_id): Path<String>,
) -> AppResult<Json<RewardRedemption>> {
    let service = RewardService::new(state.db);
    let redemption = service.redeem(&reward_id).await?;
    Ok(Json(redemption))
}
