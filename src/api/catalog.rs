//! Catalog API Endpoints
//!
//! Read-only reference data for the storefront surfaces.

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

use crate::catalog::{EarnActionDefinition, RewardCatalog, RewardCatalogEntry};

/// API state for catalog endpoints
#[derive(Clone)]
pub struct CatalogApiState {
    pub catalog: Arc<RewardCatalog>,
}

/// GET /catalog/rewards - List redeemable rewards
pub async fn list_rewards(State(state): State<CatalogApiState>) -> Json<Vec<RewardCatalogEntry>> {
    Json(state.catalog.rewards().to_vec())
}

/// GET /catalog/earn-actions - List ways to earn points
pub async fn list_earn_actions(
    State(state): State<CatalogApiState>,
) -> Json<Vec<EarnActionDefinition>> {
    Json(state.catalog.earn_actions().to_vec())
}

/// Create the catalog API router
pub fn create_catalog_router(state: CatalogApiState) -> Router {
    Router::new()
        .route("/rewards", get(list_rewards))
        .route("/earn-actions", get(list_earn_actions))
        .with_state(state)
}
