use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::info;

use super::{FeatureFlagsQuery, FeatureFlagsResponse};
use crate::overrides::compute_overrides;
use crate::routes::error::ApiError;
use crate::state::AppState;
use crate::upstream::{fetch_flags, FlagScope};

/// Environment and organization flags for one organization, plus which of
/// the environment flags the organization overrides.
pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<FeatureFlagsResponse>, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let query = FeatureFlagsQuery::from_pairs(pairs);
    let org_id = query.org_id().ok_or(ApiError::MissingOrg)?;

    let environment = FlagScope::Environment;
    let organization = FlagScope::Organization(org_id);

    // Independent calls, each with its own token
    let (environment_flags, organization_flags) = tokio::join!(
        fetch_flags(&state.http, &state.upstream, environment),
        fetch_flags(&state.http, &state.upstream, organization),
    );

    let environment_flags = environment_flags.map_err(|e| ApiError::fetch(environment, e))?;
    let organization_flags = organization_flags.map_err(|e| ApiError::fetch(organization, e))?;

    let overrides = compute_overrides(&environment_flags, &organization_flags);

    info!(
        org_id,
        flags = overrides.len(),
        overridden = overrides.values().filter(|o| **o).count(),
        "resolved feature flags"
    );

    Ok(Json(FeatureFlagsResponse {
        org_id: org_id.to_string(),
        environment_flags,
        organization_flags,
        overrides,
    }))
}
