use axum::{extract::State, Json};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use tracing::instrument;
use utoipa::ToSchema;

use crate::{
    server::{result::AppJsonResult, state::AppState},
    types::holdings::HoldingsRecord,
};

#[serde_as]
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "address": "0x1111111111111111111111111111111111111111",
    "blockCutoff": 38000000
}))]
pub struct HoldingsQueryRequest {
    pub address: String,
    /// Block to read at. Accepts a number or a decimal string; the current
    /// head when omitted.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub block_cutoff: Option<u64>,
}

/// Aggregate on-chain BGLD holdings for one address
#[utoipa::path(
    post,
    path = "/holdings/query",
    request_body = HoldingsQueryRequest,
    responses(
        (status = 200, description = "Holdings read at a single block", body = HoldingsRecord),
        (status = 400, description = "Malformed address"),
        (status = 500, description = "RPC access key not configured"),
        (status = 502, description = "Unexpected contract response"),
        (status = 503, description = "Blockchain provider unavailable")
    ),
    tag = "Holdings"
)]
#[instrument(skip(state))]
pub async fn query_holdings(
    State(state): State<AppState>,
    Json(payload): Json<HoldingsQueryRequest>,
) -> AppJsonResult<HoldingsRecord> {
    let record = state
        .aggregator
        .aggregate(&payload.address, payload.block_cutoff)
        .await?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_cutoff_accepts_number_or_string() {
        let request: HoldingsQueryRequest =
            serde_json::from_str(r#"{"address":"0x1","blockCutoff":"123"}"#).unwrap();
        assert_eq!(request.block_cutoff, Some(123));

        let request: HoldingsQueryRequest =
            serde_json::from_str(r#"{"address":"0x1","blockCutoff":456}"#).unwrap();
        assert_eq!(request.block_cutoff, Some(456));

        let request: HoldingsQueryRequest = serde_json::from_str(r#"{"address":"0x1"}"#).unwrap();
        assert_eq!(request.block_cutoff, None);
    }
}
