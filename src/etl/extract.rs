/// Extract Module
///
/// Handles fetching the raw match-history payload from the Nexon open API.
use serde_json::Value;

use crate::api::NexonApiClient;
use crate::error::RemoteFetchError;

/// Fetch one page of match history for the given player
///
/// Returns the raw decoded body untouched; interpreting its shape is the
/// transform stage's job. Any transport, HTTP, or decoding failure
/// propagates as a [`RemoteFetchError`] without retrying.
pub async fn extract_match_history(client: &NexonApiClient, ouid: &str) -> Result<Value, RemoteFetchError> {
    tracing::info!("Extract started for player {}", ouid);

    let payload = client.fetch_match_history(ouid).await?;

    match payload.as_array() {
        Some(records) => tracing::info!("Extract done ({} records)", records.len()),
        None => tracing::info!("Extract done"),
    }

    Ok(payload)
}
