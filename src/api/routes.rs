use crate::error::ApiError;
use crate::models::Route;

/// Fetch the route listing from `GET {base}/routes`
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not ok
/// - The response body cannot be deserialized
pub async fn fetch_routes(routes_url: &str) -> Result<Vec<Route>, ApiError> {
    let response = reqwest::get(routes_url)
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ApiError::Status(response.status().as_u16()));
    }

    response
        .json::<Vec<Route>>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
