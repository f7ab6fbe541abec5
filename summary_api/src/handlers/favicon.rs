use crate::error::ApiError;

// browsers ask for this on every page load
pub async fn handler() -> ApiError {
    ApiError::NoFavicon
}
