use axum::Json;
use types::WelcomeResponse;

pub async fn handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to my FastAPI application!".to_string(),
    })
}
