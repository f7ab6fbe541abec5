use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use std::net::SocketAddr;
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Serves an Axum router on the given address until Ctrl+C or SIGTERM.
///
/// In-flight requests are allowed to finish before the future resolves.
///
/// # Errors
///
/// Returns an error if:
/// - The server fails to bind to the address
/// - The server stops with an I/O error
pub async fn run_app(
    app: Router,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[derive(Debug, Error)]
pub enum CorsError {
    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(#[from] InvalidHeaderValue),
    #[error("the wildcard origin `*` cannot be combined with credentials")]
    WildcardOrigin,
}

/// Builds a CORS layer that only accepts the given comma separated origins.
///
/// Any method and any request header is allowed from those origins and
/// credentials are permitted. Since credentials rule out wildcards, methods
/// and headers are mirrored back from the preflight request.
///
/// # Errors
///
/// Returns an error if one of the origins is `*` or not a valid header value.
pub fn cors_layer(origins: &str) -> Result<CorsLayer, CorsError> {
    let origins = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(CorsError::WildcardOrigin);
            }
            Ok(HeaderValue::from_str(origin)?)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        )
        .expect("failed to install signal handler")
        .recv()
        .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::warn!("signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use axum::routing::get;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer("http://localhost:3000").unwrap())
    }

    #[tokio::test]
    async fn test_allowed_origin_gets_cors_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn test_other_origin_gets_no_allow_origin() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_preflight_mirrors_method_and_headers() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-custom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "DELETE"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "x-custom"
        );
    }

    #[test]
    fn test_cors_layer_accepts_list_with_spaces() {
        assert!(
            cors_layer("http://localhost:3000, https://app.example").is_ok()
        );
        assert!(matches!(
            cors_layer("http://bad\norigin"),
            Err(CorsError::InvalidOrigin(_))
        ));
    }

    #[test]
    fn test_cors_layer_rejects_wildcard_origin() {
        assert!(matches!(cors_layer("*"), Err(CorsError::WildcardOrigin)));
        assert!(matches!(
            cors_layer("http://localhost:3000, *"),
            Err(CorsError::WildcardOrigin)
        ));
    }
}
