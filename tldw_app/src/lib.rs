use figment::{Figment, providers::Env};
use serde::de::DeserializeOwned;

pub trait ContextProvider<Config> {
    fn new(config: Config) -> impl Future<Output = Self>;
}

/// Initialize the application context with configuration from environment variables.
/// A `.env` file in the working directory is loaded first, if present, so
/// values there behave as if they had been exported. The configuration is
/// extracted using figment.
///
/// # Returns
/// The application context built from the configuration as specified by the
/// trait.
///
/// # Errors
/// If the configuration cannot be extracted from the environment variables.
///
pub async fn create_app_context<A, Config: DeserializeOwned>()
-> Result<A, figment::Error>
where
    A: ContextProvider<Config>,
{
    let dotenv = dotenvy::dotenv();

    init_tracing();

    if let Ok(path) = dotenv {
        tracing::debug!("loaded environment from {}", path.display());
    }

    let config: Config = load_config()?;

    let context = A::new(config).await;

    Ok(context)
}

/// Extract a configuration struct from the raw process environment.
/// Keys are matched case-insensitively against the struct's field names.
///
/// # Errors
/// If a required value is missing or a value cannot be converted to the
/// field's type.
pub fn load_config<Config: DeserializeOwned>() -> Result<Config, figment::Error>
{
    let figment = Figment::new().merge(Env::raw());

    figment.extract()
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        // allow log level to be overridden by RUST_LOG env var
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        // this needs to be set to remove duplicated information in the log.
        .with_current_span(false)
        .with_target(false)
        .init();
}
