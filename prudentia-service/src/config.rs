use prudentia_flow::{InferenceConfig, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Settings read once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub inference: InferenceConfig,
}

impl ServiceConfig {
    /// Fails with `MissingCredential` when `OPENROUTER_API_KEY` is absent;
    /// nothing can be generated without it.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: parse_port(std::env::var("PORT").ok().as_deref()),
            inference: InferenceConfig::from_env()?,
        })
    }

    /// Read separately so tracing is up before the rest of the config is validated
    pub fn log_format_from_env() -> LogFormat {
        LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Initialize tracing: JSON for production, `LOG_FORMAT=pretty` for development
pub fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "prudentia_service=debug,prudentia_flow=debug,tower_http=debug".into()
    });

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_when_missing_or_invalid() {
        assert_eq!(parse_port(None), 3000);
        assert_eq!(parse_port(Some("not-a-port")), 3000);
        assert_eq!(parse_port(Some("8080")), 8080);
    }

    #[test]
    fn log_format_defaults_to_json() {
        assert_eq!(LogFormat::parse(None), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some("text")), LogFormat::Json);
    }
}
