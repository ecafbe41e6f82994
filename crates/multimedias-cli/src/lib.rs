use anyhow::Context;
use multimedias_core::{AppError, ErrorMetadata, LogLevel};
use uuid::Uuid;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "warn,multimedias=info,multimedias_admin=info,multimedias_db=info,multimedias_core=info";

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// Parse the selected record ids given on the command line.
pub fn parse_ids(raw: &[String]) -> anyhow::Result<Vec<Uuid>> {
    raw.iter()
        .map(|s| Uuid::parse_str(s.trim()).with_context(|| format!("Invalid id '{}'", s)))
        .collect()
}

/// How a failed command is shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub level: LogLevel,
    pub kind: &'static str,
    pub code: &'static str,
    pub message: String,
    pub suggestion: Option<&'static str>,
}

/// Describe `err` for the operator. Sensitive details are replaced by the
/// client message when running against production.
pub fn describe_failure(err: &anyhow::Error, production: bool) -> Failure {
    let Some(app) = err.downcast_ref::<AppError>() else {
        return Failure {
            level: LogLevel::Error,
            kind: "Cli",
            code: "CLI_ERROR",
            message: format!("{:#}", err),
            suggestion: None,
        };
    };

    let mut message = if production && app.is_sensitive() {
        app.client_message()
    } else {
        app.detailed_message()
    };
    // Context added on top of the store error.
    let outer = err.to_string();
    if outer != app.to_string() {
        message = format!("{}: {}", outer, message);
    }

    Failure {
        level: app.log_level(),
        kind: app.error_type(),
        code: app.error_code(),
        message,
        suggestion: app.suggested_action(),
    }
}

pub fn report_failure(err: &anyhow::Error, production: bool) {
    let failure = describe_failure(err, production);
    match failure.level {
        LogLevel::Debug => {
            tracing::debug!(kind = failure.kind, code = failure.code, "{}", failure.message)
        }
        LogLevel::Warn => {
            tracing::warn!(kind = failure.kind, code = failure.code, "{}", failure.message)
        }
        LogLevel::Error => {
            tracing::error!(kind = failure.kind, code = failure.code, "{}", failure.message)
        }
    }
    eprintln!("error [{}]: {}", failure.code, failure.message);
    if let Some(suggestion) = failure.suggestion {
        eprintln!("hint: {}", suggestion);
    }
}
