//! Config-loading errors.

use std::any::Any;
use std::path::PathBuf;

use cocode_error::ErrorExt;
use cocode_error::Location;
use cocode_error::StatusCode;
use cocode_error::stack_trace_debug;
use snafu::Snafu;

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum ConfigError {
    #[snafu(display("failed to read config file {}: {source}", path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to parse config file {}: {source}", path.display()))]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("invalid value for {field}: {message}"))]
    InvalidValue {
        field: String,
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("no credential found for provider {provider} (checked {env_var})"))]
    MissingCredential {
        provider: String,
        env_var: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for ConfigError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Read { .. } => StatusCode::ConfigFileError,
            Self::Parse { .. } => StatusCode::ConfigFileError,
            Self::InvalidValue { .. } => StatusCode::InvalidConfig,
            Self::MissingCredential { .. } => StatusCode::AuthenticationFailed,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
