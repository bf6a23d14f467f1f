//! Sets up `tracing` subscribers for binaries embedding the resolver.
//!
//! Console output is always enabled. If the environment variable `{env}_DIRECTORY` points to a
//! directory, events are additionally written there as JSON into daily rotated log files.

use std::path::{Path, PathBuf};

use snafu::{ResultExt as _, Snafu};
use tracing::{level_filters::LevelFilter, subscriber::SetGlobalDefaultError};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt};

/// Number of rotated log files kept in the log directory.
pub const MAX_LOG_FILES: usize = 6;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to initialize rolling file appender in {}", directory.display()))]
    InitRollingFileAppender {
        source: InitError,
        directory: PathBuf,
    },

    #[snafu(display("unable to set the global default subscriber"))]
    SetGlobalDefaultSubscriber { source: SetGlobalDefaultError },
}

/// Initializes `tracing` logging with options from the environment variable given in `env`.
///
/// Callers should pick a variable name specific to their application, e.g. `DOMAIN_OPERATOR_LOG`.
/// If it is not set, the maximum log level is INFO. Log files, if enabled, are named after
/// `app_name`.
pub fn initialize_logging(env: &str, app_name: &str) -> Result<(), Error> {
    let file_log_dir = std::env::var_os(format!("{env}_DIRECTORY")).map(PathBuf::from);
    let layers = layers(env, app_name, file_log_dir.as_deref())?;

    tracing::subscriber::set_global_default(Registry::default().with(layers))
        .context(SetGlobalDefaultSubscriberSnafu)
}

fn layers(
    env: &str,
    app_name: &str,
    file_log_dir: Option<&Path>,
) -> Result<Vec<BoxedLayer>, Error> {
    let mut layers: Vec<BoxedLayer> = vec![
        tracing_subscriber::fmt::layer()
            .with_filter(env_filter(env))
            .boxed(),
    ];

    if let Some(directory) = file_log_dir {
        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(app_name)
            .filename_suffix("tracing-rs.json")
            .max_log_files(MAX_LOG_FILES)
            .build(directory)
            .context(InitRollingFileAppenderSnafu { directory })?;

        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(file_appender)
                .with_filter(env_filter(env))
                .boxed(),
        );
    }

    Ok(layers)
}

fn env_filter(env: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_env_var(env)
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy()
}
