use crate::command;
use anyhow::{anyhow, Result};
use clap::Parser;
use mdview_config::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub enum Cmd {
    /// Run the preview server on an OS-assigned ephemeral port.
    #[clap(name = "serve")]
    Serve(command::serve::Serve),

    /// Locate a running preview server (starting one if needed) and open a
    /// preview against it.
    #[clap(name = "open")]
    Open(command::open::Open),
}

/// mdview CLI arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Enable the logging system.
    #[clap(long)]
    pub log: Option<PathBuf>,

    /// Specify the path of the config file.
    #[clap(long)]
    pub config_file: Option<PathBuf>,
}

impl Cmd {
    pub async fn run(self, args: Args) -> Result<()> {
        let (config, config_err) = mdview_config::load_config_on_startup(args.config_file.clone());

        let _logging_guard = init_logging(&args, config)?;

        if let Some(err) = config_err {
            tracing::warn!(%err, "Malformed config file, falling back to defaults");
        }

        match self {
            Self::Serve(serve) => serve.run(config).await,
            Self::Open(open) => open.run(config).await,
        }
    }
}

/// Initializes tracing: a non-blocking file subscriber when a log path is
/// given via `--log`, `MDVIEW_LOG_PATH` or the config file, a stderr
/// subscriber otherwise. The returned guard must stay alive for the file
/// writer to flush.
fn init_logging(
    args: &Args,
    config: &Config,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let maybe_log = if let Some(log_path) = args.log.clone() {
        Some(log_path)
    } else if let Ok(log_path) = std::env::var("MDVIEW_LOG_PATH").map(PathBuf::from) {
        Some(log_path)
    } else {
        config.log.log_file.as_ref().map(PathBuf::from)
    };

    let Some(log_path) = maybe_log else {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive("mdview=info".parse().unwrap())
                    .add_directive("mdview_server=info".parse().unwrap())
                    .add_directive("mdview_discovery=info".parse().unwrap()),
            )
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    // Start over once the log grows past 8MiB.
    if let Ok(metadata) = std::fs::metadata(&log_path) {
        if log_path.is_file() && metadata.len() > 8 * 1024 * 1024 {
            std::fs::remove_file(&log_path)?;
        }
    }

    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("no file name in {log_path:?}"))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| anyhow!("{log_path:?} has no parent"))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let max_level = config
        .log
        .max_level
        .parse()
        .unwrap_or(tracing::Level::DEBUG);

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_line_number(true)
        .with_writer(non_blocking)
        .with_ansi(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(Some(guard))
}
