use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub verbose: bool,
    pub log_file: Option<PathBuf>,
    pub format: LogFormat,
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// 建立寫入日誌檔的 layer，檔案以 append 模式開啟
fn file_layer(options: &LoggingOptions) -> (Option<BoxedLayer>, Option<std::io::Error>) {
    let Some(path) = options.log_file.as_ref() else {
        return (None, None);
    };

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(e) => return (None, Some(e)),
    };

    let filter = EnvFilter::new("ezmealplan=debug");
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false);

    let boxed = match options.format {
        LogFormat::Compact => layer.compact().with_filter(filter).boxed(),
        LogFormat::Json => layer.json().with_filter(filter).boxed(),
    };

    (Some(boxed), None)
}

pub fn init_cli_logger(options: &LoggingOptions) {
    // Console output stays quiet so it doesn't interleave with the prompt.
    let console_filter = if options.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ezmealplan=debug,warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let (file, file_error) = file_layer(options);

    tracing_subscriber::registry()
        .with(file)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_filter(console_filter),
        )
        .init();

    if let Some(e) = file_error {
        tracing::warn!("File logger is not working: {}", e);
    }
}
