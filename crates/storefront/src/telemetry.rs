//! Tracing setup.
//!
//! Installs a `tracing-subscriber` fmt layer filtered by the configured
//! directive. In the browser each formatted line goes to the console method
//! matching its level; native builds (tests, tooling) write to stderr.

use std::io::{self, Write};

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};

/// Browser console method a log line is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Log,
    Debug,
}

impl ConsoleMethod {
    #[must_use]
    pub fn for_level(level: &Level) -> Self {
        match *level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Log,
            _ => Self::Debug,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn emit(self, line: &str) {
        let value = wasm_bindgen::JsValue::from_str(line);
        match self {
            Self::Error => web_sys::console::error_1(&value),
            Self::Warn => web_sys::console::warn_1(&value),
            Self::Log => web_sys::console::log_1(&value),
            Self::Debug => web_sys::console::debug_1(&value),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[allow(clippy::unused_self)]
    fn emit(self, line: &str) {
        let _ = writeln!(io::stderr(), "{line}");
    }
}

/// Buffers one formatted event and emits it when dropped.
#[derive(Debug)]
pub struct ConsoleWriter {
    method: ConsoleMethod,
    buf: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if !line.is_empty() {
            self.method.emit(line);
        }
    }
}

/// [`MakeWriter`] that routes each event by level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::Log,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            method: ConsoleMethod::for_level(meta.level()),
            buf: Vec::new(),
        }
    }
}

/// Parse the configured filter directive.
///
/// # Errors
///
/// Returns `AppError::Telemetry` if the directive is invalid.
pub fn env_filter(config: &StorefrontConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.log_filter)
        .map_err(|e| AppError::Telemetry(format!("invalid log filter {:?}: {e}", config.log_filter)))
}

/// Install the global subscriber.
///
/// No timestamps: there is no system clock on `wasm32-unknown-unknown`.
///
/// # Errors
///
/// Returns `AppError::Telemetry` if the filter is invalid or a global
/// subscriber is already installed.
pub fn init(config: &StorefrontConfig) -> Result<()> {
    let filter = env_filter(config)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_ansi(false)
                .with_writer(ConsoleMakeWriter),
        )
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))
}
