//! Injected request logger
//!
//! The dispatcher never looks up a logger by name. It is handed a
//! [`RequestLogger`] at construction and emits its events inside that
//! logger's dispatch, so two clients in one process can log to different
//! places at different levels.

use std::fs::OpenOptions;
use std::sync::Arc;

use tracing::level_filters::LevelFilter;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::ClientConfig;
use crate::error::Result;

/// `tracing` target used for every request/response event
pub const LOG_TARGET: &str = "searchwire::request";

#[derive(Clone, Default)]
pub struct RequestLogger {
    dispatch: Option<Dispatch>,
    // Keeps the non-blocking file writer flushing until the last clone drops
    _guard: Option<Arc<WorkerGuard>>,
}

impl RequestLogger {
    /// Log through whatever subscriber the application installed
    pub fn current() -> Self {
        Self::default()
    }

    pub fn from_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
            _guard: None,
        }
    }

    /// Dedicated subscriber: DEBUG when `debug` is set, WARN otherwise,
    /// written to `trace_file` if configured or stderr.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let level = if config.debug {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        };

        match &config.trace_file {
            Some(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                let (writer, guard) = tracing_appender::non_blocking(file);
                let subscriber = tracing_subscriber::fmt()
                    .with_max_level(level)
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .finish();

                Ok(Self {
                    dispatch: Some(Dispatch::new(subscriber)),
                    _guard: Some(Arc::new(guard)),
                })
            }
            None => {
                let subscriber = tracing_subscriber::fmt()
                    .with_max_level(level)
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .finish();

                Ok(Self::from_dispatch(Dispatch::new(subscriber)))
            }
        }
    }

    /// Run `f` with this logger's dispatch as the default
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}

impl std::fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLogger")
            .field("dedicated", &self.dispatch.is_some())
            .finish()
    }
}

/// In-memory log sink for tests
#[cfg(test)]
pub(crate) mod capture {
    use super::*;
    use parking_lot::Mutex;
    use std::io::Write;

    #[derive(Clone, Default)]
    pub struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        pub fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    pub fn logger(level: LevelFilter) -> (RequestLogger, Buffer) {
        let buffer = Buffer::default();
        let sink = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        (RequestLogger::from_dispatch(Dispatch::new(subscriber)), buffer)
    }
}
