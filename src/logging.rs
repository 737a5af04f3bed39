//! Structured logging setup.
//!
//! Native builds (CLI, tests, benches) log to stderr and honour `RUST_LOG`.
//! In the browser each event becomes one `console.log`/`console.warn`/
//! `console.error` call depending on its level.
//!
//! `init` can be called more than once; only the first call installs a
//! subscriber.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber.
///
/// `directive` is the fallback filter (e.g. `"warn"`, `"csvedit=debug"`),
/// used when `RUST_LOG` is unset on native builds and always in the browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}

/// Install the global subscriber.
///
/// `directive` is the filter (e.g. `"warn"`, `"csvedit=debug"`).
#[cfg(target_arch = "wasm32")]
pub fn init(directive: &str) {
    // No clock on wasm32-unknown-unknown, so timestamps are disabled.
    let console_layer = fmt::layer()
        .with_writer(console::MakeConsoleWriter)
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_filter(EnvFilter::new(directive));

    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Buffers one formatted event and flushes it to the console on drop.
    pub(super) struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
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
            let text = String::from_utf8_lossy(&self.buf);
            let line = JsValue::from_str(text.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&line),
                Level::WARN => web_sys::console::warn_1(&line),
                _ => web_sys::console::log_1(&line),
            }
        }
    }

    pub(super) struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buf: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buf: Vec::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init("warn");
        assert!(tracing::dispatcher::has_been_set());
        init("debug");
        assert!(tracing::dispatcher::has_been_set());
        tracing::warn!("still logging after a second init");
    }
}
