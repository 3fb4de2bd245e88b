//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! In the browser, formatted events go to the developer console with the
//! console method matching their level. Natively they go to stderr and
//! honor `RUST_LOG`.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. Returns `false` when one was already
/// installed (e.g. a second table mounted on the same page).
pub fn init_logging(level: Level) -> bool {
    imp::init(level)
}

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use super::{Level, SubscriberExt, SubscriberInitExt};
    use tracing_subscriber::{fmt, EnvFilter};

    pub(super) fn init(level: Level) -> bool {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .is_ok()
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use std::io;

    use super::{Level, SubscriberExt, SubscriberInitExt};
    use tracing::Metadata;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::{self, MakeWriter};
    use wasm_bindgen::JsValue;

    pub(super) fn init(level: Level) -> bool {
        tracing_subscriber::registry()
            .with(LevelFilter::from_level(level))
            .with(
                fmt::layer()
                    .without_time()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(ConsoleMakeWriter),
            )
            .try_init()
            .is_ok()
    }

    struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::new(Level::INFO)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter::new(*meta.level())
        }
    }

    /// Buffers one formatted event and emits it on drop.
    struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl ConsoleWriter {
        fn new(level: Level) -> Self {
            Self {
                level,
                buf: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let text = String::from_utf8_lossy(&self.buf);
            let line = JsValue::from_str(text.trim_end());
            if self.level == Level::ERROR {
                web_sys::console::error_1(&line);
            } else if self.level == Level::WARN {
                web_sys::console::warn_1(&line);
            } else if self.level == Level::INFO {
                web_sys::console::info_1(&line);
            } else {
                web_sys::console::debug_1(&line);
            }
        }
    }
}
