use core::fmt;
use std::fs::OpenOptions;
use std::sync::Once;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, fmt as tracingfmt};


#[macro_export]
macro_rules! unimplemented_log {
    ( $($arg:tt)* ) => {{
        tracing::warn!(
            "unimplemented: {}",
            format_args!($($arg)*),
        );
    }};
}

/// if `cond` is false, logs a warning with your message.
#[macro_export]
macro_rules! assert_warn {
    ($cond:expr, $($arg:tt)+) => {{
        if !$cond {
            tracing::warn!(
                target: module_path!(),
                "assertion warning: `{}` failed: {} at {}:{}",
                stringify!($cond),
                format_args!($($arg)+),
                file!(),
                line!(),
            );
        }
    }};
}

/// Environment variable that, when set, replaces the default stdout filter
pub const LOG_ENV_VAR: &str = "RUST_LOG";

struct AlignedFormatter;

/// Pulls the `ch` field out of an event so it can be printed in the prefix column
struct ChVisitor {
    ch: Option<String>,
}

impl tracing::field::Visit for ChVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "ch" {
            self.ch = Some(format!("{:?}", value));
        }
    }
}

/// Turns "crates/mpt-entities/src/channel/controller.rs" into "[entities/channel] controller.rs"
fn shorten_path(file_path: &str) -> String {
    let Some(src_idx) = file_path.find("/src/") else {
        return file_path.to_string();
    };
    let before_src = &file_path[..src_idx];
    let after_src = &file_path[src_idx + 5..];

    let crate_name = if let Some(mpt_idx) = before_src.rfind("mpt-") {
        &before_src[mpt_idx + 4..]
    } else {
        before_src.rsplit('/').next().unwrap_or("unknown")
    };

    if let Some(last_slash) = after_src.rfind('/') {
        let module_path = &after_src[..last_slash];
        let filename = &after_src[last_slash + 1..];
        let first_module = module_path.split('/').next().unwrap_or("");
        format!("[{}/{}] {}", crate_name, first_module, filename)
    } else {
        format!("[{}] {}", crate_name, after_src)
    }
}

impl<S, N> FormatEvent<S, N> for AlignedFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();

        let mut visitor = ChVisitor { ch: None };
        event.record(&mut visitor);
        let has_ch = visitor.ch.is_some();
        let ch_str = match visitor.ch {
            Some(ch) => format!("ch{:<4}", ch),
            None => "      ".to_string(),
        };

        let (color_level, color_reset) = match *metadata.level() {
            tracing::Level::ERROR => ("\x1b[31m", "\x1b[0m"),
            tracing::Level::WARN => ("\x1b[33m", "\x1b[0m"),
            tracing::Level::INFO => ("\x1b[32m", "\x1b[0m"),
            tracing::Level::DEBUG => ("\x1b[34m", "\x1b[0m"),
            tracing::Level::TRACE => ("\x1b[35m", "\x1b[0m"),
        };

        // Format: "LEVEL chN [crate/module] file:line: message"
        let location = format!(
            "{}{:<5}{} {} {}:{}:",
            color_level,
            metadata.level(),
            color_reset,
            ch_str,
            shorten_path(metadata.file().unwrap_or("unknown")),
            metadata.line().unwrap_or(0)
        );

        let mut message_buf = String::new();
        let message_writer = format::Writer::new(&mut message_buf);
        ctx.field_format().format_fields(message_writer, event)?;

        // The channel number is already in the prefix
        if has_ch {
            if let Some(ch_idx) = message_buf.find("ch=") {
                if let Some(space_idx) = message_buf[ch_idx..].find(' ') {
                    message_buf.replace_range(ch_idx..ch_idx + space_idx + 1, "");
                } else {
                    message_buf.truncate(ch_idx);
                }
            }
        }

        // "->" / "<-" lines are TX/RX traces, pull them left a little
        let mut padding = 64;
        if message_buf.starts_with("->") || message_buf.starts_with("<-") {
            padding -= 3;
        }

        write!(writer, "{:<width$} {}", location, message_buf, width = padding)?;
        writeln!(writer)
    }
}

static INIT_LOG: Once = Once::new();

/// Sets up logging with maximum verbosity (trace level)
/// Mainly for unit tests
pub fn setup_logging_verbose() {
    setup_logging(EnvFilter::new("trace"), None);
}

/// Sets up default logging to stdout and optionally, a verbose log file
/// Returns a guard, that needs to be kept alive for logging to file to work
pub fn setup_logging_default(verbose_logfile: Option<String>) -> Option<WorkerGuard> {
    let stdout_filter = match std::env::var(LOG_ENV_VAR) {
        Ok(s) if !s.is_empty() => EnvFilter::new(s),
        _ => get_default_stdout_filter(),
    };
    let logfile_and_filter = verbose_logfile.map(|file| (file, get_default_logfile_filter()));
    setup_logging(stdout_filter, logfile_and_filter)
}

pub fn get_default_stdout_filter() -> EnvFilter {
    EnvFilter::new("info")
        // Per-slot chatter from the simulated modem
        .add_directive(directive("mpt_entities::modem=info"))
        .add_directive(directive("mpt_core::framing=warn"))

        // Codeword TX/RX logging
        .add_directive(directive("mpt_entities::channel=debug"))
        .add_directive(directive("softtsc=debug"))
}

fn get_default_logfile_filter() -> EnvFilter {
    EnvFilter::new("trace")
}

fn directive(s: &'static str) -> tracing_subscriber::filter::Directive {
    // Static directive strings; a typo here is a programming error
    s.parse().expect("invalid static log directive")
}

/// Sets up logging to stdout and optionally, a verbose log file
/// If an output file is requested, returns Some<WorkerGuard>. Keep this value alive
/// or logging to file may cease working. If no output file is provided, returns None.
fn setup_logging(stdout_filter: EnvFilter, outfile: Option<(String, EnvFilter)>) -> Option<WorkerGuard> {
    if let Some((outfile, outfile_filter)) = outfile {
        let file = match OpenOptions::new().create(true).append(true).open(&outfile) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Failed to open log file {}: {}", outfile, e);
                setup_logging(stdout_filter, None);
                return None;
            }
        };
        let (file_writer, guard) = tracing_appender::non_blocking(file);

        INIT_LOG.call_once(|| {
            let file_layer = tracingfmt::layer()
                .event_format(AlignedFormatter)
                .with_writer(file_writer)
                .with_ansi(false);
            let stdout_layer = tracingfmt::layer().event_format(AlignedFormatter);

            tracing_subscriber::registry()
                .with(file_layer.with_filter(outfile_filter))
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });

        Some(guard)
    } else {
        INIT_LOG.call_once(|| {
            let stdout_layer = tracingfmt::layer().event_format(AlignedFormatter);
            tracing_subscriber::registry()
                .with(stdout_layer.with_filter(stdout_filter))
                .init();
        });
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_path() {
        assert_eq!(shorten_path("crates/mpt-entities/src/channel/controller.rs"), "[entities/channel] controller.rs");
        assert_eq!(shorten_path("crates/mpt-core/src/fcs.rs"), "[core] fcs.rs");
        assert_eq!(shorten_path("main.rs"), "main.rs");
    }
}
