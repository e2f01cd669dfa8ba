/*!
 * Tracing
 * Subscriber setup and per-command spans
 *
 * Logs go to stderr so they never interleave with the shell's own output.
 */

use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, span, warn, Level, Span};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Commands taking longer than this are logged at warn level
const SLOW_COMMAND: Duration = Duration::from_millis(10);

/// Initialize the global subscriber
///
/// `RUST_LOG` selects the level (default: warn). `json` switches to
/// one JSON object per event. Calling this twice is a no-op.
pub fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_line_number(true)
                    .compact(),
            )
            .try_init()
    };

    if result.is_ok() {
        info!(json, "Tracing initialized");
    }
}

/// Span covering one shell command, timed on drop
pub struct CommandSpan {
    span: Span,
    start: Instant,
    command: String,
}

impl CommandSpan {
    pub fn new(command: &str, args: usize) -> Self {
        let span = span!(
            Level::DEBUG,
            "command",
            command,
            args,
            duration_us = tracing::field::Empty,
        );
        Self {
            span,
            start: Instant::now(),
            command: command.to_string(),
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for CommandSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        self.span.record("duration_us", duration.as_micros() as u64);
        let _entered = self.span.enter();

        if duration > SLOW_COMMAND {
            warn!(
                command = %self.command,
                duration_ms = duration.as_millis() as u64,
                slow = true,
                "slow command"
            );
        } else {
            debug!(
                command = %self.command,
                duration_us = duration.as_micros() as u64,
                "command completed"
            );
        }
    }
}
