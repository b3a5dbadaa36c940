//! Leveled log controller with a pluggable sink.
//!
//! Every event is recorded in arrival order regardless of muting; the sink
//! (stdout, or a log file derived from a configured path) only sees events
//! while unmuted. Styling applies to terminal output only.

use std::fmt;
use std::io::Write;
use std::time::Instant;

use chrono::{DateTime, Utc};
use console::style;

use crate::config::ExposeOptions;
use crate::error::Result;
use crate::validate;

/// Severity attached to a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Success,
    Warn,
    Error,
    Plain,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "debug",
            Level::Success => "success",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Plain => "plain",
        };
        write!(f, "{name}")
    }
}

/// One recorded log event.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub at: DateTime<Utc>,
    pub level: Level,
    pub message: String,
}

enum Sink {
    Stdout,
    File(std::fs::File),
}

impl Sink {
    fn write_line(&mut self, line: &str) -> std::io::Result<()> {
        match self {
            Sink::Stdout => writeln!(std::io::stdout(), "{line}"),
            Sink::File(file) => writeln!(file, "{line}"),
        }
    }
}

/// Records log events and mirrors them to the configured sink.
pub struct Controller {
    color: bool,
    muted: bool,
    sink: Sink,
    events: Vec<LogEvent>,
    timer: Option<(String, Instant)>,
}

impl Controller {
    pub fn new(options: &ExposeOptions) -> Result<Self> {
        let sink = match &options.log {
            Some(target) => Sink::File(validate::resolve_log_sink(target)?),
            None => Sink::Stdout,
        };

        Ok(Self {
            color: options.color,
            muted: options.mute,
            sink,
            events: Vec::new(),
            timer: None,
        })
    }

    pub fn debug(&mut self, message: &str) {
        self.log(message, Level::Debug);
    }

    pub fn success(&mut self, message: &str) {
        self.log(message, Level::Success);
    }

    pub fn warn(&mut self, message: &str) {
        self.log(message, Level::Warn);
    }

    pub fn err(&mut self, message: &str) {
        self.log(message, Level::Error);
    }

    pub fn plain(&mut self, message: &str) {
        self.log(message, Level::Plain);
    }

    /// Records the event, then writes the line unless muted.
    pub fn log(&mut self, message: &str, level: Level) {
        self.events.push(LogEvent {
            at: Utc::now(),
            level,
            message: message.to_string(),
        });

        if self.muted {
            return;
        }

        let line = self.paint(message, level);
        // A failing log sink never aborts the transformation itself.
        let _ = self.sink.write_line(&line);
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    /// Starts (or restarts) the labeled timer.
    pub fn time(&mut self, label: &str) {
        self.timer = Some((label.to_string(), Instant::now()));
    }

    /// Stops the timer and logs the elapsed seconds.
    pub fn time_end(&mut self) -> f64 {
        match self.timer.take() {
            Some((label, started)) => {
                let elapsed = started.elapsed().as_secs_f64();
                self.log(&format!("{label} done in {elapsed:.3}s"), Level::Plain);
                elapsed
            }
            None => 0.0,
        }
    }

    fn paint(&self, message: &str, level: Level) -> String {
        if !self.color || matches!(self.sink, Sink::File(_)) {
            return message.to_string();
        }

        match level {
            Level::Debug => style(message).blue().to_string(),
            Level::Success => style(message).green().to_string(),
            Level::Warn => style(message).yellow().to_string(),
            Level::Error => style(message).red().to_string(),
            Level::Plain => message.to_string(),
        }
    }
}
