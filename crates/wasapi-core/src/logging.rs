//! Caller-facing diagnostic sink.
//!
//! A [`LogSink`] is a single-argument callback that receives either a line of
//! text or a structured JSON value. The client routes verbose request detail
//! and raw failing responses here; it is separate from the `tracing` events
//! the crate emits.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One message handed to a [`LogSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Text(String),
    Structured(Value),
}

impl From<&str> for LogEntry {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for LogEntry {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for LogEntry {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

#[derive(Clone)]
pub struct LogSink(Arc<dyn Fn(LogEntry) + Send + Sync>);

impl LogSink {
    pub fn new(f: impl Fn(LogEntry) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// A sink that drops everything.
    pub fn silent() -> Self {
        Self::new(|_| {})
    }

    pub fn log(&self, entry: impl Into<LogEntry>) {
        (self.0)(entry.into());
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::silent()
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LogSink(..)")
    }
}

/// Sink that timestamps every entry and prints it to stdout.
pub fn console_sink() -> LogSink {
    LogSink::new(|entry| println!("{}", format_entry(OffsetDateTime::now_utc(), &entry)))
}

/// Render `entry` as `[<rfc3339>] <payload>`. Structured values are
/// pretty-printed JSON.
pub fn format_entry(at: OffsetDateTime, entry: &LogEntry) -> String {
    let stamp = at
        .format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    let payload = match entry {
        LogEntry::Text(text) => text.clone(),
        LogEntry::Structured(value) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
    };
    format!("[{stamp}] {payload}")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[test]
    fn silent_sink_accepts_anything() {
        let sink = LogSink::default();
        sink.log("text");
        sink.log(json!({"k": 1}));
    }

    #[test]
    fn sink_receives_text_and_structured_entries() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink = LogSink::new(move |entry| captured.lock().unwrap().push(entry));

        sink.log("Url :http://127.0.0.1:37128");
        sink.log(json!({"method": "getstatus"}));

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                LogEntry::Text("Url :http://127.0.0.1:37128".into()),
                LogEntry::Structured(json!({"method": "getstatus"})),
            ]
        );
    }

    #[test]
    fn format_entry_prefixes_rfc3339_timestamp() {
        let at = OffsetDateTime::from_unix_timestamp(0).unwrap();
        assert_eq!(
            format_entry(at, &LogEntry::from("hello")),
            "[1970-01-01T00:00:00Z] hello"
        );
    }

    #[test]
    fn format_entry_pretty_prints_structured_values() {
        let at = OffsetDateTime::from_unix_timestamp(0).unwrap();
        let rendered = format_entry(at, &LogEntry::from(json!({"id": "1"})));
        assert_eq!(rendered, "[1970-01-01T00:00:00Z] {\n  \"id\": \"1\"\n}");
    }
}
