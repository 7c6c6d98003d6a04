//! Rolling Logger
//!
//! Keeps the most recent log records in a fixed-size circular buffer fed
//! by `tracing`, and optionally forwards each record to a sink (the
//! browser console in the client).

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

/// Default number of records kept
pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("logger already initialized")]
    AlreadyInitialized,

    #[error("capacity must be greater than zero")]
    ZeroCapacity,
}

/// One formatted log line
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:>5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Shared circular buffer of records
#[derive(Debug, Clone)]
pub struct RollingBuffer {
    records: Arc<Mutex<VecDeque<LogRecord>>>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Result<Self, LoggerError> {
        if capacity == 0 {
            return Err(LoggerError::ZeroCapacity);
        }
        Ok(Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        })
    }

    pub fn push(&self, record: LogRecord) {
        let mut records = match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    /// Copy of the buffered records, oldest first
    pub fn snapshot(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(guard) => guard.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

type Sink = Box<dyn Fn(&LogRecord) + Send + Sync>;

/// `tracing` layer writing into a [`RollingBuffer`]
pub struct RollingLayer {
    buffer: RollingBuffer,
    sink: Option<Sink>,
}

impl RollingLayer {
    pub fn new(buffer: RollingBuffer) -> Self {
        Self { buffer, sink: None }
    }

    /// Also hand every record to `sink`
    pub fn with_sink(mut self, sink: impl Fn(&LogRecord) + Send + Sync + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let metadata = event.metadata();
        let record = LogRecord {
            timestamp: Local::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.finish(),
        };

        if let Some(sink) = &self.sink {
            sink(&record);
        }
        self.buffer.push(record);
    }
}

/// Collects `message` plus `key=value` for the other fields
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields
        } else {
            format!("{} {}", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

static GLOBAL_BUFFER: OnceLock<RollingBuffer> = OnceLock::new();

/// Install the rolling layer as the global subscriber.
///
/// Returns the buffer so callers can show recent records.
pub fn init_logger(
    capacity: usize,
    max_level: Level,
    sink: impl Fn(&LogRecord) + Send + Sync + 'static,
) -> Result<RollingBuffer, LoggerError> {
    let buffer = RollingBuffer::new(capacity)?;
    let layer = RollingLayer::new(buffer.clone())
        .with_sink(sink)
        .with_filter(LevelFilter::from_level(max_level));
    let subscriber = tracing_subscriber::registry().with(layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    GLOBAL_BUFFER
        .set(buffer.clone())
        .map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(buffer)
}

/// Records captured by the global logger, oldest first
pub fn recent() -> Vec<LogRecord> {
    GLOBAL_BUFFER
        .get()
        .map(RollingBuffer::snapshot)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(capacity: usize, f: impl FnOnce()) -> RollingBuffer {
        let buffer = RollingBuffer::new(capacity).unwrap();
        let subscriber = tracing_subscriber::registry().with(RollingLayer::new(buffer.clone()));
        tracing::subscriber::with_default(subscriber, f);
        buffer
    }

    #[test]
    fn test_records_message_and_fields() {
        let buffer = capture(10, || {
            tracing::warn!(item_id = "t1", attempt = 2, "Drop rejected");
        });

        let records = buffer.snapshot();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::WARN);
        assert_eq!(records[0].message, "Drop rejected item_id=t1 attempt=2");
    }

    #[test]
    fn test_circular_buffer_drops_oldest() {
        let buffer = capture(3, || {
            for i in 0..5 {
                tracing::info!("record {}", i);
            }
        });

        let messages: Vec<String> = buffer.snapshot().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["record 2", "record 3", "record 4"]);
        assert_eq!(buffer.capacity(), 3);
    }

    #[test]
    fn test_sink_sees_every_record() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let buffer = RollingBuffer::new(1).unwrap();
        let layer = RollingLayer::new(buffer.clone()).with_sink(move |record| {
            sink.lock().unwrap().push(record.message.clone());
        });
        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("first");
            tracing::error!("second");
        });

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(RollingBuffer::new(0), Err(LoggerError::ZeroCapacity)));
    }

    #[test]
    fn test_display_format() {
        let record = LogRecord {
            timestamp: Local::now(),
            level: Level::INFO,
            target: "board".to_string(),
            message: "Board reloaded".to_string(),
        };
        let line = record.to_string();
        assert!(line.ends_with(" INFO board: Board reloaded"));
    }
}
