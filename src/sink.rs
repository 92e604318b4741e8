//! The logging backend side: something that takes a level, a clean template
//! with `{}` placeholders and the values to put into them.

use std::sync::{Mutex, PoisonError};

use crate::level::Level;
use crate::scanner::PLACEHOLDER;
use crate::value::Value;

pub trait LogSink {
    fn emit(&self, level: Level, template: &str, values: &[Value]);
}

/// Fill each `{}` with the next value's display text.
///
/// Placeholders without a value stay as `{}`; values without a placeholder
/// are dropped.
pub fn format_positional(template: &str, values: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut values = values.iter();
    let mut rest = template;
    while let Some(at) = rest.find(PLACEHOLDER) {
        out.push_str(&rest[..at]);
        match values.next() {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(PLACEHOLDER),
        }
        rest = &rest[at + PLACEHOLDER.len()..];
    }
    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// tracing
// ---------------------------------------------------------------------------

/// Emits formatted messages as `tracing` events, tagged with a logger name.
#[derive(Debug, Clone)]
pub struct TracingSink {
    name: String,
}

impl TracingSink {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl LogSink for TracingSink {
    fn emit(&self, level: Level, template: &str, values: &[Value]) {
        let message = format_positional(template, values);
        let logger = self.name.as_str();
        match level {
            Level::Error => tracing::error!(logger, "{}", message),
            Level::Warning => tracing::warn!(logger, "{}", message),
            Level::Info => tracing::info!(logger, "{}", message),
            Level::Debug => tracing::debug!(logger, "{}", message),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory capture
// ---------------------------------------------------------------------------

/// One captured emission.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub level: Level,
    pub template: String,
    pub values: Vec<Value>,
}

impl Record {
    pub fn message(&self) -> String {
        format_positional(&self.template, &self.values)
    }
}

/// Keeps every emission in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Formatted messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.records().iter().map(Record::message).collect()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, level: Level, template: &str, values: &[Value]) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Record {
                level,
                template: template.to_string(),
                values: values.to_vec(),
            });
    }
}
