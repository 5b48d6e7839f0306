//! Fire-and-forget audit trail contract.
//!
//! Mutating call sites record who did what in human-readable form. Sinks must
//! never fail the mutation that triggered them: implementations swallow their
//! own errors.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Action taxonomy shared with the store's history collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Swap,
    Generate,
    Clear,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Swap => "SWAP",
            Self::Generate => "GENERATE",
            Self::Clear => "CLEAR",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: AuditAction,
    pub details: String,
}

impl AuditRecord {
    pub fn new(action: AuditAction, details: String, actor: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            actor: actor.to_owned(),
            action,
            details,
        }
    }
}

pub trait AuditSink {
    fn record(&self, action: AuditAction, details: String, actor: &str);
}

/// Sink that emits audit records as tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AuditSink for LogSink {
    fn record(&self, action: AuditAction, details: String, actor: &str) {
        tracing::info!(action = action.as_str(), actor, "{details}");
    }
}

/// In-memory sink for tests and offline sessions.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AuditRecord> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => Vec::new(),
        }
    }
}

impl AuditSink for MemorySink {
    fn record(&self, action: AuditAction, details: String, actor: &str) {
        if let Ok(mut guard) = self.records.lock() {
            guard.push(AuditRecord::new(action, details, actor));
        }
    }
}
