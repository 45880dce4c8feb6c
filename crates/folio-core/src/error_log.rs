use crate::host::Host;
use folio_common::formatter::format_error;
use folio_common::{ErrorKind, ErrorRecord};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::{debug, error};

/// Structured log of uncaught script errors and unhandled rejections.
///
/// Capturing never panics: if the log is busy (a capture re-entered from
/// inside another capture) the record is dropped with a debug note.
#[derive(Clone, Default)]
pub struct GlobalErrorLog {
    records: Rc<RefCell<Vec<ErrorRecord>>>,
}

impl GlobalErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(
        &self,
        host: &dyn Host,
        kind: ErrorKind,
        message: &str,
        stack: Option<String>,
        context: BTreeMap<String, Value>,
    ) {
        let record = ErrorRecord {
            kind,
            message: message.to_string(),
            stack,
            timestamp: host.timestamp(),
            url: host.location(),
            user_agent: host.user_agent(),
            context,
        };
        self.record(record);
    }

    pub fn record(&self, record: ErrorRecord) {
        error!(error = %format_error(&record), "Portfolio error");
        match self.records.try_borrow_mut() {
            Ok(mut records) => records.push(record),
            Err(_) => debug!(kind = %record.kind, "Error log busy, record dropped"),
        }
    }

    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records
            .try_borrow()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.try_borrow().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
