//! One-line renderings of session records for the diagnostic console.

use crate::record::{ErrorRecord, InteractionEvent, WebVital};

pub fn format_event(event: &InteractionEvent) -> String {
    let mut out = format!("{} \"{}\"", event.action, event.label);
    if let Some(value) = event.value {
        out.push_str(&format!(" value={}", value));
    }
    if let Some(target) = &event.target {
        out.push_str(&format!(" target={}", target));
    }
    out.push_str(&format!(" at {}", event.timestamp));
    out
}

pub fn format_error(record: &ErrorRecord) -> String {
    let mut out = format!("{}: {}", record.kind, record.message);
    let location = [
        record.context.get("filename"),
        record.context.get("lineno"),
        record.context.get("colno"),
    ];
    if let [Some(file), Some(line), Some(col)] = location {
        let file = file.as_str().map(str::to_string).unwrap_or_else(|| file.to_string());
        out.push_str(&format!(" ({}:{}:{})", file, line, col));
    }
    out
}

pub fn format_vital(vital: &WebVital) -> String {
    format!("{}: {}", vital.metric.as_str(), vital.value)
}
