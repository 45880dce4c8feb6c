use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::host::{DomEvent, EventKind, EventPayload, EventTarget, ListenOptions};
use crate::subscription::Teardown;
use folio_common::ErrorKind;
use serde_json::{Value, json};
use std::collections::BTreeMap;

/// Feed the window's `error` and `unhandledrejection` signals into the error log.
pub struct ErrorCapture;

impl Behavior for ErrorCapture {
    fn name(&self) -> &'static str {
        "error_capture"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        for kind in [EventKind::Error, EventKind::UnhandledRejection] {
            let host = ctx.host.clone();
            let errors = ctx.errors.clone();
            let subscription = ctx.host.listen(
                EventTarget::Window,
                kind,
                ListenOptions::default(),
                Box::new(move |event: &DomEvent| {
                    let (kind, message, stack, context) = describe(event);
                    errors.capture(&*host, kind, &message, stack, context);
                }),
            )?;
            teardown.push(subscription);
        }
        Ok(())
    }
}

type Described = (ErrorKind, String, Option<String>, BTreeMap<String, Value>);

fn describe(event: &DomEvent) -> Described {
    match &event.payload {
        EventPayload::Error {
            message,
            stack,
            filename,
            lineno,
            colno,
        } => {
            let mut context = BTreeMap::new();
            context.insert("filename".to_string(), json!(filename));
            context.insert("lineno".to_string(), json!(lineno));
            context.insert("colno".to_string(), json!(colno));
            (ErrorKind::ScriptError, message.clone(), stack.clone(), context)
        }
        EventPayload::Rejection { reason, stack } => (
            ErrorKind::UnhandledRejection,
            reason.clone(),
            stack.clone(),
            BTreeMap::new(),
        ),
        _ => {
            let kind = match event.kind {
                EventKind::UnhandledRejection => ErrorKind::UnhandledRejection,
                _ => ErrorKind::ScriptError,
            };
            (kind, "Unknown error".to_string(), None, BTreeMap::new())
        }
    }
}
