use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::host::{DomEvent, EventKind, EventTarget, ListenOptions};
use crate::subscription::Teardown;
use tracing::{debug, info, warn};

/// Register the background worker script once the window has loaded.
pub struct ServiceWorkerHook;

impl Behavior for ServiceWorkerHook {
    fn name(&self) -> &'static str {
        "service_worker"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        if !ctx.config.service_worker.enabled {
            return Ok(());
        }
        let host = ctx.host.clone();
        let script_url = ctx.config.service_worker.script_url.clone();
        let subscription = ctx.host.listen(
            EventTarget::Window,
            EventKind::Load,
            ListenOptions::default(),
            Box::new(move |_event: &DomEvent| {
                match host.register_service_worker(&script_url) {
                    Ok(()) => info!(%script_url, "Service worker registration requested"),
                    Err(err) if err.is_unsupported() => debug!("Service workers unsupported"),
                    Err(err) => warn!(%script_url, error = %err, "Service worker registration failed"),
                }
            }),
        )?;
        teardown.push(subscription);
        Ok(())
    }
}
