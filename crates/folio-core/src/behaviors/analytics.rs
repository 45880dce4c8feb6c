use super::{Behavior, BehaviorError, reaches};
use crate::context::PageContext;
use crate::host::{
    DomEvent, EventKind, EventTarget, Intersection, ListenOptions, ViewportWatcher, WatcherOptions,
};
use crate::subscription::{Subscription, Teardown};
use tracing::{debug, warn};

pub const CLICK_ACTION: &str = "click";
pub const SECTION_VIEW_ACTION: &str = "section_view";

/// Record clicks on tracked controls and section views into the session log.
pub struct InteractionTracking;

impl Behavior for InteractionTracking {
    fn name(&self) -> &'static str {
        "analytics"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        if !ctx.config.analytics.enabled {
            debug!("Analytics disabled");
            return Ok(());
        }
        track_clicks(ctx, teardown)?;
        track_sections(ctx, teardown)
    }
}

fn track_clicks(ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
    let host = ctx.host.clone();
    let events = ctx.events.clone();
    let selector = ctx.config.selectors.tracked_clicks.clone();

    let subscription = ctx.host.listen(
        EventTarget::Document,
        EventKind::Click,
        ListenOptions::default(),
        Box::new(move |event: &DomEvent| {
            let Some(element) = event.target.and_then(|t| host.closest(t, &selector)) else {
                return;
            };
            let label = host.text(element);
            let target = host
                .attribute(element, "href")
                .or_else(|| host.attribute(element, "onclick"));
            events.track(&*host, CLICK_ACTION, label.trim(), None, target);
        }),
    )?;
    teardown.push(subscription);
    Ok(())
}

fn track_sections(ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
    let sections = ctx.host.query_all(&ctx.config.selectors.sections)?;
    if sections.is_empty() {
        return Ok(());
    }

    let host = ctx.host.clone();
    let events = ctx.events.clone();
    let threshold = ctx.config.analytics.section_threshold;
    let created = ctx.host.create_watcher(
        &WatcherOptions::threshold(threshold),
        Box::new(
            move |entries: &[Intersection], _watcher: &dyn ViewportWatcher| {
                for entry in entries.iter().filter(|e| reaches(e, threshold)) {
                    let id = host.attribute(entry.target, "id").unwrap_or_default();
                    events.track(&*host, SECTION_VIEW_ACTION, &id, Some(entry.ratio), None);
                }
            },
        ),
    );
    let watcher = match created {
        Ok(watcher) => watcher,
        Err(err) if err.is_unsupported() => {
            warn!(error = %err, "Section views will not be tracked");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    teardown.push(Subscription::for_watcher(watcher.clone()));
    for section in sections {
        watcher.observe(section)?;
    }
    Ok(())
}
