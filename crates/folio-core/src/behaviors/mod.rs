use crate::context::PageContext;
use crate::host::{Intersection, NodeId, ViewportWatcher, WatcherOptions};
use crate::subscription::{Subscription, Teardown};
use crate::trigger::OneShot;
use folio_common::DomError;
use std::rc::Rc;
use thiserror::Error;

pub mod active_section;
pub mod analytics;
pub mod card_hover;
pub mod counter;
pub mod error_capture;
pub mod lazy_image;
pub mod preload;
pub mod reveal;
pub mod ripple;
pub mod service_worker;
pub mod smooth_scroll;
pub mod theme;
pub mod vitals;

/// Class applied to anything that has been revealed or finished loading.
pub const FADE_IN_CLASS: &str = "fade-in";

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("DOM error: {0}")]
    Dom(#[from] DomError),
    #[error("{behavior} is misconfigured: {reason}")]
    Config {
        behavior: &'static str,
        reason: String,
    },
}

/// One independently installable piece of page behavior.
///
/// Installers register everything they need and hand every resulting
/// subscription to `teardown`; nothing else keeps them alive.
pub trait Behavior {
    fn name(&self) -> &'static str;

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError>;
}

/// All built-in behaviors in installation order.
pub fn builtin() -> Vec<Box<dyn Behavior>> {
    vec![
        Box::new(error_capture::ErrorCapture),
        Box::new(smooth_scroll::SmoothScroll),
        Box::new(reveal::RevealOnScroll),
        Box::new(active_section::ActiveSectionTracker),
        Box::new(card_hover::CardHoverEffect),
        Box::new(lazy_image::LazyImageLoader),
        Box::new(counter::CounterAnimator),
        Box::new(theme::ThemePreferenceWatcher),
        Box::new(preload::ResourcePreloader),
        Box::new(vitals::WebVitalsMonitor),
        Box::new(ripple::RippleEffect),
        Box::new(analytics::InteractionTracking),
        Box::new(service_worker::ServiceWorkerHook),
    ]
}

/// Whether an entry reports at least `threshold` of the element in view.
///
/// Watchers deliver an initial entry for every observed element, flagged
/// intersecting as soon as it touches the viewport, so the ratio is checked too.
pub fn reaches(entry: &Intersection, threshold: f64) -> bool {
    entry.is_intersecting && entry.ratio >= threshold
}

/// Observe `nodes` with one shared watcher and run `action` the first time
/// each of them reaches the watcher's threshold. The node is unobserved
/// before `action` runs.
///
/// Fails with `DomError::NotSupported` when the host has no watcher, so
/// callers can fall back to eager behavior.
pub(crate) fn observe_once(
    ctx: &PageContext,
    options: &WatcherOptions,
    nodes: &[NodeId],
    action: impl Fn(NodeId) + 'static,
    teardown: &mut Teardown,
) -> Result<(), DomError> {
    let shot = Rc::new(OneShot::new());
    let threshold = options.threshold;
    let watcher = ctx.host.create_watcher(
        options,
        Box::new(
            move |entries: &[Intersection], watcher: &dyn ViewportWatcher| {
                for entry in entries {
                    if reaches(entry, threshold) && shot.fire(entry.target) {
                        watcher.unobserve(entry.target);
                        action(entry.target);
                    }
                }
            },
        ),
    )?;
    teardown.push(Subscription::for_watcher(watcher.clone()));
    for &node in nodes {
        watcher.observe(node)?;
    }
    Ok(())
}
