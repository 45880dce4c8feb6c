use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::easing::scroll_destination;
use crate::host::{DomEvent, EventKind, EventTarget, Host, ListenOptions, NodeId, ScrollBehavior};
use crate::subscription::Teardown;
use folio_common::DomError;
use tracing::{debug, warn};

/// Smooth scrolling for in-page anchors, leaving room for the fixed header.
pub struct SmoothScroll;

impl Behavior for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth_scroll"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let anchors = ctx.host.query_all(&ctx.config.selectors.anchors)?;
        let header_offset = ctx.config.scroll.header_offset;

        for &anchor in &anchors {
            let host = ctx.host.clone();
            let subscription = ctx.host.listen(
                EventTarget::Element(anchor),
                EventKind::Click,
                ListenOptions::default(),
                Box::new(move |event: &DomEvent| {
                    event.prevent_default();
                    if let Err(err) = scroll_to_anchor(&*host, anchor, header_offset) {
                        warn!(%anchor, error = %err, "Smooth scroll failed");
                    }
                }),
            )?;
            teardown.push(subscription);
        }

        debug!(anchors = anchors.len(), "Smooth scrolling bound");
        Ok(())
    }
}

/// Element id named by an in-page `href`, if it names one.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Returns whether a scroll was started.
fn scroll_to_anchor(host: &dyn Host, anchor: NodeId, header_offset: f64) -> Result<bool, DomError> {
    let Some(href) = host.attribute(anchor, "href") else {
        return Ok(false);
    };
    let Some(target) = fragment_id(&href).and_then(|id| host.element_by_id(id)) else {
        debug!(%href, "Anchor target not found");
        return Ok(false);
    };

    let rect_top = host.geometry(target)?.rect_top;
    let top = scroll_destination(rect_top, host.scroll_y(), header_offset);
    host.scroll_to(top, ScrollBehavior::Smooth)?;
    Ok(true)
}
