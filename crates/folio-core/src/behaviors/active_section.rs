use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::frame::FrameGuard;
use crate::host::{DomEvent, EventKind, EventTarget, Host, ListenOptions, NodeId};
use crate::subscription::Teardown;
use folio_common::DomError;
use std::rc::Rc;
use tracing::{debug, warn};

pub const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The section containing `position`; later sections win on overlap.
pub fn current_section(sections: &[SectionBounds], position: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| position >= s.top && position < s.top + s.height)
        .map(|s| s.id.as_str())
}

/// Keeps the nav link of the section under the viewport marked active.
pub struct ActiveSectionTracker;

impl Behavior for ActiveSectionTracker {
    fn name(&self) -> &'static str {
        "active_section"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let sections = ctx.host.query_all(&ctx.config.selectors.sections)?;
        let links = ctx.host.query_all(&ctx.config.selectors.nav_links)?;
        if sections.is_empty() || links.is_empty() {
            return Ok(());
        }

        let tracker = Rc::new(Tracker {
            host: ctx.host.clone(),
            sections,
            links,
            activation_offset: ctx.config.scroll.activation_offset,
        });
        tracker.highlight()?;

        let guard = FrameGuard::new();
        let host = ctx.host.clone();
        let subscription = ctx.host.listen(
            EventTarget::Window,
            EventKind::Scroll,
            ListenOptions::passive(),
            Box::new(move |_event: &DomEvent| {
                let tracker = tracker.clone();
                let scheduled = guard.schedule(&*host, move |_timestamp: f64| {
                    if let Err(err) = tracker.highlight() {
                        warn!(error = %err, "Section highlight failed");
                    }
                });
                if let Err(err) = scheduled {
                    warn!(error = %err, "Could not schedule section highlight");
                }
            }),
        )?;
        teardown.push(subscription);
        Ok(())
    }
}

struct Tracker {
    host: Rc<dyn Host>,
    sections: Vec<NodeId>,
    links: Vec<NodeId>,
    activation_offset: f64,
}

impl Tracker {
    fn measure(&self) -> Result<Vec<SectionBounds>, DomError> {
        let mut bounds = Vec::with_capacity(self.sections.len());
        for &section in &self.sections {
            let geometry = self.host.geometry(section)?;
            bounds.push(SectionBounds {
                id: self.host.attribute(section, "id").unwrap_or_default(),
                top: geometry.offset_top,
                height: geometry.offset_height,
            });
        }
        Ok(bounds)
    }

    fn highlight(&self) -> Result<(), DomError> {
        let bounds = self.measure()?;
        let position = self.host.scroll_y() + self.activation_offset;
        let wanted = current_section(&bounds, position).map(|id| format!("#{}", id));

        for &link in &self.links {
            self.host.remove_class(link, ACTIVE_CLASS)?;
            if wanted.is_some() && self.host.attribute(link, "href") == wanted {
                self.host.add_class(link, ACTIVE_CLASS)?;
            }
        }
        debug!(current = ?wanted, "Active section updated");
        Ok(())
    }
}
