use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::host::{DomEvent, EventKind, EventPayload, EventTarget, Geometry, Host, ListenOptions, NodeId};
use crate::subscription::Teardown;
use folio_common::DomError;
use std::rc::Rc;
use tracing::warn;

pub const RIPPLE_CLASS: &str = "ripple";
pub const STYLE_ELEMENT_ID: &str = "ripple-styles";

const RIPPLE_CSS: &str = include_str!("ripple.css");

pub fn ripple_css(duration_ms: u32) -> String {
    RIPPLE_CSS.replace("__DURATION__", &duration_ms.to_string())
}

/// Size and position of a ripple inside its button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleGeometry {
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
}

/// Circle covering the button's larger side, centered on the activation
/// point, or on the button itself when the activation had no pointer.
pub fn ripple_geometry(button: &Geometry, pointer: Option<(f64, f64)>) -> RippleGeometry {
    let diameter = button.client_width.max(button.client_height);
    let radius = diameter / 2.0;
    match pointer {
        Some((x, y)) => RippleGeometry {
            diameter,
            left: x - button.offset_left - radius,
            top: y - button.offset_top - radius,
        },
        None => RippleGeometry {
            diameter,
            left: button.client_width / 2.0 - radius,
            top: button.client_height / 2.0 - radius,
        },
    }
}

/// Expanding circle on button activation, one per button at a time.
///
/// The button's own children are the record of live ripples, so installs
/// that overlap or follow each other still share the one-ripple limit.
pub struct RippleEffect;

impl Behavior for RippleEffect {
    fn name(&self) -> &'static str {
        "ripple"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let duration_ms = ctx.config.ripple.duration_ms;
        if ctx.config.ripple.inject_styles {
            inject_styles(&*ctx.host, duration_ms)?;
        }

        for button in ctx.host.query_all(&ctx.config.selectors.buttons)? {
            let host = ctx.host.clone();
            let subscription = ctx.host.listen(
                EventTarget::Element(button),
                EventKind::Click,
                ListenOptions::default(),
                Box::new(move |event: &DomEvent| {
                    if let Err(err) = spawn(&host, button, event, duration_ms) {
                        warn!(%button, error = %err, "Ripple failed");
                    }
                }),
            )?;
            teardown.push(subscription);
        }
        Ok(())
    }
}

fn inject_styles(host: &dyn Host, duration_ms: u32) -> Result<(), DomError> {
    if host.element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let style = host.create_element("style")?;
    host.set_attribute(style, "id", STYLE_ELEMENT_ID)?;
    host.set_text(style, &ripple_css(duration_ms))?;
    host.append_to_head(style)
}

fn spawn(
    host: &Rc<dyn Host>,
    button: NodeId,
    event: &DomEvent,
    duration_ms: u32,
) -> Result<(), DomError> {
    let pointer = match event.payload {
        EventPayload::Pointer { client_x, client_y } => Some((client_x, client_y)),
        _ => None,
    };
    let geometry = ripple_geometry(&host.geometry(button)?, pointer);

    for previous in host.children(button) {
        if host.has_class(previous, RIPPLE_CLASS) {
            host.remove(previous);
        }
    }

    let circle = host.create_element("span")?;
    let size = format!("{}px", geometry.diameter);
    host.set_style(circle, "width", &size)?;
    host.set_style(circle, "height", &size)?;
    host.set_style(circle, "left", &format!("{}px", geometry.left))?;
    host.set_style(circle, "top", &format!("{}px", geometry.top))?;
    host.add_class(circle, RIPPLE_CLASS)?;
    host.append_child(button, circle)?;

    let cleanup = host.clone();
    host.set_timeout(
        duration_ms,
        Box::new(move || {
            if cleanup.is_connected(circle) {
                cleanup.remove(circle);
            }
        }),
    )
}
