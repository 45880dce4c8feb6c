use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::host::{DomEvent, EventKind, EventTarget, Host, ListenOptions, NodeId};
use crate::subscription::Teardown;
use folio_common::DomError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::warn;

pub const ELEVATED_TRANSFORM: &str = "translateY(-8px) scale(1.02)";
pub const ELEVATED_SHADOW: &str = "var(--shadow-xl)";

const TRANSFORM: &str = "transform";
const BOX_SHADOW: &str = "box-shadow";

/// Entrance delay for the card at `index`: 0s, 0.1s, 0.2s, ...
pub fn stagger_delay(index: usize) -> String {
    format!("{}s", index as f64 / 10.0)
}

/// Lift cards under the pointer or keyboard focus.
pub struct CardHoverEffect;

impl Behavior for CardHoverEffect {
    fn name(&self) -> &'static str {
        "card_hover"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let cards = ctx.host.query_all(&ctx.config.selectors.cards)?;

        for (index, &card) in cards.iter().enumerate() {
            ctx.host
                .set_style(card, "animation-delay", &stagger_delay(index))?;

            let state = Rc::new(CardState::new(ctx.host.clone(), card));
            let bindings = [
                (EventKind::MouseEnter, Source::Pointer, true),
                (EventKind::MouseLeave, Source::Pointer, false),
                (EventKind::Focus, Source::Focus, true),
                (EventKind::Blur, Source::Focus, false),
            ];
            for (kind, source, active) in bindings {
                let state = state.clone();
                let subscription = ctx.host.listen(
                    EventTarget::Element(card),
                    kind,
                    ListenOptions::default(),
                    Box::new(move |_event: &DomEvent| {
                        if let Err(err) = state.set(source, active) {
                            warn!(card = %state.node, error = %err, "Card animation failed");
                        }
                    }),
                )?;
                teardown.push(subscription);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Source {
    Pointer,
    Focus,
}

/// Inline values a card had before it was lifted.
struct SavedStyle {
    transform: String,
    box_shadow: String,
}

struct CardState {
    host: Rc<dyn Host>,
    node: NodeId,
    hovered: Cell<bool>,
    focused: Cell<bool>,
    saved: RefCell<Option<SavedStyle>>,
}

impl CardState {
    fn new(host: Rc<dyn Host>, node: NodeId) -> Self {
        Self {
            host,
            node,
            hovered: Cell::new(false),
            focused: Cell::new(false),
            saved: RefCell::new(None),
        }
    }

    fn elevated(&self) -> bool {
        self.hovered.get() || self.focused.get()
    }

    fn set(&self, source: Source, active: bool) -> Result<(), DomError> {
        let before = self.elevated();
        match source {
            Source::Pointer => self.hovered.set(active),
            Source::Focus => self.focused.set(active),
        }
        match (before, self.elevated()) {
            (false, true) => self.elevate(),
            (true, false) => self.restore(),
            _ => Ok(()),
        }
    }

    fn elevate(&self) -> Result<(), DomError> {
        *self.saved.borrow_mut() = Some(SavedStyle {
            transform: self.host.style(self.node, TRANSFORM),
            box_shadow: self.host.style(self.node, BOX_SHADOW),
        });
        self.host.set_style(self.node, TRANSFORM, ELEVATED_TRANSFORM)?;
        self.host.set_style(self.node, BOX_SHADOW, ELEVATED_SHADOW)
    }

    fn restore(&self) -> Result<(), DomError> {
        let Some(saved) = self.saved.borrow_mut().take() else {
            return Ok(());
        };
        self.put_back(TRANSFORM, &saved.transform)?;
        self.put_back(BOX_SHADOW, &saved.box_shadow)
    }

    fn put_back(&self, property: &str, value: &str) -> Result<(), DomError> {
        if value.is_empty() {
            self.host.remove_style(self.node, property)
        } else {
            self.host.set_style(self.node, property, value)
        }
    }
}
