//! The seam between page behaviors and whatever renders the page.
//!
//! `Dom` covers document reads and writes, `Runtime` covers everything that
//! calls back later (listeners, watchers, frames, timers). The browser build
//! implements both on top of `web-sys`; tests implement them in memory.

use crate::subscription::Subscription;
use folio_common::DomError;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout numbers for one element, in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    pub offset_top: f64,
    pub offset_left: f64,
    pub offset_height: f64,
    pub client_width: f64,
    pub client_height: f64,
    /// Top of the bounding client rect, relative to the viewport.
    pub rect_top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

pub trait Dom {
    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError>;
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError>;
    fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DomError>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&self, node: NodeId, class: &str) -> Result<(), DomError>;
    fn remove_class(&self, node: NodeId, class: &str) -> Result<(), DomError>;

    /// Inline style value, empty when unset.
    fn style(&self, node: NodeId, property: &str) -> String;
    fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), DomError>;
    fn remove_style(&self, node: NodeId, property: &str) -> Result<(), DomError>;

    fn text(&self, node: NodeId) -> String;
    fn set_text(&self, node: NodeId, text: &str) -> Result<(), DomError>;

    fn geometry(&self, node: NodeId) -> Result<Geometry, DomError>;

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError>;
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError>;
    fn append_to_head(&self, child: NodeId) -> Result<(), DomError>;
    fn remove(&self, node: NodeId);
    fn is_connected(&self, node: NodeId) -> bool;
    /// Element children of `node` in document order.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Set an attribute on the document element (`<html>`).
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;

    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) -> Result<(), DomError>;

    fn location(&self) -> String;
    fn user_agent(&self) -> String;
    /// Wall clock as an ISO-8601 string.
    fn timestamp(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Window,
    Document,
    Element(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
    MouseEnter,
    MouseLeave,
    Focus,
    Blur,
    Load,
    Error,
    UnhandledRejection,
}

impl EventKind {
    /// DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::Load => "load",
            EventKind::Error => "error",
            EventKind::UnhandledRejection => "unhandledrejection",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenOptions {
    pub passive: bool,
}

impl ListenOptions {
    pub fn passive() -> Self {
        Self { passive: true }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    None,
    Pointer {
        client_x: f64,
        client_y: f64,
    },
    Error {
        message: String,
        stack: Option<String>,
        filename: String,
        lineno: u32,
        colno: u32,
    },
    Rejection {
        reason: String,
        stack: Option<String>,
    },
}

/// A dispatched DOM event as seen by a handler.
#[derive(Debug)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: Option<NodeId>,
    pub payload: EventPayload,
    default_prevented: Cell<bool>,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: Option<NodeId>, payload: EventPayload) -> Self {
        Self {
            kind,
            target,
            payload,
            default_prevented: Cell::new(false),
        }
    }

    /// Hosts read this back after the handler returns and cancel the native event.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatcherOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl WatcherOptions {
    pub fn threshold(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin: "0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub target: NodeId,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// A viewport-visibility watcher shared by every element it observes.
pub trait ViewportWatcher {
    fn observe(&self, node: NodeId) -> Result<(), DomError>;
    fn unobserve(&self, node: NodeId);
    fn disconnect(&self);
}

pub trait MediaQuery {
    fn matches(&self) -> bool;
    fn on_change(&self, handler: Box<dyn FnMut(bool)>) -> Result<Subscription, DomError>;
}

/// One platform performance entry, reduced to the fields web vitals need.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerfEntry {
    pub entry_type: String,
    pub start_time: f64,
    pub processing_start: Option<f64>,
    pub value: Option<f64>,
    pub had_recent_input: bool,
}

pub type Handler = Box<dyn FnMut(&DomEvent)>;
pub type WatcherCallback = Box<dyn FnMut(&[Intersection], &dyn ViewportWatcher)>;
pub type FrameCallback = Box<dyn FnOnce(f64)>;
pub type TimerCallback = Box<dyn FnOnce()>;
pub type PerfCallback = Box<dyn FnMut(&[PerfEntry])>;

pub trait Runtime {
    fn listen(
        &self,
        target: EventTarget,
        kind: EventKind,
        options: ListenOptions,
        handler: Handler,
    ) -> Result<Subscription, DomError>;

    /// Schedule `callback` for the next animation frame with its timestamp.
    fn request_frame(&self, callback: FrameCallback) -> Result<(), DomError>;

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<(), DomError>;

    /// High-resolution time in milliseconds, same clock as frame timestamps.
    fn now(&self) -> f64;

    fn create_watcher(
        &self,
        _options: &WatcherOptions,
        _callback: WatcherCallback,
    ) -> Result<Rc<dyn ViewportWatcher>, DomError> {
        Err(DomError::NotSupported("IntersectionObserver".into()))
    }

    fn match_media(&self, _query: &str) -> Result<Rc<dyn MediaQuery>, DomError> {
        Err(DomError::NotSupported("matchMedia".into()))
    }

    fn observe_performance(
        &self,
        _entry_types: &[&str],
        _callback: PerfCallback,
    ) -> Result<Subscription, DomError> {
        Err(DomError::NotSupported("PerformanceObserver".into()))
    }

    /// Kick off background-worker registration; the outcome is only logged.
    fn register_service_worker(&self, _script_url: &str) -> Result<(), DomError> {
        Err(DomError::NotSupported("serviceWorker".into()))
    }
}

pub trait Host: Dom + Runtime {}

impl<T: Dom + Runtime + ?Sized> Host for T {}
