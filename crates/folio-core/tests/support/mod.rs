#![allow(dead_code)]

//! In-memory page used by the integration tests.
//!
//! Elements live in a flat arena in document order. Listeners, watchers,
//! frames and timers are queued and only run when a test drives them.

use folio_common::{DomError, FolioConfig};
use folio_core::host::{
    Dom, DomEvent, EventKind, EventPayload, EventTarget, FrameCallback, Geometry, Handler,
    Intersection, ListenOptions, MediaQuery, NodeId, PerfCallback, PerfEntry, Runtime,
    ScrollBehavior, TimerCallback, ViewportWatcher, WatcherCallback, WatcherOptions,
};
use folio_core::{Behavior, Host, Subscription, ViewController};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

pub const PAGE_URL: &str = "https://folio.test/";
pub const USER_AGENT: &str = "FakePage/1.0";
pub const TIMESTAMP: &str = "2026-01-01T00:00:00.000Z";

#[derive(Debug, Clone, Default)]
struct FakeElement {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    geometry: Geometry,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    connected: bool,
}

struct Listener {
    id: u64,
    target: EventTarget,
    kind: EventKind,
    options: ListenOptions,
    handler: Rc<RefCell<Handler>>,
}

pub struct FakeWatcher {
    pub options: WatcherOptions,
    observed: RefCell<Vec<NodeId>>,
    callback: RefCell<WatcherCallback>,
    disconnected: Cell<bool>,
}

impl FakeWatcher {
    pub fn is_observing(&self, node: NodeId) -> bool {
        self.observed.borrow().contains(&node)
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.get()
    }
}

impl ViewportWatcher for FakeWatcher {
    fn observe(&self, node: NodeId) -> Result<(), DomError> {
        let mut observed = self.observed.borrow_mut();
        if !observed.contains(&node) {
            observed.push(node);
        }
        Ok(())
    }

    fn unobserve(&self, node: NodeId) {
        self.observed.borrow_mut().retain(|n| *n != node);
    }

    fn disconnect(&self) {
        self.disconnected.set(true);
        self.observed.borrow_mut().clear();
    }
}

type MediaHandler = Rc<RefCell<Box<dyn FnMut(bool)>>>;

#[derive(Default)]
pub struct FakeMedia {
    dark: Cell<bool>,
    next_id: Cell<u64>,
    handlers: Rc<RefCell<Vec<(u64, MediaHandler)>>>,
}

impl FakeMedia {
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl MediaQuery for FakeMedia {
    fn matches(&self) -> bool {
        self.dark.get()
    }

    fn on_change(&self, handler: Box<dyn FnMut(bool)>) -> Result<Subscription, DomError> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(handler))));
        let handlers = self.handlers.clone();
        Ok(Subscription::new(move || {
            handlers.borrow_mut().retain(|(h, _)| *h != id);
        }))
    }
}

pub struct FakePage {
    elements: RefCell<Vec<FakeElement>>,
    body: NodeId,
    head: NodeId,
    root_attributes: RefCell<BTreeMap<String, String>>,

    scroll_y: Cell<f64>,
    scroll_calls: RefCell<Vec<(f64, ScrollBehavior)>>,

    next_listener: Cell<u64>,
    listeners: Rc<RefCell<Vec<Listener>>>,
    watchers: RefCell<Vec<Rc<FakeWatcher>>>,
    frames: RefCell<Vec<FrameCallback>>,
    timers: RefCell<Vec<(f64, TimerCallback)>>,
    now: Cell<f64>,

    media: Rc<FakeMedia>,
    perf_callbacks: Rc<RefCell<Vec<(u64, Rc<RefCell<PerfCallback>>)>>>,
    sw_registrations: RefCell<Vec<String>>,

    supports_watchers: Cell<bool>,
    supports_media: Cell<bool>,
    supports_performance: Cell<bool>,
    supports_service_worker: Cell<bool>,
    read_only: RefCell<Vec<NodeId>>,
}

impl FakePage {
    pub fn new() -> Rc<Self> {
        let head = FakeElement {
            tag: "head".into(),
            connected: true,
            ..FakeElement::default()
        };
        let body = FakeElement {
            tag: "body".into(),
            connected: true,
            ..FakeElement::default()
        };
        Rc::new(Self {
            elements: RefCell::new(vec![head, body]),
            head: NodeId(0),
            body: NodeId(1),
            root_attributes: RefCell::new(BTreeMap::new()),
            scroll_y: Cell::new(0.0),
            scroll_calls: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            listeners: Rc::new(RefCell::new(Vec::new())),
            watchers: RefCell::new(Vec::new()),
            frames: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            now: Cell::new(0.0),
            media: Rc::new(FakeMedia::default()),
            perf_callbacks: Rc::new(RefCell::new(Vec::new())),
            sw_registrations: RefCell::new(Vec::new()),
            supports_watchers: Cell::new(true),
            supports_media: Cell::new(true),
            supports_performance: Cell::new(true),
            supports_service_worker: Cell::new(true),
            read_only: RefCell::new(Vec::new()),
        })
    }

    pub fn host(self: &Rc<Self>) -> Rc<dyn Host> {
        self.clone()
    }

    pub fn controller(self: &Rc<Self>, config: FolioConfig) -> ViewController {
        ViewController::new(self.host(), config)
    }

    pub fn controller_with(
        self: &Rc<Self>,
        config: FolioConfig,
        behaviors: Vec<Box<dyn Behavior>>,
    ) -> ViewController {
        ViewController::with_behaviors(self.host(), config, behaviors)
    }

    // ---- building ----

    /// Start a new element appended to `<body>`.
    pub fn add(&self, tag: &str) -> ElementBuilder<'_> {
        ElementBuilder {
            page: self,
            element: FakeElement {
                tag: tag.to_string(),
                ..FakeElement::default()
            },
            parent: self.body,
        }
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ---- capability toggles ----

    pub fn set_supports_watchers(&self, supported: bool) {
        self.supports_watchers.set(supported);
    }

    pub fn set_supports_media(&self, supported: bool) {
        self.supports_media.set(supported);
    }

    pub fn set_supports_performance(&self, supported: bool) {
        self.supports_performance.set(supported);
    }

    pub fn set_supports_service_worker(&self, supported: bool) {
        self.supports_service_worker.set(supported);
    }

    /// Attribute writes on `node` fail with `DomError::Script`.
    pub fn set_read_only(&self, node: NodeId) {
        self.read_only.borrow_mut().push(node);
    }

    // ---- inspection ----

    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.borrow().get(name).cloned()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.elements.borrow()[node.0 as usize].classes.clone()
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.elements.borrow()[node.0 as usize].tag.clone()
    }

    pub fn scroll_calls(&self) -> Vec<(f64, ScrollBehavior)> {
        self.scroll_calls.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listeners_on(&self, target: EventTarget, kind: EventKind) -> Vec<ListenOptions> {
        self.listeners
            .borrow()
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.options)
            .collect()
    }

    pub fn watchers(&self) -> Vec<Rc<FakeWatcher>> {
        self.watchers.borrow().clone()
    }

    pub fn active_watchers(&self) -> usize {
        self.watchers
            .borrow()
            .iter()
            .filter(|w| !w.is_disconnected())
            .count()
    }

    pub fn media(&self) -> Rc<FakeMedia> {
        self.media.clone()
    }

    pub fn perf_observer_count(&self) -> usize {
        self.perf_callbacks.borrow().len()
    }

    pub fn sw_registrations(&self) -> Vec<String> {
        self.sw_registrations.borrow().clone()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    // ---- driving ----

    pub fn set_now(&self, now: f64) {
        self.now.set(now);
    }

    pub fn set_geometry(&self, node: NodeId, geometry: Geometry) {
        self.elements.borrow_mut()[node.0 as usize].geometry = geometry;
    }

    /// Run every frame requested so far; frames requested while running wait
    /// for the next call. Returns how many ran.
    pub fn run_frame(&self, timestamp: f64) -> usize {
        self.now.set(timestamp);
        let frames = std::mem::take(&mut *self.frames.borrow_mut());
        let count = frames.len();
        for frame in frames {
            frame(timestamp);
        }
        count
    }

    /// Advance the clock and fire every timer that came due, earliest first.
    pub fn advance(&self, ms: f64) {
        let now = self.now.get() + ms;
        self.now.set(now);
        loop {
            let due = {
                let mut timers = self.timers.borrow_mut();
                let next = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, (at, _))| *at <= now)
                    .min_by(|a, b| a.1.0.total_cmp(&b.1.0))
                    .map(|(index, _)| index);
                next.map(|index| timers.remove(index).1)
            };
            match due {
                Some(timer) => timer(),
                None => break,
            }
        }
    }

    /// Report `node` at visibility `ratio` to every live watcher observing it.
    pub fn intersect(&self, node: NodeId, ratio: f64) {
        let watchers = self.watchers.borrow().clone();
        for watcher in watchers {
            if watcher.is_disconnected() || !watcher.is_observing(node) {
                continue;
            }
            // Browsers flag any overlap as intersecting, whatever the threshold.
            let entry = Intersection {
                target: node,
                is_intersecting: ratio > 0.0,
                ratio,
            };
            let mut callback = watcher.callback.borrow_mut();
            (*callback)(&[entry], &*watcher);
        }
    }

    pub fn set_dark(&self, dark: bool) {
        self.media.dark.set(dark);
        let handlers: Vec<MediaHandler> = self
            .media
            .handlers
            .borrow()
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        for handler in handlers {
            (*handler.borrow_mut())(dark);
        }
    }

    pub fn emit_performance(&self, entries: &[PerfEntry]) {
        let callbacks: Vec<_> = self
            .perf_callbacks
            .borrow()
            .iter()
            .map(|(_, c)| c.clone())
            .collect();
        for callback in callbacks {
            (*callback.borrow_mut())(entries);
        }
    }

    /// Mouse click at `pointer`; bubbles through ancestors, document, window.
    pub fn click(&self, node: NodeId, pointer: Option<(f64, f64)>) -> DomEvent {
        let payload = match pointer {
            Some((client_x, client_y)) => EventPayload::Pointer { client_x, client_y },
            None => EventPayload::None,
        };
        let event = DomEvent::new(EventKind::Click, Some(node), payload);
        let mut path: Vec<EventTarget> = self
            .ancestry(node)
            .into_iter()
            .map(EventTarget::Element)
            .collect();
        path.push(EventTarget::Document);
        path.push(EventTarget::Window);
        self.dispatch(&path, &event);
        event
    }

    /// Non-bubbling event on one element (mouseenter, focus, ...).
    pub fn fire(&self, node: NodeId, kind: EventKind) -> DomEvent {
        let event = DomEvent::new(kind, Some(node), EventPayload::None);
        self.dispatch(&[EventTarget::Element(node)], &event);
        event
    }

    pub fn fire_window(&self, kind: EventKind, payload: EventPayload) -> DomEvent {
        let event = DomEvent::new(kind, None, payload);
        self.dispatch(&[EventTarget::Window], &event);
        event
    }

    /// Move the viewport and fire a window scroll event.
    pub fn scroll_page(&self, y: f64) {
        self.scroll_y.set(y);
        self.fire_window(EventKind::Scroll, EventPayload::None);
    }

    fn dispatch(&self, path: &[EventTarget], event: &DomEvent) {
        for target in path {
            let handlers: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .filter(|l| l.target == *target && l.kind == event.kind)
                .map(|l| l.handler.clone())
                .collect();
            for handler in handlers {
                (*handler.borrow_mut())(event);
            }
        }
    }

    fn ancestry(&self, node: NodeId) -> Vec<NodeId> {
        let elements = self.elements.borrow();
        let mut chain = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            chain.push(id);
            current = elements.get(id.0 as usize).and_then(|e| e.parent);
        }
        chain
    }

    fn with_element<T>(
        &self,
        node: NodeId,
        f: impl FnOnce(&FakeElement) -> T,
    ) -> Result<T, DomError> {
        self.elements
            .borrow()
            .get(node.0 as usize)
            .map(f)
            .ok_or(DomError::ElementStale(node.0))
    }

    fn with_element_mut<T>(
        &self,
        node: NodeId,
        f: impl FnOnce(&mut FakeElement) -> T,
    ) -> Result<T, DomError> {
        self.elements
            .borrow_mut()
            .get_mut(node.0 as usize)
            .map(f)
            .ok_or(DomError::ElementStale(node.0))
    }

    fn set_connected(&self, node: NodeId, connected: bool) {
        let children = {
            let mut elements = self.elements.borrow_mut();
            let element = &mut elements[node.0 as usize];
            element.connected = connected;
            element.children.clone()
        };
        for child in children {
            self.set_connected(child, connected);
        }
    }

    fn attach(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_connected = self.with_element(parent, |e| e.connected)?;
        let previous = self.with_element_mut(child, |e| e.parent.replace(parent))?;
        if let Some(previous) = previous {
            self.with_element_mut(previous, |e| e.children.retain(|c| *c != child))?;
        }
        self.with_element_mut(parent, |e| e.children.push(child))?;
        self.set_connected(child, parent_connected);
        Ok(())
    }
}

pub struct ElementBuilder<'a> {
    page: &'a FakePage,
    element: FakeElement,
    parent: NodeId,
}

impl ElementBuilder<'_> {
    pub fn id(mut self, id: &str) -> Self {
        self.element.attributes.insert("id".into(), id.into());
        self
    }

    pub fn class(mut self, classes: &str) -> Self {
        self.element
            .classes
            .extend(classes.split_whitespace().map(String::from));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element.attributes.insert(name.into(), value.into());
        self
    }

    pub fn style(mut self, property: &str, value: &str) -> Self {
        self.element.styles.insert(property.into(), value.into());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.element.text = text.to_string();
        self
    }

    pub fn geometry(mut self, geometry: Geometry) -> Self {
        self.element.geometry = geometry;
        self
    }

    pub fn inside(mut self, parent: NodeId) -> Self {
        self.parent = parent;
        self
    }

    pub fn build(self) -> NodeId {
        let node = {
            let mut elements = self.page.elements.borrow_mut();
            elements.push(self.element);
            NodeId((elements.len() - 1) as u32)
        };
        self.page
            .attach(self.parent, node)
            .expect("parent element exists");
        node
    }
}

// ---- selectors ----

fn matches_selector(element: &FakeElement, selector: &str) -> Result<bool, DomError> {
    let mut any = false;
    for part in selector.split(',') {
        if matches_compound(element, part.trim(), selector)? {
            any = true;
        }
    }
    Ok(any)
}

fn take_ident(rest: &str) -> (&str, &str) {
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*'))
        .unwrap_or(rest.len());
    rest.split_at(end)
}

fn matches_compound(element: &FakeElement, part: &str, whole: &str) -> Result<bool, DomError> {
    let invalid = || DomError::SelectorInvalid {
        selector: whole.to_string(),
    };
    if part.is_empty() {
        return Err(invalid());
    }

    let (tag, mut rest) = take_ident(part);
    let mut matched = tag.is_empty() || tag == "*" || tag.eq_ignore_ascii_case(&element.tag);

    while let Some(first) = rest.chars().next() {
        match first {
            '.' => {
                let (class, tail) = take_ident(&rest[1..]);
                if class.is_empty() {
                    return Err(invalid());
                }
                matched &= element.classes.iter().any(|c| c == class);
                rest = tail;
            }
            '#' => {
                let (id, tail) = take_ident(&rest[1..]);
                matched &= element.attributes.get("id").map(String::as_str) == Some(id);
                rest = tail;
            }
            '[' => {
                let close = rest.find(']').ok_or_else(invalid)?;
                let inner = &rest[1..close];
                matched &= matches_attribute(element, inner);
                rest = &rest[close + 1..];
            }
            _ => return Err(invalid()),
        }
    }
    Ok(matched)
}

fn matches_attribute(element: &FakeElement, inner: &str) -> bool {
    let unquote = |v: &str| v.trim().trim_matches('"').trim_matches('\'').to_string();
    if let Some((name, value)) = inner.split_once("^=") {
        element
            .attributes
            .get(name.trim())
            .is_some_and(|actual| actual.starts_with(&unquote(value)))
    } else if let Some((name, value)) = inner.split_once('=') {
        element.attributes.get(name.trim()) == Some(&unquote(value))
    } else {
        element.attributes.contains_key(inner.trim())
    }
}

// ---- host seam ----

impl Dom for FakePage {
    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let elements = self.elements.borrow();
        let mut found = Vec::new();
        for (index, element) in elements.iter().enumerate() {
            if element.connected && matches_selector(element, selector)? {
                found.push(NodeId(index as u32));
            }
        }
        Ok(found)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .borrow()
            .iter()
            .position(|e| e.connected && e.attributes.get("id").map(String::as_str) == Some(id))
            .map(|index| NodeId(index as u32))
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let chain = self.ancestry(node);
        let elements = self.elements.borrow();
        chain.into_iter().find(|id| {
            matches_selector(&elements[id.0 as usize], selector).unwrap_or(false)
        })
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_element(node, |e| e.attributes.get(name).cloned())
            .ok()
            .flatten()
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if self.read_only.borrow().contains(&node) {
            return Err(DomError::Script(format!("{} is read-only", node)));
        }
        self.with_element_mut(node, |e| {
            e.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| {
            e.attributes.remove(name);
        })
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.with_element(node, |e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| {
            if !e.classes.iter().any(|c| c == class) {
                e.classes.push(class.to_string());
            }
        })
    }

    fn remove_class(&self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| e.classes.retain(|c| c != class))
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.with_element(node, |e| e.styles.get(property).cloned())
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| {
            e.styles.insert(property.to_string(), value.to_string());
        })
    }

    fn remove_style(&self, node: NodeId, property: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| {
            e.styles.remove(property);
        })
    }

    fn text(&self, node: NodeId) -> String {
        self.with_element(node, |e| e.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.with_element_mut(node, |e| e.text = text.to_string())
    }

    fn geometry(&self, node: NodeId) -> Result<Geometry, DomError> {
        self.with_element(node, |e| e.geometry)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        let mut elements = self.elements.borrow_mut();
        elements.push(FakeElement {
            tag: tag.to_string(),
            ..FakeElement::default()
        });
        Ok(NodeId((elements.len() - 1) as u32))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.attach(parent, child)
    }

    fn append_to_head(&self, child: NodeId) -> Result<(), DomError> {
        self.attach(self.head, child)
    }

    fn remove(&self, node: NodeId) {
        let Ok(parent) = self.with_element_mut(node, |e| e.parent.take()) else {
            return;
        };
        if let Some(parent) = parent {
            let _ = self.with_element_mut(parent, |e| e.children.retain(|c| *c != node));
        }
        self.set_connected(node, false);
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.with_element(node, |e| e.connected).unwrap_or(false)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.with_element(node, |e| e.children.clone()).unwrap_or_default()
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.root_attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) -> Result<(), DomError> {
        self.scroll_calls.borrow_mut().push((top, behavior));
        Ok(())
    }

    fn location(&self) -> String {
        PAGE_URL.to_string()
    }

    fn user_agent(&self) -> String {
        USER_AGENT.to_string()
    }

    fn timestamp(&self) -> String {
        TIMESTAMP.to_string()
    }
}

impl Runtime for FakePage {
    fn listen(
        &self,
        target: EventTarget,
        kind: EventKind,
        options: ListenOptions,
        handler: Handler,
    ) -> Result<Subscription, DomError> {
        if let EventTarget::Element(node) = target {
            self.with_element(node, |_| ())?;
        }
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            target,
            kind,
            options,
            handler: Rc::new(RefCell::new(handler)),
        });
        let listeners = self.listeners.clone();
        Ok(Subscription::new(move || {
            listeners.borrow_mut().retain(|l| l.id != id);
        }))
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<(), DomError> {
        self.frames.borrow_mut().push(callback);
        Ok(())
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<(), DomError> {
        let due = self.now.get() + delay_ms as f64;
        self.timers.borrow_mut().push((due, callback));
        Ok(())
    }

    fn now(&self) -> f64 {
        self.now.get()
    }

    fn create_watcher(
        &self,
        options: &WatcherOptions,
        callback: WatcherCallback,
    ) -> Result<Rc<dyn ViewportWatcher>, DomError> {
        if !self.supports_watchers.get() {
            return Err(DomError::NotSupported("IntersectionObserver".into()));
        }
        let watcher = Rc::new(FakeWatcher {
            options: options.clone(),
            observed: RefCell::new(Vec::new()),
            callback: RefCell::new(callback),
            disconnected: Cell::new(false),
        });
        self.watchers.borrow_mut().push(watcher.clone());
        Ok(watcher)
    }

    fn match_media(&self, _query: &str) -> Result<Rc<dyn MediaQuery>, DomError> {
        if !self.supports_media.get() {
            return Err(DomError::NotSupported("matchMedia".into()));
        }
        Ok(self.media.clone())
    }

    fn observe_performance(
        &self,
        _entry_types: &[&str],
        callback: PerfCallback,
    ) -> Result<Subscription, DomError> {
        if !self.supports_performance.get() {
            return Err(DomError::NotSupported("PerformanceObserver".into()));
        }
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.perf_callbacks
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(callback))));
        let callbacks = self.perf_callbacks.clone();
        Ok(Subscription::new(move || {
            callbacks.borrow_mut().retain(|(c, _)| *c != id);
        }))
    }

    fn register_service_worker(&self, script_url: &str) -> Result<(), DomError> {
        if !self.supports_service_worker.get() {
            return Err(DomError::NotSupported("serviceWorker".into()));
        }
        self.sw_registrations
            .borrow_mut()
            .push(script_url.to_string());
        Ok(())
    }
}

/// A page with every element the built-in behaviors look for.
pub struct Portfolio {
    pub page: Rc<FakePage>,
    pub hero: NodeId,
    pub about: NodeId,
    pub hero_link: NodeId,
    pub about_link: NodeId,
    pub card: NodeId,
    pub image: NodeId,
    pub counter: NodeId,
    pub button: NodeId,
}

pub fn portfolio() -> Portfolio {
    let page = FakePage::new();
    let hero_link = page
        .add("a")
        .class("nav-link")
        .attr("href", "#hero")
        .text("Home")
        .build();
    let about_link = page
        .add("a")
        .class("nav-link")
        .attr("href", "#about")
        .text("About")
        .build();
    let hero = page
        .add("section")
        .id("hero")
        .geometry(section_geometry(0.0, 800.0))
        .build();
    let about = page
        .add("section")
        .id("about")
        .geometry(section_geometry(800.0, 400.0))
        .build();
    let card = page.add("div").class("project-card").inside(about).build();
    let image = page
        .add("img")
        .attr("data-src", "/img/project.webp")
        .inside(card)
        .build();
    let counter = page
        .add("span")
        .class("stat-number")
        .attr("data-target", "150")
        .attr("data-suffix", "+")
        .inside(about)
        .build();
    let button = page
        .add("a")
        .class("btn")
        .attr("href", "#about")
        .text("  View Work  ")
        .geometry(Geometry {
            offset_left: 10.0,
            offset_top: 20.0,
            client_width: 100.0,
            client_height: 40.0,
            ..Geometry::default()
        })
        .inside(hero)
        .build();

    Portfolio {
        page,
        hero,
        about,
        hero_link,
        about_link,
        card,
        image,
        counter,
        button,
    }
}

pub fn section_geometry(top: f64, height: f64) -> Geometry {
    Geometry {
        offset_top: top,
        offset_height: height,
        ..Geometry::default()
    }
}
