//! Browser build: a `web-sys` host plus the JS-facing `PortfolioShowcase`
//! and `PortfolioUtils`.

use crate::controller::ViewController;
use crate::host::{
    Dom, DomEvent, EventKind, EventPayload, EventTarget, FrameCallback, Geometry, Handler, Host,
    Intersection, ListenOptions, MediaQuery, NodeId, PerfCallback, PerfEntry, Runtime,
    ScrollBehavior, TimerCallback, ViewportWatcher, WatcherCallback, WatcherOptions,
};
use crate::session::AnalyticsSink;
use crate::slots::Slots;
use crate::subscription::Subscription;
use crate::utils::{Debounce, Throttle, animate_value};
use folio_common::{ConfigError, DomError, FolioConfig, InteractionEvent};
use js_sys::{Array, Function, Object, Reflect, WeakMap};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use tracing::{info, warn};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, ErrorEvent, HtmlElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MediaQueryList,
    MediaQueryListEvent, MouseEvent, PerformanceEntry, PerformanceObserver,
    PerformanceObserverEntryList, PromiseRejectionEvent, ScrollToOptions, Window,
};

/// Id of the optional `<script>` holding a `FolioConfig`, JSON or YAML by its `type`.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

fn js_error(err: JsValue) -> DomError {
    DomError::Script(describe_js(&err))
}

fn describe_js(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::JSON::stringify(value)
        .ok()
        .and_then(|s| s.as_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn js_stack(value: &JsValue) -> Option<String> {
    Reflect::get(value, &JsValue::from_str("stack"))
        .ok()
        .and_then(|stack| stack.as_string())
}

fn has_global(object: &JsValue, name: &str) -> bool {
    Reflect::has(object, &JsValue::from_str(name)).unwrap_or(false)
}

/// Maps `NodeId`s to live elements. Element to id lookups go through a
/// `WeakMap`, and removed elements free their slot for reuse.
struct NodeRegistry {
    slots: RefCell<Slots<Element>>,
    ids: WeakMap,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self {
            slots: RefCell::default(),
            ids: WeakMap::new(),
        }
    }
}

impl NodeRegistry {
    fn intern(&self, element: Element) -> NodeId {
        let key: &Object = element.as_ref();
        if let Some(id) = self.ids.get(key).as_f64() {
            return NodeId(id as u32);
        }
        let node = self.slots.borrow_mut().insert(element.clone());
        self.ids.set(key, &JsValue::from_f64(node.0 as f64));
        node
    }

    fn get(&self, node: NodeId) -> Result<Element, DomError> {
        self.slots
            .borrow()
            .get(node)
            .cloned()
            .ok_or(DomError::ElementStale(node.0))
    }

    fn forget(&self, node: NodeId) {
        if let Some(element) = self.slots.borrow_mut().remove(node) {
            let key: &Object = element.as_ref();
            self.ids.delete(key);
        }
    }
}

pub struct WebHost {
    window: Window,
    document: Document,
    nodes: Rc<NodeRegistry>,
}

impl WebHost {
    pub fn new() -> Result<Self, DomError> {
        let window = web_sys::window().ok_or_else(|| DomError::NotSupported("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::NotSupported("document".into()))?;
        Ok(Self {
            window,
            document,
            nodes: Rc::new(NodeRegistry::default()),
        })
    }

    fn element(&self, node: NodeId) -> Result<Element, DomError> {
        self.nodes.get(node)
    }

    pub(crate) fn intern(&self, element: Element) -> NodeId {
        self.nodes.intern(element)
    }

    fn html(&self, node: NodeId) -> Result<HtmlElement, DomError> {
        self.element(node)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| DomError::InvalidElementType {
                id: node.0,
                expected: "HTMLElement".to_string(),
            })
    }

    fn event_target(&self, target: EventTarget) -> Result<web_sys::EventTarget, DomError> {
        Ok(match target {
            EventTarget::Window => web_sys::EventTarget::from(self.window.clone()),
            EventTarget::Document => web_sys::EventTarget::from(self.document.clone()),
            EventTarget::Element(node) => web_sys::EventTarget::from(self.element(node)?),
        })
    }
}

impl Dom for WebHost {
    fn query_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|_| DomError::SelectorInvalid {
                selector: selector.to_string(),
            })?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.nodes.intern(element))
            .collect())
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.nodes.intern(element))
    }

    fn closest(&self, node: NodeId, selector: &str) -> Option<NodeId> {
        let found = self.element(node).ok()?.closest(selector).ok()??;
        Some(self.nodes.intern(found))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node).ok()?.get_attribute(name)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element(node)?
            .set_attribute(name, value)
            .map_err(js_error)
    }

    fn remove_attribute(&self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.element(node)?.remove_attribute(name).map_err(js_error)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|element| element.class_list().contains(class))
            .unwrap_or(false)
    }

    fn add_class(&self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.element(node)?
            .class_list()
            .add_1(class)
            .map_err(js_error)
    }

    fn remove_class(&self, node: NodeId, class: &str) -> Result<(), DomError> {
        self.element(node)?
            .class_list()
            .remove_1(class)
            .map_err(js_error)
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.html(node)
            .ok()
            .and_then(|element| element.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.html(node)?
            .style()
            .set_property(property, value)
            .map_err(js_error)
    }

    fn remove_style(&self, node: NodeId, property: &str) -> Result<(), DomError> {
        self.html(node)?
            .style()
            .remove_property(property)
            .map(|_| ())
            .map_err(js_error)
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .ok()
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text(&self, node: NodeId, text: &str) -> Result<(), DomError> {
        self.element(node)?.set_text_content(Some(text));
        Ok(())
    }

    fn geometry(&self, node: NodeId) -> Result<Geometry, DomError> {
        let element = self.html(node)?;
        Ok(Geometry {
            offset_top: element.offset_top() as f64,
            offset_left: element.offset_left() as f64,
            offset_height: element.offset_height() as f64,
            client_width: element.client_width() as f64,
            client_height: element.client_height() as f64,
            rect_top: element.get_bounding_client_rect().top(),
        })
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        let element = self.document.create_element(tag).map_err(js_error)?;
        Ok(self.nodes.intern(element))
    }

    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.element(parent)?
            .append_child(&self.element(child)?)
            .map(|_| ())
            .map_err(js_error)
    }

    fn append_to_head(&self, child: NodeId) -> Result<(), DomError> {
        let head = self
            .document
            .head()
            .ok_or_else(|| DomError::NotSupported("document.head".into()))?;
        head.append_child(&self.element(child)?)
            .map(|_| ())
            .map_err(js_error)
    }

    fn remove(&self, node: NodeId) {
        if let Ok(element) = self.element(node) {
            element.remove();
        }
        self.nodes.forget(node);
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.element(node)
            .map(|element| element.is_connected())
            .unwrap_or(false)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        let Ok(element) = self.element(node) else {
            return Vec::new();
        };
        let children = element.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .map(|child| self.nodes.intern(child))
            .collect()
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.document
            .document_element()
            .ok_or_else(|| DomError::NotSupported("documentElement".into()))?
            .set_attribute(name, value)
            .map_err(js_error)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) -> Result<(), DomError> {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
        Ok(())
    }

    fn location(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn user_agent(&self) -> String {
        self.window.navigator().user_agent().unwrap_or_default()
    }

    fn timestamp(&self) -> String {
        String::from(js_sys::Date::new_0().to_iso_string())
    }
}

fn translate_event(nodes: &NodeRegistry, kind: EventKind, raw: &web_sys::Event) -> DomEvent {
    let target = raw
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .map(|element| nodes.intern(element));

    let payload = match kind {
        EventKind::Click => match raw.dyn_ref::<MouseEvent>() {
            // detail 0 means the click came from the keyboard
            Some(mouse) if mouse.detail() != 0 => EventPayload::Pointer {
                client_x: mouse.client_x() as f64,
                client_y: mouse.client_y() as f64,
            },
            _ => EventPayload::None,
        },
        EventKind::Error => match raw.dyn_ref::<ErrorEvent>() {
            Some(error) => {
                let cause = error.error();
                EventPayload::Error {
                    message: if cause.is_undefined() || cause.is_null() {
                        error.message()
                    } else {
                        describe_js(&cause)
                    },
                    stack: js_stack(&cause),
                    filename: error.filename(),
                    lineno: error.lineno(),
                    colno: error.colno(),
                }
            }
            None => EventPayload::None,
        },
        EventKind::UnhandledRejection => match raw.dyn_ref::<PromiseRejectionEvent>() {
            Some(rejection) => {
                let reason = rejection.reason();
                EventPayload::Rejection {
                    reason: describe_js(&reason),
                    stack: js_stack(&reason),
                }
            }
            None => EventPayload::None,
        },
        _ => EventPayload::None,
    };
    DomEvent::new(kind, target, payload)
}

struct WebWatcher {
    observer: IntersectionObserver,
    nodes: Rc<NodeRegistry>,
    _callback: Option<Closure<dyn FnMut(Array, IntersectionObserver)>>,
}

impl ViewportWatcher for WebWatcher {
    fn observe(&self, node: NodeId) -> Result<(), DomError> {
        self.observer.observe(&self.nodes.get(node)?);
        Ok(())
    }

    fn unobserve(&self, node: NodeId) {
        if let Ok(element) = self.nodes.get(node) {
            self.observer.unobserve(&element);
        }
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

struct WebMediaQuery {
    list: MediaQueryList,
}

impl MediaQuery for WebMediaQuery {
    fn matches(&self) -> bool {
        self.list.matches()
    }

    fn on_change(&self, mut handler: Box<dyn FnMut(bool)>) -> Result<Subscription, DomError> {
        let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| handler(event.matches()),
        );
        self.list
            .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        let list = self.list.clone();
        Ok(Subscription::new(move || {
            let _ = list
                .remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }))
    }
}

impl Runtime for WebHost {
    fn listen(
        &self,
        target: EventTarget,
        kind: EventKind,
        options: ListenOptions,
        mut handler: Handler,
    ) -> Result<Subscription, DomError> {
        let target = self.event_target(target)?;
        let nodes = self.nodes.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
            let event = translate_event(&nodes, kind, &raw);
            handler(&event);
            if event.default_prevented() {
                raw.prevent_default();
            }
        });

        let listen_options = AddEventListenerOptions::new();
        listen_options.set_passive(options.passive);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.as_str(),
                closure.as_ref().unchecked_ref(),
                &listen_options,
            )
            .map_err(js_error)?;

        Ok(Subscription::new(move || {
            let _ = target
                .remove_event_listener_with_callback(kind.as_str(), closure.as_ref().unchecked_ref());
        }))
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<(), DomError> {
        let frame = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        self.window
            .request_animation_frame(frame.unchecked_ref())
            .map(|_| ())
            .map_err(js_error)
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<(), DomError> {
        let timer = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                timer.unchecked_ref(),
                delay_ms as i32,
            )
            .map(|_| ())
            .map_err(js_error)
    }

    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or(0.0)
    }

    fn create_watcher(
        &self,
        options: &WatcherOptions,
        mut callback: WatcherCallback,
    ) -> Result<Rc<dyn ViewportWatcher>, DomError> {
        if !has_global(&self.window, "IntersectionObserver") {
            return Err(DomError::NotSupported("IntersectionObserver".into()));
        }

        let nodes = self.nodes.clone();
        let closure = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let intersections: Vec<Intersection> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Intersection {
                        target: nodes.intern(entry.target()),
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    })
                    .collect();
                let watcher = WebWatcher {
                    observer,
                    nodes: nodes.clone(),
                    _callback: None,
                };
                callback(&intersections, &watcher);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
                .map_err(js_error)?;

        Ok(Rc::new(WebWatcher {
            observer,
            nodes: self.nodes.clone(),
            _callback: Some(closure),
        }))
    }

    fn match_media(&self, query: &str) -> Result<Rc<dyn MediaQuery>, DomError> {
        let list = self
            .window
            .match_media(query)
            .map_err(js_error)?
            .ok_or_else(|| DomError::NotSupported("matchMedia".into()))?;
        Ok(Rc::new(WebMediaQuery { list }))
    }

    fn observe_performance(
        &self,
        entry_types: &[&str],
        mut callback: PerfCallback,
    ) -> Result<Subscription, DomError> {
        if !has_global(&self.window, "PerformanceObserver") {
            return Err(DomError::NotSupported("PerformanceObserver".into()));
        }

        let closure = Closure::<dyn FnMut(PerformanceObserverEntryList, PerformanceObserver)>::new(
            move |list: PerformanceObserverEntryList, _observer: PerformanceObserver| {
                let entries: Vec<PerfEntry> = list
                    .get_entries()
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<PerformanceEntry>().ok())
                    .map(|entry| {
                        let field = |name: &str| Reflect::get(&entry, &JsValue::from_str(name)).ok();
                        PerfEntry {
                            entry_type: entry.entry_type(),
                            start_time: entry.start_time(),
                            processing_start: field("processingStart").and_then(|v| v.as_f64()),
                            value: field("value").and_then(|v| v.as_f64()),
                            had_recent_input: field("hadRecentInput")
                                .and_then(|v| v.as_bool())
                                .unwrap_or(false),
                        }
                    })
                    .collect();
                callback(&entries);
            },
        );
        let observer =
            PerformanceObserver::new(closure.as_ref().unchecked_ref()).map_err(js_error)?;

        let types: Array = entry_types.iter().map(|t| JsValue::from_str(t)).collect();
        let init = Object::new();
        Reflect::set(&init, &JsValue::from_str("entryTypes"), &types).map_err(js_error)?;
        let observe: Function = Reflect::get(&observer, &JsValue::from_str("observe"))
            .map_err(js_error)?
            .dyn_into()
            .map_err(js_error)?;
        observe.call1(&observer, &init).map_err(js_error)?;

        Ok(Subscription::new(move || {
            observer.disconnect();
            drop(closure);
        }))
    }

    fn register_service_worker(&self, script_url: &str) -> Result<(), DomError> {
        let navigator = self.window.navigator();
        if !has_global(&navigator, "serviceWorker") {
            return Err(DomError::NotSupported("serviceWorker".into()));
        }
        let registration = navigator.service_worker().register(script_url);
        let script_url = script_url.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(registration).await {
                Ok(_) => info!(%script_url, "SW registered"),
                Err(err) => warn!(%script_url, error = %describe_js(&err), "SW registration failed"),
            }
        });
        Ok(())
    }
}

/// Forwards events to a page-level `gtag` function when one exists.
/// Installed only with `analytics.forward_to_gtag`.
struct GtagSink;

impl AnalyticsSink for GtagSink {
    fn forward(&self, event: &InteractionEvent) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(gtag) = Reflect::get(&window, &JsValue::from_str("gtag"))
            .and_then(|value| value.dyn_into::<Function>())
        else {
            return;
        };

        let params = Object::new();
        let _ = Reflect::set(
            &params,
            &JsValue::from_str("event_category"),
            &JsValue::from_str("portfolio_interaction"),
        );
        let _ = Reflect::set(
            &params,
            &JsValue::from_str("event_label"),
            &JsValue::from_str(&event.label),
        );
        if let Some(value) = event.value {
            let _ = Reflect::set(&params, &JsValue::from_str("value"), &JsValue::from_f64(value));
        }
        if let Err(err) = gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(&event.action),
            &params,
        ) {
            warn!(error = %describe_js(&err), "gtag forwarding failed");
        }
    }
}

/// Buffers one formatted log line and prints it to the devtools console on drop.
struct ConsoleWriter {
    level: tracing::Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = JsValue::from_str(line.trim_end());
        match self.level {
            tracing::Level::ERROR => web_sys::console::error_1(&line),
            tracing::Level::WARN => web_sys::console::warn_1(&line),
            tracing::Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: tracing::Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

fn init_logging(level: &str) {
    let level = level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    // A second showcase on the same page keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}

#[wasm_bindgen]
pub struct PortfolioShowcase {
    controller: ViewController,
}

#[wasm_bindgen]
impl PortfolioShowcase {
    /// Build and initialize the page behaviors. `config_json` is an optional
    /// JSON `FolioConfig`; missing fields take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PortfolioShowcase, JsValue> {
        let config = FolioConfig::from_embedded(config_json.as_deref().unwrap_or_default(), None)
            .map_err(invalid_config)?;
        Self::with_config(config)
    }

    /// Recorded interaction events, oldest first.
    pub fn analytics(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.events()).map_err(JsValue::from)
    }

    /// Captured script errors and unhandled rejections, oldest first.
    pub fn errors(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.errors()).map_err(JsValue::from)
    }

    pub fn destroy(&mut self) {
        self.controller.destroy();
    }

    #[wasm_bindgen(js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        self.controller.is_initialized()
    }

    #[wasm_bindgen(js_name = getVersion)]
    pub fn get_version() -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

impl PortfolioShowcase {
    fn with_config(config: FolioConfig) -> Result<Self, JsValue> {
        console_error_panic_hook::set_once();
        init_logging(&config.log_level);

        let forward_to_gtag = config.analytics.forward_to_gtag;
        let host = WebHost::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut controller = ViewController::new(Rc::new(host), config);
        if forward_to_gtag {
            controller.context().events.set_sink(Box::new(GtagSink));
        }
        controller.initialize();
        Ok(Self { controller })
    }
}

fn invalid_config(err: ConfigError) -> JsValue {
    JsValue::from_str(&format!("Invalid config: {}", err))
}

fn call_js(func: &Function, arg: &JsValue) {
    if let Err(err) = func.call1(&JsValue::NULL, arg) {
        warn!(error = %describe_js(&err), "Utility callback threw");
    }
}

/// The object exposed as `window.PortfolioUtils`. Wrapped callbacks receive
/// the first argument of each call.
fn portfolio_utils() -> Result<Object, JsValue> {
    let web = Rc::new(WebHost::new().map_err(|e| JsValue::from_str(&e.to_string()))?);
    let host: Rc<dyn Host> = web.clone();
    let utils = Object::new();

    let debounce_host = host.clone();
    let debounce = Closure::<dyn FnMut(Function, u32) -> JsValue>::new(
        move |func: Function, wait: u32| {
            let debounced =
                Debounce::new(debounce_host.clone(), wait, move |arg: JsValue| call_js(&func, &arg));
            Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| {
                if let Err(err) = debounced.call(arg) {
                    warn!(error = %err, "Debounce timer failed");
                }
            })
            .into_js_value()
        },
    );
    Reflect::set(&utils, &JsValue::from_str("debounce"), &debounce.into_js_value())?;

    let throttle_host = host.clone();
    let throttle = Closure::<dyn FnMut(Function, u32) -> JsValue>::new(
        move |func: Function, limit: u32| {
            let throttled =
                Throttle::new(throttle_host.clone(), limit, move |arg: JsValue| call_js(&func, &arg));
            Closure::<dyn FnMut(JsValue)>::new(move |arg: JsValue| {
                if let Err(err) = throttled.call(arg) {
                    warn!(error = %err, "Throttle timer failed");
                }
            })
            .into_js_value()
        },
    );
    Reflect::set(&utils, &JsValue::from_str("throttle"), &throttle.into_js_value())?;

    let animate = Closure::<dyn FnMut(Element, f64, f64, f64)>::new(
        move |element: Element, start: f64, end: f64, duration: f64| {
            let node = web.intern(element);
            if let Err(err) = animate_value(host.clone(), node, start, end, duration) {
                warn!(error = %err, "animateValue failed");
            }
        },
    );
    Reflect::set(&utils, &JsValue::from_str("animateValue"), &animate.into_js_value())?;
    Ok(utils)
}

/// Create the showcase once the DOM is ready and expose it as
/// `window.portfolioShowcase`.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;

    if document.ready_state() == "loading" {
        let ready = Closure::once_into_js(move || {
            if let Err(err) = boot() {
                web_sys::console::error_2(
                    &JsValue::from_str("Failed to initialize Portfolio Showcase:"),
                    &err,
                );
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", ready.unchecked_ref())?;
        Ok(())
    } else {
        boot()
    }
}

fn boot() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let config = match window
        .document()
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
    {
        Some(element) => FolioConfig::from_embedded(
            &element.text_content().unwrap_or_default(),
            element.get_attribute("type").as_deref(),
        )
        .map_err(invalid_config)?,
        None => FolioConfig::default(),
    };

    let showcase = PortfolioShowcase::with_config(config)?;
    Reflect::set(
        &window,
        &JsValue::from_str("portfolioShowcase"),
        &JsValue::from(showcase),
    )?;
    Reflect::set(&window, &JsValue::from_str("PortfolioUtils"), &portfolio_utils()?)?;
    Ok(())
}
