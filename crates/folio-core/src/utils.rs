//! Rate limiting and a linear number animation for page scripts.

use crate::easing::linear_value;
use crate::host::{Host, NodeId};
use folio_common::DomError;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::warn;

/// Runs `func` once calls have stopped for `wait_ms`, with the last argument.
pub struct Debounce<A> {
    host: Rc<dyn Host>,
    wait_ms: u32,
    latest: Rc<Cell<u64>>,
    func: Rc<RefCell<Box<dyn FnMut(A)>>>,
}

impl<A: 'static> Debounce<A> {
    pub fn new(host: Rc<dyn Host>, wait_ms: u32, func: impl FnMut(A) + 'static) -> Self {
        Self {
            host,
            wait_ms,
            latest: Rc::new(Cell::new(0)),
            func: Rc::new(RefCell::new(Box::new(func))),
        }
    }

    /// Restart the wait. Timers from earlier calls still fire but find a
    /// newer ticket and do nothing.
    pub fn call(&self, arg: A) -> Result<(), DomError> {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        let latest = self.latest.clone();
        let func = self.func.clone();
        self.host.set_timeout(
            self.wait_ms,
            Box::new(move || {
                if latest.get() == ticket {
                    (*func.borrow_mut())(arg);
                }
            }),
        )
    }
}

/// Runs `func` at most once per `limit_ms`. Calls inside the window are dropped.
pub struct Throttle<A> {
    host: Rc<dyn Host>,
    limit_ms: u32,
    blocked: Rc<Cell<bool>>,
    func: RefCell<Box<dyn FnMut(A)>>,
}

impl<A> Throttle<A> {
    pub fn new(host: Rc<dyn Host>, limit_ms: u32, func: impl FnMut(A) + 'static) -> Self {
        Self {
            host,
            limit_ms,
            blocked: Rc::new(Cell::new(false)),
            func: RefCell::new(Box::new(func)),
        }
    }

    /// Returns `Ok(false)` when the call fell inside the window.
    pub fn call(&self, arg: A) -> Result<bool, DomError> {
        if self.blocked.get() {
            return Ok(false);
        }
        self.blocked.set(true);
        let blocked = self.blocked.clone();
        if let Err(err) = self
            .host
            .set_timeout(self.limit_ms, Box::new(move || blocked.set(false)))
        {
            self.blocked.set(false);
            return Err(err);
        }
        (*self.func.borrow_mut())(arg);
        Ok(true)
    }
}

/// Count the text of `node` linearly from `start` to `end` over `duration_ms`,
/// one update per animation frame, floored to whole numbers.
pub fn animate_value(
    host: Rc<dyn Host>,
    node: NodeId,
    start: f64,
    end: f64,
    duration_ms: f64,
) -> Result<(), DomError> {
    let started_at = host.now();
    let run = Rc::new(ValueRun {
        host,
        node,
        start,
        end,
        duration_ms,
        started_at,
    });
    run.request()
}

struct ValueRun {
    host: Rc<dyn Host>,
    node: NodeId,
    start: f64,
    end: f64,
    duration_ms: f64,
    started_at: f64,
}

impl ValueRun {
    fn request(self: &Rc<Self>) -> Result<(), DomError> {
        let run = self.clone();
        self.host
            .request_frame(Box::new(move |timestamp: f64| run.step(timestamp)))
    }

    fn step(self: Rc<Self>, timestamp: f64) {
        let elapsed = timestamp - self.started_at;
        let value = linear_value(self.start, self.end, elapsed, self.duration_ms);
        if let Err(err) = self.host.set_text(self.node, &value.to_string()) {
            warn!(node = %self.node, error = %err, "Value animation stopped");
            return;
        }
        if elapsed >= self.duration_ms {
            return;
        }
        if let Err(err) = self.request() {
            warn!(node = %self.node, error = %err, "Value animation stopped");
        }
    }
}
