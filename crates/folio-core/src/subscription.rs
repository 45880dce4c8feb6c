use crate::host::ViewportWatcher;
use std::fmt;
use std::rc::Rc;

/// Handle to a registration (listener, watcher, media query hook).
///
/// Dropping the handle cancels the registration.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel.
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    /// Disconnects the watcher when cancelled.
    pub fn for_watcher(watcher: Rc<dyn ViewportWatcher>) -> Self {
        Self::new(move || watcher.disconnect())
    }

    pub fn cancel(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Every subscription a controller owns, disposed together.
#[derive(Debug, Default)]
pub struct Teardown {
    subscriptions: Vec<Subscription>,
}

impl Teardown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Cancel in reverse registration order and clear the list.
    pub fn dispose_all(&mut self) {
        while let Some(subscription) = self.subscriptions.pop() {
            subscription.cancel();
        }
    }
}

impl Drop for Teardown {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
