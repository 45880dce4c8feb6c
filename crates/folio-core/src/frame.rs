use crate::host::Host;
use folio_common::DomError;
use std::cell::Cell;
use std::rc::Rc;

/// Single-flight guard: at most one callback pending per animation frame.
///
/// Requests made while a frame is already pending are dropped, not queued.
#[derive(Debug, Clone, Default)]
pub struct FrameGuard {
    pending: Rc<Cell<bool>>,
}

impl FrameGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Returns `Ok(false)` when a frame was already pending.
    pub fn schedule(
        &self,
        host: &dyn Host,
        work: impl FnOnce(f64) + 'static,
    ) -> Result<bool, DomError> {
        if self.pending.get() {
            return Ok(false);
        }
        self.pending.set(true);
        let pending = self.pending.clone();
        let requested = host.request_frame(Box::new(move |timestamp| {
            work(timestamp);
            pending.set(false);
        }));
        if let Err(err) = requested {
            self.pending.set(false);
            return Err(err);
        }
        Ok(true)
    }
}
