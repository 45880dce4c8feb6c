use crate::error_log::GlobalErrorLog;
use crate::host::Host;
use crate::session::SessionEventLog;
use folio_common::FolioConfig;
use std::rc::Rc;

/// Everything a behavior may touch, owned for the lifetime of the page.
#[derive(Clone)]
pub struct PageContext {
    pub host: Rc<dyn Host>,
    pub config: Rc<FolioConfig>,
    pub events: SessionEventLog,
    pub errors: GlobalErrorLog,
}

impl PageContext {
    pub fn new(host: Rc<dyn Host>, config: FolioConfig) -> Self {
        let events = SessionEventLog::new(config.analytics.max_events);
        Self {
            host,
            config: Rc::new(config),
            events,
            errors: GlobalErrorLog::new(),
        }
    }
}
