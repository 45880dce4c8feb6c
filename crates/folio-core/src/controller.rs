use crate::behaviors::{self, Behavior, BehaviorError};
use crate::context::PageContext;
use crate::host::Host;
use crate::subscription::Teardown;
use folio_common::config::InitPolicy;
use folio_common::{ErrorRecord, FolioConfig, InteractionEvent};
use std::rc::Rc;
use tracing::{error, info};

/// Outcome of one `initialize` pass.
#[derive(Debug, Default)]
pub struct InitReport {
    pub installed: Vec<&'static str>,
    pub failed: Vec<(&'static str, BehaviorError)>,
    /// Behaviors never attempted because an earlier one failed under `fail_fast`.
    pub skipped: Vec<&'static str>,
    /// True when the controller was already running and nothing was done.
    pub already_initialized: bool,
}

impl InitReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }
}

/// Owns every page behavior, their shared context and their teardown list.
pub struct ViewController {
    ctx: PageContext,
    behaviors: Vec<Box<dyn Behavior>>,
    teardown: Teardown,
    initialized: bool,
}

impl ViewController {
    /// Controller with the built-in behavior set.
    pub fn new(host: Rc<dyn Host>, config: FolioConfig) -> Self {
        Self::with_behaviors(host, config, behaviors::builtin())
    }

    pub fn with_behaviors(
        host: Rc<dyn Host>,
        config: FolioConfig,
        behaviors: Vec<Box<dyn Behavior>>,
    ) -> Self {
        Self {
            ctx: PageContext::new(host, config),
            behaviors,
            teardown: Teardown::new(),
            initialized: false,
        }
    }

    pub fn context(&self) -> &PageContext {
        &self.ctx
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Install every behavior in order. Calling it again while initialized
    /// is a no-op.
    pub fn initialize(&mut self) -> InitReport {
        if self.initialized {
            return InitReport {
                already_initialized: true,
                ..InitReport::default()
            };
        }

        let policy = self.ctx.config.init_policy;
        let mut report = InitReport::default();
        for behavior in &self.behaviors {
            let name = behavior.name();
            if policy == InitPolicy::FailFast && !report.failed.is_empty() {
                report.skipped.push(name);
                continue;
            }
            match behavior.install(&self.ctx, &mut self.teardown) {
                Ok(()) => report.installed.push(name),
                Err(err) => {
                    error!(behavior = name, error = %err, "Error initializing behavior");
                    report.failed.push((name, err));
                }
            }
        }

        self.initialized = true;
        if report.is_clean() {
            info!(
                behaviors = report.installed.len(),
                "Portfolio Showcase initialized successfully"
            );
        } else {
            error!(
                failed = report.failed.len(),
                skipped = report.skipped.len(),
                "Portfolio Showcase partially initialized"
            );
        }
        report
    }

    /// Disconnect every watcher and listener. The controller can be
    /// initialized again afterwards.
    pub fn destroy(&mut self) {
        self.teardown.dispose_all();
        self.initialized = false;
        info!("Portfolio Showcase torn down");
    }

    pub fn active_subscriptions(&self) -> usize {
        self.teardown.len()
    }

    pub fn events(&self) -> Vec<InteractionEvent> {
        self.ctx.events.events()
    }

    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.ctx.errors.records()
    }
}
