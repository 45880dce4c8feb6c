use super::{Behavior, BehaviorError, observe_once};
use crate::context::PageContext;
use crate::easing::counter_value;
use crate::host::{Host, NodeId, WatcherOptions};
use crate::subscription::Teardown;
use folio_common::DomError;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, warn};

pub const COUNTED_ATTR: &str = "data-counted";
/// Set while a run is in flight, so a fresh install leaves the element alone.
pub const COUNTING_ATTR: &str = "data-counting";

/// Target and suffix of one counter, plus whether its run has finished.
#[derive(Debug)]
pub struct CounterState {
    pub target: i64,
    pub suffix: String,
    counted: Cell<bool>,
}

impl CounterState {
    pub fn new(target: i64, suffix: impl Into<String>) -> Self {
        Self {
            target,
            suffix: suffix.into(),
            counted: Cell::new(false),
        }
    }

    /// Reads `data-target` / `data-suffix`. Integer targets are expected;
    /// decimal ones are truncated.
    pub fn from_attributes(target: &str, suffix: Option<String>) -> Option<Self> {
        let target = target.trim();
        let value = match target.parse::<i64>() {
            Ok(value) => value,
            Err(_) => {
                let value = target.parse::<f64>().ok().filter(|v| v.is_finite())?;
                value.trunc() as i64
            }
        };
        Some(Self::new(value, suffix.unwrap_or_default()))
    }

    pub fn display(&self, value: i64) -> String {
        format!("{}{}", value, self.suffix)
    }

    pub fn is_counted(&self) -> bool {
        self.counted.get()
    }
}

/// Count stat numbers up from zero the first time they are half visible.
pub struct CounterAnimator;

impl Behavior for CounterAnimator {
    fn name(&self) -> &'static str {
        "counters"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let counters: Vec<NodeId> = ctx
            .host
            .query_all(&ctx.config.selectors.counters)?
            .into_iter()
            .filter(|&counter| !is_claimed(&*ctx.host, counter))
            .collect();
        if counters.is_empty() {
            return Ok(());
        }
        for &counter in &counters {
            ctx.host.set_text(counter, "0")?;
        }

        let duration = ctx.config.counter.duration_ms;
        let host = ctx.host.clone();
        let watched = observe_once(
            ctx,
            &WatcherOptions::threshold(ctx.config.counter.threshold),
            &counters,
            move |counter| start(host.clone(), counter, duration),
            teardown,
        );
        match watched {
            Ok(()) => Ok(()),
            Err(err) if err.is_unsupported() => {
                warn!(error = %err, "No viewport watcher, showing final counter values");
                for counter in counters {
                    if let Some(state) = read_state(&*ctx.host, counter) {
                        finish(&*ctx.host, counter, &state)?;
                    }
                }
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Counted or counting elements already show their own value.
fn is_claimed(host: &dyn Host, counter: NodeId) -> bool {
    host.attribute(counter, COUNTED_ATTR).is_some()
        || host.attribute(counter, COUNTING_ATTR).is_some()
}

fn read_state(host: &dyn Host, counter: NodeId) -> Option<CounterState> {
    let raw = host.attribute(counter, "data-target")?;
    let state = CounterState::from_attributes(&raw, host.attribute(counter, "data-suffix"));
    if state.is_none() {
        warn!(%counter, target = %raw, "Counter target is not a number");
    }
    state
}

struct CounterRun {
    host: Rc<dyn Host>,
    node: NodeId,
    state: CounterState,
    started_at: f64,
    duration: f64,
}

fn start(host: Rc<dyn Host>, counter: NodeId, duration: f64) {
    if is_claimed(&*host, counter) {
        return;
    }
    let Some(state) = read_state(&*host, counter) else {
        return;
    };
    if let Err(err) = host.set_attribute(counter, COUNTING_ATTR, "true") {
        warn!(%counter, error = %err, "Counter could not be claimed");
        return;
    }
    let run = Rc::new(CounterRun {
        started_at: host.now(),
        host,
        node: counter,
        state,
        duration,
    });
    debug!(%counter, target = run.state.target, "Counter started");
    schedule(run);
}

fn schedule(run: Rc<CounterRun>) {
    let next = run.clone();
    if let Err(err) = run
        .host
        .request_frame(Box::new(move |timestamp: f64| step(next, timestamp)))
    {
        warn!(counter = %run.node, error = %err, "No animation frame, jumping to target");
        if let Err(err) = finish(&*run.host, run.node, &run.state) {
            warn!(counter = %run.node, error = %err, "Counter update failed");
        }
    }
}

fn step(run: Rc<CounterRun>, timestamp: f64) {
    if run.state.is_counted() {
        return;
    }
    let elapsed = timestamp - run.started_at;
    let updated = if elapsed < run.duration {
        let value = counter_value(run.state.target, elapsed, run.duration);
        run.host.set_text(run.node, &run.state.display(value))
    } else {
        finish(&*run.host, run.node, &run.state)
    };
    if let Err(err) = updated {
        warn!(counter = %run.node, error = %err, "Counter update failed");
        return;
    }
    if !run.state.is_counted() {
        schedule(run);
    }
}

fn finish(host: &dyn Host, counter: NodeId, state: &CounterState) -> Result<(), DomError> {
    host.set_text(counter, &state.display(state.target))?;
    host.set_attribute(counter, COUNTED_ATTR, "true")?;
    host.remove_attribute(counter, COUNTING_ATTR)?;
    state.counted.set(true);
    Ok(())
}
