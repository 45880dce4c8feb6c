use super::{Behavior, BehaviorError, FADE_IN_CLASS, observe_once};
use crate::context::PageContext;
use crate::host::{Host, NodeId, WatcherOptions};
use crate::subscription::Teardown;
use tracing::{debug, warn};

/// Fade elements in the first time they scroll into view.
pub struct RevealOnScroll;

impl Behavior for RevealOnScroll {
    fn name(&self) -> &'static str {
        "reveal_on_scroll"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let candidates: Vec<NodeId> = ctx
            .host
            .query_all(&ctx.config.selectors.reveal)?
            .into_iter()
            .filter(|&node| !ctx.host.has_class(node, FADE_IN_CLASS))
            .collect();
        if candidates.is_empty() {
            return Ok(());
        }

        let options = WatcherOptions {
            threshold: ctx.config.reveal.threshold,
            root_margin: ctx.config.reveal.root_margin.clone(),
        };
        let host = ctx.host.clone();
        match observe_once(
            ctx,
            &options,
            &candidates,
            move |node| reveal(&*host, node),
            teardown,
        ) {
            Ok(()) => {
                debug!(candidates = candidates.len(), "Reveal watcher registered");
                Ok(())
            }
            Err(err) if err.is_unsupported() => {
                warn!(error = %err, "No viewport watcher, revealing everything now");
                for node in candidates {
                    reveal(&*ctx.host, node);
                }
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn reveal(host: &dyn Host, node: NodeId) {
    if let Err(err) = host.add_class(node, FADE_IN_CLASS) {
        warn!(%node, error = %err, "Failed to reveal element");
    }
}
