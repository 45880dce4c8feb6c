use super::{Behavior, BehaviorError, FADE_IN_CLASS, observe_once};
use crate::context::PageContext;
use crate::host::{Host, NodeId, WatcherOptions};
use crate::subscription::Teardown;
use folio_common::DomError;
use tracing::{debug, info, warn};

/// Placeholder class shown until the real source is assigned.
pub const PLACEHOLDER_CLASS: &str = "skeleton";

/// Assign `img[data-src]` sources once the image becomes visible.
pub struct LazyImageLoader;

impl Behavior for LazyImageLoader {
    fn name(&self) -> &'static str {
        "lazy_images"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let images: Vec<NodeId> = ctx
            .host
            .query_all(&ctx.config.selectors.lazy_images)?
            .into_iter()
            .filter(|&image| !is_loaded(&*ctx.host, image))
            .collect();
        if images.is_empty() {
            return Ok(());
        }
        for &image in &images {
            ctx.host.add_class(image, PLACEHOLDER_CLASS)?;
        }

        let host = ctx.host.clone();
        let loaded = observe_once(
            ctx,
            &WatcherOptions::threshold(0.0),
            &images,
            move |image| {
                if let Err(err) = load(&*host, image, true) {
                    warn!(%image, error = %err, "Lazy image load failed");
                }
            },
            teardown,
        );
        match loaded {
            Ok(()) => {
                debug!(images = images.len(), "Lazy images deferred");
                Ok(())
            }
            Err(err) if err.is_unsupported() => {
                info!("No viewport watcher, loading {} images eagerly", images.len());
                for image in images {
                    if let Err(err) = load(&*ctx.host, image, false) {
                        warn!(%image, error = %err, "Lazy image load failed");
                    }
                }
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// An image whose `src` already matches `data-src` was loaded earlier.
fn is_loaded(host: &dyn Host, image: NodeId) -> bool {
    match (host.attribute(image, "src"), host.attribute(image, "data-src")) {
        (Some(src), Some(data_src)) => src == data_src,
        _ => false,
    }
}

fn load(host: &dyn Host, image: NodeId, fade_in: bool) -> Result<(), DomError> {
    if let Some(src) = host.attribute(image, "data-src") {
        host.set_attribute(image, "src", &src)?;
    }
    host.remove_class(image, PLACEHOLDER_CLASS)?;
    if fade_in {
        host.add_class(image, FADE_IN_CLASS)?;
    }
    Ok(())
}
