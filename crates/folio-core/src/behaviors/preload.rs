use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::subscription::Teardown;
use tracing::debug;

/// `as` value for a preload hint: fonts load as stylesheets, the rest as images.
pub fn preload_kind(resource: &str) -> &'static str {
    if resource.contains("fonts") { "style" } else { "image" }
}

/// Append `<link rel="preload">` hints for critical resources.
pub struct ResourcePreloader;

impl Behavior for ResourcePreloader {
    fn name(&self) -> &'static str {
        "preload"
    }

    fn install(&self, ctx: &PageContext, _teardown: &mut Teardown) -> Result<(), BehaviorError> {
        for resource in &ctx.config.preload.resources {
            let link = ctx.host.create_element("link")?;
            ctx.host.set_attribute(link, "rel", "preload")?;
            ctx.host.set_attribute(link, "href", resource)?;
            ctx.host.set_attribute(link, "as", preload_kind(resource))?;
            ctx.host.append_to_head(link)?;
            debug!(%resource, "Preload hint added");
        }
        Ok(())
    }
}
