use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::host::Host;
use crate::subscription::Teardown;
use folio_common::{DomError, Theme};
use tracing::{debug, warn};

pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";
pub const THEME_ATTR: &str = "data-theme";

/// Mirror the OS color scheme onto `<html data-theme>`.
pub struct ThemePreferenceWatcher;

impl Behavior for ThemePreferenceWatcher {
    fn name(&self) -> &'static str {
        "theme"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let query = match ctx.host.match_media(DARK_SCHEME_QUERY) {
            Ok(query) => query,
            Err(err) if err.is_unsupported() => {
                warn!(error = %err, "Color scheme detection unavailable");
                apply(&*ctx.host, Theme::Light)?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let host = ctx.host.clone();
        let subscription = query.on_change(Box::new(move |prefers_dark: bool| {
            if let Err(err) = apply(&*host, Theme::from_dark(prefers_dark)) {
                warn!(error = %err, "Theme update failed");
            }
        }))?;
        teardown.push(subscription);

        apply(&*ctx.host, Theme::from_dark(query.matches()))?;
        Ok(())
    }
}

fn apply(host: &dyn Host, theme: Theme) -> Result<(), DomError> {
    host.set_root_attribute(THEME_ATTR, theme.as_str())?;
    debug!(%theme, "Theme applied");
    Ok(())
}
