use super::{Behavior, BehaviorError};
use crate::context::PageContext;
use crate::host::PerfEntry;
use crate::subscription::Teardown;
use folio_common::formatter::format_vital;
use folio_common::{VitalMetric, WebVital};
use tracing::{info, warn};

pub const ENTRY_TYPES: [&str; 3] = ["largest-contentful-paint", "first-input", "layout-shift"];

/// Map a performance entry to the web vital it reports, if any.
///
/// Layout shifts right after user input do not count toward CLS.
pub fn classify(entry: &PerfEntry) -> Option<WebVital> {
    let (metric, value) = match entry.entry_type.as_str() {
        "largest-contentful-paint" => (VitalMetric::Lcp, entry.start_time),
        "first-input" => (
            VitalMetric::Fid,
            entry.processing_start? - entry.start_time,
        ),
        "layout-shift" if !entry.had_recent_input => (VitalMetric::Cls, entry.value?),
        _ => return None,
    };
    Some(WebVital { metric, value })
}

/// Best-effort LCP / FID / CLS reporting to the diagnostic log.
pub struct WebVitalsMonitor;

impl Behavior for WebVitalsMonitor {
    fn name(&self) -> &'static str {
        "web_vitals"
    }

    fn install(&self, ctx: &PageContext, teardown: &mut Teardown) -> Result<(), BehaviorError> {
        let observed = ctx.host.observe_performance(
            &ENTRY_TYPES,
            Box::new(|entries: &[PerfEntry]| {
                for vital in entries.iter().filter_map(classify) {
                    info!(vital = %format_vital(&vital), "Web vital");
                }
            }),
        );
        match observed {
            Ok(subscription) => teardown.push(subscription),
            Err(err) => warn!(error = %err, "Performance monitoring not fully supported"),
        }
        Ok(())
    }
}
