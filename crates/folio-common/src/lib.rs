pub mod config;
pub mod error;
pub mod formatter;
pub mod record;

pub use config::FolioConfig;
pub use error::{ConfigError, DomError};
pub use record::{ErrorKind, ErrorRecord, InteractionEvent, Theme, VitalMetric, WebVital};
