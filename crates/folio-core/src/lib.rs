pub mod behaviors;
pub mod context;
pub mod controller;
pub mod easing;
pub mod error_log;
pub mod frame;
pub mod host;
pub mod session;
pub mod slots;
pub mod subscription;
pub mod trigger;
pub mod utils;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use behaviors::{Behavior, BehaviorError};
pub use context::PageContext;
pub use controller::{InitReport, ViewController};
pub use error_log::GlobalErrorLog;
pub use host::{Dom, Host, NodeId, Runtime};
pub use session::{AnalyticsSink, SessionEventLog};
pub use subscription::{Subscription, Teardown};

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
