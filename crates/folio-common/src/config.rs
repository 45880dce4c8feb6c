use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub ripple: RippleConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub preload: PreloadConfig,
    #[serde(default)]
    pub service_worker: ServiceWorkerConfig,
    #[serde(default)]
    pub init_policy: InitPolicy,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            ripple: RippleConfig::default(),
            analytics: AnalyticsConfig::default(),
            preload: PreloadConfig::default(),
            service_worker: ServiceWorkerConfig::default(),
            init_policy: InitPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl FolioConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        let config: FolioConfig = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config embedded in the page. YAML when `media_type` names it
    /// (`application/yaml`, `text/x-yaml`), JSON otherwise. Blank sources
    /// give the defaults.
    pub fn from_embedded(source: &str, media_type: Option<&str>) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let is_yaml = media_type.is_some_and(|t| t.to_ascii_lowercase().contains("yaml"));
        if is_yaml {
            Self::from_yaml(source)
        } else {
            Self::from_json(source)
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_ratio("reveal.threshold", self.reveal.threshold)?;
        check_ratio("counter.threshold", self.counter.threshold)?;
        check_ratio("analytics.section_threshold", self.analytics.section_threshold)?;
        if !(self.counter.duration_ms > 0.0) {
            return Err(ConfigError::Invalid {
                field: "counter.duration_ms",
                reason: format!("must be positive, got {}", self.counter.duration_ms),
            });
        }
        if self.analytics.max_events == Some(0) {
            return Err(ConfigError::Invalid {
                field: "analytics.max_events",
                reason: "must be at least 1 when set".to_string(),
            });
        }
        Ok(())
    }
}

fn check_ratio(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a ratio in [0, 1], got {}", value),
        })
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// What to do when one behavior fails to install.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitPolicy {
    /// Log the failure and keep installing the remaining behaviors.
    #[default]
    FailSoft,
    /// Log the failure and skip every behavior after it.
    FailFast,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_anchors")]
    pub anchors: String,
    #[serde(default = "default_reveal")]
    pub reveal: String,
    #[serde(default = "default_sections")]
    pub sections: String,
    #[serde(default = "default_nav_links")]
    pub nav_links: String,
    #[serde(default = "default_cards")]
    pub cards: String,
    #[serde(default = "default_lazy_images")]
    pub lazy_images: String,
    #[serde(default = "default_counters")]
    pub counters: String,
    #[serde(default = "default_buttons")]
    pub buttons: String,
    #[serde(default = "default_tracked_clicks")]
    pub tracked_clicks: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            anchors: default_anchors(),
            reveal: default_reveal(),
            sections: default_sections(),
            nav_links: default_nav_links(),
            cards: default_cards(),
            lazy_images: default_lazy_images(),
            counters: default_counters(),
            buttons: default_buttons(),
            tracked_clicks: default_tracked_clicks(),
        }
    }
}

fn default_anchors() -> String {
    "a[href^=\"#\"]".to_string()
}

fn default_reveal() -> String {
    ".project-card, .section-title, .tech-category".to_string()
}

fn default_sections() -> String {
    "section[id]".to_string()
}

fn default_nav_links() -> String {
    ".nav-link".to_string()
}

fn default_cards() -> String {
    ".project-card".to_string()
}

fn default_lazy_images() -> String {
    "img[data-src]".to_string()
}

fn default_counters() -> String {
    ".stat-number[data-target]".to_string()
}

fn default_buttons() -> String {
    ".btn".to_string()
}

fn default_tracked_clicks() -> String {
    ".btn, .nav-link".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Distance kept between the viewport top and a scrolled-to target.
    #[serde(default = "default_header_offset")]
    pub header_offset: f64,
    /// Look-ahead added to the scroll position when picking the current section.
    #[serde(default = "default_activation_offset")]
    pub activation_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: default_header_offset(),
            activation_offset: default_activation_offset(),
        }
    }
}

fn default_header_offset() -> f64 {
    120.0
}

fn default_activation_offset() -> f64 {
    150.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    #[serde(default = "default_reveal_root_margin")]
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            root_margin: default_reveal_root_margin(),
        }
    }
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_root_margin() -> String {
    "0px 0px -50px 0px".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_duration_ms")]
    pub duration_ms: f64,
    #[serde(default = "default_half")]
    pub threshold: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_counter_duration_ms(),
            threshold: default_half(),
        }
    }
}

fn default_counter_duration_ms() -> f64 {
    2000.0
}

fn default_half() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RippleConfig {
    #[serde(default = "default_ripple_duration_ms")]
    pub duration_ms: u32,
    #[serde(default = "default_true")]
    pub inject_styles: bool,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_ripple_duration_ms(),
            inject_styles: true,
        }
    }
}

fn default_ripple_duration_ms() -> u32 {
    600
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_half")]
    pub section_threshold: f64,
    /// Keep only the newest `max_events` events. Unbounded when unset.
    #[serde(default)]
    pub max_events: Option<usize>,
    /// Hand each event to a page-level `gtag` function in the browser build.
    #[serde(default)]
    pub forward_to_gtag: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            section_threshold: default_half(),
            max_events: None,
            forward_to_gtag: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreloadConfig {
    #[serde(default = "default_preload_resources")]
    pub resources: Vec<String>,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            resources: default_preload_resources(),
        }
    }
}

fn default_preload_resources() -> Vec<String> {
    vec![
        "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&display=swap"
            .to_string(),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceWorkerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_script_url")]
    pub script_url: String,
}

impl Default for ServiceWorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            script_url: default_script_url(),
        }
    }
}

fn default_script_url() -> String {
    "/sw.js".to_string()
}
