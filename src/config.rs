use log::Level;
use serde::{Deserialize, Deserializer};
use web_sys::Document;

use crate::error::EffectResult;
use crate::watchers::scroll::Threshold;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block that
/// overrides the defaults below.
pub const CONFIG_SCRIPT_ID: &str = "effects-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub scheme: SchemeName,
    /// Explicit class names; each one given wins over `scheme`.
    pub classes: ClassOverride,
    pub selectors: Selectors,
    #[serde(deserialize_with = "navbar_watcher")]
    pub navbar: WatcherConfig,
    #[serde(deserialize_with = "scroll_top_watcher")]
    pub scroll_top: WatcherConfig,
    pub mobile_breakpoint: f64,
    pub anchor_offset: f64,
    pub throttle_ms: u32,
    pub text_reveal_delay_ms: u32,
    pub image_stagger_delay_ms: u32,
    pub follow_distance: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            scheme: SchemeName::Standard,
            classes: ClassOverride::default(),
            selectors: Selectors::default(),
            navbar: WatcherConfig::navbar(),
            scroll_top: WatcherConfig::scroll_top(),
            mobile_breakpoint: 768.0,
            anchor_offset: 80.0,
            throttle_ms: 16,
            text_reveal_delay_ms: 1000,
            image_stagger_delay_ms: 2000,
            follow_distance: 20.0,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> EffectResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the inline override block, falling back to defaults when the
    /// page has none.
    pub fn from_document(document: &Document) -> EffectResult<Self> {
        let raw = document
            .get_element_by_id(CONFIG_SCRIPT_ID)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty());

        match raw {
            Some(raw) => Self::from_json(&raw),
            None => Ok(Self::default()),
        }
    }

    pub fn class_scheme(&self) -> ClassScheme {
        let base = match self.scheme {
            SchemeName::Standard => ClassScheme::standard(),
            SchemeName::Minimal => ClassScheme::minimal(),
        };
        self.classes.clone().onto(base)
    }

    pub fn is_mobile_width(&self, width: f64) -> bool {
        width <= self.mobile_breakpoint
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeName {
    Standard,
    Minimal,
}

/// Class names the effects toggle. The elaborate and the minimal stylesheet
/// name the same states differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassScheme {
    pub active: String,
    pub scrolled: String,
    pub visible: String,
    pub fade_in: String,
    pub scroll_to_top: String,
}

impl ClassScheme {
    pub fn standard() -> Self {
        Self {
            active: "active".into(),
            scrolled: "scrolled".into(),
            visible: "visible".into(),
            fade_in: "fade-in".into(),
            scroll_to_top: "scroll-to-top".into(),
        }
    }

    pub fn minimal() -> Self {
        Self {
            active: "is-open".into(),
            scrolled: "is-scrolled".into(),
            visible: "is-visible".into(),
            fade_in: "is-revealed".into(),
            scroll_to_top: "back-to-top".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClassOverride {
    pub active: Option<String>,
    pub scrolled: Option<String>,
    pub visible: Option<String>,
    pub fade_in: Option<String>,
    pub scroll_to_top: Option<String>,
}

impl ClassOverride {
    fn onto(self, base: ClassScheme) -> ClassScheme {
        ClassScheme {
            active: self.active.unwrap_or(base.active),
            scrolled: self.scrolled.unwrap_or(base.scrolled),
            visible: self.visible.unwrap_or(base.visible),
            fade_in: self.fade_in.unwrap_or(base.fade_in),
            scroll_to_top: self.scroll_to_top.unwrap_or(base.scroll_to_top),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub loading_screen: String,
    pub header: String,
    pub logo: String,
    pub nav: String,
    pub hamburger: String,
    pub nav_link: String,
    pub anchor: String,
    pub hero: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_button: String,
    pub floating_leaves: String,
    pub product_card: String,
    pub product_image: String,
    pub about_title: String,
    pub about_description: String,
    pub feature: String,
    pub contact_title: String,
    pub contact_text: String,
    pub contact_button: String,
    pub footer: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            loading_screen: "#loading-screen".into(),
            header: "#header".into(),
            logo: "#logo".into(),
            nav: "#nav".into(),
            hamburger: "#hamburger".into(),
            nav_link: ".nav-link".into(),
            anchor: "a[href^=\"#\"]".into(),
            hero: ".hero".into(),
            hero_title: "#hero-title".into(),
            hero_subtitle: "#hero-subtitle".into(),
            hero_button: "#hero-btn".into(),
            floating_leaves: ".floating-leaves i".into(),
            product_card: ".product-card".into(),
            product_image: ".product-image".into(),
            about_title: "#about-title".into(),
            about_description: "#about-description".into(),
            feature: ".feature".into(),
            contact_title: "#contact-title".into(),
            contact_text: "#contact-text".into(),
            contact_button: "#contact-btn".into(),
            footer: "#footer".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    Pixels,
    Progress,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatcherConfig {
    pub mode: ThresholdMode,
    pub pixels: f64,
    pub progress: f64,
}

/// The JSON shape of a watcher: any field left out keeps that watcher's
/// own default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WatcherOverride {
    mode: Option<ThresholdMode>,
    pixels: Option<f64>,
    progress: Option<f64>,
}

impl WatcherOverride {
    fn onto(self, base: WatcherConfig) -> WatcherConfig {
        WatcherConfig {
            mode: self.mode.unwrap_or(base.mode),
            pixels: self.pixels.unwrap_or(base.pixels),
            progress: self.progress.unwrap_or(base.progress),
        }
    }
}

fn navbar_watcher<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<WatcherConfig, D::Error> {
    WatcherOverride::deserialize(deserializer).map(|o| o.onto(WatcherConfig::navbar()))
}

fn scroll_top_watcher<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<WatcherConfig, D::Error> {
    WatcherOverride::deserialize(deserializer).map(|o| o.onto(WatcherConfig::scroll_top()))
}

impl WatcherConfig {
    pub fn navbar() -> Self {
        Self {
            mode: ThresholdMode::Pixels,
            pixels: 60.0,
            progress: 0.05,
        }
    }

    pub fn scroll_top() -> Self {
        Self {
            mode: ThresholdMode::Pixels,
            pixels: 300.0,
            progress: 0.1,
        }
    }

    /// Resolves the configured mode against what the page can actually
    /// provide. Progress needs ScrollTrigger.
    pub fn threshold(&self, progress_available: bool) -> Threshold {
        match self.mode {
            ThresholdMode::Progress if progress_available => Threshold::Progress(self.progress),
            ThresholdMode::Progress => {
                log::warn!(
                    "progress threshold requested without ScrollTrigger, using {}px",
                    self.pixels
                );
                Threshold::Pixels(self.pixels)
            }
            ThresholdMode::Pixels => Threshold::Pixels(self.pixels),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_values() {
        let config = SiteConfig::default();
        assert_eq!(config.navbar.threshold(true), Threshold::Pixels(60.0));
        assert_eq!(config.scroll_top.threshold(true), Threshold::Pixels(300.0));
        assert_eq!(config.mobile_breakpoint, 768.0);
        assert_eq!(config.anchor_offset, 80.0);
        assert_eq!(config.class_scheme(), ClassScheme::standard());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{ "scheme": "minimal", "navbar": { "pixels": 90 } }"#)
            .unwrap();
        assert_eq!(config.class_scheme().active, "is-open");
        assert_eq!(config.navbar.threshold(true), Threshold::Pixels(90.0));
        assert_eq!(config.navbar.progress, 0.05);
        assert_eq!(config.scroll_top.pixels, 300.0);
        assert_eq!(config.selectors.hamburger, "#hamburger");
    }

    #[test]
    fn mode_only_override_keeps_each_watchers_defaults() {
        let config = SiteConfig::from_json(
            r#"{ "navbar": { "mode": "progress" }, "scroll_top": { "mode": "progress" } }"#,
        )
        .unwrap();
        assert_eq!(config.navbar.threshold(true), Threshold::Progress(0.05));
        assert_eq!(config.navbar.pixels, 60.0);
        assert_eq!(config.scroll_top.threshold(true), Threshold::Progress(0.1));
        assert_eq!(config.scroll_top.threshold(false), Threshold::Pixels(300.0));
    }

    #[test]
    fn progress_mode_degrades_without_scroll_trigger() {
        let watcher = WatcherConfig {
            mode: ThresholdMode::Progress,
            pixels: 300.0,
            progress: 0.1,
        };
        assert_eq!(watcher.threshold(false), Threshold::Pixels(300.0));
    }

    #[test]
    fn explicit_classes_win_over_scheme() {
        let config =
            SiteConfig::from_json(r#"{ "scheme": "minimal", "classes": { "scrolled": "small" } }"#)
                .unwrap();
        let classes = config.class_scheme();
        assert_eq!(classes.scrolled, "small");
        assert_eq!(classes.active, "is-open");
    }

    #[test]
    fn breakpoint_is_inclusive() {
        let config = SiteConfig::default();
        assert!(config.is_mobile_width(768.0));
        assert!(!config.is_mobile_width(769.0));
    }

    #[test]
    fn malformed_override_is_an_error() {
        assert!(SiteConfig::from_json("{ not json").is_err());
    }
}
