//! Bridge configuration, read from TOML or JSON.

use crate::autofit::AutoFitSetting;
use crate::error::BridgeError;
use mapgl_protocol::MapOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SDK_URL: &str = "https://mapgl.2gis.com/api/js/v1";
pub const DEFAULT_POST_MESSAGE: &str = "window.ReactNativeWebView.postMessage";

/// Environment variable that overrides `options.apiKey`.
pub const API_KEY_ENV: &str = "MAPGL_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeConfig {
    pub options: MapOptions,
    pub auto_fit_bounds: AutoFitSetting,
    pub fade_in: FadeIn,
    pub inject: Injections,
    pub sdk_url: String,
    /// JS expression called with each outbound event string.
    pub post_message: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        BridgeConfig {
            options: MapOptions::default(),
            auto_fit_bounds: AutoFitSetting::default(),
            fade_in: FadeIn::default(),
            inject: Injections::default(),
            sdk_url: DEFAULT_SDK_URL.to_string(),
            post_message: DEFAULT_POST_MESSAGE.to_string(),
        }
    }
}

/// Fade-in of the host map view after `inited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FadeIn {
    pub enabled: bool,
    pub duration_ms: u64,
    pub delay_ms: u64,
}

impl FadeIn {
    /// Opacity of the map view `elapsed_ms` after `inited`.
    pub fn opacity_at(&self, elapsed_ms: u64) -> f64 {
        if !self.enabled {
            return 1.0;
        }
        match elapsed_ms.checked_sub(self.delay_ms) {
            None => 0.0,
            Some(_) if self.duration_ms == 0 => 1.0,
            Some(t) => (t as f64 / self.duration_ms as f64).min(1.0),
        }
    }
}

impl Default for FadeIn {
    fn default() -> Self {
        FadeIn {
            enabled: true,
            duration_ms: 500,
            delay_ms: 500,
        }
    }
}

/// Snippets spliced into the generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Injections {
    pub css: Option<String>,
    pub js: Option<String>,
    pub html: Option<String>,
}

impl BridgeConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, BridgeError> {
        toml::from_str(text).map_err(|e| BridgeError::Config(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(text).map_err(|e| BridgeError::Config(e.to_string()))
    }

    /// Reads a `.json` file as JSON and anything else as TOML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BridgeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_toml_str(&text),
        }
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.options.api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapgl_protocol::PartialPadding;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.sdk_url, DEFAULT_SDK_URL);
        assert!(config.fade_in.enabled);
        assert_eq!(config.fade_in.duration_ms, 500);
        assert!(!config.auto_fit_bounds.is_enabled());
    }

    #[test]
    fn toml_with_options_and_padding() {
        let config = BridgeConfig::from_toml_str(
            r#"
autoFitBounds = { top = 20, left = 10 }

[options]
apiKey = "k"
center = [37.6, 55.7]
zoom = 11
style = "dark"
zoomControl = false

[fadeIn]
enabled = false

[inject]
css = "body { background: black; }"
"#,
        )
        .unwrap();
        assert_eq!(config.options.api_key.as_deref(), Some("k"));
        assert_eq!(config.options.center, Some([37.6, 55.7]));
        assert_eq!(config.options.zoom, Some(11.0));
        assert_eq!(config.options.extra.get("zoomControl"), Some(&serde_json::json!(false)));
        assert_eq!(
            config.auto_fit_bounds,
            AutoFitSetting::Padding(PartialPadding {
                top: Some(20.0),
                left: Some(10.0),
                ..Default::default()
            })
        );
        assert!(!config.fade_in.enabled);
        assert_eq!(config.fade_in.delay_ms, 500);
        assert!(config.inject.css.is_some());
    }

    #[test]
    fn json_with_boolean_auto_fit() {
        let config = BridgeConfig::from_json_str(r#"{"autoFitBounds": true}"#).unwrap();
        assert_eq!(config.auto_fit_bounds, AutoFitSetting::Enabled(true));
    }

    #[test]
    fn bad_config_is_reported() {
        assert!(matches!(
            BridgeConfig::from_toml_str("options = 3"),
            Err(BridgeError::Config(_))
        ));
    }

    #[test]
    fn fade_in_curve() {
        let fade = FadeIn::default();
        assert_eq!(fade.opacity_at(0), 0.0);
        assert_eq!(fade.opacity_at(499), 0.0);
        assert_eq!(fade.opacity_at(750), 0.5);
        assert_eq!(fade.opacity_at(5000), 1.0);
        let off = FadeIn {
            enabled: false,
            ..fade
        };
        assert_eq!(off.opacity_at(0), 1.0);
    }

    #[test]
    fn api_key_override() {
        let mut config = BridgeConfig::default();
        config.apply_overrides_from(|_| Some(String::new()));
        assert_eq!(config.options.api_key, None);
        config.apply_overrides_from(|name| (name == API_KEY_ENV).then(|| "env-key".to_string()));
        assert_eq!(config.options.api_key.as_deref(), Some("env-key"));
    }
}
