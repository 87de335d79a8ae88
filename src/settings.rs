//! Game settings and preferences
//!
//! Persisted in LocalStorage. The variant can also be forced per page load
//! with a `?variant=` query parameter.

use serde::{Deserialize, Serialize};

pub use crate::sim::tuning::Variant;
use crate::sim::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Which demo flavour to run
    pub variant: Variant,

    // === HUD ===
    /// Show health/score overlay
    #[serde(default = "default_true")]
    pub show_hud: bool,
    /// Show FPS counter
    #[serde(default)]
    pub show_fps: bool,

    // === Accessibility ===
    /// High contrast colours
    #[serde(default)]
    pub high_contrast: bool,
}

fn default_true() -> bool {
    true
}

/// A preference flipped from the keyboard during play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Hud,
    Fps,
    HighContrast,
}

impl Toggle {
    /// H, F and C (any case)
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "h" | "H" => Some(Toggle::Hud),
            "f" | "F" => Some(Toggle::Fps),
            "c" | "C" => Some(Toggle::HighContrast),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Toggle::Hud => "hud",
            Toggle::Fps => "fps",
            Toggle::HighContrast => "high contrast",
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Arena,
            show_hud: true,
            show_fps: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Gameplay constants for the selected variant
    pub fn tuning(&self) -> Tuning {
        Tuning::for_variant(self.variant)
    }

    /// Flip a preference and return its new value
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let flag = match toggle {
            Toggle::Hud => &mut self.show_hud,
            Toggle::Fps => &mut self.show_fps,
            Toggle::HighContrast => &mut self.high_contrast,
        };
        *flag = !*flag;
        log::info!("{} {}", toggle.as_str(), if *flag { "on" } else { "off" });
        *flag
    }

    /// Apply a `variant=` query string override, if present and valid
    pub fn apply_query(&mut self, query: &str) {
        let query = query.trim_start_matches('?');
        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if key != "variant" {
                continue;
            }
            match Variant::from_str(value) {
                Some(variant) => {
                    log::info!("Variant override from URL: {}", variant.as_str());
                    self.variant = variant;
                }
                None => log::warn!("Unknown variant in URL: {}", value),
            }
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "circle_chase_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
