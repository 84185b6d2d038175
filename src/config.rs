use std::num::ParseIntError;

use ash::vk::{self, API_VERSION_1_1};

pub const WINDOW_WIDTH: u32 = 1440;
pub const WINDOW_HEIGHT: u32 = 900;
pub const KHRONOS_VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Vulkan version the instance is created against.
pub const API_VERSION: u32 = API_VERSION_1_1;

#[cfg(any(debug_assertions, feature = "enable_validations"))]
const ENABLE_VALIDATIONS: bool = true;
#[cfg(not(any(debug_assertions, feature = "enable_validations")))]
const ENABLE_VALIDATIONS: bool = false;

/// Startup configuration handed to [`crate::App::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub window: WindowConfig,
    /// Enables the validation layers and the debug messenger
    pub enable_validation: bool,
    /// Layers that must all be present when validation is enabled
    pub validation_layers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            enable_validation: ENABLE_VALIDATIONS,
            validation_layers: vec![KHRONOS_VALIDATION_LAYER.to_owned()],
        }
    }
}

impl AppConfig {
    /// Layers to enable on the instance. Empty when validation is disabled.
    pub fn enabled_layers(&self) -> &[String] {
        if self.enable_validation {
            &self.validation_layers
        } else {
            &[]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl WindowConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            title: env!("CARGO_PKG_NAME").to_owned(),
        }
    }
}

/// Application/engine version reported to the driver, taken from the package version.
pub fn app_version() -> Result<u32, ParseIntError> {
    let version_major = env!("CARGO_PKG_VERSION_MAJOR").parse::<u32>()?;
    let version_minor = env!("CARGO_PKG_VERSION_MINOR").parse::<u32>()?;
    let version_patch = env!("CARGO_PKG_VERSION_PATCH").parse::<u32>()?;
    Ok(vk::make_api_version(
        0,
        version_major,
        version_minor,
        version_patch,
    ))
}
