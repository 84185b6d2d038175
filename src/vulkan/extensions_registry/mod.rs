mod debug_utils_guard;

use ash::{ext::debug_utils, Entry};
use tracing::{debug, warn};

use crate::{config::AppConfig, BootstrapError};

pub use self::debug_utils_guard::{
    get_debug_messenger_create_info, vulkan_debug_utils_callback, DebugUtilsGuard,
};

/// Returns the instance extensions to enable: whatever the window system needs, plus
/// `VK_EXT_debug_utils` when validations are enabled.
pub fn required_extensions(window_extensions: Vec<String>, enable_validation: bool) -> Vec<String> {
    let mut extension_names = window_extensions;
    if enable_validation {
        let debug_utils_name = debug_utils::NAME.to_string_lossy().into_owned();
        if !extension_names.contains(&debug_utils_name) {
            extension_names.push(debug_utils_name);
        }
    }
    debug!("Instance extension names: {:?}", extension_names);
    extension_names
}

/// Requested extensions split by whether the runtime offers them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExtensionReport {
    /// Number of extensions the runtime offers in total
    pub available: usize,
    pub supported: Vec<String>,
    pub unsupported: Vec<String>,
}

impl ExtensionReport {
    pub fn new(requested: &[String], available: &[String]) -> Self {
        let (supported, unsupported) = requested
            .iter()
            .cloned()
            .partition(|name| available.contains(name));
        Self {
            available: available.len(),
            supported,
            unsupported,
        }
    }

    /// Unsupported extensions are only warned about, instance creation still requests them.
    pub fn log(&self) {
        debug!(
            "{} of {} available extensions requested: {}",
            self.supported.len(),
            self.available,
            self.supported.join(", ")
        );
        if !self.unsupported.is_empty() {
            warn!(
                "{} unsupported extensions: {}",
                self.unsupported.len(),
                self.unsupported.join(", ")
            );
        }
    }
}

/// True iff every requested layer name appears verbatim among the available layers.
pub fn validation_layers_supported(requested: &[String], available: &[String]) -> bool {
    missing_layers(requested, available).is_empty()
}

pub fn missing_layers(requested: &[String], available: &[String]) -> Vec<String> {
    requested
        .iter()
        .filter(|layer_name| !available.contains(layer_name))
        .cloned()
        .collect()
}

/// Fails if validation is enabled and any configured layer is missing. Always passes
/// when validation is disabled.
pub fn check_validation_layers(
    config: &AppConfig,
    available: &[String],
) -> Result<(), BootstrapError> {
    if !config.enable_validation {
        return Ok(());
    }
    let missing = missing_layers(&config.validation_layers, available);
    if !missing.is_empty() {
        return Err(BootstrapError::ValidationLayersUnavailable { missing });
    }
    Ok(())
}

pub fn available_instance_extensions(entry: &Entry) -> Result<Vec<String>, BootstrapError> {
    let extensions = unsafe { entry.enumerate_instance_extension_properties(None) }.map_err(
        |source| BootstrapError::Query {
            call: "vkEnumerateInstanceExtensionProperties",
            source,
        },
    )?;
    Ok(extensions
        .iter()
        .filter_map(|extension| extension.extension_name_as_c_str().ok())
        .map(|extension_name| extension_name.to_string_lossy().into_owned())
        .collect())
}

pub fn available_instance_layers(entry: &Entry) -> Result<Vec<String>, BootstrapError> {
    let layers = unsafe { entry.enumerate_instance_layer_properties() }.map_err(|source| {
        BootstrapError::Query {
            call: "vkEnumerateInstanceLayerProperties",
            source,
        }
    })?;
    Ok(layers
        .iter()
        .filter_map(|layer| layer.layer_name_as_c_str().ok())
        .map(|layer_name| layer_name.to_string_lossy().into_owned())
        .collect())
}
