use std::{ffi::NulError, num::ParseIntError};

use ash::vk;
use thiserror::Error;

/// Broad classes of startup failure. None of them is recoverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The requested setup cannot be satisfied by this machine.
    Configuration,
    /// The runtime rejected the creation of a handle.
    Creation,
    /// No usable physical device was found.
    Discovery,
    /// The windowing system or the Vulkan loader is unavailable.
    Platform,
}

/// Errors raised while bringing up the window and the Vulkan instance.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("requested validation layers are unavailable: {}", .missing.join(", "))]
    ValidationLayersUnavailable { missing: Vec<String> },

    #[error("instantiation failed")]
    InstanceCreation(#[source] vk::Result),

    #[error("debug messenger setup failed")]
    DebugMessengerCreation(#[source] vk::Result),

    #[error("Vulkan-supporting GPU not found")]
    NoSupportingDevice,

    #[error("suitable GPU not found")]
    NoSuitableDevice,

    #[error("failed to load the Vulkan runtime")]
    Loading(#[from] ash::LoadingError),

    #[error("{call} failed")]
    Query {
        call: &'static str,
        #[source]
        source: vk::Result,
    },

    #[error("failed to initialize GLFW")]
    WindowSystem(#[from] glfw::InitError),

    #[error("failed to create a {width}x{height} window")]
    WindowCreation { width: u32, height: u32 },

    #[error("the window system reports no Vulkan support")]
    VulkanUnsupported,

    #[error("name contains an interior nul byte")]
    InvalidName(#[from] NulError),

    #[error("package version is not numeric")]
    InvalidVersion(#[from] ParseIntError),
}

impl BootstrapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationLayersUnavailable { .. }
            | Self::InvalidName(_)
            | Self::InvalidVersion(_) => ErrorCategory::Configuration,
            Self::InstanceCreation(_) | Self::DebugMessengerCreation(_) => ErrorCategory::Creation,
            Self::NoSupportingDevice | Self::NoSuitableDevice | Self::Query { .. } => {
                ErrorCategory::Discovery
            }
            Self::Loading(_)
            | Self::WindowSystem(_)
            | Self::WindowCreation { .. }
            | Self::VulkanUnsupported => ErrorCategory::Platform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_layers_are_listed_in_the_message() {
        let err = BootstrapError::ValidationLayersUnavailable {
            missing: vec!["VK_LAYER_A".to_owned(), "VK_LAYER_B".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "requested validation layers are unavailable: VK_LAYER_A, VK_LAYER_B"
        );
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn errors_fall_into_their_taxonomy() {
        assert_eq!(
            BootstrapError::InstanceCreation(vk::Result::ERROR_INCOMPATIBLE_DRIVER).category(),
            ErrorCategory::Creation
        );
        assert_eq!(
            BootstrapError::DebugMessengerCreation(vk::Result::ERROR_EXTENSION_NOT_PRESENT)
                .category(),
            ErrorCategory::Creation
        );
        assert_eq!(
            BootstrapError::NoSupportingDevice.category(),
            ErrorCategory::Discovery
        );
        assert_eq!(
            BootstrapError::NoSuitableDevice.category(),
            ErrorCategory::Discovery
        );
        assert_eq!(
            BootstrapError::VulkanUnsupported.category(),
            ErrorCategory::Platform
        );
    }

    #[test]
    fn bad_version_numbers_are_configuration_errors() {
        let parse_error = "1x".parse::<u32>().unwrap_err();
        let err = BootstrapError::from(parse_error);
        assert!(matches!(err, BootstrapError::InvalidVersion(_)));
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn creation_errors_keep_the_vulkan_result_as_source() {
        let err = BootstrapError::InstanceCreation(vk::Result::ERROR_INCOMPATIBLE_DRIVER);
        let source = std::error::Error::source(&err).map(|source| source.to_string());
        assert_eq!(
            source,
            Some(vk::Result::ERROR_INCOMPATIBLE_DRIVER.to_string())
        );
    }
}
