mod app;
pub mod config;
mod error;
pub mod logging;
pub mod vulkan;
pub mod window;

pub use crate::{
    app::App,
    config::{AppConfig, WindowConfig},
    error::{BootstrapError, ErrorCategory},
    vulkan::{
        extensions_registry::{
            get_debug_messenger_create_info, required_extensions, validation_layers_supported,
            DebugUtilsGuard, ExtensionReport,
        },
        physical_device_manager::{
            PhysicalDevice, PhysicalDeviceInfo, PhysicalDeviceManager, PhysicalDeviceSource,
            QueueFamilyIndices,
        },
        InstanceGuard,
    },
    window::{run_event_loop, EventPump, WindowManager},
};
