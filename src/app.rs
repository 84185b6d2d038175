use std::rc::Rc;

use ash::{vk, Entry};
use tracing::info;

use crate::{
    config::AppConfig,
    vulkan::{
        extensions_registry::{required_extensions, DebugUtilsGuard},
        physical_device_manager::{PhysicalDevice, PhysicalDeviceManager},
        InstanceGuard,
    },
    window::{run_event_loop, WindowManager},
    BootstrapError,
};

/// Owns every native handle of the application. Fields drop top to bottom, which is
/// the reverse of the order they are created in.
pub struct App {
    /// The device picked for rendering, kept for logical device creation
    physical_device: PhysicalDevice<vk::PhysicalDevice>,
    /// The debug messenger, if validations are enabled
    debug_messenger: Option<DebugUtilsGuard>,
    /// The instance for interacting with Vulkan core
    _instance: Rc<InstanceGuard>,
    /// The actual window presented to the user. Dropped last so GLFW
    /// outlives every Vulkan object
    window: WindowManager,
}

impl App {
    /// Opens the window, creates the instance (and debug messenger when validations are
    /// enabled) and selects a physical device. Anything acquired before a failure is
    /// released again, in reverse order, before the error is returned.
    pub fn new(config: &AppConfig) -> Result<Self, BootstrapError> {
        let window = WindowManager::try_new(&config.window)?;

        let entry = unsafe { Entry::load()? };
        let extensions = required_extensions(
            window.required_instance_extensions()?,
            config.enable_validation,
        );
        let instance = Rc::new(InstanceGuard::try_new(entry, config, &extensions)?);
        let debug_messenger = if config.enable_validation {
            Some(DebugUtilsGuard::try_new(&instance)?)
        } else {
            None
        };

        let physical_device = PhysicalDeviceManager::new(&*instance).select()?;

        Ok(Self {
            physical_device,
            debug_messenger,
            _instance: instance,
            window,
        })
    }

    /// Polls window events until the window is asked to close.
    pub fn run(&mut self) {
        run_event_loop(&mut self.window);
        info!("Window closed, shutting down");
    }

    pub fn physical_device(&self) -> &PhysicalDevice<vk::PhysicalDevice> {
        &self.physical_device
    }

    pub fn validation_enabled(&self) -> bool {
        self.debug_messenger.is_some()
    }
}
