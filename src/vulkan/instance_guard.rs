use std::{
    ffi::{c_char, CString},
    ops::Deref,
};

use ash::{
    vk::{ApplicationInfo, DebugUtilsMessengerCreateInfoEXT, InstanceCreateInfo},
    Entry, Instance,
};
use tracing::{debug, info};

use crate::{
    config::{app_version, AppConfig, API_VERSION},
    vulkan::extensions_registry::{
        available_instance_extensions, available_instance_layers, check_validation_layers,
        get_debug_messenger_create_info, ExtensionReport,
    },
    BootstrapError,
};

/// The names and options that go into one `vkCreateInstance` call.
#[derive(Debug, PartialEq, Eq)]
pub struct InstanceRequest {
    pub extension_names: Vec<CString>,
    pub layer_names: Vec<CString>,
    /// Whether the debug messenger config rides along on the create info
    pub chain_debug_messenger: bool,
}

impl InstanceRequest {
    /// Requests every given extension, whether or not the runtime reported it.
    pub fn new(config: &AppConfig, required_extensions: &[String]) -> Result<Self, BootstrapError> {
        let extension_names = required_extensions
            .iter()
            .map(|extension_name| CString::new(extension_name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let layer_names = config
            .enabled_layers()
            .iter()
            .map(|layer_name| CString::new(layer_name.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            extension_names,
            layer_names,
            chain_debug_messenger: config.enable_validation,
        })
    }

    pub fn extension_name_ptrs(&self) -> Vec<*const c_char> {
        self.extension_names.iter().map(|name| name.as_ptr()).collect()
    }

    pub fn layer_name_ptrs(&self) -> Vec<*const c_char> {
        self.layer_names.iter().map(|name| name.as_ptr()).collect()
    }
}

/// Assembles the create info, chaining `debug_messenger_create_info` only when `chain` is set.
pub fn instance_create_info<'a>(
    app_info: &'a ApplicationInfo<'a>,
    extension_name_ptrs: &'a [*const c_char],
    layer_name_ptrs: &'a [*const c_char],
    debug_messenger_create_info: &'a mut DebugUtilsMessengerCreateInfoEXT<'a>,
    chain: bool,
) -> InstanceCreateInfo<'a> {
    let instance_create_info = InstanceCreateInfo::default()
        .application_info(app_info)
        .enabled_extension_names(extension_name_ptrs)
        .enabled_layer_names(layer_name_ptrs);
    if chain {
        instance_create_info.push_next(debug_messenger_create_info)
    } else {
        instance_create_info
    }
}

/// Owns the Vulkan instance and the loader it came from. Destroys the instance on drop.
pub struct InstanceGuard {
    instance: Instance,
    entry: Entry,
}

impl InstanceGuard {
    /// Creates an Instance to interact with the core of Vulkan. Registers the needed extensions and
    /// layers, as well as basic information about the application.
    ///
    /// When validation is enabled every configured layer must be available, and the debug
    /// messenger configuration is chained onto the request so problems during instance
    /// creation itself are reported too.
    pub fn try_new(
        entry: Entry,
        config: &AppConfig,
        required_extensions: &[String],
    ) -> Result<Self, BootstrapError> {
        if config.enable_validation {
            check_validation_layers(config, &available_instance_layers(&entry)?)?;
        }

        let appname = CString::new(env!("CARGO_PKG_NAME"))?;
        let app_version = app_version()?;
        let app_info = ApplicationInfo::default()
            .application_name(&appname)
            .application_version(app_version)
            .engine_name(&appname)
            .engine_version(app_version)
            .api_version(API_VERSION);

        let request = InstanceRequest::new(config, required_extensions)?;
        let extension_name_ptrs = request.extension_name_ptrs();
        let layer_name_ptrs = request.layer_name_ptrs();
        debug!("Layers to enable: {}", config.enabled_layers().join(", "));

        ExtensionReport::new(required_extensions, &available_instance_extensions(&entry)?).log();

        let mut debug_messenger_create_info = get_debug_messenger_create_info();
        let create_info = instance_create_info(
            &app_info,
            &extension_name_ptrs,
            &layer_name_ptrs,
            &mut debug_messenger_create_info,
            request.chain_debug_messenger,
        );

        let instance = unsafe { entry.create_instance(&create_info, None) }
            .map_err(BootstrapError::InstanceCreation)?;
        info!(
            "Vulkan instance created (API {}.{})",
            ash::vk::api_version_major(API_VERSION),
            ash::vk::api_version_minor(API_VERSION)
        );

        Ok(Self { instance, entry })
    }

    pub fn get_entry(&self) -> &Entry {
        &self.entry
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        debug!("Dropping InstanceGuard");
        unsafe { self.instance.destroy_instance(None) }
    }
}

impl Deref for InstanceGuard {
    type Target = Instance;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}
