use std::{ffi::CStr, rc::Rc};

use ash::{
    ext::debug_utils,
    vk::{
        Bool32, DebugUtilsMessageSeverityFlagsEXT, DebugUtilsMessageTypeFlagsEXT,
        DebugUtilsMessengerCallbackDataEXT, DebugUtilsMessengerCreateInfoEXT,
        DebugUtilsMessengerEXT,
    },
};
use tracing::{debug, event, Level};

use crate::{vulkan::InstanceGuard, BootstrapError};

/// Verbose, warning and error messages of every type. Info messages are left out.
pub fn get_debug_messenger_create_info<'a>() -> DebugUtilsMessengerCreateInfoEXT<'a> {
    DebugUtilsMessengerCreateInfoEXT::default()
        .message_severity(
            DebugUtilsMessageSeverityFlagsEXT::VERBOSE
                | DebugUtilsMessageSeverityFlagsEXT::WARNING
                | DebugUtilsMessageSeverityFlagsEXT::ERROR,
        )
        .message_type(
            DebugUtilsMessageTypeFlagsEXT::GENERAL
                | DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        )
        .pfn_user_callback(Some(vulkan_debug_utils_callback))
}

/// RAII for the debug messenger
pub struct DebugUtilsGuard {
    debug_utils: debug_utils::Instance,
    messenger: DebugUtilsMessengerEXT,
    // need to keep a reference to instance to ensure we get dropped before instance does
    _instance: Rc<InstanceGuard>,
}

impl DebugUtilsGuard {
    pub fn try_new(instance: &Rc<InstanceGuard>) -> Result<Self, BootstrapError> {
        let create_info = get_debug_messenger_create_info();
        let debug_utils = debug_utils::Instance::new(instance.get_entry(), instance);
        let messenger = unsafe { debug_utils.create_debug_utils_messenger(&create_info, None) }
            .map_err(BootstrapError::DebugMessengerCreation)?;
        debug!("Debug messenger created");
        Ok(Self {
            debug_utils,
            messenger,
            _instance: Rc::clone(instance),
        })
    }
}

impl Drop for DebugUtilsGuard {
    fn drop(&mut self) {
        debug!("Dropping DebugUtilsGuard");
        unsafe {
            self.debug_utils
                .destroy_debug_utils_messenger(self.messenger, None)
        }
    }
}

/// Forwards validation messages to the log. Never asks the driver to abort the call.
pub unsafe extern "system" fn vulkan_debug_utils_callback(
    message_severity: DebugUtilsMessageSeverityFlagsEXT,
    message_type: DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const DebugUtilsMessengerCallbackDataEXT<'_>,
    _p_user_data: *mut std::ffi::c_void,
) -> Bool32 {
    let message = match p_callback_data.as_ref() {
        Some(data) if !data.p_message.is_null() => {
            CStr::from_ptr(data.p_message).to_string_lossy().into_owned()
        }
        _ => String::from("<no message>"),
    };
    let ty = format!("{:?}", message_type).to_lowercase();

    match message_severity {
        DebugUtilsMessageSeverityFlagsEXT::ERROR => {
            event!(target: "validation", Level::ERROR, ty = ty, "validation layer: {message}")
        }
        DebugUtilsMessageSeverityFlagsEXT::WARNING => {
            event!(target: "validation", Level::WARN, ty = ty, "validation layer: {message}")
        }
        DebugUtilsMessageSeverityFlagsEXT::INFO => {
            event!(target: "validation", Level::INFO, ty = ty, "validation layer: {message}")
        }
        _ => {
            event!(target: "validation", Level::DEBUG, ty = ty, "validation layer: {message}")
        }
    }
    // dont skip driver
    ash::vk::FALSE
}
