pub mod extensions_registry;
mod instance_guard;
pub mod physical_device_manager;

pub use self::instance_guard::{instance_create_info, InstanceGuard, InstanceRequest};
