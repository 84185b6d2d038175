mod physical_device;

use std::fmt::Debug;

use tracing::{debug, info};

use crate::{vulkan::InstanceGuard, BootstrapError};

pub use self::physical_device::{PhysicalDeviceInfo, QueueFamilyIndices, DISCRETE_GPU_BONUS};

/// Where physical devices come from. Implemented by [`InstanceGuard`]; tests use in-memory fakes.
pub trait PhysicalDeviceSource {
    type Handle: Copy + Debug;

    fn enumerate_physical_devices(&self) -> Result<Vec<Self::Handle>, BootstrapError>;
    fn describe_physical_device(&self, handle: Self::Handle) -> PhysicalDeviceInfo;
}

impl PhysicalDeviceSource for InstanceGuard {
    type Handle = ash::vk::PhysicalDevice;

    fn enumerate_physical_devices(&self) -> Result<Vec<Self::Handle>, BootstrapError> {
        unsafe { (**self).enumerate_physical_devices() }.map_err(|source| BootstrapError::Query {
            call: "vkEnumeratePhysicalDevices",
            source,
        })
    }

    fn describe_physical_device(&self, handle: Self::Handle) -> PhysicalDeviceInfo {
        PhysicalDeviceInfo::query(self, handle)
    }
}

/// A physical device together with what was learned about it during selection.
#[derive(Debug, Clone)]
pub struct PhysicalDevice<H> {
    pub handle: H,
    pub info: PhysicalDeviceInfo,
    pub score: u64,
}

/// Wraps the Vulkan APIs to interact with physical devices
pub struct PhysicalDeviceManager<'source, S> {
    source: &'source S,
}

impl<'source, S: PhysicalDeviceSource> PhysicalDeviceManager<'source, S> {
    pub fn new(source: &'source S) -> Self {
        Self { source }
    }

    /// Queries the physical devices available on this machine and returns them
    /// in order of preference. Equal scores keep their enumeration order.
    pub fn query_physical_devices(&self) -> Result<Vec<PhysicalDevice<S::Handle>>, BootstrapError> {
        let mut physical_devices = self
            .source
            .enumerate_physical_devices()?
            .into_iter()
            .map(|handle| {
                let info = self.source.describe_physical_device(handle);
                let score = info.score();
                debug!(
                    "Candidate {:?} \"{}\" ({:?}) scored {}",
                    handle, info.name, info.device_type, score
                );
                PhysicalDevice {
                    handle,
                    info,
                    score,
                }
            })
            .collect::<Vec<_>>();
        // higher is better
        physical_devices.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(physical_devices)
    }

    /// Picks the best scoring device. Fails if there are no devices at all, or if
    /// none of them meets the minimum requirements.
    pub fn select(&self) -> Result<PhysicalDevice<S::Handle>, BootstrapError> {
        let best = self
            .query_physical_devices()?
            .into_iter()
            .next()
            .ok_or(BootstrapError::NoSupportingDevice)?;
        if best.score == 0 {
            return Err(BootstrapError::NoSuitableDevice);
        }
        info!("Selected physical device \"{}\"", best.info.name);
        Ok(best)
    }
}
