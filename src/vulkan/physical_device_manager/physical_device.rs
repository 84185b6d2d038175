use ash::vk::{PhysicalDeviceType, QueueFamilyProperties, QueueFlags};

use crate::vulkan::InstanceGuard;

/// Score bonus for discrete GPUs.
pub const DISCRETE_GPU_BONUS: u64 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    /// family capable of running graphics related commands
    pub graphics_family: Option<u32>,
}

impl QueueFamilyIndices {
    /// Picks the first family of each required kind.
    pub fn find(queue_family_props: &[QueueFamilyProperties]) -> Self {
        let graphics_family = queue_family_props
            .iter()
            .position(|props| props.queue_flags.contains(QueueFlags::GRAPHICS))
            .and_then(|index| u32::try_from(index).ok());
        Self { graphics_family }
    }

    pub fn is_complete(&self) -> bool {
        self.graphics_family.is_some()
    }
}

/// Everything device selection needs to know about one physical device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalDeviceInfo {
    pub name: String,
    pub device_type: PhysicalDeviceType,
    pub max_image_dimension_2d: u32,
    pub max_image_dimension_3d: u32,
    pub geometry_shader: bool,
    pub queue_families: QueueFamilyIndices,
}

impl PhysicalDeviceInfo {
    pub fn query(instance: &InstanceGuard, physical_device: ash::vk::PhysicalDevice) -> Self {
        let props = unsafe { instance.get_physical_device_properties(physical_device) };
        let features = unsafe { instance.get_physical_device_features(physical_device) };
        let queue_family_props =
            unsafe { instance.get_physical_device_queue_family_properties(physical_device) };

        let name = props
            .device_name_as_c_str()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            device_type: props.device_type,
            max_image_dimension_2d: props.limits.max_image_dimension2_d,
            max_image_dimension_3d: props.limits.max_image_dimension3_d,
            geometry_shader: features.geometry_shader == ash::vk::TRUE,
            queue_families: QueueFamilyIndices::find(&queue_family_props),
        }
    }

    /// Geometry shaders and a graphics queue family are hard requirements.
    pub fn is_suitable(&self) -> bool {
        self.geometry_shader && self.queue_families.is_complete()
    }

    /// Higher is better. Unsuitable devices always score 0.
    pub fn score(&self) -> u64 {
        if !self.is_suitable() {
            return 0;
        }
        let mut score = match self.device_type {
            PhysicalDeviceType::DISCRETE_GPU => DISCRETE_GPU_BONUS,
            _ => 0,
        };
        score += u64::from(self.max_image_dimension_2d) + u64::from(self.max_image_dimension_3d);
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(device_type: PhysicalDeviceType) -> PhysicalDeviceInfo {
        PhysicalDeviceInfo {
            name: "test gpu".to_owned(),
            device_type,
            max_image_dimension_2d: 4096,
            max_image_dimension_3d: 2048,
            geometry_shader: true,
            queue_families: QueueFamilyIndices {
                graphics_family: Some(0),
            },
        }
    }

    fn family(queue_flags: QueueFlags) -> QueueFamilyProperties {
        QueueFamilyProperties {
            queue_flags,
            queue_count: 1,
            ..Default::default()
        }
    }

    #[test]
    fn first_graphics_family_is_picked() {
        let families = [
            family(QueueFlags::TRANSFER),
            family(QueueFlags::GRAPHICS | QueueFlags::COMPUTE),
            family(QueueFlags::GRAPHICS),
        ];
        let indices = QueueFamilyIndices::find(&families);
        assert_eq!(indices.graphics_family, Some(1));
        assert!(indices.is_complete());
    }

    #[test]
    fn compute_only_device_is_incomplete() {
        let indices = QueueFamilyIndices::find(&[family(QueueFlags::COMPUTE)]);
        assert_eq!(indices.graphics_family, None);
        assert!(!indices.is_complete());
        assert!(!QueueFamilyIndices::find(&[]).is_complete());
    }

    #[test]
    fn missing_geometry_shader_scores_zero() {
        for device_type in [
            PhysicalDeviceType::DISCRETE_GPU,
            PhysicalDeviceType::INTEGRATED_GPU,
            PhysicalDeviceType::CPU,
        ] {
            let info = PhysicalDeviceInfo {
                geometry_shader: false,
                max_image_dimension_2d: u32::MAX,
                max_image_dimension_3d: u32::MAX,
                ..device(device_type)
            };
            assert_eq!(info.score(), 0);
        }
    }

    #[test]
    fn incomplete_queue_families_score_zero() {
        let info = PhysicalDeviceInfo {
            queue_families: QueueFamilyIndices::default(),
            ..device(PhysicalDeviceType::DISCRETE_GPU)
        };
        assert_eq!(info.score(), 0);
    }

    #[test]
    fn discrete_gpu_earns_exactly_the_bonus() {
        let discrete = device(PhysicalDeviceType::DISCRETE_GPU);
        let integrated = device(PhysicalDeviceType::INTEGRATED_GPU);
        assert_eq!(discrete.score() - integrated.score(), 1000);
    }

    #[test]
    fn image_limits_add_to_the_score() {
        assert_eq!(device(PhysicalDeviceType::DISCRETE_GPU).score(), 7144);
        assert_eq!(device(PhysicalDeviceType::VIRTUAL_GPU).score(), 6144);
    }

    #[test]
    fn maximal_limits_do_not_overflow() {
        let info = PhysicalDeviceInfo {
            max_image_dimension_2d: u32::MAX,
            max_image_dimension_3d: u32::MAX,
            ..device(PhysicalDeviceType::DISCRETE_GPU)
        };
        assert_eq!(info.score(), 1000 + 2 * u64::from(u32::MAX));
    }
}
