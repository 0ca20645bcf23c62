//! # Opencl platform, devices safe wrapper (FFI - Foreign Function Interface)
//!
//! Platform
//!
//! Only the first platform reported by the ICD loader is used, FPGA runtimes
//! register a single platform.
//!
//! Devices
//!
//! Accelerator class devices (CL_DEVICE_TYPE_ACCELERATOR), identified by name.
//!

use crate::error::{OclError, OclResult, CL_WRAPPER_FIRST_PLATFORM_NOT_FOUND};
use crate::unsafe_wrapper::{
    cl_get_device_ids, cl_get_device_info, cl_get_device_info_string, cl_get_platform_ids,
    cl_get_platform_info, DeviceInfo, PlatformInfo,
};
use opencl_sys::{
    cl_device_id, cl_device_type, cl_platform_id, CL_DEVICE_NAME, CL_DEVICE_TYPE_ACCELERATOR,
};

#[derive(Debug)]
pub struct Platform {
    platform_id: cl_platform_id,
    pub info: PlatformInfo,
}

impl Platform {
    /// Using clGetPlatformInfo, verify that the reference to platform_id is valid (at least at creation time).
    fn new(platform_id: cl_platform_id) -> OclResult<Self> {
        // SAFETY: platform_id comes from clGetPlatformIDs (Platform::first),
        // the remaining parameters are built inside cl_get_platform_info.
        let info = unsafe { cl_get_platform_info(platform_id)? };

        Ok(Self { platform_id, info })
    }

    /// get the first available platform
    pub fn first() -> OclResult<Platform> {
        let platforms: Vec<cl_platform_id> = cl_get_platform_ids()?;

        let platform_id = match platforms.first() {
            Some(&platform_id) => platform_id,
            None => return Err(OclError::Wrapper(CL_WRAPPER_FIRST_PLATFORM_NOT_FOUND)),
        };

        Self::new(platform_id)
    }

    /// get all devices of a given type
    pub fn get_devices(&self, device_type: cl_device_type) -> OclResult<Vec<Device>> {
        // SAFETY: the only way to build a Platform is Platform::first, platform_id is valid.
        let device_ids = unsafe { cl_get_device_ids(self.platform_id, device_type)? };
        let mut devices = Vec::with_capacity(device_ids.len());

        for device_id in device_ids {
            devices.push(Device::new(device_id)?);
        }

        Ok(devices)
    }

    /// get all devices type CL_DEVICE_TYPE_ACCELERATOR (FPGA cards)
    pub fn get_accelerator_devices(&self) -> OclResult<Vec<Device>> {
        self.get_devices(CL_DEVICE_TYPE_ACCELERATOR)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    device_id: cl_device_id,
    name: String,
}

impl Device {
    /// Using clGetDeviceInfo (CL_DEVICE_NAME), verify that the reference to device_id is valid (at least at creation time).
    pub fn new(device_id: cl_device_id) -> OclResult<Self> {
        // SAFETY: an invalid device_id is reported by the runtime as CL_INVALID_DEVICE.
        let name = unsafe { cl_get_device_info_string(device_id, CL_DEVICE_NAME)? };

        Ok(Self { device_id, name })
    }

    #[cfg(test)]
    pub fn create(device_id: cl_device_id, name: &str) -> Self {
        Self {
            device_id,
            name: name.to_string(),
        }
    }

    pub fn get_cl_device_id(&self) -> cl_device_id {
        self.device_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn info(&self) -> OclResult<DeviceInfo> {
        // SAFETY: device_id was checked in Device::new.
        unsafe { cl_get_device_info(self.device_id) }
    }
}

/// Exact name match, no prefix or case insensitive comparison.
/// When several devices share the name the last one wins.
pub fn find_device_by_name<'a>(devices: &'a [Device], target_name: &str) -> Option<&'a Device> {
    devices.iter().rev().find(|d| d.name() == target_name)
}

#[cfg(test)]
mod tests_device {
    use super::*;
    use std::ptr;

    fn fake_device(id: usize, name: &str) -> Device {
        Device::create(id as cl_device_id, name)
    }

    #[test]
    fn test_find_device_by_name_exact() {
        let devices = vec![
            fake_device(1, "xilinx_u200_xdma_201830_2"),
            fake_device(2, "xilinx_u250_xdma_201830_2"),
        ];

        let device = find_device_by_name(&devices, "xilinx_u250_xdma_201830_2").unwrap();
        assert_eq!(device.get_cl_device_id(), 2usize as cl_device_id);

        // no partial match
        assert!(find_device_by_name(&devices, "xilinx_u250").is_none());
        assert!(find_device_by_name(&devices, "XILINX_U200_XDMA_201830_2").is_none());
        assert!(find_device_by_name(&[], "xilinx_u200_xdma_201830_2").is_none());
    }

    #[test]
    fn test_find_device_by_name_last_wins() {
        let devices = vec![
            fake_device(1, "xilinx:adm-pcie-ku3:2ddr-xpr:3.3"),
            fake_device(2, "xilinx:adm-pcie-ku3:2ddr-xpr:3.3"),
        ];

        let device = find_device_by_name(&devices, "xilinx:adm-pcie-ku3:2ddr-xpr:3.3").unwrap();
        assert_eq!(device.get_cl_device_id(), 2usize as cl_device_id);
    }

    #[test]
    #[ignore = "requires an OpenCL platform"]
    fn test_device_new_invalid_reference() {
        use opencl_sys::CL_INVALID_DEVICE;

        let device_id: cl_device_id = ptr::null_mut();
        let result = Device::new(device_id);
        assert_eq!(result, Err(OclError::Code(CL_INVALID_DEVICE)));
    }

    #[test]
    #[ignore = "requires an OpenCL accelerator device"]
    fn test_platform_first_accelerators() {
        let platform = Platform::first().unwrap();
        assert!(!platform.info.vendor.is_empty());
        assert!(!platform.info.name.is_empty());

        let devices = platform.get_accelerator_devices().unwrap();
        assert!(!devices.is_empty());

        for device in devices.iter() {
            let info = device.info().unwrap();
            assert_eq!(info.name, device.name());
        }
    }
}
