//! Platform/device resolution and the OpenCL objects shared by the whole run.

use crate::config::BandwidthConfig;
use crate::error::{BandwidthError, BandwidthResult};
use crate::loader::{load_device_image, DeviceImage};
use opencl::error::OclError;
use opencl::opencl_sys::CL_DEVICE_NOT_FOUND;
use opencl::wrapper::context::{CommandQueue, Context};
use opencl::wrapper::platform::{find_device_by_name, Device, Platform};
use opencl::wrapper::program::{Kernel, Program};
use std::path::Path;
use std::slice;
use tracing::{debug, info};

/// First platform and the accelerator device named `target_device`.
pub fn resolve_device(target_device: &str) -> BandwidthResult<(Platform, Device)> {
    let platform = Platform::first().map_err(BandwidthError::Platform)?;

    info!("CL_PLATFORM_VENDOR {}", platform.info.vendor);
    info!("CL_PLATFORM_NAME {}", platform.info.name);

    let devices = platform
        .get_accelerator_devices()
        .map_err(|e| match e {
            OclError::Code(CL_DEVICE_NOT_FOUND) => BandwidthError::NoAcceleratorDevice(e),
            e => BandwidthError::DeviceQuery(e),
        })?;

    if devices.is_empty() {
        return Err(BandwidthError::NoAcceleratorDevice(OclError::Code(
            CL_DEVICE_NOT_FOUND,
        )));
    }

    for device in devices.iter() {
        debug!("CL_DEVICE_NAME {}", device.name());
    }

    let device = find_device_by_name(&devices, target_device)
        .cloned()
        .ok_or_else(|| BandwidthError::DeviceNotFound {
            target: target_device.to_string(),
        })?;

    info!("Selected {} as the target device", device.name());

    Ok((platform, device))
}

/// Objects acquired once per run.
///
/// Fields drop in declaration order: program, queue, context.
#[derive(Debug)]
pub struct ExecutionContext {
    program: Program,
    command_queue: CommandQueue,
    context: Context,
    device: Device,
    platform: Platform,
}

/// Reads the device image, no OpenCL call is made.
pub fn load_image(xclbin: &Path) -> BandwidthResult<DeviceImage> {
    info!("loading {}", xclbin.display());
    let image = load_device_image(xclbin).map_err(|source| BandwidthError::ImageLoad {
        path: xclbin.to_path_buf(),
        source,
    })?;
    debug!("device image size: {} bytes", image.len());

    Ok(image)
}

impl ExecutionContext {
    /// The image is consumed, its bytes are released once the program exists.
    pub fn new(config: &BandwidthConfig, image: DeviceImage) -> BandwidthResult<Self> {
        let (platform, device) = resolve_device(&config.target_device)?;

        let context =
            Context::new(slice::from_ref(&device)).map_err(BandwidthError::Context)?;
        let command_queue =
            CommandQueue::with_profiling(&context, &device).map_err(BandwidthError::CommandQueue)?;

        let program = Program::from_binary(&context, &device, image.as_bytes())
            .map_err(BandwidthError::ProgramCreation)?;
        drop(image);

        if let Err(e) = program.build(&device) {
            let log = program
                .build_log(&device)
                .unwrap_or_else(|log_err| format!("build log unavailable ({log_err})"));

            return Err(BandwidthError::ProgramBuild {
                code: e.code(),
                log,
            });
        }

        Ok(Self {
            program,
            command_queue,
            context,
            device,
            platform,
        })
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn command_queue(&self) -> &CommandQueue {
        &self.command_queue
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn create_kernel(&self, name: &str) -> BandwidthResult<Kernel> {
        Kernel::new(&self.program, name).map_err(|source| BandwidthError::KernelCreation {
            name: name.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BuildDefaults, ConfigOverrides};
    use crate::error::EXIT_IMAGE_LOAD;
    use std::path::PathBuf;

    fn config(device: &str) -> BandwidthConfig {
        let overrides = ConfigOverrides {
            device: Some(device.to_string()),
            ..Default::default()
        };
        BandwidthConfig::resolve_with(overrides, BuildDefaults::default(), true).unwrap()
    }

    #[test]
    fn test_load_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xclbin");

        let err = load_image(&path).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IMAGE_LOAD);
        assert!(err
            .to_string()
            .starts_with("failed to load kernel from xclbin: "));
    }

    #[test]
    #[ignore = "requires an OpenCL accelerator device"]
    fn test_resolve_device_not_found() {
        let result = resolve_device("not-a-device");
        assert!(matches!(
            result,
            Err(BandwidthError::DeviceNotFound { target }) if target == "not-a-device"
        ));
    }

    #[test]
    #[ignore = "requires an OpenCL accelerator device and XCLBIN"]
    fn test_execution_context_new() {
        let platform = Platform::first().unwrap();
        let devices = platform.get_accelerator_devices().unwrap();
        let name = devices[0].name().to_string();

        let xclbin = PathBuf::from(std::env::var("XCLBIN").unwrap());
        let image = load_image(&xclbin).unwrap();
        let ctx = ExecutionContext::new(&config(&name), image).unwrap();

        assert_eq!(ctx.device().name(), name);
        assert!(ctx.command_queue().profiling_enabled());
        assert!(ctx.program().binary_len() > 0);

        let kernel = ctx.create_kernel("bandwidth").unwrap();
        assert!(kernel.num_args().unwrap() >= 3);

        let result = ctx.create_kernel("notAKernel");
        assert!(matches!(result, Err(BandwidthError::KernelCreation { .. })));
    }
}
