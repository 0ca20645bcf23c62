//! Error types of the bandwidth test and their process exit codes.

use crate::config::ConfigError;
use crate::loader::LoadError;
use crate::staging::ValidationError;
use opencl::error::OclError;
use std::path::PathBuf;
use thiserror::Error;

pub const EXIT_USAGE: u8 = 1;
pub const EXIT_GENERAL: u8 = 2;
pub const EXIT_IMAGE_LOAD: u8 = 3;
pub const EXIT_PROGRAM_CREATION: u8 = 4;
pub const EXIT_KERNEL_CREATION: u8 = 5;
pub const EXIT_BUFFER_ALLOCATION: u8 = 6;
pub const EXIT_ARGUMENT_BINDING: u8 = 7;
pub const EXIT_ENQUEUE: u8 = 8;
pub const EXIT_VALIDATION: u8 = 9;
pub const EXIT_TRANSFER: u8 = 10;
pub const EXIT_PROFILING: u8 = 11;

/// Errors that abort a bandwidth run.
#[derive(Debug, Error)]
pub enum BandwidthError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to find an OpenCL platform")]
    Platform(#[source] OclError),

    #[error("failed to create a device group, no accelerator device")]
    NoAcceleratorDevice(#[source] OclError),

    #[error("failed to query accelerator devices")]
    DeviceQuery(#[source] OclError),

    #[error("target device {target} not found")]
    DeviceNotFound { target: String },

    #[error("failed to create a compute context")]
    Context(#[source] OclError),

    #[error("failed to create a command queue")]
    CommandQueue(#[source] OclError),

    #[error("failed to load kernel from xclbin: {}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("failed to create compute program from binary")]
    ProgramCreation(#[source] OclError),

    #[error("failed to build program executable (code {code})\n{log}")]
    ProgramBuild { code: i32, log: String },

    #[error("failed to create compute kernel {name}")]
    KernelCreation {
        name: String,
        #[source]
        source: OclError,
    },

    #[error("failed to allocate {name} of size {size}")]
    BufferAllocation {
        name: String,
        size: usize,
        #[source]
        source: OclError,
    },

    #[error("failed to set kernel arguments")]
    ArgumentBinding(#[source] OclError),

    #[error("failed to execute kernel")]
    Enqueue(#[source] OclError),

    #[error("failed to {operation}")]
    Transfer {
        operation: String,
        #[source]
        source: OclError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to read kernel profiling information")]
    Profiling(#[source] OclError),

    #[error("invalid kernel profiling sample: start={start} end={end}")]
    InvalidProfilingSample { start: u64, end: u64 },
}

impl BandwidthError {
    pub(crate) fn transfer(operation: String) -> impl FnOnce(OclError) -> Self {
        move |source| BandwidthError::Transfer { operation, source }
    }

    /// messages of the underlying errors, outermost first
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut source = std::error::Error::source(self);

        while let Some(e) = source {
            causes.push(e.to_string());
            source = e.source();
        }

        causes
    }

    /// process exit code of the failure class
    pub fn exit_code(&self) -> u8 {
        match self {
            BandwidthError::Config(_) => EXIT_USAGE,
            BandwidthError::Platform(_)
            | BandwidthError::NoAcceleratorDevice(_)
            | BandwidthError::DeviceQuery(_)
            | BandwidthError::DeviceNotFound { .. }
            | BandwidthError::Context(_)
            | BandwidthError::CommandQueue(_)
            | BandwidthError::ProgramBuild { .. } => EXIT_GENERAL,
            BandwidthError::ImageLoad { .. } => EXIT_IMAGE_LOAD,
            BandwidthError::ProgramCreation(_) => EXIT_PROGRAM_CREATION,
            BandwidthError::KernelCreation { .. } => EXIT_KERNEL_CREATION,
            BandwidthError::BufferAllocation { .. } => EXIT_BUFFER_ALLOCATION,
            BandwidthError::ArgumentBinding(_) => EXIT_ARGUMENT_BINDING,
            BandwidthError::Enqueue(_) => EXIT_ENQUEUE,
            BandwidthError::Transfer { .. } => EXIT_TRANSFER,
            BandwidthError::Validation(_) => EXIT_VALIDATION,
            BandwidthError::Profiling(_) | BandwidthError::InvalidProfilingSample { .. } => {
                EXIT_PROFILING
            }
        }
    }
}

pub type BandwidthResult<T> = Result<T, BandwidthError>;
