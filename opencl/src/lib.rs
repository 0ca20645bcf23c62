//! # opencl
//!
//! Host side wrapper of the OpenCL C API for FPGA accelerator cards:
//! accelerator devices, programs from precompiled binaries, mapped buffers
//! pinned to DDR banks and profiled kernel events.
//!
//! https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html
//!

pub mod error;
pub mod ext;

pub mod unsafe_wrapper;
pub mod wrapper;

// re-export
pub use opencl_sys;
pub use utilities;
