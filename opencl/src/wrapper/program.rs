//! # Opencl program, kernel safe wrapper (FFI - Foreign Function Interface)
//!
//! Program
//!
//! Programs are created from precompiled device binaries (xclbin for Xilinx cards),
//! nothing is compiled at runtime.
//!
//! Kernel
//!
//! Arguments are bound in declaration order with `set_arg`, one work item launches
//! are the usual shape for FPGA kernels (global = local = 1).

use crate::error::OclResult;
use crate::unsafe_wrapper::{
    cl_build_program, cl_create_kernel, cl_create_program_with_binary, cl_enqueue_nd_range_kernel,
    cl_get_kernel_num_args, cl_get_program_build_log, cl_release_kernel, cl_release_program,
    cl_set_kernel_arg,
};
use crate::wrapper::context::{CommandQueue, Context};
use crate::wrapper::event::Event;
use crate::wrapper::memory::Buffer;
use crate::wrapper::platform::Device;
use opencl_sys::{cl_kernel, cl_mem, cl_program, cl_uint};

#[derive(Debug, PartialEq)]
pub struct Program {
    cl_prog: cl_program,
    binary_len: usize,
}

impl Program {
    /// clCreateProgramWithBinary for the single device of the context.
    /// The program still has to be built (`build`) before kernels can be created.
    pub fn from_binary(context: &Context, device: &Device, binary: &[u8]) -> OclResult<Self> {
        // SAFETY: context and device are alive while borrowed.
        let cl_prog = unsafe {
            cl_create_program_with_binary(
                context.get_cl_context(),
                device.get_cl_device_id(),
                binary,
            )?
        };

        Ok(Self {
            cl_prog,
            binary_len: binary.len(),
        })
    }

    pub fn get_cl_program(&self) -> cl_program {
        self.cl_prog
    }

    pub fn binary_len(&self) -> usize {
        self.binary_len
    }

    /// No-op for binaries, but required by the API before clCreateKernel.
    /// On CL_BUILD_PROGRAM_FAILURE the reason is available with `build_log`.
    pub fn build(&self, device: &Device) -> OclResult<()> {
        // SAFETY: ...
        unsafe { cl_build_program(self.cl_prog, &[device.get_cl_device_id()]) }
    }

    pub fn build_log(&self, device: &Device) -> OclResult<String> {
        // SAFETY: ...
        unsafe { cl_get_program_build_log(self.cl_prog, device.get_cl_device_id()) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { cl_release_program(self.cl_prog).expect("Error: clReleaseProgram") };
    }
}

#[derive(Debug, PartialEq)]
pub struct Kernel {
    cl_k: cl_kernel,
    count_args: cl_uint,
}

impl Kernel {
    pub fn new(program: &Program, name: &str) -> OclResult<Self> {
        let cl_k = unsafe { cl_create_kernel(program.get_cl_program(), name)? };

        Ok(Self {
            cl_k,
            count_args: 0,
        })
    }

    pub fn get_cl_kernel(&self) -> cl_kernel {
        self.cl_k
    }

    /// number of arguments declared by the kernel (CL_KERNEL_NUM_ARGS)
    pub fn num_args(&self) -> OclResult<cl_uint> {
        unsafe { cl_get_kernel_num_args(self.cl_k) }
    }

    /// number of arguments bound with set_arg / set_buffer_arg
    pub fn count_args(&self) -> cl_uint {
        self.count_args
    }

    /// ...
    ///
    ///
    /// # Safety
    ///
    /// T must match the size and layout of the kernel parameter at arg_index.
    pub unsafe fn set_arg_to<T>(&self, arg_index: cl_uint, value: &T) -> OclResult<()> {
        unsafe {
            cl_set_kernel_arg(self.cl_k, arg_index, value)?;
        }

        Ok(())
    }

    /// ...
    ///
    ///
    /// # Safety
    ///
    /// T must match the size and layout of the next kernel parameter.
    pub unsafe fn set_arg<T>(&mut self, value: &T) -> OclResult<()> {
        self.set_arg_to(self.count_args, value)?;
        self.count_args += 1;

        Ok(())
    }

    /// binds a buffer to the next __global pointer parameter
    pub fn set_buffer_arg<T>(&mut self, buffer: &Buffer<T>) -> OclResult<()> {
        let mem: cl_mem = buffer.get_cl_mem();

        // SAFETY: a buffer handle is always passed as a cl_mem.
        unsafe { self.set_arg(&mem) }
    }

    /// ...
    ///
    ///
    /// # Safety
    ///
    /// every argument must be set, buffers bound to the kernel must outlive the returned event.
    pub unsafe fn enqueue_nd_range_kernel(
        &self,
        command_queue: &CommandQueue,
        global_work_offsets: &[usize],
        global_work_sizes: &[usize],
        local_work_sizes: &[usize],
    ) -> OclResult<Event> {
        let event = cl_enqueue_nd_range_kernel(
            command_queue.get_cl_command_queue(),
            self.cl_k,
            global_work_offsets,
            global_work_sizes,
            local_work_sizes,
            &[],
        )?;

        Ok(Event::from_cl_event(event))
    }

    /// ...
    ///
    ///
    /// # Safety
    ///
    /// same as enqueue_nd_range_kernel
    pub unsafe fn enqueue_nd_range_kernel_dim_1(
        &self,
        command_queue: &CommandQueue,
        global_work_size: usize,
        local_work_size: usize,
    ) -> OclResult<Event> {
        self.enqueue_nd_range_kernel(
            command_queue,
            &[],
            &[global_work_size],
            &[local_work_size],
        )
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        unsafe { cl_release_kernel(self.cl_k).expect("Error: clReleaseKernel") };
    }
}

#[cfg(test)]
mod tests_program {
    use super::*;
    use crate::error::OclError;
    use crate::wrapper::platform::Platform;
    use opencl_sys::CL_INVALID_KERNEL_NAME;
    use std::path::PathBuf;

    // xclbin built for the first accelerator of the machine
    fn xclbin_from_env() -> Vec<u8> {
        let path = PathBuf::from(std::env::var("XCLBIN").expect("XCLBIN is not set"));
        std::fs::read(path).unwrap()
    }

    #[test]
    #[ignore = "requires an OpenCL accelerator device and XCLBIN"]
    fn test_program_from_binary() {
        let platform = Platform::first().unwrap();
        let devices = platform.get_accelerator_devices().unwrap();
        let device = &devices[0];

        let context = Context::new(std::slice::from_ref(device)).unwrap();

        let binary = xclbin_from_env();
        let program = Program::from_binary(&context, device, &binary).unwrap();
        assert_eq!(program.binary_len(), binary.len());

        program.build(device).unwrap();

        let kernel = Kernel::new(&program, "bandwidth").unwrap();
        assert!(kernel.num_args().unwrap() >= 3);
        assert_eq!(kernel.count_args(), 0);

        let result = Kernel::new(&program, "notAKernel");
        assert_eq!(result, Err(OclError::Code(CL_INVALID_KERNEL_NAME)));
    }
}
