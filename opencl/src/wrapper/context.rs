//! # Opencl context, command_queue safe wrapper (FFI - Foreign Function Interface)
//!
//! Context
//!
//! Single device context.
//!
//! CommandQueue
//!
//! In-order host queue, optionally with CL_QUEUE_PROFILING_ENABLE so that
//! kernel events carry device timestamps.
//!

use crate::error::OclResult;
use crate::unsafe_wrapper::{
    cl_create_command_queue, cl_create_context, cl_enqueue_map_buffer, cl_finish,
    cl_release_command_queue, cl_release_context,
};
use crate::wrapper::event::Event;
use crate::wrapper::memory::{Buffer, MappedBuffer};
use crate::wrapper::platform::Device;
use opencl_sys::{
    cl_bool, cl_command_queue, cl_command_queue_properties, cl_context,
    cl_map_flags, CL_QUEUE_PROFILING_ENABLE,
};

#[derive(Debug, PartialEq)]
pub struct Context {
    cl_ctx: cl_context,
}

impl Context {
    pub fn new(devices: &[Device]) -> OclResult<Self> {
        let cl_device_ids: Vec<_> = devices.iter().map(|d| d.get_cl_device_id()).collect();
        // SAFETY: Device (Struct) ensures (in most scenarios) that the device reference is valid.
        let cl_ctx = unsafe { cl_create_context(&cl_device_ids)? };

        Ok(Self { cl_ctx })
    }

    pub fn get_cl_context(&self) -> cl_context {
        self.cl_ctx
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        // SAFETY: owners release objects created from this context before the context itself.
        unsafe { cl_release_context(self.cl_ctx).expect("Error: clReleaseContext") };
    }
}

#[derive(Debug)]
pub struct CommandQueue {
    cl_cmd_queue: cl_command_queue,
    properties: cl_command_queue_properties,
}

impl CommandQueue {
    pub fn new(
        context: &Context,
        device: &Device,
        properties: cl_command_queue_properties,
    ) -> OclResult<Self> {
        // SAFETY: context is alive while borrowed, device is checked by Device::new.
        let cl_cmd_queue = unsafe {
            cl_create_command_queue(
                context.get_cl_context(),
                device.get_cl_device_id(),
                properties,
            )?
        };

        Ok(Self {
            cl_cmd_queue,
            properties,
        })
    }

    /// queue whose events can be queried with clGetEventProfilingInfo
    pub fn with_profiling(context: &Context, device: &Device) -> OclResult<Self> {
        Self::new(
            context,
            device,
            CL_QUEUE_PROFILING_ENABLE as cl_command_queue_properties,
        )
    }

    pub fn get_cl_command_queue(&self) -> cl_command_queue {
        self.cl_cmd_queue
    }

    pub fn profiling_enabled(&self) -> bool {
        (self.properties & CL_QUEUE_PROFILING_ENABLE as cl_command_queue_properties) != 0
    }

    /// blocks until every enqueued command is complete (clFinish)
    pub fn finish(&self) -> OclResult<()> {
        // SAFETY: the queue is alive while self is.
        unsafe { cl_finish(self.cl_cmd_queue) }
    }

    /// Maps the whole buffer into host memory.
    ///
    /// The map itself is enqueued without blocking; the returned MappedBuffer waits
    /// for the map command before handing out the host slice.
    pub fn enqueue_map_buffer<'a, T: Copy>(
        &'a self,
        buffer: &'a Buffer<T>,
        blocking_map: cl_bool,
        map_flags: cl_map_flags,
    ) -> OclResult<MappedBuffer<'a, T>> {
        // SAFETY: offset 0 and the buffer size are always inside the buffer,
        // the queue and the buffer are borrowed by the MappedBuffer.
        let (mapped, event) = unsafe {
            cl_enqueue_map_buffer(
                self.cl_cmd_queue,
                buffer.get_cl_mem(),
                blocking_map,
                map_flags,
                0,
                buffer.size(),
                &[],
            )?
        };

        Ok(MappedBuffer::new(
            self,
            buffer,
            mapped as *mut T,
            Event::from_cl_event(event),
        ))
    }
}

impl Drop for CommandQueue {
    fn drop(&mut self) {
        // SAFETY: ...
        unsafe {
            cl_release_command_queue(self.cl_cmd_queue).expect("Error: clReleaseCommandQueue")
        };
    }
}

#[cfg(test)]
mod tests_command_queue {
    use super::*;
    use crate::wrapper::platform::Platform;
    use opencl_sys::{
        cl_mem_flags, CL_FALSE, CL_MAP_READ, CL_MAP_WRITE_INVALIDATE_REGION, CL_MEM_READ_WRITE,
    };

    #[test]
    #[ignore = "requires an OpenCL accelerator device"]
    fn test_command_queue_map_write_read() {
        let platform = Platform::first().unwrap();
        let devices = platform.get_accelerator_devices().unwrap();
        let device = &devices[0];

        let context = Context::new(std::slice::from_ref(device)).unwrap();

        let command_queue = CommandQueue::with_profiling(&context, device).unwrap();
        assert!(command_queue.profiling_enabled());

        let buffer: Buffer<u8> =
            Buffer::new(&context, CL_MEM_READ_WRITE as cl_mem_flags, 4096).unwrap();

        {
            let mut mapped = command_queue
                .enqueue_map_buffer(&buffer, CL_FALSE, CL_MAP_WRITE_INVALIDATE_REGION)
                .unwrap();
            command_queue.finish().unwrap();

            let host = mapped.as_mut_slice().unwrap();
            for (i, x) in host.iter_mut().enumerate() {
                *x = (i % 256) as u8;
            }

            mapped.unmap().unwrap();
        }

        command_queue.finish().unwrap();

        let mapped = command_queue
            .enqueue_map_buffer(&buffer, CL_FALSE, CL_MAP_READ)
            .unwrap();
        command_queue.finish().unwrap();

        let host = mapped.as_slice().unwrap();
        assert!(host.iter().enumerate().all(|(i, &x)| x == (i % 256) as u8));
    }
}
