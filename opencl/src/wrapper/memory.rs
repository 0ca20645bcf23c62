//! # Opencl buffer safe wrapper (FFI - Foreign Function Interface)
//!
//! Buffer
//!
//! Device memory, optionally pinned to a DDR bank of the card (Xilinx extension).
//!
//! MappedBuffer
//!
//! Host view of a mapped buffer, unmapped explicitly (to get the transfer event)
//! or on drop.
//!

use crate::error::OclResult;
use crate::ext::{MemoryBank, CL_MEM_EXT_PTR_XILINX};
use crate::unsafe_wrapper::{
    cl_create_buffer, cl_enqueue_unmap_mem_object, cl_get_mem_object_info,
    cl_release_mem_object, MemInfo,
};
use crate::wrapper::context::{CommandQueue, Context};
use crate::wrapper::event::Event;
use opencl_sys::{cl_mem, cl_mem_flags};
use std::ffi::c_void;
use std::marker::PhantomData;
use std::{mem, ptr, slice};

#[derive(Debug)]
pub struct Buffer<T> {
    mem: cl_mem,
    len: usize,
    bank: Option<MemoryBank>,
    cl_type: PhantomData<T>,
}

impl<T> Buffer<T> {
    pub fn new(context: &Context, flags: cl_mem_flags, total_elements: usize) -> OclResult<Self> {
        let size = total_elements * mem::size_of::<T>();

        // SAFETY: no host pointer is provided.
        let mem = unsafe {
            cl_create_buffer(context.get_cl_context(), flags, size, ptr::null_mut())?
        };

        Ok(Self {
            mem,
            len: total_elements,
            bank: None,
            cl_type: Default::default(),
        })
    }

    /// Buffer placed in the given DDR bank (CL_MEM_EXT_PTR_XILINX)
    pub fn new_in_bank(
        context: &Context,
        flags: cl_mem_flags,
        total_elements: usize,
        bank: MemoryBank,
    ) -> OclResult<Self> {
        let size = total_elements * mem::size_of::<T>();
        let mut ext = bank.ext_ptr();

        // SAFETY: with CL_MEM_EXT_PTR_XILINX the runtime reads host_ptr as a cl_mem_ext_ptr_t,
        // ext outlives the call.
        let mem = unsafe {
            cl_create_buffer(
                context.get_cl_context(),
                flags | CL_MEM_EXT_PTR_XILINX,
                size,
                &mut ext as *mut _ as *mut c_void,
            )?
        };

        Ok(Self {
            mem,
            len: total_elements,
            bank: Some(bank),
            cl_type: Default::default(),
        })
    }

    pub fn get_cl_mem(&self) -> cl_mem {
        self.mem
    }

    /// number of elements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// size in bytes
    pub fn size(&self) -> usize {
        self.len * mem::size_of::<T>()
    }

    pub fn bank(&self) -> Option<MemoryBank> {
        self.bank
    }

    pub fn info(&self) -> OclResult<MemInfo> {
        // SAFETY: the buffer is alive while self is.
        unsafe { cl_get_mem_object_info(self.mem) }
    }
}

impl<T> Drop for Buffer<T> {
    fn drop(&mut self) {
        unsafe { cl_release_mem_object(self.mem).expect("Error: Buffer clReleaseMemObject") };
    }
}

#[derive(Debug)]
pub struct MappedBuffer<'a, T> {
    command_queue: &'a CommandQueue,
    buffer: &'a Buffer<T>,
    mapped: *mut T,
    map_event: Event,
    unmapped: bool,
}

impl<'a, T: Copy> MappedBuffer<'a, T> {
    pub(crate) fn new(
        command_queue: &'a CommandQueue,
        buffer: &'a Buffer<T>,
        mapped: *mut T,
        map_event: Event,
    ) -> Self {
        Self {
            command_queue,
            buffer,
            mapped,
            map_event,
            unmapped: false,
        }
    }

    pub fn map_event(&self) -> &Event {
        &self.map_event
    }

    /// waits for the map command, then returns the host view of the buffer
    pub fn as_slice(&self) -> OclResult<&[T]> {
        self.map_event.wait()?;

        // SAFETY: the map command is complete, the region covers the whole buffer
        // and stays mapped until unmap (or drop).
        Ok(unsafe { slice::from_raw_parts(self.mapped, self.buffer.len()) })
    }

    /// waits for the map command, then returns the host view of the buffer
    pub fn as_mut_slice(&mut self) -> OclResult<&mut [T]> {
        self.map_event.wait()?;

        // SAFETY: same as as_slice, &mut self guarantees a single mutable view.
        Ok(unsafe { slice::from_raw_parts_mut(self.mapped, self.buffer.len()) })
    }

    /// Enqueues clEnqueueUnmapMemObject. For a region mapped for writing the returned
    /// event completes when the data is on the device.
    pub fn unmap(mut self) -> OclResult<Event> {
        self.unmapped = true;

        // SAFETY: self is consumed, the host view can not be used after this call.
        let event = unsafe {
            cl_enqueue_unmap_mem_object(
                self.command_queue.get_cl_command_queue(),
                self.buffer.get_cl_mem(),
                self.mapped as *mut c_void,
                &[],
            )?
        };

        Ok(Event::from_cl_event(event))
    }
}

impl<T> Drop for MappedBuffer<'_, T> {
    fn drop(&mut self) {
        if self.unmapped {
            return;
        }

        // a failed unmap is released with the buffer
        let result = unsafe {
            cl_enqueue_unmap_mem_object(
                self.command_queue.get_cl_command_queue(),
                self.buffer.get_cl_mem(),
                self.mapped as *mut c_void,
                &[],
            )
        };

        if let Ok(event) = result {
            drop(Event::from_cl_event(event));
        }
    }
}

#[cfg(test)]
mod tests_buffer {
    use super::*;
    use crate::wrapper::platform::Platform;
    use opencl_sys::CL_MEM_READ_WRITE;

    #[test]
    #[ignore = "requires an OpenCL accelerator device"]
    fn test_buffer_new() {
        let platform = Platform::first().unwrap();
        let devices = platform.get_accelerator_devices().unwrap();

        let context = Context::new(&devices[..1]).unwrap();

        let buffer: Buffer<u8> =
            Buffer::new(&context, CL_MEM_READ_WRITE as cl_mem_flags, 1024).unwrap();
        assert_eq!(buffer.len(), 1024);
        assert_eq!(buffer.size(), 1024);
        assert_eq!(buffer.bank(), None);

        let mem_info = buffer.info().unwrap();
        assert_eq!(
            mem_info,
            MemInfo {
                mem_size: 1024,
                reference_count: 1,
            }
        );

        let buffer: Buffer<u32> =
            Buffer::new(&context, CL_MEM_READ_WRITE as cl_mem_flags, 256).unwrap();
        assert_eq!(buffer.size(), 1024);
        assert_eq!(buffer.info().unwrap().mem_size, 1024);
    }

    #[test]
    #[ignore = "requires a Xilinx card with at least 2 DDR banks"]
    fn test_buffer_new_in_bank() {
        let platform = Platform::first().unwrap();
        let devices = platform.get_accelerator_devices().unwrap();

        let context = Context::new(&devices[..1]).unwrap();

        let buffer: Buffer<u8> = Buffer::new_in_bank(
            &context,
            CL_MEM_READ_WRITE as cl_mem_flags,
            1024,
            MemoryBank::Ddr1,
        )
        .unwrap();

        assert_eq!(buffer.bank(), Some(MemoryBank::Ddr1));
        assert_eq!(buffer.info().unwrap().mem_size, 1024);
    }
}
