//! # opencl unsafe wrapper
//! This is a small unsafe wrapper around OpenCL FFI bindings:
//!
//! * convert OpenCL C API functions into Rust functions that return a rust Result.
//! ```rust no_run
//! use opencl_sys::{clFinish, cl_command_queue};
//! use opencl::error::OclResult;
//! use opencl::unsafe_wrapper::cl_finish;
//!
//! unsafe {
//!
//!     let command_queue: cl_command_queue = std::ptr::null_mut(); // example
//!
//!     // from
//!     let ret = clFinish(command_queue);
//!
//!     // to
//!     let result: OclResult<()> = cl_finish(command_queue);
//!
//! }
//! ```
//!
//! * shorten the call of certain OpenCL C API functions, performing memory allocations,
//!   size queries and parameter selection within the same function.
//! ```rust no_run
//! use opencl_sys::{cl_device_id, cl_platform_id, CL_DEVICE_TYPE_ACCELERATOR};
//! use opencl::error::OclResult;
//! use opencl::unsafe_wrapper::{cl_get_device_ids, cl_get_platform_ids};
//!
//! // get all platforms
//! let platforms: Vec<cl_platform_id> = cl_get_platform_ids().unwrap();
//!
//! unsafe {
//!     let result_devices: OclResult<Vec<cl_device_id>> =
//!         cl_get_device_ids(platforms[0], CL_DEVICE_TYPE_ACCELERATOR);
//! }
//!
//! ```

use crate::error::{
    cl_check, OclError, OclResult, CL_WRAPPER_EMPTY_PROGRAM_BINARY,
    CL_WRAPPER_INVALID_BINARY_STATUS, CL_WRAPPER_NULL_MAPPED_POINTER,
};
use opencl_sys::{
    clBuildProgram, clCreateBuffer, clCreateContext, clCreateKernel, clCreateProgramWithBinary,
    clEnqueueMapBuffer, clEnqueueNDRangeKernel, clEnqueueUnmapMemObject, clFinish,
    clGetDeviceIDs, clGetDeviceInfo, clGetEventProfilingInfo, clGetKernelInfo,
    clGetMemObjectInfo, clGetPlatformIDs, clGetPlatformInfo, clGetProgramBuildInfo,
    clReleaseCommandQueue, clReleaseContext, clReleaseEvent, clReleaseKernel, clReleaseMemObject,
    clReleaseProgram, clSetKernelArg, clWaitForEvents, cl_bool, cl_command_queue,
    cl_command_queue_properties, cl_context, cl_device_id, cl_device_info, cl_device_type,
    cl_event, cl_int, cl_kernel, cl_map_flags, cl_mem, cl_mem_flags, cl_platform_id,
    cl_platform_info, cl_profiling_info, cl_program, cl_uint, cl_ulong, CL_DEVICE_NAME,
    CL_DEVICE_VENDOR, CL_DEVICE_VERSION, CL_INVALID_VALUE, CL_KERNEL_NUM_ARGS,
    CL_MEM_REFERENCE_COUNT, CL_MEM_SIZE, CL_PLATFORM_NAME, CL_PLATFORM_PROFILE,
    CL_PLATFORM_VENDOR, CL_PLATFORM_VERSION, CL_PROGRAM_BUILD_LOG, CL_SUCCESS,
};
use std::ffi::{c_void, CString};
use std::{mem, ptr};
use utilities::helper_functions::{buf_u8_to_string, trim_driver_log};

fn event_wait_list_ptr(event_wait_list: &[cl_event]) -> *const cl_event {
    if event_wait_list.is_empty() {
        ptr::null()
    } else {
        event_wait_list.as_ptr()
    }
}

/// Calls an OpenCL info query twice: first to get the size of the value, then
/// to fill a buffer of that size. The value is converted to a rust String.
///
/// # Safety
///
/// `query` must forward its arguments to a clGet*Info function whose handle is valid.
unsafe fn get_info_string<F>(query: F) -> OclResult<String>
where
    F: Fn(usize, *mut c_void, *mut usize) -> cl_int,
{
    let mut size: usize = 0;

    let ret = query(0, ptr::null_mut(), &mut size);
    cl_check(ret)?;

    if size == 0 {
        return Ok(String::new());
    }

    let mut buf: Vec<u8> = vec![0; size];

    let ret = query(size, buf.as_mut_ptr() as *mut c_void, ptr::null_mut());
    cl_check(ret)?;

    // drivers are expected to return ASCII, replace anything else
    let value = match buf_u8_to_string(&buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    };

    Ok(value)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_querying_platform_info
pub fn cl_get_platform_ids_count() -> OclResult<cl_uint> {
    let mut num_platforms = 0;

    let ret = unsafe { clGetPlatformIDs(0, ptr::null_mut(), &mut num_platforms) };
    cl_check(ret)?;

    Ok(num_platforms)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_querying_platform_info
pub fn cl_get_platform_ids() -> OclResult<Vec<cl_platform_id>> {
    let num_entries = cl_get_platform_ids_count()?;

    if num_entries == 0 {
        return Ok(vec![]);
    }

    let mut platforms: Vec<cl_platform_id> = vec![ptr::null_mut(); num_entries as usize];

    let ret = unsafe { clGetPlatformIDs(num_entries, platforms.as_mut_ptr(), ptr::null_mut()) };
    cl_check(ret)?;

    Ok(platforms)
}

/// Single string parameter of a platform (CL_PLATFORM_VENDOR, CL_PLATFORM_NAME, ...)
///
/// # Safety
///
/// platform_id must be a value returned by clGetPlatformIDs.
pub unsafe fn cl_get_platform_info_string(
    platform_id: cl_platform_id,
    param_name: cl_platform_info,
) -> OclResult<String> {
    get_info_string(|size, value, size_ret| {
        clGetPlatformInfo(platform_id, param_name, size, value, size_ret)
    })
}

#[derive(Debug, Clone)]
pub struct PlatformInfo {
    pub profile: String,
    pub version: String,
    pub name: String,
    pub vendor: String,
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_querying_platform_info
///
/// # Safety
///
/// platform_id must be a value returned by clGetPlatformIDs.
pub unsafe fn cl_get_platform_info(platform_id: cl_platform_id) -> OclResult<PlatformInfo> {
    Ok(PlatformInfo {
        profile: cl_get_platform_info_string(platform_id, CL_PLATFORM_PROFILE)?,
        version: cl_get_platform_info_string(platform_id, CL_PLATFORM_VERSION)?,
        name: cl_get_platform_info_string(platform_id, CL_PLATFORM_NAME)?,
        vendor: cl_get_platform_info_string(platform_id, CL_PLATFORM_VENDOR)?,
    })
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#platform-querying-devices
///
/// # Safety
///
/// platform_id must be a value returned by clGetPlatformIDs.
pub unsafe fn cl_get_device_count(
    platform_id: cl_platform_id,
    device_type: cl_device_type,
) -> OclResult<cl_uint> {
    let mut num_devices = 0;

    let ret = clGetDeviceIDs(
        platform_id,
        device_type,
        0,
        ptr::null_mut(),
        &mut num_devices,
    );
    cl_check(ret)?;

    Ok(num_devices)
}

/// All devices of the given type (CL_DEVICE_TYPE_ACCELERATOR for FPGA cards)
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#platform-querying-devices
///
/// # Safety
///
/// platform_id must be a value returned by clGetPlatformIDs.
pub unsafe fn cl_get_device_ids(
    platform_id: cl_platform_id,
    device_type: cl_device_type,
) -> OclResult<Vec<cl_device_id>> {
    let num_devices = cl_get_device_count(platform_id, device_type)?;

    if num_devices == 0 {
        return Ok(vec![]);
    }

    let mut devices: Vec<cl_device_id> = vec![ptr::null_mut(); num_devices as usize];

    let ret = clGetDeviceIDs(
        platform_id,
        device_type,
        num_devices,
        devices.as_mut_ptr(),
        ptr::null_mut(),
    );
    cl_check(ret)?;

    Ok(devices)
}

/// Single string parameter of a device (CL_DEVICE_NAME, CL_DEVICE_VENDOR, ...)
///
/// # Safety
///
/// device must be a value returned by clGetDeviceIDs.
pub unsafe fn cl_get_device_info_string(
    device: cl_device_id,
    param_name: cl_device_info,
) -> OclResult<String> {
    get_info_string(|size, value, size_ret| {
        clGetDeviceInfo(device, param_name, size, value, size_ret)
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceInfo {
    pub name: String,
    pub vendor: String,
    pub version: String,
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#platform-querying-devices
///
/// # Safety
///
/// device must be a value returned by clGetDeviceIDs.
pub unsafe fn cl_get_device_info(device: cl_device_id) -> OclResult<DeviceInfo> {
    Ok(DeviceInfo {
        name: cl_get_device_info_string(device, CL_DEVICE_NAME)?,
        vendor: cl_get_device_info_string(device, CL_DEVICE_VENDOR)?,
        version: cl_get_device_info_string(device, CL_DEVICE_VERSION)?,
    })
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_contexts
///
/// # Safety
///
/// every device must be a value returned by clGetDeviceIDs.
pub unsafe fn cl_create_context(devices: &[cl_device_id]) -> OclResult<cl_context> {
    let num_devices = devices.len() as cl_uint;
    let mut ret = CL_INVALID_VALUE;

    let context = clCreateContext(
        ptr::null(),
        num_devices,
        devices.as_ptr(),
        None,
        ptr::null_mut(),
        &mut ret,
    );
    cl_check(ret)?;

    Ok(context)
}

/// ...
///
/// # Safety
///
/// context must be alive, it is not usable after this call.
pub unsafe fn cl_release_context(context: cl_context) -> OclResult<()> {
    let ret = clReleaseContext(context);
    cl_check(ret)
}

/// OpenCL 1.2 command queue creation, the entry point implemented by the
/// FPGA runtimes (clCreateCommandQueueWithProperties is a 2.0 addition).
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_command_queues
///
/// # Safety
///
/// context and device must be alive, device must belong to the context.
#[allow(deprecated)]
pub unsafe fn cl_create_command_queue(
    context: cl_context,
    device: cl_device_id,
    properties: cl_command_queue_properties,
) -> OclResult<cl_command_queue> {
    let mut ret = CL_INVALID_VALUE;

    let command_queue = opencl_sys::clCreateCommandQueue(context, device, properties, &mut ret);
    cl_check(ret)?;

    Ok(command_queue)
}

/// ...
///
/// # Safety
///
/// command_queue must be alive, it is not usable after this call.
pub unsafe fn cl_release_command_queue(command_queue: cl_command_queue) -> OclResult<()> {
    let ret = clReleaseCommandQueue(command_queue);
    cl_check(ret)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_creating_buffer_objects
///
/// # Safety
///
/// host_ptr must be null or valid for the given flags
/// (a cl_mem_ext_ptr_t when CL_MEM_EXT_PTR_XILINX is set), it is only read during the call.
pub unsafe fn cl_create_buffer(
    context: cl_context,
    flags: cl_mem_flags,
    size: usize,
    host_ptr: *mut c_void,
) -> OclResult<cl_mem> {
    let mut ret = CL_INVALID_VALUE;

    let cl_buffer = clCreateBuffer(context, flags, size, host_ptr, &mut ret);
    cl_check(ret)?;

    Ok(cl_buffer)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemInfo {
    pub mem_size: usize,
    pub reference_count: cl_uint,
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#memory-object-queries
///
/// # Safety
///
/// mem_obj must be alive.
pub unsafe fn cl_get_mem_object_info(mem_obj: cl_mem) -> OclResult<MemInfo> {
    let mut mem_size: usize = 0;
    let mut mem_size_param_value_size = mem::size_of::<usize>();

    let ret = clGetMemObjectInfo(
        mem_obj,
        CL_MEM_SIZE,
        mem_size_param_value_size,
        &mut mem_size as *mut _ as *mut c_void,
        &mut mem_size_param_value_size,
    );
    cl_check(ret)?;

    let mut reference_count: cl_uint = 0;
    let mut reference_count_param_value_size = mem::size_of::<cl_uint>();

    let ret = clGetMemObjectInfo(
        mem_obj,
        CL_MEM_REFERENCE_COUNT,
        reference_count_param_value_size,
        &mut reference_count as *mut _ as *mut c_void,
        &mut reference_count_param_value_size,
    );
    cl_check(ret)?;

    Ok(MemInfo {
        mem_size,
        reference_count,
    })
}

/// ...
///
/// # Safety
///
/// mem_obj must be alive and not mapped, it is not usable after this call.
pub unsafe fn cl_release_mem_object(mem_obj: cl_mem) -> OclResult<()> {
    let ret = clReleaseMemObject(mem_obj);
    cl_check(ret)
}

/// Maps `size` bytes of a buffer into the host address space.
///
/// With a non blocking map the returned pointer must not be accessed before the
/// returned event completes (or the queue is finished).
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_mapping_buffer_objects
///
/// # Safety
///
/// command_queue and buffer must be alive, offset + size must be inside the buffer.
pub unsafe fn cl_enqueue_map_buffer(
    command_queue: cl_command_queue,
    buffer: cl_mem,
    blocking_map: cl_bool,
    map_flags: cl_map_flags,
    offset: usize,
    size: usize,
    event_wait_list: &[cl_event],
) -> OclResult<(*mut c_void, cl_event)> {
    let mut ret = CL_INVALID_VALUE;
    let mut event: cl_event = ptr::null_mut();

    let mapped = clEnqueueMapBuffer(
        command_queue,
        buffer,
        blocking_map,
        map_flags,
        offset,
        size,
        event_wait_list.len() as cl_uint,
        event_wait_list_ptr(event_wait_list),
        &mut event,
        &mut ret,
    );
    cl_check(ret)?;

    if mapped.is_null() {
        return Err(OclError::Wrapper(CL_WRAPPER_NULL_MAPPED_POINTER));
    }

    Ok((mapped, event))
}

/// For buffers mapped for writing, this is the point where data moves to the device.
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_unmapping_mapped_memory_objects
///
/// # Safety
///
/// mapped_ptr must be a pointer returned by clEnqueueMapBuffer for mem_obj, and must not be
/// accessed after this call.
pub unsafe fn cl_enqueue_unmap_mem_object(
    command_queue: cl_command_queue,
    mem_obj: cl_mem,
    mapped_ptr: *mut c_void,
    event_wait_list: &[cl_event],
) -> OclResult<cl_event> {
    let mut event: cl_event = ptr::null_mut();

    let ret = clEnqueueUnmapMemObject(
        command_queue,
        mem_obj,
        mapped_ptr,
        event_wait_list.len() as cl_uint,
        event_wait_list_ptr(event_wait_list),
        &mut event,
    );
    cl_check(ret)?;

    Ok(event)
}

/// Creates a program for a single device from a precompiled binary (xclbin).
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_creating_program_objects
///
/// # Safety
///
/// context and device must be alive.
pub unsafe fn cl_create_program_with_binary(
    context: cl_context,
    device: cl_device_id,
    binary: &[u8],
) -> OclResult<cl_program> {
    // a zero length makes the runtime dereference an empty image
    if binary.is_empty() {
        return Err(OclError::Wrapper(CL_WRAPPER_EMPTY_PROGRAM_BINARY));
    }

    let devices = [device];
    let lengths = [binary.len()];
    let mut binaries = [binary.as_ptr()];
    let mut binary_status: cl_int = CL_INVALID_VALUE;
    let mut ret = CL_INVALID_VALUE;

    let program = clCreateProgramWithBinary(
        context,
        1,
        devices.as_ptr(),
        lengths.as_ptr(),
        binaries.as_mut_ptr(),
        &mut binary_status,
        &mut ret,
    );
    cl_check(ret)?;

    if binary_status != CL_SUCCESS as cl_int {
        // the program object exists even if the binary was rejected
        let _ = clReleaseProgram(program);
        return Err(OclError::Wrapper(CL_WRAPPER_INVALID_BINARY_STATUS));
    }

    Ok(program)
}

/// Builds a program created from a binary. Nothing is compiled, the runtime only
/// checks that the binary fits the devices; on CL_BUILD_PROGRAM_FAILURE the log is
/// available with cl_get_program_build_log.
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_building_program_executables
///
/// # Safety
///
/// program and devices must be alive.
pub unsafe fn cl_build_program(program: cl_program, devices: &[cl_device_id]) -> OclResult<()> {
    let num_devices = devices.len() as cl_uint;

    let ret = clBuildProgram(
        program,
        num_devices,
        devices.as_ptr(),
        ptr::null(),
        None,
        ptr::null_mut(),
    );

    cl_check(ret)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_program_object_queries
///
/// # Safety
///
/// program and device must be alive.
pub unsafe fn cl_get_program_build_log(
    program: cl_program,
    device: cl_device_id,
) -> OclResult<String> {
    let log = get_info_string(|size, value, size_ret| {
        clGetProgramBuildInfo(
            program,
            device,
            CL_PROGRAM_BUILD_LOG,
            size,
            value,
            size_ret,
        )
    })?;

    Ok(trim_driver_log(&log).to_string())
}

/// ...
///
/// # Safety
///
/// program must be alive, it is not usable after this call.
pub unsafe fn cl_release_program(program: cl_program) -> OclResult<()> {
    let ret = clReleaseProgram(program);
    cl_check(ret)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_creating_kernel_objects
///
/// # Safety
///
/// program must be alive and built.
pub unsafe fn cl_create_kernel(program: cl_program, kernel_name: &str) -> OclResult<cl_kernel> {
    let name = CString::new(kernel_name).map_err(|_| OclError::Code(CL_INVALID_VALUE))?;
    let mut ret = CL_INVALID_VALUE;

    let kernel = clCreateKernel(program, name.as_ptr(), &mut ret);
    cl_check(ret)?;

    Ok(kernel)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_kernel_object_queries
///
/// # Safety
///
/// kernel must be alive.
pub unsafe fn cl_get_kernel_num_args(kernel: cl_kernel) -> OclResult<cl_uint> {
    let mut num_args: cl_uint = 0;
    let mut num_args_param_value_size = mem::size_of::<cl_uint>();

    let ret = clGetKernelInfo(
        kernel,
        CL_KERNEL_NUM_ARGS,
        num_args_param_value_size,
        &mut num_args as *mut _ as *mut c_void,
        &mut num_args_param_value_size,
    );
    cl_check(ret)?;

    Ok(num_args)
}

/// ...
///
/// # Safety
///
/// kernel must be alive, it is not usable after this call.
pub unsafe fn cl_release_kernel(kernel: cl_kernel) -> OclResult<()> {
    let ret = clReleaseKernel(kernel);

    cl_check(ret)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#setting-kernel-arguments
///
/// # Safety
///
/// T must have the size and layout of the kernel parameter at arg_index
/// (cl_mem for __global pointers, cl_ulong for ulong, ...).
pub unsafe fn cl_set_kernel_arg<T>(
    kernel: cl_kernel,
    arg_index: cl_uint,
    arg_value: &T,
) -> OclResult<()> {
    let ret = clSetKernelArg(
        kernel,
        arg_index,
        mem::size_of::<T>(),
        arg_value as *const _ as *const c_void,
    );

    cl_check(ret)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_executing_kernels
///
/// # Safety
///
/// every kernel argument must be set, and every buffer argument must stay alive until
/// the returned event completes.
pub unsafe fn cl_enqueue_nd_range_kernel(
    command_queue: cl_command_queue,
    kernel: cl_kernel,
    global_work_offsets: &[usize],
    global_work_sizes: &[usize],
    local_work_sizes: &[usize],
    event_wait_list: &[cl_event],
) -> OclResult<cl_event> {
    let work_dim = global_work_sizes.len();

    let global_work_offset = if global_work_offsets.is_empty() {
        ptr::null()
    } else {
        global_work_offsets.as_ptr()
    };
    let global_work_size = global_work_sizes.as_ptr();

    let local_work_size = if local_work_sizes.is_empty() {
        ptr::null()
    } else {
        local_work_sizes.as_ptr()
    };

    let mut event: cl_event = ptr::null_mut();

    let ret = clEnqueueNDRangeKernel(
        command_queue,
        kernel,
        work_dim as cl_uint,
        global_work_offset,
        global_work_size,
        local_work_size,
        event_wait_list.len() as cl_uint,
        event_wait_list_ptr(event_wait_list),
        &mut event,
    );
    cl_check(ret)?;

    Ok(event)
}

/// Blocks until every command previously enqueued in the queue is complete.
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_flush_and_finish
///
/// # Safety
///
/// command_queue must be alive.
pub unsafe fn cl_finish(command_queue: cl_command_queue) -> OclResult<()> {
    let ret = clFinish(command_queue);
    cl_check(ret)
}

/// ...
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#_event_objects
///
/// # Safety
///
/// every event must be alive.
pub unsafe fn cl_wait_for_events(event_list: &[cl_event]) -> OclResult<()> {
    if event_list.is_empty() {
        return Ok(());
    }

    let ret = clWaitForEvents(event_list.len() as cl_uint, event_list.as_ptr());
    cl_check(ret)
}

/// Device timestamp (nanoseconds) of a command, the queue must have been created
/// with CL_QUEUE_PROFILING_ENABLE.
///
/// https://registry.khronos.org/OpenCL/specs/3.0-unified/html/OpenCL_API.html#profiling-operations
///
/// # Safety
///
/// event must be alive and complete.
pub unsafe fn cl_get_event_profiling_info(
    event: cl_event,
    param_name: cl_profiling_info,
) -> OclResult<cl_ulong> {
    let mut value: cl_ulong = 0;

    let ret = clGetEventProfilingInfo(
        event,
        param_name,
        mem::size_of::<cl_ulong>(),
        &mut value as *mut _ as *mut c_void,
        ptr::null_mut(),
    );
    cl_check(ret)?;

    Ok(value)
}

/// ...
///
/// # Safety
///
/// event must be alive, it is not usable after this call.
pub unsafe fn cl_release_event(event: cl_event) -> OclResult<()> {
    let ret = clReleaseEvent(event);
    cl_check(ret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencl_sys::{
        CL_DEVICE_TYPE_ACCELERATOR, CL_INVALID_DEVICE, CL_INVALID_EVENT, CL_INVALID_PLATFORM,
        CL_PROFILING_COMMAND_START,
    };

    #[test]
    fn test_event_wait_list_ptr() {
        assert!(event_wait_list_ptr(&[]).is_null());

        let events: Vec<cl_event> = vec![ptr::null_mut(); 2];
        assert_eq!(event_wait_list_ptr(&events), events.as_ptr());
    }

    #[test]
    fn test_get_info_string_two_calls() {
        let value = b"xilinx_u200_xdma_201830_2\0";

        let result = unsafe {
            get_info_string(|size, param_value, size_ret| {
                if !size_ret.is_null() {
                    *size_ret = value.len();
                }
                if !param_value.is_null() {
                    assert_eq!(size, value.len());
                    ptr::copy_nonoverlapping(value.as_ptr(), param_value as *mut u8, size);
                }
                CL_SUCCESS as cl_int
            })
        };

        assert_eq!(result, Ok("xilinx_u200_xdma_201830_2".to_string()));
    }

    #[test]
    fn test_get_info_string_error() {
        let result = unsafe { get_info_string(|_, _, _| CL_INVALID_DEVICE) };
        assert_eq!(result, Err(OclError::Code(CL_INVALID_DEVICE)));
    }

    #[test]
    fn test_cl_wait_for_events_empty() {
        assert_eq!(unsafe { cl_wait_for_events(&[]) }, Ok(()));
    }

    #[test]
    fn test_cl_create_program_with_binary_empty() {
        let result = unsafe {
            cl_create_program_with_binary(ptr::null_mut(), ptr::null_mut(), &[])
        };
        assert_eq!(
            result,
            Err(OclError::Wrapper(CL_WRAPPER_EMPTY_PROGRAM_BINARY))
        );
    }

    // the following tests need an OpenCL platform with an accelerator device

    #[test]
    #[ignore = "requires an OpenCL accelerator device"]
    fn test_accelerator_device_info() {
        let platforms = cl_get_platform_ids().unwrap();
        let platform_id = platforms[0];

        let platform_info = unsafe { cl_get_platform_info(platform_id) }.unwrap();
        println!("{:#?}", platform_info);
        assert!(!platform_info.vendor.is_empty());
        assert!(!platform_info.name.is_empty());

        let devices =
            unsafe { cl_get_device_ids(platform_id, CL_DEVICE_TYPE_ACCELERATOR) }.unwrap();
        assert!(!devices.is_empty());

        let device_info = unsafe { cl_get_device_info(devices[0]) }.unwrap();
        println!("{:#?}", device_info);
        assert!(!device_info.name.is_empty());
    }

    #[test]
    #[ignore = "requires an OpenCL platform"]
    fn test_invalid_handles() {
        let result = unsafe {
            cl_get_device_ids(ptr::null_mut(), CL_DEVICE_TYPE_ACCELERATOR)
        };
        assert!(matches!(
            result,
            Err(OclError::Code(code)) if code == CL_INVALID_PLATFORM || code == CL_INVALID_VALUE
        ));

        let result = unsafe { cl_get_device_info_string(ptr::null_mut(), CL_DEVICE_NAME) };
        assert_eq!(result, Err(OclError::Code(CL_INVALID_DEVICE)));

        let result =
            unsafe { cl_get_event_profiling_info(ptr::null_mut(), CL_PROFILING_COMMAND_START) };
        assert_eq!(result, Err(OclError::Code(CL_INVALID_EVENT)));
    }
}
