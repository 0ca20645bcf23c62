//! # Xilinx memory extension
//!
//! Declarations from `CL/cl_ext_xilinx.h` required to place a buffer in a given
//! DDR bank of the card. When `CL_MEM_EXT_PTR_XILINX` is part of the buffer flags,
//! the `host_ptr` argument of clCreateBuffer points to a `cl_mem_ext_ptr_t`.
//!

#![allow(non_camel_case_types)]

use opencl_sys::cl_mem_flags;
use std::ffi::{c_uint, c_void};
use std::ptr;

pub const CL_MEM_EXT_PTR_XILINX: cl_mem_flags = 1 << 31;

pub const XCL_MEM_DDR_BANK0: c_uint = 1 << 0;
pub const XCL_MEM_DDR_BANK1: c_uint = 1 << 1;
pub const XCL_MEM_DDR_BANK2: c_uint = 1 << 2;
pub const XCL_MEM_DDR_BANK3: c_uint = 1 << 3;

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct cl_mem_ext_ptr_t {
    pub flags: c_uint,
    pub obj: *mut c_void,
    pub param: *mut c_void,
}

/// DDR bank of the card a buffer is pinned to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MemoryBank {
    Ddr0,
    Ddr1,
    Ddr2,
    Ddr3,
}

impl MemoryBank {
    pub fn flags(&self) -> c_uint {
        match self {
            MemoryBank::Ddr0 => XCL_MEM_DDR_BANK0,
            MemoryBank::Ddr1 => XCL_MEM_DDR_BANK1,
            MemoryBank::Ddr2 => XCL_MEM_DDR_BANK2,
            MemoryBank::Ddr3 => XCL_MEM_DDR_BANK3,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            MemoryBank::Ddr0 => 0,
            MemoryBank::Ddr1 => 1,
            MemoryBank::Ddr2 => 2,
            MemoryBank::Ddr3 => 3,
        }
    }

    pub fn ext_ptr(&self) -> cl_mem_ext_ptr_t {
        cl_mem_ext_ptr_t {
            flags: self.flags(),
            obj: ptr::null_mut(),
            param: ptr::null_mut(),
        }
    }
}
