//! # opencl error
//!
//! OpenCL status codes are kept as they are (`OclError::Code`), errors detected
//! by the wrapper itself use negative codes outside the range reserved by Khronos.
//!

use opencl_sys::{cl_int, CL_SUCCESS};
use std::fmt;

// opencl wrapper errors

pub const CL_WRAPPER_FIRST_PLATFORM_NOT_FOUND: cl_int = -100;

pub const CL_WRAPPER_EMPTY_PROGRAM_BINARY: cl_int = -101;

pub const CL_WRAPPER_NULL_MAPPED_POINTER: cl_int = -102;

pub const CL_WRAPPER_INVALID_BINARY_STATUS: cl_int = -103;

#[derive(Debug, PartialEq)]
pub enum OclError {
    // opencl error code
    Code(i32),
    // opencl wrapper error code
    Wrapper(i32),
}

pub type OclResult<T> = Result<T, OclError>;

// CL_CHECK | HIP_ASSERT
pub fn cl_check(status: cl_int) -> OclResult<()> {
    if CL_SUCCESS as cl_int == status {
        Ok(())
    } else {
        Err(OclError::Code(status))
    }
}

impl OclError {
    pub fn code(&self) -> i32 {
        match self {
            OclError::Code(code) | OclError::Wrapper(code) => *code,
        }
    }
}

impl fmt::Display for OclError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OclError::Code(code) => write!(f, "opencl error code: {code}"),
            OclError::Wrapper(code) => write!(f, "opencl wrapper error code: {code}"),
        }
    }
}

impl std::error::Error for OclError {}

#[cfg(test)]
mod tests {
    use super::*;
    use opencl_sys::{CL_DEVICE_NOT_FOUND, CL_INVALID_VALUE};

    #[test]
    fn test_cl_check() {
        assert_eq!(cl_check(CL_SUCCESS as cl_int), Ok(()));
        assert_eq!(
            cl_check(CL_INVALID_VALUE),
            Err(OclError::Code(CL_INVALID_VALUE))
        );
    }

    #[test]
    fn test_error_display() {
        let e = OclError::Code(CL_DEVICE_NOT_FOUND);
        assert_eq!(e.to_string(), "opencl error code: -1");
        assert_eq!(e.code(), -1);

        let e = OclError::Wrapper(CL_WRAPPER_FIRST_PLATFORM_NOT_FOUND);
        assert_eq!(e.to_string(), "opencl wrapper error code: -100");
    }
}
