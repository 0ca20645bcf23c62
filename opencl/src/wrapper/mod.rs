//! # Opencl safe wrapper
//!
//! RAII types over the handles of the unsafe wrapper, every handle is released on drop.
//! Owners drop buffers and kernels before the program, the program and the queue
//! before the context.
//!

pub mod context;
pub mod event;
pub mod memory;
pub mod platform;
pub mod program;
