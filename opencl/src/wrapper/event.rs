//! # Opencl event safe wrapper (FFI - Foreign Function Interface)
//!
//! Every enqueue_* function of the wrapper returns an Event, released on drop.
//!

use crate::error::OclResult;
use crate::unsafe_wrapper::{cl_get_event_profiling_info, cl_release_event, cl_wait_for_events};
use opencl_sys::{
    cl_event, cl_ulong, CL_PROFILING_COMMAND_END, CL_PROFILING_COMMAND_QUEUED,
    CL_PROFILING_COMMAND_START, CL_PROFILING_COMMAND_SUBMIT,
};

/// Device timestamps of a command, in nanoseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProfilingInfo {
    pub queued: cl_ulong,
    pub submit: cl_ulong,
    pub start: cl_ulong,
    pub end: cl_ulong,
}

impl ProfilingInfo {
    /// execution time on the device (end - start), None if the clock went backwards
    pub fn duration_ns(&self) -> Option<cl_ulong> {
        self.end.checked_sub(self.start)
    }
}

#[derive(Debug)]
pub struct Event {
    cl_ev: cl_event,
}

impl Event {
    pub(crate) fn from_cl_event(cl_ev: cl_event) -> Self {
        Self { cl_ev }
    }

    /// blocks until the command is complete (clWaitForEvents)
    pub fn wait(&self) -> OclResult<()> {
        if self.cl_ev.is_null() {
            return Ok(());
        }

        // SAFETY: the event is alive while self is.
        unsafe { cl_wait_for_events(&[self.cl_ev]) }
    }

    /// Only valid for complete commands of a queue created with CL_QUEUE_PROFILING_ENABLE,
    /// otherwise CL_PROFILING_INFO_NOT_AVAILABLE is returned.
    pub fn profiling_info(&self) -> OclResult<ProfilingInfo> {
        // SAFETY: the event is alive while self is.
        unsafe {
            Ok(ProfilingInfo {
                queued: cl_get_event_profiling_info(self.cl_ev, CL_PROFILING_COMMAND_QUEUED)?,
                submit: cl_get_event_profiling_info(self.cl_ev, CL_PROFILING_COMMAND_SUBMIT)?,
                start: cl_get_event_profiling_info(self.cl_ev, CL_PROFILING_COMMAND_START)?,
                end: cl_get_event_profiling_info(self.cl_ev, CL_PROFILING_COMMAND_END)?,
            })
        }
    }
}

impl Drop for Event {
    fn drop(&mut self) {
        if self.cl_ev.is_null() {
            return;
        }

        unsafe { cl_release_event(self.cl_ev).expect("Error: clReleaseEvent") };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_profiling_info_duration() {
        let info = ProfilingInfo {
            queued: 10,
            submit: 20,
            start: 1_000,
            end: 2_500_000_000,
        };
        assert_eq!(info.duration_ns(), Some(2_499_999_000));

        let info = ProfilingInfo {
            queued: 0,
            submit: 0,
            start: 5,
            end: 4,
        };
        assert_eq!(info.duration_ns(), None);
    }

    #[test]
    fn test_null_event() {
        // enqueue_* functions never return a null event, a null one is a no-op
        let event = Event::from_cl_event(ptr::null_mut());
        assert_eq!(event.wait(), Ok(()));
        drop(event);
    }
}
