//! Buffers, host/device transfers and the single kernel launch.
//!
//! Phases run in a fixed order: kernel, host pattern, lanes, input transfers,
//! arguments, launch, output checks, profiling. Every handle is released by
//! drop, on the error path too.

use crate::config::BandwidthConfig;
use crate::error::{BandwidthError, BandwidthResult};
use crate::report::{start_banner, BandwidthReport, ProfilingSample};
use crate::setup::ExecutionContext;
use crate::staging::{fill_pattern, verify_lane};
use opencl::ext::MemoryBank;
use opencl::opencl_sys::{
    cl_mem_flags, cl_ulong, CL_FALSE, CL_MAP_READ, CL_MAP_WRITE_INVALIDATE_REGION,
    CL_MEM_READ_WRITE,
};
use opencl::wrapper::context::{CommandQueue, Context};
use opencl::wrapper::event::Event;
use opencl::wrapper::memory::Buffer;
use opencl::wrapper::program::Kernel;
use tracing::{debug, info, warn};

/// Input/output buffer pair processed by the kernel.
#[derive(Debug)]
pub struct Lane {
    index: usize,
    input: Buffer<u8>,
    output: Buffer<u8>,
}

impl Lane {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn input(&self) -> &Buffer<u8> {
        &self.input
    }

    pub fn output(&self) -> &Buffer<u8> {
        &self.output
    }

    fn input_name(&self) -> String {
        format!("input_buffer{}", self.index)
    }

    fn output_name(&self) -> String {
        format!("output_buffer{}", self.index)
    }
}

fn allocate_buffer(
    context: &Context,
    name: String,
    size: usize,
    bank: Option<MemoryBank>,
) -> BandwidthResult<Buffer<u8>> {
    let flags = CL_MEM_READ_WRITE as cl_mem_flags;

    let result = match bank {
        Some(bank) => Buffer::new_in_bank(context, flags, size, bank),
        None => Buffer::new(context, flags, size),
    };

    match result {
        Ok(buffer) => {
            debug!("{name}: {size} bytes, bank {:?}", bank);
            Ok(buffer)
        }
        Err(source) => Err(BandwidthError::BufferAllocation { name, size, source }),
    }
}

/// One lane per bank pair of the configured mode.
pub fn allocate_lanes(context: &Context, config: &BandwidthConfig) -> BandwidthResult<Vec<Lane>> {
    let size = config.payload_size;

    (0..config.lanes())
        .map(|index| -> BandwidthResult<Lane> {
            let (input_bank, output_bank) = match config.bank_mode.lane_banks(index) {
                Some((input, output)) => (Some(input), Some(output)),
                None => (None, None),
            };

            let input = allocate_buffer(context, format!("input_buffer{index}"), size, input_bank)?;
            let output =
                allocate_buffer(context, format!("output_buffer{index}"), size, output_bank)?;

            Ok(Lane {
                index,
                input,
                output,
            })
        })
        .collect()
}

/// Host to device transfer through a mapped region.
pub fn write_input(
    command_queue: &CommandQueue,
    lane: &Lane,
    pattern: &[u8],
) -> BandwidthResult<()> {
    let name = lane.input_name();

    let mut mapped = command_queue
        .enqueue_map_buffer(lane.input(), CL_FALSE, CL_MAP_WRITE_INVALIDATE_REGION)
        .map_err(BandwidthError::transfer(format!("map {name}")))?;
    command_queue
        .finish()
        .map_err(BandwidthError::transfer(format!("map {name}")))?;

    let host = mapped
        .as_mut_slice()
        .map_err(BandwidthError::transfer(format!("map {name}")))?;
    host.copy_from_slice(pattern);

    mapped
        .unmap()
        .map_err(BandwidthError::transfer(format!("unmap {name}")))?;

    Ok(())
}

/// Binds `in0, out0, [in1, out1], num_blocks`.
pub fn bind_arguments(kernel: &mut Kernel, lanes: &[Lane], num_blocks: u64) -> BandwidthResult<()> {
    for lane in lanes {
        kernel
            .set_buffer_arg(lane.input())
            .map_err(BandwidthError::ArgumentBinding)?;
        kernel
            .set_buffer_arg(lane.output())
            .map_err(BandwidthError::ArgumentBinding)?;
    }

    let num_blocks: cl_ulong = num_blocks;
    // SAFETY: the last kernel parameter is an unsigned long.
    unsafe { kernel.set_arg(&num_blocks) }.map_err(BandwidthError::ArgumentBinding)?;

    match kernel.num_args() {
        Ok(declared) if declared != kernel.count_args() => {
            warn!(
                "kernel declares {declared} arguments, {} were bound",
                kernel.count_args()
            );
        }
        Ok(_) => {}
        Err(e) => debug!("CL_KERNEL_NUM_ARGS unavailable ({e})"),
    }

    Ok(())
}

/// Single work item launch, blocks until the kernel is complete.
pub fn launch(kernel: &Kernel, command_queue: &CommandQueue) -> BandwidthResult<Event> {
    // SAFETY: every argument is bound, the lanes outlive the returned event.
    let event = unsafe { kernel.enqueue_nd_range_kernel_dim_1(command_queue, 1, 1) }
        .map_err(BandwidthError::Enqueue)?;

    command_queue.finish().map_err(BandwidthError::Enqueue)?;

    Ok(event)
}

/// Device to host transfer of a lane output, validated against the pattern when
/// the lane is part of the validation policy.
pub fn read_output(
    command_queue: &CommandQueue,
    lane: &Lane,
    pattern: &[u8],
    validate: bool,
) -> BandwidthResult<()> {
    let name = lane.output_name();

    let mapped = command_queue
        .enqueue_map_buffer(lane.output(), CL_FALSE, CL_MAP_READ)
        .map_err(BandwidthError::transfer(format!("map {name}")))?;
    command_queue
        .finish()
        .map_err(BandwidthError::transfer(format!("map {name}")))?;

    if validate {
        let host = mapped
            .as_slice()
            .map_err(BandwidthError::transfer(format!("map {name}")))?;
        verify_lane(lane.index(), pattern, host)?;
        debug!("{name} matches input_buffer{}", lane.index());
    }

    mapped
        .unmap()
        .map_err(BandwidthError::transfer(format!("unmap {name}")))?;

    Ok(())
}

/// Runs the measurement on an initialised context.
pub fn run(ctx: &ExecutionContext, config: &BandwidthConfig) -> BandwidthResult<BandwidthReport> {
    let command_queue = ctx.command_queue();

    let mut kernel = ctx.create_kernel(&config.kernel_name)?;
    let pattern = fill_pattern(config.payload_size);
    let lanes = allocate_lanes(ctx.context(), config)?;

    println!("{}", start_banner(config.payload_size, lanes.len()));

    for lane in lanes.iter() {
        write_input(command_queue, lane, &pattern)?;
    }
    info!("input written to {} lane(s)", lanes.len());

    bind_arguments(&mut kernel, &lanes, config.num_blocks())?;

    let event = launch(&kernel, command_queue)?;
    info!("kernel {} complete", config.kernel_name);

    for lane in lanes.iter() {
        read_output(
            command_queue,
            lane,
            &pattern,
            config.validates_lane(lane.index()),
        )?;
    }

    let info = event.profiling_info().map_err(BandwidthError::Profiling)?;
    let sample = ProfilingSample::try_from(info)?;

    Ok(BandwidthReport {
        payload_size: config.payload_size,
        lanes: lanes.len(),
        sample,
        mode: config.report,
    })
}
