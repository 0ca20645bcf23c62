//! # global_bandwidth
//!
//! Host side of the FPGA global memory bandwidth test: loads a device image,
//! streams a test pattern through the `bandwidth` kernel over one or two
//! DDR bank lanes and reports the kernel's concurrent read/write throughput.
//!

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod loader;
pub mod report;
pub mod setup;
pub mod staging;

use crate::cli::Cli;
use crate::config::{emulation_mode, BandwidthConfig};
use crate::error::BandwidthResult;
use crate::report::BandwidthReport;
use crate::setup::{load_image, ExecutionContext};
use tracing::info;

/// Loads the image, resolves the configuration, sets up the device and runs one
/// measurement. A missing image is reported before any configuration error.
pub fn run(cli: &Cli) -> BandwidthResult<BandwidthReport> {
    let image = load_image(&cli.xclbin)?;

    let emulation = emulation_mode();
    let config = BandwidthConfig::resolve(cli.overrides(), emulation)?;

    info!(
        "target device {}, {:?} bank mode, {} bytes per lane{}",
        config.target_device,
        config.bank_mode,
        config.payload_size,
        if emulation { " (emulation)" } else { "" }
    );

    let ctx = ExecutionContext::new(&config, image)?;
    info!(
        "running on {} ({})",
        ctx.device().name(),
        ctx.platform().info.name
    );

    driver::run(&ctx, &config)
}
