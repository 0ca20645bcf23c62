use crate::config::{BankMode, ConfigOverrides};
use clap::Parser;
use std::path::PathBuf;

/// Measures concurrent read/write bandwidth between an FPGA kernel and the
/// card's global memory.
#[derive(Parser, Debug)]
#[command(name = "kernel-global-bandwidth", version, about)]
pub struct Cli {
    /// Precompiled device image containing the bandwidth kernel
    #[arg(value_name = "XCLBIN_FILE")]
    pub xclbin: PathBuf,

    /// Accelerator device name (defaults to the build-time TARGET_DEVICE)
    #[arg(long, value_name = "NAME")]
    pub device: Option<String>,

    /// Number of DDR banks used by the image: 1, 2 or 4 (defaults to DDR_BANKS)
    #[arg(long, value_name = "1|2|4")]
    pub banks: Option<BankMode>,

    /// Kernel name inside the image
    #[arg(long, value_name = "NAME")]
    pub kernel: Option<String>,

    /// Historical throughput formula and second lane only validation
    #[arg(long)]
    pub legacy_report: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            device: self.device.clone(),
            banks: self.banks,
            kernel: self.kernel.clone(),
            legacy_report: self.legacy_report,
        }
    }
}
