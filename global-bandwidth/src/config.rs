//! Run configuration: build-time defaults, command line overrides and the
//! emulation switch, collected into one [`BandwidthConfig`].

use opencl::ext::MemoryBank;
use std::env;
use std::ffi::OsString;
use std::str::FromStr;
use thiserror::Error;

/// Present (with any value) when the vendor runtime runs in emulation.
pub const EMULATION_ENV: &str = "XCL_EMULATION_MODE";

pub const HARDWARE_PAYLOAD_SIZE: usize = 1024 * 1024 * 1024;
pub const EMULATION_PAYLOAD_SIZE: usize = 1024 * 1024;

/// bytes moved by the kernel per block
pub const BLOCK_SIZE: usize = 64;

pub const DEFAULT_KERNEL_NAME: &str = "bandwidth";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no target device, build with TARGET_DEVICE or pass --device")]
    MissingTargetDevice,

    #[error("invalid memory bank mode {0:?}, expected 1, 2 or 4")]
    InvalidBankMode(String),

    #[error("kernel name must not be empty")]
    EmptyKernelName,
}

/// Number of DDR banks the device image was linked against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum BankMode {
    /// default placement, no bank extension
    #[default]
    One,
    /// one lane, input on bank 0 and output on bank 1
    Two,
    /// two lanes, banks 0/1 and 2/3
    Four,
}

impl BankMode {
    pub fn lanes(&self) -> usize {
        match self {
            BankMode::One | BankMode::Two => 1,
            BankMode::Four => 2,
        }
    }

    /// (input bank, output bank) of a lane, None for default placement
    pub fn lane_banks(&self, lane: usize) -> Option<(MemoryBank, MemoryBank)> {
        match (self, lane) {
            (BankMode::One, _) => None,
            (BankMode::Two, 0) | (BankMode::Four, 0) => Some((MemoryBank::Ddr0, MemoryBank::Ddr1)),
            (BankMode::Four, 1) => Some((MemoryBank::Ddr2, MemoryBank::Ddr3)),
            _ => None,
        }
    }
}

impl FromStr for BankMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(BankMode::One),
            "2" => Ok(BankMode::Two),
            "4" => Ok(BankMode::Four),
            other => Err(ConfigError::InvalidBankMode(other.to_string())),
        }
    }
}

/// How throughput is computed and which lanes are validated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// throughput from the bytes actually moved, every lane validated
    #[default]
    Corrected,
    /// fixed 10000 byte numerator, only the second lane validated
    Legacy,
}

/// Values baked in at compile time (`TARGET_DEVICE`/`SDX_PLATFORM`, `DDR_BANKS`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct BuildDefaults {
    pub target_device: Option<&'static str>,
    pub ddr_banks: Option<&'static str>,
}

impl BuildDefaults {
    pub const fn from_build_env() -> Self {
        let target_device = match option_env!("TARGET_DEVICE") {
            Some(device) => Some(device),
            None => option_env!("SDX_PLATFORM"),
        };

        Self {
            target_device,
            ddr_banks: option_env!("DDR_BANKS"),
        }
    }
}

/// Optional values given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigOverrides {
    pub device: Option<String>,
    pub banks: Option<BankMode>,
    pub kernel: Option<String>,
    pub legacy_report: bool,
}

pub fn payload_size_for(emulation: bool) -> usize {
    if emulation {
        EMULATION_PAYLOAD_SIZE
    } else {
        HARDWARE_PAYLOAD_SIZE
    }
}

pub fn emulation_mode() -> bool {
    emulation_from(env::var_os(EMULATION_ENV))
}

/// any value of XCL_EMULATION_MODE counts, the empty string included
pub fn emulation_from(value: Option<OsString>) -> bool {
    value.is_some()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandwidthConfig {
    pub target_device: String,
    pub bank_mode: BankMode,
    pub payload_size: usize,
    pub kernel_name: String,
    pub report: ReportMode,
}

impl BandwidthConfig {
    pub fn resolve(overrides: ConfigOverrides, emulation: bool) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, BuildDefaults::from_build_env(), emulation)
    }

    /// command line values win over build-time defaults
    pub fn resolve_with(
        overrides: ConfigOverrides,
        defaults: BuildDefaults,
        emulation: bool,
    ) -> Result<Self, ConfigError> {
        let target_device = overrides
            .device
            .or_else(|| defaults.target_device.map(str::to_string))
            .filter(|d| !d.is_empty())
            .ok_or(ConfigError::MissingTargetDevice)?;

        let bank_mode = match (overrides.banks, defaults.ddr_banks) {
            (Some(mode), _) => mode,
            (None, Some(banks)) => banks.parse()?,
            (None, None) => BankMode::default(),
        };

        let kernel_name = overrides
            .kernel
            .unwrap_or_else(|| DEFAULT_KERNEL_NAME.to_string());
        if kernel_name.is_empty() {
            return Err(ConfigError::EmptyKernelName);
        }

        let report = if overrides.legacy_report {
            ReportMode::Legacy
        } else {
            ReportMode::Corrected
        };

        Ok(Self {
            target_device,
            bank_mode,
            payload_size: payload_size_for(emulation),
            kernel_name,
            report,
        })
    }

    pub fn lanes(&self) -> usize {
        self.bank_mode.lanes()
    }

    /// value of the kernel's last argument
    pub fn num_blocks(&self) -> u64 {
        (self.payload_size / BLOCK_SIZE) as u64
    }

    /// lanes checked after the kernel ran
    pub fn validates_lane(&self, lane: usize) -> bool {
        match self.report {
            ReportMode::Corrected => true,
            ReportMode::Legacy => lane > 0,
        }
    }
}
