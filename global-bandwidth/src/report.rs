//! Elapsed time and throughput of the kernel run.

use crate::config::ReportMode;
use crate::error::{BandwidthError, BandwidthResult};
use opencl::wrapper::event::ProfilingInfo;
use std::fmt;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const NS_PER_SEC: f64 = 1_000_000_000.0;

/// numerator used by the historical report in place of the bytes moved
pub const LEGACY_NUMERATOR_BYTES: f64 = 10000.0;

/// Device start/end timestamps of the kernel command, in nanoseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ProfilingSample {
    start_ns: u64,
    end_ns: u64,
}

impl ProfilingSample {
    pub fn new(start_ns: u64, end_ns: u64) -> BandwidthResult<Self> {
        if end_ns <= start_ns {
            return Err(BandwidthError::InvalidProfilingSample {
                start: start_ns,
                end: end_ns,
            });
        }

        Ok(Self { start_ns, end_ns })
    }

    pub fn duration_ns(&self) -> u64 {
        self.end_ns - self.start_ns
    }

    pub fn seconds(&self) -> f64 {
        self.duration_ns() as f64 / NS_PER_SEC
    }
}

impl TryFrom<ProfilingInfo> for ProfilingSample {
    type Error = BandwidthError;

    fn try_from(info: ProfilingInfo) -> Result<Self, Self::Error> {
        match info.duration_ns() {
            Some(duration) if duration > 0 => Ok(Self {
                start_ns: info.start,
                end_ns: info.end,
            }),
            _ => Err(BandwidthError::InvalidProfilingSample {
                start: info.start,
                end: info.end,
            }),
        }
    }
}

/// total payload in MB, as printed before the kernel starts
pub fn megabytes(payload_size: usize, lanes: usize) -> f64 {
    (payload_size * lanes) as f64 / BYTES_PER_MB
}

pub fn start_banner(payload_size: usize, lanes: usize) -> String {
    format!(
        "Starting kernel to read/write {:.0} MB bytes from/to global memory... ",
        megabytes(payload_size, lanes)
    )
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BandwidthReport {
    pub payload_size: usize,
    pub lanes: usize,
    pub sample: ProfilingSample,
    pub mode: ReportMode,
}

impl BandwidthReport {
    pub fn megabytes(&self) -> f64 {
        megabytes(self.payload_size, self.lanes)
    }

    pub fn seconds(&self) -> f64 {
        self.sample.seconds()
    }

    /// every byte is read once and written once by the kernel
    pub fn throughput_mb_per_sec(&self) -> f64 {
        let numerator = match self.mode {
            ReportMode::Corrected => (self.payload_size * self.lanes) as f64,
            ReportMode::Legacy => LEGACY_NUMERATOR_BYTES,
        };

        (numerator * 2.0 / self.seconds()) / BYTES_PER_MB
    }
}

impl fmt::Display for BandwidthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mb = self.megabytes();

        writeln!(
            f,
            "Kernel read {:.0} MB bytes from and wrote {:.1} MB to global memory.",
            mb, mb
        )?;
        writeln!(f, "Execution time = {:.6} (sec) ", self.seconds())?;
        write!(
            f,
            "Concurrent Read and Write Throughput = {:.6} (MB/sec) ",
            self.throughput_mb_per_sec()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EMULATION_PAYLOAD_SIZE, HARDWARE_PAYLOAD_SIZE};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_profiling_sample() {
        let sample = ProfilingSample::new(1_000, 500_001_000).unwrap();
        assert_eq!(sample.duration_ns(), 500_000_000);
        assert!(approx_eq(sample.seconds(), 0.5));

        let info = ProfilingInfo {
            queued: 0,
            submit: 0,
            start: 10,
            end: 20,
        };
        assert_eq!(ProfilingSample::try_from(info).unwrap().duration_ns(), 10);
    }

    #[test]
    fn test_profiling_info_rejected() {
        // clock went backwards
        let info = ProfilingInfo {
            queued: 0,
            submit: 0,
            start: 30,
            end: 20,
        };
        assert!(matches!(
            ProfilingSample::try_from(info),
            Err(BandwidthError::InvalidProfilingSample { start: 30, end: 20 })
        ));

        // zero length kernel
        let info = ProfilingInfo { end: 30, ..info };
        assert!(ProfilingSample::try_from(info).is_err());
    }

    #[test]
    fn test_profiling_sample_rejected() {
        let result = ProfilingSample::new(20, 10);
        assert!(matches!(
            result,
            Err(BandwidthError::InvalidProfilingSample { start: 20, end: 10 })
        ));

        assert!(ProfilingSample::new(10, 10).is_err());
    }

    #[test]
    fn test_corrected_throughput() {
        // 1 GiB per lane, 2 lanes, one second
        let report = BandwidthReport {
            payload_size: HARDWARE_PAYLOAD_SIZE,
            lanes: 2,
            sample: ProfilingSample::new(0, 1_000_000_000).unwrap(),
            mode: ReportMode::Corrected,
        };

        assert!(approx_eq(report.megabytes(), 2048.0));
        assert!(approx_eq(report.throughput_mb_per_sec(), 4096.0));
    }

    #[test]
    fn test_legacy_throughput() {
        let report = BandwidthReport {
            payload_size: EMULATION_PAYLOAD_SIZE,
            lanes: 1,
            sample: ProfilingSample::new(0, 2_000_000_000).unwrap(),
            mode: ReportMode::Legacy,
        };

        assert!(approx_eq(
            report.throughput_mb_per_sec(),
            10000.0 / BYTES_PER_MB
        ));
    }

    #[test]
    fn test_start_banner() {
        assert_eq!(
            start_banner(HARDWARE_PAYLOAD_SIZE, 1),
            "Starting kernel to read/write 1024 MB bytes from/to global memory... "
        );
        assert_eq!(
            start_banner(EMULATION_PAYLOAD_SIZE, 2),
            "Starting kernel to read/write 2 MB bytes from/to global memory... "
        );
    }

    #[test]
    fn test_report_display() {
        let report = BandwidthReport {
            payload_size: EMULATION_PAYLOAD_SIZE,
            lanes: 1,
            sample: ProfilingSample::new(0, 250_000_000).unwrap(),
            mode: ReportMode::Corrected,
        };

        let lines: Vec<String> = report.to_string().lines().map(str::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "Kernel read 1 MB bytes from and wrote 1.0 MB to global memory.",
                "Execution time = 0.250000 (sec) ",
                "Concurrent Read and Write Throughput = 8.000000 (MB/sec) ",
            ]
        );
    }
}
