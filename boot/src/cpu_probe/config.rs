//! Probe configuration from the boot command line.

use hwprobe_lib::KlogLevel;

const DEFAULT_THERMAL: bool = true;
const DEFAULT_VENDOR_EXT: bool = true;
const DEFAULT_ENABLE_SSE: bool = false;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Sample the thermal MSR when leaf 1 advertises it.
    pub thermal: bool,
    /// Run the AMD extended decoder on AMD parts.
    pub vendor_ext: bool,
    /// Run the SSE activation step after detection.
    pub enable_sse: bool,
    /// Log level to apply before detection starts.
    pub log_level: Option<KlogLevel>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            thermal: DEFAULT_THERMAL,
            vendor_ext: DEFAULT_VENDOR_EXT,
            enable_sse: DEFAULT_ENABLE_SSE,
            log_level: None,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("on")
        || value.eq_ignore_ascii_case("true")
        || value.eq_ignore_ascii_case("yes")
        || value.eq_ignore_ascii_case("enabled")
        || value == "1"
    {
        Some(true)
    } else if value.eq_ignore_ascii_case("off")
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("disabled")
        || value == "0"
    {
        Some(false)
    } else {
        None
    }
}

impl ProbeConfig {
    pub fn from_cmdline(cmdline: Option<&str>) -> Self {
        let mut cfg = Self::default();
        let Some(cmdline) = cmdline else {
            return cfg;
        };
        for token in cmdline.split_whitespace() {
            if let Some(value) = token.strip_prefix("cpuprobe.thermal=") {
                if let Some(thermal) = parse_bool(value) {
                    cfg.thermal = thermal;
                }
            } else if let Some(value) = token.strip_prefix("cpuprobe.vendor_ext=") {
                if let Some(vendor_ext) = parse_bool(value) {
                    cfg.vendor_ext = vendor_ext;
                }
            } else if let Some(value) = token.strip_prefix("cpuprobe.sse=") {
                if let Some(enable) = parse_bool(value) {
                    cfg.enable_sse = enable;
                }
            } else if let Some(value) = token.strip_prefix("cpuprobe.log=") {
                if let Some(level) = KlogLevel::from_name(value) {
                    cfg.log_level = Some(level);
                }
            }
        }
        cfg
    }
}
