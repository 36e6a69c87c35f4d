//! Boot-processor bring-up step for CPU introspection.

use hwprobe_lib::cpu::{CpuAccess, NativeCpu};
use hwprobe_lib::{klog_debug, klog_info, klog_set_level, klog_warn};

use crate::cpu_probe::{CpuInfo, ProbeConfig, activate_sse, cpu_probe_init};

/// Run the post-detection steps the command line asked for.
///
/// A failed step is logged and boot carries on.
fn run_activation<A: CpuAccess + ?Sized>(cpu: &A, info: &CpuInfo, config: &ProbeConfig) {
    if !config.enable_sse {
        klog_debug!("[cpu] SSE activation disabled");
        return;
    }
    if let Err(err) = activate_sse(cpu, info) {
        klog_warn!("[cpu] SSE activation skipped: {}", err);
    }
}

/// Probe the boot processor and apply the command-line options.
///
/// Runs once per boot on the bootstrap processor, before any other core
/// is started.
pub fn boot_cpu_init(cmdline: Option<&str>) -> &'static CpuInfo {
    let config = ProbeConfig::from_cmdline(cmdline);
    if let Some(level) = config.log_level {
        klog_set_level(level);
    }
    klog_info!(
        "[cpu] probe: thermal={} vendor_ext={} sse={}",
        config.thermal,
        config.vendor_ext,
        config.enable_sse
    );

    let cpu = NativeCpu;
    let info = cpu_probe_init(&cpu, &config);
    run_activation(&cpu, info, &config);
    info
}
