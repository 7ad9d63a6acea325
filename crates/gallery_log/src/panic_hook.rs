//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::Local;
use std::panic::PanicHookInfo;
use std::path::PathBuf;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(report_panic));
    tracing::debug!("Panic hook initialized");
}

fn report_panic(info: &PanicHookInfo) {
    let thread = std::thread::current();
    let report = format!(
        "=== CRITICAL PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {:?}\n\
         Payload: {}\n\n\
         Stack Trace:\n{:?}",
        Local::now().to_rfc3339(),
        thread.name().unwrap_or("<unnamed>"),
        info.location(),
        payload_text(info),
        Backtrace::new(),
    );

    // stderr first; the tracing subscriber may already be gone
    eprintln!("{}", report);
    tracing::error!("{}", report);

    match write_crash_report(&report) {
        Ok(path) => eprintln!("Crash report written to {:?}", path),
        Err(e) => eprintln!("Failed to write crash report: {}", e),
    }
}

/// Panic payloads are almost always `&str` or `String`
fn payload_text(info: &PanicHookInfo) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "<unknown>".to_string()
    }
}

/// Crash reports land next to the logs, named so cleanup skips them
fn write_crash_report(report: &str) -> std::io::Result<PathBuf> {
    let dir = super::log_dir();
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(format!("crash_{}.txt", Local::now().format("%Y%m%d_%H%M%S")));
    std::fs::write(&path, report)?;
    Ok(path)
}
