use std::time::Duration;

// Gather build details in built_info module
#[allow(dead_code)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use built_info::PKG_VERSION;

// Used when no timeout is given on the command line
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// Upper bound for the worker pool size
pub const MAX_WORKERS: i64 = 1024;

// How long an idle worker or the collector waits before polling its queue again
pub const QUEUE_IDLE_WAIT: Duration = Duration::from_millis(20);

// Separator between url and header value in the output file
pub const OUTPUT_SEPARATOR: &str = " - ";

// Styling and colors for clap
pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
