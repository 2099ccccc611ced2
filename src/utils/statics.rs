use std::{
    env,
    path::PathBuf,
    sync::{
        LazyLock,
        RwLock
    }
};

// Main program logger
pub static LOGGER: RwLock<super::logger::Logger> = RwLock::new(super::logger::Logger::const_default());

// Main args variable
pub static ARGS: LazyLock<clap::ArgMatches> = LazyLock::new(|| {
    crate::utils::args::set_args().get_matches()
});

// Process name for logging purposes
pub static PROCESS_NAME: LazyLock<String> = LazyLock::new(|| {
    match env::current_exe() {
        Ok(path) => format!("{}",path.file_name().unwrap_or(std::ffi::OsStr::new("HeadScan")).to_string_lossy()),
        Err(_) => String::from("HeadScan"),
    }
});

// Folder of the executable, log files are written there
pub static MY_PATH: LazyLock<PathBuf> = LazyLock::new(|| {
    let fallback = || env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    match env::current_exe() {
        Ok(valid_path) => match valid_path.parent() {
            Some(parent) => parent.to_path_buf(),
            None => fallback(),
        },
        Err(_) => fallback(),
    }
});

// Hostname
pub static HOSTNAME: LazyLock<String> = LazyLock::new(|| {
    sysinfo::System::host_name().unwrap_or_else(|| String::from("N/A"))
});

// Date and time at first call for filename creation
pub static DATETIME: LazyLock<String> = LazyLock::new(|| {
    format!("{}",chrono::offset::Utc::now().format("%Y-%m-%d_%H-%M-%S"))
});
