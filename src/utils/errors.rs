use std::path::PathBuf;

use thiserror::Error;

use crate::utils::constants::MAX_WORKERS;

/// Groups every fatal error by the stage of the scan it can happen in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    TargetSource,
    OutputSink,
    Runtime
}

#[derive(Error, Debug)]
pub enum ScanError {
    // Configuration
    #[error("Missing required option '{name}'")]
    MissingOption { name: String },

    #[error("Invalid worker count {value} (must be between 1 and {max})", max = MAX_WORKERS)]
    InvalidWorkerCount { value: i64 },

    #[error("Invalid timeout {value} (must be 1 second or higher)")]
    InvalidTimeout { value: u64 },

    #[error("Unable to compile regex '{pattern}' due to {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error
    },

    #[error("Invalid HTTP method '{method}'")]
    InvalidMethod { method: String },

    #[error("Invalid header name '{name}'")]
    InvalidHeaderName { name: String },

    #[error("Unable to build http client due to {0}")]
    HttpClient(#[from] reqwest::Error),

    // Target source
    #[error("Unable to read targets from '{path}' due to {source}")]
    TargetSource {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    // Output sink
    #[error("Unable to write output to '{path}' due to {source}")]
    OutputSink {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    // Runtime
    #[error("All workers exited after {drained} of {expected} results were collected")]
    WorkerLost { drained: usize, expected: usize },

    #[error("Unable to start worker {worker_id} due to {source}")]
    WorkerSpawn {
        worker_id: usize,
        #[source]
        source: std::io::Error
    },

    #[error("Job queue rejected an item: {0}")]
    QueueRejected(String)
}

impl ScanError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScanError::MissingOption { .. }
            | ScanError::InvalidWorkerCount { .. }
            | ScanError::InvalidTimeout { .. }
            | ScanError::InvalidPattern { .. }
            | ScanError::InvalidMethod { .. }
            | ScanError::InvalidHeaderName { .. }
            | ScanError::HttpClient(_) => ErrorKind::Configuration,
            ScanError::TargetSource { .. } => ErrorKind::TargetSource,
            ScanError::OutputSink { .. } => ErrorKind::OutputSink,
            ScanError::WorkerLost { .. }
            | ScanError::WorkerSpawn { .. }
            | ScanError::QueueRejected(_) => ErrorKind::Runtime,
        }
    }

    /// Process exit code used when this error aborts the program.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => 2,
            ErrorKind::TargetSource => 3,
            ErrorKind::OutputSink => 4,
            ErrorKind::Runtime => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let config = ScanError::InvalidWorkerCount { value: 0 };
        assert_eq!(config.kind(), ErrorKind::Configuration);
        assert_eq!(config.exit_code(), 2);

        let source = ScanError::TargetSource {
            path: PathBuf::from("targets.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound)
        };
        assert_eq!(source.exit_code(), 3);

        let lost = ScanError::WorkerLost { drained: 1, expected: 2 };
        assert_eq!(lost.kind(), ErrorKind::Runtime);
        assert_eq!(lost.to_string(), "All workers exited after 1 of 2 results were collected");

        let spawn = ScanError::WorkerSpawn {
            worker_id: 3,
            source: std::io::Error::from(std::io::ErrorKind::WouldBlock)
        };
        assert_eq!(spawn.exit_code(), 5);
    }
}
