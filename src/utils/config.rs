use std::{
    path::PathBuf,
    sync::Arc,
    time::Duration
};

use regex::Regex;
use reqwest::{
    header::HeaderName,
    Method
};

use crate::utils::{
    bags::WorkItem,
    constants::{
        DEFAULT_TIMEOUT_SECS,
        MAX_WORKERS
    },
    errors::ScanError
};

/// Validated scan settings, read-only once the scan starts.
#[derive(Clone, Debug)]
pub struct ScanConfiguration {
    pub method: Method,
    pub header_name: HeaderName,
    pub pattern: Arc<Regex>,
    pub timeout: Duration,
    pub worker_count: usize
}

impl ScanConfiguration {
    pub fn new(
        method: &str,
        header_name: &str,
        pattern: &str,
        timeout_secs: u64,
        worker_count: i64
    ) -> Result<ScanConfiguration,ScanError> {
        let worker_count = match usize::try_from(worker_count) {
            Ok(count) if (1..=MAX_WORKERS).contains(&worker_count) => count,
            _ => return Err(ScanError::InvalidWorkerCount { value: worker_count }),
        };
        if timeout_secs == 0 {
            return Err(ScanError::InvalidTimeout { value: timeout_secs });
        }
        let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| ScanError::InvalidMethod { method: method.to_string() })?;
        // HeaderName lowercases on parse, lookups are case insensitive from here on
        let header_name = HeaderName::from_bytes(header_name.trim().as_bytes())
            .map_err(|_| ScanError::InvalidHeaderName { name: header_name.to_string() })?;
        let pattern = Regex::new(pattern)
            .map_err(|source| ScanError::InvalidPattern { pattern: pattern.to_string(), source })?;

        Ok(ScanConfiguration {
            method,
            header_name,
            pattern: Arc::new(pattern),
            timeout: Duration::from_secs(timeout_secs),
            worker_count
        })
    }

    pub fn from_matches(args: &clap::ArgMatches) -> Result<ScanConfiguration,ScanError> {
        let timeout = match args.try_get_one::<u64>("timeout") {
            Ok(Some(timeout)) => *timeout,
            _ => DEFAULT_TIMEOUT_SECS,
        };
        let worker_count = match args.try_get_one::<i64>("worker-num") {
            Ok(Some(count)) => *count,
            _ => return Err(ScanError::MissingOption { name: String::from("worker-num") }),
        };
        ScanConfiguration::new(
            required_string(args,"method")?,
            required_string(args,"header-key")?,
            required_string(args,"regex-value")?,
            timeout,
            worker_count
        )
    }

    pub fn work_item(&self,url: &str) -> WorkItem {
        WorkItem {
            url: url.to_string(),
            method: self.method.clone(),
            header_name: self.header_name.clone(),
            pattern: Arc::clone(&self.pattern)
        }
    }
}

pub fn required_string<'a>(args: &'a clap::ArgMatches,name: &str) -> Result<&'a str,ScanError> {
    match args.try_get_one::<String>(name) {
        Ok(Some(value)) => Ok(value.as_str()),
        _ => Err(ScanError::MissingOption { name: name.to_string() }),
    }
}

pub fn required_path(args: &clap::ArgMatches,name: &str) -> Result<PathBuf,ScanError> {
    required_string(args,name).map(PathBuf::from)
}
