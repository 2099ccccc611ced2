use std::process::exit;

use indicatif::FormattedDuration;

use crate::{
    modules::headerscan::{
        components::probe::HeaderProbe,
        implementation::{
            HScanner,
            ScanReport
        }
    },
    utils::{
        config::{
            required_path,
            ScanConfiguration
        },
        errors::ScanError,
        fileloader::load_targets,
        output::OutputSink,
        statics::ARGS
    }
};

pub fn initialize_scan() {
    match run_scan(&ARGS) {
        Ok(report) => summarize(&report),
        Err(e) => {
            crate::DELETEPROGRESS!();
            crate::LOGFATAL!("{}",e);
            exit(e.exit_code());
        }
    }
}

fn run_scan(args: &clap::ArgMatches) -> Result<ScanReport,ScanError> {
    // Everything that can stop the scan is checked before the first request
    let config = ScanConfiguration::from_matches(args)?;
    let targets_path = required_path(args,"targets-file")?;
    let output_path = required_path(args,"out-file")?;

    let targets = load_targets(&targets_path)?;
    crate::LOGINFO!("Loaded {} targets from {}",targets.len(),targets_path.display());

    let prober = HeaderProbe::new(config.timeout)?;
    // Last fallible step before dispatch, an existing file is only truncated once the scan can run
    let mut sink = OutputSink::create(&output_path)?;

    crate::LOGINFO!(
        kvl: &vec![
            (String::from("Method"),config.method.to_string()),
            (String::from("Header"),config.header_name.to_string()),
            (String::from("Regex"),config.pattern.as_str().to_string()),
            (String::from("Timeout"),format!("{}s",config.timeout.as_secs())),
            (String::from("Workers"),config.worker_count.to_string())
        ],
        "Starting header scan"
    );

    crate::SETPROGRESS!(targets.len() as u64);

    let scanner = HScanner::new(config,prober);
    let report = scanner.run(&targets,|_| crate::INCPROGRESS!(1));

    crate::DELETEPROGRESS!();

    let report = report?;
    let written = sink.write_matches(&report.matches)?;
    crate::LOGSUCCESS!("Saved {} matches to {}",written,sink.path().display());
    Ok(report)
}

fn summarize(report: &ScanReport) {
    let elapsed = FormattedDuration(report.elapsed);
    crate::LOGNOTICE!(
        kvl: &vec![
            (String::from("Targets"),report.total.to_string()),
            (String::from("Matched"),report.matches.len().to_string()),
            (String::from("Not matched"),report.unmatched.to_string()),
            (String::from("Failed"),report.failed.to_string())
        ],
        "Scan have completed in {}",elapsed
    );
    if report.matches.is_empty() {
        crate::LOGRESULT!(clean: true,"No target matched");
    } else {
        crate::LOGRESULT!(clean: false,"{} targets matched",report.matches.len());
    }
}
