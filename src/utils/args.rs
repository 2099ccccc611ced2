use crate::utils::statics::{
    ARGS,
    LOGGER
};
use crate::utils::logger::{
    LOGLevel,
    OutputType
};

pub fn set_args() -> clap::Command {
    // Check if color is disabled and if so, do the same in clap
    let color_choice = match LOGGER.read() {
        Ok(lock) if lock.get_color() => clap::ColorChoice::Auto,
        _ => clap::ColorChoice::Never,
    };

    // Build the args
    clap::Command::new("HeadScan")
        .version(crate::utils::constants::PKG_VERSION)
        .about("Sends one request per target and reports targets whose response header matches a regex")
        .color(color_choice)
        .styles(crate::utils::constants::CLAP_STYLING)
        .arg(
            clap::Arg::new("method")
                .short('X')
                .long("method")
                .value_name("METHOD")
                .required(true)
                .value_parser(clap::value_parser!(String))
                .display_order(0)
                .help("HTTP method to use")
        )
        .arg(
            clap::Arg::new("targets-file")
                .short('w')
                .long("targets-file")
                .value_name("PATH")
                .required(true)
                .value_parser(clap::value_parser!(String))
                .display_order(1)
                .help("Path to a newline separated targets list (use - for stdin)")
        )
        .arg(
            clap::Arg::new("out-file")
                .short('o')
                .long("out-file")
                .value_name("PATH")
                .required(true)
                .value_parser(clap::value_parser!(String))
                .display_order(2)
                .help("Path to the output file")
        )
        .arg(
            clap::Arg::new("header-key")
                .short('k')
                .long("header-key")
                .value_name("HEADER")
                .required(true)
                .value_parser(clap::value_parser!(String))
                .display_order(3)
                .help("Response header key to match")
        )
        .arg(
            clap::Arg::new("regex-value")
                .short('r')
                .long("regex-value")
                .value_name("REGEX")
                .required(true)
                .value_parser(clap::value_parser!(String))
                .display_order(4)
                .help("Response header value regex to match for")
        )
        .arg(
            clap::Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .display_order(5)
                .help("HTTP timeout in seconds [default: 10]")
        )
        .arg(
            clap::Arg::new("worker-num")
                .short('n')
                .long("worker-num")
                .value_name("NUMBER")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64))
                .display_order(6)
                .help("Number of workers")
        )
        .arg(
            clap::Arg::new("no-progress")
                .short('q')
                .long("no-progress")
                .num_args(0)
                .action(clap::ArgAction::SetTrue)
                .display_order(7)
                .help("Disable progress display")
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .num_args(0)
                .conflicts_with_all(["trace","only-alerts"])
                .action(clap::ArgAction::SetTrue)
                .display_order(10)
                .help("Show verbose debug information, including failed targets")
        )
        .arg(
            clap::Arg::new("trace")
                .long("trace")
                .num_args(0)
                .conflicts_with_all(["verbose","only-alerts"])
                .action(clap::ArgAction::SetTrue)
                .display_order(11)
                .help("Enable extreme logging for debugging")
        )
        .arg(
            clap::Arg::new("only-alerts")
                .long("only-alerts")
                .num_args(0)
                .conflicts_with_all(["verbose","trace"])
                .action(clap::ArgAction::SetTrue)
                .display_order(12)
                .help("Filter output level to alerts and higher")
        )
        .arg(
            clap::Arg::new("no-color")
                .long("no-color")
                .num_args(0)
                .action(clap::ArgAction::SetTrue)
                .display_order(13)
                .help("Switch off console color")
        )
        .arg(
            clap::Arg::new("no-output")
                .long("no-output")
                .num_args(0)
                .conflicts_with_all(["csv-output","json-output"])
                .action(clap::ArgAction::SetTrue)
                .display_order(14)
                .help("Switch off console output")
        )
        .arg(
            clap::Arg::new("csv-output")
                .long("csv-output")
                .num_args(0)
                .conflicts_with("json-output")
                .action(clap::ArgAction::SetTrue)
                .display_order(15)
                .help("Change console logging to csv")
        )
        .arg(
            clap::Arg::new("json-output")
                .long("json-output")
                .num_args(0)
                .conflicts_with("csv-output")
                .action(clap::ArgAction::SetTrue)
                .display_order(16)
                .help("Change console logging to json")
        )
        .arg(
            clap::Arg::new("file-name")
                .long("file-name")
                .value_name("FILENAME")
                .value_parser(clap::value_parser!(String))
                .conflicts_with("no-log")
                .display_order(17)
                .help("Sets a custom filename to the log file")
        )
        .arg(
            clap::Arg::new("no-log")
                .long("no-log")
                .num_args(0)
                .action(clap::ArgAction::SetTrue)
                .conflicts_with_all(["file-name","csv-log","json-log"])
                .display_order(18)
                .help("Switch off file logging")
        )
        .arg(
            clap::Arg::new("csv-log")
                .long("csv-log")
                .num_args(0)
                .conflicts_with("json-log")
                .action(clap::ArgAction::SetTrue)
                .display_order(19)
                .help("Change log file format to csv")
        )
        .arg(
            clap::Arg::new("json-log")
                .long("json-log")
                .num_args(0)
                .conflicts_with("csv-log")
                .action(clap::ArgAction::SetTrue)
                .display_order(20)
                .help("Change log file format to json")
        )
        .arg(
            clap::Arg::new("syslog")
                .long("syslog")
                .value_name("CONNECTION")
                .value_parser(clap::value_parser!(String))
                .display_order(21)
                .help("Enable logging to syslog (format: udp://192.168.1.5:514)")
        )
}

pub fn setup_logger() {
    // Parse arguments before locking, building them reads the logger
    let args: &clap::ArgMatches = &ARGS;
    // Check all logger related arguments and modify logger for each change
    let mut lock = LOGGER.write().unwrap_or_else(|e| e.into_inner());
    if args.get_flag("verbose") {
        lock.set_logfilter(LOGLevel::Debug);
    }
    if args.get_flag("trace") {
        lock.set_logfilter(LOGLevel::Trace);
    }
    if args.get_flag("only-alerts") {
        lock.set_logfilter(LOGLevel::Alert);
    }
    if args.get_flag("no-output") {
        lock.set_logtoconsole(false);
    }
    if args.get_flag("csv-output") {
        lock.set_logconsoletype(OutputType::CSV);
    }
    if args.get_flag("json-output") {
        lock.set_logconsoletype(OutputType::JSON);
    }
    if !args.get_flag("no-log") {
        let file_name = args.get_one::<String>("file-name").cloned();
        lock.set_logtofile(true,file_name);
    }
    if args.get_flag("csv-log") {
        lock.set_logfiletype(OutputType::CSV);
    }
    if args.get_flag("json-log") {
        lock.set_logfiletype(OutputType::JSON);
    }
    let syslog_connection = args.get_one::<String>("syslog").cloned();
    drop(lock);

    if let Some(syslog_connection) = syslog_connection {
        match syslog_connection.split_once("://") {
            Some((protocol,connection)) => {
                let configured = LOGGER.write().unwrap_or_else(|e| e.into_inner()).create_syslog(protocol,connection,1);
                match configured {
                    Ok(_) => crate::LOGDEBUG!("Successfully configured syslog to {}://{}",protocol,connection),
                    Err(e) => crate::LOGERROR!("{e}"),
                }
            }
            None => {
                crate::LOGERROR!("Unable to read syslog connection string. Make sure to use either udp://IP:PORT or tcp://IP:PORT");
            }
        }
    }
}
