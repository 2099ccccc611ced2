use std::{
    fmt,
    fs::{
        File,
        OpenOptions
    },
    io::Write,
    sync::Mutex,
    time::Duration
};

use indicatif::{
    ProgressBar,
    ProgressDrawTarget,
    ProgressStyle
};

use rand::Rng;
use owo_colors::{
    AnsiColors,
    OwoColorize
};

use crate::utils::statics::{
    DATETIME,
    HOSTNAME,
    MY_PATH,
    PROCESS_NAME
};

pub type KeyValueList = Vec<(String,String)>;

type SyslogWriter = syslog::Logger<syslog::LoggerBackend,syslog::Formatter3164>;

static LEVEL_NAMES: [&str; 11] = ["OFF", "FATAL", "ERROR", "ALERT", "WARN", "NOTICE", "RESULT", "SUCCESS", "INFO", "DEBUG", "TRACE"];

const SEPARATOR: &str = "-------------------------------------";

/// Log levels ordered from the most severe to the most verbose.
///
/// A record is emitted when its level is lower or equal to the logger filter,
/// `Off` as a filter mutes everything.
#[repr(usize)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum LOGLevel {
    Off,
    Fatal,
    Error,
    Alert,
    Warn,
    Notice,
    Result,
    Success,
    Info,
    Debug,
    Trace
}

impl LOGLevel {
    pub fn as_str(&self) -> &'static str {
        LEVEL_NAMES[*self as usize]
    }
}

impl fmt::Display for LOGLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

pub enum OutputType {
    LOG,
    CSV,
    JSON
}

#[derive(PartialEq, Eq)]
pub enum LOGType {
    CONSOLE,
    FILE,
    SYSLOG
}

pub struct Logger {
    color: bool,
    logfilter: LOGLevel,
    logtoconsole: bool,
    consoletype: OutputType,
    progress: Option<Mutex<ProgressBar>>,
    logtofile: bool,
    filename: Option<String>,
    file: Mutex<Option<File>>,
    filetype: OutputType,
    syslog: Option<Mutex<SyslogWriter>>
}

impl Default for Logger {
    fn default() -> Logger {
        Logger::const_default()
    }
}

impl Logger {
    /// Console only logger at info level, file logging is switched on by the
    /// command line setup.
    pub const fn const_default() -> Logger {
        Logger {
            color: true,
            logfilter: LOGLevel::Info,
            logtoconsole: true,
            consoletype: OutputType::LOG,
            progress: None,
            logtofile: false,
            filename: None,
            file: Mutex::new(None),
            filetype: OutputType::LOG,
            syslog: None
        }
    }

    pub fn log(&self,level: LOGLevel,message: String,kvl: Option<&KeyValueList>,color: AnsiColors,exclude: Option<LOGType>) {
        if level == LOGLevel::Off || level > self.logfilter {
            return;
        }
        if self.logtoconsole && exclude != Some(LOGType::CONSOLE) {
            self.logtoconsole(level,&message,kvl,color);
        }
        if self.logtofile && exclude != Some(LOGType::FILE) {
            self.logtofile(level,&message,kvl);
        }
        if self.syslog.is_some() && exclude != Some(LOGType::SYSLOG) {
            self.logtosyslog(level,&message,kvl);
        }
    }

    pub fn trace(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Trace,message,kvl,AnsiColors::Blue,None);
    }
    pub fn debug(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Debug,message,kvl,AnsiColors::BrightBlue,None);
    }
    pub fn info(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Info,message,kvl,AnsiColors::Cyan,None);
    }
    pub fn success(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Success,message,kvl,AnsiColors::Green,None);
    }
    pub fn result(&self,message: String,kvl: Option<&KeyValueList>,clean: bool) {
        let color = if clean { AnsiColors::Green } else { AnsiColors::BrightRed };
        self.log(LOGLevel::Result,message,kvl,color,None);
    }
    pub fn notice(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Notice,message,kvl,AnsiColors::BrightCyan,None);
    }
    pub fn warn(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Warn,message,kvl,AnsiColors::BrightYellow,None);
    }
    pub fn alert(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Alert,message,kvl,AnsiColors::BrightRed,None);
    }
    pub fn error(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Error,message,kvl,AnsiColors::Red,None);
    }
    pub fn fatal(&self,message: String,kvl: Option<&KeyValueList>) {
        self.log(LOGLevel::Fatal,message,kvl,AnsiColors::BrightMagenta,None);
    }

    fn logtoconsole(&self,level: LOGLevel,message: &str,kvl: Option<&KeyValueList>,color: AnsiColors) {
        let line = match self.consoletype {
            OutputType::LOG => self.console_format(level,message,kvl,color),
            OutputType::CSV => csv_format(level,message,kvl),
            OutputType::JSON => json_format(level,message,kvl),
        };
        self.print_log(line);
    }

    fn console_format(&self,level: LOGLevel,message: &str,kvl: Option<&KeyValueList>,color: AnsiColors) -> String {
        let head = format!("[{}] {}",level,message);
        if !self.color {
            return format!("{}{}",head,kv_block(kvl));
        }
        let mut full_message = format!("{}",head.color(color));
        if let Some(list) = kvl {
            full_message.push('\n');
            full_message.push_str(SEPARATOR);
            for (key,value) in list.iter() {
                full_message.push_str(&format!("\n{}{} {}",key.bright_white(),":".bright_white(),value.color(color)));
            }
            full_message.push('\n');
            full_message.push_str(SEPARATOR);
        }
        full_message
    }

    fn print_log(&self,full_message: String) {
        match self.progress.as_ref() {
            // Printing above the bar keeps it from being torn by concurrent output
            Some(prog) => {
                let lock = prog.lock().unwrap_or_else(|e| e.into_inner());
                lock.println(full_message);
            }
            None => println!("{full_message}"),
        }
    }

    fn logtofile(&self,level: LOGLevel,message: &str,kvl: Option<&KeyValueList>) {
        let line = match self.filetype {
            OutputType::LOG => log_format(level,message,kvl),
            OutputType::CSV => csv_format(level,message,kvl),
            OutputType::JSON => json_format(level,message,kvl),
        };
        let mut lock = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if lock.is_none() {
            let file_path = MY_PATH.join(self.log_file_name());
            match OpenOptions::new().create(true).append(true).open(&file_path) {
                Ok(file) => *lock = Some(file),
                Err(e) => {
                    drop(lock);
                    self.log(LOGLevel::Error,format!("Unable to open log file {} due to {}",file_path.display(),e),None,AnsiColors::Red,Some(LOGType::FILE));
                    return;
                }
            }
        }
        if let Some(file) = lock.as_mut() {
            if let Err(e) = writeln!(file,"{line}") {
                drop(lock);
                self.log(LOGLevel::Error,format!("Unable to write to log file due to {}",e),None,AnsiColors::Red,Some(LOGType::FILE));
            }
        }
    }

    fn log_file_name(&self) -> String {
        let extension = match self.filetype {
            OutputType::LOG => "log",
            OutputType::CSV => "csv",
            OutputType::JSON => "json",
        };
        match &self.filename {
            Some(name) => name.clone(),
            None => format!("HeadScan_{}.{}",DATETIME.as_str(),extension),
        }
    }

    fn logtosyslog(&self,level: LOGLevel,message: &str,kvl: Option<&KeyValueList>) {
        let mut full_message = message.to_string();
        if let Some(list) = kvl {
            for (key,value) in list.iter() {
                full_message.push_str(&format!(" {}:\"{}\"",key,value));
            }
        }
        if let Some(writer) = &self.syslog {
            let mut writer = writer.lock().unwrap_or_else(|e| e.into_inner());
            let sent = match level {
                LOGLevel::Trace | LOGLevel::Debug => writer.debug(full_message),
                LOGLevel::Info | LOGLevel::Success | LOGLevel::Result => writer.info(full_message),
                LOGLevel::Notice => writer.notice(full_message),
                LOGLevel::Warn => writer.warning(full_message),
                LOGLevel::Alert => writer.alert(full_message),
                LOGLevel::Error => writer.err(full_message),
                LOGLevel::Fatal | LOGLevel::Off => writer.crit(full_message),
            };
            if let Err(e) = sent {
                drop(writer);
                self.log(LOGLevel::Error,format!("Unable to send to syslog due to {}",e),None,AnsiColors::Red,Some(LOGType::SYSLOG));
            }
        }
    }

    pub fn create_syslog(&mut self,protocol: &str,connection: &str,try_count: u8) -> Result<(),String> {
        let formatter = syslog::Formatter3164 {
            facility: syslog::Facility::LOG_SYSLOG,
            hostname: Some(HOSTNAME.to_string()),
            process: PROCESS_NAME.to_string(),
            pid: std::process::id(),
        };
        if protocol.eq_ignore_ascii_case("udp") {
            let port = rand::thread_rng().gen_range(49152..65535);
            match syslog::udp(formatter,format!("0.0.0.0:{}",port).as_str(),connection) {
                Ok(writer) => {
                    self.syslog = Some(Mutex::new(writer));
                    Ok(())
                }
                // Local port may already be taken, retry with another one
                Err(_) if try_count < 4 => self.create_syslog(protocol,connection,try_count+1),
                Err(e) => Err(format!("Unable to configure udp syslog due to {}",e)),
            }
        } else if protocol.eq_ignore_ascii_case("tcp") {
            match syslog::tcp(formatter,connection) {
                Ok(writer) => {
                    self.syslog = Some(Mutex::new(writer));
                    Ok(())
                }
                Err(e) => Err(format!("Unable to configure tcp syslog due to {}",e)),
            }
        } else {
            Err(format!("Unable to configure syslog due to unknown protocol '{}'",protocol))
        }
    }

    pub fn create_progress(&mut self) {
        let new_progress = ProgressBar::with_draw_target(None,ProgressDrawTarget::stdout())
            .with_style(ProgressStyle::default_spinner());
        self.progress = Some(Mutex::new(new_progress));
    }

    pub fn set_progress(&self,length: u64) {
        if let Some(prog) = &self.progress {
            let prog = prog.lock().unwrap_or_else(|e| e.into_inner());
            prog.set_length(length);
            prog.enable_steady_tick(Duration::from_millis(100));
            let template = if self.color {
                "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({percent}%) "
            } else {
                "{spinner} [{elapsed_precise}] [{wide_bar}] {pos}/{len} ({percent}%) "
            };
            if let Ok(style) = ProgressStyle::with_template(template) {
                prog.set_style(style.progress_chars("#>-"));
            }
        }
    }

    pub fn inc_progress(&self,inc_value: u64) {
        if let Some(prog) = &self.progress {
            prog.lock().unwrap_or_else(|e| e.into_inner()).inc(inc_value);
        }
    }

    pub fn delete_progress(&self) {
        if let Some(prog) = &self.progress {
            prog.lock().unwrap_or_else(|e| e.into_inner()).finish_and_clear();
        }
    }

    pub fn set_logtoconsole(&mut self,logtoconsole: bool) {
        self.logtoconsole = logtoconsole;
    }
    pub fn set_logconsoletype(&mut self,consoletype: OutputType) {
        self.consoletype = consoletype;
    }
    pub fn set_logtofile(&mut self,logtofile: bool,filename: Option<String>) {
        self.logtofile = logtofile;
        if filename.is_some() {
            self.filename = filename;
        }
    }
    pub fn set_logfiletype(&mut self,filetype: OutputType) {
        self.filetype = filetype;
    }
    pub fn set_logfilter(&mut self,level: LOGLevel) {
        self.logfilter = level;
    }
    pub fn set_color(&mut self,color: bool) {
        self.color = color;
    }
    pub fn get_color(&self) -> bool {
        self.color
    }
}

fn kv_block(kvl: Option<&KeyValueList>) -> String {
    let mut block = String::new();
    if let Some(list) = kvl {
        block.push('\n');
        block.push_str(SEPARATOR);
        for (key,value) in list.iter() {
            block.push_str(&format!("\n{}: {}",key,value));
        }
        block.push('\n');
        block.push_str(SEPARATOR);
    }
    block
}

fn log_format(level: LOGLevel,message: &str,kvl: Option<&KeyValueList>) -> String {
    format!("{: <7} - {} - {} - {}{}",level,chrono::offset::Utc::now().format("%Y-%m-%d %T%.3f"),HOSTNAME.as_str(),message,kv_block(kvl))
}

fn csv_format(level: LOGLevel,message: &str,kvl: Option<&KeyValueList>) -> String {
    let mut line = format!("\"{}\",\"{}\",\"{}\",\"{}\"",level,chrono::offset::Utc::now().format("%Y-%m-%d_%T%.3f"),HOSTNAME.as_str(),message.replace('"',"\"\""));
    if let Some(list) = kvl {
        for (_,value) in list.iter() {
            line.push_str(&format!(",\"{}\"",value.replace('"',"\"\"")));
        }
    }
    line
}

// JSON string escaping, everything above the control range passes through
fn json_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c < '\u{20}' => escaped.push_str(&format!("\\u{:04x}",c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

fn json_format(level: LOGLevel,message: &str,kvl: Option<&KeyValueList>) -> String {
    let mut fields = vec![
        format!("\"level\":\"{}\"",level.as_str()),
        format!("\"timestamp\":\"{}\"",chrono::offset::Utc::now().format("%Y-%m-%d %T%.3f")),
        format!("\"hostname\":\"{}\"",json_escape(HOSTNAME.as_str())),
        format!("\"message\":\"{}\"",json_escape(message))
    ];
    if let Some(list) = kvl {
        for (key,value) in list.iter() {
            fields.push(format!("\"{}\":\"{}\"",json_escape(key),json_escape(value)));
        }
    }
    format!("{{{}}}",fields.join(","))
}
