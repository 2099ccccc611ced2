fn header(color: bool) {
    use owo_colors::OwoColorize;
    let version = crate::utils::constants::PKG_VERSION;
    let lines = [
        " _  _             _ ___",
        "| || |___ __ _ __| / __| __ __ _ _ _",
        "| __ / -_) _` / _` \\__ \\/ _/ _` | ' \\",
        "|_||_\\___\\__,_\\__,_|___/\\__\\__,_|_||_|"
    ];
    let rule = "-------------------------------------";
    let mut logo = String::new();
    match color {
        true => {
            logo.push_str(&format!("{}\n",rule.bright_blue()));
            for line in lines {
                logo.push_str(&format!("{}\n",line.cyan().bold()));
            }
            logo.push_str(&format!("\n  {} {}\n","Version".cyan().bold(),version.cyan()));
            logo.push_str(&format!("{}\n",rule.bright_blue()));
        }
        false => {
            logo.push_str(&format!("{rule}\n"));
            for line in lines {
                logo.push_str(&format!("{line}\n"));
            }
            logo.push_str(&format!("\n  Version {version}\n"));
            logo.push_str(&format!("{rule}\n"));
        }
    }
    println!("{logo}");
}

fn setup_display() {
    let mut show_header = true;
    let mut progress = true;

    // check if these arguments are set so we don't display header and color
    let args: Vec<String> = std::env::args().collect();
    let has = |flag: &str| args.iter().any(|arg| arg == flag);

    // ANSI escape codes fail to enable on old windows consoles
    let mut color = enable_ansi_support::enable_ansi_support().is_ok();

    // Machine readable console output stays free of header and color
    if has("--json-output") || has("--no-output") || has("--csv-output") {
        show_header = false;
        progress = false;
        color = false;
    }

    // Check if we are not in tty
    use std::io::IsTerminal;
    if !std::io::stdout().is_terminal() {
        color = false;
        progress = false;
    }

    if has("--no-color") {
        color = false;
    }

    if has("--no-progress") || has("-q") {
        progress = false;
    }

    // Set logger color and progress option
    let mut lock = crate::utils::statics::LOGGER.write().unwrap_or_else(|e| e.into_inner());
    lock.set_color(color);
    if progress {
        lock.create_progress();
    }
    drop(lock);

    // Display header
    if show_header {
        header(color);
    }
}

pub fn enterypoint() {
    // Setup display settings before displaying header
    setup_display();
    // Setup logger variables
    crate::utils::args::setup_logger();
    // Run the scan
    crate::commands::scan::initialize_scan();
}
