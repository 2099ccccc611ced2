use std::{
    fs::File,
    io::{
        self,
        BufRead,
        BufReader
    },
    path::Path
};

use crate::utils::errors::ScanError;

/// Reads the targets list, `-` reads from standard input.
pub fn load_targets(path: &Path) -> Result<Vec<String>,ScanError> {
    let to_error = |source: io::Error| ScanError::TargetSource { path: path.to_path_buf(), source };

    if path.as_os_str() == "-" {
        let stdin = io::stdin();
        return parse_targets(stdin.lock()).map_err(to_error);
    }

    let file = File::open(path).map_err(to_error)?;
    parse_targets(BufReader::new(file)).map_err(to_error)
}

/// One target per line, in input order. Blank lines and `#` comments are skipped.
pub fn parse_targets<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut targets: Vec<String> = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let target = line.trim();
        if target.is_empty() || target.starts_with('#') {
            continue;
        }
        targets.push(target.to_string());
    }
    Ok(targets)
}
