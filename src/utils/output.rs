use std::{
    fs::File,
    io::{
        BufWriter,
        Write
    },
    path::{
        Path,
        PathBuf
    }
};

use crate::utils::{
    bags::ProbeOutcome,
    constants::OUTPUT_SEPARATOR,
    errors::ScanError
};

/// Output file for matches. It is created before any target is dispatched so
/// an unwritable destination stops the scan early.
pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>
}

impl OutputSink {
    pub fn create(path: &Path) -> Result<OutputSink,ScanError> {
        if path.exists() {
            crate::LOGWARN!("Output file {} already exists and will be overwritten",path.display());
        }
        let file = File::create(path).map_err(|source| ScanError::OutputSink { path: path.to_path_buf(), source })?;
        Ok(OutputSink {
            path: path.to_path_buf(),
            writer: BufWriter::new(file)
        })
    }

    /// Writes every match in the given order and flushes. Returns the number of
    /// lines written.
    pub fn write_matches(&mut self,matches: &[ProbeOutcome]) -> Result<usize,ScanError> {
        let mut written = 0;
        for outcome in matches.iter().filter(|outcome| outcome.success()) {
            writeln!(self.writer,"{}",format_line(outcome)).map_err(|source| self.error(source))?;
            written += 1;
        }
        self.writer.flush().map_err(|source| self.error(source))?;
        Ok(written)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self,source: std::io::Error) -> ScanError {
        ScanError::OutputSink { path: self.path.clone(), source }
    }
}

pub fn format_line(outcome: &ProbeOutcome) -> String {
    format!("{}{}{}",outcome.url,OUTPUT_SEPARATOR,outcome.matched_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::bags::OutcomeKind;

    #[test]
    fn lines_pair_url_and_header() {
        let outcome = ProbeOutcome::matched("https://a.example",String::from("enable-beta"),200);
        assert_eq!(format_line(&outcome),"https://a.example - enable-beta");
    }

    #[test]
    fn only_matches_reach_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut sink = OutputSink::create(&path).unwrap();
        let outcomes = vec![
            ProbeOutcome::matched("https://a.example",String::from("enable-beta"),200),
            ProbeOutcome::unmatched("https://b.example",200,OutcomeKind::HeaderMissing),
            ProbeOutcome::matched("https://d.example",String::from("enable-alpha enable-gamma"),302)
        ];
        assert_eq!(sink.write_matches(&outcomes).unwrap(),2);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content,"https://a.example - enable-beta\nhttps://d.example - enable-alpha enable-gamma\n");
    }

    #[test]
    fn uncreatable_output_is_an_output_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let error = OutputSink::create(&path).err().unwrap();
        assert_eq!(error.exit_code(),4);
    }
}
