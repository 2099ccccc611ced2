use std::sync::Arc;

use regex::Regex;
use reqwest::{
    header::HeaderName,
    Method
};

/// One probe to perform. Everything but the url is shared with every other
/// item of the same scan.
#[derive(Clone, Debug)]
pub struct WorkItem {
    pub url: String,
    pub method: Method,
    pub header_name: HeaderName,
    pub pattern: Arc<Regex>
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutcomeKind {
    Matched,
    NoMatch,
    HeaderMissing,
    RequestFailed(String)
}

/// Result of one probe, produced exactly once per [`WorkItem`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub url: String,
    pub matched_text: String,
    pub status_code: Option<u16>,
    pub kind: OutcomeKind
}

impl ProbeOutcome {
    pub fn matched(url: &str,matched_text: String,status_code: u16) -> ProbeOutcome {
        ProbeOutcome {
            url: url.to_string(),
            matched_text,
            status_code: Some(status_code),
            kind: OutcomeKind::Matched
        }
    }

    pub fn unmatched(url: &str,status_code: u16,kind: OutcomeKind) -> ProbeOutcome {
        ProbeOutcome {
            url: url.to_string(),
            matched_text: String::new(),
            status_code: Some(status_code),
            kind
        }
    }

    pub fn failed(url: &str,reason: String) -> ProbeOutcome {
        ProbeOutcome {
            url: url.to_string(),
            matched_text: String::new(),
            status_code: None,
            kind: OutcomeKind::RequestFailed(reason)
        }
    }

    pub fn success(&self) -> bool {
        self.kind == OutcomeKind::Matched
    }

    /// Key/value list used when logging the outcome.
    pub fn to_kvl(&self) -> Vec<(String,String)> {
        let mut kvl = vec![(String::from("URL"),self.url.clone())];
        if let Some(code) = self.status_code {
            kvl.push((String::from("Status"),code.to_string()));
        }
        match &self.kind {
            OutcomeKind::Matched => kvl.push((String::from("Header"),self.matched_text.clone())),
            OutcomeKind::RequestFailed(reason) => kvl.push((String::from("Reason"),reason.clone())),
            OutcomeKind::NoMatch | OutcomeKind::HeaderMissing => {}
        }
        kvl
    }
}
