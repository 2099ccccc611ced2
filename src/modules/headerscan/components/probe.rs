use std::time::Duration;

use regex::Regex;
use reqwest::{
    blocking::{
        Client,
        ClientBuilder
    },
    header::{
        HeaderMap,
        HeaderName
    }
};

use crate::utils::{
    bags::{
        OutcomeKind,
        ProbeOutcome,
        WorkItem
    },
    errors::ScanError,
    traits::Prober
};

/// Sends one request per work item and checks a single response header.
///
/// The client is built once per scan and shared by every worker. Certificate
/// and hostname checks are off so broken TLS on a target never hides it.
pub struct HeaderProbe {
    client: Client
}

impl HeaderProbe {
    pub fn new(timeout: Duration) -> Result<HeaderProbe,ScanError> {
        let client = client_builder(timeout).build()?;
        Ok(HeaderProbe {
            client
        })
    }

    // Local test responders must not be routed through a proxy from the environment
    #[cfg(test)]
    pub(crate) fn direct(timeout: Duration) -> HeaderProbe {
        let client = client_builder(timeout)
            .no_proxy()
            .build()
            .unwrap();
        HeaderProbe {
            client
        }
    }
}

fn client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder()
        .timeout(timeout)
        .danger_accept_invalid_certs(true)
}

impl Prober for HeaderProbe {
    fn probe(&self,item: &WorkItem) -> ProbeOutcome {
        let response = match self.client.request(item.method.clone(),item.url.as_str()).send() {
            Ok(valid_response) => valid_response,
            Err(e) => return ProbeOutcome::failed(&item.url,e.to_string()),
        };

        let status = response.status().as_u16();

        match evaluate(response.headers(),&item.header_name,&item.pattern) {
            Ok(joined) => ProbeOutcome::matched(&item.url,joined,status),
            Err(kind) => {
                crate::LOGTRACE!("{} answered {} without a matching {} header",item.url,status,item.header_name);
                ProbeOutcome::unmatched(&item.url,status,kind)
            }
        }
    }
}

/// Joins every value of `header_name` with a single space and searches the
/// pattern in it. Returns the joined value on a match.
pub fn evaluate(headers: &HeaderMap,header_name: &HeaderName,pattern: &Regex) -> Result<String,OutcomeKind> {
    let values: Vec<String> = headers
        .get_all(header_name)
        .iter()
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .collect();

    if values.is_empty() {
        return Err(OutcomeKind::HeaderMissing);
    }

    let joined = values.join(" ");
    if pattern.is_match(&joined) {
        Ok(joined)
    } else {
        Err(OutcomeKind::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        modules::headerscan::testserver,
        utils::config::ScanConfiguration
    };
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str,&'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name,value) in pairs {
            map.append(*name,HeaderValue::from_static(*value));
        }
        map
    }

    fn flag() -> HeaderName {
        HeaderName::from_static("x-flag")
    }

    #[test]
    fn repeated_headers_are_joined_with_a_space() {
        let map = headers(&[("x-flag","enable-alpha"),("x-flag","enable-beta")]);
        let pattern = Regex::new("enable-beta").unwrap();
        assert_eq!(evaluate(&map,&flag(),&pattern),Ok(String::from("enable-alpha enable-beta")));
    }

    #[test]
    fn pattern_is_searched_not_anchored() {
        let map = headers(&[("x-flag","legacy;enable-beta;v2")]);
        let pattern = Regex::new("enable-.*").unwrap();
        assert_eq!(evaluate(&map,&flag(),&pattern),Ok(String::from("legacy;enable-beta;v2")));
    }

    #[test]
    fn missing_and_non_matching_headers_are_told_apart() {
        let pattern = Regex::new("enable-.*").unwrap();
        let other = headers(&[("server","nginx")]);
        assert_eq!(evaluate(&other,&flag(),&pattern),Err(OutcomeKind::HeaderMissing));
        let disabled = headers(&[("x-flag","disabled")]);
        assert_eq!(evaluate(&disabled,&flag(),&pattern),Err(OutcomeKind::NoMatch));
    }

    #[test]
    fn header_lookup_ignores_case_of_configured_name() {
        let config = ScanConfiguration::new("GET","X-FLAG","beta",5,1).unwrap();
        let map = headers(&[("x-flag","enable-beta")]);
        assert!(evaluate(&map,&config.header_name,&config.pattern).is_ok());
    }

    #[test]
    fn probe_reports_matching_header_and_status() {
        let url = testserver::serve("201 Created",&[("X-Flag","enable-beta"),("X-Flag","stable")]);
        let config = ScanConfiguration::new("GET","x-flag","enable-.*",5,1).unwrap();
        let prober = HeaderProbe::direct(config.timeout);

        let outcome = prober.probe(&config.work_item(&url));
        assert!(outcome.success());
        assert_eq!(outcome.matched_text,"enable-beta stable");
        assert_eq!(outcome.status_code,Some(201));
        assert_eq!(outcome.url,url);
    }

    #[test]
    fn probe_without_header_is_not_a_success() {
        let url = testserver::serve("200 OK",&[("Server","test")]);
        let config = ScanConfiguration::new("HEAD","X-Flag","enable-.*",5,1).unwrap();
        let prober = HeaderProbe::direct(config.timeout);

        let outcome = prober.probe(&config.work_item(&url));
        assert!(!outcome.success());
        assert_eq!(outcome.kind,OutcomeKind::HeaderMissing);
        assert_eq!(outcome.status_code,Some(200));
    }

    #[test]
    fn self_signed_tls_target_is_still_matched() {
        // Certificate is issued for localhost, the url uses the bare address
        let url = testserver::serve_tls("200 OK",&[("X-Flag","enable-beta")]);
        assert!(url.starts_with("https://127.0.0.1:"));
        let config = ScanConfiguration::new("GET","X-Flag","enable-.*",5,1).unwrap();
        let prober = HeaderProbe::direct(config.timeout);

        let outcome = prober.probe(&config.work_item(&url));
        assert_eq!(outcome.kind,OutcomeKind::Matched);
        assert_eq!(outcome.matched_text,"enable-beta");
        assert_eq!(outcome.status_code,Some(200));
    }

    #[test]
    fn refused_connection_is_a_local_failure() {
        let url = testserver::refused_url();
        let config = ScanConfiguration::new("GET","X-Flag","enable-.*",5,1).unwrap();
        let prober = HeaderProbe::direct(config.timeout);

        let outcome = prober.probe(&config.work_item(&url));
        assert!(!outcome.success());
        assert!(matches!(outcome.kind,OutcomeKind::RequestFailed(_)));
        assert_eq!(outcome.status_code,None);
        assert!(outcome.matched_text.is_empty());
    }

    #[test]
    fn malformed_url_is_a_local_failure() {
        let config = ScanConfiguration::new("GET","X-Flag","enable-.*",5,1).unwrap();
        let prober = HeaderProbe::direct(config.timeout);

        let outcome = prober.probe(&config.work_item("not a url"));
        assert!(matches!(outcome.kind,OutcomeKind::RequestFailed(_)));
    }

    #[test]
    fn client_builds_for_scan_timeout() {
        assert!(HeaderProbe::new(Duration::from_secs(10)).is_ok());
    }

    #[test]
    fn silent_server_hits_the_timeout() {
        let url = testserver::silent_url();
        let config = ScanConfiguration::new("GET","X-Flag","enable-.*",1,1).unwrap();
        let prober = HeaderProbe::direct(config.timeout);

        let started = std::time::Instant::now();
        let outcome = prober.probe(&config.work_item(&url));
        assert!(matches!(outcome.kind,OutcomeKind::RequestFailed(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
