//! Fetching conjugation pages and scraping them into a conjugation table

use crate::error::FetchError;
use crate::extract::extract_conjugations;
use crate::table::{ConjugationTable, VerbConjugations};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use reqwest::blocking::{Client, Request};
use reqwest::StatusCode;
use std::time::Duration;

/// WordReference's Spanish conjugator; the infinitive goes in the `v` query parameter
pub const CONJUGATOR_URL: &str = "https://www.wordreference.com/conj/EsVerbs.aspx";

/// Source of raw conjugation pages
pub trait Fetcher {
    /// Return the markup of the conjugation page for `verb`
    fn fetch(&self, verb: &str) -> Result<String, FetchError>;
}

/// Blocking HTTP fetcher with a per-request timeout
pub struct HttpFetcher {
    client: Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn request_for(&self, verb: &str) -> reqwest::Result<Request> {
        self.client.get(&self.base_url).query(&[("v", verb)]).build()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, verb: &str) -> Result<String, FetchError> {
        let network = |source| FetchError::Network {
            verb: verb.to_string(),
            source,
        };

        let request = self.request_for(verb).map_err(network)?;
        info!("GET {}", request.url());
        let response = self.client.execute(request).map_err(network)?;

        match response.status() {
            StatusCode::OK => response.text().map_err(network),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound {
                verb: verb.to_string(),
            }),
            status => Err(FetchError::Status {
                verb: verb.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

/// Fetch and extract one verb. Fetch errors propagate; no retry.
pub fn scrape_verb(fetcher: &dyn Fetcher, verb: &str) -> Result<VerbConjugations, FetchError> {
    let html = fetcher.fetch(verb)?;
    let conjugations = extract_conjugations(&html);
    if conjugations.is_empty() {
        warn!("No conjugation tables found for \"{}\"", verb);
    }
    Ok(conjugations)
}

/// Scrape every verb, in order. The first fetch failure aborts the batch.
pub fn scrape_table(
    fetcher: &dyn Fetcher,
    verbs: &[String],
    quiet: bool,
) -> Result<ConjugationTable, FetchError> {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(verbs.len() as u64)
    };
    if let Ok(style) = ProgressStyle::default_bar().template("{spinner} [{pos}/{len}] {msg}") {
        pb.set_style(style);
    }

    let mut table = ConjugationTable::new();
    for verb in verbs {
        pb.set_message(format!("conjugando {}", verb));
        let conjugations = match scrape_verb(fetcher, verb) {
            Ok(conjugations) => conjugations,
            Err(e) => {
                pb.abandon();
                return Err(e);
            }
        };
        table.insert(verb.clone(), conjugations);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(table)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests for scraping
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod scrape_tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves canned pages; unknown verbs are "not found"
    pub(crate) struct MapFetcher {
        pub pages: HashMap<String, String>,
        pub requested: RefCell<Vec<String>>,
    }

    impl MapFetcher {
        pub fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(verb, html)| (verb.to_string(), html.to_string()))
                    .collect(),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl Fetcher for MapFetcher {
        fn fetch(&self, verb: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(verb.to_string());
            self.pages.get(verb).cloned().ok_or_else(|| FetchError::NotFound {
                verb: verb.to_string(),
            })
        }
    }

    pub(crate) const COMER_PAGE: &str = "<html><body>\
        <div class=\"aa\"><h4>Indicativo</h4>\
        <table class=\"neoConj\"><tr><th>presenteⓘ</th></tr>\
        <tr><th scope=\"row\">yo</th><td>como</td></tr>\
        <tr><th scope=\"row\">tú</th><td>comes</td></tr></table>\
        <table class=\"neoConj\"><tr><th>futuro</th></tr>\
        <tr><th scope=\"row\">yo</th><td>comeré</td></tr></table>\
        </div>\
        <div class=\"aa\"><h4>Subjuntivo</h4>\
        <table class=\"neoConj\"><tr><th>presente</th></tr>\
        <tr><th scope=\"row\">yo</th><td>coma</td></tr></table>\
        </div></body></html>";

    #[test]
    fn scrape_verb_extracts_page() {
        let fetcher = MapFetcher::new(&[("comer", COMER_PAGE)]);
        let conjugations = scrape_verb(&fetcher, "comer").unwrap();
        assert_eq!(conjugations["presente"]["yo"], "como");
        assert_eq!(conjugations["futuro"]["yo"], "comeré");
        assert_eq!(conjugations["subjuntivo presente"]["yo"], "coma");
    }

    #[test]
    fn scrape_verb_propagates_fetch_error() {
        let fetcher = MapFetcher::new(&[]);
        let err = scrape_verb(&fetcher, "xyz").unwrap_err();
        assert!(matches!(err, FetchError::NotFound { verb } if verb == "xyz"));
    }

    #[test]
    fn scrape_verb_empty_page_is_empty_not_error() {
        let fetcher = MapFetcher::new(&[("vacío", "")]);
        assert!(scrape_verb(&fetcher, "vacío").unwrap().is_empty());
    }

    #[test]
    fn scrape_table_fetches_every_verb_in_order() {
        let fetcher = MapFetcher::new(&[("comer", COMER_PAGE), ("raro", "<p>nada</p>")]);
        let verbs = vec!["raro".to_string(), "comer".to_string()];
        let table = scrape_table(&fetcher, &verbs, true).unwrap();

        assert_eq!(*fetcher.requested.borrow(), verbs);
        assert_eq!(table.len(), 2);
        assert!(table["raro"].is_empty());
        assert_eq!(table["comer"]["presente"]["tú"], "comes");
    }

    #[test]
    fn scrape_table_stops_at_first_failure() {
        let fetcher = MapFetcher::new(&[("comer", COMER_PAGE)]);
        let verbs = vec!["perdido".to_string(), "comer".to_string()];
        assert!(scrape_table(&fetcher, &verbs, true).is_err());
        assert_eq!(fetcher.requested.borrow().len(), 1);
    }

    fn url_for(verb: &str) -> String {
        let fetcher = HttpFetcher::new(CONJUGATOR_URL, Duration::from_secs(5)).unwrap();
        fetcher.request_for(verb).unwrap().url().to_string()
    }

    #[test]
    fn http_fetcher_puts_verb_in_query() {
        assert_eq!(
            url_for("hablar"),
            "https://www.wordreference.com/conj/EsVerbs.aspx?v=hablar"
        );
    }

    #[test]
    fn http_fetcher_encodes_query_characters() {
        assert_eq!(
            url_for("a&b#c?d"),
            "https://www.wordreference.com/conj/EsVerbs.aspx?v=a%26b%23c%3Fd"
        );
        assert!(url_for("vacío").ends_with("?v=vac%C3%ADo"));
    }

    // ── HttpFetcher against a one-shot local server ──

    /// Answer a single request with `status` and `body`, then close
    fn serve_once(status: &str, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/conj/EsVerbs.aspx", listener.local_addr().unwrap());
        let status = status.to_string();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            write!(
                stream,
                "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            )
            .unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        (base_url, handle)
    }

    fn fetch_from(base_url: &str, verb: &str) -> Result<String, FetchError> {
        HttpFetcher::new(base_url, Duration::from_secs(5))
            .unwrap()
            .fetch(verb)
    }

    #[test]
    fn http_ok_returns_body() {
        let (base_url, server) = serve_once("200 OK", "<p>x</p>");
        assert_eq!(fetch_from(&base_url, "hablar").unwrap(), "<p>x</p>");

        let head = server.join().unwrap();
        assert!(head.starts_with("GET /conj/EsVerbs.aspx?v=hablar HTTP/1.1"));
    }

    #[test]
    fn http_404_is_not_found() {
        let (base_url, server) = serve_once("404 Not Found", "");
        let err = fetch_from(&base_url, "hablar").unwrap_err();
        assert!(matches!(err, FetchError::NotFound { verb } if verb == "hablar"));
        server.join().unwrap();
    }

    #[test]
    fn http_other_status_keeps_code() {
        let (base_url, server) = serve_once("500 Internal Server Error", "oops");
        let err = fetch_from(&base_url, "hablar").unwrap_err();
        assert!(matches!(err, FetchError::Status { verb, status: 500 } if verb == "hablar"));
        server.join().unwrap();
    }

    #[test]
    fn http_silent_server_times_out_as_network_error() {
        // connections queue in the backlog but nothing ever answers
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/", listener.local_addr().unwrap());

        let fetcher = HttpFetcher::new(&base_url, Duration::from_millis(200)).unwrap();
        let err = fetcher.fetch("hablar").unwrap_err();
        assert!(matches!(err, FetchError::Network { verb, .. } if verb == "hablar"));
        drop(listener);
    }
}
