// src/specs/board_type.rs
//
// Which category a board page shows. URL first, then page title, then the
// board's header text. Only pages on a recognised host are classified.
use scraper::Html;
use url::Url;

use crate::core::html::{Cascade, trimmed_text};
use crate::model::Category;

/// (category, URL fragments, title/header keywords)
type Keywords = (Category, &'static [&'static str], &'static [&'static str]);

const KEYWORDS: &[Keywords] = &[
    (Category::Contacts, &["/contacts", "contact"], &["contact"]),
    (Category::Deals, &["/deals", "/sales", "deal"], &["deal", "sales"]),
    (Category::Leads, &["/leads", "lead"], &["lead"]),
    (Category::Activities, &["/activities", "activit"], &["activit"]),
];

const HEADERS: &[&str] = &[
    r#"[data-testid="board-header-title"]"#,
    r#".board-header-title"#,
    r#"h1"#,
    r#"[class*="board-name"]"#,
    r#"[class*="board-title"]"#,
];

fn match_any(haystack: &str, pick: fn(&Keywords) -> &'static [&'static str]) -> Option<Category> {
    let haystack = haystack.to_lowercase();
    KEYWORDS
        .iter()
        .find(|entry| pick(entry).iter().any(|k| haystack.contains(k)))
        .map(|entry| entry.0)
}

pub struct BoardTypeClassifier {
    hosts: Vec<String>,
    headers: Cascade,
}

impl BoardTypeClassifier {
    pub fn new(hosts: &[String]) -> Self {
        Self {
            hosts: hosts.iter().map(|h| h.trim().to_ascii_lowercase()).collect(),
            headers: Cascade::new(HEADERS),
        }
    }

    /// Host equals, or is a subdomain of, one of the configured hosts.
    pub fn is_recognized(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else { return false };
        let Some(host) = parsed.host_str() else { return false };
        let host = host.to_ascii_lowercase();
        self.hosts
            .iter()
            .any(|h| host == *h || host.ends_with(&join!(".", h)))
    }

    /// `None` off-host, or on-host with no keyword anywhere.
    pub fn classify(&self, url: &str, title: &str, doc: &Html) -> Option<Category> {
        if !self.is_recognized(url) {
            logd!("Classify: {} is not a board host", url);
            return None;
        }

        if let Some(cat) = match_any(url, |e| e.1) {
            logd!("Classify: {} from URL", cat);
            return Some(cat);
        }
        if let Some(cat) = match_any(title, |e| e.2) {
            logd!("Classify: {} from title", cat);
            return Some(cat);
        }

        for header in self.headers.heads(doc.root_element()).into_iter().map(trimmed_text) {
            if let Some(cat) = match_any(&header, |e| e.2) {
                logd!("Classify: {} from header {:?}", cat, header);
                return Some(cat);
            }
        }
        None
    }
}
