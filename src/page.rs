// src/page.rs
//
// A loaded board page and the agent that answers requests about it.
use std::{
    fs,
    path::Path,
    time::{Duration, Instant},
};

use scraper::Html;

use crate::{
    config::consts::{INDICATOR_ERROR_MS, INDICATOR_SUCCESS_MS},
    config::options::ExtractOptions,
    core::html::{compile, text},
    error::Result,
    messages::{Handler, Request, Response},
    model::Category,
    progress::{NullProgress, Progress},
    scrape::{self, ExtractOutcome},
    specs::board_type::BoardTypeClassifier,
};

/// Rendered page source plus where it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub html: String,
}

impl PageSnapshot {
    /// Empty `title` is filled from the document's `<title>`.
    pub fn new(url: impl Into<String>, title: impl Into<String>, html: impl Into<String>) -> Self {
        let html = html.into();
        let mut title = title.into();
        if title.trim().is_empty() {
            title = document_title(&html).unwrap_or_default();
        }
        Self { url: url.into(), title, html }
    }

    /// Read a saved page. `url` defaults to the file's `file://` URL.
    pub fn load(path: &Path, url: Option<&str>, title: Option<&str>) -> Result<Self> {
        let html = fs::read_to_string(path)?;
        let url = match url {
            Some(u) => s!(u),
            None => url::Url::from_file_path(fs::canonicalize(path)?)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| path.display().to_string()),
        };
        logd!("Page: loaded {} ({} bytes)", path.display(), html.len());
        Ok(Self::new(url, title.unwrap_or(""), html))
    }

    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

fn document_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let sel = compile("title")?;
    doc.select(&sel).next().map(text).filter(|t| !t.is_empty())
}

/* ---------------- Indicator ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndicatorState {
    Hidden,
    Loading,
    Success(String),
    Error(String),
}

/// On-page extraction status. Success and error hide themselves.
#[derive(Clone, Debug)]
pub struct Indicator {
    state: IndicatorState,
    since: Instant,
}

impl Default for Indicator {
    fn default() -> Self {
        Self { state: IndicatorState::Hidden, since: Instant::now() }
    }
}

impl Indicator {
    pub fn state(&self) -> &IndicatorState {
        &self.state
    }

    pub fn show(&mut self, state: IndicatorState) {
        self.state = state;
        self.since = Instant::now();
    }

    pub fn hide(&mut self) {
        self.show(IndicatorState::Hidden);
    }

    pub fn auto_hide_after(&self) -> Option<Duration> {
        match self.state {
            IndicatorState::Success(_) => Some(Duration::from_millis(INDICATOR_SUCCESS_MS)),
            IndicatorState::Error(_) => Some(Duration::from_millis(INDICATOR_ERROR_MS)),
            _ => None,
        }
    }

    /// Advance time; hides when the current state has expired.
    pub fn tick(&mut self, now: Instant) {
        if let Some(after) = self.auto_hide_after() {
            if now.duration_since(self.since) >= after {
                self.hide();
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self.state {
            IndicatorState::Hidden => "",
            IndicatorState::Loading => "Extracting data...",
            IndicatorState::Success(_) => "Extraction complete!",
            IndicatorState::Error(_) => "Extraction failed",
        }
    }

    pub fn message(&self) -> &str {
        match &self.state {
            IndicatorState::Hidden => "",
            IndicatorState::Loading => "Please wait while we extract the data",
            IndicatorState::Success(m) | IndicatorState::Error(m) => m,
        }
    }
}

/* ---------------- Agent ---------------- */

/// Page-side request handler: extracts on demand, announces its board type.
pub struct PageAgent {
    page: PageSnapshot,
    options: ExtractOptions,
    classifier: BoardTypeClassifier,
    pub indicator: Indicator,
}

impl PageAgent {
    pub fn new(page: PageSnapshot, options: ExtractOptions) -> Self {
        let classifier = BoardTypeClassifier::new(&options.hosts);
        Self { page, options, classifier, indicator: Indicator::default() }
    }

    pub fn page(&self) -> &PageSnapshot {
        &self.page
    }

    pub fn detect(&self) -> Option<Category> {
        self.classifier.classify(&self.page.url, &self.page.title, &self.page.document())
    }

    /// The load-time announcement sent to the coordinator.
    pub fn announce(&self) -> Request {
        Request::BoardDetected { board_type: self.detect() }
    }

    pub fn extract(&mut self, progress: &mut dyn Progress) -> ExtractOutcome {
        self.indicator.show(IndicatorState::Loading);
        let outcome = scrape::extract_board(&self.page.document(), &self.options, progress);
        self.indicator.show(match &outcome {
            ExtractOutcome::Success { message, .. } => IndicatorState::Success(message.clone()),
            ExtractOutcome::Failure { message } => IndicatorState::Error(message.clone()),
        });
        outcome
    }
}

impl Handler for PageAgent {
    fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::ExtractData => {
                let outcome = self.extract(&mut NullProgress);
                Response::extracted(&outcome, self.options.mode)
            }
            other => {
                logd!("Page: ignoring {:?}", other);
                Response::fail("Unknown action")
            }
        }
    }
}
