// src/gui/actions/extract.rs
use std::path::Path;

use crate::{
    config::consts::MSG_NO_PAGE,
    gui::{app::App, progress::GuiProgress},
    messages::{Handler, Response},
    page::{PageAgent, PageSnapshot},
};

pub fn extract(app: &mut App) {
    let path = app.state.gui.page_path.trim().to_string();
    let url = app.state.gui.page_url.trim().to_string();
    let url = (!url.is_empty()).then_some(url.as_str());

    if path.is_empty() {
        app.status(MSG_NO_PAGE);
        return;
    }

    logf!("Extract: Begin page={} mode={:?}", path, app.state.options.extract.mode);
    app.running = true;

    let snapshot = match PageSnapshot::load(Path::new(&path), url, None) {
        Ok(s) => s,
        Err(e) => {
            loge!("Extract: cannot read {}: {}", path, e);
            app.status(format!("Error: {e}"));
            app.running = false;
            return;
        }
    };

    let mut agent = PageAgent::new(snapshot, app.state.options.extract.clone());
    app.detected = agent.detect();

    let Some(coordinator) = app.coordinator.as_mut() else {
        app.status("Storage unavailable");
        app.running = false;
        return;
    };
    coordinator.handle(agent.announce());

    // Run once with live progress, then hand the result to the coordinator.
    let mut prog = GuiProgress::new(app.status.clone());
    let outcome = agent.extract(&mut prog);
    let mut responder = Replay(Response::extracted(&outcome, app.state.options.extract.mode));
    let response = coordinator.trigger(Some(&mut responder as &mut dyn Handler));

    app.indicator = agent.indicator.clone();
    if response.success {
        logf!("Extract: OK {}", response.text());
        app.status(response.text());
    } else {
        loge!("Extract: failed: {}", response.text());
        app.status(format!("✗ {}", response.text()));
    }
    app.running = false;
}

/// Answers the coordinator's extract request with a result computed up front.
struct Replay(Response);

impl Handler for Replay {
    fn handle(&mut self, _request: crate::messages::Request) -> Response {
        self.0.clone()
    }
}
