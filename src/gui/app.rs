// src/gui/app.rs
use std::{
    error::Error,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use eframe::egui;

use crate::{
    config::state::AppState,
    coordinator::Coordinator,
    model::{Category, PersistedState},
    page::Indicator,
    store::{FileStore, RecordStore, Subscription},
};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "CRM Board Extractor",
        options,
        Box::new(|cc| Ok(Box::new(App::new(AppState::default(), cc.egui_ctx.clone())))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    pub coordinator: Option<Coordinator<FileStore>>,

    // cached copy of the stored blob; refreshed on store change
    pub data: PersistedState,
    stale: Arc<AtomicBool>,
    _subscription: Option<Subscription>,

    // board detected for the loaded page
    pub detected: Option<Category>,

    // status line + transient extraction indicator
    pub status: Arc<Mutex<String>>,
    pub indicator: Indicator,
    pub running: bool,
}

impl App {
    pub fn new(state: AppState, ctx: egui::Context) -> Self {
        let stale = Arc::new(AtomicBool::new(false));
        let mut status = s!("Idle");

        let store = RecordStore::new(FileStore::default_location());
        let coordinator = match Coordinator::new(store) {
            Ok(c) => Some(c),
            Err(e) => {
                loge!("Store: cannot open: {}", e);
                status = format!("Storage unavailable: {e}");
                None
            }
        };

        let mut data = PersistedState::default();
        let mut subscription = None;
        if let Some(c) = &coordinator {
            match c.store().load() {
                Ok(d) => {
                    logf!("Store: loaded {} records", d.total());
                    data = d;
                }
                Err(e) => loge!("Store: load failed: {}", e),
            }
            let flag = stale.clone();
            subscription = Some(c.store().subscribe(move |_| {
                flag.store(true, Ordering::SeqCst);
                ctx.request_repaint();
            }));
        }

        Self {
            state,
            coordinator,
            data,
            stale,
            _subscription: subscription,
            detected: None,
            status: Arc::new(Mutex::new(status)),
            indicator: Indicator::default(),
            running: false,
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn category(&self) -> Category { self.state.gui.category }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Re-read the store if a write happened since the last frame.
    fn refresh_if_stale(&mut self) {
        if !self.stale.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(c) = &self.coordinator {
            match c.store().load() {
                Ok(d) => self.data = d,
                Err(e) => loge!("Store: reload failed: {}", e),
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_if_stale();
        self.indicator.tick(Instant::now());
        if let Some(after) = self.indicator.auto_hide_after() {
            ctx.request_repaint_after(after);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            crate::gui::components::header::draw(ui, self);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            crate::gui::components::footer::draw(ui, self);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::tabs::draw(ui, self);

            ui.separator();

            crate::gui::components::toolbar::draw(ui, self);

            ui.separator();

            crate::gui::components::record_list::draw(ui, self);
        });
    }
}
