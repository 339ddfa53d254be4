mod classify;
mod settings;
mod worker;

use crate::i18n::{Language, LanguagePreference};
use eframe::{App, Frame, egui};
use petlens_core::{
    ClientConfig, Classifier, HttpClassifier, Preview, SelectedFile, Submission,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use worker::WorkerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Panel {
    Classify,
    Settings,
}

pub(crate) struct HealthStatus {
    checked_at: chrono::DateTime<chrono::Local>,
    result: Result<String, String>,
}

pub struct UiApp {
    panel: Panel,
    config: ClientConfig,
    config_path: Option<PathBuf>,
    classifier: Arc<HttpClassifier>,
    language_preference: LanguagePreference,
    language: Language,

    selected: Option<SelectedFile>,
    preview: Preview,
    preview_texture: Option<egui::TextureHandle>,
    submission: Submission,

    events_tx: Sender<WorkerEvent>,
    events_rx: Receiver<WorkerEvent>,

    // settings form
    endpoint_input: String,
    health_input: String,
    timeout_input: String,
    health: Option<HealthStatus>,
    health_pending: bool,

    status: String,
    app_version: &'static str,
}

impl UiApp {
    pub fn new(config: ClientConfig, config_path: Option<PathBuf>) -> anyhow::Result<Self> {
        let classifier = Arc::new(HttpClassifier::new(&config)?);
        let language_preference = LanguagePreference::from_config(config.language);
        let (events_tx, events_rx) = mpsc::channel();
        Ok(Self {
            panel: Panel::Classify,
            endpoint_input: config.endpoint_url.clone(),
            health_input: config.health_url.clone(),
            timeout_input: config
                .timeout_secs
                .map(|s| s.to_string())
                .unwrap_or_default(),
            config,
            config_path,
            classifier,
            language_preference,
            language: language_preference.resolve(),
            selected: None,
            preview: Preview::new(),
            preview_texture: None,
            submission: Submission::new(),
            events_tx,
            events_rx,
            health: None,
            health_pending: false,
            status: String::new(),
            app_version: env!("PETLENS_VERSION"),
        })
    }

    pub(crate) fn tr(&self, pt: &'static str, en: &'static str) -> &'static str {
        self.language.pick(pt, en)
    }

    pub(crate) fn update_language_preference(&mut self, preference: LanguagePreference) {
        self.language_preference = preference;
        self.language = preference.resolve();
        self.config.language = preference.to_config();
        self.persist_config();
    }

    /// Handles a new selection; `None` means the user cancelled or cleared it.
    pub(crate) fn select_file(&mut self, ctx: &egui::Context, path: Option<PathBuf>) {
        self.selected = path.map(SelectedFile::new);
        match self.preview.select(self.selected.as_ref()) {
            Some(ticket) => {
                if let Some(file) = self.selected.clone() {
                    worker::spawn_decode(ctx, self.events_tx.clone(), ticket, file);
                }
            }
            None => self.preview_texture = None,
        }
    }

    pub(crate) fn submit(&mut self, ctx: &egui::Context) {
        let Some(id) = self.submission.submit(self.selected.as_ref()) else {
            return;
        };
        if let Some(file) = self.selected.clone() {
            let classifier: Arc<dyn Classifier> = self.classifier.clone();
            worker::spawn_classify(ctx, self.events_tx.clone(), classifier, id, file);
        }
    }

    pub(crate) fn check_health(&mut self, ctx: &egui::Context) {
        self.health_pending = true;
        worker::spawn_health_check(ctx, self.events_tx.clone(), self.classifier.clone());
    }

    /// Applies the settings form. On success the client is rebuilt so the
    /// next submission uses the new endpoint.
    pub(crate) fn apply_settings_form(&mut self) -> anyhow::Result<()> {
        let timeout_secs = match self.timeout_input.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("timeout must be a whole number of seconds"))?,
            ),
        };
        let candidate = ClientConfig {
            endpoint_url: self.endpoint_input.trim().to_string(),
            health_url: self.health_input.trim().to_string(),
            timeout_secs,
            ..self.config.clone()
        };
        let classifier = HttpClassifier::new(&candidate)?;
        self.classifier = Arc::new(classifier);
        self.config = candidate;
        self.persist_config();
        Ok(())
    }

    fn persist_config(&mut self) {
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(e) = self.config.save(path) {
            tracing::warn!("Could not save config to {}: {e:#}", path.display());
            self.status = format!("{}: {e}", self.tr("Falha ao salvar", "Save failed"));
        }
    }

    fn drain_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                WorkerEvent::Decoded { ticket, result } => {
                    if self.preview.finish_decode(ticket, result) {
                        self.refresh_preview_texture(ctx);
                    }
                }
                WorkerEvent::Classified { id, outcome } => {
                    self.submission.finish(id, outcome);
                }
                WorkerEvent::Health(result) => {
                    self.health_pending = false;
                    self.health = Some(HealthStatus {
                        checked_at: chrono::Local::now(),
                        result: result.map_err(|e| e.to_string()),
                    });
                }
            }
        }
    }

    fn refresh_preview_texture(&mut self, ctx: &egui::Context) {
        let Some(url) = self.preview.source() else {
            self.preview_texture = None;
            return;
        };
        let decoded = url
            .bytes()
            .and_then(|bytes| image::load_from_memory(&bytes).map_err(anyhow::Error::from));
        match decoded {
            Ok(img) => {
                let thumb = img.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE).to_rgba8();
                let size = [thumb.width() as usize, thumb.height() as usize];
                let color = egui::ColorImage::from_rgba_unmultiplied(size, thumb.as_raw());
                self.preview_texture =
                    Some(ctx.load_texture("preview", color, egui::TextureOptions::LINEAR));
            }
            Err(e) => {
                // the source is set but not displayable; leave the slot empty
                tracing::warn!("Preview image could not be rendered: {e:#}");
                self.preview_texture = None;
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            self.select_file(ctx, Some(path));
        }
    }
}

const PREVIEW_SIZE: u32 = 360;

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.drain_events(ctx);
        if self.panel == Panel::Classify {
            self.handle_dropped_files(ctx);
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let classify_label = self.tr("Classificar", "Classify");
                let settings_label = self.tr("Configurações", "Settings");
                ui.selectable_value(&mut self.panel, Panel::Classify, classify_label);
                ui.selectable_value(&mut self.panel, Panel::Settings, settings_label);
                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.panel {
            Panel::Classify => self.render_classify_panel(ctx, ui),
            Panel::Settings => self.render_settings_panel(ctx, ui),
        });
    }
}
