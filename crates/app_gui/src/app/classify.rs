//! The upload form: picker, preview, submit button, spinner and result.

use super::{PREVIEW_SIZE, UiApp};
use eframe::egui;
use petlens_core::PreviewVisibility;
use rfd::FileDialog;

impl UiApp {
    pub(super) fn render_classify_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading(self.tr("Cão ou gato?", "Dog or cat?"));
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui
                .button(self.tr("Escolher imagem...", "Choose image..."))
                .clicked()
            {
                // cancelling the dialog clears the selection
                let picked = FileDialog::new()
                    .add_filter("Image", &["jpg", "jpeg", "png", "gif", "webp", "bmp"])
                    .pick_file();
                self.select_file(ctx, picked);
            }
            match &self.selected {
                Some(file) => ui.label(&file.name),
                None => ui.weak(self.tr("Nenhum arquivo selecionado", "No file selected")),
            };
        });

        ui.add_space(8.0);
        self.render_preview(ui);
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let loading = self.submission.is_loading();
            if ui
                .add_enabled(
                    !loading,
                    egui::Button::new(self.tr("Classificar imagem", "Classify image")),
                )
                .clicked()
            {
                self.submit(ctx);
            }
            if loading {
                ui.spinner();
            }
        });

        ui.add_space(8.0);
        self.render_result(ui);
    }

    fn render_preview(&self, ui: &mut egui::Ui) {
        let side = PREVIEW_SIZE as f32;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_size(egui::vec2(side, side));
            ui.centered_and_justified(|ui| match self.preview.visibility() {
                PreviewVisibility::Placeholder => {
                    ui.weak(self.language.placeholder());
                }
                PreviewVisibility::Image => {
                    if let Some(tex) = &self.preview_texture {
                        ui.add(egui::Image::new(tex).max_size(egui::vec2(side, side)));
                    }
                }
            });
        });
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        let rendered = self.submission.result().render(self.language);
        if rendered.is_empty() {
            return;
        }
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            ui.label(&rendered.lead);
            if let Some(emphasis) = &rendered.emphasis {
                ui.label(egui::RichText::new(emphasis).strong());
            }
        });
        ui.add_space(4.0);
        if ui.small_button(self.tr("Copiar", "Copy")).clicked() {
            match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(rendered.text())) {
                Ok(()) => tracing::debug!("Result copied to clipboard"),
                Err(e) => tracing::warn!("Clipboard unavailable: {e}"),
            }
        }
    }
}
