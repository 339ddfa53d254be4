//! Settings panel rendering for language, endpoint and connection check.

use super::UiApp;
use crate::i18n::{Language, LanguagePreference};
use eframe::egui;

impl UiApp {
    /// Renders the settings screen including endpoint editing and the API check.
    pub(super) fn render_settings_panel(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading(self.tr("Configurações", "Settings"));
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label(self.tr("Idioma", "Language"));
            let mut selected = self.language_preference;
            let option_label = |lang: LanguagePreference| match (self.language, lang) {
                (Language::Portuguese, LanguagePreference::System) => "Sistema (automático)",
                (Language::English, LanguagePreference::System) => "System (auto)",
                (Language::Portuguese, LanguagePreference::Portuguese) => "Português",
                (Language::English, LanguagePreference::Portuguese) => "Portuguese",
                (Language::Portuguese, LanguagePreference::English) => "Inglês",
                (Language::English, LanguagePreference::English) => "English",
            };
            egui::ComboBox::from_id_salt("language-select")
                .selected_text(option_label(selected))
                .show_ui(ui, |ui| {
                    for pref in [
                        LanguagePreference::System,
                        LanguagePreference::Portuguese,
                        LanguagePreference::English,
                    ] {
                        ui.selectable_value(&mut selected, pref, option_label(pref));
                    }
                });
            if selected != self.language_preference {
                self.update_language_preference(selected);
                self.status = self.tr("Idioma alterado.", "Language updated.").to_string();
            }
        });

        ui.add_space(12.0);
        ui.separator();
        ui.add_space(6.0);
        egui::Grid::new("endpoint-grid")
            .num_columns(2)
            .spacing([12.0, 6.0])
            .show(ui, |ui| {
                ui.label(self.tr("Endereço da API", "API endpoint"));
                ui.text_edit_singleline(&mut self.endpoint_input);
                ui.end_row();

                ui.label(self.tr("Endereço de teste", "Health check URL"));
                ui.text_edit_singleline(&mut self.health_input);
                ui.end_row();

                ui.label(self.tr("Tempo limite (s)", "Timeout (s)"));
                let hint = self.tr("sem limite", "none");
                ui.add(egui::TextEdit::singleline(&mut self.timeout_input).hint_text(hint));
                ui.end_row();
            });
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button(self.tr("Aplicar", "Apply")).clicked() {
                self.status = match self.apply_settings_form() {
                    Ok(()) => self.tr("Configuração aplicada.", "Settings applied.").to_string(),
                    Err(e) => format!(
                        "{}: {e:#}",
                        self.tr("Configuração inválida", "Invalid settings")
                    ),
                };
            }
            if ui
                .add_enabled(
                    !self.health_pending,
                    egui::Button::new(self.tr("Testar conexão", "Test connection")),
                )
                .clicked()
            {
                self.check_health(ctx);
            }
            if self.health_pending {
                ui.spinner();
            }
        });
        if let Some(health) = &self.health {
            let when = health.checked_at.format("%H:%M:%S");
            match &health.result {
                Ok(message) => ui.label(format!("[{when}] {message}")),
                Err(e) => ui.colored_label(egui::Color32::LIGHT_RED, format!("[{when}] {e}")),
            };
        }
        if let Some(path) = &self.config_path {
            ui.add_space(4.0);
            ui.weak(format!(
                "{}: {}",
                self.tr("Arquivo de configuração", "Config file"),
                path.display()
            ));
        }

        ui.add_space(16.0);
        ui.separator();
        ui.add_space(6.0);
        ui.heading(self.tr("Versões", "Versions"));
        ui.label(format!(
            "{}: {}",
            self.tr("Versão do app", "App version"),
            self.app_version
        ));
        ui.label(format!(
            "{}: {}",
            self.tr("Endpoint ativo", "Active endpoint"),
            self.classifier.endpoint()
        ));
    }
}
