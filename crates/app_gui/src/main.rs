mod app;
mod i18n;

use app::UiApp;
use eframe::NativeOptions;
use petlens_core::ClientConfig;

fn main() {
    tracing_subscriber::fmt::init();

    let config_path = ClientConfig::default_path();
    let config = ClientConfig::resolve(config_path.as_deref());
    tracing::info!("Using classification endpoint {}", config.endpoint_url);

    let app = match UiApp::new(config, config_path) {
        Ok(app) => app,
        Err(e) => {
            // an invalid override should not lock the user out
            tracing::error!("Invalid configuration, using defaults: {e:#}");
            match UiApp::new(ClientConfig::default(), None) {
                Ok(app) => app,
                Err(e) => {
                    eprintln!("Não foi possível iniciar o aplicativo: {e:#}");
                    std::process::exit(1);
                }
            }
        }
    };

    let options = NativeOptions::default();
    if let Err(e) = eframe::run_native(
        "PetLens",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    ) {
        eprintln!("Aplicativo encerrado com erro: {e}");
    }
}
