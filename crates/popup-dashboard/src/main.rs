mod bootstrap;

use anyhow::Result;
use dashboard_core::settings::{default_audio_dir, Settings};
use dashboard_runtime::player::{SonificationService, WavToneSink};
use dashboard_runtime::session::DashboardSession;
use dashboard_ui::app::{App, ViewMode};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    // The dashboard owns the terminal, so its logs go to a file by default.
    let log_file = settings
        .log_file
        .clone()
        .or_else(|| (settings.view == "dashboard").then(bootstrap::default_log_file));
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Pop-Up Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "CSV: {}, View: {}, Theme: {}",
        settings.csv.display(),
        settings.view,
        settings.theme
    );

    let mut session = DashboardSession::new(settings.csv.clone());
    if let Err(e) = session.load() {
        tracing::error!(error = %e, "initial load failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }

    match ViewMode::from_name(&settings.view) {
        None => {
            if let Some(analysis) = session.analysis() {
                println!("{}", serde_json::to_string_pretty(analysis)?);
            }
        }

        Some(ViewMode::Table) => {
            tracing::info!("Rendering brand table...");
            let app = App::new(
                &settings.theme,
                ViewMode::Table,
                session,
                settings.note_duration(),
            );
            app.run_table().await?;
        }

        Some(ViewMode::Dashboard) => {
            tracing::info!("Starting interactive dashboard...");

            let audio_dir = settings.audio_dir.clone().unwrap_or_else(default_audio_dir);
            let service = SonificationService::new(settings.sample_rate, WavToneSink::new(audio_dir));
            let (tones, events, handle) = service.start();

            let app = App::new(
                &settings.theme,
                ViewMode::Dashboard,
                session,
                settings.note_duration(),
            )
            .with_player(tones);

            // Ctrl+C raised outside raw mode would otherwise skip the abort.
            tokio::select! {
                result = app.run_dashboard(Some(events)) => {
                    handle.abort();
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; stopping playback service");
                    handle.abort();
                }
            }
        }
    }

    Ok(())
}
