mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_runtime::data_source::DataSource;
use dashboard_runtime::session::DashboardSession;
use dashboard_ui::app::App;
use dashboard_ui::summary_view::render_summary;

use bootstrap::LogTarget;

fn main() -> Result<()> {
    let settings = Settings::load();

    let interactive = settings.export.is_none() && settings.view == "dashboard";
    bootstrap::setup_logging(
        &settings.log_level,
        LogTarget::choose(settings.log_file.as_deref(), interactive),
    )?;

    tracing::info!("Food Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, View: {}, Theme: {}",
        settings.data_path.display(),
        settings.view,
        settings.theme
    );

    let mut source = DataSource::new(&settings.data_path);
    let table = source
        .load()
        .with_context(|| format!("Cannot load orders from {}", settings.data_path.display()))?;

    let selection = settings.filter_selection();
    selection.validate(table)?;

    let mut session = DashboardSession::open(source, selection)?;

    if let Some(path) = &settings.export {
        let rows = session.export(path)?;
        println!("Exported {} rows to {}", rows, path.display());
        return Ok(());
    }

    match settings.view.as_str() {
        "summary" => {
            let vm = session.view_model()?;
            print!("{}", render_summary(&vm, &settings.data_path.display().to_string()));
        }
        "json" => {
            let vm = session.view_model()?;
            println!("{}", serde_json::to_string_pretty(&vm)?);
        }
        _ => {
            tracing::info!("Starting interactive dashboard...");
            let app = App::new(session, &settings.theme, settings.export_dir.clone())?;
            app.run()?;
        }
    }

    Ok(())
}
