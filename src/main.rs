use std::path::Path;

use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use workout_planner::catalog::Catalog;
use workout_planner::config::{AppConfig, CONFIG_FILE};
use workout_planner::export::ExportOptions;
use workout_planner::ui::{planner_style, PlannerApp};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,workout_planner=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}

fn main() -> Result<(), eframe::Error> {
    init_tracing();

    let config = AppConfig::load(Path::new(CONFIG_FILE));
    let catalog = Catalog::load(&config.catalog_path);
    info!(
        exercises = catalog.exercises.len(),
        videos = catalog.videos.len(),
        output_dir = %config.output_dir.display(),
        "starting workout planner"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_title("Workout Planner"),
        ..Default::default()
    };
    let export = ExportOptions::from(&config);

    eframe::run_native(
        "Workout Planner",
        options,
        Box::new(move |cc| {
            let style = planner_style(&cc.egui_ctx.style());
            cc.egui_ctx.set_style(style);
            Ok(Box::new(PlannerApp::new(cc, catalog, export)))
        }),
    )
}
