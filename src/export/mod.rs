pub mod layout;
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use printpdf::image_crate::{self, DynamicImage};
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::ExportError;
use crate::models::Schedule;
use layout::{layout_schedule, DocumentLayout, LogoSize};

pub const OUTPUT_FILE: &str = "workout-schedule.pdf";

#[derive(Clone, Debug, Default)]
pub struct ExportOptions {
    pub logo_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl From<&AppConfig> for ExportOptions {
    fn from(config: &AppConfig) -> Self {
        ExportOptions {
            logo_path: config.logo_path.clone(),
            output_dir: config.output_dir.clone(),
        }
    }
}

pub struct ExportedPdf {
    pub bytes: Vec<u8>,
    pub layout: DocumentLayout,
}

fn load_logo(path: &Path) -> Result<DynamicImage, ExportError> {
    image_crate::open(path).map_err(|e| ExportError::Logo(format!("{}: {}", path.display(), e)))
}

/// Lays out and renders the schedule. A logo that fails to load is skipped.
pub fn export_schedule(
    schedule: &Schedule,
    options: &ExportOptions,
) -> Result<ExportedPdf, ExportError> {
    let logo = options
        .logo_path
        .as_deref()
        .and_then(|path| match load_logo(path) {
            Ok(image) => Some(image),
            Err(e) => {
                warn!("failed to load logo, using default offset: {}", e);
                None
            }
        });
    let logo_size = logo.as_ref().map(|image| LogoSize {
        width_px: image.width(),
        height_px: image.height(),
    });

    let layout = layout_schedule(schedule, logo_size);
    for table in &layout.tables {
        debug!(day = %table.day, rows = table.rows.len(), top = table.heading_y, "laid out table");
    }
    let bytes = pdf::render_pdf(&layout, schedule.display_title(), logo.as_ref())?;
    info!(
        pages = layout.pages.len(),
        tables = layout.tables.len(),
        links = layout.link_count(),
        "rendered schedule"
    );
    Ok(ExportedPdf { bytes, layout })
}

/// Renders the schedule and writes it to [`OUTPUT_FILE`] in the output directory.
pub fn export_to_file(schedule: &Schedule, options: &ExportOptions) -> Result<PathBuf, ExportError> {
    let pdf = export_schedule(schedule, options)?;
    fs::create_dir_all(&options.output_dir)?;
    let path = options.output_dir.join(OUTPUT_FILE);
    fs::write(&path, &pdf.bytes)?;
    info!(path = %path.display(), bytes = pdf.bytes.len(), "saved schedule");
    Ok(path)
}
