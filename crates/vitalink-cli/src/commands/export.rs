use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use vitalink_core::export::{resolve_export_path, save_export, ExportFormat};

use crate::app::App;
use crate::output;

pub async fn export(app: &App, format: ExportFormat, out: Option<PathBuf>) -> Result<()> {
    app.require_login()?;
    let bytes = app.client.export_records(format).await?;

    let target = out.unwrap_or_else(|| PathBuf::from("."));
    let path = resolve_export_path(&target, format, Local::now().date_naive());
    save_export(&path, &bytes)?;

    output::success(&format!("Saved {} export to {}", format, path.display()));
    Ok(())
}
