//! `analyze` command: read a photo from disk and print the medicine report.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use carefind_core::{AnalysisReport, PrescriptionImage, ValidationError};
use carefind_rx::DocumentExtractionService;

/// Mime type from the file extension. Unknown extensions map to
/// `application/octet-stream`, which validation then rejects.
pub(crate) fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Read the photo at `path`, refusing files over `max_bytes` before loading
/// them.
pub(crate) fn read_image(
    path: &Path,
    mime_override: Option<&str>,
    max_bytes: usize,
) -> anyhow::Result<PrescriptionImage> {
    let len = std::fs::metadata(path)
        .with_context(|| format!("failed to read image file {}", path.display()))?
        .len();
    let size = usize::try_from(len).unwrap_or(usize::MAX);
    if size > max_bytes {
        return Err(ValidationError::ImageTooLarge {
            size,
            max: max_bytes,
        }
        .into());
    }

    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image file {}", path.display()))?;
    let mime = mime_override.map_or_else(|| guess_mime(path).to_string(), str::to_string);
    Ok(PrescriptionImage::new(bytes, mime))
}

/// # Errors
///
/// Returns the user-facing message for validation or extraction failures.
pub(crate) async fn run_analyze(
    service: &DocumentExtractionService,
    image: &PrescriptionImage,
    json: bool,
) -> anyhow::Result<()> {
    let report = service
        .analyze(image)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

pub(crate) fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    if report.medicines.is_empty() {
        out.push_str("No medicines identified.\n");
    }
    for (i, m) in report.medicines.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, m.name);
        let _ = writeln!(out, "   Purpose:   {}", m.purpose);
        let _ = writeln!(out, "   Contents:  {}", m.active_ingredients);
        if let Some(dosage) = &m.dosage_instructions {
            let _ = writeln!(out, "   Dosage:    {dosage}");
        }
        if let Some(warnings) = &m.warnings {
            let _ = writeln!(out, "   Warnings:  {warnings}");
        }
    }
    let _ = writeln!(out, "\nSummary: {}", report.clinical_summary);
    out.push_str(
        "\nThis is an automated reading. Confirm every medicine with your doctor or pharmacist.\n",
    );
    out
}
