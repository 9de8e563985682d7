//! Wire format of a model-produced report and the checks applied to it.
//!
//! The model is asked for `{ "medicines": [...], "summary": "..." }` with
//! `contents` holding the active ingredients. Anything that does not match is
//! rejected whole.

use carefind_core::{AnalysisReport, MedicineEntry};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ExtractionError;

/// Phrases in a summary that make an empty medicine list acceptable.
const NONE_FOUND_MARKERS: &[&str] = &[
    "no medicine",
    "no medication",
    "no drug",
    "none found",
    "none were found",
    "not a prescription",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMedicine {
    #[serde(default)]
    name: String,
    #[serde(default)]
    purpose: String,
    #[serde(default)]
    contents: String,
    #[serde(default)]
    dosage_instructions: Option<String>,
    #[serde(default)]
    warnings: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReport {
    medicines: Vec<RawMedicine>,
    #[serde(default)]
    summary: String,
}

/// `responseSchema` sent with every analysis request.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "medicines": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "purpose": { "type": "STRING" },
                        "contents": { "type": "STRING" },
                        "dosageInstructions": { "type": "STRING" },
                        "warnings": { "type": "STRING" }
                    },
                    "required": ["name", "purpose", "contents"]
                }
            },
            "summary": { "type": "STRING" }
        },
        "required": ["medicines", "summary"]
    })
}

/// Strip a surrounding markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening line.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse and validate model output into an [`AnalysisReport`].
///
/// Field values are kept as returned (trimmed only), so "unclear" markers
/// survive. Medicine order is preserved.
///
/// # Errors
///
/// Returns [`ExtractionError::Schema`] when the text is not JSON of the
/// expected shape, a required field is missing or blank, or the medicine list
/// is empty without the summary saying none were found.
pub fn parse_report(text: &str) -> Result<AnalysisReport, ExtractionError> {
    let raw: RawReport = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| ExtractionError::schema(format!("invalid report JSON: {e}")))?;

    let clinical_summary = raw.summary.trim().to_string();
    if clinical_summary.is_empty() {
        return Err(ExtractionError::schema("summary is missing or blank"));
    }

    if raw.medicines.is_empty() {
        let lowered = clinical_summary.to_lowercase();
        if !NONE_FOUND_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Err(ExtractionError::schema(
                "no medicines returned and the summary does not say none were found",
            ));
        }
    }

    let medicines = raw
        .medicines
        .into_iter()
        .enumerate()
        .map(|(i, m)| {
            let name = m.name.trim().to_string();
            let purpose = m.purpose.trim().to_string();
            let active_ingredients = m.contents.trim().to_string();
            for (field, value) in [
                ("name", &name),
                ("purpose", &purpose),
                ("contents", &active_ingredients),
            ] {
                if value.is_empty() {
                    return Err(ExtractionError::schema(format!(
                        "medicine {} has a blank {field}",
                        i + 1
                    )));
                }
            }
            Ok(MedicineEntry {
                name,
                purpose,
                active_ingredients,
                dosage_instructions: non_blank(m.dosage_instructions),
                warnings: non_blank(m.warnings),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AnalysisReport {
        medicines,
        clinical_summary,
    })
}
