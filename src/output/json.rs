use serde_json::json;

use crate::collect::WindowDay;
use crate::config::Config;
use crate::consts::DATE_FORMAT;
use crate::core::{DateWindow, UpdatedFileRecord};
use crate::orchestrator::RunOutcome;

fn to_pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

pub(crate) fn output_window_json(window: &DateWindow, days: &[WindowDay]) -> String {
    to_pretty(&json!({
        "start": window.first_day().format(DATE_FORMAT).to_string(),
        "end": window.today().format(DATE_FORMAT).to_string(),
        "days": days,
    }))
}

pub(crate) fn output_updated_json(files: &[UpdatedFileRecord]) -> String {
    to_pretty(&json!(files))
}

/// The config with its API key masked
pub(crate) fn output_config_json(config: &Config) -> String {
    to_pretty(&json!(config.redacted()))
}

pub(crate) fn output_run_json(outcome: &RunOutcome) -> String {
    let value = match outcome {
        RunOutcome::Created { path, notes } => {
            json!({ "status": "created", "path": path, "notes": notes })
        }
        RunOutcome::Overwritten { path, notes } => {
            json!({ "status": "overwritten", "path": path, "notes": notes })
        }
        RunOutcome::Inserted { path, notes } => {
            json!({ "status": "inserted", "path": path, "notes": notes })
        }
        RunOutcome::DryRun {
            path,
            notes,
            content,
        } => json!({
            "status": "dry_run",
            "path": path,
            "notes": notes,
            "content": content,
        }),
    };
    to_pretty(&value)
}
