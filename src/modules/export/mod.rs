//! Export Module
//!
//! Writes catalogue content to JSON or CSV.
//!
//! - 'e' key (or `:export csv`) exports the current section
//! - `sales-intel export` does the same from the command line
//! - Files default to <data dir>/exports/<kind>-<timestamp>.<ext>

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;

use crate::app::{App, ContentView, PersonaFilter};
use crate::config;
use crate::core::{Action, NotifyLevel};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportKind {
    Personas,
    Problems,
    Stories,
    Competitors,
}

impl ExportKind {
    pub fn name(&self) -> &'static str {
        match self {
            ExportKind::Personas => "personas",
            ExportKind::Problems => "problems",
            ExportKind::Stories => "stories",
            ExportKind::Competitors => "competitors",
        }
    }

    /// What the given view exports; the dashboard exports its problem list
    pub fn for_view(view: ContentView) -> Option<Self> {
        match view {
            ContentView::Dashboard | ContentView::Problems => Some(ExportKind::Problems),
            ContentView::Personas => Some(ExportKind::Personas),
            ContentView::Stories => Some(ExportKind::Stories),
            ContentView::Competitors => Some(ExportKind::Competitors),
            ContentView::UnderConstruction => None,
        }
    }
}

/// Get the export directory path, creating it if needed
pub fn export_dir() -> std::io::Result<PathBuf> {
    let export_dir = config::data_dir()
        .map(|dir| dir.join("exports"))
        .unwrap_or_else(|| PathBuf::from(".sales-intel").join("exports"));
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Generate a timestamped filename
pub fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Write one catalogue collection to `path`, returning the record count.
/// `personas` only narrows the persona collection.
pub fn write_catalog(
    path: &Path,
    kind: ExportKind,
    format: ExportFormat,
    personas: PersonaFilter,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Json => json_export::write(path, kind, personas),
        ExportFormat::Csv => csv_export::write(path, kind, personas),
    }
}

/// What `e` writes for the active section: the collection and the persona filter on screen
pub fn export_scope(app: &App) -> Option<(ExportKind, PersonaFilter)> {
    let kind = ExportKind::for_view(app.content_view())?;
    let personas = match kind {
        ExportKind::Personas => app.persona_filter,
        _ => PersonaFilter::All,
    };
    Some((kind, personas))
}

/// Export whatever the active section shows
pub fn export_current_section(app: &App, format: ExportFormat) -> Action {
    let Some((kind, personas)) = export_scope(app) else {
        return Action::Notify(
            "Nothing to export in this section".to_string(),
            NotifyLevel::Warn,
        );
    };

    let export_dir = match export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    let filename = generate_filename(kind.name(), format.extension());
    let path = export_dir.join(&filename);

    match write_catalog(&path, kind, format, personas) {
        Ok(count) => {
            tracing::info!(path = %path.display(), count, filter = personas.id(), "exported {}", kind.name());
            let scope = match personas {
                PersonaFilter::All => String::new(),
                PersonaFilter::Only(_) => format!(" ({})", personas.label()),
            };
            Action::Notify(
                format!("Exported {} {}{} to {}", count, kind.name(), scope, path.display()),
                NotifyLevel::Info,
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "export failed");
            Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_problems_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.csv");
        let count =
            write_catalog(&path, ExportKind::Problems, ExportFormat::Csv, PersonaFilter::All)
                .unwrap();
        assert_eq!(count, 3);

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("id,title,severity,affected_personas,description,metrics,solution,impact")
        );
        assert!(content.contains("CIO; Director of IT; VP of Finance; CEO/President (MSP)"));
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_json_personas_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("personas.json");
        let count =
            write_catalog(&path, ExportKind::Personas, ExportFormat::Json, PersonaFilter::All)
                .unwrap();
        assert_eq!(count, 5);

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let personas = value.as_array().unwrap();
        assert_eq!(personas[0]["id"], "cio");
        assert_eq!(personas[0]["responsibilities"][2], "Board reporting");
    }

    #[test]
    fn test_json_problem_resolves_persona_titles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("problems.json");
        write_catalog(&path, ExportKind::Problems, ExportFormat::Json, PersonaFilter::All)
            .unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value[1]["severity"], "high");
        assert_eq!(value[1]["affected_persona_titles"][1], "Director of Cloud Engineering");
    }

    #[test]
    fn test_persona_export_follows_filter() {
        let dir = tempfile::tempdir().unwrap();
        let only_finance = PersonaFilter::Only("vp_finance");

        let csv_path = dir.path().join("personas.csv");
        let count =
            write_catalog(&csv_path, ExportKind::Personas, ExportFormat::Csv, only_finance).unwrap();
        assert_eq!(count, 1);
        let content = fs::read_to_string(&csv_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("VP of Finance"));
        assert!(!content.contains("CIO"));

        let json_path = dir.path().join("personas.json");
        write_catalog(&json_path, ExportKind::Personas, ExportFormat::Json, only_finance).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["id"], "vp_finance");
    }

    #[test]
    fn test_export_scope_uses_on_screen_filter() {
        let mut app = App::new();
        app.set_section(crate::app::Section::Icp);
        app.set_persona_filter(PersonaFilter::Only("cio"));
        assert_eq!(
            export_scope(&app),
            Some((ExportKind::Personas, PersonaFilter::Only("cio")))
        );

        // Other collections ignore the persona filter
        app.set_section(crate::app::Section::Problems);
        assert_eq!(
            export_scope(&app),
            Some((ExportKind::Problems, PersonaFilter::All))
        );
    }

    #[test]
    fn test_placeholder_section_has_nothing_to_export() {
        let mut app = App::new();
        app.set_section(crate::app::Section::Scripts);
        assert_eq!(
            export_current_section(&app, ExportFormat::Json),
            Action::Notify(
                "Nothing to export in this section".to_string(),
                NotifyLevel::Warn
            )
        );
    }
}
