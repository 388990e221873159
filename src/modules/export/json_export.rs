//! JSON Export
//!
//! Writes catalogue collections as pretty-printed JSON arrays.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::{ExportError, ExportKind};
use crate::app::PersonaFilter;
use crate::catalog::{self, Persona, Problem, COMPETITORS, PERSONAS, PROBLEMS, STORIES};

/// Problem plus the resolved persona titles, so the file reads on its own
#[derive(Serialize)]
struct ExportableProblem {
    #[serde(flatten)]
    problem: &'static Problem,
    affected_persona_titles: Vec<&'static str>,
}

impl From<&'static Problem> for ExportableProblem {
    fn from(problem: &'static Problem) -> Self {
        Self {
            problem,
            affected_persona_titles: problem
                .affected_personas
                .iter()
                .map(|id| catalog::persona_title(id))
                .collect(),
        }
    }
}

pub fn write(path: &Path, kind: ExportKind, personas: PersonaFilter) -> Result<usize, ExportError> {
    let (json, count) = match kind {
        ExportKind::Personas => {
            let selected: Vec<&Persona> =
                PERSONAS.iter().filter(|persona| personas.matches(persona)).collect();
            (serde_json::to_string_pretty(&selected)?, selected.len())
        }
        ExportKind::Problems => {
            let exportable: Vec<ExportableProblem> =
                PROBLEMS.iter().map(ExportableProblem::from).collect();
            (serde_json::to_string_pretty(&exportable)?, PROBLEMS.len())
        }
        ExportKind::Stories => (serde_json::to_string_pretty(STORIES)?, STORIES.len()),
        ExportKind::Competitors => (serde_json::to_string_pretty(COMPETITORS)?, COMPETITORS.len()),
    };

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(count)
}
