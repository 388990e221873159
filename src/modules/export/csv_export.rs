//! CSV Export
//!
//! One row per catalogue entry; list fields are joined with "; ".

use std::path::Path;

use super::{ExportError, ExportKind};
use crate::app::PersonaFilter;
use crate::catalog::{self, COMPETITORS, PERSONAS, PROBLEMS, STORIES};

const LIST_SEPARATOR: &str = "; ";

pub fn write(path: &Path, kind: ExportKind, personas: PersonaFilter) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;

    let count = match kind {
        ExportKind::Personas => {
            wtr.write_record(["id", "title", "department", "responsibilities"])?;
            let mut written = 0;
            for persona in PERSONAS.iter().filter(|persona| personas.matches(persona)) {
                wtr.write_record([
                    persona.id.to_string(),
                    persona.title.to_string(),
                    persona.department.to_string(),
                    persona.responsibilities.join(LIST_SEPARATOR),
                ])?;
                written += 1;
            }
            written
        }
        ExportKind::Problems => {
            wtr.write_record([
                "id",
                "title",
                "severity",
                "affected_personas",
                "description",
                "metrics",
                "solution",
                "impact",
            ])?;
            for problem in PROBLEMS {
                let personas: Vec<&str> = problem
                    .affected_personas
                    .iter()
                    .map(|id| catalog::persona_title(id))
                    .collect();
                wtr.write_record([
                    problem.id.to_string(),
                    problem.title.to_string(),
                    problem.severity.as_str().to_string(),
                    personas.join(LIST_SEPARATOR),
                    problem.description.to_string(),
                    problem.metrics.join(LIST_SEPARATOR),
                    problem.solution.to_string(),
                    problem.impact.to_string(),
                ])?;
            }
            PROBLEMS.len()
        }
        ExportKind::Stories => {
            wtr.write_record(["company", "problem", "outcome", "savings", "testimonial"])?;
            for story in STORIES {
                wtr.write_record([
                    story.company,
                    story.problem,
                    story.outcome,
                    story.savings,
                    story.testimonial,
                ])?;
            }
            STORIES.len()
        }
        ExportKind::Competitors => {
            wtr.write_record(["name", "strengths", "weaknesses", "differentiators"])?;
            for competitor in COMPETITORS {
                wtr.write_record([
                    competitor.name.to_string(),
                    competitor.strengths.join(LIST_SEPARATOR),
                    competitor.weaknesses.join(LIST_SEPARATOR),
                    competitor.differentiators.join(LIST_SEPARATOR),
                ])?;
            }
            COMPETITORS.len()
        }
    };

    wtr.flush()?;
    Ok(count)
}
