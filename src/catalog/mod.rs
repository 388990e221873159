//! Static sales-enablement catalogue
//!
//! Everything here is `'static` literal data. Nothing is created, updated or
//! deleted at runtime; the UI only selects and filters over these slices.

mod data;

use serde::Serialize;

pub use data::{
    COMPETITORS, PERSONAS, PROBLEMS, QUICK_ACTIONS, SEARCH_SUGGESTIONS, STAT_CARDS, STORIES,
    TARGET_INDUSTRIES,
};

/// A buyer or stakeholder role used to segment sales messaging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Persona {
    pub id: &'static str,
    pub title: &'static str,
    pub department: &'static str,
    pub responsibilities: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
        }
    }
}

/// A named pain point with the personas it hurts and the pitch that answers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub affected_personas: &'static [&'static str],
    pub description: &'static str,
    pub metrics: &'static [&'static str],
    pub solution: &'static str,
    pub impact: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuccessStory {
    pub company: &'static str,
    /// Problem id this story is filed under
    pub problem: &'static str,
    pub outcome: &'static str,
    pub savings: &'static str,
    pub testimonial: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompetitorProfile {
    pub name: &'static str,
    pub strengths: &'static [&'static str],
    pub weaknesses: &'static [&'static str],
    pub differentiators: &'static [&'static str],
}

/// Headline figure shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub value: &'static str,
    pub label: &'static str,
    pub caption: &'static str,
    pub trend: &'static str,
}

pub fn persona(id: &str) -> Option<&'static Persona> {
    PERSONAS.iter().find(|persona| persona.id == id)
}

pub fn problem(id: &str) -> Option<&'static Problem> {
    PROBLEMS.iter().find(|problem| problem.id == id)
}

/// Title for a persona id; a dangling id yields an empty string.
pub fn persona_title(id: &str) -> &'static str {
    persona(id).map(|persona| persona.title).unwrap_or("")
}

/// Problem references that point at no known persona, as `(problem, persona)`.
pub fn dangling_persona_refs() -> Vec<(&'static str, &'static str)> {
    PROBLEMS
        .iter()
        .flat_map(|problem| {
            problem
                .affected_personas
                .iter()
                .filter(|id| persona(id).is_none())
                .map(move |id| (problem.id, *id))
        })
        .collect()
}

pub fn stories_for(problem_id: &str) -> impl Iterator<Item = &'static SuccessStory> + '_ {
    STORIES.iter().filter(move |story| story.problem == problem_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_catalogue_sizes() {
        assert_eq!(PERSONAS.len(), 5);
        assert_eq!(PROBLEMS.len(), 3);
        assert_eq!(STORIES.len(), 3);
        assert_eq!(COMPETITORS.len(), 2);
        assert_eq!(SEARCH_SUGGESTIONS.len(), 4);
    }

    #[test]
    fn test_ids_are_unique() {
        let personas: BTreeSet<_> = PERSONAS.iter().map(|p| p.id).collect();
        assert_eq!(personas.len(), PERSONAS.len());
        let problems: BTreeSet<_> = PROBLEMS.iter().map(|p| p.id).collect();
        assert_eq!(problems.len(), PROBLEMS.len());
    }

    #[test]
    fn test_no_dangling_references() {
        assert!(dangling_persona_refs().is_empty());
        for story in STORIES {
            assert!(problem(story.problem).is_some(), "{}", story.company);
        }
    }

    #[test]
    fn test_persona_title_blank_for_unknown() {
        assert_eq!(persona_title("cio"), "CIO");
        assert_eq!(persona_title("nobody"), "");
    }

    #[test]
    fn test_stories_for_problem() {
        let companies: Vec<_> = stories_for("azure_costs").map(|s| s.company).collect();
        assert_eq!(
            companies,
            vec!["Fortune 500 Financial Services", "Leading MSP"]
        );
        assert_eq!(stories_for("security_compliance").count(), 0);
    }
}
