//! App state transitions driven the way the event loop drives them

use sales_intel::app::{App, ContentView, Focus, InputMode, PersonaFilter, Section};
use sales_intel::catalog::PERSONAS;
use sales_intel::core::{Action, Command};

#[test]
fn test_defaults() {
    let app = App::new();
    assert_eq!(app.active_section, Section::Dashboard);
    assert_eq!(app.search_query, "");
    assert!(app.sidebar_open);
    assert_eq!(app.expanded_problem, None);
    assert_eq!(app.persona_filter, PersonaFilter::All);
    assert!(!app.search_open);
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_problem_accordion() {
    let mut app = App::new();

    app.toggle_problem("azure_costs");
    assert_eq!(app.expanded_problem, Some("azure_costs"));

    // Opening another closes the first
    app.toggle_problem("vm_performance");
    assert_eq!(app.expanded_problem, Some("vm_performance"));

    app.toggle_problem("vm_performance");
    assert_eq!(app.expanded_problem, None);
}

#[test]
fn test_accordion_via_enter_on_cursor() {
    let mut app = App::new();
    app.set_section(Section::Problems);
    app.focus = Focus::Content;
    app.move_cursor_down();
    app.move_cursor_down();
    app.activate();
    assert_eq!(app.expanded_problem, Some("security_compliance"));

    // Cursor stops at the last problem
    app.move_cursor_down();
    app.activate();
    assert_eq!(app.expanded_problem, None);
}

#[test]
fn test_persona_filter() {
    let mut app = App::new();
    assert_eq!(app.filtered_personas().len(), PERSONAS.len());

    app.set_persona_filter(PersonaFilter::Only("vp_finance"));
    let filtered = app.filtered_personas();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "VP of Finance");

    app.set_persona_filter(PersonaFilter::All);
    assert_eq!(app.filtered_personas().len(), PERSONAS.len());
}

#[test]
fn test_unknown_persona_filter_is_rejected() {
    let mut app = App::new();
    assert_eq!(PersonaFilter::parse("cto"), None);

    let action = app.execute_command(&Command::Persona(Some("cto".to_string())));
    assert!(matches!(action, Action::Notify(_, _)));
    assert_eq!(app.persona_filter, PersonaFilter::All);
}

#[test]
fn test_enter_on_persona_focuses_and_clears() {
    let mut app = App::new();
    app.set_section(Section::Icp);
    app.move_cursor_down();
    app.activate();
    assert_eq!(app.persona_filter, PersonaFilter::Only("it_director"));
    assert_eq!(app.content_cursor, 0);

    app.activate();
    assert_eq!(app.persona_filter, PersonaFilter::All);
}

#[test]
fn test_sidebar_toggle_is_independent() {
    let mut app = App::new();
    app.set_section(Section::Stories);
    app.toggle_problem("azure_costs");

    app.toggle_sidebar();
    assert!(!app.sidebar_open);
    app.toggle_sidebar();
    assert!(app.sidebar_open);

    assert_eq!(app.active_section, Section::Stories);
    assert_eq!(app.expanded_problem, Some("azure_costs"));
}

#[test]
fn test_placeholder_sections() {
    let placeholders = [
        Section::Impact,
        Section::Metrics,
        Section::Scripts,
        Section::Technical,
        Section::Resources,
    ];
    for section in Section::ALL {
        let expected = placeholders.contains(&section);
        assert_eq!(
            section.view() == ContentView::UnderConstruction,
            expected,
            "{}",
            section.id()
        );
    }
}

#[test]
fn test_reset_restores_defaults() {
    let mut app = App::new();
    app.set_section(Section::Competitors);
    app.search_query = "azure".to_string();
    app.toggle_sidebar();
    app.toggle_problem("security_compliance");
    app.set_persona_filter(PersonaFilter::Only("cio"));
    app.open_search_modal(Some("typed".to_string()));

    app.reset();

    assert_eq!(app.active_section, Section::Dashboard);
    assert_eq!(app.search_query, "");
    assert!(app.sidebar_open);
    assert_eq!(app.expanded_problem, None);
    assert_eq!(app.persona_filter, PersonaFilter::All);
    assert!(!app.search_open);
    assert_eq!(app.search_modal.query(), "");
}

#[test]
fn test_search_query_is_inert() {
    let mut app = App::new();
    app.set_section(Section::Icp);
    app.enter_search();
    app.search_query.push_str("finance");
    app.exit_search();

    assert_eq!(app.filtered_personas().len(), PERSONAS.len());
    assert_eq!(app.search_query, "finance");
}

#[test]
fn test_search_modal_keeps_query_between_opens() {
    let mut app = App::new();
    app.open_search_modal(Some("cloud".to_string()));
    app.apply_action(Action::CloseOverlay);
    assert!(!app.search_open);

    app.open_search_modal(None);
    assert!(app.search_open);
    assert_eq!(app.search_modal.query(), "cloud");
}

#[test]
fn test_command_bar_navigation() {
    let mut app = App::new();
    app.enter_command();
    app.command.input.push_str("go competitors");
    app.apply_command();
    assert_eq!(app.active_section, Section::Competitors);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.command.last.as_deref(), Some("go competitors"));

    app.enter_command();
    app.command.input.push_str("quit");
    app.apply_command();
    assert!(app.should_quit);
}
