//! Command parser for the : command bar

use crate::app::Section;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Go(String),
    Sidebar,

    // Selection
    Persona(Option<String>),
    Expand(Option<String>),

    // Overlays
    Search(Option<String>),
    Help,

    // Output
    Export(Option<String>),

    // Shell
    Reset,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.to_lowercase().as_str() {
        "go" | "goto" | "section" => {
            if let Some(target) = args {
                Command::Go(target)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "sidebar" | "menu" => Command::Sidebar,

        "persona" | "personas" | "filter" => Command::Persona(args),
        "expand" | "toggle" => Command::Expand(args),

        "search" | "find" => Command::Search(args),
        "help" | "?" => Command::Help,

        "export" | "exp" => Command::Export(args),

        "reset" | "reload" => Command::Reset,
        "quit" | "q" | "exit" => Command::Quit,

        other if args.is_none() && Section::from_id(other).is_some() => {
            Command::Go(other.to_string())
        }
        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(
            parse_command("go problems"),
            Command::Go("problems".to_string())
        );
        assert_eq!(parse_command("stories"), Command::Go("stories".to_string()));
        assert_eq!(parse_command("ICP"), Command::Go("icp".to_string()));
        assert_eq!(parse_command("sidebar"), Command::Sidebar);
        assert_eq!(parse_command("go"), Command::Unknown("go".to_string()));
    }

    #[test]
    fn test_parse_selection_commands() {
        assert_eq!(
            parse_command("persona cio"),
            Command::Persona(Some("cio".to_string()))
        );
        assert_eq!(parse_command("persona"), Command::Persona(None));
        assert_eq!(
            parse_command("expand  azure_costs "),
            Command::Expand(Some("azure_costs".to_string()))
        );
    }

    #[test]
    fn test_parse_overlay_and_shell_commands() {
        assert_eq!(
            parse_command("search Azure costs"),
            Command::Search(Some("Azure costs".to_string()))
        );
        assert_eq!(parse_command("search"), Command::Search(None));
        assert_eq!(
            parse_command("export csv"),
            Command::Export(Some("csv".to_string()))
        );
        assert_eq!(parse_command("reload"), Command::Reset);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
        assert_eq!(
            parse_command("problems now"),
            Command::Unknown("problems now".to_string())
        );
    }
}
