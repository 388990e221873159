//! Module trait for self-contained UI components

use crossterm::event::KeyEvent;

use super::Action;

/// Trait for UI components that own local state and handle their own input
pub trait Module {
    /// Handle keyboard input
    /// Returns an Action describing what the shell should do next
    fn handle_key(&mut self, key: KeyEvent) -> Action;
}
