//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the calculator engine.
//! CONTEXT: Re-exports public types and modules for use by host shells.
//! The engine is two halves: the pure evaluator (expression text in,
//! formatted result out) and the Session state machine that accumulates
//! keystrokes into expression text.

pub mod error;
pub mod evaluator;
pub mod keymap;
pub mod number_format;
pub mod session;

// Re-export commonly used types at the crate root
pub use error::EvalError;
pub use evaluator::{evaluate, evaluate_with, EvalOptions};
pub use keymap::{event_for_char, events_from_str};
pub use number_format::{format_result, round_result};
pub use session::{EntryState, InputEvent, Mode, Session, ERROR_MARKER, MAX_DISPLAY_WIDTH};

#[cfg(test)]
mod tests {
    use super::*;

    fn type_line(session: &mut Session, text: &str) {
        for event in events_from_str(text) {
            session.apply(event);
        }
    }

    #[test]
    fn integration_test_keystrokes_to_result() {
        let mut session = Session::new();
        type_line(&mut session, "2+3*4=");

        assert_eq!(session.display_text(), "14");
        assert_eq!(session.history_text(), "2+3*4");
    }

    #[test]
    fn integration_test_scientific_keys_through_keymap() {
        let mut session = Session::new();
        session.apply(InputEvent::ToggleMode);
        type_line(&mut session, "sin(90)=");

        assert_eq!(session.mode(), Mode::Scientific);
        assert_eq!(session.display_text(), "1");
    }

    #[test]
    fn integration_test_glyph_keys() {
        let mut session = Session::new();
        type_line(&mut session, "2×π=");

        assert_eq!(session.display_text(), "6.2831853072");
    }

    #[test]
    fn integration_test_error_and_recovery() {
        let mut session = Session::new();
        type_line(&mut session, "5/0=");
        assert_eq!(session.display_text(), ERROR_MARKER);

        type_line(&mut session, "7+1=");
        assert_eq!(session.display_text(), "8");
    }

    #[test]
    fn integration_test_chained_results() {
        let mut session = Session::new();
        type_line(&mut session, "1+2=");
        type_line(&mut session, "*4=");
        type_line(&mut session, "-2=");

        assert_eq!(session.display_text(), "10");
    }

    #[test]
    fn integration_test_session_serde_round_trip() {
        let mut session = Session::new();
        type_line(&mut session, "2+3=");
        session.apply(InputEvent::ToggleMode);

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.display_text(), session.display_text());
        assert_eq!(restored.history_text(), session.history_text());
        assert_eq!(restored.mode(), session.mode());
        assert_eq!(restored.state(), session.state());
    }
}
