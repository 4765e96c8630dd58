//! FILENAME: engine/src/keymap.rs
//! PURPOSE: Translates raw characters and typed text into input events.
//! CONTEXT: Calculator UIs bind keyboard keys and label some buttons with
//! display glyphs (× ÷ √ π). This table maps both onto canonical engine
//! events so a headless host can drive a Session from plain text. Unbound
//! characters are ignored, like unbound keys in a UI shell.

use crate::session::InputEvent;
use parser::{MathConstant, MathFunction};

/// Multi-character key sequences, longest names first so longest-match
/// wins during scanning. The Function event opens its own parenthesis, so
/// "sin(" in typed text is one event, not a function plus a paren.
const KEYWORD_EVENTS: [(&str, InputEvent); 14] = [
    ("sqrt(", InputEvent::Function(MathFunction::Sqrt)),
    ("sqrt", InputEvent::Function(MathFunction::Sqrt)),
    ("sin(", InputEvent::Function(MathFunction::Sin)),
    ("sin", InputEvent::Function(MathFunction::Sin)),
    ("cos(", InputEvent::Function(MathFunction::Cos)),
    ("cos", InputEvent::Function(MathFunction::Cos)),
    ("tan(", InputEvent::Function(MathFunction::Tan)),
    ("tan", InputEvent::Function(MathFunction::Tan)),
    ("log(", InputEvent::Function(MathFunction::Log)),
    ("log", InputEvent::Function(MathFunction::Log)),
    ("ln(", InputEvent::Function(MathFunction::Ln)),
    ("ln", InputEvent::Function(MathFunction::Ln)),
    ("pi", InputEvent::Constant(MathConstant::Pi)),
    ("e", InputEvent::Constant(MathConstant::E)),
];

/// Maps a single key to an event. Returns None for unbound keys.
pub fn event_for_char(ch: char) -> Option<InputEvent> {
    match ch {
        '0'..='9' => Some(InputEvent::Digit(ch)),
        '.' => Some(InputEvent::Decimal),
        '+' | '-' | '*' | '/' | '^' | '%' => Some(InputEvent::Operator(ch)),
        // Display glyphs used on the keypads
        '×' => Some(InputEvent::Operator('*')),
        '÷' => Some(InputEvent::Operator('/')),
        '√' => Some(InputEvent::Function(MathFunction::Sqrt)),
        'π' => Some(InputEvent::Constant(MathConstant::Pi)),
        'e' => Some(InputEvent::Constant(MathConstant::E)),
        '(' => Some(InputEvent::LeftParen),
        ')' => Some(InputEvent::RightParen),
        '=' | '\n' | '\r' => Some(InputEvent::Evaluate),
        '⌫' => Some(InputEvent::Backspace),
        'c' | 'C' => Some(InputEvent::Clear),
        _ => None,
    }
}

/// Translates a typed string into the event sequence it stands for:
/// longest-match over the keyword table first, then single-key bindings.
pub fn events_from_str(input: &str) -> Vec<InputEvent> {
    let lower = input.to_lowercase();
    let mut events = Vec::new();
    let mut rest = lower.as_str();

    while let Some(ch) = rest.chars().next() {
        if let Some((event, len)) = keyword_event(rest) {
            events.push(event);
            rest = &rest[len..];
            continue;
        }
        if let Some(event) = event_for_char(ch) {
            events.push(event);
        }
        rest = &rest[ch.len_utf8()..];
    }

    events
}

/// Returns the longest keyword sequence that prefixes `rest`.
fn keyword_event(rest: &str) -> Option<(InputEvent, usize)> {
    KEYWORD_EVENTS
        .iter()
        .find(|(name, _)| rest.starts_with(name))
        .map(|(name, event)| (*event, name.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_digits_and_operators() {
        assert_eq!(event_for_char('7'), Some(InputEvent::Digit('7')));
        assert_eq!(event_for_char('+'), Some(InputEvent::Operator('+')));
        assert_eq!(event_for_char('.'), Some(InputEvent::Decimal));
    }

    #[test]
    fn maps_display_glyphs_to_canonical_operators() {
        assert_eq!(event_for_char('×'), Some(InputEvent::Operator('*')));
        assert_eq!(event_for_char('÷'), Some(InputEvent::Operator('/')));
        assert_eq!(
            event_for_char('√'),
            Some(InputEvent::Function(MathFunction::Sqrt))
        );
        assert_eq!(
            event_for_char('π'),
            Some(InputEvent::Constant(MathConstant::Pi))
        );
    }

    #[test]
    fn unbound_keys_map_to_nothing() {
        assert_eq!(event_for_char('#'), None);
        assert_eq!(event_for_char('x'), None);
    }

    #[test]
    fn scans_keywords_longest_match_first() {
        // "sqrt(" is one event: the Function event opens its own paren.
        let events = events_from_str("sqrt(4)");
        assert_eq!(
            events,
            vec![
                InputEvent::Function(MathFunction::Sqrt),
                InputEvent::Digit('4'),
                InputEvent::RightParen,
            ]
        );
    }

    #[test]
    fn glyph_text_and_ascii_text_produce_the_same_events() {
        assert_eq!(events_from_str("2×3÷√4"), events_from_str("2*3/sqrt4"));
        assert_eq!(events_from_str("2π"), events_from_str("2pi"));
    }

    #[test]
    fn skips_unbound_characters() {
        assert_eq!(
            events_from_str("1 # 2"),
            vec![InputEvent::Digit('1'), InputEvent::Digit('2')]
        );
    }
}
