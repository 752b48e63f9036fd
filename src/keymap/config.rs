//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs:
//!
//! ```yaml
//! bindings:
//!   - key: "shift+tab"
//!     intent: previous_column
//!   - key: "down"
//!     intent: unbound
//! ```

use std::path::Path;

use serde::Deserialize;

use super::binding::Keybinding;
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::traverse::NavIntent;

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub intent: String,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    config
        .bindings
        .into_iter()
        .map(|entry| {
            let keystroke = parse_key_string(&entry.key)?;
            Ok(match parse_intent(&entry.intent)? {
                Some(intent) => Keybinding::new(keystroke, intent),
                None => Keybinding::unbound(keystroke),
            })
        })
        .collect()
}

/// Parse a key string like "shift+tab" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.trim().split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" | "cmd" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdown" | "pgdn" => Ok(KeyCode::PageDown),

        "numpad_enter" | "numenter" | "kpenter" => Ok(KeyCode::NumpadEnter),

        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// `unbound` parses to `None`
fn parse_intent(name: &str) -> Result<Option<NavIntent>, KeymapError> {
    if name.trim().eq_ignore_ascii_case("unbound") {
        return Ok(None);
    }
    name.parse::<NavIntent>()
        .map(Some)
        .map_err(|_| KeymapError::InvalidIntent(name.to_string()))
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidIntent(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidIntent(i) => write!(f, "Invalid intent: {}", i),
        }
    }
}

impl std::error::Error for KeymapError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let stroke = parse_key_string("a").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('a'));
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_key_with_modifier() {
        let stroke = parse_key_string("shift+tab").unwrap();
        assert_eq!(stroke.key, KeyCode::Tab);
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_parse_named_key() {
        assert_eq!(parse_key_string("enter").unwrap().key, KeyCode::Enter);
        assert_eq!(parse_key_string("Esc").unwrap().key, KeyCode::Escape);
        assert_eq!(parse_key_string("arrowdown").unwrap().key, KeyCode::Down);
        assert_eq!(
            parse_key_string("numpad_enter").unwrap().key,
            KeyCode::NumpadEnter
        );
    }

    #[test]
    fn test_parse_rejects_two_keys() {
        assert!(matches!(
            parse_key_string("tab+enter"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("shift"),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
bindings:
  - key: "tab"
    intent: next_column
  - key: "ctrl+enter"
    intent: next_row
  - key: "down"
    intent: unbound
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].intent, Some(NavIntent::NextColumn));
        assert!(bindings[1].keystroke.mods.ctrl());
        assert!(bindings[2].is_unbound());
    }

    #[test]
    fn test_parse_yaml_unknown_intent() {
        let yaml = "bindings:\n  - key: tab\n    intent: teleport\n";
        assert_eq!(
            parse_keymap_yaml(yaml),
            Err(KeymapError::InvalidIntent("teleport".to_string()))
        );
    }
}
