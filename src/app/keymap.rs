//! Keybinding configuration: defaults, `keybinds.conf` parsing and key resolution.
//!
//! Bindings map a `(modifiers, key)` pair to a [`KeyAction`]. User files use
//! one `<Action> = <KeySpec>` per line and are layered over the defaults.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Semantic actions available in normal mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Start typing a search term.
    StartSearch,
    /// Drop the active search and show everyone.
    ClearSearch,
    /// Open the form for a new user.
    NewUser,
    /// Open the form for the selected user.
    EditSelection,
    /// Ask to delete the selected user.
    DeleteSelection,
    /// Select the row above.
    MoveUp,
    /// Select the row below.
    MoveDown,
    PrevPage,
    NextPage,
    /// Fetch the directory again.
    Reload,
    /// Show or hide the keybindings pane.
    ToggleKeybindsPane,
    /// Swallow the key.
    Ignore,
}

const ALL_ACTIONS: [KeyAction; 13] = [
    KeyAction::Quit,
    KeyAction::StartSearch,
    KeyAction::ClearSearch,
    KeyAction::NewUser,
    KeyAction::EditSelection,
    KeyAction::DeleteSelection,
    KeyAction::MoveUp,
    KeyAction::MoveDown,
    KeyAction::PrevPage,
    KeyAction::NextPage,
    KeyAction::Reload,
    KeyAction::ToggleKeybindsPane,
    KeyAction::Ignore,
];

#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('c')), KeyAction::ClearSearch);
        bindings.insert((M::NONE, Char('n')), KeyAction::NewUser);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelection);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelection);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelection);
        bindings.insert((M::NONE, Char('r')), KeyAction::Reload);
        // Navigation
        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Left), KeyAction::PrevPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PrevPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        // Vim-like keys
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('h')), KeyAction::PrevPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        // Some terminals report Shift+k as 'K' with SHIFT, others without
        bindings.insert((M::NONE, Char('?')), KeyAction::ToggleKeybindsPane);
        bindings.insert((M::NONE, Char('K')), KeyAction::ToggleKeybindsPane);
        bindings.insert((M::SHIFT, Char('K')), KeyAction::ToggleKeybindsPane);
        Self { bindings }
    }

    /// Load `keybinds.conf`, writing the defaults on first run.
    pub fn load_or_init() -> Self {
        if let Some(existing) = crate::config::config_file_read_path("keybinds.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let km = Self::default();
        let path = crate::config::config_file_write_path("keybinds.conf");
        if let Err(e) = km.write_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "cannot write keybinds.conf");
        }
        km
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|s| Self::parse(&s))
    }

    /// Layer `<Action> = <KeySpec>` lines over the defaults. Malformed lines
    /// are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::debug!(line, "ignoring keybinding line"),
            }
        }
        map
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        let mut buf = String::new();
        buf.push_str("# usrdir-manager keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+c, Enter, Esc, Delete, Up, Left, PageDown, /, ?\n");
        let names: Vec<&str> = ALL_ACTIONS.iter().map(|a| format_action(*a)).collect();
        let _ = writeln!(buf, "# Actions: {}\n", names.join(", "));

        let mut rows: Vec<(KeyAction, String)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| (*action, Self::format_key(*mods, *code)))
            .collect();
        rows.sort();
        for (action, key) in rows {
            let _ = writeln!(buf, "{} = {}", format_action(action), key);
        }
        std::fs::write(path, buf)
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key like "Ctrl+c", "PageDown" or "K".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Backspace => "Backspace".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{code:?}"),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
        } else {
            base
        }
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Backspace" => Backspace,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ALL_ACTIONS.into_iter().find(|a| format_action(*a) == s)
}

pub fn format_action(a: KeyAction) -> &'static str {
    match a {
        KeyAction::Quit => "Quit",
        KeyAction::StartSearch => "StartSearch",
        KeyAction::ClearSearch => "ClearSearch",
        KeyAction::NewUser => "NewUser",
        KeyAction::EditSelection => "EditSelection",
        KeyAction::DeleteSelection => "DeleteSelection",
        KeyAction::MoveUp => "MoveUp",
        KeyAction::MoveDown => "MoveDown",
        KeyAction::PrevPage => "PrevPage",
        KeyAction::NextPage => "NextPage",
        KeyAction::Reload => "Reload",
        KeyAction::ToggleKeybindsPane => "ToggleKeybindsPane",
        KeyAction::Ignore => "Ignore",
    }
}
