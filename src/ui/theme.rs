use std::fmt::Write as _;
use std::path::Path;

use ratatui::style::Color;

/// Color palette for the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub success: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Plain 16-color palette for terminals without truecolor.
    pub fn dark() -> Self {
        Self {
            text: Color::Gray,
            muted: Color::DarkGray,
            title: Color::Cyan,
            border: Color::Gray,
            header_bg: Color::Black,
            header_fg: Color::Cyan,
            status_bg: Color::DarkGray,
            status_fg: Color::Black,
            highlight_fg: Color::Yellow,
            highlight_bg: Color::Reset,
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Catppuccin Mocha.
    pub fn mocha() -> Self {
        // https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
        }
    }

    fn slot(&mut self, key: &str) -> Option<&mut Color> {
        Some(match key {
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "title" => &mut self.title,
            "border" => &mut self.border,
            "header_bg" => &mut self.header_bg,
            "header_fg" => &mut self.header_fg,
            "status_bg" => &mut self.status_bg,
            "status_fg" => &mut self.status_fg,
            "highlight_fg" => &mut self.highlight_fg,
            "highlight_bg" => &mut self.highlight_bg,
            "success" => &mut self.success,
            "error" => &mut self.error,
            _ => return None,
        })
    }

    fn entries(&self) -> [(&'static str, Color); 12] {
        [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("success", self.success),
            ("error", self.error),
        ]
    }

    /// Parse `key = color` lines. Unknown keys and bad colors keep the
    /// `mocha` value.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            if let (Some(slot), Some(color)) = (theme.slot(key.trim()), parse_color(val)) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        std::fs::read_to_string(path).ok().map(|s| Self::parse(&s))
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        let mut buf = String::new();
        buf.push_str("# usrdir-manager theme\n");
        buf.push_str("# Colors: #RRGGBB, RRGGBB or 'reset'\n\n");
        for (key, color) in self.entries() {
            let _ = writeln!(buf, "{key} = {}", color_to_str(color));
        }
        std::fs::write(path, buf)
    }

    /// Load `theme.conf`, writing the default theme on first run.
    pub fn load_or_init() -> Self {
        if let Some(existing) = crate::config::config_file_read_path("theme.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let theme = Self::default();
        let path = crate::config::config_file_write_path("theme.conf");
        if let Err(e) = theme.write_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "cannot write theme.conf");
        }
        theme
    }
}

fn parse_color(s: &str) -> Option<Color> {
    let lower = s.trim().to_ascii_lowercase();
    if lower == "reset" {
        return Some(Color::Reset);
    }
    let hex = lower.strip_prefix('#').unwrap_or(&lower);
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

fn color_to_str(c: Color) -> String {
    match c {
        Color::Rgb(r, g, b) => format!("#{r:02X}{g:02X}{b:02X}"),
        Color::Reset => "reset".to_string(),
        // named colors are written as their usual xterm values
        Color::Black => "#000000".to_string(),
        Color::Red => "#CD0000".to_string(),
        Color::Green => "#00CD00".to_string(),
        Color::Yellow => "#CDCD00".to_string(),
        Color::Blue => "#0000EE".to_string(),
        Color::Magenta => "#CD00CD".to_string(),
        Color::Cyan => "#00CDCD".to_string(),
        Color::Gray => "#E5E5E5".to_string(),
        Color::DarkGray => "#7F7F7F".to_string(),
        Color::LightRed => "#FF0000".to_string(),
        Color::LightGreen => "#00FF00".to_string(),
        Color::LightYellow => "#FFFF00".to_string(),
        Color::LightBlue => "#5C5CFF".to_string(),
        Color::LightMagenta => "#FF00FF".to_string(),
        Color::LightCyan => "#00FFFF".to_string(),
        Color::White => "#FFFFFF".to_string(),
        Color::Indexed(_) => "reset".to_string(),
    }
}
