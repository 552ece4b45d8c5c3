//! User configuration: smoothing settings, key bindings and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/cosmic-scroll/config.toml` (default
//! `~/.config/cosmic-scroll/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::ease::Ease;
use crate::core::smoother::{Mode, SmootherError};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleSmoothing,
    OpenResume,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (config file order).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::ToggleSmoothing,
        Action::OpenResume,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::ToggleSmoothing => "toggle_smoothing",
            Action::OpenResume => "open_resume",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT are compared.  SHIFT is ignored for characters,
    /// whose case already carries it (`G`, `?`).
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = match self.code {
            KeyCode::Char(_) => KeyModifiers::CONTROL | KeyModifiers::ALT,
            _ => KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT,
        };
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"↓"`, `"Ctrl+d"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Ctrl+d"`, `"PageDown"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&key_name(self.code));
        s
    }

    /// Parse a key string like `"Ctrl+d"`, `"Shift+Space"`, `"j"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => KeyCode::F(s[1..].parse().ok()?),
            // Keep the original case for single characters (`G` ≠ `g`).
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── smoothing ─────────

/// Which smoothing strategy the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingKind {
    /// Follow native scroll events, closing a fraction of the gap per frame.
    Follow,
    /// Eased approach toward the page-progress target.
    Tween,
}

impl SmoothingKind {
    pub const ALL: &[SmoothingKind] = &[SmoothingKind::Follow, SmoothingKind::Tween];

    pub fn label(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Tween => "tween",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "follow" | "lerp" => Some(Self::Follow),
            "tween" => Some(Self::Tween),
            _ => None,
        }
    }
}

pub const SMOOTHING_RANGE: (f64, f64) = (0.01, 1.0);
pub const DURATION_RANGE: (f64, f64) = (0.05, 5.0);
pub const FPS_RANGE: (u32, u32) = (10, 240);

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub smoothing_kind: SmoothingKind,
    /// Fraction of the gap closed per frame in follow mode.
    pub smoothing: f64,
    /// Approach duration in tween mode, seconds.
    pub duration_secs: f64,
    /// Approach curve in tween mode.
    pub tween_ease: Ease,
    /// Frame ticks per second.
    pub fps: u32,
    /// Rows per wheel notch / arrow press.
    pub wheel_lines: u16,
    /// When `false`, scrolling is applied natively (no smoothing).
    pub smoothing_enabled: bool,
    pub resume_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            smoothing_kind: SmoothingKind::Follow,
            smoothing: 0.1,
            duration_secs: 1.0,
            tween_ease: Ease::Power2Out,
            fps: 60,
            wheel_lines: 3,
            smoothing_enabled: true,
            resume_path: None,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let ctrl = KeyModifiers::CONTROL;
        let mut m = HashMap::new();

        m.insert(Action::ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(Action::ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(PageUp, n), KeyBind::new(Char('u'), ctrl)]);
        m.insert(
            Action::PageDown,
            vec![
                KeyBind::new(PageDown, n),
                KeyBind::new(Char(' '), n),
                KeyBind::new(Char('d'), ctrl),
            ],
        );
        m.insert(Action::Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Action::Bottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), n)]);
        m.insert(Action::ToggleSmoothing, vec![KeyBind::new(Char('s'), n)]);
        m.insert(Action::OpenResume, vec![KeyBind::new(Char('r'), n)]);
        m.insert(Action::OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Action::Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action matching a key event; the binding with the most
    /// modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Smoother mode for the current settings.
    pub fn mode(&self) -> Result<Mode, SmootherError> {
        match self.smoothing_kind {
            SmoothingKind::Follow => Mode::follow(self.smoothing),
            SmoothingKind::Tween => {
                Mode::tween(self.duration_secs).map(|mode| mode.with_ease(self.tween_ease))
            }
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: page | {}: smoothing | {}: resume | {}: settings",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::PageDown),
            self.short_binding(Action::ToggleSmoothing),
            self.short_binding(Action::OpenResume),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse_config(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        tracing::debug!("config saved to {}", path.display());
        Ok(())
    }

    fn parse_config(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "mode" => {
                    if let Some(kind) = SmoothingKind::parse(value) {
                        config.smoothing_kind = kind;
                    }
                    continue;
                }
                "smoothing" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.smoothing = v.clamp(SMOOTHING_RANGE.0, SMOOTHING_RANGE.1);
                        }
                    }
                    continue;
                }
                "duration" => {
                    if let Ok(v) = value.parse::<f64>() {
                        if v.is_finite() {
                            config.duration_secs = v.clamp(DURATION_RANGE.0, DURATION_RANGE.1);
                        }
                    }
                    continue;
                }
                "tween_ease" => {
                    if let Some(ease) = Ease::parse(value) {
                        config.tween_ease = ease;
                    }
                    continue;
                }
                "fps" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.fps = v.clamp(FPS_RANGE.0, FPS_RANGE.1);
                    }
                    continue;
                }
                "wheel_lines" => {
                    if let Ok(v) = value.parse::<u16>() {
                        config.wheel_lines = v.clamp(1, 20);
                    }
                    continue;
                }
                "smoothing_enabled" => {
                    config.smoothing_enabled = value == "true";
                    continue;
                }
                "resume_path" => {
                    config.resume_path = (!value.is_empty()).then(|| PathBuf::from(value));
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# cosmic-scroll configuration".to_string(),
            String::new(),
            "# Smoothing".to_string(),
            "# mode: follow (per-frame lerp) or tween (eased approach)".to_string(),
            format!("mode = {}", self.smoothing_kind.label()),
            format!("smoothing = {}", self.smoothing),
            format!("duration = {}", self.duration_secs),
            format!("tween_ease = {}", self.tween_ease.name()),
            format!("fps = {}", self.fps),
            format!("wheel_lines = {}", self.wheel_lines),
            format!("smoothing_enabled = {}", self.smoothing_enabled),
        ];
        if let Some(path) = &self.resume_path {
            lines.push(format!("resume_path = {}", path.display()));
        }
        lines.extend([
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ]);

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/cosmic-scroll/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("cosmic-scroll").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parses_smoothing_settings() {
        let config = AppConfig::parse_config(
            "mode = tween\nsmoothing = 0.25\nduration = 1.5\nfps = 30\nwheel_lines = 5\n",
        );
        assert_eq!(config.smoothing_kind, SmoothingKind::Tween);
        assert_eq!(config.smoothing, 0.25);
        assert_eq!(config.duration_secs, 1.5);
        assert_eq!(config.fps, 30);
        assert_eq!(config.wheel_lines, 5);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = AppConfig::parse_config("smoothing = 7\nduration = -1\nfps = 1000\n");
        assert_eq!(config.smoothing, 1.0);
        assert_eq!(config.duration_secs, DURATION_RANGE.0);
        assert_eq!(config.fps, FPS_RANGE.1);
        assert!(config.mode().is_ok());
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = AppConfig::parse_config("mode = sideways\nsmoothing = fast\n= =\nnonsense\n");
        let defaults = AppConfig::default();
        assert_eq!(config.smoothing_kind, defaults.smoothing_kind);
        assert_eq!(config.smoothing, defaults.smoothing);
    }

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.smoothing_kind = SmoothingKind::Tween;
        config.duration_secs = 0.6;
        config.tween_ease = Ease::Power3InOut;
        config.resume_path = Some(PathBuf::from("/tmp/resume.pdf"));
        config.bindings.insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL)]);

        let back = AppConfig::parse_config(&config.serialise());
        assert_eq!(back.smoothing_kind, SmoothingKind::Tween);
        assert_eq!(back.duration_secs, 0.6);
        assert_eq!(back.tween_ease, Ease::Power3InOut);
        assert_eq!(back.resume_path, config.resume_path);
        assert_eq!(
            back.match_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn uppercase_binding_keeps_case() {
        let config = AppConfig::default();
        assert_eq!(config.match_key(key(KeyCode::Char('G'), KeyModifiers::NONE)), Some(Action::Bottom));
        assert_eq!(config.match_key(key(KeyCode::Char('g'), KeyModifiers::NONE)), Some(Action::Top));
        assert_eq!(
            config.match_key(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::PageDown)
        );
    }

    #[test]
    fn page_keys_bind_to_page_actions() {
        let config = AppConfig::default();
        let none = KeyModifiers::NONE;
        assert_eq!(config.match_key(key(KeyCode::PageUp, none)), Some(Action::PageUp));
        assert_eq!(config.match_key(key(KeyCode::PageDown, none)), Some(Action::PageDown));
        assert_eq!(config.match_key(key(KeyCode::Char(' '), none)), Some(Action::PageDown));
        for &action in Action::ALL {
            assert!(config.bindings.contains_key(&action), "{action:?} unbound");
        }
    }

    #[test]
    fn mode_follows_kind() {
        let mut config = AppConfig::default();
        assert!(matches!(config.mode(), Ok(Mode::Follow { .. })));
        config.smoothing_kind = SmoothingKind::Tween;
        assert!(matches!(config.mode(), Ok(Mode::Tween { ease: Ease::Power2Out, .. })));
        config.tween_ease = Ease::parse("smoothstep").unwrap();
        assert!(matches!(config.mode(), Ok(Mode::Tween { ease: Ease::Smoothstep, .. })));
    }
}
