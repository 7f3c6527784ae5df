use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`. Background values
/// 0–6 are considered dark; 7–15 are considered light. If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(parse_colorfgbg)
        .unwrap_or(BackgroundType::Dark)
}

fn parse_colorfgbg(value: &str) -> Option<BackgroundType> {
    let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
    Some(if bg <= 6 {
        BackgroundType::Dark
    } else {
        BackgroundType::Light
    })
}

/// All styles used by the dashboard widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Panels ───────────────────────────────────────────────────────────────
    pub border: Style,
    /// Border of the filter list that has keyboard focus.
    pub border_focused: Style,
    pub checked: Style,
    pub unchecked: Style,
    /// Row under the cursor in the focused filter list.
    pub cursor: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub bar: Style,
    pub bar_empty: Style,
    pub bar_label: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::DarkGray),
            cursor: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Cyan),
            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            border: Style::default().fg(Color::Gray),
            border_focused: Style::default().fg(Color::Blue),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::Gray),
            cursor: Style::default()
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),

            bar: Style::default().fg(Color::Blue),
            bar_empty: Style::default().fg(Color::Gray),
            bar_label: Style::default().fg(Color::DarkGray),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name. Falls back to `auto_detect` for unknown
    /// names, including `"auto"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Style for the cancellation-rate KPI.
    ///
    /// * `< 10 %`  → `success`
    /// * `10–20 %` → `warning`
    /// * `≥ 20 %`  → `error`
    pub fn cancellation_style(&self, rate: f64) -> Style {
        if rate >= 20.0 {
            self.error
        } else if rate >= 10.0 {
            self.warning
        } else {
            self.success
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
