use crossterm::style::{Color, Stylize};
use dialoguer::theme::Theme;
use std::fmt;

/// Design tokens for the appdeploy CLI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const PENDING: &str = "○";
    pub const ARROW: &str = "↳";
    pub const DEPLOY: &str = "📦";

    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const PENDING: &str = "[ ]";
    pub const ARROW: &str = "[>]";
    pub const DEPLOY: &str = "[DEPLOY]";

    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Pending,
    Arrow,
    Deploy,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => icons::SUCCESS,
            (true, Icon::Error) => icons::ERROR,
            (true, Icon::Warning) => icons::WARNING,
            (true, Icon::Progress) => icons::PROGRESS,
            (true, Icon::Pending) => icons::PENDING,
            (true, Icon::Arrow) => icons::ARROW,
            (true, Icon::Deploy) => icons::DEPLOY,
            (false, Icon::Success) => icons_ascii::SUCCESS,
            (false, Icon::Error) => icons_ascii::ERROR,
            (false, Icon::Warning) => icons_ascii::WARNING,
            (false, Icon::Progress) => icons_ascii::PROGRESS,
            (false, Icon::Pending) => icons_ascii::PENDING,
            (false, Icon::Arrow) => icons_ascii::ARROW,
            (false, Icon::Deploy) => icons_ascii::DEPLOY,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Icon::Success => colors::SUCCESS,
            Icon::Error => colors::ERROR,
            Icon::Warning | Icon::Progress => colors::WARNING,
            Icon::Pending | Icon::Arrow => colors::DIM,
            Icon::Deploy => colors::INFO,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        format!("{}", s.with(self.color()))
    }
}

/// Paint `text` when color is on, pass it through otherwise
pub fn paint(text: &str, color: Color, supports_color: bool) -> String {
    if supports_color {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}

// ----------------------------------------------------------------------------
// AppDeployTheme - dialoguer theme with ●/○ icons
// ----------------------------------------------------------------------------

/// Prompt theme for unit selection and confirmations.
///
/// Wraps `ColorfulTheme` and only overrides multi-select items to use the
/// icons above (`[x]`/`[ ]` in ASCII mode).
pub struct AppDeployTheme {
    unicode: bool,
    inner: dialoguer::theme::ColorfulTheme,
}

impl AppDeployTheme {
    pub fn new(unicode: bool) -> Self {
        Self {
            unicode,
            inner: dialoguer::theme::ColorfulTheme::default(),
        }
    }

    pub fn selected_icon(&self) -> &'static str {
        if self.unicode {
            icons::SELECTED
        } else {
            icons_ascii::SELECTED
        }
    }

    pub fn unselected_icon(&self) -> &'static str {
        if self.unicode {
            icons::UNSELECTED
        } else {
            icons_ascii::UNSELECTED
        }
    }
}

impl Theme for AppDeployTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner.format_prompt(f, prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        self.inner.format_error(f, err)
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        self.inner.format_confirm_prompt(f, prompt, default)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        self.inner
            .format_confirm_prompt_selection(f, prompt, selection)
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<&str>,
    ) -> fmt::Result {
        self.inner.format_input_prompt(f, prompt, default)
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        self.inner.format_input_prompt_selection(f, prompt, sel)
    }

    fn format_multi_select_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner.format_multi_select_prompt(f, prompt)
    }

    fn format_multi_select_prompt_item(
        &self,
        f: &mut dyn fmt::Write,
        text: &str,
        checked: bool,
        active: bool,
    ) -> fmt::Result {
        let icon = if checked {
            self.selected_icon()
        } else {
            self.unselected_icon()
        };

        if active {
            write!(f, "> {} {}", icon, text)
        } else {
            write!(f, "  {} {}", icon, text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_unicode_icons() {
        let theme = AppDeployTheme::new(true);
        assert_eq!(theme.selected_icon(), "●");
        assert_eq!(theme.unselected_icon(), "○");
    }

    #[test]
    fn theme_ascii_icons() {
        let theme = AppDeployTheme::new(false);
        assert_eq!(theme.selected_icon(), "[x]");
        assert_eq!(theme.unselected_icon(), "[ ]");
    }

    #[test]
    fn icon_renders_ascii_when_unicode_unsupported() {
        assert_eq!(Icon::Error.render(false), "[FAIL]");
        assert_eq!(Icon::Error.colored(false, false), "[FAIL]");
    }

    #[test]
    fn paint_passthrough_without_color() {
        assert_eq!(paint("appA", colors::INFO, false), "appA");
    }
}
