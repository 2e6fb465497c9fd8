use crate::Color;

/// Colors used by the built-in widgets.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_muted: Color,
    pub button_bg: Color,
    pub button_bg_hover: Color,
    pub button_bg_pressed: Color,
    pub edit_bg: Color,
    pub edit_bg_focused: Color,
    pub selection: Color,
    pub caret: Color,
    pub focus: Color,
    pub window_bg: Color,
    pub title_bg: Color,
    pub title_text: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_hex("#121212"),
            text: Color::from_hex("#DDDDDD"),
            text_muted: Color::from_hex("#888888"),
            button_bg: Color::from_hex("#34343C"),
            button_bg_hover: Color::from_hex("#44444E"),
            button_bg_pressed: Color::from_hex("#23232A"),
            edit_bg: Color::from_hex("#1E1E22"),
            edit_bg_focused: Color::from_hex("#26262C"),
            selection: Color::from_hex("#3A6EA580"),
            caret: Color::WHITE,
            focus: Color::from_hex("#88CCFF"),
            window_bg: Color::from_hex("#1A1A1ECC"),
            title_bg: Color::from_hex("#2B2B33"),
            title_text: Color::from_hex("#F0F0F0"),
            error: Color::from_hex("#FF6B6B"),
        }
    }
}

/// Behavioural knobs shared by every widget of a canvas.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct UiConfig {
    /// Pixels scrolled per wheel unit.
    pub scroll_speed: f32,
    pub caret_width: f32,
    pub window_title_height: f32,
    /// Lines kept in a console log before the oldest are dropped.
    pub console_history: usize,
    pub theme: Theme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 24.0,
            caret_width: 1.0,
            window_title_height: 20.0,
            console_history: 200,
            theme: Theme::default(),
        }
    }
}
