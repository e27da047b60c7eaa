use super::command::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Light => &LIGHT,
            Self::Dark => &DARK,
        }
    }
}

#[derive(Debug)]
pub struct Palette {
    pub background: Color,
    pub dot: Color,
    pub node_bg: Color,
    pub border: Color,
    pub selected_bg: Color,
    pub selected_border: Color,
    pub header_bg: Color,
    pub header_text: Color,
    pub row_bg: Color,
    pub row_text: Color,
    pub type_text: Color,
    pub pk_row_bg: Color,
    pub pk_text: Color,
    pub handle: Color,
}

// Connector colours do not change with the theme.
pub const ONE_TO_MANY_STROKE: Color = "#f59e0b";
pub const RELATION_STROKE: Color = "#3b82f6";
pub const PENDING_STROKE: Color = "#9ca3af";

static LIGHT: Palette = Palette {
    background: "#ffffff",
    dot: "#d1d5db",
    node_bg: "#ffffff",
    border: "#e5e7eb",
    selected_bg: "#eff6ff",
    selected_border: "#3b82f6",
    header_bg: "#3b82f6",
    header_text: "#ffffff",
    row_bg: "#f9fafb",
    row_text: "#111827",
    type_text: "#4b5563",
    pk_row_bg: "#fef9c3",
    pk_text: "#854d0e",
    handle: "#9ca3af",
};

static DARK: Palette = Palette {
    background: "#1a1a1a",
    dot: "#444444",
    node_bg: "#1e293b",
    border: "#333333",
    selected_bg: "#172554",
    selected_border: "#3b82f6",
    header_bg: "#3b82f6",
    header_text: "#ffffff",
    row_bg: "#334155",
    row_text: "#f3f4f6",
    type_text: "#9ca3af",
    pk_row_bg: "#713f12",
    pk_text: "#fef08a",
    handle: "#6b7280",
};
