use serde::Serialize;

/// Fixed color set for a card; dark mode swaps the whole set at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub icon_background: &'static str,
    pub qr_foreground: &'static str,
    pub qr_background: &'static str,
}

pub const LIGHT: Palette = Palette {
    background: "#FFFFFF",
    text: "#111827",
    muted: "#4B5563",
    icon_background: "#F3F4F6",
    qr_foreground: "#000000",
    qr_background: "#FFFFFF",
};

pub const DARK: Palette = Palette {
    background: "#111827",
    text: "#F9FAFB",
    muted: "#D1D5DB",
    icon_background: "#374151",
    qr_foreground: "#FFFFFF",
    qr_background: "#111827",
};

impl Palette {
    #[must_use]
    pub fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { DARK } else { LIGHT }
    }
}
