use ratatui::style::Color;

/// `0xRRGGBB` to a truecolor `Color`.
pub const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

pub mod flexoki {
    pub const PAPER: u32 = 0xFFFCF0;

    // UI shades (Dark mode)
    pub const BASE_500: u32 = 0x878580;
    pub const BASE_300: u32 = 0xB7B5AC;

    // Accents
    pub const RED_400: u32 = 0xD14D41;
    pub const YELLOW_400: u32 = 0xD0A215;
    pub const GREEN_400: u32 = 0x879A39;
    pub const BLUE_400: u32 = 0x4385BE;
}
