use powerdeck_types::Color;

/// Series colors used when a trace does not carry its own.
pub const DEFAULT_PALETTE: [Color; 10] = [
    Color::rgb(0xFF, 0x6A, 0x2C),
    Color::rgb(0x1E, 0x3A, 0x8A),
    Color::rgb(0xF5, 0x9E, 0x0B),
    Color::rgb(0x0E, 0xA5, 0xA7),
    Color::rgb(0xE1, 0x1D, 0x48),
    Color::rgb(0x22, 0xC5, 0x5E),
    Color::rgb(0x8B, 0x5C, 0xF6),
    Color::rgb(0xC8, 0x4B, 0x1A),
    Color::rgb(0x8E, 0xA6, 0xE8),
    Color::rgb(0x33, 0x41, 0x55),
];

pub fn series_color(index: usize) -> Color {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}
