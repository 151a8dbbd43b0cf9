use colored::Color;

pub const PRIMARY: Color = Color::BrightWhite;
pub const ACCENT: Color = Color::BrightCyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::BrightBlue;
pub const IPV6_ADDR: Color = Color::Blue;
pub const FQDN: Color = Color::Cyan;

pub const SEVERITY_INFO: Color = Color::BrightBlack;
pub const SEVERITY_LOW: Color = Color::Green;
pub const SEVERITY_MEDIUM: Color = Color::Yellow;
pub const SEVERITY_HIGH: Color = Color::BrightRed;
pub const SEVERITY_CRITICAL: Color = Color::Red;
