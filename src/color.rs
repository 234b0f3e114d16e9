//! Color tokens → RGB.
//!
//! Resolution never fails. Unrecognized tokens come out black, `none` comes
//! out white (the background).

use std::fmt;

/// An opaque 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value.
    pub const fn from_u32(packed: u32) -> Self {
        Self::new((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Blend toward a fixed white backdrop.
    ///
    /// `channel = 255 * (1 - opacity) + channel * opacity`, truncated. This
    /// ignores whatever is already on the canvas.
    pub fn with_opacity(self, opacity: f64) -> Self {
        if opacity >= 1.0 || opacity.is_nan() {
            return self;
        }
        let o = opacity.max(0.0);
        let blend = |c: u8| (255.0 * (1.0 - o) + c as f64 * o) as u8;
        Self::new(blend(self.r), blend(self.g), blend(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Named colors understood by the resolver.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("black", Rgb::BLACK),
    ("white", Rgb::WHITE),
    ("yellow", Rgb::new(255, 255, 0)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("orange", Rgb::new(255, 165, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("brown", Rgb::new(165, 42, 42)),
    ("pink", Rgb::new(255, 192, 203)),
    ("none", Rgb::WHITE),
];

/// Resolve a color token to RGB.
///
/// Checked in order: `#RRGGBB` / `#RGB`, then `rgb(r,g,b)`, then the name
/// table. Anything else is black.
pub fn resolve_color(token: &str) -> Rgb {
    let token = token.trim();
    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex).unwrap_or(Rgb::BLACK);
    }
    if let Some(args) = strip_prefix_ignore_case(token, "rgb(") {
        return parse_rgb_args(args).unwrap_or(Rgb::BLACK);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|&(_, rgb)| rgb)
        .unwrap_or(Rgb::BLACK)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
        }
        3 => {
            // #f00 → #ff0000
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
            Some(Rgb::new(channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<Rgb> {
    let body = args.trim_end().strip_suffix(')')?;
    let mut channels = body.split(',').map(|part| {
        part.trim()
            .parse::<i64>()
            .ok()
            .map(|v| v.clamp(0, 255) as u8)
    });
    let r = channels.next()??;
    let g = channels.next()??;
    let b = channels.next()??;
    if channels.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

/// A fill or stroke: either a color or nothing.
///
/// `Paint::parse("none")` is `Paint::None`, unlike [`resolve_color`] which
/// maps `none` to white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Paint {
    #[default]
    None,
    Color(Rgb),
}

impl Paint {
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if token.is_empty() || token.eq_ignore_ascii_case("none") {
            Paint::None
        } else {
            Paint::Color(resolve_color(token))
        }
    }

    pub fn color(self) -> Option<Rgb> {
        match self {
            Paint::None => None,
            Paint::Color(c) => Some(c),
        }
    }
}

impl From<Rgb> for Paint {
    fn from(rgb: Rgb) -> Self {
        Paint::Color(rgb)
    }
}

impl From<&str> for Paint {
    fn from(token: &str) -> Self {
        Paint::parse(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_digit_hex() {
        assert_eq!(resolve_color("#ff0000"), Rgb::new(255, 0, 0));
        assert_eq!(resolve_color("#1A2b3C"), Rgb::new(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn three_digit_hex_expands() {
        assert_eq!(resolve_color("#f00"), Rgb::new(255, 0, 0));
        assert_eq!(resolve_color("#8af"), Rgb::new(0x88, 0xaa, 0xff));
    }

    #[test]
    fn malformed_hex_is_black() {
        assert_eq!(resolve_color("#ff00"), Rgb::BLACK);
        assert_eq!(resolve_color("#gg0000"), Rgb::BLACK);
        assert_eq!(resolve_color("#"), Rgb::BLACK);
    }

    #[test]
    fn rgb_function() {
        assert_eq!(resolve_color("rgb(0,128,255)"), Rgb::new(0, 128, 255));
        assert_eq!(resolve_color("rgb( 1 , 2 , 3 )"), Rgb::new(1, 2, 3));
        assert_eq!(resolve_color("RGB(300,-5,7)"), Rgb::new(255, 0, 7));
    }

    #[test]
    fn malformed_rgb_is_black() {
        assert_eq!(resolve_color("rgb(1,2)"), Rgb::BLACK);
        assert_eq!(resolve_color("rgb(1,2,3"), Rgb::BLACK);
        assert_eq!(resolve_color("rgb(1,2,3,4)"), Rgb::BLACK);
    }

    #[test]
    fn names() {
        assert_eq!(resolve_color("red"), Rgb::new(255, 0, 0));
        assert_eq!(resolve_color("Grey"), resolve_color("gray"));
        assert_eq!(resolve_color("orange"), Rgb::new(255, 165, 0));
        assert_eq!(resolve_color("none"), Rgb::WHITE);
    }

    #[test]
    fn unknown_is_black() {
        assert_eq!(resolve_color("not-a-color"), Rgb::BLACK);
        assert_eq!(resolve_color(""), Rgb::BLACK);
    }

    #[test]
    fn resolution_is_idempotent() {
        for token in ["#123456", "#abc", "rgb(9,8,7)", "pink", "bogus"] {
            let once = resolve_color(token);
            assert_eq!(resolve_color(&once.to_string()), once, "token {token}");
        }
    }

    #[test]
    fn opacity_endpoints() {
        let c = Rgb::new(10, 200, 77);
        assert_eq!(c.with_opacity(1.0), c);
        assert_eq!(c.with_opacity(0.0), Rgb::WHITE);
        assert_eq!(c.with_opacity(-3.0), Rgb::WHITE);
    }

    #[test]
    fn opacity_half() {
        // 255 * 0.5 + 0 * 0.5 = 127.5 → 127
        assert_eq!(Rgb::BLACK.with_opacity(0.5), Rgb::new(127, 127, 127));
    }

    #[test]
    fn paint_none() {
        assert_eq!(Paint::parse("none"), Paint::None);
        assert_eq!(Paint::parse(" "), Paint::None);
        assert_eq!(Paint::parse("#00f"), Paint::Color(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn packed_roundtrip() {
        assert_eq!(Rgb::from_u32(0x12ab9f).to_u32(), 0x12ab9f);
    }
}
