//! Deterministic avatars for managers and clubs that have no crest or photo.
//!
//! All randomness comes from one [`Mulberry32`] seeded with the numeric id and
//! is drawn in a fixed order: palette size, then hue/saturation/lightness for
//! each colour, then the pattern. The same id therefore always yields the same
//! avatar without anything being stored.

use std::f64::consts::PI;
use std::fmt;

/// Mulberry32: a 32-bit multiply-xorshift generator.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Uniform integer in [lo, hi].
    pub fn next_in(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * f64::from(hi - lo + 1)).floor() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64, // [0, 360)
    pub saturation: u8,
    pub lightness: u8,
}

impl Hsl {
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = self.hue.rem_euclid(360.0) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        (channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({:.0}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    VerticalStripes,
    DiagonalStripes,
    ConicSweep,
    Radial,
    LinearGradient,
    Checkerboard,
}

impl PatternKind {
    pub const ALL: [PatternKind; 6] = [
        PatternKind::VerticalStripes,
        PatternKind::DiagonalStripes,
        PatternKind::ConicSweep,
        PatternKind::Radial,
        PatternKind::LinearGradient,
        PatternKind::Checkerboard,
    ];

    /// Palette index for cell (x, y) of a `width` x `height` grid.
    /// Colours are used in palette order; no randomness.
    pub fn color_index(&self, x: u16, y: u16, width: u16, height: u16, colors: usize) -> usize {
        if colors == 0 {
            return 0;
        }
        let w = f64::from(width.max(1));
        let h = f64::from(height.max(1));
        let (fx, fy) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let n = colors as f64;

        let idx = match self {
            PatternKind::VerticalStripes => (fx / w * n).floor() as usize,
            PatternKind::DiagonalStripes => (usize::from(x) + usize::from(y)) / 2 % colors,
            PatternKind::ConicSweep => {
                let angle = (fy - h / 2.0).atan2(fx - w / 2.0) + PI;
                (angle / (2.0 * PI) * n).floor() as usize
            }
            PatternKind::Radial => {
                let (dx, dy) = ((fx - w / 2.0) / (w / 2.0), (fy - h / 2.0) / (h / 2.0));
                let dist = (dx * dx + dy * dy).sqrt() / 2f64.sqrt();
                (dist * n).floor() as usize
            }
            PatternKind::LinearGradient => (fy / h * n).floor() as usize,
            PatternKind::Checkerboard => (usize::from(x) + usize::from(y)) % 2,
        };
        idx.min(colors - 1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identicon {
    pub colors: Vec<Hsl>,
    pub pattern: PatternKind,
    /// Set when built from a display name.
    pub initials: Option<String>,
}

impl Identicon {
    pub fn generate(seed: u32) -> Self {
        let mut rng = Mulberry32::new(seed);

        let size = rng.next_in(2, 5);
        let colors = (0..size)
            .map(|_| Hsl {
                hue: rng.next_f64() * 360.0,
                saturation: rng.next_in(60, 90) as u8,
                lightness: rng.next_in(40, 60) as u8,
            })
            .collect();
        let pattern = PatternKind::ALL[rng.next_in(0, 5) as usize];

        Self { colors, pattern, initials: None }
    }

    pub fn for_name(seed: u32, name: Option<&str>) -> Self {
        Self { initials: name.map(initials), ..Self::generate(seed) }
    }

    pub fn color_at(&self, x: u16, y: u16, width: u16, height: u16) -> Hsl {
        let idx = self.pattern.color_index(x, y, width, height, self.colors.len());
        self.colors[idx]
    }
}

/// Up to two uppercase initials from the space-separated words of `name`.
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mulberry32_matches_reference_sequence() {
        let mut rng = Mulberry32::new(0);
        assert_eq!(rng.next_u32(), 1_144_304_738);
        assert_eq!(rng.next_u32(), 1_416_247);
        assert_eq!(rng.next_u32(), 958_946_056);

        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
    }

    #[test]
    fn generate_is_deterministic() {
        for seed in [0, 1, 42, 35_868, u32::MAX] {
            assert_eq!(Identicon::generate(seed), Identicon::generate(seed));
        }
    }

    #[test]
    fn known_seeds_produce_known_palettes() {
        let icon = Identicon::generate(0);
        assert_eq!(icon.colors.len(), 3);
        assert_eq!(icon.pattern, PatternKind::DiagonalStripes);
        assert_eq!((icon.colors[0].saturation, icon.colors[0].lightness), (66, 43));

        let icon = Identicon::generate(35_868);
        assert_eq!(icon.colors.len(), 5);
        assert_eq!(icon.pattern, PatternKind::VerticalStripes);
        assert_eq!((icon.colors[4].saturation, icon.colors[4].lightness), (76, 40));
    }

    #[test]
    fn channels_stay_in_range() {
        for seed in 0..500 {
            let icon = Identicon::generate(seed);
            assert!((2..=5).contains(&icon.colors.len()));
            for c in &icon.colors {
                assert!((0.0..360.0).contains(&c.hue));
                assert!((60..=90).contains(&c.saturation));
                assert!((40..=60).contains(&c.lightness));
            }
        }
    }

    #[test]
    fn every_pattern_indexes_inside_palette() {
        for pattern in PatternKind::ALL {
            for colors in 2..=5 {
                for y in 0..4 {
                    for x in 0..8 {
                        assert!(pattern.color_index(x, y, 8, 4, colors) < colors);
                    }
                }
            }
        }
    }

    #[test]
    fn vertical_stripes_follow_palette_order() {
        let row: Vec<usize> = (0..4)
            .map(|x| PatternKind::VerticalStripes.color_index(x, 0, 4, 1, 2))
            .collect();
        assert_eq!(row, vec![0, 0, 1, 1]);
    }

    #[test]
    fn initials_take_first_letters() {
        assert_eq!(initials("erling haaland"), "EH");
        assert_eq!(initials("  Bukayo   Saka  Jr "), "BS");
        assert_eq!(initials("Salah"), "S");
        assert_eq!(initials(""), "");
        assert_eq!(initials("   "), "");
    }

    #[test]
    fn for_name_keeps_seeded_palette() {
        let named = Identicon::for_name(7, Some("Jane Doe"));
        let plain = Identicon::generate(7);
        assert_eq!(named.colors, plain.colors);
        assert_eq!(named.initials.as_deref(), Some("JD"));
        assert_eq!(Identicon::for_name(7, None).initials, None);
    }

    #[test]
    fn hsl_converts_to_rgb() {
        let red = Hsl { hue: 0.0, saturation: 100, lightness: 50 };
        assert_eq!(red.to_rgb(), (255, 0, 0));
        let blue = Hsl { hue: 240.0, saturation: 100, lightness: 50 };
        assert_eq!(blue.to_rgb(), (0, 0, 255));
        assert_eq!(red.to_string(), "hsl(0, 100%, 50%)");
    }
}
