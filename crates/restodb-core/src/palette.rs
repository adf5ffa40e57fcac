// crates/restodb-core/src/palette.rs

//! Category colors.
//!
//! Colors are sampled from the viridis gradient at `linspace(0, 1, n)`, one
//! sample per distinct category. Categories are sorted before sampling so the
//! mapping depends only on the *set* of categories, never on row order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Viridis control points `(position, r, g, b)`, sampled every 32 steps of
/// the 256-entry table. Values in between are linearly interpolated.
const VIRIDIS: [(f32, f32, f32, f32); 9] = [
    (0.0, 0.267004, 0.004874, 0.329415),
    (32.0 / 255.0, 0.282623, 0.140926, 0.457517),
    (64.0 / 255.0, 0.229739, 0.322361, 0.545706),
    (96.0 / 255.0, 0.172719, 0.448791, 0.557885),
    (128.0 / 255.0, 0.127568, 0.566949, 0.550556),
    (160.0 / 255.0, 0.134692, 0.658636, 0.517649),
    (192.0 / 255.0, 0.369214, 0.788888, 0.382914),
    (224.0 / 255.0, 0.678489, 0.863742, 0.189503),
    (1.0, 0.993248, 0.906157, 0.143936),
];

/// An RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

/// Samples viridis at `t`, clamped to `[0, 1]`.
pub fn viridis(t: f64) -> Rgba {
    let t = t.clamp(0.0, 1.0) as f32;
    for pair in VIRIDIS.windows(2) {
        let (p0, r0, g0, b0) = pair[0];
        let (p1, r1, g1, b1) = pair[1];
        if t <= p1 {
            let f = if p1 > p0 { (t - p0) / (p1 - p0) } else { 0.0 };
            return Rgba::opaque(r0 + (r1 - r0) * f, g0 + (g1 - g0) * f, b0 + (b1 - b0) * f);
        }
    }
    let (_, r, g, b) = VIRIDIS[VIRIDIS.len() - 1];
    Rgba::opaque(r, g, b)
}

/// `n` evenly spaced viridis samples from start to end.
pub fn viridis_samples(n: usize) -> Vec<Rgba> {
    match n {
        0 => Vec::new(),
        1 => vec![viridis(0.0)],
        _ => (0..n)
            .map(|i| viridis(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

/// Ordered `category -> color` mapping built once per load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Sorted by category.
    entries: Vec<(String, Rgba)>,
}

impl Palette {
    /// Builds the palette from any iterator of category names (duplicates ok).
    pub fn from_categories<'a, I>(categories: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = categories.into_iter().collect();
        let colors = viridis_samples(distinct.len());
        let entries = distinct
            .into_iter()
            .zip(colors)
            .map(|(c, color)| (c.to_owned(), color))
            .collect();
        Self { entries }
    }

    pub fn color_for(&self, category: &str) -> Option<Rgba> {
        self.entries
            .binary_search_by(|(c, _)| c.as_str().cmp(category))
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Categories in palette order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn entries(&self) -> &[(String, Rgba)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
