use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: legend value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of the chosen legend column to distinct colours,
/// so each plotted series keeps a stable colour.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from a legend column's distinct values.
    pub fn new(values: &BTreeSet<CellValue>) -> Self {
        let palette = generate_palette(values.len());
        let mapping: BTreeMap<CellValue, Color32> = values
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a legend value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values_get_distinct_colors() {
        let values: BTreeSet<CellValue> = [
            CellValue::Integer(3000),
            CellValue::Integer(3500),
            CellValue::Integer(2400),
        ]
        .into_iter()
        .collect();
        let cm = ColorMap::new(&values);
        let colors: BTreeSet<_> = values
            .iter()
            .map(|v| {
                let c = cm.color_for(v);
                (c.r(), c.g(), c.b())
            })
            .collect();
        assert_eq!(colors.len(), 3);
    }

    #[test]
    fn unknown_value_gets_the_default() {
        let cm = ColorMap::new(&BTreeSet::new());
        assert_eq!(cm.color_for(&CellValue::Integer(1)), Color32::GRAY);
    }
}
