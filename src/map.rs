//! Country heatmap model.
//!
//! Heatmap entries arrive keyed by state code, the geometry by full state
//! name. [`HeatmapView::build`] joins the two and assigns each state a color
//! on a linear scale from `#ffedea` (nothing reported) to `#ff5233` (the
//! largest total).

use std::collections::HashMap;

use serde::Serialize;

use crate::api::HeatmapEntry;
use crate::states;

/// Lightest color of the scale.
pub const LOW_COLOR: Rgb = Rgb(0xff, 0xed, 0xea);
/// Darkest color of the scale.
pub const HIGH_COLOR: Rgb = Rgb(0xff, 0x52, 0x33);
/// Scale domain used when every state is at zero.
pub const FALLBACK_MAX: f64 = 100_000.0;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Linear color for `amount` over the domain `[0, max]`.
pub fn color_for(amount: f64, max: f64) -> Rgb {
    let domain = if max > 0.0 { max } else { FALLBACK_MAX };
    let t = (amount / domain).clamp(0.0, 1.0);
    let lerp = |lo: u8, hi: u8| -> u8 {
        (f64::from(lo) + (f64::from(hi) - f64::from(lo)) * t).round() as u8
    };
    Rgb(
        lerp(LOW_COLOR.0, HIGH_COLOR.0),
        lerp(LOW_COLOR.1, HIGH_COLOR.1),
        lerp(LOW_COLOR.2, HIGH_COLOR.2),
    )
}

/// One state on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapRow {
    /// Full state name as drawn by the geometry.
    pub name: String,
    /// State code, when the name is known.
    pub code: Option<String>,
    pub amount: f64,
    pub reports: u64,
    /// Position on the color scale, 0.0–1.0.
    pub intensity: f64,
    pub color: Rgb,
}

impl MapRow {
    /// Only states with reports and a known code lead to a drill-down.
    pub fn drill_down_code(&self) -> Option<&str> {
        if self.amount > 0.0 {
            self.code.as_deref()
        } else {
            None
        }
    }
}

/// The joined heatmap, largest totals first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapView {
    pub rows: Vec<MapRow>,
    pub max_amount: f64,
    /// Whether rows come from the geometry file or only from heatmap data.
    pub with_geometry: bool,
}

impl HeatmapView {
    /// Join heatmap entries with the geometry's state names.
    ///
    /// With geometry, every drawn state gets a row (zero when unreported).
    /// Without it, rows are exactly the heatmap entries.
    pub fn build(entries: &[HeatmapEntry], geometry: Option<&[String]>) -> Self {
        // Full name → (amount, reports); later duplicates overwrite.
        let mut totals: HashMap<String, (f64, u64)> = HashMap::new();
        let mut order: Vec<String> = Vec::new();
        let mut max_amount: f64 = 0.0;

        for entry in entries {
            let name = states::by_code(&entry.state_name)
                .map_or_else(|| entry.state_name.clone(), |s| s.name.to_string());
            if totals
                .insert(name.clone(), (entry.total_amount, entry.report_count))
                .is_none()
            {
                order.push(name);
            }
            if entry.total_amount > max_amount {
                max_amount = entry.total_amount;
            }
        }

        let names: Vec<String> = match geometry {
            Some(names) => names.to_vec(),
            None => order,
        };

        let mut rows: Vec<MapRow> = names
            .into_iter()
            .map(|name| {
                let (amount, reports) = lookup(&totals, &name);
                let domain = if max_amount > 0.0 { max_amount } else { FALLBACK_MAX };
                MapRow {
                    code: states::by_name(&name).map(|s| s.code.to_string()),
                    amount,
                    reports,
                    intensity: (amount / domain).clamp(0.0, 1.0),
                    color: color_for(amount, max_amount),
                    name,
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Self {
            rows,
            max_amount,
            with_geometry: geometry.is_some(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn reported_states(&self) -> usize {
        self.rows.iter().filter(|r| r.amount > 0.0).count()
    }
}

/// Find a geometry name's totals, also trying the state's other spellings.
fn lookup(totals: &HashMap<String, (f64, u64)>, name: &str) -> (f64, u64) {
    if let Some(found) = totals.get(name) {
        return *found;
    }
    states::by_name(name)
        .and_then(|state| {
            std::iter::once(state.name)
                .chain(state.aliases.iter().copied())
                .find_map(|n| totals.get(n).copied())
        })
        .unwrap_or((0.0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(code: &str, amount: f64, reports: u64) -> HeatmapEntry {
        HeatmapEntry {
            state_name: code.to_string(),
            total_amount: amount,
            report_count: reports,
        }
    }

    #[test]
    fn scale_endpoints() {
        assert_eq!(color_for(0.0, 5000.0), LOW_COLOR);
        assert_eq!(color_for(5000.0, 5000.0), HIGH_COLOR);
        assert_eq!(color_for(0.0, 0.0).hex(), "#ffedea");
        // green channel: 0xed + (0x52 - 0xed) / 2 = 159.5, rounds to 0xa0
        let mid = color_for(50_000.0, 0.0);
        assert_eq!(mid.0, 0xff);
        assert_eq!(mid.1, 0xa0);
    }

    #[test]
    fn without_geometry_rows_are_entries() {
        let view = HeatmapView::build(&[entry("KA", 2000.0, 2), entry("MH", 9000.0, 5)], None);
        assert!(!view.with_geometry);
        assert_eq!(view.max_amount, 9000.0);
        assert_eq!(view.rows[0].name, "Maharashtra");
        assert_eq!(view.rows[0].drill_down_code(), Some("MH"));
        assert_eq!(view.rows[0].color, HIGH_COLOR);
        assert_eq!(view.rows[1].name, "Karnataka");
    }

    #[test]
    fn geometry_adds_unreported_states() {
        let geometry = vec![
            "Maharashtra".to_string(),
            "Orissa".to_string(),
            "Goa".to_string(),
        ];
        let view = HeatmapView::build(&[entry("MH", 9000.0, 5), entry("OR", 3000.0, 1)], Some(&geometry));

        assert_eq!(view.rows.len(), 3);
        assert_eq!(view.reported_states(), 2);
        let orissa = view.rows.iter().find(|r| r.name == "Orissa").unwrap();
        assert_eq!(orissa.amount, 3000.0);
        assert_eq!(orissa.drill_down_code(), Some("OR"));
        let goa = view.rows.iter().find(|r| r.name == "Goa").unwrap();
        assert_eq!(goa.amount, 0.0);
        assert_eq!(goa.drill_down_code(), None);
        assert_eq!(goa.color, LOW_COLOR);
    }

    #[test]
    fn unknown_codes_keep_their_label() {
        let view = HeatmapView::build(&[entry("XX", 10.0, 1)], None);
        assert_eq!(view.rows[0].name, "XX");
        assert_eq!(view.rows[0].drill_down_code(), None);
    }
}
