use serde::{Deserialize, Serialize};

/// Roof surface category, as labelled in the site survey.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Surface {
    Epdm,
    Bitumen,
    Steel,
    Gravel,
    Slate,
    Tile,
    #[default]
    Unknown,
}

impl Surface {
    pub const ALL: [Surface; 7] = [
        Surface::Epdm,
        Surface::Bitumen,
        Surface::Steel,
        Surface::Gravel,
        Surface::Slate,
        Surface::Tile,
        Surface::Unknown,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Surface::Epdm => "EPDM",
            Surface::Bitumen => "Bitumen",
            Surface::Steel => "Steel",
            Surface::Gravel => "Gravel",
            Surface::Slate => "Slate",
            Surface::Tile => "Tile",
            Surface::Unknown => "Unknown",
        }
    }

    /// Case-insensitive lookup; anything unrecognised maps to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label))
            .unwrap_or(Surface::Unknown)
    }
}

impl From<String> for Surface {
    fn from(value: String) -> Self {
        Surface::from_label(&value)
    }
}

impl From<Surface> for String {
    fn from(value: Surface) -> Self {
        value.label().to_string()
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

/// One candidate rooftop. Built once at load time and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub rank: u32,
    pub name: String,
    /// Usable area in m².
    pub area: f64,
    /// Estimated CO₂ reduction in tonnes per year.
    pub co2: f64,
    #[serde(rename = "type", default)]
    pub surface: Surface,
    #[serde(flatten)]
    pub position: GeoPoint,
}

impl Site {
    /// Short label used for map tooltips, e.g. `#2 UZ Gasthuisberg (Bitumen)`.
    pub fn tooltip(&self) -> String {
        format!("#{} {} ({})", self.rank, self.name, self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_labels_parse_case_insensitively() {
        assert_eq!(Surface::from_label("epdm"), Surface::Epdm);
        assert_eq!(Surface::from_label(" Bitumen "), Surface::Bitumen);
        assert_eq!(Surface::from_label("GRAVEL"), Surface::Gravel);
    }

    #[test]
    fn unrecognised_surface_is_unknown() {
        assert_eq!(Surface::from_label("Thatch"), Surface::Unknown);
        assert_eq!(Surface::from_label(""), Surface::Unknown);
    }

    #[test]
    fn site_deserializes_from_survey_record() {
        let json = r#"{"rank": 2, "name": "UZ Gasthuisberg", "area": 32149, "co2": 2000,
            "type": "Bitumen", "lat": 50.8841, "lng": 4.6788}"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.rank, 2);
        assert_eq!(site.surface, Surface::Bitumen);
        assert_eq!(site.position, GeoPoint::new(50.8841, 4.6788));
        assert_eq!(site.area, 32149.0);
    }

    #[test]
    fn missing_surface_defaults_to_unknown() {
        let json = r#"{"rank": 9, "name": "X", "area": 1, "co2": 1, "lat": 0.0, "lon": 1.5}"#;
        let site: Site = serde_json::from_str(json).unwrap();
        assert_eq!(site.surface, Surface::Unknown);
        assert_eq!(site.position.lng, 1.5);
    }

    #[test]
    fn tooltip_includes_rank_name_and_surface() {
        let site = Site {
            rank: 4,
            name: "Terumo Europe".into(),
            area: 17971.0,
            co2: 1100.0,
            surface: Surface::Steel,
            position: GeoPoint::new(50.871, 4.72),
        };
        assert_eq!(site.tooltip(), "#4 Terumo Europe (Steel)");
    }
}
