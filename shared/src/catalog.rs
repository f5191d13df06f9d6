use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::site::{Site, Surface};

const BUNDLED_SITES: &str = include_str!("../data/leuven_sites.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("site data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("site rank must be positive (site {name:?})")]
    ZeroRank { name: String },
    #[error("rank {0} appears more than once")]
    DuplicateRank(u32),
    #[error("site #{rank} has invalid {field}: {value}")]
    InvalidQuantity {
        rank: u32,
        field: &'static str,
        value: f64,
    },
    #[error("site #{0} has a non-finite position")]
    InvalidPosition(u32),
}

/// Immutable, rank-ordered collection of every known site.
///
/// Cloning is cheap; all clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct SiteCatalog {
    sites: Arc<[Site]>,
}

impl SiteCatalog {
    /// The survey list compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_SITES)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let sites: Vec<Site> = serde_json::from_str(json)?;
        Self::from_sites(sites)
    }

    pub fn from_sites(mut sites: Vec<Site>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(sites.len());
        for site in &sites {
            validate(site)?;
            if !seen.insert(site.rank) {
                return Err(CatalogError::DuplicateRank(site.rank));
            }
        }
        sites.sort_by_key(|s| s.rank);
        Ok(Self {
            sites: sites.into(),
        })
    }

    /// All sites, rank ascending.
    pub fn all(&self) -> &[Site] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, rank: u32) -> Option<&Site> {
        self.sites
            .binary_search_by_key(&rank, |s| s.rank)
            .ok()
            .map(|idx| &self.sites[idx])
    }

    pub fn max_area(&self) -> f64 {
        self.sites.iter().map(|s| s.area).fold(0.0, f64::max)
    }

    /// Distinct surface types present, in declaration order.
    pub fn surfaces(&self) -> Vec<Surface> {
        Surface::ALL
            .into_iter()
            .filter(|surface| self.sites.iter().any(|s| s.surface == *surface))
            .collect()
    }
}

fn validate(site: &Site) -> Result<(), CatalogError> {
    if site.rank == 0 {
        return Err(CatalogError::ZeroRank {
            name: site.name.clone(),
        });
    }
    for (field, value) in [("area", site.area), ("co2", site.co2)] {
        if !value.is_finite() || value < 0.0 {
            return Err(CatalogError::InvalidQuantity {
                rank: site.rank,
                field,
                value,
            });
        }
    }
    if !site.position.is_finite() {
        return Err(CatalogError::InvalidPosition(site.rank));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::GeoPoint;

    fn site(rank: u32, area: f64) -> Site {
        Site {
            rank,
            name: format!("Site {rank}"),
            area,
            co2: area / 16.0,
            surface: Surface::Epdm,
            position: GeoPoint::new(50.88, 4.70),
        }
    }

    #[test]
    fn bundled_catalog_loads_in_rank_order() {
        let catalog = SiteCatalog::bundled().unwrap();
        assert_eq!(catalog.len(), 20);
        let ranks: Vec<u32> = catalog.all().iter().map(|s| s.rank).collect();
        assert_eq!(ranks, (1..=20).collect::<Vec<_>>());
        assert_eq!(catalog.get(2).map(|s| s.name.as_str()), Some("UZ Gasthuisberg"));
        assert_eq!(catalog.max_area(), 56691.0);
    }

    #[test]
    fn sorts_unordered_input_by_rank() {
        let catalog = SiteCatalog::from_sites(vec![site(3, 1.0), site(1, 2.0), site(2, 3.0)]).unwrap();
        let ranks: Vec<u32> = catalog.all().iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn rejects_duplicate_rank() {
        let err = SiteCatalog::from_sites(vec![site(1, 1.0), site(1, 2.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateRank(1)));
    }

    #[test]
    fn rejects_zero_rank() {
        let err = SiteCatalog::from_sites(vec![site(0, 1.0)]).unwrap_err();
        assert!(matches!(err, CatalogError::ZeroRank { .. }));
    }

    #[test]
    fn rejects_negative_area() {
        let err = SiteCatalog::from_sites(vec![site(5, -1.0)]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidQuantity {
                rank: 5,
                field: "area",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_finite_position() {
        let mut bad = site(7, 10.0);
        bad.position.lat = f64::NAN;
        let err = SiteCatalog::from_sites(vec![bad]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPosition(7)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SiteCatalog::from_json("[{\"rank\": 1").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn lookup_of_missing_rank_is_none() {
        let catalog = SiteCatalog::from_sites(vec![site(1, 1.0), site(4, 1.0)]).unwrap();
        assert!(catalog.get(2).is_none());
        assert!(catalog.get(999).is_none());
    }

    #[test]
    fn surfaces_lists_only_present_types() {
        let mut steel = site(2, 1.0);
        steel.surface = Surface::Steel;
        let catalog = SiteCatalog::from_sites(vec![site(1, 1.0), steel]).unwrap();
        assert_eq!(catalog.surfaces(), vec![Surface::Epdm, Surface::Steel]);
    }

    #[test]
    fn empty_catalog_has_zero_max_area() {
        let catalog = SiteCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.max_area(), 0.0);
    }
}
