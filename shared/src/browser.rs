use crate::catalog::SiteCatalog;
use crate::filter::{SiteFilter, clamp_min_area};
use crate::site::{Site, Surface};

/// Filter and selection state over a [`SiteCatalog`].
///
/// Every mutation recomputes the filtered view first and only then checks
/// that the selection still points into it, so a caller can never observe a
/// selection outside the view.
#[derive(Debug, Clone)]
pub struct SiteBrowser {
    catalog: SiteCatalog,
    filter: SiteFilter,
    /// Indices into `catalog.all()`, rank ascending.
    filtered: Vec<usize>,
    selection: Option<u32>,
}

impl SiteBrowser {
    pub fn new(catalog: SiteCatalog) -> Self {
        let mut browser = Self {
            catalog,
            filter: SiteFilter::default(),
            filtered: Vec::new(),
            selection: None,
        };
        browser.recompute();
        browser
    }

    pub fn catalog(&self) -> &SiteCatalog {
        &self.catalog
    }

    pub fn filter(&self) -> SiteFilter {
        self.filter
    }

    pub fn min_area(&self) -> f64 {
        self.filter.min_area
    }

    pub fn surface(&self) -> Option<Surface> {
        self.filter.surface
    }

    pub fn set_min_area(&mut self, value: f64) {
        self.filter.min_area = clamp_min_area(value);
        self.recompute();
    }

    pub fn set_surface_filter(&mut self, surface: Option<Surface>) {
        self.filter.surface = surface;
        self.recompute();
    }

    /// Back to the unfiltered view.
    pub fn reset(&mut self) {
        self.filter = SiteFilter::default();
        self.recompute();
    }

    /// Select `rank` if it is in the current view. Returns whether it was.
    pub fn select(&mut self, rank: u32) -> bool {
        if self.contains(rank) {
            self.selection = Some(rank);
            true
        } else {
            false
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn selection(&self) -> Option<u32> {
        self.selection
    }

    pub fn selected_site(&self) -> Option<&Site> {
        self.selection.and_then(|rank| self.catalog.get(rank))
    }

    pub fn contains(&self, rank: u32) -> bool {
        self.filtered_sites().any(|s| s.rank == rank)
    }

    pub fn filtered_sites(&self) -> impl Iterator<Item = &Site> + '_ {
        let all = self.catalog.all();
        self.filtered.iter().map(move |&idx| &all[idx])
    }

    pub fn filtered_ranks(&self) -> Vec<u32> {
        self.filtered_sites().map(|s| s.rank).collect()
    }

    /// `(shown, total)` for the list readout.
    pub fn counts(&self) -> (usize, usize) {
        (self.filtered.len(), self.catalog.len())
    }

    fn recompute(&mut self) {
        // Catalog order is already rank ascending, so filtering preserves it.
        self.filtered = self
            .catalog
            .all()
            .iter()
            .enumerate()
            .filter(|(_, site)| self.filter.matches(site))
            .map(|(idx, _)| idx)
            .collect();

        if let Some(rank) = self.selection
            && !self.contains(rank)
        {
            self.selection = None;
        }
    }
}
