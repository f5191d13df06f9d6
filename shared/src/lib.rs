pub mod browser;
pub mod catalog;
pub mod filter;
pub mod format;
pub mod reconcile;
pub mod site;

pub use browser::SiteBrowser;
pub use catalog::{CatalogError, SiteCatalog};
pub use filter::{SiteFilter, clamp_min_area, parse_min_area};
pub use format::{escape_html, format_grouped};
pub use reconcile::MarkerDiff;
pub use site::{GeoPoint, Site, Surface};
