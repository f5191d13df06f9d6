use std::collections::HashMap;
use std::rc::Rc;

use rooftop_shared::{GeoPoint, MarkerDiff, Site, SiteBrowser, escape_html, format_grouped};

/// Map-surface capabilities the synchronizer drives.
pub trait MapBackend {
    type Marker;

    /// Place a marker for `site` with a hover tooltip; `on_click` fires on click.
    fn add_marker(&mut self, site: &Site, on_click: Box<dyn Fn()>) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
    fn fly_to(&mut self, position: GeoPoint, zoom: f64);
    fn open_popup(&mut self, marker: &Self::Marker, html: &str);
    fn close_popup(&mut self);
    /// Release the map surface itself. Called once, after every marker is gone.
    fn destroy(&mut self);
}

/// Keeps one marker per visible site and points the map at the selection.
///
/// Owns every marker handle it creates. Dropping it removes them all and
/// tears down the surface.
pub struct MapSynchronizer<B: MapBackend> {
    backend: B,
    markers: HashMap<u32, B::Marker>,
    focus_zoom: f64,
    focused: Option<u32>,
    on_select: Rc<dyn Fn(u32)>,
}

impl<B: MapBackend> MapSynchronizer<B> {
    pub fn new(backend: B, focus_zoom: f64, on_select: impl Fn(u32) + 'static) -> Self {
        Self {
            backend,
            markers: HashMap::new(),
            focus_zoom,
            focused: None,
            on_select: Rc::new(on_select),
        }
    }

    pub fn marker_ranks(&self) -> Vec<u32> {
        let mut ranks: Vec<u32> = self.markers.keys().copied().collect();
        ranks.sort_unstable();
        ranks
    }

    /// Rank whose popup is currently open.
    pub fn focused(&self) -> Option<u32> {
        self.focused
    }

    /// Bring markers and popup in line with the browser state.
    pub fn apply(&mut self, view: &SiteBrowser) {
        self.sync_view(view.filtered_sites());
        self.focus(view.selected_site());
    }

    /// Add markers for new sites and drop markers for departed ones.
    pub fn sync_view<'a>(&mut self, view: impl IntoIterator<Item = &'a Site>) -> MarkerDiff {
        let wanted: HashMap<u32, &Site> = view.into_iter().map(|s| (s.rank, s)).collect();
        let diff = MarkerDiff::between(self.markers.keys().copied(), wanted.keys().copied());

        for rank in &diff.remove {
            if let Some(marker) = self.markers.remove(rank) {
                if self.focused == Some(*rank) {
                    self.backend.close_popup();
                    self.focused = None;
                }
                self.backend.remove_marker(marker);
            }
        }

        for rank in &diff.add {
            let Some(site) = wanted.get(rank) else {
                continue;
            };
            let on_select = Rc::clone(&self.on_select);
            let rank = *rank;
            let marker = self
                .backend
                .add_marker(site, Box::new(move || on_select(rank)));
            self.markers.insert(rank, marker);
        }

        diff
    }

    /// Fly to and pop up `site`, or close the popup when `None`.
    pub fn focus(&mut self, site: Option<&Site>) {
        match site {
            None => {
                if self.focused.take().is_some() {
                    self.backend.close_popup();
                }
            }
            Some(site) if self.focused == Some(site.rank) => {}
            Some(site) => {
                let Some(marker) = self.markers.get(&site.rank) else {
                    if self.focused.take().is_some() {
                        self.backend.close_popup();
                    }
                    return;
                };
                self.backend.fly_to(site.position, self.focus_zoom);
                self.backend.open_popup(marker, &popup_html(site));
                self.focused = Some(site.rank);
            }
        }
    }

    /// The popup was closed on the map itself. Returns the rank it belonged
    /// to, so the caller can drop the matching selection.
    pub fn popup_dismissed(&mut self) -> Option<u32> {
        self.focused.take()
    }

    fn release(&mut self) {
        if self.focused.take().is_some() {
            self.backend.close_popup();
        }
        for (_, marker) in self.markers.drain() {
            self.backend.remove_marker(marker);
        }
        self.backend.destroy();
    }
}

impl<B: MapBackend> Drop for MapSynchronizer<B> {
    fn drop(&mut self) {
        self.release();
    }
}

pub fn popup_html(site: &Site) -> String {
    format!(
        r#"<div style="font-family:system-ui,-apple-system,'Segoe UI',Roboto,Arial,sans-serif;min-width:180px;">
<h4 style="margin:0 0 4px 0;font-weight:700;color:#166534;">#{rank}: {name}</h4>
<p style="margin:0;font-size:12px;"><strong>Area:</strong> {area} m²</p>
<p style="margin:0;font-size:12px;"><strong>CO₂:</strong> {co2} tons/yr</p>
<p style="margin:0;font-size:12px;color:#4b5563;">{surface}</p>
</div>"#,
        rank = site.rank,
        name = escape_html(&site.name),
        area = format_grouped(site.area),
        co2 = format_grouped(site.co2),
        surface = site.surface,
    )
}
