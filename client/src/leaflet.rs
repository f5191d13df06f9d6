#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use rooftop_shared::{GeoPoint, Site};

use crate::config::{
    INITIAL_ZOOM, LEUVEN_CENTER, TILE_ATTRIBUTION, TILE_MAX_ZOOM, TILE_SUBDOMAINS, TILE_URL,
};
use crate::map_sync::MapBackend;
use crate::readiness::{CancelToken, MapUnavailable, RetryPolicy, wait_until_ready};

#[wasm_bindgen]
extern "C" {
    /// The `L` namespace object.
    #[derive(Debug, Clone)]
    pub type Leaflet;

    #[wasm_bindgen(method, js_name = map)]
    fn create_map(this: &Leaflet, container: &HtmlElement) -> LeafletMap;
    #[wasm_bindgen(method, js_name = tileLayer)]
    fn tile_layer(this: &Leaflet, url: &str, options: &JsValue) -> TileLayer;
    #[wasm_bindgen(method, js_name = marker)]
    fn create_marker(this: &Leaflet, lat_lng: &JsValue) -> Marker;

    #[derive(Debug, Clone)]
    pub type LeafletMap;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: f64);
    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &LeafletMap, center: &JsValue, zoom: f64);
    #[wasm_bindgen(method, js_name = closePopup)]
    fn close_popup(this: &LeafletMap);
    #[wasm_bindgen(method, js_name = remove)]
    fn remove_map(this: &LeafletMap);
    #[wasm_bindgen(method, js_name = on)]
    fn on_map_event(this: &LeafletMap, event: &str, handler: &Function);
    #[wasm_bindgen(method, js_name = off)]
    fn off_map_event(this: &LeafletMap, event: &str, handler: &Function);

    type TileLayer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_layer_to(this: &TileLayer, map: &LeafletMap);

    #[derive(Debug, Clone)]
    pub type Marker;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Marker, map: &LeafletMap);
    #[wasm_bindgen(method, js_name = bindTooltip)]
    fn bind_tooltip(this: &Marker, content: &str);
    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Marker, content: &str);
    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &Marker);
    #[wasm_bindgen(method)]
    fn on(this: &Marker, event: &str, handler: &Function);
    #[wasm_bindgen(method)]
    fn off(this: &Marker, event: &str, handler: &Function);
    #[wasm_bindgen(method)]
    fn remove(this: &Marker);
}

fn lat_lng(point: GeoPoint) -> JsValue {
    Array::of2(&JsValue::from_f64(point.lat), &JsValue::from_f64(point.lng)).into()
}

/// Read `window.L` if the Leaflet script has run.
pub fn probe() -> Option<Leaflet> {
    let window = web_sys::window()?;
    let value = Reflect::get(window.as_ref(), &JsValue::from_str("L")).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(value.unchecked_into())
}

/// Wait for the Leaflet global under `policy`, sleeping on browser timers.
pub async fn wait_for_leaflet(
    policy: RetryPolicy,
    cancel: &CancelToken,
) -> Result<Leaflet, MapUnavailable> {
    wait_until_ready(policy, cancel, probe, |ms| {
        gloo_timers::future::TimeoutFuture::new(ms)
    })
    .await
}

pub struct LeafletMarker {
    marker: Marker,
    on_click: Closure<dyn Fn()>,
}

/// [`MapBackend`] over a live Leaflet map.
pub struct LeafletBackend {
    leaflet: Leaflet,
    map: LeafletMap,
    on_popup_close: Closure<dyn Fn()>,
    destroyed: bool,
}

impl LeafletBackend {
    /// Create the map inside `container`, centred on Leuven with the base layer.
    ///
    /// `on_popup_close` fires on every Leaflet `popupclose`, including the
    /// ones the synchronizer causes itself.
    pub fn mount(
        leaflet: Leaflet,
        container: &HtmlElement,
        on_popup_close: impl Fn() + 'static,
    ) -> Self {
        let map = leaflet.create_map(container);
        map.set_view(&lat_lng(LEUVEN_CENTER), INITIAL_ZOOM);

        let options = Object::new();
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("attribution"),
            &JsValue::from_str(TILE_ATTRIBUTION),
        );
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("subdomains"),
            &JsValue::from_str(TILE_SUBDOMAINS),
        );
        let _ = Reflect::set(
            &options,
            &JsValue::from_str("maxZoom"),
            &JsValue::from(TILE_MAX_ZOOM),
        );
        leaflet.tile_layer(TILE_URL, &options).add_layer_to(&map);

        let on_popup_close = Closure::<dyn Fn()>::new(on_popup_close);
        map.on_map_event("popupclose", on_popup_close.as_ref().unchecked_ref());

        Self {
            leaflet,
            map,
            on_popup_close,
            destroyed: false,
        }
    }
}

impl MapBackend for LeafletBackend {
    type Marker = LeafletMarker;

    fn add_marker(&mut self, site: &Site, on_click: Box<dyn Fn()>) -> LeafletMarker {
        let marker = self.leaflet.create_marker(&lat_lng(site.position));
        marker.add_to(&self.map);
        marker.bind_tooltip(&site.tooltip());
        let on_click = Closure::<dyn Fn()>::new(move || on_click());
        marker.on("click", on_click.as_ref().unchecked_ref());
        LeafletMarker { marker, on_click }
    }

    fn remove_marker(&mut self, marker: LeafletMarker) {
        marker
            .marker
            .off("click", marker.on_click.as_ref().unchecked_ref());
        marker.marker.remove();
    }

    fn fly_to(&mut self, position: GeoPoint, zoom: f64) {
        self.map.fly_to(&lat_lng(position), zoom);
    }

    fn open_popup(&mut self, marker: &LeafletMarker, html: &str) {
        marker.marker.bind_popup(html);
        marker.marker.open_popup();
    }

    fn close_popup(&mut self) {
        self.map.close_popup();
    }

    fn destroy(&mut self) {
        if !self.destroyed {
            self.destroyed = true;
            self.map
                .off_map_event("popupclose", self.on_popup_close.as_ref().unchecked_ref());
            self.map.remove_map();
        }
    }
}
