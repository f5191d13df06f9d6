use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::Browser;
use crate::config::{LEAFLET_WAIT, SELECTED_ZOOM};
use crate::leaflet::{self, Leaflet, LeafletBackend};
use crate::map_sync::MapSynchronizer;
use crate::readiness::{CancelToken, MapUnavailable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapStatus {
    Waiting,
    Ready,
    Unavailable,
}

thread_local! {
    static MAP_SYNC: RefCell<Option<MapSynchronizer<LeafletBackend>>> = const { RefCell::new(None) };
}

fn teardown() {
    // Dropping the synchronizer removes every marker and the Leaflet map.
    let old = MAP_SYNC.with(|slot| slot.borrow_mut().take());
    drop(old);
}

async fn await_leaflet(
    container: &web_sys::HtmlElement,
    cancel: &CancelToken,
) -> Result<Leaflet, MapUnavailable> {
    if !container.is_connected() {
        return Err(MapUnavailable::MissingContainer);
    }
    leaflet::wait_for_leaflet(LEAFLET_WAIT, cancel).await
}

/// Leaflet map pane. Stays inert, with a notice, if Leaflet never loads.
#[component]
pub fn MapPane() -> impl IntoView {
    let Browser(browser) = expect_context();
    let container = NodeRef::<leptos::html::Div>::new();
    let status: RwSignal<MapStatus> = RwSignal::new(MapStatus::Waiting);
    let started: RwSignal<bool> = RwSignal::new(false);
    let cancel = CancelToken::default();

    on_cleanup({
        let cancel = cancel.clone();
        move || {
            cancel.cancel();
            teardown();
        }
    });

    // Wait for Leaflet once the container exists, then build the map.
    Effect::new(move || {
        let Some(div) = container.get() else {
            return;
        };
        if started.get_untracked() {
            return;
        }
        started.set(true);

        let cancel = cancel.clone();
        let el: web_sys::HtmlElement = div.into();
        spawn_local(async move {
            match await_leaflet(&el, &cancel).await {
                Ok(l) => {
                    // Closing the popup on the map drops the selection with it.
                    // Closes caused by the synchronizer run while it is borrowed
                    // and are skipped here.
                    let backend = LeafletBackend::mount(l, &el, move || {
                        let dismissed = MAP_SYNC.with(|slot| {
                            slot.try_borrow_mut()
                                .ok()
                                .and_then(|mut sync| sync.as_mut()?.popup_dismissed())
                        });
                        if dismissed.is_some() {
                            browser.update(|b| b.clear_selection());
                        }
                    });
                    let sync = MapSynchronizer::new(backend, SELECTED_ZOOM, move |rank| {
                        browser.update(|b| {
                            b.select(rank);
                        });
                    });
                    teardown();
                    MAP_SYNC.with(|slot| *slot.borrow_mut() = Some(sync));
                    web_sys::console::info_1(&"map ready".into());
                    status.set(MapStatus::Ready);
                }
                Err(MapUnavailable::Cancelled) => {}
                Err(e) => {
                    web_sys::console::error_1(&format!("Map disabled: {e}").into());
                    status.set(MapStatus::Unavailable);
                }
            }
        });
    });

    // Reconcile markers and popup with every filter or selection change.
    Effect::new(move || {
        if status.get() != MapStatus::Ready {
            return;
        }
        browser.with(|b| {
            MAP_SYNC.with(|slot| {
                if let Some(sync) = slot.borrow_mut().as_mut() {
                    sync.apply(b);
                }
            });
        });
    });

    view! {
        <div style="flex: 1; min-height: 0; position: relative;">
            <div node_ref=container style="height: 100%; width: 100%;" />
            <Show when=move || status.get() == MapStatus::Unavailable>
                <div style="position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; background: #f3f4f6; color: #6b7280; font-family: system-ui, sans-serif; font-size: 0.9rem;">
                    "Map unavailable. The list and filters still work."
                </div>
            </Show>
        </div>
    }
}
