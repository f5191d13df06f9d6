use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use rooftop_shared::{SiteBrowser, SiteCatalog};

use crate::map_pane::MapPane;
use crate::sidebar::Sidebar;

/// Shared filter/selection state, provided via context.
#[derive(Clone, Copy)]
pub(crate) struct Browser(pub RwSignal<SiteBrowser>);

struct KeydownBinding {
    window: web_sys::Window,
    handler: Closure<dyn Fn(web_sys::KeyboardEvent)>,
}

thread_local! {
    static KEYDOWN_BINDING: RefCell<Option<KeydownBinding>> = const { RefCell::new(None) };
}

fn unbind_keydown() {
    KEYDOWN_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old
                .window
                .remove_event_listener_with_callback("keydown", old.handler.as_ref().unchecked_ref());
        }
    });
}

fn load_catalog() -> SiteCatalog {
    match SiteCatalog::bundled() {
        Ok(catalog) => catalog,
        Err(e) => {
            web_sys::console::error_1(&format!("Site data failed to load: {e}").into());
            SiteCatalog::default()
        }
    }
}

/// Every session starts unfiltered with nothing selected.
fn initial_browser() -> SiteBrowser {
    SiteBrowser::new(load_catalog())
}

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    let initial = initial_browser();
    let total = initial.catalog().len();
    let browser: RwSignal<SiteBrowser> = RwSignal::new(initial);
    provide_context(Browser(browser));

    // Escape clears the selection unless the user is typing.
    Effect::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        unbind_keydown();

        let handler =
            Closure::<dyn Fn(web_sys::KeyboardEvent)>::new(move |e: web_sys::KeyboardEvent| {
                if e.key() != "Escape" {
                    return;
                }
                let typing = e
                    .target()
                    .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| el.tag_name())
                    .is_some_and(|tag| tag == "INPUT" || tag == "TEXTAREA");
                if !typing {
                    browser.update(|b| b.clear_selection());
                }
            });
        if window
            .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
            .is_err()
        {
            return;
        }
        KEYDOWN_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(KeydownBinding {
                window: window.clone(),
                handler,
            });
        });
    });
    on_cleanup(unbind_keydown);

    view! {
        <div style="display: flex; height: 100vh; width: 100vw; overflow: hidden; background: #f3f4f6; font-family: system-ui, -apple-system, 'Segoe UI', Roboto, Arial, sans-serif;">
            <div style="flex: 1; height: 100%; min-height: 0; position: relative; display: flex;">
                <MapPane />
                <div style="position: absolute; top: 16px; left: 56px; z-index: 1000; padding: 12px; background: #ffffff; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.15);">
                    <h1 style="margin: 0; font-size: 1.25rem; font-weight: 700; color: #1f2937;">"☀️ Leuven Solar Rooftop Analyzer"</h1>
                    <p style="margin: 0; font-size: 0.85rem; color: #4b5563;">{format!("Top {total} Potential Sites")}</p>
                </div>
            </div>
            <Sidebar />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::initial_browser;

    #[test]
    fn starts_with_every_site_and_no_threshold() {
        let browser = initial_browser();
        assert_eq!(browser.min_area(), 0.0);
        assert_eq!(browser.surface(), None);
        assert_eq!(browser.selection(), None);
        assert_eq!(browser.counts(), (20, 20));
        assert_eq!(browser.filtered_ranks(), (1..=20).collect::<Vec<_>>());
    }
}
