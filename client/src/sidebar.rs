use leptos::prelude::*;
use wasm_bindgen::JsCast;

use rooftop_shared::{Surface, format_grouped, parse_min_area};

use crate::app::Browser;
use crate::config::{AREA_STEP, slider_max};

/// Height of the sticky list header inside the scroll container.
const HEADER_OFFSET: f64 = 56.0;

fn input_value(e: &leptos::ev::Event) -> Option<String> {
    let target = e.target()?;
    if let Some(input) = target.dyn_ref::<web_sys::HtmlInputElement>() {
        return Some(input.value());
    }
    target
        .dyn_ref::<web_sys::HtmlSelectElement>()
        .map(|select| select.value())
}

/// Text to write back into the area field when what was typed is not the
/// threshold that got applied. An empty field is left alone while editing.
fn area_field_correction(text: &str, applied: f64) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.parse::<f64>().ok() == Some(applied) {
        return None;
    }
    Some(applied.to_string())
}

/// Value used by the surface `<select>`; the empty string means "all".
fn surface_option_value(surface: Option<Surface>) -> &'static str {
    surface.map(Surface::label).unwrap_or("")
}

fn parse_surface_option(value: &str) -> Option<Surface> {
    if value.is_empty() {
        None
    } else {
        Some(Surface::from_label(value))
    }
}

/// Sidebar with filter controls, the selected site and the site list.
#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <aside style="width: 420px; flex-shrink: 0; height: 100%; background: #ffffff; box-shadow: -4px 0 20px rgba(0,0,0,0.12); display: flex; flex-direction: column; overflow: hidden; z-index: 10; font-family: system-ui, -apple-system, 'Segoe UI', Roboto, Arial, sans-serif;">
            <FilterPanel />
            <DetailPanel />
            <div data-site-scroll="" style="flex: 1; overflow-y: auto;">
                <h2 style="position: sticky; top: 0; margin: 0; padding: 16px 20px; background: #ffffff; border-bottom: 1px solid #e5e7eb; font-size: 1.05rem; font-weight: 600; color: #1f2937;">
                    "Potential Rooftops List"
                </h2>
                <SiteList />
            </div>
        </aside>
    }
}

#[component]
fn FilterPanel() -> impl IntoView {
    let Browser(browser) = expect_context();
    let min_area = Memo::new(move |_| browser.with(|b| b.min_area()));
    let surface = Memo::new(move |_| browser.with(|b| b.surface()));
    let counts = Memo::new(move |_| browser.with(|b| b.counts()));
    let (max, surfaces) =
        browser.with_untracked(|b| (slider_max(b.catalog().max_area()), b.catalog().surfaces()));

    let on_area_input = move |e: leptos::ev::Event| {
        let Some(text) = input_value(&e) else {
            return;
        };
        let value = parse_min_area(&text);
        browser.update(|b| b.set_min_area(value));
        // The memo does not fire when the clamped value is unchanged.
        if let Some(corrected) = area_field_correction(&text, value)
            && let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            input.set_value(&corrected);
        }
    };

    let on_surface_change = move |e: leptos::ev::Event| {
        let Some(value) = input_value(&e) else {
            return;
        };
        browser.update(|b| b.set_surface_filter(parse_surface_option(&value)));
    };

    let on_reset = move |_| {
        browser.update(|b| b.reset());
    };

    view! {
        <div style="padding: 16px; border-bottom: 1px solid #e5e7eb;">
            <label style="font-size: 0.85rem; font-weight: 500; color: #374151;">
                "Minimum area (m²): "
                <span style="font-weight: 600;">{move || format_grouped(min_area.get())}</span>
            </label>
            <input
                type="range"
                min="0"
                max=max
                step=AREA_STEP
                prop:value=move || min_area.get().to_string()
                on:input=on_area_input
                style="width: 100%; margin-top: 8px; accent-color: #16a34a;"
            />
            <div style="display: flex; align-items: center; gap: 8px; margin-top: 8px;">
                <input
                    type="number"
                    min="0"
                    prop:value=move || min_area.get().to_string()
                    on:input=on_area_input
                    style="width: 112px; padding: 4px; border: 1px solid #d1d5db; border-radius: 4px;"
                />
                <select
                    prop:value=move || surface_option_value(surface.get())
                    on:change=on_surface_change
                    style="padding: 4px; border: 1px solid #d1d5db; border-radius: 4px; font-size: 0.8rem;"
                >
                    <option value="">"All surfaces"</option>
                    {surfaces
                        .into_iter()
                        .map(|s| view! { <option value=s.label()>{s.label()}</option> })
                        .collect_view()}
                </select>
                <button
                    on:click=on_reset
                    style="padding: 4px 12px; background: #f3f4f6; border: none; border-radius: 4px; font-size: 0.85rem; cursor: pointer;"
                >
                    "Reset"
                </button>
                <div style="margin-left: auto; font-size: 0.75rem; color: #6b7280;">
                    {move || {
                        let (shown, total) = counts.get();
                        format!("Showing {shown} / {total}")
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
fn DetailPanel() -> impl IntoView {
    let Browser(browser) = expect_context();
    let selected = Memo::new(move |_| browser.with(|b| b.selected_site().cloned()));

    view! {
        <div style="padding: 20px; border-bottom: 1px solid #e5e7eb;">
            <h2 style="margin: 0 0 16px 0; font-size: 1.05rem; font-weight: 600; color: #1f2937;">"Rooftop Details"</h2>
            {move || match selected.get() {
                Some(site) => view! {
                    <div style="display: flex; flex-direction: column; gap: 16px;">
                        <h3 style="margin: 0; font-size: 1.25rem; font-weight: 700; color: #15803d;">
                            {format!("#{}: {}", site.rank, site.name)}
                        </h3>
                        <div style="display: grid; grid-template-columns: 1fr 1fr; gap: 16px;">
                            <div style="background: #f0fdf4; padding: 12px; border-radius: 8px;">
                                <p style="margin: 0; font-size: 0.7rem; font-weight: 500; color: #166534; text-transform: uppercase;">"Usable Area"</p>
                                <p style="margin: 0; font-size: 1.5rem; font-weight: 700; color: #14532d;">
                                    {format_grouped(site.area)}
                                    <span style="font-size: 1rem;">" m²"</span>
                                </p>
                            </div>
                            <div style="background: #eff6ff; padding: 12px; border-radius: 8px;">
                                <p style="margin: 0; font-size: 0.7rem; font-weight: 500; color: #1e40af; text-transform: uppercase;">"Est. CO₂ Reduction"</p>
                                <p style="margin: 0; font-size: 1.5rem; font-weight: 700; color: #1e3a8a;">
                                    {format_grouped(site.co2)}
                                    <span style="font-size: 1rem;">" tons/yr"</span>
                                </p>
                            </div>
                        </div>
                        <div style="background: #f9fafb; padding: 12px; border-radius: 8px;">
                            <p style="margin: 0; font-size: 0.85rem; font-weight: 500; color: #374151;">"Rooftop Type"</p>
                            <p style="margin: 0; font-size: 1.1rem; font-weight: 600; color: #111827;">{site.surface.label()}</p>
                        </div>
                    </div>
                }
                .into_any(),
                None => view! {
                    <div style="display: flex; align-items: center; justify-content: center; height: 96px; background: #f9fafb; border-radius: 8px;">
                        <p style="margin: 0; color: #6b7280;">"Click a site on the map or list"</p>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn SiteList() -> impl IntoView {
    let Browser(browser) = expect_context();
    let selection = Memo::new(move |_| browser.with(|b| b.selection()));
    let rows = Memo::new(move |_| {
        browser.with(|b| {
            b.filtered_sites()
                .map(|s| (s.rank, s.name.clone(), s.area, s.co2))
                .collect::<Vec<_>>()
        })
    });

    // Keep the selected row visible when the selection comes from the map,
    // scrolling only the list container.
    Effect::new(move || {
        let Some(rank) = selection.get() else {
            return;
        };
        let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(Some(scroll_el)) = doc.query_selector("[data-site-scroll]") else {
            return;
        };
        let Ok(scroll_el) = scroll_el.dyn_into::<web_sys::HtmlElement>() else {
            return;
        };
        let Ok(Some(row)) = scroll_el.query_selector(&format!("[data-site-rank='{rank}']")) else {
            return;
        };
        let scroll_rect = scroll_el.get_bounding_client_rect();
        let row_rect = row.get_bounding_client_rect();
        let current_top = scroll_el.scroll_top();
        if row_rect.top() < scroll_rect.top() + HEADER_OFFSET {
            let delta = (row_rect.top() - scroll_rect.top() - HEADER_OFFSET).floor() as i32;
            scroll_el.set_scroll_top(current_top + delta);
        } else if row_rect.bottom() > scroll_rect.bottom() {
            let delta = (row_rect.bottom() - scroll_rect.bottom()).ceil() as i32;
            scroll_el.set_scroll_top(current_top + delta);
        }
    });

    view! {
        <ul style="list-style: none; margin: 0; padding: 0;">
            <For
                each=move || rows.get()
                key=|row| row.0
                children=move |(rank, name, area, co2)| {
                    let is_selected = move || selection.get() == Some(rank);
                    view! {
                        <li
                            data-site-rank=rank.to_string()
                            on:click=move |_| {
                                browser.update(|b| {
                                    b.select(rank);
                                });
                            }
                            style="padding: 16px; cursor: pointer; border-bottom: 1px solid #f3f4f6; transition: background 0.15s;"
                            style:background=move || if is_selected() { "#dcfce7" } else { "transparent" }
                            style:border-left=move || if is_selected() { "4px solid #16a34a" } else { "4px solid transparent" }
                        >
                            <div style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 4px;">
                                <p style="margin: 0; font-size: 0.85rem; font-weight: 600; color: #111827;">
                                    <span
                                        style="display: inline-block; width: 28px; text-align: right; margin-right: 8px;"
                                        style:color=move || if is_selected() { "#15803d" } else { "#6b7280" }
                                        style:font-weight=move || if is_selected() { "700" } else { "600" }
                                    >
                                        {format!("#{rank}")}
                                    </span>
                                    {name}
                                </p>
                                <span style="font-size: 0.75rem; font-weight: 500; color: #4b5563;">
                                    {format!("{} m²", format_grouped(area))}
                                </span>
                            </div>
                            <p style="margin: 0; font-size: 0.75rem; text-align: right; color: #2563eb;">
                                {format!("{} tons/yr CO₂ reduction", format_grouped(co2))}
                            </p>
                        </li>
                    }
                }
            />
        </ul>
    }
}
