use chrono::{DateTime, Local, Utc};
use leptos::{component, view, IntoView, Signal, SignalGet};
use crate::color::RouteColor;

/// Sidebar row of a route currently on the map
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedRow {
    pub title: String,
    pub color: RouteColor,
    pub last_update: Option<DateTime<Utc>>,
}

impl TrackedRow {
    fn status(&self) -> String {
        self.last_update.map_or_else(
            || "waiting for first position".to_string(),
            |at| format!("updated {}", at.with_timezone(&Local).format("%H:%M:%S")),
        )
    }
}

#[component]
#[must_use]
pub fn TrackedList(rows: Signal<Vec<TrackedRow>>) -> impl IntoView {
    view! {
        <div class="tracked-list">
            {move || {
                let rows = rows.get();
                if rows.is_empty() {
                    return view! { <p class="tracked-empty">"No routes being tracked"</p> }.into_view();
                }
                rows.into_iter().map(|row| {
                    let status = row.status();
                    let swatch = format!("background-color: {}", row.color);
                    view! {
                        <div class="tracked-row">
                            <span class="tracked-swatch" style=swatch></span>
                            <span class="tracked-title">{row.title}</span>
                            <span class="tracked-status">{status}</span>
                        </div>
                    }
                }).collect::<Vec<_>>().into_view()
            }}
        </div>
    }
}
