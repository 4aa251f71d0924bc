use leptos::{component, view, IntoView, ReadSignal, SignalGet, SignalGetUntracked, SignalSet, Callback, Callable, create_signal, event_target_value};
use crate::models::{Route, RouteId};

#[component]
#[must_use]
pub fn RouteForm(routes: ReadSignal<Vec<Route>>, on_start: Callback<RouteId>) -> impl IntoView {
    let (selected, set_selected) = create_signal(String::new());

    let handle_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let route_id = selected.get_untracked();
        if !route_id.is_empty() {
            on_start.call(RouteId::from(route_id));
        }
    };

    view! {
        <form class="route-form" on:submit=handle_submit>
            <select
                class="route-select"
                on:change=move |ev| set_selected.set(event_target_value(&ev))
                prop:value=move || selected.get()
            >
                <option value="">"Select a route"</option>
                {move || {
                    routes.get().into_iter().map(|route| {
                        view! {
                            <option value=route.id.to_string()>{route.title}</option>
                        }
                    }).collect::<Vec<_>>()
                }}
            </select>
            <div class="route-form-submit">
                <button type="submit" disabled=move || selected.get().is_empty()>
                    "Start a route"
                </button>
            </div>
        </form>
    }
}
