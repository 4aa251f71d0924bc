use leptos::{component, view, IntoView, ReadSignal, Signal, SignalGet, SignalGetUntracked, SignalSet, SignalUpdate, create_effect, create_node_ref, create_signal, html};
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{MouseEvent, WheelEvent};
use crate::map::render::render_map;
use crate::map::{MapView, MarkerLayer};
use crate::models::LatLng;

const WHEEL_ZOOM_STEP: f64 = 0.5;

#[component]
#[must_use]
pub fn MapCanvas(
    markers: Signal<MarkerLayer>,
    operator: ReadSignal<Option<LatLng>>,
    center: ReadSignal<LatLng>,
    zoom: f64,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let (view, set_view) = create_signal(MapView::new(center.get_untracked(), zoom));
    let (render_requested, set_render_requested) = create_signal(false);
    let (drag_from, set_drag_from) = create_signal(None::<(f64, f64)>);

    // Recenter when the operator position resolves
    create_effect(move |_| {
        let target = center.get();
        set_view.update(|v| v.center = target);
    });

    create_effect(move |_| {
        let _ = markers.get();
        let _ = operator.get();
        let _ = view.get();

        if render_requested.get_untracked() {
            return;
        }
        set_render_requested.set(true);

        let Some(window) = web_sys::window() else { return };
        let callback = Closure::once(move || {
            set_render_requested.set(false);
            let Some(canvas) = canvas_ref.get_untracked() else { return };
            let canvas_elem: &web_sys::HtmlCanvasElement = &canvas;
            let layer = markers.get_untracked();
            render_map(canvas_elem, view.get_untracked(), &layer, operator.get_untracked());
        });

        let _ = window.request_animation_frame(callback.as_ref().unchecked_ref());
        callback.forget();
    });

    let handle_mouse_down = move |ev: MouseEvent| {
        set_drag_from.set(Some((f64::from(ev.client_x()), f64::from(ev.client_y()))));
    };

    let handle_mouse_move = move |ev: MouseEvent| {
        let Some((last_x, last_y)) = drag_from.get_untracked() else { return };
        let (x, y) = (f64::from(ev.client_x()), f64::from(ev.client_y()));
        set_view.update(|v| v.pan_by(x - last_x, y - last_y));
        set_drag_from.set(Some((x, y)));
    };

    let handle_mouse_up = move |_ev: MouseEvent| {
        set_drag_from.set(None);
    };

    let handle_wheel = move |ev: WheelEvent| {
        ev.prevent_default();
        let step = if ev.delta_y() < 0.0 { WHEEL_ZOOM_STEP } else { -WHEEL_ZOOM_STEP };
        set_view.update(|v| v.zoom_by(step));
    };

    view! {
        <div class="map-container">
            <canvas
                class="map-canvas"
                node_ref=canvas_ref
                on:mousedown=handle_mouse_down
                on:mousemove=handle_mouse_move
                on:mouseup=handle_mouse_up
                on:mouseleave=handle_mouse_up
                on:wheel=handle_wheel
                style=move || if drag_from.get().is_some() { "cursor: grabbing;" } else { "cursor: grab;" }
            ></canvas>
        </div>
    }
}
