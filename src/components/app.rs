use std::cell::RefCell;
use std::rc::Rc;
use leptos::*;
use leptos_meta::*;
use crate::api::fetch_routes;
use crate::color::ColorAllocator;
use crate::components::map_canvas::MapCanvas;
use crate::components::route_form::RouteForm;
use crate::components::toast::{push_toast, Toast, ToastStack};
use crate::components::tracked_list::{TrackedList, TrackedRow};
use crate::config::AppConfig;
use crate::geolocation::current_position;
use crate::logging::console_error;
use crate::map::MarkerLayer;
use crate::models::{LatLng, Route, RouteId};
use crate::realtime::{MemoryChannel, RealtimeChannel, SocketChannel};
use crate::session::{Notice, StartOutcome, TrackingSession};

type SharedSession = Rc<RefCell<TrackingSession<Box<dyn RealtimeChannel>>>>;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::default();
    let (toasts, set_toasts) = create_signal(Vec::<Toast>::new());
    let (routes, set_routes) = create_signal(Vec::<Route>::new());
    let (revision, set_revision) = create_signal(0_u64);
    let (operator, set_operator) = create_signal(None::<LatLng>);
    let (center, set_center) = create_signal(config.fallback_center);

    let max_toasts = config.max_toasts;
    let toast_duration = config.toast_duration_ms;
    let notify = move |notice: Notice| push_toast(set_toasts, notice, max_toasts, toast_duration);

    // Realtime channel; without one the session still loads routes but cannot start them
    let (channel, inbound) = match SocketChannel::connect(&config.socket_url()) {
        Ok(channel) => {
            let inbound = channel.inbound();
            (Box::new(channel) as Box<dyn RealtimeChannel>, Some(inbound))
        }
        Err(e) => {
            console_error!("Failed to open realtime channel: {}", e);
            notify(Notice::error(e.to_string()));
            (Box::new(MemoryChannel::closed()) as Box<dyn RealtimeChannel>, None)
        }
    };

    let session: SharedSession = Rc::new(RefCell::new(TrackingSession::new(channel, ColorAllocator::new())));

    if let Some(inbound) = inbound {
        let session = Rc::clone(&session);
        inbound.set(move |message| {
            let notice = session.borrow_mut().handle_message(message);
            set_revision.update(|r| *r += 1);
            if let Some(notice) = notice {
                notify(notice);
            }
        });
    }

    // Route catalog, loaded once
    {
        let session = Rc::clone(&session);
        let routes_url = config.routes_url();
        spawn_local(async move {
            match fetch_routes(&routes_url).await {
                Ok(loaded) => {
                    session.borrow_mut().load_catalog(loaded.clone());
                    set_routes.set(loaded);
                }
                Err(e) => {
                    console_error!("Failed to load routes: {}", e);
                    notify(Notice::error(format!("Could not load routes: {e}")));
                }
            }
        });
    }

    // Operator position, resolved once
    spawn_local(async move {
        match current_position().await {
            Ok(position) => {
                set_operator.set(Some(position));
                set_center.set(position);
            }
            Err(e) => notify(Notice::error(e.to_string())),
        }
    });

    let on_start = {
        let session = Rc::clone(&session);
        Callback::new(move |route_id: RouteId| {
            let result = session.borrow_mut().start_tracking(&route_id);
            set_revision.update(|r| *r += 1);
            match result {
                Ok(StartOutcome::Started(_)) => {}
                Ok(StartOutcome::AlreadyTracked(notice)) => notify(notice),
                Err(e) => notify(Notice::error(e.to_string())),
            }
        })
    };

    let markers = {
        let session = Rc::clone(&session);
        Signal::derive(move || -> MarkerLayer {
            let _ = revision.get();
            session.borrow().map().surface().clone()
        })
    };

    let tracked_rows = {
        let session = Rc::clone(&session);
        Signal::derive(move || {
            let _ = revision.get();
            let session = session.borrow();
            session
                .map()
                .tracked_routes()
                .map(|tracked| TrackedRow {
                    title: session.catalog().display_title(&tracked.route_id),
                    color: tracked.color.clone(),
                    last_update: tracked.last_update,
                })
                .collect::<Vec<_>>()
        })
    };

    on_cleanup(move || session.borrow_mut().shutdown());

    view! {
        <Stylesheet id="leptos" href="/pkg/route_tracker.css"/>
        <Title text="Route Tracker"/>

        <div class="app">
            <div class="sidebar">
                <div class="sidebar-header">
                    <h2>"Route Tracker"</h2>
                </div>
                <RouteForm routes=routes on_start=on_start />
                <TrackedList rows=tracked_rows />
            </div>
            <div class="main-content">
                <MapCanvas markers=markers operator=operator center=center zoom=config.clamped_zoom() />
            </div>
            <ToastStack toasts=toasts />
        </div>
    }
}
