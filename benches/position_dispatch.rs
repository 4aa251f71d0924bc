use criterion::{black_box, criterion_group, criterion_main, Criterion};
use route_tracker::color::ColorAllocator;
use route_tracker::models::{LatLng, PositionNotification, Route, RouteId};
use route_tracker::realtime::{IncomingMessage, MemoryChannel, ProtocolDriver};
use route_tracker::session::TrackingSession;

const ROUTE_COUNT: usize = 200;
const STEPS_PER_ROUTE: usize = 50;

fn routes() -> Vec<Route> {
    (0..ROUTE_COUNT)
        .map(|i| {
            let offset = i as f64 * 0.001;
            Route::new(
                format!("route-{i}"),
                format!("Route {i}"),
                LatLng::new(-23.55 + offset, -46.63),
                LatLng::new(-23.60 + offset, -46.70),
            )
        })
        .collect()
}

fn tracking_session() -> TrackingSession<MemoryChannel> {
    let mut session = TrackingSession::new(MemoryChannel::new(), ColorAllocator::seeded(42));
    session.load_catalog(routes());
    for i in 0..ROUTE_COUNT {
        let _ = session.start_tracking(&RouteId::from(format!("route-{i}")));
    }
    session
}

/// One round of updates for every route, round-robin like a live backend
fn notifications() -> Vec<PositionNotification> {
    (0..STEPS_PER_ROUTE)
        .flat_map(|step| {
            (0..ROUTE_COUNT).map(move |i| {
                let t = step as f64 / STEPS_PER_ROUTE as f64;
                PositionNotification::new(
                    format!("route-{i}"),
                    LatLng::new(-23.55 - 0.05 * t, -46.63 - 0.07 * t),
                    false,
                )
            })
        })
        .collect()
}

fn position_frames(notifications: &[PositionNotification]) -> Vec<String> {
    notifications
        .iter()
        .filter_map(|n| serde_json::to_string(n).ok())
        .map(|json| format!(r#"42["new-position",{json}]"#))
        .collect()
}

fn benchmark_position_dispatch(c: &mut Criterion) {
    let notifications = notifications();
    let frames = position_frames(&notifications);

    // Session dispatch only
    c.bench_function("apply_notifications", |b| {
        b.iter_batched(
            tracking_session,
            |mut session| {
                for n in &notifications {
                    black_box(session.on_position_notification(n.clone()));
                }
                session
            },
            criterion::BatchSize::LargeInput,
        );
    });

    // Frame decoding only
    c.bench_function("decode_frames", |b| {
        b.iter(|| {
            let mut driver = ProtocolDriver::new();
            for frame in &frames {
                black_box(driver.on_frame(black_box(frame)));
            }
        });
    });

    // What the websocket handler does for every frame
    c.bench_function("frames_to_markers", |b| {
        b.iter_batched(
            || (tracking_session(), ProtocolDriver::new()),
            |(mut session, mut driver)| {
                for frame in &frames {
                    for message in driver.on_frame(frame).incoming {
                        if let IncomingMessage::PositionUpdate(_) = message {
                            black_box(session.handle_message(message));
                        }
                    }
                }
                session
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, benchmark_position_dispatch);
criterion_main!(benches);
