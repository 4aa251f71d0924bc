use crate::catalog::RouteCatalog;
use crate::color::{ColorAllocator, RouteColor};
use crate::error::TrackingError;
use crate::logging::{console_warn, log};
use crate::map::{MapController, MapSurface, MarkerLayer, RouteMarkerOptions};
use crate::models::{PositionNotification, Route, RouteId, StartCommand};
use crate::realtime::{ConnectionStatus, IncomingMessage, RealtimeChannel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
    Info,
}

/// Non-blocking message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }
}

/// Result of asking to track a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// Markers placed and the start command handed to the channel
    Started(RouteColor),
    /// The route is still being tracked; nothing was sent
    AlreadyTracked(Notice),
}

/// Ties the route catalog, the map controller and the realtime channel together
///
/// Per route the observable states are Idle (no tracked entry) and Active (an
/// entry exists). `start_tracking` moves Idle → Active, a `finished`
/// notification moves Active → Idle, and starting an Active route is rejected
/// without touching the channel.
pub struct TrackingSession<C: RealtimeChannel, S: MapSurface = MarkerLayer> {
    catalog: RouteCatalog,
    map: MapController<S>,
    channel: C,
    colors: ColorAllocator,
    status: ConnectionStatus,
}

impl<C: RealtimeChannel> TrackingSession<C, MarkerLayer> {
    pub fn new(channel: C, colors: ColorAllocator) -> Self {
        Self::with_surface(channel, MarkerLayer::new(), colors)
    }
}

impl<C: RealtimeChannel, S: MapSurface> TrackingSession<C, S> {
    pub fn with_surface(channel: C, surface: S, colors: ColorAllocator) -> Self {
        Self {
            catalog: RouteCatalog::new(),
            map: MapController::with_surface(surface),
            channel,
            colors,
            status: ConnectionStatus::Connecting,
        }
    }

    /// Replace the catalog with a freshly fetched listing
    pub fn load_catalog(&mut self, routes: Vec<Route>) {
        log!("Loaded {} routes", routes.len());
        self.catalog = RouteCatalog::from_routes(routes);
    }

    /// Place a route on the map and ask the backend to start moving it
    ///
    /// # Errors
    ///
    /// Returns `RouteNotFound` if the catalog does not know the route (nothing
    /// is changed), or a channel error if the start command cannot be sent (the
    /// markers just placed are removed again).
    pub fn start_tracking(&mut self, route_id: &RouteId) -> Result<StartOutcome, TrackingError> {
        let route = self
            .catalog
            .get(route_id)
            .ok_or_else(|| TrackingError::RouteNotFound(route_id.clone()))?;

        let color = self.colors.allocate();
        let options = RouteMarkerOptions {
            color: color.clone(),
            start_position: route.start_position,
            end_position: route.end_position,
        };
        let title = route.title.clone();

        if let Err(e) = self.map.add_route(route_id.clone(), options) {
            log!("{}", e);
            return Ok(StartOutcome::AlreadyTracked(Notice::warning(format!(
                "{title} already added, wait for it to finish."
            ))));
        }

        if let Err(e) = self.channel.request_start(&StartCommand::new(route_id.clone())) {
            console_warn!("Could not start route {}: {}", route_id, e);
            self.map.remove_route(route_id);
            return Err(e.into());
        }

        Ok(StartOutcome::Started(color))
    }

    /// Apply one position update
    ///
    /// Updates for routes that are not tracked change nothing, including a
    /// `finished` flag: no completion notice is produced for a route this
    /// client never started (or already finished).
    pub fn on_position_notification(&mut self, notification: PositionNotification) -> Option<Notice> {
        let PositionNotification { route_id, position, finished } = notification;

        let moved = self.map.move_current_marker(&route_id, position);
        if !moved || !finished {
            return None;
        }

        let title = self.catalog.display_title(&route_id);
        self.map.remove_route(&route_id);
        Some(Notice::success(format!("{title} finished!")))
    }

    /// Entry point for everything the channel delivers
    pub fn handle_message(&mut self, message: IncomingMessage) -> Option<Notice> {
        match message {
            IncomingMessage::PositionUpdate(notification) => self.on_position_notification(notification),
            IncomingMessage::StatusChanged(status) => self.on_status_changed(status),
            IncomingMessage::StartDropped(route_id) => self.on_start_dropped(&route_id),
        }
    }

    /// A start that was reported as started never reached the server; take
    /// its markers off again
    fn on_start_dropped(&mut self, route_id: &RouteId) -> Option<Notice> {
        self.map.remove_route(route_id)?;
        let title = self.catalog.display_title(route_id);
        console_warn!("Start of route {} was dropped", route_id);
        Some(Notice::error(format!("Could not start {title}, live updates are unavailable")))
    }

    fn on_status_changed(&mut self, status: ConnectionStatus) -> Option<Notice> {
        let previous = std::mem::replace(&mut self.status, status);
        let was_down = matches!(previous, ConnectionStatus::Disconnected | ConnectionStatus::Failed);

        match status {
            ConnectionStatus::Connected => {
                log!("Realtime channel connected");
                was_down.then(|| Notice::info("Reconnected to live updates"))
            }
            ConnectionStatus::Disconnected if !was_down => Some(Notice::error("Lost connection to live updates")),
            ConnectionStatus::Failed if !was_down => Some(Notice::error("Could not connect to live updates")),
            ConnectionStatus::Connecting | ConnectionStatus::Disconnected | ConnectionStatus::Failed => None,
        }
    }

    /// Release the channel and take every tracked route off the map
    pub fn shutdown(&mut self) {
        log!("Shutting down tracking session ({} active)", self.map.len());
        self.channel.close();
        self.map.clear();
    }

    #[must_use]
    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn map(&self) -> &MapController<S> {
        &self.map
    }

    #[must_use]
    pub fn channel(&self) -> &C {
        &self.channel
    }

    #[must_use]
    pub fn status(&self) -> ConnectionStatus {
        self.status
    }
}
