/// Conditional console logging
///
/// The `log!` macro provides informational console logging that is compiled
/// out of production (release) builds by default. `console_warn!` and
/// `console_error!` are always emitted in the browser.
///
/// Logging is enabled when either:
/// - Building in debug mode (`cfg(debug_assertions)`)
/// - The `console_logging` feature is explicitly enabled
///
/// On non-wasm targets (unit tests, benches) every macro only evaluates its
/// arguments, since the console bindings are unavailable there.
///
/// # Examples
///
/// ```rust
/// use route_tracker::logging::log;
///
/// let route_id = "A";
/// log!("Tracking started for {}", route_id);
/// ```
#[macro_export]
macro_rules! log {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging")))]
        {
            web_sys::console::log_1(&format!($($arg),+).into());
        }
        #[cfg(not(all(target_arch = "wasm32", any(debug_assertions, feature = "console_logging"))))]
        {
            let _ = ($(&$arg),+);
        }
    };
}

/// Log a warning to the browser console
#[macro_export]
macro_rules! console_warn {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg),+).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = ($(&$arg),+);
        }
    };
}

/// Log an error to the browser console
#[macro_export]
macro_rules! console_error {
    ($($arg:expr),+ $(,)?) => {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::error_1(&format!($($arg),+).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = ($(&$arg),+);
        }
    };
}

pub use {console_error, console_warn, log};
