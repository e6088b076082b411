//! Small crate-wide convenience macros.

/// Log a formatted line to the browser console in debug builds.
///
/// Compiles to nothing on release builds and on non-wasm targets, so the
/// reducer and validation code stay callable from native unit tests.
///
/// ```rust,ignore
/// debug_log!("drag session started on row {}", row);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(all(debug_assertions, target_arch = "wasm32"))]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(not(all(debug_assertions, target_arch = "wasm32")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Console warning that is silenced off-wasm for the same reason as
/// [`debug_log!`].
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}
