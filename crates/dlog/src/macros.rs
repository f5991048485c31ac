//! crates/dlog/src/macros.rs
//! Variadic logging macros and internal diagnostic helpers.

/// Logs a variadic list of displayable values through a namespace handle.
///
/// Expands to [`Namespace::log`](crate::Namespace::log) with every argument
/// borrowed as `&dyn Display`, preserving order.
///
/// # Example
///
/// ```
/// use dlog::{CaptureSink, Dlog, dlog};
///
/// let capture = CaptureSink::new();
/// let logger = Dlog::with_sink(capture.clone());
/// let module = logger.namespace("module1");
///
/// dlog!(module, "someFunc is doing some stuff here", 50);
/// assert_eq!(capture.lines(), vec!["module1: someFunc is doing some stuff here 50"]);
/// ```
#[macro_export]
macro_rules! dlog {
    ($namespace:expr $(, $arg:expr)* $(,)?) => {
        $namespace.log(&[$(&$arg as &dyn ::core::fmt::Display),*])
    };
}

/// Logs a variadic list of displayable values to the error channel.
///
/// Expands to [`Namespace::error`](crate::Namespace::error).
///
/// # Example
///
/// ```
/// use dlog::{CaptureSink, Dlog, dlog_error};
///
/// let capture = CaptureSink::new();
/// let logger = Dlog::with_sink(capture.clone());
/// let errors = logger.namespace("error");
///
/// dlog_error!(errors, "Error encountered while processing.");
/// assert_eq!(capture.lines(), vec!["error: Error encountered while processing."]);
/// ```
#[macro_export]
macro_rules! dlog_error {
    ($namespace:expr $(, $arg:expr)* $(,)?) => {
        $namespace.error(&[$(&$arg as &dyn ::core::fmt::Display),*])
    };
}

/// Emits an internal diagnostic when the `tracing` feature is enabled.
macro_rules! diag {
    ($level:ident, $target:literal, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        {
            ::tracing::$level!(target: $target, $($arg)*);
        }
    };
}
