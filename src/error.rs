//! Error types for the application.
//!
//! Startup and event-loop failures surface as [`AppError`] from `main`.
//! Rejected interval input is a separate [`IntervalError`] because the
//! controller recovers from it.

/// Errors that stop the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A configuration value could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The winit event loop could not be created or exited with an error.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// The window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// wgpu could not create a surface for the window.
    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// No GPU adapter is compatible with the window surface.
    #[error("no compatible graphics adapter found")]
    NoAdapter,

    /// The adapter refused to hand out a device.
    #[error("device request failed: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// Reasons an interval entry is not accepted as the tick period.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntervalError {
    /// The text is not a number.
    #[error("{0:?} is not a number")]
    NotNumeric(String),

    /// The number is zero, negative or not finite.
    #[error("interval must be a positive number of milliseconds, got {0}")]
    NonPositive(f64),

    /// The number exceeds the longest supported interval.
    #[error("interval of {0} ms is too long")]
    TooLarge(f64),
}
