use crate::domain::SurfaceId;

/// Port for the status surface a dispatched operation reports through
/// (a notification, a log line, a UI row - the rendering is the
/// adapter's concern, the lifecycle is fixed here).
///
/// Lifecycle per surface: `begin` once, `update` zero or more times,
/// then exactly one of `dismiss` (success) or `fail` (durable failure
/// state, not dismissed). All calls for one surface come from a single
/// task; implementations never see concurrent writers for the same id.
pub trait StatusSink: Send + Sync {
    /// Show the surface in an ongoing, indeterminate state.
    fn begin(&self, surface: SurfaceId, title: &str);

    /// Replace the surface's text and set its progress indicator.
    fn update(&self, surface: SurfaceId, text: &str, percent: u8);

    /// The operation succeeded; clear the surface.
    fn dismiss(&self, surface: SurfaceId);

    /// The operation failed; convert the surface to a non-ongoing
    /// failure summary and keep it visible.
    fn fail(&self, surface: SurfaceId, summary: &str);
}
