//! Lifecycle notifications emitted by a [`Resource`](crate::framework::Resource).

/// Phase reached by a resource. Subscribers receive these through
/// [`Resource::subscribe`](crate::framework::Resource::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A save was requested. Sent before any readiness work starts.
    Saving,
    /// The server accepted a save.
    Saved,
    /// Server data was loaded into the resource.
    Fetched,
    /// The resource was deleted and reset to the new state.
    Destroyed,
}
