//! Listener registry.
//!
//! A [`Listener`] wraps one platform subscription (an event target, an event
//! type and a handler, or an observer) and tracks whether it is attached.
//! The [`ListenerRegistry`] owns every listener of a host and releases them
//! all through a single teardown path.

mod registry;

pub use registry::{Listener, ListenerRegistry, ListenerState, Subscription};
