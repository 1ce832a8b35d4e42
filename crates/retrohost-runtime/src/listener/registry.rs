/// A platform subscription that can be attached and detached.
///
/// Implementations must tolerate a target that no longer exists; detaching
/// from it is a no-op.
pub trait Subscription {
    fn attach(&mut self);
    fn detach(&mut self);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ListenerState {
    Active,
    Inactive,
}

/// Scoped registration guard. Detaches on drop.
pub struct Listener {
    label: String,
    state: ListenerState,
    subscription: Box<dyn Subscription>,
}

impl Listener {
    /// Wraps a subscription; starts inactive.
    pub fn new(label: impl Into<String>, subscription: impl Subscription + 'static) -> Self {
        Self {
            label: label.into(),
            state: ListenerState::Inactive,
            subscription: Box::new(subscription),
        }
    }

    /// Attaches the subscription unless already attached.
    pub fn add(&mut self) {
        if self.state == ListenerState::Active {
            return;
        }
        self.subscription.attach();
        self.state = ListenerState::Active;
    }

    /// Detaches the subscription; no-op when inactive.
    pub fn remove(&mut self) {
        if self.state == ListenerState::Inactive {
            return;
        }
        self.subscription.detach();
        self.state = ListenerState::Inactive;
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ListenerState::Active
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("label", &self.label)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// All listeners owned by one host.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    listeners: Vec<Listener>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a listener without changing its state.
    pub fn register(&mut self, listener: Listener) {
        log::trace!("registered listener {}", listener.label());
        self.listeners.push(listener);
    }

    /// Attaches every inactive listener; returns how many were attached.
    pub fn activate_all(&mut self) -> usize {
        let mut n = 0;
        for l in self.listeners.iter_mut().filter(|l| !l.is_active()) {
            l.add();
            n += 1;
        }
        n
    }

    /// Detaches every active listener; returns how many were detached.
    pub fn deactivate_all(&mut self) -> usize {
        let mut n = 0;
        for l in self.listeners.iter_mut().filter(|l| l.is_active()) {
            l.remove();
            n += 1;
        }
        n
    }

    /// Detaches and drops every listener; returns how many were detached.
    pub fn release(&mut self) -> usize {
        let n = self.deactivate_all();
        self.listeners.clear();
        n
    }

    pub fn active_count(&self) -> usize {
        self.listeners.iter().filter(|l| l.is_active()).count()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.listeners.iter().map(Listener::label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::CountingSubscription;

    // ── Listener ──────────────────────────────────────────────────────────

    #[test]
    fn new_listener_is_inactive() {
        let (sub, counts) = CountingSubscription::new();
        let l = Listener::new("canvas:mousedown", sub);
        assert_eq!(l.state(), ListenerState::Inactive);
        assert_eq!(counts.attached(), 0);
    }

    #[test]
    fn add_twice_attaches_once() {
        let (sub, counts) = CountingSubscription::new();
        let mut l = Listener::new("root:keydown", sub);
        l.add();
        l.add();
        assert!(l.is_active());
        assert_eq!(counts.attached(), 1);
    }

    #[test]
    fn remove_without_add_is_noop() {
        let (sub, counts) = CountingSubscription::new();
        let mut l = Listener::new("root:keyup", sub);
        l.remove();
        l.remove();
        assert_eq!(counts.detached(), 0);
    }

    #[test]
    fn add_remove_cycles_pair_up() {
        let (sub, counts) = CountingSubscription::new();
        let mut l = Listener::new("input:change", sub);
        for _ in 0..3 {
            l.add();
            l.remove();
        }
        assert_eq!(counts.attached(), 3);
        assert_eq!(counts.detached(), 3);
        assert_eq!(counts.live(), 0);
    }

    #[test]
    fn drop_detaches_active_listener() {
        let (sub, counts) = CountingSubscription::new();
        {
            let mut l = Listener::new("canvas:mousemove", sub);
            l.add();
        }
        assert_eq!(counts.detached(), 1);
    }

    #[test]
    fn drop_of_inactive_listener_does_not_detach() {
        let (sub, counts) = CountingSubscription::new();
        drop(Listener::new("canvas:contextmenu", sub));
        assert_eq!(counts.detached(), 0);
    }

    // ── ListenerRegistry ──────────────────────────────────────────────────

    #[test]
    fn activate_and_deactivate_all() {
        let mut reg = ListenerRegistry::new();
        let mut all = Vec::new();
        for i in 0..4 {
            let (sub, counts) = CountingSubscription::new();
            reg.register(Listener::new(format!("l{i}"), sub));
            all.push(counts);
        }
        assert_eq!(reg.active_count(), 0);
        assert_eq!(reg.activate_all(), 4);
        assert_eq!(reg.activate_all(), 0);
        assert_eq!(reg.active_count(), 4);
        assert_eq!(reg.deactivate_all(), 4);
        assert_eq!(reg.active_count(), 0);
        assert!(all.iter().all(|c| c.live() == 0));
    }

    #[test]
    fn release_empties_registry() {
        let mut reg = ListenerRegistry::new();
        let (sub, counts) = CountingSubscription::new();
        reg.register(Listener::new("a", sub));
        reg.activate_all();
        assert_eq!(reg.release(), 1);
        assert!(reg.is_empty());
        assert_eq!(counts.detached(), 1);
        assert_eq!(reg.release(), 0);
    }

    #[test]
    fn labels_in_registration_order() {
        let mut reg = ListenerRegistry::new();
        reg.register(Listener::new("first", CountingSubscription::new().0));
        reg.register(Listener::new("second", CountingSubscription::new().0));
        assert_eq!(reg.labels().collect::<Vec<_>>(), vec!["first", "second"]);
    }
}
