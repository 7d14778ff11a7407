use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::{
    ListenerId, Location, NavigationAction, NavigationError, NavigationEvent, NavigationListener,
    NavigationSink,
};

/// History stack with a cursor, like a browser tab.
#[derive(Debug)]
struct History {
    entries: Vec<Location>,
    index: usize,
}

/// In-memory router with push/replace and back/forward traversal.
pub struct MemoryRouter {
    history: Mutex<History>,
    listeners: Mutex<Vec<(ListenerId, NavigationListener)>>,
    next_listener: AtomicU64,
}

impl MemoryRouter {
    /// Router positioned at `/`.
    pub fn new() -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![Location::root()],
                index: 0,
            }),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        }
    }

    /// Go one entry back in history.
    pub fn back(&self) -> Result<(), NavigationError> {
        let location = {
            let mut history = self.history.lock();
            if history.index == 0 {
                return Err(NavigationError::NoHistory { direction: "back" });
            }
            history.index -= 1;
            history.entries[history.index].clone()
        };
        self.emit(NavigationAction::Pop, location);
        Ok(())
    }

    /// Go one entry forward in history.
    pub fn forward(&self) -> Result<(), NavigationError> {
        let location = {
            let mut history = self.history.lock();
            if history.index + 1 >= history.entries.len() {
                return Err(NavigationError::NoHistory {
                    direction: "forward",
                });
            }
            history.index += 1;
            history.entries[history.index].clone()
        };
        self.emit(NavigationAction::Pop, location);
        Ok(())
    }

    /// Snapshot of the history stack.
    pub fn entries(&self) -> Vec<Location> {
        self.history.lock().entries.clone()
    }

    /// Cursor position within [`entries`](Self::entries).
    pub fn index(&self) -> usize {
        self.history.lock().index
    }

    fn emit(&self, action: NavigationAction, location: Location) {
        tracing::debug!(action = ?action, location = %location, "Location changed");
        let listeners: Vec<NavigationListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        let event = NavigationEvent { action, location };
        for listener in listeners {
            listener(&event);
        }
    }
}

impl Default for MemoryRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationSink for MemoryRouter {
    fn push(&self, target: &str) -> Result<(), NavigationError> {
        let location = Location::parse(target)?;
        {
            let mut history = self.history.lock();
            let next = history.index + 1;
            history.entries.truncate(next);
            history.entries.push(location.clone());
            history.index = next;
        }
        self.emit(NavigationAction::Push, location);
        Ok(())
    }

    fn replace(&self, target: &str) -> Result<(), NavigationError> {
        let location = Location::parse(target)?;
        {
            let mut history = self.history.lock();
            let index = history.index;
            history.entries[index] = location.clone();
        }
        self.emit(NavigationAction::Replace, location);
        Ok(())
    }

    fn current_location(&self) -> Location {
        let history = self.history.lock();
        history.entries[history.index].clone()
    }

    fn on_navigate(&self, listener: NavigationListener) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        tracing::trace!(listener = id.0, "Navigation listener registered");
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.lock().retain(|(existing, _)| *existing != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn recorder(router: &MemoryRouter) -> (ListenerId, Arc<Mutex<Vec<NavigationEvent>>>) {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let id = router.on_navigate(Arc::new(move |event: &NavigationEvent| {
            sink.lock().push(event.clone());
        }));
        (id, events)
    }

    #[test]
    fn starts_at_root() {
        let router = MemoryRouter::new();
        assert_eq!(router.current_location(), Location::root());
        assert_eq!(router.index(), 0);
    }

    #[test]
    fn push_appends_and_notifies() {
        let router = MemoryRouter::new();
        let (_, events) = recorder(&router);

        router.push("/data_once").unwrap();

        assert_eq!(router.current_location().path, "/data_once");
        assert_eq!(router.entries().len(), 2);
        let events = events.lock();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, NavigationAction::Push);
    }

    #[test]
    fn replace_overwrites_current_entry() {
        let router = MemoryRouter::new();
        router.push("/a").unwrap();
        router.replace("/b").unwrap();
        let paths: Vec<_> = router.entries().into_iter().map(|l| l.path).collect();
        assert_eq!(paths, vec!["/", "/b"]);
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let router = MemoryRouter::new();
        router.push("/a").unwrap();
        router.push("/b").unwrap();
        router.back().unwrap();
        router.push("/c").unwrap();
        let paths: Vec<_> = router.entries().into_iter().map(|l| l.path).collect();
        assert_eq!(paths, vec!["/", "/a", "/c"]);
        assert!(router.forward().is_err());
    }

    #[test]
    fn back_and_forward_emit_pop() {
        let router = MemoryRouter::new();
        router.push("/a").unwrap();
        let (_, events) = recorder(&router);

        router.back().unwrap();
        assert_eq!(router.current_location().path, "/");
        router.forward().unwrap();
        assert_eq!(router.current_location().path, "/a");

        let actions: Vec<_> = events.lock().iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![NavigationAction::Pop, NavigationAction::Pop]);
    }

    #[test]
    fn back_at_start_is_an_error() {
        let router = MemoryRouter::new();
        assert_eq!(
            router.back(),
            Err(NavigationError::NoHistory { direction: "back" })
        );
    }

    #[test]
    fn invalid_target_leaves_history_untouched() {
        let router = MemoryRouter::new();
        let (_, events) = recorder(&router);
        assert!(router.push("nowhere").is_err());
        assert_eq!(router.entries().len(), 1);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let router = MemoryRouter::new();
        let (id, events) = recorder(&router);
        router.unsubscribe(id);
        router.push("/a").unwrap();
        assert!(events.lock().is_empty());
    }

    #[test]
    fn listener_may_read_router_state() {
        let router = Arc::new(MemoryRouter::new());
        let seen = Arc::new(Mutex::new(None));
        let (r, s) = (router.clone(), seen.clone());
        router.on_navigate(Arc::new(move |_: &NavigationEvent| {
            *s.lock() = Some(r.current_location());
        }));
        router.push("/a").unwrap();
        assert_eq!(seen.lock().as_ref().map(|l| l.path.as_str()), Some("/a"));
    }
}
