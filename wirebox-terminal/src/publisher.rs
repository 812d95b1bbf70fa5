//! Listener registry used for control change notifications.
//!
//! Everything runs on the UI thread, so listeners are plain boxed `Fn`s
//! without any locking. Listeners are called in registration order.
use uuid::Uuid;

#[derive(PartialEq, Clone, Debug)]
pub enum PublisherError {
    ListenerNotFound(String),
}

impl std::fmt::Display for PublisherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublisherError::ListenerNotFound(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for PublisherError {}

/// Record of registered listeners that will be notified of updates
pub struct Publisher<T> {
    listeners: Vec<(Uuid, Box<dyn Fn(T)>)>,
}

impl<T: Clone> Publisher<T> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Registers a listener callback and returns the id needed to remove it
    pub fn register<F>(&mut self, listener: F) -> Uuid
    where
        F: Fn(T) + 'static,
    {
        let id = Uuid::new_v4();
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes the listener registered under `id`
    pub fn unregister(&mut self, id: Uuid) -> Result<(), PublisherError> {
        match self
            .listeners
            .iter()
            .position(|(listener_id, _)| *listener_id == id)
        {
            Some(pos) => {
                self.listeners.remove(pos);
                Ok(())
            }
            None => Err(PublisherError::ListenerNotFound(format!(
                "Listener with id {} not found",
                id
            ))),
        }
    }

    /// Calls each registered listener with a clone of `event`
    pub fn notify(&self, event: T) {
        for (_, listener) in &self.listeners {
            listener(event.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}
