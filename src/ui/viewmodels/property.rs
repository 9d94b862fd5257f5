use crate::constants::PROPERTY_CHANNEL_CAPACITY;
use std::fmt::Debug;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

pub struct PropertySubscriber {
    receiver: broadcast::Receiver<()>,
}

// PropertySubscriber intentionally does not implement Clone.
// Each subscriber should be unique to avoid conflicts.
// To get multiple subscribers, call Property::subscribe() multiple times.

impl PropertySubscriber {
    pub async fn wait_for_change(&mut self) -> bool {
        loop {
            match self.receiver.recv().await {
                Ok(_) => return true,
                // If we lagged behind, skip to the latest and keep waiting
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                // Channel closed: no more updates
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }

    pub fn try_recv(&mut self) -> bool {
        match self.receiver.try_recv() {
            Ok(_) => true,
            Err(broadcast::error::TryRecvError::Empty) => false,
            // Consider lag as a change signal; the next recv() will align
            Err(broadcast::error::TryRecvError::Lagged(_)) => true,
            Err(broadcast::error::TryRecvError::Closed) => false,
        }
    }

    /// Consume every pending notification, reporting whether there was any
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while self.try_recv() {
            changed = true;
        }
        changed
    }
}

/// Observable value.
///
/// Reads and writes never block on the event loop; every write notifies all
/// subscribers through a broadcast channel.
pub struct Property<T: Clone + Send + Sync> {
    value: Arc<RwLock<T>>,
    sender: broadcast::Sender<()>,
    name: String,
}

impl<T: Clone + Send + Sync> Property<T> {
    pub fn new(initial_value: T, name: impl Into<String>) -> Self {
        let (sender, _) = broadcast::channel(PROPERTY_CHANNEL_CAPACITY);
        Self {
            value: Arc::new(RwLock::new(initial_value)),
            sender,
            name: name.into(),
        }
    }

    pub fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Read through a borrow without cloning the value
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn set(&self, new_value: T) {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            *value = new_value;
        }
        let _ = self.sender.send(());
    }

    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            updater(&mut *value);
        }
        let _ = self.sender.send(());
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        PropertySubscriber {
            receiver: self.sender.subscribe(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Clone + Send + Sync + PartialEq> Property<T> {
    /// Write and notify only when the value actually differs.
    ///
    /// Returns whether a notification was sent.
    pub fn set_if_changed(&self, new_value: T) -> bool {
        {
            let mut value = self.value.write().unwrap_or_else(PoisonError::into_inner);
            if *value == new_value {
                return false;
            }
            *value = new_value;
        }
        let _ = self.sender.send(());
        true
    }
}

impl<T: Clone + Send + Sync + Debug> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Property({})", self.name)
    }
}

impl<T: Clone + Send + Sync> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            sender: self.sender.clone(),
            name: self.name.clone(),
        }
    }
}
