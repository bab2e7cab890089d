use super::Registry;
use crate::{
    common::{CallbackList, ListenerId},
    key::Key,
};
use std::{any::Any, rc::Rc};

pub(crate) type SignalFn = dyn Fn(Key, &dyn Any);

impl Registry {
    /// Registers a listener for signals of `type_key`
    pub fn on_signal(
        &self,
        type_key: impl Into<Key>,
        callback: impl Fn(Key, &dyn Any) + 'static,
    ) -> ListenerId {
        self.guard.assert();
        let list = self
            .signals
            .borrow_mut()
            .entry(type_key.into())
            .or_insert_with(|| Rc::new(CallbackList::new()))
            .clone();
        list.register(Rc::new(callback))
    }

    /// Removes a listener added with [Registry::on_signal]
    pub fn remove_signal_listener(&self, type_key: impl Into<Key>, id: ListenerId) -> bool {
        self.guard.assert();
        let type_key = type_key.into();
        let mut signals = self.signals.borrow_mut();
        let list = match signals.get(&type_key) {
            Some(list) => list,
            None => return false,
        };
        let removed = list.unregister(id);
        if list.is_empty() {
            signals.remove(&type_key);
        }
        removed
    }

    /// Number of listeners registered for signals of `type_key`
    pub fn signal_listener_count(&self, type_key: impl Into<Key>) -> usize {
        self.guard.assert();
        self.signals
            .borrow()
            .get(&type_key.into())
            .map_or(0, |list| list.len())
    }

    /// Sends a signal to every listener of `type_key`
    ///
    /// Listeners are called in registration order and borrow `payload` for
    /// the duration of their call. The payload is dropped once the last
    /// listener returns; nothing about the signal is retained.
    pub fn send_signal<T: Any>(&self, type_key: impl Into<Key>, payload: T) {
        self.guard.assert();
        let type_key = type_key.into();
        let list = self.signals.borrow().get(&type_key).cloned();
        let borrowed: &dyn Any = &payload;
        let listeners = match list {
            Some(list) => list.invoke_all(|callback| callback(type_key, borrowed)),
            None => 0,
        };
        tracing::trace!(signal = %type_key, listeners, "signal sent");
        drop(payload);
    }
}
