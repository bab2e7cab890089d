//! # Channel registry
//!
//! A [Registry] owns every channel slot created through it. Slots are created
//! lazily by [Registry::handle] and live as long as the registry does.

use crate::{
    common::{CallbackList, ListenerId, Payload, ThreadGuard},
    config::Config,
    error::ThreadError,
    handle::{Handle, SlotId},
    key::Key,
};
use std::{
    any::Any,
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fmt, mem,
    num::NonZeroU64,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
    thread,
};

mod signals;


use signals::SignalFn;

/// A change of channel value, passed to channel changed listeners
#[derive(Clone, Copy, Debug)]
pub struct ChannelChange<'a> {
    /// Type of the changed channel
    pub type_key: Key,
    /// Name of the changed channel
    pub name_key: Key,
    /// The new value, `None` if the channel was cleared
    pub data: Option<&'a dyn Any>,
}

impl<'a> ChannelChange<'a> {
    /// The new value if it is a `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&'a T> {
        self.data.and_then(|data| data.downcast_ref())
    }
}

type ListChangedFn = dyn Fn();
type ChannelChangedFn = dyn Fn(&ChannelChange<'_>);

/// In-process registry of channels and signals
///
/// A registry belongs to the thread that created it. It is neither `Send`
/// nor `Sync`, and every operation additionally checks the calling thread
/// according to [Config::thread_check].
///
/// Listeners run synchronously inside the call that triggered them and may
/// call back into the registry.
pub struct Registry {
    id: NonZeroU64,
    guard: ThreadGuard,
    max_channels: Option<usize>,
    channels: RefCell<Channels>,
    list_changed: CallbackList<ListChangedFn>,
    channel_changed: CallbackList<ChannelChangedFn>,
    signals: RefCell<HashMap<Key, Rc<CallbackList<SignalFn>>>>,
}

#[derive(Default)]
struct Channels {
    slots: Vec<Slot>,
    index: HashMap<Key, HashMap<Key, u32>>,
}

struct Slot {
    type_key: Key,
    name_key: Key,
    data: Option<Payload>,
}

impl Channels {
    fn lookup(&self, type_key: Key, name_key: Key) -> Option<u32> {
        self.index.get(&type_key)?.get(&name_key).copied()
    }

    fn insert(&mut self, type_key: Key, name_key: Key) -> Option<u32> {
        let index = u32::try_from(self.slots.len()).ok()?;
        self.slots.push(Slot {
            type_key,
            name_key,
            data: None,
        });
        self.index
            .entry(type_key)
            .or_default()
            .insert(name_key, index);
        Some(index)
    }
}

fn next_registry_id() -> NonZeroU64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    match NonZeroU64::new(NEXT.fetch_add(1, Ordering::Relaxed)) {
        Some(id) => id,
        None => unreachable!("registry id counter wrapped"),
    }
}

impl Registry {
    /// Creates a registry owned by the calling thread
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a registry owned by the calling thread
    pub fn with_config(config: Config) -> Self {
        Self {
            id: next_registry_id(),
            guard: ThreadGuard::new(config.thread_check),
            max_channels: config.max_channels,
            channels: RefCell::new(Channels::default()),
            list_changed: CallbackList::new(),
            channel_changed: CallbackList::new(),
            signals: RefCell::new(HashMap::new()),
        }
    }

    /// Checks that the caller runs on the owner thread
    pub fn check_thread(&self) -> Result<(), ThreadError> {
        self.guard.check()
    }

    /// Returns the handle for a channel, creating the channel on first use
    ///
    /// Returns an invalid handle if either key is invalid, or if the
    /// channel is new and the registry already holds
    /// [Config::max_channels] channels. Creating a channel calls the
    /// channel list changed listeners before returning.
    pub fn handle(&self, type_key: impl Into<Key>, name_key: impl Into<Key>) -> Handle {
        self.guard.assert();
        let (type_key, name_key) = (type_key.into(), name_key.into());
        if !type_key.is_valid() || !name_key.is_valid() {
            return Handle::invalid();
        }

        let index = {
            let mut channels = self.channels.borrow_mut();
            if let Some(index) = channels.lookup(type_key, name_key) {
                return Handle::new(type_key, name_key, self.slot_id(index));
            }
            if let Some(max) = self.max_channels {
                if channels.slots.len() >= max {
                    tracing::warn!(%type_key, %name_key, max, "channel limit reached");
                    return Handle::invalid();
                }
            }
            match channels.insert(type_key, name_key) {
                Some(index) => index,
                None => {
                    tracing::warn!(%type_key, %name_key, "channel index space exhausted");
                    return Handle::invalid();
                }
            }
        };

        tracing::debug!(%type_key, %name_key, "channel created");
        self.list_changed.invoke_all(|callback| callback());
        Handle::new(type_key, name_key, self.slot_id(index))
    }

    /// Snapshot of every channel, by type then name
    pub fn channels(&self) -> BTreeMap<Key, BTreeMap<Key, Handle>> {
        self.guard.assert();
        let channels = self.channels.borrow();
        let mut snapshot: BTreeMap<Key, BTreeMap<Key, Handle>> = BTreeMap::new();
        for (index, slot) in (0u32..).zip(channels.slots.iter()) {
            let handle = Handle::new(slot.type_key, slot.name_key, self.slot_id(index));
            snapshot
                .entry(slot.type_key)
                .or_default()
                .insert(slot.name_key, handle);
        }
        snapshot
    }

    /// Handles of every channel of one type, sorted by name
    pub fn channels_of_type(&self, type_key: impl Into<Key>) -> Vec<Handle> {
        self.guard.assert();
        let type_key = type_key.into();
        let channels = self.channels.borrow();
        let mut handles: Vec<Handle> = match channels.index.get(&type_key) {
            Some(names) => names
                .iter()
                .map(|(name_key, index)| Handle::new(type_key, *name_key, self.slot_id(*index)))
                .collect(),
            None => Vec::new(),
        };
        handles.sort_by(Handle::cmp_by_name);
        handles
    }

    /// Number of channels created so far
    pub fn channel_count(&self) -> usize {
        self.guard.assert();
        self.channels.borrow().slots.len()
    }

    /// Replaces the value of a channel
    ///
    /// The previous value is dropped, then the channel changed listeners are
    /// called once with the new value. Through an invalid handle, or a
    /// handle from another registry, `value` is dropped and nothing else
    /// happens.
    pub fn set_channel_data<T: Any>(&self, handle: &Handle, value: T) {
        self.guard.assert();
        self.replace_data(handle, Some(Payload::new(value)));
    }

    /// Removes the value of a channel and notifies like [Registry::set_channel_data]
    pub fn clear_channel_data(&self, handle: &Handle) {
        self.guard.assert();
        self.replace_data(handle, None);
    }

    /// Calls `f` with the current value of a channel
    ///
    /// `f` receives `None` for an invalid handle or an empty channel. The
    /// registry is not borrowed while `f` runs.
    pub fn with_channel_data<R>(&self, handle: &Handle, f: impl FnOnce(Option<&dyn Any>) -> R) -> R {
        self.guard.assert();
        let payload = self.current_payload(handle);
        f(payload.as_ref().map(Payload::as_any))
    }

    /// Returns a copy of the channel value if it holds a `T`
    pub fn channel_data<T: Any + Clone>(&self, handle: &Handle) -> Option<T> {
        self.with_channel_data(handle, |data| data?.downcast_ref::<T>().cloned())
    }

    /// Returns true if the channel currently holds a value
    pub fn has_channel_data(&self, handle: &Handle) -> bool {
        self.guard.assert();
        self.current_payload(handle).is_some()
    }

    /// Registers a listener for channel creation
    pub fn on_channel_list_changed(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.guard.assert();
        self.list_changed.register(Rc::new(callback))
    }

    /// Removes a listener added with [Registry::on_channel_list_changed]
    pub fn remove_channel_list_listener(&self, id: ListenerId) -> bool {
        self.guard.assert();
        self.list_changed.unregister(id)
    }

    /// Registers a listener for channel value changes
    pub fn on_channel_changed(
        &self,
        callback: impl Fn(&ChannelChange<'_>) + 'static,
    ) -> ListenerId {
        self.guard.assert();
        self.channel_changed.register(Rc::new(callback))
    }

    /// Removes a listener added with [Registry::on_channel_changed]
    pub fn remove_channel_listener(&self, id: ListenerId) -> bool {
        self.guard.assert();
        self.channel_changed.unregister(id)
    }

    fn slot_id(&self, index: u32) -> SlotId {
        SlotId {
            registry: self.id,
            index,
        }
    }

    fn resolve(&self, handle: &Handle) -> Option<usize> {
        let slot = handle.slot()?;
        if slot.registry != self.id {
            tracing::warn!(
                type_key = %handle.type_key(),
                name_key = %handle.name_key(),
                "handle belongs to another registry"
            );
            return None;
        }
        Some(slot.index as usize)
    }

    fn current_payload(&self, handle: &Handle) -> Option<Payload> {
        let index = self.resolve(handle)?;
        self.channels.borrow().slots.get(index)?.data.clone()
    }

    fn replace_data(&self, handle: &Handle, data: Option<Payload>) {
        let index = match self.resolve(handle) {
            Some(index) => index,
            None => {
                tracing::trace!(
                    type_key = %handle.type_key(),
                    name_key = %handle.name_key(),
                    "write through invalid handle dropped"
                );
                return;
            }
        };

        let (type_key, name_key, previous) = {
            let mut channels = self.channels.borrow_mut();
            let slot = match channels.slots.get_mut(index) {
                Some(slot) => slot,
                None => return,
            };
            let previous = mem::replace(&mut slot.data, data.clone());
            (slot.type_key, slot.name_key, previous)
        };
        // the old value may run arbitrary drop code, keep the registry unborrowed
        drop(previous);

        let change = ChannelChange {
            type_key,
            name_key,
            data: data.as_ref().map(Payload::as_any),
        };
        let listeners = self.channel_changed.invoke_all(|callback| callback(&change));
        tracing::trace!(%type_key, %name_key, listeners, "channel changed");
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if !thread::panicking() {
            self.guard.assert();
        }
        tracing::trace!(channels = self.channels.get_mut().slots.len(), "registry dropped");
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("id", &self.id)
            .field("owner", &self.guard.owner())
            .field("channels", &self.channels.borrow().slots.len())
            .field("signal_types", &self.signals.borrow().len())
            .finish()
    }
}
