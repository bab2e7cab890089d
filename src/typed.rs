//! # Typed channels and signals
//!
//! Marker types tie a type key to the Rust type of the values it carries.
//! They are usually declared with [declare](crate::declare).

use crate::{common::ListenerId, handle::Handle, key::Key, registry::Registry};
use std::any::Any;

/// A channel type with a fixed value type
pub trait ChannelType: Sized + 'static {
    /// The type key of channels of this type
    const TYPE_ID: &'static str;

    /// Value data type stored in channels of this type
    type Value: Any;
}

/// A signal type with a fixed payload type
pub trait SignalType: Sized + 'static {
    /// The type key of this signal
    const TYPE_ID: &'static str;

    /// Payload data type that will be sent with this signal
    type Payload: Any;
}

impl Registry {
    /// Returns the handle of the `C` channel called `name_key`
    pub fn typed_handle<C: ChannelType>(&self, name_key: impl Into<Key>) -> Handle {
        self.handle(C::TYPE_ID, name_key)
    }

    /// Sets the value of a `C` channel
    pub fn set_typed<C: ChannelType>(&self, handle: &Handle, value: C::Value) {
        if handle.is_valid() && handle.type_key().as_str() != C::TYPE_ID {
            tracing::warn!(
                expected = C::TYPE_ID,
                actual = %handle.type_key(),
                "typed write to a channel of another type"
            );
        }
        self.set_channel_data(handle, value)
    }

    /// Returns a copy of the value of a `C` channel
    pub fn typed_data<C: ChannelType>(&self, handle: &Handle) -> Option<C::Value>
    where
        C::Value: Clone,
    {
        self.channel_data::<C::Value>(handle)
    }

    /// Sends an `S` signal
    pub fn send<S: SignalType>(&self, payload: S::Payload) {
        self.send_signal(S::TYPE_ID, payload)
    }

    /// Registers a listener for `S` signals
    ///
    /// Signals sent under the same type key with a payload of another type
    /// are skipped by this listener.
    pub fn subscribe<S: SignalType>(&self, callback: impl Fn(&S::Payload) + 'static) -> ListenerId {
        self.on_signal(S::TYPE_ID, move |type_key, payload| {
            match payload.downcast_ref::<S::Payload>() {
                Some(payload) => callback(payload),
                None => tracing::debug!(signal = %type_key, "payload type mismatch, skipped"),
            }
        })
    }

    /// Removes a listener added with [Registry::subscribe]
    pub fn unsubscribe<S: SignalType>(&self, id: ListenerId) -> bool {
        self.remove_signal_listener(S::TYPE_ID, id)
    }
}
