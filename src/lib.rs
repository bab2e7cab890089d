#![warn(missing_docs)]
#![warn(clippy::missing_panics_doc)]

//! In-process channel and signal registry
//!
//! Lets independently built components talk to each other without depending
//! on each other. There are two modes of communication:
//!
//! * **Channels** are addressed by a type and a name and hold the last value
//!   written to them. Components keep a [Handle] to the channel they are bound
//!   to; the binding itself can be persisted with [Handle::save_state].
//! * **Signals** are addressed by a type only. A signal is handed to every
//!   listener of its type and then forgotten.
//!
//! A [Registry] belongs to the thread that created it and is not `Send`.
//!
//! ```rust
//! use intercore::Registry;
//! use std::{cell::Cell, rc::Rc};
//!
//! let registry = Registry::new();
//! let created = Rc::new(Cell::new(0));
//! {
//!     let created = created.clone();
//!     registry.on_channel_list_changed(move || created.set(created.get() + 1));
//! }
//!
//! let opacity = registry.handle("Float", "Opacity");
//! assert_eq!(opacity, registry.handle("Float", "Opacity"));
//! assert_eq!(created.get(), 1);
//!
//! registry.set_channel_data(&opacity, 0.5f32);
//! assert_eq!(opacity.data::<f32>(&registry), Some(0.5));
//!
//! let state = opacity.save_state();
//! assert_eq!(state, serde_json::json!({ "typeID": "Float", "nameID": "Opacity" }));
//! ```

mod common;

pub mod config;
pub mod error;
pub mod handle;
pub mod key;
pub mod registry;
pub mod typed;

pub use common::{ListenerId, ThreadCheck, ThreadGuard};
pub use config::Config;
pub use error::{StateError, ThreadError};
pub use handle::{less_than, Handle, HandleState};
pub use key::Key;
pub use registry::{ChannelChange, Registry};
pub use typed::{ChannelType, SignalType};

/// Declare marker types for
/// [ChannelType](crate::typed::ChannelType) and
/// [SignalType](crate::typed::SignalType)
///
/// ## Syntax
///
/// `<visibility>? channel[<type id>]? <name>(<value type>);` \
/// `<visibility>? signal[<type id>]? <name>(<payload type>);`
///
/// `<type id>` is optional and defaults to the stringified `<name>`
///
///
/// ## Example
///
/// ```rust
/// intercore::declare! {
///     /// Opacity-like values
///     pub channel Float(f32);
///     /// Free text
///     pub(crate) channel["Text"] Label(String);
///
///     /// Save request carrying a path
///     pub signal Save(String);
///     /// Application quit
///     signal["app.quit"] Quit(());
/// }
///
/// let registry = intercore::Registry::new();
/// let opacity = Float::handle(&registry, "Opacity");
/// registry.set_typed::<Float>(&opacity, 0.25);
/// assert_eq!(registry.typed_data::<Float>(&opacity), Some(0.25));
///
/// Save::send(&registry, "scene.json".to_owned());
/// ```
#[macro_export]
macro_rules! declare {
    () => {};

    (
        $(#[$attr:meta])*
        $v:vis channel $([$type_id:expr])? $name:ident ($value:ty);
        $($next:tt)*
    ) => {
        $(#[$attr])*
        $v struct $name;

        impl $crate::typed::ChannelType for $name {
            type Value = $value;
            const TYPE_ID: &'static str = $crate::declare!(@type_id $name $($type_id)?);
        }

        impl $name {
            #[doc = concat!("Returns the handle of the ", stringify!($name), " channel called `name_key`")]
            $v fn handle(
                registry: &$crate::Registry,
                name_key: impl ::std::convert::Into<$crate::Key>,
            ) -> $crate::Handle {
                registry.typed_handle::<$name>(name_key)
            }
        }

        $crate::declare!($($next)*);
    };

    (
        $(#[$attr:meta])*
        $v:vis signal $([$type_id:expr])? $name:ident ($payload:ty);
        $($next:tt)*
    ) => {
        $(#[$attr])*
        $v struct $name;

        impl $crate::typed::SignalType for $name {
            type Payload = $payload;
            const TYPE_ID: &'static str = $crate::declare!(@type_id $name $($type_id)?);
        }

        impl $name {
            #[doc = concat!("Sends a payload to the listeners of ", stringify!($name))]
            $v fn send(registry: &$crate::Registry, payload: $payload) {
                registry.send::<$name>(payload)
            }

            #[doc = concat!("Registers a listener for ", stringify!($name))]
            $v fn subscribe(
                registry: &$crate::Registry,
                callback: impl Fn(&$payload) + 'static,
            ) -> $crate::ListenerId {
                registry.subscribe::<$name>(callback)
            }
        }

        $crate::declare!($($next)*);
    };

    (@type_id $name:ident) => { stringify!($name) };
    (@type_id $name:ident $type_id:expr) => { $type_id };
}
