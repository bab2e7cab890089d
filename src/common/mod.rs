mod callback_list;
mod payload;
mod thread_guard;

pub use callback_list::ListenerId;
pub use thread_guard::{ThreadCheck, ThreadGuard};

pub(crate) use callback_list::CallbackList;
pub(crate) use payload::Payload;
