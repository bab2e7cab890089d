use std::{any::Any, fmt, rc::Rc};

/// Type-erased value stored in a channel slot
///
/// The slot is the only long-lived owner. Extra references exist only for the
/// duration of a dispatch, so overwriting a slot drops the old value as soon
/// as the notification that carried it has finished.
#[derive(Clone)]
pub(crate) struct Payload {
    inner: Rc<dyn Any>,
}

impl Payload {
    pub(crate) fn new<T: Any>(value: T) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }

    pub(crate) fn as_any(&self) -> &dyn Any {
        &*self.inner
    }

    pub(crate) fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_id", &self.as_any().type_id())
            .finish()
    }
}
