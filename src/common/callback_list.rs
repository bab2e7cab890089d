use std::{
    cell::RefCell,
    num::NonZeroU64,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

/// Token identifying one registered listener
///
/// Returned by every `on_*` registration and required to remove the listener
/// again. Tokens are unique for the whole process, so registering the same
/// closure twice yields two independent listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(NonZeroU64);

impl ListenerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        let id = NEXT.fetch_add(1, Ordering::Relaxed);
        match NonZeroU64::new(id) {
            Some(id) => Self(id),
            None => unreachable!("listener id counter wrapped"),
        }
    }
}

/// Ordered listener list
///
/// Invocation works on a snapshot, so listeners may register or remove
/// listeners (on this list or any other) while being called.
pub(crate) struct CallbackList<F: ?Sized> {
    entries: RefCell<Vec<(ListenerId, Rc<F>)>>,
}

impl<F: ?Sized> CallbackList<F> {
    pub(crate) const fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn register(&self, callback: Rc<F>) -> ListenerId {
        let id = ListenerId::next();
        self.entries.borrow_mut().push((id, callback));
        id
    }

    pub(crate) fn unregister(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.borrow().iter().any(|(entry, _)| *entry == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Calls `call` for every listener in registration order
    ///
    /// Listeners removed by an earlier listener of the same pass are skipped.
    /// Returns the number of listeners invoked.
    pub(crate) fn invoke_all(&self, mut call: impl FnMut(&F)) -> usize {
        let snapshot = self.entries.borrow().clone();
        let mut invoked = 0;
        for (id, callback) in snapshot {
            if !self.contains(id) {
                continue;
            }
            call(&callback);
            invoked += 1;
        }
        invoked
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::Cell;

    type Callback = dyn Fn(&RefCell<Vec<u32>>);

    #[test]
    fn invokes_in_registration_order() {
        let list = CallbackList::<Callback>::new();
        list.register(Rc::new(|log: &RefCell<Vec<u32>>| log.borrow_mut().push(1)));
        list.register(Rc::new(|log: &RefCell<Vec<u32>>| log.borrow_mut().push(2)));
        list.register(Rc::new(|log: &RefCell<Vec<u32>>| log.borrow_mut().push(3)));

        let log = RefCell::new(Vec::new());
        assert_eq!(list.invoke_all(|f| f(&log)), 3);
        assert_eq!(*log.borrow(), [1, 2, 3]);
    }

    #[test]
    fn same_closure_twice_gets_two_tokens() {
        let list = CallbackList::<dyn Fn()>::new();
        let callback: Rc<dyn Fn()> = Rc::new(|| {});
        let first = list.register(callback.clone());
        let second = list.register(callback);
        assert_ne!(first, second);

        assert!(list.unregister(first));
        assert!(!list.unregister(first));
        assert_eq!(list.len(), 1);
        assert!(list.contains(second));
    }

    #[test]
    fn removal_during_dispatch_skips_removed() {
        let list = Rc::new(CallbackList::<dyn Fn()>::new());
        let calls = Rc::new(Cell::new(0));
        let victim = Rc::new(Cell::new(None::<ListenerId>));

        {
            let list_ref = list.clone();
            let victim = victim.clone();
            list.register(Rc::new(move || {
                if let Some(id) = victim.get() {
                    list_ref.unregister(id);
                }
            }));
        }
        {
            let calls = calls.clone();
            victim.set(Some(list.register(Rc::new(move || calls.set(calls.get() + 1)))));
        }

        assert_eq!(list.invoke_all(|f| f()), 1);
        assert_eq!(calls.get(), 0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn registration_during_dispatch_waits_for_next_pass() {
        let list = Rc::new(CallbackList::<dyn Fn()>::new());
        let calls = Rc::new(Cell::new(0));
        {
            let list_ref = list.clone();
            let calls = calls.clone();
            list.register(Rc::new(move || {
                let calls = calls.clone();
                list_ref.register(Rc::new(move || calls.set(calls.get() + 1)));
            }));
        }

        list.invoke_all(|f| f());
        assert_eq!(calls.get(), 0);
        assert_eq!(list.len(), 2);

        list.invoke_all(|f| f());
        assert_eq!(calls.get(), 1);
        assert!(!list.is_empty());
    }
}
