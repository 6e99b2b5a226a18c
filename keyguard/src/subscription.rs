// Copyright 2024, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Callback registration that is undone when the returned handle is dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Keeps a callback registered. The callback is removed when this is dropped.
#[must_use = "the callback is removed as soon as the subscription is dropped"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a subscription that runs `release` when it is dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Removes the callback now.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Subscription").field("active", &self.release.is_some()).finish()
    }
}

struct Registry<T: ?Sized> {
    next_id: u64,
    entries: Vec<(u64, Rc<T>)>,
}

/// An ordered list of registered callbacks.
pub struct CallbackList<T: ?Sized> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: ?Sized> Default for CallbackList<T> {
    fn default() -> Self {
        Self { registry: Rc::new(RefCell::new(Registry { next_id: 0, entries: Vec::new() })) }
    }
}

impl<T: ?Sized + 'static> CallbackList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `callback` to the end of the list. It stays registered until the returned
    /// subscription is dropped, even if the list itself goes away first.
    pub fn register(&self, callback: Rc<T>) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, callback));
            id
        };
        let registry: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Calls `f` with every callback registered at the time of the call. Callbacks may register
    /// or release subscriptions while being called.
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        let callbacks: Vec<Rc<T>> =
            self.registry.borrow().entries.iter().map(|(_, callback)| callback.clone()).collect();
        for callback in callbacks {
            f(&callback);
        }
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    trait Counter {
        fn bump(&self);
    }

    #[derive(Default)]
    struct Count(Cell<u32>);

    impl Counter for Count {
        fn bump(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn dropping_subscription_unregisters() {
        let list: CallbackList<dyn Counter> = CallbackList::new();
        let count = Rc::new(Count::default());

        let subscription = list.register(count.clone());
        list.for_each(|c| c.bump());
        drop(subscription);
        list.for_each(|c| c.bump());

        assert_eq!(count.0.get(), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn release_only_removes_its_own_entry() {
        let list: CallbackList<dyn Counter> = CallbackList::new();
        let first = Rc::new(Count::default());
        let second = Rc::new(Count::default());

        let first_subscription = list.register(first.clone());
        let _second_subscription = list.register(second.clone());
        first_subscription.release();
        list.for_each(|c| c.bump());

        assert_eq!((first.0.get(), second.0.get()), (0, 1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn subscription_outlives_list() {
        let list: CallbackList<dyn Counter> = CallbackList::new();
        let subscription = list.register(Rc::new(Count::default()));
        drop(list);
        drop(subscription);
    }

    #[test]
    fn callbacks_may_unsubscribe_during_dispatch() {
        struct Unsubscriber(RefCell<Option<Subscription>>);
        impl Counter for Unsubscriber {
            fn bump(&self) {
                self.0.borrow_mut().take();
            }
        }

        let list: CallbackList<dyn Counter> = CallbackList::new();
        let unsubscriber = Rc::new(Unsubscriber(RefCell::new(None)));
        let subscription = list.register(unsubscriber.clone());
        *unsubscriber.0.borrow_mut() = Some(subscription);

        list.for_each(|c| c.bump());
        assert!(list.is_empty());
    }
}
