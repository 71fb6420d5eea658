/*!

`Context` is the universe of a simulation run. It owns one data container per concern
(people, groups, random streams, parameters, the day counter) and nothing else. Components
reach their containers through `get_data_container_mut()` / `get_data_container()` and
expose their operations as extension traits on `Context`.

*/

use crate::hashing::HashMap;
use crate::new_trait::New;
use crate::{type_of, TypeId};
use std::any::Any;

#[derive(Default)]
pub struct Context {
    // This is actually a `HashMap<TypeId, Box<dyn New>>` but must be declared this way so we can
    // downcast without an `as_any()` method on every container.
    data_plugins: HashMap<TypeId, Box<dyn Any>>,
}

impl Context {
    pub fn new() -> Self {
        Context {
            data_plugins: HashMap::default(),
        }
    }

    /// Returns a mutable reference for the data container for `T`, creating it if it doesn't exist yet.
    pub fn get_data_container_mut<T: New>(&mut self) -> &mut T {
        self.data_plugins
            .entry(type_of::<T>())
            .or_insert_with(|| Box::new(<T as New>::new()))
            .downcast_mut::<T>()
            .unwrap() // Will never panic as data container has the matching type
    }

    /// Returns a reference to the data container for `T` if it exists.
    /// If you need a mutable reference or lazy instantiation, use `Context::get_data_container_mut()`.
    pub fn get_data_container<T: New>(&self) -> Option<&T> {
        self.data_plugins
            .get(&type_of::<T>())
            .and_then(|data| data.downcast_ref::<T>())
    }
}
