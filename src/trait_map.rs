/*!

A heterogeneous map holding at most one value per type, keyed by `TypeId`. `RngPlugin` stores
one random stream per `RngId` type in it.

*/

use crate::{
  hashing::HashMap,
  type_of,
  TypeId
};
use std::any::Any;

#[derive(Default)]
pub struct TraitMap {
  map: HashMap<TypeId, Box<dyn Any>>,
}

impl TraitMap {
  pub fn new() -> Self {
    TraitMap {
      map: HashMap::default(),
    }
  }

  /// Returns the value of type `T`, inserting the one built by `init` if there is none.
  pub fn get_or_insert_with<T: Any>(&mut self, init: impl FnOnce() -> T) -> &mut T {
    self.map
        .entry(type_of::<T>())
        .or_insert_with(|| Box::new(init()))
        .downcast_mut()
        .unwrap() // Will never panic as the entry has the matching type
  }

  pub fn clear(&mut self) {
    self.map.clear();
  }
}
