/*!

An object safe trait for data containers that know how to construct themselves with `new()`.
`Context` uses it to create a container the first time a component asks for it, so every
component (people, groups, random streams, parameters) can be initialized lazily and in any
order. The type needs to be `'static`, which every container in this crate is.

```rust
# use epidemic_core::New;

struct InfectionTally {
  infections: usize,
  label: &'static str
}

impl New for InfectionTally {
  const new: &'static dyn Fn() -> Self = &|| InfectionTally { infections: 0, label: "" };
}

# fn do_something(){
let tally = InfectionTally::new();
// ...
# }
```

If the type already has a `new()` method or implements `Default`, point `New::new` at it.
Calling it then needs the fully qualified syntax:

```rust
# use epidemic_core::New;
#[derive(Default)]
struct InfectionTally {
  infections: usize,
}

impl New for InfectionTally {
  const new: &'static dyn Fn() -> Self = &InfectionTally::default;
}

# fn foo(){
let tally = <InfectionTally as New>::new();
# }
```

*/

use std::any::Any;

/// An object-safe trait for data containers that can construct themselves.
pub trait New: Any + 'static {
  /// A constant reference to a constructor
  #[allow(non_upper_case_globals)]
  const new: &'static dyn Fn() -> Self;
}

impl<T: 'static> New for Vec<T> {
  const new: &'static dyn Fn() -> Self = &Vec::<T>::new;
}
