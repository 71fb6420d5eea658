/*!

An agent-based epidemic model. People live in households inside cities inside one country;
children also attend schools. Each simulated day, infection spreads stochastically within
every group, then every person may start or finish a trip to another city and their illness
progresses toward recovery or death.

```rust,no_run
use epidemic_core::{Context, ContextSimulationExt, Parameters};

let mut context = Context::new();
context.setup_simulation(Parameters::default()).unwrap();
let counts = context.run(60).unwrap();
```

*/

pub mod context;
pub mod error;
pub mod groups;
pub mod hashing;
pub mod log;
mod new_trait;
pub mod parameters;
pub mod people;
pub mod population;
pub mod random;
pub mod report;
pub mod simulation;
mod trait_map;
pub mod transmission;

// All modules import `crate::TypeId` in case we want to change the underlying type of `TypeId`.
pub(crate) use std::any::TypeId;

pub use context::Context;
pub use error::EpidemicError;
pub use groups::{ContextGroupsExt, Group, GroupKind};
pub use new_trait::New;
pub use parameters::{ContextParametersExt, Parameters};
pub use people::{ContextPeopleExt, InfectionStatus, Person};
pub use population::ContextPopulationExt;
pub use random::ContextRandomExt;
pub use simulation::{ContextSimulationExt, DailyCounts};

// Re-exported for `define_rng!`
pub use rand;

#[inline(always)]
pub fn type_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}

/// A person's index in the registry of people, in creation order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct PersonId(pub(crate) usize);

/// A group's index in the registry of groups, in creation order.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct GroupId(pub(crate) usize);

impl PersonId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl GroupId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}
