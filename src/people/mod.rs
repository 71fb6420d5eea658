/*!

People and their per-day update. A `Person` carries two state machines: the illness
(`Susceptible -> Infected -> {Recovered, Dead}`) and the trip (home, abroad, home again).
`ContextPeopleExt` is the public API; it makes the random draws and keeps city membership in
step with `Person::current_city`.

*/

mod context_ext;
mod people_data;
mod person;

pub(crate) use people_data::PeopleData;

pub use context_ext::ContextPeopleExt;
pub use person::{InfectionStatus, Person};
