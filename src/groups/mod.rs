/*!

Groups are the only contact structure in the model: two people can infect each other only by
sharing a group. Groups nest (country, cities, households, schools) by composition: a
composite group copies the membership of its children when it is built, so one person is a
member of several groups at once. Groups hold `PersonId`s only; the people themselves live in
`PeopleData`.

*/

mod context_ext;
mod group;
mod group_data;

pub(crate) use group_data::GroupData;

pub use context_ext::ContextGroupsExt;
pub use group::{Group, GroupKind};
