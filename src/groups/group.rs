use crate::error::EpidemicError;
use crate::hashing::HashMap;
use crate::people::{InfectionStatus, PeopleData};
use crate::{GroupId, PersonId};
use serde::Serialize;

/// The tier a group sits at in the population hierarchy.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, Serialize)]
pub enum GroupKind {
    Country,
    City,
    Household,
    School,
}

/// A named set of people sharing one transmission probability.
///
/// Members are kept in a `Vec` for stable iteration with a position map beside it, so that
/// membership tests and removals are O(1). Removal swaps the last member into the hole.
#[derive(Debug, Clone)]
pub struct Group {
    id: GroupId,
    name: String,
    kind: GroupKind,
    transmission_probability: f64,
    members: Vec<PersonId>,
    positions: HashMap<PersonId, usize>,
    child_groups: Vec<GroupId>,
}

impl Group {
    pub(crate) fn new(id: GroupId, name: String, kind: GroupKind, transmission_probability: f64) -> Self {
        Group {
            id,
            name,
            kind,
            transmission_probability,
            members: Vec::new(),
            positions: HashMap::default(),
            child_groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    #[must_use]
    pub fn transmission_probability(&self) -> f64 {
        self.transmission_probability
    }

    #[must_use]
    pub fn members(&self) -> &[PersonId] {
        &self.members
    }

    #[must_use]
    pub fn child_groups(&self) -> &[GroupId] {
        &self.child_groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, person_id: PersonId) -> bool {
        self.positions.contains_key(&person_id)
    }

    pub(crate) fn set_transmission_probability(&mut self, probability: f64) {
        self.transmission_probability = probability;
    }

    pub(crate) fn set_child_groups(&mut self, child_groups: Vec<GroupId>) {
        self.child_groups = child_groups;
    }

    /// Adds the person, returning `false` if they were already a member.
    pub(crate) fn add_member(&mut self, person_id: PersonId) -> bool {
        if self.contains(person_id) {
            return false;
        }
        self.positions.insert(person_id, self.members.len());
        self.members.push(person_id);
        true
    }

    pub(crate) fn remove_member(&mut self, person_id: PersonId) -> Result<(), EpidemicError> {
        let Some(position) = self.positions.remove(&person_id) else {
            return Err(EpidemicError::NotAMember {
                group: self.name.clone(),
                person: person_id,
            });
        };
        self.members.swap_remove(position);
        if let Some(&moved) = self.members.get(position) {
            self.positions.insert(moved, position);
        }
        Ok(())
    }

    pub(crate) fn count_by_status(&self, people_data: &PeopleData, status: InfectionStatus) -> usize {
        self.members
            .iter()
            .filter(|&&person_id| {
                people_data
                    .get(person_id)
                    .is_ok_and(|person| person.status() == status)
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group() -> Group {
        Group::new(GroupId(0), "Household 0".to_string(), GroupKind::Household, 0.1)
    }

    #[test]
    fn add_is_idempotent() {
        let mut group = group();
        assert!(group.add_member(PersonId(3)));
        assert!(!group.add_member(PersonId(3)));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn remove_keeps_positions_consistent() {
        let mut group = group();
        for i in 0..5 {
            group.add_member(PersonId(i));
        }
        group.remove_member(PersonId(1)).unwrap();
        group.remove_member(PersonId(4)).unwrap();

        assert_eq!(group.len(), 3);
        for i in [0, 2, 3] {
            assert!(group.contains(PersonId(i)));
        }
        // Every remaining member can still be removed, proving the position map is intact.
        for i in [3, 0, 2] {
            group.remove_member(PersonId(i)).unwrap();
        }
        assert!(group.is_empty());
    }

    #[test]
    fn removing_a_stranger_is_an_error() {
        let mut group = group();
        group.add_member(PersonId(0));
        let err = group.remove_member(PersonId(7)).unwrap_err();
        assert!(matches!(
            err,
            EpidemicError::NotAMember { person: PersonId(7), .. }
        ));
        assert!(err.to_string().contains("Household 0"));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn counts_by_status() {
        let mut people_data = PeopleData::default();
        let mut group = group();
        for _ in 0..4 {
            let person_id = people_data.add_person(false, GroupId(1));
            group.add_member(person_id);
        }
        people_data.get_mut(PersonId(2)).unwrap().infect(3).unwrap();

        assert_eq!(group.count_by_status(&people_data, InfectionStatus::Infected), 1);
        assert_eq!(group.count_by_status(&people_data, InfectionStatus::Susceptible), 3);
        assert_eq!(group.count_by_status(&people_data, InfectionStatus::Dead), 0);
    }
}
