use crate::error::EpidemicError;
use crate::new_trait::New;
use crate::people::{InfectionStatus, Person};
use crate::{GroupId, PersonId};

/// Stores every person of the run in creation order. People are never removed; the dead stay
/// in the registry tagged `Dead`.
#[derive(Default)]
pub(crate) struct PeopleData {
    pub(crate) people: Vec<Person>,
}

impl New for PeopleData {
    const new: &'static dyn Fn() -> Self = &PeopleData::default;
}

impl PeopleData {
    pub fn add_person(&mut self, is_child: bool, city: GroupId) -> PersonId {
        let person_id = PersonId(self.people.len());
        self.people.push(Person::new(person_id, is_child, city));
        person_id
    }

    pub fn get(&self, person_id: PersonId) -> Result<&Person, EpidemicError> {
        self.people
            .get(person_id.0)
            .ok_or(EpidemicError::UnknownPerson(person_id))
    }

    pub fn get_mut(&mut self, person_id: PersonId) -> Result<&mut Person, EpidemicError> {
        self.people
            .get_mut(person_id.0)
            .ok_or(EpidemicError::UnknownPerson(person_id))
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn count_by_status(&self, status: InfectionStatus) -> usize {
        self.people.iter().filter(|p| p.status() == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_creation_order() {
        let mut people_data = PeopleData::default();
        let a = people_data.add_person(false, GroupId(0));
        let b = people_data.add_person(true, GroupId(0));
        assert_eq!(a, PersonId(0));
        assert_eq!(b, PersonId(1));
        assert_eq!(people_data.len(), 2);
        assert!(people_data.get(b).unwrap().is_child());
        assert!(matches!(
            people_data.get(PersonId(2)),
            Err(EpidemicError::UnknownPerson(PersonId(2)))
        ));
        assert_eq!(people_data.count_by_status(InfectionStatus::Susceptible), 2);
    }
}
