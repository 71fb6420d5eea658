use crate::{
    context::Context,
    error::EpidemicError,
    groups::{Group, GroupData, GroupKind},
    log::trace,
    parameters::check_probability,
    people::{InfectionStatus, PeopleData},
    transmission::transmit_within_group,
    GroupId,
    PersonId,
};

pub trait ContextGroupsExt {
    /// Registers a new, empty group. Cities become travel destinations and the first country
    /// becomes the population the daily counters are taken over.
    fn create_group(
        &mut self,
        name: impl Into<String>,
        kind: GroupKind,
        transmission_probability: f64,
    ) -> Result<GroupId, EpidemicError>;

    fn get_group(&self, group_id: GroupId) -> Result<&Group, EpidemicError>;

    /// Every group id in creation order.
    fn group_ids(&self) -> Vec<GroupId>;

    fn cities(&self) -> Vec<GroupId>;

    fn country(&self) -> Option<GroupId>;

    /// Adds the person to the group. Returns `false` if they were already a member.
    fn add_member(&mut self, group_id: GroupId, person_id: PersonId) -> Result<bool, EpidemicError>;

    /// Removes the person from the group, failing with `NotAMember` if they are not in it.
    fn remove_member(&mut self, group_id: GroupId, person_id: PersonId) -> Result<(), EpidemicError>;

    /// Makes `parent` the union of the current membership of `children`. Allowed once per group.
    fn compose_group_from(&mut self, parent: GroupId, children: &[GroupId]) -> Result<(), EpidemicError>;

    fn set_transmission_probability(
        &mut self,
        group_id: GroupId,
        probability: f64,
    ) -> Result<(), EpidemicError>;

    fn count_in_group(&self, group_id: GroupId, status: InfectionStatus) -> Result<usize, EpidemicError>;

    fn count_infected(&self, group_id: GroupId) -> Result<usize, EpidemicError> {
        self.count_in_group(group_id, InfectionStatus::Infected)
    }

    fn count_recovered(&self, group_id: GroupId) -> Result<usize, EpidemicError> {
        self.count_in_group(group_id, InfectionStatus::Recovered)
    }

    fn count_dead(&self, group_id: GroupId) -> Result<usize, EpidemicError> {
        self.count_in_group(group_id, InfectionStatus::Dead)
    }

    /// Runs one transmission pass over the group. Returns the number of infections made.
    fn tick_group(&mut self, group_id: GroupId) -> Result<usize, EpidemicError>;
}

impl ContextGroupsExt for Context {
    fn create_group(
        &mut self,
        name: impl Into<String>,
        kind: GroupKind,
        transmission_probability: f64,
    ) -> Result<GroupId, EpidemicError> {
        check_probability("transmission probability", transmission_probability)?;
        let name = name.into();
        trace!("creating {kind:?} group {name}");
        Ok(self
            .get_data_container_mut::<GroupData>()
            .create_group(name, kind, transmission_probability))
    }

    fn get_group(&self, group_id: GroupId) -> Result<&Group, EpidemicError> {
        self.get_data_container::<GroupData>()
            .ok_or(EpidemicError::UnknownGroup(group_id))?
            .get(group_id)
    }

    fn group_ids(&self) -> Vec<GroupId> {
        self.get_data_container::<GroupData>()
            .map_or_else(Vec::new, |group_data| {
                group_data.groups.iter().map(Group::id).collect()
            })
    }

    fn cities(&self) -> Vec<GroupId> {
        self.get_data_container::<GroupData>()
            .map_or_else(Vec::new, |group_data| group_data.cities.clone())
    }

    fn country(&self) -> Option<GroupId> {
        self.get_data_container::<GroupData>()
            .and_then(|group_data| group_data.country)
    }

    fn add_member(&mut self, group_id: GroupId, person_id: PersonId) -> Result<bool, EpidemicError> {
        Ok(self
            .get_data_container_mut::<GroupData>()
            .get_mut(group_id)?
            .add_member(person_id))
    }

    fn remove_member(&mut self, group_id: GroupId, person_id: PersonId) -> Result<(), EpidemicError> {
        self.get_data_container_mut::<GroupData>()
            .get_mut(group_id)?
            .remove_member(person_id)
    }

    fn compose_group_from(&mut self, parent: GroupId, children: &[GroupId]) -> Result<(), EpidemicError> {
        self.get_data_container_mut::<GroupData>()
            .compose(parent, children)
    }

    fn set_transmission_probability(
        &mut self,
        group_id: GroupId,
        probability: f64,
    ) -> Result<(), EpidemicError> {
        check_probability("transmission probability", probability)?;
        self.get_data_container_mut::<GroupData>()
            .get_mut(group_id)?
            .set_transmission_probability(probability);
        Ok(())
    }

    fn count_in_group(&self, group_id: GroupId, status: InfectionStatus) -> Result<usize, EpidemicError> {
        let group = self.get_group(group_id)?;
        Ok(match self.get_data_container::<PeopleData>() {
            None => 0,
            Some(people_data) => group.count_by_status(people_data, status),
        })
    }

    fn tick_group(&mut self, group_id: GroupId) -> Result<usize, EpidemicError> {
        transmit_within_group(self, group_id)
    }
}
