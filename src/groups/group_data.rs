use crate::error::EpidemicError;
use crate::groups::{Group, GroupKind};
use crate::new_trait::New;
use crate::GroupId;

/// Stores every group of the run in creation order, which is also the order of the daily
/// transmission pass. Cities are additionally listed as travel destinations.
#[derive(Default)]
pub(crate) struct GroupData {
    pub(crate) groups: Vec<Group>,
    pub(crate) cities: Vec<GroupId>,
    pub(crate) country: Option<GroupId>,
}

impl New for GroupData {
    const new: &'static dyn Fn() -> Self = &GroupData::default;
}

impl GroupData {
    pub fn create_group(&mut self, name: String, kind: GroupKind, transmission_probability: f64) -> GroupId {
        let group_id = GroupId(self.groups.len());
        self.groups
            .push(Group::new(group_id, name, kind, transmission_probability));

        match kind {
            GroupKind::City => self.cities.push(group_id),
            GroupKind::Country if self.country.is_none() => self.country = Some(group_id),
            _ => {}
        }
        group_id
    }

    pub fn get(&self, group_id: GroupId) -> Result<&Group, EpidemicError> {
        self.groups
            .get(group_id.0)
            .ok_or(EpidemicError::UnknownGroup(group_id))
    }

    pub fn get_mut(&mut self, group_id: GroupId) -> Result<&mut Group, EpidemicError> {
        self.groups
            .get_mut(group_id.0)
            .ok_or(EpidemicError::UnknownGroup(group_id))
    }

    /// Records `children` as the child groups of `parent` and adds every current member of
    /// the children to it. Later changes to a child are not reflected in the parent.
    pub fn compose(&mut self, parent: GroupId, children: &[GroupId]) -> Result<(), EpidemicError> {
        let parent_group = self.get(parent)?;
        if !parent_group.child_groups().is_empty() {
            return Err(EpidemicError::from(format!(
                "{} is already composed from child groups",
                parent_group.name()
            )));
        }
        if children.contains(&parent) {
            return Err(EpidemicError::from(format!(
                "{} cannot be composed from itself",
                parent_group.name()
            )));
        }

        let mut members = Vec::new();
        for &child in children {
            members.extend_from_slice(self.get(child)?.members());
        }

        let parent_group = self.get_mut(parent)?;
        for person_id in members {
            parent_group.add_member(person_id);
        }
        parent_group.set_child_groups(children.to_vec());
        Ok(())
    }
}
