//! Spread within one group for one day.
//!
//! Mixing inside a group is homogeneous. Each infectious member independently draws a number
//! of contacts `k ~ Binomial(|vulnerable|, p)` and infects `k` distinct members of the
//! vulnerable pool, chosen uniformly without replacement. The pool is every living member who
//! has not recovered, infected members included, so an infected member can be infected again
//! and have their illness restarted. The pools are fixed before the first draw: people infected
//! during the pass do not transmit within this group until the next day, though they do in
//! groups later in the same day's pass.

use crate::{
    context::Context,
    define_rng,
    error::EpidemicError,
    groups::ContextGroupsExt,
    log::trace,
    people::{ContextPeopleExt, InfectionStatus},
    random::ContextRandomExt,
    GroupId,
    PersonId,
};

define_rng!(TransmissionRng);

/// The members of a group a pass works on.
struct TransmissionPools {
    vulnerable: Vec<PersonId>,
    infectious: Vec<PersonId>,
}

fn partition_members(context: &Context, members: &[PersonId]) -> Result<TransmissionPools, EpidemicError> {
    let mut vulnerable = Vec::new();
    let mut infectious = Vec::new();
    for &person_id in members {
        match context.get_person(person_id)?.status() {
            InfectionStatus::Dead | InfectionStatus::Recovered => {}
            InfectionStatus::Susceptible => vulnerable.push(person_id),
            InfectionStatus::Infected => {
                vulnerable.push(person_id);
                infectious.push(person_id);
            }
        }
    }
    Ok(TransmissionPools { vulnerable, infectious })
}

/// Runs one transmission pass over the group and returns the number of `infect` calls made.
/// A group with no members or a transmission probability of 0 is left untouched.
pub fn transmit_within_group(context: &mut Context, group_id: GroupId) -> Result<usize, EpidemicError> {
    let group = context.get_group(group_id)?;
    let probability = group.transmission_probability();
    if probability <= 0.0 || group.is_empty() {
        return Ok(0);
    }
    let TransmissionPools { vulnerable, infectious } = partition_members(context, group.members())?;

    let mut infections = 0;
    for source in infectious {
        let contacts = context.sample_binomial::<TransmissionRng>(vulnerable.len() as u64, probability)?;
        // `contacts` never exceeds the pool size it was drawn from.
        let targets = context.sample_without_replacement::<TransmissionRng, _>(&vulnerable, contacts as usize);
        for target in targets {
            context.infect_person(target)?;
            infections += 1;
        }
        trace!("{source:?} made {contacts} infectious contacts in {group_id:?}");
    }
    Ok(infections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groups::GroupKind;
    use crate::parameters::{ContextParametersExt, Parameters};

    fn household_of(context: &mut Context, size: usize, probability: f64) -> GroupId {
        let city = context.create_group("City 0", GroupKind::City, 0.0).unwrap();
        let household = context
            .create_group("Household 0", GroupKind::Household, probability)
            .unwrap();
        for _ in 0..size {
            let person_id = context.add_person(false, city);
            context.add_member(household, person_id).unwrap();
        }
        household
    }

    fn seeded_context() -> Context {
        let mut context = Context::new();
        context.init_random(8);
        context
            .init_parameters(Parameters {
                min_recover_days: 5,
                max_recover_days: 5,
                ..Parameters::default()
            })
            .unwrap();
        context
    }

    #[test]
    fn certain_transmission_reaches_everyone() {
        let mut context = seeded_context();
        let household = household_of(&mut context, 5, 1.0);
        context.infect_person(PersonId(0)).unwrap();

        let infections = transmit_within_group(&mut context, household).unwrap();
        assert_eq!(infections, 5);
        assert_eq!(context.count_infected(household).unwrap(), 5);
    }

    #[test]
    fn every_infectious_member_draws_independently() {
        let mut context = seeded_context();
        let household = household_of(&mut context, 4, 1.0);
        context.infect_person(PersonId(0)).unwrap();
        context.infect_person(PersonId(1)).unwrap();

        // Two sources, each hitting the whole pool of four.
        assert_eq!(transmit_within_group(&mut context, household).unwrap(), 8);
    }

    #[test]
    fn zero_probability_is_a_no_op() {
        let mut context = seeded_context();
        let household = household_of(&mut context, 5, 0.0);
        context.infect_person(PersonId(0)).unwrap();

        assert_eq!(transmit_within_group(&mut context, household).unwrap(), 0);
        assert_eq!(context.count_infected(household).unwrap(), 1);
    }

    #[test]
    fn empty_group_is_a_no_op() {
        let mut context = seeded_context();
        let school = context.create_group("School 0", GroupKind::School, 1.0).unwrap();
        assert_eq!(transmit_within_group(&mut context, school).unwrap(), 0);
    }

    #[test]
    fn recovered_and_dead_are_not_targets() {
        let mut context = Context::new();
        context.init_random(3);
        context
            .init_parameters(Parameters {
                prob_travel: 0.0,
                min_recover_days: 0,
                max_recover_days: 0,
                prob_death: 0.0,
                ..Parameters::default()
            })
            .unwrap();
        let household = household_of(&mut context, 3, 1.0);

        // Person 1 recovers.
        context.infect_person(PersonId(1)).unwrap();
        context.update_person(PersonId(1)).unwrap();
        assert_eq!(
            context.get_person(PersonId(1)).unwrap().status(),
            InfectionStatus::Recovered
        );

        context.infect_person(PersonId(0)).unwrap();
        // Pool is persons 0 and 2.
        assert_eq!(transmit_within_group(&mut context, household).unwrap(), 2);
        assert_eq!(
            context.get_person(PersonId(1)).unwrap().status(),
            InfectionStatus::Recovered
        );
        assert_eq!(
            context.get_person(PersonId(2)).unwrap().status(),
            InfectionStatus::Infected
        );
    }

    #[test]
    fn partial_transmission_stays_within_pool() {
        let mut context = seeded_context();
        let household = household_of(&mut context, 50, 0.2);
        context.infect_person(PersonId(0)).unwrap();

        let infections = transmit_within_group(&mut context, household).unwrap();
        assert!(infections <= 50);
        let infected = context.count_infected(household).unwrap();
        assert!(infected >= 1 && infected <= 51.min(infections + 1));
    }
}
