//! Builds the synthetic population: a country of cities, each city the union of its
//! households, plus schools grouping the city's children.
//!
//! Groups are created in the order Country, then for each city: the city, its households,
//! its schools. That order is the order of the daily transmission pass.

use crate::{
    context::Context,
    define_rng,
    error::EpidemicError,
    groups::{ContextGroupsExt, GroupKind},
    log::{debug, info},
    parameters::{ContextParametersExt, Parameters},
    people::ContextPeopleExt,
    random::ContextRandomExt,
    GroupId,
    PersonId,
};

define_rng!(PopulationRng);

/// Households are assigned to schools as a whole: every child of a household attends the
/// same, uniformly chosen school.
fn create_city_schools(
    context: &mut Context,
    city: GroupId,
    households: &[GroupId],
) -> Result<Vec<GroupId>, EpidemicError> {
    let &Parameters {
        avg_school_population,
        prob_school_spread,
        ..
    } = context.get_params();

    let city_group = context.get_group(city)?;
    let city_name = city_group.name().to_string();
    let mut children = 0;
    for &person_id in city_group.members() {
        if context.get_person(person_id)?.is_child() {
            children += 1;
        }
    }

    let num_schools = children / avg_school_population;
    if num_schools == 0 {
        if children > 0 {
            return Err(EpidemicError::NoSchools {
                city: city_name,
                children,
            });
        }
        return Ok(Vec::new());
    }

    let mut schools = Vec::with_capacity(num_schools);
    for k in 0..num_schools {
        schools.push(context.create_group(
            format!("{city_name} School {k}"),
            GroupKind::School,
            prob_school_spread,
        )?);
    }

    for &household in households {
        let school = schools[context.sample_range::<PopulationRng, _, usize>(0..num_schools)];
        let members = context.get_group(household)?.members().to_vec();
        for person_id in members {
            if context.get_person(person_id)?.is_child() {
                context.add_member(school, person_id)?;
            }
        }
    }

    debug!("{city_name}: {children} children in {num_schools} schools");
    Ok(schools)
}

fn create_city(context: &mut Context, index: usize) -> Result<GroupId, EpidemicError> {
    let &Parameters {
        num_households_per_city,
        max_people_per_household,
        prob_household_spread,
        prob_city_spread,
        prob_child,
        ..
    } = context.get_params();

    let city = context.create_group(format!("City {index}"), GroupKind::City, prob_city_spread)?;

    let mut households = Vec::with_capacity(num_households_per_city);
    for k in 0..num_households_per_city {
        let household = context.create_group(
            format!("City {index} Household {k}"),
            GroupKind::Household,
            prob_household_spread,
        )?;
        let household_size =
            context.sample_range::<PopulationRng, _, usize>(1..=max_people_per_household);
        for _ in 0..household_size {
            let is_child = context.sample_bool::<PopulationRng>(prob_child);
            let person_id = context.add_person(is_child, city);
            context.add_member(household, person_id)?;
        }
        households.push(household);
    }
    context.compose_group_from(city, &households)?;

    create_city_schools(context, city, &households)?;
    Ok(city)
}

pub trait ContextPopulationExt {
    /// Builds the country, its cities, households and schools from the installed parameters
    /// and infects patient zero, the first person created. Returns the country group.
    fn build_population(&mut self) -> Result<GroupId, EpidemicError>;
}

impl ContextPopulationExt for Context {
    fn build_population(&mut self) -> Result<GroupId, EpidemicError> {
        let &Parameters { num_cities, .. } = self.get_params();

        let country = self.create_group("Country", GroupKind::Country, 0.0)?;
        let mut cities = Vec::with_capacity(num_cities);
        for index in 0..num_cities {
            cities.push(create_city(self, index)?);
        }
        self.compose_group_from(country, &cities)?;

        if self.get_current_population() > 0 {
            self.infect_person(PersonId(0))?;
        }

        info!(
            "built {} people in {} cities ({} groups)",
            self.get_current_population(),
            num_cities,
            self.group_ids().len()
        );
        Ok(country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::InfectionStatus;

    fn build(parameters: Parameters) -> Result<(Context, GroupId), EpidemicError> {
        let mut context = Context::new();
        context.init_random(parameters.seed);
        context.init_parameters(parameters)?;
        let country = context.build_population()?;
        Ok((context, country))
    }

    fn small_parameters() -> Parameters {
        Parameters {
            seed: 11,
            num_cities: 3,
            num_households_per_city: 40,
            max_people_per_household: 6,
            avg_school_population: 10,
            prob_child: 0.3,
            ..Parameters::default()
        }
    }

    #[test]
    fn cities_are_the_union_of_their_households() {
        let (context, country) = build(small_parameters()).unwrap();

        let mut country_total = 0;
        for city in context.cities() {
            let city_group = context.get_group(city).unwrap();
            assert_eq!(city_group.child_groups().len(), 40);

            let mut household_total = 0;
            for &household in city_group.child_groups() {
                let household_group = context.get_group(household).unwrap();
                assert_eq!(household_group.kind(), GroupKind::Household);
                assert!((1..=6).contains(&household_group.len()));
                for &person_id in household_group.members() {
                    assert!(city_group.contains(person_id));
                    assert_eq!(context.get_person(person_id).unwrap().home_city(), city);
                }
                household_total += household_group.len();
            }
            assert_eq!(city_group.len(), household_total);
            country_total += city_group.len();
        }

        let country_group = context.get_group(country).unwrap();
        assert_eq!(country_group.len(), country_total);
        assert_eq!(country_group.len(), context.get_current_population());
    }

    #[test]
    fn every_child_attends_exactly_one_school_with_their_household() {
        let (context, _) = build(small_parameters()).unwrap();
        let schools: Vec<GroupId> = context
            .group_ids()
            .into_iter()
            .filter(|&g| context.get_group(g).unwrap().kind() == GroupKind::School)
            .collect();
        assert!(!schools.is_empty());

        for person_id in context.person_ids() {
            let person = context.get_person(person_id).unwrap();
            let attended = schools
                .iter()
                .filter(|&&s| context.get_group(s).unwrap().contains(person_id))
                .count();
            assert_eq!(attended, usize::from(person.is_child()));
        }

        // Children of one household share a school.
        for city in context.cities() {
            for &household in context.get_group(city).unwrap().child_groups() {
                let children: Vec<PersonId> = context
                    .get_group(household)
                    .unwrap()
                    .members()
                    .iter()
                    .copied()
                    .filter(|&p| context.get_person(p).unwrap().is_child())
                    .collect();
                if let Some(&first) = children.first() {
                    let school = schools
                        .iter()
                        .find(|&&s| context.get_group(s).unwrap().contains(first))
                        .unwrap();
                    for child in children {
                        assert!(context.get_group(*school).unwrap().contains(child));
                    }
                }
            }
        }
    }

    #[test]
    fn groups_are_created_in_pass_order() {
        let (context, country) = build(small_parameters()).unwrap();
        let kinds: Vec<GroupKind> = context
            .group_ids()
            .into_iter()
            .map(|g| context.get_group(g).unwrap().kind())
            .collect();

        assert_eq!(country, GroupId(0));
        assert_eq!(kinds[0], GroupKind::Country);
        assert_eq!(kinds[1], GroupKind::City);
        assert!(kinds[2..42].iter().all(|&k| k == GroupKind::Household));
        // Each city's schools follow its households and precede the next city.
        let mut seen_city = 0;
        let mut last = GroupKind::Country;
        for &kind in &kinds[1..] {
            match kind {
                GroupKind::City => {
                    assert_ne!(last, GroupKind::City);
                    seen_city += 1;
                }
                GroupKind::Household => assert!(matches!(last, GroupKind::City | GroupKind::Household)),
                GroupKind::School => assert!(matches!(last, GroupKind::Household | GroupKind::School)),
                GroupKind::Country => panic!("only one country"),
            }
            last = kind;
        }
        assert_eq!(seen_city, 3);
    }

    #[test]
    fn patient_zero_is_the_only_infection() {
        let (context, country) = build(small_parameters()).unwrap();
        assert_eq!(
            context.get_person(PersonId(0)).unwrap().status(),
            InfectionStatus::Infected
        );
        assert_eq!(context.count_infected(country).unwrap(), 1);
    }

    #[test]
    fn too_few_children_for_a_school_fails_fast() {
        let result = build(Parameters {
            num_cities: 1,
            num_households_per_city: 2,
            max_people_per_household: 3,
            prob_child: 1.0,
            avg_school_population: 20,
            ..Parameters::default()
        });
        assert!(matches!(
            result,
            Err(EpidemicError::NoSchools { children, .. }) if (2..=6).contains(&children)
        ));
    }

    #[test]
    fn childless_city_needs_no_school() {
        let (context, _) = build(Parameters {
            num_cities: 2,
            num_households_per_city: 5,
            prob_child: 0.0,
            ..Parameters::default()
        })
        .unwrap();
        assert!(context
            .group_ids()
            .into_iter()
            .all(|g| context.get_group(g).unwrap().kind() != GroupKind::School));
    }

    #[test]
    fn same_seed_same_population() {
        let (a, _) = build(small_parameters()).unwrap();
        let (b, _) = build(small_parameters()).unwrap();
        assert_eq!(a.get_current_population(), b.get_current_population());
        assert_eq!(a.group_ids().len(), b.group_ids().len());
        for person_id in a.person_ids() {
            assert_eq!(
                a.get_person(person_id).unwrap().is_child(),
                b.get_person(person_id).unwrap().is_child()
            );
        }
    }
}
