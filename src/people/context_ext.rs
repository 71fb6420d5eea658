use crate::{
    context::Context,
    define_rng,
    error::EpidemicError,
    groups::ContextGroupsExt,
    log::trace,
    parameters::{ContextParametersExt, Parameters},
    people::{InfectionStatus, PeopleData, Person},
    random::ContextRandomExt,
    GroupId,
    PersonId,
};

define_rng!(IllnessRng);
define_rng!(TravelRng);

pub trait ContextPeopleExt {
    fn get_current_population(&self) -> usize;

    /// Creates a susceptible person living in `city`. The caller is responsible for adding
    /// them to the city's membership (population building does so through the household).
    fn add_person(&mut self, is_child: bool, city: GroupId) -> PersonId;

    fn get_person(&self, person_id: PersonId) -> Result<&Person, EpidemicError>;

    /// Every person id in creation order.
    fn person_ids(&self) -> Vec<PersonId>;

    /// Infects the person, drawing a fresh recovery threshold from
    /// `[min_recover_days, max_recover_days]`. An infected person is infected again,
    /// which restarts their illness.
    fn infect_person(&mut self, person_id: PersonId) -> Result<(), EpidemicError>;

    /// The once-per-day update of one person: the travel step, then illness progression.
    fn update_person(&mut self, person_id: PersonId) -> Result<(), EpidemicError>;

    fn count_people_by_status(&self, status: InfectionStatus) -> usize;
}

impl ContextPeopleExt for Context {
    fn get_current_population(&self) -> usize {
        match self.get_data_container::<PeopleData>() {
            None => 0,
            Some(people_data) => people_data.len(),
        }
    }

    fn add_person(&mut self, is_child: bool, city: GroupId) -> PersonId {
        self.get_data_container_mut::<PeopleData>()
            .add_person(is_child, city)
    }

    fn get_person(&self, person_id: PersonId) -> Result<&Person, EpidemicError> {
        self.get_data_container::<PeopleData>()
            .ok_or(EpidemicError::UnknownPerson(person_id))?
            .get(person_id)
    }

    fn person_ids(&self) -> Vec<PersonId> {
        (0..self.get_current_population()).map(PersonId).collect()
    }

    fn infect_person(&mut self, person_id: PersonId) -> Result<(), EpidemicError> {
        let status = self.get_person(person_id)?.status();
        if status.is_terminal() {
            return Err(EpidemicError::InvalidTransition {
                person: person_id,
                from: status,
            });
        }

        let &Parameters {
            min_recover_days,
            max_recover_days,
            ..
        } = self.get_params();
        let recover_time =
            self.sample_range::<IllnessRng, _, u32>(min_recover_days..=max_recover_days);

        trace!("{person_id:?} infected, recovers after {recover_time} days");
        self.get_person_mut(person_id)?.infect(recover_time)
    }

    fn update_person(&mut self, person_id: PersonId) -> Result<(), EpidemicError> {
        // Dead people still take and finish trips.
        self.travel_step(person_id)?;
        self.progress_illness(person_id)
    }

    fn count_people_by_status(&self, status: InfectionStatus) -> usize {
        self.get_data_container::<PeopleData>()
            .map_or(0, |people_data| people_data.count_by_status(status))
    }
}

pub(crate) trait ContextPeopleExtInternal {
    fn get_person_mut(&mut self, person_id: PersonId) -> Result<&mut Person, EpidemicError>;
    fn travel_step(&mut self, person_id: PersonId) -> Result<(), EpidemicError>;
    fn progress_illness(&mut self, person_id: PersonId) -> Result<(), EpidemicError>;
}

impl ContextPeopleExtInternal for Context {
    fn get_person_mut(&mut self, person_id: PersonId) -> Result<&mut Person, EpidemicError> {
        self.get_data_container_mut::<PeopleData>()
            .get_mut(person_id)
    }

    fn travel_step(&mut self, person_id: PersonId) -> Result<(), EpidemicError> {
        let person = self.get_person(person_id)?;
        let is_traveling = person.is_traveling();
        let current_city = person.current_city();

        if is_traveling {
            if self.get_person_mut(person_id)?.advance_trip() {
                let home_city = self.get_person(person_id)?.home_city();
                self.remove_member(current_city, person_id)?;
                self.get_person_mut(person_id)?.end_trip();
                self.add_member(home_city, person_id)?;
                trace!("{person_id:?} returned home to {home_city:?}");
            }
            return Ok(());
        }

        let &Parameters {
            prob_travel,
            max_days_abroad,
            ..
        } = self.get_params();
        if !self.sample_bool::<TravelRng>(prob_travel) {
            return Ok(());
        }

        let cities = self.cities();
        if cities.is_empty() {
            return Err(EpidemicError::from(format!(
                "{person_id:?} is departing but there are no cities to travel to"
            )));
        }

        self.remove_member(current_city, person_id)?;
        let trip_length = self.sample_range::<TravelRng, _, u32>(1..=max_days_abroad);
        let destination = cities[self.sample_range::<TravelRng, _, usize>(0..cities.len())];
        self.add_member(destination, person_id)?;
        self.get_person_mut(person_id)?
            .begin_trip(destination, trip_length);

        trace!("{person_id:?} departed {current_city:?} for {destination:?} for {trip_length} days");
        Ok(())
    }

    fn progress_illness(&mut self, person_id: PersonId) -> Result<(), EpidemicError> {
        if !self.get_person_mut(person_id)?.advance_illness() {
            return Ok(());
        }

        let &Parameters { prob_death, .. } = self.get_params();
        let dies = self.sample_bool::<IllnessRng>(prob_death);
        let person = self.get_person_mut(person_id)?;
        person.resolve_infection(dies);
        trace!("{person_id:?} is now {:?}", person.status());
        Ok(())
    }
}
