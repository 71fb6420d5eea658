use crate::error::EpidemicError;
use crate::{GroupId, PersonId};
use serde::Serialize;

/// Epidemiological state. `Recovered` and `Dead` are absorbing.
#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, Serialize)]
pub enum InfectionStatus {
    Susceptible,
    Infected,
    Recovered,
    Dead,
}

impl InfectionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, InfectionStatus::Recovered | InfectionStatus::Dead)
    }

    #[must_use]
    pub fn is_alive(self) -> bool {
        self != InfectionStatus::Dead
    }
}

/// One agent. The transitions here are pure; the random draws that drive them are made by
/// `ContextPeopleExt`, which then applies the outcome.
#[derive(Debug, Clone)]
pub struct Person {
    id: PersonId,
    status: InfectionStatus,
    days_sick: u32,
    recover_time: u32,
    is_child: bool,
    home_city: GroupId,
    current_city: GroupId,
    is_traveling: bool,
    days_abroad: u32,
    max_days_abroad: u32,
}

impl Person {
    pub(crate) fn new(id: PersonId, is_child: bool, city: GroupId) -> Self {
        Person {
            id,
            status: InfectionStatus::Susceptible,
            days_sick: 0,
            recover_time: 0,
            is_child,
            home_city: city,
            current_city: city,
            is_traveling: false,
            days_abroad: 0,
            max_days_abroad: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PersonId {
        self.id
    }
    #[must_use]
    pub fn status(&self) -> InfectionStatus {
        self.status
    }
    #[must_use]
    pub fn days_sick(&self) -> u32 {
        self.days_sick
    }
    #[must_use]
    pub fn recover_time(&self) -> u32 {
        self.recover_time
    }
    #[must_use]
    pub fn is_child(&self) -> bool {
        self.is_child
    }
    #[must_use]
    pub fn home_city(&self) -> GroupId {
        self.home_city
    }
    #[must_use]
    pub fn current_city(&self) -> GroupId {
        self.current_city
    }
    #[must_use]
    pub fn is_traveling(&self) -> bool {
        self.is_traveling
    }
    #[must_use]
    pub fn days_abroad(&self) -> u32 {
        self.days_abroad
    }
    #[must_use]
    pub fn max_days_abroad(&self) -> u32 {
        self.max_days_abroad
    }

    /// Starts (or restarts) the illness clock. Re-infecting an infected person resets
    /// `days_sick`, which lengthens the illness.
    pub(crate) fn infect(&mut self, recover_time: u32) -> Result<(), EpidemicError> {
        if self.status.is_terminal() {
            return Err(EpidemicError::InvalidTransition {
                person: self.id,
                from: self.status,
            });
        }
        self.status = InfectionStatus::Infected;
        self.days_sick = 0;
        self.recover_time = recover_time;
        Ok(())
    }

    /// Counts one more day of illness. Returns `true` once `days_sick` exceeds the recovery
    /// threshold, meaning the outcome must now be resolved.
    pub(crate) fn advance_illness(&mut self) -> bool {
        if self.status != InfectionStatus::Infected {
            return false;
        }
        self.days_sick += 1;
        self.days_sick > self.recover_time
    }

    pub(crate) fn resolve_infection(&mut self, dies: bool) {
        if self.status != InfectionStatus::Infected {
            return;
        }
        self.status = if dies {
            InfectionStatus::Dead
        } else {
            InfectionStatus::Recovered
        };
    }

    pub(crate) fn begin_trip(&mut self, destination: GroupId, max_days_abroad: u32) {
        self.home_city = self.current_city;
        self.current_city = destination;
        self.max_days_abroad = max_days_abroad;
        self.days_abroad = 0;
        self.is_traveling = true;
    }

    /// Counts one more day abroad. Returns `true` when the trip is over.
    pub(crate) fn advance_trip(&mut self) -> bool {
        self.days_abroad += 1;
        self.days_abroad >= self.max_days_abroad
    }

    pub(crate) fn end_trip(&mut self) {
        self.current_city = self.home_city;
        self.is_traveling = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person() -> Person {
        Person::new(PersonId(0), false, GroupId(1))
    }

    #[test]
    fn infection_runs_to_recovery() {
        let mut person = person();
        person.infect(2).unwrap();
        assert_eq!(person.status(), InfectionStatus::Infected);

        assert!(!person.advance_illness());
        assert!(!person.advance_illness());
        assert!(person.advance_illness());
        person.resolve_infection(false);
        assert_eq!(person.status(), InfectionStatus::Recovered);

        // Absorbing
        assert!(!person.advance_illness());
        person.resolve_infection(true);
        assert_eq!(person.status(), InfectionStatus::Recovered);
        assert!(matches!(
            person.infect(3),
            Err(EpidemicError::InvalidTransition { from: InfectionStatus::Recovered, .. })
        ));
    }

    #[test]
    fn death_is_absorbing() {
        let mut person = person();
        person.infect(0).unwrap();
        assert!(person.advance_illness());
        person.resolve_infection(true);
        assert_eq!(person.status(), InfectionStatus::Dead);
        assert!(person.infect(1).is_err());
        assert!(!person.status().is_alive());
    }

    #[test]
    fn reinfection_resets_the_clock() {
        let mut person = person();
        person.infect(5).unwrap();
        for _ in 0..4 {
            person.advance_illness();
        }
        assert_eq!(person.days_sick(), 4);

        person.infect(9).unwrap();
        assert_eq!(person.days_sick(), 0);
        assert_eq!(person.recover_time(), 9);
        assert_eq!(person.status(), InfectionStatus::Infected);
    }

    #[test]
    fn susceptible_does_not_progress() {
        let mut person = person();
        assert!(!person.advance_illness());
        assert_eq!(person.days_sick(), 0);
        assert_eq!(person.status(), InfectionStatus::Susceptible);
    }

    #[test]
    fn trip_returns_home() {
        let mut person = person();
        person.begin_trip(GroupId(4), 2);
        assert!(person.is_traveling());
        assert_eq!(person.current_city(), GroupId(4));
        assert_eq!(person.home_city(), GroupId(1));

        assert!(!person.advance_trip());
        assert!(person.advance_trip());
        person.end_trip();
        assert!(!person.is_traveling());
        assert_eq!(person.current_city(), GroupId(1));
    }
}
