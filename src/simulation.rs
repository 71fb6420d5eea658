//! The day-advance driver. Each day is one synchronous pass: every group runs transmission in
//! creation order, then every person runs their daily update in creation order. Nothing in
//! the person pass of a day can affect that day's group pass.

use crate::{
    context::Context,
    error::EpidemicError,
    groups::ContextGroupsExt,
    log::{debug, error, info},
    new_trait::New,
    parameters::{ContextParametersExt, Parameters},
    people::ContextPeopleExt,
    population::ContextPopulationExt,
    random::ContextRandomExt,
};
use serde::Serialize;

/// The country-wide counters of one day, the engine's only output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCounts {
    pub day: usize,
    pub infected: usize,
    pub recovered: usize,
    pub dead: usize,
}

#[derive(Default)]
struct SimulationData {
    day: usize,
}

impl New for SimulationData {
    const new: &'static dyn Fn() -> Self = &SimulationData::default;
}

pub trait ContextSimulationExt {
    /// Installs the parameters, seeds the random streams from `parameters.seed` and builds
    /// the population.
    fn setup_simulation(&mut self, parameters: Parameters) -> Result<(), EpidemicError>;

    /// The number of days advanced so far.
    fn current_day(&self) -> usize;

    /// The counters over the country group in the current state.
    fn daily_counts(&self) -> Result<DailyCounts, EpidemicError>;

    /// Runs one day: the transmission pass over every group, then the update of every person.
    /// Any failure is returned wrapped with the day it happened on.
    fn advance_one_day(&mut self) -> Result<(), EpidemicError>;

    /// Advances `num_days` days, recording the counters before each day and once more at the
    /// end, so the result holds `num_days + 1` entries starting with the seeded state.
    fn run(&mut self, num_days: usize) -> Result<Vec<DailyCounts>, EpidemicError>;
}

fn run_day(context: &mut Context) -> Result<(), EpidemicError> {
    for group_id in context.group_ids() {
        context.tick_group(group_id)?;
    }
    for person_id in context.person_ids() {
        context.update_person(person_id)?;
    }
    Ok(())
}

impl ContextSimulationExt for Context {
    fn setup_simulation(&mut self, parameters: Parameters) -> Result<(), EpidemicError> {
        let seed = parameters.seed;
        self.init_parameters(parameters)?;
        self.init_random(seed);
        self.build_population()?;
        Ok(())
    }

    fn current_day(&self) -> usize {
        self.get_data_container::<SimulationData>()
            .map_or(0, |data| data.day)
    }

    fn daily_counts(&self) -> Result<DailyCounts, EpidemicError> {
        let country = self
            .country()
            .ok_or_else(|| EpidemicError::from("no country group has been created"))?;
        Ok(DailyCounts {
            day: self.current_day(),
            infected: self.count_infected(country)?,
            recovered: self.count_recovered(country)?,
            dead: self.count_dead(country)?,
        })
    }

    fn advance_one_day(&mut self) -> Result<(), EpidemicError> {
        let day = self.current_day();
        if let Err(e) = run_day(self) {
            error!("day {day} failed: {e}");
            return Err(EpidemicError::DayFailed {
                day,
                source: Box::new(e),
            });
        }
        self.get_data_container_mut::<SimulationData>().day += 1;

        if let Ok(counts) = self.daily_counts() {
            debug!(
                "day {}: infected={} recovered={} dead={}",
                counts.day, counts.infected, counts.recovered, counts.dead
            );
        }
        Ok(())
    }

    fn run(&mut self, num_days: usize) -> Result<Vec<DailyCounts>, EpidemicError> {
        let mut counts = Vec::with_capacity(num_days + 1);
        for _ in 0..num_days {
            counts.push(self.daily_counts()?);
            self.advance_one_day()?;
        }
        let last = self.daily_counts()?;
        counts.push(last);

        info!(
            "finished {num_days} days: infected={} recovered={} dead={}",
            last.infected, last.recovered, last.dead
        );
        Ok(counts)
    }
}
