use crate::context::Context;
use crate::error::EpidemicError;
use crate::log::info;
use crate::new_trait::New;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Every recognized option of a run. Fixed once the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    pub seed: u64,
    pub num_days: usize,

    pub num_cities: usize,
    pub num_households_per_city: usize,
    pub max_people_per_household: usize,
    pub avg_school_population: usize,

    pub prob_household_spread: f64,
    pub prob_city_spread: f64,
    pub prob_school_spread: f64,
    pub prob_child: f64,

    pub prob_travel: f64,
    pub max_days_abroad: u32,

    pub min_recover_days: u32,
    pub max_recover_days: u32,
    pub prob_death: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            seed: 0,
            num_days: 60,
            num_cities: 10,
            num_households_per_city: 100,
            max_people_per_household: 6,
            avg_school_population: 20,
            prob_household_spread: 0.1,
            prob_city_spread: 0.0001,
            prob_school_spread: 0.04,
            prob_child: 0.2,
            prob_travel: 3.0 / 365.0,
            max_days_abroad: 10,
            min_recover_days: 7,
            max_recover_days: 14,
            prob_death: 0.01,
        }
    }
}

/// Fails with `InvalidParameter` unless `value` is a finite number in `[0, 1]`.
pub(crate) fn check_probability(name: &str, value: f64) -> Result<(), EpidemicError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(EpidemicError::InvalidParameter(format!(
            "{name} must be in [0, 1], got {value}"
        )))
    }
}

fn check_at_least_one(name: &str, value: u64) -> Result<(), EpidemicError> {
    if value == 0 {
        return Err(EpidemicError::InvalidParameter(format!(
            "{name} must be at least 1"
        )));
    }
    Ok(())
}

impl Parameters {
    /// Reads parameters from a JSON file. Fields that are absent take their default value.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Parameters, EpidemicError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let parameters: Parameters = serde_json::from_str(&contents)?;
        Ok(parameters)
    }

    pub fn validate(&self) -> Result<(), EpidemicError> {
        check_probability("prob_household_spread", self.prob_household_spread)?;
        check_probability("prob_city_spread", self.prob_city_spread)?;
        check_probability("prob_school_spread", self.prob_school_spread)?;
        check_probability("prob_child", self.prob_child)?;
        check_probability("prob_travel", self.prob_travel)?;
        check_probability("prob_death", self.prob_death)?;

        if self.min_recover_days > self.max_recover_days {
            return Err(EpidemicError::InvalidParameter(format!(
                "min_recover_days ({}) exceeds max_recover_days ({})",
                self.min_recover_days, self.max_recover_days
            )));
        }

        check_at_least_one("num_cities", self.num_cities as u64)?;
        check_at_least_one("max_people_per_household", self.max_people_per_household as u64)?;
        check_at_least_one("avg_school_population", self.avg_school_population as u64)?;
        check_at_least_one("max_days_abroad", u64::from(self.max_days_abroad))?;
        Ok(())
    }
}

static DEFAULT_PARAMETERS: LazyLock<Parameters> = LazyLock::new(Parameters::default);

struct ParametersPlugin {
    parameters: Parameters,
}

impl New for ParametersPlugin {
    const new: &'static dyn Fn() -> Self = &|| ParametersPlugin {
        parameters: Parameters::default(),
    };
}

pub trait ContextParametersExt {
    /// Validates and installs the parameters for this run.
    fn init_parameters(&mut self, parameters: Parameters) -> Result<(), EpidemicError>;

    /// The parameters of this run, or the defaults if none were installed.
    fn get_params(&self) -> &Parameters;
}

impl ContextParametersExt for Context {
    fn init_parameters(&mut self, parameters: Parameters) -> Result<(), EpidemicError> {
        parameters.validate()?;
        info!("parameters: {parameters:?}");
        self.get_data_container_mut::<ParametersPlugin>().parameters = parameters;
        Ok(())
    }

    fn get_params(&self) -> &Parameters {
        match self.get_data_container::<ParametersPlugin>() {
            Some(plugin) => &plugin.parameters,
            None => &*DEFAULT_PARAMETERS,
        }
    }
}
