use epidemic_core::log::{error, info, set_log_level, LevelFilter};
use epidemic_core::report::write_daily_counts;
use epidemic_core::{Context, ContextSimulationExt, EpidemicError, Parameters};
use std::env;
use std::process::ExitCode;

static DEFAULT_OUTPUT: &str = "daily_counts.csv";

fn initialize(context: &mut Context, parameters_path: Option<&str>) -> Result<usize, EpidemicError> {
    let parameters = match parameters_path {
        Some(path) => Parameters::from_json_file(path)?,
        None => Parameters::default(),
    };
    let num_days = parameters.num_days;
    context.setup_simulation(parameters)?;
    Ok(num_days)
}

fn run(parameters_path: Option<&str>, output_path: &str) -> Result<(), EpidemicError> {
    let mut context = Context::new();
    let num_days = initialize(&mut context, parameters_path)?;

    let counts = context.run(num_days)?;
    if let Some(peak) = counts.iter().max_by_key(|day| day.infected) {
        info!("peak of {} infected on day {}", peak.infected, peak.day);
    }

    write_daily_counts(output_path, &counts)
}

/// Usage: `pandemic [parameters.json] [output.csv]`
fn main() -> ExitCode {
    set_log_level(LevelFilter::Info);

    let args: Vec<String> = env::args().skip(1).collect();
    let parameters_path = args.first().map(String::as_str);
    let output_path = args.get(1).map_or(DEFAULT_OUTPUT, String::as_str);

    match run(parameters_path, output_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
