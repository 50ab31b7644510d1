use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::connect::open_client;
use crate::core::stats::StatsLogic;
use crate::errors::AppResult;
use crate::report::Dataset;
use crate::ui::messages::{header, info};
use crate::utils::date::today;

/// Show the leader of the day, the month distribution and the goal countdown.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { any_year } = cmd {
        let client = open_client(cfg)?;
        let settings = client.read_settings()?;

        let dataset = Dataset::fetch(&client);
        if let Dataset::Empty = dataset {
            info("No reports yet.");
        }
        let entries = dataset.into_result()?;

        let report = StatsLogic::build(&entries, today(), *any_year)?;
        header("Team dashboard");
        print!("{}", StatsLogic::render(&report, &settings, &cfg.areas));
    }
    Ok(())
}
