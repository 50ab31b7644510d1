use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::core::connect::open_client;
use crate::errors::AppResult;
use crate::models::settings::Settings;
use crate::ui::messages::success;
use crate::utils::date::{parse_date, today};

/// Show the goal settings, or replace them when `--goal` and `--date` are given.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Settings {
        goal,
        date,
        password,
    } = cmd
    {
        let mut client = open_client(cfg)?;

        if let (Some(goal), Some(date)) = (goal, date) {
            let settings = Settings {
                goal_name: goal.trim().to_string(),
                target_date: parse_date(date)?,
            };
            let session = AuthLogic::admin_session(&cfg.guard(), password.as_deref())?;
            client.write_settings(&session, &settings)?;
            success(format!(
                "Goal set: {} on {}",
                settings.goal_name, settings.target_date
            ));
            return Ok(());
        }

        let settings = client.read_settings()?;
        println!("🎯 Goal        : {}", settings.goal_name);
        println!("📅 Target date : {}", settings.target_date);
        println!("⏳ Days left   : {}", settings.days_remaining(today()));
    }
    Ok(())
}
