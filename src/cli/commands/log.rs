use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::connect::open_client;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

/// Handle the `log` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print } = cmd
        && *print
    {
        let client = open_client(cfg)?;
        let lines = client.store().log_lines()?;
        print!("{}", LogLogic::render(&lines));
    }
    Ok(())
}
