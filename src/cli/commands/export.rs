use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::connect::open_client;
use crate::errors::AppResult;
use crate::export::logic::ExportLogic;
use crate::models::entry::Listed;
use crate::report::{self, ALL_AREAS};
use crate::ui::messages::{info, warning};

/// Export reports (or the archive) to CSV, JSON or XLSX.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        area,
        archive,
        force,
    } = cmd
    {
        let area = if area.eq_ignore_ascii_case(ALL_AREAS) {
            ALL_AREAS.to_string()
        } else {
            cfg.resolve_area(area)?
        };

        let client = open_client(cfg)?;
        let (entries, range) = if *archive {
            (client.list_archive()?, &client.ranges().archive)
        } else {
            (client.list_entries()?, &client.ranges().primary)
        };

        let selected: Vec<(usize, _)> =
            report::filter_by_area(&Listed::enumerate(entries), &area)
                .into_iter()
                .map(|l| (l.row, l.entry))
                .collect();

        if selected.is_empty() {
            warning("No reports to export.");
            return Ok(());
        }

        ExportLogic::export(&selected, *format, file, &range.sheet, *force)?;
        info(format!(
            "{} row(s) from '{}' written as {}",
            selected.len(),
            range.sheet,
            format.as_str()
        ));
    }
    Ok(())
}
