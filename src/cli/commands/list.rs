use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::connect::open_client;
use crate::core::list::{ListLogic, ListQuery, ListView};
use crate::errors::AppResult;
use crate::models::entry::Listed;
use crate::report::Dataset;
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{RESET, color_for_area};
use crate::utils::date::{parse_date, parse_month, today};
use crate::utils::table::Table;
use chrono::Datelike;

const DESCRIPTION_WIDTH: usize = 48;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        area,
        today: only_today,
        day,
        month,
        any_year,
        year,
        from,
        to,
        archive,
    } = cmd
    {
        let query = build_query(cfg, area, *only_today, day, month, *any_year, *year, from, to)?;
        let client = open_client(cfg)?;

        if *archive {
            let view = ListLogic::build(client.list_archive()?, &query)?;
            header("Archive");
            print_view(&view, cfg);
            return Ok(());
        }

        match Dataset::fetch(&client) {
            Dataset::Failed(e) => return Err(e),
            Dataset::Empty => info("No reports yet. Be the first to add one!"),
            Dataset::Loaded(entries) => {
                let view = ListLogic::build(entries, &query)?;
                header("Reports");
                print_view(&view, cfg);
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_query(
    cfg: &Config,
    area: &str,
    only_today: bool,
    day: &Option<String>,
    month: &Option<String>,
    any_year: bool,
    year: Option<i32>,
    from: &Option<String>,
    to: &Option<String>,
) -> AppResult<ListQuery> {
    let mut query = ListQuery::default();

    if !area.eq_ignore_ascii_case(crate::report::ALL_AREAS) {
        query.area = cfg.resolve_area(area)?;
    }

    if only_today {
        query.day = Some(today());
    } else if let Some(d) = day {
        query.day = Some(parse_date(d)?);
    }

    if let Some(m) = month {
        let (month, parsed_year) = parse_month(m)?;
        let year = match (parsed_year, any_year) {
            (Some(y), _) => Some(y),
            (None, true) => None,
            (None, false) => Some(year.unwrap_or_else(|| today().year())),
        };
        query.month = Some((month, year));
    }

    if let (Some(f), Some(t)) = (from, to) {
        query.range = Some((parse_date(f)?, parse_date(t)?));
    }

    Ok(query)
}

fn print_view(view: &ListView, cfg: &Config) {
    if view.rows.is_empty() {
        info("No reports match the selected filters.");
    } else {
        println!("{}", render_rows(&view.rows, &cfg.areas));
        println!("{} report(s)", view.rows.len());
    }

    if !view.malformed.is_empty() {
        warning(format!(
            "{} row(s) have an unreadable date and are shown unfiltered:",
            view.malformed.len()
        ));
        println!("{}", render_rows(&view.malformed, &cfg.areas));
    }
}

fn render_rows(rows: &[Listed], areas: &[String]) -> String {
    let mut table = Table::new(vec!["#", "Date", "Name", "Area", "Task", "Key"]);
    for l in rows {
        let e = &l.entry;
        let color = color_for_area(areas, &e.area);
        table.add_row(vec![
            l.row.to_string(),
            e.timestamp.clone(),
            e.author.clone(),
            format!("{color}{}{RESET}", e.area),
            textwrap::fill(&e.description, DESCRIPTION_WIDTH),
            e.short_key().to_string(),
        ]);
    }
    table.render()
}
