use crate::errors::AppResult;
use crate::models::entry::Entry;
use crate::models::settings::Settings;
use crate::report::{self, Share};
use crate::utils::colors::{BOLD, GREY, RESET, color_for_area, color_for_countdown};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

const BAR_WIDTH: usize = 30;

/// Numbers behind the `stats` screen.
#[derive(Debug, Clone)]
pub struct StatsReport {
    pub today: NaiveDate,
    pub day_counts: BTreeMap<String, usize>,
    pub month_counts: BTreeMap<String, usize>,
    pub total: usize,
    pub malformed: usize,
}

pub struct StatsLogic;

impl StatsLogic {
    /// `any_year` keeps the month view to the month number alone.
    pub fn build(entries: &[Entry], today: NaiveDate, any_year: bool) -> AppResult<StatsReport> {
        let (valid, malformed) = report::split_malformed(entries);

        let day = report::filter_by_day(&valid, today)?;
        let year = if any_year { None } else { Some(today.year()) };
        let month = report::filter_by_month(&valid, today.month(), year)?;

        Ok(StatsReport {
            today,
            day_counts: report::count_by_area(&day),
            month_counts: report::count_by_area(&month),
            total: entries.len(),
            malformed: malformed.len(),
        })
    }

    pub fn render(report: &StatsReport, settings: &Settings, areas: &[String]) -> String {
        let mut out = String::new();

        // ---- leader of the day ----
        out.push_str(&format!("{BOLD}☀️  Leader of the day ({}){RESET}\n", report.today));
        match report::leader(&report.day_counts) {
            Some((area, n)) => {
                out.push_str(&format!("   🏆 {area} with {n} report(s)\n"));
                out.push_str(&bars(&report.day_counts, areas));
            }
            None => out.push_str(&format!("   {GREY}Nobody has reported today yet.{RESET}\n")),
        }

        // ---- champion of the month ----
        out.push_str(&format!(
            "\n{BOLD}📅 Champion of the month ({}){RESET}\n",
            report.today.format("%Y-%m")
        ));
        if report.month_counts.is_empty() {
            out.push_str(&format!("   {GREY}No data this month.{RESET}\n"));
        } else {
            for Share {
                area,
                count,
                percent,
            } in report::shares(&report.month_counts)
            {
                let color = color_for_area(areas, &area);
                out.push_str(&format!(
                    "   {color}●{RESET} {area:<14} {count:>4}  {percent:>5.1}%\n"
                ));
            }
        }

        // ---- goal countdown ----
        let days = settings.days_remaining(report.today);
        let color = color_for_countdown(days);
        out.push_str(&format!("\n{BOLD}🎯 {}{RESET} ", settings.goal_name));
        if days >= 0 {
            out.push_str(&format!(
                "{color}{days} day(s) left{RESET} (target {})\n",
                settings.target_date
            ));
        } else {
            out.push_str(&format!(
                "{GREY}target date {} passed {} day(s) ago{RESET}\n",
                settings.target_date, -days
            ));
        }

        out.push_str(&format!("\nTotal reports: {}\n", report.total));
        if report.malformed > 0 {
            out.push_str(&format!(
                "{GREY}{} report(s) with an unreadable date were left out.{RESET}\n",
                report.malformed
            ));
        }
        out
    }
}

/// Horizontal text bars scaled to the largest count.
fn bars(counts: &BTreeMap<String, usize>, areas: &[String]) -> String {
    let max = counts.values().copied().max().unwrap_or(0).max(1);
    let label_w = counts.keys().map(|k| k.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (area, &n) in counts {
        let len = (n * BAR_WIDTH).div_ceil(max);
        let color = color_for_area(areas, area);
        out.push_str(&format!(
            "   {area:<label_w$} {color}{}{RESET} {n}\n",
            "█".repeat(len)
        ));
    }
    out
}
