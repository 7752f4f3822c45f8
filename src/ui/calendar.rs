//! Events calendar
//!
//! A month grid of whole weeks starting on Sunday. Each cell knows its date,
//! whether it belongs to the displayed month, whether it is today or the
//! selected date, and which events fall on it.

use crate::models::Event;
use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

pub const NO_EVENTS_MESSAGE: &str = "No events scheduled for this date.";

/// One cell of the grid
#[derive(Debug, Clone, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub events: Vec<Event>,
}

/// A rendered month
#[derive(Debug, Clone, Serialize)]
pub struct CalendarMonth {
    /// First day of the displayed month
    pub month: NaiveDate,
    /// Grid cells, a multiple of seven, Sunday first
    pub days: Vec<CalendarDay>,
    pub selected: Option<NaiveDate>,
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Sunday on or before `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Saturday on or after `date`
pub fn week_end(date: NaiveDate) -> NaiveDate {
    let forward = 6 - date.weekday().num_days_from_sunday() as u64;
    date.checked_add_days(Days::new(forward)).unwrap_or(date)
}

/// Same day next month, clamped to the month's length
pub fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

/// Same day last month, clamped to the month's length
pub fn prev_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1)).unwrap_or(date)
}

/// Parse `YYYY-MM` into the first day of that month
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d").ok()
}

/// Events on `date`
pub fn events_on(events: &[Event], date: NaiveDate) -> Vec<Event> {
    events.iter().filter(|e| e.date == date).cloned().collect()
}

impl CalendarMonth {
    /// Build the grid for the month containing `reference`
    pub fn build(
        reference: NaiveDate,
        today: NaiveDate,
        selected: Option<NaiveDate>,
        events: &[Event],
    ) -> Self {
        let month = month_start(reference);
        let start = week_start(month);
        let end = week_end(month_end(reference));

        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| CalendarDay {
                date,
                day: date.day(),
                in_month: date.month() == month.month() && date.year() == month.year(),
                is_today: date == today,
                is_selected: selected == Some(date),
                events: events_on(events, date),
            })
            .collect();

        Self {
            month,
            days,
            selected,
        }
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }

    pub fn weeks(&self) -> Vec<&[CalendarDay]> {
        self.days.chunks(7).collect()
    }

    /// `YYYY-MM` of the following month
    pub fn next_param(&self) -> String {
        next_month(self.month).format("%Y-%m").to_string()
    }

    /// `YYYY-MM` of the preceding month
    pub fn prev_param(&self) -> String {
        prev_month(self.month).format("%Y-%m").to_string()
    }

    /// Events on the selected date, if a date is selected
    pub fn selected_events(&self, events: &[Event]) -> Option<Vec<Event>> {
        self.selected.map(|date| events_on(events, date))
    }
}

/// "Events for March 5, 2024"
pub fn selected_heading(date: NaiveDate) -> String {
    format!("Events for {}", date.format("%B %-d, %Y"))
}
