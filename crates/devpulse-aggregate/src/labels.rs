//! Chart axis labels. Pure formatting, injected into the comparison builder.

use devpulse_core::PeriodKey;
use time::{Date, Month};

/// `MM/DD`
pub fn day_label(date: Date) -> String {
    format!("{:02}/{:02}", u8::from(date.month()), date.day())
}

/// `Www` for weeks; months fall back to [`month_label`].
pub fn week_label(key: &PeriodKey) -> String {
    match key {
        PeriodKey::Week { week, .. } => format!("W{week:02}"),
        PeriodKey::Month { .. } => month_label(key),
    }
}

/// Short English month name; weeks fall back to [`week_label`].
pub fn month_label(key: &PeriodKey) -> String {
    match *key {
        PeriodKey::Month { month, .. } => match Month::try_from(month) {
            Ok(m) => short_month(m).to_string(),
            Err(_) => key.to_string(),
        },
        PeriodKey::Week { .. } => week_label(key),
    }
}

pub fn period_label(key: &PeriodKey) -> String {
    match key {
        PeriodKey::Week { .. } => week_label(key),
        PeriodKey::Month { .. } => month_label(key),
    }
}

fn short_month(m: Month) -> &'static str {
    match m {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
