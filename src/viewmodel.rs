//! Forecast/warning view-model derivation
//!
//! The two pure operations of the dashboard: enriching raw forecast days into
//! display-ready records, and filtering the national warning list down to the
//! advisories of the selected city's area. Both are pure functions of their
//! arguments; "now" is injected as an explicit reference date so the
//! derivation is reproducible in tests.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::models::{ForecastDayView, RawForecastDay, Warning, WarningView, WeatherTypeLookup};

/// Portuguese weekday names, indexed 0=Sunday..6=Saturday
const WEEKDAY_NAMES_PT: [&str; 7] = [
    "Domingo",
    "Segunda-feira",
    "Terça-feira",
    "Quarta-feira",
    "Quinta-feira",
    "Sexta-feira",
    "Sábado",
];

/// Wind-speed class labels, indexed by class - 1
const WIND_SPEED_LABELS_PT: [&str; 4] = ["Fraco", "Moderado", "Forte", "Muito forte"];

/// Portuguese month names, indexed 0=January
const MONTH_NAMES_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// English month names, indexed 0=January
const MONTH_NAMES_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Enrich raw forecast days into display-ready records
///
/// The output has the same length and order as `raw_days`, and every element
/// carries all raw fields plus the four derived ones. A weather-type code
/// missing from the lookup yields `weather_desc = None`; a wind-speed class
/// outside 1..=4 yields `wind_label = None`; an unparseable forecast date
/// falls back to the raw date string as the label. Nothing here fails.
#[must_use]
pub fn build_day_views(
    raw_days: &[RawForecastDay],
    weather_types: &WeatherTypeLookup,
    reference_date: NaiveDate,
) -> Vec<ForecastDayView> {
    raw_days
        .iter()
        .map(|day| {
            let code = day.weather_type.trim().parse::<i32>().ok();
            ForecastDayView {
                day_label: day_label(&day.forecast_date, reference_date),
                weather_desc: code.and_then(|c| weather_types.get(&c).cloned()),
                icon_path: icon_path(code, &day.weather_type),
                wind_label: wind_speed_label(day.wind_speed_class).map(str::to_string),
                raw: day.clone(),
            }
        })
        .collect()
}

/// Filter the national warning list to the selected city's active advisories
///
/// Keeps a warning iff its area code equals `selected_area_code` and its
/// severity is above green, preserving source order. Every kept warning is
/// copied with its timestamps re-rendered for `locale`. An unresolved area
/// code yields an empty sequence, not a failure.
#[must_use]
pub fn select_active_warnings(
    all_warnings: &[Warning],
    selected_area_code: Option<&str>,
    locale: &str,
) -> Vec<WarningView> {
    let Some(area_code) = selected_area_code else {
        return Vec::new();
    };

    all_warnings
        .iter()
        .filter(|warning| {
            warning.area_warning_code == area_code && warning.awareness_level.is_advisory()
        })
        .map(|warning| WarningView {
            text: warning.text.clone(),
            awareness_type_name: warning.awareness_type_name.clone(),
            area_warning_code: warning.area_warning_code.clone(),
            awareness_level: warning.awareness_level,
            start_time: format_warning_time(&warning.start_time, locale),
            end_time: format_warning_time(&warning.end_time, locale),
        })
        .collect()
}

/// Derive the relative day label for a forecast date
///
/// Same weekday as the reference date gives "Hoje", the immediately following
/// weekday (mod 7) gives "Amanhã", anything else the fixed weekday table.
#[must_use]
pub fn day_label(forecast_date: &str, reference_date: NaiveDate) -> String {
    let Ok(date) = NaiveDate::parse_from_str(forecast_date, "%Y-%m-%d") else {
        return forecast_date.to_string();
    };

    let weekday = date.weekday().num_days_from_sunday();
    let reference_weekday = reference_date.weekday().num_days_from_sunday();

    if weekday == reference_weekday {
        "Hoje".to_string()
    } else if weekday == (reference_weekday + 1) % 7 {
        "Amanhã".to_string()
    } else {
        WEEKDAY_NAMES_PT[weekday as usize].to_string()
    }
}

/// Build the daytime animated icon asset path for a weather-type code
///
/// Codes up to 9 are zero-padded to two digits; codes above 9 are interpolated
/// as-is. The range split matches the icon file naming convention exactly. An
/// unparseable code is interpolated verbatim.
#[must_use]
pub fn icon_path(code: Option<i32>, raw_code: &str) -> String {
    let rendered = match code {
        Some(c) if c <= 9 => format!("{c:02}"),
        Some(c) => c.to_string(),
        None => raw_code.trim().to_string(),
    };
    format!("/icons/w_ic_d_{rendered}anim.svg")
}

/// Resolve the descriptive label for a wind-speed class
#[must_use]
pub fn wind_speed_label(class: i64) -> Option<&'static str> {
    match class {
        1..=4 => Some(WIND_SPEED_LABELS_PT[(class - 1) as usize]),
        _ => None,
    }
}

/// Render a machine timestamp as a locale long form (day, month name, time)
///
/// `pt*` locales use the Portuguese month table; anything else falls back to
/// English. An unparseable timestamp is returned unchanged.
#[must_use]
pub fn format_warning_time(timestamp: &str, locale: &str) -> String {
    let Ok(datetime) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S") else {
        return timestamp.to_string();
    };

    let month = datetime.month0() as usize;
    if locale.starts_with("pt") {
        format!(
            "{} de {} às {:02}:{:02}",
            datetime.day(),
            MONTH_NAMES_PT[month],
            datetime.hour(),
            datetime.minute()
        )
    } else {
        format!(
            "{} {}, {:02}:{:02}",
            MONTH_NAMES_EN[month],
            datetime.day(),
            datetime.hour(),
            datetime.minute()
        )
    }
}
