use chrono::NaiveDate;

/// Format a proportion as a percentage with at most one decimal,
/// dropping a trailing `.0` (`0.5` → `50%`, `1.0 / 3.0` → `33.3%`).
pub fn format_percent(proportion: f64) -> String {
    // halves round away from zero, not to even
    let scaled = (proportion * 1000.0).round() / 10.0;
    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}%")
}

/// Axis label for an hour of the day, wrapping 24 back to `00:00`.
pub fn hour_label(hour: f64) -> String {
    let h = (hour.round() as i64).rem_euclid(24);
    format!("{h:02}:00")
}

/// Long-form date, e.g. `Monday, January 15, 2024`.
pub fn full_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
