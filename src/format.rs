use chrono::NaiveDate;

/// Normalizes a typed phone number to the `+44 ` form: non-digits are
/// stripped and a leading `44` or trunk `0` becomes the country prefix.
pub fn format_uk_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if let Some(rest) = digits.strip_prefix("44") {
        format!("+44 {}", rest)
    } else if let Some(rest) = digits.strip_prefix('0') {
        format!("+44 {}", rest)
    } else {
        digits
    }
}

/// `min` attribute value for date inputs.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today_iso() -> String {
    iso_date(chrono::Local::now().date_naive())
}

/// Transition for the n-th reveal element, staggered by a tenth of a second.
pub fn reveal_transition(index: usize) -> String {
    let delay = index as f64 * 0.1;
    format!(
        "opacity 0.6s ease-out {delay:.1}s, transform 0.6s ease-out {delay:.1}s",
        delay = delay
    )
}

/// Where to scroll so the target sits just below the fixed header.
pub fn anchor_scroll_top(target_offset_top: f64, header_height: f64) -> f64 {
    target_offset_top - header_height
}

/// `href` of the nav link pointing at a section.
pub fn section_href(section_id: &str) -> String {
    format!("#{}", section_id)
}

/// `--vh` custom property value: one percent of the viewport height.
pub fn viewport_unit(inner_height: f64) -> String {
    format!("{}px", inner_height * 0.01)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_prefixes_are_normalized() {
        assert_eq!(format_uk_phone("44 7700 900123"), "+44 7700900123");
        assert_eq!(format_uk_phone("07700 900123"), "+44 7700900123");
        assert_eq!(format_uk_phone("+44 (0) 7700"), "+44 07700");
        assert_eq!(format_uk_phone("1-800-555"), "1800555");
        assert_eq!(format_uk_phone(""), "");
    }

    #[test]
    fn dates_use_iso_calendar_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(iso_date(date), "2026-03-07");
    }

    #[test]
    fn reveal_delay_grows_with_index() {
        assert_eq!(
            reveal_transition(0),
            "opacity 0.6s ease-out 0.0s, transform 0.6s ease-out 0.0s"
        );
        assert_eq!(
            reveal_transition(3),
            "opacity 0.6s ease-out 0.3s, transform 0.6s ease-out 0.3s"
        );
    }

    #[test]
    fn anchor_offset_subtracts_header() {
        assert_eq!(anchor_scroll_top(1200.0, 72.0), 1128.0);
        assert_eq!(section_href("events"), "#events");
    }

    #[test]
    fn viewport_unit_is_one_percent() {
        assert_eq!(viewport_unit(800.0), "8px");
    }
}
