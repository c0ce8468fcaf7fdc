use js_sys::Date;
use shared::DateKey;

/// Today's key in the browser's local timezone.
pub fn today_key() -> Option<DateKey> {
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    DateKey::parse(&format!("{:04}-{:02}-{:02}", year, month, day)).ok()
}
