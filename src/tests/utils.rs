use crate::domain::RawRecord;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Route `log` output through the test harness. Safe to call from every test.
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fixed "now" so date windows are deterministic.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

pub fn days_ago(days: i64) -> String {
    (fixed_now() - Duration::days(days))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

pub fn sale_row(
    property_type: &str,
    address: &str,
    price: i64,
    size_m2: i64,
    days: i64,
) -> RawRecord {
    RawRecord::new()
        .with("property_type", property_type)
        .with("address", address)
        .with("price", price)
        .with("date", days_ago(days))
        .with("sale_type", "Alm. Salg")
        .with("size_m2", size_m2)
        .with("price_per_m2", if size_m2 > 0 { price / size_m2 } else { 0 })
        .with("rooms", 3)
        .with("year_built", 1960)
}

/// A small Copenhagen dataset with a few messy rows mixed in.
pub fn sample_rows() -> Vec<RawRecord> {
    vec![
        sale_row("Villa", "Strandvej 10, 2100 København Ø", 6_500_000, 180, 5),
        sale_row("Ejerlejlighed", "Nørrebrogade 5 2200 København N", 2_400_000, 60, 12),
        sale_row("Ejerlejlighed", "Jagtvej 101, 2200 København N", 3_100_000, 75, 90),
        sale_row("Rækkehus", "Toftegårds Allé 4, 2500 Valby", 4_200_000, 110, 200),
        sale_row("Villa", "Vigerslev Allé 30, 2500 Valby", 5_000_000, 150, 400),
        // unparsable address, price as text
        RawRecord::new()
            .with("property_type", "Ejerlejlighed")
            .with("address", "Ukendt adresse")
            .with("price", "1950000")
            .with("date", days_ago(20))
            .with("size_m2", "55"),
        // malformed numbers and missing date
        RawRecord::new()
            .with("property_type", "Grund")
            .with("address", "Kirkevej 2, 2300 København S")
            .with("price", "ring for pris")
            .with("size_m2", serde_json::Value::Null),
    ]
}
