// src/normalize/normalizer.rs

use crate::domain::{PropertyRecord, RawField, RawRecord};
use crate::normalize::address::parse_address;
use crate::normalize::currency::{CurrencyFormat, DanishKroner};
use crate::normalize::dates::parse_sale_date;
use log::debug;

/// Turns loosely-typed loader rows into `PropertyRecord`s.
///
/// Coercion is per field and never fails: malformed or absent numbers become 0,
/// absent text becomes the empty string.
#[derive(Debug, Clone, Default)]
pub struct Normalizer<F: CurrencyFormat = DanishKroner> {
    formatter: F,
}

impl Normalizer<DanishKroner> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: CurrencyFormat> Normalizer<F> {
    pub fn with_formatter(formatter: F) -> Self {
        Self { formatter }
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    pub fn normalize(&self, raw: &RawRecord) -> PropertyRecord {
        self.normalize_counted(raw).0
    }

    pub fn normalize_all(&self, rows: &[RawRecord]) -> Vec<PropertyRecord> {
        let mut malformed = 0usize;
        let records: Vec<PropertyRecord> = rows
            .iter()
            .map(|raw| {
                let (record, bad) = self.normalize_counted(raw);
                malformed += bad;
                record
            })
            .collect();

        debug!(
            "Normalized {} rows ({} malformed fields coerced to defaults)",
            records.len(),
            malformed
        );
        records
    }

    /// Normalizes one row and reports how many fields were present but unusable.
    fn normalize_counted(&self, raw: &RawRecord) -> (PropertyRecord, usize) {
        let mut malformed = 0usize;

        let mut text = |key: &str| {
            let field = raw.text(key);
            if field.is_malformed() {
                malformed += 1;
            }
            field.or(String::new())
        };

        let property_type = text("property_type");
        let raw_address = text("address");
        let date = text("date");
        let sale_type = text("sale_type");

        let mut number = |key: &str| {
            let field = raw.number(key);
            if field.is_malformed() {
                malformed += 1;
            }
            non_negative(field)
        };

        let price = number("price");
        let size_m2 = number("size_m2");
        let price_per_m2 = number("price_per_m2");
        let rooms = number("rooms");

        let year_built = match raw.number("year_built") {
            RawField::Present(v) => v.trunc() as i32,
            RawField::Malformed(_) => {
                malformed += 1;
                0
            }
            RawField::Absent => 0,
        };

        let address = parse_address(&raw_address);
        let sold_at = parse_sale_date(&date);

        let record = PropertyRecord {
            property_type,
            address: address.street,
            postcode: address.postcode,
            district: address.district,
            price,
            sold_at,
            date,
            sale_type,
            size_m2,
            price_per_m2,
            rooms: rooms.trunc() as u32,
            year_built,
            formatted_price: self.formatter.format(price),
            formatted_price_per_m2: self.formatter.format(price_per_m2),
        };

        (record, malformed)
    }
}

/// Convenience wrapper using the default Danish formatter.
pub fn normalize(raw: &RawRecord) -> PropertyRecord {
    Normalizer::new().normalize(raw)
}

fn non_negative(field: RawField<f64>) -> f64 {
    field.or(0.0).max(0.0)
}
