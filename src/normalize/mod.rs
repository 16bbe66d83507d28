pub mod address;
pub mod currency;
pub mod dates;
pub mod normalizer;

pub use address::{parse_address, ParsedAddress};
pub use currency::{CurrencyFormat, DanishKroner};
pub use dates::parse_sale_date;
pub use normalizer::{normalize, Normalizer};
