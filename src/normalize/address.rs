//! Free-text Danish address splitting: "Strandvej 10, 2100 København Ø"
//! becomes street / postcode / district.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    // Optional leading text, a four-digit code, then a comma-free district up to the end.
    // The greedy lead makes the rightmost code win.
    static ref TRAILING_POSTCODE_RE: Regex =
        Regex::new(r"^(?:(.*)[\s,])?([0-9]{4})\s+([^,\s][^,]*)$").unwrap();
    static ref SEGMENT_POSTCODE_RE: Regex = Regex::new(r"^([0-9]{4})\s+(\S.*)$").unwrap();
    static ref POSTCODE_PREFIX_RE: Regex = Regex::new(r"^[0-9]{4}\s+").unwrap();
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedAddress {
    pub street: String,
    pub postcode: String,
    pub district: String,
}

/// Splits an address into street, postcode and district.
///
/// Never fails. When no four-digit code can be located the trimmed input is
/// returned as the street, with empty postcode and district.
pub fn parse_address(address: &str) -> ParsedAddress {
    let address = address.trim();
    if address.is_empty() {
        return ParsedAddress::default();
    }

    if let Some(caps) = TRAILING_POSTCODE_RE.captures(address) {
        let street = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        return ParsedAddress {
            street: clean_street(street),
            postcode: caps[2].to_string(),
            district: clean_district(&caps[3]),
        };
    }

    // Fall back to the last comma segment on its own.
    let segments: Vec<&str> = address.split(',').map(str::trim).collect();
    if let Some((last, preceding)) = segments.split_last() {
        if let Some(caps) = SEGMENT_POSTCODE_RE.captures(last) {
            let street = preceding
                .iter()
                .filter(|s| !s.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            return ParsedAddress {
                street,
                postcode: caps[1].to_string(),
                district: clean_district(&caps[2]),
            };
        }
    }

    ParsedAddress {
        street: address.to_string(),
        ..ParsedAddress::default()
    }
}

fn clean_street(raw: &str) -> String {
    raw.trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .trim()
        .to_string()
}

/// Drops a duplicated "NNNN " prefix so the code never leaks into the district.
fn clean_district(raw: &str) -> String {
    POSTCODE_PREFIX_RE.replace(raw.trim(), "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(street: &str, postcode: &str, district: &str) -> ParsedAddress {
        ParsedAddress {
            street: street.to_string(),
            postcode: postcode.to_string(),
            district: district.to_string(),
        }
    }

    #[test]
    fn test_comma_separated_address() {
        assert_eq!(
            parse_address("Strandvej 10, 2100 København Ø"),
            parsed("Strandvej 10", "2100", "København Ø")
        );
    }

    #[test]
    fn test_space_separated_address() {
        assert_eq!(
            parse_address("Nørrebrogade 5 2200 København N"),
            parsed("Nørrebrogade 5", "2200", "København N")
        );
    }

    #[test]
    fn test_no_postcode_degrades_to_street() {
        assert_eq!(
            parse_address("No postcode here"),
            parsed("No postcode here", "", "")
        );
        assert_eq!(parse_address("  Vej 1  "), parsed("Vej 1", "", ""));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_address(""), ParsedAddress::default());
        assert_eq!(parse_address("   "), ParsedAddress::default());
    }

    #[test]
    fn test_rightmost_postcode_wins() {
        assert_eq!(
            parse_address("Gammel Kongevej 1820 4000 Roskilde"),
            parsed("Gammel Kongevej 1820", "4000", "Roskilde")
        );
    }

    #[test]
    fn test_multiple_comma_segments_keep_street_parts() {
        assert_eq!(
            parse_address("Vesterbrogade 12, 3. tv, 1620 København V"),
            parsed("Vesterbrogade 12, 3. tv", "1620", "København V")
        );
    }

    #[test]
    fn test_five_digit_number_is_not_a_postcode() {
        assert_eq!(
            parse_address("Industrivej 12345 Byen"),
            parsed("Industrivej 12345 Byen", "", "")
        );
    }

    #[test]
    fn test_code_only_address() {
        assert_eq!(parse_address("2500 Valby"), parsed("", "2500", "Valby"));
    }

    #[test]
    fn test_comma_after_district_falls_through() {
        // The district tail may not contain a comma, and the last segment has no code.
        assert_eq!(
            parse_address("Vej 1, 2100 København, Danmark"),
            parsed("Vej 1, 2100 København, Danmark", "", "")
        );
    }

    #[test]
    fn test_district_prefix_is_stripped() {
        assert_eq!(clean_district("2100 København Ø"), "København Ø");
        assert_eq!(clean_district(" Valby "), "Valby");
    }
}
