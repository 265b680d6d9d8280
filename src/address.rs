use regex::Regex;

use crate::error::ValidationError;

pub const SHETRACE_BASE_URL: &str = "https://shetrace.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// `0x` + 40 hex characters.
    Evm,
    /// `she` prefix + at least 8 alphanumeric characters.
    She,
}

/// Classifies an address string, rejecting anything that is neither a
/// well-formed EVM address nor a SHE bech32-style address. Runs before any
/// network call so malformed input never reaches an endpoint.
pub fn validate_address(address: &str) -> Result<AddressKind, ValidationError> {
    let evm_pattern = Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap();
    let she_pattern = Regex::new(r"^(?i)she[a-z0-9]{8,}$").unwrap();

    if evm_pattern.is_match(address) {
        Ok(AddressKind::Evm)
    } else if she_pattern.is_match(address) {
        Ok(AddressKind::She)
    } else {
        Err(ValidationError::InvalidAddress(address.to_string()))
    }
}

/// SheTrace address page, scoped to a Cosmos chain.
pub fn shetrace_address_url(address: &str, cosmos_chain_id: &str) -> String {
    format!("{SHETRACE_BASE_URL}/address/{address}?chain={cosmos_chain_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_evm_addresses() {
        let addr = "0x1234567890abcdefABCDEF1234567890abcdefAB";
        assert_eq!(validate_address(addr), Ok(AddressKind::Evm));
    }

    #[test]
    fn accepts_she_addresses() {
        assert_eq!(
            validate_address("she1v9kxjemgpv4hs9q0zymr8vd4x"),
            Ok(AddressKind::She)
        );
        // original pattern is case-insensitive
        assert_eq!(validate_address("SHE1V9KXJEMG"), Ok(AddressKind::She));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "",
            "she1abc",                                     // too short after the prefix
            "1234567890abcdefABCDEF1234567890abcdefAB",    // missing 0x prefix
            "0x12345",                                     // too short
            "0x1234567890abcdefABCDEF1234567890abcdefABcd", // too long
            "0xZZ34567890abcdefABCDEF1234567890abcdefAB",  // non-hex
            "atom1v9kxjemgpv4hs9q0zymr8vd4x",              // wrong prefix
        ] {
            assert!(validate_address(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn builds_scoped_explorer_url() {
        assert_eq!(
            shetrace_address_url("she1v9kxjemgpv4hs9q0zymr8vd4x", "pacific-1"),
            "https://shetrace.com/address/she1v9kxjemgpv4hs9q0zymr8vd4x?chain=pacific-1"
        );
    }
}
