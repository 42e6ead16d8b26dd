// Copyright 2023 rust-dns-sdk authors
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! DNS-01 record derivation and domain name helpers.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

use crate::error::{DnsError, DnsResult};

/// Label prepended to the domain for the challenge record
pub const ACME_CHALLENGE_RECORD: &str = "_acme-challenge";

/// The TXT record an ACME server expects for a DNS-01 challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dns01Record {
    /// Fully qualified record name, e.g. `_acme-challenge.example.com.`
    pub fqdn: String,
    /// base64url encoded SHA-256 digest of the key authorization
    pub value: String,
}

impl Dns01Record {
    /// Derives the record name and value for `domain`.
    ///
    /// Wildcard domains share the record of their base domain.
    pub fn new(domain: &str, key_authorization: &str) -> DnsResult<Self> {
        let base = normalize_domain(domain.trim());
        if un_fqdn(base).is_empty() {
            return Err(DnsError::InvalidChallenge {
                domain: domain.to_string(),
                message: "domain is empty".to_string(),
            });
        }
        if key_authorization.is_empty() {
            return Err(DnsError::InvalidChallenge {
                domain: domain.to_string(),
                message: "key authorization is empty".to_string(),
            });
        }

        Ok(Self {
            fqdn: format!("{}.{}", ACME_CHALLENGE_RECORD, to_fqdn(base)),
            value: Self::compute_value(key_authorization),
        })
    }

    /// Computes the TXT value for a key authorization.
    pub fn compute_value(key_authorization: &str) -> String {
        let digest = Sha256::digest(key_authorization.as_bytes());
        URL_SAFE_NO_PAD.encode(digest.as_slice())
    }
}

/// Strips a leading wildcard label.
pub fn normalize_domain(domain: &str) -> &str {
    domain.strip_prefix("*.").unwrap_or(domain)
}

/// Appends the root label separator if it is missing.
pub fn to_fqdn(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    }
}

/// Removes the trailing root label separator, if any.
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_value() {
        assert_eq!(
            Dns01Record::compute_value("token.thumbprint"),
            "61rBZ_4knHblO0MNoxFsXZ_eTFUHum0B6IVRbhvUn5I"
        );

        let value = Dns01Record::compute_value(
            "evaGxfADs6pSRb2LAv9IZf17Dt3juxGJ-PCt92wr-oA.QxKhYaH6VWOWyLVV9dVRqY8hZVp-ZxCfmYkf8BwqF0c",
        );
        assert_eq!(value, "Dd-lE--koYaus6rrAVx-ecAKrT-Mg4r46eIqRKBDoV0");
        assert!(!value.contains('='));
    }

    #[test]
    fn test_record_for_domain() {
        let record = Dns01Record::new("example.com", "token.thumbprint").unwrap();
        assert_eq!(record.fqdn, "_acme-challenge.example.com.");
        assert_eq!(record.value, "61rBZ_4knHblO0MNoxFsXZ_eTFUHum0B6IVRbhvUn5I");

        let record = Dns01Record::new("sub.example.com.", "token.thumbprint").unwrap();
        assert_eq!(record.fqdn, "_acme-challenge.sub.example.com.");
    }

    #[test]
    fn test_wildcard_uses_base_domain() {
        let record = Dns01Record::new("*.example.com", "token.thumbprint").unwrap();
        assert_eq!(record.fqdn, "_acme-challenge.example.com.");
    }

    #[test]
    fn test_invalid_challenge() {
        let err = Dns01Record::new("", "token.thumbprint").unwrap_err();
        assert!(matches!(err, DnsError::InvalidChallenge { .. }));

        let err = Dns01Record::new(".", "token.thumbprint").unwrap_err();
        assert!(matches!(err, DnsError::InvalidChallenge { .. }));

        let err = Dns01Record::new("example.com", "").unwrap_err();
        assert!(err.to_string().contains("key authorization"));
    }

    #[test]
    fn test_fqdn_helpers() {
        assert_eq!(to_fqdn("example.com"), "example.com.");
        assert_eq!(to_fqdn("example.com."), "example.com.");
        assert_eq!(un_fqdn("example.com."), "example.com");
        assert_eq!(un_fqdn("example.com"), "example.com");
        assert_eq!(normalize_domain("*.example.com"), "example.com");
        assert_eq!(normalize_domain("sub.example.com"), "sub.example.com");
    }
}
