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

use std::time::Duration;

use thiserror::Error;

/// Result type for provider operations
pub type DnsResult<T> = Result<T, DnsError>;

/// Errors returned by the InterNetX challenge provider.
#[derive(Debug, Error)]
pub enum DnsError {
    /// Missing credentials or an unusable provider setup
    #[error("InterNetX configuration error: {0}")]
    Configuration(String),

    /// The challenge could not be turned into a TXT record
    #[error("Invalid DNS-01 challenge for domain '{domain}': {message}")]
    InvalidChallenge { domain: String, message: String },

    /// No authoritative zone was found, the gateway was never contacted
    #[error("Could not determine zone for domain '{domain}': {source}")]
    ZoneResolution {
        domain: String,
        #[source]
        source: ZoneLookupError,
    },

    /// The XML request document could not be produced
    #[error("Failed to encode InterNetX request: {0}")]
    Encode(#[from] quick_xml::SeError),

    /// Sending the request or reading the response failed
    #[error("InterNetX request for domain '{domain}' failed: {source}")]
    Transport {
        domain: String,
        #[source]
        source: TransportError,
    },
}

/// Failures of the authoritative zone lookup.
#[derive(Debug, Error)]
pub enum ZoneLookupError {
    #[error("'{fqdn}' is not a valid domain name")]
    InvalidName { fqdn: String },

    #[error("no SOA record found for '{fqdn}': {message}")]
    NotFound { fqdn: String, message: String },
}

/// Failures talking to the gateway over HTTP.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}
