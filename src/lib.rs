//! InterNetX (AutoDNS) provider for ACME DNS-01 challenges
//!
//! Supported features:
//! - Derives the `_acme-challenge` TXT record from a key authorization
//! - Locates the authoritative zone with SOA lookups
//! - Adds and removes the record through the AutoDNS XML gateway
//!
//! # Example
//! ```no_run
//! use internetx_dns::{ChallengeProvider, InternetXDns};
//!
//! # async fn run() -> Result<(), internetx_dns::DnsError> {
//! let provider = InternetXDns::builder()
//!     .user("your_user")
//!     .password("your_password")
//!     .context("4")
//!     .build()?;
//!
//! provider.present("example.com", "token", "token.thumbprint").await?;
//! provider.clean_up("example.com", "token", "token.thumbprint").await?;
//! # Ok(())
//! # }
//! ```

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

pub mod challenge;
pub mod client;
mod credentials;
mod error;
pub(crate) mod providers;
pub mod resolver;
pub(crate) mod utils;

pub use challenge::Dns01Record;
pub use client::ChallengeProvider;
pub use credentials::{Credentials, ENV_CONTEXT, ENV_PASSWORD, ENV_USER};
pub use error::{DnsError, DnsResult, TransportError, ZoneLookupError};
pub use providers::internetx::{
    DEFAULT_TIMEOUT, INTERNETX_GATEWAY, InternetXDns, InternetXDnsBuilder, ZoneAction,
};
pub use resolver::{SoaZoneResolver, ZoneResolver};
pub use utils::request::{DefaultDnsClient, DnsHttpClient, XML_CONTENT_TYPE};
