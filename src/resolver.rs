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

//! Authoritative zone lookup.

use std::fmt::Debug;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::{Resolver, TokioResolver};
use tracing::{debug, trace};

use crate::challenge::{to_fqdn, un_fqdn};
use crate::error::ZoneLookupError;

/// Finds the zone apex that owns a fully qualified domain name.
#[async_trait]
pub trait ZoneResolver: Send + Sync + Debug {
    /// Returns the zone apex with a trailing dot, e.g. `example.com.`
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String, ZoneLookupError>;
}

/// Public resolvers used when the system configuration is unavailable.
pub fn fallback_nameservers() -> Vec<SocketAddr> {
    vec![
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53),
        SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)), 53),
    ]
}

/// Zone resolver that walks up the name issuing SOA queries.
#[derive(Debug)]
pub struct SoaZoneResolver {
    resolver: TokioResolver,
}

impl SoaZoneResolver {
    /// Uses the given recursive nameservers.
    ///
    /// An empty list falls back to the system configuration.
    pub fn new(nameservers: &[SocketAddr]) -> Self {
        if nameservers.is_empty() {
            return Self::from_system_conf();
        }

        let mut config = ResolverConfig::new();
        for addr in nameservers {
            config.add_name_server(NameServerConfig::new(*addr, Protocol::Udp));
        }

        Self {
            resolver: Resolver::builder_with_config(config, TokioConnectionProvider::default())
                .build(),
        }
    }

    /// Uses `/etc/resolv.conf` (or the platform equivalent).
    pub fn from_system_conf() -> Self {
        let builder = match Resolver::builder_tokio() {
            Ok(builder) => builder,
            Err(e) => {
                debug!(error = %e, "System resolver configuration unavailable, using public resolvers");
                let mut config = ResolverConfig::new();
                for addr in fallback_nameservers() {
                    config.add_name_server(NameServerConfig::new(addr, Protocol::Udp));
                }
                Resolver::builder_with_config(config, TokioConnectionProvider::default())
            }
        };

        Self {
            resolver: builder.build(),
        }
    }
}

#[async_trait]
impl ZoneResolver for SoaZoneResolver {
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String, ZoneLookupError> {
        let candidates = zone_candidates(fqdn);
        if candidates.is_empty() {
            return Err(ZoneLookupError::InvalidName {
                fqdn: fqdn.to_string(),
            });
        }

        let mut last_error = String::from("no candidates answered");
        for candidate in candidates {
            match self.resolver.soa_lookup(candidate.as_str()).await {
                Ok(lookup) => {
                    let zone = lookup
                        .as_lookup()
                        .records()
                        .iter()
                        .find(|record| record.record_type() == RecordType::SOA)
                        .map(|record| record.name().to_utf8())
                        .unwrap_or(candidate);

                    debug!(fqdn = %fqdn, zone = %zone, "Found authoritative zone");
                    return Ok(to_fqdn(&zone));
                }
                Err(e) => {
                    trace!(candidate = %candidate, error = %e, "No SOA record");
                    last_error = e.to_string();
                }
            }
        }

        Err(ZoneLookupError::NotFound {
            fqdn: fqdn.to_string(),
            message: last_error,
        })
    }
}

/// Lists `fqdn` and each of its parents, most specific first.
pub(crate) fn zone_candidates(fqdn: &str) -> Vec<String> {
    let name = un_fqdn(fqdn.trim());
    if name.is_empty() || name.split('.').any(str::is_empty) {
        return Vec::new();
    }

    let labels: Vec<&str> = name.split('.').collect();
    (0..labels.len())
        .map(|index| format!("{}.", labels[index..].join(".")))
        .collect()
}
