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

//! InterNetX AutoDNS provider.
//!
//! Every challenge update is a single `0202` (zone update) task posted to the
//! AutoDNS XML gateway. The gateway's reply is logged but not interpreted.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::se::Serializer;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;
use tracing::{debug, info};

use crate::challenge::{Dns01Record, normalize_domain, to_fqdn, un_fqdn};
use crate::client::ChallengeProvider;
use crate::credentials::{Credentials, ENV_CONTEXT, ENV_PASSWORD, ENV_USER};
use crate::error::{DnsError, DnsResult};
use crate::resolver::{SoaZoneResolver, ZoneResolver};
use crate::utils::request::{DefaultDnsClient, DnsHttpClient};

/// AutoDNS XML gateway
pub const INTERNETX_GATEWAY: &str = "https://gateway.autodns.com";

/// Client-side bound on each gateway call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// AutoDNS task code for a zone update
const ZONE_UPDATE_CODE: &str = "0202";

/// SOA serial handling level sent with every zone update
const SOA_LEVEL: u8 = 3;

/// The kind of zone update sent to the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneAction {
    /// Add the resource record
    Add,
    /// Remove the resource record
    Remove,
}

impl ZoneAction {
    /// The `<key>` value understood by AutoDNS.
    pub fn key(self) -> &'static str {
        match self {
            ZoneAction::Add => "rs_add",
            ZoneAction::Remove => "rr_rem",
        }
    }
}

// AutoDNS request document. Field order is the element order on the wire.

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct ApiRequest {
    auth: AuthNode,
    task: TaskNode,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
struct AuthNode {
    user: String,
    password: String,
    context: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
struct TaskNode {
    code: String,
    zone: ZoneNode,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
struct ZoneNode {
    name: String,
    rr: RecordNode,
    soa: SoaNode,
    key: String,
    www_include: u8,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
struct RecordNode {
    name: String,
    r#type: String,
    value: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
struct SoaNode {
    level: u8,
}

impl ApiRequest {
    /// Builds a zone update for one TXT record.
    pub(crate) fn new(
        credentials: &Credentials,
        zone_name: &str,
        record: &Dns01Record,
        action: ZoneAction,
    ) -> Self {
        Self {
            auth: AuthNode {
                user: credentials.user().to_string(),
                password: credentials.password().to_string(),
                context: credentials.context().to_string(),
            },
            task: TaskNode {
                code: ZONE_UPDATE_CODE.to_string(),
                zone: ZoneNode {
                    name: zone_name.to_string(),
                    rr: RecordNode {
                        name: record.fqdn.clone(),
                        r#type: "TXT".to_string(),
                        value: record.value.clone(),
                    },
                    soa: SoaNode { level: SOA_LEVEL },
                    key: action.key().to_string(),
                    www_include: 0,
                },
            },
        }
    }

    /// Serializes the request as an indented `<request>` document.
    pub(crate) fn to_xml(&self) -> DnsResult<String> {
        let mut xml = String::new();
        let mut serializer = Serializer::with_root(&mut xml, Some("request"))?;
        serializer.indent(' ', 2);
        self.serialize(serializer)?;
        Ok(xml)
    }
}

/// Builder for [`InternetXDns`].
#[derive(Default)]
pub struct InternetXDnsBuilder {
    user: Option<String>,
    password: Option<String>,
    context: Option<String>,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    nameservers: Vec<SocketAddr>,
    resolver: Option<Arc<dyn ZoneResolver>>,
}

impl InternetXDnsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from `INTERNETX_USER`, `INTERNETX_PASSWORD` and `INTERNETX_CONTEXT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Starts from the `INTERNETX_*` keys of an arbitrary lookup.
    ///
    /// Validation is deferred to [`InternetXDnsBuilder::build`].
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            user: lookup(ENV_USER),
            password: lookup(ENV_PASSWORD),
            context: lookup(ENV_CONTEXT),
            ..Self::default()
        }
    }

    /// Uses already validated credentials.
    pub fn credentials(self, credentials: &Credentials) -> Self {
        self.user(credentials.user())
            .password(credentials.password())
            .context(credentials.context())
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Overrides the gateway URL, mainly for testing.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Overrides the 30 second request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Recursive nameservers for the SOA lookup. Ignored when a custom
    /// resolver is set.
    pub fn nameservers(mut self, nameservers: Vec<SocketAddr>) -> Self {
        self.nameservers = nameservers;
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn ZoneResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Constructs the provider with the default reqwest client.
    pub fn build(self) -> DnsResult<InternetXDns> {
        let client = DefaultDnsClient::new(self.timeout.unwrap_or(DEFAULT_TIMEOUT))?;
        self.build_with_client(client)
    }

    /// Constructs the provider around a custom HTTP client.
    pub fn build_with_client<C: DnsHttpClient>(self, http_client: C) -> DnsResult<InternetXDns<C>> {
        let credentials = Credentials::new(
            self.user.unwrap_or_default(),
            self.password.unwrap_or_default(),
            self.context.unwrap_or_default(),
        )?;

        let resolver = match self.resolver {
            Some(resolver) => resolver,
            None => Arc::new(SoaZoneResolver::new(&self.nameservers)),
        };

        Ok(InternetXDns {
            http_client,
            endpoint: self.endpoint.unwrap_or_else(|| INTERNETX_GATEWAY.to_string()),
            credentials,
            resolver,
        })
    }
}

/// DNS-01 challenge provider backed by the InterNetX AutoDNS gateway.
#[derive(Debug)]
pub struct InternetXDns<C = DefaultDnsClient> {
    /// HTTP client for making requests
    http_client: C,
    /// Gateway URL
    endpoint: String,
    credentials: Credentials,
    resolver: Arc<dyn ZoneResolver>,
}

impl InternetXDns {
    /// Creates a provider for the given account with default settings.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        context: impl Into<String>,
    ) -> DnsResult<Self> {
        InternetXDnsBuilder::new()
            .user(user)
            .password(password)
            .context(context)
            .build()
    }

    /// Creates a provider from the `INTERNETX_*` environment variables.
    pub fn from_env() -> DnsResult<Self> {
        InternetXDnsBuilder::from_env().build()
    }

    pub fn builder() -> InternetXDnsBuilder {
        InternetXDnsBuilder::new()
    }
}

impl<C: DnsHttpClient> InternetXDns<C> {
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends one zone update for the challenge record of `domain`.
    async fn update_zone(
        &self,
        domain: &str,
        key_authorization: &str,
        action: ZoneAction,
    ) -> DnsResult<()> {
        let name = normalize_domain(domain.trim());
        let record = Dns01Record::new(name, key_authorization)?;

        let auth_zone = self
            .resolver
            .find_zone_by_fqdn(&to_fqdn(name))
            .await
            .map_err(|source| DnsError::ZoneResolution {
                domain: domain.to_string(),
                source,
            })?;

        let zone_name = match action {
            ZoneAction::Add => auth_zone.as_str(),
            ZoneAction::Remove => un_fqdn(&auth_zone),
        };

        info!(
            domain = %domain,
            record = %record.fqdn,
            zone = %zone_name,
            key = action.key(),
            "Sending InterNetX zone update"
        );

        let xml = ApiRequest::new(&self.credentials, zone_name, &record, action).to_xml()?;
        debug!(domain = %domain, request = %xml, "InterNetX request");

        let response = self
            .http_client
            .post_xml(&self.endpoint, xml)
            .await
            .map_err(|source| DnsError::Transport {
                domain: domain.to_string(),
                source,
            })?;
        debug!(
            domain = %domain,
            bytes = response.len(),
            response = %String::from_utf8_lossy(&response),
            "InterNetX response"
        );

        Ok(())
    }
}

#[async_trait]
impl<C: DnsHttpClient> ChallengeProvider for InternetXDns<C> {
    /// Adds the challenge TXT record to the domain's zone.
    async fn present(&self, domain: &str, _token: &str, key_authorization: &str) -> DnsResult<()> {
        self.update_zone(domain, key_authorization, ZoneAction::Add).await
    }

    /// Removes the challenge TXT record from the domain's zone.
    async fn clean_up(
        &self,
        domain: &str,
        _token: &str,
        key_authorization: &str,
    ) -> DnsResult<()> {
        self.update_zone(domain, key_authorization, ZoneAction::Remove).await
    }
}
