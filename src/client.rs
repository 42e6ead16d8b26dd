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

use async_trait::async_trait;

use crate::error::DnsResult;

/// A DNS provider able to publish and withdraw DNS-01 challenge records.
///
/// Each call is independent, implementations keep no state between
/// `present` and `clean_up`.
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// Creates the TXT record for the challenge.
    async fn present(&self, domain: &str, token: &str, key_authorization: &str) -> DnsResult<()>;

    /// Removes the TXT record created by [`ChallengeProvider::present`].
    async fn clean_up(&self, domain: &str, token: &str, key_authorization: &str)
    -> DnsResult<()>;
}
