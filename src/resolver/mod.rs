//! Best-effort latest-version resolution for npm package names.
//!
//! Given a set of package names, [`VersionResolver::resolve`] returns a
//! mapping from name to a caret version range (`^X.Y.Z`), resolving as many
//! names as it can and degrading gracefully per name on failure.
//!
//! # Lookup strategy
//!
//! 1. **Batch attempt**: one combined request for all names against the
//!    fast-npm-meta service. The service returns a single `{name, version}`
//!    object when exactly one name was requested and an array of such objects
//!    otherwise, so the response is decoded through a discriminated
//!    single-or-list shape before normalizing into a mapping.
//! 2. **Fallback**: if the batch request fails (non-2xx status, transport
//!    error, or a body that does not decode), the batch approach is abandoned
//!    and every name is looked up independently against the npm registry.
//!    All per-name lookups run concurrently and are joined collectively;
//!    one failing lookup never aborts or delays its siblings' results.
//!
//! A 2xx batch response is final even when it omits some requested names:
//! the fallback tier exists to survive a failed batch endpoint, not to
//! second-guess a healthy one.
//!
//! # Errors as absence
//!
//! `resolve` never returns an error. Names that could not be resolved are
//! simply absent from the returned mapping; callers diff the result against
//! the requested set to decide what to report (the scaffolder seeds every
//! requested name with a placeholder and warns about the ones still carrying
//! it after the merge).
//!
//! # Transport injection
//!
//! Network access goes through the [`MetadataTransport`] capability so tests
//! can substitute a deterministic in-memory transport. Production code uses
//! [`HttpTransport`], a thin wrapper over a [`reqwest::Client`] with bounded
//! connect and request timeouts; a timeout surfaces as an ordinary lookup
//! failure at whatever granularity (batch or single name) the request had.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

use anyhow::{Context, Result};
use futures::future::join_all;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::{
    FALLBACK_REGISTRY_URL, PRIMARY_REGISTRY_URL, REGISTRY_CONNECT_TIMEOUT,
    REGISTRY_REQUEST_TIMEOUT, USER_AGENT,
};

/// Characters allowed verbatim inside a package-name path segment.
///
/// Everything else is percent-encoded, notably `/` in scoped names
/// (`@antfu/eslint-config` → `@antfu%2Feslint-config`) and `+`, which the
/// batch endpoint uses as the name separator.
const NAME_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Raw response from a metadata source: HTTP status plus body text.
#[derive(Debug, Clone)]
pub struct TransportReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl TransportReply {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Injected HTTP capability used by the resolver.
///
/// Implementations return `Err` only for transport-level failures (DNS,
/// connect, timeout); a served non-2xx status is a successful `get` whose
/// reply carries the status for the resolver to interpret.
pub trait MetadataTransport: Send + Sync {
    /// Issue a GET request and return the status and body.
    fn get(&self, url: &str) -> impl Future<Output = Result<TransportReply>> + Send;
}

/// Production transport over a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the standard timeouts and user agent.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REGISTRY_REQUEST_TIMEOUT)
            .connect_timeout(REGISTRY_CONNECT_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl MetadataTransport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportReply> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request failed for {url}"))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        Ok(TransportReply { status, body })
    }
}

/// The `{name, version}` shape served by both metadata sources.
#[derive(Debug, Deserialize)]
struct PackageMetadata {
    name: String,
    version: String,
}

/// Batch responses are a single object for one requested name and an array
/// for several; decode both shapes explicitly instead of guessing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BatchReply {
    Many(Vec<PackageMetadata>),
    One(PackageMetadata),
}

impl BatchReply {
    fn into_entries(self) -> Vec<PackageMetadata> {
        match self {
            Self::Many(entries) => entries,
            Self::One(entry) => vec![entry],
        }
    }
}

/// Resolves latest versions for sets of package names.
///
/// See the [module documentation](self) for the lookup strategy.
pub struct VersionResolver<T> {
    transport: T,
}

impl VersionResolver<HttpTransport> {
    /// Resolver over the live registry endpoints.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new()?))
    }
}

impl<T: MetadataTransport> VersionResolver<T> {
    /// Resolver over a caller-provided transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Resolve as many of `names` as possible to `^X.Y.Z` version ranges.
    ///
    /// Never fails: unresolvable names are absent from the returned mapping.
    /// An empty input returns an empty mapping without touching the network.
    pub async fn resolve(&self, names: &BTreeSet<String>) -> BTreeMap<String, String> {
        if names.is_empty() {
            return BTreeMap::new();
        }

        if let Some(resolved) = self.resolve_batch(names).await {
            return resolved;
        }

        debug!("batch lookup failed, falling back to per-name resolution");
        self.resolve_each(names).await
    }

    /// One combined request against the primary source.
    ///
    /// `None` means the batch tier failed entirely and the caller should fall
    /// back; `Some` is a terminal result even when some names are missing
    /// from it.
    async fn resolve_batch(&self, names: &BTreeSet<String>) -> Option<BTreeMap<String, String>> {
        let url = batch_url(names);

        let reply = match self.transport.get(&url).await {
            Ok(reply) => reply,
            Err(e) => {
                debug!("batch lookup unreachable: {e:#}");
                return None;
            }
        };

        if !reply.is_success() {
            debug!("batch lookup returned status {}", reply.status);
            return None;
        }

        let decoded: BatchReply = match serde_json::from_str(&reply.body) {
            Ok(decoded) => decoded,
            Err(e) => {
                debug!("batch response did not decode: {e}");
                return None;
            }
        };

        let mut resolved = BTreeMap::new();
        for entry in decoded.into_entries() {
            match caret_range(&entry.version) {
                Some(range) => {
                    resolved.insert(entry.name, range);
                }
                None => {
                    debug!("discarding non-semver version '{}' for '{}'", entry.version, entry.name);
                }
            }
        }
        Some(resolved)
    }

    /// One independent lookup per name against the secondary source.
    ///
    /// All lookups start immediately and are joined collectively; results are
    /// only read after every lookup has settled, so a fast failure cannot
    /// drop a slower sibling's success.
    async fn resolve_each(&self, names: &BTreeSet<String>) -> BTreeMap<String, String> {
        let lookups = names
            .iter()
            .map(|name| async move { (name.clone(), self.lookup_single(name).await) });

        join_all(lookups)
            .await
            .into_iter()
            .filter_map(|(name, range)| range.map(|r| (name, r)))
            .collect()
    }

    async fn lookup_single(&self, name: &str) -> Option<String> {
        let url = single_url(name);

        let reply = match self.transport.get(&url).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("version lookup unreachable for '{name}': {e:#}");
                return None;
            }
        };

        if !reply.is_success() {
            warn!("version lookup for '{name}' returned status {}", reply.status);
            return None;
        }

        let metadata: PackageMetadata = match serde_json::from_str(&reply.body) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("version lookup for '{name}' returned malformed metadata: {e}");
                return None;
            }
        };

        caret_range(&metadata.version)
    }
}

/// `^`-prefix a bare version, rejecting strings that are not semver.
fn caret_range(version: &str) -> Option<String> {
    match semver::Version::parse(version) {
        Ok(_) => Some(format!("^{version}")),
        Err(_) => None,
    }
}

fn encode_name(name: &str) -> String {
    utf8_percent_encode(name, NAME_SEGMENT).to_string()
}

fn batch_url(names: &BTreeSet<String>) -> String {
    let joined = names.iter().map(|n| encode_name(n)).collect::<Vec<_>>().join("+");
    format!("{PRIMARY_REGISTRY_URL}/{joined}")
}

fn single_url(name: &str) -> String {
    format!("{FALLBACK_REGISTRY_URL}/{}/latest", encode_name(name))
}
