use super::{Addrs, Name, Resolve, Resolving};
use crate::base::neterror::NetError;
use hickory_resolver::config::{LookupIpStrategy, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolverBuilder, TokioResolver};
use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

/// Async resolver backed by hickory-dns, asking for both A and AAAA records
/// so the report can list every address of a target.
#[derive(Clone)]
pub struct HickoryResolver {
    inner: Arc<TokioResolver>,
}

impl HickoryResolver {
    /// Use the system configuration (`/etc/resolv.conf` or the platform
    /// equivalent), or hickory's default upstreams when it cannot be read.
    pub fn new() -> Self {
        let builder = TokioResolver::builder_tokio().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cannot read system DNS config, using defaults");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
        });
        Self::from_builder(builder)
    }

    fn from_builder(mut builder: ResolverBuilder<TokioConnectionProvider>) -> Self {
        builder.options_mut().ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        Self {
            inner: Arc::new(builder.build()),
        }
    }
}

impl Default for HickoryResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HickoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HickoryResolver").finish_non_exhaustive()
    }
}

impl Resolve for HickoryResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            let domain = name.as_str();
            let lookup = inner.lookup_ip(domain).await.map_err(|e| {
                tracing::debug!(domain, error = %e, "lookup failed");
                NetError::dns_failed(domain, io::Error::new(io::ErrorKind::NotFound, e.to_string()))
            })?;

            let addrs: Vec<SocketAddr> = lookup.iter().map(|ip| SocketAddr::new(ip, 0)).collect();
            if addrs.is_empty() {
                return Err(NetError::dns_failed(
                    domain,
                    io::Error::new(io::ErrorKind::NotFound, "no addresses returned"),
                ));
            }

            tracing::debug!(domain, count = addrs.len(), "resolved");
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_lookup_names_domain() {
        // No upstream servers, so the lookup fails without touching the network.
        let resolver = HickoryResolver::from_builder(TokioResolver::builder_with_config(
            ResolverConfig::new(),
            TokioConnectionProvider::default(),
        ));
        let err = match resolver.resolve(Name::new("example.com")).await {
            Ok(_) => panic!("a resolver without name servers must not resolve"),
            Err(err) => err,
        };
        assert!(
            matches!(&err, NetError::NameNotResolvedFor { domain, .. } if domain == "example.com"),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    #[ignore] // Run with --ignored flag for network tests
    async fn test_unknown_domain_is_named_in_error() {
        let resolver = HickoryResolver::new();
        let err = match resolver.resolve(Name::new("wsstat-nonexistent.invalid")).await {
            Ok(_) => panic!("`.invalid` must not resolve"),
            Err(err) => err,
        };
        assert!(
            matches!(&err, NetError::NameNotResolvedFor { domain, .. } if domain == "wsstat-nonexistent.invalid"),
            "unexpected error: {err:?}"
        );
    }

    #[tokio::test]
    async fn test_clones_share_resolver() {
        let a = HickoryResolver::new();
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
    }
}
