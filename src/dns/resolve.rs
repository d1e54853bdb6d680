use crate::base::neterror::NetError;
use std::fmt;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

/// The host part of a target URL, as handed to a resolver.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Name(Box<str>);

impl Name {
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self(host.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Name {
    fn from(host: &str) -> Self {
        Self::new(host)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved addresses. Ports are left at 0; the caller knows the target port.
pub type Addrs = Box<dyn Iterator<Item = SocketAddr> + Send>;

/// Alias for the `Future` type returned by a DNS resolver.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, NetError>> + Send>>;

/// Name resolution for the DNS phase of a probe.
///
/// The probe times whatever implementation it is given, so tests can plug in
/// a resolver that answers instantly.
pub trait Resolve: Send + Sync {
    fn resolve(&self, name: Name) -> Resolving;
}

impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn resolve(&self, name: Name) -> Resolving {
        R::resolve(self, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv6Addr};

    struct FixedResolver(Vec<SocketAddr>);

    impl Resolve for FixedResolver {
        fn resolve(&self, _name: Name) -> Resolving {
            let addrs = self.0.clone();
            Box::pin(async move { Ok(Box::new(addrs.into_iter()) as Addrs) })
        }
    }

    #[test]
    fn test_name_display_and_debug() {
        let name = Name::from("echo.example.org");
        assert_eq!(name.as_str(), "echo.example.org");
        assert_eq!(name.to_string(), "echo.example.org");
        assert_eq!(format!("{name:?}"), "\"echo.example.org\"");
    }

    #[tokio::test]
    async fn test_arc_dyn_resolver() {
        let v6 = SocketAddr::new(IpAddr::V6(Ipv6Addr::LOCALHOST), 0);
        let resolver: Arc<dyn Resolve> = Arc::new(FixedResolver(vec![v6]));

        let addrs: Vec<_> = resolver.resolve(Name::new("any.test")).await.unwrap().collect();
        assert_eq!(addrs, vec![v6]);
    }
}
