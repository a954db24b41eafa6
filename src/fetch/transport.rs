//! HTTP transport seam.

use tracing::trace;

use crate::config::Settings;
use crate::error::{ConfigError, TransportError};

/// Blocking GET of a whole resource.
///
/// Implementations return the body only for success statuses; anything else
/// is a [`TransportError::Status`]. Tests substitute an in-memory map.
pub trait Transport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        (**self).get(url)
    }
}

/// [`Transport`] backed by a blocking reqwest client.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &Settings) -> Result<Self, ConfigError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(settings.timeout())
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let network = |e: reqwest::Error| TransportError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().map_err(network)?;
        let status = response.status();
        trace!(url, status = status.as_u16(), "response");

        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.bytes().map(|b| b.to_vec()).map_err(network)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    #[test]
    fn test_reqwest_transport_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/com/example/lib/1.0/lib-1.0.jar");
            then.status(200).body("jar bytes");
        });

        let transport = ReqwestTransport::new(&Settings::default()).unwrap();
        let body = transport
            .get(&server.url("/com/example/lib/1.0/lib-1.0.jar"))
            .unwrap();
        assert_eq!(body, b"jar bytes");
        mock.assert();
    }

    #[test]
    fn test_reqwest_transport_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.pom");
            then.status(404);
        });

        let transport = ReqwestTransport::new(&Settings::default()).unwrap();
        let url = server.url("/missing.pom");
        let err = transport.get(&url).unwrap_err();
        assert_eq!(err, TransportError::Status { url, status: 404 });
    }

    #[test]
    fn test_reqwest_transport_network_error() {
        let transport = ReqwestTransport::new(&Settings::default()).unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let err = transport.get("http://127.0.0.1:9/x.jar").unwrap_err();
        assert!(matches!(err, TransportError::Network { .. }));
        assert_eq!(err.url(), "http://127.0.0.1:9/x.jar");
    }
}
