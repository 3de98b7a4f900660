//! TLS settings for the REST transport.

use std::path::PathBuf;

/// TLS settings applied when the client talks HTTPS to the API.
///
/// By default the platform roots are trusted and certificates are verified.
/// A private CA (staging deployments behind an internal certificate) can be
/// added from a file or inline PEM.
///
/// ```rust
/// use ifoodapp::TlsConfig;
///
/// let config = TlsConfig::builder()
///     .ca_cert_file("/etc/ifood/staging-ca.crt")
///     .build();
/// assert!(config.has_custom_ca());
/// ```
#[derive(Debug, Clone, Default, bon::Builder)]
pub struct TlsConfig {
    /// Extra root certificate, read from a PEM file.
    #[builder(into)]
    pub ca_cert_file: Option<PathBuf>,

    /// Extra root certificate, given as PEM text.
    #[builder(into)]
    pub ca_cert_pem: Option<String>,

    /// Skip certificate verification and allow plain HTTP.
    ///
    /// **WARNING**: local development only.
    #[builder(default = false)]
    pub skip_verification: bool,
}

impl TlsConfig {
    /// Creates a config that skips verification (local development).
    pub fn insecure() -> Self {
        Self::builder().skip_verification(true).build()
    }

    /// Returns `true` if an extra root certificate is configured.
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_file.is_some() || self.ca_cert_pem.is_some()
    }

    /// Loads the configured extra root certificate as PEM bytes.
    #[cfg_attr(not(feature = "rest"), allow(dead_code))]
    pub(crate) fn load_ca_pem(&self) -> crate::Result<Option<Vec<u8>>> {
        if let Some(ref path) = self.ca_cert_file {
            let pem = std::fs::read(path).map_err(|e| {
                crate::Error::configuration(format!(
                    "failed to read certificate {:?}: {}",
                    path, e
                ))
            })?;
            return Ok(Some(pem));
        }
        Ok(self.ca_cert_pem.as_ref().map(|pem| pem.as_bytes().to_vec()))
    }
}
