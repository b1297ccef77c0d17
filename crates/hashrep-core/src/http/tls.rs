//! TLS client credentials, CA bundle and proxy resolved at startup.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::RequestConfig;

/// Validated transport settings. Only non-empty config values are kept; every
/// referenced file has been opened once so later requests cannot fail on a
/// missing path.
#[derive(Clone, Default)]
pub struct TlsMaterial {
    cert: Option<PathBuf>,
    key: Option<PathBuf>,
    passphrase: Option<String>,
    ca: Option<PathBuf>,
    proxy: Option<String>,
    timeout: Option<Duration>,
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn readable(kind: &str, path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    File::open(path).with_context(|| format!("read {} {}", kind, path.display()))?;
    Ok(path.to_path_buf())
}

impl TlsMaterial {
    pub fn load(cfg: &RequestConfig) -> Result<Self> {
        Ok(Self {
            cert: non_empty(&cfg.cert).map(|p| readable("cert", p)).transpose()?,
            key: non_empty(&cfg.key).map(|p| readable("key", p)).transpose()?,
            passphrase: non_empty(&cfg.passphrase).map(str::to_string),
            ca: non_empty(&cfg.ca).map(|p| readable("ca", p)).transpose()?,
            proxy: non_empty(&cfg.proxy).map(str::to_string),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn has_client_cert(&self) -> bool {
        self.cert.is_some()
    }

    pub fn has_ca(&self) -> bool {
        self.ca.is_some()
    }

    pub fn has_proxy(&self) -> bool {
        self.proxy.is_some()
    }

    /// Apply the settings to a fresh easy handle.
    pub(super) fn apply(&self, easy: &mut curl::easy::Easy) -> Result<(), curl::Error> {
        if let Some(cert) = &self.cert {
            easy.ssl_cert(cert)?;
        }
        if let Some(key) = &self.key {
            easy.ssl_key(key)?;
        }
        if let Some(pass) = &self.passphrase {
            easy.key_password(pass)?;
        }
        if let Some(ca) = &self.ca {
            easy.cainfo(ca)?;
        }
        if let Some(proxy) = &self.proxy {
            easy.proxy(proxy)?;
        }
        if let Some(timeout) = self.timeout {
            easy.timeout(timeout)?;
        }
        Ok(())
    }
}

// Passphrase and proxy credentials stay out of logs.
impl std::fmt::Debug for TlsMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsMaterial")
            .field("cert", &self.cert)
            .field("key", &self.key)
            .field("passphrase", &self.passphrase.as_ref().map(|_| "<redacted>"))
            .field("ca", &self.ca)
            .field("proxy", &self.proxy.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_sets_nothing() {
        let tls = TlsMaterial::load(&RequestConfig::default()).unwrap();
        assert!(!tls.has_client_cert());
        assert!(!tls.has_ca());
        assert!(!tls.has_proxy());
        assert!(tls.passphrase.is_none());
        assert!(tls.timeout.is_none());
    }

    #[test]
    fn readable_files_and_strings_are_kept() {
        let mut ca = tempfile::NamedTempFile::new().unwrap();
        writeln!(ca, "-----BEGIN CERTIFICATE-----").unwrap();
        ca.flush().unwrap();
        let cfg = RequestConfig {
            ca: ca.path().to_string_lossy().into_owned(),
            passphrase: "secret".to_string(),
            proxy: "http://proxy.local:3128".to_string(),
            timeout_secs: Some(5),
            ..RequestConfig::default()
        };
        let tls = TlsMaterial::load(&cfg).unwrap();
        assert!(tls.has_ca());
        assert!(tls.has_proxy());
        assert_eq!(tls.passphrase.as_deref(), Some("secret"));
        assert_eq!(tls.timeout, Some(Duration::from_secs(5)));

        let dbg = format!("{:?}", tls);
        assert!(!dbg.contains("secret"));
        assert!(!dbg.contains("proxy.local"));
    }

    #[test]
    fn unreadable_cert_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = RequestConfig {
            cert: dir.path().join("client.pem").to_string_lossy().into_owned(),
            ..RequestConfig::default()
        };
        let err = TlsMaterial::load(&cfg).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("cert"));
        assert!(msg.contains("client.pem"));
    }
}
