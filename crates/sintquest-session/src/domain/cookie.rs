//! The session cookie: attributes, signing and header rendering.
//!
//! The cookie carries only the opaque session id, suffixed with a hex
//! HMAC-SHA256 of that id under the configured secret:
//! `<id>.<signature>`. A single secret is active at a time.

use std::fmt::Write as _;

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use sintquest_core::error::DomainError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const DEFAULT_COOKIE_NAME: &str = "sinterklaas_session";

/// Default session lifetime in seconds: one day.
pub const DEFAULT_MAX_AGE_SECS: i64 = 60 * 60 * 24;

/// Attributes and signing key of the session cookie. `SameSite` is always
/// `Lax` so links shared between the two players keep the session.
#[derive(Clone)]
pub struct CookieSettings {
    /// Cookie name.
    pub name: String,
    /// Cookie path.
    pub path: String,
    /// Lifetime of the cookie and of the blob behind it.
    pub max_age: Duration,
    /// Hide the cookie from scripts.
    pub http_only: bool,
    /// Only send over HTTPS. Enabled in production.
    pub secure: bool,
    mac: HmacSha256,
}

impl CookieSettings {
    /// Cookie settings with the default name, path `/`, a one-day lifetime,
    /// httpOnly and `SameSite=Lax`, signed with `secret`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `secret` is empty.
    pub fn new(secret: &str, secure: bool) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::Validation(
                "session signing secret must not be empty".into(),
            ));
        }
        let mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| DomainError::Validation(format!("invalid session secret: {e}")))?;
        Ok(Self {
            name: DEFAULT_COOKIE_NAME.to_owned(),
            path: "/".to_owned(),
            max_age: Duration::seconds(DEFAULT_MAX_AGE_SECS),
            http_only: true,
            secure,
            mac,
        })
    }

    /// Returns `id` with its signature appended.
    #[must_use]
    pub fn sign(&self, id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());
        format!("{id}.{signature}")
    }

    /// Returns the id inside `value` if its signature checks out.
    #[must_use]
    pub fn verify<'a>(&self, value: &'a str) -> Option<&'a str> {
        let (id, signature) = value.rsplit_once('.')?;
        if id.is_empty() {
            return None;
        }
        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac.clone();
        mac.update(id.as_bytes());
        mac.verify_slice(&signature).ok()?;
        Some(id)
    }

    /// Finds this cookie in a raw `Cookie` request header and returns the
    /// verified session id.
    #[must_use]
    pub fn session_id_from_header<'a>(&self, header: &'a str) -> Option<&'a str> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.name)
            .and_then(|(_, value)| self.verify(value.trim_matches('"')))
    }

    /// `Set-Cookie` value that stores the signed `id` until `expires`.
    #[must_use]
    pub fn commit_header(&self, id: &str, expires: DateTime<Utc>) -> String {
        let max_age = self.max_age.num_seconds();
        let mut header = format!("{}={}; Max-Age={max_age}", self.name, self.sign(id));
        self.push_attributes(&mut header, expires);
        header
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    #[must_use]
    pub fn clear_header(&self) -> String {
        let mut header = format!("{}=; Max-Age=0", self.name);
        self.push_attributes(&mut header, DateTime::<Utc>::UNIX_EPOCH);
        header
    }

    fn push_attributes(&self, header: &mut String, expires: DateTime<Utc>) {
        let _ = write!(
            header,
            "; Path={}; Expires={}",
            self.path,
            expires.format("%a, %d %b %Y %H:%M:%S GMT")
        );
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        if self.secure {
            header.push_str("; Secure");
        }
        header.push_str("; SameSite=Lax");
    }
}

impl std::fmt::Debug for CookieSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieSettings")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("max_age", &self.max_age)
            .field("http_only", &self.http_only)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}
