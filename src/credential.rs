use std::sync::Arc;

use crate::error::FetchError;

/// A credential to be attached to an outgoing request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    /// Sent as `Authorization: Bearer <token>`.
    Bearer(String),
    /// Sent verbatim as the `Cookie` header.
    Cookie(String),
}

impl Credential {
    /// The header name and value this credential is sent as.
    pub fn header(&self) -> (&'static str, String) {
        match self {
            Self::Bearer(token) => ("Authorization", format!("Bearer {token}")),
            Self::Cookie(cookie) => ("Cookie", cookie.clone()),
        }
    }
}

/// Supplies the credential for the fetcher.
///
/// The fetcher never looks up credentials by itself; whoever constructs
/// it decides where they come from.  On the server that would typically
/// be the session cookie forwarded from the incoming request, while in
/// the browser it would be a token held by the client.  Returning
/// `Ok(None)` sends the request anonymously, while returning an error
/// aborts the fetch before any request is issued.
pub trait CredentialProvider: Send + Sync {
    fn credential(&self) -> Result<Option<Credential>, FetchError>;
}

impl<P: CredentialProvider + ?Sized> CredentialProvider for Arc<P> {
    fn credential(&self) -> Result<Option<Credential>, FetchError> {
        (**self).credential()
    }
}

/// No credential at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn credential(&self) -> Result<Option<Credential>, FetchError> {
        Ok(None)
    }
}

/// A fixed bearer token.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

impl CredentialProvider for BearerToken {
    fn credential(&self) -> Result<Option<Credential>, FetchError> {
        Ok(Some(Credential::Bearer(self.0.clone())))
    }
}

/// A bearer token that must be present.
///
/// The token is read through the provided function on every fetch, such
/// that a token stored (or cleared) after construction is picked up.  A
/// missing or blank token results in [`FetchError::Auth`].
pub struct RequiredBearerToken {
    source: Box<dyn Fn() -> Option<String> + Send + Sync>,
}

impl RequiredBearerToken {
    pub fn new(source: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }
}

impl CredentialProvider for RequiredBearerToken {
    fn credential(&self) -> Result<Option<Credential>, FetchError> {
        match (self.source)() {
            Some(token) if !token.trim().is_empty() => Ok(Some(Credential::Bearer(token))),
            _ => Err(FetchError::auth("no bearer token available")),
        }
    }
}

/// The session cookie of the incoming request, forwarded as-is.
///
/// This is the strategy for fetching before rendering, where there is
/// no client side storage to pull a token from.
#[derive(Clone, Debug, Default)]
pub struct ForwardedCookie(pub Option<String>);

impl CredentialProvider for ForwardedCookie {
    fn credential(&self) -> Result<Option<Credential>, FetchError> {
        Ok(self
            .0
            .as_ref()
            .filter(|cookie| !cookie.is_empty())
            .cloned()
            .map(Credential::Cookie))
    }
}
