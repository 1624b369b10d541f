use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::{
    config::FetchConfig,
    course::{encode_path_segment, Course, CoursePayload, CoursesPayload},
    credential::{Credential, CredentialProvider},
    error::FetchError,
};

/// The fixed path of the course listing endpoint.
pub const COURSES_PATH: &str = "/api/admin/courses/";

/// Anything that can produce the course records for the renderers.
///
/// The components and lifecycle drivers only ever see this trait, so
/// tests (or alternative backends) may substitute their own source.
/// In the browser the returned futures need not be `Send`, as they are
/// driven by the single threaded event loop.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CourseSource: Send + Sync {
    /// Fetch the full listing, in the order given by the API.
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError>;

    /// Fetch a single course by its identifier.
    async fn fetch_course(&self, id: &str) -> Result<Course, FetchError>;
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<S: CourseSource + ?Sized> CourseSource for Arc<S> {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError> {
        (**self).fetch_courses().await
    }

    async fn fetch_course(&self, id: &str) -> Result<Course, FetchError> {
        (**self).fetch_course(id).await
    }
}

/// A single GET request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub credential: Option<Credential>,
}

/// The raw outcome of a request that reached the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Moves bytes between the fetcher and the API.
///
/// Implementations should only report failures to reach the server (as
/// [`FetchError::Network`]); interpreting the status and the body is
/// left to the [`CourseFetcher`].
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, FetchError>;
}

/// The [`Transport`] backed by a `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// The timeout only applies off the browser, where the fetch API
    /// provides no such setting.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(timeout);
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self
            .client
            .get(&request.url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(credential) = &request.credential {
            let (name, value) = credential.header();
            builder = builder.header(name, value);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

/// Fetches course records from the admin API.
///
/// Each call issues exactly one request; there is no retrying, caching
/// or pagination, and every failure is returned to the caller rather
/// than being papered over with an empty listing.
pub struct CourseFetcher<T = ReqwestTransport> {
    config: FetchConfig,
    transport: T,
    credentials: Arc<dyn CredentialProvider>,
}

impl CourseFetcher<ReqwestTransport> {
    /// A fetcher talking HTTP through `reqwest`, with the request
    /// timeout taken from the configuration.
    pub fn new(
        config: FetchConfig,
        credentials: impl CredentialProvider + 'static,
    ) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport, credentials))
    }
}

impl<T: Transport> CourseFetcher<T> {
    pub fn with_transport(
        config: FetchConfig,
        transport: T,
        credentials: impl CredentialProvider + 'static,
    ) -> Self {
        Self {
            config,
            transport,
            credentials: Arc::new(credentials),
        }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn courses_url(&self) -> String {
        self.config.url(COURSES_PATH)
    }

    pub fn course_url(&self, id: &str) -> String {
        self.config
            .url(&format!("{COURSES_PATH}{}", encode_path_segment(id)))
    }

    async fn get_json<D>(&self, url: String) -> Result<D, FetchError>
    where
        D: DeserializeOwned + Send,
    {
        let credential = self.credentials.credential().map_err(|e| {
            leptos::logging::warn!("not fetching {url}: {e}");
            e
        })?;
        let request = HttpRequest { url, credential };
        leptos::logging::log!("GET {}", request.url);
        let response = self.send(request).await?;
        check_status(&response)?;
        parse_body(&response.body)
    }

    #[cfg(not(feature = "ssr"))]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.transport.get(request).await
    }

    // The pre-render fetch holds up a request worker, so it is bounded
    // regardless of what the transport does about timeouts.
    #[cfg(feature = "ssr")]
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let timeout = self.config.timeout;
        tokio::time::timeout(timeout, self.transport.get(request))
            .await
            .map_err(|_| {
                FetchError::network(format!("request timed out after {}ms", timeout.as_millis()))
            })?
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<T: Transport> CourseSource for CourseFetcher<T> {
    async fn fetch_courses(&self) -> Result<Vec<Course>, FetchError> {
        let payload: CoursesPayload = self.get_json(self.courses_url()).await?;
        leptos::logging::log!("fetched {} courses", payload.courses.len());
        Ok(payload.courses)
    }

    async fn fetch_course(&self, id: &str) -> Result<Course, FetchError> {
        let payload: CoursePayload = self.get_json(self.course_url(id)).await?;
        Ok(payload.course)
    }
}

fn check_status(response: &HttpResponse) -> Result<(), FetchError> {
    let status = response.status;
    if (200..300).contains(&status) {
        return Ok(());
    }
    let preview = body_preview(&response.body);
    let message = if preview.is_empty() {
        format!("status {status}")
    } else {
        format!("status {status}: {preview}")
    };
    leptos::logging::error!("request failed with {message}");
    match status {
        401 | 403 => Err(FetchError::Auth(message)),
        _ => Err(FetchError::Network(message)),
    }
}

fn parse_body<D: DeserializeOwned>(body: &[u8]) -> Result<D, FetchError> {
    serde_json::from_slice(body).map_err(|e| {
        leptos::logging::error!("malformed response body: {e}");
        FetchError::from(e)
    })
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
