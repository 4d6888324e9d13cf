use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, Method, header},
    response::Response,
};
use tracing::{error, info};
use url::Url;

use crate::common::relay::relay_body;
use crate::common::response::ApiError;
use crate::config::settings::AppConfig;

/// The two processing services sitting behind the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Analysis,
    Transcoding,
}

impl Backend {
    /// Fixed path appended to the configured base URL.
    pub fn path(self) -> &'static str {
        match self {
            Backend::Analysis => "analyze-video",
            Backend::Transcoding => "transcode",
        }
    }

    /// Body field each backend reads the owner from. The two services
    /// disagree on the name and both must be honoured.
    pub fn owner_field(self) -> &'static str {
        match self {
            Backend::Analysis => "user",
            Backend::Transcoding => "created_by",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Backend::Analysis => "video analysis",
            Backend::Transcoding => "video transcode",
        }
    }
}

/// Headers that describe the caller's hop rather than the payload.
const HOP_HEADERS: [HeaderName; 3] = [header::HOST, header::CONNECTION, header::TRANSFER_ENCODING];

#[derive(Clone)]
pub struct BackendProxy {
    client: reqwest::Client,
    analysis_url: Url,
    transcode_url: Url,
}

impl BackendProxy {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .build()?;

        Ok(Self::with_client(
            client,
            config.analyze_video_url.clone(),
            config.transcode_video_url.clone(),
        ))
    }

    pub fn with_client(client: reqwest::Client, analysis_url: Url, transcode_url: Url) -> Self {
        Self {
            client,
            analysis_url,
            transcode_url,
        }
    }

    pub fn endpoint(&self, backend: Backend) -> String {
        let base = match backend {
            Backend::Analysis => &self.analysis_url,
            Backend::Transcoding => &self.transcode_url,
        };
        format!("{}/{}", base.as_str().trim_end_matches('/'), backend.path())
    }

    /// Sends one request to `backend` and relays whatever comes back.
    ///
    /// Only a failure to get a response at all becomes an error; any status
    /// the backend returns is passed to the caller as-is.
    pub async fn forward(
        &self,
        backend: Backend,
        method: Method,
        headers: &HeaderMap,
        body: Vec<u8>,
        user_id: i64,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(backend);
        let outbound = outbound_headers(headers, body.len());

        let upstream = self
            .client
            .request(method, &url)
            .headers(outbound)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!(backend = backend.label(), %url, error = %e, "error making request to video service");
                ApiError::BadGateway
            })?;

        let status = upstream.status();
        let mut response_headers = HeaderMap::with_capacity(upstream.headers().len());
        for (name, value) in upstream.headers() {
            if !HOP_HEADERS.contains(name) {
                response_headers.append(name.clone(), value.clone());
            }
        }

        info!(
            backend = backend.label(),
            user_id,
            status = status.as_u16(),
            "proxied request to video service"
        );

        let mut response = Response::new(relay_body(
            upstream.bytes_stream(),
            backend.label(),
            user_id,
        ));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

/// Copies the caller's headers minus the credential, the stale length and
/// hop-level headers, then describes the rewritten JSON body.
fn outbound_headers(inbound: &HeaderMap, body_len: usize) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len() + 2);
    for (name, value) in inbound {
        if name == header::AUTHORIZATION || name == header::CONTENT_LENGTH || HOP_HEADERS.contains(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }

    outbound.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    outbound.insert(header::CONTENT_LENGTH, HeaderValue::from(body_len));
    outbound
}
