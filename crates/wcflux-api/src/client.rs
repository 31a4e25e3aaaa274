// WooCommerce REST client
//
// Wraps `reqwest::Client` with route construction (pretty or `rest_route`
// style), Basic auth, WordPress error-envelope parsing, and header-driven
// pagination. Resource endpoints live in `crate::endpoints` as inherent
// methods so this module stays focused on transport mechanics.

use std::future::Future;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{Credentials, RouteStyle};
use crate::endpoints::MAX_PER_PAGE;
use crate::error::Error;
use crate::transport::TransportConfig;

/// WordPress REST error shape: `{"code": "...", "message": "...", "data": {"status": 400}}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// One page of a collection endpoint plus the paging headers WordPress sends.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub data: Vec<T>,
    /// `X-WP-Total`: number of items across all pages.
    pub total: Option<u64>,
    /// `X-WP-TotalPages`: number of pages at the requested `per_page`.
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    /// Whether another page exists after `page` (1-based).
    ///
    /// `per_page` is clamped the same way the request parameter is, so a
    /// short page is judged against what the server actually used.
    pub fn has_more(&self, page: u32, per_page: u32) -> bool {
        if self.data.is_empty() {
            return false;
        }
        match self.total_pages {
            Some(total) => page < total,
            None => {
                let received = u32::try_from(self.data.len()).unwrap_or(u32::MAX);
                received >= per_page.clamp(1, MAX_PER_PAGE)
            }
        }
    }
}

/// Async client for a single WooCommerce store.
pub struct WooClient {
    http: reqwest::Client,
    site_url: Url,
    route_style: RouteStyle,
    credentials: Option<Credentials>,
    /// Request timeout baked into `http`, when this client built it.
    timeout: Option<Duration>,
}

impl WooClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `site_url` authenticating with `credentials`.
    pub fn new(
        site_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
        route_style: RouteStyle,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let site_url = Url::parse(site_url)?;

        Ok(Self {
            http,
            site_url,
            route_style,
            credentials: Some(credentials),
            timeout: Some(transport.timeout),
        })
    }

    /// Wrap an existing `reqwest::Client`.
    ///
    /// Credentials are optional so tests can talk to an open mock server.
    pub fn with_client(
        http: reqwest::Client,
        site_url: Url,
        route_style: RouteStyle,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            http,
            site_url,
            route_style,
            credentials,
            timeout: None,
        }
    }

    /// The store's base URL.
    pub fn site_url(&self) -> &Url {
        &self.site_url
    }

    /// The route addressing style in use.
    pub fn route_style(&self) -> RouteStyle {
        self.route_style
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Absolute URL for a REST route such as `wc/v3/products/42`.
    pub(crate) fn url(&self, route: &str) -> Result<Url, Error> {
        let raw = self.route_style.route_url(self.site_url.as_str(), route);
        Ok(Url::parse(&raw)?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.credentials {
            Some(creds) => {
                let (user, secret) = creds.basic_pair();
                builder.basic_auth(user, Some(secret))
            }
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, Error> {
        builder.send().await.map_err(|e| match self.timeout {
            Some(limit) if e.is_timeout() => Error::Timeout {
                timeout_secs: limit.as_secs(),
            },
            _ => Error::Transport(e),
        })
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, route: &str) -> Result<T, Error> {
        self.get_with_params(route, &[]).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(route)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .send(self.request(Method::GET, url).query(params))
            .await?;
        self.handle_response(resp).await
    }

    /// GET a collection route and capture the `X-WP-*` paging headers.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, String)],
    ) -> Result<Page<T>, Error> {
        let url = self.url(route)?;
        debug!("GET {url} params={params:?}");

        let resp = self
            .send(self.request(Method::GET, url).query(params))
            .await?;
        let total = header_number::<u64>(resp.headers(), "X-WP-Total");
        let total_pages = header_number::<u32>(resp.headers(), "X-WP-TotalPages");
        let data = self.handle_response(resp).await?;

        Ok(Page {
            data,
            total,
            total_pages,
        })
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(route)?;
        debug!("POST {url}");

        let resp = self.send(self.request(Method::POST, url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(route)?;
        debug!("PUT {url}");

        let resp = self.send(self.request(Method::PUT, url).json(body)).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete_with_params<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(route)?;
        debug!("DELETE {url} params={params:?}");

        let resp = self
            .send(self.request(Method::DELETE, url).query(params))
            .await?;
        self.handle_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(&self, resp: Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            trace!(len = body.len(), "response body received");
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..floor_char_boundary(&body, 200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: StatusCode, resp: Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = parsed
                .and_then(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            return Error::Authentication { message };
        }

        match parsed {
            Some(err) => Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            },
            None => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            },
        }
    }

    // ── Pagination helper ────────────────────────────────────────────

    /// Collect every page of a collection into a single `Vec<T>`.
    ///
    /// `fetch` receives the 1-based page number and the page size.
    pub async fn paginate_all<T, F, Fut>(&self, per_page: u32, fetch: F) -> Result<Vec<T>, Error>
    where
        F: Fn(u32, u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, Error>>,
    {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let batch = fetch(page, per_page).await?;
            let more = batch.has_more(page, per_page);
            let received = batch.data.len();
            all.extend(batch.data);

            if !more || received == 0 {
                break;
            }
            page += 1;
        }

        Ok(all)
    }
}

fn header_number<N: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<N> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut idx = max;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
