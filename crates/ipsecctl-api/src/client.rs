// Async HTTP client for the provider control-plane REST API.
//
// Auth: `Authorization: Bearer <token>` default header.
// Paging: list endpoints return an `opc-next-page` header; the token is
// sent back as the `page` query parameter until the header disappears.
// Endpoint groups (identity, network, storage, search) are inherent
// methods implemented in sibling modules.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::ErrorResponse;

const NEXT_PAGE_HEADER: &str = "opc-next-page";
const REQUEST_ID_HEADER: &str = "opc-request-id";

/// Async client for the provider REST API.
///
/// All endpoint paths are relative to `base_url`, which always ends
/// with a `/` after normalization.
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CloudClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a bearer token and transport config.
    ///
    /// Injects `Authorization: Bearer …` as a sensitive default header.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with `/` so relative joins keep its path.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized endpoint URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        let (body, _) = Self::handle_response(resp).await?;
        Ok(body)
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        let (body, _) = Self::handle_response(resp).await?;
        Ok(body)
    }

    // ── Pagination ───────────────────────────────────────────────────

    /// GET every page of a list endpoint and flatten the results.
    ///
    /// `into_items` unwraps one page body; plain JSON arrays use
    /// `std::convert::identity`, `{items: […]}` bodies use `|c| c.items`.
    pub(crate) async fn get_all_pages<P, T>(
        &self,
        path: &str,
        params: &[(&str, String)],
        into_items: impl Fn(P) -> Vec<T>,
    ) -> Result<Vec<T>, Error>
    where
        P: DeserializeOwned,
    {
        let url = self.url(path)?;
        let mut all = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = params.to_vec();
            if let Some(ref token) = page {
                query.push(("page", token.clone()));
            }
            debug!("GET {url} params={query:?}");

            let resp = self.http.get(url.clone()).query(&query).send().await?;
            let (body, next): (P, _) = Self::handle_response(resp).await?;
            all.extend(into_items(body));

            match next {
                Some(token) if !token.is_empty() && page.as_deref() != Some(token.as_str()) => {
                    trace!(page = %token, "following next page");
                    page = Some(token);
                }
                _ => break,
            }
        }

        Ok(all)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Decode a success body and return it with the next-page token, if any.
    async fn handle_response<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<(T, Option<String>), Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(Self::parse_error(status, resp).await);
        }

        let next = resp
            .headers()
            .get(NEXT_PAGE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = resp.text().await?;
        let value = serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;
        Ok((value, next))
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let request_id = resp
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let raw = resp.text().await.unwrap_or_default();
        let parsed = serde_json::from_str::<ErrorResponse>(&raw).ok();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::Authentication {
                message: parsed
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "token rejected by the provider".into()),
            };
        }

        match parsed {
            Some(err) => Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
                request_id,
            },
            None => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() { status.to_string() } else { raw },
                code: None,
                request_id,
            },
        }
    }
}
