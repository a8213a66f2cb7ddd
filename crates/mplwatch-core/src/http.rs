//! Blocking HTTP seam shared by the log fetcher and the report publisher.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Clone, Copy)]
pub struct BasicAuth<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> BasicAuth<'a> {
    pub fn new(username: &'a str, password: &'a str) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for BasicAuth<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Minimal request surface the pipeline needs.
///
/// Implementations return `Ok` for any HTTP response, whatever its status;
/// `Err` is reserved for failures to obtain a response at all.
pub trait HttpTransport {
    fn get(&self, url: &str, auth: BasicAuth<'_>) -> Result<HttpReply>;
    fn post_json(&self, url: &str, auth: BasicAuth<'_>, body: &str) -> Result<HttpReply>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("mplwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str, auth: BasicAuth<'_>) -> Result<HttpReply> {
        let resp = self
            .http
            .get(url)
            .basic_auth(auth.username, Some(auth.password))
            .header(ACCEPT, "application/json")
            .send()?;
        let status = resp.status().as_u16();
        Ok(HttpReply::new(status, resp.text()?))
    }

    fn post_json(&self, url: &str, auth: BasicAuth<'_>, body: &str) -> Result<HttpReply> {
        let resp = self
            .http
            .post(url)
            .basic_auth(auth.username, Some(auth.password))
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()?;
        let status = resp.status().as_u16();
        Ok(HttpReply::new(status, resp.text()?))
    }
}
