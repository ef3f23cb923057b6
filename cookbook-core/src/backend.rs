//! Backend contract and its HTTP implementation.
//!
//! `GET /<kind>` lists, `POST /<kind>` creates, `PUT /<kind>/{id}` updates and
//! `DELETE /<kind>/{id}` deletes. Everything except `/login` carries the
//! session's bearer token.

use crate::error::{Error, Result};
use crate::model::{ItemId, Listed};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// One backend collection of `T`.
#[async_trait]
pub trait Collection<T: Listed>: Send + Sync {
    async fn list(&self) -> Result<Vec<T>>;
    async fn create(&self, draft: &T::Draft) -> Result<()>;
    async fn update(&self, item: &T) -> Result<()>;
    async fn delete(&self, id: ItemId) -> Result<()>;
}

#[async_trait]
pub trait Auth: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Session>;
    async fn logout(&self, session: &Session) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    session: Session,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` bounds each whole request; `None` leaves it to the OS.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: Session::default(),
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(bearer) => req.header(AUTHORIZATION, bearer),
            None => req,
        }
    }

    async fn send(&self, method: &'static str, path: String, req: RequestBuilder) -> Result<Response> {
        debug!(method, %path, "request");
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(method, %path, status = status.as_u16(), "backend rejected request");
            return Err(Error::Status {
                method,
                path,
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl<T: Listed> Collection<T> for HttpBackend {
    async fn list(&self) -> Result<Vec<T>> {
        let path = format!("/{}", T::KIND.path());
        let req = self.authorized(self.client.get(self.url(&path)));
        let items: Vec<T> = self.send("GET", path, req).await?.json().await?;
        debug!(kind = T::KIND.plural(), count = items.len(), "fetched collection");
        Ok(items)
    }

    async fn create(&self, draft: &T::Draft) -> Result<()> {
        let path = format!("/{}", T::KIND.path());
        let req = self.authorized(self.client.post(self.url(&path)).json(draft));
        self.send("POST", path, req).await?;
        Ok(())
    }

    async fn update(&self, item: &T) -> Result<()> {
        let path = format!("/{}/{}", T::KIND.path(), item.id());
        let req = self.authorized(self.client.put(self.url(&path)).json(item));
        self.send("PUT", path, req).await?;
        Ok(())
    }

    async fn delete(&self, id: ItemId) -> Result<()> {
        let path = format!("/{}/{}", T::KIND.path(), id);
        let req = self.authorized(self.client.delete(self.url(&path)));
        self.send("DELETE", path, req).await?;
        Ok(())
    }
}

#[async_trait]
impl Auth for HttpBackend {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let body = Credentials { username, password };
        debug!(username, "login");
        let resp = self.client.post(self.url("/login")).json(&body).send().await?;
        match resp.status() {
            StatusCode::OK => Ok(Session::from_login_response(&resp.text().await?)),
            StatusCode::UNAUTHORIZED => Err(Error::IncorrectLogin),
            other => Err(Error::Status {
                method: "POST",
                path: "/login".into(),
                status: other.as_u16(),
            }),
        }
    }

    async fn logout(&self, session: &Session) -> Result<()> {
        let bearer = session.bearer().ok_or(Error::NotLoggedIn)?;
        let req = self.client.post(self.url("/logout")).header(AUTHORIZATION, bearer);
        self.send("POST", "/logout".into(), req).await?;
        Ok(())
    }
}
