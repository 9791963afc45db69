//! Minimal request / response pair the speech views operate on.

use crate::errors::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl FromStr for Method {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            other => Err(AppError::InvalidRoute(format!(
                "Unsupported method '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub form: BTreeMap<String, String>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            form: BTreeMap::new(),
        }
    }

    pub fn post<K, V>(path: impl Into<String>, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            method: Method::Post,
            path: path.into(),
            form: form
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Form value for `name`, `None` when the field was not sent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form.get(name).map(String::as_str)
    }

    /// Path with any query string removed.
    pub fn route_path(&self) -> &str {
        self.path.split_once('?').map_or(self.path.as_str(), |(p, _)| p)
    }
}

/// Parse a `key=value` pair as given on the command line.
pub fn parse_form_pair(s: &str) -> AppResult<(String, String)> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| AppError::InvalidRoute(format!("Expected key=value, got '{}'", s)))?;
    Ok((k.trim().to_string(), v.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            location: None,
            body: body.into(),
        }
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self {
            status: 302,
            location: Some(location.into()),
            body: String::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: 400,
            location: None,
            body: message.into(),
        }
    }

    pub fn not_found(what: impl fmt::Display) -> Self {
        Self {
            status: 404,
            location: None,
            body: format!("{} not found", what),
        }
    }

    pub fn method_not_allowed(method: Method) -> Self {
        Self {
            status: 405,
            location: None,
            body: format!("Method {} not allowed", method),
        }
    }

    pub fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            302 => "Found",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => "",
        }
    }

    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}
