//! URL patterns for the speech resource.
//!
//! | pattern                  | name          | view           |
//! |--------------------------|---------------|----------------|
//! | `^$`                     | `speech-list` | `SpeechList`   |
//! | `^/add$`                 | `speech-add`  | `SpeechCreate` |
//! | `^/(?P<pk>[0-9]+)$`      | `speech-view` | `SpeechView`   |
//! | `^/(?P<pk>[0-9]+)/edit$` | `speech-edit` | `SpeechUpdate` |
//!
//! `pk` is ASCII digits only; `\d` would also accept other Unicode digits.
//!
//! Patterns are matched against the path left after removing the mount
//! prefix, in table order; the first match wins.

use crate::errors::{AppError, AppResult};
use crate::routes::http::{Request, Response};
use crate::routes::views::{SpeechCreate, SpeechList, SpeechUpdate, SpeechView, View, ViewContext};
use regex::Regex;
use rusqlite::Connection;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    SpeechList,
    SpeechAdd,
    SpeechView,
    SpeechEdit,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::SpeechList => "speech-list",
            RouteName::SpeechAdd => "speech-add",
            RouteName::SpeechView => "speech-view",
            RouteName::SpeechEdit => "speech-edit",
        }
    }

    /// Whether paths of this route carry a primary key segment.
    pub fn takes_pk(&self) -> bool {
        matches!(self, RouteName::SpeechView | RouteName::SpeechEdit)
    }
}

impl FromStr for RouteName {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "speech-list" => Ok(RouteName::SpeechList),
            "speech-add" => Ok(RouteName::SpeechAdd),
            "speech-view" => Ok(RouteName::SpeechView),
            "speech-edit" => Ok(RouteName::SpeechEdit),
            other => Err(AppError::InvalidRoute(format!("Unknown route name '{}'", other))),
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One path-to-view binding.
pub struct Route {
    pub name: RouteName,
    pub pattern: Regex,
    pub view: Box<dyn View>,
}

impl Route {
    fn new(pattern: &str, view: Box<dyn View>, name: RouteName) -> AppResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| AppError::InvalidRoute(format!("{}: {}", name, e)))?;
        Ok(Self {
            name,
            pattern,
            view,
        })
    }
}

/// Outcome of a successful path lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub name: RouteName,
    pub pk: Option<i64>,
}

pub struct RouteTable {
    prefix: String,
    routes: Vec<Route>,
}

impl RouteTable {
    /// The speech routes mounted under `prefix` (e.g. `/speech`).
    /// A trailing slash on the prefix is ignored.
    pub fn speeches(prefix: &str) -> AppResult<Self> {
        let prefix = prefix.trim_end_matches('/').to_string();

        let routes = vec![
            Route::new(r"^$", Box::new(SpeechList), RouteName::SpeechList)?,
            Route::new(r"^/add$", Box::new(SpeechCreate), RouteName::SpeechAdd)?,
            Route::new(r"^/(?P<pk>[0-9]+)$", Box::new(SpeechView), RouteName::SpeechView)?,
            Route::new(
                r"^/(?P<pk>[0-9]+)/edit$",
                Box::new(SpeechUpdate),
                RouteName::SpeechEdit,
            )?,
        ];

        Ok(Self { prefix, routes })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    fn lookup(&self, path: &str) -> Option<(&Route, ResolvedRoute)> {
        let rest = path.strip_prefix(self.prefix.as_str())?;

        for route in &self.routes {
            let Some(caps) = route.pattern.captures(rest) else {
                continue;
            };

            let pk = match caps.name("pk") {
                // digits beyond i64 range never name a stored row
                Some(m) => Some(m.as_str().parse::<i64>().ok()?),
                None => None,
            };

            return Some((
                route,
                ResolvedRoute {
                    name: route.name,
                    pk,
                },
            ));
        }

        None
    }

    /// Match `path` against the table, first match wins.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        self.lookup(path).map(|(_, resolved)| resolved)
    }

    /// Build the path of a named route.
    pub fn reverse(&self, name: RouteName, pk: Option<i64>) -> AppResult<String> {
        let tail = match (name, pk) {
            (RouteName::SpeechList, None) => String::new(),
            (RouteName::SpeechAdd, None) => "/add".to_string(),
            (RouteName::SpeechView, Some(pk)) if pk >= 0 => format!("/{}", pk),
            (RouteName::SpeechEdit, Some(pk)) if pk >= 0 => format!("/{}/edit", pk),
            (name, pk) => {
                return Err(AppError::InvalidRoute(format!(
                    "Cannot reverse '{}' with pk {:?}",
                    name, pk
                )));
            }
        };

        Ok(format!("{}{}", self.prefix, tail))
    }

    /// Resolve the request path and hand the request to the bound view.
    /// Unknown paths produce a 404 response rather than an error.
    pub fn dispatch(
        &self,
        conn: &Connection,
        req: &Request,
        default_instance: &str,
    ) -> AppResult<Response> {
        let path = req.route_path();

        let Some((route, resolved)) = self.lookup(path) else {
            return Ok(Response::not_found(format!("Page '{}'", path)));
        };

        let ctx = ViewContext {
            conn,
            urls: self,
            default_instance,
        };

        route.view.handle(&ctx, req, &resolved)
    }
}
