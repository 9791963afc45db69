//! Views bound by the speech route table.

use crate::core::fixtures::resolve_instance;
use crate::db::log::audit;
use crate::db::queries::{
    find_instance_by_label, insert_speech, load_section, load_speech, load_speeches,
    update_speech,
};
use crate::errors::{AppError, AppResult};
use crate::models::Speech;
use crate::models::speech::NewSpeech;
use crate::routes::http::{Method, Request, Response};
use crate::routes::urls::{ResolvedRoute, RouteName, RouteTable};
use crate::utils::date::parse_date;
use crate::utils::time::parse_time;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::Connection;

/// What a view gets besides the request itself.
pub struct ViewContext<'a> {
    pub conn: &'a Connection,
    pub urls: &'a RouteTable,
    /// Instance label used by `SpeechCreate` when neither a section nor an
    /// instance is posted.
    pub default_instance: &'a str,
}

/// A request handler. Methods a view does not override answer 405.
pub trait View {
    fn name(&self) -> &'static str;

    fn get(
        &self,
        _ctx: &ViewContext<'_>,
        req: &Request,
        _route: &ResolvedRoute,
    ) -> AppResult<Response> {
        Ok(Response::method_not_allowed(req.method))
    }

    fn post(
        &self,
        _ctx: &ViewContext<'_>,
        req: &Request,
        _route: &ResolvedRoute,
    ) -> AppResult<Response> {
        Ok(Response::method_not_allowed(req.method))
    }

    fn handle(
        &self,
        ctx: &ViewContext<'_>,
        req: &Request,
        route: &ResolvedRoute,
    ) -> AppResult<Response> {
        match req.method {
            Method::Get => self.get(ctx, req, route),
            Method::Post => self.post(ctx, req, route),
        }
    }
}

fn summary_line(sp: &Speech) -> String {
    let when = match (sp.start_date, sp.start_time) {
        (Some(_), Some(_)) => format!("{} {}", sp.date_str(), sp.time_str()),
        (Some(_), None) => sp.date_str(),
        (None, Some(_)) => sp.time_str(),
        (None, None) => "--".to_string(),
    };
    format!("#{} [{}] {}", sp.id, when, sp.text)
}

fn detail(sp: &Speech) -> String {
    let section = sp
        .section_id
        .map(|s| s.to_string())
        .unwrap_or_else(|| "--".to_string());
    let date = if sp.start_date.is_some() { sp.date_str() } else { "--".to_string() };
    let time = if sp.start_time.is_some() { sp.time_str() } else { "--".to_string() };

    format!(
        "Speech #{}\ninstance: {}\nsection: {}\nstart_date: {}\nstart_time: {}\ntext: {}",
        sp.id, sp.instance_id, section, date, time, sp.text
    )
}

fn require_pk(route: &ResolvedRoute) -> AppResult<i64> {
    route
        .pk
        .ok_or_else(|| AppError::InvalidRoute(format!("{} requires a pk", route.name)))
}

/// Parsed speech form. For the optional date/time fields the outer `Option`
/// tells whether the field was posted, the inner one whether it was empty.
#[derive(Debug, Default)]
struct SpeechForm {
    text: Option<String>,
    section: Option<i64>,
    instance: Option<String>,
    start_date: Option<Option<NaiveDate>>,
    start_time: Option<Option<NaiveTime>>,
}

impl SpeechForm {
    fn parse(req: &Request) -> Result<Self, String> {
        let mut form = SpeechForm {
            text: req.field("text").map(str::to_string),
            ..Default::default()
        };

        if let Some(raw) = req.field("section").filter(|s| !s.trim().is_empty()) {
            let id = raw
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("section: '{}' is not a valid id", raw))?;
            form.section = Some(id);
        }

        form.instance = req
            .field("instance")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        if let Some(raw) = req.field("start_date") {
            form.start_date = Some(if raw.trim().is_empty() {
                None
            } else {
                Some(parse_date(raw).ok_or_else(|| {
                    format!("start_date: '{}' is not a YYYY-MM-DD date", raw)
                })?)
            });
        }

        if let Some(raw) = req.field("start_time") {
            form.start_time = Some(if raw.trim().is_empty() {
                None
            } else {
                Some(parse_time(raw).ok_or_else(|| {
                    format!("start_time: '{}' is not a HH:MM time", raw)
                })?)
            });
        }

        Ok(form)
    }
}

pub struct SpeechList;

impl View for SpeechList {
    fn name(&self) -> &'static str {
        "SpeechList"
    }

    fn get(
        &self,
        ctx: &ViewContext<'_>,
        _req: &Request,
        _route: &ResolvedRoute,
    ) -> AppResult<Response> {
        let speeches = load_speeches(ctx.conn)?;

        if speeches.is_empty() {
            return Ok(Response::ok("No speeches."));
        }

        let body = speeches
            .iter()
            .map(summary_line)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(Response::ok(body))
    }
}

pub struct SpeechCreate;

impl View for SpeechCreate {
    fn name(&self) -> &'static str {
        "SpeechCreate"
    }

    fn get(
        &self,
        _ctx: &ViewContext<'_>,
        _req: &Request,
        _route: &ResolvedRoute,
    ) -> AppResult<Response> {
        Ok(Response::ok(
            "New speech\nfields: text (required), section, instance, start_date (YYYY-MM-DD), start_time (HH:MM)",
        ))
    }

    fn post(
        &self,
        ctx: &ViewContext<'_>,
        req: &Request,
        _route: &ResolvedRoute,
    ) -> AppResult<Response> {
        let form = match SpeechForm::parse(req) {
            Ok(f) => f,
            Err(msg) => return Ok(Response::bad_request(msg)),
        };

        let Some(text) = form.text.filter(|t| !t.trim().is_empty()) else {
            return Ok(Response::bad_request("text: this field is required"));
        };

        let section = match form.section {
            Some(id) => match load_section(ctx.conn, id)? {
                Some(s) => Some(s),
                None => {
                    return Ok(Response::bad_request(format!(
                        "section: {} does not exist",
                        id
                    )));
                }
            },
            None => None,
        };

        let instance = match &form.instance {
            Some(label) => match find_instance_by_label(ctx.conn, label)? {
                Some(i) => Some(i),
                None => {
                    return Ok(Response::bad_request(format!(
                        "instance: '{}' does not exist",
                        label
                    )));
                }
            },
            None => None,
        };

        let instance = match resolve_instance(
            ctx.conn,
            section.as_ref(),
            instance.as_ref(),
            ctx.default_instance,
        ) {
            Ok(i) => i,
            Err(e @ AppError::ParentInstanceMismatch { .. }) => {
                return Ok(Response::bad_request(e.to_string()));
            }
            Err(e) => return Err(e),
        };

        let speech = NewSpeech::new(instance.id, section.as_ref().map(|s| s.id), text).starting(
            form.start_date.flatten(),
            form.start_time.flatten(),
        );

        let tx = ctx.conn.unchecked_transaction()?;
        let id = insert_speech(&tx, &speech)?;
        audit(
            &tx,
            "speech_add",
            &format!("speech {}", id),
            &format!("Created speech {} in instance '{}'", id, instance.label),
        )?;
        tx.commit()?;

        Ok(Response::redirect(ctx.urls.reverse(RouteName::SpeechView, Some(id))?))
    }
}

pub struct SpeechView;

impl View for SpeechView {
    fn name(&self) -> &'static str {
        "SpeechView"
    }

    fn get(
        &self,
        ctx: &ViewContext<'_>,
        _req: &Request,
        route: &ResolvedRoute,
    ) -> AppResult<Response> {
        let pk = require_pk(route)?;
        match load_speech(ctx.conn, pk)? {
            Some(sp) => Ok(Response::ok(detail(&sp))),
            None => Ok(Response::not_found(format!("Speech {}", pk))),
        }
    }
}

pub struct SpeechUpdate;

impl View for SpeechUpdate {
    fn name(&self) -> &'static str {
        "SpeechUpdate"
    }

    fn get(
        &self,
        ctx: &ViewContext<'_>,
        _req: &Request,
        route: &ResolvedRoute,
    ) -> AppResult<Response> {
        let pk = require_pk(route)?;
        match load_speech(ctx.conn, pk)? {
            Some(sp) => Ok(Response::ok(format!(
                "Editing {}\nfields: text, start_date (YYYY-MM-DD), start_time (HH:MM)",
                detail(&sp)
            ))),
            None => Ok(Response::not_found(format!("Speech {}", pk))),
        }
    }

    fn post(
        &self,
        ctx: &ViewContext<'_>,
        req: &Request,
        route: &ResolvedRoute,
    ) -> AppResult<Response> {
        let pk = require_pk(route)?;
        let Some(mut sp) = load_speech(ctx.conn, pk)? else {
            return Ok(Response::not_found(format!("Speech {}", pk)));
        };

        let form = match SpeechForm::parse(req) {
            Ok(f) => f,
            Err(msg) => return Ok(Response::bad_request(msg)),
        };

        if let Some(text) = form.text {
            if text.trim().is_empty() {
                return Ok(Response::bad_request("text: this field may not be blank"));
            }
            sp.text = text;
        }
        if let Some(date) = form.start_date {
            sp.start_date = date;
        }
        if let Some(time) = form.start_time {
            sp.start_time = time;
        }

        let tx = ctx.conn.unchecked_transaction()?;
        update_speech(&tx, &sp)?;
        audit(
            &tx,
            "speech_edit",
            &format!("speech {}", pk),
            &format!("Updated speech {}", pk),
        )?;
        tx.commit()?;

        Ok(Response::redirect(ctx.urls.reverse(RouteName::SpeechView, Some(pk))?))
    }
}
