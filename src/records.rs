use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::RecordsConfig;
use crate::ir::{Event, EventKind, TimeOfDay, WEEK_DAYS, WeekParity};
use crate::parser::parse_time;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("records request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("login payload carries no study")]
    MissingStudy,

    #[error("ticket for {course}: unusable day number {day}")]
    BadTicketDay { course: String, day: String },

    #[error("ticket for {course}: unparsable time {value:?}")]
    BadTicketTime { course: String, value: String },

    #[error("ticket for {course}: start {start} is not before end {end}")]
    EmptyTicket {
        course: String,
        start: TimeOfDay,
        end: TimeOfDay,
    },
}

pub type RecordsResult<T> = Result<T, RecordsError>;

/// Authenticated session against the academic-records service. The layout
/// engine never talks to this type; it only sees the `Vec<Event>` produced
/// by the `schedule_*` calls.
pub struct RecordsClient {
    http: Client,
    base_url: String,
    xsrf_token: Option<String>,
    login_data: LoginData,
    course_memo: HashMap<String, Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    person: Person,
    #[serde(default)]
    studies: Vec<Study>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Person {
    first_name: String,
    last_name: String,
}

#[derive(Debug, Deserialize)]
struct Study {
    id: i64,
    #[serde(default)]
    semesters: Vec<Value>,
}

/// Element-list envelope every collection endpoint responds with.
#[derive(Debug, Deserialize)]
struct Elements<T> {
    #[serde(default = "Vec::new")]
    elements: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseSemester {
    course_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticket {
    day_number: Value,
    ticket_start: String,
    ticket_end: String,
    #[serde(default)]
    room: Option<Room>,
    parallel_class: ParallelClass,
    #[serde(default)]
    even_odd_week: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Room {
    #[serde(default)]
    room_number: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParallelClass {
    parallel_type: ParallelType,
    #[serde(default)]
    teachers: Vec<Teacher>,
}

#[derive(Debug, Deserialize)]
struct ParallelType {
    code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Teacher {
    first_name: String,
    last_name: String,
}

impl RecordsClient {
    /// Open a session: probe the login page, lift the `XSRF-TOKEN` cookie
    /// into a request header, then post the credential form. The cookie jar
    /// keeps the session alive for subsequent calls.
    pub fn login(config: &RecordsConfig, username: &str, password: &str) -> RecordsResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let login_url = format!("{base_url}/login");

        let probe = http.get(&login_url).send()?;
        let xsrf_token = probe
            .cookies()
            .find(|cookie| cookie.name() == "XSRF-TOKEN")
            .map(|cookie| cookie.value().to_string());

        let mut request = http
            .post(&login_url)
            .form(&[("username", username), ("password", password)]);
        if let Some(token) = &xsrf_token {
            request = request.header("X-XSRF-TOKEN", token);
        }
        let login_data: LoginData = request.send()?.error_for_status()?.json()?;
        debug!(
            "records: logged in as {} {}",
            login_data.person.first_name, login_data.person.last_name
        );

        Ok(Self {
            http,
            base_url,
            xsrf_token,
            login_data,
            course_memo: HashMap::new(),
        })
    }

    fn api_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> RecordsResult<T> {
        let url = format!("{}/api/{path}", self.base_url);
        let mut request = self.http.get(&url).query(query);
        if let Some(token) = &self.xsrf_token {
            request = request.header("X-XSRF-TOKEN", token);
        }
        Ok(request.send()?.error_for_status()?.json()?)
    }

    fn study(&self) -> RecordsResult<&Study> {
        self.login_data
            .studies
            .first()
            .ok_or(RecordsError::MissingStudy)
    }

    /// Scheduled tickets of one course for one semester. A course with no
    /// entry for the semester yields an empty list, not an error.
    pub fn schedule_for_course(&self, code: &str, semester: &str) -> RecordsResult<Vec<Event>> {
        let found: Elements<CourseSemester> = self.api_get(
            "course-semesters",
            &[
                ("expanded", "semester".to_string()),
                ("query", format!("semesterId=={semester};code=={code}")),
                ("size", "1".to_string()),
            ],
        )?;
        let Some(course) = found.elements.first() else {
            return Ok(Vec::new());
        };

        let tickets: Elements<Ticket> = self.api_get(
            "timetables/timetable-tickets",
            &[
                (
                    "expanded",
                    "parallelClass.teachers,parallelClass.parallelType,room".to_string(),
                ),
                (
                    "query",
                    format!("courseId=={};semesterId=={semester}", course.course_id),
                ),
                ("size", "0".to_string()),
            ],
        )?;
        debug!("records: {code}: {} tickets", tickets.elements.len());
        tickets
            .elements
            .into_iter()
            .map(|ticket| ticket_to_event(code, ticket))
            .collect()
    }

    /// Schedules of several courses, concatenated in input order.
    pub fn schedule_for_courses(
        &self,
        codes: &[String],
        semester: &str,
    ) -> RecordsResult<Vec<Event>> {
        let mut events = Vec::new();
        for code in codes {
            events.extend(self.schedule_for_course(code, semester)?);
        }
        Ok(events)
    }

    /// Semester list carried by the login payload.
    pub fn semesters(&self) -> RecordsResult<Vec<Value>> {
        Ok(self.study()?.semesters.clone())
    }

    /// Course catalog for one semester. Responses are memoized per client
    /// instance, so repeated queries for the same semester hit the service
    /// once.
    pub fn available_courses(&mut self, semester: &str) -> RecordsResult<Vec<Value>> {
        if let Some(cached) = self.course_memo.get(semester) {
            return Ok(cached.clone());
        }
        let study_id = self.study()?.id;
        let found: Elements<Value> = self.api_get(
            "course-semesters",
            &[
                ("studyId", study_id.to_string()),
                ("size", "0".to_string()),
                ("hideFinished", "false".to_string()),
                ("query", format!("semesterId=={semester}")),
            ],
        )?;
        self.course_memo
            .insert(semester.to_string(), found.elements.clone());
        Ok(found.elements)
    }

    /// Registered courses grouped by semester id, in response order.
    pub fn registered_courses(&self) -> RecordsResult<Vec<(String, Vec<Value>)>> {
        let study_id = self.study()?.id;
        let found: Elements<Value> = self.api_get(
            "registered-courses",
            &[
                ("query", format!("studyId=={study_id}")),
                ("size", "0".to_string()),
            ],
        )?;
        Ok(group_by_semester(found.elements))
    }

    /// "First Last" of the logged-in person.
    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.login_data.person.first_name, self.login_data.person.last_name
        )
    }
}

fn ticket_to_event(code: &str, ticket: Ticket) -> RecordsResult<Event> {
    // Service day numbers are 1-based Monday..Friday.
    let day_number = ticket
        .day_number
        .as_i64()
        .or_else(|| ticket.day_number.as_str().and_then(|s| s.trim().parse().ok()));
    let day = match day_number {
        Some(n) if (1..=WEEK_DAYS as i64).contains(&n) => (n - 1) as usize,
        _ => {
            return Err(RecordsError::BadTicketDay {
                course: code.to_string(),
                day: ticket.day_number.to_string(),
            });
        }
    };

    let start = parse_time(&ticket.ticket_start).ok_or_else(|| RecordsError::BadTicketTime {
        course: code.to_string(),
        value: ticket.ticket_start.clone(),
    })?;
    let end = parse_time(&ticket.ticket_end).ok_or_else(|| RecordsError::BadTicketTime {
        course: code.to_string(),
        value: ticket.ticket_end.clone(),
    })?;
    if start >= end {
        return Err(RecordsError::EmptyTicket {
            course: code.to_string(),
            start,
            end,
        });
    }

    let teachers = ticket
        .parallel_class
        .teachers
        .iter()
        .map(|t| format!("{} {}", t.first_name, t.last_name))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Event {
        name: code.to_string(),
        kind: EventKind::from_token(&ticket.parallel_class.parallel_type.code),
        day,
        start,
        end,
        room: ticket.room.map(|r| r.room_number).unwrap_or_default(),
        teachers,
        parity: ticket
            .even_odd_week
            .as_deref()
            .and_then(WeekParity::from_token),
    })
}

fn group_by_semester(courses: Vec<Value>) -> Vec<(String, Vec<Value>)> {
    let mut grouped: Vec<(String, Vec<Value>)> = Vec::new();
    for course in courses {
        let key = course
            .get("semester")
            .and_then(|s| s.get("id"))
            .map(json_id)
            .unwrap_or_default();
        match grouped.iter_mut().find(|(k, _)| *k == key) {
            Some((_, list)) => list.push(course),
            None => grouped.push((key, vec![course])),
        }
    }
    grouped
}

fn json_id(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
