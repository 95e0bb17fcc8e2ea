use crate::domain::model::{FieldMap, FieldValue, FormData, HttpRequest, HttpResponse};
use crate::domain::ports::{ConfirmDialog, CookieStore, Document, HasValue, HttpTransport, Navigator};
use crate::utils::error::{FormwireError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputElement {
    pub value: String,
}

impl HasValue for InputElement {
    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}

#[derive(Debug, Clone)]
enum Node {
    Button,
    Input(InputElement),
    Form {
        enctype: Option<String>,
        controls: Vec<(String, FieldValue)>,
    },
}

#[derive(Debug, Default)]
struct PageState {
    nodes: BTreeMap<String, Node>,
    cookies: Vec<(String, String)>,
    navigations: Vec<String>,
}

/// Headless page: elements by id, a cookie jar honouring expiry, and a navigation log.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, PageState> {
        lock(&self.state)
    }

    pub fn with_button(self, id: &str) -> Self {
        self.state().nodes.insert(id.to_string(), Node::Button);
        self
    }

    pub fn with_input(self, id: &str, value: &str) -> Self {
        self.state().nodes.insert(
            id.to_string(),
            Node::Input(InputElement {
                value: value.to_string(),
            }),
        );
        self
    }

    pub fn with_form(self, id: &str, enctype: Option<&str>, fields: &[(&str, &str)]) -> Self {
        let controls = fields
            .iter()
            .map(|(name, value)| (name.to_string(), FieldValue::from(*value)))
            .collect();
        self.state().nodes.insert(
            id.to_string(),
            Node::Form {
                enctype: enctype.map(str::to_string),
                controls,
            },
        );
        self
    }

    /// Seeds the jar from a `document.cookie`-style header such as `a=1; b=2`.
    pub fn with_cookies(self, header: &str) -> Self {
        for pair in header.split(';').filter(|pair| !pair.trim().is_empty()) {
            self.set_cookie(pair);
        }
        self
    }

    /// Appends a control to a form; no-op for unknown ids or non-form elements.
    pub fn add_form_control(&self, form_id: &str, name: &str, value: FieldValue) {
        if let Some(Node::Form { controls, .. }) = self.state().nodes.get_mut(form_id) {
            controls.push((name.to_string(), value));
        }
    }

    pub fn remove_element(&self, id: &str) {
        self.state().nodes.remove(id);
    }

    /// Runs `f` against the input with the given id, or against `None` when absent.
    pub fn update_input<R>(&self, id: &str, f: impl FnOnce(Option<&mut InputElement>) -> R) -> R {
        let mut state = self.state();
        match state.nodes.get_mut(id) {
            Some(Node::Input(input)) => f(Some(input)),
            _ => f(None),
        }
    }

    pub fn input_value(&self, id: &str) -> Option<String> {
        match self.state().nodes.get(id) {
            Some(Node::Input(input)) => Some(input.value.clone()),
            _ => None,
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state().navigations.clone()
    }

    pub fn location(&self) -> Option<String> {
        self.state().navigations.last().cloned()
    }
}

impl Document for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.state().nodes.contains_key(id)
    }

    fn form(&self, id: &str) -> Option<FormData> {
        match self.state().nodes.get(id)? {
            Node::Form { enctype, controls } => {
                let mut fields = FieldMap::new();
                for (name, value) in controls {
                    fields.insert(name.clone(), value.clone());
                }
                Some(FormData {
                    fields,
                    enctype: enctype.clone(),
                })
            }
            Node::Button | Node::Input(_) => None,
        }
    }
}

enum Expiry {
    Session,
    Expired,
    At(DateTime<Utc>),
}

fn parse_expiry(attributes: &[&str]) -> Expiry {
    let mut expires = None;
    for attribute in attributes {
        let Some((key, value)) = attribute.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            // max-age takes precedence over expires
            "max-age" => {
                if let Ok(seconds) = value.parse::<i64>() {
                    if seconds <= 0 {
                        return Expiry::Expired;
                    }
                    return Expiry::At(Utc::now() + chrono::Duration::seconds(seconds));
                }
            }
            "expires" => {
                if let Ok(at) = DateTime::parse_from_rfc2822(value) {
                    expires = Some(at.with_timezone(&Utc));
                }
            }
            _ => {}
        }
    }
    match expires {
        Some(at) if at <= Utc::now() => Expiry::Expired,
        Some(at) => Expiry::At(at),
        None => Expiry::Session,
    }
}

impl CookieStore for MemoryPage {
    fn cookie_header(&self) -> String {
        self.state()
            .cookies
            .iter()
            .map(|(name, value)| {
                if name.is_empty() {
                    value.clone()
                } else {
                    format!("{}={}", name, value)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn set_cookie(&self, assignment: &str) {
        let mut parts = assignment.split(';');
        let pair = parts.next().unwrap_or_default();
        let attributes: Vec<&str> = parts.collect();

        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => ("", pair.trim()),
        };
        if name.is_empty() && value.is_empty() {
            return;
        }

        let mut state = self.state();
        let existing = state.cookies.iter().position(|(own, _)| own == name);
        match parse_expiry(&attributes) {
            Expiry::Expired => {
                if let Some(index) = existing {
                    state.cookies.remove(index);
                }
            }
            // The jar never outlives a test, so future expiry reads as live.
            Expiry::Session | Expiry::At(_) => match existing {
                Some(index) => state.cookies[index].1 = value.to_string(),
                None => state.cookies.push((name.to_string(), value.to_string())),
            },
        }
    }
}

impl Navigator for MemoryPage {
    fn assign(&self, location: &str) {
        self.state().navigations.push(location.to_string());
    }
}

/// Confirmation dialog answering from a script, falling back to a fixed answer.
#[derive(Debug)]
pub struct ScriptedDialog {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedDialog {
    pub fn always(answer: bool) -> Self {
        Self::answers(Vec::new(), answer)
    }

    pub fn answers(answers: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

impl ConfirmDialog for ScriptedDialog {
    fn confirm(&self, message: &str) -> bool {
        lock(&self.prompts).push(message.to_string());
        lock(&self.answers).pop_front().unwrap_or(self.fallback)
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Respond(HttpResponse),
    TimeOut,
}

/// Transport that records every request and answers with a canned reply.
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn responding(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Respond(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            reply: Reply::TimeOut,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.url.clone();
        lock(&self.requests).push(request);
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::TimeOut => Err(FormwireError::Timeout { url }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coerce::set_value;

    #[test]
    fn test_cookie_jar_set_and_expire() {
        let page = MemoryPage::new().with_cookies("a=1; b=2");
        assert_eq!(page.cookie_header(), "a=1; b=2");

        page.set_cookie("a=3");
        assert_eq!(page.cookie_header(), "a=3; b=2");

        page.set_cookie("a=;expires=Thu, 01 Jan 1970 00:00:00 GMT");
        assert_eq!(page.cookie_header(), "b=2");

        page.set_cookie("b=gone; Max-Age=0");
        assert_eq!(page.cookie_header(), "");
    }

    #[test]
    fn test_cookie_future_expiry_keeps_cookie() {
        let page = MemoryPage::new();
        page.set_cookie("token=abc; expires=Fri, 01 Jan 2100 00:00:00 GMT; path=/");
        assert_eq!(page.cookie_header(), "token=abc");
    }

    #[test]
    fn test_form_serialization_last_duplicate_wins() {
        let page = MemoryPage::new().with_form(
            "f1",
            None,
            &[("tag", "first"), ("name", "x"), ("tag", "second")],
        );

        let form = page.form("f1").unwrap();
        assert_eq!(form.enctype, None);
        assert_eq!(form.fields.len(), 2);
        assert_eq!(form.fields["tag"], FieldValue::from("second"));
    }

    #[test]
    fn test_form_lookup_of_non_form_is_none() {
        let page = MemoryPage::new().with_button("b1");
        assert!(page.has_element("b1"));
        assert!(page.form("b1").is_none());
        assert!(page.form("missing").is_none());
    }

    #[test]
    fn test_update_input_through_set_value() {
        let page = MemoryPage::new().with_input("due", "");

        page.update_input("due", |input| set_value(input, "2024-01-01T00:00:00"));
        page.update_input("missing", |input| set_value(input, "ignored"));

        assert_eq!(page.input_value("due").as_deref(), Some("2024-01-01T00:00:00"));
        assert_eq!(page.input_value("missing"), None);
    }

    #[test]
    fn test_scripted_dialog_records_prompts() {
        let dialog = ScriptedDialog::answers([true], false);
        assert!(dialog.confirm("first"));
        assert!(!dialog.confirm("second"));
        assert_eq!(dialog.prompts(), vec!["first", "second"]);
    }
}
