use std::{collections::HashMap, fmt::Display};

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use ureq::{http::Response, Agent, Body};
use url::Url;

use crate::{
    course::{Course, CourseDraft},
    error::Error,
    store::DocumentStore,
    util::{default_ureq_agent_builder, last_segment},
};

const DEFAULT_ENDPOINT: &str = "https://firestore.googleapis.com";
const DEFAULT_DATABASE: &str = "(default)";
const LIST_PAGE_SIZE: usize = 300;

#[derive(Clone, Debug)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub database: String,
    /// Scheme and host, without trailing slash.  Point it at the emulator
    /// for local work.
    pub endpoint: String,
    pub api_key: Option<String>,
    pub bearer_token: Option<String>,
    pub proxy_url: Option<String>,
}

impl FirestoreConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: DEFAULT_DATABASE.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            bearer_token: None,
            proxy_url: None,
        }
    }

    /// `Authorization` header value, when a bearer token is configured.
    fn authorization(&self) -> Option<String> {
        self.bearer_token
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }

    fn documents_root(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/{}/documents",
            self.endpoint.trim_end_matches('/'),
            self.project_id,
            self.database
        )
    }
}

/// Cloud Firestore over its REST interface.
pub struct FirestoreStore {
    agent: Agent,
    config: FirestoreConfig,
}

impl FirestoreStore {
    pub fn new(config: FirestoreConfig) -> Self {
        let agent = default_ureq_agent_builder(config.proxy_url.as_deref())
            .build()
            .into();
        Self { agent, config }
    }

    fn request(&self, request: &RequestBuilder) -> Result<Response<Body>, Error> {
        let mut request = request.clone();
        if let Some(key) = &self.config.api_key {
            request = request.query("key", key);
        }
        let url = request.build(&self.config.documents_root())?;
        log::debug!("firestore {:?} {}", request.method, request.path.join("/"));

        let result = match request.method {
            Method::Get => self.with_bearer(self.agent.get(&url)).call(),
            Method::Delete => self.with_bearer(self.agent.delete(&url)).call(),
            Method::Post => self
                .with_bearer(self.agent.post(&url))
                .send_json(request.body.as_ref()),
            Method::Patch => self
                .with_bearer(self.agent.patch(&url))
                .send_json(request.body.as_ref()),
        };
        result.map_err(|err| request.map_error(err))
    }

    fn with_bearer<B>(&self, req: ureq::RequestBuilder<B>) -> ureq::RequestBuilder<B> {
        match self.config.authorization() {
            Some(value) => req.header("Authorization", &value),
            None => req,
        }
    }

    /// Send a request and return the deserialized JSON body.
    fn load<T: DeserializeOwned>(&self, request: &RequestBuilder) -> Result<T, Error> {
        let mut response = self.request(request)?;
        response
            .body_mut()
            .read_json()
            .map_err(|err| Error::JsonError(err.to_string()))
    }

    fn load_page(
        &self,
        request: &RequestBuilder,
        token: Option<&str>,
    ) -> Result<ListPage, Error> {
        let mut request = request.clone().query("pageSize", LIST_PAGE_SIZE);
        if let Some(token) = token {
            request = request.query("pageToken", token);
        }
        self.load(&request)
    }
}

/// Fetch pages until one comes back without a `nextPageToken`.  An empty
/// token counts as absent.
fn for_all_pages(
    mut fetch: impl FnMut(Option<&str>) -> Result<ListPage, Error>,
    mut func: impl FnMut(ListPage) -> Result<(), Error>,
) -> Result<(), Error> {
    let mut page_token: Option<String> = None;
    loop {
        let page = fetch(page_token.as_deref())?;
        page_token = page.next_page_token.clone().filter(|t| !t.is_empty());
        func(page)?;
        if page_token.is_none() {
            break Ok(());
        }
    }
}

/// Decode every listed document, skipping the ones that are not courses.
fn list_courses(
    collection: &str,
    fetch: impl FnMut(Option<&str>) -> Result<ListPage, Error>,
) -> Result<Vec<Course>, Error> {
    let mut courses = Vec::new();
    for_all_pages(fetch, |page| {
        for document in page.documents {
            match document.into_course() {
                Ok(course) => courses.push(course),
                Err(err) => log::warn!("skipping document in {}: {}", collection, err),
            }
        }
        Ok(())
    })?;
    Ok(courses)
}

impl DocumentStore for FirestoreStore {
    fn list_all(&self, collection: &str) -> Result<Vec<Course>, Error> {
        let request = RequestBuilder::new(Method::Get, [collection]);
        let courses = list_courses(collection, |token| self.load_page(&request, token))?;
        log::info!("listed {} documents from {}", courses.len(), collection);
        Ok(courses)
    }

    fn get_one(&self, collection: &str, id: &str) -> Result<Course, Error> {
        let request = RequestBuilder::new(Method::Get, [collection, id]);
        let document: Document = self.load(&request)?;
        document.into_course()
    }

    fn delete_one(&self, collection: &str, id: &str) -> Result<(), Error> {
        let request = RequestBuilder::new(Method::Delete, [collection, id]);
        self.request(&request).map(|_| ())
    }

    fn create_one(&self, collection: &str, draft: &CourseDraft) -> Result<Course, Error> {
        let request =
            RequestBuilder::new(Method::Post, [collection]).set_body(Some(encode_fields(draft)));
        let document: Document = self.load(&request)?;
        document.into_course()
    }

    fn update_one(&self, collection: &str, id: &str, draft: &CourseDraft) -> Result<(), Error> {
        let request = RequestBuilder::new(Method::Patch, [collection, id])
            .query("updateMask.fieldPaths", "title")
            .query("updateMask.fieldPaths", "description")
            .query("currentDocument.exists", "true")
            .set_body(Some(encode_fields(draft)));
        self.request(&request).map(|_| ())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListPage {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: HashMap<String, Value>,
}

impl Document {
    fn into_course(self) -> Result<Course, Error> {
        let id = last_segment(&self.name);
        if id.is_empty() {
            return Err(Error::MalformedDocument(format!(
                "no id in name {:?}",
                self.name
            )));
        }
        Ok(Course::new(
            id,
            self.text_field(id, "title"),
            self.text_field(id, "description"),
        ))
    }

    fn text_field(&self, id: &str, field: &str) -> String {
        match self.fields.get(field).and_then(decode_text) {
            Some(text) => text,
            None => {
                log::warn!("document {} has no text field {:?}", id, field);
                String::new()
            }
        }
    }
}

/// Decode a Firestore typed value as display text.  Only scalar values are
/// accepted; maps and arrays are not text.
fn decode_text(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    if let Some(s) = object.get("stringValue").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    // Integers arrive as decimal strings.
    if let Some(s) = object.get("integerValue").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    if let Some(n) = object.get("doubleValue").and_then(Value::as_f64) {
        return Some(n.to_string());
    }
    if let Some(b) = object.get("booleanValue").and_then(Value::as_bool) {
        return Some(b.to_string());
    }
    None
}

fn encode_fields(draft: &CourseDraft) -> Value {
    json!({
        "fields": {
            "title": { "stringValue": draft.title },
            "description": { "stringValue": draft.description },
        }
    })
}

#[derive(Debug, Clone, Copy)]
enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Debug, Clone)]
struct RequestBuilder {
    method: Method,
    path: Vec<String>,
    queries: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestBuilder {
    fn new<'a>(method: Method, path: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            method,
            path: path.into_iter().map(str::to_string).collect(),
            queries: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.  Repeated keys are kept, Firestore uses them
    /// for field masks.
    fn query(mut self, key: impl Display, value: impl Display) -> Self {
        self.queries.push((key.to_string(), value.to_string()));
        self
    }

    fn set_body(mut self, body: Option<Value>) -> Self {
        self.body = body;
        self
    }

    fn build(&self, root: &str) -> Result<String, Error> {
        let mut url = Url::parse(root).map_err(|err| Error::ConfigError(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| Error::ConfigError(format!("{root} cannot be a base URL")))?
            .extend(&self.path);
        if !self.queries.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.queries);
        }
        Ok(url.into())
    }

    fn map_error(&self, err: ureq::Error) -> Error {
        match (err, self.path.as_slice()) {
            (ureq::Error::StatusCode(404), [collection, id]) => Error::NotFound {
                collection: collection.clone(),
                id: id.clone(),
            },
            (err, _) => Error::from(err),
        }
    }
}
