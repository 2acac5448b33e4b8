//! Synchronous client for the Google Tasks v1 REST API.
//!
//! Thin by intent: every method is one request (plus pagination), errors
//! surface immediately, nothing is retried or cached.

use std::path::Path;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;

use crate::model::task::{NewTask, Task, TaskList, TaskPatch};
use crate::remote::{RemoteError, auth};

const API_BASE: &str = "https://tasks.googleapis.com/tasks/v1";

/// Page size for list endpoints; pages are followed until exhausted
const MAX_RESULTS: &str = "100";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    next_page_token: Option<String>,
}

/// Envelope Google wraps errors in: `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct TasksClient {
    http: Client,
    token: String,
}

impl TasksClient {
    /// Build a client, running the auth flow if no valid token is cached.
    /// `config_dir` holds credentials.json and token.json.
    pub fn connect(config_dir: &Path) -> Result<Self, RemoteError> {
        let http = Client::new();
        let token = auth::access_token(&http, config_dir)?;
        Ok(TasksClient { http, token })
    }

    fn get(&self, url: String) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.token)
    }

    fn post(&self, url: String) -> RequestBuilder {
        self.http.post(url).bearer_auth(&self.token)
    }

    // -----------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------

    /// Fetch every task in the list, following pagination until exhausted.
    /// `include_completed` also surfaces hidden (completed-and-cleared) tasks,
    /// matching what `ls -a` numbering needs.
    pub fn list_tasks(
        &self,
        list_id: &str,
        include_completed: bool,
    ) -> Result<Vec<Task>, RemoteError> {
        let flag = if include_completed { "true" } else { "false" };
        let mut tasks: Vec<Task> = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut req = self
                .get(format!("{}/lists/{}/tasks", API_BASE, list_id))
                .query(&[
                    ("maxResults", MAX_RESULTS),
                    ("showCompleted", flag),
                    ("showHidden", flag),
                ]);
            if let Some(ref token) = page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }
            let page: Page<Task> = check(req.send()?)?.json()?;
            tasks.extend(page.items);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(tasks)
    }

    /// The one reordering primitive: reparent and/or reposition in a single
    /// call. `parent` absent clears the parent (promotes to top level);
    /// `previous` absent places the task first among its new siblings.
    pub fn move_task(
        &self,
        list_id: &str,
        task_id: &str,
        parent: Option<&str>,
        previous: Option<&str>,
    ) -> Result<Task, RemoteError> {
        let mut req = self.post(format!(
            "{}/lists/{}/tasks/{}/move",
            API_BASE, list_id, task_id
        ));
        if let Some(parent) = parent {
            req = req.query(&[("parent", parent)]);
        }
        if let Some(previous) = previous {
            req = req.query(&[("previous", previous)]);
        }
        Ok(check(req.send()?)?.json()?)
    }

    pub fn insert_task(&self, list_id: &str, task: &NewTask) -> Result<Task, RemoteError> {
        let req = self
            .post(format!("{}/lists/{}/tasks", API_BASE, list_id))
            .json(task);
        Ok(check(req.send()?)?.json()?)
    }

    pub fn patch_task(
        &self,
        list_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> Result<Task, RemoteError> {
        let req = self
            .http
            .patch(format!("{}/lists/{}/tasks/{}", API_BASE, list_id, task_id))
            .bearer_auth(&self.token)
            .json(patch);
        Ok(check(req.send()?)?.json()?)
    }

    pub fn delete_task(&self, list_id: &str, task_id: &str) -> Result<(), RemoteError> {
        let req = self
            .http
            .delete(format!("{}/lists/{}/tasks/{}", API_BASE, list_id, task_id))
            .bearer_auth(&self.token);
        check(req.send()?)?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // Task lists
    // -----------------------------------------------------------------

    pub fn list_tasklists(&self) -> Result<Vec<TaskList>, RemoteError> {
        let mut lists: Vec<TaskList> = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut req = self
                .get(format!("{}/users/@me/lists", API_BASE))
                .query(&[("maxResults", MAX_RESULTS)]);
            if let Some(ref token) = page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }
            let page: Page<TaskList> = check(req.send()?)?.json()?;
            lists.extend(page.items);
            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(lists)
    }

    pub fn get_tasklist(&self, list_id: &str) -> Result<TaskList, RemoteError> {
        let req = self.get(format!("{}/users/@me/lists/{}", API_BASE, list_id));
        Ok(check(req.send()?)?.json()?)
    }

    pub fn insert_tasklist(&self, title: &str) -> Result<TaskList, RemoteError> {
        let req = self
            .post(format!("{}/users/@me/lists", API_BASE))
            .json(&json!({ "title": title }));
        Ok(check(req.send()?)?.json()?)
    }

    pub fn delete_tasklist(&self, list_id: &str) -> Result<(), RemoteError> {
        let req = self
            .http
            .delete(format!("{}/users/@me/lists/{}", API_BASE, list_id))
            .bearer_auth(&self.token);
        check(req.send()?)?;
        Ok(())
    }
}

/// Map non-2xx responses to [`RemoteError::Api`], pulling the message out of
/// Google's error envelope when the body parses as one.
fn check(resp: Response) -> Result<Response, RemoteError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    Err(RemoteError::Api { status, message })
}
