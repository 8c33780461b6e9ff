//! Test doubles for the collection transport.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use graphfeed_core::ports::{CollectionTransport, RawPage};
use graphfeed_domain::{GraphFeedError, Result};
use serde_json::Value;

/// One scripted transport response.
pub enum Scripted {
    /// Serve this page.
    Page(RawPage),
    /// Fail the fetch with this error.
    Fail(GraphFeedError),
}

/// What the engine asked the transport to do, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    First {
        path: String,
        params: Vec<(String, String)>,
        headers: Vec<(String, String)>,
    },
    Next {
        link: String,
        headers: Vec<(String, String)>,
    },
}

/// In-memory mock for [`CollectionTransport`].
///
/// Serves a fixed script of responses in order and records every request so
/// tests can assert on cursor replay and header propagation.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Scripted>) -> Self {
        Self { responses: Mutex::new(responses.into()), requests: Mutex::new(Vec::new()) }
    }

    /// Build a page response from records plus an optional next link.
    pub fn page(records: Vec<Value>, next_link: Option<&str>) -> Scripted {
        Scripted::Page(RawPage { value: records, next_link: next_link.map(str::to_owned) })
    }

    /// Requests observed so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn next_response(&self) -> Result<RawPage> {
        let scripted = self
            .responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| panic!("transport called more often than scripted"));
        match scripted {
            Scripted::Page(page) => Ok(page),
            Scripted::Fail(err) => Err(err),
        }
    }
}

#[async_trait]
impl CollectionTransport for ScriptedTransport {
    async fn fetch_page(
        &self,
        path: &str,
        query: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<RawPage> {
        self.requests.lock().expect("requests lock").push(Request::First {
            path: path.to_owned(),
            params: query.to_vec(),
            headers: headers.to_vec(),
        });
        self.next_response()
    }

    async fn fetch_next(&self, next_link: &str, headers: &[(String, String)]) -> Result<RawPage> {
        self.requests.lock().expect("requests lock").push(Request::Next {
            link: next_link.to_owned(),
            headers: headers.to_vec(),
        });
        self.next_response()
    }
}
