//! Scripted in-memory transport for controller tests

use async_trait::async_trait;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{Endpoint, FetchError, FetchResult, Transport};

#[derive(Default)]
struct Script {
    responses: HashMap<Endpoint, FetchResult<Value>>,
    calls: HashMap<Endpoint, usize>,
    posted: Vec<Value>,
    log: Vec<Endpoint>,
}

/// Answers every request for an endpoint with the scripted response.
/// Unscripted endpoints fail as if the backend were unreachable.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn respond(&self, endpoint: Endpoint, response: FetchResult<Value>) {
        self.script.borrow_mut().responses.insert(endpoint, response);
    }

    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.script.borrow().calls.get(&endpoint).copied().unwrap_or(0)
    }

    pub fn posted(&self) -> Vec<Value> {
        self.script.borrow().posted.clone()
    }

    /// Endpoints in the order they were requested
    pub fn log(&self) -> Vec<Endpoint> {
        self.script.borrow().log.clone()
    }

    fn answer(&self, endpoint: Endpoint) -> FetchResult<Value> {
        let mut script = self.script.borrow_mut();
        *script.calls.entry(endpoint).or_insert(0) += 1;
        script.log.push(endpoint);
        script
            .responses
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::Network("connection refused".to_string())))
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn get_json(&self, endpoint: Endpoint) -> FetchResult<Value> {
        self.answer(endpoint)
    }

    async fn post_json(&self, endpoint: Endpoint, body: &Value) -> FetchResult<Value> {
        self.script.borrow_mut().posted.push(body.clone());
        self.answer(endpoint)
    }
}
