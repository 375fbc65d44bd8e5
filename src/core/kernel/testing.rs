use crate::core::errors::ExchangeError;
use crate::core::kernel::params::{JsonBody, QueryString};
use crate::core::kernel::rest::RestClient;
use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// One request as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: Method,
    pub endpoint: String,
    pub query: String,
    pub body: Option<String>,
    pub authenticated: bool,
}

/// `RestClient` that records calls and answers with a canned value
#[derive(Clone)]
pub struct RecordingRest {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    response: Value,
}

impl RecordingRest {
    pub fn new(response: Value) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("no call recorded")
    }

    fn record(&self, call: RecordedCall) -> Value {
        self.calls.lock().unwrap().push(call);
        self.response.clone()
    }
}

fn typed<T: DeserializeOwned>(value: Value) -> Result<T, ExchangeError> {
    let body = value.to_string();
    serde_json::from_value(value).map_err(|source| ExchangeError::DecodeError { source, body })
}

#[async_trait]
impl RestClient for RecordingRest {
    async fn get(
        &self,
        endpoint: &str,
        query: &QueryString,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        Ok(self.record(RecordedCall {
            method: Method::GET,
            endpoint: endpoint.to_string(),
            query: query.encode(),
            body: None,
            authenticated,
        }))
    }

    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        query: &QueryString,
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let value = self.get(endpoint, query, authenticated).await?;
        typed(value)
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &JsonBody,
        authenticated: bool,
    ) -> Result<Value, ExchangeError> {
        Ok(self.record(RecordedCall {
            method: Method::POST,
            endpoint: endpoint.to_string(),
            query: String::new(),
            body: Some(body.as_str().to_string()),
            authenticated,
        }))
    }

    async fn post_json<T: DeserializeOwned + Send>(
        &self,
        endpoint: &str,
        body: &JsonBody,
        authenticated: bool,
    ) -> Result<T, ExchangeError> {
        let value = self.post(endpoint, body, authenticated).await?;
        typed(value)
    }
}
