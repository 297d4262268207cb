//! Canned-response transport for tests.

use super::transport::{HttpResponse, Transport, TransportError};
use std::sync::Mutex;

pub const IP_URL: &str = "http://ip.test/?format=json";
pub const GEO_URL: &str = "http://geo.test";
pub const FLYOVER_URL: &str = "http://iss.test/iss-pass.json";

/// Answers by URL prefix and records every URL it was asked for.
/// Routes added later shadow earlier ones with the same prefix.
#[derive(Default)]
pub struct StubTransport {
    routes: Vec<(String, Result<HttpResponse, TransportError>)>,
    calls: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, prefix: &str, status: u16, body: &str) -> Self {
        self.routes.push((
            prefix.to_string(),
            Ok(HttpResponse { status, body: body.to_string() }),
        ));
        self
    }

    pub fn fail(mut self, prefix: &str, message: &str) -> Self {
        self.routes
            .push((prefix.to_string(), Err(TransportError(message.to_string()))));
        self
    }

    /// The three happy-path responses for 162.245.144.188 / New York.
    pub fn scenario_a() -> Self {
        Self::new()
            .respond(IP_URL, 200, r#"{"ip":"162.245.144.188"}"#)
            .respond(
                GEO_URL,
                200,
                r#"{"status":"success","data":{"ipv4":"162.245.144.188","latitude":40.7,"longitude":-74.0}}"#,
            )
            .respond(
                FLYOVER_URL,
                200,
                r#"{"message":"success","request":{"latitude":40.7,"longitude":-74.0},"response":[{"risetime":1680000000,"duration":600}]}"#,
            )
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, prefix: &str) -> bool {
        self.calls().iter().any(|u| u.starts_with(prefix))
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.routes
            .iter()
            .rev()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, r)| r.clone())
            .unwrap_or_else(|| {
                Ok(HttpResponse {
                    status: 404,
                    body: format!("no stub for {}", url),
                })
            })
    }
}
