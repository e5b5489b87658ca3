#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use tpcs_core::context::StagingContext;
use tpcs_core::models::token_count::{TokenCount, TokenUsage};
use tpcs_core::reference::ReferenceTable;
use tpcs_core::synonyms::SynonymMap;
use tpcs_llm::error::LlmError;
use tpcs_llm::{BoxFuture, Generation, TextGenerator};

pub const TABLE: &str = r#"{
  "Wilms Tumor (Renal Tumors)": {
    "criteria": ["Tumor confined to kidney", "Lymph node involvement", "Hematogenous metastases"],
    "stages": {
      "Stage I": "Limited to kidney, completely resected",
      "Stage II": "Beyond kidney, completely resected",
      "Stage III": "Residual non-hematogenous abdominal tumor",
      "Stage IV": "Hematogenous metastases",
      "Stage V": "Bilateral renal involvement"
    },
    "definitions": { "Spillage": "Tumor contents released into the abdomen" }
  },
  "Neuroblastoma": {
    "criteria": ["Image-defined risk factors", "Distant metastases"],
    "stages": { "L1": "No IDRF", "L2": "IDRF present", "M": "Distant metastases", "MS": "Special pattern" }
  }
}"#;

pub fn context() -> StagingContext {
    StagingContext::new(ReferenceTable::from_json_str(TABLE), SynonymMap::embedded())
}

#[derive(Debug, Clone)]
pub struct Request {
    pub system: String,
    pub user: String,
}

/// Answers generation calls from a fixed script, in order, and records
/// every request it receives.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedGenerator {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_results(responses.into_iter().map(|r| Ok(r.into())))
    }

    pub fn with_results<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<String, String>>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn model_id(&self) -> &str {
        "scripted"
    }

    fn generate<'a>(
        &'a self,
        system_prompt: &'a str,
        user_message: &'a str,
    ) -> BoxFuture<'a, Result<Generation, LlmError>> {
        self.requests.lock().unwrap().push(Request {
            system: system_prompt.to_string(),
            user: user_message.to_string(),
        });
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()));

        Box::pin(async move {
            let text = next.map_err(LlmError::Invocation)?;
            Ok(Generation {
                text,
                model_id: "scripted".to_string(),
                usage: TokenUsage {
                    tokens: TokenCount { input: 100, output: 10 },
                    cost_usd: 0.25,
                },
            })
        })
    }
}
