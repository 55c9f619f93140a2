use flume::SendError;
use flume::Sender;
use miette::Diagnostic;
use reqwest::Client;
use reqwest::Response;
use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::asserter;
use crate::asserter::FailureKind;
use crate::config::RunConfig;
use crate::scenario::Step;

#[derive(Error, Debug, Diagnostic)]
pub enum RunnerError {
    #[error("smoke test aborted at step `{name}`")]
    #[diagnostic(help("the step report above carries the failing response"))]
    StepFailed { name: String },

    #[error("invalid URL for step `{name}`")]
    BadStepUrl {
        name: String,
        #[source]
        source: url::ParseError,
    },

    #[error("report channel closed early")]
    ChannelError(#[from] SendError<StepReport>),
}

/// What the outputter gets to print for one executed step.
#[derive(Debug)]
pub struct StepReport {
    pub name: String,
    pub method: String,
    pub path: String,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    Pass {
        body: Value,
    },
    Fail {
        kind: FailureKind,
        /// Raw body echoed for steps that asked for it.
        raw_body: Option<String>,
    },
}

/// Runs every step in declared order against the configured base address.
/// Each request fully completes and has its marker checked before the next
/// one is issued; the first failure ends the run.
pub async fn run_scenario(
    config: &RunConfig,
    steps: Vec<Step>,
    tx: Sender<StepReport>,
) -> Result<(), RunnerError> {
    let client = Client::new();

    for step in steps {
        let url = config
            .url_for(&step.path)
            .map_err(|source| RunnerError::BadStepUrl {
                name: step.name.clone(),
                source,
            })?;

        let request = match &step.body {
            Some(body) => client.request(step.method.clone(), url).json(body),
            None => client.request(step.method.clone(), url),
        };

        let outcome = match request.send().await {
            Ok(resp) => {
                let captured = CapturedResponse::from_response(resp).await;
                match asserter::check(&step.marker, &captured) {
                    Ok(body) => Outcome::Pass { body },
                    Err(kind) => Outcome::Fail {
                        kind,
                        raw_body: step
                            .dump_body_on_failure
                            .then(|| captured.body_text.clone()),
                    },
                }
            }
            Err(err) => Outcome::Fail {
                kind: FailureKind::Transport(err.to_string()),
                raw_body: None,
            },
        };

        let failed = matches!(outcome, Outcome::Fail { .. });

        tx.send_async(StepReport {
            name: step.name.clone(),
            method: step.method.to_string(),
            path: step.path.clone(),
            outcome,
        })
        .await?;

        if failed {
            return Err(RunnerError::StepFailed { name: step.name });
        }
    }

    Ok(())
}

#[derive(Debug)]
pub struct CapturedResponse {
    pub status: StatusCode,
    pub body_text: String,
    pub body_json: Option<Value>,
}

impl CapturedResponse {
    pub async fn from_response(resp: Response) -> Self {
        let status = resp.status();

        // Consume the body exactly once
        let body_text = match resp.text().await {
            Ok(t) => t,
            Err(err) => format!("Failed to read body: {}", err),
        };

        // Attempt to parse JSON, but don't panic
        let body_json = serde_json::from_str::<Value>(&body_text).ok();

        Self {
            status,
            body_text,
            body_json,
        }
    }
}
