use std::fs::File;
use std::io::BufReader;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use tracing::{debug, error, info};

use crate::controller::Submission;
use crate::error::DispatchError;
use crate::settings::ServerSettings;

const BUFFER_SIZE: usize = 1024 * 1024; // 1MB buffer
const SUMMARY_CHARS: usize = 120;

/// What the backend answered to an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub status: u16,
    pub body: String,
}

pub type DispatchResult = Result<DispatchOutcome, DispatchError>;

/// Redirects are not followed: the backend answers bad input with a redirect
/// back to its index page.
fn client_builder(timeout: Duration) -> ClientBuilder {
    Client::builder().timeout(timeout).redirect(Policy::none())
}

/// First non-empty line of `body`, cut to a length that fits the status line.
fn summarize(body: &str) -> String {
    let line = body.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("");
    let mut summary: String = line.chars().take(SUMMARY_CHARS).collect();
    if line.chars().count() > SUMMARY_CHARS {
        summary.push('…');
    }
    summary
}

fn build_form(submission: &Submission) -> Result<Form, DispatchError> {
    let mut form = Form::new();
    for (name, value) in submission.text_fields() {
        form = form.text(name, value);
    }

    if let Some(file) = &submission.file {
        let io_error = |source| DispatchError::Io {
            path: file.path.clone(),
            source,
        };
        let handle = File::open(&file.path).map_err(io_error)?;
        let len = handle.metadata().map_err(io_error)?.len();
        let reader = BufReader::with_capacity(BUFFER_SIZE, handle);
        form = form.part(
            "file",
            Part::reader_with_length(reader, len).file_name(file.name.clone()),
        );
    }

    Ok(form)
}

/// Posts the submission as multipart form data and waits for the answer.
///
/// Anything but a 2xx status, redirects included, is a rejection.
pub fn send_submission(
    client: &Client,
    endpoint: &str,
    submission: &Submission,
) -> DispatchResult {
    let form = build_form(submission)?;
    let response = client.post(endpoint).multipart(form).send()?;
    let status = response.status();

    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("?")
            .to_string();
        return Err(DispatchError::Rejected {
            status: status.as_u16(),
            body: format!("redirected to {}", location),
        });
    }

    let body = summarize(&response.text()?);
    if status.is_success() {
        Ok(DispatchOutcome {
            status: status.as_u16(),
            body,
        })
    } else {
        Err(DispatchError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Runs the submission on a background thread; the result arrives on `result_tx`.
pub fn spawn_dispatch(
    server: ServerSettings,
    submission: Submission,
    result_tx: Sender<DispatchResult>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("Dispatching {} to {}", submission.operation, server.endpoint);

        let result = client_builder(Duration::from_secs(server.timeout_secs))
            .build()
            .map_err(DispatchError::from)
            .and_then(|client| send_submission(&client, &server.endpoint, &submission));

        match &result {
            Ok(outcome) => info!("Backend answered {}", outcome.status),
            Err(e) => error!("Dispatch error: {}", e),
        }

        if result_tx.send(result).is_err() {
            debug!("Dispatch result dropped, receiver is gone");
        }
    })
}
