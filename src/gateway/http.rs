//! Gateway over the JSON REST API of the backend

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::IF_MATCH;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::Error;
use crate::error::Result;
use crate::notes::NewNote;
use crate::notes::Note;
use crate::notes::NoteId;
use crate::notes::NoteUpdate;
use crate::notes::ReminderAction;
use crate::notes::ReminderRequest;
use crate::session::Session;

use super::Gateway;

/// Characters that can stay as-is in a single path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// HTTP gateway, authenticated for the lifetime of a session
#[derive(Clone, Debug)]
pub struct Http {
    /// Client with the `Authorization` header as default header
    client: Client,

    /// Base URL of the API, ending with a `/`
    api_url: Url,
}

impl Http {
    /// Create the gateway for a session
    pub fn new(api_url: Url, session: &Session) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&session.authorization())
            .map_err(|_| Error::Config("Token contains invalid characters".to_string()))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| Error::Config(format!("Could not create HTTP client: {err}")))?;

        Ok(Self { client, api_url })
    }

    fn notes_url(&self) -> Result<Url> {
        self.join("notes")
    }

    fn note_url(&self, id: &NoteId) -> Result<Url> {
        self.join(&format!("notes/{}", encode_segment(id)))
    }

    fn reminder_url(&self, id: &NoteId) -> Result<Url> {
        self.join(&format!("notes/{}/reminder", encode_segment(id)))
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|err| Error::Config(format!("Invalid API path `{path}`: {err}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{method} {url}");

        self.client.request(method, url)
    }
}

impl Gateway for Http {
    async fn list_notes(&self) -> Result<Vec<Note>> {
        let request = self.request(Method::GET, self.notes_url()?);

        read_json(send(request).await?).await
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note> {
        let request = self.request(Method::POST, self.notes_url()?).json(note);

        read_json(send(request).await?).await
    }

    async fn update_note(&self, id: &NoteId, update: &NoteUpdate) -> Result<Note> {
        let mut request = self.request(Method::PUT, self.note_url(id)?).json(update);

        if let Some(version) = update.version {
            request = request.header(IF_MATCH, format!("\"{version}\""));
        }

        read_json(send(request).await?).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        let request = self.request(Method::DELETE, self.note_url(id)?);

        send(request).await.map(|_| ())
    }

    async fn update_reminder(&self, id: &NoteId, action: ReminderAction) -> Result<Note> {
        let request = self
            .request(Method::PUT, self.reminder_url(id)?)
            .json(&ReminderRequest::from(action));

        read_json(send(request).await?).await
    }
}

fn encode_segment(id: &NoteId) -> String {
    utf8_percent_encode(id.as_str(), PATH_SEGMENT).to_string()
}

/// Send the request, turning any failed response into an error
async fn send(request: RequestBuilder) -> Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|err| Error::Network(err.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();

    tracing::warn!("Backend responded with {status}");

    Err(match status {
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => Error::Conflict,
        status => Error::Server {
            status,
            message: error_message(status, &body),
        },
    })
}

async fn read_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let body = response
        .bytes()
        .await
        .map_err(|err| Error::Network(err.to_string()))?;

    serde_json::from_slice(&body).map_err(|err| Error::Decode(err.to_string()))
}

/// Error body as sent by the backend, either flavor
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    description: Option<String>,
}

/// Human-readable message of a failed response
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    };

    let Ok(body) = serde_json::from_slice::<ErrorBody>(body) else {
        return fallback();
    };

    match (body.message.or(body.error), body.description) {
        (Some(message), Some(description)) => format!("{message}: {description}"),
        (Some(message), None) => message,
        (None, _) => fallback(),
    }
}
