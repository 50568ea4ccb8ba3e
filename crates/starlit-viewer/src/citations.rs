//! On-demand citation lookup against the OpenAlex API.
//!
//! Requests run on the background runtime and report back over a channel,
//! following the same poll pattern as the catalog loader. Results belong
//! to the paper they were requested for; selecting another paper clears
//! them.

use bevy::prelude::*;
use serde::Deserialize;

use crate::async_runtime::TaskSpawner;

/// Maximum number of citing works requested and shown.
const MAX_CITING_WORKS: usize = 5;

const USER_AGENT: &str = "starlit-viewer/0.1 (https://github.com/starlit-dev/starlit)";

/// Plugin for citation lookups.
pub struct CitationPlugin;

impl Plugin for CitationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HttpClient>()
            .init_resource::<CitationState>()
            .add_systems(Update, poll_citations);
    }
}

/// Shared HTTP client for citation requests, built on first use.
#[derive(Resource, Default)]
pub struct HttpClient(Option<reqwest::Client>);

impl HttpClient {
    /// The cached client, building it if this is the first request. A
    /// builder failure is reported to the caller, not panicked on.
    fn client(&mut self) -> Result<reqwest::Client, String> {
        if let Some(client) = &self.0 {
            return Ok(client.clone());
        }
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| e.to_string())?;
        self.0 = Some(client.clone());
        Ok(client)
    }
}

/// Citation lookup state for the currently selected paper.
#[derive(Resource)]
pub struct CitationState {
    pub is_loading: bool,
    /// Titles of works citing the selected paper.
    pub titles: Vec<String>,
    pub error: Option<String>,
    tx: async_channel::Sender<Result<Vec<String>, String>>,
    rx: async_channel::Receiver<Result<Vec<String>, String>>,
}

impl Default for CitationState {
    fn default() -> Self {
        let (tx, rx) = async_channel::bounded(1);
        Self {
            is_loading: false,
            titles: Vec::new(),
            error: None,
            tx,
            rx,
        }
    }
}

impl CitationState {
    /// Drop results and errors from a previous selection.
    pub fn clear(&mut self) {
        self.titles.clear();
        self.error = None;
    }

    /// Fetch works citing `paper_id` in the background. A request already
    /// in flight wins; the new one is dropped.
    pub fn start_request(&mut self, paper_id: &str, http: &mut HttpClient, spawner: &TaskSpawner) {
        if self.is_loading {
            return;
        }
        self.clear();

        let client = match http.client() {
            Ok(client) => client,
            Err(message) => {
                tracing::warn!("Citation lookup unavailable: {message}");
                self.error = Some(message);
                return;
            }
        };
        self.is_loading = true;

        let url = format!(
            "https://api.openalex.org/works/{}/citing_works?per_page={MAX_CITING_WORKS}",
            urlencoding::encode(paper_id)
        );
        let tx = self.tx.clone();

        tracing::info!("Fetching citing works for {paper_id}");

        spawner.spawn(async move {
            let result = fetch_citing_titles(&client, &url).await;
            let _ = tx.send(result).await;
        });
    }
}

async fn fetch_citing_titles(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<String>, String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;
    let body = response.text().await.map_err(|e| e.to_string())?;
    parse_citing_titles(&body)
}

/// Pull citing-work titles out of an OpenAlex response body.
fn parse_citing_titles(body: &str) -> Result<Vec<String>, String> {
    #[derive(Deserialize)]
    struct Response {
        #[serde(default)]
        results: Vec<Work>,
    }

    #[derive(Deserialize)]
    struct Work {
        title: Option<String>,
    }

    let response: Response = serde_json::from_str(body).map_err(|e| e.to_string())?;
    let mut titles: Vec<String> = response
        .results
        .into_iter()
        .filter_map(|work| work.title)
        .collect();
    titles.truncate(MAX_CITING_WORKS);
    Ok(titles)
}

/// Deliver finished citation lookups to the UI state.
fn poll_citations(mut state: ResMut<CitationState>) {
    let Ok(result) = state.rx.try_recv() else {
        return;
    };

    state.is_loading = false;
    match result {
        Ok(titles) => {
            tracing::info!("Citation lookup returned {} works", titles.len());
            state.titles = titles;
        }
        Err(message) => {
            tracing::warn!("Citation lookup failed: {message}");
            state.error = Some(message);
        }
    }
}
