use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nd_core::{Error, Result, SpeechSynthesizer};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

pub const DEFAULT_TTS_URL: &str = "https://translate.google.com";

/// The TTS endpoint rejects longer requests.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Audio files are named `summary-<uuid>.mp3` so concurrent requests never share one.
pub const AUDIO_FILE_PREFIX: &str = "summary";

fn audio_file_name() -> String {
    format!("{}-{}.mp3", AUDIO_FILE_PREFIX, Uuid::new_v4())
}

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub base_url: Option<String>,
    /// Where the audio files are written. Defaults to the OS temp dir.
    pub output_dir: Option<PathBuf>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            output_dir: None,
        }
    }
}

pub fn create_synthesizer(config: &SpeechConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    if !config.enabled {
        return Ok(Arc::new(DisabledSynthesizer));
    }

    let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_TTS_URL);
    let output_dir = config.output_dir.clone().unwrap_or_else(std::env::temp_dir);
    Ok(Arc::new(GoogleTts::new(base_url, output_dir)?))
}

/// Google Translate text-to-speech.
pub struct GoogleTts {
    client: Client,
    endpoint: Url,
    output_dir: PathBuf,
}

impl GoogleTts {
    pub fn new(base_url: &str, output_dir: PathBuf) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            endpoint: Url::parse(base_url)?.join("translate_tts")?,
            output_dir,
        })
    }

    async fn fetch_chunk(&self, chunk: &str, lang: &str, idx: usize, total: usize) -> Result<Vec<u8>> {
        let query = [
            ("ie", "UTF-8".to_string()),
            ("q", chunk.to_string()),
            ("tl", lang.to_string()),
            ("client", "tw-ob".to_string()),
            ("total", total.to_string()),
            ("idx", idx.to_string()),
            ("textlen", chunk.chars().count().to_string()),
        ];

        let response = self.client.get(self.endpoint.clone()).query(&query).send().await?;
        if !response.status().is_success() {
            return Err(Error::Synthesis(format!(
                "TTS chunk {}/{} returned status {}",
                idx + 1,
                total,
                response.status()
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

impl fmt::Debug for GoogleTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTts")
            .field("endpoint", &self.endpoint.as_str())
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    fn name(&self) -> &str {
        "Google TTS"
    }

    async fn synthesize(&self, text: &str, lang: &str) -> Result<PathBuf> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(Error::Synthesis("Nothing to synthesize".to_string()));
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            debug!("🔊 Fetching TTS chunk {}/{}", idx + 1, chunks.len());
            audio.extend(self.fetch_chunk(chunk, lang, idx, chunks.len()).await?);
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(audio_file_name());
        tokio::fs::write(&path, &audio).await?;
        info!("🔊 Audio written to {}", path.display());
        Ok(path)
    }
}

/// Stand-in used when audio output is switched off.
#[derive(Debug, Default)]
pub struct DisabledSynthesizer;

#[async_trait]
impl SpeechSynthesizer for DisabledSynthesizer {
    fn name(&self) -> &str {
        "Disabled"
    }

    async fn synthesize(&self, _text: &str, _lang: &str) -> Result<PathBuf> {
        Err(Error::Synthesis("Speech synthesis is disabled".to_string()))
    }
}

/// Splits text on whitespace into pieces of at most `max_chars` characters.
/// Words longer than the limit are cut.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len > 0 && current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= max_chars {
            current.push_str(word);
            current_len = word_len;
        } else {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
        }
    }

    if current_len > 0 {
        chunks.push(current);
    }
    chunks
}
