use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_nn::ops::softmax_last_dim;
use candle_transformers::models::whisper::{self as m, Config};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{RecognizedSpeech, RecognizedWord};

use super::audio_decoder::{WHISPER_SAMPLE_RATE, decode_to_mono_pcm};

/// Decoder context nudging the model to keep disfluencies in the output
/// instead of smoothing them away.
const FILLER_BIAS_PROMPT: &str = "Um, uh, like, you know, hmm, ah";
const SOT_PREV_TOKEN: &str = "<|startofprev|>";
const LANGUAGE: &str = "en";
const MAX_DECODE_TOKENS: usize = 224;

/// Local strategy: an embedded whisper model decoded greedily with
/// per-token probabilities. Token pieces are grouped into words; a word's
/// confidence is the minimum probability among its pieces. There is no
/// voice-activity filtering in this path, so filler words survive.
///
/// Loading happens in the constructor; `main` runs it before the HTTP
/// listener binds.
pub struct CandleWhisperEngine {
    model: Mutex<m::model::Whisper>,
    tokenizer: Tokenizer,
    config: Config,
    device: Device,
    mel_filters: Vec<f32>,
    bias_tokens: Vec<u32>,
}

impl CandleWhisperEngine {
    pub fn new(model_id: &str) -> Result<Self, TranscriptionError> {
        let device = Device::Cpu;

        tracing::info!(
            device = ?device,
            model = model_id,
            "Initializing whisper transcription engine"
        );

        let api = Api::new().map_err(|e| TranscriptionError::ModelLoadFailed(e.to_string()))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("config.json: {}", e)))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer.json: {}", e)))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| {
            TranscriptionError::ModelLoadFailed(format!("model.safetensors: {}", e))
        })?;

        let mel_repo = api.repo(Repo::new(
            "FL33TW00D-HF/whisper-base".to_string(),
            RepoType::Model,
        ));
        let mel_bytes_path = mel_repo
            .get("melfilters.bytes")
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("melfilters.bytes: {}", e)))?;

        let config_contents = std::fs::read_to_string(&config_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("read config: {}", e)))?;
        let config: Config = serde_json::from_str(&config_contents)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("parse config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("tokenizer: {}", e)))?;

        let mel_bytes = std::fs::read(&mel_bytes_path)
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("mel filters: {}", e)))?;
        let mel_filters = read_mel_filters(&mel_bytes, &config)?;

        let bias_tokens = match tokenizer.token_to_id(SOT_PREV_TOKEN) {
            Some(start_of_prev) => {
                let encoding = tokenizer.encode(FILLER_BIAS_PROMPT, false).map_err(|e| {
                    TranscriptionError::ModelLoadFailed(format!("bias prompt: {}", e))
                })?;
                let mut tokens = vec![start_of_prev];
                tokens.extend_from_slice(encoding.get_ids());
                tokens
            }
            None => Vec::new(),
        };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], m::DTYPE, &device)
                .map_err(|e| TranscriptionError::ModelLoadFailed(format!("weights: {}", e)))?
        };

        let model = m::model::Whisper::load(&vb, config.clone())
            .map_err(|e| TranscriptionError::ModelLoadFailed(format!("model: {}", e)))?;

        tracing::info!("Whisper engine loaded successfully");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            config,
            device,
            mel_filters,
            bias_tokens,
        })
    }
}

#[async_trait]
impl TranscriptionEngine for CandleWhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<RecognizedSpeech, TranscriptionError> {
        let pcm = decode_to_mono_pcm(audio_data)?;

        let chunk_samples = m::N_SAMPLES;
        let mut mel_tensors = Vec::new();

        for (i, chunk) in pcm.chunks(chunk_samples).enumerate() {
            let samples = if chunk.len() < chunk_samples {
                let mut padded = chunk.to_vec();
                padded.resize(chunk_samples, 0.0);
                padded
            } else {
                chunk.to_vec()
            };

            let mel_data = m::audio::pcm_to_mel(&self.config, &samples, &self.mel_filters);
            let n_mel = self.config.num_mel_bins;
            let n_frames = mel_data.len() / n_mel;

            let mel_tensor = Tensor::from_vec(mel_data, (1, n_mel, n_frames), &self.device)
                .map_err(|e| {
                    TranscriptionError::TranscriptionFailed(format!("mel tensor: {}", e))
                })?;

            let chunk_start = (i * chunk_samples) as f32 / WHISPER_SAMPLE_RATE as f32;
            let chunk_end = chunk_start + chunk.len() as f32 / WHISPER_SAMPLE_RATE as f32;
            mel_tensors.push((mel_tensor, (chunk_start, chunk_end)));
        }

        let mut words: Vec<RecognizedWord> = Vec::new();
        let mut model = self.model.lock().await;

        for (i, (mel_tensor, window)) in mel_tensors.iter().enumerate() {
            tracing::debug!(segment = i, "Transcribing audio segment");
            let segment_words = decode_segment_words(
                &mut model,
                &self.tokenizer,
                &self.device,
                mel_tensor,
                &self.bias_tokens,
                *window,
            )?;
            words.extend(segment_words);
        }

        if words.is_empty() {
            return Err(TranscriptionError::EmptyResult);
        }

        tracing::info!(words = words.len(), "Audio transcription completed");

        Ok(RecognizedSpeech {
            language: LANGUAGE.to_string(),
            words,
        })
    }

    fn is_ready(&self) -> bool {
        true
    }
}

fn decode_segment_words(
    model: &mut m::model::Whisper,
    tokenizer: &Tokenizer,
    device: &Device,
    mel: &Tensor,
    bias_tokens: &[u32],
    window: (f32, f32),
) -> Result<Vec<RecognizedWord>, TranscriptionError> {
    let sot_token = token_id(tokenizer, m::SOT_TOKEN)?;
    let transcribe_token = token_id(tokenizer, m::TRANSCRIBE_TOKEN)?;
    let no_timestamps_token = token_id(tokenizer, m::NO_TIMESTAMPS_TOKEN)?;
    let eot_token = token_id(tokenizer, m::EOT_TOKEN)?;

    let audio_features = model
        .encoder
        .forward(mel, true)
        .map_err(|e| TranscriptionError::TranscriptionFailed(format!("encoder: {}", e)))?;

    let mut tokens: Vec<u32> = bias_tokens.to_vec();
    tokens.push(sot_token);
    tokens.push(transcribe_token);
    tokens.push(no_timestamps_token);
    let prefix_len = tokens.len();

    let mut pieces: Vec<(String, f32)> = Vec::new();

    for _ in 0..MAX_DECODE_TOKENS {
        let token_tensor = Tensor::new(tokens.as_slice(), device)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .unsqueeze(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let decoder_output = model
            .decoder
            .forward(&token_tensor, &audio_features, tokens.len() == prefix_len)
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("decoder: {}", e)))?;

        let logits = model
            .decoder
            .final_linear(
                &decoder_output
                    .squeeze(0)
                    .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?,
            )
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("linear: {}", e)))?;

        let seq_len = logits
            .dim(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;
        let last_logits = logits
            .get(seq_len - 1)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        let next_token = last_logits
            .argmax(0)
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?
            .to_scalar::<u32>()
            .map_err(|e| TranscriptionError::TranscriptionFailed(e.to_string()))?;

        if next_token == eot_token {
            break;
        }

        let probability = softmax_last_dim(&last_logits)
            .and_then(|probs| probs.get(next_token as usize))
            .and_then(|p| p.to_scalar::<f32>())
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("softmax: {}", e)))?;

        tokens.push(next_token);

        if let Some(piece) = tokenizer.id_to_token(next_token) {
            if piece.starts_with("<|") {
                continue;
            }
            pieces.push((piece.replace('Ġ', " ").replace('▁', " "), probability));
        }
    }

    model.reset_kv_cache();

    Ok(group_pieces_into_words(&pieces, window))
}

/// A piece whose decoded text begins with a space starts a new word; a
/// word's confidence is the minimum probability among its pieces.
fn group_pieces_into_words(pieces: &[(String, f32)], window: (f32, f32)) -> Vec<RecognizedWord> {
    let mut words = Vec::new();
    let mut text = String::new();
    let mut min_probability = f32::INFINITY;

    for (piece, probability) in pieces {
        if piece.starts_with(' ') && !text.trim().is_empty() {
            words.push(RecognizedWord::new(
                text.trim(),
                Some(min_probability),
                window.0,
                window.1,
            ));
            text.clear();
            min_probability = f32::INFINITY;
        }
        text.push_str(piece);
        min_probability = min_probability.min(*probability);
    }

    if !text.trim().is_empty() {
        words.push(RecognizedWord::new(
            text.trim(),
            Some(min_probability),
            window.0,
            window.1,
        ));
    }

    words
}

fn token_id(tokenizer: &Tokenizer, token: &str) -> Result<u32, TranscriptionError> {
    tokenizer.token_to_id(token).ok_or_else(|| {
        TranscriptionError::TranscriptionFailed(format!("token not found: {}", token))
    })
}

fn read_mel_filters(bytes: &[u8], config: &Config) -> Result<Vec<f32>, TranscriptionError> {
    let expected_len = config.num_mel_bins * (m::N_FFT / 2 + 1);
    if bytes.len() < expected_len * 4 {
        return Err(TranscriptionError::ModelLoadFailed(format!(
            "mel filters file too small: {} bytes, expected at least {}",
            bytes.len(),
            expected_len * 4
        )));
    }

    let filters: Vec<f32> = bytes
        .chunks_exact(4)
        .take(expected_len)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(filters)
}
