//! Wire types for the `generateContent` endpoint.
//!
//! Requests are built from a prompt plus sampling settings; responses are
//! decoded here and flattened into the concatenated text of the first
//! candidate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateRequestDto<'a> {
    pub(super) contents: [ContentDto<'a>; 1],
    pub(super) generation_config: GenerationConfigDto,
}

#[derive(Debug, Serialize)]
pub(super) struct ContentDto<'a> {
    pub(super) parts: [PartDto<'a>; 1],
}

#[derive(Debug, Serialize)]
pub(super) struct PartDto<'a> {
    pub(super) text: &'a str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfigDto {
    pub(super) temperature: f64,
    pub(super) top_p: f64,
    pub(super) top_k: u32,
}

impl Default for GenerationConfigDto {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            top_p: 1.0,
            top_k: 32,
        }
    }
}

impl<'a> GenerateRequestDto<'a> {
    pub(super) fn new(prompt: &'a str, generation_config: GenerationConfigDto) -> Self {
        Self {
            contents: [ContentDto {
                parts: [PartDto { text: prompt }],
            }],
            generation_config,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct GenerateResponseDto {
    #[serde(default)]
    candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateDto {
    content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
struct CandidateContentDto {
    #[serde(default)]
    parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Deserialize)]
struct CandidatePartDto {
    text: Option<String>,
}

impl GenerateResponseDto {
    /// Text of the first candidate, or `None` when it carries no text.
    pub(super) fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    }
}
