use serde::{de, Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_NUM_CANDIDATES, DEFAULT_SNIPPET_TOKENS, MAX_SNIPPET_TOKENS};
use crate::errors::ValidationError;
use crate::filter::FilterExpression;

const DEFAULT_OPEN_MARKER: &str = "<b>";
const DEFAULT_CLOSE_MARKER: &str = "</b>";
const DEFAULT_ELLIPSIS: &str = "…";

/// Best-matching excerpt of a lexical hit, bounded by a token budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnippetOptions {
    max_tokens: u8,
    pub open_marker: String,
    pub close_marker: String,
    pub ellipsis: String,
}

impl SnippetOptions {
    /// `max_tokens` must lie in `1..=64`; FTS5 rejects anything larger.
    pub fn new(max_tokens: i64) -> Result<Self, ValidationError> {
        if !(1..=i64::from(MAX_SNIPPET_TOKENS)).contains(&max_tokens) {
            return Err(ValidationError::SnippetTokensOutOfRange {
                requested: max_tokens,
                max: MAX_SNIPPET_TOKENS,
            });
        }
        Ok(Self {
            max_tokens: max_tokens as u8,
            open_marker: DEFAULT_OPEN_MARKER.to_string(),
            close_marker: DEFAULT_CLOSE_MARKER.to_string(),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        })
    }

    pub fn max_tokens(&self) -> u8 {
        self.max_tokens
    }

    pub fn with_markers(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.open_marker = open.into();
        self.close_marker = close.into();
        self
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_SNIPPET_TOKENS,
            open_marker: DEFAULT_OPEN_MARKER.to_string(),
            close_marker: DEFAULT_CLOSE_MARKER.to_string(),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

/// Serialized form; the token budget is checked on the way in.
#[derive(Deserialize)]
#[serde(default)]
struct RawSnippetOptions {
    max_tokens: i64,
    open_marker: String,
    close_marker: String,
    ellipsis: String,
}

impl Default for RawSnippetOptions {
    fn default() -> Self {
        Self {
            max_tokens: i64::from(DEFAULT_SNIPPET_TOKENS),
            open_marker: DEFAULT_OPEN_MARKER.to_string(),
            close_marker: DEFAULT_CLOSE_MARKER.to_string(),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for SnippetOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSnippetOptions::deserialize(deserializer)?;
        Ok(Self::new(raw.max_tokens)
            .map_err(de::Error::custom)?
            .with_markers(raw.open_marker, raw.close_marker)
            .with_ellipsis(raw.ellipsis))
    }
}

/// Full content with every match wrapped in markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightOptions {
    pub open_marker: String,
    pub close_marker: String,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            open_marker: DEFAULT_OPEN_MARKER.to_string(),
            close_marker: DEFAULT_CLOSE_MARKER.to_string(),
        }
    }
}

fn check_top_k(top_k: Option<usize>) -> Result<Option<usize>, ValidationError> {
    match top_k {
        Some(0) => Err(ValidationError::InvalidTopK { top_k: 0 }),
        other => Ok(other),
    }
}

/// Rank by lexical relevance against a query string.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalRequest {
    query: String,
    filters: Option<FilterExpression>,
    top_k: Option<usize>,
    snippet: Option<SnippetOptions>,
    highlight: Option<HighlightOptions>,
}

impl LexicalRequest {
    pub fn new(query: impl Into<String>) -> Result<Self, ValidationError> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(Self {
            query,
            filters: None,
            top_k: None,
            snippet: None,
            highlight: None,
        })
    }

    pub fn with_filters(mut self, filters: Option<FilterExpression>) -> Self {
        self.filters = filters;
        self
    }

    /// `None` means unbounded.
    pub fn with_top_k(mut self, top_k: Option<usize>) -> Result<Self, ValidationError> {
        self.top_k = check_top_k(top_k)?;
        Ok(self)
    }

    pub fn with_snippet(mut self, snippet: SnippetOptions) -> Self {
        self.snippet = Some(snippet);
        self
    }

    pub fn with_highlight(mut self, highlight: HighlightOptions) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> Option<&FilterExpression> {
        self.filters.as_ref()
    }

    pub fn top_k(&self) -> Option<usize> {
        self.top_k
    }

    pub fn snippet(&self) -> Option<&SnippetOptions> {
        self.snippet.as_ref()
    }

    pub fn highlight(&self) -> Option<&HighlightOptions> {
        self.highlight.as_ref()
    }
}

/// Rank by distance to a query vector within a bounded candidate window.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRequest {
    query_vector: Vec<f32>,
    filters: Option<FilterExpression>,
    top_k: Option<usize>,
    num_candidates: usize,
}

impl VectorRequest {
    pub fn new(query_vector: Vec<f32>) -> Result<Self, ValidationError> {
        if query_vector.is_empty() {
            return Err(ValidationError::EmptyQueryVector);
        }
        if query_vector.iter().any(|x| !x.is_finite()) {
            return Err(ValidationError::NonFiniteEmbedding {
                id: "<query>".to_string(),
            });
        }
        Ok(Self {
            query_vector,
            filters: None,
            top_k: None,
            num_candidates: DEFAULT_NUM_CANDIDATES,
        })
    }

    pub fn with_filters(mut self, filters: Option<FilterExpression>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_top_k(mut self, top_k: Option<usize>) -> Result<Self, ValidationError> {
        self.top_k = check_top_k(top_k)?;
        Ok(self)
    }

    /// Size of the nearest-neighbour window searched before filtering.
    pub fn with_num_candidates(mut self, num_candidates: usize) -> Result<Self, ValidationError> {
        if num_candidates == 0 {
            return Err(ValidationError::InvalidNumCandidates { num_candidates: 0 });
        }
        self.num_candidates = num_candidates;
        Ok(self)
    }

    pub fn query_vector(&self) -> &[f32] {
        &self.query_vector
    }

    pub fn filters(&self) -> Option<&FilterExpression> {
        self.filters.as_ref()
    }

    pub fn top_k(&self) -> Option<usize> {
        self.top_k
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }
}
