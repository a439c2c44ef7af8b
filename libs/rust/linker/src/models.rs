use serde::{Deserialize, Serialize};

use crate::error::SummaryError;

pub type Embedding = Vec<f32>;

/// One sentence of the generated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub embedding: Embedding,
}

/// One paragraph of the submitted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
    pub embedding: Embedding,
}

/// Decoded summarisation result for a single document. Sentence and paragraph
/// order is the order the service returned them in, and doubles as the
/// selection index.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryData {
    pub sentences: Vec<Sentence>,
    pub paragraphs: Vec<Paragraph>,
}

impl SummaryData {
    pub fn sentence_texts(&self) -> Vec<&str> {
        self.sentences.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn paragraph_texts(&self) -> Vec<&str> {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    /// Embedding dimension shared by every sentence and paragraph, if any.
    pub fn dimension(&self) -> Option<usize> {
        self.sentences
            .first()
            .map(|s| s.embedding.len())
            .or_else(|| self.paragraphs.first().map(|p| p.embedding.len()))
    }
}

/// Request body sent to the summarisation service.
#[derive(Debug, Serialize)]
pub struct SummariseRequest<'a> {
    pub document: &'a str,
}

/// Success body returned by the summarisation service.
#[derive(Debug, Deserialize)]
pub struct SummariseResponse {
    pub summary: Vec<Sentence>,
    pub document: Vec<Paragraph>,
}

/// Failure body returned by the summarisation service on non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: String,
}

impl TryFrom<SummariseResponse> for SummaryData {
    type Error = SummaryError;

    /// Every embedding in a response has to be finite and share one non-zero
    /// dimension, so the similarity functions never see mismatched vectors.
    fn try_from(response: SummariseResponse) -> Result<Self, Self::Error> {
        let data = SummaryData {
            sentences: response.summary,
            paragraphs: response.document,
        };

        let entries = data
            .sentences
            .iter()
            .map(|s| &s.embedding)
            .chain(data.paragraphs.iter().map(|p| &p.embedding));
        for (index, embedding) in entries.enumerate() {
            if embedding.iter().any(|x| !x.is_finite()) {
                return Err(SummaryError::Decode(format!(
                    "embedding {index} contains a non-finite value"
                )));
            }
        }

        if let Some(dimension) = data.dimension() {
            if dimension == 0 {
                return Err(SummaryError::Decode("embeddings must not be empty".to_string()));
            }

            let sentences = data.sentences.iter().map(|s| s.embedding.len());
            let paragraphs = data.paragraphs.iter().map(|p| p.embedding.len());
            if let Some((index, len)) = sentences
                .chain(paragraphs)
                .enumerate()
                .find(|(_, len)| *len != dimension)
            {
                return Err(SummaryError::Decode(format!(
                    "embedding {index} has dimension {len}, expected {dimension}"
                )));
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Result<SummaryData, SummaryError> {
        let response: SummariseResponse = serde_json::from_str(body).unwrap();
        SummaryData::try_from(response)
    }

    #[test]
    fn decodes_in_service_order() {
        let data = decode(
            r#"{
                "summary": [{"text": "s0", "embedding": [1.0, 0.0]}, {"text": "s1", "embedding": [0.0, 1.0]}],
                "document": [{"text": "p0", "embedding": [0.5, 0.5]}]
            }"#,
        )
        .unwrap();

        assert_eq!(data.sentence_texts(), vec!["s0", "s1"]);
        assert_eq!(data.paragraph_texts(), vec!["p0"]);
        assert_eq!(data.dimension(), Some(2));
    }

    #[test]
    fn rejects_mixed_dimensions() {
        let err = decode(
            r#"{
                "summary": [{"text": "s0", "embedding": [1.0, 0.0]}],
                "document": [{"text": "p0", "embedding": [0.5, 0.5, 0.1]}]
            }"#,
        )
        .unwrap_err();

        assert!(matches!(err, SummaryError::Decode(_)));
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn rejects_empty_embeddings() {
        let err = decode(r#"{"summary": [{"text": "s0", "embedding": []}], "document": []}"#)
            .unwrap_err();

        assert!(matches!(err, SummaryError::Decode(_)));
    }

    #[test]
    fn rejects_non_finite_embeddings() {
        let response = SummariseResponse {
            summary: vec![Sentence {
                text: "s0".to_string(),
                embedding: vec![1.0, 0.0],
            }],
            document: vec![Paragraph {
                text: "p0".to_string(),
                embedding: vec![f32::INFINITY, 0.0],
            }],
        };

        let err = SummaryData::try_from(response).unwrap_err();
        assert_eq!(
            err,
            SummaryError::Decode("embedding 1 contains a non-finite value".to_string())
        );
    }

    #[test]
    fn accepts_empty_response() {
        let data = decode(r#"{"summary": [], "document": []}"#).unwrap();
        assert_eq!(data.dimension(), None);
    }
}
