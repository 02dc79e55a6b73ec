use super::{SignalCalculator, SignalContext, SignalScores};
use crate::error::{Result, TagwiseError};
use crate::model::SignalType;
use crate::store::VectorStore;
use crate::vector::cosine_distance;

/// Cosine similarity between the entity's vector and each tag's vector
pub struct ContentSimilarity<'a> {
    vectors: &'a dyn VectorStore,
    threshold: f64,
}

impl<'a> ContentSimilarity<'a> {
    pub fn new(vectors: &'a dyn VectorStore, threshold: f64) -> Self {
        Self { vectors, threshold }
    }
}

impl SignalCalculator for ContentSimilarity<'_> {
    fn signal(&self) -> SignalType {
        SignalType::SimilarContent
    }

    fn score(&self, ctx: &SignalContext<'_>) -> Result<SignalScores> {
        let mut scores = SignalScores::new();

        let Some(entity_vector) = self.vectors.entity_vector(ctx.entity)? else {
            return Ok(scores);
        };

        for tag in ctx.candidates {
            let Some(tag_vector) = self.vectors.tag_vector(&tag.id)? else {
                continue;
            };

            let distance = match cosine_distance(&entity_vector, &tag_vector) {
                Ok(d) => d,
                Err(TagwiseError::DimensionMismatch { expected, actual }) => {
                    tracing::debug!(tag_id = %tag.id, expected, actual, "skipping tag vector");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let similarity = 1.0 - distance;
            if similarity > self.threshold {
                scores.insert(tag.id.clone(), similarity);
            }
        }

        Ok(scores)
    }
}
