//! Recommendation engine
//!
//! Fetches the candidate tags of a workspace, runs the four signal
//! calculators concurrently, combines their scores with fixed weights and
//! returns the top recommendations decorated with supporting evidence.

pub mod weights;

use std::cmp::Ordering;
use std::collections::HashMap;
use std::time::Instant;

use crate::config::{RecommendConfig, MAX_RECOMMENDATIONS};
use crate::error::Result;
use crate::model::{
    Reason, Recommendation, RecommendationRequest, SignalType, SimilarItem, Tag, TagScore,
};
use crate::signals::{
    CoOccurrence, ContentSimilarity, Popularity, SignalCalculator, SignalContext, SignalScores,
    UserPattern,
};
use crate::store::{
    ActivityStore, AssociationStore, EntityStore, NoVectors, SimilarEntity, TagStore, VectorStore,
};
use crate::trace_time;

use weights::signal_weight;

static NO_VECTORS: NoVectors = NoVectors;

/// Scores candidate tags for one entity at a time
///
/// The engine borrows its stores and keeps no state between calls.
pub struct RecommendationEngine<'a> {
    tags: &'a dyn TagStore,
    associations: &'a dyn AssociationStore,
    activities: &'a dyn ActivityStore,
    entities: &'a dyn EntityStore,
    vectors: &'a dyn VectorStore,
    config: RecommendConfig,
}

impl<'a> RecommendationEngine<'a> {
    /// Create an engine over a single backend that serves every lookup except vectors
    pub fn new<S>(store: &'a S) -> Self
    where
        S: TagStore + AssociationStore + ActivityStore + EntityStore,
    {
        Self::from_parts(store, store, store, store, &NO_VECTORS)
    }

    /// Create an engine from individually supplied stores
    pub fn from_parts(
        tags: &'a dyn TagStore,
        associations: &'a dyn AssociationStore,
        activities: &'a dyn ActivityStore,
        entities: &'a dyn EntityStore,
        vectors: &'a dyn VectorStore,
    ) -> Self {
        RecommendationEngine {
            tags,
            associations,
            activities,
            entities,
            vectors,
            config: RecommendConfig::default(),
        }
    }

    /// Use a vector backend for the content similarity signal
    pub fn with_vectors(mut self, vectors: &'a dyn VectorStore) -> Self {
        self.vectors = vectors;
        self
    }

    pub fn with_config(mut self, config: RecommendConfig) -> Self {
        self.config = config;
        self
    }

    /// Recommend up to five tags for the requested entity, best first
    ///
    /// Only a failure to list the candidate tags is returned as an error. A
    /// failing signal contributes zero and missing evidence is left out.
    #[tracing::instrument(skip(self, request), fields(workspace_id = %request.workspace_id, entity_id = %request.entity.id, kind = %request.entity.kind))]
    pub fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>> {
        let start = Instant::now();

        let candidates = self
            .tags
            .list_tags(&request.workspace_id, &request.current_tag_ids)?;
        if candidates.is_empty() {
            tracing::debug!("no candidate tags");
            return Ok(Vec::new());
        }

        let ctx = SignalContext {
            workspace_id: &request.workspace_id,
            entity: &request.entity,
            current_tag_ids: &request.current_tag_ids,
            user_id: &request.user_id,
            candidates: &candidates,
            now: request.now,
        };

        let content = ContentSimilarity::new(self.vectors, self.config.content_threshold);
        let co_occurrence = CoOccurrence::new(self.associations);
        let user_pattern = UserPattern::new(
            self.activities,
            self.config.activity_window_days,
            self.config.user_pattern_key,
        );
        let popularity = Popularity::new(self.associations);
        let calculators: [&dyn SignalCalculator; 4] =
            [&content, &co_occurrence, &user_pattern, &popularity];

        let signals = run_signals(&calculators, &ctx);

        let mut scored = combine_scores(&candidates, &signals);
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(self.config.max_results.min(MAX_RECOMMENDATIONS));

        self.attach_evidence(request, &mut scored);

        let by_id: HashMap<&str, &Tag> = candidates.iter().map(|t| (t.id.as_str(), t)).collect();
        let recommendations: Vec<Recommendation> = scored
            .into_iter()
            .filter_map(|score| {
                let tag = by_id.get(score.tag_id.as_str())?;
                Some(to_recommendation((*tag).clone(), score))
            })
            .collect();

        trace_time!(
            start,
            "recommend",
            candidates = candidates.len(),
            returned = recommendations.len()
        );

        Ok(recommendations)
    }

    /// Attach co-occurring tag names and similar items to the ranked scores
    fn attach_evidence(&self, request: &RecommendationRequest, scored: &mut [TagScore]) {
        if scored.is_empty() {
            return;
        }

        let needs_names = scored
            .iter()
            .any(|s| dominant_signal(s) == Some(SignalType::CoOccurrence));
        if needs_names {
            if let Some(names) = self.current_tag_names(request) {
                for score in scored.iter_mut() {
                    if dominant_signal(score) == Some(SignalType::CoOccurrence) {
                        score.cooccurring_tag_names = Some(names.clone());
                    }
                }
            }
        }

        let similar = self.similar_entities(request);
        if similar.is_empty() {
            return;
        }
        for score in scored.iter_mut() {
            let items: Vec<SimilarItem> = similar
                .iter()
                .filter(|s| s.tag_ids.contains(&score.tag_id))
                .take(self.config.similar_items_limit)
                .map(|s| SimilarItem::from(&s.entity))
                .collect();
            if !items.is_empty() {
                score.similar_items = Some(items);
            }
        }
    }

    fn current_tag_names(&self, request: &RecommendationRequest) -> Option<Vec<String>> {
        match self
            .tags
            .get_tags(&request.workspace_id, &request.current_tag_ids)
        {
            Ok(tags) => {
                let by_id: HashMap<&str, &str> = tags
                    .iter()
                    .map(|t| (t.id.as_str(), t.name.as_str()))
                    .collect();
                Some(
                    request
                        .current_tag_ids
                        .iter()
                        .filter_map(|id| by_id.get(id.as_str()).map(|n| n.to_string()))
                        .collect(),
                )
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to resolve current tag names");
                None
            }
        }
    }

    fn similar_entities(&self, request: &RecommendationRequest) -> Vec<SimilarEntity> {
        if self.config.similar_items_limit == 0 {
            return Vec::new();
        }

        let lookup = self
            .entities
            .get_entity(&request.workspace_id, &request.entity)
            .and_then(|entity| match entity {
                Some(entity) => self.entities.find_similar_entities(
                    &request.workspace_id,
                    &entity,
                    self.config.similar_items_limit,
                ),
                None => Ok(Vec::new()),
            });

        lookup.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "similar entity lookup failed");
            Vec::new()
        })
    }
}

/// Run every calculator on its own scoped thread
///
/// A calculator that fails or panics contributes an empty score map.
fn run_signals(
    calculators: &[&dyn SignalCalculator],
    ctx: &SignalContext<'_>,
) -> HashMap<SignalType, SignalScores> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = calculators
            .iter()
            .map(|calculator| {
                let calculator = *calculator;
                let handle = scope.spawn(move || {
                    let start = Instant::now();
                    let result = calculator.score(ctx);
                    (result, start.elapsed())
                });
                (calculator.signal(), handle)
            })
            .collect();

        handles
            .into_iter()
            .map(|(signal, handle)| {
                let scores = match handle.join() {
                    Ok((Ok(scores), elapsed)) => {
                        tracing::debug!(signal = %signal, scored = scores.len(), ?elapsed, "signal_scored");
                        scores
                    }
                    Ok((Err(e), _)) => {
                        tracing::warn!(signal = %signal, error = %e, "signal failed, contributing zero");
                        SignalScores::new()
                    }
                    Err(_) => {
                        tracing::warn!(signal = %signal, "signal panicked, contributing zero");
                        SignalScores::new()
                    }
                };
                (signal, scores)
            })
            .collect()
    })
}

/// Weighted sum per candidate; zero totals are dropped
fn combine_scores(candidates: &[Tag], signals: &HashMap<SignalType, SignalScores>) -> Vec<TagScore> {
    candidates
        .iter()
        .filter_map(|tag| {
            let mut total = 0.0;
            let mut reasons = Vec::new();

            for signal in SignalType::ALL {
                let sub_score = signals
                    .get(&signal)
                    .and_then(|scores| scores.get(&tag.id))
                    .copied()
                    .unwrap_or(0.0);
                if sub_score > 0.0 {
                    total += sub_score * signal_weight(signal);
                    reasons.push(Reason::new(signal, sub_score));
                }
            }

            (total > 0.0).then(|| TagScore {
                tag_id: tag.id.clone(),
                score: total,
                reasons,
                cooccurring_tag_names: None,
                similar_items: None,
            })
        })
        .collect()
}

/// Signal with the largest weighted contribution; earlier signals win ties
fn dominant_reason(score: &TagScore) -> Option<&Reason> {
    let mut best: Option<&Reason> = None;
    for reason in &score.reasons {
        let contribution = reason.score * signal_weight(reason.signal_type);
        match best {
            Some(b) if b.score * signal_weight(b.signal_type) >= contribution => {}
            _ => best = Some(reason),
        }
    }
    best
}

fn dominant_signal(score: &TagScore) -> Option<SignalType> {
    dominant_reason(score).map(|r| r.signal_type)
}

fn to_recommendation(tag: Tag, score: TagScore) -> Recommendation {
    let reason = dominant_reason(&score)
        .map(|r| r.description.clone())
        .unwrap_or_default();
    Recommendation {
        tag,
        score: score.score,
        reason,
        reasons: score.reasons,
        cooccurring_tags: score.cooccurring_tag_names,
        similar_items: score.similar_items,
    }
}
