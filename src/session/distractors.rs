//! Builds multiple-choice questions out of raw vocabulary.

use rand::Rng;

use crate::models::{
    NUM_OPTIONS, QuestionId, QuestionKind, QuizQuestion, SYNTHETIC_ID_OFFSET, VocabularyItem,
    VocabularyPool,
};

use super::error::ConfigurationError;
use super::sampler::Sampler;

const NUM_DISTRACTORS: usize = NUM_OPTIONS - 1;

/// Smallest pool that can supply three distractors plus the answer.
pub const MIN_SYNTHESIS_POOL: usize = NUM_OPTIONS;

fn attribute(item: &VocabularyItem, kind: QuestionKind) -> &str {
    match kind {
        QuestionKind::Reading => &item.reading,
        _ => &item.meaning,
    }
}

fn other(kind: QuestionKind) -> QuestionKind {
    match kind {
        QuestionKind::Reading => QuestionKind::Meaning,
        _ => QuestionKind::Reading,
    }
}

/// Pick the tested attribute. Items whose reading is their written form
/// (pure kana) are always asked for the meaning.
fn choose_kind<R: Rng>(item: &VocabularyItem, sampler: &mut Sampler<R>) -> QuestionKind {
    if item.surface == item.reading {
        QuestionKind::Meaning
    } else if item.surface == item.meaning {
        QuestionKind::Reading
    } else if sampler.coin_flip() {
        QuestionKind::Meaning
    } else {
        QuestionKind::Reading
    }
}

/// Draw distinct distractor values for `kind`, walking the rest of the pool
/// in random order and skipping values equal to the answer or already drawn.
fn draw_distractors<R: Rng>(
    pool: &VocabularyPool,
    index: usize,
    kind: QuestionKind,
    correct: &str,
    sampler: &mut Sampler<R>,
) -> Option<[String; NUM_DISTRACTORS]> {
    let items = pool.items();
    let mut distractors: Vec<String> = Vec::with_capacity(NUM_DISTRACTORS);

    for candidate in sampler.shuffled_indices_except(items.len(), index) {
        let value = attribute(&items[candidate], kind);
        if value == correct || distractors.iter().any(|d| d == value) {
            continue;
        }
        distractors.push(value.to_string());
        if distractors.len() == NUM_DISTRACTORS {
            break;
        }
    }

    distractors.try_into().ok()
}

/// Build the question for `pool[index]`.
///
/// Falls back to the other attribute when the first choice cannot supply
/// three distinct distractors. An attribute equal to the prompt is never
/// asked, so the answer can never repeat the question.
pub(crate) fn synthesize<R: Rng>(
    pool: &VocabularyPool,
    index: usize,
    sampler: &mut Sampler<R>,
) -> Result<QuizQuestion, ConfigurationError> {
    let item = &pool.items()[index];
    let preferred = choose_kind(item, sampler);

    let kinds = [preferred, other(preferred)]
        .into_iter()
        .filter(|kind| attribute(item, *kind) != item.surface);

    for kind in kinds {
        let correct = attribute(item, kind);
        let Some(distractors) = draw_distractors(pool, index, kind, correct, sampler) else {
            log::debug!(
                "{:?} distractors exhausted for {}, trying next attribute",
                kind,
                item.surface
            );
            continue;
        };

        let [a, b, c] = distractors;
        let mut options = [correct.to_string(), a, b, c];
        sampler.shuffle(&mut options);

        return Ok(QuizQuestion::new(
            QuestionId::Synthesized(SYNTHETIC_ID_OFFSET + index),
            kind,
            item.surface.clone(),
            options,
            correct.to_string(),
            None,
        ));
    }

    Err(ConfigurationError::InsufficientDistinctOptions {
        prompt: item.surface.clone(),
    })
}
