//! Trigram similarity and similar-post ranking.
//!
//! `similarity` reproduces PostgreSQL `pg_trgm` scoring so the in-memory store
//! ranks search results the same way the database does.

use std::collections::BTreeSet;

use crate::domain::Post;

/// Minimum title similarity for a search hit.
pub const SEARCH_THRESHOLD: f64 = 0.1;

/// Maximum number of similar posts shown on a detail page.
pub const SIMILAR_POSTS_LIMIT: u64 = 4;

/// Distinct trigrams of `text`.
///
/// The text is lowercased and split into words on non-alphanumeric characters;
/// each word is padded with two leading spaces and one trailing space before
/// extracting every 3-character window.
pub fn trigrams(text: &str) -> BTreeSet<String> {
    let mut set = BTreeSet::new();

    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let padded: Vec<char> = "  "
            .chars()
            .chain(word.chars().flat_map(char::to_lowercase))
            .chain(std::iter::once(' '))
            .collect();

        for window in padded.windows(3) {
            set.insert(window.iter().collect());
        }
    }

    set
}

/// Jaccard index of the trigram sets of `a` and `b`, in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let left = trigrams(a);
    let right = trigrams(b);

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }

    let shared = left.intersection(&right).count();
    shared as f64 / union as f64
}

/// Rank `candidates` by how many tags they share with `source`.
///
/// Candidates sharing no tag, unpublished candidates, and `source` itself are
/// dropped. Ties on shared-tag count are broken by the newer publish time.
pub fn rank_similar<I>(source: &Post, candidates: I, limit: u64) -> Vec<Post>
where
    I: IntoIterator<Item = Post>,
{
    let mut ranked: Vec<(usize, Post)> = candidates
        .into_iter()
        .filter(|candidate| candidate.id != source.id && candidate.is_published())
        .map(|candidate| (source.shared_tag_count(&candidate), candidate))
        .filter(|(shared, _)| *shared > 0)
        .collect();

    ranked.sort_by(|(a_shared, a), (b_shared, b)| {
        b_shared.cmp(a_shared).then_with(|| b.publish.cmp(&a.publish))
    });

    ranked
        .into_iter()
        .take(limit as usize)
        .map(|(_, post)| post)
        .collect()
}
