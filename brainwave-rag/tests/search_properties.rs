//! Property tests for vector index search.

use std::collections::HashMap;

use brainwave_rag::{Chunk, VectorIndex};
use proptest::prelude::*;

fn chunk(i: usize) -> Chunk {
    Chunk { text: format!("chunk {i}"), metadata: HashMap::new(), chunk_index: i }
}

fn index_from(vectors: Vec<Vec<f32>>) -> VectorIndex {
    let pairs = vectors.into_iter().enumerate().map(|(i, v)| (v, chunk(i))).collect();
    VectorIndex::build(pairs).unwrap()
}

fn vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, dim)
}

fn vectors(dim: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(vector(dim), 1..40)
}

proptest! {
    #[test]
    fn scores_are_descending(entries in vectors(8), query in vector(8), k in 1usize..50) {
        let index = index_from(entries);
        let results = index.search(&query, k).unwrap();
        for window in results.windows(2) {
            prop_assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn result_count_is_min_of_k_and_len(entries in vectors(8), query in vector(8), k in 1usize..50) {
        let len = entries.len();
        let index = index_from(entries);
        let results = index.search(&query, k).unwrap();
        prop_assert_eq!(results.len(), k.min(len));
    }

    #[test]
    fn exhaustive_search_returns_each_entry_once(entries in vectors(8), query in vector(8)) {
        let len = entries.len();
        let index = index_from(entries);
        let results = index.search(&query, len).unwrap();

        let mut indices: Vec<usize> = results.iter().map(|r| r.chunk.chunk_index).collect();
        indices.sort_unstable();
        let expected: Vec<usize> = (0..len).collect();
        prop_assert_eq!(indices, expected);
    }

    #[test]
    fn search_never_mutates_the_index(entries in vectors(8), query in vector(8)) {
        let len = entries.len();
        let index = index_from(entries);
        index.search(&query, 3).unwrap();
        index.search(&query, 3).unwrap();
        prop_assert_eq!(index.len(), len);
    }
}
