// Copyright 2025 the Ideagraph Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locate branchable terms inside immutable idea text.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

/// A term occurrence inside a text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermSpan<'a> {
    /// Byte range of the occurrence in the text.
    pub range: Range<usize>,
    /// The matched term.
    pub term: &'a str,
}

/// Find non-overlapping occurrences of `terms` in `text`.
///
/// Matching is verbatim and case-sensitive. Spans are returned left to right; when two
/// terms start at the same byte the longer one wins. Terms that do not occur (including
/// empty ones) are skipped.
///
/// ```
/// use ideagraph_store::term_spans;
///
/// let terms = vec!["black hole".to_string(), "hole".to_string(), "absent".to_string()];
/// let spans = term_spans("a black hole and a hole", &terms);
/// let found: Vec<_> = spans.iter().map(|s| (s.range.clone(), s.term)).collect();
/// assert_eq!(found, vec![(2..12, "black hole"), (19..23, "hole")]);
/// ```
pub fn term_spans<'a>(text: &str, terms: &'a [String]) -> Vec<TermSpan<'a>> {
    let mut candidates: Vec<TermSpan<'a>> = terms
        .iter()
        .filter(|t| !t.is_empty())
        .flat_map(|term| {
            text.match_indices(term.as_str()).map(move |(start, _)| TermSpan {
                range: start..start + term.len(),
                term: term.as_str(),
            })
        })
        .collect();
    candidates.sort_by(|a, b| {
        a.range
            .start
            .cmp(&b.range.start)
            .then(b.range.len().cmp(&a.range.len()))
    });

    let mut out = Vec::new();
    let mut cursor = 0;
    for span in candidates {
        if span.range.start >= cursor {
            cursor = span.range.end;
            out.push(span);
        }
    }
    out
}
