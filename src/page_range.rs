use std::collections::BTreeSet;
use std::fmt::Write as _;

use thiserror::Error;

/// Cap on how many offending pages an [`PageRangeError::OutOfRange`] lists.
/// A term like "1-1000000000" must not enumerate a billion page numbers.
const MAX_REPORTED_PAGES: usize = 64;

/// A validated page selection for a document with a known page count.
///
/// Produced by [`PageSelection::parse`]. An empty or whitespace-only
/// expression means "no restriction" and selects the whole document; this
/// policy applies at every call site. An explicit selection holds zero-based
/// page indices, deduplicated and sorted ascending, each strictly below the
/// page count it was validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Whole document (empty expression).
    All,
    /// Explicit zero-based indices, ascending and unique.
    Indices(Vec<u32>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageRangeError {
    /// A term could not be read as an integer or `start-end` pair.
    /// Takes priority over out-of-range problems and aborts validation.
    #[error("Invalid page format. Use format like: 1-3,5,7")]
    Malformed { term: String },

    /// One or more 1-based page numbers fall outside `[1, page_count]`,
    /// or a range runs backwards. Aggregated across all terms so the
    /// caller can report every problem at once.
    #[error("Pages {} do not exist. PDF has only {page_count} pages.", join_pages(.pages))]
    OutOfRange { pages: Vec<u64>, page_count: u32 },
}

fn join_pages(pages: &[u64]) -> String {
    let mut out = String::new();
    for (i, p) in pages.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{p}");
    }
    out
}

impl PageSelection {
    /// Parse a page-range expression like `"1-3,5,7"` against a document of
    /// `page_count` pages.
    ///
    /// Terms are comma-separated; each is a single 1-based page number or an
    /// inclusive `start-end` pair. `start == end` selects one page,
    /// overlapping terms are merged, and a reversed range is an error rather
    /// than being silently flipped. Returns [`PageSelection::All`] for an
    /// empty or whitespace-only expression.
    pub fn parse(expr: &str, page_count: u32) -> Result<Self, PageRangeError> {
        if expr.trim().is_empty() {
            return Ok(PageSelection::All);
        }

        let mut indices: BTreeSet<u32> = BTreeSet::new();
        let mut bad: BTreeSet<u64> = BTreeSet::new();
        let limit = u64::from(page_count);

        for term in expr.split(',') {
            let term = term.trim();
            match parse_term(term)? {
                Term::Single(page) => {
                    if page < 1 || page > limit {
                        insert_bad(&mut bad, page);
                    } else {
                        indices.insert((page - 1) as u32);
                    }
                }
                Term::Range(start, end) => {
                    if start > end {
                        // Reversed: report both endpoints, never reorder.
                        insert_bad(&mut bad, start);
                        insert_bad(&mut bad, end);
                        continue;
                    }
                    if start < 1 {
                        insert_bad(&mut bad, start);
                    }
                    // Offending high pages are contiguous; walk only them.
                    let mut p = start.max(limit + 1);
                    while p <= end && bad.len() < MAX_REPORTED_PAGES {
                        insert_bad(&mut bad, p);
                        if p == end {
                            break;
                        }
                        p += 1;
                    }
                    if bad.is_empty() {
                        for page in start.max(1)..=end.min(limit) {
                            indices.insert((page - 1) as u32);
                        }
                    }
                }
            }
        }

        if !bad.is_empty() {
            return Err(PageRangeError::OutOfRange {
                pages: bad.into_iter().collect(),
                page_count,
            });
        }

        Ok(PageSelection::Indices(indices.into_iter().collect()))
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PageSelection::All)
    }

    /// Resolve to concrete zero-based indices for a document of
    /// `page_count` pages.
    pub fn indices(&self, page_count: u32) -> Vec<u32> {
        match self {
            PageSelection::All => (0..page_count).collect(),
            PageSelection::Indices(indices) => indices.clone(),
        }
    }

    /// Number of selected pages.
    pub fn len(&self, page_count: u32) -> usize {
        match self {
            PageSelection::All => page_count as usize,
            PageSelection::Indices(indices) => indices.len(),
        }
    }
}

enum Term {
    Single(u64),
    Range(u64, u64),
}

fn parse_term(term: &str) -> Result<Term, PageRangeError> {
    let malformed = || PageRangeError::Malformed {
        term: term.to_string(),
    };

    if let Some((start, end)) = term.split_once('-') {
        // "1-2-3" leaves a '-' in the tail and fails the number parse below.
        let start = start.trim().parse::<u64>().map_err(|_| malformed())?;
        let end = end.trim().parse::<u64>().map_err(|_| malformed())?;
        Ok(Term::Range(start, end))
    } else {
        let page = term.trim().parse::<u64>().map_err(|_| malformed())?;
        Ok(Term::Single(page))
    }
}

fn insert_bad(bad: &mut BTreeSet<u64>, page: u64) {
    if bad.len() < MAX_REPORTED_PAGES {
        bad.insert(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(expr: &str, page_count: u32) -> Vec<u32> {
        match PageSelection::parse(expr, page_count).unwrap() {
            PageSelection::Indices(v) => v,
            PageSelection::All => panic!("expected explicit selection for {expr:?}"),
        }
    }

    #[test]
    fn test_single_page() {
        assert_eq!(indices("5", 10), vec![4]);
    }

    #[test]
    fn test_mixed_expression() {
        assert_eq!(indices("1-3,5,7", 10), vec![0, 1, 2, 4, 6]);
    }

    #[test]
    fn test_range_with_equal_bounds() {
        assert_eq!(indices("3-3", 10), vec![2]);
    }

    #[test]
    fn test_overlap_merged() {
        assert_eq!(indices("1-3,2-4", 5), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_input_order_irrelevant() {
        assert_eq!(indices("7,1-3,5", 10), vec![0, 1, 2, 4, 6]);
        assert_eq!(indices("5,5,5", 10), vec![4]);
    }

    #[test]
    fn test_whitespace_tolerated() {
        assert_eq!(indices(" 1 - 3 , 5 ", 10), vec![0, 1, 2, 4]);
    }

    #[test]
    fn test_empty_means_all() {
        assert_eq!(PageSelection::parse("", 10), Ok(PageSelection::All));
        assert_eq!(PageSelection::parse("   ", 10), Ok(PageSelection::All));
        assert_eq!(PageSelection::All.indices(3), vec![0, 1, 2]);
    }

    #[test]
    fn test_reversed_range_rejected() {
        let err = PageSelection::parse("5-2", 10).unwrap_err();
        assert_eq!(
            err,
            PageRangeError::OutOfRange {
                pages: vec![2, 5],
                page_count: 10,
            }
        );
    }

    #[test]
    fn test_zero_page_rejected() {
        let err = PageSelection::parse("0", 5).unwrap_err();
        assert_eq!(
            err,
            PageRangeError::OutOfRange {
                pages: vec![0],
                page_count: 5,
            }
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = PageSelection::parse("11", 10).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Pages 11 do not exist. PDF has only 10 pages."
        );
    }

    #[test]
    fn test_out_of_range_aggregated_across_terms() {
        let err = PageSelection::parse("2,8-12,15", 10).unwrap_err();
        assert_eq!(
            err,
            PageRangeError::OutOfRange {
                pages: vec![11, 12, 15],
                page_count: 10,
            }
        );
        assert_eq!(
            err.to_string(),
            "Pages 11, 12, 15 do not exist. PDF has only 10 pages."
        );
    }

    #[test]
    fn test_malformed_term() {
        let err = PageSelection::parse("abc", 5).unwrap_err();
        assert_eq!(
            err,
            PageRangeError::Malformed {
                term: "abc".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid page format. Use format like: 1-3,5,7"
        );
    }

    #[test]
    fn test_malformed_takes_priority() {
        // "99" is out of range, but the malformed term aborts first.
        let err = PageSelection::parse("99,x", 5).unwrap_err();
        assert!(matches!(err, PageRangeError::Malformed { .. }));
    }

    #[test]
    fn test_negative_is_malformed() {
        // "-1" splits into an empty start, which is not an integer.
        assert!(matches!(
            PageSelection::parse("-1", 5),
            Err(PageRangeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_empty_term_is_malformed() {
        assert!(matches!(
            PageSelection::parse("1,,3", 5),
            Err(PageRangeError::Malformed { .. })
        ));
        assert!(matches!(
            PageSelection::parse("1,3,", 5),
            Err(PageRangeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_extra_hyphen_is_malformed() {
        assert!(matches!(
            PageSelection::parse("1-2-3", 10),
            Err(PageRangeError::Malformed { .. })
        ));
    }

    #[test]
    fn test_huge_range_report_is_capped() {
        let err = PageSelection::parse("1-1000000000", 10).unwrap_err();
        match err {
            PageRangeError::OutOfRange { pages, page_count } => {
                assert_eq!(page_count, 10);
                assert_eq!(pages.len(), MAX_REPORTED_PAGES);
                assert_eq!(pages[0], 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_indices_within_bounds_and_sorted() {
        let got = indices("10,1-4,7-8,2", 10);
        assert!(got.windows(2).all(|w| w[0] < w[1]));
        assert!(got.iter().all(|&i| i < 10));
    }
}
