use proposal_common::{GenerationContext, SearchResult, TEXT_RESULT_LIMIT};

/// Fold search results into the grounding blob, in input order. Only the
/// first `TEXT_RESULT_LIMIT` results are used; no results gives an empty context.
pub fn build_context(results: &[SearchResult]) -> GenerationContext {
    let text: String = results
        .iter()
        .take(TEXT_RESULT_LIMIT)
        .map(SearchResult::context_entry)
        .collect();
    GenerationContext::new(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(n: usize) -> SearchResult {
        SearchResult {
            title: format!("title {n}"),
            snippet: format!("snippet {n}"),
            url: format!("https://example.jp/{n}"),
        }
    }

    #[test]
    fn empty_results_give_empty_context() {
        assert_eq!(build_context(&[]).as_str(), "");
    }

    #[test]
    fn concatenation_preserves_order() {
        let (a, b) = (result(1), result(2));
        let ctx = build_context(&[a.clone(), b.clone()]);
        assert_eq!(ctx.as_str(), format!("{}{}", a.context_entry(), b.context_entry()));
        assert!(ctx.as_str().starts_with("Title: title 1\nSnippet: snippet 1\nURL: https://example.jp/1\n\n"));
    }

    #[test]
    fn building_twice_gives_the_same_blob() {
        let results: Vec<_> = (0..3).map(result).collect();
        assert_eq!(build_context(&results), build_context(&results));
    }

    #[test]
    fn caps_at_five_entries() {
        let results: Vec<_> = (0..8).map(result).collect();
        let ctx = build_context(&results);
        assert_eq!(ctx.as_str().matches("Title: ").count(), 5);
        assert!(!ctx.as_str().contains("title 5"));
    }
}
