//! Web search via the Parallel `/search` endpoint.

use std::collections::HashMap;

use parallel_async::types::{SearchEntry, SearchRequest, WebResult};
use toolbox_core::ToolError;
use toolbox_core::fmt::truncate_chars;

use crate::ParallelTools;
use crate::remote::map_remote_error;
use crate::types::{SearchGroup, SearchHit, SearchInput, SearchOutput};

/// Run one batch search and shape the result into one group per query.
///
/// # Errors
/// `InvalidInput` before any request when the input is out of range;
/// `AuthenticationFailure` or `RemoteUnavailable` when the API call fails.
pub async fn parallel_search(
    tools: &ParallelTools,
    input: SearchInput,
) -> Result<SearchOutput, ToolError> {
    validate(&input)?;

    let req = SearchRequest::new(input.queries.clone())
        .with_objective(objective_for(&input))
        .with_max_results(input.max_results)
        .with_max_chars_per_result(input.max_chars_per_result);

    let resp = tools.client.search().create(&req).await.map_err(|e| {
        map_remote_error("Parallel search", &format!("queries {:?}", input.queries), &e)
    })?;

    let groups = shape_groups(
        &input.queries,
        resp.results,
        input.max_results as usize,
        input.max_chars_per_result as usize,
    );

    tracing::debug!(
        search_id = resp.search_id.as_deref().unwrap_or("-"),
        groups = groups.len(),
        "search shaped"
    );

    Ok(SearchOutput {
        search_id: resp.search_id,
        groups,
    })
}

fn validate(input: &SearchInput) -> Result<(), ToolError> {
    if input.queries.is_empty() {
        return Err(ToolError::invalid_input("queries must contain at least one query"));
    }
    if let Some(i) = input.queries.iter().position(|q| q.trim().is_empty()) {
        return Err(ToolError::invalid_input(format!("queries[{i}] is blank")));
    }
    if input.max_results == 0 {
        return Err(ToolError::invalid_input("max_results must be greater than 0"));
    }
    if input.max_chars_per_result == 0 {
        return Err(ToolError::invalid_input(
            "max_chars_per_result must be greater than 0",
        ));
    }
    Ok(())
}

/// The caller's objective, or one derived from the queries when absent.
fn objective_for(input: &SearchInput) -> String {
    match input.objective.as_deref().map(str::trim) {
        Some(obj) if !obj.is_empty() => obj.to_string(),
        _ => format!(
            "Find relevant information for: {}",
            input.queries.join(", ")
        ),
    }
}

/// Build one group per input query, in input order.
///
/// Grouped entries go to the query with the same text. Flat entries rank the
/// whole batch, so every query without a group of its own gets all of them.
fn shape_groups(
    queries: &[String],
    entries: Vec<SearchEntry>,
    max_results: usize,
    max_chars: usize,
) -> Vec<SearchGroup> {
    let mut grouped: HashMap<String, Vec<WebResult>> = HashMap::new();
    let mut flat = Vec::new();
    for entry in entries {
        match entry {
            SearchEntry::Group(g) => grouped.entry(g.query).or_default().extend(g.results),
            SearchEntry::Page(p) => flat.push(p),
        }
    }

    queries
        .iter()
        .map(|query| {
            let pages = grouped
                .get(query)
                .or_else(|| grouped.get(query.trim()))
                .unwrap_or(&flat);
            let results: Vec<SearchHit> = pages
                .iter()
                .take(max_results)
                .map(|page| to_hit(page, max_chars))
                .collect();
            SearchGroup {
                query: query.clone(),
                total_results: results.len(),
                results,
            }
        })
        .collect()
}

fn to_hit(page: &WebResult, max_chars: usize) -> SearchHit {
    SearchHit {
        title: page.title.clone(),
        url: page.url.clone(),
        publish_date: page.publish_date.clone(),
        source: page.source.clone(),
        excerpts: clamp_excerpts(page.passages(), max_chars),
    }
}

/// Keep passages in order until their combined length reaches `max_chars`,
/// cutting the last one short when needed.
fn clamp_excerpts(passages: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut remaining = max_chars;
    let mut out = Vec::new();
    for passage in passages {
        if remaining == 0 {
            break;
        }
        let len = passage.chars().count();
        if len <= remaining {
            remaining -= len;
            out.push(passage);
        } else {
            out.push(truncate_chars(&passage, remaining).to_string());
            remaining = 0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallel_async::types::QueryGroup;

    fn page(url: &str, excerpts: &[&str]) -> WebResult {
        WebResult {
            url: Some(url.into()),
            title: Some(format!("title of {url}")),
            excerpts: Some(excerpts.iter().map(|s| (*s).to_string()).collect()),
            ..Default::default()
        }
    }

    fn queries(qs: &[&str]) -> Vec<String> {
        qs.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn validate_rejects_empty_and_blank_queries() {
        let err = validate(&SearchInput::new(Vec::<String>::new())).unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput(_)));

        let err = validate(&SearchInput::new(["rust", "  "])).unwrap_err();
        assert!(err.to_string().contains("queries[1]"));
    }

    #[test]
    fn validate_rejects_zero_bounds() {
        let mut input = SearchInput::new(["rust"]);
        input.max_results = 0;
        assert!(validate(&input).is_err());

        let mut input = SearchInput::new(["rust"]);
        input.max_chars_per_result = 0;
        assert!(validate(&input).is_err());

        assert!(validate(&SearchInput::new(["rust"])).is_ok());
    }

    #[test]
    fn objective_defaults_from_queries() {
        let input = SearchInput::new(["rust", "tokio"]);
        assert_eq!(
            objective_for(&input),
            "Find relevant information for: rust, tokio"
        );

        let mut input = SearchInput::new(["rust"]);
        input.objective = Some("   ".into());
        assert_eq!(objective_for(&input), "Find relevant information for: rust");

        input.objective = Some("learn rust".into());
        assert_eq!(objective_for(&input), "learn rust");
    }

    #[test]
    fn flat_results_fill_every_group() {
        let entries = vec![
            SearchEntry::Page(page("https://a.example", &["a"])),
            SearchEntry::Page(page("https://b.example", &["b"])),
            SearchEntry::Page(page("https://c.example", &["c"])),
        ];
        let groups = shape_groups(&queries(&["q1", "q2"]), entries, 2, 100);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].query, "q1");
        assert_eq!(groups[1].query, "q2");
        for g in &groups {
            assert_eq!(g.total_results, 2);
            assert_eq!(g.results[0].url.as_deref(), Some("https://a.example"));
        }
    }

    #[test]
    fn grouped_results_match_by_query() {
        let entries = vec![
            SearchEntry::Group(QueryGroup {
                query: "q2".into(),
                results: vec![page("https://two.example", &["2"])],
            }),
            SearchEntry::Group(QueryGroup {
                query: "q1".into(),
                results: vec![page("https://one.example", &["1"])],
            }),
        ];
        let groups = shape_groups(&queries(&["q1", "q2", "q3"]), entries, 10, 100);

        assert_eq!(groups[0].results[0].url.as_deref(), Some("https://one.example"));
        assert_eq!(groups[1].results[0].url.as_deref(), Some("https://two.example"));
        assert!(groups[2].results.is_empty());
        assert_eq!(groups[2].total_results, 0);
    }

    #[test]
    fn empty_response_yields_empty_groups() {
        let groups = shape_groups(&queries(&["q1", "q2"]), vec![], 10, 100);
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.results.is_empty()));
    }

    #[test]
    fn clamp_cuts_combined_excerpts() {
        let out = clamp_excerpts(vec!["abcd".into(), "efgh".into(), "ijkl".into()], 6);
        assert_eq!(out, vec!["abcd".to_string(), "ef".to_string()]);
        assert_eq!(out.iter().map(|e| e.chars().count()).sum::<usize>(), 6);
    }

    #[test]
    fn clamp_keeps_short_excerpts_whole() {
        let out = clamp_excerpts(vec!["ab".into(), "cd".into()], 10);
        assert_eq!(out, vec!["ab".to_string(), "cd".to_string()]);
    }

    #[test]
    fn clamp_counts_characters_not_bytes() {
        let out = clamp_excerpts(vec!["你好世界".into()], 3);
        assert_eq!(out, vec!["你好世".to_string()]);
    }
}
