//! Content extraction via the Parallel `/extract` endpoint.

use std::collections::HashMap;

use parallel_async::types::{ExtractErrorEntry, ExtractRequest, ExtractedPage};
use toolbox_core::ToolError;
use url::Url;

use crate::ParallelTools;
use crate::remote::map_remote_error;
use crate::types::{ExtractEntry, ExtractFailure, ExtractInput, ExtractOutput};

/// Extract content for every input URL in one request.
///
/// Per-URL failures never fail the call: they are reported on the matching
/// entry. Output order and length follow `input.urls`.
///
/// # Errors
/// `InvalidInput` before any request when the input is unusable;
/// `AuthenticationFailure` or `RemoteUnavailable` when the API call fails.
pub async fn parallel_extract(
    tools: &ParallelTools,
    input: ExtractInput,
) -> Result<ExtractOutput, ToolError> {
    validate(&input)?;

    let checked: Vec<Result<String, ExtractFailure>> =
        input.urls.iter().map(|u| check_url(u)).collect();

    let mut to_send: Vec<String> = Vec::new();
    for url in checked.iter().flatten() {
        if !to_send.contains(url) {
            to_send.push(url.clone());
        }
    }

    if to_send.is_empty() {
        tracing::debug!(urls = input.urls.len(), "no valid URLs, skipping request");
        return Ok(assemble(&input, &checked, None, &[], &[]));
    }

    let mut req = ExtractRequest::new(to_send.clone())
        .with_excerpts(input.excerpts)
        .with_full_content(input.full_content);
    if let Some(obj) = input.objective.as_deref().map(str::trim)
        && !obj.is_empty()
    {
        req = req.with_objective(obj);
    }

    let resp = tools.client.extract().create(&req).await.map_err(|e| {
        map_remote_error("Parallel extract", &format!("URLs {to_send:?}"), &e)
    })?;

    Ok(assemble(
        &input,
        &checked,
        resp.extract_id,
        &resp.results,
        &resp.errors,
    ))
}

fn validate(input: &ExtractInput) -> Result<(), ToolError> {
    if input.urls.is_empty() {
        return Err(ToolError::invalid_input("urls must contain at least one URL"));
    }
    if !input.excerpts && !input.full_content {
        return Err(ToolError::invalid_input(
            "at least one of excerpts or full_content must be true",
        ));
    }
    Ok(())
}

/// Accept absolute `http`/`https` URLs, returning the trimmed form to send.
fn check_url(raw: &str) -> Result<String, ExtractFailure> {
    let trimmed = raw.trim();
    let invalid = |message: String| ExtractFailure {
        kind: "invalid_url".into(),
        message,
        status_code: None,
    };
    let parsed = Url::parse(trimmed).map_err(|e| invalid(format!("not a valid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(trimmed.to_string()),
        "http" | "https" => Err(invalid("URL has no host".into())),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

/// Comparison key for URLs: parsed form without fragment or trailing slash.
fn normalize(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    url.set_fragment(None);
    Some(url.as_str().trim_end_matches('/').to_string())
}

/// Lookup by exact URL first, then by normalized URL.
struct UrlIndex<'a, T> {
    exact: HashMap<&'a str, &'a T>,
    normalized: HashMap<String, &'a T>,
}

impl<'a, T> UrlIndex<'a, T> {
    fn build(items: &'a [T], url_of: impl Fn(&T) -> &str) -> Self {
        let mut exact = HashMap::new();
        let mut normalized = HashMap::new();
        for item in items {
            let url = url_of(item);
            exact.entry(url).or_insert(item);
            if let Some(key) = normalize(url) {
                normalized.entry(key).or_insert(item);
            }
        }
        Self { exact, normalized }
    }

    fn find(&self, url: &str) -> Option<&'a T> {
        self.exact
            .get(url)
            .copied()
            .or_else(|| self.normalized.get(&normalize(url)?).copied())
    }
}

fn assemble(
    input: &ExtractInput,
    checked: &[Result<String, ExtractFailure>],
    extract_id: Option<String>,
    pages: &[ExtractedPage],
    errors: &[ExtractErrorEntry],
) -> ExtractOutput {
    let pages = UrlIndex::build(pages, |p| p.url.as_str());
    let errors = UrlIndex::build(errors, |e| e.url.as_str());

    let results: Vec<ExtractEntry> = input
        .urls
        .iter()
        .zip(checked)
        .map(|(raw, check)| match check {
            Err(failure) => failed_entry(raw, failure.clone()),
            Ok(url) => {
                if let Some(page) = pages.find(url) {
                    page_entry(raw, page, input)
                } else if let Some(err) = errors.find(url) {
                    failed_entry(raw, remote_failure(err))
                } else {
                    failed_entry(
                        raw,
                        ExtractFailure {
                            kind: "missing".into(),
                            message: "no result returned for this URL".into(),
                            status_code: None,
                        },
                    )
                }
            }
        })
        .collect();

    let failed = results.iter().filter(|e| e.error.is_some()).count();
    ExtractOutput {
        extract_id,
        results,
        failed,
    }
}

fn page_entry(url: &str, page: &ExtractedPage, input: &ExtractInput) -> ExtractEntry {
    ExtractEntry {
        url: url.to_string(),
        title: page.title.clone(),
        publish_date: page.publish_date.clone(),
        excerpts: if input.excerpts {
            Some(page.excerpts.clone().unwrap_or_default())
        } else {
            None
        },
        full_content: if input.full_content {
            page.full_content.clone()
        } else {
            None
        },
        error: None,
    }
}

fn failed_entry(url: &str, failure: ExtractFailure) -> ExtractEntry {
    ExtractEntry {
        url: url.to_string(),
        title: None,
        publish_date: None,
        excerpts: None,
        full_content: None,
        error: Some(failure),
    }
}

fn remote_failure(err: &ExtractErrorEntry) -> ExtractFailure {
    ExtractFailure {
        kind: err
            .error_type
            .clone()
            .unwrap_or_else(|| "fetch_error".into()),
        message: err
            .content
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "extraction failed".into()),
        status_code: err.http_status_code,
    }
}
