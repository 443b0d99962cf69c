//! LeetCode list, study plan and tag providers.
//!
//! A link picks the provider by path segment; the provider's GraphQL payload
//! is then flattened into [`RawProblem`]s. Fetching the payload is the
//! caller's job.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::{ImportError, ImportSource, RawProblem};
use crate::metadata::Difficulty;

/// Which remote list a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// `/list/<slug>` favorite or problem list.
    List,
    /// `/studyplan/<slug>` study plan.
    StudyPlan,
    /// `/tag/<slug>` topic tag.
    Tag,
}

impl ProviderKind {
    /// Returns the URL path segment that selects this provider.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::StudyPlan => "studyplan",
            Self::Tag => "tag",
        }
    }

    /// Returns the import source recorded on problems from this provider.
    #[must_use]
    pub fn source(self) -> ImportSource {
        match self {
            Self::List => ImportSource::List,
            Self::StudyPlan => ImportSource::StudyPlan,
            Self::Tag => ImportSource::Tag,
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "list" => Some(Self::List),
            "studyplan" => Some(Self::StudyPlan),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }
}

/// A provider selected from an import link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderTarget {
    /// Provider kind.
    pub kind: ProviderKind,
    /// List, plan or tag slug following the kind segment.
    pub slug: String,
}

impl ProviderTarget {
    /// Detects the provider and its slug from an import link.
    ///
    /// Links without a scheme are read as `https://`.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidUrl`] when the link does not parse or has
    /// no `/list/`, `/studyplan/` or `/tag/` segment followed by a slug.
    pub fn from_url(raw: &str) -> Result<Self, ImportError> {
        let trimmed = raw.trim();
        let parsed = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{trimmed}"))
                .map_err(|e| ImportError::malformed_url(trimmed, &e.to_string()))?,
            Err(e) => return Err(ImportError::malformed_url(trimmed, &e.to_string())),
        };

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        segments
            .windows(2)
            .find_map(|pair| {
                ProviderKind::from_segment(pair[0]).map(|kind| Self {
                    kind,
                    slug: pair[1].to_string(),
                })
            })
            .inspect(|target| debug!(kind = target.kind.segment(), slug = %target.slug, "provider detected"))
            .ok_or_else(|| ImportError::unsupported_link(trimmed))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderQuestion {
    title: String,
    title_slug: String,
    #[serde(default)]
    difficulty: Option<String>,
}

/// Extracts problems from a provider's GraphQL response payload.
///
/// Expected shapes:
/// - list: `data.favoriteQuestionList.questions[]`
/// - study plan: `data.studyPlanV2Detail.planSubGroups[].questions[]`
/// - tag: `data.topicTag.questions[]`
///
/// A payload missing these fields yields an empty batch, which the merge step
/// reports as an empty import. Individual malformed questions are skipped.
///
/// # Errors
///
/// Returns [`ImportError::Upstream`] when the payload carries a non-empty
/// `errors` array.
#[instrument(skip(payload))]
pub fn extract_provider_problems(
    kind: ProviderKind,
    payload: &Value,
) -> Result<Vec<RawProblem>, ImportError> {
    if let Some(errors) = payload.get("errors").and_then(Value::as_array)
        && !errors.is_empty()
    {
        let message = errors
            .iter()
            .map(|e| e.get("message").and_then(Value::as_str).unwrap_or("unknown error"))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ImportError::Upstream {
            provider: kind.segment().to_string(),
            message,
        });
    }

    let data = payload.get("data");
    let questions: Vec<&Value> = match kind {
        ProviderKind::List => question_array(data.and_then(|d| d.get("favoriteQuestionList"))),
        ProviderKind::Tag => question_array(data.and_then(|d| d.get("topicTag"))),
        ProviderKind::StudyPlan => data
            .and_then(|d| d.get("studyPlanV2Detail"))
            .and_then(|plan| plan.get("planSubGroups"))
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .flat_map(|group| question_array(Some(group)))
                    .collect()
            })
            .unwrap_or_default(),
    };

    if questions.is_empty() {
        warn!(kind = kind.segment(), "provider payload has no questions");
    }

    let problems = questions
        .into_iter()
        .filter_map(|question| match ProviderQuestion::deserialize(question) {
            Ok(q) => Some(RawProblem::new(
                q.title,
                q.title_slug,
                q.difficulty.as_deref().and_then(provider_difficulty),
                kind.source(),
            )),
            Err(e) => {
                debug!(error = %e, "skipping malformed provider question");
                None
            }
        })
        .collect::<Vec<_>>();

    debug!(count = problems.len(), "provider problems extracted");
    Ok(problems)
}

fn question_array(container: Option<&Value>) -> Vec<&Value> {
    container
        .and_then(|c| c.get("questions"))
        .and_then(Value::as_array)
        .map(|questions| questions.iter().collect())
        .unwrap_or_default()
}

/// Providers report `EASY`/`Easy`; anything else is unknown.
fn provider_difficulty(label: &str) -> Option<Difficulty> {
    match label.trim().to_ascii_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "medium" => Some(Difficulty::Medium),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}
