//! Error types for the layout engine

use thiserror::Error;

/// Errors that can occur while instantiating a blueprint.
///
/// Every variant is an authoring mistake in the blueprint. Instantiation stops at the
/// first one and never returns a partial layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// A placement names a template the catalog does not know
    #[error("template '{template}' not found in device catalog{}", format_suggestions(.suggestions))]
    TemplateNotFound {
        template: String,
        suggestions: Vec<String>,
    },

    /// A placement or zone parent names an undeclared zone
    #[error("zone '{zone}' is not defined{}", format_suggestions(.suggestions))]
    ZoneNotFound {
        zone: String,
        suggestions: Vec<String>,
    },

    /// A relative position names neither an earlier node nor a zone
    #[error("unable to resolve relative position: reference '{reference}' was not found{}", format_suggestions(.suggestions))]
    ReferenceNotFound {
        reference: String,
        suggestions: Vec<String>,
    },

    /// Two zones share an id
    #[error("zone '{zone}' is declared more than once")]
    DuplicateZone { zone: String },

    /// Zone parents form a cycle
    #[error("circular zone nesting: {}", cycle.join(" -> "))]
    CircularZoneNesting { cycle: Vec<String> },

    /// A settings value is out of range
    #[error("invalid setting '{field}': {reason}")]
    InvalidSettings { field: String, reason: String },

    /// A zone's origin, padding or minimum size is not a usable number
    #[error("zone '{zone}' has an invalid {field}: {reason}")]
    InvalidZone {
        zone: String,
        field: String,
        reason: String,
    },

    /// A placement's coordinates, offsets or size are not usable numbers
    #[error("node '{node}' has an invalid {field}: {reason}")]
    InvalidPlacement {
        node: String,
        field: String,
        reason: String,
    },
}

impl LayoutError {
    pub fn template_not_found(template: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::TemplateNotFound {
            template: template.into(),
            suggestions,
        }
    }

    pub fn zone_not_found(zone: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::ZoneNotFound {
            zone: zone.into(),
            suggestions,
        }
    }

    pub fn reference_not_found(reference: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::ReferenceNotFound {
            reference: reference.into(),
            suggestions,
        }
    }

    pub fn invalid_settings(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_zone(
        zone: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidZone {
            zone: zone.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_placement(
        node: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidPlacement {
            node: node.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::TemplateNotFound { suggestions, .. }
            | Self::ZoneNotFound { suggestions, .. }
            | Self::ReferenceNotFound { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean {}?)", suggestions.join(", "))
    }
}

/// Compute Levenshtein edit distance between two strings
pub(crate) fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];

    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=n {
        dp[0][j] = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[m][n]
}

/// Find known ids within a maximum edit distance, closest first
pub(crate) fn find_similar<'a>(
    known: impl IntoIterator<Item = &'a str>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = known
        .into_iter()
        .filter_map(|name| {
            let dist = levenshtein_distance(name, target);
            (dist <= max_distance && dist > 0).then_some((dist, name))
        })
        .collect();

    candidates.sort_unstable();
    candidates.dedup();
    candidates
        .into_iter()
        .map(|(_, name)| name.to_string())
        .take(3)
        .collect()
}
