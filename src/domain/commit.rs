use git2::Oid;
use regex::Regex;
use std::sync::OnceLock;

/// Read-only view of a single commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRef {
    pub id: Oid,
    pub message: String,
    /// Parent ids in recorded order (first parent first)
    pub parents: Vec<Oid>,
}

impl CommitRef {
    pub fn new(id: Oid, message: impl Into<String>, parents: Vec<Oid>) -> Self {
        CommitRef {
            id,
            message: message.into(),
            parents,
        }
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Abbreviated commit id usable as a semver identifier.
///
/// A hex prefix made only of digits would be read as a numeric identifier (and is
/// illegal with a leading zero), so such ids get a `g` prefix as `git describe` does.
pub fn short_id(id: Oid, length: usize) -> String {
    let hex = id.to_string();
    let short = &hex[..length.clamp(1, hex.len())];

    if short.chars().all(|c| c.is_ascii_digit()) {
        format!("g{}", short)
    } else {
        short.to_string()
    }
}

fn header_regex() -> Option<&'static Regex> {
    static HEADER: OnceLock<Option<Regex>> = OnceLock::new();
    HEADER
        .get_or_init(|| {
            Regex::new(r"^(?P<type>[A-Za-z][A-Za-z0-9_-]*)(?:\((?P<scope>[^()\r\n]*)\))?(?P<bang>!)?:\s*(?P<description>.*)$").ok()
        })
        .as_ref()
}

/// Conventional-commit reading of a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    /// Lower-cased type, `None` for messages without a conventional header
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub description: String,
    /// `!` marker in the header
    pub has_breaking_marker: bool,
    /// Footer tokens (text before the first `:` of each footer line) in order
    pub footers: Vec<String>,
}

impl ParsedCommit {
    /// Parse a commit message according to the conventional commits layout
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    /// - non-conventional text
    pub fn parse(message: &str) -> Self {
        let header = message.lines().next().unwrap_or("").trim();
        let footers = parse_footers(message);

        match header_regex().and_then(|re| re.captures(header)) {
            Some(captures) => ParsedCommit {
                r#type: captures
                    .name("type")
                    .map(|m| m.as_str().to_ascii_lowercase()),
                scope: captures
                    .name("scope")
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty()),
                description: captures
                    .name("description")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                has_breaking_marker: captures.name("bang").is_some(),
                footers,
            },
            None => ParsedCommit {
                r#type: None,
                scope: None,
                description: header.to_string(),
                has_breaking_marker: false,
                footers,
            },
        }
    }

    /// Whether any footer token matches one of `tokens` exactly
    pub fn has_footer(&self, tokens: &[String]) -> bool {
        self.footers
            .iter()
            .any(|footer| tokens.iter().any(|token| footer == token))
    }
}

/// Footer tokens from every line after the header. A footer is `Token: value`
/// or `Token #value`; only the token is kept.
fn parse_footers(message: &str) -> Vec<String> {
    message
        .lines()
        .skip(1)
        .filter_map(|line| {
            let line = line.trim_end();
            let end = line
                .find(": ")
                .or_else(|| line.find(" #"))
                .or_else(|| line.strip_suffix(':').map(str::len))?;
            let token = &line[..end];
            let well_formed = !token.is_empty()
                && (token == "BREAKING CHANGE"
                    || token.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
            well_formed.then(|| token.to_string())
        })
        .collect()
}
