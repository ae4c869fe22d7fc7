//! Path pattern module
//!
//! Patterns are made of literal segments and named `:param` segments.
//! Matching compares segment by segment; captured values stay strings and
//! any numeric coercion is left to the handler.

use crate::error::ResourceError;

/// Ordered name/value pairs captured from a path or parsed from a query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value bound to `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// Parsed route pattern such as `/hotels/:id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, ResourceError> {
        let mut segments = Vec::new();
        for part in split_segments(pattern) {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(ResourceError::Configuration(format!(
                        "empty parameter name in route pattern '{pattern}'"
                    )));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(n) if n == name))
                {
                    return Err(ResourceError::Configuration(format!(
                        "parameter ':{name}' repeated in route pattern '{pattern}'"
                    )));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }
        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Match a request path, returning captured parameters
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts: Vec<&str> = split_segments(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map_or_else(|_| part.to_string(), |v| v.into_owned());
                    params.push(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Two patterns have the same shape when they accept exactly the same paths
    pub fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }
}

/// Split on `/`, ignoring empty segments so `/pokemon/` equals `/pokemon`
fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
