//! Resource router
//!
//! Holds route bindings in registration order and dispatches a request to
//! the first binding whose method and path pattern both match.

use hyper::Method;

use super::pattern::{Params, PathPattern};
use crate::error::ResourceError;

/// A registered (method, pattern, handler) triple
#[derive(Debug, Clone)]
pub struct RouteBinding<H> {
    pub method: Method,
    pub pattern: PathPattern,
    pub handler: H,
}

/// Result of a successful dispatch
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub handler: &'a H,
    pub params: Params,
    pub query: Params,
}

#[derive(Debug, Clone)]
pub struct Router<H> {
    bindings: Vec<RouteBinding<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    pub const fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a binding.
    ///
    /// A second binding with the same method and the same pattern shape is
    /// rejected here, so the conflict surfaces at startup instead of at request time.
    pub fn register(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), ResourceError> {
        let pattern = PathPattern::parse(pattern)?;
        if let Some(existing) = self
            .bindings
            .iter()
            .find(|b| b.method == method && b.pattern.same_shape(&pattern))
        {
            return Err(ResourceError::Configuration(format!(
                "duplicate route {method} {} (already bound as {})",
                pattern.as_str(),
                existing.pattern.as_str()
            )));
        }
        self.bindings.push(RouteBinding {
            method,
            pattern,
            handler,
        });
        Ok(())
    }

    /// Find the first binding matching `method` and `path`
    pub fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: Params,
    ) -> Result<RouteMatch<'_, H>, ResourceError> {
        self.bindings
            .iter()
            .filter(|b| b.method == *method)
            .find_map(|b| {
                b.pattern.matches(path).map(|params| RouteMatch {
                    handler: &b.handler,
                    params,
                    query: query.clone(),
                })
            })
            .ok_or_else(|| ResourceError::RouteNotFound {
                method: method.to_string(),
                path: path.to_string(),
            })
    }

    /// Methods with at least one binding matching `path`, in registration order
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = Vec::new();
        for binding in &self.bindings {
            if binding.pattern.matches(path).is_some() && !methods.contains(&binding.method) {
                methods.push(binding.method.clone());
            }
        }
        methods
    }

}
