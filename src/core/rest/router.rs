//! Path → resource route matching

use crate::utils::error::{ApiError, Result};

/// A matched resource route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/{collection}`
    Collection { name: &'a str },
    /// `/{collection}/{id}`
    Member { name: &'a str, id: &'a str },
}

impl<'a> Route<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Route::Collection { name } | Route::Member { name, .. } => name,
        }
    }

    pub fn id(&self) -> Option<&'a str> {
        match self {
            Route::Collection { .. } => None,
            Route::Member { id, .. } => Some(id),
        }
    }
}

/// Match `path` below `prefix` (normalized, e.g. `/api` or `""`)
pub fn match_route<'a>(prefix: &str, path: &'a str) -> Result<Route<'a>> {
    let not_found = || ApiError::not_found(format!("No route for {}", path));

    let rest = path.strip_prefix(prefix).ok_or_else(not_found)?;
    if !prefix.is_empty() && !rest.is_empty() && !rest.starts_with('/') {
        return Err(not_found());
    }

    let mut segments = rest.trim_matches('/').split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next(), segments.next()) {
        (Some(name), None, None) => Ok(Route::Collection { name }),
        (Some(name), Some(id), None) => Ok(Route::Member { name, id }),
        _ => Err(not_found()),
    }
}
