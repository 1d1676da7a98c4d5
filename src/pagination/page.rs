//! # Page Size
//!
//! `max_items` semantics: omitted ⇒ server default, `0` ⇒ count only,
//! positive ⇒ that many items (clamped to the configured maximum),
//! negative or non-integer ⇒ rejected.

use super::errors::{PageError, PageResult};

/// What the client asked the list executor for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// `max_items=0`: only the total count, no items
    CountOnly,
    /// Up to this many items (always > 0)
    Items(usize),
}

impl PageRequest {
    /// Effective page size echoed into next-page links
    pub fn size(&self) -> usize {
        match self {
            PageRequest::CountOnly => 0,
            PageRequest::Items(n) => *n,
        }
    }
}

/// Page size limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_size: usize,
    pub max_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: 50,
            max_size: 300,
        }
    }
}

impl PageLimits {
    /// Resolve the raw `max_items` parameter
    pub fn resolve(&self, max_items: Option<&str>) -> PageResult<PageRequest> {
        let raw = match max_items {
            None => return Ok(PageRequest::Items(self.default_size.min(self.max_size))),
            Some(raw) => raw,
        };

        let requested: i64 = raw
            .trim()
            .parse()
            .map_err(|_| PageError::InvalidPageSize(raw.to_string()))?;

        match requested {
            n if n < 0 => Err(PageError::InvalidPageSize(raw.to_string())),
            0 => Ok(PageRequest::CountOnly),
            n => {
                let n = usize::try_from(n).unwrap_or(usize::MAX);
                Ok(PageRequest::Items(n.min(self.max_size)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> PageLimits {
        PageLimits {
            default_size: 10,
            max_size: 100,
        }
    }

    #[test]
    fn test_omitted_uses_default() {
        assert_eq!(limits().resolve(None), Ok(PageRequest::Items(10)));
    }

    #[test]
    fn test_zero_is_count_only() {
        assert_eq!(limits().resolve(Some("0")), Ok(PageRequest::CountOnly));
        assert_eq!(PageRequest::CountOnly.size(), 0);
    }

    #[test]
    fn test_positive() {
        assert_eq!(limits().resolve(Some("5")), Ok(PageRequest::Items(5)));
    }

    #[test]
    fn test_clamped_to_max() {
        assert_eq!(limits().resolve(Some("5000")), Ok(PageRequest::Items(100)));
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(
            limits().resolve(Some("-1")),
            Err(PageError::InvalidPageSize("-1".to_string()))
        );
    }

    #[test]
    fn test_non_integer_rejected() {
        assert!(limits().resolve(Some("ten")).is_err());
        assert!(limits().resolve(Some("1.5")).is_err());
        assert!(limits().resolve(Some("")).is_err());
    }
}
