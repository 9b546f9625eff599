//! Page window and sort descriptor primitives shared by backend endpoints.
//!
//! Endpoints that return collections accept `page`, `size`, and `sort`
//! query parameters. This crate owns the validated value types for those
//! parameters so every endpoint parses and bounds them the same way:
//!
//! - [`PageRequest`] — a zero-based page window with a bounded size.
//! - [`Sort`] — a sort key plus [`SortDirection`], parsed from the
//!   `key,direction` wire form.
//! - [`window`] — applies a [`PageRequest`] to an ordered sequence.
//!
//! The sort key type is generic: each endpoint supplies its own `FromStr`
//! enum of permitted keys, so unknown keys are rejected at the boundary
//! rather than silently ignored.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Page size applied when the client omits the `size` parameter.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on the `size` parameter.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised while validating page parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The client asked for an empty page.
    #[error("page size must be at least 1")]
    ZeroSize,
    /// The client asked for more rows than a single page may carry.
    #[error("page size must not exceed {max}")]
    SizeTooLarge {
        /// The configured maximum page size.
        max: u32,
    },
}

/// A zero-based page window.
///
/// Invariant: `1 <= size <= MAX_PAGE_SIZE`. Construction goes through
/// [`PageRequest::new`] so the invariant cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and construct a page window.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `size` is zero or exceeds
    /// [`MAX_PAGE_SIZE`].
    pub fn new(page: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, size })
    }

    /// Build a window from optional query parameters, applying defaults.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when an explicit `size` is out of
    /// bounds.
    pub fn from_params(page: Option<u32>, size: Option<u32>) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(0), size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// The first page at the default size.
    #[must_use]
    pub fn first() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Zero-based page index.
    #[must_use]
    pub fn page(self) -> u32 {
        self.page
    }

    /// Number of rows per page.
    #[must_use]
    pub fn size(self) -> u32 {
        self.size
    }

    /// Number of rows preceding this window.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Errors raised while parsing the `sort` query parameter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortParseError {
    /// The sort key segment was empty.
    #[error("sort key must not be empty")]
    EmptyKey,
    /// The sort key is not one of the endpoint's permitted keys.
    #[error("unknown sort key: {value}")]
    UnknownKey {
        /// The rejected key segment.
        value: String,
    },
    /// The direction segment was neither `asc` nor `desc`.
    #[error("sort direction must be asc or desc, got: {value}")]
    UnknownDirection {
        /// The rejected direction segment.
        value: String,
    },
    /// More than two comma-separated segments were supplied.
    #[error("sort accepts at most a key and a direction")]
    TrailingSegments,
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first.
    Ascending,
    /// Largest value first.
    Descending,
}

impl SortDirection {
    /// Flip an ordering produced for ascending comparison.
    #[must_use]
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else {
            Err(SortParseError::UnknownDirection {
                value: s.to_owned(),
            })
        }
    }
}

/// A sort descriptor: key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<K> {
    key: K,
    direction: SortDirection,
}

impl<K> Sort<K> {
    /// Ascending sort on `key`.
    pub fn by(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    /// Descending sort on `key`.
    pub fn descending(key: K) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// The sort key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The sort direction.
    pub fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl<K: FromStr> Sort<K> {
    /// Parse the `key[,direction]` wire form.
    ///
    /// A missing direction defaults to ascending, matching the common
    /// `sort=amount` shorthand.
    ///
    /// # Errors
    /// Returns [`SortParseError`] when the key is empty or unknown, the
    /// direction is unknown, or extra segments trail the direction.
    pub fn parse(raw: &str) -> Result<Self, SortParseError> {
        let mut segments = raw.split(',');

        let key_raw = segments.next().unwrap_or_default().trim();
        if key_raw.is_empty() {
            return Err(SortParseError::EmptyKey);
        }
        let key = K::from_str(key_raw).map_err(|_| SortParseError::UnknownKey {
            value: key_raw.to_owned(),
        })?;

        let direction = match segments.next() {
            None => SortDirection::Ascending,
            Some(direction_raw) => SortDirection::from_str(direction_raw.trim())?,
        };

        if segments.next().is_some() {
            return Err(SortParseError::TrailingSegments);
        }

        Ok(Self { key, direction })
    }
}

/// Slice an ordered sequence down to the requested page window.
///
/// Windows past the end of the sequence yield an empty vector rather than
/// an error, so clients can walk pages until one comes back empty.
pub fn window<T>(items: impl IntoIterator<Item = T>, page: PageRequest) -> Vec<T> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let size = usize::try_from(page.size()).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(size).collect()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this crate.

    use rstest::rstest;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Key {
        Id,
        Amount,
    }

    impl FromStr for Key {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "id" => Ok(Self::Id),
                "amount" => Ok(Self::Amount),
                _ => Err(()),
            }
        }
    }

    #[rstest]
    #[case(0, 1)]
    #[case(7, MAX_PAGE_SIZE)]
    fn accepts_in_bound_sizes(#[case] page: u32, #[case] size: u32) {
        let request = PageRequest::new(page, size).expect("in-bound size");
        assert_eq!(request.page(), page);
        assert_eq!(request.size(), size);
    }

    #[rstest]
    fn rejects_zero_size() {
        assert_eq!(PageRequest::new(0, 0), Err(PageRequestError::ZeroSize));
    }

    #[rstest]
    fn rejects_oversized_pages() {
        assert_eq!(
            PageRequest::new(0, MAX_PAGE_SIZE + 1),
            Err(PageRequestError::SizeTooLarge { max: MAX_PAGE_SIZE })
        );
    }

    #[rstest]
    fn from_params_applies_defaults() {
        let request = PageRequest::from_params(None, None).expect("defaults are valid");
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    fn offset_multiplies_without_overflow() {
        let request = PageRequest::new(u32::MAX, MAX_PAGE_SIZE).expect("valid request");
        assert_eq!(
            request.offset(),
            u64::from(u32::MAX) * u64::from(MAX_PAGE_SIZE)
        );
    }

    #[rstest]
    #[case("id", Key::Id, SortDirection::Ascending)]
    #[case("amount,desc", Key::Amount, SortDirection::Descending)]
    #[case("amount , DESC", Key::Amount, SortDirection::Descending)]
    #[case("id,asc", Key::Id, SortDirection::Ascending)]
    fn parses_wire_forms(
        #[case] raw: &str,
        #[case] key: Key,
        #[case] direction: SortDirection,
    ) {
        let sort = Sort::<Key>::parse(raw).expect("valid sort");
        assert_eq!(*sort.key(), key);
        assert_eq!(sort.direction(), direction);
    }

    #[rstest]
    #[case("", SortParseError::EmptyKey)]
    #[case(",desc", SortParseError::EmptyKey)]
    #[case("owner,desc", SortParseError::UnknownKey { value: "owner".to_owned() })]
    #[case("id,sideways", SortParseError::UnknownDirection { value: "sideways".to_owned() })]
    #[case("id,desc,extra", SortParseError::TrailingSegments)]
    fn rejects_malformed_sorts(#[case] raw: &str, #[case] expected: SortParseError) {
        assert_eq!(Sort::<Key>::parse(raw), Err(expected));
    }

    #[rstest]
    fn direction_apply_reverses_descending() {
        use std::cmp::Ordering;
        assert_eq!(
            SortDirection::Descending.apply(Ordering::Less),
            Ordering::Greater
        );
        assert_eq!(SortDirection::Ascending.apply(Ordering::Less), Ordering::Less);
    }

    #[rstest]
    #[case(0, 2, vec![1, 2])]
    #[case(1, 2, vec![3, 4])]
    #[case(2, 2, vec![5])]
    #[case(3, 2, vec![])]
    fn window_slices_pages(#[case] page: u32, #[case] size: u32, #[case] expected: Vec<i32>) {
        let request = PageRequest::new(page, size).expect("valid request");
        assert_eq!(window(vec![1, 2, 3, 4, 5], request), expected);
    }

    #[rstest]
    fn window_concatenation_is_exhaustive() {
        let items: Vec<i32> = (0..7).collect();
        let mut seen = Vec::new();
        for page in 0..4 {
            let request = PageRequest::new(page, 2).expect("valid request");
            seen.extend(window(items.clone(), request));
        }
        assert_eq!(seen, items);
    }
}
