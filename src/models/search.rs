//! Movie search criteria: raw query parameters and their normalized form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::pagination::{normalize_page_index, normalize_page_size, DEFAULT_PAGE_SIZE};

/// Column a search can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Year,
    Price,
    Duration,
    Created,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Title,
        SortField::Year,
        SortField::Price,
        SortField::Duration,
        SortField::Created,
    ];

    /// Case-insensitive parse; unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "year" => Some(Self::Year),
            "price" => Some(Self::Price),
            "duration" => Some(Self::Duration),
            "created" => Some(Self::Created),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Year => "year",
            Self::Price => "price",
            Self::Duration => "duration",
            Self::Created => "created",
        }
    }

    /// Human-readable label for sort pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Year => "Release Year",
            Self::Price => "Rental Price",
            Self::Duration => "Duration",
            Self::Created => "Date Added",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const ALL: [SortDirection; 2] = [SortDirection::Asc, SortDirection::Desc];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Asc => "Ascending",
            Self::Desc => "Descending",
        }
    }
}

/// Movie search query string as sent by clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub search_term: Option<String>,
    pub genre_id: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub price_from: Option<Decimal>,
    pub price_to: Option<Decimal>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// Normalized search criteria.
///
/// Blank search terms are dropped, sort names are parsed leniently, the page
/// index is clamped to 1 and unlisted page sizes fall back to 12.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCriteria {
    pub search_term: Option<String>,
    pub genre_id: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub price_from: Option<Decimal>,
    pub price_to: Option<Decimal>,
    pub sort_field: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
    pub page_index: i64,
    pub page_size: i64,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            search_term: None,
            genre_id: None,
            year_from: None,
            year_to: None,
            price_from: None,
            price_to: None,
            sort_field: None,
            sort_direction: None,
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchCriteria {
    /// Whether any filter (as opposed to sort or paging) is set.
    pub fn has_active_filters(&self) -> bool {
        self.search_term.is_some()
            || self.genre_id.is_some()
            || self.year_from.is_some()
            || self.year_to.is_some()
            || self.price_from.is_some()
            || self.price_to.is_some()
    }

    /// Fill an absent sort field or direction with `created`/`desc` for
    /// echoing back to the client. Ordering itself goes through
    /// `MovieOrder::resolve`.
    pub fn with_sort_defaults(mut self) -> Self {
        self.sort_field.get_or_insert(SortField::Created);
        self.sort_direction.get_or_insert(SortDirection::Desc);
        self
    }
}

impl From<SearchParams> for SearchCriteria {
    fn from(params: SearchParams) -> Self {
        Self {
            search_term: params.search_term.filter(|t| !t.trim().is_empty()),
            genre_id: params.genre_id,
            year_from: params.year_from,
            year_to: params.year_to,
            price_from: params.price_from,
            price_to: params.price_to,
            sort_field: params.sort_by.as_deref().and_then(SortField::parse),
            sort_direction: params.sort_order.as_deref().and_then(SortDirection::parse),
            page_index: normalize_page_index(params.page.unwrap_or(1)),
            page_size: normalize_page_size(params.page_size.unwrap_or(DEFAULT_PAGE_SIZE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn sort_names_parse_case_insensitively() {
        assert_eq!(SortField::parse("TITLE"), Some(SortField::Title));
        assert_eq!(SortField::parse(" Year "), Some(SortField::Year));
        assert_eq!(SortField::parse("rating"), None);
        assert_eq!(SortDirection::parse("DESC"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("down"), None);
    }

    #[test]
    fn sort_names_round_trip_through_as_str() {
        for field in SortField::ALL {
            assert_eq!(SortField::parse(field.as_str()), Some(field));
        }
        for direction in SortDirection::ALL {
            assert_eq!(SortDirection::parse(direction.as_str()), Some(direction));
        }
    }

    #[test]
    fn empty_params_give_defaults() {
        let criteria = SearchCriteria::from(SearchParams::default());
        assert_eq!(criteria, SearchCriteria::default());
        assert!(!criteria.has_active_filters());
    }

    #[test]
    fn echoed_sort_defaults_to_created_desc() {
        let echoed = SearchCriteria::from(SearchParams::default()).with_sort_defaults();
        assert_eq!(echoed.sort_field, Some(SortField::Created));
        assert_eq!(echoed.sort_direction, Some(SortDirection::Desc));

        let echoed = SearchCriteria::from(SearchParams {
            sort_by: Some("title".into()),
            ..Default::default()
        })
        .with_sort_defaults();
        assert_eq!(echoed.sort_field, Some(SortField::Title));
        assert_eq!(echoed.sort_direction, Some(SortDirection::Desc));

        let echoed = SearchCriteria::from(SearchParams {
            sort_by: Some("price".into()),
            sort_order: Some("asc".into()),
            ..Default::default()
        })
        .with_sort_defaults();
        assert_eq!(echoed.sort_field, Some(SortField::Price));
        assert_eq!(echoed.sort_direction, Some(SortDirection::Asc));
    }

    #[test]
    fn huge_page_index_is_kept() {
        let criteria = SearchCriteria::from(SearchParams {
            page: Some(i64::MAX / 10),
            page_size: Some(48),
            ..Default::default()
        });
        assert_eq!(criteria.page_index, i64::MAX / 10);
        assert_eq!(criteria.page_size, 48);
    }

    #[test]
    fn paging_is_normalized() {
        let criteria = SearchCriteria::from(SearchParams {
            page: Some(-3),
            page_size: Some(100),
            ..Default::default()
        });
        assert_eq!(criteria.page_index, 1);
        assert_eq!(criteria.page_size, 12);

        let criteria = SearchCriteria::from(SearchParams {
            page: Some(4),
            page_size: Some(48),
            ..Default::default()
        });
        assert_eq!(criteria.page_index, 4);
        assert_eq!(criteria.page_size, 48);
    }

    #[test]
    fn blank_search_term_is_dropped() {
        let criteria = SearchCriteria::from(SearchParams {
            search_term: Some("   ".to_string()),
            ..Default::default()
        });
        assert_eq!(criteria.search_term, None);
        assert!(!criteria.has_active_filters());
    }

    #[test]
    fn unknown_sort_values_are_ignored() {
        let criteria = SearchCriteria::from(SearchParams {
            sort_by: Some("popularity".to_string()),
            sort_order: Some("sideways".to_string()),
            ..Default::default()
        });
        assert_eq!(criteria.sort_field, None);
        assert_eq!(criteria.sort_direction, None);
    }

    #[test]
    fn any_filter_marks_criteria_active() {
        let with_term = SearchCriteria {
            search_term: Some("Inception".to_string()),
            ..Default::default()
        };
        let with_genre = SearchCriteria {
            genre_id: Some(1),
            ..Default::default()
        };
        let with_years = SearchCriteria {
            year_from: Some(2000),
            year_to: Some(2020),
            ..Default::default()
        };
        let with_price = SearchCriteria {
            price_from: Some(Decimal::from_str("1.99").unwrap()),
            price_to: Some(Decimal::from_str("9.99").unwrap()),
            ..Default::default()
        };
        let sorted_only = SearchCriteria {
            sort_field: Some(SortField::Title),
            ..Default::default()
        };

        assert!(with_term.has_active_filters());
        assert!(with_genre.has_active_filters());
        assert!(with_years.has_active_filters());
        assert!(with_price.has_active_filters());
        assert!(!sorted_only.has_active_filters());
    }
}
