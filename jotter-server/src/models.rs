//! Domain and request models for jotter-server

use serde::{Deserialize, Serialize};

// ============================================================================
// Entries
// ============================================================================

/// A stored note entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub category: String,
}

/// Form body for POST /add
#[derive(Debug, Clone, Deserialize)]
pub struct NewEntryForm {
    pub title: String,
    pub text: String,
    pub category: String,
}

/// Form body for POST /delete and POST /update (edit form lookup)
#[derive(Debug, Clone, Deserialize)]
pub struct EntryIdForm {
    pub id: i64,
}

/// Form body for POST /submit_update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntryForm {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub category: String,
}

/// Query parameters for the list view
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub sort_selected: Option<String>,
    pub flash: Option<String>,
}

impl ListParams {
    /// Category filter, with an empty selection meaning "all entries".
    pub fn category_filter(&self) -> Option<&str> {
        self.sort_selected.as_deref().filter(|s| !s.is_empty())
    }

    /// Flash banner, if the query carries a known code.
    pub fn flash(&self) -> Option<Flash> {
        self.flash.as_deref().and_then(|s| s.parse().ok())
    }
}

// ============================================================================
// Flash banners
// ============================================================================

/// Confirmation banner codes carried through the post-redirect query string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Posted,
    Updated,
}

impl Flash {
    /// Code used in the redirect query string
    pub fn code(self) -> &'static str {
        match self {
            Flash::Posted => "posted",
            Flash::Updated => "updated",
        }
    }

    /// Banner text shown on the list view
    pub fn message(self) -> &'static str {
        match self {
            Flash::Posted => "New entry was successfully posted",
            Flash::Updated => "New entry was successfully updated",
        }
    }
}

impl std::str::FromStr for Flash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "posted" => Ok(Flash::Posted),
            "updated" => Ok(Flash::Updated),
            _ => Err(format!("Unknown flash code: {}", s)),
        }
    }
}

// ============================================================================
// Health
// ============================================================================

/// GET /health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub path: String,
    pub entries: i64,
    pub size_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_round_trips_through_code() {
        for flash in [Flash::Posted, Flash::Updated] {
            assert_eq!(flash.code().parse::<Flash>().unwrap(), flash);
        }
    }

    #[test]
    fn unknown_flash_code_is_rejected() {
        assert!("deleted".parse::<Flash>().is_err());
        assert!("".parse::<Flash>().is_err());
    }

    #[test]
    fn empty_category_selection_means_no_filter() {
        let params = ListParams {
            sort_selected: Some(String::new()),
            flash: None,
        };
        assert_eq!(params.category_filter(), None);

        let params = ListParams {
            sort_selected: Some("Ideas".to_string()),
            flash: None,
        };
        assert_eq!(params.category_filter(), Some("Ideas"));
    }
}
