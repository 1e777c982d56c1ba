//! Per-run options and the set of header names they select for removal

/// Columns every run deletes
pub const ALWAYS_REMOVED: [&str; 3] = ["Imprint", "Digital Availability", "Electronic Availability"];

pub const AUTHOR_HEADER: &str = "Author";
pub const LOCATION_HEADER: &str = "Location";
pub const ISBN_HEADER: &str = "ISBN/ISSN";
pub const EDITION_HEADER: &str = "Edition";
pub const AVAILABILITY_HEADER: &str = "Availability";

/// Resolved options for one transformation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformOptions {
    pub remove_author: bool,
    pub remove_location: bool,
    pub remove_isbn: bool,
    pub remove_edition: bool,
    pub remove_availability: bool,
    /// Written into the "Initials" tracking cell and the end-date message
    pub initials: String,
    /// Printed in the end-date message when present and non-empty
    pub end_date: Option<String>,
}

impl TransformOptions {
    /// End date that should be announced, if any. An empty string counts as absent.
    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref().filter(|d| !d.is_empty())
    }
}

/// Literal header names slated for deletion in one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalSpec {
    names: Vec<&'static str>,
}

impl RemovalSpec {
    pub fn from_options(options: &TransformOptions) -> Self {
        let mut names = ALWAYS_REMOVED.to_vec();
        let toggles = [
            (options.remove_author, AUTHOR_HEADER),
            (options.remove_location, LOCATION_HEADER),
            (options.remove_isbn, ISBN_HEADER),
            (options.remove_edition, EDITION_HEADER),
            (options.remove_availability, AVAILABILITY_HEADER),
        ];
        names.extend(toggles.iter().filter(|(on, _)| *on).map(|(_, name)| *name));
        Self { names }
    }

    /// Exact, case-sensitive match
    pub fn contains(&self, header: &str) -> bool {
        self.names.contains(&header)
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spec_has_fixed_names_only() {
        let spec = RemovalSpec::from_options(&TransformOptions::default());
        assert_eq!(spec.names(), &ALWAYS_REMOVED);
        assert!(!spec.contains("Author"));
    }

    #[test]
    fn test_toggles_add_names() {
        let options = TransformOptions {
            remove_author: true,
            remove_isbn: true,
            remove_availability: true,
            ..Default::default()
        };
        let spec = RemovalSpec::from_options(&options);
        assert!(spec.contains("Author"));
        assert!(spec.contains("ISBN/ISSN"));
        assert!(spec.contains("Availability"));
        assert!(!spec.contains("Location"));
        assert!(!spec.contains("Edition"));
    }

    #[test]
    fn test_match_is_exact() {
        let options = TransformOptions {
            remove_author: true,
            ..Default::default()
        };
        let spec = RemovalSpec::from_options(&options);
        assert!(!spec.contains("author"));
        assert!(!spec.contains("Author "));
        assert!(!spec.contains("Authors"));
    }

    #[test]
    fn test_empty_end_date_is_absent() {
        let mut options = TransformOptions::default();
        assert_eq!(options.end_date(), None);
        options.end_date = Some(String::new());
        assert_eq!(options.end_date(), None);
        // Any other text is announced as given
        options.end_date = Some(" ".to_string());
        assert_eq!(options.end_date(), Some(" "));
        options.end_date = Some("12/31/2025".to_string());
        assert_eq!(options.end_date(), Some("12/31/2025"));
    }
}
