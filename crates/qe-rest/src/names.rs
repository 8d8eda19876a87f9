//! Naming rules shared with the platform.

/// Name conversions the platform applies to user supplied names.
pub struct Names;

impl Names {
    /// Convert a display name into the slug the platform uses for derived
    /// resources such as the integration's source repository.
    ///
    /// Lowercases, collapses every run of characters outside `[a-z0-9]`
    /// into one `-` and trims leading and trailing dashes.
    ///
    /// ```rust
    /// use syndesis_qe_rest::Names;
    ///
    /// assert_eq!(
    ///     Names::sanitize("Twitter to salesforce contact rest test"),
    ///     "twitter-to-salesforce-contact-rest-test"
    /// );
    /// ```
    pub fn sanitize(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        let mut pending_dash = false;

        for ch in name.chars().flat_map(char::to_lowercase) {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(ch);
            } else {
                pending_dash = true;
            }
        }

        slug
    }
}
