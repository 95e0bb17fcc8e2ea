use crate::domain::ports::{CookieStore, Navigator};

/// `expires` value that makes the store drop a cookie immediately.
pub const EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Names found in a `document.cookie`-style header. A segment without `=` is
/// taken whole as the name; blank segments are skipped.
pub fn cookie_names(header: &str) -> Vec<String> {
    header
        .split(';')
        .map(|segment| match segment.find('=') {
            Some(eq) => &segment[..eq],
            None => segment,
        })
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Overwrites every cookie visible to the store with an expired, empty one.
///
/// Only cookies the store exposes are touched; those scoped to other paths or
/// domains survive. Returns the names that were expired.
pub fn delete_all_cookies(store: &dyn CookieStore) -> Vec<String> {
    let names = cookie_names(&store.cookie_header());
    for name in &names {
        store.set_cookie(&format!("{}=;expires={}", name, EPOCH_EXPIRY));
    }
    tracing::debug!("Expired {} cookie(s)", names.len());
    names
}

/// Clears cookies, then navigates to `location`.
pub fn clear_and_redirect(
    store: &dyn CookieStore,
    navigator: &dyn Navigator,
    location: &str,
) -> Vec<String> {
    let cleared = delete_all_cookies(store);
    tracing::info!("Redirecting to {} after clearing cookies", location);
    navigator.assign(location);
    cleared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryPage;
    use std::cell::RefCell;

    #[derive(Default)]
    struct LoggingStore {
        header: String,
        writes: RefCell<Vec<String>>,
    }

    impl CookieStore for LoggingStore {
        fn cookie_header(&self) -> String {
            self.header.clone()
        }

        fn set_cookie(&self, assignment: &str) {
            self.writes.borrow_mut().push(assignment.to_string());
        }
    }

    #[test]
    fn test_cookie_names() {
        assert_eq!(cookie_names("a=1; b=2"), vec!["a", "b"]);
        assert_eq!(cookie_names("token=x=y;flag"), vec!["token", "flag"]);
        assert!(cookie_names("").is_empty());
        assert!(cookie_names(" ; =orphan").is_empty());
    }

    #[test]
    fn test_expiry_assignments_written() {
        let store = LoggingStore {
            header: "a=1; b=2".into(),
            ..LoggingStore::default()
        };

        let cleared = delete_all_cookies(&store);

        assert_eq!(cleared, vec!["a", "b"]);
        assert_eq!(
            *store.writes.borrow(),
            vec![
                "a=;expires=Thu, 01 Jan 1970 00:00:00 GMT",
                "b=;expires=Thu, 01 Jan 1970 00:00:00 GMT",
            ]
        );
    }

    #[test]
    fn test_clear_and_redirect_empties_jar_then_navigates() {
        let page = MemoryPage::new().with_cookies("a=1; b=2");

        let cleared = clear_and_redirect(&page, &page, "/login");

        assert_eq!(cleared.len(), 2);
        assert_eq!(page.cookie_header(), "");
        assert_eq!(page.navigations(), vec!["/login"]);
    }

    #[test]
    fn test_redirect_with_no_cookies() {
        let page = MemoryPage::new();
        assert!(clear_and_redirect(&page, &page, "/").is_empty());
        assert_eq!(page.location().as_deref(), Some("/"));
    }
}
