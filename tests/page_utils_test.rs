use chrono::{FixedOffset, TimeZone, Utc};
use formwire::adapters::{InputElement, MemoryPage};
use formwire::domain::ports::CookieStore;
use formwire::{
    clear_and_redirect, datetime_input_value, delete_all_cookies, num_from_string, set_value,
};

#[test]
fn test_num_from_string_examples() {
    assert_eq!(num_from_string("7abc"), 7);
    assert_eq!(num_from_string("abc"), 0);
    assert_eq!(num_from_string(""), 0);
    assert_eq!(num_from_string("42px"), 42);
}

#[test]
fn test_set_value_none_does_nothing() {
    let mut input = InputElement {
        value: "kept".to_string(),
    };
    set_value::<InputElement>(None, "changed");
    assert_eq!(input.value, "kept");

    set_value(Some(&mut input), "changed");
    assert_eq!(input.value, "changed");
}

#[test]
fn test_clear_and_redirect() {
    let page = MemoryPage::new().with_cookies("a=1; b=2");

    let cleared = clear_and_redirect(&page, &page, "/login");

    assert_eq!(cleared, vec!["a", "b"]);
    assert_eq!(page.cookie_header(), "");
    assert_eq!(page.navigations(), vec!["/login"]);
}

#[test]
fn test_delete_all_cookies_without_redirect() {
    let page = MemoryPage::new().with_cookies("session=abc; theme=dark");

    delete_all_cookies(&page);

    assert_eq!(page.cookie_header(), "");
    assert!(page.navigations().is_empty());
}

#[test]
fn test_datetime_input_value_for_form_field() {
    let page = MemoryPage::new().with_input("due_at", "");
    let instant = Utc.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap();
    let offset = FixedOffset::east_opt(9 * 3600).unwrap();

    let value = datetime_input_value(instant, offset);
    page.update_input("due_at", |input| set_value(input, &value));

    assert_eq!(page.input_value("due_at").as_deref(), Some("2024-07-04T21:00:00"));
}
