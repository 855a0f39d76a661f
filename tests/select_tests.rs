/// Searchable select tests.
///
/// Run with: cargo test --test select_tests

use gigdesk::config::SelectConfig;
use gigdesk::{SearchableSelect, SelectOption};
use tempfile::tempdir;

fn options() -> Vec<SelectOption> {
    vec![SelectOption::new(1, "Algiers"), SelectOption::new(2, "Oran")]
}

#[test]
fn test_query_filters_case_insensitively() {
    let mut select = SearchableSelect::new(options());
    select.set_query("al");

    let visible = select.visible_options();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Algiers");
}

#[test]
fn test_selection_is_owned_by_caller() {
    let mut select = SearchableSelect::new(options());
    let mut wilaya = String::new();

    select.set_query("OR");
    select.choose("Oran", |value| wilaya = value.to_string()).unwrap();
    assert_eq!(wilaya, "Oran");

    // Clearing the query does not touch the caller's value
    select.set_query("");
    let view = select.render(&wilaya);
    assert_eq!(view.selected, "Oran");
    assert_eq!(view.options.len(), 2);
}

#[test]
fn test_custom_labels() {
    let select = SearchableSelect::with_config(
        options(),
        SelectConfig::new("Select City", "Search city..."),
    );
    let view = select.render("");
    assert_eq!(view.placeholder, "Select City");
    assert_eq!(view.search_placeholder, "Search city...");
    assert!(!view.invalid);
}

#[test]
fn test_options_load_from_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("wilayas.json");
    std::fs::write(&path, r#"[{"id": 16, "name": "Algiers"}, {"id": 31, "name": "Oran"}]"#)
        .unwrap();

    let loaded = gigdesk::select::load_options(&path).unwrap();

    assert_eq!(loaded, vec![SelectOption::new(16, "Algiers"), SelectOption::new(31, "Oran")]);
}
