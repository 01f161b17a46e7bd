use super::{create_test_storage, tab};

#[test]
fn test_write_tabs_merges_by_url() {
    let (storage, _temp_dir) = create_test_storage();
    let (a, b, c) = (tab("A", "https://a"), tab("B", "https://b"), tab("C", "https://c"));

    storage.write_tabs("g", &[a.clone(), b.clone()]).unwrap();
    let group = storage.write_tabs("g", &[b.clone(), c.clone(), c.clone()]).unwrap();

    assert_eq!(group.tabs, vec![a.clone(), b.clone(), c.clone()]);
    let urls: Vec<String> = storage.read_tabs("g").unwrap().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["https://a", "https://b", "https://c"]);
}

#[test]
fn test_write_tabs_is_idempotent() {
    let (storage, _temp_dir) = create_test_storage();
    let tabs = vec![tab("A", "https://a"), tab("B", "https://b")];
    storage.write_tabs("g", &tabs).unwrap();
    storage.write_tabs("g", &tabs).unwrap();
    assert_eq!(storage.read_tabs("g").unwrap().len(), 2);
    assert_eq!(storage.get_group("g").unwrap().unwrap().tabs, tabs);
}

#[test]
fn test_write_tabs_creates_group_implicitly() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("fresh", &[tab("A", "https://a")]).unwrap();
    assert_eq!(storage.list_group_names().unwrap(), vec!["fresh"]);
}

#[test]
fn test_write_tabs_rejects_empty_url() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(storage.write_tabs("g", &[tab("A", "https://a"), tab("B", "")]).is_err());
    // Whole write rejected, nothing stored.
    assert!(storage.read_tabs("g").unwrap().is_empty());
    assert!(storage.list_group_names().unwrap().is_empty());
}

#[test]
fn test_same_url_in_two_groups_is_two_records() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("one", &[tab("A", "https://a")]).unwrap();
    storage.write_tabs("two", &[tab("A", "https://a")]).unwrap();
    assert_eq!(storage.list_all_tabs().unwrap().len(), 2);
}

#[test]
fn test_read_tabs_insertion_order() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("g", &[tab("Z", "https://z")]).unwrap();
    storage.write_tabs("g", &[tab("A", "https://a")]).unwrap();
    let records = storage.read_tabs("g").unwrap();
    assert_eq!(records[0].title, "Z");
    assert_eq!(records[1].title, "A");
    assert!(records[0].id < records[1].id);
}

#[test]
fn test_read_tabs_unknown_group_is_empty() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(storage.read_tabs("ghost").unwrap().is_empty());
}

#[test]
fn test_remove_tab_requires_url_and_title() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("g", &[tab("A", "https://a"), tab("B", "https://b")]).unwrap();

    assert_eq!(storage.remove_tab("g", &tab("wrong title", "https://a")).unwrap(), 0);
    assert_eq!(storage.read_tabs("g").unwrap().len(), 2);

    assert_eq!(storage.remove_tab("g", &tab("A", "https://a")).unwrap(), 1);
    let records = storage.read_tabs("g").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://b");
    assert_eq!(storage.get_group("g").unwrap().unwrap().tabs, vec![tab("B", "https://b")]);
}

#[test]
fn test_remove_tab_scoped_to_group() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("one", &[tab("A", "https://a")]).unwrap();
    storage.write_tabs("two", &[tab("A", "https://a")]).unwrap();
    storage.remove_tab("one", &tab("A", "https://a")).unwrap();
    assert_eq!(storage.read_tabs("two").unwrap().len(), 1);
}

#[test]
fn test_list_groups_rebuilt_from_records() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_group("empty").unwrap();
    storage.write_tabs("pets", &[tab("Cats", "https://cats")]).unwrap();
    storage.write_tabs("news", &[tab("Daily", "https://daily")]).unwrap();
    storage.write_tabs("pets", &[tab("Dogs", "https://dogs")]).unwrap();

    let groups = storage.list_groups().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].group_name, "pets");
    assert_eq!(groups[0].tabs, vec![tab("Cats", "https://cats"), tab("Dogs", "https://dogs")]);
    assert_eq!(groups[1].group_name, "news");
}

#[test]
fn test_scan_tabs_filters_by_group() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("one", &[tab("A", "https://a"), tab("B", "https://b")]).unwrap();
    storage.write_tabs("two", &[tab("C", "https://c")]).unwrap();

    let count = storage.scan_tabs(Some("one"), |rows| rows.count()).unwrap();
    assert_eq!(count, 2);
    let first = storage.scan_tabs(None, |rows| rows.next()).unwrap();
    assert_eq!(first.map(|r| r.url), Some("https://a".to_owned()));
}
