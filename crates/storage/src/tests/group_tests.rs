use super::{create_test_storage, tab};

#[test]
fn test_create_group() {
    let (storage, _temp_dir) = create_test_storage();
    let group = storage.create_group("Research").unwrap();
    assert_eq!(group.name, "Research");
    assert!(group.tabs.is_empty());
    assert_eq!(storage.list_group_names().unwrap(), vec!["Research".to_owned()]);
}

#[test]
fn test_create_duplicate_group_fails() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_group("Research").unwrap();
    let err = storage.create_group("Research").unwrap_err();
    assert!(err.is_duplicate());
    assert_eq!(storage.list_group_names().unwrap().len(), 1);
}

#[test]
fn test_create_group_rejects_blank_name() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(storage.create_group("   ").is_err());
}

#[test]
fn test_group_names_sorted() {
    let (storage, _temp_dir) = create_test_storage();
    storage.create_group("b").unwrap();
    storage.create_group("a").unwrap();
    storage.write_tabs("c", &[tab("x", "https://x")]).unwrap();
    assert_eq!(storage.list_group_names().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_remove_group_only_touches_that_group() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("one", &[tab("a", "https://a"), tab("b", "https://b")]).unwrap();
    storage.write_tabs("two", &[tab("a", "https://a")]).unwrap();

    assert!(storage.remove_group("one").unwrap());

    assert!(storage.read_tabs("one").unwrap().is_empty());
    assert!(storage.get_group("one").unwrap().is_none());
    let two = storage.read_tabs("two").unwrap();
    assert_eq!(two.len(), 1);
    assert_eq!(two[0].url, "https://a");
}

#[test]
fn test_remove_unknown_group_returns_false() {
    let (storage, _temp_dir) = create_test_storage();
    assert!(!storage.remove_group("ghost").unwrap());
}

#[test]
fn test_rename_moves_record_and_tabs() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("old", &[tab("a", "https://a"), tab("b", "https://b")]).unwrap();

    let moved = storage.rename_group("old", "new").unwrap();
    assert_eq!(moved, 2);

    assert!(storage.get_group("old").unwrap().is_none());
    assert!(storage.read_tabs("old").unwrap().is_empty());
    let group = storage.get_group("new").unwrap().unwrap();
    assert_eq!(group.tabs.len(), 2);
    let records = storage.read_tabs("new").unwrap();
    assert!(records.iter().all(|r| r.group == "new"));
}

#[test]
fn test_rename_nonexistent_group_fails() {
    let (storage, _temp_dir) = create_test_storage();
    let err = storage.rename_group("ghost", "new").unwrap_err();
    assert!(err.is_not_found());
    assert!(storage.list_group_names().unwrap().is_empty());
}

#[test]
fn test_rename_onto_existing_name_changes_nothing() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("a", &[tab("one", "https://one")]).unwrap();
    storage.write_tabs("b", &[tab("two", "https://two")]).unwrap();

    let err = storage.rename_group("a", "b").unwrap_err();
    assert!(err.is_duplicate());

    assert_eq!(storage.read_tabs("a").unwrap().len(), 1);
    assert_eq!(storage.read_tabs("b").unwrap().len(), 1);
    assert_eq!(storage.read_tabs("b").unwrap()[0].url, "https://two");
}

#[test]
fn test_rename_to_same_name_is_noop() {
    let (storage, _temp_dir) = create_test_storage();
    storage.write_tabs("a", &[tab("one", "https://one")]).unwrap();
    assert_eq!(storage.rename_group("a", "a").unwrap(), 0);
    assert_eq!(storage.read_tabs("a").unwrap().len(), 1);
}
