//! Tests for the node store and its derived parent index.

use linkforest::{Forest, InsertError, Record};
use rstest::{fixture, rstest};

#[fixture]
fn catalog() -> Forest<&'static str> {
    let mut forest = Forest::new();
    forest.add("Electronics", "1", "1", "");
    forest.add("Phones", "2", "1", "1");
    forest.add("Laptops", "3", "2", "1");
    forest.add("Accessories", "4", "1", "2");
    forest
}

#[rstest]
fn duplicate_add_leaves_count(mut catalog: Forest<&'static str>) {
    assert!(!catalog.add("Tablets", "3", "3", "1"));
    assert_eq!(catalog.len(), 4);
    assert!(!catalog.contains_value(&"Tablets"));
}

#[rstest]
fn refresh_is_idempotent(mut catalog: Forest<&'static str>) {
    assert!(catalog.cached_parents().is_none());
    catalog.refresh_parent_indexes();
    let first = catalog
        .cached_parents()
        .expect("should never fail: the index has just been refreshed")
        .to_vec();
    catalog.refresh_parent_indexes();
    assert_eq!(catalog.cached_parents(), Some(&first[..]));

    let electronics = catalog.find("1");
    let phones = catalog.find("2");
    assert_eq!(first, [None, electronics, electronics, phones]);
}

#[rstest]
fn every_mutation_invalidates_the_index(mut catalog: Forest<&'static str>) {
    let phones = catalog.find("2").expect("should never fail: the node exists");

    catalog.refresh_parent_indexes();
    catalog
        .node_mut(phones)
        .expect("should never fail: the node exists")
        .set_sort_key("9");
    assert!(!catalog.indexes_current());

    catalog.refresh_parent_indexes();
    catalog
        .node_mut(phones)
        .expect("should never fail: the node exists")
        .set_value("Mobiles");
    assert!(!catalog.indexes_current());

    catalog.refresh_parent_indexes();
    assert!(catalog.remove(&"Laptops"));
    assert!(!catalog.indexes_current());
}

#[rstest]
fn lookups(catalog: Forest<&'static str>) {
    assert!(catalog.contains_value(&"Phones"));
    assert!(!catalog.contains_value(&"Cameras"));
    assert!(catalog.contains_node(&Record::root("anything", "3", "x")));
    assert!(!catalog.contains_node(&Record::root("Phones", "9", "x")));

    let node = catalog
        .get_by_item_id("4")
        .expect("should never fail: the node exists");
    assert_eq!(*node.value(), "Accessories");
    assert_eq!(node.parent_id(), "2");
    assert_eq!(node.parent().map(|parent| *parent.value()), Some("Phones"));
}

#[rstest]
fn enumerations_follow_insertion_order(catalog: Forest<&'static str>) {
    assert_eq!(
        catalog.values().copied().collect::<Vec<_>>(),
        ["Electronics", "Phones", "Laptops", "Accessories"]
    );
    assert_eq!(
        catalog
            .nodes()
            .map(|node| node.item_id())
            .collect::<Vec<_>>(),
        ["1", "2", "3", "4"]
    );
}

#[rstest]
fn handles_survive_removal(mut catalog: Forest<&'static str>) {
    let accessories = catalog.find("4").expect("should never fail: the node exists");
    assert!(catalog.remove(&"Phones"));
    assert_eq!(catalog.len(), 3);
    assert_eq!(
        catalog.node(accessories).map(|node| *node.value()),
        Some("Accessories")
    );
    // Its parent is gone, so it is a root now.
    assert_eq!(catalog.parent_of(accessories), None);
    assert_eq!(catalog.depth(accessories), Some(0));
    assert!(!catalog.remove(&"Phones"));
}

#[rstest]
fn structure_queries(mut catalog: Forest<&'static str>) {
    let electronics = catalog.find("1").expect("should never fail: the node exists");
    let accessories = catalog.find("4").expect("should never fail: the node exists");
    assert_eq!(catalog.roots(), [electronics]);
    assert_eq!(
        catalog
            .children(electronics)
            .into_iter()
            .map(|child| *catalog.node(child).expect("alive").value())
            .collect::<Vec<_>>(),
        ["Phones", "Laptops"]
    );
    assert_eq!(catalog.depth(accessories), Some(2));
}

#[test]
fn child_before_parent() {
    let mut forest = Forest::new();
    forest.add("child", "c", "1", "p");
    let child = forest.find("c").expect("should never fail: the node exists");
    assert_eq!(forest.parent_of(child), None);

    forest.add("parent", "p", "1", "");
    assert_eq!(forest.parent_of(child), forest.find("p"));
}

#[test]
fn relinking_item_ids() {
    let mut forest = Forest::new();
    forest.add("a", "a", "1", "");
    forest.add("b", "b", "1", "");
    forest.add("kid", "k", "1", "b");
    let a = forest.find("a").expect("should never fail: the node exists");
    let kid = forest.find("k").expect("should never fail: the node exists");

    assert_eq!(
        forest
            .node_mut(a)
            .expect("should never fail: the node exists")
            .set_item_id("b"),
        Err(InsertError::DuplicateItemId {
            item_id: "b".to_owned()
        })
    );

    forest
        .node_mut(kid)
        .expect("should never fail: the node exists")
        .set_parent_id("a");
    assert_eq!(forest.parent_of(kid), Some(a));
}

#[test]
fn bulk_load_rejects_duplicates() {
    let result = Forest::from_records([
        Record::root(1, "1", "1"),
        Record::root(2, "2", "2"),
        Record::root(3, "1", "3"),
    ]);
    assert_eq!(
        result.map(|forest| forest.len()).map_err(|e| e.item_id().to_owned()),
        Err("1".to_owned())
    );
}
