use std::fs;
use whisker_testkit::fixtures::{SHOWCASE_DATA, SHOWCASE_ITEM_PARTIAL, SHOWCASE_TEMPLATE};
use whisker_testkit::{temp_dir_in_workspace, write_showcase, write_tree};

#[test]
fn test_write_tree_creates_nested_files() {
    let temp = temp_dir_in_workspace();
    write_tree(
        temp.path(),
        &[("a.txt", "one"), ("nested/deeper/b.txt", "two")],
    );

    assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "one");
    assert_eq!(
        fs::read_to_string(temp.path().join("nested/deeper/b.txt")).unwrap(),
        "two"
    );
}

#[test]
fn test_write_showcase_layout() {
    let temp = temp_dir_in_workspace();
    let showcase = write_showcase(temp.path());

    assert_eq!(fs::read_to_string(&showcase.template).unwrap(), SHOWCASE_TEMPLATE);
    assert_eq!(fs::read_to_string(&showcase.data).unwrap(), SHOWCASE_DATA);
    assert_eq!(
        fs::read_to_string(showcase.partial_dir.join("item.mustache")).unwrap(),
        SHOWCASE_ITEM_PARTIAL
    );
}
