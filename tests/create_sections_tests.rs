mod common;
use common::{d, memory_db, t};

use speeches::db::queries::{
    count_rows, create_instance, create_section, find_instance_by_label, load_children,
    load_instances, load_sections_by_instance, load_speeches_by_section,
};
use speeches::errors::AppError;
use speeches::models::instance::DEFAULT_INSTANCE_LABEL;
use speeches::{SectionDescriptor, SpeechBatch, create_sections};

fn sample_tree() -> Vec<SectionDescriptor> {
    vec![
        SectionDescriptor::new("Top level section").with_subsections(vec![
            SectionDescriptor::new("Nested section").with_subsections(vec![
                SectionDescriptor::new("Section with speeches")
                    .with_speeches(SpeechBatch::new(4, d(2013, 3, 25), Some(t(9, 0)))),
                SectionDescriptor::new("Bill on Silly Walks")
                    .with_speeches(SpeechBatch::new(2, d(2013, 3, 25), Some(t(12, 0)))),
            ]),
            SectionDescriptor::new("Another nested section (but completely empty)")
                .with_subsections(vec![]),
        ]),
    ]
}

#[test]
fn test_parent_instance_combinations_that_succeed() {
    let pool = memory_db();
    let conn = &pool.conn;

    let foo = create_instance(conn, "foo").unwrap();
    let foo_parent = create_section(conn, &foo, "Foo Section", None).unwrap();

    create_sections(conn, &[], Some(&foo_parent), Some(&foo)).unwrap();
    create_sections(conn, &[], None, Some(&foo)).unwrap();
    create_sections(conn, &[], Some(&foo_parent), None).unwrap();
    create_sections(conn, &[], None, None).unwrap();
}

#[test]
fn test_parent_instance_mismatch() {
    let pool = memory_db();
    let conn = &pool.conn;

    let foo = create_instance(conn, "foo").unwrap();
    let bar = create_instance(conn, "bar").unwrap();
    let foo_parent = create_section(conn, &foo, "Foo Section", None).unwrap();

    let err = create_sections(conn, &[], Some(&foo_parent), Some(&bar)).unwrap_err();
    assert!(matches!(
        err,
        AppError::ParentInstanceMismatch { instance, parent, parent_instance }
            if instance == bar.id && parent == foo_parent.id && parent_instance == foo.id
    ));
}

#[test]
fn test_mismatch_creates_nothing() {
    let pool = memory_db();
    let conn = &pool.conn;

    let foo = create_instance(conn, "foo").unwrap();
    let bar = create_instance(conn, "bar").unwrap();
    let foo_parent = create_section(conn, &foo, "Foo Section", None).unwrap();

    let result = create_sections(conn, &sample_tree(), Some(&foo_parent), Some(&bar));
    assert!(matches!(result, Err(AppError::ParentInstanceMismatch { .. })));

    assert_eq!(count_rows(conn, "sections").unwrap(), 1);
    assert_eq!(count_rows(conn, "speeches").unwrap(), 0);
    assert_eq!(count_rows(conn, "instances").unwrap(), 2);
}

#[test]
fn test_nested_tree_mirrors_descriptors() {
    let pool = memory_db();
    let conn = &pool.conn;

    create_sections(conn, &sample_tree(), None, None).unwrap();

    let instance = find_instance_by_label(conn, DEFAULT_INSTANCE_LABEL)
        .unwrap()
        .expect("default instance created");
    let sections = load_sections_by_instance(conn, instance.id).unwrap();
    assert_eq!(sections.len(), 5);
    assert_eq!(count_rows(conn, "sections").unwrap(), 5);

    let roots: Vec<_> = sections.iter().filter(|s| s.is_root()).collect();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].title, "Top level section");

    let level1 = load_children(conn, roots[0].id).unwrap();
    let titles: Vec<_> = level1.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(
        titles,
        vec!["Nested section", "Another nested section (but completely empty)"]
    );

    let level2 = load_children(conn, level1[0].id).unwrap();
    let titles: Vec<_> = level2.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Section with speeches", "Bill on Silly Walks"]);

    assert!(load_children(conn, level1[1].id).unwrap().is_empty());
    assert!(sections.iter().all(|s| s.instance_id == instance.id));
}

#[test]
fn test_speech_batch_times_step_ten_minutes() {
    let pool = memory_db();
    let conn = &pool.conn;

    create_sections(conn, &sample_tree(), None, None).unwrap();

    let instance = find_instance_by_label(conn, DEFAULT_INSTANCE_LABEL)
        .unwrap()
        .unwrap();
    let sections = load_sections_by_instance(conn, instance.id).unwrap();
    let with_speeches = sections
        .iter()
        .find(|s| s.title == "Section with speeches")
        .unwrap();

    let speeches = load_speeches_by_section(conn, with_speeches.id).unwrap();
    assert_eq!(speeches.len(), 4);

    let times: Vec<_> = speeches.iter().map(|s| s.start_time).collect();
    assert_eq!(
        times,
        vec![Some(t(9, 0)), Some(t(9, 10)), Some(t(9, 20)), Some(t(9, 30))]
    );
    for s in &speeches {
        assert_eq!(s.start_date, Some(d(2013, 3, 25)));
        assert_eq!(s.text, "rhubarb rhubarb");
        assert_eq!(s.instance_id, instance.id);
        assert_eq!(s.section_id, Some(with_speeches.id));
    }

    let silly = sections
        .iter()
        .find(|s| s.title == "Bill on Silly Walks")
        .unwrap();
    let times: Vec<_> = load_speeches_by_section(conn, silly.id)
        .unwrap()
        .iter()
        .map(|s| s.start_time)
        .collect();
    assert_eq!(times, vec![Some(t(12, 0)), Some(t(12, 10))]);
}

#[test]
fn test_speech_batch_without_time() {
    let pool = memory_db();
    let conn = &pool.conn;

    let tree = vec![
        SectionDescriptor::new("Untimed")
            .with_speeches(SpeechBatch::new(3, d(2014, 1, 2), None)),
    ];
    create_sections(conn, &tree, None, None).unwrap();

    let instance = find_instance_by_label(conn, DEFAULT_INSTANCE_LABEL)
        .unwrap()
        .unwrap();
    let section = &load_sections_by_instance(conn, instance.id).unwrap()[0];
    let speeches = load_speeches_by_section(conn, section.id).unwrap();

    assert_eq!(speeches.len(), 3);
    assert!(speeches.iter().all(|s| s.start_time.is_none()));
    assert!(speeches.iter().all(|s| s.start_date == Some(d(2014, 1, 2))));
}

#[test]
fn test_speech_times_wrap_past_midnight() {
    let pool = memory_db();
    let conn = &pool.conn;

    let tree = vec![
        SectionDescriptor::new("Late sitting")
            .with_speeches(SpeechBatch::new(3, d(2013, 3, 25), Some(t(23, 50)))),
    ];
    create_sections(conn, &tree, None, None).unwrap();

    let instance = find_instance_by_label(conn, DEFAULT_INSTANCE_LABEL)
        .unwrap()
        .unwrap();
    let section = &load_sections_by_instance(conn, instance.id).unwrap()[0];
    let speeches = load_speeches_by_section(conn, section.id).unwrap();

    let times: Vec<_> = speeches.iter().map(|s| s.start_time).collect();
    assert_eq!(times, vec![Some(t(23, 50)), Some(t(0, 0)), Some(t(0, 10))]);
    assert!(speeches.iter().all(|s| s.start_date == Some(d(2013, 3, 25))));
}

#[test]
fn test_zero_count_batch_creates_section_only() {
    let pool = memory_db();
    let conn = &pool.conn;

    let tree = vec![
        SectionDescriptor::new("Empty batch")
            .with_speeches(SpeechBatch::new(0, d(2013, 3, 25), Some(t(9, 0)))),
    ];
    create_sections(conn, &tree, None, None).unwrap();

    assert_eq!(count_rows(conn, "sections").unwrap(), 1);
    assert_eq!(count_rows(conn, "speeches").unwrap(), 0);
}

#[test]
fn test_default_instance_is_reused() {
    let pool = memory_db();
    let conn = &pool.conn;

    create_sections(conn, &[], None, None).unwrap();
    create_sections(conn, &[], None, None).unwrap();
    create_sections(conn, &[SectionDescriptor::new("A")], None, None).unwrap();
    create_sections(conn, &[SectionDescriptor::new("B")], None, None).unwrap();

    let instances = load_instances(conn).unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].label, "create-sections-instance");

    let sections = load_sections_by_instance(conn, instances[0].id).unwrap();
    assert_eq!(sections.len(), 2);
}

#[test]
fn test_explicit_instance_is_used() {
    let pool = memory_db();
    let conn = &pool.conn;

    let foo = create_instance(conn, "foo").unwrap();
    create_sections(conn, &sample_tree(), None, Some(&foo)).unwrap();

    assert!(find_instance_by_label(conn, DEFAULT_INSTANCE_LABEL)
        .unwrap()
        .is_none());
    assert_eq!(load_sections_by_instance(conn, foo.id).unwrap().len(), 5);
}

#[test]
fn test_parent_instance_wins_and_tree_attaches_under_parent() {
    let pool = memory_db();
    let conn = &pool.conn;

    let foo = create_instance(conn, "foo").unwrap();
    let foo_parent = create_section(conn, &foo, "Foo Section", None).unwrap();

    create_sections(conn, &sample_tree(), Some(&foo_parent), None).unwrap();

    let children = load_children(conn, foo_parent.id).unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].title, "Top level section");
    assert_eq!(children[0].instance_id, foo.id);

    assert_eq!(load_sections_by_instance(conn, foo.id).unwrap().len(), 6);
    assert_eq!(count_rows(conn, "instances").unwrap(), 1);
}

#[test]
fn test_non_positive_count_creates_section_only() {
    let pool = memory_db();
    let conn = &pool.conn;

    let tree = vec![
        SectionDescriptor::new("Empty batch")
            .with_speeches(SpeechBatch::new(0, d(2013, 3, 25), Some(t(9, 0)))),
        SectionDescriptor::new("Negative batch")
            .with_speeches(SpeechBatch::new(-2, d(2013, 3, 25), None)),
    ];
    create_sections(conn, &tree, None, None).unwrap();

    assert_eq!(count_rows(conn, "sections").unwrap(), 2);
    assert_eq!(count_rows(conn, "speeches").unwrap(), 0);
}

#[test]
fn test_huge_count_fails_on_storage_without_preallocating() {
    let pool = memory_db();
    let conn = &pool.conn;
    conn.execute_batch("DROP TABLE speeches").unwrap();

    let tree = vec![
        SectionDescriptor::new("Huge batch")
            .with_speeches(SpeechBatch::new(u32::MAX as i64, d(2013, 3, 25), Some(t(9, 0)))),
    ];
    let err = create_sections(conn, &tree, None, None).unwrap_err();
    assert!(matches!(err, AppError::Db(_)));
}
