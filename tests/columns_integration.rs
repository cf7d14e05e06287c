use admincols::api::Admincols;
use admincols::host::memory::{MemoryHost, MemoryQuery};
use admincols::host::{sort, SortQuery};
use admincols::model::{ColumnSpec, SortableColumn};
use indexmap::IndexMap;

fn native_columns() -> IndexMap<String, String> {
    let mut map = IndexMap::new();
    map.insert("title".to_string(), "Title".to_string());
    map.insert("date".to_string(), "Date".to_string());
    map
}

fn native_sortable() -> IndexMap<String, SortableColumn> {
    let mut map = IndexMap::new();
    map.insert("title".to_string(), SortableColumn::new("title", false));
    map
}

#[test]
fn test_views_column_end_to_end() {
    let mut host = MemoryHost::new();
    host.set_post_meta(7, "post_views", "1204");
    let mut api = Admincols::new(host);

    // Register a sortable numeric "views" column right after the title.
    let ids = api.register_post_columns(
        &["post"],
        vec![(
            "views".to_string(),
            ColumnSpec::new("Views")
                .source_key("post_views")
                .sortable()
                .numeric()
                .after("title"),
        )],
        &[],
    );
    assert_eq!(ids.len(), 1);
    let id = &ids[0];

    // The host asks for its column list.
    let columns = api.columns(id, &native_columns());
    let ordered: Vec<(&str, &str)> = columns
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(
        ordered,
        [("title", "Title"), ("views", "Views"), ("date", "Date")]
    );

    // ... then for the sortable set.
    let sortable = api.sortable_columns(id, &native_sortable());
    assert_eq!(sortable["views"], SortableColumn::new("views", true));
    assert_eq!(sortable["title"], SortableColumn::new("title", false));

    // ... renders the cell for object 7 ...
    assert_eq!(api.render_cell(id, "views", 7, ""), "1204");

    // ... and sorts by it, which redirects the query to the numeric
    // attached-value mode.
    let mut query = MemoryQuery::new();
    api.apply_sort(id, &mut query, "views");
    assert_eq!(
        query.get(sort::ORDER_BY).as_deref(),
        Some(sort::BY_VALUE_NUMERIC)
    );
    assert_eq!(query.get(sort::VALUE_KEY).as_deref(), Some("post_views"));
}

#[test]
fn test_removal_and_stacked_registrations() {
    let mut api = Admincols::new(MemoryHost::new());

    // Two plugins register against the same page table; the first also
    // suppresses the native date column.
    let first = api.register_post_columns(
        &["page"],
        vec![(
            "views".to_string(),
            ColumnSpec::new("Views").after("title"),
        )],
        &["date"],
    );
    let second = api.register_post_columns(
        &["page"],
        vec![(
            "template".to_string(),
            ColumnSpec::new("Template").after("title"),
        )],
        &[],
    );

    // Same identity, one handler.
    assert_eq!(first, second);
    assert_eq!(api.handlers().count(), 1);

    let columns = api.columns(&first[0], &native_columns());
    let keys: Vec<&str> = columns.keys().map(String::as_str).collect();
    // Date stays removed; the later "after:title" insertion sits
    // closest to the title.
    assert_eq!(keys, ["title", "template", "views"]);
}

#[test]
fn test_multi_target_registration_survives_a_bad_target() {
    let mut api = Admincols::new(MemoryHost::new());

    let ids = api.register_term_columns(
        &["category", "", "post_tag"],
        vec![("color".to_string(), ColumnSpec::new("Color"))],
        &[],
    );

    // The empty taxonomy fails on its own; the other two register.
    assert_eq!(ids.len(), 2);
    let taxonomies: Vec<&str> = ids
        .iter()
        .map(|id| id.scope.object_subtype.as_str())
        .collect();
    assert_eq!(taxonomies, ["category", "post_tag"]);
}

#[test]
fn test_permission_gated_column_stays_hidden() {
    let host = MemoryHost::new().deny_capabilities();
    let mut api = Admincols::new(host);

    let ids = api.register_user_columns(
        vec![
            (
                "last_login".to_string(),
                ColumnSpec::new("Last Login").before("title"),
            ),
            (
                "public_name".to_string(),
                ColumnSpec::new("Public Name").permission(|| true),
            ),
        ],
        &[],
    );

    let columns = api.columns(&ids[0], &native_columns());
    // No capability: the default-gated column is absent no matter its
    // position; the one with its own predicate shows.
    assert!(!columns.contains_key("last_login"));
    assert!(columns.contains_key("public_name"));
    assert!(columns.contains_key("title"));
}
