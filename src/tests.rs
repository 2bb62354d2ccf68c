use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rusqlite::Connection;
use tempfile::TempDir;

use crate::domain::entities::entity::{
    default_filter_options, default_sort_options, Entity, EntityId, EntityKind, EntityQuery,
    EntitySort,
};
use crate::domain::entities::listing::{
    ActiveFilterSet, FilterOption, PaginationState, SortOption, SortOrder,
};
use crate::error::CatalogError;
use crate::infra::import::csv::read_entities_csv;
use crate::infra::sqlite::queries::{count_entities, insert_entities, query_page};
use crate::infra::sqlite::repo::SqliteCatalog;
use crate::infra::sqlite::schema::init_db;
use crate::ui::list_view::controller::{
    CountMarker, ListViewController, ListViewEvents, PaginationZone, DEFAULT_SEARCH_DEBOUNCE,
};
use crate::ui::list_view::info::ListLabels;
use crate::usecase::ports::catalog::EntityCatalog;
use crate::usecase::services::import_service::ImportService;
use crate::usecase::services::query_service::{ListQuery, QueryService};
use crate::*;

fn temp_db() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let db_path = temp_dir.path().join("entities.sqlite");
    init_db(&db_path).expect("init_db should succeed");
    (temp_dir, db_path)
}

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0)
        .single()
        .expect("valid fixture date")
}

fn entity(id: &str, name: &str, kind: EntityKind, description: &str, day: u32) -> Entity {
    Entity {
        id: EntityId::from(id),
        name: name.to_string(),
        kind,
        description: description.to_string(),
        created_at: at(day),
    }
}

fn fixture() -> Vec<Entity> {
    vec![
        entity("ds-orders", "orders", EntityKind::Dataset, "raw sales orders", 1),
        entity("ds-customers", "Customers", EntityKind::Dataset, "customer master", 2),
        entity("st-clicks", "clickstream", EntityKind::Stream, "web clicks", 3),
        entity("app-sales", "SalesReport", EntityKind::Application, "nightly report", 4),
        entity("pg-etl", "etl_loader", EntityKind::Program, "loads sales data", 5),
        entity("art-core", "core-plugins", EntityKind::Artifact, "plugin bundle", 6),
        entity("ds-archive", "archive", EntityKind::Dataset, "old orders", 7),
    ]
}

fn seeded_db() -> (TempDir, PathBuf) {
    let (temp_dir, db_path) = temp_db();
    insert_entities(&db_path, &fixture()).expect("fixture insert should succeed");
    (temp_dir, db_path)
}

fn query(search: &str, kinds: Vec<EntityKind>, sort: Option<EntitySort>) -> EntityQuery {
    EntityQuery {
        search: search.to_string(),
        kinds,
        sort,
        page: 1,
        page_size: 50,
    }
}

fn names(entities: &[Entity]) -> Vec<&str> {
    entities.iter().map(|entity| entity.name.as_str()).collect()
}

#[test]
fn init_db_creates_entity_table() {
    let (_temp_dir, db_path) = temp_db();

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'entity'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 1, "entity table should exist");
}

#[test]
fn insert_upserts_by_id() {
    let (_temp_dir, db_path) = seeded_db();
    let renamed = entity("ds-orders", "orders_v2", EntityKind::Dataset, "", 1);
    insert_entities(&db_path, &[renamed]).expect("upsert should succeed");

    assert_eq!(count_entities(&db_path).expect("count should succeed"), 7);
    let page = query_page(&db_path, &query("orders_v2", vec![], None)).expect("query");
    assert_eq!(names(&page.entities), vec!["orders_v2"]);
}

#[test]
fn default_order_is_case_insensitive_name() {
    let (_temp_dir, db_path) = seeded_db();
    let page = query_page(&db_path, &query("", vec![], None)).expect("query should succeed");

    assert_eq!(page.total, 7);
    assert_eq!(
        names(&page.entities),
        vec![
            "archive",
            "clickstream",
            "core-plugins",
            "Customers",
            "etl_loader",
            "orders",
            "SalesReport"
        ]
    );
}

#[test]
fn search_matches_name_or_description_with_prefix_first() {
    let (_temp_dir, db_path) = seeded_db();
    let page = query_page(&db_path, &query("sales", vec![], None)).expect("query should succeed");

    assert_eq!(page.total, 3);
    assert_eq!(names(&page.entities), vec!["SalesReport", "etl_loader", "orders"]);
}

#[test]
fn search_treats_like_wildcards_literally() {
    let (_temp_dir, db_path) = seeded_db();
    let page = query_page(&db_path, &query("etl_", vec![], None)).expect("query should succeed");
    assert_eq!(names(&page.entities), vec!["etl_loader"]);

    let page = query_page(&db_path, &query("%", vec![], None)).expect("query should succeed");
    assert_eq!(page.total, 0);
}

#[test]
fn kinds_restrict_results() {
    let (_temp_dir, db_path) = seeded_db();
    let page = query_page(
        &db_path,
        &query("", vec![EntityKind::Dataset, EntityKind::Stream], None),
    )
    .expect("query should succeed");

    assert_eq!(page.total, 4);
    assert!(page
        .entities
        .iter()
        .all(|entity| matches!(entity.kind, EntityKind::Dataset | EntityKind::Stream)));
}

#[test]
fn sort_by_creation_time_descending() {
    let (_temp_dir, db_path) = seeded_db();
    let sort = EntitySort {
        field: "created".to_string(),
        order: SortOrder::Desc,
    };
    let page = query_page(&db_path, &query("", vec![EntityKind::Dataset], Some(sort)))
        .expect("query should succeed");

    assert_eq!(names(&page.entities), vec!["archive", "Customers", "orders"]);
    assert_eq!(page.entities[0].created_at, at(7));
}

#[test]
fn unknown_sort_field_is_rejected() {
    let (_temp_dir, db_path) = seeded_db();
    let sort = EntitySort {
        field: "size; DROP TABLE entity".to_string(),
        order: SortOrder::Asc,
    };
    let result = query_page(&db_path, &query("", vec![], Some(sort)));

    assert!(matches!(result, Err(CatalogError::UnknownSortField(_))));
}

#[test]
fn zero_page_size_is_rejected() {
    let (_temp_dir, db_path) = seeded_db();
    let mut request = query("", vec![], None);
    request.page_size = 0;

    assert_eq!(
        query_page(&db_path, &request),
        Err(CatalogError::InvalidPageSize(0))
    );
}

#[test]
fn pages_are_one_based() {
    let (_temp_dir, db_path) = seeded_db();
    let mut request = query("", vec![], None);
    request.page_size = 3;
    request.page = 3;

    let page = query_page(&db_path, &request).expect("query should succeed");
    assert_eq!(page.total, 7);
    assert_eq!(names(&page.entities), vec!["SalesReport"]);
}

#[test]
fn query_service_reports_pagination_and_clamps_past_the_end() {
    let (_temp_dir, db_path) = seeded_db();
    let catalog: Arc<dyn EntityCatalog> = Arc::new(SqliteCatalog::new(db_path));
    let service = QueryService::new(catalog);

    let mut list_query = ListQuery::default();
    let listing = service.load(&list_query, 3).expect("load should succeed");
    assert_eq!(listing.pagination.number_of_pages, 3);
    assert_eq!(listing.pagination.number_of_entities, 7);
    assert_eq!(listing.entities.len(), 3);

    list_query.set_page(9);
    let listing = service.load(&list_query, 3).expect("load should succeed");
    assert_eq!(listing.pagination.current_page, 3);
    assert_eq!(names(&listing.entities), vec!["SalesReport"]);
}

#[test]
fn query_service_on_empty_catalog_suppresses_pagination() {
    let (_temp_dir, db_path) = temp_db();
    let service = QueryService::new(Arc::new(SqliteCatalog::new(db_path)));

    let listing = service
        .load(&ListQuery::default(), 10)
        .expect("load should succeed");
    assert_eq!(listing.pagination.number_of_pages, 0);
    assert_eq!(listing.pagination.current_page, 1);

    let controller = ListViewController::new(
        app::header_config(
            &ListQuery::default(),
            listing.pagination,
            default_filter_options(),
            default_sort_options(),
        ),
        DEFAULT_SEARCH_DEBOUNCE,
        CountMarker::Always,
    );
    assert_eq!(
        controller.pagination_zone(&ListLabels::default()),
        PaginationZone::Hidden
    );
}

#[test]
fn csv_import_reads_entities_in_any_column_order() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let csv_path = temp_dir.path().join("entities.csv");
    fs::write(
        &csv_path,
        "name,id,kind,created_at,description\n\
         orders,ds-orders,dataset,2024-03-01T12:00:00Z,raw orders\n\
         clicks,st-clicks,Stream,2024-03-02T08:30:00+02:00,\n",
    )
    .expect("should write csv fixture");

    let entities = read_entities_csv(&csv_path).expect("csv should parse");

    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].id, EntityId::from("ds-orders"));
    assert_eq!(entities[1].kind, EntityKind::Stream);
    assert_eq!(
        entities[1].created_at,
        Utc.with_ymd_and_hms(2024, 3, 2, 6, 30, 0).single().expect("date")
    );
    assert_eq!(entities[1].description, "");
}

#[test]
fn csv_import_rejects_unknown_kind_and_missing_header() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");
    let bad_kind = temp_dir.path().join("bad_kind.csv");
    fs::write(
        &bad_kind,
        "id,name,kind,description,created_at\nw1,widget,widget,,2024-03-01T00:00:00Z\n",
    )
    .expect("should write csv fixture");
    let err = read_entities_csv(&bad_kind).expect_err("unknown kind should fail");
    assert!(err.to_string().contains("line 2"), "{err}");

    let no_kind = temp_dir.path().join("no_kind.csv");
    fs::write(&no_kind, "id,name,description,created_at\n").expect("should write csv");
    let err = read_entities_csv(&no_kind).expect_err("missing header should fail");
    assert!(err.to_string().contains("`kind`"), "{err}");
}

#[test]
fn seed_only_imports_into_empty_catalog() {
    let (temp_dir, db_path) = temp_db();
    let csv_path = temp_dir.path().join("seed.csv");
    fs::write(
        &csv_path,
        "id,name,kind,description,created_at\n\
         ds-a,alpha,dataset,,2024-03-01T00:00:00Z\n\
         ds-b,beta,dataset,,2024-03-02T00:00:00Z\n",
    )
    .expect("should write csv fixture");

    let catalog: Arc<dyn EntityCatalog> = Arc::new(SqliteCatalog::new(db_path));
    let service = ImportService::new(catalog.clone());

    assert_eq!(service.seed_if_empty(&csv_path).expect("seed"), Some(2));
    assert_eq!(service.seed_if_empty(&csv_path).expect("seed"), None);
    assert_eq!(catalog.count_entities().expect("count"), 2);
}

#[test]
fn list_query_edits_reset_to_first_page() {
    let mut list_query = ListQuery {
        current_page: 4,
        ..ListQuery::default()
    };
    list_query.search("sales");
    assert_eq!(list_query.current_page, 1);

    list_query.set_page(3);
    list_query.toggle_filter("dataset");
    assert_eq!(list_query.current_page, 1);
    assert!(list_query.active_filter.contains("dataset"));

    list_query.set_page(0);
    assert_eq!(list_query.current_page, 1);
}

#[test]
fn search_drops_active_sort() {
    let mut list_query = ListQuery::default();
    list_query.select_sort(&SortOption::new("Newest", "created", SortOrder::Desc));
    list_query.search("");
    assert!(list_query.active_sort.is_some());
    list_query.search("orders");
    assert_eq!(list_query.active_sort, None);
}

#[test]
fn selecting_active_sort_clears_it() {
    let name_asc = SortOption::new("Name A-Z", "name", SortOrder::Asc);
    let mut list_query = ListQuery::default();
    list_query.select_sort(&name_asc);
    assert_eq!(list_query.active_sort.as_ref(), Some(&name_asc));
    list_query.select_sort(&name_asc);
    assert_eq!(list_query.active_sort, None);
}

#[test]
fn list_queries_with_same_filters_in_other_order_are_equal() {
    let mut picked = ListQuery::default();
    picked.toggle_filter("dataset");
    picked.toggle_filter("stream");
    let mut reversed = ListQuery::default();
    reversed.toggle_filter("stream");
    reversed.toggle_filter("dataset");

    assert_eq!(picked, reversed);
}

#[test]
fn unknown_filter_ids_do_not_reach_the_catalog() {
    let (_temp_dir, db_path) = seeded_db();
    let service = QueryService::new(Arc::new(SqliteCatalog::new(db_path)));
    let list_query = ListQuery {
        active_filter: ["dataset", "ghost"].into_iter().collect::<ActiveFilterSet>(),
        ..ListQuery::default()
    };

    let listing = service.load(&list_query, 50).expect("load should succeed");
    assert_eq!(
        names(&listing.entities),
        vec!["archive", "Customers", "orders"]
    );
}

#[test]
fn blank_search_keeps_sort_and_browses_everything() {
    let (_temp_dir, db_path) = seeded_db();
    let service = QueryService::new(Arc::new(SqliteCatalog::new(db_path)));
    let newest = SortOption::new("Newest", "created", SortOrder::Desc);
    let mut list_query = ListQuery::default();
    list_query.select_sort(&newest);

    list_query.search("   ");

    assert!(!list_query.has_search());
    assert_eq!(list_query.active_sort.as_ref(), Some(&newest));
    let listing = service.load(&list_query, 50).expect("load should succeed");
    assert_eq!(listing.pagination.number_of_entities, 7);
    assert_eq!(listing.entities[0].name, "archive");

    let config = app::header_config(
        &list_query,
        listing.pagination,
        default_filter_options(),
        default_sort_options(),
    );
    assert!(!config.is_sort_disabled);
}

#[test]
fn header_config_mirrors_query() {
    let mut list_query = ListQuery::default();
    list_query.toggle_filter("dataset");
    list_query.set_page(2);
    let pagination = PaginationState {
        current_page: 2,
        number_of_pages: 3,
        number_of_entities: 25,
    };

    let config = app::header_config(
        &list_query,
        pagination,
        default_filter_options(),
        default_sort_options(),
    );

    assert!(config.active_filter.contains("dataset"));
    assert_eq!(config.pagination, pagination);
    assert!(!config.is_sort_disabled);
}

#[test]
fn searching_disables_sort() {
    let mut list_query = ListQuery::default();
    list_query.search("sales");
    let config = app::header_config(
        &list_query,
        PaginationState::default(),
        default_filter_options(),
        default_sort_options(),
    );
    assert!(config.is_sort_disabled);
    assert_eq!(config.search_text, "sales");
}

/// Routes header events into a `ListQuery`, the way the root view does.
struct QueryOwner {
    query: ListQuery,
}

impl ListViewEvents for QueryOwner {
    fn on_search(&mut self, text: &str) {
        self.query.search(text);
    }

    fn on_filter_click(&mut self, option: &FilterOption) {
        self.query.toggle_filter(&option.id);
    }

    fn on_sort_click(&mut self, option: &SortOption) {
        self.query.select_sort(option);
    }

    fn on_page_change(&mut self, page: usize) {
        self.query.set_page(page);
    }
}

#[test]
fn header_round_trip_through_parent_query() {
    let (_temp_dir, db_path) = seeded_db();
    let service = QueryService::new(Arc::new(SqliteCatalog::new(db_path)));
    let labels = ListLabels::default();
    let mut owner = QueryOwner {
        query: ListQuery::default(),
    };

    let deliver = |owner: &QueryOwner| {
        let listing = service.load(&owner.query, 2).expect("load should succeed");
        app::header_config(
            &owner.query,
            listing.pagination,
            default_filter_options(),
            default_sort_options(),
        )
    };

    let mut controller =
        ListViewController::new(deliver(&owner), DEFAULT_SEARCH_DEBOUNCE, CountMarker::Always);
    assert_eq!(controller.summary(5, &labels), "Displaying all");

    let datasets = default_filter_options()
        .into_iter()
        .find(|option| option.id == "dataset")
        .expect("dataset filter option");
    controller.toggle_filter(&datasets, &mut owner);
    controller.configure(deliver(&owner));
    assert!(controller.is_filter_checked("dataset"));
    assert_eq!(controller.summary(5, &labels), "Displaying Datasets");

    controller.change_page(1, &mut owner);
    controller.configure(deliver(&owner));
    assert_eq!(controller.config().pagination.current_page, 2);

    let start = Instant::now();
    controller.set_search_text("or", start);
    controller.set_search_text("orders", start + Duration::from_millis(200));
    assert!(controller.poll(start + Duration::from_millis(700), &mut owner));
    controller.configure(deliver(&owner));

    assert_eq!(
        controller.summary(5, &labels),
        "Searching \"orders\", filtered by Datasets"
    );
    assert_eq!(controller.config().pagination.current_page, 1);
    assert!(controller.config().is_sort_disabled);
    assert_eq!(
        controller.pagination_zone(&labels),
        PaginationZone::CountOnly {
            count_label: "2+ Entities".to_string()
        }
    );
}

#[test]
fn ensure_webview_data_dir_creates_subdir() {
    let temp_dir = tempfile::tempdir().expect("should create temp dir");

    let created = ensure_webview_data_dir(temp_dir.path()).expect("should create webview dir");

    assert_eq!(created, temp_dir.path().join("webview"));
    assert!(created.is_dir());
}
