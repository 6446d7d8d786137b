//! End-to-end table scenarios: registration, querying, navigation,
//! selection, and export working together.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use chrono::NaiveDate;
use gridtable_lib::Table;
use gridtable_lib::model::Column;
use gridtable_lib::model::ColumnKind;
use gridtable_lib::model::Value;
use gridtable_lib::query::Direction;
use gridtable_lib::query::Predicate;
use gridtable_lib::selection::SelectionMode;

#[derive(Debug, Clone, PartialEq)]
struct Order {
    id: i64,
    customer: &'static str,
    total: f64,
    placed: Option<NaiveDate>,
}

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn orders(count: i64) -> Vec<Order> {
    (1..=count)
        .map(|id| Order {
            id,
            customer: if id % 2 == 0 { "Contoso" } else { "Fabrikam" },
            total: id as f64 * 10.0,
            placed: Some(day(3, (id % 28 + 1) as u32)),
        })
        .collect()
}

fn basic_table(page_size: usize) -> Table<Order> {
    let mut table = Table::new(page_size);
    table.add_column(
        Column::new("Id")
            .with_field(|o: &Order| Value::from(o.id))
            .with_kind(ColumnKind::Number),
    );
    table.add_column(
        Column::new("Customer")
            .with_field(|o: &Order| Value::from(o.customer))
            .with_kind(ColumnKind::Text),
    );
    table.add_column(
        Column::new("Total")
            .with_field(|o: &Order| Value::from(o.total))
            .with_kind(ColumnKind::Number),
    );
    table
}

#[test]
fn next_is_guarded_at_the_last_page() {
    let mut table = basic_table(10);
    table.set_items(orders(25));

    assert_eq!(table.total_pages(), 3);

    table.next_page();
    table.next_page();
    table.next_page(); // guarded: already on the last page
    assert_eq!(table.page_number(), 2);
    assert_eq!(table.filtered_items().len(), 5);

    table.previous_page();
    assert_eq!(table.page_number(), 1);
    table.first_page();
    assert_eq!(table.page_number(), 0);
    table.last_page();
    assert_eq!(table.page_number(), 2);
}

#[test]
fn unpaged_table_has_one_page() {
    let mut table = basic_table(0);
    table.set_items(orders(25));

    assert_eq!(table.total_pages(), 1);
    assert_eq!(table.filtered_items().len(), 25);
    assert_eq!(table.non_paged_filtered_items().len(), 25);

    // Navigation is a no-op without pages to move between.
    table.next_page();
    assert_eq!(table.page_number(), 0);
}

#[test]
fn total_count_ignores_paging() {
    let mut table = basic_table(10);
    table.set_items(orders(25));

    table.next_page();
    assert_eq!(table.total_count(), 25);

    table.set_page_size(7);
    assert_eq!(table.total_count(), 25);
    assert_eq!(table.total_pages(), 4);
}

#[test]
fn filter_change_clamps_the_current_page() {
    let mut table = basic_table(10);
    table.set_items(orders(25));
    table.last_page();
    assert_eq!(table.page_number(), 2);

    // "contoso" keeps 12 of 25 rows; page 2 no longer exists.
    table.set_global_search("contoso");
    assert_eq!(table.total_count(), 12);
    assert_eq!(table.total_pages(), 2);
    assert_eq!(table.page_number(), 1);
}

#[test]
fn search_keywords_must_each_match_somewhere() {
    let mut table = basic_table(0);
    table.set_items(orders(25));

    // "contoso 4": even-id rows whose stringified cells also contain "4".
    table.set_global_search("contoso 4");
    let combined: Vec<i64> = table.filtered_items().iter().map(|o| o.id).collect();

    table.set_global_search("contoso");
    let first: Vec<Order> = table.filtered_items().to_vec();
    let mut narrowed = basic_table(0);
    narrowed.set_items(first);
    narrowed.set_global_search("4");
    let chained: Vec<i64> = narrowed.filtered_items().iter().map(|o| o.id).collect();

    assert_eq!(combined, chained);
    assert!(!combined.is_empty());
}

#[test]
fn sorting_follows_the_single_active_column() {
    let mut table = basic_table(0);
    table.set_items(orders(5));

    table.set_sort_column("Total", Direction::Desc).unwrap();
    let ids: Vec<i64> = table.filtered_items().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![5, 4, 3, 2, 1]);

    table.toggle_sort("Total").unwrap(); // descending -> ascending
    let ids: Vec<i64> = table.filtered_items().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let active: Vec<&str> = table
        .columns()
        .iter()
        .filter(|c| c.is_sort_column())
        .map(|c| c.title())
        .collect();
    assert_eq!(active, vec!["Total"]);

    table.clear_sort();
    let ids: Vec<i64> = table.filtered_items().iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn sorting_a_column_without_accessor_fails() {
    let mut table = basic_table(0);
    table.add_column(Column::new("Actions"));
    table.set_items(orders(3));

    assert!(table.set_sort_column("Actions", Direction::Asc).is_err());
    assert!(table.set_sort_column("Missing", Direction::Asc).is_err());
}

#[test]
fn hiding_a_column_round_trips_its_configuration() {
    let mut table = basic_table(0);
    table.set_items(orders(10));
    table.set_sort_column("Total", Direction::Desc).unwrap();

    table.hide_column("Total");
    assert_eq!(table.visible_columns().count(), 2);
    // Hidden columns keep filtering and sorting.
    let ids: Vec<i64> = table.filtered_items().iter().map(|o| o.id).take(2).collect();
    assert_eq!(ids, vec![10, 9]);

    table.show_column("Total");
    let total = table
        .columns()
        .iter()
        .find(|c| c.title() == "Total")
        .unwrap();
    assert!(total.is_sort_column());
    assert!(total.is_sort_descending());
}

#[test]
fn initially_hidden_columns_by_index_and_title() {
    let mut table: Table<Order> = Table::new(0)
        .with_hidden_titles(["Total"])
        .with_hidden_indices([0]);
    table.add_column(Column::new("Id").with_field(|o: &Order| Value::from(o.id)));
    table.add_column(Column::new("Customer").with_field(|o: &Order| Value::from(o.customer)));
    table.add_column(Column::new("Total").with_field(|o: &Order| Value::from(o.total)));

    let visible: Vec<&str> = table.visible_columns().map(|c| c.title()).collect();
    assert_eq!(visible, vec!["Customer"]);
}

#[test]
fn reorder_inserts_source_before_target() {
    let mut table = basic_table(0);

    table.reorder_column("Total", "Id").unwrap();
    let titles: Vec<&str> = table.columns().iter().map(|c| c.title()).collect();
    assert_eq!(titles, vec!["Total", "Id", "Customer"]);

    table.reorder_column("Id", "Customer").unwrap();
    let titles: Vec<&str> = table.columns().iter().map(|c| c.title()).collect();
    assert_eq!(titles, vec!["Total", "Id", "Customer"]);

    assert!(table.reorder_column("Nope", "Id").is_err());
    assert!(table.reorder_column("Id", "Nope").is_err());
    // A failed reorder leaves the sequence untouched.
    let titles: Vec<&str> = table.columns().iter().map(|c| c.title()).collect();
    assert_eq!(titles, vec!["Total", "Id", "Customer"]);
}

#[test]
fn per_column_filters_conjoin_with_search() {
    let mut table = basic_table(0);
    table.add_column(
        Column::new("Big")
            .with_field(|o: &Order| Value::from(o.total))
            .with_filter(Predicate::new(|o: &Order| o.total >= 100.0)),
    );
    table.set_items(orders(25));
    assert_eq!(table.total_count(), 16);

    table.set_global_search("fabrikam");
    let ids: Vec<i64> = table.filtered_items().iter().map(|o| o.id).collect();
    assert!(ids.iter().all(|id| id % 2 == 1 && *id >= 10));
}

#[test]
fn selection_modes_follow_click_semantics() {
    let mut table = basic_table(0);
    let items = orders(3);
    table.set_items(items.clone());

    // None: clicks never select.
    table.handle_row_click(&items[0]);
    assert!(table.selected_items().is_empty());

    table.set_selection_mode(SelectionMode::Single);
    table.handle_row_click(&items[0]);
    table.handle_row_click(&items[1]);
    assert_eq!(table.selected_items(), &items[1..2]);

    table.set_selection_mode(SelectionMode::Multiple);
    table.handle_row_click(&items[0]);
    table.handle_row_click(&items[2]);
    table.handle_row_click(&items[0]); // toggles the first off again
    assert_eq!(table.selected_items(), vec![items[1].clone(), items[2].clone()]);

    table.set_selection_mode(SelectionMode::Single);
    assert_eq!(table.selected_items(), &items[1..2]);
    table.set_selection_mode(SelectionMode::None);
    assert!(table.selected_items().is_empty());
}

#[test]
fn failing_row_callback_does_not_block_selection() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);
    let mut table = basic_table(0).with_row_click(move |_order: &Order| {
        seen.fetch_add(1, Ordering::SeqCst);
        Err("boom".into())
    });
    table.set_selection_mode(SelectionMode::Multiple);

    let items = orders(2);
    table.set_items(items.clone());
    table.handle_row_click(&items[0]);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(table.selected_items(), &items[0..1]);
}

#[test]
fn export_covers_the_rendered_page() {
    let mut table = basic_table(2);
    table.set_items(orders(5));
    table.next_page();

    let payload = table.export_csv("orders.csv").unwrap();
    assert_eq!(payload.filename, "orders.csv");
    assert_eq!(payload.content_type, "text/csv");
    assert_eq!(payload.as_text(), "Id,Customer,Total\n3,Fabrikam,30\n4,Contoso,40\n");
}
