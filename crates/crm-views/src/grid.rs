//! The customer grid for one table.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crm_core::{CrmError, CrmResult, Editable, MultiSelection};
use crm_domain::sort::sort_records;
use crm_domain::{
    ColumnConfig, ColumnLayout, CompositeFilter, Customer, CustomerId, CustomerProfileDto,
    FileAttachment, Outcome, Snapshot, SortDescriptor, Store, SubscriptionId, TableId,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GridRow {
    pub customer: Customer,
    pub selected: bool,
    pub editing: bool,
}

/// What the grid widget is handed on each render.
#[derive(Debug, Clone, Serialize)]
pub struct GridProjection {
    pub table_id: TableId,
    pub table_name: String,
    pub columns: Vec<ColumnConfig>,
    pub rows: Vec<GridRow>,
    /// Customers in the table before filtering.
    pub total: usize,
    pub all_selected: bool,
}

type Selection = MultiSelection<CustomerId>;

#[derive(Debug)]
pub struct GridView {
    table_id: TableId,
    layout: ColumnLayout,
    sort: Vec<SortDescriptor>,
    filter: CompositeFilter,
    /// Shared with the store listener installed by `attach`.
    selection: Rc<RefCell<Selection>>,
    editing: Option<CustomerId>,
    subscription: Option<SubscriptionId>,
}

/// Drop selected ids that are gone from the table, or everything when the
/// table itself is gone.
fn prune(selection: &mut Selection, snapshot: &Snapshot, table_id: TableId) {
    match snapshot.table(table_id) {
        Some(table) => selection.retain_existing(table.customer_ids()),
        None => selection.clear(),
    }
}

impl GridView {
    pub fn new(table_id: TableId) -> Self {
        Self {
            table_id,
            layout: ColumnLayout::default_grid(),
            sort: Vec::new(),
            filter: CompositeFilter::default(),
            selection: Rc::new(RefCell::new(Selection::new())),
            editing: None,
            subscription: None,
        }
    }

    /// Prune the selection on every snapshot `store` publishes, so an id
    /// freed by a delete is not selected when a later add reuses it.
    pub fn attach(&mut self, store: &mut Store) -> SubscriptionId {
        self.detach(store);
        let table_id = self.table_id;
        let selection = Rc::downgrade(&self.selection);
        let id = store.subscribe(move |snapshot: &Arc<Snapshot>| {
            if let Some(selection) = selection.upgrade() {
                prune(&mut selection.borrow_mut(), snapshot, table_id);
            }
        });
        self.subscription = Some(id);
        id
    }

    pub fn detach(&mut self, store: &mut Store) {
        if let Some(id) = self.subscription.take() {
            store.unsubscribe(id);
        }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// The grid's data-state change: new sort and filter descriptors together.
    pub fn set_data_state(&mut self, sort: Vec<SortDescriptor>, filter: CompositeFilter) {
        self.sort = sort;
        self.filter = filter;
    }

    /// Filtered, then sorted, customers of this grid's table.
    pub fn rows<'a>(&self, snapshot: &'a Snapshot) -> Vec<&'a Customer> {
        let Some(table) = snapshot.table(self.table_id) else {
            return Vec::new();
        };
        let mut rows = self.filter.apply(&table.customers);
        sort_records(&mut rows, &self.sort);
        rows
    }

    /// Only ids still in the table count as selected, both per row and for
    /// the header checkbox.
    pub fn project(&self, snapshot: &Snapshot) -> Option<GridProjection> {
        let table = snapshot.table(self.table_id)?;
        let selection = self.selection.borrow();
        let selected_count = table
            .customer_ids()
            .filter(|id| selection.contains(*id))
            .count();
        let rows = self
            .rows(snapshot)
            .into_iter()
            .map(|c| GridRow {
                customer: c.clone(),
                selected: selection.contains(c.id),
                editing: self.editing == Some(c.id),
            })
            .collect();
        Some(GridProjection {
            table_id: table.id,
            table_name: table.name.clone(),
            columns: self.layout.visible().cloned().collect(),
            rows,
            total: table.customers.len(),
            all_selected: selected_count > 0 && selected_count == table.customers.len(),
        })
    }

    /// Drop selection and edit state for customers that no longer exist.
    pub fn sync(&mut self, snapshot: &Snapshot) {
        prune(&mut self.selection.borrow_mut(), snapshot, self.table_id);
        let table = snapshot.table(self.table_id);
        if let Some(id) = self.editing {
            if table.and_then(|t| t.customer(id)).is_none() {
                self.editing = None;
            }
        }
    }

    // Selection

    pub fn toggle_select(&mut self, customer_id: CustomerId) {
        self.selection.borrow_mut().toggle(customer_id);
    }

    /// Header checkbox: select every customer, or none if all are selected.
    pub fn toggle_select_all(&mut self, snapshot: &Snapshot) {
        let ids: Vec<CustomerId> = snapshot
            .table(self.table_id)
            .map(|t| t.customer_ids().collect())
            .unwrap_or_default();
        self.selection.borrow_mut().toggle_all(ids);
    }

    pub fn selected_ids(&self) -> Vec<CustomerId> {
        self.selection.borrow().to_vec()
    }

    pub fn delete_selected(&mut self, store: &mut Store) -> CrmResult<Outcome> {
        let doomed = self.selection.borrow_mut().take();
        if doomed.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        let outcome = store.delete_customers(self.table_id, doomed)?;
        self.sync(&store.snapshot());
        Ok(outcome)
    }

    // Edit session

    pub fn editing(&self) -> Option<CustomerId> {
        self.editing
    }

    /// Put the clicked row in edit mode, ending any other row's edit.
    /// Returns false if the customer is not in this table.
    pub fn click_row(&mut self, snapshot: &Snapshot, customer_id: CustomerId) -> bool {
        let exists = snapshot
            .table(self.table_id)
            .is_some_and(|t| t.customer(customer_id).is_some());
        if exists {
            self.editing = Some(customer_id);
        }
        exists
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    /// Merge one typed cell value into the row being edited.
    pub fn item_change(
        &mut self,
        store: &mut Store,
        customer_id: CustomerId,
        field: &str,
        value: &str,
    ) -> CrmResult<Outcome> {
        if self.editing != Some(customer_id) {
            let message = format!("customer {} is not being edited", customer_id);
            return Err(CrmError::validation(message));
        }
        let Some(mut customer) = self.current_customer(store, customer_id) else {
            return Ok(Outcome::Unchanged);
        };
        customer.set_field(field, value)?;
        store.update_customer(self.table_id, customer)
    }

    /// Save the owner-profile popup.
    pub fn save_profile(
        &mut self,
        store: &mut Store,
        customer_id: CustomerId,
        profile: CustomerProfileDto,
    ) -> CrmResult<Outcome> {
        let Some(mut customer) = self.current_customer(store, customer_id) else {
            return Ok(Outcome::Unchanged);
        };
        profile.apply_to(&mut customer);
        store.update_customer(self.table_id, customer)
    }

    pub fn upload_files(
        &mut self,
        store: &mut Store,
        customer_id: CustomerId,
        files: Vec<FileAttachment>,
    ) -> CrmResult<Outcome> {
        let Some(mut customer) = self.current_customer(store, customer_id) else {
            return Ok(Outcome::Unchanged);
        };
        customer.attach_files(files);
        store.update_customer(self.table_id, customer)
    }

    // Table operations

    pub fn add_row(&mut self, store: &mut Store) -> CrmResult<Option<CustomerId>> {
        store.add_customer(self.table_id)
    }

    pub fn rename_table(&mut self, store: &mut Store, name: &str) -> CrmResult<Outcome> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Outcome::Unchanged);
        }
        store.update_table_name(self.table_id, name)
    }

    pub fn delete_table(&mut self, store: &mut Store) -> CrmResult<Outcome> {
        let outcome = store.delete_table(self.table_id)?;
        self.sync(&store.snapshot());
        Ok(outcome)
    }

    // Columns

    pub fn toggle_column(&mut self, field: &str) -> bool {
        self.layout.toggle_visibility(field)
    }

    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        self.layout.move_column(from, to)
    }

    /// Add a custom column and give every customer an empty value for it.
    /// Returns the new field key, or `None` for a blank title.
    pub fn add_custom_column(
        &mut self,
        store: &mut Store,
        title: &str,
    ) -> CrmResult<Option<String>> {
        let Some(field) = self.layout.add_custom(title)?.map(|c| c.field.clone()) else {
            return Ok(None);
        };
        for mut customer in self.table_customers(store) {
            customer.extensions.insert(field.clone(), String::new());
            store.update_customer(self.table_id, customer)?;
        }
        tracing::debug!("Added custom column '{}' to table {}", field, self.table_id);
        Ok(Some(field))
    }

    /// Remove a column from the layout. Custom columns also lose their
    /// values on every customer; built-in fields keep their data.
    pub fn delete_column(&mut self, store: &mut Store, field: &str) -> CrmResult<bool> {
        let Some(column) = self.layout.remove(field) else {
            return Ok(false);
        };
        if column.is_custom {
            for mut customer in self.table_customers(store) {
                if customer.remove_extension(field).is_some() {
                    store.update_customer(self.table_id, customer)?;
                }
            }
        }
        Ok(true)
    }

    fn current_customer(&self, store: &Store, customer_id: CustomerId) -> Option<Customer> {
        store
            .snapshot()
            .table(self.table_id)
            .and_then(|t| t.customer(customer_id))
            .cloned()
    }

    fn table_customers(&self, store: &Store) -> Vec<Customer> {
        store
            .snapshot()
            .table(self.table_id)
            .map(|t| t.customers.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crm_domain::seed::demo_snapshot;
    use crm_domain::{CustomerStatus, FilterDescriptor, FilterLogic, FilterOperator, Priority};

    fn store() -> Store {
        Store::new(demo_snapshot(Utc::now()))
    }

    fn ids(rows: &[&Customer]) -> Vec<CustomerId> {
        rows.iter().map(|c| c.id).collect()
    }

    fn all_customers(store: &Store, check: impl Fn(&Customer) -> bool) -> bool {
        store.snapshot().tables[0].customers.iter().all(check)
    }

    #[test]
    fn test_rows_filter_then_sort() {
        let store = store();
        let mut grid = GridView::new(1);
        let open = FilterDescriptor::new("status", FilterOperator::Neq, "Closed");
        let filter = CompositeFilter::new(FilterLogic::And).with_filter(open);
        grid.set_data_state(vec![SortDescriptor::asc("name")], filter);

        let snapshot = store.snapshot();
        // Ann Brown, Jane Smith, John Doe; Rose Johnson is closed
        assert_eq!(ids(&grid.rows(&snapshot)), vec![4, 2, 1]);
    }

    #[test]
    fn test_rows_for_missing_table() {
        let store = store();
        let grid = GridView::new(9);
        assert!(grid.rows(&store.snapshot()).is_empty());
        assert!(grid.project(&store.snapshot()).is_none());
    }

    #[test]
    fn test_select_all_toggles() {
        let store = store();
        let mut grid = GridView::new(1);
        grid.toggle_select(2);
        grid.toggle_select_all(&store.snapshot());
        assert_eq!(grid.selected_ids(), vec![1, 2, 3, 4]);
        assert!(grid.project(&store.snapshot()).unwrap().all_selected);

        grid.toggle_select_all(&store.snapshot());
        assert!(grid.selected_ids().is_empty());
    }

    #[test]
    fn test_all_selected_counts_only_live_rows() {
        let mut store = store();
        let mut grid = GridView::new(1);
        grid.toggle_select(1);
        grid.toggle_select(4);
        store.delete_customers(1, [2, 3, 4]).unwrap();

        let projection = grid.project(&store.snapshot()).unwrap();
        assert_eq!(projection.rows.len(), 1);
        assert!(projection.rows[0].selected);
        assert!(projection.all_selected);
    }

    #[test]
    fn test_reused_id_is_not_selected() {
        let mut store = store();
        let mut grid = GridView::new(1);
        grid.attach(&mut store);
        grid.toggle_select_all(&store.snapshot());

        store.delete_customers(1, [4]).unwrap();
        assert_eq!(store.add_customer(1).unwrap(), Some(4));

        let projection = grid.project(&store.snapshot()).unwrap();
        let fresh = projection.rows.iter().find(|r| r.customer.id == 4).unwrap();
        assert!(!fresh.selected);
        assert!(!projection.all_selected);
        assert_eq!(grid.selected_ids(), vec![1, 2, 3]);
    }

    #[test]
    fn test_detach_stops_pruning() {
        let mut store = store();
        let mut grid = GridView::new(1);
        let id = grid.attach(&mut store);
        grid.detach(&mut store);
        assert!(!store.unsubscribe(id));

        grid.toggle_select(4);
        store.delete_customers(1, [4]).unwrap();
        assert_eq!(grid.selected_ids(), vec![4]);
    }

    #[test]
    fn test_delete_selected() {
        let mut store = store();
        let mut grid = GridView::new(1);
        grid.toggle_select(1);
        grid.toggle_select(3);

        assert_eq!(grid.delete_selected(&mut store).unwrap(), Outcome::Applied);
        let remaining: Vec<_> = store.snapshot().tables[0].customer_ids().collect();
        assert_eq!(remaining, vec![2, 4]);
        assert!(grid.selected_ids().is_empty());

        let before = store.snapshot();
        assert_eq!(
            grid.delete_selected(&mut store).unwrap(),
            Outcome::Unchanged
        );
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_single_row_in_edit_mode() {
        let mut store = store();
        let mut grid = GridView::new(1);
        let snapshot = store.snapshot();

        assert!(grid.click_row(&snapshot, 1));
        assert!(grid.click_row(&snapshot, 2));
        assert_eq!(grid.editing(), Some(2));
        assert!(!grid.click_row(&snapshot, 99));
        assert_eq!(grid.editing(), Some(2));

        let projection = grid.project(&snapshot).unwrap();
        assert_eq!(projection.rows.iter().filter(|r| r.editing).count(), 1);

        assert!(grid.item_change(&mut store, 1, "notes", "x").is_err());
        grid.item_change(&mut store, 2, "priority", "High").unwrap();
        grid.item_change(&mut store, 2, "status", "Closed").unwrap();

        let customer = store.snapshot().tables[0].customer(2).cloned().unwrap();
        assert_eq!(customer.priority, Priority::High);
        assert_eq!(customer.status, CustomerStatus::Closed);
        assert_eq!(customer.name, "Jane Smith");

        grid.end_edit();
        assert_eq!(grid.editing(), None);
    }

    #[test]
    fn test_item_change_rejects_bad_value_without_mutation() {
        let mut store = store();
        let mut grid = GridView::new(1);
        grid.click_row(&store.snapshot(), 1);
        let before = store.snapshot();

        let result = grid.item_change(&mut store, 1, "priority", "Urgent");
        assert!(result.is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_sync_drops_deleted_rows() {
        let mut store = store();
        let mut grid = GridView::new(1);
        grid.toggle_select(4);
        grid.click_row(&store.snapshot(), 4);

        store.delete_customers(1, [4]).unwrap();
        grid.sync(&store.snapshot());

        assert!(grid.selected_ids().is_empty());
        assert_eq!(grid.editing(), None);
    }

    #[test]
    fn test_save_profile_and_upload() {
        let mut store = store();
        let mut grid = GridView::new(1);
        let profile = CustomerProfileDto {
            title: "CEO".to_string(),
            department: "Sales".to_string(),
            email: "john@tech.example".to_string(),
            phone: "555-0100".to_string(),
        };
        grid.save_profile(&mut store, 1, profile).unwrap();
        let deal = FileAttachment::from_name("deal.pdf", 2048);
        grid.upload_files(&mut store, 1, vec![deal]).unwrap();
        let notes = FileAttachment::from_name("notes.txt", 12);
        grid.upload_files(&mut store, 1, vec![notes]).unwrap();

        let customer = store.snapshot().tables[0].customer(1).cloned().unwrap();
        assert_eq!(customer.title.as_deref(), Some("CEO"));
        assert_eq!(customer.email, "john@tech.example");
        assert_eq!(customer.files.len(), 2);
        assert_eq!(customer.files[0].extension, ".pdf");
    }

    #[test]
    fn test_custom_column_lifecycle() {
        let mut store = store();
        let mut grid = GridView::new(1);

        let added = grid.add_custom_column(&mut store, "Deal Size").unwrap();
        let field = added.unwrap();
        assert_eq!(field, "deal_size");
        let blank = String::new();
        assert!(all_customers(&store, |c| c.extensions.get("deal_size") == Some(&blank)));

        grid.click_row(&store.snapshot(), 3);
        grid.item_change(&mut store, 3, "deal_size", "50k").unwrap();
        let deal = FilterDescriptor::contains("deal_size", "50");
        let filter = CompositeFilter::default().with_filter(deal);
        grid.set_data_state(Vec::new(), filter);
        assert_eq!(ids(&grid.rows(&store.snapshot())), vec![3]);

        assert!(grid.delete_column(&mut store, "deal_size").unwrap());
        assert!(all_customers(&store, |c| c.extensions.is_empty()));
        assert!(!grid.delete_column(&mut store, "deal_size").unwrap());
    }

    #[test]
    fn test_deleting_builtin_column_keeps_data() {
        let mut store = store();
        let mut grid = GridView::new(1);
        assert!(grid.delete_column(&mut store, "email").unwrap());
        assert!(grid.layout().get("email").is_none());
        assert_eq!(
            store.snapshot().tables[0].customers[0].email,
            "john@techcorp.com"
        );
    }

    #[test]
    fn test_blank_custom_column_is_ignored() {
        let mut store = store();
        let mut grid = GridView::new(1);
        let before = store.snapshot();
        assert_eq!(grid.add_custom_column(&mut store, "  ").unwrap(), None);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn test_table_header_operations() {
        let mut store = store();
        let mut grid = GridView::new(1);

        assert_eq!(grid.add_row(&mut store).unwrap(), Some(5));
        assert_eq!(
            grid.rename_table(&mut store, "  ").unwrap(),
            Outcome::Unchanged
        );
        grid.rename_table(&mut store, "  Leads ").unwrap();
        assert_eq!(store.snapshot().tables[0].name, "Leads");

        grid.delete_table(&mut store).unwrap();
        assert!(store.snapshot().tables.is_empty());
    }
}
