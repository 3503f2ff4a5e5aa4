//! List/form controller state machine - pure domain logic.
//!
//! One `CrudController` instance backs each dashboard page. The pages hold
//! it in an `RwSignal` and feed it transitions from user events and network
//! completions; everything here is synchronous and host-testable.

use mesa_shared::{Address, Menu, Order, OrderStatus, Restaurant};

/// Server-owned record with an integer id once persisted.
pub trait Entity: Clone + 'static {
    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
}

impl Entity for Restaurant {
    fn id(&self) -> Option<i64> {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl Entity for Menu {
    fn id(&self) -> Option<i64> {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl Entity for Order {
    fn id(&self) -> Option<i64> {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl Entity for Address {
    fn id(&self) -> Option<i64> {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Edit,
    /// Read-only view; only the orders page uses it.
    Detail,
}

#[derive(Clone)]
pub struct CrudController<T: Entity> {
    items: Vec<T>,
    /// Copy of the entity bound to the active form. Never aliases a list
    /// entry, so form edits cannot leak into the list before a save.
    selected: Option<T>,
    mode: Mode,
    loading: bool,
    error: Option<String>,
}

impl<T: Entity> CrudController<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            mode: Mode::List,
            loading: true,
            error: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Id of the entity the form is bound to, if it has ever been persisted.
    pub fn editing_id(&self) -> Option<i64> {
        self.selected.as_ref().and_then(|e| e.id())
    }

    pub fn load_started(&mut self) {
        self.loading = true;
    }

    /// A failed load keeps whatever was loaded before; only the banner
    /// changes. The list is never wiped by a fetch error.
    pub fn load_finished(&mut self, result: Result<Vec<T>, String>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
    }

    pub fn select(&mut self, entity: &T) {
        self.selected = Some(entity.clone());
        self.mode = Mode::Edit;
    }

    pub fn create_new(&mut self) {
        self.selected = None;
        self.mode = Mode::Edit;
    }

    pub fn view_details(&mut self, entity: &T) {
        self.selected = Some(entity.clone());
        self.mode = Mode::Detail;
    }

    /// Discards unsaved form values without contacting the server.
    pub fn cancel(&mut self) {
        self.selected = None;
        self.mode = Mode::List;
    }

    /// Reconciles a successful update of an existing entity.
    ///
    /// The list entry becomes the submitted form values merged with the
    /// known id; the server echo is deliberately not consulted (see
    /// DESIGN.md for the tradeoff).
    pub fn update_saved(&mut self, id: i64, mut form: T) {
        form.set_id(id);
        if let Some(slot) = self.items.iter_mut().find(|e| e.id() == Some(id)) {
            *slot = form;
        }
        self.selected = None;
        self.mode = Mode::List;
        self.error = None;
    }

    /// Reconciles a successful create: the server-returned entity, with its
    /// newly assigned id, is appended to the end of the collection.
    pub fn create_saved(&mut self, created: T) {
        self.items.push(created);
        self.selected = None;
        self.mode = Mode::List;
        self.error = None;
    }

    /// A failed save keeps the form open and its values intact.
    pub fn save_failed(&mut self, message: String) {
        self.error = Some(message);
    }
}

impl<T: Entity> Default for CrudController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl CrudController<Order> {
    /// Builds the full PUT body for a status change from the locally known
    /// record. An id absent from the list is a local error and must not
    /// reach the network.
    pub fn status_payload(&self, id: i64, status: OrderStatus) -> Result<Order, String> {
        let Some(order) = self.items.iter().find(|o| o.id == Some(id)) else {
            return Err("Order not found.".to_string());
        };
        let mut payload = order.clone();
        payload.status = status;
        Ok(payload)
    }

    /// After the PUT succeeds, only the status field of the local entry
    /// changes; all other fields stay as previously known.
    pub fn status_applied(&mut self, id: i64, status: OrderStatus) {
        if let Some(order) = self.items.iter_mut().find(|o| o.id == Some(id)) {
            order.status = status;
        }
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_shared::{MenuSection, MenuSections, OrderItem, OrderItems};

    fn menu(id: Option<i64>, name: &str) -> Menu {
        Menu {
            id,
            restaurant_id: 1,
            name: name.to_string(),
            menu_type: "fixed".to_string(),
            collapse: 0,
            sections: MenuSections::default(),
        }
    }

    fn order(id: i64, status: OrderStatus, total: f64) -> Order {
        Order {
            id: Some(id),
            restaurant_id: 1,
            customer_id: 9,
            items: OrderItems {
                items: vec![OrderItem {
                    menu_item_id: 5,
                    quantity: 2,
                }],
            },
            total,
            status,
        }
    }

    fn loaded(menus: Vec<Menu>) -> CrudController<Menu> {
        let mut ctrl = CrudController::new();
        ctrl.load_finished(Ok(menus));
        ctrl
    }

    #[test]
    fn load_failure_keeps_the_previous_collection() {
        let mut ctrl = loaded(vec![menu(Some(1), "Lunch")]);
        ctrl.load_started();
        ctrl.load_finished(Err("fetch failed".to_string()));

        assert_eq!(ctrl.items().len(), 1);
        assert_eq!(ctrl.error(), Some("fetch failed"));
        assert!(!ctrl.is_loading());
    }

    #[test]
    fn select_copies_the_entity_instead_of_aliasing_it() {
        let mut ctrl = loaded(vec![menu(Some(1), "Lunch")]);
        let picked = ctrl.items()[0].clone();
        ctrl.select(&picked);

        // Mutating the bound copy must not touch the list entry.
        let mut form = ctrl.selected().unwrap().clone();
        form.name = "Dinner".to_string();
        assert_eq!(ctrl.items()[0].name, "Lunch");
        assert_eq!(ctrl.mode(), Mode::Edit);
        assert_eq!(ctrl.editing_id(), Some(1));
    }

    #[test]
    fn update_keeps_exactly_one_entry_per_id_with_form_values() {
        let mut ctrl = loaded(vec![
            menu(Some(1), "Lunch"),
            menu(Some(2), "Dinner"),
            menu(Some(3), "Drinks"),
        ]);
        ctrl.select(&ctrl.items()[1].clone());

        // The form values win over whatever the server echoed back.
        let mut form = menu(None, "Late dinner");
        form.collapse = 1;
        ctrl.update_saved(2, form);

        let ids: Vec<_> = ctrl.items().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
        assert_eq!(ctrl.items()[1].name, "Late dinner");
        assert_eq!(ctrl.items()[1].collapse, 1);
        assert_eq!(ctrl.mode(), Mode::List);
        assert!(ctrl.selected().is_none());
    }

    #[test]
    fn update_preserves_the_order_of_untouched_entries() {
        let mut ctrl = loaded(vec![menu(Some(5), "A"), menu(Some(6), "B")]);
        ctrl.update_saved(5, menu(None, "A2"));
        let names: Vec<_> = ctrl.items().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["A2", "B"]);
    }

    #[test]
    fn create_appends_the_server_entity_with_its_assigned_id() {
        let mut ctrl = loaded(vec![menu(Some(1), "Lunch")]);
        ctrl.create_new();
        assert_eq!(ctrl.editing_id(), None);

        // Stubbed server response: the submitted menu plus id 42.
        let mut submitted = menu(None, "Drinks menu");
        submitted.sections = MenuSections {
            sections: vec![MenuSection {
                id: 0,
                name: "Drinks".to_string(),
                description: String::new(),
                position: 0,
                visible: 1,
                items: Vec::new(),
            }],
        };
        let mut created = submitted.clone();
        created.id = Some(42);
        ctrl.create_saved(created);

        assert_eq!(ctrl.items().len(), 2);
        let last = ctrl.items().last().unwrap();
        assert_eq!(last.id, Some(42));
        assert_eq!(last.sections.sections[0].name, "Drinks");
        assert_eq!(ctrl.mode(), Mode::List);
    }

    #[test]
    fn failed_save_keeps_the_form_open_and_the_list_unchanged() {
        let mut ctrl = loaded(vec![menu(Some(1), "Lunch")]);
        ctrl.select(&ctrl.items()[0].clone());
        ctrl.save_failed("validation rejected".to_string());

        assert_eq!(ctrl.mode(), Mode::Edit);
        assert!(ctrl.selected().is_some());
        assert_eq!(ctrl.error(), Some("validation rejected"));
        assert_eq!(ctrl.items()[0].name, "Lunch");
    }

    #[test]
    fn cancel_discards_the_form_without_touching_the_list() {
        let mut ctrl = loaded(vec![menu(Some(1), "Lunch")]);
        ctrl.select(&ctrl.items()[0].clone());
        ctrl.cancel();
        assert_eq!(ctrl.mode(), Mode::List);
        assert!(ctrl.selected().is_none());
        assert_eq!(ctrl.items().len(), 1);
    }

    #[test]
    fn status_payload_merges_the_new_status_into_the_known_record() {
        let mut ctrl = CrudController::new();
        ctrl.load_finished(Ok(vec![order(7, OrderStatus::Pending, 31.5)]));

        let payload = ctrl.status_payload(7, OrderStatus::Accepted).unwrap();
        assert_eq!(payload.id, Some(7));
        assert_eq!(payload.status, OrderStatus::Accepted);
        assert_eq!(payload.total, 31.5);
        assert_eq!(payload.items.items.len(), 1);
    }

    #[test]
    fn status_update_for_an_unknown_id_is_a_local_error() {
        let mut ctrl = CrudController::new();
        ctrl.load_finished(Ok(vec![order(7, OrderStatus::Pending, 31.5)]));
        let before = ctrl.items().to_vec();

        let err = ctrl.status_payload(99, OrderStatus::Ready).unwrap_err();
        assert_eq!(err, "Order not found.");
        assert_eq!(ctrl.items(), &before[..]);
    }

    #[test]
    fn status_applied_changes_only_the_status_field() {
        let mut ctrl = CrudController::new();
        ctrl.load_finished(Ok(vec![
            order(7, OrderStatus::Pending, 31.5),
            order(8, OrderStatus::Ready, 12.0),
        ]));

        ctrl.status_applied(7, OrderStatus::Preparing);
        assert_eq!(ctrl.items()[0].status, OrderStatus::Preparing);
        assert_eq!(ctrl.items()[0].total, 31.5);
        assert_eq!(ctrl.items()[1].status, OrderStatus::Ready);
    }
}
