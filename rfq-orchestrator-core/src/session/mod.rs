//! Caller-owned wizard session
//!
//! [`RfqWizardSession`] holds every piece of mutable state of one RFQ
//! creation or edit: the selection store, the form, the wizard step, the two
//! catalog tables and the collaborator search results. Nothing is global;
//! dropping the session drops the state.

mod request_tracker;

pub use request_tracker::{PageTicket, RequestTracker};

use uuid::Uuid;

use crate::config::WizardConfig;
use crate::error::{CoreError, CoreResult};
use crate::form::FormAggregator;
use crate::selection::{PageSelectionAdapter, PositionalSelection, SelectionCategory, SelectionStore};
use crate::services::{CatalogService, RfqService};
use crate::types::{
    Attachment, PageQuery, PagedResult, Product, RfqFormData, RfqReceipt, RfqSubmission, User,
    ValidationIssue, Vendor,
};
use crate::wizard::{self, NextOutcome, WizardController, WizardMode, WizardStep};

/// State of one RFQ wizard, from first page load to submission.
///
/// Catalog loads are split into `begin_*` (issue a ticket) and `complete_*`
/// (apply the response) so responses that arrive out of order can be
/// dropped. The `load_*` helpers do both around a [`CatalogService`] call.
///
/// Once closed, navigation, loads and `submit` fail with
/// [`CoreError::SessionClosed`]; selection and form mutators do nothing and
/// return their "unchanged" value.
#[derive(Debug)]
pub struct RfqWizardSession {
    id: Uuid,
    config: WizardConfig,
    aggregator: FormAggregator,
    wizard: WizardController,
    products: PageSelectionAdapter<Product>,
    vendors: PageSelectionAdapter<Vendor>,
    product_requests: RequestTracker,
    vendor_requests: RequestTracker,
    user_requests: RequestTracker,
    users: Vec<User>,
    closed: bool,
}

impl RfqWizardSession {
    /// Start a session for a new RFQ.
    pub fn new(config: WizardConfig) -> CoreResult<Self> {
        Self::build(config, FormAggregator::new(), WizardMode::Create)
    }

    /// Start a session editing an existing RFQ, seeded with its selections.
    pub fn for_update(
        config: WizardConfig,
        rfq_id: impl Into<String>,
        existing: &RfqSubmission,
    ) -> CoreResult<Self> {
        Self::build(
            config,
            FormAggregator::from_submission(existing),
            WizardMode::Update {
                rfq_id: rfq_id.into(),
            },
        )
    }

    fn build(config: WizardConfig, aggregator: FormAggregator, mode: WizardMode) -> CoreResult<Self> {
        config.validate()?;
        let id = Uuid::new_v4();
        log::debug!("[session {id}] Opened ({mode:?})");
        Ok(Self {
            id,
            products: PageSelectionAdapter::new(config.initial_query()),
            vendors: PageSelectionAdapter::new(config.initial_query()),
            product_requests: RequestTracker::new("products"),
            vendor_requests: RequestTracker::new("vendors"),
            user_requests: RequestTracker::new("users"),
            users: Vec::new(),
            wizard: WizardController::new(mode),
            aggregator,
            config,
            closed: false,
        })
    }

    // ===== Accessors =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn form(&self) -> &RfqFormData {
        self.aggregator.form()
    }

    pub fn store(&self) -> &SelectionStore {
        self.aggregator.store()
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current()
    }

    pub fn mode(&self) -> &WizardMode {
        self.wizard.mode()
    }

    pub fn product_table(&self) -> &PageSelectionAdapter<Product> {
        &self.products
    }

    pub fn vendor_table(&self) -> &PageSelectionAdapter<Vendor> {
        &self.vendors
    }

    /// Rows of the latest collaborator search.
    pub fn user_results(&self) -> &[User] {
        &self.users
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Issues blocking the current step, empty when it may advance.
    pub fn current_issues(&self) -> Vec<ValidationIssue> {
        wizard::validation_issues(self.wizard.current(), self.aggregator.form())
    }

    /// Whether "next" is enabled; re-evaluated on every form change.
    pub fn can_advance(&self) -> bool {
        !self.closed && self.wizard.can_advance(self.aggregator.form())
    }

    // ===== Catalog loading =====

    /// Issue a product page request. The limit is snapped to a page-size option.
    pub fn begin_products(&mut self, query: &PageQuery) -> PageTicket {
        self.product_requests.issue(self.config.page_query(query))
    }

    pub fn begin_vendors(&mut self, query: &PageQuery) -> PageTicket {
        self.vendor_requests.issue(self.config.page_query(query))
    }

    pub fn begin_user_search(&mut self, term: &str) -> PageTicket {
        self.user_requests
            .issue(PageQuery::new(1, self.config.user_search_limit).with_search(term))
    }

    /// Apply a product page response.
    ///
    /// Returns `Ok(false)` when the ticket was superseded or the session is
    /// closed; the response (success or error) is then dropped.
    pub fn complete_products(
        &mut self,
        ticket: PageTicket,
        result: CoreResult<PagedResult<Product>>,
    ) -> CoreResult<bool> {
        if !self.accepts(&self.product_requests, &ticket) {
            return Ok(false);
        }
        let page = result?;
        let set = self.aggregator.store_mut().products_mut();
        self.products.show_page(ticket.into_query(), page, set);
        self.products.merge_visible(set);
        self.aggregator.sync_products();
        Ok(true)
    }

    /// Apply a vendor page response. See [`complete_products`](Self::complete_products).
    pub fn complete_vendors(
        &mut self,
        ticket: PageTicket,
        result: CoreResult<PagedResult<Vendor>>,
    ) -> CoreResult<bool> {
        if !self.accepts(&self.vendor_requests, &ticket) {
            return Ok(false);
        }
        let page = result?;
        let set = self.aggregator.store_mut().vendors_mut();
        self.vendors.show_page(ticket.into_query(), page, set);
        self.vendors.merge_visible(set);
        self.aggregator.sync_vendors();
        Ok(true)
    }

    /// Apply a collaborator search response. See [`complete_products`](Self::complete_products).
    pub fn complete_user_search(
        &mut self,
        ticket: PageTicket,
        result: CoreResult<PagedResult<User>>,
    ) -> CoreResult<bool> {
        if !self.accepts(&self.user_requests, &ticket) {
            return Ok(false);
        }
        self.users = result?.rows;
        Ok(true)
    }

    fn accepts(&self, tracker: &RequestTracker, ticket: &PageTicket) -> bool {
        if self.closed {
            log::debug!(
                "[session {}] Dropping {} response: session closed",
                self.id,
                ticket.resource()
            );
            return false;
        }
        if !tracker.is_current(ticket) {
            log::debug!(
                "[session {}] Dropping stale {} response (generation {}, page {})",
                self.id,
                ticket.resource(),
                ticket.generation(),
                ticket.query().page
            );
            return false;
        }
        true
    }

    /// Fetch and show a product page.
    pub async fn load_products(&mut self, catalog: &CatalogService, query: &PageQuery) -> CoreResult<bool> {
        self.ensure_open()?;
        let ticket = self.begin_products(query);
        let result = catalog.fetch_products(ticket.query()).await;
        self.complete_products(ticket, result)
    }

    /// Fetch and show a vendor page.
    pub async fn load_vendors(&mut self, catalog: &CatalogService, query: &PageQuery) -> CoreResult<bool> {
        self.ensure_open()?;
        let ticket = self.begin_vendors(query);
        let result = catalog.fetch_vendors(ticket.query()).await;
        self.complete_vendors(ticket, result)
    }

    /// Run a collaborator search and keep its rows as the pickable users.
    pub async fn search_users(&mut self, catalog: &CatalogService, term: &str) -> CoreResult<bool> {
        self.ensure_open()?;
        let ticket = self.begin_user_search(term);
        let result = catalog.fetch_users(ticket.query()).await;
        self.complete_user_search(ticket, result)
    }

    /// Load the current product and vendor pages concurrently.
    ///
    /// Both responses are applied even if the other one fails; the first
    /// error is returned.
    pub async fn load_initial(&mut self, catalog: &CatalogService) -> CoreResult<()> {
        self.ensure_open()?;
        let product_query = self.products.query().clone();
        let vendor_query = self.vendors.query().clone();
        let product_ticket = self.begin_products(&product_query);
        let vendor_ticket = self.begin_vendors(&vendor_query);

        let (products, vendors) = futures::join!(
            catalog.fetch_products(product_ticket.query()),
            catalog.fetch_vendors(vendor_ticket.query()),
        );

        let products = self.complete_products(product_ticket, products);
        let vendors = self.complete_vendors(vendor_ticket, vendors);
        products?;
        vendors?;
        Ok(())
    }

    // ===== Selection =====

    /// Check or uncheck one product row of the visible page.
    pub fn toggle_product(&mut self, index: usize, checked: bool) -> bool {
        if !self.writable("toggle_product") {
            return false;
        }
        let changed = self
            .products
            .toggle_row(index, checked, self.aggregator.store_mut().products_mut());
        self.aggregator.sync_products();
        changed
    }

    pub fn set_product_page_checked(&mut self, checked: bool) -> bool {
        if !self.writable("set_product_page_checked") {
            return false;
        }
        let changed = self
            .products
            .set_page_checked(checked, self.aggregator.store_mut().products_mut());
        self.aggregator.sync_products();
        changed
    }

    /// Apply the full positional map a product table emitted.
    pub fn apply_product_selection(&mut self, positional: &PositionalSelection) -> bool {
        if !self.writable("apply_product_selection") {
            return false;
        }
        let changed = self
            .products
            .apply_change(positional, self.aggregator.store_mut().products_mut());
        self.aggregator.sync_products();
        changed
    }

    pub fn toggle_vendor(&mut self, index: usize, checked: bool) -> bool {
        if !self.writable("toggle_vendor") {
            return false;
        }
        let changed = self
            .vendors
            .toggle_row(index, checked, self.aggregator.store_mut().vendors_mut());
        self.aggregator.sync_vendors();
        changed
    }

    pub fn set_vendor_page_checked(&mut self, checked: bool) -> bool {
        if !self.writable("set_vendor_page_checked") {
            return false;
        }
        let changed = self
            .vendors
            .set_page_checked(checked, self.aggregator.store_mut().vendors_mut());
        self.aggregator.sync_vendors();
        changed
    }

    pub fn apply_vendor_selection(&mut self, positional: &PositionalSelection) -> bool {
        if !self.writable("apply_vendor_selection") {
            return false;
        }
        let changed = self
            .vendors
            .apply_change(positional, self.aggregator.store_mut().vendors_mut());
        self.aggregator.sync_vendors();
        changed
    }

    /// Record a quantity keystroke. Returns the parsed value (malformed input is `0`).
    pub fn set_quantity(&mut self, item_code: &str, raw: &str) -> u32 {
        if !self.writable("set_quantity") {
            return 0;
        }
        self.aggregator.on_quantity_change(item_code, raw)
    }

    pub fn set_preferred(&mut self, vendor_id: &str, preferred: bool) -> bool {
        if !self.writable("set_preferred") {
            return false;
        }
        self.aggregator.on_preferred_change(vendor_id, preferred)
    }

    /// Remove one selection (e.g. from the review list) and uncheck its row if visible.
    pub fn remove(&mut self, category: SelectionCategory, key: &str) -> bool {
        if !self.writable("remove") {
            return false;
        }
        let removed = self.aggregator.on_remove(category, key);
        match category {
            SelectionCategory::Products => {
                self.products.refresh(self.aggregator.store().products());
            }
            SelectionCategory::Vendors => {
                self.vendors.refresh(self.aggregator.store().vendors());
            }
        }
        removed
    }

    /// Drop every product and vendor selection; visible rows become unchecked.
    pub fn clear_all(&mut self) {
        if !self.writable("clear_all") {
            return;
        }
        self.aggregator.on_clear_all();
        self.products.refresh(self.aggregator.store().products());
        self.vendors.refresh(self.aggregator.store().vendors());
    }

    // ===== Form fields =====

    pub fn set_title(&mut self, title: impl Into<String>) {
        if !self.writable("set_title") {
            return;
        }
        self.aggregator.set_title(title);
    }

    pub fn set_department(&mut self, department: Option<String>) {
        if !self.writable("set_department") {
            return;
        }
        self.aggregator.set_department(department);
    }

    pub fn set_item_type(&mut self, item_type: Option<String>) {
        if !self.writable("set_item_type") {
            return;
        }
        self.aggregator.set_item_type(item_type);
    }

    pub fn set_date_range(&mut self, start: Option<chrono::NaiveDate>, end: Option<chrono::NaiveDate>) {
        if !self.writable("set_date_range") {
            return;
        }
        self.aggregator.set_date_range(start, end);
    }

    pub fn set_payment_terms(&mut self, payment_terms: Option<String>) {
        if !self.writable("set_payment_terms") {
            return;
        }
        self.aggregator.set_payment_terms(payment_terms);
    }

    pub fn set_technical_specifications(&mut self, specifications: Option<String>) {
        if !self.writable("set_technical_specifications") {
            return;
        }
        self.aggregator.set_technical_specifications(specifications);
    }

    pub fn add_attachment(&mut self, attachment: Attachment) {
        if !self.writable("add_attachment") {
            return;
        }
        self.aggregator.add_attachment(attachment);
    }

    pub fn remove_attachment(&mut self, index: usize) -> Option<Attachment> {
        if !self.writable("remove_attachment") {
            return None;
        }
        self.aggregator.remove_attachment(index)
    }

    /// Add a collaborator picked from the latest user search.
    ///
    /// Ids that the search did not return, or that are already listed, are ignored.
    pub fn add_collaborator(&mut self, user_id: &str) -> bool {
        if !self.writable("add_collaborator") {
            return false;
        }
        if !self.users.iter().any(|u| u.id == user_id) {
            log::debug!("[session {}] Ignoring unknown collaborator '{user_id}'", self.id);
            return false;
        }
        self.aggregator.add_collaborator(user_id)
    }

    pub fn remove_collaborator(&mut self, user_id: &str) -> bool {
        if !self.writable("remove_collaborator") {
            return false;
        }
        self.aggregator.remove_collaborator(user_id)
    }

    // ===== Navigation =====

    pub fn next(&mut self) -> CoreResult<NextOutcome> {
        self.ensure_open()?;
        self.wizard.next(self.aggregator.form())
    }

    pub fn previous(&mut self) -> WizardStep {
        self.wizard.previous()
    }

    pub fn jump_to(&mut self, step: WizardStep) -> CoreResult<WizardStep> {
        self.ensure_open()?;
        self.wizard.jump_to(step)
    }

    /// Submit from the review step.
    ///
    /// On success the session is closed and every piece of state is
    /// dropped. On failure nothing changes, so the user can retry.
    pub async fn submit(&mut self, service: &RfqService) -> CoreResult<RfqReceipt> {
        self.ensure_open()?;
        let step = self.wizard.current();
        if step != WizardStep::Review {
            return Err(CoreError::NotOnReviewStep(step));
        }
        let issues = wizard::validation_issues(step, self.aggregator.form());
        if !issues.is_empty() {
            return Err(CoreError::StepValidation { step, issues });
        }

        let submission = self.aggregator.submission()?;
        let receipt = service.submit(self.wizard.mode(), &submission).await?;
        log::info!("[session {}] Submitted as {}", self.id, receipt.id);
        self.close();
        Ok(receipt)
    }

    /// Tear the session down. In-flight responses are dropped when they land.
    pub fn close(&mut self) {
        self.aggregator.reset();
        self.products.reset(self.config.initial_query());
        self.vendors.reset(self.config.initial_query());
        self.users.clear();
        self.product_requests.invalidate();
        self.vendor_requests.invalidate();
        self.user_requests.invalidate();
        self.wizard.reset();
        self.closed = true;
        log::debug!("[session {}] Closed", self.id);
    }

    fn writable(&self, action: &str) -> bool {
        if self.closed {
            log::debug!("[session {}] Ignoring {action}: session closed", self.id);
        }
        !self.closed
    }

    fn ensure_open(&self) -> CoreResult<()> {
        if self.closed {
            return Err(CoreError::SessionClosed);
        }
        Ok(())
    }
}
