//! Application state - the single owner of every collection.
//!
//! All mutations go through `&mut AppState`. Each operation that changes a
//! collection writes the snapshots of the keys it touched before returning;
//! a failed write is logged and the in-memory state stays authoritative.

use crate::{
    config::{Config, OrdersConfig},
    core::{
        catalog::Catalog,
        ledger::{HistoryFilter, Ledger, SaleOutcome, SalesHistory},
        persistence::{StateKey, Storage},
        purchase::PurchaseOrders,
        report::{self, CategoryRevenue, DailyFigures, DashboardMetrics},
        schedule::Schedule,
    },
    errors::Result,
    insights::{InsightGateway, InsightProvider},
    models::{
        AdminCredentials, Appointment, AppointmentStatus, BookingRequest, Doctor, Insight,
        Medicine, Pharmacist, PurchaseOrder, PurchaseOrderStatus, Sale, SaleItem,
    },
};
use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};

/// Everything the desk knows, plus the store it persists to.
#[derive(Debug)]
pub struct AppState {
    catalog: Catalog,
    ledger: Ledger,
    orders: PurchaseOrders,
    schedule: Schedule,
    admin: AdminCredentials,
    order_defaults: OrdersConfig,
    storage: Storage,
}

impl AppState {
    /// Loads every collection from `storage`, seeding missing ones from `config`.
    ///
    /// Each key falls back independently; a corrupt snapshot never prevents
    /// startup.
    #[instrument(skip_all)]
    pub async fn load(storage: Storage, config: Config) -> Self {
        let Config {
            ledger,
            schedule,
            orders,
            admin,
            medicines,
            doctors,
            pharmacists,
            ..
        } = config;

        let medicines: Vec<Medicine> = storage.load_or(StateKey::Medicines, medicines).await;
        let sales: Vec<Sale> = storage.load_or(StateKey::Sales, Vec::new()).await;
        let purchase_orders: Vec<PurchaseOrder> =
            storage.load_or(StateKey::PurchaseOrders, Vec::new()).await;
        let appointments: Vec<Appointment> =
            storage.load_or(StateKey::Appointments, Vec::new()).await;
        let doctors: Vec<Doctor> = storage.load_or(StateKey::Doctors, doctors).await;
        let pharmacists: Vec<Pharmacist> =
            storage.load_or(StateKey::Pharmacists, pharmacists).await;
        let admin: AdminCredentials = storage.load_or(StateKey::AdminCredentials, admin).await;

        info!(
            medicines = medicines.len(),
            sales = sales.len(),
            appointments = appointments.len(),
            doctors = doctors.len(),
            pharmacists = pharmacists.len(),
            "application state loaded"
        );

        Self {
            catalog: Catalog::from_medicines(medicines),
            ledger: Ledger::from_sales(sales, ledger.stock_policy),
            orders: PurchaseOrders::from_orders(purchase_orders),
            schedule: Schedule::new(
                appointments,
                doctors,
                pharmacists,
                schedule.transition_policy,
            ),
            admin,
            order_defaults: orders,
            storage,
        }
    }

    /// Writes every collection.
    pub async fn persist_all(&self) {
        for key in StateKey::ALL {
            self.persist(key).await;
        }
    }

    async fn persist(&self, key: StateKey) {
        match key {
            StateKey::Medicines => self.storage.save(key, self.catalog.as_slice()).await,
            StateKey::Sales => self.storage.save(key, self.ledger.sales()).await,
            StateKey::PurchaseOrders => self.storage.save(key, self.orders.orders()).await,
            StateKey::Appointments => self.storage.save(key, self.schedule.appointments()).await,
            StateKey::Doctors => self.storage.save(key, self.schedule.doctors()).await,
            StateKey::Pharmacists => self.storage.save(key, self.schedule.pharmacists()).await,
            StateKey::AdminCredentials => self.storage.save(key, &self.admin).await,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub const fn purchase_orders(&self) -> &PurchaseOrders {
        &self.orders
    }

    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    // ---------------------------------------------------------------------
    // Catalog
    // ---------------------------------------------------------------------

    /// # Errors
    /// Returns an error if the record fails validation.
    pub async fn add_medicine(&mut self, medicine: Medicine) -> Result<()> {
        self.catalog.add_medicine(medicine)?;
        self.persist(StateKey::Medicines).await;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the record fails validation.
    pub async fn edit_medicine(&mut self, medicine: Medicine) -> Result<bool> {
        let changed = self.catalog.edit_medicine(medicine)?;
        if changed {
            self.persist(StateKey::Medicines).await;
        }
        Ok(changed)
    }

    pub async fn delete_medicine(&mut self, id: &str) -> Option<Medicine> {
        let removed = self.catalog.delete_medicine(id)?;
        self.persist(StateKey::Medicines).await;
        Some(removed)
    }

    // ---------------------------------------------------------------------
    // Sales
    // ---------------------------------------------------------------------

    /// Records a basket at the current time.
    ///
    /// # Errors
    /// See [`Ledger::record_sale`].
    pub async fn record_sale(&mut self, items: &[SaleItem]) -> Result<SaleOutcome> {
        let outcome = self
            .ledger
            .record_sale(&mut self.catalog, items, Utc::now())?;
        if !outcome.recorded.is_empty() {
            self.persist_ledger().await;
        }
        Ok(outcome)
    }

    /// # Errors
    /// See [`Ledger::edit_sale`].
    pub async fn edit_sale(&mut self, updated: &Sale) -> Result<Option<Sale>> {
        let edited = self.ledger.edit_sale(&mut self.catalog, updated)?;
        if edited.is_some() {
            self.persist_ledger().await;
        }
        Ok(edited)
    }

    /// # Errors
    /// See [`Ledger::edit_sale_quantity`].
    pub async fn edit_sale_quantity(&mut self, sale_id: &str, quantity: u32) -> Result<Option<Sale>> {
        let edited = self
            .ledger
            .edit_sale_quantity(&mut self.catalog, sale_id, quantity)?;
        if edited.is_some() {
            self.persist_ledger().await;
        }
        Ok(edited)
    }

    pub async fn delete_sale(&mut self, sale_id: &str) -> Option<Sale> {
        let removed = self.ledger.delete_sale(&mut self.catalog, sale_id)?;
        self.persist_ledger().await;
        Some(removed)
    }

    async fn persist_ledger(&self) {
        self.persist(StateKey::Sales).await;
        self.persist(StateKey::Medicines).await;
    }

    #[must_use]
    pub fn sales_history(&self, filter: &HistoryFilter) -> SalesHistory<'_> {
        self.ledger.history(&self.catalog, filter)
    }

    // ---------------------------------------------------------------------
    // Purchase orders
    // ---------------------------------------------------------------------

    /// Raises an order, filling in the configured supplier and quantity when
    /// they are not given.
    pub async fn place_order(
        &mut self,
        medicine_name: &str,
        quantity: Option<u32>,
        supplier: Option<&str>,
    ) -> PurchaseOrder {
        let quantity = quantity.unwrap_or(self.order_defaults.default_quantity);
        let supplier = supplier
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(self.order_defaults.default_supplier.as_str())
            .to_string();
        let order =
            self.orders
                .place_order(medicine_name, quantity, supplier, Utc::now().date_naive());
        self.persist(StateKey::PurchaseOrders).await;
        order
    }

    pub async fn set_order_status(&mut self, order_id: &str, status: PurchaseOrderStatus) -> bool {
        let changed = self.orders.set_status(order_id, status);
        if changed {
            self.persist(StateKey::PurchaseOrders).await;
        }
        changed
    }

    // ---------------------------------------------------------------------
    // Schedule
    // ---------------------------------------------------------------------

    pub async fn book_appointment(&mut self, request: BookingRequest) -> Appointment {
        let appointment = self.schedule.book_appointment(request);
        self.persist(StateKey::Appointments).await;
        appointment
    }

    /// # Errors
    /// See [`Schedule::update_appointment_status`].
    pub async fn update_appointment_status(
        &mut self,
        appointment_id: &str,
        status: AppointmentStatus,
    ) -> Result<bool> {
        let changed = self
            .schedule
            .update_appointment_status(appointment_id, status)?;
        if changed {
            self.persist(StateKey::Appointments).await;
        }
        Ok(changed)
    }

    pub async fn add_doctor(&mut self, doctor: Doctor) {
        self.schedule.add_doctor(doctor);
        self.persist(StateKey::Doctors).await;
    }

    pub async fn edit_doctor(&mut self, doctor: Doctor) -> bool {
        let changed = self.schedule.edit_doctor(doctor);
        if changed {
            self.persist(StateKey::Doctors).await;
        }
        changed
    }

    pub async fn delete_doctor(&mut self, doctor_id: &str) -> Option<Doctor> {
        let removed = self.schedule.delete_doctor(doctor_id)?;
        self.persist(StateKey::Doctors).await;
        Some(removed)
    }

    pub async fn add_pharmacist(&mut self, pharmacist: Pharmacist) {
        self.schedule.add_pharmacist(pharmacist);
        self.persist(StateKey::Pharmacists).await;
    }

    pub async fn edit_pharmacist(&mut self, pharmacist: Pharmacist) -> bool {
        let changed = self.schedule.edit_pharmacist(pharmacist);
        if changed {
            self.persist(StateKey::Pharmacists).await;
        }
        changed
    }

    pub async fn delete_pharmacist(&mut self, pharmacist_id: &str) -> Option<Pharmacist> {
        let removed = self.schedule.delete_pharmacist(pharmacist_id)?;
        self.persist(StateKey::Pharmacists).await;
        Some(removed)
    }

    // ---------------------------------------------------------------------
    // Admin
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn admin_login(&self, username: &str, password: &str) -> bool {
        self.admin.accepts(username, password)
    }

    pub async fn set_admin_credentials(&mut self, admin: AdminCredentials) {
        self.admin = admin;
        self.persist(StateKey::AdminCredentials).await;
    }

    // ---------------------------------------------------------------------
    // Reports and insights
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn dashboard(&self, today: NaiveDate) -> DashboardMetrics {
        report::dashboard_metrics(&self.catalog, &self.ledger, &self.schedule, today)
    }

    #[must_use]
    pub fn daily_trend(&self, today: NaiveDate, days: u64) -> Vec<DailyFigures> {
        report::daily_trend(&self.catalog, &self.ledger, today, days)
    }

    #[must_use]
    pub fn top_categories(&self, limit: usize) -> Vec<CategoryRevenue> {
        report::top_categories(&self.catalog, &self.ledger, limit)
    }

    /// Requests insights about the current sales and stock.
    ///
    /// The data is captured before the request is sent, so the state can be
    /// mutated while the returned future is pending.
    pub fn insights<'a, P: InsightProvider>(
        &self,
        gateway: &'a InsightGateway<P>,
    ) -> impl Future<Output = Vec<Insight>> + use<'a, P> {
        gateway.get_insights(self.ledger.sales(), self.catalog.as_slice())
    }
}
