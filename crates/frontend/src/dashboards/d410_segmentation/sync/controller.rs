//! Dashboard data-synchronization controller.
//!
//! Each query group is subscribed to its derived key: after any input change
//! both keys are re-derived and every group whose key changed is re-synced.
//! The groups never touch each other's slice.

use super::orchestrator::{CustomerOrchestrator, DesiredKey, OverviewOrchestrator, Spawner};
use super::query_key::{AnalysisId, CustomerKey, DashboardInputs, OverviewKey};
use super::store::{DashboardSnapshot, ViewStateStore};
use crate::dashboards::d410_segmentation::api::AnalysisApi;
use contracts::enums::Segment;
use std::cell::RefCell;
use std::rc::Rc;

pub struct DashboardController<A: ?Sized> {
    inputs: RefCell<DashboardInputs>,
    overview_key: DesiredKey<OverviewKey>,
    customer_key: DesiredKey<CustomerKey>,
    overview: OverviewOrchestrator<A>,
    customers: CustomerOrchestrator<A>,
    store: ViewStateStore,
}

impl<A: AnalysisApi + ?Sized + 'static> DashboardController<A> {
    pub fn new(api: Rc<A>, spawner: Rc<dyn Spawner>) -> Self {
        let (store, overview_writer, customer_writer) = ViewStateStore::new();
        let overview_key = DesiredKey::default();
        let customer_key = DesiredKey::default();
        Self {
            inputs: RefCell::new(DashboardInputs::default()),
            overview: OverviewOrchestrator::new(
                Rc::clone(&api),
                Rc::clone(&spawner),
                overview_key.clone(),
                overview_writer,
            ),
            customers: CustomerOrchestrator::new(
                api,
                spawner,
                customer_key.clone(),
                customer_writer,
            ),
            overview_key,
            customer_key,
            store,
        }
    }

    pub fn store(&self) -> &ViewStateStore {
        &self.store
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.store.snapshot()
    }

    pub fn inputs(&self) -> DashboardInputs {
        self.inputs.borrow().clone()
    }

    pub fn set_analysis_id(&self, analysis_id: AnalysisId) {
        let next = self.inputs.borrow().with_analysis_id(analysis_id);
        self.apply(next);
    }

    pub fn set_segment_filter(&self, segment: Option<Segment>) {
        let next = self.inputs.borrow().with_segment(segment);
        self.apply(next);
    }

    pub fn set_page(&self, page: u32) {
        let next = self.inputs.borrow().with_page(page);
        self.apply(next);
    }

    pub fn has_next_page(&self) -> bool {
        self.store.snapshot().has_next_page()
    }

    pub fn has_previous_page(&self) -> bool {
        self.inputs.borrow().page > 0
    }

    /// Returns false when the last committed page was not full
    pub fn next_page(&self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        let page = self.inputs.borrow().page;
        self.set_page(page.saturating_add(1));
        true
    }

    pub fn previous_page(&self) -> bool {
        let page = self.inputs.borrow().page;
        if page == 0 {
            return false;
        }
        self.set_page(page - 1);
        true
    }

    fn apply(&self, next: DashboardInputs) {
        if *self.inputs.borrow() == next {
            return;
        }
        *self.inputs.borrow_mut() = next.clone();

        if let Some(key) = next.overview_key() {
            if !self.overview_key.is_current(&key) {
                self.overview_key.set(key.clone());
                self.overview.sync(key);
            }
        }
        if let Some(key) = next.customer_key() {
            if !self.customer_key.is_current(&key) {
                self.customer_key.set(key.clone());
                self.customers.sync(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_segmentation::api::ApiError;
    use crate::dashboards::d410_segmentation::sync::orchestrator::ANALYSIS_NOT_FOUND;
    use crate::dashboards::d410_segmentation::sync::query_key::PAGE_SIZE;
    use async_trait::async_trait;
    use contracts::dashboards::d410_segmentation::{
        CustomerRow, Marketing, MarketingSegment, Overview, SegmentStat,
    };
    use futures::channel::oneshot;
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::future::LocalBoxFuture;
    use futures::task::LocalSpawnExt;

    impl Spawner for LocalSpawner {
        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            self.spawn_local(task).expect("local pool is alive");
        }
    }

    type Reply<T> = oneshot::Sender<Result<T, ApiError>>;

    /// Every call parks until the test answers it
    #[derive(Default)]
    struct ScriptedApi {
        overview: RefCell<Vec<(AnalysisId, Reply<Overview>)>>,
        marketing: RefCell<Vec<(AnalysisId, Reply<Marketing>)>>,
        customers: RefCell<Vec<(CustomerKey, Reply<Vec<CustomerRow>>)>>,
        customer_calls: RefCell<Vec<CustomerKey>>,
        overview_calls: RefCell<Vec<AnalysisId>>,
    }

    async fn parked<T>(rx: oneshot::Receiver<Result<T, ApiError>>) -> Result<T, ApiError> {
        rx.await
            .unwrap_or_else(|_| Err(ApiError::Network("dropped".to_string())))
    }

    fn take<K: PartialEq, T>(pending: &RefCell<Vec<(K, T)>>, key: &K) -> T {
        let mut pending = pending.borrow_mut();
        let pos = pending
            .iter()
            .position(|(k, _)| k == key)
            .expect("no pending request for key");
        pending.remove(pos).1
    }

    #[async_trait(?Send)]
    impl AnalysisApi for ScriptedApi {
        async fn overview(&self, analysis_id: &AnalysisId) -> Result<Overview, ApiError> {
            let (tx, rx) = oneshot::channel();
            self.overview_calls.borrow_mut().push(analysis_id.clone());
            self.overview.borrow_mut().push((analysis_id.clone(), tx));
            parked(rx).await
        }

        async fn marketing(&self, analysis_id: &AnalysisId) -> Result<Marketing, ApiError> {
            let (tx, rx) = oneshot::channel();
            self.marketing.borrow_mut().push((analysis_id.clone(), tx));
            parked(rx).await
        }

        async fn customers(&self, key: &CustomerKey) -> Result<Vec<CustomerRow>, ApiError> {
            let (tx, rx) = oneshot::channel();
            self.customer_calls.borrow_mut().push(key.clone());
            self.customers.borrow_mut().push((key.clone(), tx));
            parked(rx).await
        }
    }

    impl ScriptedApi {
        fn answer_overview(&self, id: &AnalysisId, reply: Result<Overview, ApiError>) {
            let _ = take(&self.overview, id).send(reply);
        }

        fn answer_marketing(&self, id: &AnalysisId, reply: Result<Marketing, ApiError>) {
            let _ = take(&self.marketing, id).send(reply);
        }

        fn answer_customers(&self, key: &CustomerKey, reply: Result<Vec<CustomerRow>, ApiError>) {
            let _ = take(&self.customers, key).send(reply);
        }

        fn last_customer_call(&self) -> CustomerKey {
            self.customer_calls
                .borrow()
                .last()
                .cloned()
                .expect("no customer request issued")
        }
    }

    struct Harness {
        pool: LocalPool,
        api: Rc<ScriptedApi>,
        controller: DashboardController<ScriptedApi>,
    }

    impl Harness {
        fn new() -> Self {
            let pool = LocalPool::new();
            let spawner: Rc<dyn Spawner> = Rc::new(pool.spawner());
            let api = Rc::new(ScriptedApi::default());
            let controller = DashboardController::new(Rc::clone(&api), spawner);
            Self {
                pool,
                api,
                controller,
            }
        }

        fn settle(&mut self) {
            self.pool.run_until_stalled();
        }

        /// Opens `raw` and answers its overview pair successfully
        fn open(&mut self, raw: &str) -> AnalysisId {
            let id = analysis(raw);
            self.controller.set_analysis_id(id.clone());
            self.settle();
            self.api.answer_overview(&id, Ok(overview(120)));
            self.api.answer_marketing(&id, Ok(marketing()));
            self.settle();
            id
        }
    }

    fn analysis(raw: &str) -> AnalysisId {
        AnalysisId::new(raw).unwrap()
    }

    fn customer_key(id: &AnalysisId, segment: Option<Segment>, page: u32) -> CustomerKey {
        CustomerKey {
            analysis_id: id.clone(),
            segment,
            page,
            page_size: PAGE_SIZE,
        }
    }

    fn overview(total_arrivals: u64) -> Overview {
        Overview {
            total_arrivals,
            total_revenue: 54_000.0,
            adr_medio_generale: 135.5,
            valore_cliente_medio_generale: 450.0,
            segment_distribution: Segment::all()
                .into_iter()
                .map(|segment| SegmentStat {
                    segment,
                    count: total_arrivals / 5,
                    percentuale: 20.0,
                    adr_medio: 130.0,
                    revenue_totale: 10_800.0,
                    valore_cliente_medio: 450.0,
                })
                .collect(),
        }
    }

    fn marketing() -> Marketing {
        Marketing {
            segmenti: Segment::all()
                .into_iter()
                .map(|segment| MarketingSegment {
                    segment,
                    count: 24,
                    revenue_attuale: 10_800.0,
                    revenue_potenziale_stimata: 12_420.0,
                    conversion_rate_storico: 0.12,
                    roi_stimato: 2.5,
                    campagne: Vec::new(),
                })
                .collect(),
        }
    }

    fn rows(count: usize, first_index: u64) -> Vec<CustomerRow> {
        (0..count as u64)
            .map(|i| CustomerRow {
                row_index: first_index + i,
                segment: Segment::Business,
                scores: Default::default(),
                numero_notti: Some(2),
                numero_ospiti: Some(1),
                canale: None,
                giorno_arrivo: None,
                storico_soggiorni: None,
                spesa_media: None,
                cliente_id: None,
                nome_cliente: None,
                data_arrivo: None,
                categoria_camera: None,
                revenue: None,
            })
            .collect()
    }

    #[test]
    fn test_nothing_is_fetched_without_analysis_id() {
        let mut h = Harness::new();
        h.controller.set_segment_filter(Some(Segment::Premium));
        h.controller.set_page(2);
        h.settle();
        assert!(h.api.overview_calls.borrow().is_empty());
        assert!(h.api.customer_calls.borrow().is_empty());
        assert_eq!(h.controller.snapshot(), DashboardSnapshot::default());
    }

    #[test]
    fn test_full_session_scenario() {
        let mut h = Harness::new();
        let id = analysis("A1");
        h.controller.set_analysis_id(id.clone());
        assert!(h.controller.snapshot().overview.loading);
        h.settle();

        h.api.answer_overview(&id, Ok(overview(120)));
        h.api.answer_marketing(&id, Ok(marketing()));
        h.api.answer_customers(&customer_key(&id, None, 0), Ok(rows(20, 0)));
        h.settle();

        let slice = h.controller.snapshot().overview;
        assert!(!slice.loading);
        assert_eq!(slice.error, None);
        let bundle = slice.data.expect("overview committed");
        assert_eq!(bundle.overview.total_arrivals, 120);
        assert_eq!(bundle.marketing.segmenti.len(), 5);

        h.controller.set_segment_filter(Some(Segment::Business));
        h.settle();
        let issued = h.api.last_customer_call();
        assert_eq!(issued, customer_key(&id, Some(Segment::Business), 0));
        assert_eq!((issued.skip(), issued.limit()), (0, 20));

        h.api.answer_customers(&issued, Ok(rows(20, 0)));
        h.settle();
        assert!(h.controller.has_next_page());

        assert!(h.controller.next_page());
        h.settle();
        let issued = h.api.last_customer_call();
        assert_eq!((issued.skip(), issued.limit()), (20, 20));
        assert_eq!(issued.segment, Some(Segment::Business));

        h.api.answer_customers(&issued, Ok(rows(7, 20)));
        h.settle();
        assert_eq!(h.controller.snapshot().customers.data.map(|r| r.len()), Some(7));
        assert!(!h.controller.has_next_page());
        assert!(!h.controller.next_page());
    }

    #[test]
    fn test_later_page_wins_even_when_earlier_finishes_last() {
        let mut h = Harness::new();
        let id = h.open("A1");
        let first = customer_key(&id, None, 0);

        h.controller.set_page(1);
        h.settle();
        let second = customer_key(&id, None, 1);

        h.api.answer_customers(&second, Ok(rows(20, 20)));
        h.settle();
        h.api.answer_customers(&first, Ok(rows(20, 0)));
        h.settle();

        let committed = h.controller.snapshot().customers.data.unwrap();
        assert_eq!(committed[0].row_index, 20);
    }

    #[test]
    fn test_stale_page_is_dropped_while_newer_still_loading() {
        let mut h = Harness::new();
        let id = h.open("A1");
        h.controller.set_segment_filter(Some(Segment::Coppia));
        h.settle();

        h.api
            .answer_customers(&customer_key(&id, None, 0), Ok(rows(20, 0)));
        h.settle();

        let slice = h.controller.snapshot().customers;
        assert!(slice.loading);
        assert!(slice.data.is_none());
    }

    #[test]
    fn test_newer_analysis_id_wins_out_of_order() {
        let mut h = Harness::new();
        let a1 = analysis("A1");
        let a2 = analysis("A2");
        h.controller.set_analysis_id(a1.clone());
        h.settle();
        h.controller.set_analysis_id(a2.clone());
        h.settle();

        h.api.answer_overview(&a2, Ok(overview(80)));
        h.api.answer_marketing(&a2, Ok(marketing()));
        h.settle();
        h.api.answer_overview(&a1, Ok(overview(120)));
        h.api.answer_marketing(&a1, Ok(marketing()));
        h.settle();

        let slice = h.controller.snapshot().overview;
        assert_eq!(slice.data.unwrap().overview.total_arrivals, 80);
        assert!(!slice.loading);
    }

    #[test]
    fn test_stale_overview_failure_does_not_surface() {
        let mut h = Harness::new();
        let a1 = analysis("A1");
        let a2 = analysis("A2");
        h.controller.set_analysis_id(a1.clone());
        h.settle();
        h.controller.set_analysis_id(a2.clone());
        h.settle();

        h.api
            .answer_overview(&a1, Err(ApiError::NotFound("gone".to_string())));
        h.api.answer_marketing(&a1, Ok(marketing()));
        h.settle();

        let slice = h.controller.snapshot().overview;
        assert!(slice.loading);
        assert_eq!(slice.error, None);
    }

    #[test]
    fn test_overview_loading_until_both_reads_resolve() {
        let mut h = Harness::new();
        let id = analysis("A1");
        h.controller.set_analysis_id(id.clone());
        h.settle();

        h.api.answer_overview(&id, Ok(overview(120)));
        h.settle();
        let slice = h.controller.snapshot().overview;
        assert!(slice.loading);
        assert!(slice.data.is_none());

        h.api.answer_marketing(&id, Ok(marketing()));
        h.settle();
        assert!(!h.controller.snapshot().overview.loading);
    }

    #[test]
    fn test_marketing_failure_fails_the_whole_group() {
        let mut h = Harness::new();
        let id = analysis("A1");
        h.controller.set_analysis_id(id.clone());
        h.settle();

        h.api.answer_overview(&id, Ok(overview(120)));
        h.api.answer_marketing(
            &id,
            Err(ApiError::Http {
                status: 500,
                detail: "boom".to_string(),
            }),
        );
        h.api
            .answer_customers(&customer_key(&id, None, 0), Ok(rows(3, 0)));
        h.settle();

        let snapshot = h.controller.snapshot();
        assert!(!snapshot.overview.loading);
        assert!(snapshot.overview.data.is_none());
        assert_eq!(snapshot.overview.error.as_deref(), Some(ANALYSIS_NOT_FOUND));
        // the customer table is not affected
        assert_eq!(snapshot.customers.data.map(|r| r.len()), Some(3));
    }

    #[test]
    fn test_overview_failure_uses_generic_message() {
        let mut h = Harness::new();
        let id = analysis("A1");
        h.controller.set_analysis_id(id.clone());
        h.settle();

        h.api
            .answer_overview(&id, Err(ApiError::NotFound("Analisi non trovata".into())));
        h.api.answer_marketing(&id, Ok(marketing()));
        h.settle();

        let slice = h.controller.snapshot().overview;
        assert_eq!(slice.error.as_deref(), Some(ANALYSIS_NOT_FOUND));
        assert!(slice.data.is_none());
    }

    #[test]
    fn test_customer_failure_commits_empty_rows_without_error() {
        let mut h = Harness::new();
        let id = h.open("A1");
        h.api.answer_customers(
            &customer_key(&id, None, 0),
            Err(ApiError::Network("offline".to_string())),
        );
        h.settle();

        let slice = h.controller.snapshot().customers;
        assert!(!slice.loading);
        assert_eq!(slice.error, None);
        assert_eq!(slice.data, Some(Vec::new()));
        assert!(!h.controller.has_next_page());
    }

    #[test]
    fn test_filter_change_resets_page_before_fetch() {
        let mut h = Harness::new();
        let id = h.open("A1");
        h.controller.set_page(3);
        h.settle();
        assert_eq!(h.api.last_customer_call().page, 3);

        h.controller.set_segment_filter(Some(Segment::Famiglia));
        h.settle();
        assert_eq!(h.controller.inputs().page, 0);
        assert_eq!(
            h.api.last_customer_call(),
            customer_key(&id, Some(Segment::Famiglia), 0)
        );
    }

    #[test]
    fn test_unchanged_inputs_do_not_refetch() {
        let mut h = Harness::new();
        let id = h.open("A1");
        let calls = h.api.customer_calls.borrow().len();

        h.controller.set_analysis_id(id);
        h.controller.set_segment_filter(None);
        h.controller.set_page(0);
        h.settle();

        assert_eq!(h.api.customer_calls.borrow().len(), calls);
        assert_eq!(h.api.overview_calls.borrow().len(), 1);
    }

    #[test]
    fn test_return_to_previous_key_is_fetched_again() {
        let mut h = Harness::new();
        let id = h.open("A1");
        h.controller.set_segment_filter(Some(Segment::Leisure));
        h.settle();
        h.controller.set_segment_filter(None);
        h.settle();

        let calls = h.api.customer_calls.borrow().clone();
        assert_eq!(
            calls,
            vec![
                customer_key(&id, None, 0),
                customer_key(&id, Some(Segment::Leisure), 0),
                customer_key(&id, None, 0),
            ]
        );
    }

    #[test]
    fn test_new_analysis_id_resets_table_inputs() {
        let mut h = Harness::new();
        h.open("A1");
        h.controller.set_segment_filter(Some(Segment::Premium));
        h.controller.set_page(2);
        h.settle();

        let a2 = analysis("A2");
        h.controller.set_analysis_id(a2.clone());
        h.settle();
        assert_eq!(h.api.last_customer_call(), customer_key(&a2, None, 0));
        assert_eq!(h.api.overview_calls.borrow().len(), 2);
    }

    #[test]
    fn test_previous_page_stops_at_zero() {
        let mut h = Harness::new();
        h.open("A1");
        assert!(!h.controller.has_previous_page());
        assert!(!h.controller.previous_page());

        h.controller.set_page(2);
        assert!(h.controller.has_previous_page());
        assert!(h.controller.previous_page());
        assert_eq!(h.controller.inputs().page, 1);
    }

    #[test]
    fn test_empty_filter_result_is_a_valid_page() {
        let mut h = Harness::new();
        let id = h.open("A1");
        h.controller.set_segment_filter(Some(Segment::Premium));
        h.settle();
        h.api
            .answer_customers(&customer_key(&id, Some(Segment::Premium), 0), Ok(Vec::new()));
        h.settle();

        let slice = h.controller.snapshot().customers;
        assert_eq!(slice.data, Some(Vec::new()));
        assert_eq!(slice.error, None);
        assert!(!slice.loading);
    }
}
