//! Runs the network reads of one query group and commits the result only if
//! the key it was issued for is still the desired key when it completes.
//!
//! Stale responses are not aborted, they are dropped on arrival. Nothing is
//! retried.

use super::query_key::{AnalysisId, CustomerKey, OverviewKey};
use super::store::{CustomerWriter, OverviewBundle, OverviewWriter};
use crate::dashboards::d410_segmentation::api::AnalysisApi;
use contracts::dashboards::d410_segmentation::CustomerRow;
use futures::future::{join, LocalBoxFuture};
use futures::FutureExt;
use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

/// User-facing message of a failed overview group
pub const ANALYSIS_NOT_FOUND: &str = "Analisi non trovata";

/// Runs request futures on the local (single-threaded) executor
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Browser executor
pub struct LeptosSpawner;

impl Spawner for LeptosSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}

/// Shared cell holding the key a group currently wants
#[derive(Debug)]
pub struct DesiredKey<K> {
    current: Rc<RefCell<Option<K>>>,
}

impl<K> Clone for DesiredKey<K> {
    fn clone(&self) -> Self {
        Self {
            current: Rc::clone(&self.current),
        }
    }
}

impl<K> Default for DesiredKey<K> {
    fn default() -> Self {
        Self {
            current: Rc::new(RefCell::new(None)),
        }
    }
}

impl<K: Clone + PartialEq> DesiredKey<K> {
    pub fn set(&self, key: K) {
        *self.current.borrow_mut() = Some(key);
    }

    pub fn is_current(&self, key: &K) -> bool {
        self.current.borrow().as_ref() == Some(key)
    }
}

/// Spawns `fetch`; on completion commits its output unless `key` went stale
fn dispatch<K, P>(
    spawner: &dyn Spawner,
    group: &'static str,
    desired: &DesiredKey<K>,
    key: K,
    fetch: LocalBoxFuture<'static, P>,
    commit: impl FnOnce(P) + 'static,
) where
    K: Clone + PartialEq + Debug + 'static,
    P: 'static,
{
    let desired = desired.clone();
    log::debug!("{}: dispatch {:?}", group, key);
    spawner.spawn(
        async move {
            let payload = fetch.await;
            if desired.is_current(&key) {
                commit(payload);
            } else {
                log::debug!("{}: discarding stale response for {:?}", group, key);
            }
        }
        .boxed_local(),
    );
}

/// Overview + marketing, fetched concurrently, committed together
pub struct OverviewOrchestrator<A: ?Sized> {
    api: Rc<A>,
    spawner: Rc<dyn Spawner>,
    desired: DesiredKey<OverviewKey>,
    writer: OverviewWriter,
}

impl<A: AnalysisApi + ?Sized + 'static> OverviewOrchestrator<A> {
    pub fn new(
        api: Rc<A>,
        spawner: Rc<dyn Spawner>,
        desired: DesiredKey<OverviewKey>,
        writer: OverviewWriter,
    ) -> Self {
        Self {
            api,
            spawner,
            desired,
            writer,
        }
    }

    pub fn sync(&self, key: OverviewKey) {
        self.writer.begin();
        let api = Rc::clone(&self.api);
        let analysis_id = key.analysis_id.clone();
        let fetch = async move { fetch_overview_group(api.as_ref(), &analysis_id).await }.boxed_local();
        let writer = self.writer.clone();
        dispatch(
            self.spawner.as_ref(),
            "overview",
            &self.desired,
            key,
            fetch,
            move |outcome| writer.commit(outcome),
        );
    }
}

/// Both reads must succeed. Which one failed is not told to the user.
pub async fn fetch_overview_group<A: AnalysisApi + ?Sized>(
    api: &A,
    analysis_id: &AnalysisId,
) -> Result<OverviewBundle, String> {
    let (overview, marketing) = join(api.overview(analysis_id), api.marketing(analysis_id)).await;
    match (overview, marketing) {
        (Ok(overview), Ok(marketing)) => Ok(OverviewBundle {
            overview,
            marketing,
        }),
        (overview, marketing) => {
            if let Err(e) = overview {
                log::warn!("overview {} failed: {}", analysis_id, e);
            }
            if let Err(e) = marketing {
                log::warn!("marketing {} failed: {}", analysis_id, e);
            }
            Err(ANALYSIS_NOT_FOUND.to_string())
        }
    }
}

/// One page of the customer table
pub struct CustomerOrchestrator<A: ?Sized> {
    api: Rc<A>,
    spawner: Rc<dyn Spawner>,
    desired: DesiredKey<CustomerKey>,
    writer: CustomerWriter,
}

impl<A: AnalysisApi + ?Sized + 'static> CustomerOrchestrator<A> {
    pub fn new(
        api: Rc<A>,
        spawner: Rc<dyn Spawner>,
        desired: DesiredKey<CustomerKey>,
        writer: CustomerWriter,
    ) -> Self {
        Self {
            api,
            spawner,
            desired,
            writer,
        }
    }

    pub fn sync(&self, key: CustomerKey) {
        self.writer.begin();
        let api = Rc::clone(&self.api);
        let request = key.clone();
        let fetch = async move { fetch_customer_page(api.as_ref(), &request).await }.boxed_local();
        let writer = self.writer.clone();
        dispatch(
            self.spawner.as_ref(),
            "customers",
            &self.desired,
            key,
            fetch,
            move |rows| writer.commit(rows),
        );
    }
}

/// A failed page reads as an empty one so the rest of the dashboard stays usable
pub async fn fetch_customer_page<A: AnalysisApi + ?Sized>(
    api: &A,
    key: &CustomerKey,
) -> Vec<CustomerRow> {
    match api.customers(key).await {
        Ok(rows) => rows,
        Err(e) => {
            log::warn!("customers {:?} failed: {}", key, e);
            Vec::new()
        }
    }
}
