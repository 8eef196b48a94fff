//! View state of the dashboard: one slice per query group.
//!
//! The presentation layer only reads snapshots. Each slice can be written only
//! through the writer handle returned by [`ViewStateStore::new`], and every
//! write replaces the whole slice at once.

use super::query_key::PAGE_SIZE;
use contracts::dashboards::d410_segmentation::{CustomerRow, Marketing, Overview};
use std::cell::RefCell;
use std::rc::Rc;

/// `{loading, error, data}` of one query group
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<T> {
    pub loading: bool,
    pub error: Option<String>,
    pub data: Option<T>,
}

impl<T> Default for Slice<T> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            data: None,
        }
    }
}

impl<T> Slice<T> {
    fn pending() -> Self {
        Self {
            loading: true,
            error: None,
            data: None,
        }
    }

    fn ready(data: T) -> Self {
        Self {
            loading: false,
            error: None,
            data: Some(data),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            loading: false,
            error: Some(message),
            data: None,
        }
    }
}

/// Payload of the overview group: both halves or nothing
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewBundle {
    pub overview: Overview,
    pub marketing: Marketing,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub overview: Slice<OverviewBundle>,
    pub customers: Slice<Vec<CustomerRow>>,
}

impl DashboardSnapshot {
    /// The server gives no total count: a full page means there may be more.
    pub fn has_next_page(&self) -> bool {
        self.customers
            .data
            .as_ref()
            .is_some_and(|rows| rows.len() == PAGE_SIZE as usize)
    }
}

type Listener = Rc<dyn Fn(&DashboardSnapshot)>;

struct StoreInner {
    snapshot: RefCell<DashboardSnapshot>,
    listeners: RefCell<Vec<Listener>>,
}

#[derive(Clone)]
pub struct ViewStateStore {
    inner: Rc<StoreInner>,
}

impl ViewStateStore {
    /// Creates the store together with the only two handles allowed to write it
    pub fn new() -> (Self, OverviewWriter, CustomerWriter) {
        let store = Self {
            inner: Rc::new(StoreInner {
                snapshot: RefCell::new(DashboardSnapshot::default()),
                listeners: RefCell::new(Vec::new()),
            }),
        };
        let overview = OverviewWriter {
            store: store.clone(),
        };
        let customers = CustomerWriter {
            store: store.clone(),
        };
        (store, overview, customers)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    pub fn overview(&self) -> Slice<OverviewBundle> {
        self.inner.snapshot.borrow().overview.clone()
    }

    pub fn customers(&self) -> Slice<Vec<CustomerRow>> {
        self.inner.snapshot.borrow().customers.clone()
    }

    /// Called after every write with the new snapshot
    pub fn subscribe(&self, listener: impl Fn(&DashboardSnapshot) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn write(&self, apply: impl FnOnce(&mut DashboardSnapshot)) {
        let snapshot = {
            let mut current = self.inner.snapshot.borrow_mut();
            apply(&mut current);
            current.clone()
        };
        // listeners may read the store or subscribe again
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

/// Write access to the overview slice
#[derive(Clone)]
pub struct OverviewWriter {
    store: ViewStateStore,
}

impl OverviewWriter {
    /// New analysis requested: loading, no error, previous data dropped
    pub fn begin(&self) {
        self.store.write(|s| s.overview = Slice::pending());
    }

    pub fn commit(&self, outcome: Result<OverviewBundle, String>) {
        let slice = match outcome {
            Ok(bundle) => Slice::ready(bundle),
            Err(message) => Slice::failed(message),
        };
        self.store.write(|s| s.overview = slice);
    }
}

/// Write access to the customer slice. It has no failure state: a failed
/// page is committed as an empty one.
#[derive(Clone)]
pub struct CustomerWriter {
    store: ViewStateStore,
}

impl CustomerWriter {
    pub fn begin(&self) {
        self.store.write(|s| s.customers = Slice::pending());
    }

    pub fn commit(&self, rows: Vec<CustomerRow>) {
        self.store.write(|s| s.customers = Slice::ready(rows));
    }
}
