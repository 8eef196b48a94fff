use crate::dashboards::d410_segmentation::api::{AnalysisApi, HttpAnalysisApi};
use crate::dashboards::d410_segmentation::sync::{
    AnalysisId, DashboardController, DashboardInputs, DashboardSnapshot, LeptosSpawner, Spawner,
};
use contracts::enums::Segment;
use leptos::prelude::*;
use std::rc::Rc;

type Controller = DashboardController<dyn AnalysisApi>;

/// Reactive handle to the dashboard controller.
///
/// `snapshot` mirrors the view state store after every write; `inputs`
/// mirrors analysis id / filter / page after every setter call.
#[derive(Clone, Copy)]
pub struct DashboardState {
    controller: StoredValue<Rc<Controller>, LocalStorage>,
    pub snapshot: RwSignal<DashboardSnapshot>,
    pub inputs: RwSignal<DashboardInputs>,
}

pub fn create_state() -> DashboardState {
    create_state_with(Rc::new(HttpAnalysisApi::from_config()), Rc::new(LeptosSpawner))
}

pub fn create_state_with(api: Rc<dyn AnalysisApi>, spawner: Rc<dyn Spawner>) -> DashboardState {
    let controller: Rc<Controller> = Rc::new(DashboardController::new(api, spawner));
    let snapshot = RwSignal::new(controller.snapshot());
    let inputs = RwSignal::new(controller.inputs());

    // Запросы могут завершиться после размонтирования страницы
    controller.store().subscribe(move |next| {
        let _ = snapshot.try_set(next.clone());
    });

    DashboardState {
        controller: StoredValue::new_local(controller),
        snapshot,
        inputs,
    }
}

impl DashboardState {
    fn with_controller<R>(&self, f: impl FnOnce(&Controller) -> R) -> R {
        let controller = self.controller.get_value();
        let result = f(&controller);
        self.inputs.set(controller.inputs());
        result
    }

    pub fn open(&self, analysis_id: AnalysisId) {
        self.with_controller(|c| c.set_analysis_id(analysis_id));
    }

    pub fn set_segment_filter(&self, segment: Option<Segment>) {
        self.with_controller(|c| c.set_segment_filter(segment));
    }

    pub fn next_page(&self) -> bool {
        self.with_controller(|c| c.next_page())
    }

    pub fn previous_page(&self) -> bool {
        self.with_controller(|c| c.previous_page())
    }

    pub fn page(&self) -> Signal<u32> {
        let inputs = self.inputs;
        Signal::derive(move || inputs.with(|i| i.page))
    }

    pub fn has_next_page(&self) -> Signal<bool> {
        let snapshot = self.snapshot;
        Signal::derive(move || snapshot.with(|s| s.has_next_page()))
    }
}
