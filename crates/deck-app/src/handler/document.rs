//! Document lifecycle: renderer init, document load, page renders and
//! background preloading

use std::collections::BTreeSet;

use deck_core::{batch_with_neighbours, next_batch, SequenceSlot};
use deck_core::prelude::*;

use crate::shell::{DocumentInfo, RenderOptions, RenderPurpose, RenderedPage};
use crate::state::{LoadFailure, LoadPhase, LoadStage, ViewerState};
use crate::timer::{Timer, TimerSlot};

use super::{capsules, carousel, UpdateAction, UpdateResult};

/// Begin a fresh load: initialize the renderer, then open the document
pub(crate) fn handle_start(state: &mut ViewerState) -> UpdateResult {
    if matches!(
        state.load,
        LoadPhase::InitializingRenderer | LoadPhase::LoadingDocument
    ) {
        debug!("Load already in progress, ignoring start");
        return UpdateResult::none();
    }

    state.generation += 1;
    state.load = LoadPhase::InitializingRenderer;
    state.in_flight.clear();
    info!("Starting renderer for {}", state.source_name());

    let mut actions = vec![UpdateAction::InitializeRenderer {
        generation: state.generation,
    }];
    if !state.indicator.running {
        actions.extend(carousel::start(state, 0));
    }
    UpdateResult::actions(actions)
}

pub(crate) fn handle_renderer_ready(state: &mut ViewerState, generation: u64) -> UpdateResult {
    if generation != state.generation {
        return UpdateResult::none();
    }

    state.load = LoadPhase::LoadingDocument;
    UpdateResult::action(UpdateAction::LoadDocument { generation })
}

pub(crate) fn handle_load_failed(
    state: &mut ViewerState,
    generation: u64,
    stage: LoadStage,
    message: String,
) -> UpdateResult {
    if generation != state.generation {
        return UpdateResult::none();
    }

    error!("Load failed ({}): {}", stage.as_str(), message);
    state.load = LoadPhase::Failed(LoadFailure { stage, message });
    state.in_flight.clear();
    state.visible = None;
    UpdateResult::action(UpdateAction::CancelTimers(vec![
        TimerSlot::LoadingSettle,
        TimerSlot::Transition,
    ]))
}

/// Retry from the error screen
pub(crate) fn handle_retry(state: &mut ViewerState) -> UpdateResult {
    if state.load.failure().is_none() {
        return UpdateResult::none();
    }
    info!("Retrying load");
    state.load = LoadPhase::NotStarted;
    handle_start(state)
}

/// The deck changed on disk: reopen it with the renderer already running
pub(crate) fn handle_document_changed(state: &mut ViewerState) -> UpdateResult {
    let reloadable = match &state.load {
        LoadPhase::Loaded => true,
        LoadPhase::Failed(failure) => failure.stage == LoadStage::Document,
        _ => false,
    };
    if !reloadable {
        debug!("Ignoring document change while {:?}", state.load);
        return UpdateResult::none();
    }

    info!("Deck changed on disk, reloading");
    state.generation += 1;
    state.load = LoadPhase::LoadingDocument;
    state.in_flight.clear();
    UpdateResult::action(UpdateAction::LoadDocument {
        generation: state.generation,
    })
}

pub(crate) fn handle_document_loaded(
    state: &mut ViewerState,
    generation: u64,
    info: DocumentInfo,
) -> UpdateResult {
    if generation != state.generation {
        return UpdateResult::none();
    }

    let page_count = info.page_count;
    state.mapper = state.mapper.with_page_count(page_count);
    state.cache.reset(page_count);
    state.load = LoadPhase::Loaded;
    state.in_flight.clear();
    state.capsules.thresholds = state
        .settings
        .call_to_action
        .policy()
        .thresholds(&state.mapper);

    let mut actions = Vec::new();

    // Abandon any transition from the previous document
    let navigation = &mut state.navigation;
    navigation.navigation_id += 1;
    navigation.transition = deck_core::Transition::idle();
    navigation.target = None;
    actions.push(UpdateAction::CancelTimers(vec![TimerSlot::Transition]));

    if !state.mapper.contains(state.navigation.position) {
        state.navigation.position = 1;
    }

    if !state.navigation.initialized {
        actions.push(UpdateAction::schedule(
            Timer::AnimationReady { generation },
            state.settings.navigation.initialize_delay_ms,
        ));
    }

    if state.cache.is_ready() || page_count == 0 {
        actions.push(schedule_loading_settled(state));
    } else {
        state.loading_settled = false;
    }

    info!(
        "Document ready: {} pages, {} positions",
        page_count,
        state.mapper.len()
    );

    if !state.indicator.running {
        actions.extend(carousel::start(state, 0));
    }
    actions.extend(show_current(state));
    UpdateResult::actions(actions)
}

pub(crate) fn handle_page_rendered(
    state: &mut ViewerState,
    generation: u64,
    purpose: RenderPurpose,
    page: RenderedPage,
) -> UpdateResult {
    if generation != state.generation {
        return UpdateResult::none();
    }

    if purpose == RenderPurpose::Preload {
        state.in_flight.remove(&page.page);
    }

    let mut actions = mark_loaded(state, page.page);

    if purpose == RenderPurpose::Visible && state.current_page() == Some(page.page) {
        state.visible = Some(page);
    }

    actions.extend(pump_preload(state));
    UpdateResult::actions(actions)
}

/// A page that fails to render still counts as loaded so it cannot stall
/// readiness
pub(crate) fn handle_page_render_failed(
    state: &mut ViewerState,
    generation: u64,
    purpose: RenderPurpose,
    page: u32,
    message: String,
) -> UpdateResult {
    if generation != state.generation {
        return UpdateResult::none();
    }

    warn!("Page {} failed to render: {}", page, message);
    if purpose == RenderPurpose::Preload {
        state.in_flight.remove(&page);
    }

    let mut actions = mark_loaded(state, page);
    actions.extend(pump_preload(state));
    UpdateResult::actions(actions)
}

pub(crate) fn handle_animation_ready(state: &mut ViewerState, generation: u64) -> UpdateResult {
    if generation == state.generation && !state.navigation.initialized {
        debug!("Navigation enabled");
        state.navigation.initialized = true;
    }
    UpdateResult::none()
}

pub(crate) fn handle_loading_settled(state: &mut ViewerState, generation: u64) -> UpdateResult {
    if generation == state.generation {
        state.loading_settled = true;
    }
    UpdateResult::none()
}

pub(crate) fn handle_resize(state: &mut ViewerState, width: f32, height: f32) -> UpdateResult {
    state.viewport = deck_core::PageSize::new(width, height);
    let previous = state.page_size;
    state.refit_page();

    if state.page_size == previous || !state.load.is_loaded() {
        return UpdateResult::none();
    }

    UpdateResult::actions(render_visible(state).into_iter().collect())
}

/// Everything that follows a position change: render the new page, re-plan
/// preloading and check the capsule thresholds
pub(crate) fn show_current(state: &mut ViewerState) -> Vec<UpdateAction> {
    state.visible = None;

    let mut actions: Vec<UpdateAction> = render_visible(state).into_iter().collect();
    actions.extend(pump_preload(state));
    actions.extend(capsules::observe(state));
    actions
}

fn render_visible(state: &ViewerState) -> Option<UpdateAction> {
    if !state.load.is_loaded() {
        return None;
    }
    let page = state.current_page()?;
    Some(UpdateAction::RenderPage {
        generation: state.generation,
        page,
        options: RenderOptions::visible(state.page_size),
        purpose: RenderPurpose::Visible,
    })
}

/// Record a completed render, scheduling the overlay dismissal when the
/// cache just became ready
fn mark_loaded(state: &mut ViewerState, page: u32) -> Vec<UpdateAction> {
    if state.cache.mark_loaded(page) && state.cache.is_ready() {
        info!("All {} pages loaded", state.cache.page_count());
        return vec![schedule_loading_settled(state)];
    }
    Vec::new()
}

fn schedule_loading_settled(state: &ViewerState) -> UpdateAction {
    UpdateAction::schedule(
        Timer::LoadingSettled {
            generation: state.generation,
        },
        state.settings.loading.settle_ms,
    )
}

/// Issue preload renders up to the in-flight cap
pub(crate) fn pump_preload(state: &mut ViewerState) -> Vec<UpdateAction> {
    let page_count = state.cache.page_count();
    if !state.settings.preload.enabled || !state.load.is_loaded() || page_count <= 1 {
        return Vec::new();
    }

    let available = state.settings.preload.cap.saturating_sub(state.in_flight.len());
    if available == 0 {
        return Vec::new();
    }

    let excluded: BTreeSet<u32> = state
        .cache
        .loaded()
        .union(&state.in_flight)
        .copied()
        .collect();
    let batch = match state.current_slot() {
        SequenceSlot::Insertion(_) => {
            let (before, after) = state.mapper.neighbour_pages(state.position());
            let neighbours = before.into_iter().chain(after);
            batch_with_neighbours(None, neighbours, &excluded, page_count, available)
        }
        slot => next_batch(slot.page(), &excluded, page_count, available),
    };

    let options = RenderOptions::preload(state.page_size);
    batch
        .into_iter()
        .map(|page| {
            state.in_flight.insert(page);
            UpdateAction::RenderPage {
                generation: state.generation,
                page,
                options,
                purpose: RenderPurpose::Preload,
            }
        })
        .collect()
}
