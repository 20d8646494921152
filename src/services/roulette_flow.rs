use std::sync::Arc;
use tracing::{info, warn};
use crate::error::AppError;
use crate::models::prediction::Prediction;
use crate::models::session::{SearchSession, SelectionResult};
use crate::repositories::blob_store::BlobStore;
use crate::repositories::places_gateway::PlacesGateway;
use crate::repositories::session_handoff::SessionHandoff;
use crate::services::address_search::AddressSearch;
use crate::services::filter_state::FilterState;
use crate::services::search_orchestrator::SearchOrchestrator;
use crate::services::selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStage {
    Idle,
    CriteriaEditing,
    Validating,
    Searching,
    ResultsReady,
    Selecting,
    Selected,
}

/// Drives one user from editing filters through searching to a random pick.
pub struct RouletteFlow {
    stage: FlowStage,
    gateway: Arc<PlacesGateway>,
    filters: FilterState,
    address_search: AddressSearch,
    orchestrator: SearchOrchestrator,
    handoff: SessionHandoff,
    session: Option<SearchSession>,
    selection: Option<SelectionResult>,
}

impl RouletteFlow {
    pub fn new(gateway: Arc<PlacesGateway>, store: Arc<dyn BlobStore>) -> Self {
        Self {
            stage: FlowStage::Idle,
            filters: FilterState::with_store(store.clone()),
            address_search: AddressSearch::new(gateway.clone()),
            orchestrator: SearchOrchestrator::new(gateway.clone()),
            handoff: SessionHandoff::new(store),
            gateway,
            session: None,
            selection: None,
        }
    }

    pub fn with_address_search(mut self, address_search: AddressSearch) -> Self {
        self.address_search = address_search;
        self
    }

    /// Restores stored filters and enters criteria editing.
    pub fn start(&mut self) -> anyhow::Result<()> {
        self.filters.load()?;
        self.stage = FlowStage::CriteriaEditing;
        Ok(())
    }

    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Any edit invalidates the previous pick.
    pub fn edit(&mut self) -> &mut FilterState {
        self.stage = FlowStage::CriteriaEditing;
        self.selection = None;
        &mut self.filters
    }

    pub fn type_address(&mut self, text: &str) {
        self.edit().set_pending_address(text);
        self.address_search.on_input(text);
    }

    pub fn suggestions(&mut self) -> &[Prediction] {
        let latest = self.address_search.predictions();
        self.filters.set_suggestions(latest);
        self.filters.suggestions()
    }

    pub async fn choose_place(&mut self, place_id: &str) -> Result<(), AppError> {
        self.stage = FlowStage::CriteriaEditing;
        self.selection = None;
        self.filters
            .set_location_from_place(&self.gateway, place_id)
            .await?;
        self.address_search.finish();
        Ok(())
    }

    /// Validates, searches and hands the result over for selection. Returns
    /// the number of matching restaurants, 0 also when the upstream failed.
    pub async fn submit(&mut self) -> Result<usize, AppError> {
        self.stage = FlowStage::Validating;
        if let Err(e) = self.filters.validate_for_search() {
            self.stage = FlowStage::CriteriaEditing;
            return Err(e);
        }

        self.stage = FlowStage::Searching;
        self.selection = None;
        self.session = None;
        // the previous session no longer matches the filters being searched
        if let Err(e) = self.handoff.clear() {
            warn!("Failed to clear the previous search session due to: {:#}", e);
        }
        let criteria = self.filters.criteria().clone();
        let outcome = self.orchestrator.search(&criteria).await;

        let session = SearchSession::new(criteria, outcome.candidates);
        if let Err(e) = self.handoff.save_session(&session) {
            warn!("Failed to hand off search session due to: {:#}", e);
        }
        self.session = Some(session);
        self.stage = FlowStage::ResultsReady;

        Ok(outcome.total_count)
    }

    /// Picks up the session stored by an earlier search.
    pub fn resume_session(&mut self) -> bool {
        match self.handoff.load_session() {
            Some(session) => {
                info!("Resumed search session with {} restaurants", session.candidates.len());
                self.session = Some(session);
                self.selection = None;
                self.stage = FlowStage::ResultsReady;
                true
            }
            None => false,
        }
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    pub fn can_spin(&self) -> bool {
        matches!(self.stage, FlowStage::ResultsReady | FlowStage::Selected)
            && self
                .session
                .as_ref()
                .map(|session| !session.candidates.is_empty())
                .unwrap_or(false)
    }

    pub fn spin(&mut self) -> Option<&SelectionResult> {
        if !self.can_spin() {
            return None;
        }

        self.stage = FlowStage::Selecting;
        let selection = self.session.as_ref().and_then(selector::spin);
        self.stage = FlowStage::Selected;
        self.selection = selection;
        self.selection.as_ref()
    }

    pub fn selection(&self) -> Option<&SelectionResult> {
        self.selection.as_ref()
    }
}
