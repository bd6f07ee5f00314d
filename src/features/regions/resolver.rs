//! Selection state machine behind the province/district selector.
//!
//! The resolver never performs I/O. Each transition mutates the selection
//! synchronously and returns the directory fetches it needs as
//! [`FetchCommand`]s; whoever executes them hands the results back through
//! [`SelectionResolver::complete`]. Every command carries a ticket, and a
//! completion whose ticket is no longer the one the resolver waits for is
//! dropped. That is how a slow district fetch for a province the user has
//! already moved away from is kept from overwriting the newer list.

use crate::features::regions::error::{RegionError, RegionResult};
use crate::features::regions::models::Region;
use crate::features::regions::observer::SelectionObserver;

pub type Ticket = u64;

/// Directory request issued by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCommand {
    Provinces { ticket: Ticket },
    Districts { ticket: Ticket, province_code: String },
    Resolve { ticket: Ticket, code: String },
}

impl FetchCommand {
    pub fn ticket(&self) -> Ticket {
        match self {
            FetchCommand::Provinces { ticket }
            | FetchCommand::Districts { ticket, .. }
            | FetchCommand::Resolve { ticket, .. } => *ticket,
        }
    }
}

/// Result of a [`FetchCommand`], fed back into the resolver
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Provinces {
        ticket: Ticket,
        result: RegionResult<Vec<Region>>,
    },
    Districts {
        ticket: Ticket,
        province_code: String,
        result: RegionResult<Vec<Region>>,
    },
    Resolved {
        ticket: Ticket,
        code: String,
        result: RegionResult<Region>,
    },
}

/// Currently selected province and district; empty strings mean unselected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub province_code: String,
    pub district_code: String,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.province_code.is_empty()
    }

    /// Most specific selected code: the district if any, else the province
    pub fn region_code(&self) -> &str {
        if self.district_code.is_empty() {
            &self.province_code
        } else {
            &self.district_code
        }
    }
}

#[derive(Debug, Clone)]
struct PendingHydration {
    ticket: Ticket,
    code: String,
}

pub struct SelectionResolver {
    observer: Box<dyn SelectionObserver>,
    provinces: Vec<Region>,
    selection: Selection,
    province_name: String,
    districts: Vec<Region>,
    /// Province whose districts are held in `districts`
    districts_province: Option<String>,
    provinces_ticket: Option<Ticket>,
    districts_ticket: Option<Ticket>,
    pending_hydration: Option<PendingHydration>,
    next_ticket: Ticket,
    disposed: bool,
}

impl SelectionResolver {
    pub fn new(observer: Box<dyn SelectionObserver>) -> Self {
        Self {
            observer,
            provinces: Vec::new(),
            selection: Selection::default(),
            province_name: String::new(),
            districts: Vec::new(),
            districts_province: None,
            provinces_ticket: None,
            districts_ticket: None,
            pending_hydration: None,
            next_ticket: 1,
            disposed: false,
        }
    }

    // ==================== Read access ====================

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn provinces(&self) -> &[Region] {
        &self.provinces
    }

    /// Districts loaded for the selected province
    pub fn districts(&self) -> &[Region] {
        &self.districts
    }

    pub fn province_name(&self) -> &str {
        &self.province_name
    }

    /// Code of a hydration request still waiting for its lookup
    pub fn pending_hydration(&self) -> Option<&str> {
        self.pending_hydration.as_ref().map(|p| p.code.as_str())
    }

    pub fn is_loading_districts(&self) -> bool {
        self.districts_ticket.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ==================== Transitions ====================

    /// Request the province list. A newer request supersedes an older one.
    pub fn load_provinces(&mut self) -> RegionResult<Vec<FetchCommand>> {
        self.ensure_active()?;
        let ticket = self.issue_ticket();
        self.provinces_ticket = Some(ticket);
        Ok(vec![FetchCommand::Provinces { ticket }])
    }

    /// Explicit province choice; `""` clears the selection.
    ///
    /// The district is always cleared and the province is emitted right away,
    /// before its districts arrive.
    pub fn set_province(&mut self, code: &str) -> RegionResult<Vec<FetchCommand>> {
        self.ensure_active()?;
        self.drop_pending_hydration();

        self.selection.province_code = code.to_string();
        self.selection.district_code.clear();
        self.province_name = self.lookup_province_name(code);
        self.districts.clear();
        self.districts_province = None;
        self.districts_ticket = None;

        let commands = if code.is_empty() {
            Vec::new()
        } else {
            vec![self.request_districts(code)]
        };

        let name = self.province_name.clone();
        self.observer.on_selection(code, &name);
        Ok(commands)
    }

    /// Explicit district choice; `""` falls back to the selected province.
    ///
    /// A code that is not among the loaded districts is rejected with
    /// `InvalidTransition` and leaves the state untouched.
    pub fn set_district(&mut self, code: &str) -> RegionResult<()> {
        self.ensure_active()?;

        if code.is_empty() {
            self.drop_pending_hydration();
            self.selection.district_code.clear();
            let province_code = self.selection.province_code.clone();
            let name = self.province_name.clone();
            self.observer.on_selection(&province_code, &name);
            return Ok(());
        }

        let found = self
            .districts
            .iter()
            .find(|d| d.code == code)
            .map(|d| d.name.clone());
        let Some(name) = found else {
            let error = RegionError::InvalidTransition(format!(
                "District '{}' is not loaded for province '{}'",
                code, self.selection.province_code
            ));
            self.observer.on_error(&error);
            return Err(error);
        };

        self.drop_pending_hydration();
        self.selection.district_code = code.to_string();
        self.observer.on_selection(code, &name);
        Ok(())
    }

    /// Seed the whole selection from one code of unknown level.
    ///
    /// Nothing changes until the lookup completes; an empty code is ignored.
    pub fn hydrate(&mut self, code: &str) -> RegionResult<Vec<FetchCommand>> {
        self.ensure_active()?;
        if code.is_empty() {
            return Ok(Vec::new());
        }

        let ticket = self.issue_ticket();
        self.pending_hydration = Some(PendingHydration {
            ticket,
            code: code.to_string(),
        });
        Ok(vec![FetchCommand::Resolve {
            ticket,
            code: code.to_string(),
        }])
    }

    /// Stop accepting transitions and forget everything, in-flight interest included
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.selection = Selection::default();
        self.province_name.clear();
        self.districts.clear();
        self.districts_province = None;
        self.provinces_ticket = None;
        self.districts_ticket = None;
        self.pending_hydration = None;
        tracing::debug!("Selection resolver disposed");
    }

    // ==================== Completions ====================

    /// Apply a finished fetch. Returns follow-up fetches, if any.
    pub fn complete(&mut self, outcome: FetchOutcome) -> Vec<FetchCommand> {
        if self.disposed {
            tracing::debug!("Ignoring fetch completion after dispose");
            return Vec::new();
        }

        match outcome {
            FetchOutcome::Provinces { ticket, result } => {
                self.apply_provinces(ticket, result);
                Vec::new()
            }
            FetchOutcome::Districts {
                ticket,
                province_code,
                result,
            } => {
                self.apply_districts(ticket, &province_code, result);
                Vec::new()
            }
            FetchOutcome::Resolved {
                ticket,
                code,
                result,
            } => self.apply_resolved(ticket, &code, result),
        }
    }

    fn apply_provinces(&mut self, ticket: Ticket, result: RegionResult<Vec<Region>>) {
        if self.provinces_ticket != Some(ticket) {
            tracing::debug!("Discarding stale province list (ticket {})", ticket);
            return;
        }
        self.provinces_ticket = None;

        match result {
            Ok(provinces) => {
                self.provinces = provinces;
                if self.province_name.is_empty() && !self.selection.province_code.is_empty() {
                    self.province_name = self.lookup_province_name(&self.selection.province_code);
                }
            }
            Err(error) => {
                tracing::warn!("Failed to fetch provinces: {}", error);
                self.observer.on_error(&error);
            }
        }
    }

    fn apply_districts(
        &mut self,
        ticket: Ticket,
        province_code: &str,
        result: RegionResult<Vec<Region>>,
    ) {
        if self.districts_ticket != Some(ticket) || self.selection.province_code != province_code
        {
            tracing::debug!(
                "Discarding stale district list for {} (selected: {:?})",
                province_code,
                self.selection.province_code
            );
            return;
        }
        self.districts_ticket = None;
        self.districts_province = Some(province_code.to_string());

        match result {
            Ok(districts) => self.merge_districts(province_code, districts),
            Err(error) => {
                tracing::warn!(
                    "Failed to fetch districts for {}: {}",
                    province_code,
                    error
                );
                // Keep only what is already selected so the selection stays valid
                let selected = &self.selection.district_code;
                self.districts.retain(|d| &d.code == selected);
                self.observer.on_error(&error);
            }
        }
    }

    fn merge_districts(&mut self, province_code: &str, districts: Vec<Region>) {
        let fetched = districts.len();
        let districts: Vec<Region> = districts
            .into_iter()
            .filter(|d| d.belongs_to(province_code))
            .collect();
        if districts.len() != fetched {
            tracing::warn!(
                "Dropped {} districts not belonging to {}",
                fetched - districts.len(),
                province_code
            );
        }

        let selected = self.selection.district_code.clone();
        self.districts = districts;

        if !selected.is_empty() && !self.districts.iter().any(|d| d.code == selected) {
            self.selection.district_code.clear();
            self.observer.on_error(&RegionError::NotFound(format!(
                "District '{}' is not listed under province '{}'",
                selected, province_code
            )));
            let name = self.province_name.clone();
            self.observer.on_selection(province_code, &name);
        }
    }

    fn apply_resolved(
        &mut self,
        ticket: Ticket,
        code: &str,
        result: RegionResult<Region>,
    ) -> Vec<FetchCommand> {
        match &self.pending_hydration {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                tracing::debug!("Discarding superseded hydration of {}", code);
                return Vec::new();
            }
        }
        self.pending_hydration = None;

        match result {
            Ok(region) => match region.parent_code.clone() {
                None => self.hydrate_province(region),
                Some(parent) if parent.is_empty() || parent == region.code => {
                    let error = RegionError::InvalidTransition(format!(
                        "Region '{}' has an invalid parent '{}'",
                        region.code, parent
                    ));
                    self.observer.on_error(&error);
                    Vec::new()
                }
                Some(parent) => self.hydrate_district(parent, region),
            },
            Err(error) => {
                tracing::warn!("Failed to hydrate region {}: {}", code, error);
                self.observer.on_error(&error);
                Vec::new()
            }
        }
    }

    fn hydrate_province(&mut self, province: Region) -> Vec<FetchCommand> {
        let same_province = self.selection.province_code == province.code;
        let reuse = same_province
            && (self.districts_province.as_deref() == Some(province.code.as_str())
                || self.districts_ticket.is_some());

        self.selection.province_code = province.code.clone();
        self.selection.district_code.clear();
        self.province_name = province.name.clone();

        let commands = if reuse {
            Vec::new()
        } else {
            self.districts.clear();
            self.districts_province = None;
            vec![self.request_districts(&province.code)]
        };

        self.observer.on_selection(&province.code, &province.name);
        commands
    }

    fn hydrate_district(&mut self, parent: String, district: Region) -> Vec<FetchCommand> {
        let reuse = self.selection.province_code == parent
            && self.districts_province.as_deref() == Some(parent.as_str())
            && self.districts.iter().any(|d| d.code == district.code);

        if self.selection.province_code != parent {
            self.province_name = self.lookup_province_name(&parent);
        }
        self.selection.province_code = parent.clone();
        self.selection.district_code = district.code.clone();

        let commands = if reuse {
            tracing::debug!("Reusing loaded districts of {}", parent);
            Vec::new()
        } else {
            // The resolved district is the first known member of the list;
            // the full list is merged in when it arrives
            self.districts = vec![district.clone()];
            self.districts_province = Some(parent.clone());
            vec![self.request_districts(&parent)]
        };

        self.observer.on_selection(&district.code, &district.name);
        commands
    }

    // ==================== Helpers ====================

    fn ensure_active(&self) -> RegionResult<()> {
        if self.disposed {
            tracing::debug!("Rejecting transition on disposed resolver");
            return Err(RegionError::Disposed);
        }
        Ok(())
    }

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    fn request_districts(&mut self, province_code: &str) -> FetchCommand {
        let ticket = self.issue_ticket();
        self.districts_ticket = Some(ticket);
        FetchCommand::Districts {
            ticket,
            province_code: province_code.to_string(),
        }
    }

    fn drop_pending_hydration(&mut self) {
        if let Some(pending) = self.pending_hydration.take() {
            tracing::debug!(
                "Explicit selection supersedes pending hydration of {}",
                pending.code
            );
        }
    }

    fn lookup_province_name(&self, code: &str) -> String {
        self.provinces
            .iter()
            .find(|p| p.code == code)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::regions::observer::SelectionEvent;
    use crate::features::regions::services::{RegionDirectory, StaticRegionDirectory};
    use crate::shared::test_helpers::{drain_events, event_channel};
    use tokio::sync::mpsc::UnboundedReceiver;

    async fn execute(directory: &StaticRegionDirectory, command: FetchCommand) -> FetchOutcome {
        match command {
            FetchCommand::Provinces { ticket } => FetchOutcome::Provinces {
                ticket,
                result: directory.list_provinces().await,
            },
            FetchCommand::Districts {
                ticket,
                province_code,
            } => FetchOutcome::Districts {
                ticket,
                result: directory.list_districts(&province_code).await,
                province_code,
            },
            FetchCommand::Resolve { ticket, code } => FetchOutcome::Resolved {
                ticket,
                result: directory.resolve(&code).await,
                code,
            },
        }
    }

    /// Run commands (and their follow-ups) in issue order
    async fn run(
        resolver: &mut SelectionResolver,
        directory: &StaticRegionDirectory,
        commands: Vec<FetchCommand>,
    ) {
        let mut queue = std::collections::VecDeque::from(commands);
        while let Some(command) = queue.pop_front() {
            let outcome = execute(directory, command).await;
            queue.extend(resolver.complete(outcome));
        }
    }

    async fn ready_resolver() -> (
        SelectionResolver,
        StaticRegionDirectory,
        UnboundedReceiver<SelectionEvent>,
    ) {
        let (tx, mut rx) = event_channel();
        let directory = StaticRegionDirectory::korea_sample();
        let mut resolver = SelectionResolver::new(Box::new(tx));
        let commands = resolver.load_provinces().unwrap();
        run(&mut resolver, &directory, commands).await;
        drain_events(&mut rx);
        (resolver, directory, rx)
    }

    fn assert_consistent(resolver: &SelectionResolver) {
        let selection = resolver.selection();
        if !selection.district_code.is_empty() {
            assert!(resolver
                .districts()
                .iter()
                .any(|d| d.code == selection.district_code));
        }
        assert!(resolver
            .districts()
            .iter()
            .all(|d| d.belongs_to(&selection.province_code)));
    }

    #[test]
    fn test_initial_state_is_empty() {
        let (tx, _rx) = event_channel();
        let resolver = SelectionResolver::new(Box::new(tx));
        assert!(resolver.selection().is_empty());
        assert!(resolver.districts().is_empty());
        assert_eq!(resolver.pending_hydration(), None);
    }

    #[tokio::test]
    async fn test_province_then_district_then_clear() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;

        let commands = resolver.set_province("SEOUL").unwrap();
        run(&mut resolver, &directory, commands).await;
        resolver.set_district("SEOUL-GANGNAM").unwrap();
        resolver.set_district("").unwrap();

        assert_eq!(
            drain_events(&mut rx),
            vec![
                SelectionEvent::selected("SEOUL", "서울특별시"),
                SelectionEvent::selected("SEOUL-GANGNAM", "강남구"),
                SelectionEvent::selected("SEOUL", "서울특별시"),
            ]
        );
        assert_eq!(resolver.selection().district_code, "");
        assert_consistent(&resolver);
    }

    #[tokio::test]
    async fn test_province_emitted_before_districts_load() {
        let (mut resolver, _directory, mut rx) = ready_resolver().await;

        let commands = resolver.set_province("Busan").unwrap();
        assert_eq!(
            drain_events(&mut rx),
            vec![SelectionEvent::selected("Busan", "부산광역시")]
        );
        assert!(resolver.is_loading_districts());
        assert!(matches!(
            commands.as_slice(),
            [FetchCommand::Districts { province_code, .. }] if province_code == "Busan"
        ));
    }

    #[tokio::test]
    async fn test_clearing_province_emits_empty_pair() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;
        let commands = resolver.set_province("SEOUL").unwrap();
        run(&mut resolver, &directory, commands).await;

        let commands = resolver.set_province("").unwrap();
        assert!(commands.is_empty());
        resolver.set_district("").unwrap();

        let events = drain_events(&mut rx);
        assert_eq!(
            &events[1..],
            &[
                SelectionEvent::selected("", ""),
                SelectionEvent::selected("", "")
            ]
        );
        assert!(resolver.districts().is_empty());
    }

    #[tokio::test]
    async fn test_reselecting_province_is_idempotent() {
        let (mut once, directory, mut once_rx) = ready_resolver().await;
        let commands = once.set_province("Jeju-DO").unwrap();
        run(&mut once, &directory, commands).await;

        let (mut twice, directory, mut twice_rx) = ready_resolver().await;
        let first = twice.set_province("Jeju-DO").unwrap();
        let second = twice.set_province("Jeju-DO").unwrap();
        run(&mut twice, &directory, first).await;
        run(&mut twice, &directory, second).await;

        assert_eq!(
            drain_events(&mut once_rx).last(),
            drain_events(&mut twice_rx).last()
        );
        assert_eq!(once.selection(), twice.selection());
        assert_eq!(once.districts(), twice.districts());
    }

    #[tokio::test]
    async fn test_district_outside_loaded_list_is_rejected() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;
        let commands = resolver.set_province("SEOUL").unwrap();
        run(&mut resolver, &directory, commands).await;
        resolver.set_district("SEOUL-MAPO").unwrap();
        drain_events(&mut rx);

        let err = resolver.set_district("Busan-Haeundae").unwrap_err();
        assert!(matches!(err, RegionError::InvalidTransition(_)));
        assert_eq!(resolver.selection().district_code, "SEOUL-MAPO");
        assert_eq!(drain_events(&mut rx), vec![SelectionEvent::Failed(err)]);
    }

    #[tokio::test]
    async fn test_unknown_province_degrades_to_empty_list() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;

        let commands = resolver.set_province("Daegu").unwrap();
        run(&mut resolver, &directory, commands).await;

        let events = drain_events(&mut rx);
        assert_eq!(events[0], SelectionEvent::selected("Daegu", ""));
        assert!(matches!(
            events[1],
            SelectionEvent::Failed(RegionError::NotFound(_))
        ));
        assert_eq!(resolver.selection().province_code, "Daegu");
        assert!(resolver.districts().is_empty());
        assert!(!resolver.is_loading_districts());
    }

    #[tokio::test]
    async fn test_hydrate_district_from_empty_state() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;

        let commands = resolver.hydrate("SEOUL-GANGNAM").unwrap();
        assert_eq!(resolver.pending_hydration(), Some("SEOUL-GANGNAM"));
        run(&mut resolver, &directory, commands).await;

        assert_eq!(
            resolver.selection(),
            &Selection {
                province_code: "SEOUL".to_string(),
                district_code: "SEOUL-GANGNAM".to_string(),
            }
        );
        assert_eq!(resolver.province_name(), "서울특별시");
        assert_eq!(resolver.districts().len(), 4);
        assert_eq!(
            drain_events(&mut rx),
            vec![SelectionEvent::selected("SEOUL-GANGNAM", "강남구")]
        );
        assert_consistent(&resolver);
    }

    #[tokio::test]
    async fn test_hydrated_district_is_consistent_before_list_arrives() {
        let (mut resolver, directory, _rx) = ready_resolver().await;

        let resolve = resolver.hydrate("Busan-Busanjin").unwrap();
        let outcome = execute(&directory, resolve[0].clone()).await;
        let follow_up = resolver.complete(outcome);

        assert_eq!(follow_up.len(), 1);
        assert_eq!(resolver.selection().district_code, "Busan-Busanjin");
        assert_consistent(&resolver);
    }

    #[tokio::test]
    async fn test_hydrate_province() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;

        let commands = resolver.hydrate("Gyeonggi-DO").unwrap();
        run(&mut resolver, &directory, commands).await;

        assert_eq!(resolver.selection().province_code, "Gyeonggi-DO");
        assert_eq!(resolver.selection().district_code, "");
        assert_eq!(resolver.districts().len(), 3);
        assert_eq!(
            drain_events(&mut rx),
            vec![SelectionEvent::selected("Gyeonggi-DO", "경기도")]
        );
    }

    #[tokio::test]
    async fn test_hydrate_unknown_code_keeps_selection() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;
        let commands = resolver.set_province("SEOUL").unwrap();
        run(&mut resolver, &directory, commands).await;
        resolver.set_district("SEOUL-MAPO").unwrap();
        drain_events(&mut rx);
        let before = resolver.selection().clone();

        let commands = resolver.hydrate("UNKNOWN-CODE").unwrap();
        run(&mut resolver, &directory, commands).await;

        assert_eq!(resolver.selection(), &before);
        assert_eq!(resolver.districts().len(), 4);
        let events = drain_events(&mut rx);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            SelectionEvent::Failed(RegionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_hydrate_same_province_reuses_loaded_districts() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;
        let commands = resolver.set_province("SEOUL").unwrap();
        run(&mut resolver, &directory, commands).await;
        drain_events(&mut rx);

        let resolve = resolver.hydrate("SEOUL-JUNGGU").unwrap();
        let outcome = execute(&directory, resolve[0].clone()).await;
        let follow_up = resolver.complete(outcome);

        assert!(follow_up.is_empty());
        assert_eq!(resolver.selection().district_code, "SEOUL-JUNGGU");
        assert_eq!(resolver.districts().len(), 4);
        assert_eq!(
            drain_events(&mut rx),
            vec![SelectionEvent::selected("SEOUL-JUNGGU", "중구")]
        );
    }

    #[tokio::test]
    async fn test_stale_district_list_is_discarded() {
        let (mut resolver, directory, _rx) = ready_resolver().await;

        let seoul = resolver.set_province("SEOUL").unwrap();
        let busan = resolver.set_province("Busan").unwrap();

        // Busan answers first, Seoul's slow response arrives afterwards
        run(&mut resolver, &directory, busan).await;
        run(&mut resolver, &directory, seoul).await;

        assert_eq!(resolver.selection().province_code, "Busan");
        assert_eq!(resolver.districts().len(), 2);
        assert_consistent(&resolver);
    }

    #[tokio::test]
    async fn test_stale_list_discarded_even_when_it_arrives_first() {
        let (mut resolver, directory, _rx) = ready_resolver().await;

        let seoul = resolver.set_province("SEOUL").unwrap();
        let outcome = execute(&directory, seoul[0].clone()).await;
        let busan = resolver.set_province("Busan").unwrap();

        resolver.complete(outcome);
        assert!(resolver.districts().is_empty());
        assert!(resolver.is_loading_districts());

        run(&mut resolver, &directory, busan).await;
        assert!(resolver.districts().iter().all(|d| d.belongs_to("Busan")));
    }

    #[tokio::test]
    async fn test_user_click_beats_pending_hydration() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;

        let hydration = resolver.hydrate("SEOUL-GANGNAM").unwrap();
        let click = resolver.set_province("Jeju-DO").unwrap();
        assert_eq!(resolver.pending_hydration(), None);

        run(&mut resolver, &directory, click).await;
        run(&mut resolver, &directory, hydration).await;

        assert_eq!(resolver.selection().province_code, "Jeju-DO");
        assert_eq!(resolver.selection().district_code, "");
        assert_eq!(
            drain_events(&mut rx),
            vec![SelectionEvent::selected("Jeju-DO", "제주특별자치도")]
        );
        assert_consistent(&resolver);
    }

    #[tokio::test]
    async fn test_later_hydration_supersedes_earlier() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;

        let first = resolver.hydrate("SEOUL-GANGNAM").unwrap();
        let second = resolver.hydrate("Busan-Haeundae").unwrap();
        run(&mut resolver, &directory, second).await;
        run(&mut resolver, &directory, first).await;

        assert_eq!(resolver.selection().district_code, "Busan-Haeundae");
        assert_eq!(
            drain_events(&mut rx),
            vec![SelectionEvent::selected("Busan-Haeundae", "해운대구")]
        );
    }

    #[tokio::test]
    async fn test_failed_district_fetch_keeps_hydrated_district() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;

        let resolve = resolver.hydrate("SEOUL-MAPO").unwrap();
        let outcome = execute(&directory, resolve[0].clone()).await;
        let follow_up = resolver.complete(outcome);
        drain_events(&mut rx);

        resolver.complete(FetchOutcome::Districts {
            ticket: follow_up[0].ticket(),
            province_code: "SEOUL".to_string(),
            result: Err(RegionError::Unavailable("timeout".to_string())),
        });

        assert_eq!(resolver.selection().district_code, "SEOUL-MAPO");
        assert_eq!(resolver.districts().len(), 1);
        assert_consistent(&resolver);
        assert_eq!(
            drain_events(&mut rx),
            vec![SelectionEvent::Failed(RegionError::Unavailable(
                "timeout".to_string()
            ))]
        );
    }

    #[tokio::test]
    async fn test_foreign_districts_are_filtered_out() {
        let (mut resolver, _directory, _rx) = ready_resolver().await;
        let commands = resolver.set_province("SEOUL").unwrap();

        resolver.complete(FetchOutcome::Districts {
            ticket: commands[0].ticket(),
            province_code: "SEOUL".to_string(),
            result: Ok(vec![
                Region::district("SEOUL-MAPO", "마포구", "SEOUL"),
                Region::district("Busan-Haeundae", "해운대구", "Busan"),
            ]),
        });

        assert_eq!(resolver.districts().len(), 1);
        assert_consistent(&resolver);
    }

    #[tokio::test]
    async fn test_province_list_failure_is_reported() {
        let (tx, mut rx) = event_channel();
        let mut resolver = SelectionResolver::new(Box::new(tx));
        let commands = resolver.load_provinces().unwrap();

        resolver.complete(FetchOutcome::Provinces {
            ticket: commands[0].ticket(),
            result: Err(RegionError::Unavailable("offline".to_string())),
        });

        assert!(resolver.provinces().is_empty());
        assert!(matches!(
            drain_events(&mut rx).as_slice(),
            [SelectionEvent::Failed(RegionError::Unavailable(_))]
        ));
    }

    #[tokio::test]
    async fn test_dispose_resets_and_rejects() {
        let (mut resolver, directory, mut rx) = ready_resolver().await;
        let commands = resolver.set_province("SEOUL").unwrap();
        drain_events(&mut rx);

        resolver.dispose();
        assert!(resolver.selection().is_empty());
        assert_eq!(resolver.set_province("Busan"), Err(RegionError::Disposed));
        assert_eq!(resolver.hydrate("SEOUL"), Err(RegionError::Disposed));

        // In-flight completion after dispose is ignored
        run(&mut resolver, &directory, commands).await;
        assert!(resolver.districts().is_empty());
        assert!(drain_events(&mut rx).is_empty());
    }

    #[test]
    fn test_hydrate_empty_code_is_noop() {
        let (tx, _rx) = event_channel();
        let mut resolver = SelectionResolver::new(Box::new(tx));
        assert!(resolver.hydrate("").unwrap().is_empty());
        assert_eq!(resolver.pending_hydration(), None);
    }

    #[test]
    fn test_selection_region_code() {
        let mut selection = Selection {
            province_code: "SEOUL".to_string(),
            district_code: String::new(),
        };
        assert_eq!(selection.region_code(), "SEOUL");
        selection.district_code = "SEOUL-MAPO".to_string();
        assert_eq!(selection.region_code(), "SEOUL-MAPO");
    }
}
