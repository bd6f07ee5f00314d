use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::features::regions::error::RegionResult;
use crate::features::regions::observer::SelectionObserver;
use crate::features::regions::resolver::{
    FetchCommand, FetchOutcome, Selection, SelectionResolver,
};
use crate::features::regions::services::RegionDirectory;
use crate::features::regions::view::{SelectorInput, SelectorView};

/// Drives a [`SelectionResolver`] against a [`RegionDirectory`].
///
/// Transitions apply immediately and in call order. The fetches they request
/// run concurrently and complete in whatever order the directory answers;
/// call [`RegionSelector::step`] or [`RegionSelector::settle`] to feed the
/// results back.
pub struct RegionSelector {
    resolver: SelectionResolver,
    directory: Arc<dyn RegionDirectory>,
    in_flight: FuturesUnordered<BoxFuture<'static, FetchOutcome>>,
}

impl RegionSelector {
    /// Create a selector and start loading the province list
    pub fn new(
        directory: Arc<dyn RegionDirectory>,
        observer: impl SelectionObserver + 'static,
    ) -> Self {
        let mut selector = Self {
            resolver: SelectionResolver::new(Box::new(observer)),
            directory,
            in_flight: FuturesUnordered::new(),
        };
        let commands = selector.resolver.load_provinces().unwrap_or_default();
        selector.dispatch(commands);
        selector
    }

    pub fn select_province(&mut self, code: &str) -> RegionResult<()> {
        let commands = self.resolver.set_province(code)?;
        self.dispatch(commands);
        Ok(())
    }

    pub fn select_district(&mut self, code: &str) -> RegionResult<()> {
        self.resolver.set_district(code)
    }

    /// Preselect from a code of either level, e.g. a route parameter
    pub fn hydrate(&mut self, code: &str) -> RegionResult<()> {
        let commands = self.resolver.hydrate(code)?;
        self.dispatch(commands);
        Ok(())
    }

    pub fn reload_provinces(&mut self) -> RegionResult<()> {
        let commands = self.resolver.load_provinces()?;
        self.dispatch(commands);
        Ok(())
    }

    /// Forward a dropdown change
    pub fn handle_input(&mut self, input: SelectorInput) -> RegionResult<()> {
        match input {
            SelectorInput::ProvinceChanged(code) => self.select_province(&code),
            SelectorInput::DistrictChanged(code) => self.select_district(&code),
        }
    }

    /// Wait for the next fetch to finish and apply it.
    ///
    /// Returns `false` when nothing is in flight.
    pub async fn step(&mut self) -> bool {
        match self.in_flight.next().await {
            Some(outcome) => {
                let commands = self.resolver.complete(outcome);
                self.dispatch(commands);
                true
            }
            None => false,
        }
    }

    /// Apply fetch results until nothing is in flight
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    /// Drop in-flight fetches and stop accepting transitions
    pub fn dispose(&mut self) {
        let cancelled = self.in_flight.len();
        self.in_flight = FuturesUnordered::new();
        self.resolver.dispose();
        if cancelled > 0 {
            tracing::debug!("Cancelled {} in-flight region fetches", cancelled);
        }
    }

    pub fn pending_fetches(&self) -> usize {
        self.in_flight.len()
    }

    pub fn selection(&self) -> &Selection {
        self.resolver.selection()
    }

    pub fn resolver(&self) -> &SelectionResolver {
        &self.resolver
    }

    pub fn view(&self) -> SelectorView {
        SelectorView::render(&self.resolver)
    }

    fn dispatch(&mut self, commands: Vec<FetchCommand>) {
        for command in commands {
            let directory = Arc::clone(&self.directory);
            self.in_flight
                .push(Box::pin(async move { execute(directory, command).await }));
        }
    }
}

async fn execute(directory: Arc<dyn RegionDirectory>, command: FetchCommand) -> FetchOutcome {
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
