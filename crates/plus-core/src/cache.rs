//! Generation cache for resolution passes
//!
//! The cache holds one slot: the pass of the current generation. Callers
//! asking for the same generation share the in-flight pass instead of
//! starting another one. Invalidating bumps the generation, except for the
//! first invalidation after construction, which is treated as already up
//! to date.

use std::sync::{Arc, Mutex};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use crate::engine::{ConfigData, load_config_data};
use crate::loader::ModuleLoader;
use crate::settings::ResolveOptions;
use crate::warning::Warnings;
use crate::Error;

/// Outcome of a cached pass, shared between every caller awaiting it
pub type SharedResult = std::result::Result<Arc<ConfigData>, Arc<Error>>;

type Pass = Shared<BoxFuture<'static, SharedResult>>;

#[derive(Default)]
struct CacheState {
    generation: u64,
    first_invalidation_seen: bool,
    slot: Option<(u64, Pass)>,
}

/// Single-slot cache of [`ConfigData`]
pub struct ConfigDataCache {
    options: Arc<ResolveOptions>,
    loader: Arc<dyn ModuleLoader>,
    warnings: Arc<Warnings>,
    state: Mutex<CacheState>,
}

impl ConfigDataCache {
    pub fn new(options: ResolveOptions, loader: Arc<dyn ModuleLoader>) -> Self {
        Self::with_warnings(options, loader, Arc::new(Warnings::new()))
    }

    /// Cache reporting warnings to a shared sink.
    pub fn with_warnings(
        options: ResolveOptions,
        loader: Arc<dyn ModuleLoader>,
        warnings: Arc<Warnings>,
    ) -> Self {
        Self {
            options: Arc::new(options),
            loader,
            warnings,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    /// Current generation; bumped by every invalidation but the first.
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Config data of the current generation, computing it if needed.
    ///
    /// With `invalidate`, the cached result is discarded first (unless this
    /// is the first invalidation). A failed pass is delivered to every
    /// caller awaiting it and evicted, so the next call recomputes.
    pub async fn get(&self, invalidate: bool) -> SharedResult {
        let (generation, pass) = {
            let mut state = self.lock();
            if invalidate {
                if state.first_invalidation_seen {
                    state.generation += 1;
                    tracing::debug!(generation = state.generation, "Config data invalidated");
                } else {
                    state.first_invalidation_seen = true;
                }
            }
            let generation = state.generation;
            let pass = match &state.slot {
                Some((slot_generation, pass)) if *slot_generation == generation => pass.clone(),
                _ => {
                    tracing::debug!(generation, "Starting resolution pass");
                    let pass = self.start_pass();
                    state.slot = Some((generation, pass.clone()));
                    pass
                }
            };
            (generation, pass)
        };

        let result = pass.await;
        if result.is_err() {
            let mut state = self.lock();
            if matches!(&state.slot, Some((slot_generation, _)) if *slot_generation == generation) {
                state.slot = None;
            }
        }
        result
    }

    fn start_pass(&self) -> Pass {
        let options = Arc::clone(&self.options);
        let loader = Arc::clone(&self.loader);
        let warnings = Arc::clone(&self.warnings);
        async move {
            load_config_data(&options, loader.as_ref(), &warnings)
                .await
                .map(Arc::new)
                .map_err(Arc::new)
        }
        .boxed()
        .shared()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl std::fmt::Debug for ConfigDataCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigDataCache")
            .field("options", &self.options)
            .field("generation", &self.generation())
            .finish()
    }
}
