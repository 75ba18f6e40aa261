//! The shaking pipeline.
//!
//! Per component: scan, layer the configuration over filesystem defaults,
//! validate, parse autoloads, then for every action resolve the binder
//! chain, dispatch and flatten. A whole-application run shakes every
//! component concurrently, shakes the application itself, bundles the
//! application actions with the components they reference and
//! canonicalizes the produced selectors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde_json::Value;
use shaker_config::{
    ApplicationConfig, ComponentConfig, ConfigDiscovery, FacetOrder, WILDCARD_ACTION, parse_value,
    validate_schema,
};
use shaker_graph::{ModuleRegistry, parse_descriptor, resolve_binder};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::aggregate::bundle_components;
use crate::builder::TreeBuilder;
use crate::cache::{CacheKey, ShakeCache};
use crate::diagnostics::Diagnostics;
use crate::dispatch::dispatch;
use crate::error::{Error, Result};
use crate::flatten::flatten;
use crate::output::ShakerMeta;
use crate::result::{
    CheckReport, ComponentFailure, ComponentOutcome, ShakeReport, ShakenAction, ShakenComponent,
};
use crate::runtime::{Runtime, RuntimeError};
use crate::scan::{ComponentResources, discover_components, scan_component};
use crate::stages::{AugmentStage, Passthrough, ResourceStage};

/// Name under which the application root is shaken.
pub const APP_NAME: &str = "app";

#[derive(Debug, Clone, Default)]
pub struct ShakeOptions {
    /// Order used by actions that do not set their own.
    pub order: FacetOrder,
    /// Replaces `mojitDirs` from `application.json` when set.
    pub component_dirs: Option<Vec<String>>,
    /// Skip binder chains for components too, not just the application.
    pub skip_binders: bool,
    /// Upper bound on components shaken at once.
    pub max_parallel: Option<usize>,
}

/// Entry point for shaking an application.
///
/// ```no_run
/// use std::sync::Arc;
/// use shaker::{NativeRuntime, ShakeCache, Shaker};
///
/// # #[tokio::main]
/// # async fn main() -> shaker::Result<()> {
/// let shaker = Shaker::new("./my-app", Arc::new(NativeRuntime));
/// let report = shaker.shake_all(&ShakeCache::new()).await?;
/// println!("{}", report.meta.to_json_pretty()?);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Shaker {
    root: PathBuf,
    runtime: Arc<dyn Runtime>,
    options: ShakeOptions,
    resource_stage: Arc<dyn ResourceStage>,
    augment_stage: Arc<dyn AugmentStage>,
}

#[derive(Debug)]
struct SourceFile {
    path: String,
    source: String,
}

/// Everything read from disk for one component, before any shaking.
#[derive(Debug)]
struct PreparedComponent {
    name: String,
    root: String,
    resources: ComponentResources,
    config: ComponentConfig,
    raw_config: Option<Value>,
    autoloads: Vec<SourceFile>,
    binders: IndexMap<String, SourceFile>,
}

impl PreparedComponent {
    fn cache_key(&self, order: &FacetOrder, skip_binders: bool, stages: &[String]) -> CacheKey {
        let raw = self
            .raw_config
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default();

        let mut builder = CacheKey::builder()
            .field("root", self.root.as_bytes())
            .field("order", order.to_string().as_bytes())
            .field("skip-binders", &[u8::from(skip_binders)])
            .list("stage", stages.iter().map(String::as_str))
            .field("config", raw.as_bytes())
            .list("asset", self.resources.assets.iter().map(String::as_str))
            .list("autoload", self.resources.autoload.iter().map(String::as_str))
            .list("binder", self.resources.binders.iter().map(String::as_str));
        for (facet, variants) in &self.resources.facet_dirs {
            builder = builder.list(facet.as_str(), variants.iter().map(String::as_str));
        }
        for file in self.autoloads.iter().chain(self.binders.values()) {
            builder = builder.field(&file.path, file.source.as_bytes());
        }
        builder.finish()
    }
}

impl Shaker {
    pub fn new(root: impl Into<PathBuf>, runtime: Arc<dyn Runtime>) -> Self {
        Self {
            root: root.into(),
            runtime,
            options: ShakeOptions::default(),
            resource_stage: Arc::new(Passthrough),
            augment_stage: Arc::new(Passthrough),
        }
    }

    pub fn with_options(mut self, options: ShakeOptions) -> Self {
        self.options = options;
        self
    }

    /// Plug in `exclude`/`replace` handling.
    pub fn with_resource_stage(mut self, stage: Arc<dyn ResourceStage>) -> Self {
        self.resource_stage = stage;
        self
    }

    /// Plug in `augments` handling.
    pub fn with_augment_stage(mut self, stage: Arc<dyn AugmentStage>) -> Self {
        self.augment_stage = stage;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ShakeOptions {
        &self.options
    }

    /// `application.json`, or the defaults when there is none.
    pub async fn application_config(&self) -> Result<ApplicationConfig> {
        let path = ConfigDiscovery::new(&self.root).application_file();
        if !self.runtime.exists(&path) {
            debug!(path = %path.display(), "no application config, using defaults");
            return Ok(ApplicationConfig::default());
        }
        let content = self.runtime.read_to_string(&path).await?;
        Ok(ApplicationConfig::from_value(parse_value(&content, &path)?)?)
    }

    /// Component name to app-relative root, sorted by name.
    pub async fn discover(&self) -> Result<IndexMap<String, String>> {
        let mut app = self.application_config().await?;
        if let Some(dirs) = &self.options.component_dirs {
            app.component_dirs = dirs.clone();
        }
        Ok(discover_components(self.runtime.as_ref(), &self.root, &app).await?)
    }

    /// Shake one component, reusing `cache` when its inputs are unchanged.
    pub async fn shake_component(
        &self,
        name: &str,
        root: &str,
        cache: &ShakeCache,
    ) -> Result<ComponentOutcome> {
        self.shake_with(name, root, self.options.skip_binders, cache)
            .await
    }

    /// Shake the application root as a component named `app`. Binders are
    /// never resolved at application level.
    pub async fn shake_app(&self, cache: &ShakeCache) -> Result<ComponentOutcome> {
        self.shake_with(APP_NAME, "", true, cache).await
    }

    /// Shake the whole application.
    ///
    /// A component that fails is reported in [`ShakeReport::failures`] and
    /// left out of the document; the rest still run. A failure of the
    /// application itself fails the run.
    pub async fn shake_all(&self, cache: &ShakeCache) -> Result<ShakeReport> {
        let components = self.discover().await?;
        info!(components = components.len(), root = %self.root.display(), "shaking application");

        let (shaken, failures, mut diagnostics) = self.shake_components(&components, cache).await;

        let app = self.shake_app(cache).await?;
        diagnostics.extend(app.diagnostics.iter().cloned());

        let mut bundle_diagnostics = Diagnostics::new();
        let bundled = bundle_components(&app.component, &shaken, &mut bundle_diagnostics)?;
        diagnostics.extend(bundle_diagnostics.into_vec());

        let meta = ShakerMeta::new(bundled, &shaken);
        info!(
            components = shaken.len(),
            failed = failures.len(),
            selectors = meta.selectors.len(),
            "shake complete"
        );

        Ok(ShakeReport {
            meta,
            diagnostics,
            failures,
        })
    }

    /// Run every step of [`Shaker::shake_all`] that can fail without
    /// producing a document.
    pub async fn check(&self) -> Result<CheckReport> {
        let cache = ShakeCache::new();
        let components = self.discover().await?;
        let (shaken, mut failures, mut diagnostics) =
            self.shake_components(&components, &cache).await;

        let mut checked: Vec<String> = shaken.keys().cloned().collect();
        match self.shake_app(&cache).await {
            Ok(app) => {
                diagnostics.extend(app.diagnostics.iter().cloned());
                let mut bundle_diagnostics = Diagnostics::new();
                match bundle_components(&app.component, &shaken, &mut bundle_diagnostics) {
                    Ok(_) => {
                        checked.push(APP_NAME.to_string());
                        diagnostics.extend(bundle_diagnostics.into_vec());
                    }
                    Err(error) => failures.push(ComponentFailure {
                        component: APP_NAME.to_string(),
                        error,
                    }),
                }
            }
            Err(error) => failures.push(ComponentFailure {
                component: APP_NAME.to_string(),
                error,
            }),
        }

        Ok(CheckReport {
            checked,
            diagnostics,
            failures,
        })
    }

    async fn shake_components(
        &self,
        components: &IndexMap<String, String>,
        cache: &ShakeCache,
    ) -> (
        IndexMap<String, Arc<ShakenComponent>>,
        Vec<ComponentFailure>,
        Vec<crate::Diagnostic>,
    ) {
        let max_parallel = self.options.max_parallel.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .min(8)
        });
        let semaphore = Arc::new(Semaphore::new(max_parallel.max(1)));

        let mut join_set = JoinSet::new();
        let mut task_names = FxHashMap::default();

        for (name, root) in components {
            let shaker = self.clone();
            let cache = cache.clone();
            let permit = Arc::clone(&semaphore);
            let (task_name, root) = (name.clone(), root.clone());

            let handle = join_set.spawn(async move {
                let result = match permit.acquire().await {
                    Ok(_permit) => shaker.shake_component(&task_name, &root, &cache).await,
                    Err(e) => Err(Error::Task {
                        component: task_name.clone(),
                        message: e.to_string(),
                    }),
                };
                (task_name, result)
            });
            task_names.insert(handle.id(), name.clone());
        }

        let mut results: FxHashMap<String, Result<ComponentOutcome>> = FxHashMap::default();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((name, result)) => {
                    results.insert(name, result);
                }
                Err(join_err) => {
                    let name = task_names
                        .get(&join_err.id())
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string());
                    let error = Error::Task {
                        component: name.clone(),
                        message: join_err.to_string(),
                    };
                    results.insert(name, Err(error));
                }
            }
        }

        // Input order, not completion order.
        let mut shaken = IndexMap::with_capacity(components.len());
        let mut failures = Vec::new();
        let mut diagnostics = Vec::new();
        for name in components.keys() {
            match results.remove(name) {
                Some(Ok(outcome)) => {
                    diagnostics.extend(outcome.diagnostics.iter().cloned());
                    shaken.insert(name.clone(), outcome.component);
                }
                Some(Err(error)) => {
                    warn!(component = %name, error = %error, "component failed");
                    failures.push(ComponentFailure {
                        component: name.clone(),
                        error,
                    });
                }
                None => failures.push(ComponentFailure {
                    component: name.clone(),
                    error: Error::Task {
                        component: name.clone(),
                        message: "task produced no result".to_string(),
                    },
                }),
            }
        }

        (shaken, failures, diagnostics)
    }

    async fn shake_with(
        &self,
        name: &str,
        root: &str,
        skip_binders: bool,
        cache: &ShakeCache,
    ) -> Result<ComponentOutcome> {
        let prepared = self.prepare(name, root, skip_binders).await?;
        let stages = [self.resource_stage.id(), self.augment_stage.id()];
        let key = prepared.cache_key(&self.options.order, skip_binders, &stages);

        if let Some(hit) = cache.get(name, &key) {
            debug!(component = name, key = %key, "cache hit");
            return Ok(hit);
        }

        let (component, diagnostics) = self.shake_prepared(&prepared, skip_binders)?;
        let outcome = ComponentOutcome {
            component: Arc::new(component),
            diagnostics: diagnostics.into_vec(),
        };
        cache.insert(name, key, outcome.clone());
        Ok(outcome)
    }

    /// Read everything the component needs. All I/O happens here.
    async fn prepare(&self, name: &str, root: &str, skip_binders: bool) -> Result<PreparedComponent> {
        let scan_error = |source: RuntimeError| Error::Scan {
            component: name.to_string(),
            source,
        };

        let resources = scan_component(self.runtime.as_ref(), &self.root, root)
            .await
            .map_err(scan_error)?;

        let raw_config = self.raw_config(name, root).await?;
        let config = ComponentConfig::defaults(&resources.facet_dirs, resources.binder_actions())
            .layered(raw_config.as_ref())
            .map_err(|e| e.for_component(name))?;
        validate_schema(name, &config)?;

        let mut autoloads = Vec::new();
        for path in resources.autoload.iter().filter(|p| p.ends_with(".js")) {
            autoloads.push(self.read_source(path).await.map_err(scan_error)?);
        }

        let mut binders = IndexMap::new();
        if !skip_binders {
            for action in config.actions.keys() {
                if action == WILDCARD_ACTION {
                    continue;
                }
                match resources.binder_for(action) {
                    Some(path) => {
                        let source = self.read_source(path).await.map_err(scan_error)?;
                        binders.insert(action.clone(), source);
                    }
                    None => debug!(component = name, action = %action, "action has no binder"),
                }
            }
        }

        Ok(PreparedComponent {
            name: name.to_string(),
            root: root.to_string(),
            resources,
            config,
            raw_config,
            autoloads,
            binders,
        })
    }

    async fn raw_config(&self, name: &str, root: &str) -> Result<Option<Value>> {
        let discovery = ConfigDiscovery::new(self.root.join(root));
        let Some(path) = discovery.find(|path| self.runtime.exists(path)) else {
            return Ok(None);
        };
        let content = self
            .runtime
            .read_to_string(&path)
            .await
            .map_err(|source| Error::Scan {
                component: name.to_string(),
                source,
            })?;
        let value = parse_value(&content, &path).map_err(|e| e.for_component(name))?;
        Ok(Some(value))
    }

    async fn read_source(&self, path: &str) -> std::result::Result<SourceFile, RuntimeError> {
        let source = self.runtime.read_to_string(&self.root.join(path)).await?;
        Ok(SourceFile {
            path: path.to_string(),
            source,
        })
    }

    /// Pure part of the pipeline.
    fn shake_prepared(
        &self,
        prepared: &PreparedComponent,
        skip_binders: bool,
    ) -> Result<(ShakenComponent, Diagnostics)> {
        let name = prepared.name.as_str();
        let mut diagnostics = Diagnostics::new();

        let mut registry = ModuleRegistry::new();
        for file in &prepared.autoloads {
            registry.register(parse_descriptor(&file.source, &file.path)?);
        }

        let tree = TreeBuilder::new(
            name,
            &prepared.root,
            &prepared.resources,
            self.resource_stage.as_ref(),
        )
        .build(&prepared.config, &mut diagnostics);

        let mut actions = IndexMap::with_capacity(prepared.config.actions.len());
        for (action, action_config) in &prepared.config.actions {
            let dependencies = match prepared.binders.get(action) {
                Some(binder) if !skip_binders => {
                    resolve_binder(&binder.source, &binder.path, &mut registry)?
                }
                _ => Vec::new(),
            };

            let order = action_config
                .facet_order(&self.options.order)
                .map_err(|e| e.for_component(name))?;

            let dispatched = dispatch(&tree, &order, action);
            let mut files = flatten(&dispatched, &dependencies);
            for rule in &prepared.config.augments {
                self.augment_stage.augment(rule, &mut files);
            }

            debug!(
                component = name,
                action = %action,
                selectors = files.len(),
                dependencies = dependencies.len(),
                "shaken action"
            );
            actions.insert(
                action.clone(),
                ShakenAction {
                    files,
                    dependencies,
                    dimensions: tree.clone(),
                    order,
                },
            );
        }

        Ok((
            ShakenComponent {
                name: name.to_string(),
                root: prepared.root.clone(),
                config: prepared.config.clone(),
                actions,
            },
            diagnostics,
        ))
    }
}
