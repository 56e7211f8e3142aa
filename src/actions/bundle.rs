//! The composable action bundle.
//!
//! `TransitionActions` is the capability bundle a host composes into its
//! resource router: one generated route per distinct transition name plus
//! the `save_after_transition` flag.

use crate::actions::handler::{make_handler, ActionState};
use crate::actions::repository::Repository;
use crate::builder::BuildError;
use crate::core::{StateModel, TransitionRegistry};
use axum::http::Method;
use axum::routing::MethodFilter;
use axum::Router;
use log::debug;
use std::sync::Arc;

/// Routing configuration forwarded verbatim to every generated route.
#[derive(Clone, Debug)]
pub struct RouteOptions {
    methods: Vec<Method>,
    url_path: Option<String>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            methods: vec![Method::POST],
            url_path: None,
        }
    }
}

impl RouteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the allowed HTTP methods (default: POST only).
    pub fn methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Override the URL suffix that would otherwise be the transition
    /// name. Only usable with a single-transition bundle, since every
    /// route receives the same options.
    pub fn url_path(mut self, path: impl Into<String>) -> Self {
        self.url_path = Some(path.into());
        self
    }

    pub(crate) fn path_override(&self) -> Option<&str> {
        self.url_path.as_deref()
    }

    pub(crate) fn method_filter(&self) -> Result<MethodFilter, BuildError> {
        let mut filter: Option<MethodFilter> = None;
        for method in &self.methods {
            let next = MethodFilter::try_from(method.clone()).map_err(|_| {
                BuildError::UnsupportedMethod {
                    method: method.to_string(),
                }
            })?;
            filter = Some(match filter {
                Some(acc) => acc.or(next),
                None => next,
            });
        }
        // An explicitly emptied method list falls back to the default.
        Ok(filter.unwrap_or(MethodFilter::POST))
    }
}

/// Generated web actions for one model type.
///
/// Built once per model, immutable afterwards. The exposed handler names
/// are exactly the distinct transition names of the model's declared
/// registry, however many source/target rows each name spans.
///
/// # Example
///
/// ```rust,ignore
/// let router = axum::Router::new()
///     .nest("/orders", TransitionActions::<Order>::for_model()?.into_router(repository)?);
/// ```
pub struct TransitionActions<M: StateModel> {
    registry: TransitionRegistry<M>,
    options: RouteOptions,
    save_after_transition: bool,
}

impl<M: StateModel> TransitionActions<M> {
    /// Build the bundle from the model's declared registry.
    ///
    /// Registry declaration problems surface here, at construction time.
    pub fn for_model() -> Result<Self, BuildError> {
        Ok(Self::from_registry(M::transitions()?))
    }

    /// Build the bundle from an explicit registry.
    pub fn from_registry(registry: TransitionRegistry<M>) -> Self {
        Self {
            registry,
            options: RouteOptions::default(),
            save_after_transition: true,
        }
    }

    /// Routing configuration applied to every generated route.
    pub fn route_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether a successful transition persists the instance
    /// (default: true).
    pub fn save_after_transition(mut self, save: bool) -> Self {
        self.save_after_transition = save;
        self
    }

    /// The distinct transition names this bundle exposes, ordered.
    pub fn transition_names(&self) -> Vec<&str> {
        self.registry.distinct_names().into_iter().collect()
    }

    /// Synthesize the resource router: one route per distinct transition
    /// name at `/{id}/<name>`, ready to be nested under the host's
    /// resource prefix.
    pub fn into_router(self, repository: Arc<dyn Repository<M>>) -> Result<Router, BuildError> {
        let names: Vec<String> = self
            .registry
            .distinct_names()
            .into_iter()
            .map(String::from)
            .collect();

        if let Some(path) = self.options.path_override() {
            if names.len() > 1 {
                return Err(BuildError::ConflictingRoutePath {
                    path: path.to_string(),
                    count: names.len(),
                });
            }
        }

        let mut router = Router::new();
        for name in &names {
            let segment = self.options.path_override().unwrap_or(name.as_str());
            let path = format!("/:id/{}", segment);
            let handler = make_handler::<M>(name.clone(), &self.options)?;
            debug!("registered transition route path={} name={}", path, name);
            router = router.route(&path, handler);
        }

        let state = Arc::new(ActionState::new(
            self.registry,
            repository,
            self.save_after_transition,
        ));
        Ok(router.with_state(state))
    }
}
