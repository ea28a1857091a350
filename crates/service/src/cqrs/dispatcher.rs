use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use super::{Command, CommandHandler, DispatchError, Query, QueryHandler};
use crate::errors::ServiceError;

/// Type-erased handler; holds an `Arc<dyn CommandHandler<C>>` or `Arc<dyn QueryHandler<Q>>`.
struct Entry {
    name: &'static str,
    handler: Box<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct Registry {
    commands: HashMap<TypeId, Entry>,
    queries: HashMap<TypeId, Entry>,
}

/// Routes requests to their registered handler.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

/// Collects registrations and checks them before a [`Dispatcher`] exists.
#[derive(Default)]
pub struct DispatcherBuilder {
    registry: Registry,
    expected_commands: Vec<(TypeId, &'static str)>,
    expected_queries: Vec<(TypeId, &'static str)>,
    errors: Vec<DispatchError>,
}

impl DispatcherBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn command<C, H>(mut self, handler: H) -> Self
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let name = type_name::<C>();
        let handler: Arc<dyn CommandHandler<C>> = Arc::new(handler);
        let entry = Entry { name, handler: Box::new(handler) };
        if self.registry.commands.insert(TypeId::of::<C>(), entry).is_some() {
            self.errors.push(DispatchError::DuplicateHandler(name));
        }
        self
    }

    pub fn query<Q, H>(mut self, handler: H) -> Self
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let name = type_name::<Q>();
        let handler: Arc<dyn QueryHandler<Q>> = Arc::new(handler);
        let entry = Entry { name, handler: Box::new(handler) };
        if self.registry.queries.insert(TypeId::of::<Q>(), entry).is_some() {
            self.errors.push(DispatchError::DuplicateHandler(name));
        }
        self
    }

    /// Require a handler for `C` when [`build`](Self::build) runs.
    pub fn expect_command<C: Command>(mut self) -> Self {
        self.expected_commands.push((TypeId::of::<C>(), type_name::<C>()));
        self
    }

    /// Require a handler for `Q` when [`build`](Self::build) runs.
    pub fn expect_query<Q: Query>(mut self) -> Self {
        self.expected_queries.push((TypeId::of::<Q>(), type_name::<Q>()));
        self
    }

    /// Validate the registry. Every problem is logged; the first one is returned.
    pub fn build(mut self) -> Result<Dispatcher, DispatchError> {
        for (id, name) in &self.expected_commands {
            if !self.registry.commands.contains_key(id) {
                self.errors.push(DispatchError::MissingHandler(*name));
            }
        }
        for (id, name) in &self.expected_queries {
            if !self.registry.queries.contains_key(id) {
                self.errors.push(DispatchError::MissingHandler(*name));
            }
        }
        for e in &self.errors {
            error!(error = %e, "handler registry invalid");
        }
        if let Some(first) = self.errors.into_iter().next() {
            return Err(first);
        }
        debug!(
            commands = self.registry.commands.len(),
            queries = self.registry.queries.len(),
            "handler registry validated"
        );
        Ok(Dispatcher { registry: Arc::new(self.registry) })
    }
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder { DispatcherBuilder::new() }

    /// Run the handler registered for `C`, or stop with `Cancelled` once `cancel` fires.
    pub async fn send<C: Command>(&self, command: C, cancel: &CancellationToken) -> Result<C::Output, ServiceError> {
        let handler = self.command_handler::<C>()?;
        race(handler.handle(command, cancel), cancel, type_name::<C>()).await
    }

    /// Run the handler registered for `Q`, or stop with `Cancelled` once `cancel` fires.
    pub async fn query<Q: Query>(&self, query: Q, cancel: &CancellationToken) -> Result<Q::Output, ServiceError> {
        let handler = self.query_handler::<Q>()?;
        race(handler.handle(query, cancel), cancel, type_name::<Q>()).await
    }

    pub fn handles_command<C: Command>(&self) -> bool {
        self.registry.commands.contains_key(&TypeId::of::<C>())
    }

    pub fn handles_query<Q: Query>(&self) -> bool {
        self.registry.queries.contains_key(&TypeId::of::<Q>())
    }

    fn command_handler<C: Command>(&self) -> Result<Arc<dyn CommandHandler<C>>, DispatchError> {
        self.registry
            .commands
            .get(&TypeId::of::<C>())
            .and_then(|e| e.handler.downcast_ref::<Arc<dyn CommandHandler<C>>>())
            .cloned()
            .ok_or(DispatchError::MissingHandler(type_name::<C>()))
    }

    fn query_handler<Q: Query>(&self) -> Result<Arc<dyn QueryHandler<Q>>, DispatchError> {
        self.registry
            .queries
            .get(&TypeId::of::<Q>())
            .and_then(|e| e.handler.downcast_ref::<Arc<dyn QueryHandler<Q>>>())
            .cloned()
            .ok_or(DispatchError::MissingHandler(type_name::<Q>()))
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut commands: Vec<_> = self.registry.commands.values().map(|e| e.name).collect();
        let mut queries: Vec<_> = self.registry.queries.values().map(|e| e.name).collect();
        commands.sort_unstable();
        queries.sort_unstable();
        f.debug_struct("Dispatcher").field("commands", &commands).field("queries", &queries).finish()
    }
}

async fn race<T, F>(fut: F, cancel: &CancellationToken, request: &'static str) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, ServiceError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!(request, "request cancelled before completion");
            Err(ServiceError::Cancelled)
        }
        res = fut => res,
    }
}
