//! Build jobs and the dependency graph handed to an external job runner.
//!
//! A job is identified by the product it creates. Edges read "prerequisite
//! must be complete before product". Edges may name products that have not
//! been registered yet; [JobGraph::schedule] rejects any that never are.

use crate::error::{Error, Result};
use crate::util::environment::Environment;
use crate::util::graph::{EdgeStatus, NodeIndex};
use crate::util::graphmap::GraphMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    product: String,
    command: Option<String>,
    info: Option<String>,
    env: Option<Environment>,
}

impl Job {
    /// Creates a job that runs `command` to create `product`.
    pub fn new(product: &str, command: &str) -> Self {
        Self {
            product: product.to_string(),
            command: Some(command.to_string()),
            info: None,
            env: None,
        }
    }

    /// Creates a marker job that is satisfied by `path` existing.
    pub fn marker(path: &str) -> Self {
        Self {
            product: path.to_string(),
            command: None,
            info: None,
            env: None,
        }
    }

    /// Sets the status line shown while the job runs.
    pub fn info(mut self, info: &str) -> Self {
        self.info = Some(info.to_string());
        self
    }

    /// Sets the environment the command runs with.
    pub fn env(mut self, env: Option<Environment>) -> Self {
        self.env = env;
        self
    }

    pub fn get_product(&self) -> &str {
        &self.product
    }

    pub fn get_command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn get_info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    pub fn get_env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    pub fn is_marker(&self) -> bool {
        self.command.is_none()
    }
}

/// Jobs keyed by product, with placeholders for products only named by
/// an edge so far.
pub struct JobGraph {
    inner: GraphMap<String, Option<Job>>,
    // products declared as their own prerequisite; the graph stores no self-edges
    self_dependent: Vec<String>,
}

impl JobGraph {
    pub fn new() -> Self {
        Self {
            inner: GraphMap::new(),
            self_dependent: Vec::new(),
        }
    }

    /// Registers `job` under its product.
    ///
    /// Adding a job for a product that already has an identical job is a
    /// no-op. A different job for the same product is an error.
    pub fn add_job(&mut self, job: Job) -> Result<()> {
        let key = job.get_product().to_string();
        if let Some(Some(existing)) = self.inner.get_node_by_key(&key).map(|n| n.as_ref()) {
            return match existing.get_command() == job.get_command() {
                true => {
                    tracing::warn!("Job for {} was registered more than once", key);
                    Ok(())
                }
                false => Err(Error::ConflictingJob(key)),
            };
        }
        tracing::debug!("Registered job for {}", key);
        self.inner.add_node(key, Some(job));
        Ok(())
    }

    /// Declares that `product` cannot be created before `prerequisite`.
    ///
    /// Neither product has to be registered yet.
    pub fn add_dependency(&mut self, product: &str, prerequisite: &str) {
        for key in [product, prerequisite] {
            if self.inner.get_node_by_key(&key.to_string()).is_none() {
                self.inner.add_node(key.to_string(), None);
            }
        }
        let status = self
            .inner
            .add_edge_by_key(&prerequisite.to_string(), &product.to_string());
        if let Some(EdgeStatus::SelfLoop) = status {
            tracing::warn!("Job for {} depends on its own product", product);
            if self.self_dependent.iter().any(|p| p == product) == false {
                self.self_dependent.push(product.to_string());
            }
        }
    }

    pub fn get(&self, product: &str) -> Option<&Job> {
        self.inner
            .get_node_by_key(&product.to_string())
            .and_then(|n| n.as_ref().as_ref())
    }

    pub fn contains(&self, product: &str) -> bool {
        self.get(product).is_some()
    }

    /// Iterates the registered jobs in the order their products were first named.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        (0..self.inner.get_graph().node_count())
            .filter_map(|i| self.inner.get_node_by_index(i))
            .filter_map(|n| n.as_ref().as_ref())
    }

    pub fn len(&self) -> usize {
        self.jobs().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lists the products `product` directly depends on, in declaration order.
    pub fn prerequisites(&self, product: &str) -> Vec<&str> {
        let index = match self.inner.get_node_by_key(&product.to_string()) {
            Some(n) => n.index(),
            None => return Vec::new(),
        };
        let mut prereqs: Vec<&str> = self
            .inner
            .get_graph()
            .predecessors(index)
            .filter_map(|i| self.key(i))
            .collect();
        prereqs.reverse();
        prereqs
    }

    fn key(&self, index: NodeIndex) -> Option<&str> {
        self.inner.get_key_by_index(index).map(|k| k.as_str())
    }

    /// Validates the graph for execution and returns the jobs ordered so
    /// that every job comes after all of its prerequisites.
    pub fn schedule(&self) -> Result<Vec<&Job>> {
        let graph = self.inner.get_graph();
        for i in 0..graph.node_count() {
            let registered = self
                .inner
                .get_node_by_index(i)
                .map(|n| n.as_ref().is_some())
                .unwrap_or(false);
            if registered == true {
                continue;
            }
            let missing = self.key(i).unwrap_or_default().to_string();
            // placeholders only exist because an edge named them
            return match graph.successors(i).min() {
                Some(dependant) => Err(Error::MissingPrerequisite {
                    product: self.key(dependant).unwrap_or_default().to_string(),
                    prerequisite: missing,
                }),
                None => Err(Error::UnknownJob(missing)),
            };
        }
        if self.self_dependent.is_empty() == false {
            return Err(Error::CyclicJobGraph(self.self_dependent.clone()));
        }
        let order = graph.topological_sort().map_err(|stuck| {
            Error::CyclicJobGraph(
                stuck
                    .into_iter()
                    .filter_map(|i| self.key(i))
                    .map(|k| k.to_string())
                    .collect(),
            )
        })?;
        let jobs: Vec<&Job> = order
            .into_iter()
            .filter_map(|i| self.inner.get_node_by_index(i))
            .filter_map(|n| n.as_ref().as_ref())
            .collect();
        tracing::info!("Scheduled {} jobs", jobs.len());
        Ok(jobs)
    }
}

impl Default for JobGraph {
    fn default() -> Self {
        Self::new()
    }
}
