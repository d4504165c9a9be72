//! # Local Job Driver
//!
//! Runs step jobs in-process with the same contract a cluster framework
//! gives them:
//!
//! 1. every input vertex is mapped on its own
//! 2. emissions optionally cross a simulated wire (encode → decode)
//! 3. emissions are hash-partitioned by key into `reducers` partitions
//! 4. each partition is reduced on its own thread with its own counters
//! 5. counters are merged once all partitions finish
//!
//! Output is sorted by vertex id, so results do not depend on partitioning.

use hashbrown::HashMap;
use parking_lot::Mutex;
use tracing::debug;

use crate::codec::{decode_emission, encode_emission};
use crate::model::{ElementId, Vertex};
use crate::step::{Counters, Holder, StepJob};
use crate::Result;

/// Local driver settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// Number of reduce partitions (and threads). Zero is treated as one.
    pub reducers: usize,
    /// Push every emission through the codec before the shuffle.
    pub wire_roundtrip: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { reducers: 4, wire_roundtrip: true }
    }
}

/// Result of one job run.
#[derive(Debug, Clone, Default)]
pub struct JobOutput {
    /// Reconstructed vertices, sorted by id.
    pub vertices: Vec<Vertex>,
    pub counters: Counters,
}

impl JobOutput {
    pub fn get(&self, id: impl Into<ElementId>) -> Option<&Vertex> {
        let id = id.into();
        self.vertices
            .binary_search_by_key(&id, |v| v.id)
            .ok()
            .map(|i| &self.vertices[i])
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Result of a chain of jobs.
#[derive(Debug, Clone, Default)]
pub struct ChainOutput {
    /// Output of the last job, sorted by id.
    pub vertices: Vec<Vertex>,
    /// Counters of each job, in run order.
    pub counters: Vec<Counters>,
}

type Groups = HashMap<ElementId, Vec<Holder>>;

/// In-process map/reduce driver.
#[derive(Debug, Clone, Default)]
pub struct LocalDriver {
    config: DriverConfig,
}

impl LocalDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run one job over `input`.
    pub fn run(
        &self,
        job: &dyn StepJob,
        input: impl IntoIterator<Item = Vertex>,
    ) -> Result<JobOutput> {
        let reducers = self.config.reducers.max(1);
        let mut partitions: Vec<Groups> = (0..reducers).map(|_| Groups::new()).collect();

        let mut mapped = 0usize;
        let mut emitted = 0usize;
        for vertex in input {
            mapped += 1;
            for emission in job.map(&vertex)? {
                let emission = if self.config.wire_roundtrip {
                    decode_emission(&encode_emission(&emission)?)?
                } else {
                    emission
                };
                emitted += 1;
                partitions[partition(emission.key, reducers)]
                    .entry(emission.key)
                    .or_default()
                    .push(emission.holder);
            }
        }
        debug!(job = job.name(), mapped, emitted, reducers, "map phase finished");

        let results: Mutex<Vec<Result<(Vec<Vertex>, Counters)>>> = Mutex::new(Vec::with_capacity(reducers));
        std::thread::scope(|scope| {
            for groups in partitions {
                let results = &results;
                scope.spawn(move || {
                    let outcome = reduce_partition(job, groups);
                    results.lock().push(outcome);
                });
            }
        });

        let mut output = JobOutput::default();
        for outcome in results.into_inner() {
            let (vertices, counters) = outcome?;
            output.vertices.extend(vertices);
            output.counters.merge(&counters);
        }
        output.vertices.sort_unstable_by_key(|v| v.id);

        debug!(
            job = job.name(),
            output = output.vertices.len(),
            counters = %output.counters,
            "reduce phase finished"
        );
        Ok(output)
    }

    /// Run `jobs` in order, each consuming the previous job's output.
    pub fn run_chain(
        &self,
        jobs: &[&dyn StepJob],
        input: impl IntoIterator<Item = Vertex>,
    ) -> Result<ChainOutput> {
        let mut vertices: Vec<Vertex> = input.into_iter().collect();
        let mut counters = Vec::with_capacity(jobs.len());
        for job in jobs {
            let output = self.run(*job, vertices)?;
            vertices = output.vertices;
            counters.push(output.counters);
        }
        Ok(ChainOutput { vertices, counters })
    }
}

/// Key → partition, the way a hash partitioner splits the shuffle.
fn partition(key: ElementId, reducers: usize) -> usize {
    (key.0 % reducers as u64) as usize
}

fn reduce_partition(job: &dyn StepJob, groups: Groups) -> Result<(Vec<Vertex>, Counters)> {
    let mut counters = Counters::new();
    let mut vertices = Vec::with_capacity(groups.len());
    for (key, holders) in groups {
        if let Some(vertex) = job.reduce(key, holders, &mut counters)? {
            vertices.push(vertex);
        }
    }
    Ok((vertices, counters))
}
