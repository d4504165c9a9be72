//! The back step: rewind each traverser to the element it visited at an
//! earlier step.
//!
//! Map side, for every element of the configured class:
//!
//! | element state                       | action                                   |
//! |-------------------------------------|------------------------------------------|
//! | not tracking, `step_index == 0`     | start tracking with the record `[self]`  |
//! | not tracking, `step_index > 0`      | start tracking with no records           |
//! | tracking, has records               | rewind each record, ship it to its owner |
//! | tracking, no records                | nothing (not on the traversal)           |
//!
//! A rewound record is the prefix of the original ending at `step_index`, so
//! it still terminates at the element that now owns it. Records too short to
//! have an entry at `step_index` are dropped one by one.
//!
//! Reduce side: the group's `ElementUpdate` is the base; fragments join it
//! when their target exists there and has the configured class, and are
//! counted as filtered otherwise.

use tracing::trace;

use super::{Counters, Emission, Holder, PathFragment, StepConfig, StepJob};
use crate::model::{ElementId, ElementKind, MicroRef, PathState, Vertex};
use crate::{Error, Result};

/// Back-step job over the vertex stream.
///
/// A re-homed record keeps only its history up to the back-referenced
/// entry; everything the traverser visited after it is dropped.
#[derive(Debug, Clone)]
pub struct BackStep {
    config: StepConfig,
}

impl BackStep {
    pub fn new(config: StepConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StepConfig {
        &self.config
    }

    /// Rewind every record in `paths`, owned by `owner`, into `out`.
    ///
    /// `paths` is left holding whatever stays with the owner.
    fn rewind(&self, paths: &mut PathState, owner: MicroRef, out: &mut Vec<Emission>) -> Result<()> {
        let step = self.config.step_index;

        if !paths.is_enabled() {
            if step == 0 {
                paths.start(owner);
            } else {
                paths.enable(true);
            }
            return Ok(());
        }

        for record in paths.take() {
            let Some(rewound) = record.rewound_to(step) else {
                trace!(owner = %owner.id(), len = record.len(), step, "path record shorter than step, dropped");
                continue;
            };
            let target = rewound.last().clone();
            let key = target.home().ok_or_else(|| {
                Error::MalformedInput(format!("edge reference {} has no endpoints", target.id()))
            })?;
            out.push(Emission::fragment(key, target, rewound));
        }
        Ok(())
    }

    /// Attach one fragment to `base`, or count it as filtered.
    fn attach(&self, base: &mut Vertex, fragment: PathFragment, counters: &mut Counters) -> Result<()> {
        let PathFragment { target, path } = fragment;

        if !path.ends_at(target.kind(), target.id()) {
            return Err(Error::MalformedInput(format!(
                "fragment for {} {} terminates at {} {}",
                target.kind(),
                target.id(),
                path.last().kind(),
                path.last().id()
            )));
        }

        if target.kind() != self.config.target_class {
            trace!(target = %target.id(), kind = %target.kind(), "back reference to wrong element class");
            counters.filtered(target.kind());
            return Ok(());
        }

        match target.kind() {
            ElementKind::Vertex if target.id() == base.id => {
                base.paths.enable(true);
                base.paths.add(path);
            }
            ElementKind::Vertex => {
                return Err(Error::MalformedInput(format!(
                    "fragment for vertex {} grouped under vertex {}",
                    target.id(),
                    base.id
                )));
            }
            ElementKind::Edge => match base.out_edge_mut(target.id()) {
                Some(edge) => {
                    edge.paths.enable(true);
                    edge.paths.add(path);
                }
                None => {
                    trace!(edge = %target.id(), vertex = %base.id, "back reference to missing edge");
                    counters.filtered(ElementKind::Edge);
                }
            },
        }
        Ok(())
    }
}

impl StepJob for BackStep {
    fn name(&self) -> &str {
        "back"
    }

    fn map(&self, vertex: &Vertex) -> Result<Vec<Emission>> {
        if !self.config.path_enabled {
            return Ok(vec![Emission::update(vertex.clone())]);
        }

        vertex.validate()?;

        let mut base = vertex.clone();
        let mut out = Vec::new();
        match self.config.target_class {
            ElementKind::Vertex => {
                let owner = base.micro();
                self.rewind(&mut base.paths, owner, &mut out)?;
            }
            ElementKind::Edge => {
                for edge in &mut base.out_edges {
                    let owner = edge.micro();
                    self.rewind(&mut edge.paths, owner, &mut out)?;
                }
            }
        }
        out.push(Emission::update(base));
        Ok(out)
    }

    fn reduce(
        &self,
        key: ElementId,
        holders: Vec<Holder>,
        counters: &mut Counters,
    ) -> Result<Option<Vertex>> {
        let mut base: Option<Vertex> = None;
        let mut fragments = Vec::new();

        for holder in holders {
            match holder {
                Holder::ElementUpdate(vertex) => {
                    if vertex.id != key {
                        return Err(Error::MalformedInput(format!(
                            "vertex {} delivered under key {key}",
                            vertex.id
                        )));
                    }
                    if base.replace(vertex).is_some() {
                        return Err(Error::MalformedInput(format!("duplicate vertex {key} in input")));
                    }
                }
                Holder::PathFragment(fragment) => fragments.push(fragment),
            }
        }

        let Some(mut vertex) = base else {
            trace!(key = %key, fragments = fragments.len(), "back reference to absent vertex");
            for fragment in &fragments {
                counters.filtered(fragment.target.kind());
            }
            return Ok(None);
        };

        if !self.config.path_enabled {
            if let Some(stray) = fragments.first() {
                return Err(Error::MalformedInput(format!(
                    "{} path fragments for vertex {key} with path tracking disabled, first targets {} {}",
                    fragments.len(),
                    stray.target.kind(),
                    stray.target.id()
                )));
            }
            return Ok(Some(vertex));
        }

        for fragment in fragments {
            self.attach(&mut vertex, fragment, counters)?;
        }

        vertex.paths.normalize();
        for edge in &mut vertex.out_edges {
            edge.paths.normalize();
        }
        Ok(Some(vertex))
    }
}
