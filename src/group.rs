//! Group hierarchy: an arena of groups, each with a transform chain and an
//! optional parent.
//!
//! A group can only be nested in a group that already exists, so every
//! parent index is smaller than its child's index and the tree is acyclic
//! without any extra bookkeeping.

use std::fmt;

use crate::errors::SceneError;
use crate::matrix::Matrix;
use crate::transform::TransformChain;

/// Index of a group in its [`GroupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Group {
    pub name: Option<String>,
    pub transform: TransformChain,
    parent: Option<GroupId>,
}

impl Group {
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }
}

#[derive(Debug, Clone, Default)]
pub struct GroupTree {
    groups: Vec<Group>,
}

impl GroupTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group nested in `parent` (or at the top level).
    pub fn insert(
        &mut self,
        parent: Option<GroupId>,
        transform: TransformChain,
    ) -> Result<GroupId, SceneError> {
        self.insert_named(None, parent, transform)
    }

    pub fn insert_named(
        &mut self,
        name: Option<String>,
        parent: Option<GroupId>,
        transform: TransformChain,
    ) -> Result<GroupId, SceneError> {
        if let Some(p) = parent {
            self.check(p)?;
        }
        Ok(self.push(name, parent, transform))
    }

    /// Append without validating `parent`; callers guarantee it exists.
    pub(crate) fn push(
        &mut self,
        name: Option<String>,
        parent: Option<GroupId>,
        transform: TransformChain,
    ) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            name,
            transform,
            parent,
        });
        id
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &Group)> {
        self.groups.iter().enumerate().map(|(i, g)| (GroupId(i), g))
    }

    pub(crate) fn check(&self, id: GroupId) -> Result<(), SceneError> {
        if id.0 < self.groups.len() {
            Ok(())
        } else {
            Err(SceneError::UnknownGroup(id))
        }
    }

    /// Number of groups between `id` and the top level, counting `id`.
    pub fn depth(&self, id: Option<GroupId>) -> usize {
        let mut depth = 0;
        let mut cur = id;
        while let Some(g) = cur.and_then(|id| self.get(id)) {
            depth += 1;
            cur = g.parent;
        }
        depth
    }

    /// Effective matrix of a group: parent's matrix × own chain.
    ///
    /// Recomputes the whole ancestor chain on every call. The render pass
    /// uses [`ComposedGroups`] instead.
    pub fn compose_group_matrix(&self, id: Option<GroupId>) -> Matrix {
        let Some(group) = id.and_then(|id| self.get(id)) else {
            return Matrix::identity();
        };
        self.compose_group_matrix(group.parent) * group.transform.compose()
    }

    /// Cumulative `Scale` factors of a group and all its ancestors.
    pub fn scale_factors(&self, id: Option<GroupId>) -> (f64, f64) {
        let Some(group) = id.and_then(|id| self.get(id)) else {
            return (1.0, 1.0);
        };
        let (px, py) = self.scale_factors(group.parent);
        let (sx, sy) = group.transform.scale_factors();
        (px * sx, py * sy)
    }
}

/// A group's composed matrix together with its cumulative scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposedGroup {
    pub matrix: Matrix,
    pub scale: (f64, f64),
}

impl ComposedGroup {
    const ROOT: ComposedGroup = ComposedGroup {
        matrix: Matrix::IDENTITY,
        scale: (1.0, 1.0),
    };
}

/// Every group's effective matrix, computed once per render pass.
#[derive(Debug, Clone)]
pub struct ComposedGroups {
    entries: Vec<ComposedGroup>,
}

impl ComposedGroups {
    /// One forward pass over the arena: parents precede children, so each
    /// parent entry is final by the time a child reads it.
    pub fn new(tree: &GroupTree) -> Self {
        let mut entries: Vec<ComposedGroup> = Vec::with_capacity(tree.len());
        for group in &tree.groups {
            let parent = group
                .parent
                .and_then(|p| entries.get(p.0).copied())
                .unwrap_or(ComposedGroup::ROOT);
            let (sx, sy) = group.transform.scale_factors();
            entries.push(ComposedGroup {
                matrix: parent.matrix * group.transform.compose(),
                scale: (parent.scale.0 * sx, parent.scale.1 * sy),
            });
        }
        Self { entries }
    }

    pub fn get(&self, id: Option<GroupId>) -> ComposedGroup {
        id.and_then(|id| self.entries.get(id.0).copied())
            .unwrap_or(ComposedGroup::ROOT)
    }
}
