//! Arena-backed tree of settings scopes.
//!
//! Every node is bound to one type for its whole life and owns the settings
//! value for that type. Children are keyed by [`TypeKey`], so a node has at
//! most one child per type. Parent links are plain indices used for upward
//! lookup only; the arena owns every node and nodes are never removed one by
//! one, so the whole tree lives and dies together.

use std::collections::HashMap;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::error::{InputError, Result};
use crate::key::TypeKey;
use crate::scope::{ScopeMut, ScopeRef};
use crate::slot::{Configure, SettingsSlot};

/// Marker type the root scope is bound to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Root;

/// Handle of a node inside a [`ScopeTree`].
///
/// Ids are only meaningful for the tree that produced them. [`ScopeTree::clear`]
/// invalidates every id except [`NodeId::ROOT`]; the id-based methods of the
/// tree reject invalidated ids with [`InputError::UnknownNode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Id of the root node of every tree.
    pub const ROOT: NodeId = NodeId {
        index: 0,
        generation: 0,
    };

    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// Number of [`ScopeTree::clear`] calls that preceded the node's creation.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Node {
    key: TypeKey,
    parent: Option<NodeId>,
    generation: u32,
    children: HashMap<TypeKey, NodeId>,
    settings: SettingsSlot,
}

impl Node {
    fn new(key: TypeKey, parent: Option<NodeId>, generation: u32, settings: SettingsSlot) -> Self {
        Self {
            key,
            parent,
            generation,
            children: HashMap::new(),
            settings,
        }
    }
}

/// Tree of scopes holding per-type widget settings.
///
/// Use [`root`](Self::root) / [`root_mut`](Self::root_mut) to get a handle and
/// navigate with the handle methods. The `NodeId`-based methods on this type
/// check the id first and fail with [`InputError::UnknownNode`] for an id
/// that does not name a live node of this tree.
#[derive(Debug)]
pub struct ScopeTree {
    nodes: Vec<Node>,
    generation: u32,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    /// Creates a tree containing only the root scope.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(TypeKey::of::<Root>(), None, 0, SettingsSlot::new())],
            generation: 0,
        }
    }

    /// Shared handle to the root scope.
    pub fn root(&self) -> ScopeRef<'_, Root> {
        ScopeRef::new(self, NodeId::ROOT)
    }

    /// Exclusive handle to the root scope.
    pub fn root_mut(&mut self) -> ScopeMut<'_, Root> {
        ScopeMut::new(self, NodeId::ROOT)
    }

    /// Number of scopes in the tree, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every scope except a fresh root.
    ///
    /// Ids handed out before the call no longer name a node, even once new
    /// nodes reuse their arena slots.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.generation = self.generation.wrapping_add(1);
        let root = &mut self.nodes[0];
        root.children.clear();
        root.settings.reset();
    }

    /// Returns `true` if `id` names a live node of this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index)
            .is_some_and(|node| node.generation == id.generation)
    }

    /// Type the node is bound to.
    pub fn key_of(&self, id: NodeId) -> Result<TypeKey> {
        self.check(id)?;
        Ok(self.key(id))
    }

    /// Parent of `id`.
    ///
    /// Fails with [`InputError::NoParent`] for the root.
    pub fn parent_of(&self, id: NodeId) -> Result<NodeId> {
        self.check(id)?;
        self.parent(id)
            .ok_or_else(|| InputError::no_parent(self.key(id)))
    }

    /// Direct children of `id`, in no particular order.
    pub fn children_of(
        &self,
        id: NodeId,
    ) -> Result<impl Iterator<Item = (TypeKey, NodeId)> + '_> {
        self.check(id)?;
        Ok(self
            .node(id)
            .children
            .iter()
            .map(|(key, child)| (*key, *child)))
    }

    /// Looks for a direct child of `id` bound to `key`.
    pub fn find_local_child(&self, id: NodeId, key: TypeKey) -> Result<Option<NodeId>> {
        self.check(id)?;
        Ok(self.local_child(id, key))
    }

    /// Walks upward from the parent of `id`, returning the first ancestor's
    /// direct child bound to `key`.
    ///
    /// An ancestor that is itself bound to `key` does not match; only the
    /// child slots of each ancestor are inspected. Children of `id` and of its
    /// siblings are never visible from here.
    pub fn find_in_ancestors(&self, id: NodeId, key: TypeKey) -> Result<Option<NodeId>> {
        self.check(id)?;
        Ok(self.ancestor_child(id, key))
    }

    /// Local child first, then the ancestor chain.
    pub fn find_nearest(&self, id: NodeId, key: TypeKey) -> Result<Option<NodeId>> {
        self.check(id)?;
        Ok(self.nearest(id, key))
    }

    /// Returns the child of `id` bound to `key`, creating it if needed.
    ///
    /// A new child starts with a copy of the settings of the nearest ancestor
    /// scope for `key` when `inherit` is set and such a scope exists, and with
    /// default settings otherwise. An existing child is returned untouched,
    /// whatever `inherit` says.
    pub fn ensure_child(&mut self, id: NodeId, key: TypeKey, inherit: bool) -> Result<NodeId> {
        self.check(id)?;
        Ok(self.child_or_insert(id, key, inherit))
    }

    /// Settings stored in `id`, which must be bound to `T`.
    ///
    /// `Ok(None)` means the scope was never configured and uses
    /// `T::Settings::default()`.
    pub fn settings<T: Configure>(&self, id: NodeId) -> Result<Option<&T::Settings>> {
        self.check_bound::<T>(id)?;
        Ok(self.slot(id).get::<T::Settings>())
    }

    /// Mutable settings stored in `id`, which must be bound to `T`.
    ///
    /// The settings are default-constructed on first access.
    pub fn settings_mut<T: Configure>(&mut self, id: NodeId) -> Result<&mut T::Settings> {
        self.check_bound::<T>(id)?;
        Ok(self.slot_mut(id).get_or_default::<T::Settings>())
    }

    /// Ids from `id` up to the root, both included.
    pub fn path_to_root(&self, id: NodeId) -> Result<Vec<NodeId>> {
        self.check(id)?;
        let mut path = vec![id];
        let mut current = self.parent(id);
        while let Some(parent) = current {
            path.push(parent);
            current = self.parent(parent);
        }
        Ok(path)
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(InputError::unknown_node(id))
        }
    }

    fn check_bound<T: 'static>(&self, id: NodeId) -> Result<()> {
        let found = self.key_of(id)?;
        let expected = TypeKey::of::<T>();
        if found == expected {
            Ok(())
        } else {
            Err(InputError::type_mismatch(expected, found))
        }
    }

    // Unchecked accessors for handles. A handle borrows the tree, so its id
    // stays live for as long as the handle exists.

    pub(crate) fn key(&self, id: NodeId) -> TypeKey {
        self.node(id).key
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub(crate) fn local_child(&self, id: NodeId, key: TypeKey) -> Option<NodeId> {
        self.node(id).children.get(&key).copied()
    }

    pub(crate) fn ancestor_child(&self, id: NodeId, key: TypeKey) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            let node = self.node(ancestor);
            if let Some(child) = node.children.get(&key) {
                return Some(*child);
            }
            current = node.parent;
        }
        None
    }

    pub(crate) fn nearest(&self, id: NodeId, key: TypeKey) -> Option<NodeId> {
        self.local_child(id, key)
            .or_else(|| self.ancestor_child(id, key))
    }

    pub(crate) fn child_or_insert(&mut self, id: NodeId, key: TypeKey, inherit: bool) -> NodeId {
        if let Some(child) = self.local_child(id, key) {
            return child;
        }

        let settings = if inherit {
            match self.ancestor_child(id, key) {
                Some(source) => {
                    #[cfg(feature = "tracing")]
                    trace!(
                        "scope `{}` under `{}` inherits settings from node {}",
                        key.type_name(),
                        self.key(id).type_name(),
                        source.index
                    );
                    self.node(source).settings.clone()
                }
                None => SettingsSlot::new(),
            }
        } else {
            SettingsSlot::new()
        };

        let child = NodeId {
            index: self.nodes.len(),
            generation: self.generation,
        };
        self.nodes
            .push(Node::new(key, Some(id), self.generation, settings));
        self.node_mut(id).children.insert(key, child);

        #[cfg(feature = "tracing")]
        trace!(
            "created scope `{}` (node {}) under `{}` (node {})",
            key.type_name(),
            child.index,
            self.key(id).type_name(),
            id.index
        );

        child
    }

    pub(crate) fn slot(&self, id: NodeId) -> &SettingsSlot {
        &self.node(id).settings
    }

    pub(crate) fn slot_mut(&mut self, id: NodeId) -> &mut SettingsSlot {
        &mut self.node_mut(id).settings
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index]
    }
}
