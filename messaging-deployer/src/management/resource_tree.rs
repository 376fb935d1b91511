/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Path-addressed management tree with per-node child-map locking.

use crate::model::path_address::{PathAddress, PathElement};
use crate::observability::events;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

const COMPONENT: &str = "resource_tree";

/// One addressable point in the management tree.
///
/// Presence in the parent's child map is existence; a node has exactly one parent.
/// Each node guards only its own child map, so mutations of unrelated branches never
/// contend with each other.
pub struct ResourceNode {
    children: Mutex<BTreeMap<PathElement, Arc<ResourceNode>>>,
}

impl ResourceNode {
    /// Creates a detached, empty node.
    pub fn create() -> Arc<ResourceNode> {
        Arc::new(Self {
            children: Mutex::new(BTreeMap::new()),
        })
    }

    pub async fn child(&self, element: &PathElement) -> Option<Arc<ResourceNode>> {
        self.children.lock().await.get(element).cloned()
    }

    pub async fn has_child(&self, element: &PathElement) -> bool {
        self.children.lock().await.contains_key(element)
    }

    /// Returns the child registered under `element`, creating an empty one if absent.
    ///
    /// The check and the insert happen under this node's lock, so racing callers
    /// always observe the same child.
    pub async fn get_or_create_child(&self, element: &PathElement) -> Arc<ResourceNode> {
        let mut created = false;
        let child = {
            let mut children = self.children.lock().await;
            children
                .entry(element.clone())
                .or_insert_with(|| {
                    created = true;
                    ResourceNode::create()
                })
                .clone()
        };

        if created {
            debug!(
                event = events::RESOURCE_NODE_CREATE,
                component = COMPONENT,
                element = %element,
                "created resource node"
            );
        }
        child
    }

    /// Walks `address` from this node, creating every missing step.
    ///
    /// A zero-length address returns this node.
    pub async fn get_or_create(self: &Arc<Self>, address: &PathAddress) -> Arc<ResourceNode> {
        let mut current = Arc::clone(self);
        for element in address {
            current = current.get_or_create_child(element).await;
        }
        current
    }

    /// Walks `address` from this node without creating anything.
    pub async fn navigate(self: &Arc<Self>, address: &PathAddress) -> Option<Arc<ResourceNode>> {
        let mut current = Arc::clone(self);
        for element in address {
            current = current.child(element).await?;
        }
        Some(current)
    }

    /// Detaches the child registered under `element` together with its sub-tree.
    pub async fn remove_child(&self, element: &PathElement) -> Option<Arc<ResourceNode>> {
        let removed = self.children.lock().await.remove(element);
        if removed.is_some() {
            debug!(
                event = events::RESOURCE_NODE_REMOVE,
                component = COMPONENT,
                element = %element,
                "removed resource node"
            );
        }
        removed
    }

    /// Snapshot of the direct children, ordered by path element.
    pub async fn children(&self) -> Vec<(PathElement, Arc<ResourceNode>)> {
        self.children
            .lock()
            .await
            .iter()
            .map(|(element, child)| (element.clone(), Arc::clone(child)))
            .collect()
    }

    pub async fn child_count(&self) -> usize {
        self.children.lock().await.len()
    }

    /// Every descendant address relative to this node, in depth-first pre-order.
    pub async fn describe(self: &Arc<Self>) -> Vec<PathAddress> {
        let mut described = Vec::new();
        let mut pending = vec![(PathAddress::empty(), Arc::clone(self))];

        while let Some((address, node)) = pending.pop() {
            for (element, child) in node.children().await.into_iter().rev() {
                pending.push((address.child(element), child));
            }
            if !address.is_empty() {
                described.push(address);
            }
        }
        described
    }
}

impl Debug for ResourceNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceNode").finish_non_exhaustive()
    }
}

/// Process-wide management tree.
pub struct ResourceTree {
    root: Arc<ResourceNode>,
}

impl Default for ResourceTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceTree {
    pub fn new() -> Self {
        Self {
            root: ResourceNode::create(),
        }
    }

    pub fn root(&self) -> &Arc<ResourceNode> {
        &self.root
    }

    pub async fn get_or_create(&self, address: &PathAddress) -> Arc<ResourceNode> {
        self.root.get_or_create(address).await
    }

    pub async fn read(&self, address: &PathAddress) -> Option<Arc<ResourceNode>> {
        self.root.navigate(address).await
    }

    /// Removes the node at `address` and its sub-tree. The root itself cannot be removed.
    pub async fn remove(&self, address: &PathAddress) -> Option<Arc<ResourceNode>> {
        let (last, parent) = address.elements().split_last()?;
        let parent_address = PathAddress::new(parent.to_vec());
        let parent = self.root.navigate(&parent_address).await?;
        parent.remove_child(last).await
    }

    pub async fn describe(&self) -> Vec<PathAddress> {
        self.root.describe().await
    }
}
