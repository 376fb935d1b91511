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

//! Typed path segments addressing nodes in the management tree.

use std::fmt::{Display, Formatter};

pub const SUBSYSTEM: &str = "subsystem";
pub const DEPLOYMENT: &str = "deployment";
pub const MESSAGING_SUBSYSTEM: &str = "messaging";
pub const HORNETQ_SERVER: &str = "hornetq-server";
pub const JMS_QUEUE: &str = "jms-queue";
pub const JMS_TOPIC: &str = "jms-topic";

/// Element value matching any key of the same type in a registration index.
pub const WILDCARD_VALUE: &str = "*";

/// One `(type-name, key)` step of a [`PathAddress`].
///
/// ```
/// use messaging_deployer::PathElement;
///
/// let element = PathElement::new("hornetq-server", "default");
/// assert_eq!(element.to_string(), "hornetq-server=default");
/// assert!(!element.is_wildcard());
/// assert!(PathElement::wildcard("jms-queue").is_wildcard());
/// ```
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PathElement {
    key: String,
    value: String,
}

impl PathElement {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    pub fn wildcard(key: &str) -> Self {
        Self::new(key, WILDCARD_VALUE)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_wildcard(&self) -> bool {
        self.value == WILDCARD_VALUE
    }

    /// Returns the wildcard element sharing this element's type-name.
    pub fn to_wildcard(&self) -> Self {
        Self::wildcard(&self.key)
    }
}

impl Display for PathElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered sequence of [`PathElement`]s. Two addresses are equal iff their
/// elements are equal pairwise.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct PathAddress {
    elements: Vec<PathElement>,
}

impl PathAddress {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// Returns a new address made of `self` followed by every element of `other`.
    pub fn append(&self, other: &PathAddress) -> PathAddress {
        let mut elements = Vec::with_capacity(self.elements.len() + other.elements.len());
        elements.extend(self.elements.iter().cloned());
        elements.extend(other.elements.iter().cloned());
        Self { elements }
    }

    /// Returns a new address with `element` added as the last step.
    pub fn child(&self, element: PathElement) -> PathAddress {
        let mut elements = self.elements.clone();
        elements.push(element);
        Self { elements }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }

    /// The address without its last step; the empty address is its own parent.
    pub fn parent(&self) -> PathAddress {
        let end = self.elements.len().saturating_sub(1);
        Self {
            elements: self.elements[..end].to_vec(),
        }
    }

    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<PathElement> for PathAddress {
    fn from(element: PathElement) -> Self {
        Self {
            elements: vec![element],
        }
    }
}

impl FromIterator<PathElement> for PathAddress {
    fn from_iter<T: IntoIterator<Item = PathElement>>(iter: T) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PathAddress {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl Display for PathAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "/");
        }
        for element in &self.elements {
            write!(f, "/{element}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PathAddress, PathElement, HORNETQ_SERVER, JMS_QUEUE, SUBSYSTEM};

    #[test]
    fn addresses_compare_element_wise() {
        let a: PathAddress = [
            PathElement::new(HORNETQ_SERVER, "default"),
            PathElement::new(JMS_QUEUE, "Q1"),
        ]
        .into_iter()
        .collect();
        let b = PathAddress::from(PathElement::new(HORNETQ_SERVER, "default"))
            .child(PathElement::new(JMS_QUEUE, "Q1"));
        let reversed: PathAddress = a.iter().rev().cloned().collect();

        assert_eq!(a, b);
        assert_ne!(a, reversed);
    }

    #[test]
    fn append_keeps_both_sequences_in_order() {
        let subsystem = PathAddress::from(PathElement::new(SUBSYSTEM, "messaging"));
        let registration = PathAddress::new(vec![
            PathElement::new(HORNETQ_SERVER, "default"),
            PathElement::new(JMS_QUEUE, "Q1"),
        ]);

        let full = subsystem.append(&registration);

        assert_eq!(full.len(), 3);
        assert_eq!(
            full.to_string(),
            "/subsystem=messaging/hornetq-server=default/jms-queue=Q1"
        );
        assert_eq!(full.last(), Some(&PathElement::new(JMS_QUEUE, "Q1")));
        assert_eq!(full.parent().append(&PathAddress::empty()).len(), 2);
    }

    #[test]
    fn empty_address_renders_as_root() {
        assert!(PathAddress::empty().is_empty());
        assert_eq!(PathAddress::empty().to_string(), "/");
        assert!(PathAddress::empty().parent().is_empty());
    }
}
