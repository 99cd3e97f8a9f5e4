// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

use crate::types::NodeId;

/// Which of the three ids of an [`Identity`] a node id matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdRole {
    /// The data type node.
    Abstract,
    /// The "Default Binary" encoding node.
    Binary,
    /// The "Default XML" encoding node.
    Xml,
}

impl IdRole {
    pub const ALL: [IdRole; 3] = [IdRole::Abstract, IdRole::Binary, IdRole::Xml];
}

impl fmt::Display for IdRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdRole::Abstract => "abstract",
            IdRole::Binary => "binary encoding",
            IdRole::Xml => "XML encoding",
        })
    }
}

/// The three stable ids naming a structure type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub abstract_id: NodeId,
    pub binary_id: NodeId,
    pub xml_id: NodeId,
}

impl Identity {
    pub const fn new(abstract_id: NodeId, binary_id: NodeId, xml_id: NodeId) -> Self {
        Self {
            abstract_id,
            binary_id,
            xml_id,
        }
    }

    /// Namespace-0 numeric ids, the common case for the standard catalog.
    pub const fn numeric(abstract_id: u32, binary_id: u32, xml_id: u32) -> Self {
        Self::new(
            NodeId::numeric(0, abstract_id),
            NodeId::numeric(0, binary_id),
            NodeId::numeric(0, xml_id),
        )
    }

    pub fn id(&self, role: IdRole) -> &NodeId {
        match role {
            IdRole::Abstract => &self.abstract_id,
            IdRole::Binary => &self.binary_id,
            IdRole::Xml => &self.xml_id,
        }
    }

    /// `(role, id)` pairs in abstract, binary, xml order.
    pub fn ids(&self) -> impl Iterator<Item = (IdRole, &NodeId)> {
        IdRole::ALL.into_iter().map(move |role| (role, self.id(role)))
    }

    pub fn role_of(&self, id: &NodeId) -> Option<IdRole> {
        self.ids().find(|(_, candidate)| *candidate == id).map(|(role, _)| role)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.role_of(id).is_some()
    }

    /// The three ids are pairwise different.
    pub fn is_distinct(&self) -> bool {
        self.abstract_id != self.binary_id
            && self.abstract_id != self.xml_id
            && self.binary_id != self.xml_id
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.abstract_id, self.binary_id, self.xml_id
        )
    }
}
