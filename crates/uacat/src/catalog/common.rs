// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Data types used across the information model.

use super::enumerations::AxisScaleEnumeration;
use crate::types::{LocalizedText, NodeId};
use crate::Structure;

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=884", binary = "i=886", xml = "i=885")]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }
}

/// Engineering unit of an analog value (UNECE code in `unit_id`).
#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=887", binary = "i=889", xml = "i=888")]
pub struct EUInformation {
    pub namespace_uri: Option<String>,
    pub unit_id: i32,
    pub display_name: LocalizedText,
    pub description: LocalizedText,
}

/// Input or output argument of a method.
#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=296", binary = "i=298", xml = "i=297")]
pub struct Argument {
    pub name: Option<String>,
    pub data_type: NodeId,
    /// `-1` scalar, `0` one or more dimensions, `n > 0` exactly `n`.
    pub value_rank: i32,
    pub array_dimensions: Option<Vec<u32>>,
    pub description: LocalizedText,
}

#[derive(Debug, Clone, Default, Structure)]
#[ua(id = "i=12079", binary = "i=12089", xml = "i=12081")]
pub struct AxisInformation {
    pub engineering_units: EUInformation,
    #[ua(rename = "EURange")]
    pub eu_range: Range,
    pub title: LocalizedText,
    pub axis_scale_type: AxisScaleEnumeration,
    pub axis_steps: Option<Vec<f64>>,
}
