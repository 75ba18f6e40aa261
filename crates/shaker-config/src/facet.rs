//! The fixed facet vocabulary and facet orders.
//!
//! Facets are the classification axes of a context. Their declaration order
//! is the merge priority: later facets are more specific and extend the
//! files contributed by earlier ones.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Separator between tokens of a selector (`common-action-device`).
pub const SELECTOR_SEPARATOR: char = '-';

/// Order used when neither the action nor the run overrides it.
pub const DEFAULT_ORDER: &str = "common-action-device-skin-region-lang";

/// Action name that stands for "any action" of a component.
pub const WILDCARD_ACTION: &str = "*";

/// A classification axis of a runtime context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Common,
    Action,
    Device,
    Skin,
    Region,
    Lang,
}

impl Facet {
    /// All facets in priority order.
    pub const ALL: [Facet; 6] = [
        Facet::Common,
        Facet::Action,
        Facet::Device,
        Facet::Skin,
        Facet::Region,
        Facet::Lang,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Facet::Common => "common",
            Facet::Action => "action",
            Facet::Device => "device",
            Facet::Skin => "skin",
            Facet::Region => "region",
            Facet::Lang => "lang",
        }
    }

    pub fn is_action(self) -> bool {
        self == Facet::Action
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Facet::ALL
            .into_iter()
            .find(|facet| facet.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownFacet(s.to_string()))
    }
}

/// An ordered, duplicate-free sequence of facets, e.g.
/// `common-action-device`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacetOrder(Vec<Facet>);

impl FacetOrder {
    pub fn new(facets: Vec<Facet>) -> Result<Self> {
        let order = Self(facets);
        order.check()?;
        Ok(order)
    }

    pub fn parse(order: &str) -> Result<Self> {
        let facets = order
            .split(SELECTOR_SEPARATOR)
            .map(|token| {
                token.parse::<Facet>().map_err(|_| ConfigError::InvalidOrder {
                    order: order.to_string(),
                    reason: format!("unknown facet '{token}'"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let parsed = Self(facets);
        parsed.check().map_err(|err| match err {
            ConfigError::InvalidOrder { reason, .. } => ConfigError::InvalidOrder {
                order: order.to_string(),
                reason,
            },
            other => other,
        })?;
        Ok(parsed)
    }

    fn check(&self) -> Result<()> {
        if self.0.is_empty() {
            return Err(ConfigError::InvalidOrder {
                order: String::new(),
                reason: "order must name at least one facet".to_string(),
            });
        }
        for (idx, facet) in self.0.iter().enumerate() {
            if self.0[..idx].contains(facet) {
                return Err(ConfigError::InvalidOrder {
                    order: self.selector(),
                    reason: format!("facet '{facet}' appears more than once"),
                });
            }
        }
        Ok(())
    }

    pub fn facets(&self) -> &[Facet] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The hyphen-joined facet selector for this order.
    pub fn selector(&self) -> String {
        self.0
            .iter()
            .map(|facet| facet.as_str())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl Default for FacetOrder {
    fn default() -> Self {
        Self(Facet::ALL.to_vec())
    }
}

impl FromStr for FacetOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for FacetOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector())
    }
}
