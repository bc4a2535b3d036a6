// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Blockboard-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Blockboard and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::footprint::Footprint;
use super::ids::BlockId;

/// Which content renderer owns a block's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Text,
    Code,
    Image,
    Diagram,
    Video,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] =
        [Self::Text, Self::Code, Self::Image, Self::Diagram, Self::Video];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Image => "image",
            Self::Diagram => "diagram",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBlockKindError {
    value: String,
}

impl fmt::Display for ParseBlockKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block kind '{}'", self.value)
    }
}

impl std::error::Error for ParseBlockKindError {}

impl FromStr for BlockKind {
    type Err = ParseBlockKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseBlockKindError { value: s.to_owned() })
    }
}

/// One content block on the board.
///
/// The footprint is only mutable from inside the crate so every change goes through the placement
/// engine, which keeps the board invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    id: BlockId,
    footprint: Footprint,
    kind: BlockKind,
    payload: Value,
}

impl Block {
    pub fn new(id: BlockId, footprint: Footprint, kind: BlockKind, payload: Value) -> Self {
        Self { id, footprint, kind, payload }
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    pub(crate) fn set_footprint(&mut self, footprint: Footprint) {
        self.footprint = footprint;
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn set_payload(&mut self, payload: Value) {
        self.payload = payload;
    }
}

#[cfg(test)]
mod tests {
    use super::BlockKind;

    #[test]
    fn kind_parses_its_own_label() {
        for kind in BlockKind::ALL {
            assert_eq!(kind.as_str().parse::<BlockKind>(), Ok(kind));
        }
        "slides".parse::<BlockKind>().unwrap_err();
    }

    #[test]
    fn kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&BlockKind::Diagram).unwrap(), "\"diagram\"");
    }
}
