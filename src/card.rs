//! Card assembly: a header, an ordered body, and a style config under one
//! schema version tag.

use serde::Serialize;
use serde_json::Value;

use crate::blocks::{Block, Header, StyleConfig};

/// Wire schema version stamped on every assembled card.
pub const SCHEMA_VERSION: &str = "2.0";

#[derive(Debug, Clone, Serialize)]
struct Body {
    direction: &'static str,
    elements: Vec<Block>,
}

/// A finished card document. Immutable once assembled; serialize it and hand
/// it to a notifier.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    schema: &'static str,
    header: Header,
    body: Body,
    config: StyleConfig,
    #[serde(skip)]
    language: String,
}

/// Assemble a card from already-validated parts. Pure; trusts the builder to
/// have enforced structural rules.
pub fn assemble(
    header: Header,
    elements: Vec<Block>,
    config: StyleConfig,
    language: impl Into<String>,
) -> Card {
    Card {
        schema: SCHEMA_VERSION,
        header,
        body: Body {
            direction: "vertical",
            elements,
        },
        config,
        language: language.into(),
    }
}

impl Card {
    /// Language tag the card was built for. Not part of the wire schema.
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
