//! Fluent, stateful card construction.
//!
//! `CardBuilder` accumulates body blocks in insertion order and tracks at
//! most one in-progress column set. Ordering rules are enforced at the
//! offending call; only a column set left open is also caught at build time.
//! The builder is single-threaded and meant to be consumed within one call
//! stack.

use std::fmt::Display;

use thiserror::Error;

use crate::blocks::{self, Block, ColumnBlock, ColumnWidth, Header};
use crate::card::{assemble, Card};
use crate::status::status_color;

/// Language tag applied when none is given.
pub const DEFAULT_LANGUAGE: &str = "zh";

/// Builder misuse. Every variant is a deterministic, caller-fixable ordering
/// error; none is transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// `column()` was called with no open column set.
    #[error("call .columns() before .column()")]
    ColumnOutsideSet,
    /// `end_columns()` was called with no open column set.
    #[error("no column context to end")]
    NoColumnsToEnd,
    /// A column set is still open: a second `columns()`, a non-column
    /// append, or `build()` before `end_columns()`.
    #[error("unclosed column context")]
    UnclosedColumns,
}

/// Fluent builder for card documents.
///
/// Mutators consume and return the builder so calls chain; fallible ones
/// return `Result` and surface [`BuildError`] at the call that broke the
/// ordering rules.
#[derive(Debug, Clone)]
pub struct CardBuilder {
    language: String,
    header: Option<Header>,
    elements: Vec<Block>,
    open_columns: Option<Vec<ColumnBlock>>,
}

impl Default for CardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CardBuilder {
    pub fn new() -> Self {
        Self::with_language(DEFAULT_LANGUAGE)
    }

    pub fn with_language(language: impl Into<String>) -> Self {
        CardBuilder {
            language: language.into(),
            header: None,
            elements: Vec::new(),
            open_columns: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Set the header. Last call wins. An explicit `color` overrides the
    /// color derived from `status`; column-set state is untouched.
    pub fn header(
        mut self,
        title: impl Into<String>,
        status: Option<&str>,
        color: Option<&str>,
        subtitle: Option<&str>,
    ) -> Self {
        let template = match color {
            Some(color) => color.to_string(),
            None => status_color(status.unwrap_or_default()).to_string(),
        };
        let mut header = blocks::header(title, template);
        if let Some(subtitle) = subtitle {
            header = header.subtitle(subtitle);
        }
        self.header = Some(header);
        self
    }

    /// Append one `**key:** value` metadata line.
    pub fn metadata(self, key: &str, value: impl Display) -> Result<Self, BuildError> {
        self.append(blocks::markdown(format!("**{key}:** {value}")).into())
    }

    /// Append a single block with one `**Key:** value` line per field.
    /// Snake_case keys are title-cased for display.
    pub fn metadata_block<'a, I, V>(self, fields: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Display,
    {
        let lines: Vec<String> = fields
            .into_iter()
            .map(|(key, value)| format!("**{}:** {value}", display_key(key)))
            .collect();
        self.append(blocks::markdown(lines.join("\n")).into())
    }

    /// Append a markdown block with default styling. Styled blocks go
    /// through [`CardBuilder::add_block`].
    pub fn markdown(self, text: impl Into<String>) -> Result<Self, BuildError> {
        self.append(blocks::markdown(text).into())
    }

    /// Append a horizontal rule.
    pub fn divider(self) -> Result<Self, BuildError> {
        self.append(blocks::divider().into())
    }

    /// Open a column set. The set must be closed with
    /// [`CardBuilder::end_columns`] before anything else is appended.
    pub fn columns(mut self) -> Result<Self, BuildError> {
        if self.open_columns.is_some() {
            return Err(BuildError::UnclosedColumns);
        }
        self.open_columns = Some(Vec::new());
        Ok(self)
    }

    /// Append a titled value column to the open column set.
    pub fn column(
        mut self,
        title: &str,
        value: impl Display,
        width: ColumnWidth,
    ) -> Result<Self, BuildError> {
        let columns = self
            .open_columns
            .as_mut()
            .ok_or(BuildError::ColumnOutsideSet)?;
        let cell = blocks::markdown(format!("**{title}**\n{value}"));
        columns.push(blocks::column(vec![cell.into()], width));
        Ok(self)
    }

    /// Close the open column set and append it as one body block.
    pub fn end_columns(mut self) -> Result<Self, BuildError> {
        let columns = self.open_columns.take().ok_or(BuildError::NoColumnsToEnd)?;
        self.elements.push(blocks::column_set(columns).into());
        Ok(self)
    }

    /// Append a collapsible panel with a bolded title and one markdown
    /// content element.
    pub fn collapsible(
        self,
        title: &str,
        content: &str,
        expanded: bool,
    ) -> Result<Self, BuildError> {
        let panel = blocks::collapsible_panel(
            format!("**{title}**"),
            vec![blocks::markdown(content).into()],
            expanded,
        );
        self.append(panel.into())
    }

    /// Append a pre-constructed block verbatim.
    pub fn add_block(self, block: impl Into<Block>) -> Result<Self, BuildError> {
        self.append(block.into())
    }

    fn append(mut self, block: Block) -> Result<Self, BuildError> {
        if self.open_columns.is_some() {
            return Err(BuildError::UnclosedColumns);
        }
        self.elements.push(block);
        Ok(self)
    }

    /// Finalize into a [`Card`]. Fails if a column set is still open.
    /// Borrowing, so a builder can regenerate its card repeatedly.
    pub fn build(&self) -> Result<Card, BuildError> {
        if self.open_columns.is_some() {
            return Err(BuildError::UnclosedColumns);
        }
        let header = self
            .header
            .clone()
            .unwrap_or_else(|| blocks::header("", status_color("")));
        tracing::debug!(elements = self.elements.len(), "finalizing card");
        Ok(assemble(
            header,
            self.elements.clone(),
            blocks::style_config(),
            self.language.clone(),
        ))
    }
}

/// `task_name` -> `Task Name`.
fn display_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn body_elements(card: &Card) -> Vec<Value> {
        let value = card.to_value().expect("serialize card");
        value["body"]["elements"]
            .as_array()
            .expect("body elements array")
            .clone()
    }

    #[test]
    fn body_order_is_insertion_order() {
        let card = CardBuilder::new()
            .header("Test", None, None, None)
            .metadata("Key1", "Value1")
            .and_then(|b| b.markdown("text"))
            .and_then(|b| b.divider())
            .and_then(|b| b.collapsible("More", "info", false))
            .and_then(|b| b.build())
            .expect("build card");

        let elements = body_elements(&card);
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[0]["tag"], "markdown");
        assert_eq!(elements[0]["content"], "**Key1:** Value1");
        assert_eq!(elements[1]["content"], "text");
        assert_eq!(elements[2]["tag"], "hr");
        assert_eq!(elements[3]["tag"], "collapsible_panel");
    }

    #[test]
    fn header_status_resolution_and_override() {
        let derived = CardBuilder::new()
            .header("T", Some("success"), None, None)
            .build()
            .expect("build card");
        assert_eq!(derived.header().template(), "green");

        let overridden = CardBuilder::new()
            .header("T", Some("success"), Some("purple"), None)
            .build()
            .expect("build card");
        assert_eq!(overridden.header().template(), "purple");
    }

    #[test]
    fn header_last_call_wins() {
        let card = CardBuilder::new()
            .header("First", Some("failed"), None, None)
            .header("Second", Some("success"), None, Some("sub"))
            .build()
            .expect("build card");
        let value = card.to_value().expect("serialize card");
        assert_eq!(value["header"]["title"]["content"], "Second");
        assert_eq!(value["header"]["template"], "green");
        assert_eq!(value["header"]["subtitle"]["content"], "sub");
    }

    #[test]
    fn column_flow_produces_single_set() {
        let card = CardBuilder::new()
            .header("Test", None, None, None)
            .columns()
            .and_then(|b| b.column("Left", "Value1", ColumnWidth::Auto))
            .and_then(|b| b.column("Right", "Value2", ColumnWidth::Weighted(1)))
            .and_then(|b| b.end_columns())
            .and_then(|b| b.build())
            .expect("build card");

        let elements = body_elements(&card);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0]["tag"], "column_set");
        let columns = elements[0]["columns"].as_array().expect("columns");
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0]["elements"][0]["content"], "**Left**\nValue1");
        assert_eq!(columns[1]["width"], "weighted");
    }

    #[test]
    fn column_without_context_is_rejected() {
        let err = CardBuilder::new()
            .header("Test", None, None, None)
            .column("A", "1", ColumnWidth::Auto)
            .expect_err("column without columns()");
        assert_eq!(err, BuildError::ColumnOutsideSet);
        assert_eq!(err.to_string(), "call .columns() before .column()");
    }

    #[test]
    fn end_columns_without_context_is_rejected() {
        let err = CardBuilder::new()
            .header("Test", None, None, None)
            .end_columns()
            .expect_err("end_columns without columns()");
        assert_eq!(err, BuildError::NoColumnsToEnd);
        assert_eq!(err.to_string(), "no column context to end");
    }

    #[test]
    fn build_with_open_columns_is_rejected() {
        let builder = CardBuilder::new()
            .header("Test", None, None, None)
            .columns()
            .and_then(|b| b.column("A", "1", ColumnWidth::Auto))
            .expect("open column set");
        let err = builder.build().expect_err("build with open columns");
        assert_eq!(err, BuildError::UnclosedColumns);
        assert_eq!(err.to_string(), "unclosed column context");
    }

    #[test]
    fn appends_while_columns_open_are_rejected() {
        let open = || {
            CardBuilder::new()
                .header("Test", None, None, None)
                .columns()
                .expect("open column set")
        };
        assert_eq!(
            open().metadata("K", "V").expect_err("metadata"),
            BuildError::UnclosedColumns
        );
        assert_eq!(
            open().markdown("text").expect_err("markdown"),
            BuildError::UnclosedColumns
        );
        assert_eq!(open().divider().expect_err("divider"), BuildError::UnclosedColumns);
        assert_eq!(
            open().collapsible("T", "C", false).expect_err("collapsible"),
            BuildError::UnclosedColumns
        );
        assert_eq!(
            open().columns().expect_err("second columns()"),
            BuildError::UnclosedColumns
        );
    }

    #[test]
    fn build_is_repeatable() {
        let builder = CardBuilder::new()
            .header("Test", Some("info"), None, None)
            .metadata("K", "V")
            .expect("metadata");
        let first = builder.build().expect("first build");
        let second = builder.build().expect("second build");
        assert_eq!(
            first.to_value().expect("serialize"),
            second.to_value().expect("serialize")
        );
    }

    #[test]
    fn metadata_block_title_cases_keys() {
        let card = CardBuilder::new()
            .header("Test", None, None, None)
            .metadata_block([("task_name", "my-task"), ("duration", "5m")])
            .and_then(|b| b.build())
            .expect("build card");
        let elements = body_elements(&card);
        assert_eq!(elements.len(), 1);
        let content = elements[0]["content"].as_str().expect("content");
        assert_eq!(content, "**Task Name:** my-task\n**Duration:** 5m");
    }

    #[test]
    fn metadata_accepts_display_values() {
        let card = CardBuilder::new()
            .header("Test", None, None, None)
            .metadata("Status Code", 0)
            .and_then(|b| b.build())
            .expect("build card");
        assert_eq!(body_elements(&card)[0]["content"], "**Status Code:** 0");
    }

    #[test]
    fn default_header_when_unset() {
        let card = CardBuilder::new().build().expect("build card");
        let value = card.to_value().expect("serialize card");
        assert_eq!(value["header"]["title"]["content"], "");
        assert_eq!(value["header"]["template"], "blue");
    }

    #[test]
    fn language_is_carried_through() {
        let card = CardBuilder::with_language("en")
            .header("Test", Some("success"), None, None)
            .build()
            .expect("build card");
        assert_eq!(card.language(), "en");
        assert_eq!(CardBuilder::new().language(), "zh");
    }

    #[test]
    fn display_key_title_cases() {
        assert_eq!(display_key("task_name"), "Task Name");
        assert_eq!(display_key("duration"), "Duration");
        assert_eq!(display_key("a__b"), "A B");
    }
}
