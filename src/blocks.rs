//! Reusable building blocks for Lark interactive cards.
//!
//! Constructors return self-contained, serializable values matching the
//! card 2.0 schema. They are pure and do not validate: structural rules
//! (column-set balance, ordering) live in [`crate::builder::CardBuilder`].
//! Optional fields that were not set are absent from the serialized JSON,
//! never `null`.

use serde::Serialize;
use serde_json::Value;

const ZERO_MARGIN: &str = "0px 0px 0px 0px";

/// A body element of a card. Composite variants own their children by value;
/// the ownership tree has no sharing and no cycles.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Block {
    Markdown(MarkdownBlock),
    Divider(DividerBlock),
    ColumnSet(ColumnSetBlock),
    CollapsiblePanel(CollapsiblePanelBlock),
    /// Pre-assembled JSON for block shapes the typed constructors do not
    /// cover. Serialized verbatim.
    Raw(Value),
}

impl From<Value> for Block {
    fn from(value: Value) -> Self {
        Block::Raw(value)
    }
}

/// Horizontal alignment of markdown text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// A `plain_text` leaf used by header titles, subtitles, and text tags.
#[derive(Debug, Clone, Serialize)]
pub struct PlainText {
    tag: &'static str,
    content: String,
}

/// Create a `plain_text` leaf.
pub fn plain_text(content: impl Into<String>) -> PlainText {
    PlainText {
        tag: "plain_text",
        content: content.into(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkdownBlock {
    tag: &'static str,
    content: String,
    text_align: TextAlign,
    text_size: String,
    margin: String,
}

/// Create a markdown block: left aligned, normal size, zero margin.
pub fn markdown(content: impl Into<String>) -> MarkdownBlock {
    MarkdownBlock {
        tag: "markdown",
        content: content.into(),
        text_align: TextAlign::Left,
        text_size: "normal".to_string(),
        margin: ZERO_MARGIN.to_string(),
    }
}

impl MarkdownBlock {
    pub fn align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    /// Text size key, e.g. `normal` or `normal_v2`.
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.text_size = size.into();
        self
    }

    /// CSS-like margin string.
    pub fn margin(mut self, margin: impl Into<String>) -> Self {
        self.margin = margin.into();
        self
    }
}

impl From<MarkdownBlock> for Block {
    fn from(block: MarkdownBlock) -> Self {
        Block::Markdown(block)
    }
}

/// Horizontal rule between body sections.
#[derive(Debug, Clone, Serialize)]
pub struct DividerBlock {
    tag: &'static str,
}

pub fn divider() -> DividerBlock {
    DividerBlock { tag: "hr" }
}

impl From<DividerBlock> for Block {
    fn from(block: DividerBlock) -> Self {
        Block::Divider(block)
    }
}

/// A status tag rendered next to the header title.
#[derive(Debug, Clone, Serialize)]
pub struct TextTag {
    tag: &'static str,
    text: PlainText,
    color: String,
}

pub fn text_tag(text: impl Into<String>, color: impl Into<String>) -> TextTag {
    TextTag {
        tag: "text_tag",
        text: plain_text(text),
        color: color.into(),
    }
}

/// Card header: title plus a color template, with optional decorations.
#[derive(Debug, Clone, Serialize)]
pub struct Header {
    title: PlainText,
    template: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtitle: Option<PlainText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_tag_list: Option<Vec<TextTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<String>,
}

/// Create a header with the mandatory title and color template.
pub fn header(title: impl Into<String>, template: impl Into<String>) -> Header {
    Header {
        title: plain_text(title),
        template: template.into(),
        subtitle: None,
        text_tag_list: None,
        padding: None,
    }
}

impl Header {
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(plain_text(subtitle));
        self
    }

    pub fn text_tags(mut self, tags: Vec<TextTag>) -> Self {
        self.text_tag_list = Some(tags);
        self
    }

    pub fn padding(mut self, padding: impl Into<String>) -> Self {
        self.padding = Some(padding.into());
        self
    }

    /// The resolved color template, e.g. `green`.
    pub fn template(&self) -> &str {
        &self.template
    }
}

/// Width behavior of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Size to content.
    Auto,
    /// Share remaining space with the given weight.
    Weighted(u32),
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnBlock {
    tag: &'static str,
    width: &'static str,
    elements: Vec<Block>,
    vertical_spacing: String,
    horizontal_align: String,
    vertical_align: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    weight: Option<u32>,
}

/// Create a column. `weight` reaches the wire only for weighted columns.
pub fn column(elements: Vec<Block>, width: ColumnWidth) -> ColumnBlock {
    let (width, weight) = match width {
        ColumnWidth::Auto => ("auto", None),
        ColumnWidth::Weighted(weight) => ("weighted", Some(weight)),
    };
    ColumnBlock {
        tag: "column",
        width,
        elements,
        vertical_spacing: "8px".to_string(),
        horizontal_align: "left".to_string(),
        vertical_align: "top".to_string(),
        weight,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSetBlock {
    tag: &'static str,
    background_style: String,
    horizontal_spacing: String,
    horizontal_align: String,
    columns: Vec<ColumnBlock>,
    margin: String,
}

/// Wrap columns in a `column_set` with the standard background and spacing.
pub fn column_set(columns: Vec<ColumnBlock>) -> ColumnSetBlock {
    ColumnSetBlock {
        tag: "column_set",
        background_style: "grey-100".to_string(),
        horizontal_spacing: "12px".to_string(),
        horizontal_align: "left".to_string(),
        columns,
        margin: ZERO_MARGIN.to_string(),
    }
}

impl From<ColumnSetBlock> for Block {
    fn from(block: ColumnSetBlock) -> Self {
        Block::ColumnSet(block)
    }
}

#[derive(Debug, Clone, Serialize)]
struct PanelTitle {
    tag: &'static str,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct PanelIcon {
    tag: &'static str,
    token: &'static str,
    color: &'static str,
    size: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct PanelHeader {
    title: PanelTitle,
    background_color: String,
    vertical_align: &'static str,
    icon: PanelIcon,
    icon_position: &'static str,
    icon_expanded_angle: i32,
}

#[derive(Debug, Clone, Serialize)]
struct PanelBorder {
    color: String,
    corner_radius: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollapsiblePanelBlock {
    tag: &'static str,
    expanded: bool,
    header: PanelHeader,
    border: PanelBorder,
    vertical_spacing: String,
    padding: String,
    elements: Vec<Block>,
}

/// Create a collapsible panel with a markdown title and the standard
/// fold icon.
pub fn collapsible_panel(
    title_markdown: impl Into<String>,
    elements: Vec<Block>,
    expanded: bool,
) -> CollapsiblePanelBlock {
    CollapsiblePanelBlock {
        tag: "collapsible_panel",
        expanded,
        header: PanelHeader {
            title: PanelTitle {
                tag: "markdown",
                content: title_markdown.into(),
            },
            background_color: "grey-200".to_string(),
            vertical_align: "center",
            icon: PanelIcon {
                tag: "standard_icon",
                token: "down-small-ccm_outlined",
                color: "",
                size: "16px 16px",
            },
            icon_position: "right",
            icon_expanded_angle: -180,
        },
        border: PanelBorder {
            color: "grey".to_string(),
            corner_radius: "5px".to_string(),
        },
        vertical_spacing: "8px".to_string(),
        padding: "8px 8px 8px 8px".to_string(),
        elements,
    }
}

impl From<CollapsiblePanelBlock> for Block {
    fn from(block: CollapsiblePanelBlock) -> Self {
        Block::CollapsiblePanel(block)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ResponsiveTextSize {
    default: &'static str,
    pc: &'static str,
    mobile: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct TextSizeRules {
    normal_v2: ResponsiveTextSize,
}

#[derive(Debug, Clone, Serialize)]
struct StyleRules {
    text_size: TextSizeRules,
}

/// Card-level style configuration for responsive text sizing.
#[derive(Debug, Clone, Serialize)]
pub struct StyleConfig {
    update_multi: bool,
    style: StyleRules,
}

/// The standard config block: `normal_v2` text renders as a heading on
/// mobile and normal size elsewhere.
pub fn style_config() -> StyleConfig {
    StyleConfig {
        update_multi: true,
        style: StyleRules {
            text_size: TextSizeRules {
                normal_v2: ResponsiveTextSize {
                    default: "normal",
                    pc: "normal",
                    mobile: "heading",
                },
            },
        },
    }
}

#[derive(Debug, Clone, Serialize)]
struct TemplateData {
    template_id: String,
    template_version_name: String,
    template_variable: Value,
}

/// Reference to a published card template by id and version.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateReference {
    #[serde(rename = "type")]
    kind: &'static str,
    data: TemplateData,
}

pub fn template_reference(
    template_id: impl Into<String>,
    template_version_name: impl Into<String>,
    template_variable: Value,
) -> TemplateReference {
    TemplateReference {
        kind: "template",
        data: TemplateData {
            template_id: template_id.into(),
            template_version_name: template_version_name.into(),
            template_variable,
        },
    }
}
