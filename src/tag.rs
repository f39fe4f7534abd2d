// Copyright 2026 The tree-sitter-htmlx-scanner contributors. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The static tag catalogue: classification of HTML tag names into
//! content-model categories, and the handful of element-specific rules that
//! drive implicit end-tag insertion.
//!
//! The catalogue is a flat table of `(name, TagId)` pairs bucketed by first
//! letter, giving `classify` an O(1) bucket lookup followed by a short
//! linear scan -- the same shape as a hand-rolled perfect-hash table, without
//! needing a build-time code generator for a table this small.

/// Every recognized HTML tag name, plus `Custom` for anything else.
///
/// Variants are declared in four contiguous blocks -- void, raw-text,
/// escapable-raw-text, then everything else -- so that [`TagId::category`]
/// can classify a tag with a handful of ordinal comparisons instead of a
/// per-variant match arm.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagId {
    // --- void elements: no content, no end tag ---
    Area,
    Base,
    Br,
    Col,
    Embed,
    Hr,
    Img,
    Input,
    Link,
    Meta,
    Source,
    Track,
    Wbr,

    // --- raw-text elements: content has no markup or character references ---
    Script,
    Style,

    // --- escapable-raw-text elements: content has character references but no markup ---
    Textarea,
    Title,

    // --- everything else ---
    Template,
    A,
    Abbr,
    Address,
    Article,
    Aside,
    Audio,
    B,
    Bdi,
    Bdo,
    Blockquote,
    Body,
    Button,
    Canvas,
    Caption,
    Cite,
    Code,
    Colgroup,
    Data,
    Datalist,
    Dd,
    Del,
    Details,
    Dfn,
    Dialog,
    Div,
    Dl,
    Dt,
    Em,
    Fieldset,
    Figcaption,
    Figure,
    Footer,
    Form,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    Head,
    Header,
    Hgroup,
    Html,
    I,
    Iframe,
    Ins,
    Kbd,
    Label,
    Legend,
    Li,
    Main,
    Map,
    Mark,
    Math,
    Menu,
    Meter,
    Nav,
    Noscript,
    Object,
    Ol,
    Optgroup,
    Option,
    Output,
    P,
    Picture,
    Pre,
    Progress,
    Q,
    Rb,
    Rp,
    Rt,
    Rtc,
    Ruby,
    S,
    Samp,
    Search,
    Section,
    Select,
    Slot,
    Small,
    Span,
    Strong,
    Sub,
    Summary,
    Sup,
    Svg,
    Table,
    Tbody,
    Td,
    Tfoot,
    Th,
    Thead,
    Time,
    Tr,
    U,
    Ul,
    Var,
    Video,

    /// A hyphenated, over-length, or otherwise unrecognized tag name.
    Custom,
}

/// The content-model category of a tag, per WHATWG HTML §13.1.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagCategory {
    /// No content permitted, no end tag ever expected.
    Void,
    /// Content is raw text: no markup, no character references.
    RawText,
    /// Content is raw text but with character-reference substitution.
    EscapableRawText,
    /// An ordinary element; its content model is governed by [`can_contain`].
    Normal,
    /// Not a recognized element name.
    Custom,
}

const VOID_END: u8 = TagId::Wbr as u8;
const RAW_TEXT_END: u8 = TagId::Style as u8;
const ESCAPABLE_RAW_TEXT_END: u8 = TagId::Title as u8;

impl TagId {
    pub fn category(self) -> TagCategory {
        if self == TagId::Custom {
            return TagCategory::Custom;
        }
        let ordinal = self as u8;
        if ordinal <= VOID_END {
            TagCategory::Void
        } else if ordinal <= RAW_TEXT_END {
            TagCategory::RawText
        } else if ordinal <= ESCAPABLE_RAW_TEXT_END {
            TagCategory::EscapableRawText
        } else {
            TagCategory::Normal
        }
    }

    /// Recovers a `TagId` from its serialized ordinal.
    ///
    /// Out-of-range bytes decode as `Custom` rather than panicking --
    /// serialized state arrives from the driver's own buffer and should
    /// never be trusted further than that.
    pub fn from_u8(byte: u8) -> TagId {
        *TAG_ID_TABLE.get(byte as usize).unwrap_or(&TagId::Custom)
    }
}

impl TagCategory {
    pub fn has_raw_text_content(self) -> bool {
        matches!(self, TagCategory::RawText | TagCategory::EscapableRawText)
    }
}

static TAG_ID_TABLE: &[TagId] = &[
    TagId::Area,
    TagId::Base,
    TagId::Br,
    TagId::Col,
    TagId::Embed,
    TagId::Hr,
    TagId::Img,
    TagId::Input,
    TagId::Link,
    TagId::Meta,
    TagId::Source,
    TagId::Track,
    TagId::Wbr,
    TagId::Script,
    TagId::Style,
    TagId::Textarea,
    TagId::Title,
    TagId::Template,
    TagId::A,
    TagId::Abbr,
    TagId::Address,
    TagId::Article,
    TagId::Aside,
    TagId::Audio,
    TagId::B,
    TagId::Bdi,
    TagId::Bdo,
    TagId::Blockquote,
    TagId::Body,
    TagId::Button,
    TagId::Canvas,
    TagId::Caption,
    TagId::Cite,
    TagId::Code,
    TagId::Colgroup,
    TagId::Data,
    TagId::Datalist,
    TagId::Dd,
    TagId::Del,
    TagId::Details,
    TagId::Dfn,
    TagId::Dialog,
    TagId::Div,
    TagId::Dl,
    TagId::Dt,
    TagId::Em,
    TagId::Fieldset,
    TagId::Figcaption,
    TagId::Figure,
    TagId::Footer,
    TagId::Form,
    TagId::H1,
    TagId::H2,
    TagId::H3,
    TagId::H4,
    TagId::H5,
    TagId::H6,
    TagId::Head,
    TagId::Header,
    TagId::Hgroup,
    TagId::Html,
    TagId::I,
    TagId::Iframe,
    TagId::Ins,
    TagId::Kbd,
    TagId::Label,
    TagId::Legend,
    TagId::Li,
    TagId::Main,
    TagId::Map,
    TagId::Mark,
    TagId::Math,
    TagId::Menu,
    TagId::Meter,
    TagId::Nav,
    TagId::Noscript,
    TagId::Object,
    TagId::Ol,
    TagId::Optgroup,
    TagId::Option,
    TagId::Output,
    TagId::P,
    TagId::Picture,
    TagId::Pre,
    TagId::Progress,
    TagId::Q,
    TagId::Rb,
    TagId::Rp,
    TagId::Rt,
    TagId::Rtc,
    TagId::Ruby,
    TagId::S,
    TagId::Samp,
    TagId::Search,
    TagId::Section,
    TagId::Select,
    TagId::Slot,
    TagId::Small,
    TagId::Span,
    TagId::Strong,
    TagId::Sub,
    TagId::Summary,
    TagId::Sup,
    TagId::Svg,
    TagId::Table,
    TagId::Tbody,
    TagId::Td,
    TagId::Tfoot,
    TagId::Th,
    TagId::Thead,
    TagId::Time,
    TagId::Tr,
    TagId::U,
    TagId::Ul,
    TagId::Var,
    TagId::Video,
];

struct CatalogueEntry {
    name: &'static str,
    id: TagId,
}

/// The catalogue, physically sorted by first letter so [`BUCKETS`] can slice
/// it into contiguous per-letter ranges.
static CATALOGUE: &[CatalogueEntry] = &[
    CatalogueEntry { name: "AREA", id: TagId::Area },
    CatalogueEntry { name: "A", id: TagId::A },
    CatalogueEntry { name: "ABBR", id: TagId::Abbr },
    CatalogueEntry { name: "ADDRESS", id: TagId::Address },
    CatalogueEntry { name: "ARTICLE", id: TagId::Article },
    CatalogueEntry { name: "ASIDE", id: TagId::Aside },
    CatalogueEntry { name: "AUDIO", id: TagId::Audio },
    CatalogueEntry { name: "BASE", id: TagId::Base },
    CatalogueEntry { name: "BR", id: TagId::Br },
    CatalogueEntry { name: "B", id: TagId::B },
    CatalogueEntry { name: "BDI", id: TagId::Bdi },
    CatalogueEntry { name: "BDO", id: TagId::Bdo },
    CatalogueEntry { name: "BLOCKQUOTE", id: TagId::Blockquote },
    CatalogueEntry { name: "BODY", id: TagId::Body },
    CatalogueEntry { name: "BUTTON", id: TagId::Button },
    CatalogueEntry { name: "COL", id: TagId::Col },
    CatalogueEntry { name: "CANVAS", id: TagId::Canvas },
    CatalogueEntry { name: "CAPTION", id: TagId::Caption },
    CatalogueEntry { name: "CITE", id: TagId::Cite },
    CatalogueEntry { name: "CODE", id: TagId::Code },
    CatalogueEntry { name: "COLGROUP", id: TagId::Colgroup },
    CatalogueEntry { name: "DATA", id: TagId::Data },
    CatalogueEntry { name: "DATALIST", id: TagId::Datalist },
    CatalogueEntry { name: "DD", id: TagId::Dd },
    CatalogueEntry { name: "DEL", id: TagId::Del },
    CatalogueEntry { name: "DETAILS", id: TagId::Details },
    CatalogueEntry { name: "DFN", id: TagId::Dfn },
    CatalogueEntry { name: "DIALOG", id: TagId::Dialog },
    CatalogueEntry { name: "DIV", id: TagId::Div },
    CatalogueEntry { name: "DL", id: TagId::Dl },
    CatalogueEntry { name: "DT", id: TagId::Dt },
    CatalogueEntry { name: "EMBED", id: TagId::Embed },
    CatalogueEntry { name: "EM", id: TagId::Em },
    CatalogueEntry { name: "FIELDSET", id: TagId::Fieldset },
    CatalogueEntry { name: "FIGCAPTION", id: TagId::Figcaption },
    CatalogueEntry { name: "FIGURE", id: TagId::Figure },
    CatalogueEntry { name: "FOOTER", id: TagId::Footer },
    CatalogueEntry { name: "FORM", id: TagId::Form },
    CatalogueEntry { name: "HR", id: TagId::Hr },
    CatalogueEntry { name: "H1", id: TagId::H1 },
    CatalogueEntry { name: "H2", id: TagId::H2 },
    CatalogueEntry { name: "H3", id: TagId::H3 },
    CatalogueEntry { name: "H4", id: TagId::H4 },
    CatalogueEntry { name: "H5", id: TagId::H5 },
    CatalogueEntry { name: "H6", id: TagId::H6 },
    CatalogueEntry { name: "HEAD", id: TagId::Head },
    CatalogueEntry { name: "HEADER", id: TagId::Header },
    CatalogueEntry { name: "HGROUP", id: TagId::Hgroup },
    CatalogueEntry { name: "HTML", id: TagId::Html },
    CatalogueEntry { name: "IMG", id: TagId::Img },
    CatalogueEntry { name: "INPUT", id: TagId::Input },
    CatalogueEntry { name: "I", id: TagId::I },
    CatalogueEntry { name: "IFRAME", id: TagId::Iframe },
    CatalogueEntry { name: "INS", id: TagId::Ins },
    CatalogueEntry { name: "KBD", id: TagId::Kbd },
    CatalogueEntry { name: "LINK", id: TagId::Link },
    CatalogueEntry { name: "LABEL", id: TagId::Label },
    CatalogueEntry { name: "LEGEND", id: TagId::Legend },
    CatalogueEntry { name: "LI", id: TagId::Li },
    CatalogueEntry { name: "META", id: TagId::Meta },
    CatalogueEntry { name: "MAIN", id: TagId::Main },
    CatalogueEntry { name: "MAP", id: TagId::Map },
    CatalogueEntry { name: "MARK", id: TagId::Mark },
    CatalogueEntry { name: "MATH", id: TagId::Math },
    CatalogueEntry { name: "MENU", id: TagId::Menu },
    CatalogueEntry { name: "METER", id: TagId::Meter },
    CatalogueEntry { name: "NAV", id: TagId::Nav },
    CatalogueEntry { name: "NOSCRIPT", id: TagId::Noscript },
    CatalogueEntry { name: "OBJECT", id: TagId::Object },
    CatalogueEntry { name: "OL", id: TagId::Ol },
    CatalogueEntry { name: "OPTGROUP", id: TagId::Optgroup },
    CatalogueEntry { name: "OPTION", id: TagId::Option },
    CatalogueEntry { name: "OUTPUT", id: TagId::Output },
    CatalogueEntry { name: "P", id: TagId::P },
    CatalogueEntry { name: "PICTURE", id: TagId::Picture },
    CatalogueEntry { name: "PRE", id: TagId::Pre },
    CatalogueEntry { name: "PROGRESS", id: TagId::Progress },
    CatalogueEntry { name: "Q", id: TagId::Q },
    CatalogueEntry { name: "RB", id: TagId::Rb },
    CatalogueEntry { name: "RP", id: TagId::Rp },
    CatalogueEntry { name: "RT", id: TagId::Rt },
    CatalogueEntry { name: "RTC", id: TagId::Rtc },
    CatalogueEntry { name: "RUBY", id: TagId::Ruby },
    CatalogueEntry { name: "SOURCE", id: TagId::Source },
    CatalogueEntry { name: "SCRIPT", id: TagId::Script },
    CatalogueEntry { name: "STYLE", id: TagId::Style },
    CatalogueEntry { name: "S", id: TagId::S },
    CatalogueEntry { name: "SAMP", id: TagId::Samp },
    CatalogueEntry { name: "SEARCH", id: TagId::Search },
    CatalogueEntry { name: "SECTION", id: TagId::Section },
    CatalogueEntry { name: "SELECT", id: TagId::Select },
    CatalogueEntry { name: "SLOT", id: TagId::Slot },
    CatalogueEntry { name: "SMALL", id: TagId::Small },
    CatalogueEntry { name: "SPAN", id: TagId::Span },
    CatalogueEntry { name: "STRONG", id: TagId::Strong },
    CatalogueEntry { name: "SUB", id: TagId::Sub },
    CatalogueEntry { name: "SUMMARY", id: TagId::Summary },
    CatalogueEntry { name: "SUP", id: TagId::Sup },
    CatalogueEntry { name: "SVG", id: TagId::Svg },
    CatalogueEntry { name: "TRACK", id: TagId::Track },
    CatalogueEntry { name: "TEXTAREA", id: TagId::Textarea },
    CatalogueEntry { name: "TITLE", id: TagId::Title },
    CatalogueEntry { name: "TEMPLATE", id: TagId::Template },
    CatalogueEntry { name: "TABLE", id: TagId::Table },
    CatalogueEntry { name: "TBODY", id: TagId::Tbody },
    CatalogueEntry { name: "TD", id: TagId::Td },
    CatalogueEntry { name: "TFOOT", id: TagId::Tfoot },
    CatalogueEntry { name: "TH", id: TagId::Th },
    CatalogueEntry { name: "THEAD", id: TagId::Thead },
    CatalogueEntry { name: "TIME", id: TagId::Time },
    CatalogueEntry { name: "TR", id: TagId::Tr },
    CatalogueEntry { name: "U", id: TagId::U },
    CatalogueEntry { name: "UL", id: TagId::Ul },
    CatalogueEntry { name: "VAR", id: TagId::Var },
    CatalogueEntry { name: "VIDEO", id: TagId::Video },
    CatalogueEntry { name: "WBR", id: TagId::Wbr },
];

/// `[start, end)` into [`CATALOGUE`] for each letter `'A'..='Z'`.
static BUCKETS: [(u16, u16); 26] = build_buckets();

const fn build_buckets() -> [(u16, u16); 26] {
    let mut buckets = [(0u16, 0u16); 26];
    let mut letter = 0usize;
    let mut cursor = 0usize;
    while letter < 26 {
        let start = cursor;
        while cursor < CATALOGUE.len()
            && CATALOGUE[cursor].name.as_bytes()[0] as usize == b'A' as usize + letter
        {
            cursor += 1;
        }
        buckets[letter] = (start as u16, cursor as u16);
        letter += 1;
    }
    buckets
}

/// Classifies an ASCII-uppercased tag name.
///
/// `Custom` covers an empty name, a name longer than 10 bytes, a name not
/// starting with an ASCII letter, a hyphenated name (the custom-element
/// convention), and anything absent from the catalogue.
pub fn classify(name: &[u8]) -> TagId {
    if name.is_empty() || name.len() > 10 {
        return TagId::Custom;
    }
    let first = name[0];
    if !first.is_ascii_uppercase() {
        return TagId::Custom;
    }
    if name.contains(&b'-') {
        return TagId::Custom;
    }
    let (start, end) = BUCKETS[(first - b'A') as usize];
    for entry in &CATALOGUE[start as usize..end as usize] {
        if entry.name.as_bytes() == name {
            return entry.id;
        }
    }
    TagId::Custom
}

/// An entry on the open-element stack.
///
/// `custom_name` is populated only when `id == TagId::Custom`, holding the
/// ASCII-uppercased source text so two custom tags can be told apart; it is
/// also used, as a sanctioned exception to that invariant, for the
/// placeholder entries [`deserialize`](crate::html::HtmlScanner::deserialize)
/// pads truncated stacks with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub custom_name: Option<Box<str>>,
}

impl Tag {
    /// Builds a `Tag` from an already ASCII-uppercased name.
    pub fn from_name(name: &str) -> Tag {
        let id = classify(name.as_bytes());
        let custom_name = if id == TagId::Custom {
            Some(name.to_string().into_boxed_str())
        } else {
            None
        };
        Tag { id, custom_name }
    }

    pub fn category(&self) -> TagCategory {
        self.id.category()
    }

    /// A depth-filler used when [`HtmlScanner::deserialize`](crate::html::HtmlScanner::deserialize)
    /// runs out of serialized tags before it runs out of declared depth.
    pub fn placeholder() -> Tag {
        Tag { id: TagId::Custom, custom_name: None }
    }
}

const P_CLOSING_SET: &[TagId] = &[
    TagId::Address,
    TagId::Article,
    TagId::Aside,
    TagId::Blockquote,
    TagId::Details,
    TagId::Div,
    TagId::Dl,
    TagId::Fieldset,
    TagId::Figcaption,
    TagId::Figure,
    TagId::Footer,
    TagId::Form,
    TagId::H1,
    TagId::H2,
    TagId::H3,
    TagId::H4,
    TagId::H5,
    TagId::H6,
    TagId::Header,
    TagId::Hgroup,
    TagId::Hr,
    TagId::Main,
    TagId::Menu,
    TagId::Nav,
    TagId::Ol,
    TagId::P,
    TagId::Pre,
    TagId::Section,
    TagId::Table,
    TagId::Ul,
];

/// Whether `parent`, left open, may legally contain a newly-opened `child`
/// without first being closed implicitly.
///
/// Implements the handful of WHATWG §13.2.6.4 "close an element" special
/// cases the scanner needs; every combination not named here returns `true`.
pub fn can_contain(parent: TagId, child: TagId) -> bool {
    match parent {
        TagId::P => !P_CLOSING_SET.contains(&child),
        TagId::Li => child != TagId::Li,
        TagId::Dt => !matches!(child, TagId::Dt | TagId::Dd),
        TagId::Dd => !matches!(child, TagId::Dt | TagId::Dd),
        TagId::Tr => !matches!(child, TagId::Tr | TagId::Thead | TagId::Tbody | TagId::Tfoot),
        TagId::Td | TagId::Th => !matches!(
            child,
            TagId::Td | TagId::Th | TagId::Tr | TagId::Thead | TagId::Tbody | TagId::Tfoot
        ),
        TagId::Thead | TagId::Tbody | TagId::Tfoot => {
            !matches!(child, TagId::Thead | TagId::Tbody | TagId::Tfoot)
        }
        TagId::Caption => !matches!(
            child,
            TagId::Thead | TagId::Tbody | TagId::Tfoot | TagId::Tr | TagId::Td | TagId::Th | TagId::Colgroup
        ),
        TagId::Rb | TagId::Rt | TagId::Rp | TagId::Rtc => {
            !matches!(child, TagId::Rb | TagId::Rt | TagId::Rp | TagId::Rtc)
        }
        TagId::Optgroup => child != TagId::Optgroup,
        TagId::Option => !matches!(child, TagId::Option | TagId::Optgroup),
        TagId::Colgroup => matches!(child, TagId::Col | TagId::Template),
        TagId::Head => child != TagId::Body,
        _ => true,
    }
}
