//! Frontmatter parsing for hookify rule files.
//!
//! Rule files are markdown documents with a `---` delimited metadata block:
//!
//! ```markdown
//! ---
//! name: warn-console-log
//! event: file
//! conditions:
//!   - field: new_text
//!     operator: contains
//!     pattern: console.log
//! ---
//!
//! Remove debug logging before committing.
//! ```
//!
//! The metadata block is not general YAML. It supports exactly scalar keys
//! (with `true`/`false` coerced to booleans), flat lists of scalars, and flat
//! lists of maps written either inline (`- a: 1, b: 2`) or across several
//! indented lines. Anything nested deeper is ignored.
//!
//! # Scanner transitions
//!
//! The metadata block is scanned line by line. Blank lines and `#` comments
//! are skipped in every state.
//!
//! | From         | Line                           | To           | Effect                                   |
//! |--------------|--------------------------------|--------------|------------------------------------------|
//! | `Ground`     | `key: value`                   | `Ground`     | store coerced scalar                     |
//! | `Ground`     | `key:`                         | `InList`     | open a list under `key`                  |
//! | `Ground`     | `- item`                       | `Ground`     | ignored                                  |
//! | `InList`     | `- scalar`                     | `InList`     | push scalar                              |
//! | `InList`     | `- a: 1, b: 2`                 | `InList`     | push inline map                          |
//! | `InList`     | `- a: 1`                       | `InDictItem` | seed pending map                         |
//! | `InList`     | `key: value` / `key:`          | as `Ground`  | flush list first                         |
//! | `InDictItem` | `k: v` indented more than 2    | `InDictItem` | add pair to pending map                  |
//! | `InDictItem` | `- ...`                        | as `InList`  | flush pending map first                  |
//! | `InDictItem` | `key: value` / `key:`          | as `Ground`  | flush pending map and list first         |
//! | `InList`, `InDictItem` | end of input         | done         | flush pending map and list               |

use std::collections::BTreeMap;

/// The frontmatter delimiter.
pub const DELIMITER: &str = "---";

/// Continuation lines of a multi-line list map must be indented strictly
/// more than this many columns.
const CONTINUATION_INDENT: usize = 2;

/// One entry of a frontmatter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListItem {
    /// A plain scalar item (`- Bash`).
    Scalar(String),
    /// A flat map item (`- field: command`).
    Map(BTreeMap<String, String>),
}

impl ListItem {
    /// Returns the map if this item is one.
    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            ListItem::Map(map) => Some(map),
            ListItem::Scalar(_) => None,
        }
    }
}

/// A value stored under a top-level frontmatter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// A string scalar with one layer of quotes removed.
    Scalar(String),
    /// A `true`/`false` scalar (case-insensitive).
    Bool(bool),
    /// A list opened by a key with no inline value.
    List(Vec<ListItem>),
}

impl MetaValue {
    /// Returns the string scalar, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetaValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            MetaValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[ListItem]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Parsed metadata block of a rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: BTreeMap<String, MetaValue>,
}

impl Frontmatter {
    /// Create an empty metadata document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.get(key)
    }

    /// Insert or replace a top-level key.
    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.entries.insert(key.into(), value);
    }

    /// True when no key was parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A rule file split into metadata and message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// The parsed metadata (empty when the file has no frontmatter).
    pub metadata: Frontmatter,
    /// The message body following the metadata block.
    pub body: String,
}

impl ParsedDocument {
    fn without_frontmatter(content: &str) -> Self {
        Self {
            metadata: Frontmatter::new(),
            body: content.to_string(),
        }
    }
}

/// Split a rule file into its metadata block and message body.
///
/// Text that does not start with `---`, or that has no closing delimiter,
/// yields empty metadata and the whole text as body. Never fails: an empty
/// result is how callers detect a malformed file.
pub fn parse_document(content: &str) -> ParsedDocument {
    if !content.starts_with(DELIMITER) {
        return ParsedDocument::without_frontmatter(content);
    }

    // Segment one is the empty text before the opening delimiter; everything
    // after the second delimiter is body, further delimiters included.
    let mut segments = content.splitn(3, DELIMITER);
    let (Some(_), Some(metadata), Some(body)) = (segments.next(), segments.next(), segments.next())
    else {
        return ParsedDocument::without_frontmatter(content);
    };

    ParsedDocument {
        metadata: parse_metadata(metadata),
        body: body.trim().to_string(),
    }
}

/// Parse the text between the delimiters into a metadata document.
pub fn parse_metadata(text: &str) -> Frontmatter {
    let mut scanner = Scanner::default();
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

/// Scanner state while walking the metadata block.
#[derive(Debug, Default)]
enum ScanState {
    /// Between top-level keys.
    #[default]
    Ground,
    /// Collecting items of the list opened by `key:`.
    InList { key: String, items: Vec<ListItem> },
    /// Collecting the lines of a multi-line map item inside a list.
    InDictItem {
        key: String,
        items: Vec<ListItem>,
        pending: BTreeMap<String, String>,
    },
}

#[derive(Debug, Default)]
struct Scanner {
    metadata: Frontmatter,
    state: ScanState,
}

impl Scanner {
    fn feed(&mut self, line: &str) {
        let stripped = line.trim();
        if stripped.is_empty() || stripped.starts_with('#') {
            return;
        }

        let indent = line.len() - line.trim_start().len();

        if indent == 0 && line.contains(':') && !stripped.starts_with('-') {
            self.top_level_key(line);
        } else if stripped.starts_with('-') && self.in_list() {
            self.list_item(stripped);
        } else if indent > CONTINUATION_INDENT && stripped.contains(':') {
            self.dict_continuation(stripped);
        }
    }

    fn finish(mut self) -> Frontmatter {
        self.flush_list();
        self.metadata
    }

    fn in_list(&self) -> bool {
        !matches!(self.state, ScanState::Ground)
    }

    fn top_level_key(&mut self, line: &str) {
        self.flush_list();

        let Some((key, value)) = line.split_once(':') else {
            return;
        };
        let key = key.trim().to_string();
        let value = value.trim();

        if value.is_empty() {
            self.state = ScanState::InList {
                key,
                items: Vec::new(),
            };
        } else {
            self.metadata.insert(key, coerce_scalar(value));
        }
    }

    fn list_item(&mut self, stripped: &str) {
        let (key, mut items) = match std::mem::take(&mut self.state) {
            ScanState::Ground => return,
            ScanState::InList { key, items } => (key, items),
            ScanState::InDictItem {
                key,
                mut items,
                pending,
            } => {
                if !pending.is_empty() {
                    items.push(ListItem::Map(pending));
                }
                (key, items)
            }
        };

        let text = stripped[1..].trim();

        if text.contains(':') && text.contains(',') {
            items.push(ListItem::Map(parse_inline_map(text)));
            self.state = ScanState::InList { key, items };
        } else if let Some((k, v)) = split_pair(text) {
            let mut pending = BTreeMap::new();
            pending.insert(k, v);
            self.state = ScanState::InDictItem {
                key,
                items,
                pending,
            };
        } else {
            items.push(ListItem::Scalar(strip_quotes(text).to_string()));
            self.state = ScanState::InList { key, items };
        }
    }

    fn dict_continuation(&mut self, stripped: &str) {
        if let ScanState::InDictItem { pending, .. } = &mut self.state {
            if let Some((k, v)) = split_pair(stripped) {
                pending.insert(k, v);
            }
        }
    }

    fn flush_list(&mut self) {
        match std::mem::take(&mut self.state) {
            ScanState::Ground => {}
            ScanState::InList { key, items } => {
                self.metadata.insert(key, MetaValue::List(items));
            }
            ScanState::InDictItem {
                key,
                mut items,
                pending,
            } => {
                if !pending.is_empty() {
                    items.push(ListItem::Map(pending));
                }
                self.metadata.insert(key, MetaValue::List(items));
            }
        }
    }
}

fn coerce_scalar(value: &str) -> MetaValue {
    let clean = strip_quotes(value);
    if clean.eq_ignore_ascii_case("true") {
        MetaValue::Bool(true)
    } else if clean.eq_ignore_ascii_case("false") {
        MetaValue::Bool(false)
    } else {
        MetaValue::Scalar(clean.to_string())
    }
}

/// `a: 1, b: 2` into a map. Parts without a colon are dropped.
fn parse_inline_map(text: &str) -> BTreeMap<String, String> {
    text.split(',').filter_map(split_pair).collect()
}

/// Split `key: value` on the first colon, trimming and unquoting both sides.
fn split_pair(text: &str) -> Option<(String, String)> {
    let (key, value) = text.split_once(':')?;
    Some((
        strip_quotes(key.trim()).to_string(),
        strip_quotes(value.trim()).to_string(),
    ))
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Remove at most one leading and one trailing quote character.
fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(is_quote).unwrap_or(text);
    text.strip_suffix(is_quote).unwrap_or(text)
}
