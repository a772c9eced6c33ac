use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::{debug, trace};

use super::null_as_default;
use crate::domain::listing::Listing;
use crate::error::{FundaError, Result, parse_absolute_url};

/// `Section` of the photo gallery node, which carries no label/value lines.
const PHOTO_SECTION: i64 = 3;

pub const DEFAULT_MAX_TREE_DEPTH: usize = 64;

/// Nested lines are kept as undecoded JSON text. Only the walk decodes them,
/// one level at a time, so nesting depth is bounded by the walk's own limit
/// and not by the JSON parser's recursion limit.
type RawLines = Vec<Box<RawValue>>;

/// Top-level node of a `/Aanbod/Detail/Koop/{id}` response.
#[derive(Debug, Deserialize)]
struct DetailNode {
    #[serde(rename = "URL", default)]
    url: Option<String>,
    #[serde(rename = "Section", default, deserialize_with = "null_as_default")]
    section: i64,
    #[serde(rename = "List", default, deserialize_with = "null_as_default")]
    list: RawLines,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawLine {
    #[serde(default, deserialize_with = "null_as_default")]
    label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    list: RawLines,
}

/// One labeled line of the detail tree, without its nested lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailLine {
    pub label: String,
    pub value: String,
    pub text: String,
}

impl DetailLine {
    #[cfg(test)]
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Decode one line and hand back its nested lines still undecoded. A
    /// `null` line is an empty one.
    fn decode(raw: &RawValue) -> Result<(Self, RawLines)> {
        let RawLine {
            label,
            value,
            text,
            list,
        } = serde_json::from_str::<Option<RawLine>>(raw.get())?.unwrap_or_default();
        Ok((Self { label, value, text }, list))
    }
}

type FieldSetter = fn(&mut Listing, &DetailLine);

/// Detail labels that map onto listing fields. Labels not listed here are
/// ignored so new API fields never break parsing.
const LABEL_SETTERS: [(&str, FieldSetter); 3] = [
    ("Vraagprijs", |listing, line| {
        listing.price.clone_from(&line.value);
    }),
    ("Wonen (= woonoppervlakte)", |listing, line| {
        listing.surface_area.clone_from(&line.value);
    }),
    ("Aantal kamers", |listing, line| {
        listing.rooms.clone_from(&line.value);
    }),
];

static FIELD_SETTERS: LazyLock<HashMap<&'static str, FieldSetter>> =
    LazyLock::new(|| HashMap::from(LABEL_SETTERS));

/// Apply one line's label to the listing. Returns whether a field was set.
fn apply_line(listing: &mut Listing, line: &DetailLine) -> bool {
    let Some(set) = FIELD_SETTERS.get(line.label.as_str()) else {
        return false;
    };
    trace!(label = %line.label, "Applying detail line");
    set(listing, line);
    true
}

/// A `null` body decodes as a tree without nodes.
fn decode_nodes(payload: &[u8]) -> Result<Vec<DetailNode>> {
    Ok(serde_json::from_slice::<Option<Vec<DetailNode>>>(payload)?.unwrap_or_default())
}

/// Walks detail trees and copies known labels onto a [`Listing`].
///
/// Holds configuration only, so one instance can serve any number of
/// listings concurrently.
#[derive(Debug, Clone, Copy)]
pub struct DetailTreeFlattener {
    max_depth: usize,
}

impl Default for DetailTreeFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TREE_DEPTH)
    }
}

impl DetailTreeFlattener {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Fill in the canonical URL, price, surface area and room count of
    /// `listing` from a detail response body.
    ///
    /// A node carrying a URL overwrites any URL seen before it. When a label
    /// occurs more than once, the occurrence visited last wins.
    pub fn populate(&self, listing: &mut Listing, payload: &[u8]) -> Result<()> {
        let mut applied = 0usize;

        for node in decode_nodes(payload)? {
            if let Some(ref url) = node.url
                && !url.is_empty()
            {
                listing.url = Some(parse_absolute_url(url)?);
            }
            if node.section == PHOTO_SECTION {
                continue;
            }
            self.walk(node.list, &mut |line| {
                if apply_line(listing, &line) {
                    applied += 1;
                }
            })?;
        }

        debug!(id = listing.id, applied, "Populated listing details");
        Ok(())
    }

    /// Every line of a detail response in traversal order, photo gallery
    /// sections excluded.
    pub fn flatten_lines(&self, payload: &[u8]) -> Result<Vec<DetailLine>> {
        let mut lines = Vec::new();
        for node in decode_nodes(payload)?
            .into_iter()
            .filter(|n| n.section != PHOTO_SECTION)
        {
            self.walk(node.list, &mut |line| lines.push(line))?;
        }
        Ok(lines)
    }

    /// Depth-first walk over `roots` and everything nested below them. A line
    /// is emitted after all of its nested lines, so the emit order matches a
    /// recursive "children first, then self" visit.
    fn walk(&self, roots: RawLines, emit: &mut dyn FnMut(DetailLine)) -> Result<()> {
        struct Frame {
            line: DetailLine,
            pending: std::vec::IntoIter<Box<RawValue>>,
        }

        impl Frame {
            fn new((line, nested): (DetailLine, RawLines)) -> Self {
                Self {
                    line,
                    pending: nested.into_iter(),
                }
            }
        }

        for raw in roots {
            let mut stack = vec![Frame::new(DetailLine::decode(&raw)?)];

            while let Some(frame) = stack.last_mut() {
                if let Some(child) = frame.pending.next() {
                    let child = DetailLine::decode(&child)?;
                    if stack.len() >= self.max_depth {
                        return Err(FundaError::TreeTooDeep {
                            limit: self.max_depth,
                        });
                    }
                    stack.push(Frame::new(child));
                } else if let Some(done) = stack.pop() {
                    emit(done.line);
                }
            }
        }

        Ok(())
    }
}
