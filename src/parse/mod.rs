// src/parse/mod.rs
use tracing::{debug, trace};

use crate::error::{FormatError, ParseError};
use crate::model::NavHierarchy;
use crate::schema::{HeaderLookup, Schema};

/// The feed terminates every line, including the last one, with CRLF.
pub const LINE_BREAK: &str = "\r\n";

/// Block-separator lines in the feed carry a single space. The empty string
/// only appears as the final element produced by the trailing terminator.
const BLANK_SEPARATOR: &str = " ";

/// Scheme-type markers. Any line containing one of these starts a new
/// group, regardless of what else is on it.
pub const SCHEME_TYPE_MARKERS: [&str; 3] =
    ["Close Ended", "Open Ended", "Interval Fund Schemes"];

/// What one line is, judged purely from its literal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    /// The single-space block separator.
    Separator,
    /// A literally empty line. At the final index this is the trailing
    /// terminator's artifact; elsewhere it is a stray blank.
    Empty,
    /// Contains a scheme-type marker.
    GroupHeader,
    /// Anything else: a fund-house name or a delimited data line.
    Text,
}

fn classify(line: &str) -> LineClass {
    if line == BLANK_SEPARATOR {
        LineClass::Separator
    } else if line.is_empty() {
        LineClass::Empty
    } else if SCHEME_TYPE_MARKERS.iter().any(|m| line.contains(m)) {
        LineClass::GroupHeader
    } else {
        LineClass::Text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingGroupHeader,
    AwaitingOrgHeader,
    ReadingRecords,
}

impl State {
    fn describe(self) -> &'static str {
        match self {
            State::AwaitingGroupHeader => "awaiting a scheme-type group header",
            State::AwaitingOrgHeader => "awaiting a fund-house header",
            State::ReadingRecords => "reading fund records",
        }
    }
}

/// Forward-only position over the split line sequence. Never backtracks and
/// never looks ahead.
struct Cursor<'a> {
    lines: Vec<&'a str>,
    index: usize,
}

impl<'a> Cursor<'a> {
    fn new(raw: &'a str) -> Self {
        Self {
            lines: raw.split(LINE_BREAK).collect(),
            index: 0,
        }
    }

    /// Sitting on the last split element (the trailing-terminator artifact
    /// in a well-formed file).
    fn at_final_line(&self) -> bool {
        self.index + 1 == self.lines.len()
    }

    /// Advanced past the last element; only happens when the file ends
    /// mid-structure.
    fn exhausted(&self) -> bool {
        self.index >= self.lines.len()
    }

    fn current(&self) -> &'a str {
        self.lines[self.index]
    }

    fn index(&self) -> usize {
        self.index
    }

    fn advance(&mut self) {
        self.index += 1;
    }
}

/// Single-pass parser for the daily NAV report.
///
/// Walks the line sequence with one forward cursor and an explicit state
/// machine, accumulating a [`NavHierarchy`]. Any schema or structure
/// violation aborts the whole parse; there is no partial result. Each call
/// owns its own cursor and accumulator, so concurrent parses need no
/// coordination.
pub struct NavParser {
    lookup: HeaderLookup,
}

impl NavParser {
    pub fn new(lookup: HeaderLookup) -> Self {
        Self { lookup }
    }

    pub fn parse(&self, raw: &str) -> Result<NavHierarchy, ParseError> {
        let mut cursor = Cursor::new(raw);

        // Line 0 is the header; exactly one separator follows it.
        let schema = Schema::derive(cursor.current(), &self.lookup)?;
        debug!(fields = schema.len(), "derived schema from header line");
        cursor.advance();
        cursor.advance();

        let mut hierarchy = NavHierarchy::default();
        let mut state = State::AwaitingGroupHeader;
        let mut scheme_type = String::new();
        let mut sub_type = String::new();
        let mut fund_house = String::new();

        loop {
            if cursor.exhausted() {
                // No trailing terminator. Ending between groups is a clean
                // finish; ending mid-structure is not.
                return match state {
                    State::AwaitingGroupHeader => Ok(hierarchy),
                    _ => Err(FormatError::UnexpectedEof {
                        line: cursor.index(),
                        reading: state.describe(),
                    }
                    .into()),
                };
            }
            if cursor.at_final_line() {
                break;
            }

            let line = cursor.current();
            match state {
                State::AwaitingGroupHeader => match classify(line) {
                    LineClass::GroupHeader => {
                        let (ty, sub) = split_group_header(line, cursor.index())?;
                        trace!(scheme_type = %ty, sub_type = %sub, "entering group");
                        hierarchy.ensure_group(&ty, &sub);
                        scheme_type = ty;
                        sub_type = sub;
                        cursor.advance(); // group header
                        cursor.advance(); // separator under it
                        state = State::AwaitingOrgHeader;
                    }
                    _ => {
                        return Err(FormatError::ExpectedGroupHeader {
                            line: cursor.index(),
                            text: line.to_string(),
                        }
                        .into())
                    }
                },

                State::AwaitingOrgHeader => match classify(line) {
                    // A new group always wins over a fund-house reading.
                    LineClass::GroupHeader => state = State::AwaitingGroupHeader,
                    _ => {
                        fund_house = line.to_string();
                        hierarchy.ensure_house(&scheme_type, &sub_type, &fund_house);
                        cursor.advance(); // fund-house header
                        cursor.advance(); // separator under it
                        state = State::ReadingRecords;
                    }
                },

                State::ReadingRecords => match classify(line) {
                    LineClass::Separator => {
                        cursor.advance();
                        state = State::AwaitingOrgHeader;
                    }
                    // Stray blank inside a fund-house block.
                    LineClass::Empty => cursor.advance(),
                    _ => {
                        let record = schema.decode(line, cursor.index())?;
                        hierarchy.push(&scheme_type, &sub_type, &fund_house, record);
                        cursor.advance();
                    }
                },
            }
        }

        Ok(hierarchy)
    }
}

/// Parse with the stock AMFI header table.
pub fn parse_nav_file(raw: &str) -> Result<NavHierarchy, ParseError> {
    NavParser::new(HeaderLookup::default()).parse(raw)
}

/// Split `"<scheme type>(<sub-type>)"`. Both parentheses are required.
fn split_group_header(line: &str, line_no: usize) -> Result<(String, String), FormatError> {
    let malformed = || FormatError::MalformedGroupHeader {
        line: line_no,
        text: line.to_string(),
    };
    let (scheme_type, rest) = line.split_once('(').ok_or_else(malformed)?;
    let sub_type = rest.strip_suffix(')').ok_or_else(malformed)?;
    Ok((scheme_type.to_string(), sub_type.to_string()))
}
