use crate::extract::ExtractError;
use crate::extract::ExtractError::InvalidParameter;
use crate::spreadsheet::Position;
use std::collections::HashMap;

/// Look-ahead used when none is configured: a label may sit one blank row down.
pub const DEFAULT_MAX_RANGE: usize = 2;

/// Everything needed to find and scan one table (or every repetition of it).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOptions {
    /// Anchor label to search for; empty means explicit coordinates.
    pub label: String,
    /// Header column used when `label` is empty.
    pub header_column: usize,
    /// Header row used when `label` is empty.
    pub header_row: usize,
    /// Rows a single header may span before the scan gives up.
    pub max_range: usize,
    /// Maximum headers to collect, 0 for no limit.
    pub header_limit: usize,
    /// Rows between an anchor label and its first header.
    pub bottom_offset: usize,
    /// An absent anchor yields no records instead of an error.
    pub optional: bool,
    /// Extract every occurrence of `label`.
    pub iterate: bool,
    /// Next-occurrence searches skip the rest of the anchor's row.
    pub search_forward_only: bool,
    /// Header text that ends the header list.
    pub terminate_label: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            header_column: 0,
            header_row: 0,
            max_range: DEFAULT_MAX_RANGE,
            header_limit: 0,
            bottom_offset: 0,
            optional: false,
            iterate: false,
            search_forward_only: false,
            terminate_label: None,
        }
    }
}

impl TableOptions {
    /// A table found by searching for its anchor label.
    pub fn labelled(label: &str) -> Self {
        Self {
            label: label.to_owned(),
            ..Self::default()
        }
    }

    /// A table whose header list starts at explicit coordinates.
    pub fn at(header_column: usize, header_row: usize) -> Self {
        Self {
            header_column,
            header_row,
            ..Self::default()
        }
    }

    pub fn with_max_range(mut self, max_range: usize) -> Self {
        self.max_range = max_range;
        self
    }

    pub fn with_header_limit(mut self, header_limit: usize) -> Self {
        self.header_limit = header_limit;
        self
    }

    pub fn with_bottom_offset(mut self, bottom_offset: usize) -> Self {
        self.bottom_offset = bottom_offset;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn iterate(mut self) -> Self {
        self.iterate = true;
        self
    }

    pub fn search_forward_only(mut self) -> Self {
        self.search_forward_only = true;
        self
    }

    pub fn with_terminate_label(mut self, label: &str) -> Self {
        self.terminate_label = Some(label.to_owned());
        self
    }

    /// Explicit header origin, when the table is not located by label.
    pub fn explicit_origin(&self) -> Option<Position> {
        if self.label.trim().is_empty() {
            Some(Position::new(self.header_column, self.header_row))
        } else {
            None
        }
    }
}

// Named parameter handling

/// A string-valued named parameter that configures [`TableOptions`].
pub trait NamedParam<T> {
    /// Returns the parameter name as written by callers
    fn name() -> &'static str;

    /// Parses the raw parameter text
    fn parse(value: &str) -> Result<T, ExtractError>;

    /// Reads the parameter if present.
    fn read(params: &HashMap<String, String>) -> Result<Option<T>, ExtractError> {
        params.get(Self::name()).map(|value| Self::parse(value)).transpose()
    }

    fn invalid(message: String) -> ExtractError {
        InvalidParameter {
            name: Self::name().to_owned(),
            message,
        }
    }
}

struct LabelParam;
struct AnchorParam;
struct MaxRangeParam;
struct HeaderLimitParam;
struct BottomOffsetParam;
struct OptionalParam;
struct IterateParam;
struct ForwardOnlyParam;
struct TerminateLabelParam;

fn parse_count<P: NamedParam<usize>>(value: &str) -> Result<usize, ExtractError> {
    value
        .trim()
        .parse()
        .map_err(|_| P::invalid(format!("'{value}' is not a non-negative integer")))
}

fn parse_flag<P: NamedParam<bool>>(value: &str) -> Result<bool, ExtractError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(P::invalid(format!("'{value}' is not a boolean"))),
    }
}

fn parse_text<P: NamedParam<String>>(value: &str) -> Result<String, ExtractError> {
    let value = value.trim();
    if value.is_empty() {
        Err(P::invalid("must not be empty".to_owned()))
    } else {
        Ok(value.to_owned())
    }
}

impl NamedParam<String> for LabelParam {
    fn name() -> &'static str {
        "label"
    }

    fn parse(value: &str) -> Result<String, ExtractError> {
        parse_text::<Self>(value)
    }
}

impl NamedParam<Position> for AnchorParam {
    fn name() -> &'static str {
        "anchor"
    }

    fn parse(value: &str) -> Result<Position, ExtractError> {
        Position::try_from(value).map_err(|_| Self::invalid(format!("'{value}' is not a cell reference")))
    }
}

impl NamedParam<usize> for MaxRangeParam {
    fn name() -> &'static str {
        "max_range"
    }

    fn parse(value: &str) -> Result<usize, ExtractError> {
        match parse_count::<Self>(value)? {
            0 => Err(Self::invalid("must be at least 1".to_owned())),
            max_range => Ok(max_range),
        }
    }
}

impl NamedParam<usize> for HeaderLimitParam {
    fn name() -> &'static str {
        "header_limit"
    }

    fn parse(value: &str) -> Result<usize, ExtractError> {
        parse_count::<Self>(value)
    }
}

impl NamedParam<usize> for BottomOffsetParam {
    fn name() -> &'static str {
        "bottom_offset"
    }

    fn parse(value: &str) -> Result<usize, ExtractError> {
        parse_count::<Self>(value)
    }
}

impl NamedParam<bool> for OptionalParam {
    fn name() -> &'static str {
        "optional"
    }

    fn parse(value: &str) -> Result<bool, ExtractError> {
        parse_flag::<Self>(value)
    }
}

impl NamedParam<bool> for IterateParam {
    fn name() -> &'static str {
        "iterate"
    }

    fn parse(value: &str) -> Result<bool, ExtractError> {
        parse_flag::<Self>(value)
    }
}

impl NamedParam<bool> for ForwardOnlyParam {
    fn name() -> &'static str {
        "forward_only"
    }

    fn parse(value: &str) -> Result<bool, ExtractError> {
        parse_flag::<Self>(value)
    }
}

impl NamedParam<String> for TerminateLabelParam {
    fn name() -> &'static str {
        "terminate_label"
    }

    fn parse(value: &str) -> Result<String, ExtractError> {
        parse_text::<Self>(value)
    }
}

const KNOWN_PARAMS: [&str; 9] = [
    "label",
    "anchor",
    "max_range",
    "header_limit",
    "bottom_offset",
    "optional",
    "iterate",
    "forward_only",
    "terminate_label",
];

impl TryFrom<&HashMap<String, String>> for TableOptions {
    type Error = ExtractError;

    /// Builds options from named parameters; absent ones keep their defaults.
    fn try_from(params: &HashMap<String, String>) -> Result<Self, Self::Error> {
        if let Some(unknown) = params.keys().find(|name| !KNOWN_PARAMS.contains(&name.as_str())) {
            return Err(InvalidParameter {
                name: unknown.to_owned(),
                message: "unknown parameter".to_owned(),
            });
        }

        let mut options = TableOptions::default();
        match (LabelParam::read(params)?, AnchorParam::read(params)?) {
            (Some(_), Some(_)) => {
                return Err(AnchorParam::invalid("cannot be combined with 'label'".to_owned()));
            }
            (Some(label), None) => options.label = label,
            (None, Some(anchor)) => {
                options.header_column = anchor.column;
                options.header_row = anchor.row;
            }
            (None, None) => (),
        }
        if let Some(max_range) = MaxRangeParam::read(params)? {
            options.max_range = max_range;
        }
        if let Some(header_limit) = HeaderLimitParam::read(params)? {
            options.header_limit = header_limit;
        }
        if let Some(bottom_offset) = BottomOffsetParam::read(params)? {
            options.bottom_offset = bottom_offset;
        }
        options.optional = OptionalParam::read(params)?.unwrap_or(false);
        options.iterate = IterateParam::read(params)?.unwrap_or(false);
        options.search_forward_only = ForwardOnlyParam::read(params)?.unwrap_or(false);
        options.terminate_label = TerminateLabelParam::read(params)?;
        Ok(options)
    }
}
