use crate::conf;
use crate::filter::clause::Clauses;
use crate::filter::codec;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// 排序方向
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Dir {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

impl Dir {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dir::Asc => "ASC",
            Dir::Desc => "DESC",
        }
    }

    pub fn parse(s: &str) -> Dir {
        if s.trim().eq_ignore_ascii_case("asc") {
            Dir::Asc
        } else {
            Dir::Desc
        }
    }
}

impl Default for Dir {
    fn default() -> Self {
        Dir::parse(&conf::setup().read().map(|s| s.query.default_dir.clone()).unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Dir {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Dir::parse(&s))
    }
}

/// Enumerated shape of the response a list endpoint should produce.
/// Travels as a number on the wire (`type=1`), and query-string parsers
/// hand it over as a numeric string, so both forms deserialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Grid,
    Selection,
    Hierarchical,
    SimpleAll,
    Autocomplete,
    AutocompleteSimple,
}

impl RequestKind {
    pub fn code(&self) -> u8 {
        match self {
            RequestKind::Grid => 1,
            RequestKind::Selection => 2,
            RequestKind::Hierarchical => 3,
            RequestKind::SimpleAll => 4,
            RequestKind::Autocomplete => 5,
            RequestKind::AutocompleteSimple => 6,
        }
    }

    pub fn from_code(code: u8) -> Option<RequestKind> {
        match code {
            1 => Some(RequestKind::Grid),
            2 => Some(RequestKind::Selection),
            3 => Some(RequestKind::Hierarchical),
            4 => Some(RequestKind::SimpleAll),
            5 => Some(RequestKind::Autocomplete),
            6 => Some(RequestKind::AutocompleteSimple),
            _ => None,
        }
    }
}

impl Default for RequestKind {
    fn default() -> Self {
        RequestKind::Grid
    }
}

impl Serialize for RequestKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for RequestKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrString {
            Number(u8),
            Text(String),
        }

        let code = match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => n,
            NumberOrString::Text(s) => s.trim().parse::<u8>().map_err(de::Error::custom)?,
        };
        RequestKind::from_code(code).ok_or_else(|| de::Error::custom(format!("unknown request kind: {}", code)))
    }
}

/// 列表请求信封
///
/// The uniform input to every list-style read endpoint: pagination, sort,
/// free-text keywords and the raw encoded filter string, straight off the
/// query string (`axum::extract::Query<Envelope>`). Wire fields only —
/// clause decoding happens once, explicitly, via [`Envelope::resolve`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Envelope {
    pub skip: i64,
    pub take: i64,
    pub order_by: String,
    pub dir: Dir,
    pub filters: Option<String>,
    pub keywords: String,
    #[serde(rename = "type")]
    pub kind: RequestKind,
    pub paging: Option<bool>,
    #[serde(skip)]
    pub restrict_order_by: bool,
}

impl Default for Envelope {
    fn default() -> Self {
        let restrict = conf::setup().read().map(|s| s.query.restrict_order_by).unwrap_or(false);
        Envelope {
            skip: 0,
            take: 0,
            order_by: String::new(),
            dir: Default::default(),
            filters: None,
            keywords: String::new(),
            kind: Default::default(),
            paging: None,
            restrict_order_by: restrict,
        }
    }
}

impl Envelope {
    /// skip clamped to zero
    pub fn skip(&self) -> i64 {
        self.skip.max(0)
    }

    /// take defaulted and capped by config
    pub fn take(&self) -> i64 {
        let (default_take, max_take) = match conf::setup().read() {
            Ok(s) => (s.query.default_take, s.query.max_take),
            Err(_) => (10, 1000),
        };
        if self.take <= 0 {
            default_take
        } else {
            self.take.min(max_take)
        }
    }

    /// blank order-by falls back to the configured default column
    pub fn order_by(&self) -> String {
        let trimmed = self.order_by.trim();
        if trimmed.is_empty() {
            conf::setup().read().map(|s| s.query.default_order_by.clone()).unwrap_or_else(|_| "ID".to_string())
        } else {
            trimmed.to_string()
        }
    }

    /// absent paging means paging on
    pub fn paging(&self) -> bool {
        self.paging.unwrap_or(true)
    }

    /// deep copy of the wire fields; the returned envelope re-decodes
    /// `filters` independently of this one
    pub fn copy(&self) -> Envelope {
        self.clone()
    }

    pub fn clear_filter(mut self) -> Self {
        self.filters = None;
        self
    }

    pub fn clear_order(mut self) -> Self {
        self.order_by = String::new();
        self
    }

    pub fn no_paging(mut self) -> Self {
        self.paging = Some(false);
        self
    }

    /// Deterministic cache key. Field order is part of the contract —
    /// existing cache entries key on exactly this layout, do not reorder.
    pub fn cache_key(&self) -> String {
        format!(
            "{}{}{}{}{}{}{}_{}",
            self.kind.code(),
            self.take(),
            self.skip(),
            self.paging(),
            self.order_by(),
            self.dir.as_str(),
            self.keywords,
            self.filters.as_deref().unwrap_or("")
        )
    }

    /// Decode `filters` into clauses, once. The two-stage split keeps the
    /// wire struct free of hidden lazy-init state.
    pub fn resolve(&self) -> Resolved {
        let clauses = match &self.filters {
            Some(raw) => codec::decode(raw),
            None => Clauses::default(),
        };
        Resolved { envelope: self.clone(), clauses }
    }
}

/// Envelope with its clauses materialized.
#[derive(Clone, Debug)]
pub struct Resolved {
    pub envelope: Envelope,
    pub clauses: Clauses,
}

impl Resolved {
    pub fn skip(&self) -> i64 {
        self.envelope.skip()
    }

    pub fn take(&self) -> i64 {
        self.envelope.take()
    }

    pub fn order_by(&self) -> String {
        self.envelope.order_by()
    }

    pub fn dir(&self) -> Dir {
        self.envelope.dir
    }

    pub fn paging(&self) -> bool {
        self.envelope.paging()
    }

    pub fn keywords(&self) -> &str {
        &self.envelope.keywords
    }

    pub fn kind(&self) -> RequestKind {
        self.envelope.kind
    }
}
