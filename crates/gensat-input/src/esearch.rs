//! GENSAT query tool access
//!
//! The GENSAT query tool is an Entrez eSearch endpoint. A request is the
//! configured base URL with form-encoded `db`, `retmax` and `term` parameters
//! appended, and the response is an `eSearchResult` XML document:
//!
//! ```xml
//! <eSearchResult>
//!     <Count>2</Count>
//!     <RetMax>2</RetMax>
//!     <IdList>
//!         <Id>11287</Id>
//!         <Id>11298</Id>
//!     </IdList>
//! </eSearchResult>
//! ```

use crate::error::{IngestError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use tracing::{debug, info};

/// Filter expression selecting mouse genes with GENSAT expression data
pub const GENSAT_TERM: &str = r#"gene_gensat[filter] AND "Mus musculus"[organism]"#;

const ID_TAG: &[u8] = b"Id";
const COUNT_TAG: &[u8] = b"Count";
const ERROR_TAG: &[u8] = b"ERROR";

/// Parameters of one eSearch request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsearchQuery {
    pub db: String,
    pub retmax: u64,
    pub term: String,
}

impl EsearchQuery {
    /// Query for the GENSAT gene list in `db`, returning at most `retmax` IDs
    pub fn gensat(db: impl Into<String>, retmax: u64) -> Self {
        Self {
            db: db.into(),
            retmax,
            term: GENSAT_TERM.to_string(),
        }
    }

    /// Form-encoded parameters, in `db`, `retmax`, `term` order
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("db", &self.db)
            .append_pair("retmax", &self.retmax.to_string())
            .append_pair("term", &self.term)
            .finish()
    }

    /// Full request URL
    ///
    /// The parameters are appended to `base` as is, so the base URL carries
    /// its own trailing `?`.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base, self.encode())
    }
}

/// Values extracted from an `eSearchResult` document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EsearchResult {
    /// Text of every `Id` element, in document order
    pub ids: Vec<String>,
    /// Total number of matches reported by the top-level `Count` element
    pub count: Option<u64>,
    /// Text of any `ERROR` elements
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Count,
    Error,
}

impl Field {
    /// Field captured by an element named `name` opened at `depth` (root is 1)
    fn for_element(name: &[u8], depth: usize) -> Option<Self> {
        match name {
            ID_TAG => Some(Field::Id),
            COUNT_TAG if depth == 2 => Some(Field::Count),
            ERROR_TAG => Some(Field::Error),
            _ => None,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Field::Id => "Id",
            Field::Count => "Count",
            Field::Error => "ERROR",
        }
    }
}

/// An element whose text is being collected
///
/// `slot` is the index reserved in `ids` or `errors` when the element opened,
/// so nested elements keep start-tag order.
struct Capture {
    field: Field,
    depth: usize,
    slot: usize,
    text: String,
}

impl EsearchResult {
    /// Parse an eSearch response document
    ///
    /// Every `Id` element is recorded, however it is nested. Text belongs to
    /// the innermost open `Id`, `Count` or `ERROR` element.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let mut result = Self::default();
        let mut depth = 0usize;
        let mut open: Vec<Capture> = Vec::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    depth += 1;
                    if let Some(field) = Field::for_element(e.local_name().as_ref(), depth) {
                        let slot = result.reserve(field);
                        open.push(Capture {
                            field,
                            depth,
                            slot,
                            text: String::new(),
                        });
                    }
                },
                Event::Empty(e) => {
                    if let Some(field) = Field::for_element(e.local_name().as_ref(), depth + 1) {
                        result.reserve(field);
                    }
                },
                Event::Text(t) => {
                    if let Some(capture) = open.last_mut() {
                        let text = t.unescape().map_err(quick_xml::Error::from)?;
                        capture.text.push_str(&text);
                    }
                },
                Event::CData(c) => {
                    if let Some(capture) = open.last_mut() {
                        let bytes = c.into_inner();
                        capture.text.push_str(&String::from_utf8_lossy(&bytes));
                    }
                },
                Event::End(_) => {
                    if open.last().is_some_and(|c| c.depth == depth) {
                        if let Some(done) = open.pop() {
                            result.fill(done);
                        }
                    }
                    depth = depth.saturating_sub(1);
                },
                Event::Eof => break,
                _ => {},
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(IngestError::MalformedResponse(format!(
                "unterminated <{}> element",
                unclosed.field.tag()
            )));
        }

        debug!(
            ids = result.ids.len(),
            count = ?result.count,
            errors = result.errors.len(),
            "Parsed eSearch response"
        );

        Ok(result)
    }

    /// Reserve an empty entry for an element that just opened
    fn reserve(&mut self, field: Field) -> usize {
        match field {
            Field::Id => {
                self.ids.push(String::new());
                self.ids.len() - 1
            },
            Field::Error => {
                self.errors.push(String::new());
                self.errors.len() - 1
            },
            Field::Count => 0,
        }
    }

    fn fill(&mut self, capture: Capture) {
        match capture.field {
            Field::Id => {
                if let Some(id) = self.ids.get_mut(capture.slot) {
                    *id = capture.text;
                }
            },
            Field::Error => {
                if let Some(error) = self.errors.get_mut(capture.slot) {
                    *error = capture.text.trim().to_string();
                }
            },
            Field::Count => {
                if self.count.is_none() {
                    self.count = capture.text.trim().parse().ok();
                }
            },
        }
    }

    /// Whether the query matched more records than were returned
    pub fn is_truncated(&self) -> bool {
        self.count
            .is_some_and(|count| count > self.ids.len() as u64)
    }
}

/// HTTP client for the GENSAT query tool
#[derive(Debug, Clone)]
pub struct EsearchClient {
    client: Client,
}

impl EsearchClient {
    /// Create a client
    ///
    /// No request timeout is configured; a run waits as long as the query
    /// tool takes to answer.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gensat-input/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Issue the query and return the response body
    ///
    /// A non-success HTTP status is reported as an error.
    pub async fn search(&self, base_url: &str, query: &EsearchQuery) -> Result<String> {
        let url = query.url(base_url);
        info!(url = %url, "Querying GENSAT query tool");

        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(bytes = body.len(), "Received eSearch response");

        Ok(body)
    }
}
