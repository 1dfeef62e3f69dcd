//! Action-schema composition: the two canonical example actions and the
//! instruction prompt the model imitates.
//!
//! The markup serializer is external; this module supplies the structured
//! envelope and splices the serialized text verbatim into the prompt
//! template. Composition is pure: identical inputs yield byte-identical
//! output.

use lazy_static::lazy_static;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::ToolOptions;
use crate::TOOL_NAME;

/// The `action` payload of an example: ordered keywords plus requested count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionPayload {
    pub query: Vec<String>,
    pub count: i64,
}

/// Envelope identifying the tool around one action payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionEnvelope {
    pub tool: &'static str,
    pub action: ActionPayload,
}

impl ActionEnvelope {
    /// Example A: multi-keyword, high count.
    pub fn example_multi() -> Self {
        Self {
            tool: TOOL_NAME,
            action: ActionPayload {
                query: vec!["keyword1".to_string(), "keyword2".to_string()],
                count: 5,
            },
        }
    }

    /// Example B: single-keyword, low count.
    pub fn example_single() -> Self {
        Self {
            tool: TOOL_NAME,
            action: ActionPayload {
                query: vec!["keyword1".to_string()],
                count: 2,
            },
        }
    }
}

/// External markup serializer contract: a pure function from envelope to
/// copy-pasteable text.
pub trait ActionSerializer: Send + Sync {
    fn serialize(&self, envelope: &ActionEnvelope) -> String;
}

/// In-tree default: pretty-printed JSON. Hosts with their own markup format
/// inject their own serializer.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonActionSerializer;

impl ActionSerializer for JsonActionSerializer {
    fn serialize(&self, envelope: &ActionEnvelope) -> String {
        serde_json::to_string_pretty(envelope).expect("action envelope serializes to JSON")
    }
}

lazy_static! {
    /// JSON parameter schema advertised on the tool descriptor.
    pub static ref QUERY_TOOL_PARAMETERS: Value = json!({
        "type": "object",
        "properties": {
            "query": {
                "oneOf": [
                    { "type": "string" },
                    { "type": "array", "items": { "type": "string" } }
                ],
                "description": "Keyword(s) used to search the codebase."
            },
            "count": {
                "type": "integer",
                "description": "Number of documents to retrieve."
            }
        },
        "required": ["query", "count"],
        "additionalProperties": false
    });
}

static PROMPT_TEMPLATE: &str = r#"### Codebase Retrieval

You can fetch documents from the user's codebase by keyword query. Retrieved
files are injected into the conversation as hidden context.

- Decide on your own when extra code context would help; you do not need to be asked.
- Emit exactly one structured action per turn.
- If a previous query found nothing useful, reformulate with orthogonal keywords
  rather than near-synonyms of the failed ones.
- If previous results were too few to answer from, request a larger count.
- Never put this tool's own name in the query keywords unless the user explicitly
  asks for it.
{capping_clause}- If the user does not say how many documents to fetch, request {default_num}.

Example with multiple keywords:
{example_multi}

Example with a single keyword:
{example_single}
"#;

/// Render the instruction prompt: an optional capping clause (present iff
/// `max_num > 0`), the default-count clause, and the two serialized examples.
/// Plain positional substitution, no other templating.
pub fn system_prompt(options: &ToolOptions, serializer: &dyn ActionSerializer) -> String {
    let capping_clause = if options.max_num > 0 {
        format!(
            "- At most {} documents are surfaced per query; requesting more has no effect.\n",
            options.max_num
        )
    } else {
        String::new()
    };
    PROMPT_TEMPLATE
        .replace("{capping_clause}", &capping_clause)
        .replace("{default_num}", &options.default_num.to_string())
        .replace(
            "{example_multi}",
            &serializer.serialize(&ActionEnvelope::example_multi()),
        )
        .replace(
            "{example_single}",
            &serializer.serialize(&ActionEnvelope::example_single()),
        )
}
