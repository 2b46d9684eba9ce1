//! Compact, serde-backed and token-listing formats

use super::registry::{FormatError, Formatter};
use crate::lambda::SourceOutput;

/// Deepest tree the nested formats will write. Their serializers recurse once per level.
pub const MAX_NESTED_DEPTH: usize = 512;

fn check_depth(output: &SourceOutput, format: &str) -> Result<(), FormatError> {
    let depth = output.expression.depth();
    if depth > MAX_NESTED_DEPTH {
        return Err(FormatError::TooDeep {
            format: format.to_string(),
            depth,
            limit: MAX_NESTED_DEPTH,
        });
    }
    Ok(())
}

/// The canonical one-line rendering of the tree.
pub struct CompactFormatter;

impl Formatter for CompactFormatter {
    fn name(&self) -> &str {
        "compact"
    }

    fn serialize(&self, output: &SourceOutput) -> Result<String, FormatError> {
        Ok(format!("{}\n", output.expression))
    }

    fn description(&self) -> &str {
        "Canonical one-line rendering"
    }
}

/// The range-annotated tree as pretty-printed JSON.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, output: &SourceOutput) -> Result<String, FormatError> {
        check_depth(output, self.name())?;
        let mut json = serde_json::to_string_pretty(&output.expression)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    fn description(&self) -> &str {
        "Range-annotated tree as JSON"
    }
}

/// The range-annotated tree as YAML.
pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, output: &SourceOutput) -> Result<String, FormatError> {
        check_depth(output, self.name())?;
        serde_yaml::to_string(&output.expression)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }

    fn description(&self) -> &str {
        "Range-annotated tree as YAML"
    }
}

/// One token per line, trivia omitted.
pub struct TokensFormatter;

impl Formatter for TokensFormatter {
    fn name(&self) -> &str {
        "tokens"
    }

    fn serialize(&self, output: &SourceOutput) -> Result<String, FormatError> {
        Ok(output
            .tokens
            .iter()
            .map(|token| format!("{token}\n"))
            .collect())
    }

    fn description(&self) -> &str {
        "Lexer tokens, one per line"
    }
}
