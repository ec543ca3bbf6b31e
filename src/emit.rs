//! Rendering of compiler artifacts as text, JSON, or YAML.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dsl::{DispatchTable, Program, Token};

/// Which pipeline stage to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitKind {
    Tokens,
    Ast,
    #[default]
    Table,
}

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmitFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn encode<T: Serialize>(value: &T, format: EmitFormat, text: impl FnOnce() -> String) -> Result<String, EmitError> {
    match format {
        EmitFormat::Text => Ok(text()),
        EmitFormat::Json => {
            let mut out = serde_json::to_string_pretty(value)?;
            out.push('\n');
            Ok(out)
        }
        EmitFormat::Yaml => Ok(serde_yaml::to_string(value)?),
    }
}

/// One token per line in text form: `start-end kind`.
pub fn render_tokens(tokens: &[Token], format: EmitFormat) -> Result<String, EmitError> {
    encode(&tokens, format, || {
        tokens
            .iter()
            .map(|t| format!("{}-{} {t}\n", t.start, t.end))
            .collect()
    })
}

/// Text form is canonical DSL source.
pub fn render_program(program: &Program, format: EmitFormat) -> Result<String, EmitError> {
    encode(program, format, || program.to_string())
}

pub fn render_table(table: &DispatchTable, format: EmitFormat) -> Result<String, EmitError> {
    encode(table, format, || table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::Compiler;

    const SRC: &str = "STATES: [a], b\nSYMBOLS: e\nTRANSITIONS:\na,e,P(e)-R,b\n";

    #[test]
    fn tokens_as_text() {
        let tokens = Compiler::tokenize("STATES:").unwrap();
        let out = render_tokens(&tokens, EmitFormat::Text).unwrap();
        assert_eq!(
            out,
            "1:1-1:7 STATES 'STATES'\n1:7-1:8 ':' ':'\n1:8-1:9 end of input\n"
        );
    }

    #[test]
    fn tokens_as_json() {
        let tokens = Compiler::tokenize("a").unwrap();
        let out = render_tokens(&tokens, EmitFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["kind"], "Ident");
        assert_eq!(value[0]["start"]["offset"], 0);
        assert_eq!(value[1]["kind"], "Eof");
    }

    #[test]
    fn program_text_reparses() {
        let program = Compiler::parse(SRC).unwrap();
        let text = render_program(&program, EmitFormat::Text).unwrap();
        assert_eq!(Compiler::parse(&text).unwrap(), program);
    }

    #[test]
    fn program_yaml_round_trips() {
        let program = Compiler::parse(SRC).unwrap();
        let yaml = render_program(&program, EmitFormat::Yaml).unwrap();
        let back: Program = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, program);
    }

    #[test]
    fn table_as_text() {
        let table = Compiler::compile(SRC).unwrap();
        let out = render_table(&table, EmitFormat::Text).unwrap();
        assert_eq!(out, "e, a -> P(e)-R, b\n");
    }

    #[test]
    fn table_as_json() {
        let table = Compiler::compile(SRC).unwrap();
        let out = render_table(&table, EmitFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["states"], serde_json::json!(["a", "b"]));
        assert_eq!(value["cells"].as_array().unwrap().len(), 1);
    }
}
