use std::path::Path;

use serde::Serialize;

use crate::diagnostics::ParseResult;
use crate::driver;

pub const SERVER_NAME: &str = "Nova Language Server";

#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextDocumentSync {
    pub open_close: bool,
    pub change: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub position_encoding: &'static str,
    pub text_document_sync: TextDocumentSync,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub capabilities: Capabilities,
    pub server_info: ServerInfo,
}

/// Descriptor answering the initialization handshake. The protocol loop
/// itself lives outside the core.
pub fn initialize_result() -> InitializeResult {
    InitializeResult {
        capabilities: Capabilities {
            position_encoding: "utf-8",
            text_document_sync: TextDocumentSync {
                open_close: true,
                change: "full",
            },
        },
        server_info: ServerInfo {
            name: SERVER_NAME,
            version: env!("CARGO_PKG_VERSION"),
        },
    }
}

/// Synchronous check of one in-memory buffer: runs the full front end
/// without writing any artifact and returns the collected diagnostics.
/// `actions` lists the functions that were generated.
pub fn check_buffer(file: &str, text: &str) -> ParseResult {
    let built = driver::build_module("buffer", Path::new(file), text);
    let valid = !built.diagnostics.iter().any(|d| d.is_error());

    ParseResult {
        actions: built
            .records
            .iter()
            .map(|record| format!("func {}", record.name))
            .collect(),
        valid,
        diagnostics: built.diagnostics,
    }
}
