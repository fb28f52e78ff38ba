use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::commands::merge::merge_files;
use crate::page_range::PageSelection;
use crate::pdf::{self, PdfDocument};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfSplitRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Pages to keep (e.g., '1-3,5,7'; empty keeps the whole file)")]
    #[serde(default)]
    pub pages: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MergeInput {
    #[schemars(description = "Path to a PDF file")]
    pub path: String,
    #[schemars(description = "Pages to keep from this file (empty keeps all)")]
    #[serde(default)]
    pub pages: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfMergeRequest {
    #[schemars(description = "PDF files to merge, in order, each with an optional page selection")]
    pub inputs: Vec<MergeInput>,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfCompressRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImagesToPdfRequest {
    #[schemars(description = "Image files (PNG/JPEG), one page each, in order")]
    pub images: Vec<String>,
    #[schemars(description = "Output file path")]
    pub output: String,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    #[allow(dead_code)]
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get PDF page count and basic metadata (title, author, producer)")]
    fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        match PdfDocument::open(&path) {
            Ok(doc) => {
                let meta = doc.metadata();
                let result = PdfInfoResult {
                    path,
                    page_count: meta.page_count,
                    title: meta.title,
                    author: meta.author,
                    producer: meta.producer,
                };
                serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Extract a page selection from a PDF into a new file. \
                          Use page syntax like '1-3,5,7'; an empty selection keeps every page.")]
    fn pdf_split(&self, Parameters(req): Parameters<PdfSplitRequest>) -> String {
        let doc = match PdfDocument::open(&req.path) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };
        let total = doc.page_count();

        let selection = match PageSelection::parse(&req.pages, total) {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };
        let indices = selection.indices(total);

        let mut new_doc = match doc.select(&indices) {
            Ok(d) => d,
            Err(e) => return format!("Error: {}", e),
        };

        if let Err(e) = pdf::document::save_atomic(&mut new_doc, &req.output) {
            return format!("Error: {}", e);
        }

        let result = SplitResult {
            output_path: req.output,
            page_count: indices.len() as u32,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Merge multiple PDFs into one. Each input may carry a page selection \
                          like '1-3,5,7'; an empty selection keeps the whole file.")]
    fn pdf_merge(&self, Parameters(req): Parameters<PdfMergeRequest>) -> String {
        let inputs: Vec<(PathBuf, String)> = req
            .inputs
            .into_iter()
            .map(|i| (PathBuf::from(i.path), i.pages))
            .collect();

        let (mut merged, total_pages) = match merge_files(&inputs) {
            Ok(r) => r,
            Err(e) => return format!("Error: {:#}", e),
        };

        if let Err(e) = pdf::document::save_atomic(&mut merged, &req.output) {
            return format!("Error: {}", e);
        }

        let result = MergeResult {
            output_path: req.output,
            file_count: inputs.len() as u32,
            page_count: total_pages as u32,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Rewrite a PDF with compressed streams and report the size change")]
    fn pdf_compress(&self, Parameters(req): Parameters<PdfCompressRequest>) -> String {
        let bytes_before = match std::fs::metadata(&req.path) {
            Ok(m) => m.len(),
            Err(e) => return format!("Error: {}", e),
        };

        let mut doc = match PdfDocument::open(&req.path) {
            Ok(d) => d.doc,
            Err(e) => return format!("Error: {}", e),
        };
        doc.compress();

        if let Err(e) = pdf::document::save_atomic(&mut doc, &req.output) {
            return format!("Error: {}", e);
        }

        let bytes_after = std::fs::metadata(&req.output).map(|m| m.len()).unwrap_or(0);
        let result = CompressResult {
            output_path: req.output,
            bytes_before,
            bytes_after,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }

    #[tool(description = "Convert PNG/JPEG images into a single PDF, one page per image")]
    fn images_to_pdf(&self, Parameters(req): Parameters<ImagesToPdfRequest>) -> String {
        let paths: Vec<PathBuf> = req.images.iter().map(PathBuf::from).collect();

        let mut doc = match pdf::images::images_to_document(&paths) {
            Ok(d) => d,
            Err(e) => return format!("Error: {:#}", e),
        };

        if let Err(e) = pdf::document::save_atomic(&mut doc, &req.output) {
            return format!("Error: {}", e);
        }

        let result = ImagesResult {
            output_path: req.output,
            page_count: paths.len() as u32,
        };
        serde_json::to_string_pretty(&result).unwrap_or_else(|e| format!("Error: {}", e))
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub producer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SplitResult {
    pub output_path: String,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct MergeResult {
    pub output_path: String,
    pub file_count: u32,
    pub page_count: u32,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CompressResult {
    pub output_path: String,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ImagesResult {
    pub output_path: String,
    pub page_count: u32,
}

impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "PDF manipulation tools. Use pdf_info for page count and metadata, \
                 pdf_split to extract a page selection, pdf_merge to combine files \
                 (each with an optional page selection), pdf_compress to shrink a file, \
                 and images_to_pdf to build a PDF from images."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();

    // Serve using stdin/stdout as a tuple
    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}
