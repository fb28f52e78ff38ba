use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdftoolbox")]
#[command(about = "PDF merge/split/compress toolbox with MCP server support")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Display page count and metadata
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },

    /// Combine multiple PDFs into one, optionally keeping only some pages
    Merge {
        /// PDF files to merge
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Page selection for the matching input, by position
        /// (e.g., "1-3,5,7"; omitted or empty keeps the whole file)
        #[arg(short, long)]
        pages: Vec<String>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Extract a page selection into a new PDF
    #[command(alias = "extract")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Pages to keep (e.g., "1-3,5,7"; empty keeps the whole file)
        #[arg(default_value = "")]
        pages: String,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Rewrite a PDF with compressed streams
    Compress {
        /// PDF file to compress
        path: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Convert PNG/JPEG images into a single PDF, one page per image
    Images {
        /// Image files, in page order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}
