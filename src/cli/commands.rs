//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "citerag")]
#[command(about = "Multi-tenant document question answering with cited sources")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to (default: server.host from config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (default: server.port from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Allow any origin when server.allowed_origins is empty
        #[arg(long)]
        cors: bool,
    },
    /// Ask a question against a client's documents
    Query {
        /// The question to answer
        question: String,
        /// Client whose documents are searched
        #[arg(short, long)]
        client_id: String,
        /// Number of passages to retrieve (default: retrieval.default_top_k from config)
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },
    /// Upload a document for a client
    Upload {
        /// File to upload (pdf, docx, csv, txt)
        path: PathBuf,
        /// Client that owns the document
        #[arg(short, long)]
        client_id: String,
    },
    /// List a client's documents with their indexing status
    Documents {
        /// Client whose documents are listed
        #[arg(short, long)]
        client_id: String,
    },
    /// Show the effective configuration
    Config,
}
