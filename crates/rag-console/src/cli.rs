use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use rag_console::core::proto::{
    DEFAULT_QUERY_LIMIT, QueryRequest, SortField, SortOrder,
};

/// Talk to the retrieval-augmented backend from the terminal.
#[derive(Debug, Parser)]
#[command(name = "rag-console", version)]
pub struct Cli {
    /// Base URL of the backend.
    #[arg(
        long,
        global = true,
        env = "RAG_CONSOLE_BASE_URL",
        default_value = rag_console_http::DEFAULT_BASE_URL
    )]
    pub base_url: String,

    /// Give up on a request after this many seconds. Requests wait
    /// forever by default.
    #[arg(long, global = true, env = "RAG_CONSOLE_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat with the assistant, keeping the conversation history (default).
    Chat,
    /// Send prompts one at a time, without history.
    Prompt {
        /// Send this prompt and exit instead of reading prompts from stdin.
        text: Option<String>,
    },
    /// Search the vector store.
    Query(QueryArgs),
    /// Check that the backend is up.
    Health,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Phrase to search for.
    #[arg(default_value = "")]
    pub phrase: String,

    /// Only search chunks of this document.
    #[arg(long, default_value = "")]
    pub doc_id: String,

    /// Maximum number of records.
    #[arg(long, default_value_t = DEFAULT_QUERY_LIMIT)]
    pub limit: u32,

    /// Field to sort the records by.
    #[arg(long)]
    pub sort_by: Option<SortField>,

    /// Sort direction.
    #[arg(long, default_value_t = SortOrder::Asc)]
    pub sort_order: SortOrder,
}

impl From<QueryArgs> for QueryRequest {
    fn from(args: QueryArgs) -> Self {
        QueryRequest {
            phrase: args.phrase.trim().to_owned(),
            doc_id: args.doc_id.trim().to_owned(),
            limit: args.limit,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_chat() {
        let cli = Cli::try_parse_from(["rag-console", "--base-url", "http://rag:8000"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.base_url, "http://rag:8000");
        assert_eq!(cli.timeout(), None);
    }

    #[test]
    fn test_query_args() {
        let cli = Cli::try_parse_from([
            "rag-console",
            "query",
            "quarterly report",
            "--doc-id",
            "doc-42",
            "--sort-by",
            "source_key",
            "--sort-order",
            "desc",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        assert_eq!(cli.timeout(), Some(Duration::from_secs(30)));

        let Some(Command::Query(args)) = cli.command else {
            panic!("expected a query command");
        };
        let request = QueryRequest::from(args);
        assert_eq!(
            request,
            QueryRequest::with_phrase("quarterly report")
                .with_doc_id("doc-42")
                .sorted_by(SortField::SourceKey, SortOrder::Desc)
        );
    }

    #[test]
    fn test_rejects_unknown_sort_field() {
        let result = Cli::try_parse_from([
            "rag-console",
            "query",
            "x",
            "--sort-by",
            "title",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_single_prompt() {
        let cli = Cli::try_parse_from(["rag-console", "prompt", "hello there"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Prompt { text: Some(ref text) }) if text == "hello there"
        ));
    }
}
