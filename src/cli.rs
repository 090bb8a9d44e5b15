//! Command-line interface.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use console::{style, Term};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{SearchApiClient, SearchRequest, DEFAULT_MAX_RESULTS, DEFAULT_THRESHOLD};
use crate::config::{load_settings, Settings};
use crate::terminal::terminal_surfaces;
use crate::viewer::{DocumentSource, DocumentViewer, OpenOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "docviewer",
    version,
    about = "Search a document corpus and read full documents with highlights"
)]
pub struct Cli {
    /// Base URL of the search backend
    #[arg(long, env = "DOCVIEWER_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "DOCVIEWER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Directory printed documents are written to
    #[arg(long, env = "DOCVIEWER_PRINT_DIR", global = true)]
    pub print_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a document's full text in the viewer
    View {
        /// Document identifier, as listed by `search`
        doc_id: String,

        /// Query whose terms are highlighted
        #[arg(short, long, default_value = "")]
        query: String,

        /// Hide highlights after opening
        #[arg(long)]
        toggle: bool,

        /// Copy the text to the clipboard
        #[arg(long)]
        copy: bool,

        /// Write a printable HTML copy to the print directory
        #[arg(long)]
        print: bool,

        /// Keep the viewer open and read commands (h/c/p/q) from stdin
        #[arg(short, long)]
        interactive: bool,
    },

    /// Rank documents against a query
    Search {
        query: String,

        /// Minimum similarity score
        #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Maximum number of results
        #[arg(long, default_value_t = DEFAULT_MAX_RESULTS)]
        max_results: u32,
    },

    /// Show corpus statistics
    Stats,

    /// Check whether any document is relevant to a query
    Relevance { query: String },

    /// Suggest queries for partial input
    Suggest { term: String },
}

impl Cli {
    /// Apply command-line overrides on top of file configuration.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref base_url) = self.base_url {
            settings.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref dir) = self.print_dir {
            settings.print_dir = dir.clone();
        }
    }
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = load_settings().await;
    cli.apply_to_settings(&mut settings);
    settings.validate().map_err(anyhow::Error::msg)?;

    let client = SearchApiClient::from_settings(&settings)
        .context("Failed to create HTTP client")?;
    let out = Term::stdout();

    match cli.command {
        Commands::View {
            doc_id,
            query,
            toggle,
            copy,
            print,
            interactive,
        } => {
            let viewer = DocumentViewer::new(
                client,
                terminal_surfaces(settings.print_dir.clone()),
                settings.labels.clone(),
            );

            if viewer.open_viewer(&doc_id, &query).await != OpenOutcome::Opened {
                bail!("Document {} could not be opened", doc_id);
            }
            if toggle {
                viewer.toggle_highlights().await;
            }
            if copy {
                viewer.copy_current_text().await;
            }
            if print {
                viewer.print_current_document().await;
            }
            if interactive {
                interactive_loop(&viewer).await?;
            }
            viewer.close_viewer().await;
        }

        Commands::Search {
            query,
            threshold,
            max_results,
        } => {
            let request = SearchRequest::new(&query)
                .with_threshold(threshold)
                .with_max_results(max_results);
            let response = client.search(&request).await?;

            if response.results.is_empty() {
                out.write_line(&format!("No documents match {:?}", response.query))?;
            }
            for (i, result) in response.results.iter().enumerate() {
                out.write_line(&format!(
                    "{:>2}. {}  {}  {}",
                    i + 1,
                    style(&result.document_name).bold(),
                    style(result.percentage()).green(),
                    style(result.matching_terms.join(", ")).dim()
                ))?;
            }
            out.write_line(
                &style(format!(
                    "{} result(s) in {:.2} ms",
                    response.total_results, response.execution_time
                ))
                .dim()
                .to_string(),
            )?;
        }

        Commands::Stats => {
            let stats = client.statistics().await?;
            out.write_line(&format!("Documents:    {}", stats.total_documents))?;
            out.write_line(&format!("Unique terms: {}", stats.total_unique_terms))?;
        }

        Commands::Relevance { query } => {
            let check = client.check_relevance(&query).await?;
            let verdict = if check.has_relevant {
                style("relevant documents found").green()
            } else {
                style("no relevant documents").yellow()
            };
            match check.result_count {
                Some(count) => out.write_line(&format!("{} ({})", verdict, count))?,
                None => out.write_line(&verdict.to_string())?,
            }
        }

        Commands::Suggest { term } => {
            for suggestion in client.suggestions(&term).await? {
                out.write_line(&suggestion)?;
            }
        }
    }

    Ok(())
}

/// Read single-letter viewer commands from stdin until closed.
async fn interactive_loop<S: DocumentSource>(viewer: &DocumentViewer<S>) -> anyhow::Result<()> {
    let err = Term::stderr();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "h" => {
                viewer.toggle_highlights().await;
            }
            "c" => viewer.copy_current_text().await,
            "p" => viewer.print_current_document().await,
            "q" => viewer.close_viewer().await,
            "" => {}
            other => {
                err.write_line(&format!("unknown command {:?} (h, c, p, q)", other))?;
            }
        }
        if !viewer.is_open().await {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_command() {
        let cli = Cli::parse_from(["docviewer", "view", "doc-42", "-q", "بغداد", "--toggle"]);
        match cli.command {
            Commands::View {
                doc_id,
                query,
                toggle,
                copy,
                ..
            } => {
                assert_eq!(doc_id, "doc-42");
                assert_eq!(query, "بغداد");
                assert!(toggle);
                assert!(!copy);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_search_defaults() {
        let cli = Cli::parse_from(["docviewer", "search", "دمشق"]);
        match cli.command {
            Commands::Search {
                threshold,
                max_results,
                ..
            } => {
                assert_eq!(threshold, DEFAULT_THRESHOLD);
                assert_eq!(max_results, DEFAULT_MAX_RESULTS);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides_settings() {
        let cli = Cli::parse_from([
            "docviewer",
            "--base-url",
            "http://search.local:9000/",
            "--timeout",
            "3",
            "stats",
        ]);
        let mut settings = Settings::default();
        cli.apply_to_settings(&mut settings);
        assert_eq!(settings.base_url, "http://search.local:9000");
        assert_eq!(settings.request_timeout, 3);
    }
}
