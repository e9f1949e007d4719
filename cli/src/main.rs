//! Terminal chatbot: wires the chat graph to a stdin/stdout loop.

mod repl;

use std::process::{Command, Stdio};
use std::sync::Arc;

use clap::Parser;
use tangle::agent::{build_chat_graph, ChatSession, GraphExecutor};
use tangle::graph::{generate_dot, CompiledStateGraph};
use tangle::llm::ChatOpenAI;
use tangle::memory::MemorySaver;
use tangle::state::ChatState;
use tangle::tools::{builtin_tools, TavilySearchTool};
use tracing_subscriber::EnvFilter;

/// Graph-based chatbot with web search, human assistance, and shell tools.
#[derive(Parser, Debug)]
#[command(name = "tangle", about = "Graph-based chatbot with tools in the terminal")]
struct Args {
    /// Chat model to use
    #[arg(long, env = "TANGLE_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Conversation thread id; checkpoints are scoped to it
    #[arg(long, default_value = "1")]
    thread_id: String,

    /// Log graph execution at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Skip writing graph.png on startup
    #[arg(long)]
    no_diagram: bool,
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "tangle=debug,cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Renders the compiled graph to graph.png when Graphviz is installed.
/// Purely cosmetic, so every failure is swallowed into a debug log.
fn write_graph_diagram(graph: &CompiledStateGraph<ChatState>) {
    let dot_source = generate_dot(graph);
    let Ok(dot_bin) = which::which("dot") else {
        tracing::debug!("graphviz `dot` not found, skipping graph.png");
        return;
    };
    let result = (|| -> std::io::Result<()> {
        let mut child = Command::new(dot_bin)
            .args(["-Tpng", "-o", "graph.png"])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        if let Some(stdin) = child.stdin.as_mut() {
            use std::io::Write;
            stdin.write_all(dot_source.as_bytes())?;
        }
        child.wait()?;
        Ok(())
    })();
    if let Err(err) = result {
        tracing::debug!(error = %err, "failed to write graph.png");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.verbose);

    if std::env::var("OPENAI_API_KEY").is_err() {
        return Err("OPENAI_API_KEY is not set (add it to .env or the environment)".into());
    }
    let tavily_key = std::env::var("TAVILY_API_KEY")
        .map_err(|_| "TAVILY_API_KEY is not set (add it to .env or the environment)")?;

    let tools = Arc::new(builtin_tools(TavilySearchTool::new(tavily_key)));
    let llm = Arc::new(ChatOpenAI::new(&args.model).with_tools(tools.list()));
    let checkpointer: Arc<MemorySaver<ChatState>> = Arc::new(MemorySaver::new());
    let graph = build_chat_graph(llm, tools, checkpointer.clone())?;

    if !args.no_diagram {
        write_graph_diagram(&graph);
    }

    let executor = Arc::new(GraphExecutor::new(graph, checkpointer, args.thread_id));
    repl::run(ChatSession::new(executor)).await
}
