use std::{
    io::{
        self,
        Stdout,
    },
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use clap::{
    Parser,
    Subcommand,
};
use tokio::io::{
    AsyncBufReadExt,
    BufReader,
};
use tracing::error;
use tracing_subscriber::EnvFilter;
use wordcloud::{
    core::SessionEvent,
    persistence::{
        get_app_data_dir,
        JsonFileStore,
    },
    render::{
        CloudRenderer,
        CsvExporter,
        TerminalRenderer,
    },
    AnalysisConfig,
    AnalysisSession,
    WordCloudError,
};

#[derive(Parser)]
#[command(name = "wordcloud", about = "Word frequency analysis for word clouds")]
struct Args {
    /// Directory holding settings.json and storage.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a file, inline text, or the last saved text
    Analyze {
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[arg(long)]
        text: Option<String>,
        /// Write the cloud population as CSV into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Manage custom stopwords
    Stopwords {
        #[command(subcommand)]
        action: StopwordAction,
    },
    /// Clear the saved text
    Reset,
    /// Switch between light and dark theme
    Theme,
    /// Interactive session: plain lines are appended to the text, `:help` lists commands
    Repl,
}

#[derive(Subcommand)]
enum StopwordAction {
    List,
    Add { word: String },
    Remove { word: String },
}

const REPL_HELP: &str = ":analyze  :add WORD  :remove WORD  :load PATH  :export DIR  :reset  :theme  :stopwords  :quit";

struct Frontend {
    renderer: TerminalRenderer<Stdout>,
}

impl Frontend {
    fn new() -> Self {
        Self { renderer: TerminalRenderer::new(io::stdout()) }
    }

    /// Drains session events into the terminal views.
    fn sync(&mut self, session: &AnalysisSession) -> Result<(), WordCloudError> {
        for event in session.poll_events() {
            match event {
                SessionEvent::ResultsReady(result) => {
                    self.renderer.show_summary(&result)?;
                    self.renderer.show_top_list(&result.top_list)?;
                    self.renderer.render(result.cloud_input(), session.canvas_size())?;
                }
                SessionEvent::StopwordsChanged(words) => {
                    self.renderer.show_message(&format!("Custom stopwords: {}", words.join(" ")))?;
                }
                SessionEvent::ThemeChanged(theme) => {
                    self.renderer.show_message(&format!("Theme: {}", theme))?;
                }
                SessionEvent::Cleared => self.renderer.show_message("Cleared")?,
                SessionEvent::Notification(message) => {
                    self.renderer.show_message(&format!("! {}", message))?
                }
                SessionEvent::StatusChanged(_) | SessionEvent::TextSaved => {}
            }
        }
        Ok(())
    }

    fn list_stopwords(&mut self, session: &AnalysisSession) -> Result<(), WordCloudError> {
        let stopwords = session.stopwords();
        self.renderer.show_message(&format!("Built-in: {}", stopwords.builtin_words().join(" ")))?;
        self.renderer
            .show_message(&format!("Custom: {}", stopwords.custom_words().join(" ")))
    }
}

async fn run_command(
    command: Command,
    session: &mut AnalysisSession,
    frontend: &mut Frontend,
) -> Result<(), WordCloudError> {
    match command {
        Command::Analyze { file, text, export } => {
            if let Some(path) = file {
                let loaded = session.on_load_file(&path).await;
                frontend.sync(session)?;
                loaded?;
            } else if let Some(text) = text {
                session.on_edit_text(text);
            }
            let outcome = session.on_analyze().await;
            frontend.sync(session)?;
            outcome?;

            if let Some(dir) = export {
                let path = session.on_export(&CsvExporter, &dir)?;
                frontend.renderer.show_message(&format!("Exported to {}", path.display()))?;
            }
        }
        Command::Stopwords { action } => match action {
            StopwordAction::List => frontend.list_stopwords(session)?,
            StopwordAction::Add { word } => {
                let outcome = session.on_add_stopword(&word).await;
                frontend.sync(session)?;
                outcome?;
            }
            StopwordAction::Remove { word } => {
                let outcome = session.on_remove_stopword(&word).await;
                frontend.sync(session)?;
                outcome?;
            }
        },
        Command::Reset => session.on_reset(),
        Command::Theme => {
            session.on_toggle_theme()?;
        }
        Command::Repl => run_repl(session, frontend).await?,
    }

    frontend.sync(session)
}

async fn run_repl(session: &mut AnalysisSession, frontend: &mut Frontend) -> Result<(), WordCloudError> {
    frontend.renderer.show_message(REPL_HELP)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let (command, arg) = match line.strip_prefix(':') {
            Some(rest) => {
                let mut parts = rest.splitn(2, char::is_whitespace);
                (parts.next().unwrap_or(""), parts.next().unwrap_or("").trim())
            }
            None => {
                let mut text = session.document().to_string();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&line);
                session.on_edit_text(text);
                continue;
            }
        };

        // Rejections are already reported as notifications.
        let _ = match command {
            "analyze" => session.on_analyze().await.map(|_| ()),
            "add" => session.on_add_stopword(arg).await.map(|_| ()),
            "remove" => session.on_remove_stopword(arg).await.map(|_| ()),
            "load" => session.on_load_file(arg.as_ref()).await,
            "export" => session.on_export(&CsvExporter, arg.as_ref()).map(|path| {
                let _ = frontend.renderer.show_message(&format!("Exported to {}", path.display()));
            }),
            "reset" => {
                session.on_reset();
                Ok(())
            }
            "theme" => session.on_toggle_theme().map(|_| ()),
            "stopwords" => frontend.list_stopwords(session),
            "quit" | "q" => break,
            _ => frontend.renderer.show_message(REPL_HELP),
        };
        frontend.sync(session)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wordcloud=info")),
        )
        .init();

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(get_app_data_dir);
    let config = AnalysisConfig::load(&data_dir);

    let store = match JsonFileStore::open_in(&data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("Failed to open storage in {}: {}", data_dir.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let mut session = match AnalysisSession::open(config, store) {
        Ok(session) => session,
        Err(e) => {
            error!("Failed to start session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut frontend = Frontend::new();
    let outcome = run_command(args.command, &mut session, &mut frontend).await;

    if let Err(e) = session.on_shutdown() {
        error!("Failed to save text: {}", e);
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_user_correctable() => ExitCode::from(2),
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
