use std::{
    path::{
        Path,
        PathBuf,
    },
    sync::{
        mpsc,
        Arc,
    },
    time::Instant,
};

use tracing::{
    debug,
    info,
    warn,
};

use super::{
    tasks::{
        Debouncer,
        SessionEvent,
        StatusFlag,
    },
    RankedResult,
    SessionStatus,
    StopwordStore,
    Theme,
    WordCloudError,
};
use crate::{
    analysis::{
        aggregate,
        Ranker,
        Tokenizer,
    },
    config::AnalysisConfig,
    persistence::{
        KeyValueStore,
        SAVED_TEXT_KEY,
        THEME_KEY,
    },
    render::{
        CanvasSize,
        ResultExporter,
    },
};

/// UI-agnostic controller owning the document, the stopword set and the last
/// result. Handlers take `&mut self`, so analysis runs on one session never overlap.
///
/// Debounced text saves run on the tokio runtime that was current at `open`.
/// A session opened outside any runtime skips them and relies on `on_shutdown`.
pub struct AnalysisSession {
    config: AnalysisConfig,
    store: Arc<dyn KeyValueStore>,
    tokenizer: Tokenizer,
    ranker: Ranker,
    stopwords: StopwordStore,
    document: String,
    theme: Theme,
    status: StatusFlag,
    last_result: Option<Arc<RankedResult>>,
    text_saver: Debouncer,
    sender: mpsc::Sender<SessionEvent>,
    receiver: mpsc::Receiver<SessionEvent>,
}

impl AnalysisSession {
    /// Reads theme, custom stopwords and saved text from the store once.
    pub fn open(config: AnalysisConfig, store: Arc<dyn KeyValueStore>) -> Result<Self, WordCloudError> {
        let stopwords = StopwordStore::load(store.clone())?;

        let theme = match store.get(THEME_KEY)? {
            Some(value) => Theme::parse(&value).unwrap_or_else(|| {
                warn!("Unknown saved theme {:?}, using default", value);
                Theme::default()
            }),
            None => Theme::default(),
        };

        let document = store.get(SAVED_TEXT_KEY)?.unwrap_or_default();
        if !document.is_empty() {
            info!("Restored {} characters of saved text", document.chars().count());
        }

        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            tokenizer: Tokenizer::new(config.min_word_length),
            ranker: Ranker::from(&config),
            text_saver: Debouncer::new(config.debounce_delay()),
            config,
            store,
            stopwords,
            document,
            theme,
            status: StatusFlag::new(),
            last_result: None,
            sender,
            receiver,
        })
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn stopwords(&self) -> &StopwordStore {
        &self.stopwords
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> SessionStatus {
        self.status.get()
    }

    /// A handle that keeps reporting status while a handler borrows the session.
    pub fn status_handle(&self) -> StatusFlag {
        self.status.clone()
    }

    pub fn last_result(&self) -> Option<Arc<RankedResult>> {
        self.last_result.clone()
    }

    pub fn canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.config.canvas_width, self.config.canvas_height)
    }

    pub fn poll_events(&self) -> Vec<SessionEvent> {
        self.receiver.try_iter().collect()
    }

    fn emit(&self, event: SessionEvent) {
        debug!("Session event: {}", event.event_type());
        let _ = self.sender.send(event);
    }

    fn reject<T>(&self, error: WordCloudError) -> Result<T, WordCloudError> {
        warn!("{}", error);
        self.emit(SessionEvent::Notification(error.to_string()));
        Err(error)
    }

    /// Runs the whole pipeline against the current document and stopwords.
    pub async fn on_analyze(&mut self) -> Result<Arc<RankedResult>, WordCloudError> {
        if self.document.trim().is_empty() {
            return self.reject(WordCloudError::EmptyInput);
        }

        let _busy = self.status.enter(self.sender.clone());
        // Let the front end paint the busy state before the synchronous work.
        tokio::task::yield_now().await;

        let started = Instant::now();
        let tokens = self.tokenizer.tokenize(&self.document);
        let table = aggregate(&tokens, &self.stopwords);
        let result = Arc::new(self.ranker.rank(&table));

        info!(
            "Analyzed {} tokens into {} unique words ({:.1}ms)",
            tokens.len(),
            result.unique_words,
            started.elapsed().as_secs_f64() * 1000.0
        );

        self.last_result = Some(result.clone());
        self.emit(SessionEvent::ResultsReady(result.clone()));
        Ok(result)
    }

    /// Replaces the document and schedules a debounced write of the raw text.
    pub fn on_edit_text(&mut self, text: impl Into<String>) {
        self.document = text.into();
        self.schedule_text_save();
    }

    pub async fn on_load_file(&mut self, path: &Path) -> Result<(), WordCloudError> {
        let read = {
            let _busy = self.status.enter(self.sender.clone());
            tokio::fs::read_to_string(path).await
        };

        match read {
            Ok(text) => {
                info!("Loaded {} ({} characters)", path.display(), text.chars().count());
                self.on_edit_text(text);
                Ok(())
            }
            Err(source) => {
                self.reject(WordCloudError::FileReadFailure { path: path.to_path_buf(), source })
            }
        }
    }

    /// Adds a custom stopword, then refreshes the results if there is text to analyze.
    pub async fn on_add_stopword(
        &mut self,
        word: &str,
    ) -> Result<Option<Arc<RankedResult>>, WordCloudError> {
        if let Err(e) = self.stopwords.add(word.trim()) {
            return self.reject(e);
        }
        self.after_stopwords_changed().await
    }

    pub async fn on_remove_stopword(
        &mut self,
        word: &str,
    ) -> Result<Option<Arc<RankedResult>>, WordCloudError> {
        match self.stopwords.remove(word.trim()) {
            Ok(removed) => {
                if !removed {
                    debug!("{:?} was not a custom stopword", word.trim());
                }
                self.after_stopwords_changed().await
            }
            Err(e) => self.reject(e),
        }
    }

    async fn after_stopwords_changed(&mut self) -> Result<Option<Arc<RankedResult>>, WordCloudError> {
        self.emit(SessionEvent::StopwordsChanged(self.stopwords.custom_words().to_vec()));

        if self.document.trim().is_empty() {
            return Ok(None);
        }
        self.on_analyze().await.map(Some)
    }

    pub fn on_reset(&mut self) {
        self.document.clear();
        self.last_result = None;
        self.schedule_text_save();
        self.emit(SessionEvent::Cleared);
    }

    pub fn on_toggle_theme(&mut self) -> Result<Theme, WordCloudError> {
        let next = self.theme.toggled();
        if let Err(e) = self.store.set(THEME_KEY, next.as_str()) {
            return self.reject(e);
        }
        self.theme = next;
        self.emit(SessionEvent::ThemeChanged(next));
        Ok(next)
    }

    pub fn on_export(
        &self,
        exporter: &dyn ResultExporter,
        output_dir: &Path,
    ) -> Result<PathBuf, WordCloudError> {
        let Some(result) = self.last_result.as_ref() else {
            return self.reject(WordCloudError::ExportNotReady);
        };

        match exporter.export(result, output_dir) {
            Ok(path) => Ok(path),
            Err(e) => self.reject(e),
        }
    }

    /// Cancels any pending debounced write and saves the document now.
    pub fn on_shutdown(&mut self) -> Result<(), WordCloudError> {
        if self.text_saver.cancel() {
            debug!("Flushing pending text save");
        }
        self.store.set(SAVED_TEXT_KEY, &self.document)?;
        self.emit(SessionEvent::TextSaved);
        Ok(())
    }

    fn schedule_text_save(&mut self) {
        let store = self.store.clone();
        let sender = self.sender.clone();
        let text = self.document.clone();

        self.text_saver.schedule(async move {
            let chars = text.chars().count();
            let saved =
                tokio::task::spawn_blocking(move || store.set(SAVED_TEXT_KEY, &text)).await;
            match saved {
                Ok(Ok(())) => {
                    debug!("Saved {} characters of text", chars);
                    let _ = sender.send(SessionEvent::TextSaved);
                }
                Ok(Err(e)) => warn!("Failed to save text: {}", e),
                Err(e) => warn!("Text save task failed: {}", e),
            }
        });
    }
}
