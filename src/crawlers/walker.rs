use crate::config::{DelayRange, WalkerConfig};
use crate::crawlers::crawler::PageSource;
use crate::error::WalkError;
use crate::filter::{LinkFilter, LinkFilterConfig};
use crate::parsers::html::ChapterParser;
use crate::results::{ChapterRecord, Outcome, StopReason, TerminalReason, WalkSummary};
use crate::sink::FileSink;
use crate::utils::sample_delay;
use url::Url;

/// Cross-iteration state of the driving loop
#[derive(Debug)]
struct WalkState {
    page: Url,
    chapters: usize,
    ceiling: usize,
}

impl WalkState {
    fn new(start: Url, ceiling: usize) -> Self {
        Self {
            page: start,
            chapters: 0,
            ceiling,
        }
    }

    fn at_ceiling(&self) -> bool {
        self.chapters >= self.ceiling
    }

    fn advance(&mut self, next: Url) {
        self.chapters += 1;
        self.page = next;
    }
}

/// Walks a chain of chapter pages one "next" link at a time
pub struct Walker<S> {
    source: S,
    parser: ChapterParser,
    filter: LinkFilter,
    sink: FileSink,
    start: Url,
    max_chapters: usize,
    delay: DelayRange,
    title_placeholder: String,
}

impl<S: PageSource> Walker<S> {
    /// Validates the configuration and compiles its rules
    pub fn new(config: &WalkerConfig, source: S) -> Result<Self, WalkError> {
        config.validate()?;
        let start = config.start()?;
        let filter = LinkFilter::new(LinkFilterConfig::for_walk(&start, config))?;

        Ok(Self {
            source,
            parser: ChapterParser::new(&config.rules)?,
            filter,
            sink: FileSink::new(&config.output_path),
            start,
            max_chapters: config.max_chapters,
            delay: config.delay,
            title_placeholder: config.title_placeholder.clone(),
        })
    }

    pub fn sink(&self) -> &FileSink {
        &self.sink
    }

    /// Fetch one page, append its chapter and find the next page
    ///
    /// A `Failed` outcome never leaves a record for `page` in the sink.
    pub async fn step(&self, page: &Url) -> Outcome {
        let source = match self.source.fetch(page).await {
            Ok(source) => source,
            Err(e) => return Outcome::Failed(e),
        };

        let parsed = self.parser.parse(&source);

        let next = match parsed.next_href.as_deref().map(|href| {
            page.join(href).map_err(|source| WalkError::InvalidLink {
                href: href.to_string(),
                base: page.clone(),
                source,
            })
        }) {
            Some(Ok(next)) => Some(next),
            Some(Err(e)) => return Outcome::Failed(e),
            None => None,
        };

        let title = match parsed.title.clone() {
            Some(title) => title,
            None => {
                ::log::warn!("No title found on {}, using {:?}", page, self.title_placeholder);
                self.title_placeholder.clone()
            }
        };
        ::log::info!("Processing: {}", title);

        let record = ChapterRecord::new(page.to_string(), title, parsed.body());
        if let Err(e) = self.sink.append(&record) {
            return Outcome::Failed(e);
        }

        match next {
            None => {
                ::log::info!("Reached the last chapter at {}", page);
                Outcome::Terminal {
                    record,
                    reason: TerminalReason::NoNextPage,
                }
            }
            Some(next) if !self.filter.admits(&next) => {
                ::log::info!("Link filter rejected next page: {}", next);
                Outcome::Terminal {
                    record,
                    reason: TerminalReason::Filtered(next),
                }
            }
            Some(next) => {
                ::log::debug!("Next page: {}", next);
                Outcome::Continue { record, next }
            }
        }
    }

    /// Walk from the start page until there is no next page, the ceiling is
    /// reached or a step fails
    pub async fn run(&self) -> WalkSummary {
        self.run_with(|_, _| {}).await
    }

    /// Like `run`, calling `on_chapter` with the running count after every
    /// chapter written
    pub async fn run_with<F>(&self, mut on_chapter: F) -> WalkSummary
    where
        F: FnMut(usize, &ChapterRecord),
    {
        let mut state = WalkState::new(self.start.clone(), self.max_chapters);
        ::log::info!(
            "Starting walk at {} (at most {} chapters, writing to {})",
            state.page,
            state.ceiling,
            self.sink.path().display()
        );

        let stop = loop {
            if state.at_ceiling() {
                ::log::info!("Chapter limit of {} reached", state.ceiling);
                break StopReason::CeilingReached {
                    pending: state.page.clone(),
                };
            }

            match self.step(&state.page).await {
                Outcome::Continue { record, next } => {
                    state.advance(next);
                    on_chapter(state.chapters, &record);

                    if !state.at_ceiling() {
                        let pause = sample_delay(&self.delay);
                        ::log::trace!("Sleeping {:?} before {}", pause, state.page);
                        tokio::time::sleep(pause).await;
                    }
                }
                Outcome::Terminal { record, reason } => {
                    state.chapters += 1;
                    on_chapter(state.chapters, &record);
                    break StopReason::Terminal(reason);
                }
                Outcome::Failed(error) => {
                    ::log::error!("Walk stopped at {}: {}", state.page, error);
                    break StopReason::Failed {
                        page: state.page.clone(),
                        error,
                    };
                }
            }
        };

        ::log::info!("Walk finished after {} chapters", state.chapters);
        WalkSummary {
            chapters: state.chapters,
            stop,
        }
    }
}
