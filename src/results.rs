use crate::error::WalkError;
use crate::utils::separator_line;
use url::Url;

/// One chapter as extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterRecord {
    /// URL of the page the chapter came from
    pub url: String,

    /// Chapter title, or the configured placeholder
    pub title: String,

    /// Body fragments joined with newlines
    pub body: String,
}

impl ChapterRecord {
    /// Create a new chapter record
    pub fn new(url: String, title: String, body: String) -> Self {
        Self { url, title, body }
    }

    /// Text appended to the output file for this chapter
    ///
    /// `<title>\n\n<body>\n\n<separator>\n\n`
    pub fn render(&self) -> String {
        format!("{}\n\n{}\n\n{}\n\n", self.title, self.body, separator_line())
    }
}

/// Why a step ended the walk without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalReason {
    /// The page has no "next" link
    NoNextPage,
    /// The "next" link was rejected by the link filter
    Filtered(Url),
}

/// Result of a single step
#[derive(Debug)]
pub enum Outcome {
    /// The chapter was written and the walk may go on to `next`
    Continue { record: ChapterRecord, next: Url },
    /// The chapter was written and there is nowhere to go
    Terminal {
        record: ChapterRecord,
        reason: TerminalReason,
    },
    /// Nothing was written for this page
    Failed(WalkError),
}

/// Why the driving loop stopped
#[derive(Debug)]
pub enum StopReason {
    Terminal(TerminalReason),
    /// The ceiling was hit while a next page was still pending
    CeilingReached { pending: Url },
    Failed { page: Url, error: WalkError },
}

/// Final report of a walk
#[derive(Debug)]
pub struct WalkSummary {
    /// Number of chapters appended to the sink
    pub chapters: usize,
    pub stop: StopReason,
}

impl WalkSummary {
    pub fn is_success(&self) -> bool {
        !matches!(self.stop, StopReason::Failed { .. })
    }
}
