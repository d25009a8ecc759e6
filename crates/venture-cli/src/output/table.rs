//! Aligned text tables for `--format table`.
//!
//! Cells carry their own alignment and tone, so colour is chosen from the
//! domain value that produced the cell rather than by matching rendered text.

use std::fmt::Display;

use venture_core::enums::{ComponentStatus, Phase, Recommendation};

const GAP: &str = "  ";
const MIN_COLUMN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Done,
    Active,
    Bad,
}

impl Tone {
    #[must_use]
    pub const fn phase(phase: Phase) -> Self {
        match phase {
            Phase::ReportReady => Self::Done,
            Phase::Collecting | Phase::SelectingComparisons | Phase::Questionnaire => {
                Self::Active
            }
        }
    }

    #[must_use]
    pub const fn component(status: ComponentStatus) -> Self {
        match status {
            ComponentStatus::Confirmed => Self::Done,
            ComponentStatus::Pending => Self::Active,
        }
    }

    #[must_use]
    pub const fn recommendation(recommendation: Recommendation) -> Self {
        match recommendation {
            Recommendation::Yes => Self::Done,
            Recommendation::Maybe | Recommendation::Neutral => Self::Active,
            Recommendation::No => Self::Bad,
        }
    }

    const fn ansi(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Done => Some("32"),
            Self::Active => Some("33"),
            Self::Bad => Some("31"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    text: String,
    tone: Tone,
    right: bool,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Plain,
            right: false,
        }
    }

    pub fn number(value: impl Display) -> Self {
        Self {
            text: value.to_string(),
            tone: Tone::Plain,
            right: true,
        }
    }

    pub fn toned(value: impl Display, tone: Tone) -> Self {
        Self {
            text: value.to_string(),
            tone,
            right: false,
        }
    }

    /// `-` for a missing value.
    pub fn optional(value: Option<impl Display>) -> Self {
        value.map_or_else(|| Self::text("-"), |v| Self::text(v.to_string()))
    }

    fn render(&self, width: usize, color: bool) -> String {
        let shown = truncate(&self.text, width);
        let pad = " ".repeat(width.saturating_sub(shown.chars().count()));
        let shown = match self.tone.ansi() {
            Some(code) if color => format!("\u{1b}[{code}m{shown}\u{1b}[0m"),
            _ => shown,
        };
        if self.right {
            format!("{pad}{shown}")
        } else {
            format!("{shown}{pad}")
        }
    }
}

/// A titled table of cells.
#[derive(Clone, Debug)]
pub struct Table {
    title: Option<&'static str>,
    headers: Vec<&'static str>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    #[must_use]
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            title: None,
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn titled(title: &'static str, headers: &[&'static str]) -> Self {
        Self {
            title: Some(title),
            ..Self::new(headers)
        }
    }

    /// Two-column field/value table.
    #[must_use]
    pub fn fields(title: &'static str) -> Self {
        Self::titled(title, &["field", "value"])
    }

    pub fn push(&mut self, row: Vec<Cell>) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn field(&mut self, name: &str, value: Cell) -> &mut Self {
        self.push(vec![Cell::text(name), value])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn render(&self, max_width: Option<usize>, color: bool) -> String {
        let floors: Vec<usize> = self
            .headers
            .iter()
            .map(|h| h.chars().count().max(MIN_COLUMN))
            .collect();
        let mut widths: Vec<usize> = floors
            .iter()
            .enumerate()
            .map(|(i, floor)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.text.chars().count())
                    .fold(*floor, usize::max)
            })
            .collect();
        if let Some(max_width) = max_width {
            shrink_to(&mut widths, &floors, max_width);
        }

        let mut lines = Vec::with_capacity(self.rows.len() + 3);
        if let Some(title) = self.title {
            lines.push(format!("[{title}]"));
        }
        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| Cell::text(*h).render(*w, false))
            .collect::<Vec<_>>()
            .join(GAP);
        let divider = "-".repeat(header.chars().count());
        lines.push(header);
        lines.push(divider);

        let blank = Cell::text("-");
        for row in &self.rows {
            let line = widths
                .iter()
                .enumerate()
                .map(|(i, w)| row.get(i).unwrap_or(&blank).render(*w, color))
                .collect::<Vec<_>>()
                .join(GAP);
            lines.push(line.trim_end().to_string());
        }
        lines.join("\n")
    }
}

/// Narrow the widest column above its floor until the row fits.
fn shrink_to(widths: &mut [usize], floors: &[usize], max_width: usize) {
    let gaps = widths.len().saturating_sub(1) * GAP.len();
    while widths.iter().sum::<usize>() + gaps > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(i, w)| **w > floors[*i])
            .max_by_key(|(_, w)| **w)
            .map(|(i, _)| i);
        let Some(i) = widest else { break };
        widths[i] -= 1;
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
