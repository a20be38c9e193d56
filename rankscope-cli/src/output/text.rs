//! Text output formatting with progress bars and colors.

use chrono::{DateTime, Local, Utc};
use rankscope_core::{Report, ReportStatus, StoredReport};
use rankscope_fetch::CreditCostEntry;
use rankscope_metrics::AccountBalance;
use rankscope_report::ProgressEvent;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Rows shown per list section.
const LIST_ROWS: usize = 5;

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    // ========================================================================
    // Progress
    // ========================================================================

    /// Formats one progress event: `[█████░░░░░]  55% Comparing competitors`.
    pub fn format_progress(&self, event: &ProgressEvent) -> String {
        format!(
            "[{}] {:>3}% {}",
            self.progress_bar(f64::from(event.percent)),
            event.percent,
            event.step
        )
    }

    /// Renders a bar filled to `percent`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn progress_bar(&self, percent: f64) -> String {
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );
        self.cyan(&bar)
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Formats a report.
    pub fn format_report(&self, report: &Report) -> String {
        let mut lines = Vec::new();
        let summary = &report.summary;

        lines.push(format!(
            "{} {}",
            self.bold(&report.domain),
            self.dim(&format!("({}, market {})", report.brand, report.market))
        ));
        lines.push(self.dim(&format!(
            "Report {} · generated {}",
            report.id,
            format_time(report.generated_at)
        )));
        lines.push(String::new());

        // Executive summary
        lines.push(self.bold("Summary"));
        lines.push(format!(
            "  Organic traffic   {:>10}   keywords {}",
            format_number(summary.organic_traffic),
            format_number(summary.organic_keywords)
        ));
        lines.push(format!("  Paid traffic      {:>10}", format_number(summary.paid_traffic)));
        lines.push(format!(
            "  Backlinks         {:>10}   referring domains {}",
            format_number(summary.backlinks),
            format_number(summary.referring_domains)
        ));
        lines.push(format!(
            "  Followed links    {:>9.1}%",
            report.backlinks.summary.dofollow_percent()
        ));
        lines.push(format!("  Domain rank       {:>10}", summary.domain_inlink_rank));
        lines.push(format!("  AI share of voice {:>9.1}%", summary.ai_share_of_voice));
        let changes = summary.position_changes;
        lines.push(format!(
            "  Positions         {} up, {} down, {} new, {} lost",
            self.green(&changes.up.to_string()),
            self.red(&changes.down.to_string()),
            changes.new,
            changes.lost
        ));
        lines.push(String::new());

        // Keywords
        let dist = report.keywords.distribution;
        lines.push(format!(
            "{} {}",
            self.bold("Keywords"),
            self.dim(&format!("({} total)", format_number(report.keywords.total)))
        ));
        lines.push(format!(
            "  top3 {}  top10 {}  top20 {}  top50 {}  top100 {}",
            dist.top3, dist.top10, dist.top20, dist.top50, dist.top100
        ));
        lines.push(String::new());

        // Competitors
        let analysis = &report.competitors.analysis;
        if analysis.competitors.is_empty() {
            lines.push(format!("{} {}", self.bold("Competitors"), self.dim("none analysed")));
        } else {
            lines.push(format!(
                "{} {}",
                self.bold("Competitors"),
                analysis.competitors.join(", ")
            ));
            lines.push(format!(
                "  {} keyword gaps ({} shared), {} overlaps, {} backlink gaps",
                analysis.summary.keyword_gaps,
                analysis.summary.shared_keyword_gaps,
                analysis.summary.keyword_overlaps,
                analysis.summary.backlink_gaps
            ));
            for gap in analysis.keyword_gaps.iter().take(LIST_ROWS) {
                lines.push(format!(
                    "  {:<32} vol {:>7}  {} competitor(s)",
                    truncate(&gap.keyword, 32),
                    format_number(gap.volume),
                    gap.competitor_count
                ));
            }
            for gap in analysis.backlink_gaps.iter().take(LIST_ROWS) {
                lines.push(format!(
                    "  {:<32} rank {:>3}  {} competitor(s)",
                    truncate(&gap.domain, 32),
                    gap.domain_authority_score,
                    gap.competitor_count
                ));
            }
        }
        lines.push(String::new());

        // AI search
        lines.push(format!(
            "{} {}",
            self.bold("AI search"),
            self.dim(&format!("({} prompts)", report.ai_search.prompts.len()))
        ));
        for prompt in report.ai_search.prompts.iter().take(LIST_ROWS) {
            lines.push(format!(
                "  {:<12} {:<10} {}",
                prompt.engine,
                prompt.classification.as_str(),
                truncate(&prompt.prompt, 48)
            ));
        }
        lines.push(String::new());

        // Quick wins
        if !report.quick_wins.is_empty() {
            lines.push(self.bold("Quick wins"));
            for win in &report.quick_wins {
                lines.push(format!(
                    "  {} {}",
                    self.yellow("•"),
                    win.title
                ));
                lines.push(format!(
                    "    {} (~{} visits/month)",
                    win.description,
                    format_number(win.estimated_traffic)
                ));
            }
            lines.push(String::new());
        }

        // Diagnostics
        let diagnostics = &report.diagnostics;
        lines.push(self.dim(&format!(
            "{} calls · {} credits · {} degraded",
            diagnostics.call_count,
            format_number(diagnostics.total_credits),
            diagnostics.notes.len()
        )));
        for note in &diagnostics.notes {
            lines.push(self.dim(&format!("  {note}")));
        }

        lines.join("\n")
    }

    /// Formats a stored record: its status line, then the report if any.
    pub fn format_stored(&self, record: &StoredReport) -> String {
        let status = match &record.status {
            ReportStatus::Completed => self.green("completed"),
            ReportStatus::Failed { error } => self.red(&format!("failed: {error}")),
            other => self.yellow(&other.to_string()),
        };
        let header = format!(
            "{} {} {}",
            self.bold(&record.domain),
            status,
            self.dim(&format!("(expires {})", format_time(record.expires_at)))
        );

        match &record.report {
            Some(report) => format!("{header}\n\n{}", self.format_report(report)),
            None => header,
        }
    }

    // ========================================================================
    // Credits
    // ========================================================================

    /// Formats the credit price table and, when known, the balance.
    pub fn format_credits(
        &self,
        entries: &[CreditCostEntry],
        balance: Option<&AccountBalance>,
    ) -> String {
        let mut lines = Vec::new();

        if let Some(balance) = balance {
            lines.push(format!(
                "{} {} {}",
                self.bold("Balance"),
                self.green(&format_number(balance.credits)),
                self.dim(&format!("({} plan)", balance.plan))
            ));
            lines.push(String::new());
        }

        lines.push(self.bold("Credit prices"));
        lines.push(format!("  {:<34} {:>11} {:>10}", "Endpoint", "per request", "per record"));
        lines.push(format!("  {}", "─".repeat(57)));
        for entry in entries {
            lines.push(format!(
                "  {:<34} {:>11} {:>10}",
                entry.pattern, entry.cost.per_request, entry.cost.per_record
            ));
        }

        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Compact number: `950`, `12.3K`, `4.1M`.
#[allow(clippy::cast_precision_loss)]
pub fn format_number(n: u64) -> String {
    let f = n as f64;
    if f >= 1_000_000.0 {
        format!("{:.1}M", f / 1_000_000.0)
    } else if f >= 1_000.0 {
        format!("{:.1}K", f / 1_000.0)
    } else {
        n.to_string()
    }
}

fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(950), "950");
        assert_eq!(format_number(12_340), "12.3K");
        assert_eq!(format_number(4_100_000), "4.1M");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long keyword", 8), "a very …");
    }

    #[test]
    fn test_progress_clamps() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.progress_bar(140.0), "██████████");
        assert_eq!(formatter.progress_bar(-5.0), "░░░░░░░░░░");
    }
}
