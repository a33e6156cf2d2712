//! Plain-text rendering of session snapshots and display models.
//!
//! Functions here only build strings; `main.rs` decides where they go.

use vidmod_core::HealthReport;
use vidmod_services::{
    format_file_size, CategoryBadge, DisplayModel, SessionSnapshot, SessionState,
    SeverityDisplay, Tone,
};

use crate::truncate_string;

const FILE_NAME_WIDTH: usize = 48;
const BAR_WIDTH: usize = 20;

pub fn tone_name(tone: Tone) -> &'static str {
    match tone {
        Tone::Green => "green",
        Tone::Yellow => "yellow",
        Tone::Red => "red",
        Tone::DarkRed => "dark red",
        Tone::Purple => "purple",
        Tone::Orange => "orange",
        Tone::Gray => "gray",
    }
}

/// `[########------------]` for a fraction in 0.0..=1.0
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// One status line for a snapshot, or `None` when there is nothing to say.
pub fn render_snapshot(snapshot: &SessionSnapshot, max_duration_secs: u64) -> Option<String> {
    if let Some(error) = &snapshot.error {
        return Some(format!("Error: {}", error));
    }

    let file = snapshot.selected_file.as_ref();
    let name = file
        .map(|f| truncate_string(f.name(), FILE_NAME_WIDTH))
        .unwrap_or_default();

    match snapshot.state {
        SessionState::Idle => None,
        SessionState::FileSelected => Some(format!(
            "Selected {} ({})\nVideos longer than {} seconds are trimmed to the first {} seconds.",
            name,
            file.map(|f| format_file_size(f.size())).unwrap_or_default(),
            max_duration_secs,
            max_duration_secs
        )),
        SessionState::Analyzing => Some(format!("Analyzing {}...", name)),
        SessionState::Completed => {
            let elapsed = match (snapshot.submitted_at, snapshot.finished_at) {
                (Some(start), Some(end)) => {
                    format!(" in {:.1}s", (end - start).num_milliseconds() as f64 / 1000.0)
                }
                _ => String::new(),
            };
            Some(format!("Analysis of {} completed{}", name, elapsed))
        }
        // Failed always carries an error, handled above
        SessionState::Failed => Some("Analysis failed".to_string()),
    }
}

fn render_category(badge: &CategoryBadge) -> String {
    format!("{} ({})", badge.label, tone_name(badge.tone))
}

/// Multi-line result block.
pub fn render_result(model: &DisplayModel) -> String {
    let mut lines = vec![
        "=== Analysis Result ===".to_string(),
        String::new(),
        format!(
            "Status:      {} ({})",
            model.status.label,
            tone_name(model.status.tone)
        ),
    ];

    if !model.categories.is_empty() {
        let categories: Vec<String> = model.categories.iter().map(render_category).collect();
        lines.push(format!("Categories:  {}", categories.join(", ")));
    }

    match &model.severity {
        Some(severity @ SeverityDisplay::Confidence { percent, tone, .. }) => {
            lines.push(format!(
                "Confidence:  {} {} ({})",
                progress_bar(severity.progress_percent() as f64 / 100.0, BAR_WIDTH),
                percent,
                tone_name(*tone)
            ));
        }
        Some(severity @ SeverityDisplay::Level { level, label, .. }) => {
            lines.push(format!(
                "Severity:    {} {}/5 {}",
                progress_bar(severity.progress_percent() as f64 / 100.0, BAR_WIDTH),
                level,
                label
            ));
        }
        None => {}
    }

    lines.push(format!("Method:      {}", model.method));

    if let Some(description) = &model.description {
        lines.push(String::new());
        lines.push(description.clone());
    }

    lines.join("\n")
}

pub fn render_health(report: &HealthReport) -> String {
    let mut lines = vec![format!("Service: {}", report.status)];
    if let Some(timestamp) = &report.timestamp {
        lines.push(format!("Checked: {}", timestamp));
    }
    for (name, available) in &report.services {
        let state = if *available {
            "configured"
        } else {
            "not configured"
        };
        lines.push(format!("  {:<12} {}", name, state));
    }
    lines.join("\n")
}
