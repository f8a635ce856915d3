//! Terminal rendering for catalog and portfolio views

use std::fmt::Write as _;

use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use airdrop_core::catalog::{AirdropRecord, AirdropStatus, AirdropType, EstimatedValue};
use airdrop_core::tracking::Portfolio;

const TIP_WIDTH: usize = 56;

fn status_icon(status: AirdropStatus) -> &'static str {
    match status {
        AirdropStatus::Confirmed => "🟢",
        AirdropStatus::Likely => "🟡",
        AirdropStatus::Possible => "🟠",
        AirdropStatus::Ended => "🔴",
        AirdropStatus::Unknown => "⚪",
    }
}

fn type_label(kind: AirdropType) -> &'static str {
    match kind {
        AirdropType::Mainnet => "🔗 Mainnet",
        AirdropType::Testnet => "🧪 Testnet",
        AirdropType::Usage => "👤 Usage",
        AirdropType::Holder => "💎 Holder",
        AirdropType::Other => "❔ Other",
    }
}

/// Emoji for the tracking statuses the tool suggests; anything else is neutral
pub fn tracking_status_icon(status: &str) -> &'static str {
    match status {
        "interested" => "💭",
        "farming" => "🟢",
        "completed" => "✅",
        "claimed" => "💰",
        _ => "⚪",
    }
}

/// `$500`, `$1k`, `$1.5k`
pub fn format_usd(amount: f64) -> String {
    if amount >= 1000.0 {
        let thousands = amount / 1000.0;
        if amount % 1000.0 == 0.0 {
            format!("${thousands:.0}k")
        } else {
            format!("${thousands:.1}k")
        }
    } else {
        format!("${amount}")
    }
}

pub fn format_value(value: &EstimatedValue) -> String {
    format!("{}-{}", format_usd(value.min), format_usd(value.max))
}

/// Five slots, one star per difficulty point
pub fn format_difficulty(difficulty: u8) -> String {
    let filled = usize::from(difficulty.min(5));
    format!("{}{}", "⭐".repeat(filled), "○".repeat(5 - filled))
}

pub fn format_confidence(confidence: u8) -> String {
    let icon = match confidence {
        90.. => "🟢",
        70..=89 => "🟡",
        50..=69 => "🟠",
        _ => "🔴",
    };
    format!("{icon} {confidence}%")
}

fn bar(filled: usize, width: usize) -> String {
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (f64::from(percent.min(100)) / 100.0 * width as f64).round() as usize;
    format!("{} {percent}%", bar(filled, width))
}

/// Greedy word wrap; a single word longer than `width` gets its own line
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn rounded_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

#[derive(Tabled)]
struct AirdropRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Est. Value")]
    value: String,
    #[tabled(rename = "Deadline")]
    deadline: String,
    #[tabled(rename = "Difficulty")]
    difficulty: String,
}

/// Records grouped under their status heading, in status order
pub fn airdrop_list(records: &[&AirdropRecord]) -> String {
    if records.is_empty() {
        return "⚠️  No airdrops found matching your criteria.\n".to_string();
    }

    let mut out = String::new();
    for status in AirdropStatus::ORDER {
        let rows: Vec<AirdropRow> = records
            .iter()
            .filter(|r| r.status == status)
            .map(|r| AirdropRow {
                project: r.name.clone(),
                value: format_value(&r.estimated_value),
                deadline: r.deadline.clone().unwrap_or_else(|| "Unknown".to_string()),
                difficulty: "⭐".repeat(usize::from(r.difficulty.min(5))),
            })
            .collect();
        if rows.is_empty() {
            continue;
        }

        let _ = writeln!(
            out,
            "\n{} {}",
            status_icon(status),
            status.as_str().to_uppercase()
        );
        let _ = writeln!(out, "{}", rounded_table(&rows));
    }

    let _ = writeln!(out, "\n📊 Total: {} airdrops", records.len());
    out
}

pub fn airdrop_detail(airdrop: &AirdropRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n🎯 {} Airdrop", airdrop.name);
    let _ = writeln!(out, "{}\n", "═".repeat(60));

    let _ = writeln!(
        out,
        "Status: {} {} ({})",
        status_icon(airdrop.status),
        airdrop.status.as_str().to_uppercase(),
        format_confidence(airdrop.confidence)
    );
    let _ = writeln!(out, "Type: {}", type_label(airdrop.kind));
    let _ = writeln!(out, "Chain: {}", airdrop.chain.as_deref().unwrap_or("Unknown"));
    let _ = writeln!(
        out,
        "Estimated Value: 💰 {}",
        format_value(&airdrop.estimated_value)
    );
    let _ = writeln!(
        out,
        "Deadline: ⏰ {}",
        airdrop.deadline.as_deref().unwrap_or("Unknown")
    );
    let _ = writeln!(
        out,
        "Difficulty: {} ({}/5)",
        format_difficulty(airdrop.difficulty),
        airdrop.difficulty
    );
    if let Some(funding) = &airdrop.funding_raised {
        let _ = writeln!(out, "Funding: {funding}");
    }

    if !airdrop.requirements.is_empty() {
        let _ = writeln!(out, "\n📋 Requirements:\n{}", "─".repeat(40));
        for requirement in &airdrop.requirements {
            let filled = (requirement.weight / 10.0).round().clamp(0.0, 10.0) as usize;
            let _ = writeln!(out, "  {} {}", bar(filled, 10), requirement.task);
        }
    }

    if !airdrop.tips.is_empty() {
        let _ = writeln!(out, "\n💡 Pro Tips:\n{}", "─".repeat(40));
        for tip in &airdrop.tips {
            for (i, line) in wrap(tip, TIP_WIDTH).iter().enumerate() {
                let bullet = if i == 0 { "•" } else { " " };
                let _ = writeln!(out, "  {bullet} {line}");
            }
        }
    }

    if !airdrop.links.is_empty() {
        let _ = writeln!(out, "\n🔗 Links:\n{}", "─".repeat(40));
        for (label, url) in &airdrop.links {
            let _ = writeln!(out, "  • {}: {url}", capitalize(label));
        }
    }

    out
}

#[derive(Tabled)]
struct PortfolioRow {
    #[tabled(rename = "Project")]
    project: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Progress")]
    progress: String,
}

pub fn portfolio(view: &Portfolio<'_>) -> String {
    let stats = &view.stats;
    let mut out = String::from("\n📊 Your Airdrop Portfolio\n");

    if stats.count == 0 {
        out.push_str("\nYou are not tracking any airdrops yet.\n");
        out.push_str("Use \"airdrops track <project>\" to start tracking.\n");
        return out;
    }

    let _ = writeln!(out, "{}\n", "═".repeat(70));
    let _ = writeln!(out, "Tracking: {} airdrops", stats.count);
    let _ = writeln!(
        out,
        "Estimated Total Value: 💰 {}-{}\n",
        format_usd(stats.total_value_min),
        format_usd(stats.total_value_max)
    );

    let rows: Vec<PortfolioRow> = view
        .tracking
        .iter()
        .map(|t| PortfolioRow {
            project: t.airdrop.name.clone(),
            status: format!(
                "{} {}",
                tracking_status_icon(&t.record.status),
                t.record.status
            ),
            progress: progress_bar(t.record.progress, 25),
        })
        .collect();
    if !rows.is_empty() {
        let _ = writeln!(out, "{}", rounded_table(&rows));
    }

    if !view.upcoming_deadlines.is_empty() {
        out.push_str("\n⚠️  Upcoming Deadlines:\n");
        for u in &view.upcoming_deadlines {
            let _ = writeln!(
                out,
                "  • {}: {} ({} days)",
                u.airdrop.name,
                u.airdrop.deadline.as_deref().unwrap_or("Unknown"),
                u.days_left
            );
        }
    }

    out
}
