//! Shared rendering utilities for wizard prompts

use super::state::WizardStep;
use crate::error::WizardError;
use crate::model::{CostEstimate, DeploymentPhase, DeploymentStatus};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Color, IndexPrefix, RenderConfig, StyleSheet, Styled};

/// Get the standard render config for wizard prompts
pub fn wizard_render_config() -> RenderConfig<'static> {
    RenderConfig::default()
        .with_highlighted_option_prefix(Styled::new("▸ ").with_fg(Color::LightCyan))
        .with_option_index_prefix(IndexPrefix::Simple)
        .with_selected_option(Some(StyleSheet::new().with_fg(Color::LightCyan)))
        .with_scroll_up_prefix(Styled::new("▲ "))
        .with_scroll_down_prefix(Styled::new("▼ "))
}

fn box_width() -> usize {
    let term_width = term_size::dimensions().map(|(w, _)| w).unwrap_or(80);
    term_width.clamp(40, 70)
}

/// Display a wizard step header box
pub fn display_step_header(step: WizardStep) {
    let box_width = box_width();
    let inner_width = box_width - 4;

    println!();
    let header = format!("─ Step {}/{} · {} ", step.number(), WizardStep::all().len(), step.title());
    println!(
        "{}{}{}",
        "┌".bright_cyan(),
        header.bright_cyan(),
        "─".repeat(inner_width.saturating_sub(header.chars().count())).bright_cyan()
    );

    for line in textwrap::wrap(step.description(), inner_width - 2) {
        println!("{}  {}", "│".dimmed(), line.white());
    }

    println!("{}{}", "└".dimmed(), "─".repeat(box_width - 1).dimmed());
    println!();
}

/// Print the current step's error banner
pub fn display_banner(banner: &WizardError) {
    let text = format!("✗ {}", banner);
    for line in textwrap::wrap(&text, box_width()) {
        println!("{}", line.red().bold());
    }
    println!();
}

/// Format a status indicator (checkmark or X)
pub fn status_indicator(ok: bool) -> String {
    if ok {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Print a monthly estimate with its breakdown
pub fn display_estimate(estimate: Option<&CostEstimate>, pending: bool) {
    match estimate {
        Some(e) => {
            println!(
                "  {} {}{}",
                "Estimated monthly cost:".bold(),
                format_money(e.monthly_cost).bright_green().bold(),
                if pending { " (updating…)".dimmed().to_string() } else { String::new() }
            );
            println!(
                "    {} {}   {} {}   {} {}",
                "compute".dimmed(),
                format_money(e.breakdown.compute),
                "storage".dimmed(),
                format_money(e.breakdown.storage),
                "network".dimmed(),
                format_money(e.breakdown.network)
            );
        }
        None if pending => println!("  {}", "Calculating estimate…".dimmed()),
        None => println!("  {}", "No estimate available".dimmed()),
    }
    println!();
}

/// Print a `label: value` row in the review summary
pub fn display_field(label: &str, value: &str) {
    println!("  {} {:<16} {}", "│".dimmed(), format!("{}:", label), value.cyan());
}

pub fn phase_colored(phase: DeploymentPhase) -> String {
    match phase {
        DeploymentPhase::Completed => phase.as_str().green().bold().to_string(),
        DeploymentPhase::Failed => phase.as_str().red().bold().to_string(),
        DeploymentPhase::Unknown => phase.as_str().dimmed().to_string(),
        _ => phase.as_str().yellow().to_string(),
    }
}

/// Spinner shown while a one-shot request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Progress bar used while a deployment runs
pub fn deployment_progress_bar(deployment_id: &str) -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix} [{bar:30.cyan/blue}] {pos:>3}% {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▓░");
    bar.set_style(style);
    bar.set_prefix(deployment_id.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(120));
    bar
}

pub fn update_progress_bar(bar: &ProgressBar, status: &DeploymentStatus) {
    bar.set_position(u64::from(status.progress));
    bar.set_message(format!("{} · {}", phase_colored(status.status), status.message));
}

/// Print the final state of a deployment, including outputs when present
pub fn display_deployment_result(status: &DeploymentStatus) {
    println!();
    println!(
        "{} Deployment {} {}",
        status_indicator(status.status == DeploymentPhase::Completed),
        status.id.bold(),
        phase_colored(status.status)
    );
    if !status.message.is_empty() {
        println!("  {}", status.message.dimmed());
    }
    if let Some(elapsed) = status.elapsed() {
        println!("  {} {}s", "Duration:".dimmed(), elapsed.num_seconds());
    }

    if let Some(outputs) = &status.outputs {
        println!();
        println!("{}", "─── Resources ───────────────────────────────".dimmed());
        for (i, instance_id) in outputs.instance_ids.iter().enumerate() {
            let public = outputs.public_ips.get(i).map(String::as_str).unwrap_or("-");
            let private = outputs.private_ips.get(i).map(String::as_str).unwrap_or("-");
            println!(
                "  {} {}  public {}  private {}",
                "▸".cyan(),
                instance_id.bold(),
                public.cyan(),
                private.dimmed()
            );
        }
    }
    println!();
}
