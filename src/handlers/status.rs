use crate::api::{Backend, DeploymentSummary, ProvisioningBackend};
use crate::config::types::Config;
use crate::wizard::poller::spawn_status_poller;
use crate::wizard::render::{
    deployment_progress_bar, display_deployment_result, phase_colored, update_progress_bar,
};
use colored::Colorize;
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn handle_status(
    config: &Config,
    deployment_id: &str,
    watch: bool,
    json: bool,
) -> crate::Result<()> {
    let backend = Arc::new(Backend::from_config(config)?);

    if !watch {
        let status = backend.deployment_status(deployment_id).await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&status)?);
        } else {
            display_deployment_result(&status);
        }
        return Ok(());
    }

    // unknown IDs fail here instead of polling forever
    let first = backend.deployment_status(deployment_id).await?;
    if first.is_terminal() {
        if json {
            println!("{}", serde_json::to_string_pretty(&first)?);
        } else {
            display_deployment_result(&first);
        }
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _poller = spawn_status_poller(
        backend,
        deployment_id.to_string(),
        config.polling.interval(),
        1,
        tx,
    );

    let bar = (!json).then(|| deployment_progress_bar(deployment_id));
    let mut last = None;
    while let Some(update) = rx.recv().await {
        match update.result {
            Ok(status) => {
                match &bar {
                    Some(bar) => update_progress_bar(bar, &status),
                    None => println!("{}", serde_json::to_string(&status)?),
                }
                last = Some(status);
            }
            Err(message) => {
                if let Some(bar) = &bar {
                    bar.println(format!("{} {}", "⚠".yellow(), message));
                }
            }
        }
    }
    if let Some(bar) = bar {
        bar.finish_and_clear();
        if let Some(status) = &last {
            display_deployment_result(status);
        }
    }
    Ok(())
}

fn summary_row(d: &DeploymentSummary) -> String {
    format!(
        "{:<20} {:<14} {:>4}%  {:<25} {}",
        d.deployment_id,
        phase_colored(d.status),
        d.progress.clamp(0, 100),
        d.start_time.as_deref().unwrap_or("-"),
        d.message.dimmed()
    )
}

pub async fn handle_deployments(config: &Config, json: bool) -> crate::Result<()> {
    let backend = Backend::from_config(config)?;
    let deployments = backend.list_deployments().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&deployments)?);
        return Ok(());
    }
    if deployments.is_empty() {
        println!("{}", "No deployments yet.".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<20} {:<14} {:>5}  {:<25} {}",
            "ID", "STATUS", "PROG", "STARTED", "MESSAGE"
        )
        .bold()
    );
    for d in &deployments {
        println!("{}", summary_row(d));
    }
    Ok(())
}
