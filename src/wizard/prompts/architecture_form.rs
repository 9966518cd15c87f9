//! Architecture form
//!
//! Each answer is applied to the controller as soon as it is given, so the
//! estimate shown after every field reflects the configuration so far.

use super::is_cancel;
use crate::api::ProvisioningBackend;
use crate::catalog;
use crate::model::{Architecture, STORAGE_GB_RANGE, SecurityGroup, VM_COUNT_RANGE};
use crate::wizard::controller::WizardController;
use crate::wizard::render::{display_estimate, display_step_header, wizard_render_config};
use crate::wizard::state::WizardStep;
use colored::Colorize;
use inquire::{CustomType, InquireError, Select};

/// Result of the architecture form
#[derive(Debug, Clone, PartialEq)]
pub enum ArchitectureFormResult {
    /// Every field answered; the wizard may move to review
    Completed,
    /// User wants to go back
    Back,
    /// User cancelled the wizard
    Cancelled,
}

fn show_estimate<B: ProvisioningBackend>(controller: &WizardController<B>) {
    let state = controller.state();
    display_estimate(state.estimate(), state.is_estimating());
}

async fn ask_fields<B: ProvisioningBackend>(
    controller: &mut WizardController<B>,
) -> Result<(), InquireError> {
    let Some(provider) = controller.state().provider() else {
        return Ok(());
    };
    let current = controller.state().architecture().clone();

    let vm_count = CustomType::<u32>::new("Number of VMs:")
        .with_render_config(wizard_render_config())
        .with_default(current.vm_count)
        .with_help_message(&format!(
            "{}-{}, values outside are clamped",
            VM_COUNT_RANGE.start(),
            VM_COUNT_RANGE.end()
        ))
        .with_error_message("Please enter a whole number")
        .prompt()?;
    controller.set_vm_count(vm_count).await;
    show_estimate(controller);

    let types = catalog::instance_types_for(provider);
    let labels: Vec<String> = types.iter().map(|t| t.label()).collect();
    let start = types
        .iter()
        .position(|t| t.id == current.instance_type)
        .unwrap_or(0);
    let chosen = Select::new("Instance type:", labels)
        .with_render_config(wizard_render_config())
        .with_starting_cursor(start)
        .with_page_size(8)
        .raw_prompt()?;
    if let Err(e) = controller.set_instance_type(types[chosen.index].id).await {
        log::warn!("{}", e);
    }
    show_estimate(controller);

    let images = catalog::OPERATING_SYSTEMS;
    let names: Vec<&str> = images.iter().map(|os| os.name).collect();
    let start = images.iter().position(|os| os.id == current.os).unwrap_or(0);
    let os = Select::new("Operating system:", names)
        .with_render_config(wizard_render_config())
        .with_starting_cursor(start)
        .raw_prompt()?;
    controller.set_os(images[os.index].id).await;

    let storage_gb = CustomType::<u32>::new("Storage per VM (GB):")
        .with_render_config(wizard_render_config())
        .with_default(current.storage_gb)
        .with_help_message(&format!(
            "{}-{} GB, values outside are clamped",
            STORAGE_GB_RANGE.start(),
            STORAGE_GB_RANGE.end()
        ))
        .with_error_message("Please enter a whole number")
        .prompt()?;
    controller.set_storage_gb(storage_gb).await;
    show_estimate(controller);

    let groups = SecurityGroup::all();
    let group_labels: Vec<String> = groups
        .iter()
        .map(|g| {
            let ports: Vec<String> = g.ports().iter().map(u16::to_string).collect();
            format!("{}  {}", g.label(), format!("ports {}", ports.join(", ")).dimmed())
        })
        .collect();
    let start = groups
        .iter()
        .position(|g| *g == current.security_group)
        .unwrap_or(0);
    let group = Select::new("Security group:", group_labels)
        .with_render_config(wizard_render_config())
        .with_starting_cursor(start)
        .raw_prompt()?;
    controller.set_security_group(groups[group.index]).await;

    Ok(())
}

fn summary_line(arch: &Architecture) -> String {
    format!(
        "{} x {} · {} · {} GB · {}",
        arch.vm_count, arch.instance_type, arch.os, arch.storage_gb, arch.security_group
    )
}

/// Walk through the architecture fields and decide where to go next
pub async fn edit_architecture<B: ProvisioningBackend>(
    controller: &mut WizardController<B>,
) -> ArchitectureFormResult {
    display_step_header(WizardStep::Architecture);
    show_estimate(controller);

    loop {
        match ask_fields(controller).await {
            Ok(()) => {}
            Err(e) if is_cancel(&e) => return ArchitectureFormResult::Cancelled,
            Err(e) => {
                log::warn!("Architecture prompt failed: {}", e);
                return ArchitectureFormResult::Cancelled;
            }
        }

        println!(
            "\n  {} {}",
            "│".dimmed(),
            summary_line(controller.state().architecture()).cyan()
        );
        show_estimate(controller);

        let next = Select::new(
            "Next:",
            vec!["Continue to review", "Edit again", "Back", "Cancel"],
        )
        .with_render_config(wizard_render_config())
        .prompt();
        match next {
            Ok("Continue to review") => return ArchitectureFormResult::Completed,
            Ok("Edit again") => continue,
            Ok("Back") => return ArchitectureFormResult::Back,
            Ok(_) => return ArchitectureFormResult::Cancelled,
            Err(e) => {
                if !is_cancel(&e) {
                    log::warn!("Architecture prompt failed: {}", e);
                }
                return ArchitectureFormResult::Cancelled;
            }
        }
    }
}
