//! Inventory listing command.

use meraki_core::{Dashboard, Organization};
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct InventoryRow {
    #[tabled(rename = "ORGANIZATION")]
    organization: String,
    #[tabled(rename = "NETWORK")]
    network: String,
    #[tabled(rename = "DEVICE")]
    device: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "SERIAL")]
    serial: String,
}

pub fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let orgs = dashboard.organizations();
    if orgs.is_empty() {
        output::notice("No organizations discovered", &global.color, global.quiet);
        return Ok(());
    }

    let rendered = output::render(&global.output, orgs, || rows(orgs), || lines(orgs));
    output::print_output(&rendered, global.quiet);
    Ok(())
}

/// One row per device; organizations and networks without devices still
/// get a placeholder row so they show up in the listing.
fn rows(orgs: &[Organization]) -> Vec<InventoryRow> {
    let mut rows = Vec::new();

    for org in orgs {
        if org.networks.is_empty() {
            rows.push(placeholder(&org.name, "-"));
            continue;
        }
        for network in &org.networks {
            if network.devices.is_empty() {
                rows.push(placeholder(&org.name, &network.name));
                continue;
            }
            for device in &network.devices {
                rows.push(InventoryRow {
                    organization: org.name.clone(),
                    network: network.name.clone(),
                    device: device.name.clone(),
                    model: device.model.clone(),
                    serial: device.serial.clone(),
                });
            }
        }
    }

    rows
}

fn placeholder(organization: &str, network: &str) -> InventoryRow {
    InventoryRow {
        organization: organization.to_owned(),
        network: network.to_owned(),
        device: "-".to_owned(),
        model: "-".to_owned(),
        serial: "-".to_owned(),
    }
}

/// Plain format: one serial per line.
fn lines(orgs: &[Organization]) -> Vec<String> {
    orgs.iter()
        .flat_map(|org| &org.networks)
        .flat_map(|network| &network.devices)
        .map(|device| device.serial.clone())
        .collect()
}
