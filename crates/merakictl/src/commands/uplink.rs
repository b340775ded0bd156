//! Uplink loss/latency report command.

use meraki_core::{Dashboard, OrgReport, UplinkDeviceReport};
use tabled::Tabled;

use crate::cli::{GlobalOpts, UplinkArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct UplinkRow {
    #[tabled(rename = "ORGANIZATION")]
    organization: String,
    #[tabled(rename = "NETWORK")]
    network: String,
    #[tabled(rename = "DEVICE")]
    device: String,
    #[tabled(rename = "SERIAL")]
    serial: String,
    #[tabled(rename = "LOSS % AVG/MIN/MAX")]
    loss: String,
    #[tabled(rename = "LATENCY MS AVG/MIN/MAX")]
    latency: String,
}

pub async fn handle(
    dashboard: &mut Dashboard,
    args: &UplinkArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let reports = dashboard
        .query_uplink_metrics_with(&args.ip, args.timespan, &args.uplink)
        .await;

    if reports.iter().all(OrgReport::is_empty) {
        output::notice("No uplink metrics returned", &global.color, global.quiet);
    }

    let rendered = output::render(&global.output, &reports, || rows(&reports), || {
        lines(&reports)
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn rows(reports: &[OrgReport<UplinkDeviceReport>]) -> Vec<UplinkRow> {
    let mut rows = Vec::new();

    for org in reports {
        for network in &org.networks {
            for device in &network.devices {
                let p = &device.performance;
                rows.push(UplinkRow {
                    organization: org.name.clone(),
                    network: network.name.clone(),
                    device: device.name.clone(),
                    serial: device.serial.clone(),
                    loss: format!(
                        "{}/{}/{}",
                        p.avg_loss_percent, p.min_loss_percent, p.max_loss_percent
                    ),
                    latency: format!(
                        "{}/{}/{}",
                        p.avg_latency_ms, p.min_latency_ms, p.max_latency_ms
                    ),
                });
            }
        }
    }

    rows
}

/// Plain format: `serial avg_latency_ms avg_loss_percent` per device.
fn lines(reports: &[OrgReport<UplinkDeviceReport>]) -> Vec<String> {
    reports
        .iter()
        .flat_map(|org| &org.networks)
        .flat_map(|network| &network.devices)
        .map(|device| {
            format!(
                "{} {} {}",
                device.serial,
                device.performance.avg_latency_ms,
                device.performance.avg_loss_percent
            )
        })
        .collect()
}
