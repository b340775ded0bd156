//! Top-talkers report command.

use meraki_core::{Dashboard, OrgReport, TopTalkersDeviceReport};
use tabled::Tabled;

use crate::cli::{GlobalOpts, TopTalkersArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct TalkerRow {
    #[tabled(rename = "ORGANIZATION")]
    organization: String,
    #[tabled(rename = "NETWORK")]
    network: String,
    #[tabled(rename = "DEVICE")]
    device: String,
    #[tabled(rename = "CLIENT")]
    client: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "SENT MB")]
    sent: String,
    #[tabled(rename = "RECV MB")]
    recv: String,
    #[tabled(rename = "TOTAL MB")]
    total: String,
}

pub async fn handle(
    dashboard: &mut Dashboard,
    args: &TopTalkersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let reports = dashboard.query_top_talkers(args.timespan, args.count).await;

    if reports.iter().all(OrgReport::is_empty) {
        output::notice("No client usage returned", &global.color, global.quiet);
    }

    let rendered = output::render(&global.output, &reports, || rows(&reports), || {
        lines(&reports)
    });
    output::print_output(&rendered, global.quiet);
    Ok(())
}

fn rows(reports: &[OrgReport<TopTalkersDeviceReport>]) -> Vec<TalkerRow> {
    let mut rows = Vec::new();

    for org in reports {
        for network in &org.networks {
            for device in &network.devices {
                for client in &device.clients {
                    rows.push(TalkerRow {
                        organization: org.name.clone(),
                        network: network.name.clone(),
                        device: device.name.clone(),
                        client: client.description.clone(),
                        ip: client.ip.clone(),
                        mac: client.mac.clone(),
                        sent: client.sent_mbytes.to_string(),
                        recv: client.recv_mbytes.to_string(),
                        total: client.total_mbytes.to_string(),
                    });
                }
            }
        }
    }

    rows
}

/// Plain format: `mac total_mbytes` per client, ranked order preserved.
fn lines(reports: &[OrgReport<TopTalkersDeviceReport>]) -> Vec<String> {
    reports
        .iter()
        .flat_map(|org| &org.networks)
        .flat_map(|network| &network.devices)
        .flat_map(|device| &device.clients)
        .map(|client| format!("{} {}", client.mac, client.total_mbytes))
        .collect()
}
