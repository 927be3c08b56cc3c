//! Alert command handlers.
//!
//! Alerts have no backing endpoint; the data comes from
//! `fleetdeck_core::mock` and filtering happens client-side.

use tabled::Tabled;

use fleetdeck_core::{mock, Alert};

use crate::cli::{AlertsArgs, AlertsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AlertRow {
    #[tabled(rename = "Vehicle")]
    vehicle: String,
    #[tabled(rename = "IMEI")]
    imei: String,
    #[tabled(rename = "Type")]
    alert_type: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Position")]
    position: String,
}

impl From<&Alert> for AlertRow {
    fn from(a: &Alert) -> Self {
        Self {
            vehicle: a.vehicle_number.clone(),
            imei: a.imei.clone(),
            alert_type: a.alert_type.label().into(),
            status: a.status.to_string(),
            time: a.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            position: format!("{:.4}, {:.4}", a.latitude, a.longitude),
        }
    }
}

/// Multi-line detail view for `--output table`.
fn alert_detail(alert: &Alert) -> String {
    let mut out = format!(
        "Vehicle   {}\n\
         IMEI      {}\n\
         Type      {}\n\
         Status    {}\n\
         Time      {}\n\
         Position  {:.4}, {:.4}\n",
        alert.vehicle_number,
        alert.imei,
        alert.alert_type.label(),
        alert.status,
        alert.timestamp.format("%Y-%m-%d %H:%M UTC"),
        alert.latitude,
        alert.longitude,
    );

    out.push_str("\nIgnition history (sample data):\n");
    for event in mock::ignition_history() {
        let state = if event.ignition_on { "ON " } else { "OFF" };
        out.push_str(&format!(
            "  {}  {}  {}\n",
            event.timestamp.format("%Y-%m-%d %H:%M"),
            state,
            event.location
        ));
    }

    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: AlertsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AlertsCommand::List { status, alert_type } => {
            let alerts: Vec<Alert> = mock::vehicle_alerts()
                .into_iter()
                .filter(|a| status.is_none_or(|s| a.status == s))
                .filter(|a| alert_type.is_none_or(|t| a.alert_type == t))
                .collect();

            if alerts.is_empty() {
                if !global.quiet {
                    eprintln!("No alerts found");
                }
                return Ok(());
            }

            let out = output::render_list(&global.output, &alerts, |a| AlertRow::from(a), |a| {
                a.vehicle_number.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AlertsCommand::Show { vehicle } => {
            let alert = mock::vehicle_alerts()
                .into_iter()
                .find(|a| a.vehicle_number.eq_ignore_ascii_case(&vehicle))
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "alert".into(),
                    identifier: vehicle,
                    list_command: "alerts list".into(),
                })?;

            let out = output::render_single(&global.output, &alert, alert_detail, |a| {
                a.vehicle_number.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
