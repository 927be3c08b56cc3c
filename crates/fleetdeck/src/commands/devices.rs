//! Device command handlers.

use tabled::Tabled;

use fleetdeck_core::{Console, Device, DeviceForm, DeviceQuery};

use crate::cli::{DeviceFields, DevicesArgs, DevicesCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "IMEI")]
    imei: String,
    #[tabled(rename = "QR")]
    qr_code: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Detail")]
    detail: String,
    #[tabled(rename = "Movements")]
    movements: usize,
}

impl From<&Device> for DeviceRow {
    fn from(d: &Device) -> Self {
        Self {
            id: d.id.clone(),
            imei: d.imei.clone(),
            qr_code: d.qr_code.clone(),
            location: d
                .location_type()
                .map_or_else(|| "\u{2500}".into(), |t| t.label().to_owned()),
            detail: d.location_detail().to_owned(),
            movements: d.movements.len(),
        }
    }
}

/// Multi-line detail view for `--output table`.
fn device_detail(device: &Device) -> String {
    let mut out = String::new();
    out.push_str(&format!("Device      {}\n", device.id));
    out.push_str(&format!("IMEI        {}\n", device.imei));
    out.push_str(&format!("QR code     {}\n", device.qr_code));
    out.push_str(&format!(
        "Location    {}  {}\n",
        device
            .location_type()
            .map_or("\u{2500}", |t| t.label()),
        device.location_detail()
    ));
    out.push_str(&format!(
        "Prod. WH    {}\n",
        util::dash(device.production_warehouse_id.as_deref())
    ));
    out.push_str(&format!(
        "Requisition {}\n",
        util::dash(device.installation_requisition_id.as_deref())
    ));

    if device.movements.is_empty() {
        out.push_str("\nNo movement history\n");
    } else {
        out.push_str("\nMovements (oldest first):\n");
        for m in &device.movements {
            let kind = m
                .movement_type
                .map_or_else(|| "\u{2500}".into(), |t| t.to_string());
            let status = m.status.map_or_else(|| "\u{2500}".into(), |s| s.to_string());
            let from = util::dash(m.source.as_deref());
            let to = util::dash(m.destination.as_deref());
            let when = m
                .started_at
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "\u{2500}".into());
            out.push_str(&format!("  {when}  {kind:<9} {status:<11} {from} → {to}\n"));
        }
    }

    out
}

// ── Form assembly ───────────────────────────────────────────────────

/// Apply flag values onto a form. Used for both create (empty form) and
/// update (form hydrated from the fetched record).
fn apply_fields(form: &mut DeviceForm, fields: &DeviceFields) {
    if let Some(ref v) = fields.imei {
        form.set_imei(v.clone());
    }
    if let Some(ref v) = fields.qr_code {
        form.set_qr_code(v.clone());
    }
    if let Some(v) = fields.location_type {
        form.set_location_type(Some(v));
    }
    if let Some(ref v) = fields.production_floor {
        form.set_production_floor(v.clone());
    }
    if let Some(ref v) = fields.warehouse {
        form.set_warehouse_id(v.clone());
    }
    if let Some(ref v) = fields.field_engineer {
        form.set_field_engineer_id(v.clone());
    }
    if let Some(ref v) = fields.vehicle_number {
        form.set_vehicle_number(v.clone());
    }
    if let Some(ref v) = fields.production_warehouse {
        form.set_production_warehouse_id(v.clone());
    }
    if let Some(ref v) = fields.requisition {
        form.set_installation_requisition_id(v.clone());
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: DevicesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        DevicesCommand::List {
            list,
            location_type,
            field_engineer,
        } => {
            let query = DeviceQuery {
                search: list.search.unwrap_or_default(),
                page: list.page,
                limit: list.limit,
                location_type,
                field_engineer_id: field_engineer,
            };

            let page = console.list_devices(&query).await?;

            if page.rows.is_empty() {
                if !global.quiet {
                    eprintln!("No devices found");
                }
                return Ok(());
            }

            let out = output::render_list(
                &global.output,
                &page.rows,
                |d| DeviceRow::from(d),
                |d| d.id.clone(),
            );
            output::print_output(&out, global.quiet);

            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                eprintln!("Page {} of {}", query.page, page.max_page);
            }
            Ok(())
        }

        DevicesCommand::Get { id } => {
            let device = console.read_device(&id).await?;
            let out = output::render_single(&global.output, &device, device_detail, |d| {
                d.id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        DevicesCommand::Create { fields } => {
            let mut form = DeviceForm::new();
            apply_fields(&mut form, &fields);

            if !form.validate() {
                return Err(util::form_invalid(form.errors()));
            }

            let created = console.create_device(&form.payload()).await?;
            output::success(
                &format!("Device {} created ({})", created.imei, created.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        DevicesCommand::Update { id, fields } => {
            // Hydrate from the current record, then resend the full payload.
            let current = console.read_device(&id).await?;
            let mut form = DeviceForm::edit(&current);
            apply_fields(&mut form, &fields);

            if !form.validate() {
                return Err(util::form_invalid(form.errors()));
            }

            let updated = console.update_device(&id, &form.payload()).await?;
            output::success(
                &format!("Device {} updated", updated.imei),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        DevicesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete device {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_device(&id).await?;
            output::success("Device deleted", &global.color, global.quiet);
            Ok(())
        }
    }
}
