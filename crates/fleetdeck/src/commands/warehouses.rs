//! Warehouse command handlers.

use tabled::Tabled;

use fleetdeck_core::{Console, Warehouse, WarehouseForm, WarehouseQuery};

use crate::cli::{GlobalOpts, OutputFormat, WarehouseFields, WarehousesArgs, WarehousesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct WarehouseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    warehouse_type: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "City")]
    city: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Warehouse> for WarehouseRow {
    fn from(w: &Warehouse) -> Self {
        Self {
            id: w.id.clone(),
            code: w.code.clone(),
            name: w.name.clone(),
            warehouse_type: w
                .warehouse_type
                .map_or_else(|| "\u{2500}".into(), |t| t.label().to_owned()),
            owner: w.owner_label(),
            city: w.city.clone(),
            status: w.status.to_string(),
        }
    }
}

/// Multi-line detail view for `--output table`.
fn warehouse_detail(warehouse: &Warehouse) -> String {
    let coords = match (warehouse.latitude, warehouse.longitude) {
        (Some(lat), Some(lng)) => format!("{lat:.4}, {lng:.4}"),
        _ => "\u{2500}".into(),
    };

    format!(
        "Warehouse  {}\n\
         Code       {}\n\
         Name       {}\n\
         Type       {}\n\
         Owner      {}\n\
         Address    {}, {}, {} {}\n\
         Position   {}\n\
         Contact    {}  {}  {}\n\
         Status     {}\n\
         Remarks    {}\n",
        warehouse.id,
        warehouse.code,
        warehouse.name,
        warehouse
            .warehouse_type
            .map_or("\u{2500}", |t| t.label()),
        warehouse.owner_label(),
        warehouse.address_line,
        warehouse.city,
        warehouse.state,
        warehouse.pincode,
        coords,
        warehouse.contact_name,
        warehouse.contact_email,
        warehouse.contact_mobile,
        warehouse.status,
        if warehouse.remarks.is_empty() {
            "\u{2500}"
        } else {
            &warehouse.remarks
        },
    )
}

// ── Form assembly ───────────────────────────────────────────────────

/// Apply flag values onto a form. Used for both create (empty form) and
/// update (form hydrated from the fetched record).
fn apply_fields(form: &mut WarehouseForm, fields: &WarehouseFields) {
    if let Some(ref v) = fields.code {
        form.set_code(v.clone());
    }
    if let Some(ref v) = fields.name {
        form.set_name(v.clone());
    }
    if let Some(v) = fields.warehouse_type {
        form.set_warehouse_type(Some(v));
    }
    if let Some(v) = fields.owner_type {
        form.set_owner_type(Some(v));
    }
    if let Some(ref v) = fields.aggregator {
        form.set_aggregator_id(v.clone());
    }
    if let Some(ref v) = fields.address {
        form.set_address_line(v.clone());
    }
    if let Some(ref v) = fields.city {
        form.set_city(v.clone());
    }
    if let Some(ref v) = fields.state {
        form.set_state(v.clone());
    }
    if let Some(ref v) = fields.pincode {
        form.set_pincode(v.clone());
    }
    if let Some(ref v) = fields.latitude {
        form.set_latitude(v.clone());
    }
    if let Some(ref v) = fields.longitude {
        form.set_longitude(v.clone());
    }
    if let Some(ref v) = fields.contact_name {
        form.set_contact_name(v.clone());
    }
    if let Some(ref v) = fields.contact_email {
        form.set_contact_email(v.clone());
    }
    if let Some(ref v) = fields.contact_mobile {
        form.set_contact_mobile(v.clone());
    }
    if let Some(v) = fields.status {
        form.set_status(v);
    }
    if let Some(ref v) = fields.remarks {
        form.set_remarks(v.clone());
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: WarehousesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WarehousesCommand::List {
            list,
            warehouse_type,
            owner_type,
        } => {
            let query = WarehouseQuery {
                search: list.search.unwrap_or_default(),
                page: list.page,
                limit: list.limit,
                warehouse_type,
                owner_type,
            };

            let page = console.list_warehouses(&query).await?;

            if page.rows.is_empty() {
                if !global.quiet {
                    eprintln!("No warehouses found");
                }
                return Ok(());
            }

            let out = output::render_list(
                &global.output,
                &page.rows,
                |w| WarehouseRow::from(w),
                |w| w.id.clone(),
            );
            output::print_output(&out, global.quiet);

            if matches!(global.output, OutputFormat::Table) && !global.quiet {
                eprintln!("Page {} of {}", query.page, page.max_page);
            }
            Ok(())
        }

        WarehousesCommand::Get { id } => {
            let warehouse = console.read_warehouse(&id).await?;
            let out = output::render_single(&global.output, &warehouse, warehouse_detail, |w| {
                w.id.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WarehousesCommand::Create { fields } => {
            let mut form = WarehouseForm::new();
            apply_fields(&mut form, &fields);

            if !form.validate() {
                return Err(util::form_invalid(form.errors()));
            }

            let created = console.create_warehouse(&form.payload()).await?;
            output::success(
                &format!("Warehouse {} created ({})", created.code, created.id),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        WarehousesCommand::Update { id, fields } => {
            // Hydrate from the current record, then resend the full payload.
            let current = console.read_warehouse(&id).await?;
            let mut form = WarehouseForm::edit(&current);
            apply_fields(&mut form, &fields);

            if !form.validate() {
                return Err(util::form_invalid(form.errors()));
            }

            let updated = console.update_warehouse(&id, &form.payload()).await?;
            output::success(
                &format!("Warehouse {} updated", updated.code),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        WarehousesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete warehouse {id}?"), global.yes)? {
                return Ok(());
            }
            console.delete_warehouse(&id).await?;
            output::success("Warehouse deleted", &global.color, global.quiet);
            Ok(())
        }

        WarehousesCommand::SetStatus { id, status } => {
            let updated = console.set_warehouse_status(&id, status).await?;
            output::success(
                &format!("Warehouse {} is now {}", updated.code, updated.status),
                &global.color,
                global.quiet,
            );
            Ok(())
        }

        WarehousesCommand::Toggle { id } => {
            let current = console.read_warehouse(&id).await?;
            let next = current.status.toggled();
            let updated = console.set_warehouse_status(&id, next).await?;
            output::success(
                &format!("Warehouse {} is now {}", updated.code, updated.status),
                &global.color,
                global.quiet,
            );
            Ok(())
        }
    }
}
