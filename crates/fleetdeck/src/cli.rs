//! Clap derive structures for the `fleetdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use fleetdeck_core::model::{
    AlertStatus, AlertType, LocationType, OwnerType, WarehouseStatus, WarehouseType,
};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fleetdeck -- admin console for the tracking service
#[derive(Debug, Parser)]
#[command(
    name = "fleetdeck",
    version,
    about = "Manage tracking devices, warehouses, and vehicle alerts from the command line",
    long_about = "Administrative console for a logistics tracking service.\n\n\
        Lists are paginated server-side; create/edit payloads are validated\n\
        locally before any network call is made.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Service profile to use
    #[arg(long, short = 'p', env = "FLEETDECK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service API root URL (overrides profile)
    #[arg(long, short = 'u', env = "FLEETDECK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API key
    #[arg(long, env = "FLEETDECK_API_KEY", global = true, hide_env = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FLEETDECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FLEETDECK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "FLEETDECK_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage tracking devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Manage warehouses
    #[command(alias = "wh", alias = "w")]
    Warehouses(WarehousesArgs),

    /// View vehicle alerts
    #[command(alias = "al")]
    Alerts(AlertsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Shared pagination and search arguments for list commands.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Search term (matched server-side)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Page to fetch (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Rows per page
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: u32,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List devices (paginated)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by location type
        #[arg(long)]
        location_type: Option<LocationType>,

        /// Filter by assigned field engineer id
        #[arg(long)]
        field_engineer: Option<String>,
    },

    /// Show one device, including its movement history
    Get {
        /// Device id
        id: String,
    },

    /// Register a new device
    Create {
        #[command(flatten)]
        fields: DeviceFields,
    },

    /// Update a device (fetches it, applies the given fields, resends the full payload)
    Update {
        /// Device id
        id: String,

        #[command(flatten)]
        fields: DeviceFields,
    },

    /// Delete a device
    #[command(alias = "rm")]
    Delete {
        /// Device id
        id: String,
    },
}

/// Device form fields as flags. All optional on update; `create` validates
/// the assembled form before any network call.
#[derive(Debug, Args)]
pub struct DeviceFields {
    /// Device IMEI (immutable after creation)
    #[arg(long)]
    pub imei: Option<String>,

    /// QR code printed on the device
    #[arg(long)]
    pub qr_code: Option<String>,

    /// Where the device currently resides
    #[arg(long)]
    pub location_type: Option<LocationType>,

    /// Production floor name (location type PRODUCTION_FLOOR)
    #[arg(long)]
    pub production_floor: Option<String>,

    /// Warehouse id (location type WAREHOUSE)
    #[arg(long)]
    pub warehouse: Option<String>,

    /// Field engineer id (location type FIELD_ENGINEER)
    #[arg(long)]
    pub field_engineer: Option<String>,

    /// Vehicle number (location type VEHICLE)
    #[arg(long)]
    pub vehicle_number: Option<String>,

    /// Linked production warehouse id
    #[arg(long)]
    pub production_warehouse: Option<String>,

    /// Linked installation requisition id
    #[arg(long)]
    pub requisition: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WAREHOUSES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WarehousesArgs {
    #[command(subcommand)]
    pub command: WarehousesCommand,
}

#[derive(Debug, Subcommand)]
pub enum WarehousesCommand {
    /// List warehouses (paginated)
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by warehouse type
        #[arg(long)]
        warehouse_type: Option<WarehouseType>,

        /// Filter by owner type
        #[arg(long)]
        owner_type: Option<OwnerType>,
    },

    /// Show one warehouse
    Get {
        /// Warehouse id
        id: String,
    },

    /// Create a warehouse
    Create {
        #[command(flatten)]
        fields: WarehouseFields,
    },

    /// Update a warehouse (fetches it, applies the given fields, resends the full payload)
    Update {
        /// Warehouse id
        id: String,

        #[command(flatten)]
        fields: WarehouseFields,
    },

    /// Delete a warehouse
    #[command(alias = "rm")]
    Delete {
        /// Warehouse id
        id: String,
    },

    /// Set a warehouse's status explicitly
    SetStatus {
        /// Warehouse id
        id: String,

        /// New status
        status: WarehouseStatus,
    },

    /// Toggle a warehouse between active and inactive
    Toggle {
        /// Warehouse id
        id: String,
    },
}

/// Warehouse form fields as flags.
#[derive(Debug, Args)]
pub struct WarehouseFields {
    /// Warehouse code (immutable after creation)
    #[arg(long)]
    pub code: Option<String>,

    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Warehouse tier
    #[arg(long)]
    pub warehouse_type: Option<WarehouseType>,

    /// Owner type; AGGREGATOR requires --aggregator
    #[arg(long)]
    pub owner_type: Option<OwnerType>,

    /// Aggregator id (owner type AGGREGATOR only)
    #[arg(long)]
    pub aggregator: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub pincode: Option<String>,

    /// Latitude (decimal degrees)
    #[arg(long)]
    pub latitude: Option<String>,

    /// Longitude (decimal degrees)
    #[arg(long)]
    pub longitude: Option<String>,

    #[arg(long)]
    pub contact_name: Option<String>,

    #[arg(long)]
    pub contact_email: Option<String>,

    #[arg(long)]
    pub contact_mobile: Option<String>,

    /// Initial / new status
    #[arg(long)]
    pub status: Option<WarehouseStatus>,

    #[arg(long)]
    pub remarks: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALERTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlertsArgs {
    #[command(subcommand)]
    pub command: AlertsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AlertsCommand {
    /// List vehicle alerts
    #[command(alias = "ls")]
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<AlertStatus>,

        /// Filter by alert type
        #[arg(long)]
        alert_type: Option<AlertType>,
    },

    /// Show one alert with its position and ignition history
    Show {
        /// Vehicle number
        vehicle: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Print the resolved configuration
    Show,

    /// Set one profile key (api_url, api_key, api_key_env, insecure, timeout, ca_cert)
    Set { key: String, value: String },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use { name: String },

    /// Store the API key for a profile in the system keyring
    SetKey {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
