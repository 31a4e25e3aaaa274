//! Clap derive structures for the `wcflux` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// wcflux -- manage a WooCommerce product catalogue from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "wcflux",
    version,
    about = "Manage WooCommerce products from the command line",
    long_about = "Browse and edit WooCommerce products, variations, terms, and reviews.\n\n\
        Edits are diffed against the current server copy, so only the fields\n\
        you change are sent.",
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
    /// Store profile to use
    #[arg(long, short = 'p', env = "WCFLUX_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Store URL (overrides profile)
    #[arg(long, short = 'u', env = "WCFLUX_SITE_URL", global = true)]
    pub site_url: Option<String>,

    /// Application password username (used with --site-url when no profile exists)
    #[arg(long, env = "WCFLUX_USERNAME", global = true, hide_env = true)]
    pub username: Option<String>,

    /// Application password (used with --site-url when no profile exists)
    #[arg(long, env = "WCFLUX_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "WCFLUX_OUTPUT",
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
    #[arg(long, short = 'k', env = "WCFLUX_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "WCFLUX_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect, and edit products
    #[command(alias = "p")]
    Products(ProductsArgs),

    /// List and edit variations of a variable product
    #[command(alias = "var")]
    Variations(VariationsArgs),

    /// Manage product categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Manage product tags
    Tags(TagsArgs),

    /// View shipping classes
    ShippingClasses(ShippingClassesArgs),

    /// List and moderate product reviews
    Reviews(ReviewsArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRODUCTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List(ProductListArgs),

    /// Show one product
    Get {
        /// Product ID
        id: i64,
    },

    /// Change product fields (only changed fields are sent)
    Update {
        /// Product ID
        id: i64,

        #[command(flatten)]
        edit: ProductEdit,

        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Delete a product (moves to trash unless --force)
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: i64,

        /// Delete permanently instead of trashing
        #[arg(long)]
        force: bool,
    },

    /// Check whether a SKU is still free
    SkuCheck {
        sku: String,
    },
}

#[derive(Debug, Args)]
pub struct ProductListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Results per page (1-100)
    #[arg(long, short = 'l', default_value = "25")]
    pub limit: u32,

    /// Fetch all pages
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Search term (name, description, SKU)
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only products with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Only products with this SKU
    #[arg(long)]
    pub sku: Option<String>,
}

/// Editable product fields. Unset flags leave the field alone.
#[derive(Debug, Default, Args)]
pub struct ProductEdit {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub sku: Option<String>,

    /// publish, draft, pending, private
    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub regular_price: Option<String>,

    #[arg(long)]
    pub sale_price: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub short_description: Option<String>,

    #[arg(long)]
    pub featured: Option<bool>,

    #[arg(long)]
    pub manage_stock: Option<bool>,

    #[arg(long)]
    pub stock_quantity: Option<f64>,

    /// instock, outofstock, onbackorder
    #[arg(long)]
    pub stock_status: Option<String>,

    /// no, notify, yes
    #[arg(long)]
    pub backorders: Option<String>,

    #[arg(long)]
    pub weight: Option<String>,

    #[arg(long)]
    pub length: Option<String>,

    #[arg(long)]
    pub width: Option<String>,

    #[arg(long)]
    pub height: Option<String>,

    #[arg(long)]
    pub shipping_class: Option<String>,

    /// Replace categories with these IDs
    #[arg(long, value_delimiter = ',')]
    pub categories: Option<Vec<i64>>,

    /// Replace tags with these IDs
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<i64>>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VARIATIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct VariationsArgs {
    #[command(subcommand)]
    pub command: VariationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum VariationsCommand {
    /// List all variations of a product
    #[command(alias = "ls")]
    List {
        /// Parent product ID
        product_id: i64,
    },

    /// Show one variation
    Get {
        product_id: i64,
        variation_id: i64,
    },

    /// Change variation fields (only changed fields are sent)
    Update {
        product_id: i64,
        variation_id: i64,

        #[command(flatten)]
        edit: VariationEdit,

        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Set managed stock on several variations in one batch request
    Stock {
        product_id: i64,

        /// New stock quantity
        #[arg(long)]
        quantity: f64,

        /// Variation IDs to change (default: all)
        #[arg(long = "variation", value_delimiter = ',')]
        variations: Vec<i64>,
    },
}

#[derive(Debug, Default, Args)]
pub struct VariationEdit {
    #[arg(long)]
    pub sku: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub regular_price: Option<String>,

    #[arg(long)]
    pub sale_price: Option<String>,

    #[arg(long)]
    pub manage_stock: Option<bool>,

    #[arg(long)]
    pub stock_quantity: Option<f64>,

    #[arg(long)]
    pub stock_status: Option<String>,

    #[arg(long)]
    pub weight: Option<String>,

    /// Use an existing media library image
    #[arg(long, conflicts_with = "clear_image")]
    pub image_id: Option<i64>,

    /// Remove the variation image
    #[arg(long)]
    pub clear_image: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TERMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories as a tree
    #[command(alias = "ls")]
    List,

    /// Create a category
    Create {
        name: String,

        /// Parent category ID (0 for top level)
        #[arg(long, default_value = "0")]
        parent: i64,
    },
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// List tags
    #[command(alias = "ls")]
    List {
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Create one or more tags
    Create {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct ShippingClassesArgs {
    #[command(subcommand)]
    pub command: ShippingClassesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShippingClassesCommand {
    /// List shipping classes
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REVIEWS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ReviewsArgs {
    #[command(subcommand)]
    pub command: ReviewsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReviewsCommand {
    /// List reviews of every status
    #[command(alias = "ls")]
    List {
        /// Limit to these product IDs
        #[arg(long = "product", value_delimiter = ',')]
        products: Vec<i64>,
    },

    /// Moderate a review
    Status {
        id: i64,

        /// approved, hold, spam, unspam, trash, untrash
        status: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG & COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a profile with guided setup
    Init,

    /// Display the configuration with secrets masked
    Show,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        name: String,
    },

    /// Store the profile's secret in the system keyring
    SetSecret {
        /// Profile name (default: active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
