//! Command-line front end: parses a command, runs the matching flow and
//! prints the resulting state.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::sync::watch;

use rebike::api::ImageFile;
use rebike::config::SecureString;
use rebike::flows::Collection;
use rebike::model::{
    Cart, Inspection, InspectionReport, InspectionRequest, Order, OrderStatus, Product,
    ProductDraft, ProductKind, Registration, Role,
};
use rebike::services::ProductFilter;
use rebike::store::ui::{LoaderKey, StatusKind, StatusModal};
use rebike::store::AppState;
use rebike::{App, FlowError};

#[derive(Parser, Debug)]
#[command(name = "rebike", version, about = "Marketplace client for refurbished bikes and parts")]
pub struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Do not print progress while requests are in flight
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Buyer)]
        role: RoleArg,
    },
    /// Forget the saved session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Browse the catalog
    Products(ProductArgs),
    /// Show one product
    Product { id: String },
    /// List catalog categories
    Categories,
    #[command(subcommand)]
    Cart(CartCommand),
    /// Place an order for the current cart
    Checkout {
        #[arg(long)]
        address: String,
    },
    #[command(subcommand)]
    Orders(OrdersCommand),
    #[command(subcommand)]
    Inspections(InspectionsCommand),
    #[command(subcommand)]
    Seller(SellerCommand),
    #[command(subcommand)]
    Mechanic(MechanicCommand),
}

#[derive(Args, Debug)]
pub struct ProductArgs {
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CartCommand {
    Show,
    Add {
        product_id: String,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    Set {
        item_id: String,
        qty: u32,
    },
    Remove {
        item_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrdersCommand {
    List,
    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
pub enum InspectionsCommand {
    List,
    /// Book an inspection for a listed product or your own bike
    Request {
        #[arg(long, conflicts_with = "bike")]
        product: Option<String>,
        #[arg(long)]
        bike: Option<String>,
        /// Offer in rupees
        #[arg(long)]
        offer: u64,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        #[arg(long)]
        notes: Option<String>,
    },
    Cancel {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SellerCommand {
    Listings,
    /// Upload images and publish a new listing
    Publish(ListingArgs),
    /// Replace a listing's details and images
    Update {
        id: String,
        #[command(flatten)]
        listing: ListingArgs,
    },
    Delete {
        id: String,
    },
    Orders,
    /// Move an order to its next fulfilment status
    Advance {
        order_id: String,
        #[arg(value_parser = parse_order_status)]
        status: OrderStatus,
    },
}

#[derive(Args, Debug)]
pub struct ListingArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub price: u64,
    #[arg(long, default_value_t = 1)]
    pub stock: u32,
    #[arg(long, value_enum, default_value_t = KindArg::Bike)]
    pub kind: KindArg,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub condition: Option<String>,
    /// Image files to upload (repeatable)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

impl ListingArgs {
    fn into_parts(self) -> Result<(ProductDraft, Vec<ImageFile>), CliError> {
        let images = self
            .images
            .iter()
            .map(|path| read_image(path))
            .collect::<Result<Vec<_>, _>>()?;
        let draft = ProductDraft {
            title: self.title,
            description: self.description,
            price: self.price,
            stock: self.stock,
            kind: self.kind.into(),
            category: self.category,
            condition: self.condition,
            images: Vec::new(),
        };
        Ok((draft, images))
    }
}

#[derive(Subcommand, Debug)]
pub enum MechanicCommand {
    Available,
    Assigned,
    Accept {
        id: String,
    },
    Reject {
        id: String,
    },
    /// Complete a gig with an inspection report
    Report {
        id: String,
        #[arg(long)]
        summary: String,
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum KindArg {
    Bike,
    Part,
}

impl From<KindArg> for ProductKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Bike => ProductKind::Bike,
            KindArg::Part => ProductKind::Part,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoleArg {
    Buyer,
    Seller,
    Mechanic,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Buyer => Role::Buyer,
            RoleArg::Seller => Role::Seller,
            RoleArg::Mechanic => Role::Mechanic,
        }
    }
}

fn parse_order_status(value: &str) -> Result<OrderStatus, String> {
    let normalized = value.trim().to_uppercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| format!("unknown order status '{}'", value))
}

/// Errors the CLI reports before reaching a flow.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("Failed to read image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub async fn execute(app: &App, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let user = app.auth.login(&email, &password).await?;
            println!("Signed in as {} <{}>", user.name, user.email);
        }
        Command::Register {
            name,
            email,
            password,
            role,
        } => {
            let user = app
                .auth
                .register(Registration {
                    name,
                    email,
                    password: SecureString::new(password),
                    role: role.into(),
                })
                .await?;
            println!("Welcome, {}!", user.name);
        }
        Command::Logout => {
            app.auth.logout();
            println!("Signed out");
        }
        Command::Whoami => {
            let user = app.auth.refresh_profile().await?;
            println!("{} <{}> ({:?})", user.name, user.email, user.role);
        }
        Command::Products(args) => {
            let filter = ProductFilter {
                category: args.category,
                kind: args.kind.map(Into::into),
                search: args.search,
            };
            app.buyer.load_products(&filter).await?;
            let products = app.coordinator.read(|s| s.buyer.products.get().clone());
            print_products(&products);
        }
        Command::Product { id } => {
            let product = app.buyer.select_product(&id).await?;
            print_products(std::slice::from_ref(&product));
            if !product.description.is_empty() {
                println!("\n{}", product.description);
            }
        }
        Command::Categories => {
            app.buyer.load_categories().await?;
            app.coordinator.read(|s| {
                for category in &s.buyer.categories {
                    println!("{:<26} {}", category.id, category.name);
                }
            });
        }
        Command::Cart(command) => {
            match command {
                CartCommand::Show => app.invalidate(Collection::Cart).await?,
                CartCommand::Add { product_id, qty } => {
                    app.buyer.add_to_cart(&product_id, qty).await?
                }
                CartCommand::Set { item_id, qty } => {
                    app.buyer.update_quantity(&item_id, qty).await?
                }
                CartCommand::Remove { item_id } => app.buyer.remove_from_cart(&item_id).await?,
            }
            let cart = app.coordinator.read(|s| s.buyer.cart.get().clone());
            print_cart(&cart);
        }
        Command::Checkout { address } => {
            app.invalidate(Collection::Cart).await?;
            app.buyer.checkout(&address).await?;
        }
        Command::Orders(command) => {
            app.invalidate(Collection::Orders).await?;
            if let OrdersCommand::Cancel { id } = command {
                app.buyer.cancel_order(&id).await?;
            }
            let orders = app.coordinator.read(|s| s.buyer.orders.get().clone());
            print_orders(&orders);
        }
        Command::Inspections(command) => {
            match command {
                InspectionsCommand::List => app.invalidate(Collection::Inspections).await?,
                InspectionsCommand::Request {
                    product,
                    bike,
                    offer,
                    date,
                    notes,
                } => {
                    let request = InspectionRequest {
                        product_id: product,
                        user_bike_id: bike,
                        offer_amount: offer,
                        scheduled_date: date,
                        notes,
                    };
                    app.buyer.request_inspection(&request).await?;
                }
                InspectionsCommand::Cancel { id } => {
                    app.invalidate(Collection::Inspections).await?;
                    app.buyer.cancel_inspection(&id).await?;
                }
            }
            let inspections = app.coordinator.read(|s| s.buyer.inspections.get().clone());
            print_inspections(&inspections);
        }
        Command::Seller(command) => execute_seller(app, command).await?,
        Command::Mechanic(command) => execute_mechanic(app, command).await?,
    }
    Ok(())
}

async fn execute_seller(app: &App, command: SellerCommand) -> Result<(), CliError> {
    match command {
        SellerCommand::Listings => {
            app.invalidate(Collection::SellerProducts).await?;
        }
        SellerCommand::Publish(listing) => {
            let (draft, images) = listing.into_parts()?;
            app.seller.create_listing(draft, images).await?;
        }
        SellerCommand::Update { id, listing } => {
            let (draft, images) = listing.into_parts()?;
            app.seller.update_listing(&id, draft, images).await?;
        }
        SellerCommand::Delete { id } => {
            app.seller.delete_listing(&id).await?;
        }
        SellerCommand::Orders => {
            app.invalidate(Collection::SellerOrders).await?;
            let orders = app.coordinator.read(|s| s.seller.orders.get().clone());
            print_orders(&orders);
            return Ok(());
        }
        SellerCommand::Advance { order_id, status } => {
            app.invalidate(Collection::SellerOrders).await?;
            app.seller.advance_order(&order_id, status).await?;
            return Ok(());
        }
    }
    let products = app.coordinator.read(|s| s.seller.products.get().clone());
    print_products(&products);
    Ok(())
}

async fn execute_mechanic(app: &App, command: MechanicCommand) -> Result<(), CliError> {
    match command {
        MechanicCommand::Available => {
            app.invalidate(Collection::AvailableGigs).await?;
            let gigs = app.coordinator.read(|s| s.mechanic.available.get().clone());
            print_inspections(&gigs);
        }
        MechanicCommand::Assigned => {
            app.invalidate(Collection::AssignedGigs).await?;
            let gigs = app.coordinator.read(|s| s.mechanic.assigned.get().clone());
            print_inspections(&gigs);
        }
        MechanicCommand::Accept { id } => {
            app.mechanic.accept(&id).await?;
        }
        MechanicCommand::Reject { id } => {
            app.mechanic.reject(&id).await?;
        }
        MechanicCommand::Report {
            id,
            summary,
            rating,
            notes,
        } => {
            app.invalidate(Collection::AssignedGigs).await?;
            let report = InspectionReport {
                summary,
                rating,
                notes,
            };
            app.mechanic.submit_report(&id, &report).await?;
        }
    }
    Ok(())
}

fn read_image(path: &Path) -> Result<ImageFile, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageFile { file_name, bytes })
}

/// Prints the loader label to stderr each time a different loader becomes
/// visible. Ends when the coordinator is dropped.
pub async fn show_progress(mut changes: watch::Receiver<AppState>) {
    let mut shown: Option<LoaderKey> = None;
    while changes.changed().await.is_ok() {
        let active = changes.borrow_and_update().ui.active_loader();
        if active != shown {
            if let Some(key) = active {
                eprintln!("{}...", key.label());
            }
            shown = active;
        }
    }
}

/// Prints the status modal, success to stdout and errors to stderr.
pub fn print_status(modal: &StatusModal) {
    match modal.kind {
        StatusKind::Success => println!("✓ {}: {}", modal.title, modal.message),
        StatusKind::Error => eprintln!("✗ {}: {}", modal.title, modal.message),
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }
    for product in products {
        println!(
            "{:<26} {:<36} ₹{:>9} stock {}",
            product.id, product.title, product.price, product.stock
        );
    }
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for item in &cart.items {
        println!(
            "{:<26} {:<36} x{:<3} ₹{:>9}",
            item.id,
            item.product.title,
            item.quantity,
            item.line_total()
        );
    }
    println!("Total: ₹{}", cart.total());
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    for order in orders {
        println!(
            "{:<26} {:<17} {} item(s) ₹{}",
            order.id,
            order.status,
            order.items.len(),
            order.total_amount
        );
    }
}

fn print_inspections(inspections: &[Inspection]) {
    if inspections.is_empty() {
        println!("No inspections.");
        return;
    }
    for inspection in inspections {
        let target = inspection
            .product_id
            .as_deref()
            .or(inspection.user_bike_id.as_deref())
            .unwrap_or("-");
        println!(
            "{:<26} {:<10} {} ₹{} on {}",
            inspection.id,
            inspection.status,
            target,
            inspection.offer_amount,
            inspection.scheduled_date
        );
    }
}
