//! `BizFlow` admin command line
//!
//! Signs in against the BizFlow backend and drives the admin screens from a
//! terminal: catalog management, dashboard figures, debts and inventory.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use bizflow_admin::views::{
    AccountView, ChatWidget, DashboardView, ForgotPasswordView, LoginView, ProductCatalogView,
    RegisterView, Sender, StatusFilter,
};
use bizflow_admin::{App, Gated, ScreenState, ViewError, ViewResult, messages};
use bizflow_client::services::require;
use bizflow_core::types::{
    DebtPaymentRequest, EntityId, InventoryImportRequest, PaymentType, Product, ProductStatus,
};
use bizflow_core::{Config, LoggingConfig};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info};

/// Command line interface for the BizFlow admin client
#[derive(Parser)]
#[command(
    name = "bizflow-admin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Store administration client for the BizFlow backend",
    long_about = "Signs in against the BizFlow backend and manages products, stock, debts and staff from the terminal."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Log format (json, pretty), overrides the config file
    #[arg(long)]
    log_format: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the tokens
    Login {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long, env = "BIZFLOW_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored tokens
    Logout,

    /// Create an account
    Register {
        /// Display name
        #[arg(long)]
        full_name: String,

        /// Login name
        #[arg(short, long)]
        username: String,

        /// Contact email
        #[arg(long)]
        email: Option<String>,

        /// Contact phone
        #[arg(long)]
        phone: Option<String>,

        /// Password
        #[arg(short, long, env = "BIZFLOW_PASSWORD", hide_env_values = true)]
        password: String,

        /// Password again
        #[arg(long)]
        confirm_password: String,
    },

    /// Request password reset instructions
    ForgotPassword {
        /// Account email
        #[arg(value_name = "EMAIL")]
        email: String,
    },

    /// Show session and backend health
    Status,

    /// Show dashboard figures and the staff table
    Dashboard,

    /// Show the current account
    Account,

    /// Manage the product catalog
    Products {
        /// Product subcommand
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// Inspect orders
    Orders {
        /// Order subcommand
        #[command(subcommand)]
        action: ListCommand,
    },

    /// Inspect staff accounts
    Users {
        /// User subcommand
        #[command(subcommand)]
        action: ListCommand,
    },

    /// Manage customer debts
    Debts {
        /// Debt subcommand
        #[command(subcommand)]
        action: DebtCommands,
    },

    /// Manage stock
    Inventory {
        /// Inventory subcommand
        #[command(subcommand)]
        action: InventoryCommands,
    },

    /// Ask the AI assistant
    Chat {
        /// Question
        #[arg(value_name = "PROMPT", num_args = 1.., required = true)]
        prompt: Vec<String>,
    },

    /// Inspect configuration
    Config {
        /// Configuration subcommand
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Read-only listing commands
#[derive(Subcommand)]
enum ListCommand {
    /// List records
    List,
}

/// Catalog filters shared by listing and export
#[derive(Args)]
struct FilterArgs {
    /// Case-insensitive name or SKU search
    #[arg(short, long, default_value = "")]
    search: String,

    /// Status filter (ALL, ACTIVE, INACTIVE, DISCONTINUED)
    #[arg(long, default_value = "ALL")]
    status: StatusFilter,
}

/// Product fields accepted on create and update
#[derive(Args)]
struct ProductFields {
    /// Stock keeping unit
    #[arg(long)]
    sku: Option<String>,

    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Sell price
    #[arg(long)]
    price: Option<String>,

    /// Purchase price
    #[arg(long)]
    cost_price: Option<String>,

    /// Units on hand
    #[arg(long)]
    stock: Option<String>,

    /// Reorder threshold
    #[arg(long)]
    reorder_level: Option<String>,

    /// Sales status
    #[arg(long)]
    status: Option<ProductStatus>,

    /// Category identifier
    #[arg(long)]
    category_id: Option<EntityId>,

    /// Unit of measure identifier
    #[arg(long)]
    unit_id: Option<EntityId>,

    /// Description
    #[arg(long)]
    description: Option<String>,
}

/// Product management commands
#[derive(Subcommand)]
enum ProductCommands {
    /// List products
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Export the filtered products to CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Create a product
    Create {
        #[command(flatten)]
        fields: ProductFields,
    },

    /// Update a product
    Update {
        /// Product identifier
        #[arg(value_name = "ID")]
        id: EntityId,

        #[command(flatten)]
        fields: ProductFields,
    },

    /// Delete a product
    Delete {
        /// Product identifier
        #[arg(value_name = "ID")]
        id: EntityId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Debt commands
#[derive(Subcommand)]
enum DebtCommands {
    /// List outstanding debts
    List,

    /// Record a repayment
    Pay {
        /// Debt identifier
        #[arg(value_name = "ID")]
        id: EntityId,

        /// Amount repaid
        #[arg(long)]
        amount: Decimal,

        /// Payment method (CASH, CREDIT, TRANSFER)
        #[arg(long)]
        payment_type: Option<PaymentType>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Inventory commands
#[derive(Subcommand)]
enum InventoryCommands {
    /// Show the stock level of a product
    Show {
        /// Product identifier
        #[arg(value_name = "PRODUCT_ID")]
        product_id: EntityId,
    },

    /// Record a stock receipt
    Import {
        /// Product identifier
        #[arg(long)]
        product_id: EntityId,

        /// Units received
        #[arg(long)]
        quantity: i32,

        /// Unit cost
        #[arg(long)]
        unit_cost: Option<Decimal>,

        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Configuration commands
#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the resolved configuration as TOML
    Show,
}

/// Main entry point for the admin client
///
/// # Errors
///
/// Returns error if configuration, logging or the chosen command fails
#[tokio::main]
async fn main() -> ViewResult<()> {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;
    apply_log_overrides(&mut config.logging, &cli);
    bizflow_core::init_logging(&config.logging)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "BizFlow admin starting"
    );

    if let Commands::Config {
        action: ConfigCommands::Show,
    } = cli.command
    {
        return show_config(&config);
    }

    let app = App::open(config)?;
    let result = run(&app, cli.command).await;
    if let Err(err) = &result {
        error!(error = %err, "Command failed");
    }
    result
}

fn apply_log_overrides(logging: &mut LoggingConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        logging.level.clone_from(level);
    }
    if let Some(format) = &cli.log_format {
        logging.format.clone_from(format);
    }
}

async fn run(app: &App, command: Commands) -> ViewResult<()> {
    match command {
        Commands::Login { username, password } => login(app, username, password).await,
        Commands::Logout => {
            app.auth.logout()?;
            println!("Đã đăng xuất.");
            Ok(())
        }
        Commands::Register {
            full_name,
            username,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let mut view = RegisterView::new(app);
            view.form.full_name = full_name;
            view.form.username = username;
            view.form.email = email.unwrap_or_default();
            view.form.phone = phone.unwrap_or_default();
            view.form.password = password;
            view.form.confirm_password = confirm_password;
            match view.submit().await {
                Some(_) => println!("{}", view.success().unwrap_or(messages::REGISTER_SUCCESS)),
                None => eprintln!("{}", view.error().unwrap_or(messages::REGISTER_FAILED)),
            }
            Ok(())
        }
        Commands::ForgotPassword { email } => {
            let mut view = ForgotPasswordView::new(app);
            view.set_email(email);
            match view.submit().await {
                Ok(message) => println!("{message}"),
                Err(message) => eprintln!("{message}"),
            }
            Ok(())
        }
        Commands::Status => status(app).await,
        Commands::Dashboard => dashboard(app).await,
        Commands::Account => account(app).await,
        Commands::Products { action } => products(app, action).await,
        Commands::Orders {
            action: ListCommand::List,
        } => list_orders(app).await,
        Commands::Users {
            action: ListCommand::List,
        } => list_users(app).await,
        Commands::Debts { action } => debts(app, action).await,
        Commands::Inventory { action } => inventory(app, action).await,
        Commands::Chat { prompt } => chat(app, prompt.join(" ")).await,
        Commands::Config {
            action: ConfigCommands::Show,
        } => show_config(&app.config),
    }
}

async fn login(app: &App, username: String, password: String) -> ViewResult<()> {
    let mut view = LoginView::new(app);
    view.set_username(username);
    view.set_password(password);
    match view.submit().await {
        Some(_) => println!("Đăng nhập thành công."),
        None => eprintln!("{}", view.error().unwrap_or(messages::LOGIN_FAILED)),
    }
    Ok(())
}

async fn status(app: &App) -> ViewResult<()> {
    println!("Backend:  {}", app.config.api.base_url);
    println!(
        "Session:  {}",
        if app.session.is_authenticated() {
            "signed in"
        } else {
            "signed out"
        }
    );

    match app.services.health.health().await.and_then(require) {
        Ok(health) => println!(
            "Health:   {} ({} {})",
            health.status,
            health.service.as_deref().unwrap_or("-"),
            health.version.as_deref().unwrap_or("-")
        ),
        Err(err) => println!("Health:   unreachable ({err})"),
    }
    Ok(())
}

fn print_redirect(route: bizflow_admin::Route) {
    eprintln!("Chưa đăng nhập. Chạy `bizflow-admin login` ({route}).");
}

async fn dashboard(app: &App) -> ViewResult<()> {
    let view = DashboardView::new(app)?;
    if let Gated::Redirect(route) = view.mount().await {
        print_redirect(route);
        return Ok(());
    }

    match view.screen() {
        ScreenState::Ready(data) => {
            let report = &data.report;
            println!("Nhân viên:      {}", report.total_users);
            println!("Sản phẩm:       {}", report.total_products);
            println!("Sắp hết hàng:   {}", report.low_stock_count);
            println!("Đơn hàng:       {}", report.total_orders);
            println!("Doanh thu:      {}", report.total_revenue);
            println!("Công nợ:        {}", report.outstanding_amount);
            println!();
            if let Some(message) = data.empty_message() {
                println!("{message}");
            }
            for row in &data.staff {
                println!("{:>5}  {:<20} {:<30} {}", row.id, row.username, row.full_name, row.role);
            }
        }
        ScreenState::Error(message) => eprintln!("{message}"),
        ScreenState::Idle | ScreenState::Loading => println!("{}", messages::AUTH_CHECKING),
    }
    Ok(())
}

async fn account(app: &App) -> ViewResult<()> {
    let mut view = AccountView::new(app)?;
    if let Gated::Redirect(route) = view.mount().await {
        print_redirect(route);
        return Ok(());
    }

    match view.screen() {
        ScreenState::Ready(user) => {
            println!("ID:        {}", user.id);
            println!("Username:  {}", user.username);
            println!("Họ tên:    {}", user.full_name);
            println!("Vai trò:   {}", user.role);
            println!("Trạng thái: {}", user.status);
        }
        ScreenState::Error(message) => eprintln!("{message}"),
        ScreenState::Idle | ScreenState::Loading => {}
    }
    Ok(())
}

async fn catalog(app: &App, filter: Option<FilterArgs>) -> ViewResult<Option<ProductCatalogView>> {
    let mut view = ProductCatalogView::new(app)?;
    if let Some(filter) = filter {
        view.set_search(filter.search);
        view.set_status_filter(filter.status);
    }
    match view.mount().await {
        bizflow_admin::GateDecision::Allow => Ok(Some(view)),
        bizflow_admin::GateDecision::Redirect(route) => {
            print_redirect(route);
            Ok(None)
        }
    }
}

fn apply_fields(view: &mut ProductCatalogView, fields: ProductFields) -> ViewResult<()> {
    let form = view.form_mut().ok_or(ViewError::NoOpenForm)?;
    if let Some(sku) = fields.sku {
        form.sku = sku;
    }
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(price) = fields.price {
        form.price = price;
    }
    if let Some(cost_price) = fields.cost_price {
        form.cost_price = cost_price;
    }
    if let Some(stock) = fields.stock {
        form.stock = stock;
    }
    if let Some(reorder_level) = fields.reorder_level {
        form.reorder_level = reorder_level;
    }
    if fields.status.is_some() {
        form.status = fields.status;
    }
    if fields.category_id.is_some() {
        form.category_id = fields.category_id;
    }
    if fields.unit_id.is_some() {
        form.unit_id = fields.unit_id;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    Ok(())
}

fn print_notice(view: &ProductCatalogView) {
    if let Some(notice) = view.notice() {
        println!("{}", notice.text());
    }
}

async fn products(app: &App, action: ProductCommands) -> ViewResult<()> {
    match action {
        ProductCommands::List { filter } => {
            let Some(view) = catalog(app, Some(filter)).await? else {
                return Ok(());
            };
            match view.screen() {
                ScreenState::Ready(rows) => {
                    for row in rows {
                        println!(
                            "{:>5}  {:<12} {:<30} {:<14} {:>12} {:>6}{} {}",
                            row.id,
                            row.sku,
                            row.name,
                            row.unit,
                            row.price,
                            row.stock.map_or_else(|| "-".to_string(), |s| s.to_string()),
                            if row.low_stock { "!" } else { " " },
                            row.status
                        );
                    }
                }
                ScreenState::Error(message) => eprintln!("{message}"),
                ScreenState::Idle | ScreenState::Loading => println!("{}", messages::PRODUCTS_LOADING),
            }
            Ok(())
        }
        ProductCommands::Export { filter, dir } => {
            let Some(view) = catalog(app, Some(filter)).await? else {
                return Ok(());
            };
            let today = chrono::Utc::now().date_naive();
            match view.export_csv(&dir, today) {
                Ok(path) => println!("{}", path.display()),
                Err(bizflow_admin::ExportError::Empty) => {
                    eprintln!("{}", bizflow_admin::ExportError::Empty);
                }
                Err(err) => return Err(err.into()),
            }
            Ok(())
        }
        ProductCommands::Create { fields } => {
            let Some(mut view) = catalog(app, None).await? else {
                return Ok(());
            };
            view.open_new();
            apply_fields(&mut view, fields)?;
            let outcome = view.submit().await;
            print_notice(&view);
            let product: Product = outcome?;
            println!("ID: {}", product.id);
            Ok(())
        }
        ProductCommands::Update { id, fields } => {
            let Some(mut view) = catalog(app, None).await? else {
                return Ok(());
            };
            view.open_edit_by_id(id)?;
            apply_fields(&mut view, fields)?;
            let outcome = view.submit().await;
            print_notice(&view);
            outcome.map(|_| ())
        }
        ProductCommands::Delete { id, yes } => {
            let Some(mut view) = catalog(app, None).await? else {
                return Ok(());
            };
            let prompt = view.request_delete(id);
            if !yes && !confirm(prompt)? {
                view.cancel_delete();
                return Ok(());
            }
            let outcome = view.confirm_delete().await;
            print_notice(&view);
            outcome.map(|_| ())
        }
    }
}

fn confirm(prompt: &str) -> ViewResult<bool> {
    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .map_err(|e| ViewError::Core(bizflow_core::Error::Io(e)))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| ViewError::Core(bizflow_core::Error::Io(e)))?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "c" | "có"))
}

async fn list_orders(app: &App) -> ViewResult<()> {
    let orders = app.orders_query()?.load().await?;
    for order in orders {
        println!(
            "{:>5}  {:<14} {:<14} {:>12} {:>12}",
            order.id, order.order_code, order.status, order.total_amount, order.remaining_amount
        );
    }
    Ok(())
}

async fn list_users(app: &App) -> ViewResult<()> {
    let users = app.users_query()?.load().await?;
    if users.is_empty() {
        println!("{}", messages::NO_STAFF);
    }
    for user in users {
        println!("{:>5}  {:<20} {:<30} {:<9} {}", user.id, user.username, user.full_name, user.role, user.status);
    }
    Ok(())
}

async fn debts(app: &App, action: DebtCommands) -> ViewResult<()> {
    match action {
        DebtCommands::List => {
            let debts = require(app.services.debts.list_debts().await?)?.into_items();
            for debt in debts {
                println!(
                    "{:>5}  {:<30} {:>12} {:>12} {}",
                    debt.id,
                    debt.customer_name.as_deref().unwrap_or("-"),
                    debt.amount,
                    debt.remaining_amount,
                    debt.status.as_deref().unwrap_or("-")
                );
            }
        }
        DebtCommands::Pay {
            id,
            amount,
            payment_type,
            notes,
        } => {
            let request = DebtPaymentRequest {
                amount,
                payment_type,
                notes,
            };
            app.services.debts.pay_debt(id, &request).await?;
            println!("Đã ghi nhận thanh toán {amount} cho công nợ #{id}.");
        }
    }
    Ok(())
}

async fn inventory(app: &App, action: InventoryCommands) -> ViewResult<()> {
    match action {
        InventoryCommands::Show { product_id } => {
            let level = require(app.services.inventory.get_inventory(product_id).await?)?;
            println!(
                "Sản phẩm #{}: tồn {} (ngưỡng {})",
                level.product_id,
                level.quantity,
                level.reorder_level.map_or_else(|| "-".to_string(), |r| r.to_string())
            );
        }
        InventoryCommands::Import {
            product_id,
            quantity,
            unit_cost,
            notes,
        } => {
            let request = InventoryImportRequest {
                product_id,
                quantity,
                unit_cost,
                notes,
            };
            app.services.inventory.import_inventory(&request).await?;
            app.cache.invalidate_family("products");
            println!("Đã nhập {quantity} đơn vị cho sản phẩm #{product_id}.");
        }
    }
    Ok(())
}

async fn chat(app: &App, prompt: String) -> ViewResult<()> {
    let mut widget = ChatWidget::new(app.assistant());
    widget.set_input(prompt);
    widget.send().await;
    for message in widget.messages().iter().skip(1) {
        let who = match message.sender {
            Sender::Bot => "BizFlow",
            Sender::User => "Bạn",
        };
        println!("{who}: {}", message.text);
    }
    Ok(())
}

fn show_config(config: &Config) -> ViewResult<()> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| bizflow_core::Error::configuration(format!("cannot render config: {e}")))?;
    println!("{rendered}");
    Ok(())
}
