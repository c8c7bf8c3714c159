//! LedgerDesk CLI
//!
//! Terminal shell over the ERP finance backend:
//! - Sign in / out and show the current user
//! - Dashboard KPIs, alerts and cash flow
//! - Chart of accounts, invoices, users
//! - Paginated audit logs

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerdesk::models::{AccountType, InvoiceType, LineItem};
use ledgerdesk::pages::{
    AccountsPage, AuditLogsPage, DashboardPage, InvoicesPage, ItemEdit, LoginPage, RegisterPage,
    UsersPage,
};
use ledgerdesk::router::BRAND;
use ledgerdesk::{
    generate_default_config, guard, Config, FileSessionStore, FormPage, HttpClient, LoadScope,
    Navigation, Outcome, Page, Role, Route, SessionContext, SessionStore, Shell, Submission,
};

#[derive(Parser)]
#[command(name = "ledgerdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the ERP finance backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: Format,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(short, long)]
        email: String,
        /// Password (default: $LEDGERDESK_PASSWORD)
        #[arg(short, long, env = "LEDGERDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and sign in as it
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "LEDGERDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Show the navigation menu for the current role
    Nav,

    /// KPIs, alerts and cash flow
    Dashboard,

    /// Chart of accounts
    Accounts {
        #[command(subcommand)]
        action: AccountsAction,
    },

    /// Sales and purchase invoices
    Invoices {
        #[command(subcommand)]
        action: InvoicesAction,
    },

    /// User management (Admin)
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },

    /// Audit trail (Admin)
    AuditLogs {
        /// 1-based page number
        #[arg(short, long, default_value = "1")]
        page: u64,
        /// Rows per page (default: from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AccountsAction {
    List,
    Create {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        /// Asset, Liability, Income or Expense
        #[arg(long = "type", default_value = "Asset")]
        account_type: AccountType,
        #[arg(long, default_value = "0")]
        balance: Decimal,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InvoiceKind {
    Sales,
    Purchase,
}

#[derive(Subcommand)]
pub enum InvoicesAction {
    List,
    Create {
        #[arg(long = "type", value_enum, default_value = "sales")]
        kind: InvoiceKind,
        /// Customer id (sales) or vendor id (purchase)
        #[arg(long)]
        party: Option<i64>,
        /// Invoice date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        due: NaiveDate,
        /// Line item as DESCRIPTION:QUANTITY:UNIT_PRICE (repeatable)
        #[arg(long = "item", value_parser = parse_item, required = true)]
        items: Vec<LineItem>,
        #[arg(long, default_value = "0")]
        tax: Decimal,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand)]
pub enum UsersAction {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEDGERDESK_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        /// user, Admin, Finance Manager or Project Manager
        #[arg(long, default_value = "user")]
        role: String,
    },
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Everything a command needs
struct App {
    config: Config,
    store: Arc<dyn SessionStore>,
    session: SessionContext,
    client: HttpClient,
    format: Format,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config);

    if let Commands::Config { output } = &cli.command {
        return write_config(output.as_ref());
    }

    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session.path));
    let session = SessionContext::restore(store.as_ref())
        .await
        .context("Failed to read stored session")?;
    let client = HttpClient::new(&config.api, session.clone())?;

    let ctx = App {
        config,
        store,
        session,
        client,
        format: cli.format,
    };

    match cli.command {
        Commands::Login { email, password } => login(&ctx, email, password).await,
        Commands::Register {
            name,
            email,
            password,
        } => register(&ctx, name, email, password).await,
        Commands::Logout => {
            let shell = Shell::new(ctx.session.clone(), Arc::clone(&ctx.store));
            let route = shell.logout().await;
            println!("Signed out. Next: ledgerdesk login ({})", route);
            Ok(())
        }
        Commands::Whoami => whoami(&ctx),
        Commands::Nav => nav(&ctx),
        Commands::Dashboard => dashboard(&ctx).await,
        Commands::Accounts { action } => accounts(&ctx, action).await,
        Commands::Invoices { action } => invoices(&ctx, action).await,
        Commands::Users { action } => users(&ctx, action).await,
        Commands::AuditLogs { page, limit } => audit_logs(&ctx, page, limit).await,
        Commands::Config { .. } => Ok(()),
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("ledgerdesk={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => print!("{}", config),
    }
    Ok(())
}

/// Run the session guard (and the menu capability) for a route
fn enter(ctx: &App, route: Route) -> anyhow::Result<()> {
    match guard(route, &ctx.session) {
        Navigation::Render(_) => {}
        Navigation::Redirect(Route::Login) => {
            bail!("Not signed in. Run `ledgerdesk login` first.")
        }
        Navigation::Redirect(other) => bail!("Redirected to {}", other),
        Navigation::NotFound => bail!("Unknown route {}", route),
    }

    if let Some(capability) = route.capability() {
        if !ctx.session.can(capability) {
            bail!("{} is not available for your role", route.title());
        }
    }
    Ok(())
}

/// Ctrl-C unmounts the page, dropping whatever is in flight
fn cancel_on_ctrl_c(scope: &LoadScope) {
    let scope = scope.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            scope.unmount();
        }
    });
}

async fn mount<P: Page>(page: &mut P) -> anyhow::Result<()> {
    cancel_on_ctrl_c(page.scope());
    match page.load().await {
        Outcome::Settled => Ok(()),
        Outcome::Cancelled => bail!("Cancelled"),
    }
}

fn finish(outcome: Submission, what: &str) -> anyhow::Result<()> {
    match outcome {
        Submission::Completed => Ok(()),
        Submission::Failed(e) => bail!("{} failed: {}", what, e),
        Submission::Declined => {
            println!("Aborted.");
            Ok(())
        }
        Submission::Cancelled => bail!("Cancelled"),
    }
}

async fn login(ctx: &App, email: String, password: String) -> anyhow::Result<()> {
    let mut page = LoginPage::new(ctx.client.clone(), Arc::clone(&ctx.store));
    page.draft_mut().email = email;
    page.draft_mut().password = password;
    cancel_on_ctrl_c(page.scope());
    finish(page.submit().await, "Login")?;
    whoami(ctx)
}

async fn register(ctx: &App, name: String, email: String, password: String) -> anyhow::Result<()> {
    let mut page = RegisterPage::new(ctx.client.clone(), Arc::clone(&ctx.store));
    {
        let draft = page.draft_mut();
        draft.name = name;
        draft.email = email;
        draft.password = password;
    }
    cancel_on_ctrl_c(page.scope());
    finish(page.submit().await, "Registration")?;
    whoami(ctx)
}

fn whoami(ctx: &App) -> anyhow::Result<()> {
    match ctx.session.user() {
        Some(user) => {
            println!("{} | {} ({})", BRAND, user.name, user.role);
            if let Some(email) = user.email {
                println!("{}", email);
            }
        }
        None => println!("Not signed in."),
    }
    Ok(())
}

fn nav(ctx: &App) -> anyhow::Result<()> {
    enter(ctx, Route::Dashboard)?;
    let shell = Shell::new(ctx.session.clone(), Arc::clone(&ctx.store));
    for link in shell.nav_links() {
        println!("{:<20} {}", link.label, link.route);
    }
    Ok(())
}

async fn dashboard(ctx: &App) -> anyhow::Result<()> {
    enter(ctx, Route::Dashboard)?;
    let mut page = DashboardPage::new(ctx.client.clone());
    mount(&mut page).await?;

    for (section, error) in page.failures() {
        eprintln!("warning: {} unavailable: {}", section, error);
    }

    if ctx.format == Format::Json {
        let body = serde_json::json!({
            "kpis": page.kpi_values(),
            "alerts": page.alerts().items(),
            "cash_flow": page.cash_flow().items(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let kpis = page.kpi_values();
    print_rows(
        ctx.format,
        &["KPI", "Value"],
        vec![
            vec!["Total Projects".into(), kpis.total_projects.to_string()],
            vec!["Total Invoices".into(), kpis.total_invoices.to_string()],
            vec!["Pending Payments".into(), money(kpis.pending_payments)],
            vec!["Cash Balance".into(), money(kpis.cash_balance)],
            vec!["Total Expenses".into(), money(kpis.total_expenses)],
            vec!["High Risk Projects".into(), kpis.high_risk_projects.to_string()],
        ],
    )?;

    if !page.alerts().items().is_empty() {
        println!();
        println!("Alerts");
        for alert in page.alerts().items() {
            println!("  [{}] {}: {}", alert.severity, alert.title(), alert.message);
        }
    }

    println!();
    println!("Cash Flow (Last 30 Days)");
    if page.cash_flow().items().is_empty() {
        println!("No cash flow data available");
    } else {
        let rows = page
            .cash_flow()
            .items()
            .iter()
            .map(|p| vec![p.date.clone(), money(p.inflow), money(p.outflow), money(p.net())])
            .collect();
        print_rows(ctx.format, &["Date", "Inflow", "Outflow", "Net"], rows)?;
    }
    Ok(())
}

async fn accounts(ctx: &App, action: AccountsAction) -> anyhow::Result<()> {
    enter(ctx, Route::Accounts)?;
    let mut page = AccountsPage::new(ctx.client.clone());
    mount(&mut page).await?;

    if let AccountsAction::Create {
        code,
        name,
        account_type,
        balance,
        currency,
    } = action
    {
        page.open_form();
        let draft = page.draft_mut();
        draft.account_code = code;
        draft.account_name = name;
        draft.account_type = account_type;
        draft.balance = balance;
        draft.currency = currency;
        finish(page.submit().await, "Creating account")?;
    }

    if let Some(e) = page.accounts().error() {
        bail!("Could not load accounts: {}", e);
    }
    let list = page.accounts().items();
    if ctx.format == Format::Json {
        return print_json(&list);
    }
    let rows = list
        .iter()
        .map(|a| {
            vec![
                a.account_code.clone(),
                a.account_name.clone(),
                a.account_type.to_string(),
                money(a.balance),
                a.currency.clone(),
            ]
        })
        .collect();
    print_rows(ctx.format, &["Code", "Name", "Type", "Balance", "Currency"], rows)
}

async fn invoices(ctx: &App, action: InvoicesAction) -> anyhow::Result<()> {
    enter(ctx, Route::Invoices)?;
    let mut page = InvoicesPage::new(ctx.client.clone());
    mount(&mut page).await?;

    if let InvoicesAction::Create {
        kind,
        party,
        date,
        due,
        items,
        tax,
        currency,
        description,
    } = action
    {
        page.open_form();
        page.set_invoice_type(match kind {
            InvoiceKind::Sales => InvoiceType::Sales,
            InvoiceKind::Purchase => InvoiceType::Purchase,
        });
        if let Some(id) = party {
            if !page.counterparties().iter().any(|p| p.id == id) {
                tracing::warn!(party = id, "Counterparty not in the fetched list");
            }
        }
        page.select_counterparty(party);

        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                page.add_item();
            }
            let line = index + 1;
            page.edit_item(index, ItemEdit::Description(item.description));
            if !page.edit_item(index, ItemEdit::Quantity(item.quantity))
                || !page.edit_item(index, ItemEdit::UnitPrice(item.unit_price))
            {
                bail!("Line {}: amount out of range", line);
            }
        }

        let draft = page.draft_mut();
        if let Some(date) = date {
            draft.invoice_date = date;
        }
        draft.due_date = Some(due);
        draft.tax_amount = tax;
        draft.currency = currency;
        draft.description = description;

        finish(page.submit().await, "Creating invoice")?;
    }

    if let Some(e) = page.invoices().error() {
        bail!("Could not load invoices: {}", e);
    }
    let list = page.invoices().items();
    if ctx.format == Format::Json {
        return print_json(&list);
    }
    let rows = list
        .iter()
        .map(|i| {
            vec![
                i.invoice_number.clone(),
                i.invoice_type.to_string(),
                i.invoice_date.to_string(),
                money(i.total_amount),
                i.status.clone(),
            ]
        })
        .collect();
    print_rows(ctx.format, &["Invoice #", "Type", "Date", "Total", "Status"], rows)
}

async fn users(ctx: &App, action: UsersAction) -> anyhow::Result<()> {
    enter(ctx, Route::Users)?;
    let mut page = UsersPage::new(ctx.client.clone());
    mount(&mut page).await?;

    match action {
        UsersAction::List => {}
        UsersAction::Create {
            name,
            email,
            password,
            role,
        } => {
            page.open_form();
            let draft = page.draft_mut();
            draft.name = name;
            draft.email = email;
            draft.password = password;
            draft.role = Role::from(role);
            finish(page.submit().await, "Creating user")?;
        }
        UsersAction::Delete { id, yes } => {
            let outcome = page.delete(id, |prompt| yes || ask(prompt)).await;
            finish(outcome, "Deleting user")?;
        }
    }

    if let Some(e) = page.users().error() {
        bail!("Could not load users: {}", e);
    }
    let list = page.users().items();
    if ctx.format == Format::Json {
        return print_json(&list);
    }
    let rows = list
        .iter()
        .map(|u| {
            vec![
                u.id.to_string(),
                u.name.clone(),
                u.email.clone(),
                u.role.to_string(),
                u.status_label().to_string(),
            ]
        })
        .collect();
    print_rows(ctx.format, &["ID", "Name", "Email", "Role", "Status"], rows)
}

async fn audit_logs(ctx: &App, page_number: u64, limit: Option<u32>) -> anyhow::Result<()> {
    enter(ctx, Route::AuditLogs)?;
    let limit = limit.unwrap_or(ctx.config.audit.page_size);
    let mut page = AuditLogsPage::with_page_size(ctx.client.clone(), limit);
    mount(&mut page).await?;
    if page_number > 1 && page.go_to_page(page_number).await == Outcome::Cancelled {
        bail!("Cancelled");
    }

    if let Some(e) = page.logs().error() {
        bail!("Could not load audit logs: {}", e);
    }
    let list = page.logs().items();
    if ctx.format == Format::Json {
        return print_json(&list);
    }
    let rows = list
        .iter()
        .map(|l| {
            vec![
                l.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                l.actor().to_string(),
                l.action.clone(),
                l.entity_type.clone(),
                l.entity_id.map(|id| id.to_string()).unwrap_or_default(),
                l.ip_address.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_rows(
        ctx.format,
        &["Timestamp", "User", "Action", "Entity Type", "Entity ID", "IP Address"],
        rows,
    )?;

    if ctx.format == Format::Table {
        let p = page.pagination();
        println!();
        println!(
            "Page {} ({} total){}{}",
            p.page_number(),
            p.total(),
            if p.has_previous() { "  [previous]" } else { "" },
            if p.has_next() { "  [next]" } else { "" },
        );
    }
    Ok(())
}

fn ask(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match std::io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}

/// `DESCRIPTION:QUANTITY:UNIT_PRICE`; the description may itself contain colons
fn parse_item(s: &str) -> Result<LineItem, String> {
    let mut parts = s.rsplitn(3, ':');
    let (Some(price), Some(quantity), Some(description)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("Expected DESCRIPTION:QUANTITY:UNIT_PRICE, got {:?}", s));
    };

    let quantity: Decimal = quantity
        .trim()
        .parse()
        .map_err(|e| format!("Invalid quantity {:?}: {}", quantity, e))?;
    let unit_price: Decimal = price
        .trim()
        .parse()
        .map_err(|e| format!("Invalid unit price {:?}: {}", price, e))?;

    LineItem::new(description, quantity, unit_price)
        .ok_or_else(|| "amount out of range".to_string())
}

fn money(value: Decimal) -> String {
    format!("${:.2}", value)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_rows(format: Format, headers: &[&str], rows: Vec<Vec<String>>) -> anyhow::Result<()> {
    if format == Format::Csv {
        let mut writer = csv::Writer::from_writer(std::io::stdout());
        writer.write_record(headers)?;
        for row in &rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        return Ok(());
    }

    if rows.is_empty() {
        println!("No records.");
        return Ok(());
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    println!("{}", render_line(headers, &widths));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1)));
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        println!("{}", render_line(&cells, &widths));
    }
    Ok(())
}

fn render_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<w$}", c, w = w))
        .collect::<Vec<_>>()
        .join(" | ")
}
