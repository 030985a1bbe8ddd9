use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use bloomflow::format::{format_currency, format_date, role_display_name};
use bloomflow::models::{LotFilter, LotStatus, OrderLine, OrderStatus};
use bloomflow::navigation::LogNavigator;
use bloomflow::views::approvals::ApprovalQueue;
use bloomflow::views::bouquet::{self as bouquet_view, BouquetForm};
use bloomflow::views::dashboard::load_dashboard;
use bloomflow::views::inventory::{edit_flower, edit_lot, load_inventory, FlowerForm, LotForm};
use bloomflow::views::order_form::OrderDraft;
use bloomflow::views::orders::{
    filter_orders, load_order_detail, load_order_list, OrderStats, StatusFilter,
};
use bloomflow::views::payment::{complete_checkout, start_checkout};
use bloomflow::views::profile::load_profile;
use bloomflow::views::reports::{export_tab, load_tab, DateRange, ReportTab, ReportView};
use bloomflow::views::signup::{register, submit_signup, SignupForm};
use bloomflow::{nav_items, Access, BloomFlow, ClientConfig, Endpoints, FileSession, Role, Route};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bloomflow")]
#[command(about = "CLI for the BloomFlow flower shop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gateway origin; overrides BLOOMFLOW_BASE_URL and forces the proxied layout
    #[arg(short, long)]
    url: Option<String>,

    /// Where the session token is kept; overrides BLOOMFLOW_SESSION_DIR
    #[arg(long)]
    session_dir: Option<PathBuf>,

    #[arg(long)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    Logout,
    /// Claims of the stored token
    Whoami,
    Profile,
    /// Menu entries visible to the current roles
    Nav,
    Signup {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(short, long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(short, long, default_value = "client")]
        role: Role,
    },
    Register {
        #[arg(short, long, default_value = "client")]
        role: Role,
    },
    Dashboard,
    Flowers,
    CreateFlower {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        price: String,
        #[arg(short, long, default_value = "")]
        color: String,
        #[arg(short, long, default_value = "")]
        seasonality: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Changes only the fields given
    UpdateFlower {
        #[arg(short, long)]
        id: i64,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        price: Option<String>,
        #[arg(short, long)]
        color: Option<String>,
        #[arg(short, long)]
        seasonality: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    DeleteFlower {
        #[arg(short, long)]
        id: i64,
    },
    Lots {
        #[arg(short, long)]
        status: Option<LotStatus>,
        #[arg(short, long)]
        flower: Option<i64>,
    },
    CreateLot {
        #[arg(short, long)]
        flower: String,
        #[arg(short, long)]
        quantity: String,
        #[arg(short, long)]
        expiry_date: String,
        #[arg(short, long, default_value = "available")]
        status: LotStatus,
    },
    /// Changes only the fields given
    UpdateLot {
        #[arg(short, long)]
        id: i64,
        #[arg(short, long)]
        flower: Option<String>,
        #[arg(short, long)]
        quantity: Option<String>,
        #[arg(short, long)]
        expiry_date: Option<String>,
        #[arg(short, long)]
        status: Option<LotStatus>,
    },
    SetLotQuantity {
        #[arg(short, long)]
        id: i64,
        #[arg(short, long)]
        quantity: i64,
    },
    DeleteLot {
        #[arg(short, long)]
        id: i64,
    },
    Expiring {
        #[arg(short, long, default_value_t = 7)]
        days: u32,
    },
    /// Stock check for `<flower_id>:<quantity>` pairs
    Available {
        #[arg(required = true, value_parser = parse_line)]
        items: Vec<OrderLine>,
    },
    Orders {
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,
        #[arg(short = 'q', long, default_value = "")]
        search: String,
    },
    Order {
        #[arg(short, long)]
        id: i64,
    },
    /// Items as `<flower_id>:<quantity>`
    NewOrder {
        #[arg(required = true, value_parser = parse_entry)]
        items: Vec<DraftEntry>,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    SetOrderStatus {
        #[arg(short, long)]
        id: i64,
        #[arg(short, long)]
        status: OrderStatus,
    },
    CancelOrder {
        #[arg(short, long)]
        id: i64,
    },
    Bouquet {
        #[arg(short, long)]
        budget: String,
        #[arg(short, long, default_value = "")]
        colors: String,
        #[arg(short, long, default_value = "")]
        season: String,
        #[arg(short = 't', long, default_value = "")]
        style: String,
        /// Order the n-th configuration (1-based) right away
        #[arg(short, long)]
        order: Option<usize>,
        /// Ask the bouquet service to validate each configuration
        #[arg(long)]
        check: bool,
    },
    BouquetRules,
    /// Opens a payment intent, or confirms one with --intent
    Pay {
        #[arg(short, long)]
        id: i64,
        #[arg(long)]
        intent: Option<String>,
    },
    Reports {
        #[arg(short, long, default_value = "dashboard")]
        tab: ReportTab,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    Export {
        #[arg(short, long, default_value = "dashboard")]
        tab: ReportTab,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    Approvals,
    Approve {
        #[arg(short, long)]
        id: i64,
    },
    Reject {
        #[arg(short, long)]
        id: i64,
        #[arg(short, long)]
        reason: Option<String>,
    },
    Users,
    SetRole {
        #[arg(short, long)]
        id: i64,
        #[arg(short, long)]
        role: Role,
    },
}

impl Commands {
    /// Screen whose guard applies to the command.
    fn route(&self) -> Option<Route> {
        Some(match self {
            Commands::Login { .. } | Commands::Logout | Commands::Signup { .. } => return None,
            Commands::Whoami | Commands::Profile | Commands::Nav => Route::Profile,
            Commands::Register { .. } => Route::Register,
            Commands::Dashboard => Route::Dashboard,
            Commands::CreateFlower { .. }
            | Commands::UpdateFlower { .. }
            | Commands::DeleteFlower { .. }
            | Commands::Lots { .. }
            | Commands::CreateLot { .. }
            | Commands::UpdateLot { .. }
            | Commands::SetLotQuantity { .. }
            | Commands::DeleteLot { .. }
            | Commands::Expiring { .. } => Route::Inventory,
            Commands::Flowers | Commands::Available { .. } => Route::NewOrder,
            Commands::Orders { .. } | Commands::SetOrderStatus { .. } => Route::Orders,
            Commands::Order { id } | Commands::CancelOrder { id } => Route::OrderDetail(*id),
            Commands::NewOrder { .. } => Route::NewOrder,
            Commands::Bouquet { .. } | Commands::BouquetRules => Route::Bouquet,
            Commands::Pay { id, .. } => Route::OrderPayment(*id),
            Commands::Reports { .. } | Commands::Export { .. } => Route::Reports,
            Commands::Approvals
            | Commands::Approve { .. }
            | Commands::Reject { .. }
            | Commands::Users
            | Commands::SetRole { .. } => Route::PendingApprovals,
        })
    }
}

fn parse_line(s: &str) -> Result<OrderLine, String> {
    let (id, quantity) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <flower_id>:<quantity>, got {s}"))?;
    Ok(OrderLine {
        flower_type_id: id.trim().parse().map_err(|_| format!("bad flower id: {id}"))?,
        quantity: quantity.trim().parse().map_err(|_| format!("bad quantity: {quantity}"))?,
    })
}

/// Order-form entry; the quantity stays raw for the form to read.
#[derive(Clone, Debug)]
struct DraftEntry {
    flower_type_id: i64,
    quantity: String,
}

fn parse_entry(s: &str) -> Result<DraftEntry, String> {
    let (id, quantity) = s
        .split_once(':')
        .ok_or_else(|| format!("expected <flower_id>:<quantity>, got {s}"))?;
    Ok(DraftEntry {
        flower_type_id: id.trim().parse().map_err(|_| format!("bad flower id: {id}"))?,
        quantity: quantity.to_string(),
    })
}

fn init_tracing(json: bool) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
    guard
}

fn print_report(view: &ReportView) -> Result<(), serde_json::Error> {
    let sections = match view {
        ReportView::Dashboard(report) => vec![("Dashboard", report)],
        ReportView::Sales { summary, daily } => {
            vec![("Sales summary", summary), ("Daily sales", daily)]
        }
        ReportView::Inventory { levels, low_stock, expiring } => vec![
            ("Inventory levels", levels),
            ("Low stock", low_stock),
            ("Expiring stock", expiring),
        ],
        ReportView::Orders { by_status, payment_status, top_products } => vec![
            ("Orders by status", by_status),
            ("Payment status", payment_status),
            ("Top products", top_products),
        ],
    };
    for (title, report) in sections {
        println!("== {} ==", title);
        println!("{}", serde_json::to_string_pretty(&report.data)?);
    }
    Ok(())
}

fn overwrite<T>(field: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *field = value;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_json);

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.url {
        config.endpoints = Endpoints::proxied(url, &config.realm);
    }
    if let Some(dir) = &cli.session_dir {
        config.session_dir = dir.clone();
    }
    let session = Arc::new(FileSession::new(config.session_dir.clone()));
    let app = BloomFlow::new(config, session, Arc::new(LogNavigator));

    if let Some(route) = cli.command.route() {
        if let Access::Redirect(target) = app.visit(route) {
            println!("Not allowed here; go to {}", target);
            return Ok(());
        }
    }
    let roles = app.roles();

    match cli.command {
        Commands::Login { username, password } => {
            let result = app.auth().login(&username, &password).await?;
            let name = result
                .user
                .as_ref()
                .and_then(|c| c.display_name().map(str::to_string))
                .unwrap_or(username);
            println!("Logged in as {}.", name);
        }
        Commands::Logout => {
            app.auth().logout();
            println!("Logged out (session cleared).");
        }
        Commands::Whoami => {
            let auth = app.auth();
            match auth.user_info() {
                Some(claims) => println!("{}", serde_json::to_string_pretty(&claims)?),
                None => println!("Token present but not decodable."),
            }
            let names: Vec<String> =
                auth.role_names().iter().map(|r| role_display_name(r)).collect();
            println!("Roles: {}", names.join(", "));
        }
        Commands::Profile => {
            let claims = app.auth().user_info();
            let profile = load_profile(&app.users(), claims.as_ref()).await;
            println!("[{}] {}", profile.initials, profile.display_name);
            println!("Email: {}", profile.email.as_deref().unwrap_or("N/A"));
            let badges: Vec<&str> = profile.roles.iter().map(|r| r.display_name()).collect();
            println!("Roles: {}", badges.join(", "));
            if let Some(user) = &profile.user {
                println!("Member since: {}", format_date(user.created_at.as_deref()));
            }
        }
        Commands::Nav => {
            for item in nav_items(&roles) {
                println!("{:<16} {}", item.label, item.route);
            }
        }
        Commands::Signup {
            username,
            email,
            first_name,
            last_name,
            password,
            confirm_password,
            role,
        } => {
            let form = SignupForm {
                username,
                email,
                first_name,
                last_name,
                password,
                confirm_password,
                requested_role: role,
            };
            println!("{}", submit_signup(&app.users(), &form).await?);
        }
        Commands::Register { role } => {
            println!("{}", register(&app.users(), role).await?);
        }
        Commands::Dashboard => {
            let dashboard = load_dashboard(&app.inventory(), &app.orders(), &roles).await;
            let stats = &dashboard.stats;
            if roles.can_manage_inventory() {
                println!("Flower types:   {}", stats.total_flowers);
                println!("Expiring lots:  {}", stats.expiring_lots);
            }
            println!("Orders:         {}", stats.total_orders);
            println!("Revenue:        {}", format_currency(Some(stats.total_revenue)));
            println!("Recent orders:");
            for order in &dashboard.recent_orders {
                println!(
                    "  ORD-{:<6} {:<16} {:>12}  {}",
                    order.id,
                    order.status,
                    format_currency(Some(order.total_price)),
                    format_date(order.created_at.as_deref())
                );
            }
        }
        Commands::Flowers => {
            for flower in app.inventory().flowers().await? {
                println!(
                    "#{:<4} {:<20} {:<10} {:>10}",
                    flower.id,
                    flower.name,
                    flower.color.as_deref().unwrap_or("-"),
                    format_currency(Some(flower.price_per_unit))
                );
            }
        }
        Commands::CreateFlower { name, price, color, seasonality, description } => {
            let form = FlowerForm { name, color, seasonality, price_per_unit: price, description };
            let flower = app.inventory().create_flower(&form.validate()?).await?;
            println!("Created flower #{} ({})", flower.id, flower.name);
        }
        Commands::UpdateFlower { id, name, price, color, seasonality, description } => {
            let flower = edit_flower(&app.inventory(), id, |form| {
                overwrite(&mut form.name, name);
                overwrite(&mut form.price_per_unit, price);
                overwrite(&mut form.color, color);
                overwrite(&mut form.seasonality, seasonality);
                overwrite(&mut form.description, description);
            })
            .await?;
            println!("Updated flower #{} ({})", flower.id, flower.name);
        }
        Commands::DeleteFlower { id } => {
            app.inventory().delete_flower(id).await?;
            println!("Deleted flower #{}", id);
        }
        Commands::Lots { status, flower } => {
            let filter = LotFilter { status, flower_type_id: flower };
            let screen = load_inventory(&app.inventory(), &filter).await?;
            for lot in &screen.lots {
                let name = bloomflow::views::flower_name(&screen.flowers, lot.flower_type_id);
                println!(
                    "Lot #{:<4} {:<20} qty {:<6} {:<10} expires {}",
                    lot.id,
                    name,
                    lot.quantity,
                    lot.status,
                    format_date(lot.expiry_date.as_deref())
                );
            }
        }
        Commands::CreateLot { flower, quantity, expiry_date, status } => {
            let form = LotForm { flower_type_id: flower, quantity, expiry_date, status };
            let lot = app.inventory().create_lot(&form.validate()?).await?;
            println!("Created lot #{}", lot.id);
        }
        Commands::UpdateLot { id, flower, quantity, expiry_date, status } => {
            let lot = edit_lot(&app.inventory(), id, |form| {
                overwrite(&mut form.flower_type_id, flower);
                overwrite(&mut form.quantity, quantity);
                overwrite(&mut form.expiry_date, expiry_date);
                overwrite(&mut form.status, status);
            })
            .await?;
            println!("Updated lot #{} ({}, qty {})", lot.id, lot.status, lot.quantity);
        }
        Commands::SetLotQuantity { id, quantity } => {
            let lot = app.inventory().update_lot_quantity(id, quantity).await?;
            println!("Lot #{} now holds {}", lot.id, lot.quantity);
        }
        Commands::DeleteLot { id } => {
            app.inventory().delete_lot(id).await?;
            println!("Deleted lot #{}", id);
        }
        Commands::Expiring { days } => {
            for lot in app.inventory().expiring_lots(days).await? {
                println!(
                    "Lot #{:<4} flower #{:<4} qty {:<6} expires {}",
                    lot.id,
                    lot.flower_type_id,
                    lot.quantity,
                    format_date(lot.expiry_date.as_deref())
                );
            }
        }
        Commands::Available { items } => {
            let availability = app.inventory().check_availability(&items).await?;
            for (flower_id, entry) in &availability.availability {
                println!(
                    "flower #{:<4} required {:<5} available {:<5} {}",
                    flower_id,
                    entry.required,
                    entry.available,
                    if entry.sufficient { "ok" } else { "short" }
                );
            }
            println!("All available: {}", availability.all_available);
        }
        Commands::Orders { status, search } => {
            let rows =
                load_order_list(&app.orders(), &app.inventory(), &app.users(), &roles).await?;
            let stats = OrderStats::compute(&rows, Utc::now().date_naive());
            println!(
                "Today: {} orders, {} revenue; {} pending",
                stats.today_orders,
                format_currency(Some(stats.today_revenue)),
                stats.pending_orders
            );
            for row in filter_orders(&rows, status, &search) {
                println!(
                    "{:<10} {:<20} {:<10} {:>12}  {}",
                    row.code(),
                    row.customer_name,
                    row.display_status,
                    format_currency(Some(row.items_total())),
                    format_date(row.order.created_at.as_deref())
                );
            }
        }
        Commands::Order { id } => {
            let current_user_id = app.users().current_user().await.ok().map(|u| u.id);
            let detail = load_order_detail(
                id,
                &app.orders(),
                &app.inventory(),
                &app.users(),
                &roles,
                current_user_id,
            )
            .await?;
            let row = &detail.row;
            println!("{} for {} ({})", row.code(), row.customer_name, row.display_status);
            for item in &row.items {
                println!(
                    "  {:<20} x{:<4} {:>10}",
                    item.name,
                    item.quantity,
                    format_currency(Some(item.price))
                );
            }
            println!("Total: {}", format_currency(Some(row.order.total_price)));
            if let Some(notes) = &row.order.notes {
                println!("Notes: {}", notes);
            }
            if let Some(payment) = row.order.payment_status {
                println!("Payment: {}", payment);
            }
            if detail.needs_payment {
                println!("Awaiting payment: bloomflow pay --id {}", id);
            }
            if detail.can_cancel {
                println!("Can be cancelled: bloomflow cancel-order --id {}", id);
            }
        }
        Commands::NewOrder { items, notes } => {
            let mut draft = OrderDraft::from_entries(
                items.iter().map(|e| (e.flower_type_id, e.quantity.as_str())),
            );
            draft.notes = notes;
            let flowers = app.inventory().flowers().await?;
            for line in &draft.lines {
                if let Some(id) = line.flower_type_id {
                    let name = bloomflow::views::flower_name(&flowers, id);
                    println!("  {:<20} x{}", name, line.quantity);
                }
            }
            println!("Estimated total: {}", format_currency(Some(draft.total(&flowers))));
            let order = draft.submit(&app.orders()).await?;
            println!("Created ORD-{} ({})", order.id, format_currency(Some(order.total_price)));
        }
        Commands::SetOrderStatus { id, status } => {
            let order = app.orders().update_order_status(id, status).await?;
            println!("ORD-{} is now {}", order.id, order.status);
        }
        Commands::CancelOrder { id } => {
            let order = app.orders().update_order_status(id, OrderStatus::Cancelled).await?;
            println!("ORD-{} cancelled", order.id);
        }
        Commands::Bouquet { budget, colors, season, style, order, check } => {
            let form = BouquetForm { budget, colors, season, style };
            let configurations = bouquet_view::search(&app.bouquet(), &form).await?;
            for (n, configuration) in configurations.iter().enumerate() {
                println!(
                    "Option {}: {} flowers, {} types, {}",
                    n + 1,
                    configuration.total_flowers,
                    configuration.flower_types_count,
                    format_currency(Some(configuration.total_price))
                );
                for item in &configuration.items {
                    let name = item
                        .flower_name
                        .clone()
                        .unwrap_or_else(|| format!("Flower #{}", item.flower_type_id));
                    println!(
                        "  {:<20} x{:<4} {:>10}",
                        name,
                        item.quantity,
                        format_currency(Some(item.subtotal))
                    );
                }
                if check {
                    let verdict = app.bouquet().validate(configuration).await?;
                    let status = if verdict.valid { "valid" } else { "invalid" };
                    match verdict.message {
                        Some(message) => println!("  Check: {} ({})", status, message),
                        None => println!("  Check: {}", status),
                    }
                }
            }
            if let Some(n) = order {
                match n.checked_sub(1).and_then(|i| configurations.get(i)) {
                    Some(configuration) => {
                        let created =
                            bouquet_view::order_configuration(&app.orders(), &form, configuration)
                                .await?;
                        println!("Created ORD-{}", created.id);
                    }
                    None => println!("No option {}", n),
                }
            }
        }
        Commands::BouquetRules => {
            let catalog = bouquet_view::load_catalog(&app.bouquet(), &app.inventory()).await;
            match catalog.rules {
                Some(rules) => {
                    println!(
                        "Flowers per bouquet: {}-{}",
                        rules.min_flowers_per_bouquet, rules.max_flowers_per_bouquet
                    );
                    println!("Flower types: {}-{}", rules.min_flower_types, rules.max_flower_types);
                    for (color, matches) in &rules.color_compatibility {
                        println!("  {} pairs with {}", color, matches.join(", "));
                    }
                }
                None => println!("Bouquet rules unavailable"),
            }
            println!("{} flower types in catalogue", catalog.flowers.len());
        }
        Commands::Pay { id, intent } => match intent {
            None => {
                let (order, intent) = start_checkout(&app.orders(), &app.payments(), id).await?;
                println!("ORD-{} total {}", order.id, format_currency(Some(order.total_price)));
                println!("Payment intent: {}", intent.payment_intent_id);
                println!("Client secret:  {}", intent.client_secret);
                if let Some(key) = &app.config().stripe_publishable_key {
                    println!("Publishable key: {}", key);
                }
                println!(
                    "After paying, run: bloomflow pay --id {} --intent {}",
                    id, intent.payment_intent_id
                );
            }
            Some(intent_id) => {
                let confirmation = complete_checkout(&app.payments(), id, &intent_id).await?;
                println!("{}", confirmation.message.as_deref().unwrap_or("Payment confirmed"));
            }
        },
        Commands::Reports { tab, start, end } => {
            let range = DateRange { start_date: start, end_date: end };
            let view = load_tab(&app.reports(), tab, &range).await?;
            print_report(&view)?;
        }
        Commands::Export { tab, start, end, out } => {
            let range = DateRange { start_date: start, end_date: end };
            let export = export_tab(&app.reports(), tab, &range).await?;
            let path = out.join(&export.file_name);
            fs::write(&path, &export.bytes)?;
            println!("Saved {}", path.display());
        }
        Commands::Approvals => {
            let queue = ApprovalQueue::load(&app.users()).await?;
            if queue.pending.is_empty() {
                println!("No pending florist requests.");
            }
            for user in &queue.pending {
                println!(
                    "#{:<4} {:<30} requested {}",
                    user.id,
                    user.email.as_deref().unwrap_or("-"),
                    format_date(user.created_at.as_deref())
                );
            }
        }
        Commands::Approve { id } => {
            let mut queue = ApprovalQueue::load(&app.users()).await?;
            println!("{}", queue.approve(&app.users(), id).await?);
        }
        Commands::Reject { id, reason } => {
            let mut queue = ApprovalQueue::load(&app.users()).await?;
            println!("{}", queue.reject(&app.users(), id, reason.as_deref()).await?);
        }
        Commands::Users => {
            for user in app.users().users().await? {
                println!(
                    "#{:<4} {:<24} {:<30} {}",
                    user.id,
                    user.label(),
                    user.email.as_deref().unwrap_or("-"),
                    user.role.as_deref().map(role_display_name).unwrap_or_default()
                );
            }
        }
        Commands::SetRole { id, role } => {
            let user = app.users().update_user_role(id, role).await?;
            println!("{} is now {}", user.label(), role.display_name());
        }
    }

    Ok(())
}
