use std::sync::Arc;

use anyhow::Context;
use canteen_client::{
    ClientConfig, CustomerDirectory, CustomersView, HttpClient, LogNavigator, OperatorFeedback,
    OrderDetailController, OrderQuery, PushChannel, Toast, ToastKind, logger::init_logger,
};
use canteen_printer::{NetworkPrinter, PreviewPrinter, Printer, ReceiptPrinter};
use clap::{Parser, Subcommand};
use shared::order::DisplayOrderNumber;

#[derive(Parser)]
#[command(name = "canteen-admin", about = "Canteen admin console", version)]
struct Cli {
    /// Backend API base URL (overrides CANTEEN_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Admin user id (overrides CANTEEN_ADMIN_ID)
    #[arg(long)]
    admin: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show one order
    Show { order_id: String },
    /// Advance an order to its next status
    Advance { order_id: String },
    /// Delete an order
    Delete { order_id: String },
    /// Print the receipt and advance the order
    Print { order_id: String },
    /// List every order
    Orders,
    /// List customers
    Customers {
        /// Delete this customer first
        #[arg(long)]
        delete: Option<String>,
        /// Stay attached to the event feed until Ctrl-C
        #[arg(long)]
        watch: bool,
    },
}

/// Toasts and alerts printed for the operator
struct ConsoleFeedback;

impl OperatorFeedback for ConsoleFeedback {
    fn toast(&self, toast: &Toast) {
        match toast.kind {
            ToastKind::Success => println!("{}", toast),
            ToastKind::Error => eprintln!("{}", toast),
        }
    }

    fn alert(&self, message: &str) {
        println!("[alert] {}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(admin) = cli.admin {
        config = config.with_admin(admin);
    }
    init_logger(&config.log_level, config.log_json)?;

    let api = HttpClient::new(&config).context("Failed to build HTTP client")?;
    let feedback: Arc<dyn OperatorFeedback> = Arc::new(ConsoleFeedback);

    match cli.command {
        Command::Orders => list_orders(&api, &config).await,
        Command::Customers { delete, watch } => {
            customers(api, &config, feedback, delete.as_deref(), watch).await
        }
        command => match &config.printer_addr {
            Some(addr) => {
                let printer = NetworkPrinter::from_addr(addr)
                    .with_context(|| format!("Invalid printer address {}", addr))?;
                order_action(api, printer, &config, feedback, command).await
            }
            None => order_action(api, PreviewPrinter, &config, feedback, command).await,
        },
    }
}

async fn order_action<P: Printer>(
    api: HttpClient,
    printer: P,
    config: &ClientConfig,
    feedback: Arc<dyn OperatorFeedback>,
    command: Command,
) -> anyhow::Result<()> {
    let mut controller = OrderDetailController::new(
        api,
        ReceiptPrinter::new(printer, config.paper_width),
        feedback,
        Arc::new(LogNavigator),
        config.admin_user_id.clone(),
    );

    let order_id = match &command {
        Command::Show { order_id }
        | Command::Advance { order_id }
        | Command::Delete { order_id }
        | Command::Print { order_id } => order_id.clone(),
        Command::Orders | Command::Customers { .. } => return Ok(()),
    };

    let view = controller.load(&order_id).await?;
    println!(
        "#{} {} [{}] {} {} total {:.2}",
        view.order_number,
        view.order.user.name,
        view.order.status,
        view.date,
        view.time,
        view.order.total
    );
    for item in &view.order.order_items {
        println!("  {} x{} @ {:.2}", item.name, item.quantity, item.price);
    }

    match command {
        Command::Advance { .. } => {
            controller.update().await?;
        }
        Command::Delete { .. } => controller.delete().await?,
        Command::Print { .. } => {
            let outcome = controller.print().await?;
            outcome.printed?;
            outcome.advanced?;
        }
        _ => {}
    }
    Ok(())
}

async fn list_orders(api: &HttpClient, config: &ClientConfig) -> anyhow::Result<()> {
    let orders = api.query_orders(&config.admin_user_id).await?;
    for order in &orders {
        println!(
            "#{} {} {} {:.2} {}",
            DisplayOrderNumber::from_order_id(&order.id),
            order.id,
            order.status,
            order.total,
            order.created_date()
        );
    }
    Ok(())
}

async fn customers(
    api: HttpClient,
    config: &ClientConfig,
    feedback: Arc<dyn OperatorFeedback>,
    delete: Option<&str>,
    watch: bool,
) -> anyhow::Result<()> {
    let directory = Arc::new(CustomerDirectory::new(
        api,
        config.admin_user_id.clone(),
        feedback,
    ));
    if let Some(user_id) = delete {
        directory.delete(user_id).await?;
    }

    let channel = match (&config.push_addr, watch) {
        (Some(addr), true) => PushChannel::connect(addr).await?.0,
        (None, true) => {
            tracing::warn!("CANTEEN_PUSH_ADDR not set, no notifications will arrive");
            PushChannel::new()
        }
        _ => PushChannel::new(),
    };
    let view = CustomersView::mount(directory, &channel, watch).await;
    for user in view.directory().users().await {
        println!("{} {} <{}> {} {}", user.id, user.name, user.email, user.gender, user.role);
    }

    if watch {
        tracing::info!("Watching payment notifications, Ctrl-C to stop");
        tokio::signal::ctrl_c().await?;
    }
    view.unmount();
    Ok(())
}
