use anyhow::Context;
use clap::Parser;
use rocket_cart::core::ConfigProvider;
use rocket_cart::utils::error::ErrorCategory;
use rocket_cart::utils::format::format_price;
use rocket_cart::utils::{logger, validation};
use rocket_cart::{
    AmountUpdate, Cart, CartCommand, CartError, CartStore, CliConfig, ConsoleNotifier, HttpCatalog,
    LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut toml = rocket_cart::TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            cli.apply_overrides(&mut toml);
            Box::new(toml)
        }
        None => Box::new(cli.clone()),
    };

    if let Err(e) = validation::validate_provider(config.as_ref()) {
        fail(&e);
    }

    let catalog = HttpCatalog::from_config(config.as_ref())?;
    let storage = LocalStorage::new(config.storage_path().to_string());

    let mut store =
        match CartStore::hydrate(catalog, storage, ConsoleNotifier, config.cart_key()).await {
            Ok(store) => store,
            Err(e) => fail(&e),
        };

    let outcome = match &cli.command {
        CartCommand::Show => Ok(store.cart().clone()),
        CartCommand::Add { product_id } => store.add_product(*product_id).await,
        CartCommand::Remove { product_id } => store.remove_product(*product_id).await,
        CartCommand::Update { product_id, amount } => {
            store
                .update_product_amount(AmountUpdate {
                    product_id: *product_id,
                    amount: *amount,
                })
                .await
        }
    };

    match outcome {
        Ok(cart) => {
            print_cart(&cart);
            Ok(())
        }
        // The store has already shown the notice; add the detail and exit non-zero.
        Err(e) => {
            eprintln!("💡 {} ({})", e.user_friendly_message(), e.recovery_suggestion());
            print_cart(store.cart());
            std::process::exit(exit_code(&e));
        }
    }
}

fn fail(e: &CartError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

fn exit_code(e: &CartError) -> i32 {
    match e.category() {
        ErrorCategory::Lookup
        | ErrorCategory::Stock
        | ErrorCategory::Input
        | ErrorCategory::Cart => 1,
        ErrorCategory::Transport => 2,
        ErrorCategory::Storage => 3,
        ErrorCategory::Config => 4,
    }
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 {} products, {} items", cart.len(), cart.total_amount());
    for item in cart {
        println!(
            "  #{:<4} {:<40} {:>3} x {:>12} = {:>12}",
            item.id,
            item.title,
            item.amount,
            format_price(item.price),
            format_price(item.subtotal())
        );
    }
    println!("  Total: {}", format_price(cart.total()));
}
