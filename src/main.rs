//! Multi-Index Book - demo binary
//!
//! Loads the fixed buy/sell exercise data into an index and prints the
//! result of every query for each side.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use multi_index_book::{IdentityIndex, IndexConfig, IndexError, Order, OrderIndex, Side};

/// Query a small order index from the command line
#[derive(Parser, Debug)]
#[command(name = "multi-index-book", version, about = "Composite-key order index demo")]
struct Cli {
    /// Run without the unique order id index
    #[arg(long)]
    no_identity_index: bool,

    /// Order slots to pre-allocate
    #[arg(long, default_value_t = 64)]
    capacity: usize,

    /// Price used for the orders-at-price query
    #[arg(long, default_value_t = 15)]
    price: u64,
}

/// Exercise data: three buys, three sells, quantity 10 each
fn sample_orders() -> Vec<Order> {
    vec![
        Order::new(1, Side::Buy, 10, 15, 6),
        Order::new(2, Side::Buy, 10, 14, 1),
        Order::new(3, Side::Buy, 10, 13, 2),
        Order::new(4, Side::Sell, 10, 16, 3),
        Order::new(5, Side::Sell, 10, 17, 4),
        Order::new(6, Side::Sell, 10, 18, 5),
    ]
}

fn print_section<'a>(title: &str, orders: impl Iterator<Item = &'a Order>) {
    println!("--- {} ---", title);
    let mut any = false;
    for order in orders {
        println!("{}", order);
        any = true;
    }
    if !any {
        println!("(none)");
    }
}

fn run(cli: &Cli) -> Result<(), IndexError> {
    let identity = if cli.no_identity_index {
        IdentityIndex::Disabled
    } else {
        IdentityIndex::Unique
    };
    let mut index = OrderIndex::with_config(
        IndexConfig::default()
            .capacity(cli.capacity)
            .identity(identity),
    );

    let inserted = index.insert_all(sample_orders())?;
    info!(inserted, ?identity, "index loaded");

    for side in [Side::Buy, Side::Sell] {
        print_section(&format!("All {} orders", side), index.all_orders(side));
        print_section(&format!("Highest {} price", side), index.best_price(side).into_iter());
        print_section(&format!("Lowest {} price", side), index.worst_price(side).into_iter());
        print_section(
            &format!("{} orders at {}, by timestamp", side, cli.price),
            index.orders_at_price(side, cli.price),
        );
    }

    if identity == IdentityIndex::Unique {
        print_section("Order 4", index.find_by_id(4).into_iter());
        match index.insert(Order::new(4, Side::Sell, 10, 19, 7)) {
            Ok(_) => println!("Duplicate order 4 was accepted"),
            Err(e) => println!("Duplicate order 4 rejected: {}", e),
        }
    }

    println!("State root: {}", index.state_root_hex());
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!(error = %e, "demo failed");
        std::process::exit(1);
    }
}
