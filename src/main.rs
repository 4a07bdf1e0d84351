use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use regex::Regex;

use sales_ledger::{
    best_seller_message, best_selling_product, menu::Menu, revenue_message, total_revenue,
    Error, Sales, SalesTable, Store,
};

#[derive(Parser)]
/// Records sales in a CSV ledger and reports revenue and best sellers.
///
/// With no command, runs the interactive menu.
struct Args {
    #[arg(short, long, default_value = "sales.csv")]
    /// Sales file to read and append to
    file: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show total revenue
    Revenue {
        #[arg(short, long, value_parser = Regex::new)]
        /// Only count products matching this regex
        product: Option<Regex>,
    },
    /// Show the product with the most units sold
    BestSeller {
        #[arg(short, long, value_parser = Regex::new)]
        /// Only consider products matching this regex
        product: Option<Regex>,
    },
    /// Add a sale, dated today
    Add {
        product: String,
        #[arg(allow_hyphen_values = true)]
        quantity: String,
        #[arg(allow_hyphen_values = true)]
        price: String,
    },
    /// List all sales as a table
    List {
        #[arg(short, long, value_parser = Regex::new)]
        /// Only list products matching this regex
        product: Option<Regex>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let store = Store::new(&args.file);
    let Some(command) = args.command else {
        let stdin = io::stdin();
        return Menu::new(&store, stdin.lock(), io::stdout()).run();
    };
    match command {
        Command::Revenue { product } => {
            let sales = load(&store, product.as_ref())?;
            println!("{}", revenue_message(total_revenue(&sales.records)));
        }
        Command::BestSeller { product } => {
            let sales = load(&store, product.as_ref())?;
            match best_selling_product(&sales.records) {
                Ok(best) => println!("{}", best_seller_message(&best)),
                Err(Error::EmptyInput) => println!("No sales recorded yet."),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Add {
            product,
            quantity,
            price,
        } => {
            let record = store
                .add_sale(&product, &quantity, &price)
                .with_context(|| format!("adding sale to {}", args.file.display()))?;
            println!(
                "{} added successfully on {}.",
                record.product,
                record.sale_date.format("%Y-%m-%d")
            );
        }
        Command::List { product } => {
            let sales = load(&store, product.as_ref())?;
            print!("{}", SalesTable(&sales.records));
        }
    }
    Ok(())
}

fn load(store: &Store, product: Option<&Regex>) -> Result<Sales> {
    let mut sales = store
        .load()
        .with_context(|| format!("reading {}", store.path().display()))?;
    if let Some(pattern) = product {
        sales.retain_products(pattern);
    }
    Ok(sales)
}
