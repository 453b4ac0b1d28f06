//! # Commands
//!
//! One function per subcommand. Each prints to stdout and returns
//! `anyhow::Result` so `main` can report failures uniformly.

use anyhow::{anyhow, bail, Context};
use tracing::info;

use mycoffee_core::Money;
use mycoffee_services::{add_to_basket, load_basket_view, AdjustOutcome, InventoryBoard, Storefront};

pub async fn products(storefront: &Storefront) -> anyhow::Result<()> {
    let products = storefront.products().get_products().await?;
    if products.is_empty() {
        println!("No products.");
    }
    for product in &products {
        let id = product.id_segment().unwrap_or("?");
        let flag = if product.available { "" } else { "  (unavailable)" };
        println!(
            "{:>6}  {:<32} {:>9}{}",
            id,
            product.name,
            Money::from_decimal(product.price).to_string(),
            flag
        );
    }
    Ok(())
}

pub async fn whoami(storefront: &Storefront) -> anyhow::Result<()> {
    let me = storefront.users().identity().await?;
    let roles: Vec<&str> = me.authorities.iter().map(|a| a.authority.as_str()).collect();
    println!("{} [{}]", me.username, roles.join(", "));
    Ok(())
}

pub async fn basket_add(storefront: &Storefront, product_id: &str, quantity: i64) -> anyhow::Result<()> {
    let me = storefront.users().identity().await?;
    let added = add_to_basket(storefront, &me, product_id, quantity).await?;

    if added.created_basket {
        println!("Created a new basket.");
    }
    println!("Added {} x product {} to your basket.", quantity, product_id);
    Ok(())
}

pub async fn basket_show(storefront: &Storefront, basket_id: Option<&str>) -> anyhow::Result<()> {
    let basket_id = match basket_id {
        Some(id) => id.to_string(),
        None => {
            let me = storefront.users().identity().await?;
            let Some(basket) = storefront.baskets().find_for_user(&me).await? else {
                println!("Your basket is empty");
                return Ok(());
            };
            basket
                .id
                .map(|id| id.to_string())
                .or_else(|| basket.id_segment().map(str::to_string))
                .ok_or_else(|| anyhow!("basket has neither id nor self link"))?
        }
    };

    let view = load_basket_view(storefront, &basket_id).await?;
    if view.is_empty() {
        println!("Your basket is empty");
        return Ok(());
    }

    for line in &view.lines {
        println!(
            "{:<32} {:>9} each  x{:<4} {:>9}",
            line.product_name,
            line.unit_price.to_string(),
            line.quantity,
            line.line_total().to_string()
        );
    }
    println!("{:>60}", format!("Total: {}", view.total()));
    Ok(())
}

async fn load_board(storefront: &Storefront) -> anyhow::Result<InventoryBoard> {
    let me = storefront.users().identity().await?;
    if !me.can_register_business() {
        bail!("{} is not a business account", me.username);
    }

    let board = InventoryBoard::new(storefront.inventories());
    board.load(&me).await.context("loading inventories")?;
    Ok(board)
}

pub async fn inventory_list(storefront: &Storefront) -> anyhow::Result<()> {
    let board = load_board(storefront).await?;
    let items = board.items();
    if items.is_empty() {
        println!("No inventories.");
    }
    for item in &items {
        let capacity = item
            .capacity
            .filter(|c| *c > 0)
            .map(|c| format!("/{c}"))
            .unwrap_or_default();
        let full = if item.is_at_capacity() { "  FULL" } else { "" };
        println!(
            "{:<24} {:<16} {:>5}{}{}  {}",
            item.name,
            item.location,
            item.total_stock,
            capacity,
            full,
            item.self_href().unwrap_or("-")
        );
    }
    Ok(())
}

pub async fn inventory_adjust(storefront: &Storefront, href: &str, delta: i64) -> anyhow::Result<()> {
    let board = load_board(storefront).await?;

    match board.adjust_stock(href, delta).await {
        AdjustOutcome::Applied(stock) => {
            info!(href, stock, "Stock adjusted");
            println!("Stock is now {stock}.");
            Ok(())
        }
        AdjustOutcome::Rejected(reason) => bail!("{reason}"),
        AdjustOutcome::RolledBack => Err(anyhow!(board
            .error()
            .unwrap_or_else(|| "Failed to update stock".to_string()))),
        AdjustOutcome::NotOnBoard => bail!("no inventory of yours at {href}"),
    }
}

pub async fn records(storefront: &Storefront) -> anyhow::Result<()> {
    let me = storefront.users().identity().await?;
    let records = storefront.records().get_records_by_owned_by(&me).await;
    if records.is_empty() {
        println!("No records.");
    }
    for record in &records {
        println!(
            "{:>6}  {:<32} {}",
            record.id.map(|id| id.to_string()).unwrap_or_default(),
            record.name.as_deref().unwrap_or("(unnamed)"),
            record.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}
