//! Dashboard summary binary.
//!
//! A thin shell over the library: restores the session, fetches the four
//! resource collections concurrently, and prints entity counts, the
//! campaign budget allocation, and the per-company tier distribution.

use dotenvy::dotenv;
use loyalty_desk::api::{Gateway, Session};
use loyalty_desk::config;
use loyalty_desk::core::progression::{self, TierProgress};
use loyalty_desk::core::{billing, revenue, tier};
use loyalty_desk::errors::{Error, Result};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;

    // 4. Restore the session from the token store, or log in fresh if
    //    credentials were provided
    let session = Arc::new(Session::load(&app_config.token_store_path));
    let gateway = Gateway::new(&app_config, Arc::clone(&session))?;

    if !session.is_authenticated().await {
        let (Ok(email), Ok(password)) = (env::var("CRM_EMAIL"), env::var("CRM_PASSWORD")) else {
            return Err(Error::Config {
                message: "No stored session; set CRM_EMAIL and CRM_PASSWORD to log in"
                    .to_string(),
            });
        };
        gateway.login(&email, &password).await?;
    }

    // 5. Fetch the four collections concurrently; they are independent, so
    //    a failed one degrades to an empty list rather than sinking the
    //    whole summary
    let (customers, programs, campaigns, tickets) = tokio::join!(
        gateway.list_customers(),
        gateway.list_loyalty_programs(),
        gateway.list_campaigns(),
        gateway.list_support_tickets(),
    );
    let customers = customers.unwrap_or_else(|e| {
        warn!("Failed to fetch customers: {e}");
        Vec::new()
    });
    let programs = programs.unwrap_or_else(|e| {
        warn!("Failed to fetch loyalty programs: {e}");
        Vec::new()
    });
    let campaigns = campaigns.unwrap_or_else(|e| {
        warn!("Failed to fetch campaigns: {e}");
        Vec::new()
    });
    let tickets = tickets.unwrap_or_else(|e| {
        warn!("Failed to fetch tickets: {e}");
        Vec::new()
    });

    info!(
        customers = customers.len(),
        loyalty_programs = programs.len(),
        campaigns = campaigns.len(),
        tickets = tickets.len(),
        "Dashboard snapshot fetched"
    );

    // 6. Print the summary
    println!("== Loyalty Desk dashboard ==");
    println!(
        "{} customers | {} loyalty programs | {} campaigns | {} tickets",
        customers.len(),
        programs.len(),
        campaigns.len(),
        tickets.len()
    );

    println!("\nCampaign budgets (8% of base revenue):");
    let allocation = revenue::allocate_budgets(&customers, &app_config.companies);
    for company in &allocation.companies {
        println!(
            "  {:<18} revenue {:>12.2}  budget {:>10.2}",
            company.company, company.revenue, company.budget
        );
    }
    println!(
        "  total revenue {:.2}, total budget {:.2}",
        allocation.total_revenue, allocation.total_budget
    );

    println!("\nLoyalty tiers by company:");
    for company in &app_config.companies {
        let dist = tier::tier_distribution(&customers, company);
        println!(
            "  {:<18} bronze {:>3}  silver {:>3}  gold {:>3}  platinum {:>3}",
            company, dist.bronze, dist.silver, dist.gold, dist.platinum
        );
    }

    println!("\nCustomers closest to their next tier:");
    let mut climbers: Vec<_> = customers
        .iter()
        .filter_map(|customer| {
            let total = billing::total_billing(customer);
            match progression::progression(total) {
                TierProgress::AtMaximum => None,
                TierProgress::Toward {
                    next_tier,
                    amount_needed,
                    percent,
                    ..
                } => Some((customer, next_tier, amount_needed, percent)),
            }
        })
        .collect();
    climbers.sort_by(|a, b| b.3.partial_cmp(&a.3).unwrap_or(std::cmp::Ordering::Equal));
    for (customer, next_tier, amount_needed, percent) in climbers.into_iter().take(5) {
        println!(
            "  {:<24} {:>5.1}% to {} ({:.2} more needed)",
            customer.full_name(),
            percent,
            next_tier,
            amount_needed
        );
    }

    Ok(())
}
