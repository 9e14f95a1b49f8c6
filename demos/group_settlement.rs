//! Group expense settlement example

use bigdecimal::BigDecimal;
use finance_core::utils::{money, MemoryStorage};
use finance_core::{GroupDraft, MemberDraft, SettlementStatus, Tracker};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut tracker = Tracker::new(MemoryStorage::new());

    let draft = GroupDraft::new("Beach house", BigDecimal::from(600))
        .description("Long weekend rental")
        .member(MemberDraft::new("Priya", BigDecimal::from(0)))
        .member(MemberDraft::new("Jordan", BigDecimal::from(0)))
        .member(MemberDraft::new("Sam", BigDecimal::from(0)));
    let group = tracker.create_group(draft).await?;

    println!("Group '{}' total ${}", group.name, money::format(&group.total_amount));
    for member in &group.members {
        println!("  {} owes a share of ${}", member.name, money::format(&member.should_pay));
    }

    print_settlement(&tracker, &group.id).await?;

    // Priya books the house, Jordan chips in for cleaning.
    tracker
        .record_payment(&group.id, &group.members[0].id, BigDecimal::from(450))
        .await?;
    tracker
        .record_payment(&group.id, &group.members[1].id, BigDecimal::from(150))
        .await?;

    print_settlement(&tracker, &group.id).await?;
    Ok(())
}

async fn print_settlement(
    tracker: &Tracker<MemoryStorage>,
    group_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let settlement = tracker.settle_group(group_id).await?;
    match settlement.status {
        SettlementStatus::Settled => println!("\nEveryone is settled up."),
        SettlementStatus::NeedsTransfers => println!("\nTo settle up:"),
        SettlementStatus::UnderCollected => println!("\nStill to be collected:"),
        SettlementStatus::OverCollected => println!("\nMore than the total was paid in:"),
    }
    for transfer in &settlement.transfers {
        println!("  {}", transfer);
    }
    Ok(())
}
