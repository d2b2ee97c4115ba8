//! Print the computed summary of a saved plan
//!
//! Usage: plan_report <owner> <id> [tool_type]

use dietkit::db::{self, Database};
use dietkit::models::{MealSlot, PlanRecord, ToolType};
use dietkit::nutrition::{distribution, AllocationStatus};
use dietkit::tools::plans;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (owner, id) = match args.as_slice() {
        [owner, id, ..] => (owner.as_str(), id.parse::<i64>()?),
        _ => {
            eprintln!("Usage: plan_report <owner> <id> [tool_type]");
            std::process::exit(2);
        }
    };
    let tool_type = match args.get(2) {
        Some(s) => ToolType::from_str(s).ok_or_else(|| format!("Unknown tool type: {}", s))?,
        None => ToolType::MealPlanner,
    };

    let db_path = db::get_database_path();
    let database = Database::new(&db_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        Ok(())
    })?;

    let record = database.with_conn(|conn| PlanRecord::get(conn, owner, tool_type, id))?;
    let Some(record) = record else {
        eprintln!("No {} plan {} for {}", tool_type.as_str(), id, owner);
        std::process::exit(1);
    };

    let summary = plans::summarize(&record.state);
    let plan = record.state.serving_plan();
    let totals = &summary.exchange.totals;
    let share = &summary.exchange.energy_share;

    println!(
        "Plan {} ({}) - {}",
        record.id,
        record.tool_type.as_str(),
        record.label.as_deref().unwrap_or("untitled")
    );
    println!("Updated: {}", record.updated_at);
    println!();

    println!("{:<20} {:>8} {:>8} {:>10}", "Group", "Target", "Placed", "Remaining");
    for (group, row) in &summary.remainders {
        let flag = match row.status {
            AllocationStatus::OverAllocated => " over",
            _ => "",
        };
        println!(
            "{:<20} {:>8.1} {:>8.1} {:>10.1}{}",
            group.display_name(),
            row.target,
            row.distributed,
            row.remainder,
            flag
        );
    }
    println!();

    println!(
        "Totals: {:.0} kcal | CHO {:.1} g ({:.0}%) | PRO {:.1} g ({:.0}%) | Fat {:.1} g ({:.0}%) | Fiber {:.1} g",
        totals.kcal, totals.cho, share.cho, totals.pro, share.pro, totals.fat, share.fat, totals.fiber
    );
    if summary.exchange.target_kcal > 0.0 {
        println!(
            "Target: {:.0} kcal ({:.0}% reached)",
            summary.exchange.target_kcal, summary.exchange.achievement.kcal
        );
    }
    println!();

    let slots = distribution::slot_totals(&plan, &record.state.distribution);
    for slot in MealSlot::ALL {
        let t = &slots[&slot];
        if t.kcal > 0.0 {
            println!("{:<16} {:>6.0} kcal  CHO {:>5.1}  PRO {:>5.1}  Fat {:>5.1}", slot.display_name(), t.kcal, t.cho, t.pro, t.fat);
        }
    }

    Ok(())
}
