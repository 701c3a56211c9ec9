use chrono::NaiveDate;

use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::family_ops;
use crate::ops::draw_ops::AssignmentStatus;
use crate::queries::stats_queries;

pub fn list(ctx: &CLIContext) {
    let families = family_ops::list_families(ctx.store()).unwrap_or_default();
    if families.is_empty() {
        println!("No families yet. Use 'create-family <name>' to create one.");
        return;
    }
    let current = ctx.current_family();
    println!("Families ({}):", families.len());
    for family in &families {
        let marker = if current.as_ref() == Some(&family.code) { "*" } else { " " };
        println!(" {} {}  {}", marker, family.code, family.name);
    }
}

pub fn create(ctx: &CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Family name: ") {
            Some(s) if !s.is_empty() => s,
            _ => {
                println!("Name cannot be empty.");
                return;
            }
        }
    };

    let event_date = match prompt_date(ctx, "Event date (YYYY-MM-DD, optional): ") {
        Ok(d) => d,
        Err(()) => return,
    };
    let budget = match prompt_amount(ctx, "Max budget (optional): ") {
        Ok(b) => b,
        Err(()) => return,
    };

    match family_ops::create_family(ctx.store(), &mut rand::thread_rng(), &name, event_date, budget) {
        Ok(family) => {
            println!("Created family {} with code {}", family.name, family.code);
            println!("Share the code with everyone taking part.");
            ctx.select_family(Some(family.code));
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn select(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: use <code>");
        return;
    }
    let code = match FamilyCode::parse(args) {
        Ok(c) => c,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    match family_ops::get_family(ctx.store(), &code) {
        Ok(family) => {
            println!("Using {} ({})", family.name, family.code);
            ctx.select_family(Some(family.code));
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CLIContext) {
    let Some(code) = ctx.require_family() else { return };
    let summary = match stats_queries::family_summary(ctx.store(), &code, CLIContext::today()) {
        Ok(s) => s,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    let family = &summary.family;
    println!();
    println!("Family: {}", family.name);
    println!("Code: {}", family.code);
    match family.event_date {
        Some(d) => println!("Event date: {}", d),
        None => println!("Event date: (not set)"),
    }
    match family.max_budget {
        Some(b) => println!("Max budget: {}", b),
        None => println!("Max budget: (not set)"),
    }
    println!("Participants: {}", summary.participants);
    println!("Draw: {}", describe_status(summary.status));
    println!();
}

pub fn edit(ctx: &CLIContext) {
    let Some(code) = ctx.require_family() else { return };
    let family = match family_ops::get_family(ctx.store(), &code) {
        Ok(f) => f,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    println!("Editing family: {}", family.name);
    println!();

    let name = ctx
        .prompt(&format!("Name [{}]: ", family.name))
        .filter(|s| !s.is_empty());

    let current_date = family.event_date.map(|d| d.to_string()).unwrap_or_default();
    let date_input = ctx
        .prompt(&format!("Event date [{}] ('clear' to remove): ", current_date))
        .unwrap_or_default();
    let event_date = if date_input.is_empty() {
        None
    } else if date_input.eq_ignore_ascii_case("clear") {
        Some(None)
    } else {
        match NaiveDate::parse_from_str(&date_input, "%Y-%m-%d") {
            Ok(d) => Some(Some(d)),
            Err(_) => {
                println!("Invalid date. Use YYYY-MM-DD.");
                return;
            }
        }
    };

    let current_budget = family.max_budget.map(|b| b.to_string()).unwrap_or_default();
    let budget_input = ctx
        .prompt(&format!("Max budget [{}] ('clear' to remove): ", current_budget))
        .unwrap_or_default();
    let max_budget = if budget_input.is_empty() {
        None
    } else if budget_input.eq_ignore_ascii_case("clear") {
        Some(None)
    } else {
        match budget_input.parse::<i64>() {
            Ok(n) => Some(Some(n)),
            Err(_) => {
                println!("Invalid amount.");
                return;
            }
        }
    };

    match family_ops::update_family(ctx.store(), &code, name.as_deref(), event_date, max_budget) {
        Ok(f) => println!("Updated family: {}", f.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CLIContext) {
    let Some(code) = ctx.require_family() else { return };
    if !ctx.confirm(&format!("Delete family {} with all its participants and wish lists?", code)) {
        println!("Cancelled.");
        return;
    }
    match family_ops::delete_family(ctx.store(), &code) {
        Ok(()) => {
            println!("Deleted family {}", code);
            ctx.select_family(None);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn stats(ctx: &CLIContext) {
    let Some(code) = ctx.require_family() else { return };
    let summary = match stats_queries::family_summary(ctx.store(), &code, CLIContext::today()) {
        Ok(s) => s,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    println!();
    println!("{} ({})", summary.family.name, summary.family.code);
    println!("  Participants:        {}", summary.participants);
    println!("  Draw:                {}", describe_status(summary.status));
    println!("  Wish lists filled:   {}/{}", summary.wishlists_filled, summary.participants);
    println!("  Gifts wished for:    {}", summary.total_gifts);
    match summary.days_until_event {
        Some(0) => println!("  Event:               today!"),
        Some(d) if d > 0 => println!("  Event:               in {} day(s)", d),
        Some(d) => println!("  Event:               {} day(s) ago", -d),
        None => {}
    }
    println!();
}

pub fn describe_status(status: AssignmentStatus) -> &'static str {
    match status {
        AssignmentStatus::Missing => "not drawn yet",
        AssignmentStatus::Valid => "drawn",
        AssignmentStatus::Stale => "out of date (participants changed, draw again)",
    }
}

fn prompt_date(ctx: &CLIContext, prompt: &str) -> Result<Option<NaiveDate>, ()> {
    let input = ctx.prompt(prompt).unwrap_or_default();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(&input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| println!("Invalid date. Use YYYY-MM-DD."))
}

fn prompt_amount(ctx: &CLIContext, prompt: &str) -> Result<Option<i64>, ()> {
    let input = ctx.prompt(prompt).unwrap_or_default();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<i64>()
        .map(Some)
        .map_err(|_| println!("Invalid amount."))
}
