use crate::cli::context::CLIContext;
use crate::ops::participant_ops;

pub fn list(ctx: &CLIContext) {
    let Some(code) = ctx.require_family() else { return };
    let participants = match participant_ops::list_participants(ctx.store(), &code) {
        Ok(p) => p,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    if participants.is_empty() {
        println!("No participants yet. Use 'add-participant <name>' to add one.");
        return;
    }

    println!("Participants ({}):", participants.len());
    for p in &participants {
        println!("  {}  [{}]", p.name, p.id.short());
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name: ") {
            Some(s) if !s.is_empty() => s,
            _ => {
                println!("Name cannot be empty.");
                return;
            }
        }
    };

    match participant_ops::add_participant(ctx.store(), &code, &name) {
        Ok(p) => println!("Added {}", p.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn rename(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: rename-participant <name>");
        return;
    }
    let Some(participant) = ctx.find_participant(&code, args) else { return };

    let new_name = match ctx.prompt(&format!("New name [{}]: ", participant.name)) {
        Some(s) if !s.is_empty() => s,
        _ => {
            println!("Unchanged.");
            return;
        }
    };

    match participant_ops::rename_participant(ctx.store(), &code, &participant.id, &new_name) {
        Ok(p) => println!("Renamed {} to {}", participant.name, p.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn remove(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: remove-participant <name>");
        return;
    }
    let Some(participant) = ctx.find_participant(&code, args) else { return };

    if !ctx.confirm(&format!("Remove {} and their wish list?", participant.name)) {
        println!("Cancelled.");
        return;
    }

    match participant_ops::remove_participant(ctx.store(), &code, &participant.id) {
        Ok(p) => {
            println!("Removed {}", p.name);
            if ctx.store().get_assignments(&code).ok().flatten().is_some() {
                println!("The existing draw is now out of date. Run 'draw' again.");
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}
