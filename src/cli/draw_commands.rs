use crate::cli::context::CLIContext;
use crate::cli::family_commands::describe_status;
use crate::ops::draw_ops::{self, AssignmentStatus};

/// `draw [--regenerate]`. Keeps an existing valid draw unless asked to redo it.
pub fn draw(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    let regenerate = matches!(args, "--regenerate" | "-r" | "again");

    let status = match draw_ops::assignment_status(ctx.store(), &code) {
        Ok(s) => s,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    if status == AssignmentStatus::Valid && !regenerate {
        println!("Assignments are already drawn. Use 'draw --regenerate' to draw again.");
        return;
    }
    if status == AssignmentStatus::Stale {
        println!("Participants changed since the last draw; drawing again.");
    }

    let regenerate = regenerate || status == AssignmentStatus::Stale;
    match draw_ops::ensure_assignments(ctx.store(), &code, regenerate, &mut rand::thread_rng()) {
        Ok(set) => {
            println!("Drawn {} pairs. Each participant can now look up their secret friend.", set.len());
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn status(ctx: &CLIContext) {
    let Some(code) = ctx.require_family() else { return };
    match draw_ops::assignment_status(ctx.store(), &code) {
        Ok(status) => println!("Draw: {}", describe_status(status)),
        Err(e) => ctx.print_error(&e),
    }
}

/// Reveal one participant's secret friend. Only the receiver is printed.
pub fn secret_friend(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: secret-friend <your name>");
        return;
    }
    let Some(giver) = ctx.find_participant(&code, args) else { return };

    match draw_ops::secret_friend(ctx.store(), &code, &giver.id) {
        Ok(friend) => println!("{}, your secret friend is: {}", giver.name, friend.name),
        Err(e) => ctx.print_error(&e),
    }
}
