pub mod context;
pub mod family_commands;
pub mod participant_commands;
pub mod draw_commands;
pub mod wishlist_commands;

use crate::db::Store;
use crate::model::*;
use crate::ops::family_ops;
use context::CLIContext;

/// Run the interactive REPL against `store`, optionally starting in `family`.
pub fn run(store: Box<dyn Store>, family: Option<FamilyCode>) {
    println!("Secret Santa");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let ctx = CLIContext::new(store);

    if let Some(code) = family {
        match family_ops::get_family(ctx.store(), &code) {
            Ok(f) => {
                println!("Using {} ({})", f.name, f.code);
                ctx.select_family(Some(f.code));
            }
            Err(e) => ctx.print_error(&e),
        }
    } else {
        match family_ops::list_families(ctx.store()) {
            Ok(families) if families.len() == 1 => {
                let f = &families[0];
                println!("Using {} ({})", f.name, f.code);
                ctx.select_family(Some(f.code.clone()));
            }
            Ok(families) if families.is_empty() => {
                println!("No families yet. Use 'create-family <name>' to start.");
            }
            Ok(_) => println!("Several families found. Use 'families' and 'use <code>'."),
            Err(e) => ctx.print_error(&e),
        }
    }
    println!();

    repl_loop(&ctx);
}

fn repl_loop(ctx: &CLIContext) {
    loop {
        let prompt = match ctx.current_family() {
            Some(code) => format!("{}> ", code),
            None => "> ".to_string(),
        };
        let input = match ctx.read_line(&prompt) {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Family commands
            "families" => family_commands::list(ctx),
            "create-family" => family_commands::create(ctx, args),
            "use" | "join" => family_commands::select(ctx, args),
            "show-family" | "show" => family_commands::show(ctx),
            "edit-family" => family_commands::edit(ctx),
            "delete-family" => family_commands::delete(ctx),

            // Participant commands
            "participants" | "list" | "ls" => participant_commands::list(ctx),
            "add-participant" | "add" => participant_commands::add(ctx, args),
            "rename-participant" => participant_commands::rename(ctx, args),
            "remove-participant" => participant_commands::remove(ctx, args),

            // Draw commands
            "draw" => draw_commands::draw(ctx, args),
            "status" => draw_commands::status(ctx),
            "secret-friend" | "friend" => draw_commands::secret_friend(ctx, args),

            // Wish list commands
            "wishlist" => wishlist_commands::show(ctx, args),
            "edit-wishlist" => wishlist_commands::edit(ctx, args),
            "add-gift" => wishlist_commands::add_gift(ctx, args),
            "remove-gift" => wishlist_commands::remove_gift(ctx, args),
            "friend-wishlist" => wishlist_commands::friend_wishlist(ctx, args),

            // Other
            "stats" => family_commands::stats(ctx),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and the rest of the line.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Families:
    families                   List all families
    create-family [name]       Create a family and get its code
    use <code>                 Switch to the family with this code
    show-family                Show the current family
    edit-family                Edit name, event date and budget
    delete-family              Delete the current family

  Participants:
    participants               List participants
    add-participant [name]     Add a participant
    rename-participant <name>  Rename a participant
    remove-participant <name>  Remove a participant and their wish list

  Draw:
    draw [--regenerate]        Draw secret friends (again)
    status                     Show whether the draw is up to date
    secret-friend <name>       Reveal who <name> gives a gift to

  Wish lists:
    wishlist <name>            Show a participant's wish list
    edit-wishlist <name>       Replace a wish list
    add-gift <name>            Add one gift to a wish list
    remove-gift <name>         Remove a gift from a wish list
    friend-wishlist <name>     Show the wish list of <name>'s secret friend

  Other:
    stats                      Show family statistics
    help                       Show this help
    exit / quit / q            Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - Adding or removing people after the draw makes it stale; draw again"#);
}
