use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::wishlist_ops::{self, GiftDraft};

pub fn show(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: wishlist <name>");
        return;
    }
    let Some(owner) = ctx.find_participant(&code, args) else { return };

    match wishlist_ops::get_wishlist(ctx.store(), &code, &owner.id) {
        Ok(list) => print_wishlist(&owner.name, &list),
        Err(e) => ctx.print_error(&e),
    }
}

/// Replace the whole list, one gift per prompt.
pub fn edit(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: edit-wishlist <name>");
        return;
    }
    let Some(owner) = ctx.find_participant(&code, args) else { return };

    println!("Enter gifts for {}, one per line. Empty line to finish.", owner.name);
    let mut drafts = Vec::new();
    loop {
        let Some(draft) = prompt_gift(ctx, drafts.len() + 1) else { break };
        drafts.push(draft);
    }

    match wishlist_ops::save_wishlist(ctx.store(), &code, &owner.id, &drafts) {
        Ok(list) => println!("Saved {} gift(s) for {}", list.gifts.len(), owner.name),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn add_gift(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: add-gift <name>");
        return;
    }
    let Some(owner) = ctx.find_participant(&code, args) else { return };
    let Some(draft) = prompt_gift(ctx, 1) else {
        println!("Cancelled.");
        return;
    };

    match wishlist_ops::add_gift(ctx.store(), &code, &owner.id, &draft) {
        Ok(list) => println!("{} now wishes for {} gift(s)", owner.name, list.gifts.len()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn remove_gift(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: remove-gift <name>");
        return;
    }
    let Some(owner) = ctx.find_participant(&code, args) else { return };

    let list = match wishlist_ops::get_wishlist(ctx.store(), &code, &owner.id) {
        Ok(l) => l,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    if list.gifts.is_empty() {
        println!("{}'s wish list is empty.", owner.name);
        return;
    }
    print_wishlist(&owner.name, &list);

    let choice = ctx.prompt("Number to remove: ").unwrap_or_default();
    let gift = match choice.parse::<usize>() {
        Ok(n) if n >= 1 && n <= list.gifts.len() => &list.gifts[n - 1],
        _ => {
            println!("Invalid choice.");
            return;
        }
    };

    match wishlist_ops::remove_gift(ctx.store(), &code, &owner.id, &gift.id) {
        Ok(_) => println!("Removed {}", gift.name),
        Err(e) => ctx.print_error(&e),
    }
}

/// Show the wish list of whoever `args` is giving to.
pub fn friend_wishlist(ctx: &CLIContext, args: &str) {
    let Some(code) = ctx.require_family() else { return };
    if args.is_empty() {
        println!("Usage: friend-wishlist <your name>");
        return;
    }
    let Some(giver) = ctx.find_participant(&code, args) else { return };

    match wishlist_ops::recipient_wishlist(ctx.store(), &code, &giver.id) {
        Ok((friend, list)) => print_wishlist(&friend.name, &list),
        Err(e) => ctx.print_error(&e),
    }
}

fn prompt_gift(ctx: &CLIContext, number: usize) -> Option<GiftDraft> {
    let name = ctx.prompt(&format!("  Gift {}: ", number)).filter(|s| !s.is_empty())?;
    let link = ctx.prompt("    Link (optional): ").filter(|s| !s.is_empty());
    let image = ctx.prompt("    Image URL (optional): ").filter(|s| !s.is_empty());
    Some(GiftDraft { name, link, image })
}

fn print_wishlist(owner: &str, list: &WishList) {
    println!();
    if list.gifts.is_empty() {
        println!("{} hasn't wished for anything yet.", owner);
        println!();
        return;
    }
    println!("{}'s wish list:", owner);
    for (i, gift) in list.gifts.iter().enumerate() {
        println!("  {}. {}", i + 1, gift.name);
        if let Some(link) = &gift.link {
            println!("     link: {}", link);
        }
        if let Some(image) = &gift.image {
            println!("     image: {}", image);
        }
    }
    println!();
}
