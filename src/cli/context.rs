use chrono::{Local, NaiveDate};
use std::cell::RefCell;
use std::io::{self, Write};

use crate::db::Store;
use crate::model::*;
use crate::queries::participant_queries;
use crate::validation::same_name;

pub struct CLIContext {
    pub store: Box<dyn Store>,
    family: RefCell<Option<FamilyCode>>,
}

impl CLIContext {
    pub fn new(store: Box<dyn Store>) -> Self {
        Self {
            store,
            family: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// The family selected with `use`, if any.
    pub fn current_family(&self) -> Option<FamilyCode> {
        self.family.borrow().clone()
    }

    pub fn select_family(&self, code: Option<FamilyCode>) {
        *self.family.borrow_mut() = code;
    }

    /// Like `current_family`, but tells the user what to do when none is selected.
    pub fn require_family(&self) -> Option<FamilyCode> {
        let code = self.current_family();
        if code.is_none() {
            println!("No family selected. Use 'use <code>' or 'create-family' first.");
        }
        code
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Ask a yes/no question; anything but y/yes is no.
    pub fn confirm(&self, question: &str) -> bool {
        matches!(
            self.prompt(&format!("{} [y/N]: ", question)).as_deref(),
            Some("y") | Some("Y") | Some("yes") | Some("Yes")
        )
    }

    /// Find a participant of the current family by name query. Prints an
    /// error if nothing or more than one person matches.
    pub fn find_participant(&self, code: &FamilyCode, args: &str) -> Option<Participant> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let matches = match participant_queries::find_by_name(self.store(), code, query) {
            Ok(m) => m,
            Err(e) => {
                self.print_error(&e);
                return None;
            }
        };

        match matches.len() {
            0 => {
                println!("No participant found matching '{}'", query);
                None
            }
            1 => matches.into_iter().next(),
            _ => {
                if let Some(exact) = matches.iter().find(|p| same_name(&p.name, query)) {
                    return Some(exact.clone());
                }
                println!("Multiple matches found:");
                for p in &matches {
                    println!("  {}", p.name);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Print an error, with a hint when drawing again would fix it.
    pub fn print_error(&self, e: &crate::error::SantaError) {
        println!("Error: {}", e);
        if e.needs_redraw() {
            println!("Hint: run 'draw' to (re)generate assignments.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn context_with(names: &[&str]) -> (CLIContext, FamilyCode) {
        let ctx = CLIContext::new(Box::new(MemoryStore::new()));
        let code = FamilyCode::parse("TIA100").unwrap();
        ctx.store()
            .insert_family(&Family::create(code.clone(), "Tías".into()))
            .unwrap();
        for name in names {
            ctx.store()
                .insert_participant(&code, &Participant::create(name.to_string()))
                .unwrap();
        }
        (ctx, code)
    }

    #[test]
    fn exact_name_wins_over_partial_matches() {
        let (ctx, code) = context_with(&["Ana", "Anabel"]);
        assert_eq!(ctx.find_participant(&code, "ana").unwrap().name, "Ana");
        assert!(ctx.find_participant(&code, "an").is_none());
    }

    #[test]
    fn exact_match_ignores_non_ascii_case() {
        let (ctx, code) = context_with(&["Tía", "Tía Rosa"]);
        let found = ctx.find_participant(&code, "TÍA").unwrap();
        assert_eq!(found.name, "Tía");
    }
}
